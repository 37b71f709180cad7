use crate::store::{KeyValueStore, keys};
use crate::theme::ThemeMode;

/// Dialogs drawn over the slides. The password prompt is not listed:
/// while the gate is closed it replaces the slide view entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    RotationWarning,
    ThemeConfirm,
    SetPassword,
    LightModePrompt,
    FullscreenPrompt,
}

/// Which dialogs are currently wanted. Each one is visible for exactly
/// as long as its flag is set; only the highest-priority one is shown.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub rotation_warning: bool,
    pub theme_confirm: bool,
    pub set_password: bool,
    pub light_mode_prompt: bool,
    pub fullscreen_prompt: bool,
}

impl ModalState {
    pub fn active(&self) -> Option<Modal> {
        if self.rotation_warning {
            Some(Modal::RotationWarning)
        } else if self.theme_confirm {
            Some(Modal::ThemeConfirm)
        } else if self.set_password {
            Some(Modal::SetPassword)
        } else if self.light_mode_prompt {
            Some(Modal::LightModePrompt)
        } else if self.fullscreen_prompt {
            Some(Modal::FullscreenPrompt)
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::RotationWarning => self.rotation_warning,
            Modal::ThemeConfirm => self.theme_confirm,
            Modal::SetPassword => self.set_password,
            Modal::LightModePrompt => self.light_mode_prompt,
            Modal::FullscreenPrompt => self.fullscreen_prompt,
        }
    }
}

pub fn should_prompt_fullscreen(store: &dyn KeyValueStore, is_fullscreen: bool) -> bool {
    !is_fullscreen && !store.flag(keys::FULLSCREEN_DISMISSED)
}

pub fn should_prompt_light_mode(store: &dyn KeyValueStore, theme: ThemeMode) -> bool {
    theme == ThemeMode::Light && !store.flag(keys::LIGHT_MODE_DISMISSED)
}
