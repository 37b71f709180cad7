//! The presentation controller: slide position, password gate, advisory
//! dialogs and viewport-derived flags. It never touches egui; the app
//! feeds it events and applies the [`Effect`]s it asks for.

pub mod auth;
pub mod modals;
pub mod navigation;
pub mod timer;
pub mod viewport;

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::deck::{Block, Deck, ScrollContext};
use crate::store::{KeyValueStore, keys};
use crate::theme::ThemeMode;

use auth::AuthGate;
use modals::{Modal, ModalState};
use navigation::SlideNavigator;
use timer::{TimerKind, Timers};
use viewport::ViewportWatcher;

/// Keys the controller understands. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Char(char),
}

/// Something the host window has to do on the controller's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    EnterFullscreen,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub fullscreen_delay: Duration,
    pub orientation_settle: Duration,
    pub default_theme: ThemeMode,
    /// 0-indexed slide used when no position is stored.
    pub start_index: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fullscreen_delay: Duration::from_millis(crate::config::DEFAULT_FULLSCREEN_DELAY_MS),
            orientation_settle: Duration::from_millis(
                crate::config::DEFAULT_ORIENTATION_SETTLE_MS,
            ),
            default_theme: ThemeMode::Dark,
            start_index: 0,
        }
    }
}

impl Settings {
    /// User config wins over the deck's own theme preference.
    pub fn from_config(config: &Config, deck_theme: Option<&str>) -> Self {
        let default_theme = config
            .default_theme()
            .and_then(ThemeMode::from_name)
            .or_else(|| deck_theme.and_then(ThemeMode::from_name))
            .unwrap_or_default();
        Self {
            fullscreen_delay: config.fullscreen_delay(),
            orientation_settle: config.orientation_settle(),
            default_theme,
            start_index: config
                .start_slide()
                .map(|s| s.saturating_sub(1))
                .unwrap_or(0),
        }
    }
}

pub struct PresentationController {
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    nav: SlideNavigator,
    auth: AuthGate,
    theme: ThemeMode,
    modals: ModalState,
    viewport: ViewportWatcher,
    timers: Timers,
    is_fullscreen: Option<bool>,
    controls_visible: bool,
    text_selectable: bool,
    new_password_rejected: bool,
    effects: Vec<Effect>,
}

impl PresentationController {
    pub fn new(
        mut store: Box<dyn KeyValueStore>,
        slide_count: usize,
        settings: Settings,
        now: Instant,
    ) -> Self {
        let nav = SlideNavigator::restore(store.as_mut(), slide_count, settings.start_index);
        let auth = AuthGate::load(store.as_ref());
        let theme = store
            .get(keys::THEME)
            .and_then(|name| ThemeMode::from_name(&name))
            .unwrap_or(settings.default_theme);

        let modals = ModalState {
            light_mode_prompt: modals::should_prompt_light_mode(store.as_ref(), theme),
            ..Default::default()
        };

        let mut timers = Timers::default();
        timers.schedule(TimerKind::FullscreenCheck, now + settings.fullscreen_delay);

        tracing::debug!(
            slide = nav.index(),
            slide_count,
            unlocked = auth.is_open(),
            theme = theme.as_str(),
            "controller ready"
        );

        Self {
            store,
            settings,
            nav,
            auth,
            theme,
            modals,
            viewport: ViewportWatcher::default(),
            timers,
            is_fullscreen: None,
            controls_visible: true,
            text_selectable: false,
            new_password_rejected: false,
            effects: Vec::new(),
        }
    }

    // --- Navigation ---

    pub fn current_index(&self) -> usize {
        self.nav.index()
    }

    pub fn slide_count(&self) -> usize {
        self.nav.count()
    }

    pub fn is_first(&self) -> bool {
        self.nav.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.nav.is_last()
    }

    pub fn next(&mut self) -> bool {
        let moved = self.nav.next(self.store.as_mut());
        if moved {
            tracing::debug!(slide = self.nav.index(), "next slide");
        }
        moved
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.nav.prev(self.store.as_mut());
        if moved {
            tracing::debug!(slide = self.nav.index(), "previous slide");
        }
        moved
    }

    pub fn jump_to(&mut self, number: i64) -> bool {
        let moved = self.nav.jump_to(self.store.as_mut(), number);
        if moved {
            tracing::debug!(slide = self.nav.index(), "jumped");
        }
        moved
    }

    pub fn jump_to_input(&mut self, input: &str) -> bool {
        let moved = self.nav.jump_to_input(self.store.as_mut(), input);
        if moved {
            tracing::debug!(slide = self.nav.index(), "jumped");
        }
        moved
    }

    /// Returns whether the key was recognised. Keys do nothing while the
    /// gate is closed or a dialog is up.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.auth.is_open() || self.modals.active().is_some() {
            return false;
        }
        match key {
            Key::ArrowRight | Key::Space => {
                self.next();
                true
            }
            Key::ArrowLeft => {
                self.prev();
                true
            }
            Key::Char(c) if c.eq_ignore_ascii_case(&'h') => {
                self.toggle_controls();
                true
            }
            _ => false,
        }
    }

    /// Build the current slide's blocks, running the callback form with
    /// the current scroll mode and applying any change it requests.
    pub fn current_blocks(&mut self, deck: &Deck) -> Vec<Block> {
        let scroll = ScrollContext::new(self.viewport.scroll_enabled());
        self.run_slide(deck, scroll)
    }

    /// The current slide's toggle was clicked. The slide's callback
    /// decides what scroll mode to ask for.
    pub fn press_slide_toggle(&mut self, deck: &Deck) {
        let scroll = ScrollContext::pressed(self.viewport.scroll_enabled());
        self.run_slide(deck, scroll);
    }

    fn run_slide(&mut self, deck: &Deck, scroll: ScrollContext) -> Vec<Block> {
        let Some(slide) = deck.slides.get(self.nav.index()) else {
            return Vec::new();
        };
        let blocks = slide.blocks(&scroll);
        if let Some(enabled) = scroll.into_request() {
            tracing::debug!(enabled, "slide changed scroll mode");
            self.set_scroll_enabled(enabled);
        }
        blocks
    }

    // --- Gate ---

    pub fn is_unlocked(&self) -> bool {
        self.auth.is_open()
    }

    pub fn has_attempted_wrong(&self) -> bool {
        self.auth.has_attempted_wrong()
    }

    pub fn submit_password(&mut self, candidate: &str) -> bool {
        self.auth.submit(self.store.as_mut(), candidate)
    }

    pub fn open_set_password(&mut self) {
        self.new_password_rejected = false;
        self.modals.set_password = true;
    }

    pub fn submit_new_password(&mut self, secret: &str) -> bool {
        if !self.modals.set_password {
            return false;
        }
        if self.auth.set_password(self.store.as_mut(), secret) {
            self.modals.set_password = false;
            self.new_password_rejected = false;
            true
        } else {
            self.new_password_rejected = true;
            false
        }
    }

    pub fn cancel_set_password(&mut self) {
        self.modals.set_password = false;
        self.new_password_rejected = false;
    }

    pub fn new_password_rejected(&self) -> bool {
        self.new_password_rejected
    }

    // --- Advisory dialogs ---

    pub fn active_modal(&self) -> Option<Modal> {
        self.modals.active()
    }

    #[cfg(test)]
    pub fn is_modal_open(&self, modal: Modal) -> bool {
        self.modals.is_open(modal)
    }

    /// Go fullscreen. Closes the prompt for this session without
    /// remembering anything, unlike [`Self::decline_fullscreen`].
    pub fn accept_fullscreen(&mut self) {
        if !self.modals.fullscreen_prompt {
            return;
        }
        self.modals.fullscreen_prompt = false;
        self.effects.push(Effect::EnterFullscreen);
        tracing::debug!("fullscreen prompt accepted");
    }

    pub fn decline_fullscreen(&mut self) {
        if !self.modals.fullscreen_prompt {
            return;
        }
        self.modals.fullscreen_prompt = false;
        self.store.set_flag(keys::FULLSCREEN_DISMISSED);
        tracing::debug!("fullscreen prompt dismissed permanently");
    }

    /// Switch to dark. Like accepting fullscreen, this sets no
    /// dismissal flag.
    pub fn accept_light_mode_prompt(&mut self) {
        if !self.modals.light_mode_prompt {
            return;
        }
        self.modals.light_mode_prompt = false;
        self.set_theme(ThemeMode::Dark);
    }

    pub fn decline_light_mode_prompt(&mut self) {
        if !self.modals.light_mode_prompt {
            return;
        }
        self.modals.light_mode_prompt = false;
        self.store.set_flag(keys::LIGHT_MODE_DISMISSED);
        tracing::debug!("light mode prompt dismissed permanently");
    }

    /// Report the window's fullscreen state. Only changes after the
    /// first report trigger a re-check of the fullscreen prompt.
    pub fn observe_fullscreen(&mut self, is_fullscreen: bool) {
        let previous = self.is_fullscreen.replace(is_fullscreen);
        if previous.is_some_and(|p| p != is_fullscreen) {
            tracing::debug!(is_fullscreen, "fullscreen changed");
            self.check_fullscreen_prompt();
        }
    }

    fn check_fullscreen_prompt(&mut self) {
        let is_fullscreen = self.is_fullscreen.unwrap_or(false);
        if modals::should_prompt_fullscreen(self.store.as_ref(), is_fullscreen) {
            if !self.modals.fullscreen_prompt {
                tracing::debug!("showing fullscreen prompt");
            }
            self.modals.fullscreen_prompt = true;
        } else if is_fullscreen {
            self.modals.fullscreen_prompt = false;
        }
    }

    // --- Theme ---

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Dark to light asks first; light to dark happens at once.
    pub fn request_theme_toggle(&mut self) {
        match self.theme {
            ThemeMode::Dark => self.modals.theme_confirm = true,
            ThemeMode::Light => self.set_theme(ThemeMode::Dark),
        }
    }

    pub fn confirm_theme_switch(&mut self) {
        if !self.modals.theme_confirm {
            return;
        }
        self.modals.theme_confirm = false;
        self.set_theme(self.theme.toggled());
    }

    pub fn cancel_theme_switch(&mut self) {
        self.modals.theme_confirm = false;
    }

    fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
        self.store.set(keys::THEME, mode.as_str());
        tracing::info!(theme = mode.as_str(), "theme changed");
    }

    // --- Viewport ---

    pub fn on_resize(&mut self, width: f32, height: f32, now: Instant) {
        let observation = self.viewport.observe(width, height);
        if !observation.resized {
            return;
        }
        self.refresh_rotation_warning();
        if observation.orientation_changed {
            self.timers.schedule(
                TimerKind::OrientationSettle,
                now + self.settings.orientation_settle,
            );
        }
    }

    fn refresh_rotation_warning(&mut self) {
        let show = self.viewport.is_portrait_narrow();
        if show != self.modals.rotation_warning {
            tracing::debug!(show, "rotation warning");
        }
        self.modals.rotation_warning = show;
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile()
    }

    pub fn scroll_enabled(&self) -> bool {
        self.viewport.scroll_enabled()
    }

    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.viewport.set_scroll_enabled(enabled);
    }

    // --- Transient flags ---

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn toggle_controls(&mut self) {
        self.controls_visible = !self.controls_visible;
    }

    pub fn text_selectable(&self) -> bool {
        self.text_selectable
    }

    pub fn toggle_text_selectable(&mut self) {
        self.text_selectable = !self.text_selectable;
    }

    // --- Timers and effects ---

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for kind in self.timers.take_due(now) {
            match kind {
                TimerKind::FullscreenCheck => self.check_fullscreen_prompt(),
                TimerKind::OrientationSettle => self.refresh_rotation_warning(),
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Drop pending timers. Called when the window closes.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        self.effects.clear();
    }

    #[cfg(test)]
    fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }
}
