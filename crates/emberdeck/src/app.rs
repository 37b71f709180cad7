use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::controller::modals::Modal;
use crate::controller::{Effect, Key, PresentationController, Settings};
use crate::deck::{self, Deck};
use crate::render::modal::{self, Choice};
use crate::render::{self, SlideAction, SlideView};
use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::theme::{Theme, ThemeMode};

const CONTROLS_FADE: f32 = 0.2;

/// Translate an egui key press into a controller key. Shortcuts with
/// modifiers held belong to the platform, not the deck.
fn map_key(key: egui::Key, modifiers: egui::Modifiers) -> Option<Key> {
    if !modifiers.is_none() {
        return None;
    }
    match key {
        egui::Key::ArrowRight => Some(Key::ArrowRight),
        egui::Key::ArrowLeft => Some(Key::ArrowLeft),
        egui::Key::Space => Some(Key::Space),
        egui::Key::H => Some(Key::Char('h')),
        _ => None,
    }
}

struct PresentationApp {
    deck: Deck,
    controller: PresentationController,
    gate_hint: Option<String>,
    password_input: String,
    reveal_password: bool,
    new_password_input: String,
    reveal_new_password: bool,
    /// Text of the slide number field while the user is editing it
    jump_input: String,
    jump_editing: bool,
}

impl PresentationApp {
    fn new(deck: Deck, controller: PresentationController, gate_hint: Option<String>) -> Self {
        Self {
            deck,
            controller,
            gate_hint,
            password_input: String::new(),
            reveal_password: false,
            new_password_input: String::new(),
            reveal_new_password: false,
            jump_input: String::new(),
            jump_editing: false,
        }
    }

    fn theme(&self) -> Theme {
        Theme::for_mode(self.controller.theme())
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let keys: Vec<Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => map_key(*key, *modifiers),
                    _ => None,
                })
                .collect()
        });
        for key in keys {
            self.controller.handle_key(key);
        }
    }

    fn apply_effects(&mut self, ctx: &egui::Context) {
        for effect in self.controller.take_effects() {
            match effect {
                Effect::EnterFullscreen => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
                }
            }
        }
    }

    fn draw_password_gate(&mut self, ctx: &egui::Context, theme: &Theme) {
        let title = self.deck.title().to_string();
        let wrong = self.controller.has_attempted_wrong();
        let hint = self.gate_hint.clone();

        let submitted = modal::dialog(ctx, "password_gate", |ui| {
            modal::title(ui, theme, &title);
            modal::body(ui, theme, "This presentation is password protected.");
            if wrong {
                let message = match &hint {
                    Some(h) => format!("Incorrect password. Hint: {h}"),
                    None => "Incorrect password, try again.".to_string(),
                };
                modal::hint(ui, theme, &message);
            }
            let entered = modal::password_field(
                ui,
                &mut self.password_input,
                &mut self.reveal_password,
                "Enter password",
            );
            let clicked = modal::primary_button(ui, theme, "Enter presentation");
            ui.add_space(8.0);
            entered || clicked
        });

        if submitted {
            let candidate = std::mem::take(&mut self.password_input);
            self.controller.submit_password(&candidate);
        }
    }

    fn draw_active_modal(&mut self, ctx: &egui::Context, theme: &Theme) {
        let Some(active) = self.controller.active_modal() else {
            return;
        };
        match active {
            Modal::RotationWarning => {
                modal::dialog(ctx, "rotation_warning", |ui| {
                    modal::title(ui, theme, "Rotate your device");
                    modal::body(
                        ui,
                        theme,
                        "Slides need a landscape window. Rotate the screen or widen the window.",
                    );
                });
            }
            Modal::ThemeConfirm => {
                let picked = modal::dialog(ctx, "theme_confirm", |ui| {
                    modal::title(ui, theme, "Switch to light mode?");
                    modal::body(
                        ui,
                        theme,
                        "Light slides are hard on the eyes in a dark room.",
                    );
                    modal::choice(ui, theme, "Switch anyway", "Keep dark mode")
                });
                match picked {
                    Some(Choice::Primary) => self.controller.confirm_theme_switch(),
                    Some(Choice::Secondary) => self.controller.cancel_theme_switch(),
                    None => {}
                }
            }
            Modal::SetPassword => {
                let rejected = self.controller.new_password_rejected();
                let picked = modal::dialog(ctx, "set_password", |ui| {
                    modal::title(ui, theme, "Set a password");
                    modal::body(
                        ui,
                        theme,
                        "The next launch will ask for it before showing any slide.",
                    );
                    if rejected {
                        modal::hint(ui, theme, "The password cannot be empty.");
                    }
                    let entered = modal::password_field(
                        ui,
                        &mut self.new_password_input,
                        &mut self.reveal_new_password,
                        "New password",
                    );
                    let picked = modal::choice(ui, theme, "Set password", "Cancel");
                    if entered && picked.is_none() {
                        Some(Choice::Primary)
                    } else {
                        picked
                    }
                });
                match picked {
                    Some(Choice::Primary) => {
                        let secret = std::mem::take(&mut self.new_password_input);
                        self.controller.submit_new_password(&secret);
                    }
                    Some(Choice::Secondary) => {
                        self.new_password_input.clear();
                        self.controller.cancel_set_password();
                    }
                    None => {}
                }
            }
            Modal::LightModePrompt => {
                let picked = modal::dialog(ctx, "light_mode_prompt", |ui| {
                    modal::title(ui, theme, "Light mode is on");
                    modal::body(ui, theme, "Slides read best in dark mode. Switch now?");
                    modal::choice(ui, theme, "Switch to dark mode", "Stay in light mode")
                });
                match picked {
                    Some(Choice::Primary) => self.controller.accept_light_mode_prompt(),
                    Some(Choice::Secondary) => self.controller.decline_light_mode_prompt(),
                    None => {}
                }
            }
            Modal::FullscreenPrompt => {
                let picked = modal::dialog(ctx, "fullscreen_prompt", |ui| {
                    modal::title(ui, theme, "Go fullscreen?");
                    modal::body(ui, theme, "Presentations look best without window chrome.");
                    modal::choice(ui, theme, "Go fullscreen", "Maybe later")
                });
                match picked {
                    Some(Choice::Primary) => self.controller.accept_fullscreen(),
                    Some(Choice::Secondary) => self.controller.decline_fullscreen(),
                    None => {}
                }
            }
        }
    }

    fn draw_controls(&mut self, ctx: &egui::Context, theme: &Theme) {
        let opacity = ctx.animate_bool_with_time(
            egui::Id::new("controls_visible"),
            self.controller.controls_visible(),
            CONTROLS_FADE,
        );
        if opacity <= 0.0 {
            return;
        }

        if !self.jump_editing {
            self.jump_input = (self.controller.current_index() + 1).to_string();
        }

        egui::Area::new(egui::Id::new("controls"))
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(16.0, -16.0))
            .interactable(opacity > 0.5)
            .show(ctx, |ui| {
                ui.set_opacity(opacity);
                egui::Frame::new()
                    .fill(theme.panel)
                    .corner_radius(8)
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let theme_label = match self.controller.theme() {
                                ThemeMode::Dark => "\u{2600}",
                                ThemeMode::Light => "\u{263E}",
                            };
                            if ui
                                .button(theme_label)
                                .on_hover_text("Toggle theme")
                                .clicked()
                            {
                                self.controller.request_theme_toggle();
                            }

                            ui.separator();

                            let prev = egui::Button::new("\u{2039}");
                            if ui.add_enabled(!self.controller.is_first(), prev).clicked() {
                                self.controller.prev();
                            }

                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.jump_input)
                                    .desired_width(36.0)
                                    .horizontal_align(egui::Align::Center),
                            );
                            self.jump_editing = response.has_focus();
                            if response.changed() {
                                self.controller.jump_to_input(&self.jump_input);
                            }
                            ui.label(
                                egui::RichText::new(format!("/ {}", self.controller.slide_count()))
                                    .color(theme.muted),
                            );

                            let next = egui::Button::new("\u{203A}");
                            if ui.add_enabled(!self.controller.is_last(), next).clicked() {
                                self.controller.next();
                            }

                            ui.separator();

                            let select_label = match (
                                self.controller.text_selectable(),
                                self.controller.is_mobile(),
                            ) {
                                (true, false) => "Disable select",
                                (false, false) => "Enable select",
                                (true, true) => "No select",
                                (false, true) => "Select",
                            };
                            if ui.button(select_label).clicked() {
                                self.controller.toggle_text_selectable();
                            }

                            if ui
                                .button("Lock")
                                .on_hover_text("Protect this presentation with a password")
                                .clicked()
                            {
                                self.controller.open_set_password();
                            }
                        });
                    });
            });
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let theme = self.theme();
        ctx.set_visuals(theme.visuals());

        let is_fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
        self.controller.observe_fullscreen(is_fullscreen);
        self.controller.tick(now);

        if self.controller.is_unlocked() {
            self.handle_keyboard(ctx);
        }

        let bg = theme.background;
        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(bg))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.controller.on_resize(rect.width(), rect.height(), now);

                if !self.controller.is_unlocked() {
                    return;
                }

                let index = self.controller.current_index();
                let blocks = self.controller.current_blocks(&self.deck);
                let view = SlideView {
                    blocks: &blocks,
                    background: self.deck.slides.get(index).and_then(|s| s.background),
                    theme: &theme,
                    scroll_enabled: self.controller.scroll_enabled(),
                    selectable: self.controller.text_selectable(),
                    index,
                };
                action = render::render_slide(ui, &view, rect);
                render::draw_counter(ui, &theme, rect, index, self.controller.slide_count());
            });

        if let Some(SlideAction::ToggleScroll) = action {
            self.controller.press_slide_toggle(&self.deck);
        }

        if self.controller.is_unlocked() {
            self.draw_controls(ctx, &theme);
            self.draw_active_modal(ctx, &theme);
        } else {
            self.draw_password_gate(ctx, &theme);
        }

        self.apply_effects(ctx);

        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

impl Drop for PresentationApp {
    fn drop(&mut self) {
        self.controller.teardown();
    }
}

fn open_store() -> Box<dyn KeyValueStore> {
    match FileStore::open() {
        Ok(store) => {
            tracing::debug!(path = %store.location().display(), "opened state store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("state will not be saved: {e}");
            Box::new(MemoryStore::new())
        }
    }
}

pub fn run(
    file: Option<PathBuf>,
    windowed: bool,
    start_slide: Option<usize>,
) -> anyhow::Result<()> {
    let deck = match &file {
        Some(path) => deck::load(path)?,
        None => deck::demo()?,
    };

    let config = Config::load_or_default();
    let settings = Settings::from_config(&config, deck.meta.theme.as_deref());
    let windowed = windowed || config.windowed();
    let gate_hint = config.gate_hint().map(str::to_string);

    let title = deck.title().to_string();

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::info!(title = %title, slides = deck.len(), "starting presentation");

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            let mut controller =
                PresentationController::new(open_store(), deck.len(), settings, Instant::now());
            if let Some(slide) = start_slide {
                // --slide N overrides the remembered position
                controller.jump_to(slide as i64);
            }
            Ok(Box::new(PresentationApp::new(deck, controller, gate_hint)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key_plain_presses() {
        let none = egui::Modifiers::NONE;
        assert_eq!(map_key(egui::Key::ArrowRight, none), Some(Key::ArrowRight));
        assert_eq!(map_key(egui::Key::ArrowLeft, none), Some(Key::ArrowLeft));
        assert_eq!(map_key(egui::Key::Space, none), Some(Key::Space));
        assert_eq!(map_key(egui::Key::H, none), Some(Key::Char('h')));
        assert_eq!(map_key(egui::Key::X, none), None);
    }

    #[test]
    fn test_map_key_ignores_shortcuts() {
        assert_eq!(map_key(egui::Key::H, egui::Modifiers::CTRL), None);
        assert_eq!(map_key(egui::Key::H, egui::Modifiers::COMMAND), None);
        assert_eq!(map_key(egui::Key::ArrowRight, egui::Modifiers::ALT), None);
    }
}
