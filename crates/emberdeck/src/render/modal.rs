use eframe::egui::{self, Color32, RichText};

use crate::theme::Theme;

const DIALOG_WIDTH: f32 = 380.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Primary,
    Secondary,
}

/// Show a modal dialog for this frame. The dialog exists only while the
/// caller keeps calling this; there is nothing to tear down.
pub fn dialog<R>(
    ctx: &egui::Context,
    id: &'static str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Modal::new(egui::Id::new(id))
        .show(ctx, |ui| {
            ui.set_width(DIALOG_WIDTH);
            ui.vertical_centered(|ui| add_contents(ui)).inner
        })
        .inner
}

pub fn title(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(text).size(24.0).strong().color(theme.accent));
    ui.add_space(6.0);
}

pub fn body(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    ui.label(RichText::new(text).size(15.0).color(theme.muted));
    ui.add_space(12.0);
}

/// Inline warning, e.g. after a wrong password.
pub fn hint(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    egui::Frame::new()
        .fill(Theme::with_opacity(theme.accent, 0.12))
        .corner_radius(6)
        .inner_margin(egui::Margin::symmetric(12, 6))
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(14.0).color(theme.accent));
        });
    ui.add_space(8.0);
}

pub fn primary_button(ui: &mut egui::Ui, theme: &Theme, label: &str) -> bool {
    let button = egui::Button::new(RichText::new(label).size(16.0).color(Color32::WHITE))
        .fill(theme.accent)
        .min_size(egui::vec2(DIALOG_WIDTH - 40.0, 40.0));
    ui.add(button).clicked()
}

pub fn secondary_button(ui: &mut egui::Ui, theme: &Theme, label: &str) -> bool {
    let button = egui::Button::new(RichText::new(label).size(14.0).color(theme.muted))
        .frame(false)
        .min_size(egui::vec2(DIALOG_WIDTH - 40.0, 32.0));
    ui.add(button).clicked()
}

/// A primary action above a quieter secondary one.
pub fn choice(ui: &mut egui::Ui, theme: &Theme, primary: &str, secondary: &str) -> Option<Choice> {
    let mut picked = None;
    if primary_button(ui, theme, primary) {
        picked = Some(Choice::Primary);
    }
    ui.add_space(4.0);
    if secondary_button(ui, theme, secondary) {
        picked = Some(Choice::Secondary);
    }
    ui.add_space(4.0);
    picked
}

/// Password field with a show/hide toggle. Returns true when Enter was
/// pressed inside the field.
pub fn password_field(
    ui: &mut egui::Ui,
    value: &mut String,
    reveal: &mut bool,
    placeholder: &str,
) -> bool {
    let mut submitted = false;
    ui.horizontal(|ui| {
        let edit = egui::TextEdit::singleline(value)
            .password(!*reveal)
            .hint_text(placeholder)
            .desired_width(DIALOG_WIDTH - 100.0);
        let response = ui.add(edit);
        if !response.has_focus() && !response.lost_focus() && value.is_empty() {
            response.request_focus();
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submitted = true;
        }
        let toggle = if *reveal { "Hide" } else { "Show" };
        if ui.button(toggle).clicked() {
            *reveal = !*reveal;
        }
    });
    ui.add_space(12.0);
    submitted
}
