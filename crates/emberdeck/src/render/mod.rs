pub mod modal;

use eframe::egui::{self, Color32, RichText};

use crate::deck::Block;
use crate::theme::Theme;

/// Something the user did inside slide content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideAction {
    ToggleScroll,
}

/// Slides are authored against a 1920x1080 canvas and scaled to fit.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

pub struct SlideView<'a> {
    pub blocks: &'a [Block],
    pub background: Option<Color32>,
    pub theme: &'a Theme,
    pub scroll_enabled: bool,
    pub selectable: bool,
    pub index: usize,
}

/// Render one slide into `rect`. In scroll mode content can grow past
/// the bottom edge; otherwise it is clipped to the slide.
pub fn render_slide(
    ui: &mut egui::Ui,
    view: &SlideView<'_>,
    rect: egui::Rect,
) -> Option<SlideAction> {
    let bg = view.background.unwrap_or(view.theme.background);
    ui.painter().rect_filled(rect, 0.0, bg);

    // Keep text legible on narrow windows where the 16:9 scale collapses.
    let scale = compute_scale(rect).max(0.35);
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);

    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(content_rect)
            .layout(egui::Layout::top_down(egui::Align::Min))
            .id_salt(("slide", view.index)),
    );
    child.set_clip_rect(content_rect);

    if view.scroll_enabled {
        egui::ScrollArea::vertical()
            .id_salt(("slide_scroll", view.index))
            .auto_shrink([false, false])
            .show(&mut child, |ui| draw_blocks(ui, view, scale))
            .inner
    } else {
        draw_blocks(&mut child, view, scale)
    }
}

fn draw_blocks(ui: &mut egui::Ui, view: &SlideView<'_>, scale: f32) -> Option<SlideAction> {
    let theme = view.theme;
    let gap = 24.0 * scale;
    let mut action = None;

    for block in view.blocks {
        match block {
            Block::Heading { level, text } => {
                let text = RichText::new(text)
                    .size(theme.heading_size(*level) * scale)
                    .color(theme.heading_color)
                    .strong();
                ui.add(egui::Label::new(text).selectable(view.selectable));
            }
            Block::Paragraph(text) => {
                let text = RichText::new(text)
                    .size(theme.body_size * scale)
                    .color(theme.foreground);
                ui.add(egui::Label::new(text).wrap().selectable(view.selectable));
            }
            Block::Bullets(items) => {
                for item in items {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            RichText::new("\u{2022}")
                                .size(theme.body_size * scale)
                                .color(theme.accent),
                        );
                        let text = RichText::new(item)
                            .size(theme.body_size * scale)
                            .color(theme.foreground);
                        ui.add(egui::Label::new(text).wrap().selectable(view.selectable));
                    });
                }
            }
            Block::ScrollToggle => {
                let label = if view.scroll_enabled {
                    "Disable scroll mode"
                } else {
                    "Enable scroll mode"
                };
                let button = egui::Button::new(
                    RichText::new(label)
                        .size((theme.body_size * 0.6 * scale).max(14.0))
                        .color(Color32::WHITE),
                )
                .fill(theme.accent);
                if ui.add(button).clicked() {
                    action = Some(SlideAction::ToggleScroll);
                }
            }
        }
        ui.add_space(gap);
    }

    action
}

/// Slide counter in the bottom-right corner.
pub fn draw_counter(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, current: usize, total: usize) {
    let counter_text = format!("{} / {}", current + 1, total);
    let counter_color = Theme::with_opacity(theme.foreground, 0.3);
    let counter_galley = ui.painter().layout_no_wrap(
        counter_text,
        egui::FontId::monospace(14.0),
        counter_color,
    );
    let counter_pos = egui::pos2(
        rect.right() - counter_galley.rect.width() - 16.0,
        rect.bottom() - 30.0,
    );
    ui.painter().galley(counter_pos, counter_galley, counter_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_scale() {
        let full = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert_eq!(compute_scale(full), 1.0);

        let tall = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 2000.0));
        assert_eq!(compute_scale(tall), 0.5);
    }
}
