// src/ui/keyboard_view.rs
use crate::keyboard::{Key, KeyboardLayout, TapHandler};
use crate::theme::PianoKeyTheme;
use crate::theory::pitch_class_name;
use egui::{epaint::StrokeKind, pos2, vec2, Align2, FontId, Painter, Rect, Sense, Stroke, Ui};
use std::collections::BTreeSet;

const WHITE_BORDER_WIDTH: f32 = 2.0;
const BLACK_BORDER_WIDTH: f32 = 2.4;
const WHITE_LABEL_SIZE: f32 = 10.0;
const BLACK_LABEL_SIZE: f32 = 9.0;
const WHITE_BADGE_SIZE: f32 = 12.0;
const BLACK_BADGE_SIZE: f32 = 11.0;
const C_MARKER_HEIGHT: f32 = 3.0;

/// What the keyboard needs to know to paint one frame.
pub struct KeyboardView<'a> {
    pub members: &'a BTreeSet<u8>,
    pub root_pc: u8,
    pub prefer_flats: bool,
    pub show_labels: bool,
    pub theme: &'a PianoKeyTheme,
}

impl KeyboardView<'_> {
    /// Paints the keyboard into `height` pixels of the available width and forwards
    /// clicks on a key to `on_tap`.
    pub fn show(&self, ui: &mut Ui, height: f32, on_tap: &mut dyn TapHandler) {
        let size = vec2(ui.available_width(), height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let layout = KeyboardLayout::new(rect);

        if ui.is_rect_visible(rect) {
            self.paint(&ui.painter_at(rect), &layout);
        }

        if response.clicked() {
            if let Some(pc) = response
                .interact_pointer_pos()
                .and_then(|pos| layout.hit_test(pos))
            {
                on_tap.on_tap(pc);
            }
        }
    }

    pub fn paint(&self, painter: &Painter, layout: &KeyboardLayout) {
        painter.rect_filled(layout.bounds(), 0.0, self.theme.background);

        for key in layout.white_keys() {
            self.paint_white_key(painter, key);
        }
        // Black keys go on top
        for key in layout.black_keys() {
            self.paint_black_key(painter, key);
        }
    }

    fn paint_white_key(&self, painter: &Painter, key: &Key) {
        let theme = self.theme;
        let r = key.rect;
        let border = Stroke::new(WHITE_BORDER_WIDTH, theme.white_outline_color);

        painter.rect(r, 0.0, theme.white_key_color, border, StrokeKind::Middle);

        if self.members.contains(&key.pc) {
            painter.rect_filled(r, 0.0, theme.highlight_color);
            // Redraw the border so the edges stay visible over the highlight
            painter.rect_stroke(r.shrink(1.0), 0.0, border, StrokeKind::Middle);
        }

        // Orientation stripe on every C
        if key.pc == 0 {
            let stripe = Rect::from_min_size(
                r.min + vec2(2.0, 2.0),
                vec2(r.width() - 4.0, C_MARKER_HEIGHT),
            );
            painter.rect_filled(stripe, 0.0, theme.c_marker_color);
        }

        if self.show_labels {
            let text = format!(
                "{}{}",
                pitch_class_name(key.pc as i32, self.prefer_flats),
                key.octave
            );
            painter.text(
                pos2(r.center().x, r.max.y - 4.0),
                Align2::CENTER_BOTTOM,
                text,
                FontId::proportional(WHITE_LABEL_SIZE),
                theme.label_dark_color,
            );
        }

        if key.pc == self.root_pc {
            let y = r.min.y + (r.height() * 0.18).max(4.0 + WHITE_BADGE_SIZE / 2.0);
            painter.text(
                pos2(r.center().x, y),
                Align2::CENTER_CENTER,
                "R",
                FontId::proportional(WHITE_BADGE_SIZE),
                theme.root_badge_color,
            );
        }
    }

    fn paint_black_key(&self, painter: &Painter, key: &Key) {
        let theme = self.theme;
        let r = key.rect;
        let is_member = self.members.contains(&key.pc);

        let fill = if is_member {
            theme.highlight_black_color
        } else {
            theme.black_key_color
        };
        painter.rect_filled(r, 0.0, fill);

        if is_member {
            let stroke = Stroke::new(BLACK_BORDER_WIDTH, theme.member_black_outline_color);
            painter.rect_stroke(r.shrink(0.8), 0.0, stroke, StrokeKind::Middle);
        } else {
            let stroke = Stroke::new(BLACK_BORDER_WIDTH, theme.black_outline_color);
            painter.rect_stroke(r, 0.0, stroke, StrokeKind::Middle);
        }

        if self.show_labels {
            painter.text(
                pos2(r.center().x, r.max.y - 6.0),
                Align2::CENTER_BOTTOM,
                pitch_class_name(key.pc as i32, self.prefer_flats),
                FontId::proportional(BLACK_LABEL_SIZE),
                theme.label_light_color,
            );
        }

        if key.pc == self.root_pc {
            let y = r.min.y + (r.height() * 0.18).max(3.0 + BLACK_BADGE_SIZE / 2.0);
            painter.text(
                pos2(r.center().x, y),
                Align2::CENTER_CENTER,
                "R",
                FontId::proportional(BLACK_BADGE_SIZE),
                theme.root_badge_black_color,
            );
        }
    }
}
