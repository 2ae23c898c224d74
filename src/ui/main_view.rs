use crate::app::KeyscopeApp;
use crate::model::Mode;
use crate::theme::ControlBarTheme;
use crate::theory::{CHORDS, ROOT_NAMES, SCALES};
use crate::ui::keyboard_view::KeyboardView;
use egui::{
    epaint::StrokeKind, vec2, Button, CentralPanel, ComboBox, Frame, Margin, RichText, Sense,
    Stroke, TextEdit, Ui,
};

const LEGEND_SIZE: f32 = 12.0;
const READOUT_SIZE: f32 = 13.0;

pub fn draw_main_view(app: &mut KeyscopeApp, ctx: &egui::Context) {
    CentralPanel::default()
        .frame(Frame::NONE.fill(app.theme.main_background).inner_margin(Margin::same(16)))
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 12.0;

            controls_frame(&app.theme.controls).show(ui, |ui| {
                draw_mode_row(app, ui);
                draw_selection_row(app, ui);
                if app.state.mode() == Mode::Custom {
                    draw_custom_row(app, ui);
                }
                draw_legend(app, ui);
                draw_readout(app, ui);
            });

            let theme = &app.theme.piano_keys;
            Frame::NONE
                .stroke(Stroke::new(1.0, theme.frame_color))
                .corner_radius(12.0)
                .inner_margin(Margin::same(2))
                .show(ui, |ui| {
                    let view = KeyboardView {
                        members: app.state.members(),
                        root_pc: app.state.root_pc(),
                        prefer_flats: app.state.prefer_flats(),
                        show_labels: app.state.show_labels(),
                        theme,
                    };
                    // The view borrows the state for painting, so taps are collected
                    // and applied afterwards.
                    let mut taps = PendingTaps::default();
                    view.show(ui, app.settings.keyboard_height, &mut taps);
                    for pc in taps.0 {
                        app.state.toggle_from_tap(pc);
                    }
                });
        });
}

/// Panel behind the control rows, legend and readout.
fn controls_frame(theme: &ControlBarTheme) -> Frame {
    Frame::NONE
        .fill(theme.background)
        .corner_radius(8.0)
        .inner_margin(Margin::same(8))
}

#[derive(Default)]
struct PendingTaps(Vec<u8>);

impl crate::keyboard::TapHandler for PendingTaps {
    fn on_tap(&mut self, pc: u8) {
        self.0.push(pc);
    }
}

fn draw_mode_row(app: &mut KeyscopeApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        let mut mode = app.state.mode();
        for candidate in Mode::ALL {
            ui.selectable_value(&mut mode, candidate, candidate.to_string());
        }
        if mode != app.state.mode() {
            app.state.set_mode(mode);
        }

        ui.separator();

        let mut show_labels = app.state.show_labels();
        if ui.checkbox(&mut show_labels, "Labels").changed() {
            app.state.set_show_labels(show_labels);
        }

        ui.separator();

        if ui.add(Button::new("Theme\u{2026}")).clicked() {
            app.load_theme();
        }
    });
}

fn draw_selection_row(app: &mut KeyscopeApp, ui: &mut Ui) {
    let text_color = app.theme.controls.text_color;
    ui.horizontal(|ui| {
        ui.label(RichText::new("Root:").color(text_color));
        let mut root = app.state.root().to_string();
        ComboBox::from_id_salt("root_selector")
            .selected_text(root.as_str())
            .show_ui(ui, |ui| {
                for name in ROOT_NAMES {
                    ui.selectable_value(&mut root, name.to_string(), name);
                }
            });
        if root != app.state.root() {
            app.state.set_root(root);
        }

        match app.state.mode() {
            Mode::Scale => {
                ui.label(RichText::new("Scale:").color(text_color));
                let mut scale = app.state.scale_name().to_string();
                ComboBox::from_id_salt("scale_selector")
                    .selected_text(scale.as_str())
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        for (name, _) in SCALES.iter() {
                            ui.selectable_value(&mut scale, name.to_string(), *name);
                        }
                    });
                if scale != app.state.scale_name() {
                    app.state.set_scale(scale);
                }
            }
            Mode::Chord => {
                ui.label(RichText::new("Chord:").color(text_color));
                let mut chord = app.state.chord_name().to_string();
                ComboBox::from_id_salt("chord_selector")
                    .selected_text(chord.as_str())
                    .width(160.0)
                    .show_ui(ui, |ui| {
                        for (name, _) in CHORDS.iter() {
                            ui.selectable_value(&mut chord, name.to_string(), *name);
                        }
                    });
                if chord != app.state.chord_name() {
                    app.state.set_chord(chord);
                }
            }
            Mode::Custom => {}
        }
    });
}

fn draw_custom_row(app: &mut KeyscopeApp, ui: &mut Ui) {
    let mut text = app.state.custom_text().to_string();
    let edit = TextEdit::singleline(&mut text)
        .hint_text("Custom notes (C4,E4,G4,Bb4)")
        .desired_width(f32::INFINITY);
    if ui.add(edit).changed() {
        app.state.set_custom_text(text);
    }
}

fn draw_legend(app: &KeyscopeApp, ui: &mut Ui) {
    let theme = &app.theme.controls;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 6.0;

        let (swatch, _) = ui.allocate_exact_size(vec2(LEGEND_SIZE, LEGEND_SIZE), Sense::hover());
        ui.painter()
            .circle_filled(swatch.center(), LEGEND_SIZE / 2.0, theme.legend_swatch_color);
        ui.label(RichText::new("Highlighted notes").size(LEGEND_SIZE).color(theme.text_color));

        ui.add_space(8.0);

        let (square, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
        ui.painter().rect_stroke(
            square,
            3.0,
            Stroke::new(1.0, theme.legend_outline_color),
            StrokeKind::Inside,
        );
        ui.label(
            RichText::new("\u{201C}R\u{201D} marks root")
                .size(LEGEND_SIZE)
                .color(theme.text_color),
        );
    });
}

fn draw_readout(app: &KeyscopeApp, ui: &mut Ui) {
    let theme = &app.theme.controls;
    ui.horizontal(|ui| {
        ui.label(RichText::new("Notes: ").size(READOUT_SIZE).color(theme.secondary_text_color));
        ui.label(RichText::new(app.state.note_list_text()).size(READOUT_SIZE).color(theme.text_color));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(app.state.chord_guess_text())
                    .size(READOUT_SIZE)
                    .strong()
                    .color(theme.text_color),
            );
            ui.label(RichText::new("Chord: ").size(READOUT_SIZE).color(theme.secondary_text_color));
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn controls_sit_on_themed_background() {
        let theme = ControlBarTheme {
            background: Color32::from_rgb(12, 34, 56),
            ..ControlBarTheme::default()
        };
        assert_eq!(controls_frame(&theme).fill, Color32::from_rgb(12, 34, 56));
    }
}
