// src/theme.rs

use anyhow::{Context, Result};
use egui::{epaint, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// --- Helper Functions for Default Colors ---

// General
fn default_dark_mode() -> bool { false }
fn default_main_background() -> Color32 { Color32::from_gray(242) }
fn default_global_text_color() -> Color32 { Color32::from_gray(20) }
fn default_window_stroke_color() -> Color32 { Color32::from_gray(200) }

// Control Bar
fn default_controls_background() -> Color32 { Color32::from_gray(242) }
fn default_controls_text_color() -> Color32 { Color32::from_gray(30) }
fn default_controls_secondary_text_color() -> Color32 { Color32::from_gray(110) }
fn default_controls_selection_bg() -> Color32 { Color32::from_rgb(0, 122, 255) }
fn default_legend_swatch_color() -> Color32 { Color32::from_rgb(0, 122, 255) }
fn default_legend_outline_color() -> Color32 { Color32::GRAY }

// Piano Keys
fn default_piano_background() -> Color32 { Color32::from_gray(242) }
fn default_piano_white_key_color() -> Color32 { Color32::WHITE }
fn default_piano_black_key_color() -> Color32 { Color32::BLACK }
fn default_piano_highlight_color() -> Color32 { Color32::from_rgba_unmultiplied(0, 122, 255, 217) }
fn default_piano_highlight_black_color() -> Color32 { Color32::from_rgb(0, 122, 255) }
fn default_piano_white_outline_color() -> Color32 { Color32::from_black_alpha(140) }
fn default_piano_black_outline_color() -> Color32 { Color32::BLACK }
fn default_piano_member_black_outline_color() -> Color32 { Color32::from_white_alpha(217) }
fn default_piano_c_marker_color() -> Color32 { Color32::from_rgba_unmultiplied(255, 59, 48, 191) }
fn default_piano_label_dark_color() -> Color32 { Color32::from_black_alpha(230) }
fn default_piano_label_light_color() -> Color32 { Color32::from_white_alpha(242) }
fn default_piano_root_badge_color() -> Color32 { Color32::from_rgb(255, 59, 48) }
fn default_piano_root_badge_black_color() -> Color32 { Color32::WHITE }
fn default_piano_frame_color() -> Color32 { Color32::from_gray(180) }

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PianoKeyTheme {
    #[serde(default = "default_piano_background")] pub background: Color32,
    #[serde(default = "default_piano_white_key_color")] pub white_key_color: Color32,
    #[serde(default = "default_piano_black_key_color")] pub black_key_color: Color32,
    #[serde(default = "default_piano_highlight_color")] pub highlight_color: Color32,
    #[serde(default = "default_piano_highlight_black_color")] pub highlight_black_color: Color32,
    #[serde(default = "default_piano_white_outline_color")] pub white_outline_color: Color32,
    #[serde(default = "default_piano_black_outline_color")] pub black_outline_color: Color32,
    #[serde(default = "default_piano_member_black_outline_color")] pub member_black_outline_color: Color32,
    #[serde(default = "default_piano_c_marker_color")] pub c_marker_color: Color32,
    #[serde(default = "default_piano_label_dark_color")] pub label_dark_color: Color32,
    #[serde(default = "default_piano_label_light_color")] pub label_light_color: Color32,
    #[serde(default = "default_piano_root_badge_color")] pub root_badge_color: Color32,
    #[serde(default = "default_piano_root_badge_black_color")] pub root_badge_black_color: Color32,
    #[serde(default = "default_piano_frame_color")] pub frame_color: Color32,
}
impl Default for PianoKeyTheme { fn default() -> Self { Self { background: default_piano_background(), white_key_color: default_piano_white_key_color(), black_key_color: default_piano_black_key_color(), highlight_color: default_piano_highlight_color(), highlight_black_color: default_piano_highlight_black_color(), white_outline_color: default_piano_white_outline_color(), black_outline_color: default_piano_black_outline_color(), member_black_outline_color: default_piano_member_black_outline_color(), c_marker_color: default_piano_c_marker_color(), label_dark_color: default_piano_label_dark_color(), label_light_color: default_piano_label_light_color(), root_badge_color: default_piano_root_badge_color(), root_badge_black_color: default_piano_root_badge_black_color(), frame_color: default_piano_frame_color() } } }


#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ControlBarTheme {
    #[serde(default = "default_controls_background")] pub background: Color32,
    #[serde(default = "default_controls_text_color")] pub text_color: Color32,
    #[serde(default = "default_controls_secondary_text_color")] pub secondary_text_color: Color32,
    #[serde(default = "default_controls_selection_bg")] pub selection_bg: Color32,
    #[serde(default = "default_legend_swatch_color")] pub legend_swatch_color: Color32,
    #[serde(default = "default_legend_outline_color")] pub legend_outline_color: Color32,
}
impl Default for ControlBarTheme { fn default() -> Self { Self { background: default_controls_background(), text_color: default_controls_text_color(), secondary_text_color: default_controls_secondary_text_color(), selection_bg: default_controls_selection_bg(), legend_swatch_color: default_legend_swatch_color(), legend_outline_color: default_legend_outline_color() } } }


#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    #[serde(default = "default_dark_mode")] pub dark_mode: bool,
    #[serde(default = "default_main_background")] pub main_background: Color32,
    #[serde(default = "default_global_text_color")] pub global_text_color: Color32,
    #[serde(default = "default_window_stroke_color")] pub window_stroke_color: Color32,

    pub controls: ControlBarTheme,
    pub piano_keys: PianoKeyTheme,
}
impl Default for Theme { fn default() -> Self { Self { dark_mode: default_dark_mode(), main_background: default_main_background(), global_text_color: default_global_text_color(), window_stroke_color: default_window_stroke_color(), controls: ControlBarTheme::default(), piano_keys: PianoKeyTheme::default() } } }

impl Theme {
    /// Reads a theme JSON file. Missing fields take their default colors.
    pub fn load(path: &Path) -> Result<Self> {
        let json_string = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file '{}'", path.display()))?;
        let theme = serde_json::from_str(&json_string)
            .with_context(|| format!("Failed to parse theme file '{}'", path.display()))?;
        Ok(theme)
    }
}


/// Adapter to convert our custom Theme into egui::Visuals.
/// Only global properties are set here; the keyboard reads its colors directly.
impl From<&Theme> for Visuals {
    fn from(theme: &Theme) -> Self {
        let mut visuals = if theme.dark_mode {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.override_text_color = Some(theme.global_text_color);
        visuals.panel_fill = theme.main_background;
        visuals.window_stroke = Stroke::new(1.0, theme.window_stroke_color);
        visuals.selection.bg_fill = theme.controls.selection_bg;
        visuals.selection.stroke = Stroke::new(1.0, theme.global_text_color);

        visuals.popup_shadow = epaint::Shadow::NONE;
        visuals.window_shadow = epaint::Shadow::NONE;

        visuals
    }
}
