// src/app.rs
use crate::model::VisualizerState;
use crate::settings::{self, AppSettings};
use crate::theme::Theme;
use crate::ui;
use anyhow::Result;
use rfd::FileDialog;
use std::path::{Path, PathBuf};

pub struct KeyscopeApp {
    pub state: VisualizerState,
    pub theme: Theme,
    pub settings: AppSettings,
    pub config_dir: Option<PathBuf>,
}

impl KeyscopeApp {
    pub fn new(_cc: &eframe::CreationContext) -> Result<Self> {
        let config_dir = settings::get_config_dir();
        let settings = settings::load_settings(config_dir.as_deref());
        Ok(Self::with_settings(settings, config_dir))
    }

    pub fn with_settings(settings: AppSettings, config_dir: Option<PathBuf>) -> Self {
        let mut app = Self {
            state: settings.initial_state(),
            theme: Theme::default(),
            settings,
            config_dir,
        };
        if let Some(path) = app.settings.theme_path(app.config_dir.as_deref()) {
            app.load_theme_from_path(&path);
        }
        app
    }

    /// Lets the user pick a theme JSON file.
    pub fn load_theme(&mut self) {
        let mut dialog = FileDialog::new().add_filter("json", &["json"]);
        if let Some(dir) = &self.config_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_theme_from_path(&path);
        }
    }

    /// Swaps in the theme at `path`; a file that cannot be loaded leaves the default theme.
    pub fn load_theme_from_path(&mut self, path: &Path) {
        match Theme::load(path) {
            Ok(theme) => {
                log::info!("Loaded theme from {}", path.display());
                self.theme = theme;
            }
            Err(e) => {
                log::warn!("{:#}, using default theme", e);
                self.theme = Theme::default();
            }
        }
    }
}

impl eframe::App for KeyscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals: egui::Visuals = (&self.theme).into();
        ctx.set_visuals(visuals);

        ui::draw_main_view(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mode;
    use egui::Color32;

    #[test]
    fn settings_drive_initial_state() {
        let settings = AppSettings {
            initial_mode: Mode::Custom,
            initial_custom_notes: "C, Eb, G, Bb".to_string(),
            ..AppSettings::default()
        };
        let app = KeyscopeApp::with_settings(settings, None);
        assert_eq!(app.state.chord_guess_text(), "Cm7");
    }

    #[test]
    fn theme_from_settings_is_loaded_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut theme = Theme::default();
        theme.piano_keys.root_badge_color = Color32::from_rgb(1, 2, 3);
        std::fs::write(dir.path().join("mine.json"), serde_json::to_string(&theme).unwrap()).unwrap();

        let settings = AppSettings {
            theme: Some(PathBuf::from("mine.json")),
            ..AppSettings::default()
        };
        let app = KeyscopeApp::with_settings(settings, Some(dir.path().to_path_buf()));
        assert_eq!(app.theme.piano_keys.root_badge_color, Color32::from_rgb(1, 2, 3));
    }

    #[test]
    fn unreadable_theme_falls_back_to_default() {
        let mut app = KeyscopeApp::with_settings(AppSettings::default(), None);
        app.theme.dark_mode = true;
        app.load_theme_from_path(Path::new("/definitely/not/here.json"));
        assert!(!app.theme.dark_mode);
    }
}
