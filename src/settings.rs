use crate::model::{Mode, VisualizerState};
use crate::theory::{self, DEFAULT_CHORD, DEFAULT_SCALE};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

/// Startup configuration. Read once at launch, never written back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub initial_mode: Mode,
    pub initial_root: String,
    pub initial_scale: String,
    pub initial_chord: String,
    pub initial_custom_notes: String,
    pub show_labels: bool,
    pub keyboard_height: f32,
    pub theme: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Scale,
            initial_root: "C".to_string(),
            initial_scale: DEFAULT_SCALE.to_string(),
            initial_chord: DEFAULT_CHORD.to_string(),
            initial_custom_notes: String::new(),
            show_labels: true,
            keyboard_height: 220.0,
            theme: None,
        }
    }
}

impl AppSettings {
    /// Replaces names that the pickers do not offer with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !theory::ROOT_NAMES.contains(&self.initial_root.as_str()) {
            log::warn!("Unknown root '{}' in settings, using C", self.initial_root);
            self.initial_root = defaults.initial_root;
        }
        if theory::scale_intervals(&self.initial_scale).is_none() {
            log::warn!("Unknown scale '{}' in settings, using default", self.initial_scale);
            self.initial_scale = defaults.initial_scale;
        }
        if theory::chord_intervals(&self.initial_chord).is_none() {
            log::warn!("Unknown chord '{}' in settings, using default", self.initial_chord);
            self.initial_chord = defaults.initial_chord;
        }
        if !self.keyboard_height.is_finite() || self.keyboard_height < 80.0 {
            log::warn!("Keyboard height {} too small, using default", self.keyboard_height);
            self.keyboard_height = defaults.keyboard_height;
        }
        self
    }

    /// Builds the initial model from these settings.
    pub fn initial_state(&self) -> VisualizerState {
        let mut state = VisualizerState::new();
        state.set_root(self.initial_root.as_str());
        state.set_scale(self.initial_scale.as_str());
        state.set_chord(self.initial_chord.as_str());
        state.set_custom_text(self.initial_custom_notes.as_str());
        state.set_show_labels(self.show_labels);
        state.set_mode(self.initial_mode);
        state
    }

    /// Theme path with relative entries resolved against the config directory.
    pub fn theme_path(&self, config_dir: Option<&Path>) -> Option<PathBuf> {
        let path = self.theme.as_ref()?;
        match config_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path.clone()),
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("com", "Keyscope", "Keyscope");
    if dirs.is_none() {
        log::warn!("Could not determine a configuration directory.");
    }
    dirs.map(|d| d.config_dir().to_path_buf())
}

pub fn read_settings(path: &Path) -> Result<AppSettings> {
    let json_string = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: AppSettings = serde_json::from_str(&json_string)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    Ok(settings.sanitized())
}

/// Loads `settings.json` from `config_dir`, falling back to defaults on any problem.
pub fn load_settings(config_dir: Option<&Path>) -> AppSettings {
    let Some(dir) = config_dir else {
        return AppSettings::default();
    };
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        log::info!("No settings at {}, using defaults", path.display());
        return AppSettings::default();
    }
    match read_settings(&path) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("{:#}, using defaults", e);
            AppSettings::default()
        }
    }
}
