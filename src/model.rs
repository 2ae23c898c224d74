// src/model.rs

use crate::keyboard::TapHandler;
use crate::theory::{self, DEFAULT_CHORD, DEFAULT_SCALE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shown in the readout when there is nothing to report.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Which table (if any) drives the highlighted notes.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Mode {
    #[default]
    Scale,
    Chord,
    Custom,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Scale, Mode::Chord, Mode::Custom];
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Scale => write!(f, "Scale"),
            Mode::Chord => write!(f, "Chord"),
            Mode::Custom => write!(f, "Custom"),
        }
    }
}

/// User selections plus everything derived from them.
///
/// The derived fields are never edited directly; every setter ends in `recompute`,
/// so they always match the inputs.
#[derive(Debug, Clone)]
pub struct VisualizerState {
    mode: Mode,
    root: String,
    scale_name: String,
    chord_name: String,
    custom_text: String,
    show_labels: bool,

    // --- Derived ---
    members: BTreeSet<u8>,
    prefer_flats: bool,
    note_list_text: String,
    chord_guess_text: String,
}

impl Default for VisualizerState {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualizerState {
    pub fn new() -> Self {
        let mut state = Self {
            mode: Mode::Scale,
            root: "C".to_string(),
            scale_name: DEFAULT_SCALE.to_string(),
            chord_name: DEFAULT_CHORD.to_string(),
            custom_text: String::new(),
            show_labels: true,
            members: BTreeSet::new(),
            prefer_flats: false,
            note_list_text: String::new(),
            chord_guess_text: String::new(),
        };
        state.recompute();
        state
    }

    // --- Inputs ---

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn scale_name(&self) -> &str {
        &self.scale_name
    }

    pub fn chord_name(&self) -> &str {
        &self.chord_name
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.recompute();
    }

    pub fn set_root(&mut self, root: impl Into<String>) {
        self.root = root.into();
        self.recompute();
    }

    pub fn set_scale(&mut self, name: impl Into<String>) {
        self.scale_name = name.into();
        self.recompute();
    }

    pub fn set_chord(&mut self, name: impl Into<String>) {
        self.chord_name = name.into();
        self.recompute();
    }

    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = text.into();
        self.recompute();
    }

    /// Labels only affect painting, so nothing is recomputed.
    pub fn set_show_labels(&mut self, show: bool) {
        self.show_labels = show;
    }

    // --- Outputs ---

    pub fn members(&self) -> &BTreeSet<u8> {
        &self.members
    }

    /// Unparsable roots fall back to C.
    pub fn root_pc(&self) -> u8 {
        theory::parse_note(&self.root).map_or(0, |n| n.pc)
    }

    pub fn prefer_flats(&self) -> bool {
        self.prefer_flats
    }

    pub fn note_list_text(&self) -> &str {
        &self.note_list_text
    }

    pub fn chord_guess_text(&self) -> &str {
        &self.chord_guess_text
    }

    /// Rebuilds the highlighted set and readouts from the current inputs.
    pub fn recompute(&mut self) {
        let root_pc = self.root_pc();
        self.members = match self.mode {
            Mode::Scale => {
                let intervals = theory::scale_intervals(&self.scale_name)
                    .unwrap_or(theory::SCALES[0].1);
                theory::intervals_to_pitch_classes(root_pc, intervals)
            }
            Mode::Chord => {
                let intervals = theory::chord_intervals(&self.chord_name)
                    .unwrap_or(theory::CHORDS[0].1);
                theory::intervals_to_pitch_classes(root_pc, intervals)
            }
            Mode::Custom => parse_custom_notes(&self.custom_text),
        };
        self.prefer_flats = theory::prefers_flats(&self.root);
        self.update_readout();
    }

    fn update_readout(&mut self) {
        self.note_list_text = if self.members.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            self.member_names().join(", ")
        };
        self.chord_guess_text = theory::guess_chord_label(&self.members, self.prefer_flats)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
    }

    fn member_names(&self) -> Vec<&'static str> {
        self.members
            .iter()
            .map(|&pc| theory::pitch_class_name(pc as i32, self.prefer_flats))
            .collect()
    }

    /// Toggles `pc` in the highlighted set and leaves the state in custom mode.
    ///
    /// Whatever is highlighted at the moment of the tap becomes the starting custom
    /// set, and the custom text is rewritten to match so a later recompute agrees.
    pub fn toggle_from_tap(&mut self, pc: u8) {
        let pc = pc % 12;
        let mut members = std::mem::take(&mut self.members);
        if !members.remove(&pc) {
            members.insert(pc);
        }
        log::debug!("Tap on {}: {} notes selected", pc, members.len());

        self.mode = Mode::Custom;
        self.members = members;
        self.custom_text = self.member_names().join(", ");
        self.recompute();
    }
}

impl TapHandler for VisualizerState {
    fn on_tap(&mut self, pc: u8) {
        self.toggle_from_tap(pc);
    }
}

/// Comma separated note list; tokens that do not parse are skipped.
pub fn parse_custom_notes(text: &str) -> BTreeSet<u8> {
    text.split(',')
        .filter_map(theory::parse_note)
        .map(|note| note.pc)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pcs: &[u8]) -> BTreeSet<u8> {
        pcs.iter().copied().collect()
    }

    #[test]
    fn defaults_show_c_major() {
        let state = VisualizerState::new();
        assert_eq!(state.mode(), Mode::Scale);
        assert_eq!(state.members(), &set(&[0, 2, 4, 5, 7, 9, 11]));
        assert_eq!(state.note_list_text(), "C, D, E, F, G, A, B");
        assert_eq!(state.chord_guess_text(), PLACEHOLDER);
        assert!(state.show_labels());
    }

    #[test]
    fn chord_mode_a_minor_seventh() {
        let mut state = VisualizerState::new();
        state.set_root("A");
        state.set_chord("m7");
        state.set_mode(Mode::Chord);
        assert_eq!(state.root_pc(), 9);
        assert_eq!(state.members(), &set(&[9, 0, 4, 7]));
        assert_eq!(state.note_list_text(), "C, E, G, A");
        assert_eq!(state.chord_guess_text(), "Am7");
    }

    #[test]
    fn flat_root_spells_with_flats() {
        let mut state = VisualizerState::new();
        state.set_mode(Mode::Chord);
        state.set_root("Bb");
        assert!(state.prefer_flats());
        assert_eq!(state.note_list_text(), "D, F, Bb");
        assert_eq!(state.chord_guess_text(), "Bb");

        state.set_root("A#");
        assert!(!state.prefer_flats());
        assert_eq!(state.chord_guess_text(), "A#");
    }

    #[test]
    fn unknown_names_fall_back() {
        let mut state = VisualizerState::new();
        state.set_root("D");
        state.set_scale("Hungarian Gypsy");
        assert_eq!(state.members(), &set(&[2, 4, 6, 7, 9, 11, 1]));

        state.set_chord("nope");
        state.set_mode(Mode::Chord);
        assert_eq!(state.members(), &set(&[2, 6, 9]));
        assert_eq!(state.chord_guess_text(), "D");
    }

    #[test]
    fn unparsable_root_is_c() {
        let mut state = VisualizerState::new();
        state.set_root("H");
        assert_eq!(state.root_pc(), 0);
        assert_eq!(state.members(), &set(&[0, 2, 4, 5, 7, 9, 11]));
    }

    #[test]
    fn custom_text_c_major() {
        let mut state = VisualizerState::new();
        state.set_mode(Mode::Custom);
        state.set_custom_text("C4, E4, G4");
        assert_eq!(state.members(), &set(&[0, 4, 7]));
        assert_eq!(state.chord_guess_text(), "C");
    }

    #[test]
    fn custom_text_drops_bad_tokens() {
        assert_eq!(parse_custom_notes("C, xyz, , Eb5,G#"), set(&[0, 3, 8]));
        assert_eq!(parse_custom_notes("C4,C5,c"), set(&[0]));
        assert!(parse_custom_notes("").is_empty());
    }

    #[test]
    fn empty_custom_shows_placeholders() {
        let mut state = VisualizerState::new();
        state.set_mode(Mode::Custom);
        assert!(state.members().is_empty());
        assert_eq!(state.note_list_text(), PLACEHOLDER);
        assert_eq!(state.chord_guess_text(), PLACEHOLDER);
    }

    #[test]
    fn tap_adds_and_switches_to_custom() {
        let mut state = VisualizerState::new();
        state.set_mode(Mode::Chord);
        assert_eq!(state.members(), &set(&[0, 4, 7]));

        state.toggle_from_tap(11);
        assert_eq!(state.mode(), Mode::Custom);
        assert_eq!(state.members(), &set(&[0, 4, 7, 11]));
        assert_eq!(state.chord_guess_text(), "Cmaj7");
        assert_eq!(state.custom_text(), "C, E, G, B");
    }

    #[test]
    fn tap_removes_existing_member() {
        let mut state = VisualizerState::new();
        state.set_mode(Mode::Custom);
        state.set_custom_text("C, E, G");

        state.toggle_from_tap(4);
        assert_eq!(state.mode(), Mode::Custom);
        assert_eq!(state.members(), &set(&[0, 7]));
        assert_eq!(state.chord_guess_text(), PLACEHOLDER);
    }

    #[test]
    fn tapped_selection_survives_recompute() {
        let mut state = VisualizerState::new();
        state.set_root("Eb");
        state.toggle_from_tap(1);
        let tapped = state.members().clone();
        assert_eq!(state.custom_text(), "C, Db, D, Eb, F, G, Ab, Bb");

        state.recompute();
        assert_eq!(state.members(), &tapped);
    }

    #[test]
    fn tap_handler_delegates() {
        let mut state = VisualizerState::new();
        state.set_mode(Mode::Custom);
        TapHandler::on_tap(&mut state, 9);
        assert_eq!(state.members(), &set(&[9]));
    }

    #[test]
    fn labels_toggle_keeps_members() {
        let mut state = VisualizerState::new();
        let before = state.members().clone();
        state.set_show_labels(false);
        assert!(!state.show_labels());
        assert_eq!(state.members(), &before);
    }
}
