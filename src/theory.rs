// src/theory.rs

use std::collections::BTreeSet;

/// Roots offered in the root picker, in display order.
pub const ROOT_NAMES: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

const NAMES_SHARP: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const NAMES_FLAT: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

/// Named scales as semitone offsets from the root. Order is the UI list order.
pub static SCALES: [(&str, &[u8]); 12] = [
    ("Major (Ionian)", &[0, 2, 4, 5, 7, 9, 11]),
    ("Natural Minor (Aeolian)", &[0, 2, 3, 5, 7, 8, 10]),
    ("Dorian", &[0, 2, 3, 5, 7, 9, 10]),
    ("Phrygian", &[0, 1, 3, 5, 7, 8, 10]),
    ("Lydian", &[0, 2, 4, 6, 7, 9, 11]),
    ("Mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
    ("Locrian", &[0, 1, 3, 5, 6, 8, 10]),
    ("Major Pentatonic", &[0, 2, 4, 7, 9]),
    ("Minor Pentatonic", &[0, 3, 5, 7, 10]),
    ("Blues", &[0, 3, 5, 6, 7, 10]),
    ("Harmonic Minor", &[0, 2, 3, 5, 7, 8, 11]),
    ("Melodic Minor (Jazz)", &[0, 2, 3, 5, 7, 9, 11]),
];

/// Named chords as semitone offsets from the root. Offsets above 11 wrap (14 is the ninth).
pub static CHORDS: [(&str, &[u8]); 17] = [
    ("Major (Triad)", &[0, 4, 7]),
    ("Minor (Triad)", &[0, 3, 7]),
    ("Diminished (Triad)", &[0, 3, 6]),
    ("Augmented (Triad)", &[0, 4, 8]),
    ("Maj7", &[0, 4, 7, 11]),
    ("m7", &[0, 3, 7, 10]),
    ("7 (Dominant)", &[0, 4, 7, 10]),
    ("m(maj7)", &[0, 3, 7, 11]),
    ("m7(b5)", &[0, 3, 6, 10]),
    ("dim7", &[0, 3, 6, 9]),
    ("sus2", &[0, 2, 7]),
    ("sus4", &[0, 5, 7]),
    ("add9", &[0, 4, 7, 14]),
    ("6", &[0, 4, 7, 9]),
    ("m6", &[0, 3, 7, 9]),
    ("9", &[0, 4, 7, 10, 14]),
    ("m9", &[0, 3, 7, 10, 14]),
];

pub const DEFAULT_SCALE: &str = "Major (Ionian)";
pub const DEFAULT_CHORD: &str = "Major (Triad)";

/// A note name parsed into its pitch class and, if written, its octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNote {
    pub pc: u8,
    pub octave: Option<i64>,
}

/// Parses the leading `[A-Ga-g][#b]?[0-9]*` of `text`. Anything after that prefix is ignored.
pub fn parse_note(text: &str) -> Option<ParsedNote> {
    let mut chars = text.trim().chars().peekable();

    let base: i32 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let accidental = match chars.peek() {
        Some('#') => 1,
        Some('b') => -1,
        _ => 0,
    };
    if accidental != 0 {
        chars.next();
    }

    let digits: String = chars.take_while(|c| c.is_ascii_digit()).collect();
    let octave = if digits.is_empty() {
        None
    } else {
        digits.parse::<i64>().ok()
    };

    Some(ParsedNote {
        pc: (base + accidental).rem_euclid(12) as u8,
        octave,
    })
}

/// Spells a pitch class with sharps or flats. Any integer is folded into 0..12 first.
pub fn pitch_class_name(pc: i32, prefer_flat: bool) -> &'static str {
    let table = if prefer_flat { &NAMES_FLAT } else { &NAMES_SHARP };
    table[pc.rem_euclid(12) as usize]
}

pub fn is_black_key(pc: i32) -> bool {
    matches!(pc.rem_euclid(12), 1 | 3 | 6 | 8 | 10)
}

/// A root written with a flat (and no sharp) switches all spelling to flats.
pub fn prefers_flats(root_name: &str) -> bool {
    root_name.contains('b') && !root_name.contains('#')
}

fn lookup(table: &'static [(&'static str, &'static [u8])], name: &str) -> Option<&'static [u8]> {
    table
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, intervals)| *intervals)
}

pub fn scale_intervals(name: &str) -> Option<&'static [u8]> {
    lookup(&SCALES, name)
}

pub fn chord_intervals(name: &str) -> Option<&'static [u8]> {
    lookup(&CHORDS, name)
}

/// Applies an interval pattern to a root and collects the resulting pitch classes.
pub fn intervals_to_pitch_classes(root: u8, intervals: &[u8]) -> BTreeSet<u8> {
    intervals
        .iter()
        .map(|&interval| ((root as u16 + interval as u16) % 12) as u8)
        .collect()
}

/// The chord shapes the guesser knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChordShape {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Dominant7,
    Minor7,
    MinorMajor7,
    HalfDiminished7,
    Diminished7,
}

impl ChordShape {
    pub const TRIADS: [ChordShape; 4] = [
        ChordShape::Major,
        ChordShape::Minor,
        ChordShape::Diminished,
        ChordShape::Augmented,
    ];

    pub const SEVENTHS: [ChordShape; 6] = [
        ChordShape::Major7,
        ChordShape::Dominant7,
        ChordShape::Minor7,
        ChordShape::MinorMajor7,
        ChordShape::HalfDiminished7,
        ChordShape::Diminished7,
    ];

    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ChordShape::Major => &[0, 4, 7],
            ChordShape::Minor => &[0, 3, 7],
            ChordShape::Diminished => &[0, 3, 6],
            ChordShape::Augmented => &[0, 4, 8],
            ChordShape::Major7 => &[0, 4, 7, 11],
            ChordShape::Dominant7 => &[0, 4, 7, 10],
            ChordShape::Minor7 => &[0, 3, 7, 10],
            ChordShape::MinorMajor7 => &[0, 3, 7, 11],
            ChordShape::HalfDiminished7 => &[0, 3, 6, 10],
            ChordShape::Diminished7 => &[0, 3, 6, 9],
        }
    }

    /// Text appended to the root name in a chord label.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordShape::Major => "",
            ChordShape::Minor => "m",
            ChordShape::Diminished => "dim",
            ChordShape::Augmented => "aug",
            ChordShape::Major7 => "maj7",
            ChordShape::Dominant7 => "7",
            ChordShape::Minor7 => "m7",
            ChordShape::MinorMajor7 => "m(maj7)",
            ChordShape::HalfDiminished7 => "m7\u{266D}5",
            ChordShape::Diminished7 => "dim7",
        }
    }

    fn interval_set(&self) -> BTreeSet<u8> {
        self.intervals().iter().copied().collect()
    }
}

/// A recognized chord: the root it was matched at and its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordGuess {
    pub root: u8,
    pub shape: ChordShape,
}

impl ChordGuess {
    pub fn label(&self, prefer_flat: bool) -> String {
        format!(
            "{}{}",
            pitch_class_name(self.root as i32, prefer_flat),
            self.shape.suffix()
        )
    }
}

/// Matches a pitch-class set against the triad and seventh shapes.
///
/// Roots are scanned upwards from C and the first hit wins, so symmetric shapes
/// (augmented, dim7) always report their lowest possible root. Inversions and bass
/// notes play no part. Sets that are not exactly 3 or 4 notes never match.
pub fn guess_chord(pcs: &BTreeSet<u8>) -> Option<ChordGuess> {
    let candidates: &[ChordShape] = match pcs.len() {
        3 => &ChordShape::TRIADS,
        4 => &ChordShape::SEVENTHS,
        _ => return None,
    };

    for root in 0..12u8 {
        let relative: BTreeSet<u8> = pcs
            .iter()
            .map(|&pc| (pc as i32 - root as i32).rem_euclid(12) as u8)
            .collect();

        if let Some(&shape) = candidates.iter().find(|s| s.interval_set() == relative) {
            return Some(ChordGuess { root, shape });
        }
    }

    None
}

pub fn guess_chord_label(pcs: &BTreeSet<u8>, prefer_flat: bool) -> Option<String> {
    guess_chord(pcs).map(|guess| guess.label(prefer_flat))
}
