// src/keyboard.rs

use crate::theory::is_black_key;
use egui::{pos2, vec2, Pos2, Rect};

// MIDI note numbers for the displayed range (C3 to B6)
pub const FIRST_NOTE: u8 = 48;
pub const LAST_NOTE: u8 = 95;

const MIN_WHITE_KEY_PITCH: f32 = 22.0;
const WHITE_KEY_HEIGHT_RATIO: f32 = 0.92;
const BLACK_KEY_WIDTH_RATIO: f32 = 0.58;
const BLACK_KEY_HEIGHT_RATIO: f32 = 0.62;

/// Receives the pitch class of a key the user clicked.
pub trait TapHandler {
    fn on_tap(&mut self, pc: u8);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub note: u8,
    pub pc: u8,
    pub octave: i32,
    pub rect: Rect,
}

fn is_black_note(note: u8) -> bool {
    is_black_key(note as i32)
}

pub fn white_key_count() -> usize {
    (FIRST_NOTE..=LAST_NOTE).filter(|&n| !is_black_note(n)).count()
}

/// Key rectangles for the fixed range laid out inside `bounds`.
///
/// Painting and hit testing both read the rects stored here, so the visible key
/// boundaries and the clickable ones cannot drift apart.
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    bounds: Rect,
    white_keys: Vec<Key>,
    black_keys: Vec<Key>,
}

impl KeyboardLayout {
    pub fn new(bounds: Rect) -> Self {
        let white_count = white_key_count() as f32;

        let white_pitch = MIN_WHITE_KEY_PITCH.max((bounds.width() / white_count).floor());
        let white_height = bounds.height() * WHITE_KEY_HEIGHT_RATIO;
        // One pixel gap between neighbouring white keys
        let white_size = vec2(white_pitch - 1.0, white_height);
        let black_size = vec2(
            (white_pitch * BLACK_KEY_WIDTH_RATIO).floor(),
            (white_height * BLACK_KEY_HEIGHT_RATIO).floor(),
        );

        let mut white_keys = Vec::new();
        let mut x = bounds.min.x;
        for note in FIRST_NOTE..=LAST_NOTE {
            if is_black_note(note) {
                continue;
            }
            white_keys.push(Key {
                note,
                pc: note % 12,
                octave: octave_of(note),
                rect: Rect::from_min_size(pos2(x, bounds.min.y), white_size),
            });
            x += white_pitch;
        }

        let center_of = |note: u8| {
            white_keys
                .iter()
                .find(|k| k.note == note)
                .map(|k| k.rect.center().x)
        };

        let mut black_keys = Vec::new();
        for note in FIRST_NOTE..=LAST_NOTE {
            if !is_black_note(note) {
                continue;
            }
            // Skip a black key that is missing a white neighbour on either side
            let (Some(prev), Some(next)) = (
                note.checked_sub(1).and_then(center_of),
                note.checked_add(1).and_then(center_of),
            ) else {
                continue;
            };
            let center_x = (prev + next) / 2.0;
            black_keys.push(Key {
                note,
                pc: note % 12,
                octave: octave_of(note),
                rect: Rect::from_min_size(
                    pos2(center_x - black_size.x / 2.0, bounds.min.y),
                    black_size,
                ),
            });
        }

        Self {
            bounds,
            white_keys,
            black_keys,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn white_keys(&self) -> &[Key] {
        &self.white_keys
    }

    pub fn black_keys(&self) -> &[Key] {
        &self.black_keys
    }

    /// Pitch class under `pos`. Black keys sit on top, so they are tested first.
    pub fn hit_test(&self, pos: Pos2) -> Option<u8> {
        self.key_at(pos).map(|key| key.pc)
    }

    pub fn key_at(&self, pos: Pos2) -> Option<&Key> {
        self.black_keys
            .iter()
            .find(|k| k.rect.contains(pos))
            .or_else(|| self.white_keys.iter().find(|k| k.rect.contains(pos)))
    }
}

/// Scientific pitch notation octave, so MIDI 60 is C4.
pub fn octave_of(note: u8) -> i32 {
    note as i32 / 12 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f32, height: f32) -> KeyboardLayout {
        KeyboardLayout::new(Rect::from_min_size(Pos2::ZERO, vec2(width, height)))
    }

    fn all_keys(kb: &KeyboardLayout) -> impl Iterator<Item = &Key> {
        kb.white_keys().iter().chain(kb.black_keys().iter())
    }

    #[test]
    fn four_octaves_of_keys() {
        assert_eq!(white_key_count(), 28);
        let kb = layout(900.0, 220.0);
        assert_eq!(kb.white_keys().len(), 28);
        assert_eq!(kb.black_keys().len(), 20);
        assert_eq!(kb.white_keys()[0].note, FIRST_NOTE);
        assert_eq!(kb.white_keys()[27].note, LAST_NOTE);
    }

    #[test]
    fn geometry_follows_view_size() {
        let kb = layout(900.0, 200.0);
        let whites = kb.white_keys();
        // floor(900 / 28) = 32 between left edges, drawn one pixel narrower
        assert_eq!(whites[1].rect.min.x - whites[0].rect.min.x, 32.0);
        assert_eq!(whites[0].rect.width(), 31.0);
        assert!((whites[0].rect.height() - 184.0).abs() < 1e-3);
        // floor(32 * 0.58) = 18, floor(184 * 0.62) = 114
        for black in kb.black_keys() {
            assert_eq!(black.rect.size(), vec2(18.0, 114.0));
        }
    }

    #[test]
    fn narrow_views_keep_minimum_key_width() {
        let kb = layout(100.0, 150.0);
        assert_eq!(kb.white_keys()[1].rect.min.x, 22.0);
        assert_eq!(kb.white_keys()[0].rect.width(), 21.0);
    }

    #[test]
    fn black_keys_centered_between_neighbours() {
        let kb = layout(900.0, 200.0);
        let c_sharp = kb.black_keys()[0];
        assert_eq!(c_sharp.note, 49);
        let c = kb.white_keys()[0].rect.center().x;
        let d = kb.white_keys()[1].rect.center().x;
        assert_eq!(c_sharp.rect.center().x, (c + d) / 2.0);
    }

    #[test]
    fn layout_respects_bounds_origin() {
        let kb = KeyboardLayout::new(Rect::from_min_size(pos2(10.0, 40.0), vec2(900.0, 200.0)));
        assert_eq!(kb.white_keys()[0].rect.min, pos2(10.0, 40.0));
        assert_eq!(kb.hit_test(pos2(12.0, 220.0)), Some(0));
        assert_eq!(kb.hit_test(pos2(12.0, 230.0)), None);
        assert_eq!(kb.hit_test(pos2(5.0, 100.0)), None);
    }

    #[test]
    fn octave_numbers() {
        assert_eq!(octave_of(48), 3);
        assert_eq!(octave_of(60), 4);
        assert_eq!(octave_of(95), 6);
        let kb = layout(900.0, 200.0);
        assert_eq!(kb.white_keys()[7].octave, 4);
    }

    #[test]
    fn black_key_wins_over_white_underneath() {
        let kb = layout(900.0, 200.0);
        let c_sharp = kb.black_keys()[0].rect;
        // inside both the C and the C# rects
        let p = pos2(c_sharp.min.x + 1.0, 10.0);
        assert!(kb.white_keys()[0].rect.contains(p));
        assert_eq!(kb.hit_test(p), Some(1));
        // below the black key only the white key remains
        assert_eq!(kb.hit_test(pos2(p.x, c_sharp.max.y + 5.0)), Some(0));
    }

    #[test]
    fn misses_return_none() {
        let kb = layout(900.0, 200.0);
        // below the white keys (they cover 92% of the height)
        assert_eq!(kb.hit_test(pos2(50.0, 195.0)), None);
        // right of the last key
        assert_eq!(kb.hit_test(pos2(899.0, 50.0)), None);
        // in the 1px gap between E and F at the bottom of the keys
        let e = kb.white_keys()[2].rect;
        assert_eq!(kb.hit_test(pos2(e.max.x + 0.5, 170.0)), None);
    }

    #[test]
    fn drawn_keys_hit_test_to_themselves() {
        for (width, height) in [(300.0, 120.0), (616.0, 220.0), (901.0, 220.0), (1920.0, 400.0)] {
            let kb = layout(width, height);
            for key in all_keys(&kb) {
                let point = if is_black_note(key.note) {
                    key.rect.center()
                } else {
                    // lower part of a white key is never covered by a black key
                    pos2(key.rect.center().x, key.rect.max.y - 1.0)
                };
                assert_eq!(kb.hit_test(point), Some(key.pc), "{key:?} at {width}x{height}");
            }
        }
    }

    #[test]
    fn hits_land_inside_a_visible_key_of_that_pitch() {
        let kb = layout(700.0, 180.0);
        let mut y = 0.0;
        while y < 180.0 {
            let mut x = 0.0;
            while x < 700.0 {
                let p = pos2(x, y);
                if let Some(key) = kb.key_at(p) {
                    assert!(key.rect.contains(p));
                    if !is_black_note(key.note) {
                        assert!(kb.black_keys().iter().all(|b| !b.rect.contains(p)));
                    }
                } else {
                    assert!(all_keys(&kb).all(|k| !k.rect.contains(p)));
                }
                x += 3.5;
            }
            y += 4.5;
        }
    }
}
