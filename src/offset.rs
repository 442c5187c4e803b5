//! Character-offset handling for span text recovery.
//!
//! Label Studio counts span positions in characters, while Rust strings index
//! bytes. `"Pris: €50"` puts `"€50"` at chars 6..9 but bytes 6..11; slicing a
//! `&str` with the character offsets would split the `€` and panic. This
//! module converts once per document so every span slice is O(1).
//!
//! Out-of-range offsets clamp to the end of the text instead of panicking:
//! a span pointing past its document is degraded input, not a crash.

/// Precomputed char-to-byte table for one text.
///
/// ASCII text takes a fast path with no table at all, since byte and
/// character offsets coincide.
#[derive(Debug, Clone)]
pub struct CharMap {
    /// `char_to_byte[i]` is the byte offset of character `i`; the final entry
    /// is the total byte length. Empty when the text is ASCII.
    char_to_byte: Vec<usize>,
    is_ascii: bool,
    byte_len: usize,
}

impl CharMap {
    /// Build the table for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                char_to_byte: Vec::new(),
                is_ascii: true,
                byte_len: text.len(),
            };
        }
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            is_ascii: false,
            byte_len: text.len(),
        }
    }

    /// Byte offset of character `char_idx`, clamped to the end of the text.
    #[must_use]
    pub fn byte_at(&self, char_idx: usize) -> usize {
        if self.is_ascii {
            char_idx.min(self.byte_len)
        } else {
            self.char_to_byte
                .get(char_idx)
                .copied()
                .unwrap_or(self.byte_len)
        }
    }

    /// Slice `text` by character offsets `[char_start, char_end)`.
    ///
    /// `text` must be the string this map was built from. Inverted or
    /// out-of-range offsets yield the empty string.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str, char_start: usize, char_end: usize) -> &'a str {
        let start = self.byte_at(char_start);
        let end = self.byte_at(char_end.max(char_start));
        text.get(start..end).unwrap_or("")
    }

    /// Number of characters in the mapped text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        if self.is_ascii {
            self.byte_len
        } else {
            self.char_to_byte.len().saturating_sub(1)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Slicing the full char range recovers the whole text.
        #[test]
        fn full_slice_is_identity(text in ".{0,60}") {
            let map = CharMap::new(&text);
            prop_assert_eq!(map.slice(&text, 0, map.char_len()), text.as_str());
        }

        /// Every slice lands on a char boundary (never panics, never splits).
        #[test]
        fn slices_are_valid_utf8(text in ".{0,60}", a in 0usize..80, b in 0usize..80) {
            let map = CharMap::new(&text);
            let s = map.slice(&text, a, b);
            prop_assert!(s.chars().count() <= map.char_len());
        }

        /// byte_at is monotonically non-decreasing.
        #[test]
        fn byte_at_monotone(text in ".{0,60}", idx in 0usize..80) {
            let map = CharMap::new(&text);
            prop_assert!(map.byte_at(idx) <= map.byte_at(idx + 1));
        }
    }
}
