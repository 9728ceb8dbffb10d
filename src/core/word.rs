//! Crossword answer representation
//!
//! A `WordClue` stores an uppercase answer, its clue, and an index of letter
//! positions used when looking for crossing points.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// An answer/clue pair ready for layout
///
/// Stores the answer as bytes and maintains a map of letter positions so the
/// layout search can enumerate shared letters without rescanning the word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordClue {
    text: String,
    clue: String,
    letters: Vec<u8>,
    char_positions: FxHashMap<u8, Vec<usize>>,
}

/// Error type for invalid answers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Answer must not be empty")]
    Empty,
    #[error("Answer must contain only ASCII letters")]
    NonAscii,
    #[error("Answer contains invalid character '{0}'")]
    InvalidCharacter(char),
}

impl WordClue {
    /// Create a new answer/clue pair
    ///
    /// The answer is uppercased; it must be non-empty and made of ASCII
    /// letters only. Length limits belong to the word supplier, not here.
    ///
    /// # Errors
    /// Returns `WordError` if the answer is empty or contains anything other
    /// than ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use crossword_engine::core::WordClue;
    ///
    /// let word = WordClue::new("luna", "Natural satellite").unwrap();
    /// assert_eq!(word.text(), "LUNA");
    ///
    /// assert!(WordClue::new("two words", "nope").is_err());
    /// assert!(WordClue::new("", "nope").is_err());
    /// ```
    pub fn new(text: impl Into<String>, clue: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_uppercase();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if let Some(bad) = text.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        let letters = text.as_bytes().to_vec();

        let mut char_positions: FxHashMap<u8, Vec<usize>> = FxHashMap::default();
        for (i, &ch) in letters.iter().enumerate() {
            char_positions.entry(ch).or_default().push(i);
        }

        Ok(Self {
            text,
            clue: clue.into(),
            letters,
            char_positions,
        })
    }

    /// Get the answer as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the clue text
    #[inline]
    #[must_use]
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// Get the answer as bytes
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[u8] {
        &self.letters
    }

    /// Number of letters in the answer
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false for a constructed answer; present for API symmetry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Get all positions where a letter appears, in ascending order
    ///
    /// Returns an empty slice if the letter doesn't appear.
    #[inline]
    pub fn positions_of(&self, letter: u8) -> &[usize] {
        self.char_positions
            .get(&letter)
            .map_or(&[], std::vec::Vec::as_slice)
    }

    /// Enumerate shared letters with another answer
    ///
    /// Yields `(index_in_self, index_in_other)` pairs, outer loop over this
    /// answer's letters and inner loop over the other's, in the order found.
    pub fn crossing_points<'a>(
        &'a self,
        other: &'a Self,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.letters.iter().enumerate().flat_map(move |(i, &ch)| {
            other.positions_of(ch).iter().map(move |&j| (i, j))
        })
    }
}

impl fmt::Display for WordClue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Fold one typed character to an uppercase ASCII letter
///
/// Spanish accented vowels and `Ñ` fold to their base letter. Anything that
/// is not a letter yields `None`.
///
/// # Examples
/// ```
/// use crossword_engine::core::fold_letter;
///
/// assert_eq!(fold_letter('a'), Some(b'A'));
/// assert_eq!(fold_letter('é'), Some(b'E'));
/// assert_eq!(fold_letter('ñ'), Some(b'N'));
/// assert_eq!(fold_letter('7'), None);
/// ```
#[must_use]
pub fn fold_letter(ch: char) -> Option<u8> {
    let folded = match ch.to_uppercase().next()? {
        'Á' | 'À' | 'Ä' | 'Â' => 'A',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'Ñ' => 'N',
        other => other,
    };
    folded.is_ascii_uppercase().then_some(folded as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = WordClue::new("LUNA", "Satellite").unwrap();
        assert_eq!(word.text(), "LUNA");
        assert_eq!(word.clue(), "Satellite");
        assert_eq!(word.letters(), b"LUNA");
        assert_eq!(word.len(), 4);
    }

    #[test]
    fn word_creation_lowercase_normalized() {
        let word = WordClue::new("comet", "").unwrap();
        assert_eq!(word.text(), "COMET");

        let word2 = WordClue::new("CoMeT", "").unwrap();
        assert_eq!(word2.text(), "COMET");
    }

    #[test]
    fn word_creation_invalid() {
        assert_eq!(WordClue::new("", "x"), Err(WordError::Empty));
        assert_eq!(WordClue::new("ÁRBOL", "x"), Err(WordError::NonAscii));
        assert_eq!(
            WordClue::new("SEA LION", "x"),
            Err(WordError::InvalidCharacter(' '))
        );
        assert_eq!(
            WordClue::new("R2D2", "x"),
            Err(WordError::InvalidCharacter('2'))
        );
    }

    #[test]
    fn word_positions_of_duplicates() {
        let word = WordClue::new("NEBULA", "").unwrap();
        assert_eq!(word.positions_of(b'N'), &[0]);
        assert!(word.positions_of(b'Z').is_empty());

        let word = WordClue::new("ALA", "").unwrap();
        assert_eq!(word.positions_of(b'A'), &[0, 2]);
    }

    #[test]
    fn crossing_points_outer_loop_is_self() {
        let sal = WordClue::new("SAL", "").unwrap();
        let ala = WordClue::new("ALA", "").unwrap();

        let points: Vec<_> = sal.crossing_points(&ala).collect();
        assert_eq!(points, vec![(1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn crossing_points_none_shared() {
        let sol = WordClue::new("SOL", "").unwrap();
        let tide = WordClue::new("TIDE", "").unwrap();
        assert_eq!(sol.crossing_points(&tide).count(), 0);
    }

    #[test]
    fn word_display() {
        let word = WordClue::new("orbit", "").unwrap();
        assert_eq!(format!("{word}"), "ORBIT");
    }

    #[test]
    fn fold_letter_handles_accents_and_junk() {
        assert_eq!(fold_letter('z'), Some(b'Z'));
        assert_eq!(fold_letter('Ú'), Some(b'U'));
        assert_eq!(fold_letter('ü'), Some(b'U'));
        assert_eq!(fold_letter(' '), None);
        assert_eq!(fold_letter('ç'), None);
    }
}
