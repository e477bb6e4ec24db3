//! The 2048-word dictionary behind the 11-bit word encoding

use std::collections::HashMap;
use std::path::Path;

use bip39::Language;

use crate::error::WordlistError;
use crate::WORDLIST_SIZE;

/// An immutable index ↔ word bijection.
///
/// Word order defines the encoding, so a dictionary is never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Dictionary {
    /// The standard BIP-39 English list.
    pub fn english() -> Self {
        let words = Language::English.word_list();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.to_string(), i as u16))
            .collect();
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            index,
        }
    }

    /// Build a dictionary from exactly 2048 distinct, non-empty lowercase words
    /// without whitespace.
    pub fn from_words<I, S>(words: I) -> Result<Self, WordlistError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORDLIST_SIZE {
            return Err(WordlistError::WrongSize(words.len()));
        }

        let mut index = HashMap::with_capacity(WORDLIST_SIZE);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(WordlistError::Empty(i));
            }
            // Decoding splits on whitespace and callers lowercase input first
            if word.chars().any(|c| c.is_whitespace() || c.is_uppercase()) {
                return Err(WordlistError::Malformed(word.clone()));
            }
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(WordlistError::Duplicate(word.clone()));
            }
        }

        Ok(Self { words, index })
    }

    /// Load a dictionary file with one word per line. Blank lines are skipped.
    pub fn load(path: &Path) -> Result<Self, WordlistError> {
        let content = std::fs::read_to_string(path)?;
        let dict = Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )?;
        tracing::debug!(path = %path.display(), "loaded wordlist");
        Ok(dict)
    }

    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Word for an 11-bit index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 2048 or larger. The codec only produces 11-bit values.
    pub fn word_at(&self, index: u16) -> &str {
        &self.words[usize::from(index)]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn synthetic_words() -> Vec<String> {
        (0..WORDLIST_SIZE).map(|i| format!("w{i:04}")).collect()
    }

    #[test]
    fn test_english_bijection() {
        let dict = Dictionary::english();
        assert_eq!(dict.len(), WORDLIST_SIZE);
        assert_eq!(dict.word_at(0), "abandon");
        assert_eq!(dict.word_at(2047), "zoo");
        assert_eq!(dict.index_of("abandon"), Some(0));
        assert_eq!(dict.index_of("zoo"), Some(2047));

        for i in 0..WORDLIST_SIZE as u16 {
            assert_eq!(dict.index_of(dict.word_at(i)), Some(i));
        }
    }

    #[test]
    fn test_unknown_word() {
        let dict = Dictionary::english();
        assert_eq!(dict.index_of("notaword"), None);
        assert_eq!(dict.index_of("Abandon"), None, "lookups are case-sensitive");
    }

    #[test]
    fn test_from_words_wrong_size() {
        let result = Dictionary::from_words(vec!["one", "two"]);
        assert!(matches!(result, Err(WordlistError::WrongSize(2))));
    }

    #[test]
    fn test_from_words_duplicate() {
        let mut words = synthetic_words();
        words[10] = words[3].clone();
        let result = Dictionary::from_words(words);
        assert!(matches!(result, Err(WordlistError::Duplicate(w)) if w == "w0003"));
    }

    #[test]
    fn test_from_words_empty_entry() {
        let mut words = synthetic_words();
        words[7] = String::new();
        let result = Dictionary::from_words(words);
        assert!(matches!(result, Err(WordlistError::Empty(7))));
    }

    #[test]
    fn test_from_words_rejects_whitespace_and_uppercase() {
        for bad in ["x y", " pad", "pad ", "tab\there", "Upper"] {
            let mut words = synthetic_words();
            words[2047] = bad.to_string();
            let result = Dictionary::from_words(words);
            assert!(
                matches!(result, Err(WordlistError::Malformed(ref w)) if w == bad),
                "{bad:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_load_rejects_multi_word_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut words = synthetic_words();
        words[100] = "foo bar".into();
        for word in words {
            writeln!(file, "{word}").unwrap();
        }

        let result = Dictionary::load(file.path());
        assert!(matches!(result, Err(WordlistError::Malformed(w)) if w == "foo bar"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for word in synthetic_words() {
            writeln!(file, "  {word}  ").unwrap();
        }
        writeln!(file).unwrap();

        let dict = Dictionary::load(file.path()).unwrap();
        assert_eq!(dict.len(), WORDLIST_SIZE);
        assert_eq!(dict.word_at(5), "w0005");
        assert_eq!(dict.index_of("w2047"), Some(2047));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dictionary::load(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(WordlistError::Io(_))));
    }
}
