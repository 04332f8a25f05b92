use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::operations::books::Book;
use crate::store::{Store, StoreError};
use crate::validation::validate_word_text;

/// Static dictionary record. Immutable once imported; the engine only
/// reads these to build batches and resolve progress keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub book_id: String,
    pub word: String,
    pub pos: String,
    pub definition: String,
    pub phonetic: Option<String>,
    pub audio: Option<String>,
    pub example: Option<String>,
    pub example_audio: Option<String>,
    /// First-letter bucket used by the catalog browser.
    pub initial: Option<String>,
    pub level: Option<String>,
}

impl WordEntry {
    pub fn identity(&self) -> String {
        keys::word_identity(&self.book_id, &self.word)
    }
}

impl Store {
    pub fn upsert_word_entry(&self, entry: &WordEntry) -> Result<(), StoreError> {
        validate_word_text(&entry.word, &entry.definition)
            .map_err(|msg| StoreError::Validation(msg.to_string()))?;
        let key = keys::word_key(&entry.book_id, &entry.word);
        self.words.insert(key.as_bytes(), Self::serialize(entry)?)?;
        Ok(())
    }

    pub fn get_word_entry(
        &self,
        book_id: &str,
        word: &str,
    ) -> Result<Option<WordEntry>, StoreError> {
        let key = keys::word_key(book_id, word);
        match self.words.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn list_book_words(&self, book_id: &str) -> Result<Vec<WordEntry>, StoreError> {
        let prefix = keys::book_words_prefix(book_id);
        let mut entries = Vec::new();
        for item in self.words.scan_prefix(prefix.as_bytes()) {
            let (_, v) = item?;
            entries.push(Self::deserialize::<WordEntry>(&v)?);
        }
        Ok(entries)
    }

    /// Insert a word and refresh the owning book's word count.
    ///
    /// Recounts AFTER the insert has succeeded, mirroring the two-write
    /// pattern used everywhere else in this store: a crash in between
    /// leaves a stale count that the next import corrects.
    pub fn add_word_to_book(&self, entry: &WordEntry) -> Result<(), StoreError> {
        self.upsert_word_entry(entry)?;

        let count = self.count_book_words(&entry.book_id)?;
        let book_key = keys::book_key(&entry.book_id);
        if let Some(raw) = self.books.get(book_key.as_bytes())? {
            let mut book: Book = Self::deserialize(&raw)?;
            book.word_count = count;
            self.books
                .insert(book_key.as_bytes(), Self::serialize(&book)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn mock_entry(book_id: &str, word: &str) -> WordEntry {
        WordEntry {
            book_id: book_id.to_string(),
            word: word.to_string(),
            pos: "n.".to_string(),
            definition: format!("释义-{word}"),
            phonetic: None,
            audio: None,
            example: None,
            example_audio: None,
            initial: word.chars().next().map(|c| c.to_string()),
            level: None,
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        store.upsert_word_entry(&mock_entry("b1", "Apple")).unwrap();
        let entry = store.get_word_entry("b1", "apple").unwrap().unwrap();
        // 词形原样保存，只有 key 做小写归一
        assert_eq!(entry.word, "Apple");
    }

    #[test]
    fn list_book_words_scopes_by_book() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        store.upsert_word_entry(&mock_entry("b1", "cat")).unwrap();
        store.upsert_word_entry(&mock_entry("b1", "dog")).unwrap();
        store.upsert_word_entry(&mock_entry("b2", "fish")).unwrap();

        let words = store.list_book_words("b1").unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.iter().all(|w| w.book_id == "b1"));
    }

    #[test]
    fn add_word_to_book_refreshes_count() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        let book = Book {
            id: "b1".to_string(),
            title: "KET Core".to_string(),
            description: None,
            is_builtin: true,
            created_at: Utc::now(),
            word_count: 0,
        };
        store.upsert_book(&book).unwrap();

        store.add_word_to_book(&mock_entry("b1", "cat")).unwrap();
        store.add_word_to_book(&mock_entry("b1", "dog")).unwrap();
        // Re-importing the same word must not double count.
        store.add_word_to_book(&mock_entry("b1", "Cat")).unwrap();

        assert_eq!(store.get_book("b1").unwrap().unwrap().word_count, 2);
    }

    #[test]
    fn rejects_invalid_words() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        let mut bad = mock_entry("b1", "a:b");
        assert!(matches!(
            store.upsert_word_entry(&bad),
            Err(StoreError::Validation(_))
        ));
        bad = mock_entry("b1", " ");
        assert!(store.upsert_word_entry(&bad).is_err());
    }
}
