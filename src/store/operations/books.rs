use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_builtin: bool,
    pub created_at: DateTime<Utc>,
    pub word_count: u64,
}

impl Book {
    /// A fresh user-created book with a generated id and no words yet.
    pub fn new(title: impl Into<String>, description: Option<String>, is_builtin: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description,
            is_builtin,
            created_at: Utc::now(),
            word_count: 0,
        }
    }
}

impl Store {
    pub fn upsert_book(&self, book: &Book) -> Result<(), StoreError> {
        let key = keys::book_key(&book.id);
        self.books.insert(key.as_bytes(), Self::serialize(book)?)?;
        Ok(())
    }

    pub fn get_book(&self, book_id: &str) -> Result<Option<Book>, StoreError> {
        let key = keys::book_key(book_id);
        match self.books.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        let mut books = Vec::new();
        for item in self.books.iter() {
            let (_, v) = item?;
            books.push(Self::deserialize::<Book>(&v)?);
        }
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    pub fn count_book_words(&self, book_id: &str) -> Result<u64, StoreError> {
        let prefix = keys::book_words_prefix(book_id);
        let mut count = 0_u64;
        for item in self.words.scan_prefix(prefix.as_bytes()) {
            item?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn mock_book(id: &str, title: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            is_builtin: true,
            created_at: Utc::now(),
            word_count: 0,
        }
    }

    #[test]
    fn upsert_and_get_roundtrip() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        store.upsert_book(&mock_book("b1", "KET Core")).unwrap();
        let book = store.get_book("b1").unwrap().unwrap();
        assert_eq!(book.title, "KET Core");
        assert!(store.get_book("missing").unwrap().is_none());
    }

    #[test]
    fn new_books_get_unique_ids() {
        let a = Book::new("My Words", None, false);
        let b = Book::new("My Words", None, false);
        assert_ne!(a.id, b.id);
        assert_eq!(a.word_count, 0);
    }

    #[test]
    fn list_books_sorts_by_title() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        store.upsert_book(&mock_book("b2", "Zoo Words")).unwrap();
        store.upsert_book(&mock_book("b1", "Animals")).unwrap();

        let books = store.list_books().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Animals");
        assert_eq!(books[1].title, "Zoo Words");
    }
}
