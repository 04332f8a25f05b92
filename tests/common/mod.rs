use chrono::Utc;
use tempfile::TempDir;

use vocab_engine::store::operations::books::Book;
use vocab_engine::store::operations::words::WordEntry;
use vocab_engine::store::Store;

pub fn open_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path().join("db").to_str().unwrap()).expect("open store");
    store.run_migrations().expect("run migrations");
    (dir, store)
}

pub fn seed_book(store: &Store, id: &str, title: &str) -> Book {
    let book = Book {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        is_builtin: true,
        created_at: Utc::now(),
        word_count: 0,
    };
    store.upsert_book(&book).expect("upsert seed book");
    book
}

pub fn seed_book_words(store: &Store, book_id: &str, words: &[&str]) -> Vec<WordEntry> {
    let mut out = Vec::new();
    for word in words {
        let entry = WordEntry {
            book_id: book_id.to_string(),
            word: word.to_string(),
            pos: "n.".to_string(),
            definition: format!("definition of {word}"),
            phonetic: None,
            audio: None,
            example: None,
            example_audio: None,
            initial: word.chars().next().map(|c| c.to_string()),
            level: Some("KET".to_string()),
        };
        store.add_word_to_book(&entry).expect("add seed word");
        out.push(entry);
    }
    out
}
