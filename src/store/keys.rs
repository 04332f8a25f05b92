//! Composite key encoders.
//!
//! Word identity is case-insensitive: every key lowercases the word text so
//! that "Apple" and "apple" resolve to the same record. Keys are built with
//! `:` separators so per-book and per-user scans are plain prefix scans.

pub fn book_key(book_id: &str) -> String {
    book_id.to_string()
}

pub fn word_key(book_id: &str, word: &str) -> String {
    format!("{}:{}", book_id, word.to_lowercase())
}

pub fn book_words_prefix(book_id: &str) -> String {
    format!("{}:", book_id)
}

pub fn progress_key(user_id: &str, book_id: &str, word: &str) -> String {
    format!("{}:{}:{}", user_id, book_id, word.to_lowercase())
}

pub fn progress_prefix(user_id: &str) -> String {
    format!("{}:", user_id)
}

pub fn plan_key(user_id: &str) -> String {
    user_id.to_string()
}

pub fn daily_key(user_id: &str, date_iso: &str) -> String {
    format!("{}:{}", user_id, date_iso)
}

pub fn daily_prefix(user_id: &str) -> String {
    format!("{}:", user_id)
}

/// `bookId:word` identity used for dedup and the daily learned-word set.
pub fn word_identity(book_id: &str, word: &str) -> String {
    format!("{}:{}", book_id, word.to_lowercase())
}
