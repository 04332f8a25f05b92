pub const META: &str = "meta";
pub const BOOKS: &str = "books";
pub const WORDS: &str = "words";
pub const PROGRESS: &str = "progress";
pub const PLANS: &str = "plans";
pub const DAILY: &str = "daily";
