pub mod books;
pub mod daily;
pub mod plans;
pub mod progress;
pub mod words;
