pub mod core;

// Re-export the main types for convenience
pub use core::{QuestionBank, QuestionRecord, DEFAULT_DIFFICULTY, DEFAULT_ROLE};
