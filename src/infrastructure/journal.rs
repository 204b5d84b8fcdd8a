pub mod json_lines_journal;

pub use json_lines_journal::JsonLinesJournal;
