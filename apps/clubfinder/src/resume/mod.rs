// Resume mode: decode an uploaded file, then score its text against the keyword dictionary.
// Decoding is the only async step; extraction itself is synchronous.

pub mod document;
pub mod extractor;

pub use document::ResumeDocument;
pub use extractor::{KeywordTagExtractor, TagExtractor, TagScore};
