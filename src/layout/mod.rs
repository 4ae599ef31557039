//! Page word layout.
//!
//! Words come from the document collaborator already grouped and in natural
//! reading order; this module only indexes them for region queries.

pub mod word;

pub use word::{Word, WordIndex};
