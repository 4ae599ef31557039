//! Text cleanup applied to reconstructed spans.

pub mod hyphenation;

pub use hyphenation::HyphenationHandler;
