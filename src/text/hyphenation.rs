//! Removal of line-break hyphenation from reconstructed spans.
//!
//! A highlight that runs across a line wrap recovers the two halves of a
//! broken word as separate tokens, `"inter-"` and `"national"`. Once the
//! tokens are joined with spaces the artifact is a hyphen immediately
//! followed by a space, and deleting that pair rejoins the word.
//!
//! The rule is purely lexical. It also removes a dash used as a separator
//! (`"a - b"` becomes `"a b"`), which matches how existing transcripts were
//! produced.

/// Hard hyphen followed by the joining space.
const HARD_BREAK: &str = "- ";

/// Soft hyphen (U+00AD) followed by the joining space.
const SOFT_BREAK: &str = "\u{00AD} ";

/// Joins words that were split across line breaks.
#[derive(Debug, Clone, Default)]
pub struct HyphenationHandler;

impl HyphenationHandler {
    /// Create a handler that removes both hard and soft hyphen artifacts.
    pub fn new() -> Self {
        Self
    }

    /// Remove every hyphen-space artifact from `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use annot_oxide::text::HyphenationHandler;
    ///
    /// let handler = HyphenationHandler::new();
    /// assert_eq!(handler.join_line_breaks("an inter- national study"), "an international study");
    /// assert_eq!(handler.join_line_breaks("well-known"), "well-known");
    /// ```
    pub fn join_line_breaks(&self, text: &str) -> String {
        text.replace(HARD_BREAK, "").replace(SOFT_BREAK, "")
    }
}
