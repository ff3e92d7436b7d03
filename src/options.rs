use std::fmt;

use crate::value::Value;

/// Callback invoked for every key read at the root level, before the
/// duplicate-key check. It receives the key and the map built so far and may
/// rewrite the key in place, typically to de-duplicate it.
pub type DuplicateKeyHandler = Box<dyn FnMut(&mut String, &Value)>;

/// Configuration options for the Hjson decoder.
///
/// # Default
///
/// All flags default to `false` and no duplicate-key handler is installed.
#[derive(Default)]
pub struct DecoderOptions {
    /// Whether to populate the comment slots on decoded values from `#`,
    /// `//`, and `/*…*/` trivia.
    ///
    /// # Default
    ///
    /// `false`
    pub comments: bool,

    /// Whether to populate the comment slots from *all* trivia, including
    /// plain whitespace, so that an encoder can reproduce the document's
    /// exact layout. Implies [`comments`].
    ///
    /// # Default
    ///
    /// `false`
    ///
    /// [`comments`]: DecoderOptions::comments
    pub whitespace_as_comments: bool,

    /// Whether a key that is already present in the current map raises a
    /// syntax error instead of silently replacing the earlier value.
    ///
    /// # Default
    ///
    /// `false`
    pub duplicate_key_exception: bool,

    /// Optional root-level key rewriter, run before the uniqueness check.
    ///
    /// # Default
    ///
    /// `None`
    pub duplicate_key_handler: Option<DuplicateKeyHandler>,
}

impl fmt::Debug for DecoderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderOptions")
            .field("comments", &self.comments)
            .field("whitespace_as_comments", &self.whitespace_as_comments)
            .field("duplicate_key_exception", &self.duplicate_key_exception)
            .field(
                "duplicate_key_handler",
                &self.duplicate_key_handler.as_ref().map(|_| ".."),
            )
            .finish()
    }
}
