mod decode_bad;
mod decode_good;

use crate::{DecoderOptions, Result, Value};

/// Decodes with default options.
pub(crate) fn decode(text: &str) -> Result<Value> {
    crate::unmarshal(text, DecoderOptions::default())
}

/// Decodes with the comment slots populated from `#`, `//`, `/*…*/` trivia.
pub(crate) fn decode_with_comments(text: &str) -> Result<Value> {
    crate::unmarshal(
        text,
        DecoderOptions {
            comments: true,
            ..Default::default()
        },
    )
}

/// Decodes with every piece of trivia captured in the comment slots.
pub(crate) fn decode_with_whitespace(text: &str) -> Result<Value> {
    crate::unmarshal(
        text,
        DecoderOptions {
            whitespace_as_comments: true,
            ..Default::default()
        },
    )
}
