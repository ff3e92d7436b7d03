//! Hjson decoder producing a comment-preserving value tree.
//!
//! [Hjson] is a superset of JSON designed for human editing: quotes around
//! keys and values are optional, commas are optional, `#`, `//`, and
//! `/*…*/` comments are allowed, `'''…'''` introduces multi-line strings,
//! and the braces around the root object may be omitted.
//!
//! This crate parses a document into a [`Value`] tree. Every node carries
//! four comment slots (`before`, `key`, `inside`, `after`) and two source
//! positions, so an encoder can re-emit the document with its original
//! formatting intact. With
//! [`whitespace_as_comments`](DecoderOptions::whitespace_as_comments) the
//! slots capture *all* interstitial trivia, byte for byte.
//!
//! Parsing is iterative — an explicit state stack instead of recursion — so
//! pathologically deep documents cannot exhaust the call stack.
//!
//! # Examples
//!
//! ```
//! use hjson_tree::{unmarshal, DecoderOptions};
//!
//! let doc = "\
//! ## server settings
//! host: example.com
//! port: 8080
//! ";
//! let options = DecoderOptions {
//!     comments: true,
//!     ..Default::default()
//! };
//! let value = unmarshal(doc, options).unwrap();
//! assert_eq!(value["host"].as_str(), Some("example.com"));
//! assert_eq!(value["port"].to_i64().unwrap(), 8080);
//! assert_eq!(value["host"].comment_before(), "# server settings\n");
//! ```
//!
//! [Hjson]: https://hjson.github.io

mod decoder;
mod error;
mod options;
mod value;

pub use decoder::{unmarshal, unmarshal_bytes, unmarshal_from_file, unmarshal_from_reader};
pub use error::{Error, Result};
pub use options::{DecoderOptions, DuplicateKeyHandler};
pub use value::{Kind, Map, Value, Vector};

#[cfg(test)]
mod tests;
