//! The Hjson decoder.
//!
//! Parsing is driven by an explicit stack of parse states plus a parallel
//! stack of per-container frames, so arbitrarily deep documents never touch
//! the host call stack. Each state handler consumes input through the
//! [`Scanner`], attaches trivia spans to the node they decorate, and folds
//! completed child frames into their parent.

mod literals;
pub(crate) mod number;
mod scanner;
mod trivia;

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use scanner::Scanner;
use trivia::CommentSpan;

use crate::error::{Error, Result};
use crate::options::DecoderOptions;
use crate::value::{Map, Value, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ValueBegin,
    ValueEnd,
    VectorBegin,
    VectorElemEnd,
    MapBegin,
    MapElemBegin,
    MapElemEnd,
}

/// Per-container scratch state. One frame per value under construction; the
/// value is transferred into its parent when the element completes.
struct Frame {
    val: Value,
    key: String,
    key_pos: isize,
    item_pos: isize,
    ci_before: CommentSpan,
    ci_key: CommentSpan,
    ci_elem_before: CommentSpan,
    ci_elem_extra: CommentSpan,
    is_root: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            val: Value::default(),
            key: String::new(),
            key_pos: -1,
            item_pos: -1,
            ci_before: CommentSpan::default(),
            ci_key: CommentSpan::default(),
            ci_elem_before: CommentSpan::default(),
            ci_elem_extra: CommentSpan::default(),
            is_root: false,
        }
    }
}

pub(crate) struct Parser<'buf> {
    scanner: Scanner<'buf>,
    opt: DecoderOptions,
    without_braces: bool,
    states: Vec<ParseState>,
    frames: Vec<Frame>,
}

impl<'buf> Parser<'buf> {
    fn new(data: &'buf [u8], opt: DecoderOptions) -> Self {
        Self {
            scanner: Scanner::new(data),
            opt,
            without_braces: false,
            states: Vec::new(),
            frames: Vec::new(),
        }
    }

    fn parse_loop(&mut self) -> Result<()> {
        while let Some(&state) = self.states.last() {
            match state {
                ParseState::ValueBegin => self.read_value_begin()?,
                ParseState::ValueEnd => self.read_value_end(),
                ParseState::VectorBegin => self.read_vector_begin(),
                ParseState::VectorElemEnd => self.read_vector_elem_end()?,
                ParseState::MapBegin => self.read_map_begin(),
                ParseState::MapElemBegin => self.read_map_elem_begin()?,
                ParseState::MapElemEnd => self.read_map_elem_end()?,
            }
        }
        Ok(())
    }

    /// `ValueBegin`: push a frame, capture leading trivia, and dispatch on
    /// the first significant character.
    fn read_value_begin(&mut self) -> Result<()> {
        let ci_before = self.read_trivia_multiline();
        let frame = Frame {
            ci_before,
            item_pos: self.scanner.position() as isize,
            ..Frame::default()
        };
        self.frames.push(frame);

        match self.scanner.ch {
            b'{' => *self.states.last_mut().unwrap() = ParseState::MapBegin,
            b'[' => *self.states.last_mut().unwrap() = ParseState::VectorBegin,
            b'"' | b'\'' => {
                let s = self.read_string(true)?;
                self.frames.last_mut().unwrap().val = Value::from(s);
                *self.states.last_mut().unwrap() = ParseState::ValueEnd;
            }
            _ => {
                let v = self.read_quoteless()?;
                self.frames.last_mut().unwrap().val = v;
                *self.states.last_mut().unwrap() = ParseState::ValueEnd;
            }
        }
        Ok(())
    }

    /// `ValueEnd`: collect the same-line after-trivia and attach the frame's
    /// pending decorations. The frame itself stays; the parent state decides
    /// when to fold it in.
    fn read_value_end(&mut self) {
        let ci_after = self.read_trivia_line();
        let frame = self.frames.last().unwrap();
        let (ci_before, item_pos) = (frame.ci_before, frame.item_pos);
        let before = self.comment_text(ci_before);
        let after = self.comment_text(ci_after);

        let frame = self.frames.last_mut().unwrap();
        if let Some(text) = before {
            frame.val.set_comment_before(text);
        }
        if let Some(text) = after {
            frame.val.set_comment_after(text);
        }
        frame.val.set_pos_item(item_pos);
        self.states.pop();
    }

    /// `VectorBegin`: the current character is `[`.
    fn read_vector_begin(&mut self) {
        self.scanner.advance();
        let ci = self.read_trivia_multiline();
        let frame = self.frames.last_mut().unwrap();
        frame.val = Value::from(Vector::new());
        frame.ci_elem_before = ci;
        frame.ci_elem_extra = CommentSpan::default();

        if self.scanner.ch == b']' {
            if let Some(text) = self.comment_text(ci) {
                self.frames.last_mut().unwrap().val.set_comment_inside(text);
            }
            self.scanner.advance();
            *self.states.last_mut().unwrap() = ParseState::ValueEnd;
        } else {
            *self.states.last_mut().unwrap() = ParseState::VectorElemEnd;
            self.states.push(ParseState::ValueBegin);
        }
    }

    /// `VectorElemEnd`: the completed element's frame sits on top of the
    /// stack. Fold it into the vector and decide whether the vector closes.
    fn read_vector_elem_end(&mut self) -> Result<()> {
        let child = self.frames.pop().unwrap();
        let mut elem = child.val;

        let parent = self.frames.last().unwrap();
        let (ci_elem_before, ci_elem_extra) = (parent.ci_elem_before, parent.ci_elem_extra);
        elem.set_comment_before(self.comment_pair_text(ci_elem_before, ci_elem_extra));

        let ci_after = self.read_trivia_multiline();
        // The comma is optional and trailing commas are allowed. A comment
        // between the value and the comma is unusual, so it joins the
        // after-comment rather than getting a slot of its own.
        let mut ci_extra = CommentSpan::default();
        if self.scanner.ch == b',' {
            self.scanner.advance();
            ci_extra = self.read_trivia_multiline();
        }
        self.frames.last_mut().unwrap().ci_elem_extra = ci_extra;

        if self.scanner.ch == b']' {
            let existing = elem.comment_after().to_owned();
            elem.set_comment_after(self.comment_pair_text(ci_after, ci_extra));
            if !existing.is_empty() {
                let combined = existing + elem.comment_after();
                elem.set_comment_after(combined);
            }
            self.scanner.advance();
            *self.states.last_mut().unwrap() = ParseState::ValueEnd;
        } else {
            if self.scanner.ch == 0 {
                return Err(self
                    .scanner
                    .syntax_error("End of input while parsing an array (did you forget a closing ']'?)"));
            }
            self.frames.last_mut().unwrap().ci_elem_before = ci_after;
            self.states.push(ParseState::ValueBegin);
        }

        if let Some(vec) = self.frames.last_mut().unwrap().val.as_vector_mut() {
            vec.push(elem);
        }
        Ok(())
    }

    /// `MapBegin`: with a brace, consume it and read interior trivia; at a
    /// braceless root the already-captured leading trivia is reused.
    fn read_map_begin(&mut self) {
        let at_braceless_root = self.frames.len() == 1 && self.without_braces;

        if self.scanner.ch == b'{' {
            self.scanner.advance();
            let ci = self.read_trivia_multiline();
            let frame = self.frames.last_mut().unwrap();
            frame.val = Value::from(Map::new());
            frame.ci_elem_before = ci;
        } else {
            let frame = self.frames.last_mut().unwrap();
            frame.val = Value::from(Map::new());
            frame.ci_elem_before = frame.ci_before;
            frame.ci_before = CommentSpan::default();
        }

        if self.scanner.ch == b'}' && !at_braceless_root {
            let ci = self.frames.last().unwrap().ci_elem_before;
            if let Some(text) = self.comment_text(ci) {
                self.frames.last_mut().unwrap().val.set_comment_inside(text);
            }
            self.scanner.advance();
            *self.states.last_mut().unwrap() = ParseState::ValueEnd;
        } else {
            *self.states.last_mut().unwrap() = ParseState::MapElemBegin;
        }
    }

    /// `MapElemBegin`: read the next key, or finalise the map at end of
    /// input when the root has no braces.
    fn read_map_elem_begin(&mut self) -> Result<()> {
        if self.scanner.ch == 0 {
            if self.frames.len() == 1 && self.without_braces {
                let frame = self.frames.last().unwrap();
                let (ci_before, ci_extra) = (frame.ci_elem_before, frame.ci_elem_extra);
                if frame.val.is_empty() {
                    if let Some(text) = self.comment_text(ci_before) {
                        self.frames.last_mut().unwrap().val.set_comment_inside(text);
                    }
                } else {
                    // The trailing trivia belongs to the last element.
                    let text = self.comment_pair_text(ci_before, ci_extra);
                    let frame = self.frames.last_mut().unwrap();
                    if let Some(map) = frame.val.as_map_mut() {
                        let last = map.len() - 1;
                        if let Some((_, elem)) = map.get_index_mut(last) {
                            let combined = elem.comment_after().to_owned() + &text;
                            elem.set_comment_after(combined);
                        }
                    }
                }
                *self.states.last_mut().unwrap() = ParseState::ValueEnd;
                return Ok(());
            }
            return Err(self
                .scanner
                .syntax_error("End of input while parsing an object (did you forget a closing '}'?)"));
        }

        let key_pos = self.scanner.position();
        let mut key = self.read_keyname()?;
        if self.frames.last().unwrap().is_root {
            if let Some(handler) = self.opt.duplicate_key_handler.as_mut() {
                handler(&mut key, &self.frames.last().unwrap().val);
            }
        }
        if self.opt.duplicate_key_exception
            && self
                .frames
                .last()
                .unwrap()
                .val
                .get(&key)
                .is_some_and(Value::defined)
        {
            return Err(self
                .scanner
                .syntax_error(format!("Found duplicate of key '{key}'")));
        }

        let ci_key = self.read_trivia_multiline();
        if self.scanner.ch != b':' {
            return Err(self.scanner.syntax_error(format!(
                "Expected ':' instead of '{}'",
                self.scanner.ch as char
            )));
        }
        self.scanner.advance();

        let frame = self.frames.last_mut().unwrap();
        frame.key = key;
        frame.key_pos = key_pos as isize;
        frame.ci_key = ci_key;
        *self.states.last_mut().unwrap() = ParseState::MapElemEnd;
        self.states.push(ParseState::ValueBegin);
        Ok(())
    }

    /// `MapElemEnd`: fold the completed element into the map. Trivia between
    /// the colon and the value (captured as the element's before-comment)
    /// moves into the key slot, so the before slot is free for the
    /// entry-level trivia.
    fn read_map_elem_end(&mut self) -> Result<()> {
        let child = self.frames.pop().unwrap();
        let mut elem = child.val;

        let parent = self.frames.last().unwrap();
        let (ci_key, ci_elem_before, ci_elem_extra) =
            (parent.ci_key, parent.ci_elem_before, parent.ci_elem_extra);
        let (key, key_pos) = (parent.key.clone(), parent.key_pos);

        if let Some(text) = self.comment_text(ci_key) {
            elem.set_comment_key(text);
        }
        if !elem.comment_before().is_empty() {
            let folded = format!("{}{}", elem.comment_key(), elem.comment_before());
            elem.set_comment_key(folded);
            elem.set_comment_before("");
        }
        elem.set_comment_before(self.comment_pair_text(ci_elem_before, ci_elem_extra));
        elem.set_pos_key(key_pos);

        let ci_after = self.read_trivia_multiline();
        let mut ci_extra = CommentSpan::default();
        if self.scanner.ch == b',' {
            self.scanner.advance();
            ci_extra = self.read_trivia_multiline();
        }
        self.frames.last_mut().unwrap().ci_elem_extra = ci_extra;

        if self.scanner.ch == b'}' && !(self.frames.len() == 1 && self.without_braces) {
            let existing = elem.comment_after().to_owned();
            elem.set_comment_after(self.comment_pair_text(ci_after, ci_extra));
            if !existing.is_empty() {
                let combined = existing + elem.comment_after();
                elem.set_comment_after(combined);
            }
            let frame = self.frames.last_mut().unwrap();
            if let Some(map) = frame.val.as_map_mut() {
                map.insert(key, elem);
            }
            self.scanner.advance();
            *self.states.last_mut().unwrap() = ParseState::ValueEnd;
        } else {
            let frame = self.frames.last_mut().unwrap();
            if let Some(map) = frame.val.as_map_mut() {
                map.insert(key, elem);
            }
            frame.ci_elem_before = ci_after;
            *self.states.last_mut().unwrap() = ParseState::MapElemBegin;
        }
        Ok(())
    }

    /// Parses the whole document. Braces for the root object are optional;
    /// a braceless document that fails to parse as an object is retried as a
    /// single bare value, and if that also fails the original error wins.
    fn root_value(&mut self) -> Result<Value> {
        let ci_before = self.read_trivia_multiline();
        let root = Frame {
            ci_before,
            item_pos: self.scanner.position() as isize,
            is_root: true,
            ..Frame::default()
        };
        self.frames.push(root);

        if self.scanner.ch == b'[' {
            self.states.push(ParseState::VectorBegin);
        } else {
            if self.scanner.ch != b'{' {
                self.without_braces = true;
            }
            self.states.push(ParseState::MapBegin);
        }

        let mut ci_extra = CommentSpan::default();
        let outcome = self
            .parse_loop()
            .and_then(|()| self.require_eof(&mut ci_extra));
        if let Err(first) = outcome {
            if !self.without_braces {
                return Err(first);
            }
            self.scanner.reset();
            self.frames.clear();
            self.states.clear();
            self.states.push(ParseState::ValueBegin);
            let retry = self
                .parse_loop()
                .and_then(|()| self.require_eof(&mut ci_extra));
            if retry.is_err() {
                return Err(first);
            }
        }

        let mut ret = self.frames.pop().map(|f| f.val).unwrap_or_default();
        if ci_extra.has_comment || (self.opt.comments && ci_extra.end > ci_extra.start) {
            let combined = ret.comment_after().to_owned() + &self.span_text(ci_extra);
            ret.set_comment_after(combined);
        }
        Ok(ret)
    }

    fn require_eof(&mut self, trailing: &mut CommentSpan) -> Result<()> {
        *trailing = self.read_trivia_multiline();
        if self.scanner.ch > 0 {
            return Err(self
                .scanner
                .syntax_error("Syntax error, found trailing characters"));
        }
        Ok(())
    }
}

/// Decodes an Hjson document from raw bytes.
///
/// Bytes outside the ASCII range pass through verbatim inside string bodies
/// and comments; sequences that are not valid UTF-8 are replaced lossily when
/// extracted into strings.
///
/// # Errors
///
/// [`Error::Syntax`] for malformed input.
pub fn unmarshal_bytes(data: &[u8], options: DecoderOptions) -> Result<Value> {
    let mut opt = options;
    if opt.whitespace_as_comments {
        opt.comments = true;
    }
    let mut parser = Parser::new(data, opt);
    parser.scanner.reset();
    parser.root_value()
}

/// Decodes an Hjson document.
///
/// # Errors
///
/// [`Error::Syntax`] for malformed input.
///
/// # Examples
///
/// ```
/// use hjson_tree::{unmarshal, DecoderOptions};
///
/// let value = unmarshal("{a: 1, b: [true, \"two\"]}", DecoderOptions::default()).unwrap();
/// assert_eq!(value["a"].to_i64().unwrap(), 1);
/// assert_eq!(value["b"][1].as_str(), Some("two"));
/// ```
pub fn unmarshal(text: &str, options: DecoderOptions) -> Result<Value> {
    unmarshal_bytes(text.as_bytes(), options)
}

/// Reads a whole file and decodes it. Trailing NUL bytes, then one trailing
/// `\n`, then one trailing `\r` are stripped before decoding.
///
/// # Errors
///
/// [`Error::File`] when the file cannot be read, [`Error::Syntax`] for
/// malformed content.
pub fn unmarshal_from_file(path: impl AsRef<Path>, options: DecoderOptions) -> Result<Value> {
    let path = path.as_ref();
    let mut data = std::fs::read(path).map_err(|source| Error::File {
        path: path.display().to_string(),
        source,
    })?;
    while data.last() == Some(&0) {
        data.pop();
    }
    if data.last() == Some(&b'\n') {
        data.pop();
    }
    if data.last() == Some(&b'\r') {
        data.pop();
    }
    unmarshal_bytes(&data, options)
}

/// Drains `reader` to a buffer and decodes it.
///
/// # Errors
///
/// [`Error::File`] when reading fails, [`Error::Syntax`] for malformed
/// content.
pub fn unmarshal_from_reader(mut reader: impl Read, options: DecoderOptions) -> Result<Value> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(|source| Error::File {
        path: "<reader>".to_owned(),
        source,
    })?;
    unmarshal_bytes(&data, options)
}

impl FromStr for Value {
    type Err = Error;

    /// Decodes an Hjson document with default options.
    ///
    /// # Examples
    ///
    /// ```
    /// use hjson_tree::Value;
    ///
    /// let v: Value = "[1, 2, 3]".parse().unwrap();
    /// assert_eq!(v.len(), 3);
    /// ```
    fn from_str(s: &str) -> Result<Value> {
        unmarshal(s, DecoderOptions::default())
    }
}
