//! Trivia (whitespace and comment) consumption.
//!
//! Hjson keeps trivia attached to the tree so the encoder can replay it. The
//! readers here only record byte spans; the text is extracted when a node is
//! finalised, so the parser never holds borrowed comment views.

use super::Parser;

/// A span of consumed trivia. `start` is the position before the first
/// consumed byte, `end` the position of the first unconsumed byte.
/// `has_comment` marks spans the caller should attach to the tree, according
/// to the `comments` / `whitespace_as_comments` options.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct CommentSpan {
    pub start: usize,
    pub end: usize,
    pub has_comment: bool,
}

impl<'buf> Parser<'buf> {
    /// Skips any mix of whitespace (including newlines), `#…` and `//…` line
    /// comments, and `/*…*/` block comments.
    pub(super) fn read_trivia_multiline(&mut self) -> CommentSpan {
        let start = self.scanner.position();
        let mut has_comment = false;
        loop {
            while self.scanner.ch > 0 && self.scanner.ch <= b' ' {
                self.scanner.advance();
            }
            if self.scanner.ch == b'#'
                || (self.scanner.ch == b'/' && self.scanner.peek(0) == b'/')
            {
                has_comment |= self.opt.comments;
                self.skip_to_line_end();
            } else if self.scanner.ch == b'/' && self.scanner.peek(0) == b'*' {
                has_comment |= self.opt.comments;
                self.skip_block_comment();
            } else {
                break;
            }
        }
        let end = self.scanner.position();
        CommentSpan {
            start,
            end,
            has_comment: has_comment || (self.opt.whitespace_as_comments && end > start),
        }
    }

    /// Like [`read_trivia_multiline`], but whitespace skipping stops at the
    /// first newline. Collects the after-comment of a value: everything up to
    /// end of line belongs to the value just parsed, anything beyond to the
    /// next node. A block comment opened on this line may still span
    /// newlines.
    ///
    /// [`read_trivia_multiline`]: Parser::read_trivia_multiline
    pub(super) fn read_trivia_line(&mut self) -> CommentSpan {
        let start = self.scanner.position();
        let mut has_comment = self.opt.whitespace_as_comments;
        loop {
            while self.scanner.ch > 0 && self.scanner.ch <= b' ' && self.scanner.ch != b'\n' {
                self.scanner.advance();
            }
            if self.scanner.ch == b'#'
                || (self.scanner.ch == b'/' && self.scanner.peek(0) == b'/')
            {
                has_comment |= self.opt.comments;
                self.skip_to_line_end();
            } else if self.scanner.ch == b'/' && self.scanner.peek(0) == b'*' {
                has_comment |= self.opt.comments;
                self.skip_block_comment();
            } else {
                break;
            }
        }
        CommentSpan {
            start,
            end: self.scanner.position(),
            has_comment,
        }
    }

    fn skip_to_line_end(&mut self) {
        while self.scanner.ch > 0 && self.scanner.ch != b'\n' {
            self.scanner.advance();
        }
    }

    /// Block comments may not be nested. An unterminated one silently
    /// extends to end of input.
    fn skip_block_comment(&mut self) {
        self.scanner.advance();
        self.scanner.advance();
        while self.scanner.ch > 0 && !(self.scanner.ch == b'*' && self.scanner.peek(0) == b'/') {
            self.scanner.advance();
        }
        if self.scanner.ch > 0 {
            self.scanner.advance();
            self.scanner.advance();
        }
    }

    /// The source text of a span, clamped to the buffer.
    pub(super) fn span_text(&self, span: CommentSpan) -> String {
        let data = self.scanner.data();
        let start = span.start.min(data.len());
        let end = span.end.min(data.len()).max(start);
        String::from_utf8_lossy(&data[start..end]).into_owned()
    }

    /// Text to attach for a single span, or `None` to leave the slot alone.
    pub(super) fn comment_text(&self, span: CommentSpan) -> Option<String> {
        span.has_comment.then(|| self.span_text(span))
    }

    /// Text to attach for a pair of adjacent spans. Always yields a value:
    /// combining two unflagged spans clears the slot, which the element-end
    /// states rely on.
    pub(super) fn comment_pair_text(&self, a: CommentSpan, b: CommentSpan) -> String {
        match (a.has_comment, b.has_comment) {
            (true, true) => self.span_text(a) + &self.span_text(b),
            (true, false) => self.span_text(a),
            (false, true) => self.span_text(b),
            (false, false) => String::new(),
        }
    }
}
