//! Literal readers: quoted strings, multi-line strings, key names, and
//! quoteless values.

use super::number::try_parse_number;
use super::Parser;
use crate::error::Result;
use crate::value::Value;

pub(super) fn is_punctuator(c: u8) -> bool {
    matches!(c, b'{' | b'}' | b'[' | b']' | b',' | b':')
}

/// The characters `std::isspace` recognises in the C locale.
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn escape_char(c: u8) -> u8 {
    match c {
        b'"' | b'\'' | b'\\' | b'/' => c,
        b'b' => 0x08,
        b'f' => 0x0c,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        _ => 0,
    }
}

fn push_code_point(res: &mut Vec<u8>, code: u32) {
    // Each `\uXXXX` stands alone; surrogate halves are never combined, and an
    // unpaired half cannot live in a `String`, so it degrades to U+FFFD.
    let decoded = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
    let mut buf = [0u8; 4];
    res.extend_from_slice(decoded.encode_utf8(&mut buf).as_bytes());
}

impl<'buf> Parser<'buf> {
    /// Reads a quoted string. The caller guarantees the current character is
    /// the opening `"` or `'`. With `allow_multiline`, an empty `''` directly
    /// followed by a third `'` switches to multi-line mode.
    pub(super) fn read_string(&mut self, allow_multiline: bool) -> Result<String> {
        let mut res: Vec<u8> = Vec::new();
        let exit_ch = self.scanner.ch;

        while self.scanner.advance() {
            if self.scanner.ch == exit_ch {
                self.scanner.advance();
                if allow_multiline
                    && exit_ch == b'\''
                    && self.scanner.ch == b'\''
                    && res.is_empty()
                {
                    self.scanner.advance();
                    return self.read_multiline_string();
                }
                return Ok(String::from_utf8_lossy(&res).into_owned());
            }
            match self.scanner.ch {
                b'\\' => {
                    self.scanner.advance();
                    if self.scanner.ch == b'u' {
                        let mut code = 0u32;
                        for _ in 0..4 {
                            self.scanner.advance();
                            let nibble = match self.scanner.ch {
                                c @ b'0'..=b'9' => u32::from(c - b'0'),
                                c @ b'a'..=b'f' => u32::from(c - b'a') + 0xa,
                                c @ b'A'..=b'F' => u32::from(c - b'A') + 0xa,
                                c => {
                                    return Err(self
                                        .scanner
                                        .syntax_error(format!("Bad \\u char {}", c as char)))
                                }
                            };
                            code = code * 16 + nibble;
                        }
                        push_code_point(&mut res, code);
                    } else {
                        match escape_char(self.scanner.ch) {
                            0 => {
                                return Err(self.scanner.syntax_error(format!(
                                    "Bad escape \\{}",
                                    self.scanner.ch as char
                                )))
                            }
                            e => res.push(e),
                        }
                    }
                }
                b'\n' | b'\r' => {
                    return Err(self.scanner.syntax_error("Bad string containing newline"))
                }
                c => res.push(c),
            }
        }

        Err(self.scanner.syntax_error("Bad string"))
    }

    /// Reads the body of a `'''…'''` string. The cursor sits on the first
    /// character after the opener.
    ///
    /// The opener's column is the maximum indentation stripped from each
    /// body line; shorter lines lose all of their leading whitespace. A
    /// newline directly before the closing `'''` is dropped.
    fn read_multiline_string(&mut self) -> Result<String> {
        let mut res: Vec<u8> = Vec::new();
        let mut triple = 0;

        // Walk backwards from the first quote of the opener to the previous
        // newline (or the start of the buffer) to measure the indent.
        let mut indent: isize = 0;
        loop {
            let c = self.scanner.peek(-indent - 5);
            if c == 0 || c == b'\n' {
                break;
            }
            indent += 1;
        }

        // Consume trailing inline whitespace and the newline after the opener.
        while self.scanner.ch > 0 && self.scanner.ch <= b' ' && self.scanner.ch != b'\n' {
            self.scanner.advance();
        }
        if self.scanner.ch == b'\n' {
            self.scanner.advance();
            self.skip_indent(indent);
        }

        let mut last_lf = false;
        loop {
            if self.scanner.ch == 0 {
                return Err(self.scanner.syntax_error("Bad multiline string"));
            }
            if self.scanner.ch == b'\'' {
                triple += 1;
                self.scanner.advance();
                if triple == 3 {
                    if last_lf {
                        res.pop();
                    }
                    return Ok(String::from_utf8_lossy(&res).into_owned());
                }
                continue;
            }
            // Fewer than three quotes in a row are literal content.
            while triple > 0 {
                res.push(b'\'');
                triple -= 1;
                last_lf = false;
            }
            if self.scanner.ch == b'\n' {
                res.push(b'\n');
                last_lf = true;
                self.scanner.advance();
                self.skip_indent(indent);
            } else {
                if self.scanner.ch != b'\r' {
                    res.push(self.scanner.ch);
                    last_lf = false;
                }
                self.scanner.advance();
            }
        }
    }

    fn skip_indent(&mut self, indent: isize) {
        let mut skip = indent;
        while self.scanner.ch > 0 && self.scanner.ch <= b' ' && self.scanner.ch != b'\n' && skip > 0
        {
            skip -= 1;
            self.scanner.advance();
        }
    }

    /// Reads a key name, quoted or bare. A bare key ends at `:` and may not
    /// contain punctuators or internal whitespace.
    pub(super) fn read_keyname(&mut self) -> Result<String> {
        if self.scanner.ch == b'"' || self.scanner.ch == b'\'' {
            return self.read_string(false);
        }

        let key_start = self.scanner.position();
        let mut key_end = key_start;
        let mut first_space: Option<usize> = None;
        loop {
            if self.scanner.ch == b':' {
                if key_end <= key_start {
                    return Err(self
                        .scanner
                        .syntax_error("Found ':' but no key name (for an empty key name use quotes)"));
                }
                if let Some(space) = first_space {
                    if space != key_end {
                        self.scanner.set_next(space + 1);
                        return Err(self.scanner.syntax_error(
                            "Found whitespace in your key name (use quotes to include)",
                        ));
                    }
                }
                let data = self.scanner.data();
                return Ok(String::from_utf8_lossy(&data[key_start..key_end]).into_owned());
            } else if self.scanner.ch <= b' ' {
                if self.scanner.ch == 0 {
                    return Err(self
                        .scanner
                        .syntax_error("Found EOF while looking for a key name (check your syntax)"));
                }
                if first_space.is_none() {
                    first_space = Some(self.scanner.position());
                }
            } else {
                if is_punctuator(self.scanner.ch) {
                    return Err(self.scanner.syntax_error(format!(
                        "Found '{}' where a key name was expected (check your syntax or use quotes if the key name includes {{}}[],: or whitespace)",
                        self.scanner.ch as char
                    )));
                }
                key_end = self.scanner.position() + 1;
            }
            self.scanner.advance();
        }
    }

    /// Reads a quoteless value: `true`, `false`, `null`, a number, or a bare
    /// string running to the end of the line.
    ///
    /// After the call the cursor sits immediately past the last byte of the
    /// value, so trailing whitespace up to the newline lands in the
    /// after-comment.
    pub(super) fn read_quoteless(&mut self) -> Result<Value> {
        let (value, val_end) = self.read_quoteless_inner()?;
        self.scanner.seek(val_end);
        Ok(value)
    }

    fn read_quoteless_inner(&mut self) -> Result<(Value, usize)> {
        if is_punctuator(self.scanner.ch) {
            return Err(self.scanner.syntax_error(format!(
                "Found a punctuator character '{}' when expecting a quoteless string (check your syntax)",
                self.scanner.ch as char
            )));
        }

        let mut val_start = self.scanner.position();
        let mut val_end = val_start;
        if is_space(self.scanner.ch) {
            val_start += 1;
        } else {
            val_end = val_start + 1;
        }

        loop {
            self.scanner.advance();
            let ch = self.scanner.ch;
            let is_eol = ch == b'\r' || ch == b'\n' || ch == 0;
            let at_comment = ch == b'#'
                || (ch == b'/' && matches!(self.scanner.peek(0), b'/' | b'*'));
            if is_eol || at_comment || ch == b',' || ch == b'}' || ch == b']' {
                let text = self.quoteless_text(val_start, val_end);
                match text.as_str() {
                    "true" => return Ok((Value::from(true), val_end)),
                    "false" => return Ok((Value::from(false), val_end)),
                    "null" => return Ok((Value::null(), val_end)),
                    _ => {
                        if matches!(text.as_bytes().first(), Some(b'-' | b'0'..=b'9')) {
                            if let Some(number) = try_parse_number(&text) {
                                return Ok((number, val_end));
                            }
                        }
                    }
                }
                // A separator only ends the value when it parses as a
                // literal or number; in a quoteless string, `,` `}` `]` are
                // content and scanning continues to the end of the line.
                if is_eol || at_comment {
                    return Ok((Value::from(text), val_end));
                }
            }
            if is_space(ch) {
                if val_end <= val_start {
                    val_start += 1;
                }
            } else {
                val_end = self.scanner.position() + 1;
            }
        }
    }

    fn quoteless_text(&self, start: usize, end: usize) -> String {
        let data = self.scanner.data();
        let start = start.min(data.len());
        let end = end.min(data.len()).max(start);
        String::from_utf8_lossy(&data[start..end]).into_owned()
    }
}
