//! Numeric-literal tokeniser for quoteless values.

use crate::value::Value;

/// Attempts to parse `text` as a number. The whole input must match the JSON
/// number grammar: optional minus, integer part without superfluous leading
/// zeros, optional fraction, optional exponent.
///
/// Purely integral literals yield `Int64`, falling back to `Double` when the
/// magnitude overflows `i64`; fractional or exponential literals yield
/// `Double`. Anything else yields `None`, which makes the quoteless reader
/// treat the text as a string.
pub(crate) fn try_parse_number(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut is_double = false;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return None,
    }
    if bytes.get(i) == Some(&b'.') {
        is_double = true;
        i += 1;
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return None;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        is_double = true;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return None;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if i != bytes.len() {
        return None;
    }

    if is_double {
        text.parse::<f64>().ok().map(Value::from)
    } else {
        match text.parse::<i64>() {
            Ok(n) => Some(Value::from(n)),
            Err(_) => text.parse::<f64>().ok().map(Value::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn integers() {
        assert_eq!(try_parse_number("0").unwrap().to_i64().unwrap(), 0);
        assert_eq!(try_parse_number("-0").unwrap().to_i64().unwrap(), 0);
        assert_eq!(try_parse_number("42").unwrap().to_i64().unwrap(), 42);
        assert_eq!(
            try_parse_number("-9007199254740993").unwrap().to_i64().unwrap(),
            -9007199254740993
        );
    }

    #[test]
    fn doubles() {
        assert_eq!(try_parse_number("-3.5").unwrap().kind(), Kind::Double);
        assert_eq!(try_parse_number("1e3").unwrap().to_f64().unwrap(), 1000.0);
        assert_eq!(try_parse_number("2.5E-1").unwrap().to_f64().unwrap(), 0.25);
        assert_eq!(try_parse_number("1e+2").unwrap().to_f64().unwrap(), 100.0);
    }

    #[test]
    fn integer_overflow_falls_back_to_double() {
        let v = try_parse_number("99999999999999999999").unwrap();
        assert_eq!(v.kind(), Kind::Double);
        assert_eq!(v.to_f64().unwrap(), 1e20);
    }

    #[test]
    fn rejects_non_numbers() {
        for text in [
            "", "-", "+5", ".5", "5.", "01", "-01", "1e", "1e+", "0x10", "1 2", "1,", "NaN",
            "Infinity", "-Infinity", "1.2.3", "2a", "--1",
        ] {
            assert!(try_parse_number(text).is_none(), "accepted {text:?}");
        }
    }
}
