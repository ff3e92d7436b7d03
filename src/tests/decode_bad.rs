use super::decode;
use crate::{DecoderOptions, Error};

fn decode_err(text: &str) -> Error {
    decode(text).expect_err("expected a syntax error")
}

#[test]
fn unterminated_string() {
    let err = decode_err("{ a: \"unterminated");
    assert!(err.to_string().starts_with("Bad string at line 1,"));
    // The position clamps to the last byte of the input.
    assert_eq!(err.position(), Some((1, 17)));
}

#[test]
fn newline_in_quoted_string() {
    let err = decode_err("{a: \"x\ny\"}");
    assert!(err.to_string().contains("Bad string containing newline"));
}

#[test]
fn unknown_escape() {
    let err = decode_err(r#"{a: "x\q"}"#);
    assert!(err.to_string().contains("Bad escape \\q"));
}

#[test]
fn bad_unicode_escape_digit() {
    let err = decode_err(r#"{a: "\uZZ11"}"#);
    assert!(err.to_string().contains("Bad \\u char Z"));
}

#[test]
fn unterminated_multiline_string() {
    let err = decode_err("{a: '''\n  never closed\n");
    assert!(err.to_string().contains("Bad multiline string"));
}

#[test]
fn punctuator_where_key_expected() {
    let err = decode_err("{[: 1}");
    assert!(err
        .to_string()
        .contains("Found '[' where a key name was expected"));
}

#[test]
fn colon_without_key() {
    let err = decode_err("{: 1}");
    assert!(err.to_string().contains("Found ':' but no key name"));
}

#[test]
fn whitespace_inside_key_name() {
    let err = decode_err("{a b: 1}");
    assert!(err
        .to_string()
        .contains("Found whitespace in your key name"));
    // The reported position is rewound to the first whitespace byte.
    assert_eq!(err.position(), Some((1, 2)));
}

#[test]
fn block_comment_after_bare_key_is_part_of_the_key() {
    let err = decode_err("{a /* k */: 1}");
    assert!(err
        .to_string()
        .contains("Found whitespace in your key name"));
}

#[test]
fn colon_expected_after_quoted_key() {
    let err = decode_err("{\"a\" 1}");
    assert!(err.to_string().contains("Expected ':' instead of '1'"));
}

#[test]
fn end_of_input_in_object() {
    let err = decode_err("{a:1");
    assert!(err
        .to_string()
        .contains("End of input while parsing an object"));
}

#[test]
fn end_of_input_in_array() {
    let err = decode_err("[1,2");
    assert!(err
        .to_string()
        .contains("End of input while parsing an array"));
}

#[test]
fn trailing_characters_after_braced_root() {
    let err = decode_err("{a:1} extra");
    assert!(err.to_string().contains("found trailing characters"));
}

#[test]
fn failed_retry_reports_the_original_error() {
    // The braceless parse fails looking for a key, the bare-value retry fails
    // on trailing characters, and the first error is the one reported.
    let err = decode_err("a:1\nextra");
    assert!(err
        .to_string()
        .contains("Found EOF while looking for a key name"));
}

#[test]
fn punctuator_root_reports_the_key_error() {
    let err = decode_err(",");
    assert!(err
        .to_string()
        .contains("Found ',' where a key name was expected"));
}

#[test]
fn duplicate_key_exception() {
    let options = DecoderOptions {
        duplicate_key_exception: true,
        ..Default::default()
    };
    let err = crate::unmarshal("{a:1, a:2}", options).unwrap_err();
    assert!(err.to_string().contains("Found duplicate of key 'a'"));
}

#[test]
fn duplicate_key_exception_spares_distinct_keys() {
    let options = DecoderOptions {
        duplicate_key_exception: true,
        ..Default::default()
    };
    let v = crate::unmarshal("{a:1, b:2}", options).unwrap();
    assert_eq!(v.len(), 2);
}

#[test]
fn error_position_on_a_later_line() {
    let err = decode_err("{\n  a: 1\n  b: \"x\\q\"\n}");
    assert!(err.to_string().contains("Bad escape \\q"));
    assert_eq!(err.position(), Some((3, 9)));
}

#[test]
fn error_message_carries_line_context() {
    let err = decode_err("{\n  a: \"x\\q\"\n}");
    match err {
        Error::Syntax { context, line, .. } => {
            assert_eq!(line, 2);
            assert!(context.contains("a: \"x"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn no_partial_tree_on_failure() {
    assert!(decode("{a: 1, b: [1, 2,}").is_err());
}
