use super::{decode, decode_with_comments};
use crate::{DecoderOptions, Error, Kind, Value};

#[test]
fn empty_object() {
    let v = decode("{}").unwrap();
    assert!(v.is_map());
    assert!(v.is_empty());
}

#[test]
fn empty_input_is_an_empty_map() {
    assert!(decode("").unwrap().is_map());
    assert!(decode("  \n\t ").unwrap().is_map());
}

#[test]
fn single_property() {
    let v = decode("{a:1}").unwrap();
    assert_eq!(v.len(), 1);
    assert_eq!(v["a"], Value::from(1i64));
}

#[test]
fn strict_json() {
    let v = decode(r#"{"a": 1, "b": [true, false, null], "c": "text"}"#).unwrap();
    assert_eq!(v["a"].to_i64().unwrap(), 1);
    assert_eq!(v["b"][0], Value::from(true));
    assert_eq!(v["b"][1], Value::from(false));
    assert!(v["b"][2].is_null());
    assert_eq!(v["c"].as_str(), Some("text"));
}

#[test]
fn quoteless_string_runs_to_end_of_line() {
    let v = decode("{a: hello world\n}").unwrap();
    assert_eq!(v["a"].as_str(), Some("hello world"));
}

#[test]
fn quoteless_string_keeps_interior_separators() {
    // `,` `}` `]` only end a quoteless value when the prefix is a number or
    // literal; for plain strings they are content.
    let v = decode("{url: www.example.com,etc\n}").unwrap();
    assert_eq!(v["url"].as_str(), Some("www.example.com,etc"));
}

#[test]
fn quoteless_number_stops_at_comma() {
    let v = decode("[1 , 2]").unwrap();
    assert_eq!(v.at(0).unwrap().to_i64().unwrap(), 1);
    assert_eq!(v.at(1).unwrap().to_i64().unwrap(), 2);
}

#[test]
fn quoteless_word_with_literal_prefix_is_a_string() {
    let v = decode("{a: truename\nb: nullish\n}").unwrap();
    assert_eq!(v["a"].as_str(), Some("truename"));
    assert_eq!(v["b"].as_str(), Some("nullish"));
}

#[test]
fn quoteless_number_with_suffix_is_a_string() {
    let v = decode("{a: 3 q\nb: 192.168.0.1\n}").unwrap();
    assert_eq!(v["a"].as_str(), Some("3 q"));
    assert_eq!(v["b"].as_str(), Some("192.168.0.1"));
}

#[test]
fn scalar_roots() {
    assert_eq!(decode("42").unwrap(), Value::from(42i64));
    assert_eq!(decode("-3.5").unwrap(), Value::from(-3.5));
    assert_eq!(decode("true").unwrap(), Value::from(true));
    assert_eq!(decode("false").unwrap(), Value::from(false));
    assert_eq!(decode("null").unwrap(), Value::null());
    assert_eq!(decode("\"hi\"").unwrap(), Value::from("hi"));
}

#[test]
fn number_kinds() {
    assert_eq!(decode("7").unwrap().kind(), Kind::Int64);
    assert_eq!(decode("7.0").unwrap().kind(), Kind::Double);
    assert_eq!(decode("1e3").unwrap().kind(), Kind::Double);
    assert_eq!(decode("99999999999999999999").unwrap().kind(), Kind::Double);
}

#[test]
fn trailing_comma_in_array() {
    let v = decode("[1,2,3,]").unwrap();
    assert_eq!(v.len(), 3);
    for (i, expected) in [1i64, 2, 3].into_iter().enumerate() {
        assert_eq!(v.at(i).unwrap().to_i64().unwrap(), expected);
    }
}

#[test]
fn array_without_commas() {
    let v = decode("[\n1\n2\n3\n]").unwrap();
    assert_eq!(v.len(), 3);
    assert_eq!(v.at(2).unwrap().to_i64().unwrap(), 3);
}

#[test]
fn object_without_commas() {
    let v = decode("{a:1\nb:2}").unwrap();
    assert_eq!(v["a"].to_i64().unwrap(), 1);
    assert_eq!(v["b"].to_i64().unwrap(), 2);
}

#[test]
fn braceless_root_object() {
    let v = decode("a: 1\nb: two\n").unwrap();
    assert!(v.is_map());
    assert_eq!(v["a"].to_i64().unwrap(), 1);
    assert_eq!(v["b"].as_str(), Some("two"));
}

#[test]
fn nested_containers() {
    let v = decode("{a:{b:[{}, [1]]}}").unwrap();
    assert!(v["a"]["b"].at(0).unwrap().is_map());
    assert_eq!(v["a"]["b"].at(1).unwrap().at(0).unwrap().to_i64().unwrap(), 1);
}

#[test]
fn single_quoted_string() {
    let v = decode("{a: 'text'}").unwrap();
    assert_eq!(v["a"].as_str(), Some("text"));
}

#[test]
fn string_escapes() {
    let v = decode(r#"{"a": "x\u0041\n\t\\\"\/"}"#).unwrap();
    assert_eq!(v["a"].as_str(), Some("xA\n\t\\\"/"));
}

#[test]
fn unicode_escape_is_not_surrogate_combined() {
    // Each \u stands alone; an unpaired half degrades to U+FFFD.
    let v = decode(r#"{"a": "\ud83d\ude00"}"#).unwrap();
    assert_eq!(v["a"].as_str(), Some("\u{fffd}\u{fffd}"));
}

#[test]
fn multiline_string_strips_indent() {
    let v = decode("{a: '''\n  line one\n  line two\n  '''}").unwrap();
    assert_eq!(v["a"].as_str(), Some("line one\nline two"));
}

#[test]
fn multiline_string_from_indented_opener() {
    // The opener sits at column 2; each body line loses at most that much
    // leading whitespace, and the newline before the closer is dropped.
    let v = decode("b:\n  '''\n  hello\n  world\n  '''").unwrap();
    assert_eq!(v["b"].as_str(), Some("hello\nworld"));
}

#[test]
fn multiline_string_shorter_lines_lose_all_leading_whitespace() {
    let v = decode("{a:\n    '''\n  x\n    y\n    '''}").unwrap();
    assert_eq!(v["a"].as_str(), Some("x\ny"));
}

#[test]
fn multiline_string_keeps_embedded_quotes() {
    let v = decode("{a: '''x'y''z'''}").unwrap();
    assert_eq!(v["a"].as_str(), Some("x'y''z"));
}

#[test]
fn multiline_string_drops_carriage_returns() {
    let v = decode("{a: '''\r\n  one\r\n  two\r\n  '''}").unwrap();
    assert_eq!(v["a"].as_str(), Some("one\ntwo"));
}

#[test]
fn quoted_empty_key() {
    let v = decode("{\"\": 1}").unwrap();
    assert_eq!(v[""].to_i64().unwrap(), 1);
}

#[test]
fn later_duplicate_key_wins_by_default() {
    let v = decode("{a:1, b:2, a:3}").unwrap();
    assert_eq!(v.len(), 2);
    assert_eq!(v["a"].to_i64().unwrap(), 3);
    let keys: Vec<&str> = v.as_map().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
}

#[test]
fn deeply_nested_array_does_not_recurse() {
    let depth = 10_000;
    let doc = "[".repeat(depth) + &"]".repeat(depth);
    let v = decode(&doc).unwrap();

    let mut cur = &v;
    let mut seen = 0;
    while let Some(vec) = cur.as_vector() {
        seen += 1;
        match vec.first() {
            Some(inner) => cur = inner,
            None => break,
        }
    }
    assert_eq!(seen, depth);
}

#[test]
fn non_utf8_bytes_are_replaced_lossily() {
    let v = crate::unmarshal_bytes(b"{a: \xff\n}", DecoderOptions::default()).unwrap();
    assert_eq!(v["a"].as_str(), Some("\u{fffd}"));
}

#[test]
fn from_str_parses_with_default_options() {
    let v: Value = "[1, 2, 3]".parse().unwrap();
    assert_eq!(v.len(), 3);
}

#[test]
fn reader_input() {
    let v = crate::unmarshal_from_reader("{a: 1}".as_bytes(), DecoderOptions::default()).unwrap();
    assert_eq!(v["a"].to_i64().unwrap(), 1);
}

#[test]
fn file_input_strips_trailing_newline() {
    let path = std::env::temp_dir().join(format!("hjson-tree-test-{}.hjson", std::process::id()));
    std::fs::write(&path, "a: 1\nb: two\n").unwrap();
    let v = crate::unmarshal_from_file(&path, DecoderOptions::default()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(v["a"].to_i64().unwrap(), 1);
    assert_eq!(v["b"].as_str(), Some("two"));
}

#[test]
fn missing_file_is_a_file_error() {
    let err = crate::unmarshal_from_file(
        "/definitely/not/a/real/path.hjson",
        DecoderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::File { .. }));
}

#[test]
fn duplicate_key_handler_rewrites_root_keys() {
    let options = DecoderOptions {
        duplicate_key_handler: Some(Box::new(|key: &mut String, map: &Value| {
            while map.get(key.as_str()).is_some_and(Value::defined) {
                key.push('_');
            }
        })),
        ..Default::default()
    };
    let v = crate::unmarshal("{a:1, a:2, a:3}", options).unwrap();
    let keys: Vec<&str> = v.as_map().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "a_", "a__"]);
    assert_eq!(v["a__"].to_i64().unwrap(), 3);
}

#[test]
fn duplicate_key_handler_sees_only_the_root_level() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&seen);
    let options = DecoderOptions {
        duplicate_key_handler: Some(Box::new(move |key: &mut String, _map: &Value| {
            recorder.borrow_mut().push(key.clone());
        })),
        ..Default::default()
    };
    let v = crate::unmarshal("{outer: {inner: 1}}", options).unwrap();
    assert_eq!(v["outer"]["inner"].to_i64().unwrap(), 1);
    assert_eq!(*seen.borrow(), ["outer"]);
}

#[test]
fn comment_slots_stay_empty_without_the_option() {
    let v = decode("# lead\n{\n  a: 1 // tail\n}").unwrap();
    assert_eq!(v.comment_before(), "");
    assert_eq!(v["a"].comment_after(), "");
}

#[test]
fn comments_are_skipped_even_when_not_collected() {
    let v = decode("{/* x */ a: /* y */ 1 // z\n}").unwrap();
    assert_eq!(v["a"].to_i64().unwrap(), 1);
    assert_eq!(v["a"].comment_before(), "");
    assert_eq!(v["a"].comment_after(), "");
}

#[test]
fn comment_between_quoted_key_and_colon() {
    let v = decode_with_comments("{\"a\" /* k */: 1}").unwrap();
    assert_eq!(v["a"].to_i64().unwrap(), 1);
    assert_eq!(v["a"].comment_key(), " /* k */");
}
