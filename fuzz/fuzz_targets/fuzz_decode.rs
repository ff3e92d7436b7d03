#![no_main]
use hjson_tree::{unmarshal_bytes, DecoderOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&flags, doc)) = data.split_first() else {
        return;
    };
    let options = DecoderOptions {
        comments: flags & 1 != 0,
        whitespace_as_comments: flags & 2 != 0,
        duplicate_key_exception: flags & 4 != 0,
        ..Default::default()
    };
    let _ = unmarshal_bytes(doc, options);
});
