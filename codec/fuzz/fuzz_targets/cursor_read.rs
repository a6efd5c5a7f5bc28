#![no_main]

use libfuzzer_sys::fuzz_target;
use osc_codec::{Error, ReadCursor};

fuzz_target!(|data: &[u8]| {
    // Interpret the input as a type tag string followed by arguments
    let mut reader = ReadCursor::new(data);
    let Ok(tags) = reader.get_string() else {
        return;
    };
    for tag in tags.to_bytes() {
        let before = reader.consumed();
        let result = match *tag {
            b'i' => reader.get_int32().map(|_| ()),
            b'h' => reader.get_uint64().map(|_| ()),
            b'f' => reader.get_float32().map(|_| ()),
            b's' => reader.get_string().map(|_| ()),
            b'b' => match reader.get_int32() {
                Ok(len) if len >= 0 => reader.get_data(len as usize).map(|_| ()),
                Ok(_) => Err(Error::Parse("negative blob size")),
                Err(err) => Err(err),
            },
            _ => reader.get_char().map(|_| ()),
        };
        match result {
            Ok(()) => assert!(reader.consumed() > before),
            Err(_) => break,
        }
        assert!(reader.consumed() <= data.len());
    }
});
