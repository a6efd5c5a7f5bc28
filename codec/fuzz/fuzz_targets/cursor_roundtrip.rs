#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use osc_codec::{Cursor, Error, ReadCursor, WriteCursor};

#[derive(Arbitrary, Debug)]
enum Argument {
    Char(u8),
    Int32(i32),
    UInt64(u64),
    Float32(f32),
    String(String),
    Blob(Vec<u8>),
}

impl Argument {
    fn size(&self) -> usize {
        match self {
            Argument::Char(_) => 1,
            Argument::Int32(_) | Argument::Float32(_) => 4,
            Argument::UInt64(_) => 8,
            Argument::String(s) => Cursor::align(s.len() + 1),
            Argument::Blob(b) => Cursor::align(b.len()),
        }
    }

    fn put(&self, writer: &mut WriteCursor<'_>) -> Result<(), Error> {
        match self {
            Argument::Char(c) => writer.put_char(*c),
            Argument::Int32(x) => writer.put_int32(*x),
            Argument::UInt64(x) => writer.put_uint64(*x),
            Argument::Float32(f) => writer.put_float32(*f),
            Argument::String(s) => writer.put_string(s),
            Argument::Blob(b) => writer.put_data(b),
        }
    }

    fn check(&self, reader: &mut ReadCursor<'_>) {
        match self {
            Argument::Char(c) => assert_eq!(reader.get_char().unwrap(), *c),
            Argument::Int32(x) => assert_eq!(reader.get_int32().unwrap(), *x),
            Argument::UInt64(x) => assert_eq!(reader.get_uint64().unwrap(), *x),
            Argument::Float32(f) => {
                assert_eq!(reader.get_float32().unwrap().to_bits(), f.to_bits())
            }
            Argument::String(s) => assert_eq!(reader.get_str().unwrap(), s),
            Argument::Blob(b) => assert_eq!(reader.get_data(b.len()).unwrap(), &b[..]),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    capacity: u16,
    arguments: Vec<Argument>,
}

fn fuzz(input: FuzzInput) {
    let mut buf = vec![0u8; input.capacity as usize];
    let mut writer = WriteCursor::new(&mut buf);
    let mut written = Vec::new();
    for argument in &input.arguments {
        let before = writer.consumed();
        match argument.put(&mut writer) {
            Ok(()) => {
                assert_eq!(writer.consumed() - before, argument.size());
                written.push(argument);
            }
            Err(Error::Overflow(deficit)) => {
                assert_eq!(writer.consumed(), before);
                assert_eq!(deficit, argument.size() - writer.consumable());
                break;
            }
            Err(Error::Parse(_)) => {
                // Only strings with an interior NUL are rejected
                assert!(matches!(argument, Argument::String(s) if s.contains('\0')));
                assert_eq!(writer.consumed(), before);
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    let size = writer.consumed();

    let mut reader = ReadCursor::new(&buf[..size]);
    for argument in written {
        argument.check(&mut reader);
    }
    assert!(reader.at_end());
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
