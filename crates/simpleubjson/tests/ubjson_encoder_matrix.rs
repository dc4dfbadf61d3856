use std::io::{self, Write};

use simpleubjson::{encode, encode_to, iterencode, EncodeError, Encoder, Handlers, Noop, Value};

fn enc(value: impl Into<Value>) -> Vec<u8> {
    encode(value.into()).expect("encode")
}

#[test]
fn scalar_wire_matrix() {
    assert_eq!(enc(Value::Null), b"Z");
    assert_eq!(enc(Noop), b"N");
    assert_eq!(enc(false), b"F");
    assert_eq!(enc(true), b"T");
    assert_eq!(enc(None::<i32>), b"Z");
}

#[test]
fn integer_wire_matrix() {
    assert_eq!(enc(5), b"B\x05");
    assert_eq!(enc(42), b"B\x2a");
    assert_eq!(enc(-42), b"B\xd6");
    assert_eq!(enc(30000), b"i\x75\x30");
    assert_eq!(enc(12345), b"i\x30\x39");
    assert_eq!(enc(-24321), b"i\xa0\xff");
    assert_eq!(enc(100500), b"I\x00\x01\x88\x94");
    assert_eq!(enc(-100500), b"I\xff\xfe\x77\x6c");
    assert_eq!(enc(i64::MAX), b"L\x7f\xff\xff\xff\xff\xff\xff\xff");
    assert_eq!(enc(i64::MIN), b"L\x80\x00\x00\x00\x00\x00\x00\x00");
}

#[test]
fn huge_number_wire_matrix() {
    let digits = "314159265358979323846264338327950288419716939937510";
    let mut expected = vec![b'h', 0x33];
    expected.extend_from_slice(digits.as_bytes());
    assert_eq!(enc(Value::huge(digits)), expected);

    let mut expected = vec![b'h', 20];
    expected.extend_from_slice(b"18446744073709551615");
    assert_eq!(enc(u64::MAX), expected);

    let text = i128::MIN.to_string();
    let out = enc(i128::MIN);
    assert_eq!(out[0], b'h');
    assert_eq!(&out[2..], text.as_bytes());
}

#[test]
fn float_wire_matrix() {
    assert_eq!(enc(3.14), b"d\x40\x48\xf5\xc3");
    assert_eq!(enc(100500e234), b"D\x71\x8e\xde\x0b\x49\x13\x5b\x25");
    assert_eq!(enc(-1.18e-38), b"d\x80\x80\x7d\x99");
    assert_eq!(enc(1.18e-38), b"d\x00\x80\x7d\x99");
    assert_eq!(enc(-3.4e38), b"d\xff\x7f\xc9\x9e");
    assert_eq!(enc(3.4e38), b"d\x7f\x7f\xc9\x9e");
    assert_eq!(enc(-2.23e-308), b"D\x80\x10\x09\x11\x77\x58\x7f\x83");
    assert_eq!(enc(2.23e-308), b"D\x00\x10\x09\x11\x77\x58\x7f\x83");
    assert_eq!(enc(-1.79e308), b"D\xff\xef\xdc\xf1\x58\xad\xbb\x99");
    assert_eq!(enc(1.79e308), b"D\x7f\xef\xdc\xf1\x58\xad\xbb\x99");
}

#[test]
fn infinity_encodes_like_null() {
    // Sign and the distinction from null are both lost on the wire.
    assert_eq!(enc(f64::INFINITY), enc(Value::Null));
    assert_eq!(enc(f64::NEG_INFINITY), b"Z");
}

#[test]
fn subnormal_float_is_huge() {
    assert_eq!(enc(5e-324), b"h\x065e-324");
}

#[test]
fn string_wire_matrix() {
    assert_eq!(enc("hi"), b"s\x02hi");
    assert_eq!(enc("foo"), b"s\x03foo");
    assert_eq!(
        enc("привет"),
        b"s\x0c\xd0\xbf\xd1\x80\xd0\xb8\xd0\xb2\xd0\xb5\xd1\x82"
    );
    assert_eq!(enc(""), b"s\x00");

    let long = "x".repeat(300);
    let out = enc(long.as_str());
    assert_eq!(&out[..5], b"S\x00\x00\x01\x2c");
    assert_eq!(out.len(), 305);
}

#[test]
fn array_wire_matrix() {
    assert_eq!(
        enc(vec![Value::from(1), Value::from(2), Value::from(3)]),
        b"a\x03B\x01B\x02B\x03"
    );
    let range: Vec<Value> = (0..4).map(Value::from).collect();
    assert_eq!(enc(range), b"a\x04B\x00B\x01B\x02B\x03");

    let large: Vec<Value> = (0..1024).map(|_| Value::from(1)).collect();
    let mut expected = b"A\x00\x00\x04\x00".to_vec();
    for _ in 0..1024 {
        expected.extend_from_slice(b"B\x01");
    }
    assert_eq!(enc(large), expected);
}

#[test]
fn object_wire_matrix() {
    assert_eq!(enc(Value::object([("a", Value::from(1))])), b"o\x01s\x01aB\x01");
    assert_eq!(
        enc(Value::object([("foo", Value::from("bar")), ("bar", Value::from("baz"))])),
        b"o\x02s\x03foos\x03bars\x03bars\x03baz"
    );

    let many = Value::object((0..255).map(|i| (i.to_string(), Value::Null)));
    let out = enc(many);
    assert_eq!(&out[..5], b"O\x00\x00\x00\xff");
}

#[test]
fn unsized_wire_matrix() {
    assert_eq!(
        enc(Value::unsized_array([Value::from(1), Value::from(2)])),
        b"a\xffB\x01B\x02E"
    );
    assert_eq!(
        enc(Value::unsized_array((0..7).map(Value::from))),
        b"a\xffB\x00B\x01B\x02B\x03B\x04B\x05B\x06E"
    );
    assert_eq!(
        enc(Value::unsized_object([("foo", Value::from(42))])),
        b"o\xffs\x03fooB\x2aE"
    );
}

#[test]
fn nested_containers() {
    let value = Value::object([
        ("bar", Value::unsized_array([Value::from(42)])),
        ("baz", Value::unsized_object([("foo", Value::from(42))])),
    ]);
    assert_eq!(
        enc(value),
        b"o\x02s\x03bara\xffB\x2aEs\x03bazo\xffs\x03fooB\x2aE"
    );
}

#[test]
fn non_string_key_is_rejected() {
    let value = Value::SizedObject(vec![(Value::from(3), Value::from("bar"))]);
    assert!(matches!(
        encode(value),
        Err(EncodeError::InvalidKey { found: "integer" })
    ));

    let value = Value::UnsizedObject(simpleubjson::Producer::new(vec![(Value::Null, Value::Null)]));
    assert!(matches!(encode(value), Err(EncodeError::InvalidKey { found: "null" })));
}

#[test]
fn write_encoded_data_to_stream() {
    let mut sink = Vec::new();
    encode_to(Value::unsized_array((0..5).map(Value::from)), &mut sink).unwrap();
    assert_eq!(sink, b"a\xffB\x00B\x01B\x02B\x03B\x04E");
}

#[test]
fn iterencode_yields_chunks_lazily() {
    let chunks: Vec<Vec<u8>> = iterencode(Value::unsized_array((1..).map(Value::from)))
        .take(3)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(chunks, vec![b"a\xff".to_vec(), b"B\x01".to_vec(), b"B\x02".to_vec()]);
}

struct FailAfter {
    written: Vec<u8>,
    budget: usize,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.budget -= 1;
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_propagate_and_keep_written_chunks() {
    let mut sink = FailAfter {
        written: Vec::new(),
        budget: 2,
    };
    let err = encode_to(
        Value::SizedArray(vec![Value::from(1), Value::from(2), Value::from(3)]),
        &mut sink,
    )
    .unwrap_err();
    match err {
        EncodeError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(sink.written, b"a\x03B\x01");
}

#[test]
fn unsupported_host_type_fails() {
    struct Opaque;
    let err = Encoder::new().encode_native(&Opaque).unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedType { .. }));
    assert!(err.to_string().contains("Opaque"));
}

#[test]
fn custom_handlers_and_default() {
    struct Point(i32, i32);
    struct Opaque;

    let encoder = Encoder::with_handlers(
        Handlers::new()
            .insert(|p: &Point, reg| Ok(Value::SizedArray(vec![reg.adapt(&p.0)?, reg.adapt(&p.1)?])))
            .default_handler(|_, _| Ok(Value::from("?"))),
    );
    assert_eq!(encoder.encode_native(&Point(1, 300)).unwrap(), b"a\x02B\x01i\x01\x2c");
    assert_eq!(encoder.encode_native(&Opaque).unwrap(), b"s\x01?");
    assert_eq!(encoder.encode_native(&Noop).unwrap(), b"N");

    let mut sink = Vec::new();
    encoder.encode_native_to(&serde_json::json!({"k": [true]}), &mut sink).unwrap();
    assert_eq!(sink, b"o\x01s\x01ka\x01T");
}

#[test]
fn handler_failure_reaches_the_caller() {
    struct Percent(u8);

    let encoder = Encoder::with_handlers(Handlers::new().insert(|p: &Percent, _| {
        if p.0 > 100 {
            return Err(EncodeError::Handler(format!("{}% is out of range", p.0)));
        }
        Ok(Value::from(p.0))
    }));
    assert_eq!(encoder.encode_native(&Percent(42)).unwrap(), b"B\x2a");

    let mut sink = Vec::new();
    let err = encoder.encode_native_to(&Percent(150), &mut sink).unwrap_err();
    assert!(matches!(&err, EncodeError::Handler(msg) if msg == "150% is out of range"));
    assert_eq!(err.to_string(), "handler failed: 150% is out of range");
    assert!(sink.is_empty());
}

#[test]
fn encoder_is_reusable_across_threads() {
    let encoder = Encoder::new();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let encoder = encoder.clone();
            std::thread::spawn(move || encoder.encode_native(&(i as u8)).unwrap())
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), vec![b'B', i as u8]);
    }
}
