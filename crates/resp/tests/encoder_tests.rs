//! Integration tests for RESP encoder

use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use resp_codec::Encoder;
use resp_codec::Message;
use resp_codec::RespEncoder;
use resp_codec::Value;
use resp_codec::decode;
use resp_codec::marshal;
use rstest::rstest;

#[test]
fn test_encode_redis_set() {
	let cmd = Value::BytesArray(vec![
		Bytes::from("SET"),
		Bytes::from("key"),
		Bytes::from("value"),
	]);

	let encoded = marshal(&cmd).unwrap();
	assert_eq!(
		&encoded[..],
		b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n"
	);
}

#[rstest]
#[case(Value::from(&b"Foo"[..]), b"$3\r\nFoo\r\n")]
#[case(Value::from("Foo"), b"+Foo\r\n")]
#[case(Value::error("Fatal error"), b"-Fatal error\r\n")]
#[case(Value::from(123i64), b":123\r\n")]
#[case(Value::from("♥".as_bytes()), "$3\r\n♥\r\n".as_bytes())]
#[case(Value::TextArray(vec!["Foo".into(), "Bar".into()]), b"*2\r\n+Foo\r\n+Bar\r\n")]
#[case(Value::IntegerArray(vec![1, -2, 30]), b"*3\r\n:1\r\n:-2\r\n:30\r\n")]
#[case(Value::Mixed(vec![]), b"*0\r\n")]
#[case(Value::BytesArray(vec![]), b"*0\r\n")]
#[case(Value::Nil, b"$-1\r\n")]
#[case(Value::NilArray, b"*-1\r\n")]
fn test_encode_shapes(#[case] value: Value, #[case] expected: &[u8]) {
	assert_eq!(&marshal(&value).unwrap()[..], expected);
}

#[test]
fn test_encode_mixed_array() {
	let mixed = Value::Mixed(vec![
		Value::Mixed(vec![1i64.into(), 2i64.into(), 3i64.into()]),
		Value::Mixed(vec![
			Value::from(&b"Foo"[..]),
			Value::error("Bar"),
			Value::from("Baz"),
		]),
	]);

	let encoded = marshal(&mixed).unwrap();
	assert_eq!(
		&encoded[..],
		b"*2\r\n*3\r\n:1\r\n:2\r\n:3\r\n*3\r\n$3\r\nFoo\r\n-Bar\r\n+Baz\r\n"
	);
}

#[rstest]
#[case(Value::from("OK"))]
#[case(Value::error("ERR test error"))]
#[case(Value::from(42i64))]
#[case(Value::from(-100i64))]
#[case(Value::from(&b"hello world"[..]))]
#[case(Value::from(&b""[..]))]
#[case(Value::BytesArray(vec![Bytes::from("a"), Bytes::from("")]))]
#[case(Value::TextArray(vec!["a".into(), "b c".into()]))]
#[case(Value::IntegerArray(vec![i64::MIN, 0, i64::MAX]))]
fn test_roundtrip(#[case] original: Value) {
	let encoded = marshal(&original).unwrap();
	let decoded = decode(&encoded);
	assert!(decoded.is_complete(), "{:?}", decoded.error);
	assert_eq!(decoded.messages.len(), 1);
	assert_eq!(decoded.resume_offset, encoded.len());
	assert_eq!(Value::from(decoded.messages[0].clone()), expected_message(&original));
}

fn expected_message(value: &Value) -> Value {
	let msg = match value {
		Value::Bytes(b) => Message::bulk(b.clone()),
		Value::Text(s) => Message::simple(s.clone()),
		Value::Error(e) => Message::error(e.clone()),
		Value::Integer(i) => Message::integer(*i),
		Value::BytesArray(items) => Message::array(items.iter().cloned().map(Message::bulk)),
		Value::TextArray(items) => Message::array(items.iter().cloned().map(Message::simple)),
		Value::IntegerArray(items) => Message::array(items.iter().copied().map(Message::integer)),
		other => panic!("no single-message form for {:?}", other),
	};
	Value::Message(msg)
}

#[rstest]
#[case(b"$3\r\nFoo\r\n")]
#[case(b"-Fatal error\r\n")]
#[case(b":123\r\n")]
#[case(b"*2\r\n+Foo\r\n+Bar\r\n")]
#[case(b"*2\r\n*3\r\n:1\r\n:2\r\n:3\r\n*3\r\n$3\r\nFoo\r\n-Bar\r\n+Baz\r\n")]
#[case(b"*0\r\n")]
#[case(b"$-1\r\n")]
#[case(b"*-1\r\n")]
#[case(b"*2\r\n$-1\r\n*-1\r\n")]
fn test_decode_encode_message(#[case] wire: &[u8]) {
	let decoded = decode(wire);
	assert_eq!(decoded.messages.len(), 1);
	let msg = decoded.messages.into_iter().next().unwrap();

	assert_eq!(&msg.encode().unwrap()[..], wire);
	assert_eq!(&marshal(&Value::Message(msg)).unwrap()[..], wire);
}

#[test]
fn test_encoder_matches_marshal() {
	let value = Value::Mixed(vec![
		Value::Message(Message::array(vec![
			Message::integer(1),
			Message::array(vec![Message::nil_bulk()]),
		])),
		Value::TextArray(vec!["x".into()]),
		Value::Nil,
	]);

	let encoder = Encoder::new(Vec::new());
	encoder.encode(&value).unwrap();
	assert_eq!(encoder.into_inner().unwrap(), marshal(&value).unwrap());
}

#[test]
fn test_concurrent_scalar_writes_are_not_torn() {
	let encoder = Arc::new(Encoder::new(Vec::new()));
	let payload = Bytes::from(vec![b'x'; 4096]);

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let encoder = Arc::clone(&encoder);
			let value = Value::Bytes(payload.clone());
			thread::spawn(move || {
				for _ in 0..50 {
					encoder.encode(&value).unwrap();
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}

	let sink = Arc::try_unwrap(encoder).ok().unwrap().into_inner().unwrap();
	let decoded = decode(&sink);
	assert!(decoded.is_complete());
	assert_eq!(decoded.messages.len(), 8 * 50);
	assert!(decoded.messages.iter().all(|m| m.as_bytes() == Some(&payload)));
}

#[test]
fn test_concurrent_atomic_composites_stay_contiguous() {
	let encoder = Arc::new(Encoder::new(Vec::new()));

	let handles: Vec<_> = (0..8i64)
		.map(|id| {
			let encoder = Arc::clone(&encoder);
			thread::spawn(move || {
				let value = Value::Mixed(vec![
					Value::Integer(id),
					Value::Mixed(vec![Value::Integer(id), Value::from("tail")]),
				]);
				for _ in 0..50 {
					encoder.encode_atomic(&value).unwrap();
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}

	let sink = Arc::try_unwrap(encoder).ok().unwrap().into_inner().unwrap();
	let decoded = decode(&sink);
	assert!(decoded.is_complete());
	assert_eq!(decoded.messages.len(), 8 * 50);
	for msg in &decoded.messages {
		let outer = msg.as_array().unwrap();
		let id = outer[0].as_integer().unwrap();
		let inner = outer[1].as_array().unwrap();
		assert_eq!(inner[0].as_integer(), Some(id));
		assert_eq!(inner[1].as_str(), Some("tail"));
	}
}
