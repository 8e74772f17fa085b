use log::error;
use log::info;
use resp_codec::DecodeOptions;
use resp_codec::StreamDecoder;

fn main() -> Result<(), telemetry::TelemetryError> {
	telemetry::init("trace")?;

	info!("--- RESP Streaming Decode Example ---");

	// Simulate a TCP stream with fragmented data
	// We are sending:
	// - A Simple String: "+OK\r\n"
	// - An Integer: ":1000\r\n"
	// - An Array: "*2\r\n$3\r\nSET\r\n$3\r\nkey\r\n"
	// - A corrupted frame, then a fresh Null Bulk String
	let data_chunks = vec![
		b"+O".as_slice(),
		b"K\r\n:1".as_slice(),
		b"00".as_slice(),
		b"0\r\n*2\r\n$3\r\nSE".as_slice(),
		b"T\r\n$3\r\nk".as_slice(),
		b"ey\r\n".as_slice(),
		b"$3\r\nabcXY".as_slice(),
		b"$-1\r\n".as_slice(),
	];

	let mut stream = StreamDecoder::with_options(DecodeOptions::default().with_max_bulk_len(1024));

	for (i, chunk) in data_chunks.iter().enumerate() {
		info!("[Stream] Received chunk {}: {:?}", i, String::from_utf8_lossy(chunk));
		stream.extend_from_slice(chunk);

		let decoded = stream.decode();
		for message in &decoded.messages {
			info!("[Decoder] Complete: {:?}", message);
		}
		match decoded.error {
			None => {}
			Some(e) if e.is_retryable() => {
				info!("[Decoder] {} buffered bytes, waiting for more data...", stream.buffered());
			}
			Some(e) => error!("[Decoder] Dropped malformed input: {}", e),
		}
	}

	Ok(())
}
