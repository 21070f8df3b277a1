#![no_main]

use libfuzzer_sys::fuzz_target;
use openliveview::core::codec::LiveViewCodec;
use openliveview::core::wire::ByteOrder;
use openliveview::protocol::registry::decode_frame_with;

fuzz_target!(|data: &[u8]| {
    // Frame decoding must never panic, in either byte order
    for order in [ByteOrder::Big, ByteOrder::Little] {
        if let Ok((msg, used)) = decode_frame_with(data, order) {
            assert!(used <= data.len());
            assert_eq!(msg.encoded_len(), used);
        }

        // Drain a whole read the way a session does
        let decoded = LiveViewCodec::new(order).decode_chunk(data);
        assert!(decoded.discarded <= data.len());
    }
});
