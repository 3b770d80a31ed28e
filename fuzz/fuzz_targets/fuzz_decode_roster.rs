#![no_main]

use libfuzzer_sys::fuzz_target;
use record_wire::model::ClassRoster;
use record_wire::RecordCodec;

fuzz_target!(|data: &[u8]| {
    // Fuzz roster decoding - test for panics, overreads, runaway allocation
    let codec = RecordCodec::default();
    if let Ok((roster, consumed)) = codec.decode::<ClassRoster>(data) {
        assert!(consumed <= data.len());

        // Padding is not interpreted, so compare lengths and values, not bytes
        let encoded = codec.encode(&roster).unwrap();
        assert_eq!(encoded.len(), consumed);
        let (again, _) = codec
            .decode::<ClassRoster>(&encoded)
            .expect("re-encoded roster must decode");
        assert_eq!(again, roster);
    }
});
