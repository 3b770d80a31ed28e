#![no_main]

use libfuzzer_sys::fuzz_target;
use record_wire::model::Student;
use record_wire::{Alignment, RecordCodec};

fuzz_target!(|data: &[u8]| {
    // First byte picks the alignment so every layout gets coverage
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Some(alignment) = Alignment::new(1 << (selector % 5)) else {
        return;
    };
    let codec = RecordCodec::new(alignment);

    if let Ok((student, consumed)) = codec.decode::<Student>(rest) {
        assert!(consumed <= rest.len());
        assert_eq!(codec.encoded_size(&student), consumed);
        assert_eq!(codec.decode_exact::<Student>(&codec.encode(&student).unwrap()), Ok(student));
    }
});
