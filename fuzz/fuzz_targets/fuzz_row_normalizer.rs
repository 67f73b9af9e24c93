#![no_main]
use libfuzzer_sys::fuzz_target;

use lodge_metrics::adapters::sheet::{RawRow, RowNormalizer};

fuzz_target!(|data: &[u8]| {
    if let Ok(row) = serde_json::from_slice::<RawRow>(data) {
        let normalizer = RowNormalizer::default();
        if let Some(booking) = normalizer.normalize(&row) {
            assert!(booking.end > booking.start);
        }
    }
});
