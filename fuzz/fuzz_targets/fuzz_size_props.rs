#![no_main]

use libfuzzer_sys::fuzz_target;
use sheet_core::{ContentMetrics, SheetConfig, SizeSpec};
use sheet_layout::{MAX_DETENTS, SizeResolver};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Token parsing never panics, and accepted tokens print back to
    // something that parses to the same spec.
    if let Ok(spec) = text.parse::<SizeSpec>() {
        assert!(spec.validate().is_ok());
        let printed = spec.to_string();
        assert_eq!(printed.parse::<SizeSpec>().ok(), Some(spec));
    }

    // Prop objects either parse into valid configs or fail cleanly.
    if let Ok(config) = SheetConfig::from_json(text) {
        let metrics = ContentMetrics {
            max_height: config.max_height,
            ..ContentMetrics::new()
        };
        if let Ok(table) = SizeResolver::new().resolve(&config.sizes, &metrics, 800.0) {
            assert!(table.len() <= MAX_DETENTS);
            for (index, detent) in table.iter().enumerate() {
                assert_eq!(detent.index(), index);
                assert!(detent.height() <= 800.0);
            }
        }
    }
});
