#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfops::config::CropRect;
use pdfops::validation::Validator;
use std::path::Path;

fuzz_target!(|input: (i64, i64, u16, [f32; 4])| {
    let (start, end, total, coords) = input;
    let total = usize::from(total);
    let validator = Validator::new();
    let path = Path::new("fuzz.pdf");

    // Any accepted span must be non-empty and inside the document.
    if let Ok(span) = validator.page_span(path, start, end, total) {
        assert!(span.start <= span.end);
        assert!(span.end < total);
        assert_eq!(span.len() as i64, end - start + 1);
    }

    if let Ok(index) = validator.page_index(path, start, total) {
        assert!(index < total);
        assert_eq!(index as i64, start - 1);
    }

    let media_box = CropRect::new(0.0, 0.0, 612.0, 792.0);
    let rect = CropRect::new(coords[0], coords[1], coords[2], coords[3]);
    if let Ok(rect) = validator.crop_box(&rect, &media_box) {
        assert!(rect.is_finite());
        assert!(rect.width() > 0.0 && rect.height() > 0.0);
        assert!(rect.within(&media_box));
    }
});
