#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(money) = khata::core::Money::from_major_str(s) {
            let _ = khata::display::format_inr(money);
            let _ = khata::core::StateCode::new(s);
        }
    }
});
