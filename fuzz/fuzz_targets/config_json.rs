#![no_main]

use libfuzzer_sys::fuzz_target;
use rhizome_resin_retarget::RetargetConfig;

fuzz_target!(|data: &str| {
    // from_json should never panic on any input
    let _ = RetargetConfig::from_json(data);
});
