#![no_main]
use bmof_stream::ContainerHeaderParser;
use libfuzzer_sys::fuzz_target;

// Fuzz container header parsing: must never panic, only return errors.
fuzz_target!(|data: &[u8]| {
    let _ = ContainerHeaderParser::parse(data);
});
