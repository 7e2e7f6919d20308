#![no_main]
use bmof_stream::MofDecoder;
use libfuzzer_sys::fuzz_target;

// Fuzz the raw payload decoder with an arbitrary token stream.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Derive a small output size from the input so the sentinel path is
    // reachable; cap to prevent OOM and timeouts.
    let unpacked_size = (data[0] as usize) * 256;

    let decoder = MofDecoder::new();
    let _ = decoder.decompress(&data[1..], unpacked_size);
});
