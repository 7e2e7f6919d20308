#![no_main]
use bmof_stream::ContainerHeaderParser;
use libfuzzer_sys::fuzz_target;

// Fuzz the whole pipeline: header parse then payload decode.
fuzz_target!(|data: &[u8]| {
    let header = match ContainerHeaderParser::parse(data) {
        Ok(h) => h,
        Err(_) => return,
    };

    // Cap unpacked size to prevent OOM and timeouts
    if header.decompressed_size > 1024 * 1024 {
        return;
    }

    let _ = bmof_stream::decompress(data);
});
