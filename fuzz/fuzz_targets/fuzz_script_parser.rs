#![no_main]

use docshell_core::script::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        // Limit line length to prevent timeout
        if line.len() > 10_000 {
            return;
        }

        // Lexing and parsing must never panic, whatever the nesting
        if let Ok(mut parser) = Parser::new(line) {
            let _ = parser.parse();
        }
    }
});
