#![no_main]

use docshell::{Shell, ShellConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|lines: Vec<String>| {
    let config = ShellConfig::default()
        .with_collections(["coll", "other"])
        .with_max_line_length(4096);
    let Ok(mut shell) = Shell::with_config(config) else {
        return;
    };

    for line in lines.iter().take(32) {
        // Anything that evaluates must decode as a command
        if let Ok(text) = shell.evaluate(line) {
            assert!(docshell::Command::from_json(&text).is_ok());
        }
        let _ = shell.complete(line);
    }
});
