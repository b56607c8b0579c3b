use docshell::logging::LogConfig;
use docshell::Shell;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Trace level shows every chained call as well as finalized commands
    let _guard = LogConfig::trace().init()?;

    println!("=== docshell Logging Demo ===\n");

    let mut shell = Shell::new();
    shell.register_collection("events")?;

    println!("1. Evaluating a chain...");
    let text = shell.evaluate(r#"db.events.find({kind: "click"}).sort("-ts").limit(100)"#)?;
    println!("{}", text);

    println!("\n2. Unregistering an unknown collection (warning)...");
    shell.unregister_collection("sessions");

    println!("\n=== Demo Complete ===");
    println!("Check the logs above to see tracing output!");

    Ok(())
}
