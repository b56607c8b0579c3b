use docshell::{Builtin, Shell, ShellConfig, ShellInput};

const SESSION: &[&str] = &[
    "help find",
    "show collections",
    r#"db.createCollection("orders")"#,
    r#"db.orders.insert({id: "o1", status: "new", total: 12.5})"#,
    r#"db.orders.find({status: "new"}).sort("-total").limit(5)"#,
    r#"db.orders.find({status: "new"}).update({$set: {status: "shipped"}})"#,
    "db.orders.count()",
    "db.customers.count()",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ShellConfig::default().with_collections(["orders"]);
    let mut shell = Shell::with_config(config)?;

    println!("=== docshell Shell Demo ===");
    for line in SESSION {
        println!("\n> {}", line);
        match shell.interpret(line) {
            Ok(Some(ShellInput::Help(topic))) => println!("{}", shell.help(&topic)?),
            Ok(Some(ShellInput::Builtin(Builtin::ShowCollections))) => {
                for name in shell.collection_names() {
                    println!("{}", name);
                }
            }
            Ok(Some(ShellInput::Builtin(Builtin::ShowStats))) => println!("(no server attached)"),
            Ok(Some(ShellInput::Command(cmd))) => println!("{}", cmd.to_json_pretty()?),
            Ok(None) => {}
            Err(e) => println!("error: {}", e),
        }
    }

    println!("\nCompletions for \"db.orders.f\":");
    for candidate in shell.complete("db.orders.f") {
        println!("  {}", candidate);
    }

    Ok(())
}
