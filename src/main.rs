use clap::Parser;
use contact_store::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // Without a subcommand, show usage and exit cleanly
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    // serve installs its own Ctrl-C handler for graceful shutdown
    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Contact Store - CSV-backed contact directory with a JSON API");
    println!("============================================================");
    println!();
    println!("Serve a four-column contact file (key, name, email, phone) over HTTP,");
    println!("keeping every rejected row with its diagnostics for later correction.");
    println!();
    println!("USAGE:");
    println!("    contact-store <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Load the contact file and start the HTTP API");
    println!("    validate    Load a file and print its validation report");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Serve contacts.csv on port 8080:");
    println!("    contact-store serve");
    println!();
    println!("    # Serve another file on a custom port with verbose logging:");
    println!("    contact-store serve --file /data/people.csv --port 3001 -v");
    println!();
    println!("    # Check a file before importing it:");
    println!("    contact-store validate people.csv --format json");
    println!();
    println!("ENVIRONMENT:");
    println!("    PORT, HOST, CONTACTS_FILE, API_URL, INDEX_THRESHOLD, CACHE_CAPACITY,");
    println!("    CORS_ORIGINS, MEMORY_REPORT_SECS, RUST_LOG");
    println!();
    println!("For detailed help on any command, use:");
    println!("    contact-store <COMMAND> --help");
}
