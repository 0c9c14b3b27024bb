use clap::Parser;
use roster::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                match signal {
                    Ok(()) => Err(anyhow::anyhow!("Interrupted by user")),
                    Err(e) => Err(anyhow::anyhow!("Failed to listen for CTRL+C: {}", e)),
                }
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Roster - Student Records Manager");
    println!("================================");
    println!();
    println!("Keep a student roster on disk: search, filter and sort students,");
    println!("mark attendance, keep notes, import and export CSV, and manage");
    println!("notifications.");
    println!();
    println!("USAGE:");
    println!("    roster [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    list        List students (search, filters, sorting, --format json|csv)");
    println!("    show        Show one student with performance and notes");
    println!("    add         Add a student");
    println!("    update      Update fields of a student");
    println!("    remove      Remove a student");
    println!("    import      Import students from CSV (--mode merge|replace)");
    println!("    export      Export all students to student_data_<date>.csv");
    println!("    attend      Mark a student present or absent on a day");
    println!("    note        Add, edit, delete or list notes");
    println!("    notify      Notification history and preferences");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose       Increase logging verbosity");
    println!("    -q, --quiet         Only show errors");
    println!("    -c, --config FILE   Configuration file (JSON)");
    println!("        --data-dir DIR  Directory for persisted roster data");
    println!("        --no-seed       Start empty instead of with sample students");
    println!("    -h, --help          Show help information");
    println!("    -V, --version       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Computer Science students sorted by name:");
    println!("    roster list --course \"Computer Science\" --sort name_asc");
    println!();
    println!("    # Students with attendance between 50% and 75%:");
    println!("    roster list --min-attendance 50 --max-attendance 75");
    println!();
    println!("    # Replace the roster from a spreadsheet export:");
    println!("    roster import students.csv --mode replace");
    println!();
    println!("    # Turn off grade update notifications:");
    println!("    roster notify prefs --disable grade_update");
    println!();
    println!("For detailed help on any command, use:");
    println!("    roster <COMMAND> --help");
}
