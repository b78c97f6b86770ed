use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

use schedmon::commands;

fn db_arg() -> Arg {
    Arg::new("db")
        .long("db")
        .value_name("PATH")
        .help("SQLite database file (defaults to the configured path)")
        .value_parser(value_parser!(PathBuf))
}

fn quantum_arg() -> Arg {
    Arg::new("quantum")
        .short('q')
        .long("quantum")
        .value_name("SECONDS")
        .help("Round Robin time quantum")
        .value_parser(value_parser!(f64))
}

fn build_cli() -> Command {
    Command::new("schedmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Projects FCFS, SJF, Round-Robin and Priority scheduling metrics from live process state")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .subcommand(
            Command::new("monitor")
                .about("Sample the system on a fixed cadence and store per-algorithm metrics")
                .arg(
                    Arg::new("iterations")
                        .short('n')
                        .long("iterations")
                        .value_name("TICKS")
                        .help("Number of ticks to run")
                        .value_parser(value_parser!(u64).range(1..))
                        .conflicts_with("unbounded"),
                )
                .arg(
                    Arg::new("unbounded")
                        .long("unbounded")
                        .help("Run until interrupted")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("interval-ms")
                        .short('i')
                        .long("interval-ms")
                        .value_name("MS")
                        .help("Delay between ticks in milliseconds")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("delay-after-batch")
                        .long("delay-after-batch")
                        .help("Apply the delay once after the whole run instead of between ticks")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("fresh")
                        .long("fresh")
                        .help("Drop previously stored metrics before starting")
                        .action(ArgAction::SetTrue),
                )
                .arg(quantum_arg())
                .arg(db_arg()),
        )
        .subcommand(
            Command::new("simulate")
                .about("Take one snapshot and print the simulated results without storing them")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(quantum_arg()),
        )
        .subcommand(
            Command::new("report")
                .about("Summarize stored performance records per algorithm")
                .arg(
                    Arg::new("algorithm")
                        .short('a')
                        .long("algorithm")
                        .value_name("NAME")
                        .help("Only include one algorithm (FCFS, SJF, RR, Priority)"),
                )
                .arg(
                    Arg::new("since")
                        .short('s')
                        .long("since")
                        .value_name("MINUTES")
                        .help("Only include records from the last MINUTES minutes")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("events")
                        .short('e')
                        .long("events")
                        .value_name("COUNT")
                        .help("Also show the most recent system events")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(db_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'schedmon config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show the current configuration"))
                .subcommand(Command::new("path").about("Show the configuration file path"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(
                            Arg::new("key")
                                .help("Configuration key, e.g. quantum or tick-delay-ms")
                                .required(true)
                                .index(1),
                        )
                        .arg(
                            Arg::new("value")
                                .help("New value ('none' clears optional keys)")
                                .required(true)
                                .index(2),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore the default configuration")),
        )
}

fn main() -> Result<()> {
    schedmon::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("version", _)) => commands::version()?,
        Some(("monitor", sub_matches)) => commands::monitor(sub_matches)?,
        Some(("simulate", sub_matches)) => commands::simulate(sub_matches)?,
        Some(("report", sub_matches)) => commands::report(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::execute(sub_matches)?,
        _ => {
            println!("Welcome to schedmon!");
            println!("Use 'schedmon --help' for more information.");
        }
    }

    Ok(())
}
