//! # landreg CLI entry point
//!
//! Parses arguments, installs the tracing subscriber, and dispatches to the
//! subcommand handlers in `landreg_cli`. Logs go to stderr so JSON written
//! to stdout stays machine-readable.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use landreg_cli::tiers::{
    run_parcel_id, run_project, run_separate, run_verify, ParcelIdArgs, ProjectArgs, SeparateArgs, VerifyArgs,
};
use landreg_cli::workflow::{run_register, run_transfer, RegisterArgs, TransferArgs};

/// Privacy-tiered land registry toolchain.
///
/// Splits registrations into private, public-metadata, and ledger tiers,
/// projects them per caller role, checks the hash links between them, and
/// drives registration and transfer workflows against the collaborators.
#[derive(Parser, Debug)]
#[command(name = "landreg", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a parcel identifier.
    ParcelId(ParcelIdArgs),
    /// Separate a registration input into its three tiers.
    Separate(SeparateArgs),
    /// Show the part of a record a role may see.
    Project(ProjectArgs),
    /// Check the hash links between tiers. Exits 1 on failure.
    Verify(VerifyArgs),
    /// Run the registration workflow.
    Register(RegisterArgs),
    /// Run the ownership transfer workflow.
    Transfer(TransferArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result = match &cli.command {
        Commands::ParcelId(args) => run_parcel_id(args),
        Commands::Separate(args) => run_separate(args),
        Commands::Project(args) => run_project(args),
        Commands::Verify(args) => run_verify(args),
        Commands::Register(args) => run_register(args).await,
        Commands::Transfer(args) => run_transfer(args).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parcel_id() {
        let cli = Cli::try_parse_from(["landreg", "parcel-id", "--plot", "1001", "--district", "Colombo"]).unwrap();
        match cli.command {
            Commands::ParcelId(args) => {
                assert_eq!(args.plot, "1001");
                assert_eq!(args.district, "Colombo");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_register_with_documents() {
        let cli = Cli::try_parse_from([
            "landreg",
            "register",
            "input.json",
            "--role",
            "officer",
            "--doc",
            "deed=deed.pdf",
            "--doc",
            "surveyPlan=plan.png",
            "--offline",
        ])
        .unwrap();
        match cli.command {
            Commands::Register(args) => {
                assert_eq!(args.common.role, "officer");
                assert_eq!(args.common.docs.len(), 2);
                assert_eq!(args.common.docs[1].doc_type, "surveyPlan");
                assert!(args.common.offline);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_role_parses_as_unrecognized() {
        let cli = Cli::try_parse_from(["landreg", "project", "tiers.json", "--role", "hacker"]).unwrap();
        match cli.command {
            Commands::Project(args) => assert_eq!(args.role, landreg_core::Role::Unrecognized),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn transfer_requires_new_owner() {
        assert!(Cli::try_parse_from(["landreg", "transfer", "1|X|GovRef-AAAAAA", "--role", "admin"]).is_err());
    }

    #[test]
    fn transfer_tiers_needs_offline() {
        let base = ["landreg", "transfer", "1|X|GovRef-AAAAAA", "--new-owner", "0xdef", "--role", "admin"];
        let cli = Cli::try_parse_from(base.iter().copied().chain(["--offline", "--tiers", "tiers.json"])).unwrap();
        match cli.command {
            Commands::Transfer(args) => {
                assert_eq!(args.tiers.as_deref(), Some(std::path::Path::new("tiers.json")));
                assert!(args.common.offline);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(base.iter().copied().chain(["--tiers", "tiers.json"])).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["landreg", "verify", "tiers.json", "-vv", "--log-json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.log_json);
    }
}
