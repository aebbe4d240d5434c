//! Command-line interface implementation for reposync.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for reposync.
#[derive(Parser, Debug)]
#[command(author, version, about = "reposync: keeps barrel files and embedded samples in sync", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Project root holding reposync.json|yml|yaml
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub project_root: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generate a barrel file in every directory of the source root
    Index {
        /// Only report out-of-date barrels and exit 1 if there are any
        #[arg(long)]
        check: bool,
    },
    /// Embed sample code into the configured documents
    Embed {
        /// Only report out-of-date documents and exit 1 if there are any
        #[arg(long)]
        check: bool,
    },
    /// Verify that every source file uses an allowed extension
    CheckExt,
    /// Run extension validation, index generation, embedding and checks
    Build {
        /// Skip the configured collaborator checks
        #[arg(long)]
        skip_checks: bool,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingSubcommand
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
