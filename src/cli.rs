//! Command-line interface implementation for kiln.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::constants::DEFAULT_PACKAGE_MANAGER;

/// Command-line arguments structure for kiln.
#[derive(Parser, Debug)]
#[command(author, version, about = "kiln: scaffold new projects from packaged templates", long_about = None)]
pub struct Args {
    /// Name of the template to provision, as listed in the catalog
    #[arg(short, long, value_name = "NAME")]
    pub template: String,

    /// Templates catalog file (defaults to templates.json, templates.yml or
    /// templates.yaml in the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Download this branch instead of the repository default branch
    #[arg(short, long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Package manager used to install dependencies
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_PACKAGE_MANAGER)]
    pub package_manager: String,

    /// Hide download and extraction progress bars
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
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
            if e.kind() == ErrorKind::MissingRequiredArgument {
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
