//! Kiln's main application entry point.
//! Parses the command line, looks the template up in the catalog and runs the
//! provisioning pipeline against the current directory.

use dialoguer::console::style;

use kiln::{
    acquire::HttpArchiveSource,
    catalog::Catalog,
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    install::CommandInstaller,
    logger::init_logger,
    pipeline::Pipeline,
    prompt::DialoguerPrompter,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the catalog and finds the requested template
/// 2. Resolves the template variables
/// 3. Downloads and extracts the template archive
/// 4. Adjusts placeholders and creates extra directories
/// 5. Installs dependencies
fn run(args: Args) -> Result<()> {
    let working_dir = std::env::current_dir()?;

    let catalog = Catalog::load(args.catalog.as_deref(), &working_dir)?;
    let template = catalog.find(&args.template)?;

    let prompt = DialoguerPrompter::new();
    let source = HttpArchiveSource::new()?;
    let installer = CommandInstaller::new(args.package_manager);

    let mut pipeline = Pipeline::new(&prompt, &source, &installer, &working_dir)
        .with_branch(args.branch)
        .with_progress(!args.quiet);
    let provisioned = pipeline.run(template)?;

    let name = provisioned
        .project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!(
        "\n\n{}",
        style(format!("Template '{}' was successfully created.", name)).green().bright()
    );
    Ok(())
}
