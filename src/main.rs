//! deepreview: AI-powered single-file code review CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use deepreview::analysis::HttpTransport;
use deepreview::config::Config;
use deepreview::constants;
use deepreview::credentials::{self, CredentialStore, FileStore};
use deepreview::env::Env;
use deepreview::intake::{self, DiskFile};
use deepreview::logging;
use deepreview::output::export;
use deepreview::session::{AnalyzeOutcome, ReviewSession};

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cli::args::{Cli, Command, KeyAction, ReviewArgs};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let env = Env::real();
    let config =
        Config::load(cli.config.as_deref(), &env).context("failed to load configuration")?;
    logging::init(&env, cli.verbose, config.logging.level.as_deref());
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Review(args) => run_review(*args, &config).await,
        Command::Key { action } => run_key(action, &config),
        Command::Languages => run_languages(),
        Command::Version => run_version(),
    }
}

/// Print version information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    Ok(())
}

/// List the supported extension table.
fn run_languages() -> Result<()> {
    use colored::Colorize;

    for (ext, label) in intake::SUPPORTED_LANGUAGES {
        println!("  {} {}", format!("{ext:<8}").bold(), label.dimmed());
    }
    Ok(())
}

/// Open the credential file store configured for this run.
fn open_store(config: &Config) -> Result<FileStore> {
    match config.storage.path {
        Some(ref path) => Ok(FileStore::new(path.clone())),
        None => FileStore::default_location().context("could not determine config directory"),
    }
}

/// Manage the stored API key.
fn run_key(action: KeyAction, config: &Config) -> Result<()> {
    use colored::Colorize;

    let backend = open_store(config)?;
    let path = backend.path().to_path_buf();
    let mut store = CredentialStore::new(backend);

    match action {
        KeyAction::Set { key } => {
            store.set(key).context("failed to store API key")?;
            println!("  {} API key saved.", "✔".green().bold());
        }
        KeyAction::Clear => {
            store.clear().context("failed to remove API key")?;
            println!("  {} API key removed.", "✔".green().bold());
        }
        KeyAction::Status => {
            store.load().context("failed to read stored API key")?;
            match store.current() {
                Some(key) => println!("  {}  {}", "API key:".cyan(), credentials::mask(key)),
                None => {
                    println!("  No API key stored.");
                    println!("  Use `deepreview key set <KEY>` to add one.");
                }
            }
        }
        KeyAction::Path => println!("{}", path.display()),
    }

    Ok(())
}

async fn run_review(args: ReviewArgs, config: &Config) -> Result<()> {
    let store = CredentialStore::new(open_store(config)?);
    let transport = Arc::new(HttpTransport::new(constants::DEEPSEEK_ENDPOINT));
    let session = ReviewSession::start(store, transport, config.api.model.clone());

    if let Some(ref key) = args.api_key {
        session
            .set_credential(key.clone())
            .context("failed to store API key")?;
    }

    let Some(path) = args.target() else {
        bail!("no file given");
    };
    let handle = DiskFile::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;
    session.ingest(&handle).await?;

    let view = session.snapshot();
    if let Some(ref file) = view.file {
        cli::print_status(file);
    }

    let result = match session.analyze().await {
        AnalyzeOutcome::Completed(result) => result,
        AnalyzeOutcome::Failed(e) => bail!("{e}"),
        AnalyzeOutcome::AlreadyRunning | AnalyzeOutcome::Superseded => {
            bail!("analysis did not complete")
        }
    };

    print!("{}", args.format.render(&result));

    if args.export {
        if let Some(artifact) = session.export() {
            let path = export::write_artifact(&args.export_dir, &artifact)
                .with_context(|| format!("failed to write {}", artifact.file_name))?;
            eprintln!("  Exported to {}", path.display());
        }
    }

    if let Some(reason) = args.gate_failure(&result) {
        bail!(reason);
    }

    Ok(())
}
