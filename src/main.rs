use brew_guzzle::{BrewRunner, Config, session, style};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brew-guzzle")]
#[command(author, version, about = "Reconcile Homebrew with your Tapfile and Brewfile", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Ask every question but only print the resulting command
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never land between a prompt and its answer
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    style::init_colors();

    let config = Config::from_env()?;
    tracing::debug!(
        ?config,
        prefix = %brew_guzzle::config::detect_prefix().display(),
        "resolved configuration"
    );
    let runner = BrewRunner::new(&config.brew_bin);

    let stdin = std::io::stdin();
    let outcome = session::run(&config, &runner, stdin.lock(), std::io::stdout(), cli.dry_run)?;
    tracing::debug!(?outcome, "session finished without exec");

    Ok(())
}
