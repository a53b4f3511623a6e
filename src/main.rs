mod banner;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adconnect::config::AppConfig;
use adconnect::console::Console;
use adconnect::directory::Directory;
use adconnect::engine::ShellSession;
use adconnect::history::HistoryLog;
use adconnect::launcher::SystemLauncher;
use adconnect::session::Session;

#[derive(Parser)]
#[command(
    name = "adconnect",
    version,
    about = "Find a workstation in the directory, connect to it, and keep an audit trail"
)]
struct Cli {
    /// Print debug diagnostics (queries, launches) to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Config file to use instead of the user-level config.toml
    #[arg(long, env = "ADCONNECT_CONFIG")]
    config: Option<PathBuf>,

    /// History file to append to (overrides [history] path)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Skip the startup title
    #[arg(long)]
    no_banner: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "adconnect=debug" } else { "warn" };
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new(default)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(ref path) = cli.history {
        config.history.path.clone_from(path);
    }

    if !cli.no_banner {
        banner::print_banner();
    }

    let engine = ShellSession::open(
        &config.engine.program,
        &config.engine.args,
        &config.engine.marker_command,
    )
    .context("could not open a directory query session")?;

    let directory = Directory::new(engine, config.queries);
    let launcher = SystemLauncher::new(&config.remote);
    let history = HistoryLog::new(config.history.path);
    let console = Console::new(std::io::stdin().lock(), std::io::stdout().lock());

    Session::new(directory, launcher, history, console)
        .with_portal_url(config.portal.url)
        .run()
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("[adconnect] error: {e:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
