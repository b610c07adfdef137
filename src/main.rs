use anyhow::Result;
use deepler::cli;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so translations and histogram output stay clean on stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "deepler=debug" } else { "deepler=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    cli::run(&matches, &mut stdin, &mut stdout).await
}
