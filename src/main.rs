use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pagesnap::app::{AppContext, SnapError};
use pagesnap::cli::{commands, Cli, Commands};
use pagesnap::config::Config;
use pagesnap::domain::ScrapeRequest;

/// Exit with code 2 and the `scrape` usage line
fn scrape_usage_error(err: SnapError) -> ! {
    let mut cmd = Cli::command().bin_name("pagesnap");
    // Propagates bin names so the usage reads `pagesnap scrape`
    cmd.build();

    match cmd.find_subcommand_mut("scrape") {
        Some(scrape) => scrape.error(ErrorKind::MissingRequiredArgument, err).exit(),
        None => cmd.error(ErrorKind::MissingRequiredArgument, err).exit(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout is for command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            url,
            engine,
            output,
        } => {
            // Validate before touching config or the artifact
            let request = match ScrapeRequest::from_option(url.as_deref()) {
                Ok(request) => request,
                Err(e @ SnapError::MissingUrl) => scrape_usage_error(e),
                Err(e) => return Err(e.into()),
            };

            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(path) = output {
                config.artifact.path = path;
            }

            let ctx = AppContext::new(config);
            commands::scrape(&ctx, &request, engine).await?;
        }
        Commands::Serve { host, port } => {
            let mut config = Config::load(cli.config.as_deref())?;
            config.apply_server_env(|key| std::env::var(key).ok())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let ctx = AppContext::new(config);
            commands::serve(&ctx).await?;
        }
    }

    Ok(())
}
