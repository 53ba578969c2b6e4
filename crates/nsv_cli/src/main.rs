use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use nsv_client::ClientConfig;
use nsv_core::ArticleApi;
use nsv_lookup::render::{details, list_item, summary};
use nsv_lookup::{ArticleLookupController, SubmitStatus};
use tracing::info;

mod cli;
mod logging;
mod session;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = ClientConfig::default()
        .with_url(&cli.api_url)
        .with_timeout(cli.timeout.0);
    let backend = nsv_client::create_backend(&cli.backend, &config)?;
    info!("🌐 Using {} backend ({})", backend.name(), config.base_url);

    let controller = ArticleLookupController::new(backend);
    let mut stdout = std::io::stdout().lock();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Lookup { url, details: show_details } => {
            match controller.submit_url(&url).await {
                SubmitStatus::Opened(_) => {
                    let state = controller.snapshot().await;
                    if let Some(article) = state.active_modal.article() {
                        write!(stdout, "{}", summary(article))?;
                        if show_details {
                            write!(stdout, "{}", details(article))?;
                        }
                    }
                }
                SubmitStatus::Failed(e) => {
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
                SubmitStatus::Discarded => {}
            }
        }
        Commands::Recent => {
            controller.mount().await;
            let state = controller.snapshot().await;
            if state.recent_articles.is_empty() {
                writeln!(stdout, "No recent articles.")?;
            }
            for (i, article) in state.recent_articles.iter().enumerate() {
                writeln!(stdout, "{}", list_item(i, article))?;
            }
        }
        Commands::Interactive => {
            controller.mount().await;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run_session(&controller, stdin, &mut stdout).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
