use anyhow::{Context, Result};
use pogoda::{PogodaConfig, PogodaError, WeatherAgent, logging};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let config = PogodaConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    let agent = WeatherAgent::from_config(&config)?;
    tracing::info!(
        version = pogoda::VERSION,
        resolve_dates = agent.resolves_dates(),
        "pogoda started"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(agent.prompt().as_bytes()).await?;
        stdout.flush().await?;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                let answer = PogodaError::from(e).user_message();
                stdout.write_all(format!("{answer}\n").as_bytes()).await?;
                continue;
            }
            Err(e) => return Err(e).context("Failed to read from stdin"),
        };

        let answer = match agent.handle_turn(&line).await {
            Ok(report) => report,
            Err(e) => {
                if !e.is_dialog_error() {
                    tracing::error!("Unexpected error: {}", e);
                }
                e.user_message()
            }
        };
        stdout.write_all(format!("{answer}\n").as_bytes()).await?;
    }

    tracing::info!("stdin closed, exiting");
    Ok(())
}
