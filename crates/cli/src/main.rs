use anyhow::Context;
use clap::{Parser, Subcommand};

use shelfmark_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "shelfmark", version, about = "SHELFMARK book catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load SHELFMARK settings")?;
    shelfmark_telemetry::init(&settings.telemetry);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(env = ?settings.environment, "starting server");
            shelfmark_app::serve(settings).await
        }
    }
}
