use anyhow::Context;

use shelfmark_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load SHELFMARK settings")?;
    shelfmark_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "shelfmark starting"
    );

    shelfmark_app::serve(settings).await
}
