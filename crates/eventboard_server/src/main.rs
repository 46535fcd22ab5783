use anyhow::anyhow;
use eventboard_server::config::Config;
use eventboard_server::start_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    eventboard_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!("logging initialization failed: {err}"))?;

    start_server(config).await
}
