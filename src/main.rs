use pushbridge::{Bridge, BridgeConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pushbridge=info".parse()?),
        )
        .init();

    let config = BridgeConfig::from_env()?;
    let bridge = Bridge::new(config).await?;
    bridge.run_forever().await?;

    Ok(())
}
