use stroll::config::Config;
use stroll::engine::Engine;
use stroll::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        tracing::error!(%err, "stroll exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), stroll::error::Error> {
    let config = Config::from_env()?;
    let engine = Engine::from_config(&config)?;

    tracing::info!(
        policy = ?engine.settings().selection_policy,
        tags = engine.vocabulary().len(),
        "engine ready"
    );

    serve(engine, config.listen_addr).await
}
