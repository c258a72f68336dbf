use {
    clap::Parser,
    cocktail_cache::{app::*, *},
    std::process::*,
    tokio::net::*,
};

#[tokio::main]
async fn main() -> ExitCode {
    let configuration = Configuration::parse();
    init_tracing(&configuration.log_level);

    match run(configuration).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

async fn run(configuration: Configuration) -> Result<(), ConfigurationError> {
    let state = AppState::new(&configuration)?;
    let router = router(state);

    let listener = TcpListener::bind(&configuration.address)
        .await
        .map_err(|source| ConfigurationError::Bind {
            address: configuration.address.clone(),
            source,
        })?;
    tracing::info!("bound to: {:?}", listener.local_addr());

    axum::serve(listener, router).await.map_err(ConfigurationError::Serve)
}
