use std::process::ExitCode;
use std::sync::Arc;

use stuffd::stuff::MongoStore;
use stuffd::{Config, Server, app, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    let config = Config::from_env();

    let store = match MongoStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to mongodb");
            return ExitCode::FAILURE;
        }
    };

    let router = app::build_router(Arc::new(store));

    if let Err(e) = Server::bind(config.listen_addr).serve(router).await {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
