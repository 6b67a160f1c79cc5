pub mod routes;
pub mod types;
mod setup;
mod store;

use handle_errors::return_error;
use tracing_subscriber::fmt::format::FmtSpan;
use warp::{http::Method, Filter};

use crate::routes::vocab::vocab_routes;
use crate::setup::Args;
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    dotenv::dotenv().ok();
    let config = Args::new()?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "handle_errors={},vocab_web={},warp={}",
            config.log_level, config.log_level, config.log_level
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store = Store::new(&config.mongodb_url, &config.database_name).await?;

    let cors = warp::cors()
        .allow_origins(config.origins())
        .allow_credentials(true)
        .allow_headers(vec!["Content-Type", "Authorization"])
        .allow_methods(&[Method::PUT, Method::DELETE, Method::GET, Method::POST]);

    let routes = vocab_routes(store)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "vocab request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }))
        .with(cors)
        .recover(return_error);

    tracing::info!("listening on 0.0.0.0:{}", config.port);
    warp::serve(routes).run(([0, 0, 0, 0], config.port)).await;

    Ok(())
}
