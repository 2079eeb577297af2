use std::sync::Arc;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;

use valuables_backend::api::{HealthApi, ItemsApi};
use valuables_backend::app_data::AppData;
use valuables_backend::config::{AppSettings, init_database, init_logging, migrate_database};
use valuables_backend::services::ItemService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let settings = AppSettings::from_env()?;
    tracing::info!("Loaded settings: {:?}", settings);

    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let server_address = settings.server_address();
    let request_timeout = settings.request_timeout();
    let app_data = Arc::new(AppData::init(db.clone(), settings));

    let item_service = Arc::new(ItemService::new(app_data.clone()));
    let items_api = ItemsApi::new(item_service, request_timeout);

    let api_service = OpenApiService::new(
        (HealthApi::new(app_data.db.clone()), items_api),
        "Valuables API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");

    let ui = api_service.swagger_ui();

    // Compose routes: nest API service under /api and Swagger UI under /swagger
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", server_address);
    tracing::info!("Swagger UI available at http://{}/swagger", server_address);

    Server::new(TcpListener::bind(server_address)).run(app).await?;

    Ok(())
}
