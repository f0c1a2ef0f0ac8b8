use poem::{
    EndpointExt, Route, Server as PoemServer, endpoint::StaticFilesEndpoint,
    listener::TcpListener, middleware::Tracing,
};
use poem_openapi::OpenApiService;

use crate::api::product::dto::{IMAGE_URL_PREFIX, SYMBOL_URL_PREFIX};
use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub struct Server;

impl Server {
    /// Routes for the API, its docs and the served assets, without middleware.
    pub fn routes(container: DependencyContainer, public_url: &str) -> Route {
        let api_service = OpenApiService::new(
            (container.health_api, container.product_api),
            "Product Inventory API",
            "0.1.0",
        )
        .server(public_url);
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();

        Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .nest(SYMBOL_URL_PREFIX, StaticFilesEndpoint::new(container.symbol_dir))
            .nest(IMAGE_URL_PREFIX, StaticFilesEndpoint::new(container.image_dir))
    }

    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let app = Self::routes(container, &config.server.public_url())
            .with(config.cors)
            .with(Tracing);

        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}
