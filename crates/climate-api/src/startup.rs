use crate::{
    db, index_handler, precipitation, routes, stations, temperature, tobs, ClimateQueries,
    ObservationSource, ObservationStore,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Historical prefix the API was first published under
pub const API_PREFIX: &str = "/api/v1.0";

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub queries: Arc<ClimateQueries>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::measurements::measurement_routes::precipitation,
        routes::measurements::measurement_routes::stations,
        routes::measurements::measurement_routes::tobs,
        routes::measurements::measurement_routes::temperature,
    ),
    components(
        schemas(
                routes::measurements::measurement_routes::ErrorBody,
                crate::PrecipitationSeries,
                crate::StationEntry,
                crate::TemperatureReading,
                crate::DailySummary,
        )
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over daily station precipitation and temperature observations")
    )
)]
struct ApiDoc;

/// Load the dataset and derive everything the handlers read from.
///
/// Runs to completion before the listener accepts traffic; a dataset that
/// cannot be loaded aborts startup.
pub async fn build_app_state(
    source: &dyn ObservationSource,
    tobs_window_days: u32,
    remote_url: String,
) -> Result<AppState, anyhow::Error> {
    let store = ObservationStore::load(source)
        .await
        .map_err(|e: db::Error| anyhow!("error loading observations: {}", e))?;
    let queries = Arc::new(ClimateQueries::new(Arc::new(store), tobs_window_days));

    Ok(AppState {
        remote_url,
        queries,
    })
}

fn measurement_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs", get(tobs))
        .route("/temperature", get(temperature))
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .merge(measurement_routes())
        .nest(API_PREFIX, measurement_routes())
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_string();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, path: {}, time: {}", response.status().as_str(), path, response_time);

    response
}
