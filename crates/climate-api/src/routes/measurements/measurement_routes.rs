use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    AppState, DailySummary, PrecipitationSeries, QueryError, StationEntry, TemperatureParams,
    TemperatureReading,
};

/// Body returned whenever a query has nothing to show
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[serde(rename = "Error")]
    pub error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        // Invalid requests share the not-found payload clients already handle
        match &self {
            QueryError::NoData => debug!("query returned no rows"),
            QueryError::InvalidRequest(reason) => warn!("rejecting request: {}", reason),
        }

        let body = ErrorBody {
            error: QueryError::NoData.to_string(),
        };
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/precipitation",
    responses(
        (status = OK, description = "Precipitation for every date in the dataset", body = Vec<PrecipitationSeries>),
        (status = NOT_FOUND, description = "Dataset is empty", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationSeries>>, QueryError> {
    let series = state.queries.precipitation()?;
    // Served as a single-element list of date -> precipitation
    Ok(Json(vec![series]))
}

#[utoipa::path(
    get,
    path = "/stations",
    responses(
        (status = OK, description = "Stations that reported at least one observation", body = Vec<StationEntry>),
        (status = NOT_FOUND, description = "Dataset is empty", body = ErrorBody)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationEntry>>, QueryError> {
    Ok(Json(state.queries.stations()?))
}

#[utoipa::path(
    get,
    path = "/tobs",
    responses(
        (status = OK, description = "Temperatures of the most active station over the trailing window ending at the latest date", body = Vec<TemperatureReading>),
        (status = NOT_FOUND, description = "No readings inside the window", body = ErrorBody)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, QueryError> {
    Ok(Json(state.queries.most_active_temperatures()?))
}

#[utoipa::path(
    get,
    path = "/temperature",
    params(TemperatureParams),
    responses(
        (status = OK, description = "Daily min/avg/max temperature across all stations", body = Vec<DailySummary>),
        (status = NOT_FOUND, description = "Missing start date or no readings in range", body = ErrorBody)
    ))]
pub async fn temperature(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<DailySummary>>, QueryError> {
    let Query(pairs) = query.map_err(|e| QueryError::InvalidRequest(e.body_text()))?;
    let params = TemperatureParams::from_pairs(pairs);
    Ok(Json(state.queries.temperature_summary(&params)?))
}
