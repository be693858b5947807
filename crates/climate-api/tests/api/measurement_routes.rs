use crate::helpers::{get_json, mock_dataset, mock_observations, spawn_app, MockDataset};
use axum::http::StatusCode;
use climate_api::{build_app_state, Error, Observation};
use futures::future::join_all;
use serde_json::json;
use time::macros::date;

fn no_data() -> serde_json::Value {
    json!({ "Error": "No Data Found" })
}

#[tokio::test]
async fn precipitation_is_a_single_date_keyed_mapping() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, body) = get_json(&test_app.app, "/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "2015-01-01": 0.3,
            "2016-08-22": 0.0,
            "2016-08-23": 1.79,
            "2016-08-24": 2.15,
            "2017-08-18": null,
            "2017-08-23": 0.08
        }])
    );
}

#[tokio::test]
async fn stations_are_listed_once_in_first_seen_order() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, body) = get_json(&test_app.app, "/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "Station": "USC00519397" },
            { "Station": "USC00519281" },
            { "Station": "USC00513117" }
        ])
    );
}

#[tokio::test]
async fn tobs_returns_last_year_of_most_active_station() {
    let test_app = spawn_app(mock_observations()).await;
    assert_eq!(test_app.queries.most_active_station(), Ok("USC00519281"));

    let (status, body) = get_json(&test_app.app, "/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "Date": "2016-08-23", "Temp": 77.0 },
            { "Date": "2016-08-24", "Temp": 77.0 },
            { "Date": "2017-08-18", "Temp": 79.0 }
        ])
    );
}

#[tokio::test]
async fn temperature_from_start_date_is_open_ended() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, body) = get_json(&test_app.app, "/temperature?start=2017-08-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "Date": "2017-08-18", "Min Temp": 79.0, "Avg Temp": 79.0, "Max Temp": 79.0 },
            { "Date": "2017-08-23", "Min Temp": 68.0, "Avg Temp": 71.0, "Max Temp": 74.0 }
        ])
    );
}

#[tokio::test]
async fn temperature_between_dates_is_inclusive() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, body) = get_json(
        &test_app.app,
        "/temperature?start=2016-08-22&end=2016-08-23",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "Date": "2016-08-22", "Min Temp": 80.0, "Avg Temp": 80.0, "Max Temp": 80.0 },
            { "Date": "2016-08-23", "Min Temp": 77.0, "Avg Temp": 77.0, "Max Temp": 77.0 }
        ])
    );
}

#[tokio::test]
async fn temperature_without_start_is_not_found() {
    let test_app = spawn_app(mock_observations()).await;

    for uri in [
        "/temperature",
        "/temperature?end=2017-08-23",
        "/temperature?start=",
        "/temperature?start=23-08-2017",
    ] {
        let (status, body) = get_json(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, no_data(), "{}", uri);
    }
}

#[tokio::test]
async fn temperature_uses_first_value_of_repeated_keys() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, body) = get_json(
        &test_app.app,
        "/temperature?start=2016-08-22&start=2017-08-01&end=2016-08-23&end=2017-08-23",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "Date": "2016-08-22", "Min Temp": 80.0, "Avg Temp": 80.0, "Max Temp": 80.0 },
            { "Date": "2016-08-23", "Min Temp": 77.0, "Avg Temp": 77.0, "Max Temp": 77.0 }
        ])
    );
}

#[tokio::test]
async fn unparseable_temperature_query_is_not_found() {
    let test_app = spawn_app(mock_observations()).await;

    for uri in [
        "/temperature?start",
        "/temperature?start=%FF%FE",
        "/temperature?start=2017-08-01&end=%ZZ",
        "/temperature?&&=",
    ] {
        let (status, body) = get_json(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, no_data(), "{}", uri);
    }
}

#[tokio::test]
async fn temperature_range_without_readings_is_not_found() {
    let test_app = spawn_app(mock_observations()).await;

    let (status, body) = get_json(&test_app.app, "/temperature?start=2018-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, no_data());
}

#[tokio::test]
async fn empty_dataset_is_not_found_everywhere() {
    let test_app = spawn_app(vec![]).await;

    for uri in [
        "/precipitation",
        "/stations",
        "/tobs",
        "/temperature?start=2017-08-20",
    ] {
        let (status, body) = get_json(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, no_data(), "{}", uri);
    }
}

#[tokio::test]
async fn tied_stations_resolve_to_smallest_id() {
    let test_app = spawn_app(vec![
        Observation::new("USC2", date!(2017 - 08 - 21), None, Some(71.0)),
        Observation::new("USC1", date!(2017 - 08 - 21), None, Some(70.0)),
        Observation::new("USC2", date!(2017 - 08 - 22), None, Some(73.0)),
        Observation::new("USC1", date!(2017 - 08 - 22), None, Some(72.0)),
    ])
    .await;

    let (status, body) = get_json(&test_app.app, "/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "Date": "2017-08-21", "Temp": 70.0 },
            { "Date": "2017-08-22", "Temp": 72.0 }
        ])
    );
}

#[tokio::test]
async fn routes_are_served_under_versioned_prefix() {
    let test_app = spawn_app(mock_observations()).await;

    for route in ["precipitation", "stations", "tobs", "temperature?start=2016-08-23"] {
        let (root_status, root_body) = get_json(&test_app.app, &format!("/{}", route)).await;
        let (status, body) = get_json(&test_app.app, &format!("/api/v1.0/{}", route)).await;

        assert_eq!(status, StatusCode::OK, "{}", route);
        assert_eq!(status, root_status, "{}", route);
        assert_eq!(body, root_body, "{}", route);
    }
}

#[tokio::test]
async fn concurrent_requests_see_the_same_snapshot() {
    let test_app = spawn_app(mock_observations()).await;

    let responses = join_all(
        (0..16).map(|_| get_json(&test_app.app, "/temperature?start=2016-08-22&end=2017-08-23")),
    )
    .await;

    let (_, first) = &responses[0];
    for (status, body) in &responses {
        assert_eq!(*status, StatusCode::OK);
        assert_eq!(body, first);
    }
}

#[tokio::test]
async fn failed_load_aborts_startup() {
    let mut dataset = MockDataset::new();
    dataset
        .expect_describe()
        .return_const(String::from("sqlite:missing.sqlite"));
    dataset
        .expect_load()
        .times(1)
        .returning(|| Err(Error::NotFound(String::from("missing.sqlite"))));

    let result = build_app_state(&dataset, 365, String::from("http://127.0.0.1:5000")).await;

    let err = result.err().expect("startup should fail without a dataset");
    assert!(err.to_string().contains("missing.sqlite"));
}

#[tokio::test]
async fn custom_window_length_is_respected() {
    let dataset = mock_dataset(mock_observations());
    let state = build_app_state(&dataset, 10, String::from("http://127.0.0.1:5000"))
        .await
        .unwrap();

    // Only 2017-08-18 of the most active station falls in the last 10 days
    let readings = state.queries.most_active_temperatures().unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].date, date!(2017 - 08 - 18));
}
