//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::source::{SnapshotSource, SourceError};
use crate::view::{TransformError, ViewModel, transform};

use super::dto::ErrorResponse;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: SnapshotSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/get_dashboard_data", get(dashboard_data::<S>))
        .route("/dashboard", get(dashboard_view::<S>))
        .layer(cors_layer())
        .with_state(state)
}

/// CORS for renderers served from a local dev server.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().is_ok_and(is_localhost_origin)
            },
        ))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Whether `origin` is `http(s)://localhost` with an optional numeric port.
pub fn is_localhost_origin(origin: &str) -> bool {
    let Some(host) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };

    match host.strip_prefix("localhost") {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The snapshot as obtained from the source.
async fn dashboard_data<S: SnapshotSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<Value>, AppError> {
    let document = state.source.fetch().await?;
    Ok(Json(document.into_raw()))
}

/// The view model for the current snapshot.
async fn dashboard_view<S: SnapshotSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<ViewModel>, AppError> {
    let document = state.source.fetch().await?;
    let view = transform(document.snapshot())?;

    tracing::debug!(
        time = %view.current_time,
        northbound = view.northbound_trains.len(),
        southbound = view.southbound_trains.len(),
        "built view model"
    );

    Ok(Json(view))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The snapshot could not be obtained
    Upstream { message: String },
    /// The snapshot was obtained but could not be displayed
    InvalidSnapshot { message: String },
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<TransformError> for AppError {
    fn from(e: TransformError) -> Self {
        AppError::InvalidSnapshot {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::InvalidSnapshot { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        tracing::warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use crate::snapshot::Snapshot;
    use crate::source::FileSnapshotSource;

    fn sample_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_snapshot.json")
    }

    /// Serve the router for `source` on an ephemeral port; returns its base URL.
    async fn serve(source: FileSnapshotSource) -> String {
        let app = create_router(AppState::new(source));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn localhost_origins() {
        assert!(is_localhost_origin("http://localhost"));
        assert!(is_localhost_origin("https://localhost"));
        assert!(is_localhost_origin("http://localhost:5173"));
        assert!(is_localhost_origin("https://localhost:8443"));

        assert!(!is_localhost_origin("localhost:5173"));
        assert!(!is_localhost_origin("http://localhost:"));
        assert!(!is_localhost_origin("http://localhost:80a"));
        assert!(!is_localhost_origin("http://localhost.evil.com"));
        assert!(!is_localhost_origin("http://127.0.0.1:5173"));
        assert!(!is_localhost_origin("ftp://localhost"));
    }

    #[tokio::test]
    async fn health_check() {
        let base = serve(FileSnapshotSource::new(sample_path())).await;

        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn dashboard_view_model() {
        let base = serve(FileSnapshotSource::new(sample_path())).await;

        let response = reqwest::get(format!("{base}/dashboard")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let view: serde_json::Value = response.json().await.unwrap();
        assert_eq!(view["currentTime"], "10:00");
        assert_eq!(view["currentDay"], "FRI");
        assert_eq!(view["currentDate"], "01 MAR");
        assert_eq!(view["currentTemperature"], "12°C");
        assert_eq!(view["minTemperature"], "8°C");
        assert_eq!(view["maxTemperature"], "15°C");

        let north = view["northboundTrains"].as_array().unwrap();
        assert_eq!(north.len(), 3);
        assert_eq!(north[0]["time"], "10:15");
        assert_eq!(north[0]["destination"], "Kings Cross");
        assert_eq!(north[0]["status"], "On time");
        assert_eq!(north[0]["delay"], "15 MINS");
        assert_eq!(north[1]["delay"], "42 MINS");
        assert_eq!(north[2]["status"], "Cancelled");
        assert_eq!(north[2]["delay"], "1 HR 20 MINS");

        assert_eq!(view["southboundTrains"], serde_json::json!([]));
        assert_eq!(
            view["southboundNotice"],
            "Buses replace trains between Stevenage and Hitchin"
        );
    }

    #[tokio::test]
    async fn snapshot_passthrough() {
        let base = serve(FileSnapshotSource::new(sample_path())).await;

        let snapshot: Snapshot = reqwest::get(format!("{base}/get_dashboard_data"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(snapshot.time, "2024-03-01T10:00:00Z");
        assert_eq!(snapshot.rail.northbound.services().len(), 3);
        assert_eq!(
            snapshot.rail.northbound.services()[1].delay_reason.as_deref(),
            Some("This train has been delayed by a points failure")
        );
        assert!(snapshot.rail.southbound.first_message().is_some());
        assert_eq!(snapshot.weather.main.temp, 12.0);
        assert_eq!(snapshot.weather.name.as_deref(), Some("Stevenage"));
        assert_eq!(snapshot.air_quality.unwrap().list[0].main.aqi, 2);
        assert_eq!(snapshot.aircon.unwrap()[0].name, "Living Room");
    }

    #[tokio::test]
    async fn snapshot_json_is_served_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let json = serde_json::json!({
            "time": "2024-03-01T10:00:00",
            "extra": 1,
            "rail": {
                "northbound": {
                    "nrccMessages": "Engineering works. See site",
                    "trainServices": {"service": [{
                        "std": "10:15",
                        "etd": "On time",
                        "length": 8,
                        "futureDelay": true,
                        "destination": {"location": [{"locationName": "Moorgate"}]}
                    }]}
                },
                "southbound": {}
            },
            "weather": {"main": {"temp": 12, "temp_min": 8, "temp_max": 15}}
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let base = serve(FileSnapshotSource::new(path)).await;

        let served: serde_json::Value = reqwest::get(format!("{base}/get_dashboard_data"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(served, json);

        let response = reqwest::get(format!("{base}/dashboard")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let view: serde_json::Value = response.json().await.unwrap();
        assert_eq!(view["northboundTrains"][0]["destination"], "Moorgate");
        assert_eq!(view["currentTemperature"], "12°C");
        assert_eq!(view["southboundNotice"], "No scheduled trains");
    }

    #[tokio::test]
    async fn missing_source_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let base = serve(FileSnapshotSource::new(dir.path().join("absent.json"))).await;

        let response = reqwest::get(format!("{base}/dashboard")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("absent.json"));
    }

    #[tokio::test]
    async fn untransformable_snapshot_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let json = serde_json::json!({
            "time": "not a time",
            "rail": {"northbound": {}, "southbound": {}},
            "weather": {"main": {"temp": 1, "temp_min": 0, "temp_max": 2}}
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let base = serve(FileSnapshotSource::new(path)).await;

        let response = reqwest::get(format!("{base}/dashboard")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

        // The raw snapshot is still served
        let response = reqwest::get(format!("{base}/get_dashboard_data"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allows_localhost_only() {
        let base = serve(FileSnapshotSource::new(sample_path())).await;
        let client = reqwest::Client::new();

        let response = client
            .get(format!("{base}/health"))
            .header("origin", "http://localhost:5173")
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers()["access-control-allow-credentials"],
            "true"
        );

        let response = client
            .get(format!("{base}/health"))
            .header("origin", "http://example.com")
            .send()
            .await
            .unwrap();
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }
}
