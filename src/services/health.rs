use crate::invitation::InvitationLedger;
use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub invitations: usize,
    pub document_store: DocumentStoreHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentStoreHealth {
    /// `healthy`, `unhealthy` or `disabled`.
    pub status: String,
    pub response_time_ms: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<InvitationLedger>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(ledger: Arc<InvitationLedger>) -> Self {
        let state = AppState {
            ledger,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/", get(banner))
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn banner() -> &'static str {
    "✅ RSVP bot is running!"
}

/// The bot keeps working on the JSON files alone, so a failing document
/// store degrades the status instead of failing the check.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let start = std::time::Instant::now();
    let store_status = document_store_status(&state).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let status = if store_status == "unhealthy" {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        invitations: state.ledger.invitation_count().await,
        document_store: DocumentStoreHealth {
            status: store_status.to_string(),
            response_time_ms,
        },
        uptime_seconds: uptime,
    })
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    match document_store_status(&state).await {
        "unhealthy" => Err(StatusCode::SERVICE_UNAVAILABLE),
        _ => Ok(Json("ready")),
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

async fn document_store_status(state: &AppState) -> &'static str {
    match state.ledger.persistence().documents() {
        None => "disabled",
        Some(db) => match db.ping().await {
            Ok(()) => "healthy",
            Err(e) => {
                tracing::warn!("Document store health check failed: {}", e);
                "unhealthy"
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::DatabaseManager;
    use crate::storage::{FileStore, Persistence};
    use axum_test::TestServer;
    use tempfile::TempDir;

    async fn create_test_health_service(with_db: bool) -> (HealthService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let documents = if with_db {
            let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
            let db = DatabaseManager::new(&db_url)
                .await
                .expect("Failed to create test database");
            db.run_migrations().await.expect("Failed to run migrations");
            Some(db)
        } else {
            None
        };

        let persistence = Persistence::new(FileStore::new(temp_dir.path().join("data")), documents);
        let ledger = Arc::new(InvitationLedger::load(persistence).await);

        (HealthService::new(ledger), temp_dir)
    }

    #[tokio::test]
    async fn test_health_endpoint_with_document_store() {
        let (health_service, _temp_dir) = create_test_health_service(true).await;
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let health_response: HealthResponse = response.json();
        assert_eq!(health_response.status, "ok");
        assert_eq!(health_response.document_store.status, "healthy");
        assert_eq!(health_response.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(health_response.invitations, 0);
    }

    #[tokio::test]
    async fn test_health_endpoint_files_only() {
        let (health_service, _temp_dir) = create_test_health_service(false).await;
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let health_response: HealthResponse = server.get("/health").await.json();
        assert_eq!(health_response.status, "ok");
        assert_eq!(health_response.document_store.status, "disabled");
    }

    #[tokio::test]
    async fn test_banner_endpoint() {
        let (health_service, _temp_dir) = create_test_health_service(false).await;
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().contains("RSVP bot is running"));
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let (health_service, _temp_dir) = create_test_health_service(true).await;
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/ready").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let ready_response: String = response.json();
        assert_eq!(ready_response, "ready");
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let (health_service, _temp_dir) = create_test_health_service(false).await;
        let server = TestServer::new(health_service.router).expect("Failed to create test server");

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);

        let alive_response: String = response.json();
        assert_eq!(alive_response, "alive");
    }
}
