//! Client orchestration tests against a stub backend.
//!
//! The stub mimics the real backend's contract: bearer-gated catalog and
//! execute endpoints, query failures encoded as 200 + `success: false`.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};

use sqlrunner_core::history::HISTORY_LIMIT;
use sqlrunner_core::models::QueryOutcome;
use sqlrunner_core::{GatewayServer, UpstreamClient, Workbench};

const TOKEN: &str = "demo-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", TOKEN)[..])
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "admin" && body["password"] == "secret" {
        Json(json!({"access_token": TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn tables(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({"tables": ["DemoEmployees", "Orders"]})).into_response()
}

async fn table_detail(Path(name): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({
        "name": name,
        "columns": [
            {"name": "id", "type": "INTEGER"},
            {"name": "name", "type": "TEXT"},
        ],
        "sample_data": [{"id": 1, "name": "Ava Patel"}],
    }))
    .into_response()
}

async fn execute(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let query = body["query"].as_str().unwrap_or_default();
    if query.contains("sleep") {
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    }

    if query.to_uppercase().starts_with("SELECT") {
        Json(json!({
            "success": true,
            "data": [{"id": 1, "name": "Ava Patel"}],
            "execution_time": 0.0042,
        }))
        .into_response()
    } else {
        // Query-level failures still come back as HTTP 200.
        Json(json!({
            "success": false,
            "error": format!("near \"{}\": syntax error", query.split_whitespace().next().unwrap_or("")),
        }))
        .into_response()
    }
}

fn demo_backend() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/tables", get(tables))
        .route("/api/tables/:table", get(table_detail))
        .route("/api/execute", post(execute))
}

async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, demo_backend()).await.unwrap();
    });
    format!("http://{}", addr)
}

fn workbench(backend_url: &str, dir: &std::path::Path) -> Workbench {
    Workbench::new(backend_url, 5, dir).unwrap()
}

#[tokio::test]
async fn login_refreshes_the_catalog() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&backend_url, dir.path());

    assert!(!bench.session.is_authenticated().await);
    assert!(!bench.login("admin", "wrong").await);
    assert!(!bench.session.is_authenticated().await);

    assert!(bench.login("admin", "secret").await);
    assert!(bench.session.is_authenticated().await);
    assert_eq!(bench.catalog.tables().await, vec!["DemoEmployees", "Orders"]);
}

#[tokio::test]
async fn persisted_credential_survives_restart_and_warms_catalog() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let bench = workbench(&backend_url, dir.path());
        assert!(bench.login("admin", "secret").await);
    }

    // A fresh workbench over the same data dir restores the credential
    // optimistically and startup pre-fetches the table list.
    let bench = workbench(&backend_url, dir.path());
    assert!(bench.session.is_authenticated().await);
    assert!(bench.catalog.tables().await.is_empty());
    bench.startup().await;
    assert_eq!(bench.catalog.tables().await, vec!["DemoEmployees", "Orders"]);
}

#[tokio::test]
async fn query_success_and_failure_round_trip_into_history() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&backend_url, dir.path());
    assert!(bench.login("admin", "secret").await);

    let outcome = bench
        .runner
        .execute("SELECT * FROM DemoEmployees")
        .await
        .expect("not rejected");
    match &outcome {
        QueryOutcome::Success {
            rows,
            execution_time,
        } => {
            assert_eq!(rows.len(), 1);
            assert_eq!(*execution_time, Some(0.0042));
        }
        QueryOutcome::Failure { error } => panic!("unexpected failure: {}", error),
    }

    let outcome = bench
        .runner
        .execute("SELEC * FROM DemoEmployees")
        .await
        .expect("not rejected");
    assert_eq!(
        outcome.error_message(),
        Some("near \"SELEC\": syntax error")
    );
    assert_eq!(outcome.execution_time(), None);

    let entries = bench.history.entries().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].query, "SELEC * FROM DemoEmployees");
    assert!(!entries[0].success);
    assert_eq!(entries[0].error.as_deref(), Some("near \"SELEC\": syntax error"));
    assert_eq!(entries[0].execution_time, None);
    assert_eq!(entries[1].query, "SELECT * FROM DemoEmployees");
    assert!(entries[1].success);
}

#[tokio::test]
async fn history_is_bounded_and_evicts_oldest_first() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&backend_url, dir.path());
    assert!(bench.login("admin", "secret").await);

    for i in 0..HISTORY_LIMIT + 1 {
        bench
            .runner
            .execute(&format!("SELECT {} AS n", i))
            .await
            .expect("not rejected");
    }

    let entries = bench.history.entries().await;
    assert_eq!(entries.len(), HISTORY_LIMIT);
    assert_eq!(entries[0].query, format!("SELECT {} AS n", HISTORY_LIMIT));
    // The very first query is the one that fell off.
    assert_eq!(entries.last().unwrap().query, "SELECT 1 AS n");
}

#[tokio::test]
async fn only_one_query_runs_at_a_time() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&backend_url, dir.path());
    assert!(bench.login("admin", "secret").await);

    let runner = bench.runner.clone();
    let slow = tokio::spawn(async move { runner.execute("SELECT sleep(1)").await });

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(bench.runner.is_busy());
    assert!(bench.runner.execute("SELECT 2").await.is_none());

    let outcome = slow.await.unwrap().expect("not rejected");
    assert!(outcome.is_success());
    assert!(!bench.runner.is_busy());

    // Only the slow query made it into history.
    let entries = bench.history.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].query, "SELECT sleep(1)");
}

#[tokio::test]
async fn selecting_a_table_caches_its_detail() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&backend_url, dir.path());
    assert!(bench.login("admin", "secret").await);

    let detail = bench
        .catalog
        .select_table("DemoEmployees")
        .await
        .expect("detail");
    assert_eq!(detail.name, "DemoEmployees");
    assert_eq!(detail.columns[0].type_name, "INTEGER");
    assert_eq!(bench.catalog.selected().await.unwrap().name, "DemoEmployees");

    // Awkward names survive the encode/decode round trip intact.
    let detail = bench
        .catalog
        .select_table("orders/2024")
        .await
        .expect("detail");
    assert_eq!(detail.name, "orders/2024");
}

#[tokio::test]
async fn unauthenticated_catalog_reads_degrade_silently() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&backend_url, dir.path());

    assert!(bench.catalog.list_tables().await.is_empty());
    assert!(bench.catalog.select_table("DemoEmployees").await.is_none());
}

#[tokio::test]
async fn logout_resets_catalog_history_and_credential() {
    let backend_url = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&backend_url, dir.path());
    assert!(bench.login("admin", "secret").await);

    bench.runner.execute("SELECT 1").await;
    bench.catalog.select_table("DemoEmployees").await;
    assert!(!bench.history.is_empty().await);
    assert!(!bench.catalog.tables().await.is_empty());

    bench.logout().await;

    assert!(!bench.session.is_authenticated().await);
    assert_eq!(bench.session.current_credential().await, None);
    assert!(bench.catalog.tables().await.is_empty());
    assert!(bench.catalog.selected().await.is_none());
    assert!(bench.history.is_empty().await);

    // And the persisted credential is gone too.
    let fresh = workbench(&backend_url, dir.path());
    assert!(!fresh.session.is_authenticated().await);
}

#[tokio::test]
async fn the_whole_chain_works_through_the_gateway() {
    // Client -> gateway -> backend, with the gateway running as a real server.
    let backend_url = spawn_backend().await;
    let upstream = Arc::new(UpstreamClient::new(Some(backend_url)).unwrap());
    let gateway = GatewayServer::new("127.0.0.1".to_string(), 0, upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let gateway_url = format!("http://{}", listener.local_addr().unwrap());
    let router = gateway.router();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let dir = tempfile::tempdir().unwrap();
    let bench = workbench(&gateway_url, dir.path());

    assert!(bench.login("admin", "secret").await);
    assert_eq!(bench.catalog.tables().await, vec!["DemoEmployees", "Orders"]);

    let outcome = bench
        .runner
        .execute("SELECT * FROM DemoEmployees")
        .await
        .expect("not rejected");
    assert!(outcome.is_success());
    assert_eq!(bench.history.len().await, 1);
}
