//! Shared test helpers: a fixture classification service and an app wired
//! to it over an in-memory database.

use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Router};
use classify_catalog::classify::ClassifyClient;
use classify_catalog::db::SqliteBookRepository;
use classify_catalog::{build_router, AppState, CatalogService};
use classify_common::db::init_memory_database;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const HOBBIT_SEARCH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="4"/>
  <works>
    <work author="Tolkien, J. R. R." editions="120" holdings="9000" hyr="1937" owi="1151" title="The Hobbit"/>
  </works>
</classify>"#;

pub const EMPTY_SEARCH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="4"/>
  <works/>
</classify>"#;

pub const DUNE_FIND: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="0"/>
  <work author="Herbert" editions="300" holdings="5000" owi="12345" title="Dune">12345</work>
  <recommendations>
    <ddc><mostPopular holdings="4000" nsfa="813" sfa="813"/></ddc>
  </recommendations>
</classify>"#;

pub const NOT_FOUND_FIND: &str = r#"<classify xmlns="http://classify.oclc.org"><response code="102"/></classify>"#;

async fn classify_fixture(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("summary").map(String::as_str) != Some("true") {
        return (StatusCode::BAD_REQUEST, "summary flag missing").into_response();
    }

    if let Some(title) = params.get("title") {
        let body = if title.contains("Hobbit") { HOBBIT_SEARCH } else { EMPTY_SEARCH };
        return body.into_response();
    }

    match params.get("owi").map(String::as_str) {
        Some("12345") => DUNE_FIND.into_response(),
        Some("bad-id") => "<classify><work owi=\"bad-id\"".into_response(),
        Some("slow") => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            DUNE_FIND.into_response()
        }
        _ => NOT_FOUND_FIND.into_response(),
    }
}

/// Start the fixture classification service, returning its endpoint URL
pub async fn spawn_classify_fixture() -> String {
    let router = Router::new().route("/classify2/Classify", get(classify_fixture));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/classify2/Classify", addr)
}

/// Application router over the fixture service and a fresh in-memory database
pub async fn setup_app() -> Router {
    let url = spawn_classify_fixture().await;
    let pool = init_memory_database()
        .await
        .expect("Failed to create in-memory database");

    let catalog = CatalogService::new(
        Arc::new(ClassifyClient::new(url).unwrap()),
        Arc::new(SqliteBookRepository::new(pool)),
    );
    build_router(AppState::new(catalog, Duration::from_secs(10)))
}
