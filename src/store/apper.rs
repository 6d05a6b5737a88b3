use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{ListingError, Result};
use crate::models::{RecordId, StoredProperty};
use crate::store::traits::RecordStore;
use crate::store::types::{BatchResponse, FetchParams, FetchResponse, RecordResponse};

/// Table holding property rows
pub const PROPERTY_TABLE: &str = "property";

/// HTTP client for the hosted Apper record store
pub struct ApperStore {
    client: Client,
    config: StoreConfig,
}

impl ApperStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("propnest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn table_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}/tables/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            PROPERTY_TABLE,
            path
        )
    }

    async fn call<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.table_url(path);
        debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, &url)
            .bearer_auth(&self.config.public_key)
            .header("X-Apper-Project-Id", &self.config.project_id)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Record store returned status: {}", status);
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| format!("Record store returned status: {}", status));
            return Err(ListingError::Store(message));
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl RecordStore for ApperStore {
    async fn fetch_records(&self, params: FetchParams) -> Result<FetchResponse> {
        self.call(Method::POST, "records/query", &params).await
    }

    async fn get_record_by_id(&self, id: RecordId, fields: Vec<String>) -> Result<RecordResponse> {
        self.call(
            Method::POST,
            &format!("records/{}", id),
            &json!({ "fields": fields }),
        )
        .await
    }

    async fn create_records(&self, records: Vec<StoredProperty>) -> Result<BatchResponse> {
        self.call(Method::POST, "records", &json!({ "records": records }))
            .await
    }

    async fn update_records(&self, records: Vec<StoredProperty>) -> Result<BatchResponse> {
        self.call(Method::PATCH, "records", &json!({ "records": records }))
            .await
    }

    async fn delete_records(&self, ids: Vec<RecordId>) -> Result<BatchResponse> {
        self.call(Method::DELETE, "records", &json!({ "RecordIds": ids }))
            .await
    }

    fn store_name(&self) -> &'static str {
        "Apper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::{HeaderMap, Method as HttpMethod, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    use crate::store::types::{Operator, WhereClause};

    /// Method, authorization header and JSON body of each request received
    type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

    async fn serve(app: Router) -> StoreConfig {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = StoreConfig::new("proj-42", "pk-test");
        config.base_url = format!("http://{}", addr);
        config
    }

    async fn record_request(
        State(seen): State<Seen>,
        method: HttpMethod,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        seen.lock().await.push((method.to_string(), auth, body));
        Json(serde_json::json!({ "success": true }))
    }

    #[test]
    fn test_table_url() {
        let mut config = StoreConfig::new("proj-42", "pk");
        config.base_url = "https://store.example.com/v1/".to_string();
        let store = ApperStore::new(config).unwrap();

        assert_eq!(
            store.table_url("records/query"),
            "https://store.example.com/v1/projects/proj-42/tables/property/records/query"
        );
        assert_eq!(store.store_name(), "Apper");
    }

    #[tokio::test]
    async fn test_rejected_call_carries_store_message() {
        let app = Router::new().route(
            "/projects/:project/tables/property/records/query",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({ "message": "Invalid public key" })),
                )
            }),
        );
        let store = ApperStore::new(serve(app).await).unwrap();

        match store.fetch_records(FetchParams::default()).await {
            Err(ListingError::Store(message)) => assert_eq!(message, "Invalid public key"),
            other => panic!("expected store error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_call_without_json_reports_status() {
        let app = Router::new().route(
            "/projects/:project/tables/property/records/query",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        );
        let store = ApperStore::new(serve(app).await).unwrap();

        match store.fetch_records(FetchParams::default()).await {
            Err(ListingError::Store(message)) => assert_eq!(
                message,
                "Record store returned status: 500 Internal Server Error"
            ),
            other => panic!("expected store error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_error() {
        let app = Router::new().route(
            "/projects/:project/tables/property/records/query",
            post(|| async { "not json" }),
        );
        let store = ApperStore::new(serve(app).await).unwrap();

        assert!(matches!(
            store.fetch_records(FetchParams::default()).await,
            Err(ListingError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let mut config = StoreConfig::new("proj-42", "pk-test");
        config.base_url = "http://127.0.0.1:1".to_string();
        let store = ApperStore::new(config).unwrap();

        assert!(matches!(
            store.delete_records(vec![1]).await,
            Err(ListingError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_request_bodies() {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route(
                "/projects/:project/tables/property/records/query",
                post(record_request),
            )
            .route(
                "/projects/:project/tables/property/records",
                post(record_request)
                    .patch(record_request)
                    .delete(record_request),
            )
            .with_state(seen.clone());
        let store = ApperStore::new(serve(app).await).unwrap();

        let params = FetchParams {
            fields: vec!["title".to_string()],
            where_clauses: vec![WhereClause::new("listing_type", Operator::ExactMatch, "rent")],
        };
        assert!(store.fetch_records(params).await.unwrap().success);

        let row = StoredProperty {
            id: Some(5),
            title: Some("Loft".to_string()),
            ..StoredProperty::default()
        };
        store.create_records(vec![row.clone()]).await.unwrap();
        store.update_records(vec![row]).await.unwrap();
        store.delete_records(vec![5, 6]).await.unwrap();

        let seen = seen.lock().await;
        let methods: Vec<_> = seen.iter().map(|(m, _, _)| m.as_str()).collect();
        assert_eq!(methods, vec!["POST", "POST", "PATCH", "DELETE"]);
        assert!(seen
            .iter()
            .all(|(_, auth, _)| auth.as_deref() == Some("Bearer pk-test")));

        assert_eq!(
            seen[0].2,
            serde_json::json!({
                "Fields": ["title"],
                "where": [{ "FieldName": "listing_type", "Operator": "ExactMatch", "Values": ["rent"] }]
            })
        );
        assert_eq!(
            seen[1].2,
            serde_json::json!({ "records": [{ "Id": 5, "title": "Loft" }] })
        );
        assert_eq!(seen[2].2, seen[1].2);
        assert_eq!(seen[3].2, serde_json::json!({ "RecordIds": [5, 6] }));
    }
}
