use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RecordId, StoredProperty};
use crate::store::types::{BatchResponse, FetchParams, FetchResponse, RecordResponse};

/// Hosted record store holding property rows.
/// Implementations report store-side failures through the `success` flags of
/// the responses and only return `Err` when the call itself fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch rows matching the query
    async fn fetch_records(&self, params: FetchParams) -> Result<FetchResponse>;

    /// Fetch a single row
    async fn get_record_by_id(&self, id: RecordId, fields: Vec<String>) -> Result<RecordResponse>;

    async fn create_records(&self, records: Vec<StoredProperty>) -> Result<BatchResponse>;

    async fn update_records(&self, records: Vec<StoredProperty>) -> Result<BatchResponse>;

    async fn delete_records(&self, ids: Vec<RecordId>) -> Result<BatchResponse>;

    /// Name of the backing store, for logs
    fn store_name(&self) -> &'static str;
}
