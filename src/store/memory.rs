use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::models::{Property, RecordId, StoredProperty};
use crate::store::traits::RecordStore;
use crate::store::types::{BatchResponse, FetchParams, FetchResponse, RecordResponse, RecordResult};
use crate::transform;

#[derive(Default)]
struct Table {
    rows: BTreeMap<RecordId, StoredProperty>,
    next_id: RecordId,
}

/// Record store kept in process memory, used for offline browsing and tests
#[derive(Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the given listings, keeping their ids
    pub fn seeded(properties: &[Property]) -> Self {
        let mut table = Table::default();
        for property in properties {
            table
                .rows
                .insert(property.id, transform::to_stored_row(property));
            table.next_id = table.next_id.max(property.id);
        }
        Self {
            table: Mutex::new(table),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Mirrors the store's own required-column check on writes
fn check_required(record: &StoredProperty) -> Option<String> {
    if record.title.as_deref().map_or(true, str::is_empty) {
        return Some("Required field title is missing".to_string());
    }
    if record.price.is_none() {
        return Some("Required field price is missing".to_string());
    }
    None
}

fn project(row: &StoredProperty, fields: &[String]) -> StoredProperty {
    if fields.is_empty() {
        return row.clone();
    }

    let has = |name: &str| fields.iter().any(|f| f == name);
    StoredProperty {
        id: row.id,
        name: row.name.clone().filter(|_| has("Name")),
        title: row.title.clone().filter(|_| has("title")),
        price: row.price.filter(|_| has("price")),
        property_type: row.property_type.clone().filter(|_| has("property_type")),
        bedrooms: row.bedrooms.filter(|_| has("bedrooms")),
        bathrooms: row.bathrooms.filter(|_| has("bathrooms")),
        square_footage: row.square_footage.filter(|_| has("square_footage")),
        address: row.address.clone().filter(|_| has("address")),
        description: row.description.clone().filter(|_| has("description")),
        listing_type: row.listing_type.clone().filter(|_| has("listing_type")),
        amenities: row.amenities.clone().filter(|_| has("amenities")),
        image: row.image.clone().filter(|_| has("image")),
        created_at: row.created_at.filter(|_| has("created_at")),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_records(&self, params: FetchParams) -> Result<FetchResponse> {
        let table = self.table.lock().await;

        let data = table
            .rows
            .values()
            .filter(|row| {
                let value = serde_json::to_value(row).unwrap_or_default();
                params.where_clauses.iter().all(|clause| clause.matches(&value))
            })
            .map(|row| project(row, &params.fields))
            .collect::<Vec<_>>();

        debug!("Memory store matched {} of {} rows", data.len(), table.rows.len());

        Ok(FetchResponse {
            success: true,
            message: None,
            data: Some(data),
        })
    }

    async fn get_record_by_id(&self, id: RecordId, fields: Vec<String>) -> Result<RecordResponse> {
        let table = self.table.lock().await;

        Ok(RecordResponse {
            success: true,
            message: None,
            data: table.rows.get(&id).map(|row| project(row, &fields)),
        })
    }

    async fn create_records(&self, records: Vec<StoredProperty>) -> Result<BatchResponse> {
        let mut table = self.table.lock().await;

        let mut results = Vec::with_capacity(records.len());
        for mut record in records {
            if let Some(message) = check_required(&record) {
                results.push(RecordResult::failed(message));
                continue;
            }

            table.next_id += 1;
            let id = table.next_id;
            record.id = Some(id);
            table.rows.insert(id, record.clone());
            results.push(RecordResult::ok(Some(record)));
        }

        Ok(BatchResponse {
            success: true,
            message: None,
            results: Some(results),
        })
    }

    async fn update_records(&self, records: Vec<StoredProperty>) -> Result<BatchResponse> {
        let mut table = self.table.lock().await;

        let mut results = Vec::with_capacity(records.len());
        for mut record in records {
            let Some(id) = record.id else {
                results.push(RecordResult::failed("Record Id is required for update"));
                continue;
            };
            if let Some(message) = check_required(&record) {
                results.push(RecordResult::failed(message));
                continue;
            }
            let Some(existing) = table.rows.get_mut(&id) else {
                results.push(RecordResult::failed(format!("Record {} not found", id)));
                continue;
            };

            if record.created_at.is_none() {
                record.created_at = existing.created_at;
            }
            *existing = record.clone();
            results.push(RecordResult::ok(Some(record)));
        }

        Ok(BatchResponse {
            success: true,
            message: None,
            results: Some(results),
        })
    }

    async fn delete_records(&self, ids: Vec<RecordId>) -> Result<BatchResponse> {
        let mut table = self.table.lock().await;

        let results = ids
            .into_iter()
            .map(|id| match table.rows.remove(&id) {
                Some(_) => RecordResult::ok(None),
                None => RecordResult::failed(format!("Record {} not found", id)),
            })
            .collect();

        Ok(BatchResponse {
            success: true,
            message: None,
            results: Some(results),
        })
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
