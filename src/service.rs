use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::error::{ListingError, Result};
use crate::filter;
use crate::models::{property_fields, Property, PropertyDraft, RecordId, SearchFilters};
use crate::store::types::{BatchResponse, FetchParams, RecordResult};
use crate::store::RecordStore;
use crate::transform;

/// Listing operations on top of a record store.
///
/// Store failures are logged here and returned to the caller unchanged.
/// Nothing is retried.
pub struct PropertyService<S> {
    store: S,
}

impl<S: RecordStore> PropertyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Listings matching the search
    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<Property>> {
        let params = FetchParams {
            fields: property_fields(),
            where_clauses: filter::where_clauses(filters),
        };
        debug!(
            "Querying {} store with {} conditions",
            self.store.store_name(),
            params.where_clauses.len()
        );

        self.fetch_matching(params, filters)
            .await
            .inspect_err(|e| error!("Error fetching properties: {}", e))
    }

    async fn fetch_matching(
        &self,
        params: FetchParams,
        filters: &SearchFilters,
    ) -> Result<Vec<Property>> {
        let response = self.store.fetch_records(params).await?;
        if !response.success {
            return Err(store_failure(response.message));
        }

        let mut properties = Vec::new();
        for row in response.data.unwrap_or_default() {
            let id = row.id;
            let property = match transform::to_canonical(row) {
                Ok(property) => property,
                Err(e) => {
                    warn!("Skipping unreadable property row {:?}: {}", id, e);
                    continue;
                }
            };
            if filter::matches(&property, filters) {
                properties.push(property);
            }
        }

        info!("Found {} properties matching the search", properties.len());
        Ok(properties)
    }

    /// Single listing, `None` when the store has no such record
    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Property>> {
        let result: Result<Option<Property>> = async {
            let response = self.store.get_record_by_id(id, property_fields()).await?;
            if !response.success {
                return Err(store_failure(response.message));
            }
            response.data.map(transform::to_canonical).transpose()
        }
        .await;

        result.inspect_err(|e| error!("Error fetching property with ID {}: {}", id, e))
    }

    /// Submits a new listing. Missing required fields fail before the store is called.
    pub async fn create(&self, draft: &PropertyDraft) -> Result<Property> {
        let mut created = self.create_many(std::slice::from_ref(draft)).await?;
        created
            .pop()
            .ok_or_else(|| ListingError::store("No successful creation result returned"))
    }

    /// Submits several listings in one store call.
    ///
    /// Any invalid draft aborts the whole batch before the store is called.
    /// If the store rejects any record, the first rejection is returned and
    /// the records it did accept are not reported.
    pub async fn create_many(&self, drafts: &[PropertyDraft]) -> Result<Vec<Property>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let result: Result<Vec<Property>> = async {
            let created_at = Utc::now();
            let mut records = Vec::with_capacity(drafts.len());
            for draft in drafts {
                transform::validate_required(draft)?;
                let mut record = transform::to_storage(draft, None)?;
                record.created_at = Some(created_at);
                records.push(record);
            }

            let response = self.store.create_records(records).await?;
            let accepted = accepted_results(response, "create", "creation")?;
            if accepted.is_empty() {
                return Err(ListingError::store("No successful creation result returned"));
            }
            to_properties(accepted)
        }
        .await;

        result.inspect_err(|e| error!("Error creating property: {}", e))
    }

    /// Replaces the listing `id` with the draft
    pub async fn update(&self, id: RecordId, draft: &PropertyDraft) -> Result<Property> {
        let result: Result<Property> = async {
            transform::validate_required(draft)?;
            let record = transform::to_storage(draft, Some(id))?;

            let response = self.store.update_records(vec![record]).await?;
            let accepted = accepted_results(response, "update", "update")?;
            to_properties(accepted)?
                .pop()
                .ok_or_else(|| ListingError::store("No successful update result returned"))
        }
        .await;

        result.inspect_err(|e| error!("Error updating property: {}", e))
    }

    /// Removes a listing. Returns `false` when the store reported no results.
    pub async fn delete(&self, id: RecordId) -> Result<bool> {
        let result: Result<bool> = async {
            let response = self.store.delete_records(vec![id]).await?;
            if !response.success {
                return Err(store_failure(response.message));
            }
            match response.results {
                Some(results) => {
                    first_failure(&results, "delete")?;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        .await;

        result.inspect_err(|e| error!("Error deleting property: {}", e))
    }
}

fn store_failure(message: Option<String>) -> ListingError {
    ListingError::Store(message.unwrap_or_else(|| "Record store reported a failure".to_string()))
}

/// Fails with the message of the first rejected record in the batch
pub fn first_failure(results: &[RecordResult], verb: &str) -> Result<()> {
    let failed = results.iter().filter(|r| !r.success).collect::<Vec<_>>();
    let Some(first) = failed.first() else {
        return Ok(());
    };

    error!("Failed to {} {} of {} records", verb, failed.len(), results.len());
    Err(ListingError::Store(
        first
            .message
            .clone()
            .unwrap_or_else(|| format!("Failed to {} property", verb)),
    ))
}

/// Successful results of a batch, or the first failure
fn accepted_results(response: BatchResponse, verb: &str, noun: &str) -> Result<Vec<RecordResult>> {
    if !response.success {
        return Err(store_failure(response.message));
    }

    let results = response
        .results
        .ok_or_else(|| ListingError::Store(format!("No successful {} result returned", noun)))?;
    first_failure(&results, verb)?;
    Ok(results)
}

fn to_properties(results: Vec<RecordResult>) -> Result<Vec<Property>> {
    results
        .into_iter()
        .filter_map(|result| result.data)
        .map(transform::to_canonical)
        .collect()
}
