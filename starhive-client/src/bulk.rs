//! Bulk create/update/delete.
//!
//! The single-request methods send whatever they are given; the upstream API
//! rejects batches above [`BULK_OPERATION_LIMIT`]. The `*_in_batches`
//! variants split larger inputs and merge the per-chunk responses.

use crate::client::StarhiveClient;
use crate::error::{ClientError, ClientResult};
use crate::request::{BulkOperation, BulkRequest};
use reqwest::Method;
use starhive_model::{BulkItemResult, BulkResponse, StarhiveObject};
use tracing::{info, warn};

/// Maximum number of operations the public bulk API accepts per request.
pub const BULK_OPERATION_LIMIT: usize = 80;

impl StarhiveClient {
    /// Creates or updates objects in one bulk request.
    ///
    /// Objects with an id are patched, objects without one are created.
    /// Per-item failures are reported in the response, not as errors.
    pub async fn create_or_update_objects_in_bulk<T: StarhiveObject>(
        &self,
        objects: &[T],
    ) -> ClientResult<BulkResponse> {
        let operations = objects
            .iter()
            .map(|object| BulkOperation::upsert(object))
            .collect();
        self.bulk_request(operations).await
    }

    /// Deletes objects in one bulk request.
    pub async fn delete_objects_in_bulk<S: AsRef<str>>(
        &self,
        object_ids: &[S],
    ) -> ClientResult<BulkResponse> {
        let operations = object_ids
            .iter()
            .map(|id| BulkOperation::delete(id.as_ref()))
            .collect();
        self.bulk_request(operations).await
    }

    /// Like [`create_or_update_objects_in_bulk`](Self::create_or_update_objects_in_bulk),
    /// sending at most [`BULK_OPERATION_LIMIT`] operations per request.
    ///
    /// Chunks are sent one after another; indices in the merged response refer
    /// to positions in `objects`. A transport failure stops at the failing chunk.
    pub async fn create_or_update_objects_in_batches<T: StarhiveObject>(
        &self,
        objects: &[T],
    ) -> ClientResult<BulkResponse> {
        let operations = objects
            .iter()
            .map(|object| BulkOperation::upsert(object))
            .collect();
        self.batched_request(operations).await
    }

    /// Like [`delete_objects_in_bulk`](Self::delete_objects_in_bulk), split into
    /// chunks of at most [`BULK_OPERATION_LIMIT`].
    pub async fn delete_objects_in_batches<S: AsRef<str>>(
        &self,
        object_ids: &[S],
    ) -> ClientResult<BulkResponse> {
        let operations = object_ids
            .iter()
            .map(|id| BulkOperation::delete(id.as_ref()))
            .collect();
        self.batched_request(operations).await
    }

    async fn batched_request(&self, operations: Vec<BulkOperation>) -> ClientResult<BulkResponse> {
        let mut merged = BulkResponse::default();
        let mut offset = 0;
        for chunk in operations.chunks(BULK_OPERATION_LIMIT) {
            let response = self.bulk_request(chunk.to_vec()).await?;
            merged.merge(response, offset);
            offset += chunk.len();
        }
        Ok(merged)
    }

    async fn bulk_request(&self, operations: Vec<BulkOperation>) -> ClientResult<BulkResponse> {
        let submitted = operations.len();
        if submitted > BULK_OPERATION_LIMIT {
            warn!(
                "Bulk request with {} operations exceeds the API limit of {}",
                submitted, BULK_OPERATION_LIMIT
            );
        }

        let request = BulkRequest { operations };
        let mut response: BulkResponse = self
            .send_json(self.request(Method::POST, "/object/bulk").json(&request))
            .await?;
        check_bulk_response(&mut response, submitted)?;

        info!(
            "Bulk request finished: {} operations, {} failed",
            submitted,
            response.failed_items().count()
        );
        Ok(response)
    }
}

/// Orders items by index and checks there is exactly one per operation.
fn check_bulk_response(response: &mut BulkResponse, submitted: usize) -> ClientResult<()> {
    if response.result.len() != submitted {
        return Err(ClientError::Protocol(format!(
            "bulk response has {} results for {} operations",
            response.result.len(),
            submitted
        )));
    }
    response.result.sort_by_key(BulkItemResult::index);
    let in_place = response
        .result
        .iter()
        .enumerate()
        .all(|(position, item)| item.index() == position);
    if !in_place {
        return Err(ClientError::Protocol(
            "bulk response indices do not match submitted operations".to_string(),
        ));
    }
    Ok(())
}
