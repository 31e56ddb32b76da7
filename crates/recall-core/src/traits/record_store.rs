//! Record store trait.

use async_trait::async_trait;

use crate::error::RecallResult;
use crate::types::MemoryRecord;

/// Read-only access to full memory records, for assembling result cards.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a record by id. `None` when the id is unknown (e.g. the index
    /// is ahead of the store); callers skip such candidates.
    async fn get(&self, record_id: &str) -> RecallResult<Option<MemoryRecord>>;
}
