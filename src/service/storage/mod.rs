pub mod in_memory;
#[cfg(feature = "server")]
pub mod json_file;

use async_trait::async_trait;

use crate::types::GroupRecord;

/// Record store holding one [`GroupRecord`] per group id.
///
/// There is no locking or transaction support: two saves of the same group
/// race and the last one wins.
#[async_trait]
pub trait Storage: Send + Sync {
    type InternalError: std::error::Error + Send + Sync + 'static;

    async fn get_group(&self, id: &str) -> Result<Option<GroupRecord>, Self::InternalError>;

    /// Insert or replace the record under `group.id`.
    async fn save_group(&self, group: &GroupRecord) -> Result<(), Self::InternalError>;
}
