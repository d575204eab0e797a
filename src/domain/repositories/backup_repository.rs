//! Repository trait for whole-store backup operations.

use crate::domain::entities::BackupSnapshot;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackupRepository: Send + Sync {
    /// Reads every collection. `exported_at` is left for the caller to set.
    async fn snapshot(&self) -> Result<BackupSnapshot, AppError>;

    /// Writes the sections present in `snapshot` and returns their names.
    async fn restore(&self, snapshot: BackupSnapshot) -> Result<Vec<&'static str>, AppError>;

    /// Removes every warehouse collection so the next read yields defaults.
    async fn clear(&self) -> Result<(), AppError>;
}
