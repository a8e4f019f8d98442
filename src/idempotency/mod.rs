pub mod cleanup;
pub mod storage;

pub use cleanup::CleanupJob;
pub use storage::{CachedSend, IdempotencyStore, StoreStats};
