pub mod net;
pub mod storage;

// Re-exports for convenience
pub use net::{default_http_client, ApiTransport, HttpApiTransport, NetError};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
