pub mod content_store;
pub mod fib;
pub mod lru;
pub mod nonce_cache;
pub mod pit;

pub use content_store::{ContentStore, ContentStoreEntry};
pub use fib::Fib;
pub use nonce_cache::NonceCache;
pub use pit::{PendingInterestTable, PitEntry};
