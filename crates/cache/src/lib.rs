//! Response cache for thingsctl
//!
//! A bounded, TTL-based in-memory cache for list reads. Entries expire
//! lazily on read and the oldest-inserted entry is evicted when a new key
//! arrives at capacity. Mutating operations invalidate whole categories.
//!
//! The cache is a plain value: whoever owns it (the operations service)
//! serializes access through `&mut self`.

pub mod categories;
pub mod entry;
pub mod response_cache;

pub use categories::CacheCategory;
pub use entry::CacheEntry;
pub use response_cache::ResponseCache;
