//! Photo object store.
//!
//! `PhotoStorage` is the abstract contract the record service uploads
//! against: non-overwriting upload by key, public-URL derivation, and
//! batch delete. `LocalPhotoStore` is the bundled filesystem-backed
//! implementation.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::errors::AppResult;

mod local;

pub use local::LocalPhotoStore;

/// Object store contract for photo assets.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Store `bytes` under `key`, refusing to overwrite an existing
    /// object. Returns the public URL of the stored object.
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> AppResult<String>;

    /// Delete a batch of keys. Callers treat failure as a cleanup
    /// warning, not a fatal error.
    async fn remove(&self, keys: &[String]) -> AppResult<()>;

    /// Public URL under which `key` is served.
    fn public_url(&self, key: &str) -> String;
}
