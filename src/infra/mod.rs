//! Infrastructure layer - External systems integration
//!
//! The two collaborators of the talent record service live here:
//! - the relational record store (SeaORM database + repositories)
//! - the photo object store
//! plus database migrations.

pub mod db;
pub mod repositories;
pub mod storage;

pub use db::{Database, Migrator};
pub use repositories::{TalentRecord, TalentRepository, TalentStore};
pub use storage::{LocalPhotoStore, PhotoStorage};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockTalentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockPhotoStorage;
