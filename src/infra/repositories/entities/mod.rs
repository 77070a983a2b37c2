//! SeaORM entity definitions
//!
//! Database-specific entities, separate from domain models.

pub mod talent;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use talent::{ActiveModel as TalentActiveModel, Entity as TalentEntity, Model as TalentModel};
