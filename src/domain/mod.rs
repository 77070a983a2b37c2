//! Domain layer - Core business entities and logic
//!
//! Core catalog models independent of infrastructure concerns:
//! the talent entity, photo asset helpers, and the field rules the
//! API layer enforces before invoking services.

pub mod photo;
pub mod talent;

pub use photo::NewPhoto;
pub use talent::{
    parse_rating, parse_tags, validate_altura, validate_nombre, validate_rating, CatalogFilter,
    Genero, Talent, TalentActivity, TalentDraft, TalentResponse, TalentSummary, TalentUpdate,
};
