//! Custom request extractors.

mod talent_form;
mod validated_json;

pub use talent_form::TalentForm;
pub use validated_json::ValidatedJson;
