//! Talent domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationError;

use crate::config::{MAX_RATING, MIN_NOMBRE_LENGTH, MIN_RATING};
use crate::domain::photo::NewPhoto;

/// Gender enumeration of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Genero {
    Dama,
    Caballero,
}

impl Genero {
    /// Parse the fixed catalog values, case-insensitively; anything
    /// else is invalid input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dama" => Some(Genero::Dama),
            "caballero" => Some(Genero::Caballero),
            _ => None,
        }
    }
}

impl std::fmt::Display for Genero {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Genero::Dama => write!(f, "Dama"),
            Genero::Caballero => write!(f, "Caballero"),
        }
    }
}

/// Talent domain entity.
///
/// `fotos` is ordered; index 0 is the primary photo. The derived `foto`
/// column is never carried here: it is recomputed from `fotos` on every
/// write path and when building responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talent {
    pub id: Uuid,
    pub nombre: String,
    pub genero: Genero,
    pub altura: Option<String>,
    pub experiencia: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub rating: f64,
    pub tags: Vec<String>,
    pub fotos: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Talent {
    /// The designated primary photo: always `fotos[0]`, or `None` when
    /// the list is empty.
    pub fn primary_photo(&self) -> Option<&str> {
        self.fotos.first().map(String::as_str)
    }
}

/// Validated input for creating a talent record.
///
/// Field-level validation (nombre length, altura pattern, rating range,
/// at-least-one-photo) happens in the API layer before this is built;
/// the service trusts it.
#[derive(Debug, Clone)]
pub struct TalentDraft {
    pub nombre: String,
    pub genero: Genero,
    pub altura: Option<String>,
    pub experiencia: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub rating: f64,
    pub tags: Vec<String>,
    pub new_photos: Vec<NewPhoto>,
}

/// Validated input for updating a talent record.
///
/// `existing_photos` is the ordered list of already-stored URLs the
/// caller wants to keep; removed entries were filtered out client-side.
/// `active` is deliberately absent: status changes go through
/// `toggle_status`, never through update.
#[derive(Debug, Clone)]
pub struct TalentUpdate {
    pub nombre: String,
    pub genero: Genero,
    pub altura: Option<String>,
    pub experiencia: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub rating: f64,
    pub tags: Vec<String>,
    pub existing_photos: Vec<String>,
    pub new_photos: Vec<NewPhoto>,
}

/// Catalog listing filter
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFilter {
    pub genero: Option<Genero>,
    /// The public view hides inactive records; the admin catalog sets
    /// this to include them.
    pub include_inactive: bool,
}

/// Compact search result (global search dropdown)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TalentSummary {
    pub id: Uuid,
    pub nombre: String,
    pub especialidad: Option<String>,
    pub genero: Genero,
}

/// Activity feed / notifications entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TalentActivity {
    pub id: Uuid,
    pub nombre: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl From<Talent> for TalentActivity {
    fn from(talent: Talent) -> Self {
        Self {
            id: talent.id,
            nombre: talent.nombre,
            created_at: talent.created_at,
            active: talent.active,
        }
    }
}

/// Talent response (client-facing shape).
///
/// Carries the derived `foto` alongside `fotos` so list consumers can
/// render the thumbnail without indexing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TalentResponse {
    pub id: Uuid,
    pub nombre: String,
    pub genero: Genero,
    pub altura: Option<String>,
    pub experiencia: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub rating: f64,
    pub tags: Vec<String>,
    pub fotos: Vec<String>,
    /// Always `fotos[0]`, or null when there are no photos
    pub foto: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Talent> for TalentResponse {
    fn from(t: Talent) -> Self {
        let foto = t.fotos.first().cloned();
        Self {
            id: t.id,
            nombre: t.nombre,
            genero: t.genero,
            altura: t.altura,
            experiencia: t.experiencia,
            especialidad: t.especialidad,
            descripcion: t.descripcion,
            rating: t.rating,
            tags: t.tags,
            fotos: t.fotos,
            foto,
            active: t.active,
            created_at: t.created_at,
        }
    }
}

// =============================================================================
// Field rules
// =============================================================================

/// Height pattern: a number, optional decimals, optional m/cm suffix
/// (e.g. "1.75m", "175 cm", "175").
static ALTURA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d+(\.\d+)?\s*(m|cm)?$").expect("altura pattern is valid"));

/// Split a comma-separated tag string into trimmed, non-empty labels,
/// preserving input order.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a rating string with fallback 0 and clamping to the [0, 5]
/// scale. Out-of-range input is rejected earlier by validation; the
/// clamp keeps the invariant even for callers that skip it.
pub fn parse_rating(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .unwrap_or(MIN_RATING)
        .clamp(MIN_RATING, MAX_RATING)
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validator hook: nombre needs at least 3 non-whitespace-padded chars.
pub fn validate_nombre(nombre: &str) -> Result<(), ValidationError> {
    if nombre.trim().chars().count() < MIN_NOMBRE_LENGTH {
        return Err(field_error(
            "nombre_too_short",
            "El nombre debe tener al menos 3 caracteres",
        ));
    }
    Ok(())
}

/// Validator hook: altura, when present and non-empty, must match the
/// height pattern.
pub fn validate_altura(altura: &str) -> Result<(), ValidationError> {
    if altura.trim().is_empty() || ALTURA_RE.is_match(altura.trim()) {
        return Ok(());
    }
    Err(field_error(
        "altura_format",
        "Formato inválido (ej: 1.75m o 175cm)",
    ))
}

/// Validator hook: rating, when present and non-empty, must be a number
/// in [0, 5].
pub fn validate_rating(rating: &str) -> Result<(), ValidationError> {
    let trimmed = rating.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    match trimmed.parse::<f64>() {
        Ok(v) if (MIN_RATING..=MAX_RATING).contains(&v) => Ok(()),
        _ => Err(field_error("rating_range", "El rating debe ser entre 0 y 5")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        assert_eq!(
            parse_tags(" editorial, pasarela ,, tv , "),
            vec!["editorial", "pasarela", "tv"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn parse_rating_falls_back_and_clamps() {
        assert_eq!(parse_rating("4.7"), 4.7);
        assert_eq!(parse_rating(""), 0.0);
        assert_eq!(parse_rating("abc"), 0.0);
        assert_eq!(parse_rating("7"), 5.0);
        assert_eq!(parse_rating("-1"), 0.0);
    }

    #[test]
    fn altura_accepts_metric_formats() {
        for ok in ["1.75m", "175cm", "175", "1.75 M", "180 CM"] {
            assert!(validate_altura(ok).is_ok(), "{ok}");
        }
        for bad in ["tall", "1,75m", "175mm", "m175"] {
            assert!(validate_altura(bad).is_err(), "{bad}");
        }
        // absent / blank altura is allowed
        assert!(validate_altura("").is_ok());
    }

    #[test]
    fn nombre_requires_three_chars_after_trim() {
        assert!(validate_nombre("Ana Gómez").is_ok());
        assert!(validate_nombre("  Al ").is_err());
        assert!(validate_nombre("").is_err());
    }

    #[test]
    fn rating_validation_bounds() {
        assert!(validate_rating("4.7").is_ok());
        assert!(validate_rating("").is_ok());
        assert!(validate_rating("7").is_err());
        assert!(validate_rating("-0.1").is_err());
        assert!(validate_rating("nan").is_err());
    }

    #[test]
    fn genero_parses_fixed_values_only() {
        assert_eq!(Genero::parse("Dama"), Some(Genero::Dama));
        assert_eq!(Genero::parse("caballero"), Some(Genero::Caballero));
        assert_eq!(Genero::parse(" dama "), Some(Genero::Dama));
        assert_eq!(Genero::parse("otro"), None);
        assert_eq!(Genero::parse(""), None);
    }

    fn sample_talent(fotos: Vec<String>) -> Talent {
        Talent {
            id: Uuid::new_v4(),
            nombre: "Ana Gómez".into(),
            genero: Genero::Dama,
            altura: None,
            experiencia: None,
            especialidad: None,
            descripcion: None,
            rating: 4.7,
            tags: vec![],
            fotos,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn response_derives_primary_photo() {
        let resp = TalentResponse::from(sample_talent(vec!["urlA".into(), "urlB".into()]));
        assert_eq!(resp.foto.as_deref(), Some("urlA"));
        assert_eq!(resp.fotos.len(), 2);

        assert!(TalentResponse::from(sample_talent(vec![])).foto.is_none());
    }
}
