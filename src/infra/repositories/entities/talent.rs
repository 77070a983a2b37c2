//! SeaORM entity for the `talents` table.

use sea_orm::entity::prelude::*;

use crate::domain::{Genero, Talent, TalentActivity, TalentSummary};

/// Database row for a talent record.
///
/// `tags` and `fotos` are JSON arrays of strings. `foto` is the
/// materialized primary photo, recomputed from `fotos` on every write
/// by the repository; it is never set from caller input.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "talents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nombre: String,
    pub genero: String,
    pub altura: Option<String>,
    pub experiencia: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub rating: f64,
    pub tags: Json,
    pub fotos: Json,
    pub foto: Option<String>,
    pub active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Decode a JSON column into a string list; null/absent/malformed
/// normalizes to an empty list.
fn string_list(value: Json) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

impl From<Model> for Talent {
    fn from(m: Model) -> Self {
        Talent {
            id: m.id,
            // Rows hold only the fixed catalog values; Dama is the form
            // default, so it doubles as the decode fallback
            genero: Genero::parse(&m.genero).unwrap_or(Genero::Dama),
            nombre: m.nombre,
            altura: m.altura,
            experiencia: m.experiencia,
            especialidad: m.especialidad,
            descripcion: m.descripcion,
            rating: m.rating,
            tags: string_list(m.tags),
            fotos: string_list(m.fotos),
            active: m.active,
            created_at: m.created_at,
        }
    }
}

impl From<Model> for TalentSummary {
    fn from(m: Model) -> Self {
        TalentSummary {
            id: m.id,
            genero: Genero::parse(&m.genero).unwrap_or(Genero::Dama),
            nombre: m.nombre,
            especialidad: m.especialidad,
        }
    }
}

impl From<Model> for TalentActivity {
    fn from(m: Model) -> Self {
        TalentActivity {
            id: m.id,
            nombre: m.nombre,
            created_at: m.created_at,
            active: m.active,
        }
    }
}
