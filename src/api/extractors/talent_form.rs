//! Multipart form extractor for talent create/update.
//!
//! The admin UI submits one `multipart/form-data` body carrying the
//! text fields, the retained photo URLs (`existing_fotos`, repeated)
//! and the new photo files (`fotos`, repeated). Field-level validation
//! happens here so handlers only ever see well-formed input.

use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
};
use validator::ValidationError;

use crate::domain::photo::NewPhoto;
use crate::domain::{
    parse_rating, parse_tags, validate_altura, validate_nombre, validate_rating, Genero,
    TalentDraft, TalentUpdate,
};
use crate::errors::{AppError, AppResult};

/// Parsed and validated talent form.
#[derive(Debug, Default)]
pub struct TalentForm {
    pub nombre: String,
    pub genero: Option<Genero>,
    pub altura: Option<String>,
    pub experiencia: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub rating: f64,
    pub tags: Vec<String>,
    /// Stored URLs the caller keeps, in curation order
    pub existing_photos: Vec<String>,
    /// Fresh uploads, in submission order
    pub new_photos: Vec<NewPhoto>,
}

impl TalentForm {
    /// Create input: at least one photo is required so a record never
    /// starts without a primary.
    pub fn into_draft(self) -> AppResult<TalentDraft> {
        if self.new_photos.is_empty() {
            return Err(AppError::validation("Debe subir al menos una foto"));
        }
        let genero = self.required_genero()?;

        Ok(TalentDraft {
            nombre: self.nombre,
            genero,
            altura: self.altura,
            experiencia: self.experiencia,
            especialidad: self.especialidad,
            descripcion: self.descripcion,
            rating: self.rating,
            tags: self.tags,
            new_photos: self.new_photos,
        })
    }

    /// Update input: the combined photo list must stay non-empty.
    pub fn into_update(self) -> AppResult<TalentUpdate> {
        if self.existing_photos.is_empty() && self.new_photos.is_empty() {
            return Err(AppError::validation("Debe conservar o subir al menos una foto"));
        }
        let genero = self.required_genero()?;

        Ok(TalentUpdate {
            nombre: self.nombre,
            genero,
            altura: self.altura,
            experiencia: self.experiencia,
            especialidad: self.especialidad,
            descripcion: self.descripcion,
            rating: self.rating,
            tags: self.tags,
            existing_photos: self.existing_photos,
            new_photos: self.new_photos,
        })
    }

    fn required_genero(&self) -> AppResult<Genero> {
        self.genero
            .ok_or_else(|| AppError::validation("Género inválido (dama o caballero)"))
    }
}

#[async_trait]
impl<S> FromRequest<S> for TalentForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let mut form = TalentForm::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_part)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "fotos" => {
                    let file_name = field
                        .file_name()
                        .filter(|n| !n.is_empty())
                        .unwrap_or("foto")
                        .to_owned();
                    let bytes = field.bytes().await.map_err(bad_part)?.to_vec();
                    // Browsers submit an empty part when the file input
                    // was left blank
                    if !bytes.is_empty() {
                        form.new_photos.push(NewPhoto { file_name, bytes });
                    }
                }
                "existing_fotos" => {
                    let url = field.text().await.map_err(bad_part)?;
                    if !url.trim().is_empty() {
                        form.existing_photos.push(url.trim().to_owned());
                    }
                }
                "nombre" => form.nombre = field.text().await.map_err(bad_part)?.trim().to_owned(),
                "genero" => {
                    let raw = field.text().await.map_err(bad_part)?;
                    form.genero = Genero::parse(&raw);
                }
                "altura" => form.altura = optional(field.text().await.map_err(bad_part)?),
                "experiencia" => form.experiencia = optional(field.text().await.map_err(bad_part)?),
                "especialidad" => {
                    form.especialidad = optional(field.text().await.map_err(bad_part)?)
                }
                "descripcion" => form.descripcion = optional(field.text().await.map_err(bad_part)?),
                "rating" => {
                    let raw = field.text().await.map_err(bad_part)?;
                    check(validate_rating(&raw))?;
                    form.rating = parse_rating(&raw);
                }
                "tags" => form.tags = parse_tags(&field.text().await.map_err(bad_part)?),
                // Unknown fields are ignored, the UI evolves independently
                _ => {}
            }
        }

        check(validate_nombre(&form.nombre))?;
        if let Some(altura) = &form.altura {
            check(validate_altura(altura))?;
        }

        Ok(form)
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn bad_part(e: MultipartError) -> AppError {
    AppError::validation(e.body_text())
}

fn check(result: Result<(), ValidationError>) -> AppResult<()> {
    result.map_err(|e| {
        let message = e
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| e.code.to_string());
        AppError::validation(message)
    })
}
