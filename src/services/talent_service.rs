//! Talent record service - create/update/delete orchestration.
//!
//! Owns photo reconciliation and persistence sequencing for the talent
//! lifecycle. Field validation happened in the API layer before any of
//! these methods run; the two collaborators (record store, photo store)
//! are injected as traits.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::photo::{self, NewPhoto};
use crate::domain::{CatalogFilter, Talent, TalentDraft, TalentSummary, TalentUpdate};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::events::{EventBus, TalentEvent};
use crate::infra::{PhotoStorage, TalentRecord, TalentRepository};
use crate::types::PaginationParams;

/// Talent record service trait for dependency injection.
#[async_trait]
pub trait TalentService: Send + Sync {
    /// Upload new photos, insert one record with active = true, publish
    /// a registration event, return the new id.
    async fn create(&self, draft: TalentDraft) -> AppResult<Uuid>;

    /// Fetch one record (edit-form prefill)
    async fn get(&self, id: Uuid) -> AppResult<Talent>;

    /// Filtered catalog page, newest first, with total count
    async fn list(
        &self,
        filter: CatalogFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Talent>, u64)>;

    /// Global search over nombre, especialidad, and tags
    async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<TalentSummary>>;

    /// Upload new photos, append them after the retained existing URLs,
    /// persist all editable fields. `active` is never touched here.
    async fn update(&self, id: Uuid, update: TalentUpdate) -> AppResult<()>;

    /// Best-effort photo cleanup, then physical record deletion.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Flip the active flag, persisting only that field; returns the
    /// new value.
    async fn toggle_status(&self, id: Uuid, current_active: bool) -> AppResult<bool>;
}

/// Concrete implementation of [`TalentService`].
pub struct TalentManager {
    repo: Arc<dyn TalentRepository>,
    storage: Arc<dyn PhotoStorage>,
    bus: Arc<EventBus>,
}

impl TalentManager {
    pub fn new(
        repo: Arc<dyn TalentRepository>,
        storage: Arc<dyn PhotoStorage>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self { repo, storage, bus }
    }

    /// Upload photos strictly sequentially, in input order (order
    /// determines the fotos array, and a failure must stop the
    /// remaining uploads deterministically).
    ///
    /// Returns public URLs and storage keys in upload order. When one
    /// upload fails, files already stored in this call are removed
    /// best-effort so an aborted operation leaks nothing, and the
    /// failing file's error is surfaced.
    async fn upload_photos(&self, photos: Vec<NewPhoto>) -> AppResult<(Vec<String>, Vec<String>)> {
        let mut urls = Vec::with_capacity(photos.len());
        let mut keys = Vec::with_capacity(photos.len());

        for photo in photos {
            let key = photo::storage_key(&photo.file_name);
            match self.storage.upload(&key, photo.bytes).await {
                Ok(url) => {
                    urls.push(url);
                    keys.push(key);
                }
                Err(e) => {
                    self.discard_uploads(&keys, "upload aborted").await;
                    return Err(match e {
                        AppError::Upload(msg) => {
                            AppError::upload(format!("{}: {}", photo.file_name, msg))
                        }
                        other => other,
                    });
                }
            }
        }

        Ok((urls, keys))
    }

    /// Best-effort removal of keys uploaded earlier in a failed
    /// operation. Never masks the original error.
    async fn discard_uploads(&self, keys: &[String], reason: &str) {
        if keys.is_empty() {
            return;
        }
        if let Err(e) = self.storage.remove(keys).await {
            tracing::warn!(error = %e, count = keys.len(), "{reason}: discarding uploaded photos failed");
        }
    }
}

#[async_trait]
impl TalentService for TalentManager {
    async fn create(&self, draft: TalentDraft) -> AppResult<Uuid> {
        let (fotos, keys) = self.upload_photos(draft.new_photos).await?;

        let record = TalentRecord {
            nombre: draft.nombre,
            genero: draft.genero,
            altura: draft.altura,
            experiencia: draft.experiencia,
            especialidad: draft.especialidad,
            descripcion: draft.descripcion,
            rating: draft.rating,
            tags: draft.tags,
            fotos,
        };

        let talent = match self.repo.insert(record).await {
            Ok(talent) => talent,
            Err(e) => {
                // No partial visible state: the record never existed,
                // so its photos should not either
                self.discard_uploads(&keys, "insert failed").await;
                return Err(e);
            }
        };

        tracing::info!(talent_id = %talent.id, nombre = %talent.nombre, "talent registered");
        self.bus.publish(TalentEvent::Registered(talent.clone().into()));

        Ok(talent.id)
    }

    async fn get(&self, id: Uuid) -> AppResult<Talent> {
        self.repo.fetch(id).await?.ok_or_not_found()
    }

    async fn list(
        &self,
        filter: CatalogFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Talent>, u64)> {
        self.repo.list(filter, page).await
    }

    async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<TalentSummary>> {
        self.repo.search(query, limit).await
    }

    async fn update(&self, id: Uuid, update: TalentUpdate) -> AppResult<()> {
        let (new_urls, new_keys) = self.upload_photos(update.new_photos).await?;

        // Retained photos keep their curation order; new uploads are
        // appended, never interleaved
        let fotos = photo::reconcile(update.existing_photos, new_urls);

        let record = TalentRecord {
            nombre: update.nombre,
            genero: update.genero,
            altura: update.altura,
            experiencia: update.experiencia,
            especialidad: update.especialidad,
            descripcion: update.descripcion,
            rating: update.rating,
            tags: update.tags,
            fotos,
        };

        if let Err(e) = self.repo.update(id, record).await {
            // A failed update must leave no visible mutation; the fresh
            // uploads would otherwise be orphaned
            self.discard_uploads(&new_keys, "update failed").await;
            return Err(e);
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        // Never delete a record whose photo list is unknown: storage
        // cleanup would be skipped silently
        let talent = self.repo.fetch(id).await?.ok_or_not_found()?;

        let keys: Vec<String> = talent
            .fotos
            .iter()
            .filter_map(|url| photo::storage_key_from_url(url))
            .collect();

        if !keys.is_empty() {
            // Cleanup warning only: record deletion must not be blocked
            // by storage inconsistency
            if let Err(e) = self.storage.remove(&keys).await {
                tracing::warn!(error = %e, talent_id = %id, "photo cleanup failed, deleting record anyway");
            }
        }

        self.repo.delete(id).await?;
        tracing::info!(talent_id = %id, "talent deleted");
        Ok(())
    }

    async fn toggle_status(&self, id: Uuid, current_active: bool) -> AppResult<bool> {
        let new_active = !current_active;
        self.repo.set_active(id, new_active).await?;
        tracing::info!(talent_id = %id, active = new_active, "talent status toggled");
        Ok(new_active)
    }
}
