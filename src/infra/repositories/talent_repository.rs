//! Talent repository - relational record store access.
//!
//! The trait is the contract the record service depends on; `TalentStore`
//! is the SeaORM implementation. The derived `foto` column is recomputed
//! here on every insert/update so no caller can set it independently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Condition, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::talent::{self, Entity as TalentEntity};
use crate::domain::{CatalogFilter, Genero, Talent, TalentActivity, TalentSummary};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Write payload shared by insert and update. `fotos` is the final,
/// already-reconciled photo list; `active` is absent on purpose (it is
/// set to true at insert and only ever changed via `set_active`).
#[derive(Debug, Clone)]
pub struct TalentRecord {
    pub nombre: String,
    pub genero: Genero,
    pub altura: Option<String>,
    pub experiencia: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub rating: f64,
    pub tags: Vec<String>,
    pub fotos: Vec<String>,
}

/// Record store contract for talent rows.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TalentRepository: Send + Sync {
    /// Insert a new record (id and created_at assigned here, active = true)
    async fn insert(&self, record: TalentRecord) -> AppResult<Talent>;

    /// Fetch one record by id
    async fn fetch(&self, id: Uuid) -> AppResult<Option<Talent>>;

    /// Overwrite all editable fields; NotFound when zero rows match
    async fn update(&self, id: Uuid, record: TalentRecord) -> AppResult<()>;

    /// Persist only the active flag
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()>;

    /// Physically delete the record; NotFound when zero rows match
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Filtered catalog page, newest first, with total count
    async fn list(
        &self,
        filter: CatalogFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Talent>, u64)>;

    /// Case-insensitive match on nombre/especialidad, or exact tag match
    async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<TalentSummary>>;

    /// Newest registrations (notifications seed / activity feed seed)
    async fn recent(&self, limit: u64) -> AppResult<Vec<TalentActivity>>;

    async fn count_all(&self) -> AppResult<u64>;
    async fn count_active(&self) -> AppResult<u64>;
    async fn count_rated_at_least(&self, threshold: f64) -> AppResult<u64>;
    async fn count_created_since(&self, since: DateTime<Utc>) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`TalentRepository`].
pub struct TalentStore {
    db: DatabaseConnection,
}

impl TalentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Build the shared field assignments for a write, including the
/// recomputed `foto` column.
fn active_model_for(record: TalentRecord) -> talent::ActiveModel {
    let foto = record.fotos.first().cloned();
    talent::ActiveModel {
        nombre: Set(record.nombre),
        genero: Set(record.genero.to_string()),
        altura: Set(record.altura),
        experiencia: Set(record.experiencia),
        especialidad: Set(record.especialidad),
        descripcion: Set(record.descripcion),
        rating: Set(record.rating),
        tags: Set(serde_json::json!(record.tags)),
        fotos: Set(serde_json::json!(record.fotos)),
        foto: Set(foto),
        ..Default::default()
    }
}

#[async_trait]
impl TalentRepository for TalentStore {
    async fn insert(&self, record: TalentRecord) -> AppResult<Talent> {
        let mut model = active_model_for(record);
        model.id = Set(Uuid::new_v4());
        model.active = Set(true);
        model.created_at = Set(Utc::now());

        let inserted = model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Talent::from(inserted))
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Talent>> {
        let row = TalentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(row.map(Talent::from))
    }

    async fn update(&self, id: Uuid, record: TalentRecord) -> AppResult<()> {
        let result = TalentEntity::update_many()
            .set(active_model_for(record))
            .filter(talent::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()> {
        let result = TalentEntity::update_many()
            .col_expr(talent::Column::Active, Expr::value(active))
            .filter(talent::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = TalentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: CatalogFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Talent>, u64)> {
        let mut query = TalentEntity::find().order_by_desc(talent::Column::CreatedAt);

        if !filter.include_inactive {
            query = query.filter(talent::Column::Active.eq(true));
        }
        if let Some(genero) = filter.genero {
            query = query.filter(talent::Column::Genero.eq(genero.to_string()));
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(page.page().saturating_sub(1))
            .await
            .map_err(AppError::from)?;

        Ok((rows.into_iter().map(Talent::from).collect(), total))
    }

    async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<TalentSummary>> {
        let pattern = format!("%{}%", query.to_lowercase());
        let condition = Condition::any()
            .add(Expr::expr(Func::lower(Expr::col(talent::Column::Nombre))).like(pattern.as_str()))
            .add(Expr::expr(Func::lower(Expr::col(talent::Column::Especialidad))).like(pattern.as_str()))
            .add(Expr::cust_with_values(
                "tags @> ?",
                [serde_json::json!([query])],
            ));

        let rows = TalentEntity::find()
            .filter(condition)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(TalentSummary::from).collect())
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<TalentActivity>> {
        let rows = TalentEntity::find()
            .order_by_desc(talent::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(TalentActivity::from).collect())
    }

    async fn count_all(&self) -> AppResult<u64> {
        TalentEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_active(&self) -> AppResult<u64> {
        TalentEntity::find()
            .filter(talent::Column::Active.eq(true))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_rated_at_least(&self, threshold: f64) -> AppResult<u64> {
        TalentEntity::find()
            .filter(talent::Column::Rating.gte(threshold))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> AppResult<u64> {
        TalentEntity::find()
            .filter(talent::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
