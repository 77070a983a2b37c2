//! Talent catalog handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{TalentForm, ValidatedJson};
use crate::api::AppState;
use crate::config::{MIN_SEARCH_QUERY_LENGTH, SEARCH_RESULT_LIMIT};
use crate::domain::{CatalogFilter, Genero, TalentResponse, TalentSummary};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent, Paginated, PaginationParams};

/// Catalog listing filters
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct CatalogQuery {
    /// Filter by genero (dama | caballero)
    pub genero: Option<String>,
    /// Include deactivated records (admin catalog)
    #[serde(default)]
    pub include_inactive: bool,
}

/// Global search query
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    pub q: String,
}

/// Status toggle request carrying the flag as currently rendered
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ToggleStatusRequest {
    /// Current active value shown to the operator
    pub active: bool,
}

/// New status after a toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleStatusResponse {
    pub id: Uuid,
    pub active: bool,
}

/// Id returned by a create
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedTalent {
    pub id: Uuid,
}

/// Create talent catalog routes
pub fn talent_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_talents).post(create_talent))
        .route("/search", get(search_talents))
        .route(
            "/:id",
            get(get_talent).put(update_talent).delete(delete_talent),
        )
        .route("/:id/status", post(toggle_status))
}

/// List the catalog, newest first
#[utoipa::path(
    get,
    path = "/talents",
    tag = "Talents",
    params(CatalogQuery, PaginationParams),
    responses(
        (status = 200, description = "Paginated catalog")
    )
)]
pub async fn list_talents(
    State(state): State<AppState>,
    Query(filter): Query<CatalogQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<TalentResponse>>> {
    let filter = CatalogFilter {
        genero: filter.genero.as_deref().and_then(Genero::parse),
        include_inactive: filter.include_inactive,
    };

    let (talents, total) = state.talent_service.list(filter, page.clone()).await?;
    let data = talents.into_iter().map(TalentResponse::from).collect();

    Ok(Json(Paginated::new(data, page.page(), page.limit(), total)))
}

/// Global search over nombre, especialidad, and tags
#[utoipa::path(
    get,
    path = "/talents/search",
    tag = "Talents",
    params(SearchQuery),
    responses(
        (status = 200, description = "Top matches, empty for short queries")
    )
)]
pub async fn search_talents(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<TalentSummary>>>> {
    let q = query.q.trim();

    // Queries under the minimum return an empty result, not an error:
    // the search box fires on every keystroke
    if q.chars().count() < MIN_SEARCH_QUERY_LENGTH {
        return Ok(Json(ApiResponse::success(Vec::new())));
    }

    let matches = state.talent_service.search(q, SEARCH_RESULT_LIMIT).await?;
    Ok(Json(ApiResponse::success(matches)))
}

/// Fetch one record
#[utoipa::path(
    get,
    path = "/talents/{id}",
    tag = "Talents",
    params(("id" = Uuid, Path, description = "Talent id")),
    responses(
        (status = 200, description = "Talent record"),
        (status = 404, description = "Unknown id")
    )
)]
pub async fn get_talent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TalentResponse>>> {
    let talent = state.talent_service.get(id).await?;
    Ok(Json(ApiResponse::success(talent.into())))
}

/// Register a talent (multipart: fields + photo files)
#[utoipa::path(
    post,
    path = "/talents",
    tag = "Talents",
    responses(
        (status = 201, description = "Talent registered", body = CreatedTalent),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Photo upload failed")
    )
)]
pub async fn create_talent(
    State(state): State<AppState>,
    form: TalentForm,
) -> AppResult<Created<CreatedTalent>> {
    let draft = form.into_draft()?;
    let id = state.talent_service.create(draft).await?;
    Ok(Created(CreatedTalent { id }))
}

/// Update a talent (multipart: fields + retained URLs + new files)
#[utoipa::path(
    put,
    path = "/talents/{id}",
    tag = "Talents",
    params(("id" = Uuid, Path, description = "Talent id")),
    responses(
        (status = 200, description = "Talent updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown id"),
        (status = 502, description = "Photo upload failed")
    )
)]
pub async fn update_talent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form: TalentForm,
) -> AppResult<Json<ApiResponse<()>>> {
    let update = form.into_update()?;
    state.talent_service.update(id, update).await?;
    Ok(Json(ApiResponse::message("Talento actualizado")))
}

/// Delete a talent record and its stored photos
#[utoipa::path(
    delete,
    path = "/talents/{id}",
    tag = "Talents",
    params(("id" = Uuid, Path, description = "Talent id")),
    responses(
        (status = 204, description = "Talent deleted"),
        (status = 404, description = "Unknown id")
    )
)]
pub async fn delete_talent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.talent_service.delete(id).await?;
    Ok(NoContent)
}

/// Flip the active flag
#[utoipa::path(
    post,
    path = "/talents/{id}/status",
    tag = "Talents",
    params(("id" = Uuid, Path, description = "Talent id")),
    request_body = ToggleStatusRequest,
    responses(
        (status = 200, description = "New status", body = ToggleStatusResponse),
        (status = 404, description = "Unknown id")
    )
)]
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ToggleStatusRequest>,
) -> AppResult<Json<ApiResponse<ToggleStatusResponse>>> {
    let active = state.talent_service.toggle_status(id, payload.active).await?;
    Ok(Json(ApiResponse::success(ToggleStatusResponse {
        id,
        active,
    })))
}
