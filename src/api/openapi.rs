//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{dashboard_handler, talent_handler};
use crate::domain::{Genero, TalentActivity, TalentResponse, TalentSummary};
use crate::services::{DashboardStats, StatsPeriod};

/// OpenAPI documentation for the DashTalent admin backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DashTalent API",
        version = "0.1.0",
        description = "Admin backend for the DashTalent talent catalog",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Talent catalog
        talent_handler::list_talents,
        talent_handler::search_talents,
        talent_handler::get_talent,
        talent_handler::create_talent,
        talent_handler::update_talent,
        talent_handler::delete_talent,
        talent_handler::toggle_status,
        // Dashboard
        dashboard_handler::stats,
        dashboard_handler::activity,
        dashboard_handler::events,
    ),
    components(
        schemas(
            Genero,
            TalentResponse,
            TalentSummary,
            TalentActivity,
            StatsPeriod,
            DashboardStats,
            talent_handler::ToggleStatusRequest,
            talent_handler::ToggleStatusResponse,
            talent_handler::CreatedTalent,
        )
    ),
    tags(
        (name = "Talents", description = "Talent record management"),
        (name = "Dashboard", description = "Catalog stats and activity")
    )
)]
pub struct ApiDoc;
