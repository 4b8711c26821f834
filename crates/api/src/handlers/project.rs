//! Handlers for the `/projects` resource.
//!
//! The organization scope always comes from the authenticated principal.

use axum::extract::State;
use axum::http::StatusCode;
use baralga_db::models::project::{CreateProject, Project, ProjectsPaged, UpdateProject};
use baralga_db::repositories::ProjectRepo;
use uuid::Uuid;

use crate::error::AppResult;
use crate::extractors::{IdPath, Paging, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::JsonBody;
use crate::state::AppState;

/// GET /api/v1/projects?page=&size=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Paging(page): Paging,
) -> AppResult<JsonBody<ProjectsPaged>> {
    let projects = ProjectRepo::find_projects(&state.pool, user.org_id, &page).await?;
    Ok(JsonBody(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<JsonBody<Project>> {
    let project = ProjectRepo::find_project_by_id(&state.pool, user.org_id, id).await?;
    Ok(JsonBody(project))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, JsonBody<Project>)> {
    let project = input.into_project(Uuid::new_v4(), user.org_id);
    let project = ProjectRepo::insert_project(&state.pool, &project).await?;

    tracing::info!(
        project_id = %project.id,
        org_id = %user.org_id,
        user_id = %user.user_id,
        "Project created"
    );
    Ok((StatusCode::CREATED, JsonBody(project)))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<JsonBody<Project>> {
    let project = input.into_project(id, user.org_id);
    let project = ProjectRepo::update_project(&state.pool, user.org_id, &project).await?;

    tracing::info!(
        project_id = %id,
        org_id = %user.org_id,
        user_id = %user.user_id,
        "Project updated"
    );
    Ok(JsonBody(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Also removes every activity booked on the project.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    ProjectRepo::delete_project_by_id(&state.pool, user.org_id, id).await?;

    tracing::info!(
        project_id = %id,
        org_id = %user.org_id,
        user_id = %user.user_id,
        "Project deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
