//! Repository for the `projects` table.
//!
//! Every query is keyed by the caller's organization as well as the project
//! id, so a project is invisible to other organizations.

use baralga_core::paging::PageParams;
use baralga_core::types::{DbId, OrgId};
use sqlx::PgPool;

use crate::error::{rollback_with, RepoError};
use crate::models::project::{Project, ProjectRow, ProjectsPaged};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "project_id, org_id, title, description, active";

/// Provides organization-scoped CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List one page of an organization's projects, ordered by title.
    ///
    /// An empty or out-of-range page is not an error; the page metadata still
    /// reports the organization's total.
    pub async fn find_projects(
        pool: &PgPool,
        org_id: OrgId,
        page: &PageParams,
    ) -> Result<ProjectsPaged, RepoError> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE org_id = $1
             ORDER BY title ASC, project_id ASC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(org_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT count(*) FROM projects WHERE org_id = $1")
            .bind(org_id)
            .fetch_one(pool)
            .await?;

        Ok(ProjectsPaged {
            projects: rows.into_iter().map(Project::from).collect(),
            page: page.page_of_total(total),
        })
    }

    /// Fetch the projects among `project_ids` that belong to the organization.
    ///
    /// Unknown and foreign ids are silently skipped.
    pub async fn find_projects_by_ids(
        pool: &PgPool,
        org_id: OrgId,
        project_ids: &[DbId],
    ) -> Result<Vec<Project>, RepoError> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE org_id = $1 AND project_id = ANY($2)
             ORDER BY title ASC, project_id ASC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(org_id)
            .bind(project_ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Find a project by id within the organization.
    pub async fn find_project_by_id(
        pool: &PgPool,
        org_id: OrgId,
        project_id: DbId,
    ) -> Result<Project, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE project_id = $1 AND org_id = $2");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(project_id)
            .bind(org_id)
            .fetch_optional(pool)
            .await?
            .map(Project::from)
            .ok_or(RepoError::ProjectNotFound)
    }

    /// Insert a fully populated project, returning it unchanged.
    pub async fn insert_project(pool: &PgPool, project: &Project) -> Result<Project, RepoError> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO projects (project_id, title, active, description, org_id)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(project.active)
        .bind(&project.description)
        .bind(project.organization_id)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            return Err(rollback_with(tx, err.into()).await);
        }

        tx.commit().await?;
        Ok(project.clone())
    }

    /// Overwrite title, description and active flag of a project.
    ///
    /// `org_id` is authoritative; the organization carried by `project` is
    /// ignored. Returns the input unchanged on success.
    pub async fn update_project(
        pool: &PgPool,
        org_id: OrgId,
        project: &Project,
    ) -> Result<Project, RepoError> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE projects
             SET title = $3, description = $4, active = $5
             WHERE project_id = $1 AND org_id = $2
             RETURNING project_id",
        )
        .bind(project.id)
        .bind(org_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.active)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(_) => Ok(project.clone()),
            None => Err(RepoError::ProjectNotFound),
        }
    }

    /// Delete a project together with all of its activities.
    ///
    /// Both deletes run in one transaction; nothing is removed unless the
    /// project row itself is.
    pub async fn delete_project_by_id(
        pool: &PgPool,
        org_id: OrgId,
        project_id: DbId,
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;

        let activities = sqlx::query("DELETE FROM activities WHERE project_id = $1 AND org_id = $2")
            .bind(project_id)
            .bind(org_id)
            .execute(&mut *tx)
            .await;

        if let Err(err) = activities {
            return Err(rollback_with(tx, err.into()).await);
        }

        let deleted: Result<Option<DbId>, sqlx::Error> = sqlx::query_scalar(
            "DELETE FROM projects
             WHERE project_id = $1 AND org_id = $2
             RETURNING project_id",
        )
        .bind(project_id)
        .bind(org_id)
        .fetch_optional(&mut *tx)
        .await;

        match deleted {
            Ok(Some(id)) if id == project_id => {}
            // The key is part of the WHERE clause, so a different id means
            // the schema no longer guarantees what this method assumes.
            Ok(Some(_)) | Ok(None) => {
                return Err(rollback_with(tx, RepoError::ProjectNotFound).await);
            }
            Err(err) => return Err(rollback_with(tx, err.into()).await),
        }

        tx.commit().await?;
        Ok(())
    }
}
