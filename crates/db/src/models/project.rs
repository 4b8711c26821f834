//! Project entity model and DTOs.

use baralga_core::paging::Page;
use baralga_core::types::{DbId, OrgId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A project owned by one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: DbId,
    pub organization_id: OrgId,
    pub title: String,
    /// Empty when the stored column is NULL.
    pub description: String,
    pub active: bool,
}

/// A row from the `projects` table as stored.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub project_id: DbId,
    pub org_id: OrgId,
    pub title: String,
    pub description: Option<String>,
    pub active: bool,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.project_id,
            organization_id: row.org_id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            active: row.active,
        }
    }
}

/// One page of an organization's projects, ordered by title.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectsPaged {
    pub projects: Vec<Project>,
    pub page: Page,
}

/// DTO for creating a new project. The identifier is assigned by the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

impl CreateProject {
    /// Bind the payload to a freshly minted id and the caller's organization.
    pub fn into_project(self, id: DbId, organization_id: OrgId) -> Project {
        Project {
            id,
            organization_id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            active: self.active.unwrap_or(true),
        }
    }
}

/// DTO for a full-field project update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(max = 4000))]
    #[serde(default)]
    pub description: String,
    pub active: bool,
}

impl UpdateProject {
    pub fn into_project(self, id: DbId, organization_id: OrgId) -> Project {
        Project {
            id,
            organization_id,
            title: self.title,
            description: self.description,
            active: self.active,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn row(description: Option<&str>) -> ProjectRow {
        ProjectRow {
            project_id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            title: "Alpha".to_string(),
            description: description.map(str::to_string),
            active: true,
        }
    }

    #[test]
    fn null_description_maps_to_empty_string() {
        let project = Project::from(row(None));
        assert_eq!(project.description, "");
    }

    #[test]
    fn row_fields_are_carried_over() {
        let source = row(Some("billable"));
        let project = Project::from(source.clone());
        assert_eq!(project.id, source.project_id);
        assert_eq!(project.organization_id, source.org_id);
        assert_eq!(project.title, "Alpha");
        assert_eq!(project.description, "billable");
        assert!(project.active);
    }

    #[test]
    fn create_defaults_to_active_with_empty_description() {
        let input = CreateProject {
            title: "Alpha".to_string(),
            description: None,
            active: None,
        };
        let project = input.into_project(Uuid::new_v4(), Uuid::new_v4());
        assert!(project.active);
        assert_eq!(project.description, "");
    }

    #[test]
    fn blank_title_is_rejected() {
        let input = UpdateProject {
            title: "   ".to_string(),
            description: String::new(),
            active: true,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let input = CreateProject {
            title: "x".repeat(101),
            description: None,
            active: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn valid_update_passes() {
        let input = UpdateProject {
            title: "Alpha2".to_string(),
            description: "x".to_string(),
            active: false,
        };
        assert!(input.validate().is_ok());
    }
}
