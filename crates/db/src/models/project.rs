//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webbuilder_core::project::{DEFAULT_PREVIEW_URL, DEFAULT_PROJECT_NAME};
use webbuilder_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
///
/// `file_content` is deliberately absent: it is written on create and never
/// read back.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub preview_url: String,
    pub published: Option<bool>,
    pub published_url: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
///
/// Every field may be omitted or `null`; the accessors fall back to the
/// placeholder values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    pub preview_url: Option<String>,
    pub file_content: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
}

impl CreateProject {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }

    pub fn preview_url(&self) -> &str {
        self.preview_url.as_deref().unwrap_or(DEFAULT_PREVIEW_URL)
    }

    pub fn file_content(&self) -> &str {
        self.file_content.as_deref().unwrap_or_default()
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or_default()
    }

    pub fn file_size(&self) -> i64 {
        self.file_size.unwrap_or(0)
    }
}

/// DTO for updating an existing project. All fields are optional.
///
/// `None` (absent or `null` in JSON) leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub published: Option<bool>,
    pub published_url: Option<String>,
}

impl UpdateProject {
    /// True when no field would change; only `updated_at` is bumped.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.published.is_none() && self.published_url.is_none()
    }
}
