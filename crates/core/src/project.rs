//! Project defaults and input rules.
//!
//! Placeholder values applied when a create request omits a field, plus the
//! checks run on request input before any SQL is built.

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Entity label used in not-found errors.
pub const ENTITY_PROJECT: &str = "Project";

/// Name given to a project created without one.
pub const DEFAULT_PROJECT_NAME: &str = "Новый проект";

/// Preview image shown until the project has a rendered preview.
pub const DEFAULT_PREVIEW_URL: &str = "/placeholder.svg";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Parse the `id` path parameter.
///
/// Returns `Ok(None)` when the parameter is absent or empty, which callers
/// treat as "no id supplied".
pub fn parse_project_id(raw: Option<&str>) -> Result<Option<DbId>, CoreError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    raw.parse::<DbId>()
        .map(Some)
        .map_err(|_| CoreError::Validation("Invalid project id".to_string()))
}

/// Validate that an uploaded file size is not negative.
pub fn validate_file_size(file_size: i64) -> Result<(), CoreError> {
    if file_size < 0 {
        return Err(CoreError::Validation(format!(
            "file_size must not be negative (got {file_size})"
        )));
    }
    Ok(())
}
