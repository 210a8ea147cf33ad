//! The project request handler.
//!
//! One entry point, [`ProjectHandler::handle`], maps a [`ProjectRequest`] to a
//! single SQL statement and a JSON [`ProjectResponse`]. Each invocation
//! acquires its own pooled connection, which goes back to the pool when the
//! invocation returns, whichever path it takes.

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use sqlx::{Connection, PgConnection};
use webbuilder_core::error::CoreError;
use webbuilder_core::project::{parse_project_id, validate_file_size, ENTITY_PROJECT};
use webbuilder_core::types::DbId;
use webbuilder_db::models::project::{CreateProject, UpdateProject};
use webbuilder_db::repositories::ProjectRepo;
use webbuilder_db::{DatabaseConfig, DbPool};

use crate::error::{AppError, AppResult};
use crate::event::{ProjectRequest, ProjectResponse};

/// Handles project requests against the `projects` table.
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct ProjectHandler {
    pool: DbPool,
}

impl ProjectHandler {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Build a handler with its own lazily-connecting pool.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        webbuilder_db::create_pool(config).map(Self::new)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Serve one request. Never fails: errors become 4xx/5xx responses.
    #[tracing::instrument(
        name = "project_request",
        skip_all,
        fields(method = %request.http_method, project_id = ?request.project_id())
    )]
    pub async fn handle(&self, request: &ProjectRequest) -> ProjectResponse {
        let response = match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => err.into_project_response(),
        };

        if response.status().is_server_error() {
            tracing::error!(status = response.status_code, "Request failed");
        } else {
            tracing::debug!(status = response.status_code, "Request handled");
        }
        response
    }

    async fn dispatch(&self, request: &ProjectRequest) -> AppResult<ProjectResponse> {
        match request.http_method.as_str() {
            "OPTIONS" => Ok(ProjectResponse::preflight()),
            "GET" => {
                let id = parse_project_id(request.project_id())?;
                let mut conn = self.pool.acquire().await?;
                match id {
                    Some(id) => get_project(&mut conn, id).await,
                    None => list_projects(&mut conn).await,
                }
            }
            "POST" => {
                let input: CreateProject = parse_body(request)?;
                validate_file_size(input.file_size())?;
                let mut conn = self.pool.acquire().await?;
                create_project(&mut conn, &input).await
            }
            "PUT" => {
                let id = require_id(request)?;
                let input: UpdateProject = parse_body(request)?;
                let mut conn = self.pool.acquire().await?;
                update_project(&mut conn, id, &input).await
            }
            "DELETE" => {
                let id = require_id(request)?;
                let mut conn = self.pool.acquire().await?;
                delete_project(&mut conn, id).await
            }
            other => Err(AppError::MethodNotAllowed(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

/// Decode the request body into `T`, rejecting malformed JSON with a 400.
fn parse_body<T: DeserializeOwned>(request: &ProjectRequest) -> AppResult<T> {
    serde_json::from_str(request.json_body())
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/// Mutating operations need an id; a missing one is a client error.
fn require_id(request: &ProjectRequest) -> AppResult<DbId> {
    parse_project_id(request.project_id())?
        .ok_or_else(|| AppError::BadRequest("Project id is required".to_string()))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_PROJECT,
        id,
    })
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

async fn list_projects(conn: &mut PgConnection) -> AppResult<ProjectResponse> {
    let projects = ProjectRepo::list(conn).await?;
    tracing::debug!(count = projects.len(), "Listed projects");
    Ok(ProjectResponse::json(
        StatusCode::OK,
        &serde_json::to_value(&projects)?,
    ))
}

async fn get_project(conn: &mut PgConnection, id: DbId) -> AppResult<ProjectResponse> {
    let project = ProjectRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ProjectResponse::json(
        StatusCode::OK,
        &serde_json::to_value(&project)?,
    ))
}

async fn create_project(
    conn: &mut PgConnection,
    input: &CreateProject,
) -> AppResult<ProjectResponse> {
    let mut tx = conn.begin().await?;
    let project = ProjectRepo::create(&mut tx, input).await?;
    tx.commit().await?;

    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok(ProjectResponse::json(
        StatusCode::CREATED,
        &serde_json::to_value(&project)?,
    ))
}

async fn update_project(
    conn: &mut PgConnection,
    id: DbId,
    input: &UpdateProject,
) -> AppResult<ProjectResponse> {
    if input.is_empty() {
        tracing::debug!(project_id = id, "Update carries no fields, touching updated_at only");
    }

    let mut tx = conn.begin().await?;
    let updated = ProjectRepo::update(&mut tx, id, input).await?;
    tx.commit().await?;

    let project = updated.ok_or_else(|| not_found(id))?;
    tracing::info!(project_id = project.id, "Project updated");
    Ok(ProjectResponse::json(
        StatusCode::OK,
        &serde_json::to_value(&project)?,
    ))
}

async fn delete_project(conn: &mut PgConnection, id: DbId) -> AppResult<ProjectResponse> {
    let mut tx = conn.begin().await?;
    let deleted = ProjectRepo::delete(&mut tx, id).await?;
    tx.commit().await?;

    if !deleted {
        return Err(not_found(id));
    }
    tracing::info!(project_id = id, "Project deleted");
    Ok(ProjectResponse::json(
        StatusCode::OK,
        &json!({ "success": true }),
    ))
}
