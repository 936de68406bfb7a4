//! Project API endpoints.

use api_types::MessageResponse;
use api_types::project::{
    BudgetWithTransactions, LinkClient, ProjectBudgetsResponse, ProjectCreatedResponse,
    ProjectNew, ProjectView, ProjectsResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{ServerError, budgets, server::ServerState, user};

pub(crate) fn project_view(project: &engine::Project) -> ProjectView {
    ProjectView {
        id: project.id,
        project_name: project.project_name.clone(),
        owner_name: project.owner_name.clone(),
        builder_id: project.builder_id.clone(),
        client_id: project.client_id.clone(),
        location: project.location.clone(),
        start_date: project.start_date,
        end_date: project.end_date,
        status: project.status.as_str().to_string(),
        is_visible: project.is_visible,
        created_at: project.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ProjectNew>,
) -> Result<(StatusCode, Json<ProjectCreatedResponse>), ServerError> {
    let status = match payload.status.as_deref() {
        Some(raw) => engine::ProjectStatus::try_from(raw)?,
        None => engine::ProjectStatus::default(),
    };

    let (project, budget) = state
        .engine
        .create_project(engine::CreateProjectCmd {
            project_name: payload.project_name,
            owner_name: payload.owner_name,
            builder_id: user.username.clone(),
            location: payload.location,
            start_date: payload.start_date,
            end_date: payload.end_date,
            status,
            budget_minor: payload.budget_minor,
            created_at: Utc::now(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectCreatedResponse {
            message: "project created successfully".to_string(),
            project: project_view(&project),
            budget: budgets::budget_view(&budget),
        }),
    ))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ProjectsResponse>, ServerError> {
    let projects = state.engine.projects(&user.username).await?;

    Ok(Json(ProjectsResponse {
        projects: projects.iter().map(project_view).collect(),
    }))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.engine.delete_project(id, &user.username).await?;

    Ok(Json(MessageResponse {
        message: "project deleted".to_string(),
    }))
}

pub async fn link_client(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkClient>,
) -> Result<Json<MessageResponse>, ServerError> {
    let client = user::Entity::find_by_id(payload.client_id.trim())
        .one(&state.db)
        .await
        .map_err(|err| ServerError::Engine(err.into()))?;
    if client.is_none() {
        return Err(ServerError::Engine(engine::EngineError::KeyNotFound(
            "client not exists".to_string(),
        )));
    }

    let (_, notification) = state
        .engine
        .link_client(id, &user.username, &payload.client_id, Utc::now())
        .await?;
    state
        .notifier
        .dispatch(&notification.user_id, &notification.message);

    Ok(Json(MessageResponse {
        message: "client invited".to_string(),
    }))
}

/// The budget view consumed by the mobile client. Served without auth and
/// without a visibility gate; soft-deleted projects remain readable.
pub async fn get_budgets(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectBudgetsResponse>, ServerError> {
    let (project, budget_entries) = state.engine.project_budgets(id).await?;

    let budget_views = budget_entries
        .iter()
        .map(|(budget, transactions)| BudgetWithTransactions {
            budget: budgets::budget_view(budget),
            transactions: transactions.iter().map(budgets::transaction_view).collect(),
        })
        .collect();

    Ok(Json(ProjectBudgetsResponse {
        project: project_view(&project),
        budgets: budget_views,
    }))
}
