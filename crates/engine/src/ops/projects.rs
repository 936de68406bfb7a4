//! Project lifecycle operations.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    Budget, EngineError, Money, Notification, Project, ProjectStatus, ResultEngine, budgets,
    notifications, projects,
};

use super::{Engine, normalize_required_text, with_tx};

/// Inputs for [`Engine::create_project`].
pub struct CreateProjectCmd {
    pub project_name: String,
    pub owner_name: String,
    pub builder_id: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    /// Allocated amount of the initial budget, in paisa.
    pub budget_minor: i64,
    pub created_at: DateTime<Utc>,
}

impl Engine {
    /// Creates a project together with its initial budget.
    ///
    /// The budget starts fully funded (`in_hand = amount`). Project names are
    /// unique among visible projects, compared case-insensitively.
    pub async fn create_project(&self, cmd: CreateProjectCmd) -> ResultEngine<(Project, Budget)> {
        let project_name = normalize_required_text(&cmd.project_name, "project name")?;
        let owner_name = normalize_required_text(&cmd.owner_name, "owner name")?;
        let location = normalize_required_text(&cmd.location, "location")?;
        if cmd.budget_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "budget_minor must be > 0".to_string(),
            ));
        }
        if cmd.end_date < cmd.start_date {
            return Err(EngineError::InvalidAmount(
                "end_date must not precede start_date".to_string(),
            ));
        }

        let name_lower = project_name.to_lowercase();
        with_tx!(self, |db_tx| {
            let existing = projects::Entity::find()
                .filter(projects::Column::IsVisible.eq(true))
                .filter(Expr::cust("LOWER(project_name)").eq(name_lower.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(project_name.clone()));
            }

            let project = Project::new(
                project_name.clone(),
                owner_name.clone(),
                cmd.builder_id.clone(),
                location.clone(),
                cmd.start_date,
                cmd.end_date,
                cmd.status,
                cmd.created_at,
            );
            projects::ActiveModel::from(&project).insert(&db_tx).await?;

            let budget = Budget::new(project.id, Money::new(cmd.budget_minor), cmd.created_at);
            budgets::ActiveModel::from(&budget).insert(&db_tx).await?;

            Ok((project, budget))
        })
    }

    /// Lists the builder's visible projects, newest first.
    pub async fn projects(&self, builder_id: &str) -> ResultEngine<Vec<Project>> {
        let models = projects::Entity::find()
            .filter(projects::Column::BuilderId.eq(builder_id))
            .filter(projects::Column::IsVisible.eq(true))
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Project::try_from(model)?);
        }
        Ok(out)
    }

    /// Soft-deletes a project by flipping its visibility flag. Budgets and
    /// transactions are left untouched.
    pub async fn delete_project(&self, project_id: Uuid, builder_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_project(&db_tx, project_id, builder_id).await?;

            let mut active: projects::ActiveModel = model.into();
            active.is_visible = ActiveValue::Set(false);
            active.update(&db_tx).await?;

            Ok(())
        })
    }

    /// Links a client to a project (at most one at a time; relinking
    /// overwrites) and notifies the invited client in the same transaction.
    pub async fn link_client(
        &self,
        project_id: Uuid,
        builder_id: &str,
        client_id: &str,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<(Project, Notification)> {
        let client_id = normalize_required_text(client_id, "client")?;

        with_tx!(self, |db_tx| {
            let model = self.require_project(&db_tx, project_id, builder_id).await?;
            let project_name = model.project_name.clone();

            let mut active: projects::ActiveModel = model.into();
            active.client_id = ActiveValue::Set(Some(client_id.clone()));
            let updated = active.update(&db_tx).await?;
            let project = Project::try_from(updated)?;

            let message = format!("You have been invited to view project {project_name}");
            let notification = Notification::new(client_id.clone(), message, created_at);
            notifications::ActiveModel::from(&notification)
                .insert(&db_tx)
                .await?;

            Ok((project, notification))
        })
    }

    async fn require_project(
        &self,
        db_tx: &sea_orm::DatabaseTransaction,
        project_id: Uuid,
        builder_id: &str,
    ) -> ResultEngine<projects::Model> {
        let model = projects::Entity::find_by_id(project_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("project not exists".to_string()))?;
        if model.builder_id != builder_id {
            return Err(EngineError::KeyNotFound("project not exists".to_string()));
        }
        Ok(model)
    }
}
