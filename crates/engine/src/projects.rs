//! Project primitives.
//!
//! A `Project` is the aggregate root owning one or more budgets. Deleting a
//! project only flips its visibility flag; budgets and transactions stay in
//! place so historical reports keep working.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    #[default]
    OnGoing,
    Completed,
    Pending,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnGoing => "onGoing",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "ongoing" => Ok(Self::OnGoing),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::InvalidKind(format!(
                "invalid project status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    pub owner_name: String,
    pub builder_id: String,
    pub client_id: Option<String>,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project_name: String,
        owner_name: String,
        builder_id: String,
        location: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: ProjectStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_name,
            owner_name,
            builder_id,
            client_id: None,
            location,
            start_date,
            end_date,
            status,
            is_visible: true,
            created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_name: String,
    pub owner_name: String,
    pub builder_id: String,
    pub client_id: Option<String>,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    pub status: String,
    pub is_visible: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budgets::Entity")]
    Budgets,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Project> for ActiveModel {
    fn from(project: &Project) -> Self {
        Self {
            id: ActiveValue::Set(project.id.to_string()),
            project_name: ActiveValue::Set(project.project_name.clone()),
            owner_name: ActiveValue::Set(project.owner_name.clone()),
            builder_id: ActiveValue::Set(project.builder_id.clone()),
            client_id: ActiveValue::Set(project.client_id.clone()),
            location: ActiveValue::Set(project.location.clone()),
            start_date: ActiveValue::Set(project.start_date),
            end_date: ActiveValue::Set(project.end_date),
            status: ActiveValue::Set(project.status.as_str().to_string()),
            is_visible: ActiveValue::Set(project.is_visible),
            created_at: ActiveValue::Set(project.created_at),
        }
    }
}

impl TryFrom<Model> for Project {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("project not exists".to_string()))?,
            project_name: model.project_name,
            owner_name: model.owner_name,
            builder_id: model.builder_id,
            client_id: model.client_id,
            location: model.location,
            start_date: model.start_date,
            end_date: model.end_date,
            status: ProjectStatus::try_from(model.status.as_str())?,
            is_visible: model.is_visible,
            created_at: model.created_at,
        })
    }
}
