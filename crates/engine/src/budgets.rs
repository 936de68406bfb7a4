//! Budget primitives.
//!
//! A `Budget` tracks the amount allocated to a project and the running
//! in-hand balance. The balance starts equal to the allocated amount
//! (fully funded, nothing spent) and is only ever mutated through
//! [`Engine::record_transaction`](crate::Engine::record_transaction).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub project_id: Uuid,
    pub amount_minor: i64,
    pub in_hand_minor: i64,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(project_id: Uuid, amount: Money, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            amount_minor: amount.minor(),
            // Fully funded at creation.
            in_hand_minor: amount.minor(),
            created_at,
        }
    }

    /// Current available cash as [`Money`].
    pub fn in_hand(&self) -> Money {
        Money::new(self.in_hand_minor)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    pub amount_minor: i64,
    pub in_hand_minor: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Projects,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            project_id: ActiveValue::Set(budget.project_id.to_string()),
            amount_minor: ActiveValue::Set(budget.amount_minor),
            in_hand_minor: ActiveValue::Set(budget.in_hand_minor),
            created_at: ActiveValue::Set(budget.created_at),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            project_id: Uuid::parse_str(&model.project_id)
                .map_err(|_| EngineError::KeyNotFound("project not exists".to_string()))?,
            amount_minor: model.amount_minor,
            in_hand_minor: model.in_hand_minor,
            created_at: model.created_at,
        })
    }
}
