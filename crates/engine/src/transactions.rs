//! Ledger entry primitives.
//!
//! A `Transaction` is an append-only entry against a budget. The magnitude is
//! always stored positive; the direction is carried by [`EntryKind`].

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Direction of a ledger entry.
///
/// Parsing is case-insensitive ("credit", "CREDIT" and "Credit" all map to
/// [`EntryKind::Credit`]) and is the single canonical form used by the write
/// path and the report path alike. Unknown kinds are rejected instead of
/// being treated as a balance no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Credit,
    Debit,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }

    /// Signed delta this entry applies to a budget's in-hand balance.
    pub fn signed_minor(self, amount_minor: i64) -> i64 {
        match self {
            Self::Credit => amount_minor,
            Self::Debit => -amount_minor,
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(EngineError::InvalidKind(format!(
                "invalid entry kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub amount_minor: i64,
    pub kind: EntryKind,
    pub category: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        budget_id: Uuid,
        vendor_id: Option<Uuid>,
        amount_minor: i64,
        kind: EntryKind,
        category: Option<String>,
        note: Option<String>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            budget_id,
            vendor_id,
            amount_minor,
            kind,
            category,
            note,
            created_at,
        })
    }

    /// Signed effect of this entry on its budget's in-hand balance.
    pub fn signed_minor(&self) -> i64 {
        self.kind.signed_minor(self.amount_minor)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub budget_id: String,
    pub vendor_id: Option<String>,
    pub amount_minor: i64,
    pub kind: String,
    pub category: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Budgets,
    #[sea_orm(
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorId",
        to = "super::vendors::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Vendors,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            budget_id: ActiveValue::Set(tx.budget_id.to_string()),
            vendor_id: ActiveValue::Set(tx.vendor_id.map(|id| id.to_string())),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            category: ActiveValue::Set(tx.category.clone()),
            note: ActiveValue::Set(tx.note.clone()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            budget_id: Uuid::parse_str(&model.budget_id)
                .map_err(|_| EngineError::KeyNotFound("budget not exists".to_string()))?,
            vendor_id: model.vendor_id.and_then(|s| Uuid::parse_str(&s).ok()),
            amount_minor: model.amount_minor,
            kind: EntryKind::try_from(model.kind.as_str())?,
            category: model.category,
            note: model.note,
            created_at: model.created_at,
        })
    }
}
