//! Vendor primitives.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

/// A supplier a builder pays through ledger entries.
///
/// Vendors are created directly (or by an upstream card-scan flow) and are
/// read-only from the ledger's point of view: transactions only reference
/// them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Uuid,
    pub vendor_name: String,
    pub company_name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub profile: Option<String>,
    pub builder_id: String,
    pub created_at: DateTime<Utc>,
}

impl Vendor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vendor_name: String,
        company_name: String,
        email: String,
        contact: String,
        address: String,
        profile: Option<String>,
        builder_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vendor_name,
            company_name,
            email,
            contact,
            address,
            profile,
            builder_id,
            created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub vendor_name: String,
    pub company_name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub profile: Option<String>,
    pub builder_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Vendor> for ActiveModel {
    fn from(vendor: &Vendor) -> Self {
        Self {
            id: ActiveValue::Set(vendor.id.to_string()),
            vendor_name: ActiveValue::Set(vendor.vendor_name.clone()),
            company_name: ActiveValue::Set(vendor.company_name.clone()),
            email: ActiveValue::Set(vendor.email.clone()),
            contact: ActiveValue::Set(vendor.contact.clone()),
            address: ActiveValue::Set(vendor.address.clone()),
            profile: ActiveValue::Set(vendor.profile.clone()),
            builder_id: ActiveValue::Set(vendor.builder_id.clone()),
            created_at: ActiveValue::Set(vendor.created_at),
        }
    }
}

impl TryFrom<Model> for Vendor {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("vendor not exists".to_string()))?,
            vendor_name: model.vendor_name,
            company_name: model.company_name,
            email: model.email,
            contact: model.contact,
            address: model.address,
            profile: model.profile,
            builder_id: model.builder_id,
            created_at: model.created_at,
        })
    }
}
