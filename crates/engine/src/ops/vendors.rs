//! Vendor operations.

use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{ResultEngine, Vendor, vendors};

use super::{Engine, normalize_optional_text, normalize_required_text};

/// Inputs for [`Engine::create_vendor`].
pub struct CreateVendorCmd {
    pub vendor_name: String,
    pub company_name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    /// Profile image URL, if any.
    pub profile: Option<String>,
    pub builder_id: String,
    pub created_at: DateTime<Utc>,
}

impl Engine {
    pub async fn create_vendor(&self, cmd: CreateVendorCmd) -> ResultEngine<Vendor> {
        let vendor = Vendor::new(
            normalize_required_text(&cmd.vendor_name, "vendor name")?,
            normalize_required_text(&cmd.company_name, "company name")?,
            normalize_required_text(&cmd.email, "email")?,
            normalize_required_text(&cmd.contact, "contact")?,
            normalize_required_text(&cmd.address, "address")?,
            normalize_optional_text(cmd.profile.as_deref()),
            cmd.builder_id,
            cmd.created_at,
        );
        vendors::ActiveModel::from(&vendor)
            .insert(&self.database)
            .await?;
        Ok(vendor)
    }

    /// Lists the builder's vendors, newest first.
    pub async fn vendors(&self, builder_id: &str) -> ResultEngine<Vec<Vendor>> {
        let models = vendors::Entity::find()
            .filter(vendors::Column::BuilderId.eq(builder_id))
            .order_by_desc(vendors::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Vendor::try_from(model)?);
        }
        Ok(out)
    }
}
