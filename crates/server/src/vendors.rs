//! Vendor API endpoints.

use api_types::vendor::{
    VendorAmountGet, VendorAmountResponse, VendorCreatedResponse, VendorNew, VendorView,
    VendorsResponse,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};

pub(crate) fn vendor_view(vendor: &engine::Vendor) -> VendorView {
    VendorView {
        id: vendor.id,
        vendor_name: vendor.vendor_name.clone(),
        company_name: vendor.company_name.clone(),
        email: vendor.email.clone(),
        contact: vendor.contact.clone(),
        address: vendor.address.clone(),
        profile: vendor.profile.clone(),
        builder_id: vendor.builder_id.clone(),
        created_at: vendor.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<VendorNew>,
) -> Result<(StatusCode, Json<VendorCreatedResponse>), ServerError> {
    let vendor = state
        .engine
        .create_vendor(engine::CreateVendorCmd {
            vendor_name: payload.vendor_name,
            company_name: payload.company_name,
            email: payload.email,
            contact: payload.contact,
            address: payload.address,
            profile: payload.profile,
            builder_id: user.username.clone(),
            created_at: Utc::now(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VendorCreatedResponse {
            message: "vendor created successfully".to_string(),
            vendor: vendor_view(&vendor),
        }),
    ))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<VendorsResponse>, ServerError> {
    let vendors = state.engine.vendors(&user.username).await?;

    Ok(Json(VendorsResponse {
        vendors: vendors.iter().map(vendor_view).collect(),
    }))
}

/// Total spent/received against one vendor across every budget of the
/// builder. The vendor is addressed explicitly by id.
pub async fn amount(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<VendorAmountGet>,
) -> Result<Json<VendorAmountResponse>, ServerError> {
    let (vendor, total_amount_minor) = state
        .engine
        .vendor_total(payload.vendor_id, &user.username)
        .await?;

    Ok(Json(VendorAmountResponse {
        vendor: vendor_view(&vendor),
        total_amount_minor,
    }))
}
