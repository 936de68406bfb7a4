//! Budget and ledger API endpoints.

use api_types::budget::{BudgetTransactionsGet, BudgetTransactionsResponse, BudgetView};
use api_types::transaction::{
    TransactionNew, TransactionRecordedResponse, TransactionView, TransactionWithVendor,
    VendorRefView,
};
use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::{ServerError, notifications, server::ServerState, user};

const DEFAULT_PAGE_SIZE: u64 = 50;

pub(crate) fn budget_view(budget: &engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        project_id: budget.project_id,
        amount_minor: budget.amount_minor,
        in_hand_minor: budget.in_hand_minor,
        created_at: budget.created_at,
    }
}

pub(crate) fn transaction_view(tx: &engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        budget_id: tx.budget_id,
        vendor_id: tx.vendor_id,
        amount_minor: tx.amount_minor,
        kind: tx.kind.as_str().to_string(),
        category: tx.category.clone(),
        note: tx.note.clone(),
        created_at: tx.created_at,
    }
}

/// Appends a ledger entry: balance update, transaction insert and
/// notification insert commit atomically, then the push dispatch runs
/// fire-and-forget.
pub async fn add_transaction(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionRecordedResponse>, ServerError> {
    let kind = engine::EntryKind::try_from(payload.kind.as_str())?;

    let mutation = state
        .engine
        .record_transaction(engine::RecordTransactionCmd {
            budget_id: payload.budget_id,
            vendor_id: payload.vendor_id,
            amount_minor: payload.amount_minor,
            kind,
            category: payload.category,
            note: payload.note,
            user_id: user.username.clone(),
            created_at: Utc::now(),
        })
        .await?;

    state
        .notifier
        .dispatch(&mutation.notification.user_id, &mutation.notification.message);

    Ok(Json(TransactionRecordedResponse {
        message: "transaction recorded".to_string(),
        transaction: transaction_view(&mutation.transaction),
        updated_budget: budget_view(&mutation.budget),
        notification: notifications::notification_view(&mutation.notification),
    }))
}

pub async fn list_transactions(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetTransactionsGet>,
) -> Result<Json<BudgetTransactionsResponse>, ServerError> {
    let limit = payload.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    let (budget, entries, next_cursor) = state
        .engine
        .budget_transactions(payload.budget_id, limit, payload.cursor.as_deref())
        .await?;

    let transactions = entries
        .into_iter()
        .map(|entry| TransactionWithVendor {
            transaction: transaction_view(&entry.transaction),
            vendor: entry.vendor.map(|vendor| VendorRefView {
                id: vendor.id,
                vendor_name: vendor.vendor_name,
                contact: vendor.contact,
            }),
        })
        .collect();

    Ok(Json(BudgetTransactionsResponse {
        message: "transactions fetched".to_string(),
        budget: budget_view(&budget),
        transactions,
        next_cursor,
    }))
}
