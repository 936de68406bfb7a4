use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generic acknowledgement body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignUp {
        pub username: String,
        pub password: String,
        pub confirm_password: String,
        pub email: Option<String>,
    }
}

pub mod project {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectNew {
        pub project_name: String,
        pub owner_name: String,
        pub location: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        /// onGoing / Completed / Pending / Cancelled; defaults to onGoing.
        pub status: Option<String>,
        /// Allocated amount of the initial budget, in paisa.
        pub budget_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectView {
        pub id: Uuid,
        pub project_name: String,
        pub owner_name: String,
        pub builder_id: String,
        pub client_id: Option<String>,
        pub location: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub status: String,
        pub is_visible: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectCreatedResponse {
        pub message: String,
        pub project: ProjectView,
        pub budget: super::budget::BudgetView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectsResponse {
        pub projects: Vec<ProjectView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LinkClient {
        pub client_id: String,
    }

    /// A budget with its ledger entries nested, as returned by
    /// `GET /project/{id}/budget`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetWithTransactions {
        pub budget: super::budget::BudgetView,
        pub transactions: Vec<super::transaction::TransactionView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectBudgetsResponse {
        pub project: ProjectView,
        pub budgets: Vec<BudgetWithTransactions>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub project_id: Uuid,
        pub amount_minor: i64,
        pub in_hand_minor: i64,
        pub created_at: DateTime<Utc>,
    }

    /// Request body for `POST /budget/transaction`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetTransactionsGet {
        pub budget_id: Uuid,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        ///
        /// Newest → older pagination.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetTransactionsResponse {
        pub message: String,
        pub budget: BudgetView,
        pub transactions: Vec<super::transaction::TransactionWithVendor>,
        /// Opaque cursor for fetching the next page (older items).
        pub next_cursor: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    /// Request body for `POST /budget/add-transaction`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub budget_id: Uuid,
        pub vendor_id: Option<Uuid>,
        /// Positive magnitude in paisa; direction is carried by `kind`.
        pub amount_minor: i64,
        /// "Credit" or "Debit", matched case-insensitively.
        pub kind: String,
        pub category: Option<String>,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub budget_id: Uuid,
        pub vendor_id: Option<Uuid>,
        pub amount_minor: i64,
        pub kind: String,
        pub category: Option<String>,
        pub note: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    /// Vendor name/contact enrichment for a listed entry.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VendorRefView {
        pub id: Uuid,
        pub vendor_name: String,
        pub contact: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionWithVendor {
        pub transaction: TransactionView,
        pub vendor: Option<VendorRefView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionRecordedResponse {
        pub message: String,
        pub transaction: TransactionView,
        pub updated_budget: super::budget::BudgetView,
        pub notification: super::notification::NotificationView,
    }
}

pub mod vendor {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VendorNew {
        pub vendor_name: String,
        pub company_name: String,
        pub email: String,
        pub contact: String,
        pub address: String,
        /// Profile image URL, if any.
        pub profile: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VendorView {
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

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VendorCreatedResponse {
        pub message: String,
        pub vendor: VendorView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VendorsResponse {
        pub vendors: Vec<VendorView>,
    }

    /// Request body for the vendor amount rollup. The vendor is addressed
    /// explicitly by id.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VendorAmountGet {
        pub vendor_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VendorAmountResponse {
        pub vendor: VendorView,
        pub total_amount_minor: i64,
    }
}

pub mod notification {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotificationView {
        pub id: Uuid,
        pub user_id: String,
        pub message: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotificationsResponse {
        pub notifications: Vec<NotificationView>,
    }
}
