use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod budgets;
mod notifications;
mod projects;
mod push;
mod report;
mod server;
mod user;
mod vendors;

pub use push::Notifier;

pub mod types {
    pub mod project {
        pub use api_types::project::{
            LinkClient, ProjectBudgetsResponse, ProjectCreatedResponse, ProjectNew,
            ProjectsResponse,
        };
    }

    pub mod budget {
        pub use api_types::budget::{BudgetTransactionsGet, BudgetTransactionsResponse};
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionNew, TransactionRecordedResponse};
    }

    pub mod vendor {
        pub use api_types::vendor::{
            VendorAmountGet, VendorAmountResponse, VendorCreatedResponse, VendorNew,
            VendorsResponse,
        };
    }

    pub mod notification {
        pub use api_types::notification::NotificationsResponse;
    }

    pub mod report {
        pub use engine::TrialBalance;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidKind(_)
        | EngineError::InvalidCursor(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
