//! OnSite ledger engine.
//!
//! The engine owns the budget/transaction ledger of a construction project
//! management backend: it appends ledger entries while keeping each budget's
//! in-hand balance consistent, and aggregates the whole ledger into a
//! trial-balance report. All state lives in the relational store; every
//! mutation runs inside a single database transaction.

pub use budgets::Budget;
pub use error::EngineError;
pub use money::Money;
pub use notifications::Notification;
pub use ops::{
    BudgetEntry, CreateProjectCmd, CreateVendorCmd, Engine, EngineBuilder, LedgerMutation,
    RecordTransactionCmd, VendorRef,
};
pub use projects::{Project, ProjectStatus};
pub use report::{
    CategoryBucket, MonthBucket, ProjectOverview, RECENT_FEED_LIMIT, ReportEntry, ReportSummary,
    TrialBalance,
};
pub use transactions::{EntryKind, Transaction};
pub use vendors::Vendor;

mod budgets;
mod error;
mod money;
mod notifications;
mod ops;
mod projects;
mod report;
mod transactions;
mod vendors;

type ResultEngine<T> = Result<T, EngineError>;
