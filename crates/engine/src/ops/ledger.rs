//! Ledger mutation and ledger read paths.

use std::collections::HashMap;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    Condition, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, Statement, TransactionTrait,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Budget, EngineError, EntryKind, Money, Notification, Project, ResultEngine, Transaction,
    Vendor, budgets, notifications, projects, transactions, vendors,
};

use super::{Engine, normalize_optional_text, with_tx};

/// Inputs for [`Engine::record_transaction`].
pub struct RecordTransactionCmd {
    pub budget_id: Uuid,
    pub vendor_id: Option<Uuid>,
    /// Positive magnitude in paisa; direction is carried by `kind`.
    pub amount_minor: i64,
    pub kind: EntryKind,
    pub category: Option<String>,
    pub note: Option<String>,
    /// Acting user, receiver of the resulting notification.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Everything written by a successful ledger mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerMutation {
    pub transaction: Transaction,
    pub budget: Budget,
    pub notification: Notification,
}

/// Vendor name/contact enrichment for a listed ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorRef {
    pub id: Uuid,
    pub vendor_name: String,
    pub contact: String,
}

/// A ledger entry together with its (optional) vendor enrichment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BudgetEntry {
    pub transaction: Transaction,
    pub vendor: Option<VendorRef>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EntriesCursor {
    created_at: DateTime<Utc>,
    transaction_id: String,
}

impl EntriesCursor {
    fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidCursor("invalid entries cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidCursor("invalid entries cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidCursor("invalid entries cursor".to_string()))
    }
}

impl Engine {
    /// Appends a ledger entry to a budget and updates its in-hand balance.
    ///
    /// The balance update, the transaction insert and the notification insert
    /// form one atomic unit: either all three commit or none does. The
    /// balance is adjusted with an in-place `UPDATE ... SET in_hand_minor =
    /// in_hand_minor + ?` so two concurrent calls against the same budget
    /// can never lose a delta to a stale read.
    pub async fn record_transaction(
        &self,
        cmd: RecordTransactionCmd,
    ) -> ResultEngine<LedgerMutation> {
        if cmd.amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        let amount = Money::new(cmd.amount_minor);
        let category = normalize_optional_text(cmd.category.as_deref());
        let note = normalize_optional_text(cmd.note.as_deref());

        with_tx!(self, |db_tx| {
            let delta = cmd.kind.signed_minor(cmd.amount_minor);
            let backend = self.database.get_database_backend();
            let update = Statement::from_sql_and_values(
                backend,
                "UPDATE budgets SET in_hand_minor = in_hand_minor + ? WHERE id = ?",
                [delta.into(), cmd.budget_id.to_string().into()],
            );
            let updated = db_tx.execute(update).await?;
            if updated.rows_affected() == 0 {
                return Err(EngineError::KeyNotFound("budget not exists".to_string()));
            }

            let budget_model = budgets::Entity::find_by_id(cmd.budget_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;
            let budget = Budget::try_from(budget_model)?;

            let tx = Transaction::new(
                cmd.budget_id,
                cmd.vendor_id,
                cmd.amount_minor,
                cmd.kind,
                category,
                note,
                cmd.created_at,
            )?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;

            let message = format!(
                "{} of {} recorded against budget {}",
                cmd.kind.as_str().to_lowercase(),
                amount,
                budget.id
            );
            let notification = Notification::new(cmd.user_id.clone(), message, cmd.created_at);
            notifications::ActiveModel::from(&notification)
                .insert(&db_tx)
                .await?;

            Ok(LedgerMutation {
                transaction: tx,
                budget,
                notification,
            })
        })
    }

    /// Returns a project with all of its budgets and, nested under each, all
    /// ledger entries.
    ///
    /// Visibility is intentionally not checked here: soft-deleted projects
    /// stay readable for historical reporting.
    pub async fn project_budgets(
        &self,
        project_id: Uuid,
    ) -> ResultEngine<(Project, Vec<(Budget, Vec<Transaction>)>)> {
        with_tx!(self, |db_tx| {
            let project_model = projects::Entity::find_by_id(project_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("project not exists".to_string()))?;
            let project = Project::try_from(project_model)?;

            let rows: Vec<(budgets::Model, Vec<transactions::Model>)> = budgets::Entity::find()
                .filter(budgets::Column::ProjectId.eq(project_id.to_string()))
                .find_with_related(transactions::Entity)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(rows.len());
            for (budget_model, tx_models) in rows {
                let budget = Budget::try_from(budget_model)?;
                let mut txs = Vec::with_capacity(tx_models.len());
                for model in tx_models {
                    txs.push(Transaction::try_from(model)?);
                }
                out.push((budget, txs));
            }

            Ok((project, out))
        })
    }

    /// Lists a budget's ledger entries newest-first, each enriched with the
    /// referenced vendor's name and contact.
    ///
    /// Pagination is newest → older by `(created_at DESC, id DESC)` with an
    /// opaque base64 cursor.
    pub async fn budget_transactions(
        &self,
        budget_id: Uuid,
        limit: u64,
        cursor: Option<&str>,
    ) -> ResultEngine<(Budget, Vec<BudgetEntry>, Option<String>)> {
        with_tx!(self, |db_tx| {
            let budget_model = budgets::Entity::find_by_id(budget_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))?;
            let budget = Budget::try_from(budget_model)?;

            let limit_plus_one = limit.saturating_add(1);
            let mut query = transactions::Entity::find()
                .filter(transactions::Column::BudgetId.eq(budget_id.to_string()))
                .order_by_desc(transactions::Column::CreatedAt)
                .order_by_desc(transactions::Column::Id)
                .limit(limit_plus_one);

            if let Some(cursor) = cursor {
                let cursor = EntriesCursor::decode(cursor)?;
                query = query.filter(
                    Condition::any()
                        .add(transactions::Column::CreatedAt.lt(cursor.created_at))
                        .add(
                            Condition::all()
                                .add(transactions::Column::CreatedAt.eq(cursor.created_at))
                                .add(transactions::Column::Id.lt(cursor.transaction_id)),
                        ),
                );
            }

            let rows = query.all(&db_tx).await?;
            let has_more = rows.len() > limit as usize;

            let mut txs: Vec<Transaction> = Vec::with_capacity(rows.len().min(limit as usize));
            for model in rows.into_iter().take(limit as usize) {
                txs.push(Transaction::try_from(model)?);
            }

            let vendor_ids: Vec<String> = txs
                .iter()
                .filter_map(|tx| tx.vendor_id.map(|id| id.to_string()))
                .collect();
            let vendor_models = if vendor_ids.is_empty() {
                Vec::new()
            } else {
                vendors::Entity::find()
                    .filter(vendors::Column::Id.is_in(vendor_ids))
                    .all(&db_tx)
                    .await?
            };
            let vendor_refs: HashMap<Uuid, VendorRef> = vendor_models
                .into_iter()
                .filter_map(|model| {
                    let id = Uuid::parse_str(&model.id).ok()?;
                    Some((
                        id,
                        VendorRef {
                            id,
                            vendor_name: model.vendor_name,
                            contact: model.contact,
                        },
                    ))
                })
                .collect();

            let next_cursor = if has_more {
                txs.last()
                    .map(|tx| EntriesCursor {
                        created_at: tx.created_at,
                        transaction_id: tx.id.to_string(),
                    })
                    .map(|c| c.encode())
                    .transpose()?
            } else {
                None
            };

            let entries = txs
                .into_iter()
                .map(|tx| {
                    let vendor = tx.vendor_id.and_then(|id| vendor_refs.get(&id).cloned());
                    BudgetEntry {
                        transaction: tx,
                        vendor,
                    }
                })
                .collect();

            Ok((budget, entries, next_cursor))
        })
    }

    /// Sums `amount_minor` across every ledger entry referencing the vendor,
    /// regardless of project or budget.
    ///
    /// The vendor is addressed explicitly by id; it must belong to the acting
    /// builder.
    pub async fn vendor_total(
        &self,
        vendor_id: Uuid,
        builder_id: &str,
    ) -> ResultEngine<(Vendor, i64)> {
        with_tx!(self, |db_tx| {
            let vendor_model = vendors::Entity::find_by_id(vendor_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("vendor not exists".to_string()))?;
            if vendor_model.builder_id != builder_id {
                return Err(EngineError::KeyNotFound("vendor not exists".to_string()));
            }
            let vendor = Vendor::try_from(vendor_model)?;

            let backend = self.database.get_database_backend();
            let stmt = Statement::from_sql_and_values(
                backend,
                "SELECT COALESCE(SUM(amount_minor), 0) AS sum \
                 FROM transactions \
                 WHERE vendor_id = ?",
                [vendor_id.to_string().into()],
            );
            let row = db_tx.query_one(stmt).await?;
            let total_minor: i64 = row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0);

            Ok((vendor, total_minor))
        })
    }
}
