//! Trial-balance report loading.

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Budget, Project, ResultEngine, Transaction, TrialBalance, budgets, projects, report,
    transactions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Builds the consolidated financial report across every project owned by
    /// the builder, visible or not (soft-deleted projects keep reporting).
    pub async fn trial_balance(&self, builder_id: &str) -> ResultEngine<TrialBalance> {
        with_tx!(self, |db_tx| {
            let project_models = projects::Entity::find()
                .filter(projects::Column::BuilderId.eq(builder_id))
                .order_by_asc(projects::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut project_list: Vec<Project> = Vec::with_capacity(project_models.len());
            for model in project_models {
                project_list.push(Project::try_from(model)?);
            }

            let project_ids: Vec<String> =
                project_list.iter().map(|p| p.id.to_string()).collect();
            let budget_models = if project_ids.is_empty() {
                Vec::new()
            } else {
                budgets::Entity::find()
                    .filter(budgets::Column::ProjectId.is_in(project_ids))
                    .all(&db_tx)
                    .await?
            };

            let mut budget_list: Vec<Budget> = Vec::with_capacity(budget_models.len());
            for model in budget_models {
                budget_list.push(Budget::try_from(model)?);
            }

            let budget_ids: Vec<String> =
                budget_list.iter().map(|b| b.id.to_string()).collect();
            let tx_models = if budget_ids.is_empty() {
                Vec::new()
            } else {
                transactions::Entity::find()
                    .filter(transactions::Column::BudgetId.is_in(budget_ids))
                    .all(&db_tx)
                    .await?
            };

            let mut tx_list: Vec<Transaction> = Vec::with_capacity(tx_models.len());
            for model in tx_models {
                tx_list.push(Transaction::try_from(model)?);
            }

            Ok(report::build(&project_list, &budget_list, &tx_list))
        })
    }
}
