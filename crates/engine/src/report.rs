//! Trial-balance report aggregation.
//!
//! The aggregation itself is a pure fold over already-loaded rows so it can
//! be tested without a database; [`Engine::trial_balance`](crate::Engine)
//! loads the builder's projects/budgets/transactions and hands them here.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Budget, EntryKind, Project, Transaction};

/// Maximum number of entries in the recent-transactions feed. Category and
/// month aggregates always reflect the full data set.
pub const RECENT_FEED_LIMIT: usize = 20;

const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_budget_minor: i64,
    pub total_in_hand_minor: i64,
    pub total_income_minor: i64,
    pub total_expenses_minor: i64,
    pub net_balance_minor: i64,
    pub budget_balance_minor: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub category: String,
    pub income_minor: i64,
    pub expense_minor: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Display label, e.g. "Dec 2024".
    pub month: String,
    pub income_minor: i64,
    pub expense_minor: i64,
}

/// A transaction denormalized with its project/budget identifiers for the
/// report's detail feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub project_id: Uuid,
    pub project_name: String,
    pub amount_minor: i64,
    pub kind: EntryKind,
    pub category: String,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub id: Uuid,
    pub name: String,
    pub status: crate::ProjectStatus,
    /// Sum of the allocated amounts of the project's budgets (not in-hand).
    pub budget_minor: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub summary: ReportSummary,
    pub transactions_by_category: Vec<CategoryBucket>,
    pub transactions_by_month: Vec<MonthBucket>,
    pub transactions: Vec<ReportEntry>,
    pub projects: Vec<ProjectOverview>,
}

struct MonthAccum {
    label: String,
    income_minor: i64,
    expense_minor: i64,
}

pub(crate) fn build(
    projects: &[Project],
    budgets: &[Budget],
    transactions: &[Transaction],
) -> TrialBalance {
    let projects_by_id: HashMap<Uuid, &Project> =
        projects.iter().map(|p| (p.id, p)).collect();
    let budget_project: HashMap<Uuid, Uuid> =
        budgets.iter().map(|b| (b.id, b.project_id)).collect();

    let mut summary = ReportSummary::default();
    for budget in budgets {
        summary.total_budget_minor += budget.amount_minor;
        summary.total_in_hand_minor += budget.in_hand_minor;
    }

    let mut categories: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    // Keyed by (year, month) so iteration is chronological, not alphabetical.
    let mut months: BTreeMap<(i32, u32), MonthAccum> = BTreeMap::new();
    let mut feed: Vec<ReportEntry> = Vec::with_capacity(transactions.len());

    for tx in transactions {
        let Some(project_id) = budget_project.get(&tx.budget_id).copied() else {
            continue;
        };
        let Some(project) = projects_by_id.get(&project_id) else {
            continue;
        };

        let category = tx
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();

        let bucket = categories.entry(category.clone()).or_default();
        let month = months
            .entry((tx.created_at.year(), tx.created_at.month()))
            .or_insert_with(|| MonthAccum {
                label: tx.created_at.format("%b %Y").to_string(),
                income_minor: 0,
                expense_minor: 0,
            });

        match tx.kind {
            EntryKind::Credit => {
                summary.total_income_minor += tx.amount_minor;
                bucket.0 += tx.amount_minor;
                month.income_minor += tx.amount_minor;
            }
            EntryKind::Debit => {
                summary.total_expenses_minor += tx.amount_minor;
                bucket.1 += tx.amount_minor;
                month.expense_minor += tx.amount_minor;
            }
        }

        feed.push(ReportEntry {
            id: tx.id,
            budget_id: tx.budget_id,
            project_id,
            project_name: project.project_name.clone(),
            amount_minor: tx.amount_minor,
            kind: tx.kind,
            category,
            note: tx.note.clone(),
            created_at: tx.created_at,
        });
    }

    summary.net_balance_minor = summary.total_income_minor - summary.total_expenses_minor;
    summary.budget_balance_minor = summary.total_budget_minor - summary.total_expenses_minor;

    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    feed.truncate(RECENT_FEED_LIMIT);

    let mut budget_totals: HashMap<Uuid, i64> = HashMap::new();
    for budget in budgets {
        *budget_totals.entry(budget.project_id).or_default() += budget.amount_minor;
    }

    let project_overviews = projects
        .iter()
        .map(|project| ProjectOverview {
            id: project.id,
            name: project.project_name.clone(),
            status: project.status,
            budget_minor: budget_totals.get(&project.id).copied().unwrap_or(0),
        })
        .collect();

    TrialBalance {
        summary,
        transactions_by_category: categories
            .into_iter()
            .map(|(category, (income_minor, expense_minor))| CategoryBucket {
                category,
                income_minor,
                expense_minor,
            })
            .collect(),
        transactions_by_month: months
            .into_values()
            .map(|accum| MonthBucket {
                month: accum.label,
                income_minor: accum.income_minor,
                expense_minor: accum.expense_minor,
            })
            .collect(),
        transactions: feed,
        projects: project_overviews,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::{Money, ProjectStatus};

    fn project(name: &str) -> Project {
        Project::new(
            name.to_string(),
            "Ram".to_string(),
            "alice".to_string(),
            "Kathmandu".to_string(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            ProjectStatus::OnGoing,
            Utc::now(),
        )
    }

    fn budget(project: &Project, amount_minor: i64) -> Budget {
        Budget::new(project.id, Money::new(amount_minor), Utc::now())
    }

    fn entry(
        budget: &Budget,
        amount_minor: i64,
        kind: EntryKind,
        category: Option<&str>,
        ymd: (i32, u32, u32),
    ) -> Transaction {
        Transaction::new(
            budget.id,
            None,
            amount_minor,
            kind,
            category.map(str::to_string),
            None,
            Utc.with_ymd_and_hms(ymd.0, ymd.1, ymd.2, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn totals_reconcile() {
        let p = project("House");
        let b = budget(&p, 20_000_00);
        let txs = vec![
            entry(&b, 8_000_00, EntryKind::Debit, Some("Materials"), (2025, 3, 1)),
            entry(&b, 2_000_00, EntryKind::Credit, Some("Advance"), (2025, 3, 2)),
            entry(&b, 500_00, EntryKind::Debit, None, (2025, 4, 1)),
        ];

        let report = build(&[p], &[b], &txs);
        let summary = &report.summary;

        assert_eq!(summary.total_income_minor, 2_000_00);
        assert_eq!(summary.total_expenses_minor, 8_500_00);
        assert_eq!(
            summary.net_balance_minor,
            summary.total_income_minor - summary.total_expenses_minor
        );
        assert_eq!(
            summary.budget_balance_minor,
            summary.total_budget_minor - summary.total_expenses_minor
        );

        let income_sum: i64 = report
            .transactions_by_category
            .iter()
            .map(|c| c.income_minor)
            .sum();
        let expense_sum: i64 = report
            .transactions_by_category
            .iter()
            .map(|c| c.expense_minor)
            .sum();
        assert_eq!(income_sum, summary.total_income_minor);
        assert_eq!(expense_sum, summary.total_expenses_minor);
    }

    #[test]
    fn months_sort_chronologically_across_years() {
        let p = project("House");
        let b = budget(&p, 50_000_00);
        let txs = vec![
            entry(&b, 100_00, EntryKind::Debit, None, (2025, 1, 5)),
            entry(&b, 100_00, EntryKind::Debit, None, (2024, 12, 5)),
            entry(&b, 100_00, EntryKind::Debit, None, (2025, 2, 5)),
            entry(&b, 100_00, EntryKind::Debit, None, (2024, 4, 5)),
        ];

        let report = build(&[p], &[b], &txs);
        let labels: Vec<&str> = report
            .transactions_by_month
            .iter()
            .map(|m| m.month.as_str())
            .collect();

        assert_eq!(labels, ["Apr 2024", "Dec 2024", "Jan 2025", "Feb 2025"]);
    }

    #[test]
    fn feed_truncates_but_aggregates_do_not() {
        let p = project("House");
        let b = budget(&p, 100_000_00);
        let txs: Vec<Transaction> = (0u32..25)
            .map(|i| {
                entry(
                    &b,
                    100_00,
                    EntryKind::Debit,
                    Some("Wages"),
                    (2025, 5, i % 28 + 1),
                )
            })
            .collect();

        let report = build(&[p], &[b], &txs);

        assert_eq!(report.transactions.len(), RECENT_FEED_LIMIT);
        assert_eq!(report.summary.total_expenses_minor, 25 * 100_00);
        assert_eq!(report.transactions_by_category[0].expense_minor, 25 * 100_00);

        // Newest first.
        for pair in report.transactions.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn empty_budgets_produce_zeroed_report() {
        let p = project("House");
        let b = budget(&p, 20_000_00);

        let report = build(&[p.clone()], &[b], &[]);

        assert_eq!(report.summary.total_income_minor, 0);
        assert_eq!(report.summary.total_expenses_minor, 0);
        assert!(report.transactions_by_category.is_empty());
        assert!(report.transactions_by_month.is_empty());
        assert_eq!(report.projects.len(), 1);
        assert_eq!(report.projects[0].budget_minor, 20_000_00);
    }

    #[test]
    fn missing_category_defaults_to_uncategorized() {
        let p = project("House");
        let b = budget(&p, 20_000_00);
        let txs = vec![
            entry(&b, 100_00, EntryKind::Debit, None, (2025, 3, 1)),
            entry(&b, 100_00, EntryKind::Debit, Some("  "), (2025, 3, 2)),
        ];

        let report = build(&[p], &[b], &txs);

        assert_eq!(report.transactions_by_category.len(), 1);
        assert_eq!(report.transactions_by_category[0].category, "Uncategorized");
        assert_eq!(report.transactions[0].category, "Uncategorized");
    }
}
