use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    CreateProjectCmd, Engine, EntryKind, ProjectStatus, RECENT_FEED_LIMIT, RecordTransactionCmd,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["alice".into(), "password".into()],
    ))
    .await
    .unwrap();
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

fn project_cmd(name: &str, budget_minor: i64) -> CreateProjectCmd {
    CreateProjectCmd {
        project_name: name.to_string(),
        owner_name: "Ram".to_string(),
        builder_id: "alice".to_string(),
        location: "Kathmandu".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        status: ProjectStatus::OnGoing,
        budget_minor,
        created_at: Utc::now(),
    }
}

fn record_cmd(
    budget_id: Uuid,
    amount_minor: i64,
    kind: EntryKind,
    category: Option<&str>,
    created_at: DateTime<Utc>,
) -> RecordTransactionCmd {
    RecordTransactionCmd {
        budget_id,
        vendor_id: None,
        amount_minor,
        kind,
        category: category.map(str::to_string),
        note: None,
        user_id: "alice".to_string(),
        created_at,
    }
}

fn at(ymd: (i32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(ymd.0, ymd.1, ymd.2, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn report_reconciles_across_projects() {
    let (engine, _db) = engine_with_db().await;
    let (_, house) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();
    let (_, warehouse) = engine
        .create_project(project_cmd("Warehouse", 30_000_00))
        .await
        .unwrap();

    engine
        .record_transaction(record_cmd(
            house.id,
            8_000_00,
            EntryKind::Debit,
            Some("Materials"),
            at((2024, 12, 10)),
        ))
        .await
        .unwrap();
    engine
        .record_transaction(record_cmd(
            house.id,
            2_000_00,
            EntryKind::Credit,
            Some("Advance"),
            at((2025, 1, 5)),
        ))
        .await
        .unwrap();
    engine
        .record_transaction(record_cmd(
            warehouse.id,
            1_500_00,
            EntryKind::Debit,
            None,
            at((2025, 1, 20)),
        ))
        .await
        .unwrap();

    let report = engine.trial_balance("alice").await.unwrap();
    let summary = &report.summary;

    assert_eq!(summary.total_budget_minor, 50_000_00);
    assert_eq!(summary.total_income_minor, 2_000_00);
    assert_eq!(summary.total_expenses_minor, 9_500_00);
    assert_eq!(
        summary.net_balance_minor,
        summary.total_income_minor - summary.total_expenses_minor
    );
    assert_eq!(
        summary.budget_balance_minor,
        summary.total_budget_minor - summary.total_expenses_minor
    );
    // In-hand totals reflect the mutations: 20k - 8k + 2k and 30k - 1.5k.
    assert_eq!(summary.total_in_hand_minor, 14_000_00 + 28_500_00);

    let category_income: i64 = report
        .transactions_by_category
        .iter()
        .map(|c| c.income_minor)
        .sum();
    let category_expense: i64 = report
        .transactions_by_category
        .iter()
        .map(|c| c.expense_minor)
        .sum();
    assert_eq!(category_income, summary.total_income_minor);
    assert_eq!(category_expense, summary.total_expenses_minor);

    // "Dec 2024" strictly before the 2025 months.
    let months: Vec<&str> = report
        .transactions_by_month
        .iter()
        .map(|m| m.month.as_str())
        .collect();
    assert_eq!(months, ["Dec 2024", "Jan 2025"]);

    // Project overview sums allocated amounts, not in-hand.
    let house_entry = report
        .projects
        .iter()
        .find(|p| p.name == "House")
        .unwrap();
    assert_eq!(house_entry.budget_minor, 20_000_00);
}

#[tokio::test]
async fn empty_budget_reports_zeroes() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    let report = engine.trial_balance("alice").await.unwrap();

    assert_eq!(report.summary.total_income_minor, 0);
    assert_eq!(report.summary.total_expenses_minor, 0);
    assert!(report.transactions_by_category.is_empty());
    assert!(report.transactions_by_month.is_empty());
    assert!(report.transactions.is_empty());
    assert_eq!(report.projects.len(), 1);
    assert_eq!(report.projects[0].budget_minor, 20_000_00);
}

#[tokio::test]
async fn builder_without_projects_reports_empty() {
    let (engine, _db) = engine_with_db().await;

    let report = engine.trial_balance("alice").await.unwrap();

    assert_eq!(report.summary, Default::default());
    assert!(report.projects.is_empty());
    assert!(report.transactions.is_empty());
}

#[tokio::test]
async fn feed_truncates_to_most_recent() {
    let (engine, _db) = engine_with_db().await;
    let (_, budget) = engine
        .create_project(project_cmd("House", 100_000_00))
        .await
        .unwrap();

    for day in 1..=25u32 {
        engine
            .record_transaction(record_cmd(
                budget.id,
                100_00,
                EntryKind::Debit,
                Some("Wages"),
                at((2025, 5, day)),
            ))
            .await
            .unwrap();
    }

    let report = engine.trial_balance("alice").await.unwrap();

    assert_eq!(report.transactions.len(), RECENT_FEED_LIMIT);
    // Aggregates cover the full set, not just the feed.
    assert_eq!(report.summary.total_expenses_minor, 25 * 100_00);
    assert_eq!(
        report.transactions_by_month[0].expense_minor,
        25 * 100_00
    );
    // Most recent first; the oldest five days fell off.
    assert_eq!(report.transactions[0].created_at, at((2025, 5, 25)));
    assert!(
        report
            .transactions
            .iter()
            .all(|tx| tx.created_at > at((2025, 5, 5)))
    );
}

#[tokio::test]
async fn hidden_projects_still_report() {
    let (engine, _db) = engine_with_db().await;
    let (project, budget) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();
    engine
        .record_transaction(record_cmd(
            budget.id,
            1_000_00,
            EntryKind::Debit,
            None,
            at((2025, 2, 1)),
        ))
        .await
        .unwrap();

    engine.delete_project(project.id, "alice").await.unwrap();

    let report = engine.trial_balance("alice").await.unwrap();
    assert_eq!(report.summary.total_expenses_minor, 1_000_00);
    assert_eq!(report.projects.len(), 1);
}
