use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    CreateProjectCmd, CreateVendorCmd, Engine, EngineError, EntryKind, ProjectStatus,
    RecordTransactionCmd,
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

async fn insert_user(db: &DatabaseConnection, username: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec![username.into(), "password".into()],
    ))
    .await
    .unwrap();
}

fn project_cmd(name: &str, budget_minor: i64) -> CreateProjectCmd {
    CreateProjectCmd {
        project_name: name.to_string(),
        owner_name: "Ram".to_string(),
        builder_id: "alice".to_string(),
        location: "Kathmandu".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
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
    created_at: DateTime<Utc>,
) -> RecordTransactionCmd {
    RecordTransactionCmd {
        budget_id,
        vendor_id: None,
        amount_minor,
        kind,
        category: None,
        note: None,
        user_id: "alice".to_string(),
        created_at,
    }
}

#[tokio::test]
async fn create_project_starts_fully_funded() {
    let (engine, _db) = engine_with_db().await;

    let (project, budget) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    assert_eq!(budget.project_id, project.id);
    assert_eq!(budget.amount_minor, 20_000_00);
    assert_eq!(budget.in_hand_minor, 20_000_00);
}

#[tokio::test]
async fn debits_reduce_in_hand() {
    let (engine, _db) = engine_with_db().await;
    let (_, budget) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    let result = engine
        .record_transaction(record_cmd(
            budget.id,
            8_000_00,
            EntryKind::Debit,
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(result.budget.in_hand_minor, 12_000_00);
    assert_eq!(result.transaction.amount_minor, 8_000_00);
    assert_eq!(result.transaction.kind, EntryKind::Debit);

    let mut cmd = record_cmd(budget.id, 200_00, EntryKind::Debit, Utc::now());
    cmd.category = Some("Materials".to_string());
    let result = engine.record_transaction(cmd).await.unwrap();

    assert_eq!(result.budget.in_hand_minor, 11_800_00);
    assert_eq!(result.transaction.category.as_deref(), Some("Materials"));
}

#[tokio::test]
async fn balance_matches_sum_of_persisted_entries() {
    let (engine, _db) = engine_with_db().await;
    let (project, budget) = engine
        .create_project(project_cmd("House", 50_000_00))
        .await
        .unwrap();

    let entries = [
        (1_000_00, EntryKind::Debit),
        (2_500_00, EntryKind::Credit),
        (700_00, EntryKind::Debit),
        (300_00, EntryKind::Credit),
        (4_000_00, EntryKind::Debit),
    ];
    for (amount, kind) in entries {
        engine
            .record_transaction(record_cmd(budget.id, amount, kind, Utc::now()))
            .await
            .unwrap();
    }

    let (_, budgets) = engine.project_budgets(project.id).await.unwrap();
    let (loaded, txs) = &budgets[0];

    let net: i64 = txs.iter().map(|tx| tx.signed_minor()).sum();
    assert_eq!(txs.len(), entries.len());
    assert_eq!(loaded.in_hand_minor, loaded.amount_minor + net);
    assert_eq!(loaded.in_hand_minor, 50_000_00 - 1_000_00 + 2_500_00 - 700_00 + 300_00 - 4_000_00);
}

#[tokio::test]
async fn unknown_budget_makes_no_writes() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .record_transaction(record_cmd(
            Uuid::new_v4(),
            1_000_00,
            EntryKind::Credit,
            Utc::now(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert!(engine.notifications("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_entry_insert_rolls_back_balance() {
    let (engine, _db) = engine_with_db().await;
    let (project, budget) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    // A dangling vendor reference trips the foreign key on the insert step,
    // after the balance update has already been attempted in the same unit.
    let mut cmd = record_cmd(budget.id, 5_000_00, EntryKind::Debit, Utc::now());
    cmd.vendor_id = Some(Uuid::new_v4());
    let err = engine.record_transaction(cmd).await.unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));

    let (_, budgets) = engine.project_budgets(project.id).await.unwrap();
    let (loaded, txs) = &budgets[0];
    assert_eq!(loaded.in_hand_minor, 20_000_00);
    assert!(txs.is_empty());
    assert!(engine.notifications("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn lowercase_kind_is_canonicalized() {
    let (engine, _db) = engine_with_db().await;
    let (_, budget) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    // "credit" parses to the same canonical kind as "Credit" and moves the
    // balance; the write and report paths can no longer disagree.
    let kind = EntryKind::try_from("credit").unwrap();
    let result = engine
        .record_transaction(record_cmd(budget.id, 1_000_00, kind, Utc::now()))
        .await
        .unwrap();

    assert_eq!(result.budget.in_hand_minor, 21_000_00);
    assert_eq!(result.transaction.kind, EntryKind::Credit);
}

#[tokio::test]
async fn notification_written_with_entry() {
    let (engine, _db) = engine_with_db().await;
    let (_, budget) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    let result = engine
        .record_transaction(record_cmd(budget.id, 80_00, EntryKind::Credit, Utc::now()))
        .await
        .unwrap();

    assert!(result.notification.message.contains("credit"));
    assert!(result.notification.message.contains("80.00 NPR"));

    let stored = engine.notifications("alice").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message, result.notification.message);

    engine
        .delete_notification(stored[0].id, "alice")
        .await
        .unwrap();
    assert!(engine.notifications("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_project_name_rejected_until_deleted() {
    let (engine, _db) = engine_with_db().await;
    let (project, _) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    let err = engine
        .create_project(project_cmd("house", 10_000_00))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    engine.delete_project(project.id, "alice").await.unwrap();

    // Soft-deleted projects release their name.
    engine
        .create_project(project_cmd("House", 10_000_00))
        .await
        .unwrap();
}

#[tokio::test]
async fn soft_delete_keeps_financials_readable() {
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
            Utc::now(),
        ))
        .await
        .unwrap();

    engine.delete_project(project.id, "alice").await.unwrap();

    assert!(engine.projects("alice").await.unwrap().is_empty());

    let (loaded, budgets) = engine.project_budgets(project.id).await.unwrap();
    assert!(!loaded.is_visible);
    assert_eq!(budgets[0].1.len(), 1);
}

#[tokio::test]
async fn budget_entries_paginate_and_carry_vendor() {
    let (engine, _db) = engine_with_db().await;
    let (_, budget) = engine
        .create_project(project_cmd("House", 50_000_00))
        .await
        .unwrap();
    let vendor = engine
        .create_vendor(CreateVendorCmd {
            vendor_name: "Shiva Traders".to_string(),
            company_name: "Shiva Traders Pvt. Ltd.".to_string(),
            email: "shiva@example.com".to_string(),
            contact: "9800000000".to_string(),
            address: "Patan".to_string(),
            profile: None,
            builder_id: "alice".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    for day in 1..=3u32 {
        let mut cmd = record_cmd(
            budget.id,
            100_00 * i64::from(day),
            EntryKind::Debit,
            Utc.with_ymd_and_hms(2025, 6, day, 10, 0, 0).unwrap(),
        );
        cmd.vendor_id = Some(vendor.id);
        engine.record_transaction(cmd).await.unwrap();
    }

    let (_, page_one, cursor) = engine.budget_transactions(budget.id, 2, None).await.unwrap();
    assert_eq!(page_one.len(), 2);
    assert_eq!(page_one[0].transaction.amount_minor, 300_00);
    let vendor_ref = page_one[0].vendor.as_ref().unwrap();
    assert_eq!(vendor_ref.vendor_name, "Shiva Traders");
    assert_eq!(vendor_ref.contact, "9800000000");
    let cursor = cursor.unwrap();

    let (_, page_two, end) = engine
        .budget_transactions(budget.id, 2, Some(&cursor))
        .await
        .unwrap();
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].transaction.amount_minor, 100_00);
    assert!(end.is_none());

    // Reads are idempotent.
    let again = engine.budget_transactions(budget.id, 2, None).await.unwrap();
    assert_eq!(again.1, page_one);
}

#[tokio::test]
async fn vendor_total_spans_projects() {
    let (engine, _db) = engine_with_db().await;
    let (_, first) = engine
        .create_project(project_cmd("House", 50_000_00))
        .await
        .unwrap();
    let (_, second) = engine
        .create_project(project_cmd("Warehouse", 80_000_00))
        .await
        .unwrap();
    let vendor = engine
        .create_vendor(CreateVendorCmd {
            vendor_name: "Shiva Traders".to_string(),
            company_name: "Shiva Traders Pvt. Ltd.".to_string(),
            email: "shiva@example.com".to_string(),
            contact: "9800000000".to_string(),
            address: "Patan".to_string(),
            profile: None,
            builder_id: "alice".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    for (budget_id, amount) in [(first.id, 1_200_00), (second.id, 800_00)] {
        let mut cmd = record_cmd(budget_id, amount, EntryKind::Debit, Utc::now());
        cmd.vendor_id = Some(vendor.id);
        engine.record_transaction(cmd).await.unwrap();
    }

    let (loaded, total_minor) = engine.vendor_total(vendor.id, "alice").await.unwrap();
    assert_eq!(loaded.id, vendor.id);
    assert_eq!(total_minor, 2_000_00);

    // Another builder cannot see the vendor.
    let err = engine.vendor_total(vendor.id, "mallory").await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn link_client_notifies_invitee() {
    let (engine, db) = engine_with_db().await;
    insert_user(&db, "bob").await;

    let (project, _) = engine
        .create_project(project_cmd("House", 20_000_00))
        .await
        .unwrap();

    let (linked, notification) = engine
        .link_client(project.id, "alice", "bob", Utc::now())
        .await
        .unwrap();

    assert_eq!(linked.client_id.as_deref(), Some("bob"));
    assert_eq!(notification.user_id, "bob");

    let stored = engine.notifications("bob").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].message.contains("House"));
}
