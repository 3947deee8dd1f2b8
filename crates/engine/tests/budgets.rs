use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{BudgetFilter, Engine, EngineError, Money, NewBudget, NewExpense};
use migration::MigratorTrait;

const ALICE: &str = "a@x.com";

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    engine.register(ALICE, "password", None).await.unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january_food(amount_minor: i64) -> NewBudget {
    NewBudget {
        category: Some("food".to_string()),
        amount: Money::new(amount_minor),
        period: "monthly".to_string(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 31),
    }
}

async fn add_expense(engine: &Engine, amount_minor: i64, category: &str, on: NaiveDate) {
    engine
        .add_expense(
            ALICE,
            NewExpense {
                title: format!("{category} on {on}"),
                amount: Money::new(amount_minor),
                category: category.to_string(),
                date: on,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn create_and_list_budgets() {
    let (engine, _db) = engine_with_db().await;

    let created = engine.create_budget(ALICE, january_food(20_00)).await.unwrap();
    assert_eq!(created.category.as_deref(), Some("food"));
    assert_eq!(created.amount, Money::new(20_00));

    let budgets = engine
        .budgets(ALICE, &BudgetFilter::default())
        .await
        .unwrap();
    assert_eq!(budgets, vec![created]);

    assert!(
        engine
            .budgets("nobody@x.com", &BudgetFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn blank_category_means_overall_budget() {
    let (engine, _db) = engine_with_db().await;

    let overall = engine
        .create_budget(
            ALICE,
            NewBudget {
                category: Some("   ".to_string()),
                ..january_food(100_00)
            },
        )
        .await
        .unwrap();
    assert_eq!(overall.category, None);
}

#[tokio::test]
async fn create_budget_for_unknown_user_fails() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_budget("nobody@x.com", january_food(20_00))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user".to_string()));
}

#[tokio::test]
async fn create_budget_validates_window_and_amount() {
    let (engine, _db) = engine_with_db().await;

    let inverted = engine
        .create_budget(
            ALICE,
            NewBudget {
                start_date: date(2024, 2, 1),
                ..january_food(20_00)
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(inverted, EngineError::InvalidDate(_)));

    let zero = engine
        .create_budget(ALICE, january_food(0))
        .await
        .unwrap_err();
    assert!(matches!(zero, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn filter_by_category_and_period() {
    let (engine, _db) = engine_with_db().await;
    engine.create_budget(ALICE, january_food(20_00)).await.unwrap();
    engine
        .create_budget(
            ALICE,
            NewBudget {
                category: None,
                period: "yearly".to_string(),
                end_date: date(2024, 12, 31),
                ..january_food(1000_00)
            },
        )
        .await
        .unwrap();

    let food = engine
        .budgets(
            ALICE,
            &BudgetFilter {
                category: Some("food".to_string()),
                period: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(food.len(), 1);

    let yearly = engine
        .budgets(
            ALICE,
            &BudgetFilter {
                category: None,
                period: Some("yearly".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(yearly.len(), 1);
    assert_eq!(yearly[0].category, None);
}

#[tokio::test]
async fn active_budgets_include_window_edges() {
    let (engine, _db) = engine_with_db().await;
    let budget = engine.create_budget(ALICE, january_food(20_00)).await.unwrap();

    for day in [date(2024, 1, 1), date(2024, 1, 31)] {
        let active = engine.active_budgets(ALICE, day).await.unwrap();
        assert_eq!(active, vec![budget.clone()]);
        assert!(budget.covers(day));
    }
    assert!(
        engine
            .active_budgets(ALICE, date(2024, 2, 1))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn update_budget_overwrites_amount_and_window() {
    let (engine, _db) = engine_with_db().await;
    let budget = engine.create_budget(ALICE, january_food(20_00)).await.unwrap();

    let updated = engine
        .update_budget(budget.id, Money::new(40_00), date(2024, 1, 1), date(2024, 2, 29))
        .await
        .unwrap();
    assert_eq!(updated.amount, Money::new(40_00));
    assert_eq!(updated.end_date, date(2024, 2, 29));
    assert_eq!(updated.category, budget.category);
    assert_eq!(updated.period, budget.period);

    let err = engine
        .update_budget(999, Money::new(1_00), date(2024, 1, 1), date(2024, 1, 2))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("budget".to_string()));
}

#[tokio::test]
async fn delete_budget_is_idempotent() {
    let (engine, _db) = engine_with_db().await;
    let budget = engine.create_budget(ALICE, january_food(20_00)).await.unwrap();

    engine.delete_budget(budget.id).await.unwrap();
    engine.delete_budget(budget.id).await.unwrap();
    assert!(
        engine
            .budgets(ALICE, &BudgetFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn budget_status_half_spent() {
    let (engine, _db) = engine_with_db().await;
    engine.create_budget(ALICE, january_food(20_00)).await.unwrap();
    add_expense(&engine, 10_00, "food", date(2024, 1, 5)).await;
    add_expense(&engine, 5_00, "food", date(2024, 2, 1)).await;
    add_expense(&engine, 20_00, "rent", date(2024, 1, 10)).await;

    let statuses = engine.budget_status(ALICE).await.unwrap();
    assert_eq!(statuses.len(), 1);
    let status = &statuses[0];
    assert_eq!(status.spent, Money::new(10_00));
    assert_eq!(status.remaining, Money::new(10_00));
    assert_eq!(status.percentage, 50.0);
}

#[tokio::test]
async fn overall_budget_counts_every_category() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_budget(
            ALICE,
            NewBudget {
                category: None,
                ..january_food(60_00)
            },
        )
        .await
        .unwrap();
    add_expense(&engine, 10_00, "food", date(2024, 1, 5)).await;
    add_expense(&engine, 20_00, "rent", date(2024, 1, 31)).await;

    let status = &engine.budget_status(ALICE).await.unwrap()[0];
    assert_eq!(status.spent, Money::new(30_00));
    assert_eq!(status.remaining, Money::new(30_00));
    assert_eq!(status.percentage, 50.0);
}

#[tokio::test]
async fn budget_status_for_unknown_user_is_empty() {
    let (engine, _db) = engine_with_db().await;
    assert!(engine.budget_status("nobody@x.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_amount_budget_reports_division_by_zero() {
    let (engine, db) = engine_with_db().await;
    let budget = engine.create_budget(ALICE, january_food(20_00)).await.unwrap();

    // Bypass write-time validation to simulate a legacy row.
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE budgets SET amount_minor = 0 WHERE id = ?",
        vec![budget.id.into()],
    ))
    .await
    .unwrap();

    let err = engine.budget_status(ALICE).await.unwrap_err();
    assert!(matches!(err, EngineError::DivisionByZero(_)));
}
