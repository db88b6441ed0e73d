use sql_dal::prelude::*;

async fn db_with_accounts() -> Result<DbClient, DbError> {
    let mut db = DbClient::open(DbConfig::in_memory()).await?;
    db.execute_batch(
        "CREATE TABLE accounts (
            id INTEGER PRIMARY KEY,
            owner TEXT UNIQUE NOT NULL,
            balance INTEGER NOT NULL
        );",
    )
    .await?;
    Ok(db)
}

#[tokio::test]
async fn begin_while_active_fails() -> Result<(), DbError> {
    let mut db = db_with_accounts().await?;
    db.begin_transaction().await?;
    assert!(db.in_transaction());

    let err = db.begin_transaction().await.unwrap_err();
    assert!(matches!(err, DbError::TransactionError(_)));
    // The original transaction is still usable.
    assert!(db.in_transaction());
    db.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn commit_and_rollback_require_an_active_transaction() -> Result<(), DbError> {
    let mut db = db_with_accounts().await?;
    assert!(matches!(
        db.commit().await,
        Err(DbError::TransactionError(_))
    ));
    assert!(matches!(
        db.rollback().await,
        Err(DbError::TransactionError(_))
    ));
    Ok(())
}

#[tokio::test]
async fn committed_writes_are_visible() -> Result<(), DbError> {
    let mut db = db_with_accounts().await?;
    db.begin_transaction().await?;
    db.insert(
        "accounts",
        &ValueMap::new()
            .set("owner", SqlValue::Text("alice".into()))
            .set("balance", SqlValue::Int(100)),
    )
    .await?;
    db.commit().await?;
    assert!(!db.in_transaction());
    assert_eq!(db.count("accounts", &ConditionSet::new()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn rolled_back_writes_are_discarded() -> Result<(), DbError> {
    let mut db = db_with_accounts().await?;
    db.begin_transaction().await?;
    db.insert(
        "accounts",
        &ValueMap::new()
            .set("owner", SqlValue::Text("alice".into()))
            .set("balance", SqlValue::Int(100)),
    )
    .await?;
    db.rollback().await?;
    assert!(!db.in_transaction());
    assert_eq!(db.count("accounts", &ConditionSet::new()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn rollback_after_a_failed_statement_returns_to_idle() -> Result<(), DbError> {
    let mut db = db_with_accounts().await?;
    db.insert(
        "accounts",
        &ValueMap::new()
            .set("owner", SqlValue::Text("alice".into()))
            .set("balance", SqlValue::Int(100)),
    )
    .await?;

    db.begin_transaction().await?;
    // Unique constraint violation inside the transaction.
    let failed = db
        .insert(
            "accounts",
            &ValueMap::new()
                .set("owner", SqlValue::Text("alice".into()))
                .set("balance", SqlValue::Int(7)),
        )
        .await;
    assert!(failed.is_err());

    db.rollback().await?;
    assert!(!db.in_transaction());

    // A fresh transaction can start and complete normally.
    db.begin_transaction().await?;
    db.insert(
        "accounts",
        &ValueMap::new()
            .set("owner", SqlValue::Text("bob".into()))
            .set("balance", SqlValue::Int(50)),
    )
    .await?;
    db.commit().await?;
    assert_eq!(db.count("accounts", &ConditionSet::new()).await?, 2);
    Ok(())
}

#[tokio::test]
async fn updates_inside_a_transaction_are_atomic() -> Result<(), DbError> {
    let mut db = db_with_accounts().await?;
    for (owner, balance) in [("alice", 100), ("bob", 20)] {
        db.insert(
            "accounts",
            &ValueMap::new()
                .set("owner", SqlValue::Text(owner.into()))
                .set("balance", SqlValue::Int(balance)),
        )
        .await?;
    }

    db.begin_transaction().await?;
    db.execute_raw(
        "UPDATE accounts SET balance = balance - ? WHERE owner = ?",
        &[SqlValue::Int(30), SqlValue::Text("alice".into())],
    )
    .await?;
    db.execute_raw(
        "UPDATE accounts SET balance = balance + ? WHERE owner = ?",
        &[SqlValue::Int(30), SqlValue::Text("bob".into())],
    )
    .await?;
    db.rollback().await?;

    // Neither leg of the transfer survived the rollback.
    let alice = db
        .select_one(
            "accounts",
            &["balance"],
            &ConditionSet::new().with("owner", Condition::Equals(SqlValue::Text("alice".into()))),
        )
        .await?
        .expect("row");
    assert_eq!(alice.get("balance").unwrap().as_int(), Some(&100));
    Ok(())
}
