mod common;

use common::{product, setup, widget};
use inventory::{Product, RequestContext};
use rust_decimal::Decimal;
use shared::errors::RepositoryError;

#[tokio::test]
async fn test_create_then_find_round_trips() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("Failed to create product");

    let found = db
        .repo
        .query
        .find_by_id(&ctx, "P1")
        .await
        .expect("Failed to find product");

    assert_eq!(found, Some(widget()));
}

#[tokio::test]
async fn test_widget_lifecycle() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    let found = db.repo.query.find_by_id(&ctx, "P1").await.expect("find");
    assert_eq!(found, Some(widget()));

    db.repo
        .command
        .update_quantity(&ctx, "P1", 7)
        .await
        .expect("update quantity");

    let found = db
        .repo
        .query
        .find_by_id(&ctx, "P1")
        .await
        .expect("find")
        .expect("row exists");
    assert_eq!(found.quantity, 7);
    assert_eq!(found.name, "Widget");
    assert_eq!(found.price, Decimal::new(250, 2));

    let deleted = db
        .repo
        .command
        .delete_product(&ctx, "P1")
        .await
        .expect("delete");
    assert!(deleted);

    let found = db.repo.query.find_by_id(&ctx, "P1").await.expect("find");
    assert_eq!(found, None);
}

#[tokio::test]
async fn test_duplicate_create_conflicts_and_keeps_first_values() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("first create");

    let second = Product::new("P1", "Gadget", 99, Decimal::new(1_000, 2));
    let err = db
        .repo
        .command
        .create_product(&ctx, &second)
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");

    let stored = db.repo.query.find_by_id(&ctx, "P1").await.expect("find");
    assert_eq!(stored, Some(widget()));
}

#[tokio::test]
async fn test_invalid_product_is_rejected_before_the_store() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    let invalid = Product::new("P9", "", -5, Decimal::new(-1, 0));
    let err = db
        .repo
        .command
        .create_product(&ctx, &invalid)
        .await
        .unwrap_err();

    match err {
        RepositoryError::Validation(messages) => {
            assert_eq!(messages.len(), 3, "messages: {messages:?}");
            assert!(messages.iter().any(|m| m.starts_with("name:")));
            assert!(messages.iter().any(|m| m.starts_with("quantity:")));
            assert!(messages.iter().any(|m| m.starts_with("price:")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert_eq!(db.repo.query.find_by_id(&ctx, "P9").await.expect("find"), None);
}

#[tokio::test]
async fn test_sub_cent_price_round_trips_exactly() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    let product = Product::new("P2", "Bolt", 1, Decimal::new(1_999, 3));
    db.repo
        .command
        .create_product(&ctx, &product)
        .await
        .expect("create");

    let found = db.repo.query.find_by_id(&ctx, "P2").await.expect("find");
    assert_eq!(found, Some(product));
}

#[tokio::test]
async fn test_price_column_holds_the_decimal_value() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    let raw: String = sqlx::query_scalar("SELECT price FROM products WHERE product_id = $1")
        .bind("P1")
        .fetch_one(&db.pool)
        .await
        .expect("raw price");
    assert_eq!(raw, "2.50");
}

#[tokio::test]
async fn test_negative_quantity_update_leaves_row_unchanged() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    let err = db
        .repo
        .command
        .update_quantity(&ctx, "P1", -1)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let stored = db.repo.query.find_by_id(&ctx, "P1").await.expect("find");
    assert_eq!(stored, Some(widget()));
}

#[tokio::test]
async fn test_negative_quantity_update_is_rejected_even_for_missing_ids() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    let err = db
        .repo
        .command
        .update_quantity(&ctx, "ghost", -1)
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn test_updates_on_missing_ids_are_not_found() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    assert_eq!(
        db.repo.command.update_quantity(&ctx, "ghost", 3).await,
        Err(RepositoryError::NotFound)
    );
    assert_eq!(
        db.repo.command.update_name(&ctx, "ghost", "Phantom").await,
        Err(RepositoryError::NotFound)
    );
    assert_eq!(
        db.repo
            .command
            .update_price(&ctx, "ghost", Decimal::new(5, 0))
            .await,
        Err(RepositoryError::NotFound)
    );
}

#[tokio::test]
async fn test_update_name() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    let err = db
        .repo
        .command
        .update_name(&ctx, "P1", "")
        .await
        .unwrap_err();
    assert!(err.is_validation());

    db.repo
        .command
        .update_name(&ctx, "P1", "Widget Pro")
        .await
        .expect("rename");

    let stored = db
        .repo
        .query
        .find_by_id(&ctx, "P1")
        .await
        .expect("find")
        .expect("row exists");
    assert_eq!(stored.name, "Widget Pro");
    assert_eq!(stored.quantity, 10);
}

#[tokio::test]
async fn test_update_price() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    db.repo
        .command
        .update_price(&ctx, "P1", Decimal::new(1_999, 2))
        .await
        .expect("update price");

    let err = db
        .repo
        .command
        .update_price(&ctx, "P1", Decimal::new(-100, 2))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let stored = db
        .repo
        .query
        .find_by_id(&ctx, "P1")
        .await
        .expect("find")
        .expect("row exists");
    assert_eq!(stored.price, Decimal::new(1_999, 2));

    db.repo
        .command
        .update_price(&ctx, "P1", Decimal::new(10_005, 3))
        .await
        .expect("update to a sub-cent price");

    let stored = db
        .repo
        .query
        .find_by_id(&ctx, "P1")
        .await
        .expect("find")
        .expect("row exists");
    assert_eq!(stored.price, Decimal::new(10_005, 3));
}

#[tokio::test]
async fn test_adjust_quantity() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    let quantity = db
        .repo
        .command
        .adjust_quantity(&ctx, "P1", 5)
        .await
        .expect("increase");
    assert_eq!(quantity, 15);

    let quantity = db
        .repo
        .command
        .adjust_quantity(&ctx, "P1", -15)
        .await
        .expect("decrease to zero");
    assert_eq!(quantity, 0);

    let err = db
        .repo
        .command
        .adjust_quantity(&ctx, "P1", -1)
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");

    let stored = db
        .repo
        .query
        .find_by_id(&ctx, "P1")
        .await
        .expect("find")
        .expect("row exists");
    assert_eq!(stored.quantity, 0);

    assert_eq!(
        db.repo.command.adjust_quantity(&ctx, "ghost", 1).await,
        Err(RepositoryError::NotFound)
    );
}

#[tokio::test]
async fn test_adjust_quantity_rejects_overflow_and_keeps_the_row_readable() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    let err = db
        .repo
        .command
        .adjust_quantity(&ctx, "P1", i64::MAX)
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");

    let stored = db.repo.query.find_by_id(&ctx, "P1").await.expect("find");
    assert_eq!(stored, Some(widget()));

    // Landing exactly on the maximum is still allowed.
    let quantity = db
        .repo
        .command
        .adjust_quantity(&ctx, "P1", i64::MAX - 10)
        .await
        .expect("adjust to the maximum");
    assert_eq!(quantity, i64::MAX);

    let err = db
        .repo
        .command
        .adjust_quantity(&ctx, "P1", 1)
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");

    let stored = db
        .repo
        .query
        .find_by_id(&ctx, "P1")
        .await
        .expect("find")
        .expect("row exists");
    assert_eq!(stored.quantity, i64::MAX);
}

#[tokio::test]
async fn test_delete_missing_is_not_an_error() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    let deleted = db
        .repo
        .command
        .delete_product(&ctx, "ghost")
        .await
        .expect("delete");

    assert!(!deleted);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    db.repo
        .command
        .create_product(&ctx, &widget())
        .await
        .expect("create");

    assert_eq!(db.repo.command.delete_product(&ctx, "P1").await, Ok(true));
    assert_eq!(db.repo.command.delete_product(&ctx, "P1").await, Ok(false));
}

#[tokio::test]
async fn test_find_missing_returns_none() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    let found = db
        .repo
        .query
        .find_by_id(&ctx, "ghost")
        .await
        .expect("find");

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_quote_laden_ids_are_treated_as_literal_keys() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    for id in ["1", "2", "A"] {
        db.repo
            .command
            .create_product(&ctx, &product(id))
            .await
            .expect("create");
    }

    let found = db
        .repo
        .query
        .find_by_id(&ctx, "1' OR '1'='1")
        .await
        .expect("find");
    assert_eq!(found, None);

    let found = db
        .repo
        .query
        .find_by_id(&ctx, "x'; DROP TABLE products; --")
        .await
        .expect("find");
    assert_eq!(found, None);

    let deleted = db
        .repo
        .command
        .delete_product(&ctx, "1' OR '1'='1")
        .await
        .expect("delete");
    assert!(!deleted);

    // The table survived and nothing else was touched.
    let all = db
        .repo
        .pager(10)
        .expect("pager")
        .collect_remaining(&ctx)
        .await
        .expect("list");
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_quote_laden_id_round_trips_verbatim() {
    let db = setup(2).await;
    let ctx = RequestContext::new();

    let tricky = Product::new("O'Brien\"; --", "Quoted", 2, Decimal::new(5, 1));
    db.repo
        .command
        .create_product(&ctx, &tricky)
        .await
        .expect("create");

    let found = db
        .repo
        .query
        .find_by_id(&ctx, "O'Brien\"; --")
        .await
        .expect("find");
    assert_eq!(found, Some(tricky));
}

#[tokio::test]
async fn test_concurrent_creates_on_distinct_keys() {
    let db = setup(4).await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let repo = db.repo.clone();
        handles.push(tokio::spawn(async move {
            let ctx = RequestContext::new();
            repo.command
                .create_product(&ctx, &product(&format!("K{i:02}")))
                .await
        }));
    }

    for handle in handles {
        handle.await.expect("task").expect("create");
    }

    let ctx = RequestContext::new();
    let all = db
        .repo
        .pager(5)
        .expect("pager")
        .collect_remaining(&ctx)
        .await
        .expect("list");
    assert_eq!(all.len(), 16);
    assert!(db.pool.size() <= 4);
}
