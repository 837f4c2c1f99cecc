use super::*;
use crate::test_utils::MockDb;
use std::sync::{Arc, Mutex};

fn batch(statements: &[&str]) -> Vec<String> {
    statements.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_batch_commits_on_success() {
    let db = MockDb::new();
    let statements = batch(&["CREATE TABLE a (id INT)", "INSERT INTO a VALUES (1)"]);

    let stats = execute_batch(&db, &statements, None).await.unwrap();

    assert_eq!(stats.count, 2);
    assert_eq!(stats.error_count, 0);
    assert_eq!(stats.affected_rows, 2);
    assert!(stats.is_success());
    assert_eq!(
        db.calls(),
        vec![
            "BEGIN",
            "CREATE TABLE a (id INT)",
            "INSERT INTO a VALUES (1)",
            "COMMIT"
        ]
    );
}

#[tokio::test]
async fn test_failure_rolls_back_and_stops() {
    let db = MockDb::failing_on("boom");
    let statements = batch(&["INSERT INTO a VALUES (1)", "boom", "INSERT INTO a VALUES (2)"]);

    let stats = execute_batch(&db, &statements, None).await.unwrap();

    assert_eq!(stats.count, 2);
    assert_eq!(stats.error_count, 1);
    assert!(!stats.is_success());
    // the failing statement stopped the batch; the third never ran
    assert_eq!(db.calls(), vec!["BEGIN", "INSERT INTO a VALUES (1)", "ROLLBACK"]);
}

#[tokio::test]
async fn test_negative_affected_rows_are_ignored() {
    let db = MockDb::new().with_affected(-1);
    let statements = batch(&["SELECT 1 UNION SELECT 2"]);

    let stats = execute_batch(&db, &statements, None).await.unwrap();

    assert_eq!(stats.count, 1);
    assert_eq!(stats.affected_rows, 0);
    assert!(stats.is_success());
}

#[tokio::test]
async fn test_warnings_accumulate_without_rollback() {
    let db = MockDb::new().with_warnings(1);
    let statements = batch(&["INSERT INTO a VALUES (1)", "INSERT INTO a VALUES (2)"]);

    let stats = execute_batch(&db, &statements, None).await.unwrap();

    assert_eq!(stats.error_count, 2);
    assert!(!stats.is_success());
    // warnings mark the batch failed but never abort it
    assert_eq!(db.calls().last().map(String::as_str), Some("COMMIT"));
}

#[tokio::test]
async fn test_hook_sees_each_statement_before_execution() {
    let db = MockDb::new();
    let statements = batch(&["SELECT 1", "SELECT 2"]);

    let seen: Arc<Mutex<Vec<(usize, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_hook = Arc::clone(&seen);
    let hook = move |index: usize, statement: &str| {
        seen_hook.lock().unwrap().push((index, statement.to_string()));
    };

    execute_batch(&db, &statements, Some(&hook)).await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(1, "SELECT 1".to_string()), (2, "SELECT 2".to_string())]
    );
}

#[tokio::test]
async fn test_empty_batch_commits_nothing() {
    let db = MockDb::new();

    let stats = execute_batch(&db, &[], None).await.unwrap();

    assert_eq!(stats.count, 0);
    assert_eq!(stats.affected_rows, 0);
    assert!(stats.is_success());
    assert_eq!(db.calls(), vec!["BEGIN", "COMMIT"]);
}
