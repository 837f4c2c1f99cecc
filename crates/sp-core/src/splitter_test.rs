use super::*;

#[test]
fn test_split_two_statements() {
    assert_eq!(
        split_statements("INSERT INTO t VALUES ('a;b'); SELECT 1;"),
        vec!["INSERT INTO t VALUES ('a;b')", "SELECT 1"]
    );
}

#[test]
fn test_semicolon_inside_string_is_not_a_boundary() {
    assert_eq!(
        split_statements("SELECT 'x; y; z'"),
        vec!["SELECT 'x; y; z'"]
    );
}

#[test]
fn test_escaped_quote_does_not_toggle() {
    assert_eq!(
        split_statements(r"INSERT INTO t VALUES ('it\'s; fine'); SELECT 2"),
        vec![r"INSERT INTO t VALUES ('it\'s; fine')", "SELECT 2"]
    );
}

#[test]
fn test_adjacent_semicolons_collapse() {
    assert_eq!(
        split_statements("SELECT 1;;; SELECT 2;;"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_missing_trailing_semicolon() {
    assert_eq!(
        split_statements("SELECT 1;\nSELECT 2"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_dash_line_comment() {
    assert_eq!(
        split_statements("SELECT 1; -- c\nSELECT 2;"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_hash_line_comment() {
    assert_eq!(
        split_statements("# header\nSELECT 1; # trailing ; semicolon\nSELECT 2;"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_block_comment_spans_newlines() {
    assert_eq!(
        split_statements("/* first;\nsecond; */ SELECT 1;"),
        vec!["SELECT 1"]
    );
}

#[test]
fn test_unterminated_block_comment_swallows_rest() {
    assert_eq!(split_statements("SELECT 1; /* open"), vec!["SELECT 1"]);
}

#[test]
fn test_double_dash_without_space_is_kept() {
    assert_eq!(split_statements("SELECT 5--3;"), vec!["SELECT 5--3"]);
}

#[test]
fn test_double_dash_at_end_of_line_is_a_comment() {
    assert_eq!(
        split_statements("SELECT 1; --\nSELECT 2;"),
        vec!["SELECT 1", "SELECT 2"]
    );
}

#[test]
fn test_empty_input() {
    assert!(split_statements("").is_empty());
    assert!(split_statements("   \n\t  ").is_empty());
}

#[test]
fn test_comment_only_input() {
    assert!(split_statements("-- nothing here\n# or here\n/* or here */").is_empty());
}

#[test]
fn test_order_preserved() {
    let sql = "CREATE TABLE t (id INT);\nINSERT INTO t VALUES (1);\nDROP TABLE t;";
    assert_eq!(
        split_statements(sql),
        vec![
            "CREATE TABLE t (id INT)",
            "INSERT INTO t VALUES (1)",
            "DROP TABLE t"
        ]
    );
}
