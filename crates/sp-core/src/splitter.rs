//! Raw-SQL statement splitter
//!
//! Turns the text of a patch file into an ordered list of executable
//! statements: comments are stripped first, then the remaining text is
//! split on `;` boundaries outside single-quoted string literals.
//!
//! This is a heuristic lexical splitter, not a SQL parser. It can mis-split
//! on deeply nested escaping edge cases, and comment stripping is not
//! quote-aware; callers that need strict correctness should supply
//! pre-split statements instead of raw files.

/// Split raw SQL text into trimmed, non-empty statements.
///
/// An unescaped `'` toggles the in-string state; a backslash suppresses the
/// special meaning of the following character, so `\'` does not toggle.
/// Runs of adjacent `;` collapse to a single boundary.
pub fn split_statements(input: &str) -> Vec<String> {
    let stripped = strip_comments(input);

    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in stripped.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                current.push(c);
                escaped = true;
            }
            '\'' => {
                current.push(c);
                in_string = !in_string;
            }
            ';' if !in_string => {
                push_statement(&mut statements, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_statement(&mut statements, &current);

    statements
}

/// Remove comments from raw SQL text.
///
/// Block comments (`/* ... */`) may span newlines. Line comments start with
/// `#`, or with `--` followed by a space (or the end of the line), and run
/// to the end of the line; the newline itself is kept.
fn strip_comments(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                // an unterminated block comment swallows the rest
                while i < chars.len() {
                    if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '-' if chars.get(i + 1) == Some(&'-') && starts_line_comment(chars.get(i + 2)) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Whether the character after `--` makes it a line comment.
fn starts_line_comment(next: Option<&char>) -> bool {
    matches!(next, None | Some(' ' | '\t' | '\r' | '\n'))
}

fn push_statement(statements: &mut Vec<String>, fragment: &str) {
    let statement = fragment.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
