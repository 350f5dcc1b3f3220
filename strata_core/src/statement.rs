/// Terminates each statement inside a migration file.
pub const STATEMENT_SEPARATOR: char = ';';

/// Split the contents of a migration file into the statements to execute, in order.
///
/// Splitting is purely textual: a `;` inside a string literal, a comment or a trigger body also
/// ends the statement. Files that need one of those must be kept free of semicolons.
pub fn split_statements(sql: &str) -> Vec<&str> {
    sql.split(STATEMENT_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let sql = "CREATE TABLE t (id int);\n\nALTER TABLE t ADD COLUMN v text;\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE t (id int)", "ALTER TABLE t ADD COLUMN v text"]
        );
    }

    #[test]
    fn test_split_skips_blank() {
        assert!(split_statements("").is_empty());
        assert!(split_statements(" ;\n;\t; ").is_empty());
        assert_eq!(split_statements(";;SELECT 1;;"), vec!["SELECT 1"]);
    }

    #[test]
    fn test_missing_final_separator() {
        assert_eq!(
            split_statements("SELECT 1; SELECT 2"),
            vec!["SELECT 1", "SELECT 2"]
        );
    }

    #[test]
    fn test_semicolon_in_literal_splits() {
        assert_eq!(
            split_statements("INSERT INTO t (v) VALUES ('a;b');"),
            vec!["INSERT INTO t (v) VALUES ('a", "b')"]
        );
    }
}
