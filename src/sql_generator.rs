/// load options used when the caller supplies none.
pub const DEFAULT_LOAD_OPTIONS: &str = "DELIMITER ',' CSV HEADER";

/// generates a postgres `create table` statement. the optional primary key comes first as
/// `serial`, then every header column as nullable `text`, in header order.
pub fn generate_create_table<S: AsRef<str>>(
    table_name: &str,
    pk_column: Option<&str>,
    columns: &[S],
) -> String {
    let mut ddl = format!("create table {} (\n", table_name);

    // names are emitted verbatim, no quoting and no uniqueness check.
    let mut lines: Vec<String> = Vec::with_capacity(columns.len() + 1);
    if let Some(pk) = pk_column {
        lines.push(format!("\t {} \t serial", pk));
    }
    lines.extend(columns.iter().map(|c| format!("\t {} \t text", c.as_ref())));

    ddl.push_str(&lines.join(",\n"));
    ddl.push_str("\n);\n");
    ddl
}

/// generates a psql `\copy` directive. the column list must keep the header's order since
/// the load is positional.
pub fn generate_load_statement<S: AsRef<str>>(
    table_name: &str,
    columns: &[S],
    source_path: &str,
    options: &str,
) -> String {
    let column_list: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
    format!(
        "\\copy {}({}) from '{}' {};\n",
        table_name,
        column_list.join(", "),
        source_path,
        options
    )
}

/// the full artifact: the ddl followed by the load directive.
pub fn render_statements<S: AsRef<str>>(
    table_name: &str,
    pk_column: Option<&str>,
    columns: &[S],
    source_path: &str,
    options: &str,
) -> String {
    let mut sql = generate_create_table(table_name, pk_column, columns);
    sql.push_str(&generate_load_statement(table_name, columns, source_path, options));
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    // pulls column names back out of a generated ddl, skipping the serial key.
    fn parse_columns(ddl: &str) -> Vec<String> {
        ddl.lines()
            .skip(1)
            .take_while(|line| *line != ");")
            .filter_map(|line| {
                let mut parts = line.trim().trim_end_matches(',').split_whitespace();
                let name = parts.next()?;
                match parts.next() {
                    Some("text") => Some(name.to_string()),
                    _ => None,
                }
            })
            .collect()
    }

    fn squash(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_create_table_exact_format() {
        let ddl = generate_create_table("t", None, &["id", "name", "amount"]);
        assert_eq!(
            ddl,
            "create table t (\n\t id \t text,\n\t name \t text,\n\t amount \t text\n);\n"
        );
    }

    #[test]
    fn test_create_table_without_pk() {
        let ddl = generate_create_table("t", None, &["id", "name", "amount"]);
        assert_eq!(
            squash(&ddl),
            "create table t ( id text, name text, amount text );"
        );
        assert!(!ddl.contains("serial"));
    }

    #[test]
    fn test_create_table_with_pk() {
        let ddl = generate_create_table("t", Some("rowid"), &["id", "name", "amount"]);
        assert_eq!(
            ddl,
            concat!(
                "create table t (\n\t rowid \t serial,\n",
                "\t id \t text,\n\t name \t text,\n\t amount \t text\n);\n",
            )
        );
        assert!(ddl.lines().nth(1).unwrap().contains("rowid \t serial"));
    }

    #[test]
    fn test_create_table_single_column() {
        let ddl = generate_create_table("orders", None, &["only"]);
        assert_eq!(ddl, "create table orders (\n\t only \t text\n);\n");
    }

    #[test]
    fn test_create_table_keeps_names_verbatim() {
        // duplicates and unsafe identifiers pass straight through
        let ddl = generate_create_table("t", None, &["a b", "a b"]);
        assert_eq!(ddl, "create table t (\n\t a b \t text,\n\t a b \t text\n);\n");
    }

    #[test]
    fn test_create_table_round_trips_column_order() {
        let columns = vec!["zeta".to_string(), "alpha".into(), "mid".into(), "b2".into()];
        let ddl = generate_create_table("t", Some("pk"), &columns);
        assert_eq!(parse_columns(&ddl), columns);
    }

    #[test]
    fn test_load_statement_format() {
        let load =
            generate_load_statement("t", &["id", "name"], "data.csv", DEFAULT_LOAD_OPTIONS);
        assert_eq!(
            load,
            "\\copy t(id, name) from 'data.csv' DELIMITER ',' CSV HEADER;\n"
        );
    }

    #[test]
    fn test_load_statement_appends_options_verbatim() {
        let load =
            generate_load_statement("t", &["b", "a"], "dir/x.csv", "CSV HEADER DELIMITER ';'");
        assert_eq!(
            load,
            "\\copy t(b, a) from 'dir/x.csv' CSV HEADER DELIMITER ';';\n"
        );
    }

    #[test]
    fn test_render_statements_is_idempotent() {
        let columns = ["id", "name"];
        let render = || {
            render_statements("t", Some("rid"), &columns, "csv2pg-t.csv", DEFAULT_LOAD_OPTIONS)
        };
        let first = render();
        let second = render();
        assert_eq!(first, second);
        assert!(first.starts_with("create table t (\n"));
        assert!(
            first.ends_with("\\copy t(id, name) from 'csv2pg-t.csv' DELIMITER ',' CSV HEADER;\n")
        );
    }
}
