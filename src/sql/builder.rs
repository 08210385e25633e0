//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the resource tables.

use super::params::BindValue;

/// A resource table: name plus its writable columns, in bind order. `id` is implicit.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const CHARACTERS: Table = Table {
    name: "characters",
    columns: &["name", "description", "age"],
};

pub const DROIDS: Table = Table {
    name: "droids",
    columns: &["name", "description", "belongs"],
};

/// Quote identifier for PostgreSQL (safe: only from table descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its placeholder (`$1`, `$2`, ...).
    fn push_param(&mut self, v: BindValue) -> String {
        self.params.push(v);
        format!("${}", self.params.len())
    }
}

/// `"id", "name", ...` for the table.
fn select_column_list(table: &Table) -> String {
    std::iter::once("id")
        .chain(table.columns.iter().copied())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row. No ORDER BY: rows come back in whatever order the scan yields.
pub fn select_all(table: &Table) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", select_column_list(table), quoted(table.name));
    q
}

/// SELECT with bound LIMIT and OFFSET.
pub fn select_page(table: &Table, limit: i64, offset: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let limit_ph = q.push_param(BindValue::Int(limit));
    let offset_ph = q.push_param(BindValue::Int(offset));
    q.sql = format!(
        "SELECT {} FROM {} LIMIT {} OFFSET {}",
        select_column_list(table),
        quoted(table.name),
        limit_ph,
        offset_ph
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" = {}",
        select_column_list(table),
        quoted(table.name),
        ph
    );
    q
}

/// SELECT rows whose `name` contains `needle` as a literal substring.
pub fn select_name_contains(table: &Table, needle: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::Text(like_contains(needle)));
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"name\" LIKE {} ESCAPE '\\'",
        select_column_list(table),
        quoted(table.name),
        ph
    );
    q
}

/// Wrap `needle` in `%` after escaping LIKE metacharacters, so `50%` only matches a literal `50%`.
fn like_contains(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// INSERT all writable columns; `values` must follow `table.columns` order. Returns the generated id.
pub fn insert(table: &Table, values: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(values.len(), table.columns.len());
    let mut q = QueryBuf::new();
    let cols: Vec<String> = table.columns.iter().map(|c| quoted(c)).collect();
    let placeholders: Vec<String> = values.into_iter().map(|v| q.push_param(v)).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING \"id\"",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE every writable column of one row by id.
pub fn update(table: &Table, id: i64, values: Vec<BindValue>) -> QueryBuf {
    debug_assert_eq!(values.len(), table.columns.len());
    let mut q = QueryBuf::new();
    let sets: Vec<String> = table
        .columns
        .iter()
        .zip(values)
        .map(|(col, v)| format!("{} = {}", quoted(col), q.push_param(v)))
        .collect();
    let id_ph = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = {}",
        quoted(table.name),
        sets.join(", "),
        id_ph
    );
    q
}

/// DELETE by id.
pub fn delete(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(BindValue::Int(id));
    q.sql = format!("DELETE FROM {} WHERE \"id\" = {}", quoted(table.name), ph);
    q
}
