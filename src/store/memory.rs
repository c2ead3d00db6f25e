use super::{filter_text, Row, Table};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Default)]
struct TableData {
    next_id: i64,
    rows: Vec<Row>,
}

/// Process-local tables with auto-increment integer ids.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<FxHashMap<Table, TableData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, table: Table, mut row: Row) -> Row {
        let mut tables = self.tables.write();
        let data = tables.entry(table).or_default();
        data.next_id += 1;
        row.insert("id".to_string(), Value::from(data.next_id));
        data.rows.push(row.clone());
        row
    }

    pub fn select_eq(&self, table: Table, column: &str, value: &Value) -> Vec<Row> {
        let tables = self.tables.read();
        tables
            .get(&table)
            .map(|data| {
                data.rows
                    .iter()
                    .filter(|row| matches(row, column, value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn update_eq(&self, table: Table, column: &str, value: &Value, changes: Row) -> Vec<Row> {
        let mut tables = self.tables.write();
        let Some(data) = tables.get_mut(&table) else {
            return Vec::new();
        };

        let mut updated = Vec::new();
        for row in data.rows.iter_mut().filter(|row| matches(row, column, value)) {
            for (key, new_value) in &changes {
                row.insert(key.clone(), new_value.clone());
            }
            updated.push(row.clone());
        }
        updated
    }

    pub fn top_by(&self, table: Table, column: &str, limit: usize) -> Vec<Row> {
        let tables = self.tables.read();
        let mut rows: Vec<Row> = tables.get(&table).map(|data| data.rows.clone()).unwrap_or_default();
        rows.sort_by(|a, b| compare_desc(a.get(column), b.get(column)));
        rows.truncate(limit);
        rows
    }
}

// Ids arrive as numbers from the store but as strings from some clients,
// so equality goes through the filter text like the hosted backend.
fn matches(row: &Row, column: &str, value: &Value) -> bool {
    row.get(column).is_some_and(|v| filter_text(v) == filter_text(value))
}

// Nulls and non-numbers sort last.
fn compare_desc(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.and_then(Value::as_f64);
    let b = b.and_then(Value::as_f64);
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
