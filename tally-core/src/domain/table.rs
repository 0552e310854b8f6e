// tally-core/src/domain/table.rs

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::domain::error::{DomainError, QueryError};
use crate::error::TallyError;

/// A scalar cell value, independent of the engine that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view, integers widened to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            // Debug keeps the trailing ".0" so AVG results read as floats
            Value::Real(v) => write!(f, "{:?}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Result set of one query: ordered rows over uniquely named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TallyError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(QueryError::DuplicateColumn(name.clone()).into());
            }
        }

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DomainError::RowWidthMismatch {
                    row: idx,
                    expected: columns.len(),
                    actual: row.len(),
                }
                .into());
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// All values of one column, in row order. `None` if the column is unknown.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Display truncation: the first `n` rows, same columns, same order.
    pub fn head(&self, n: usize) -> ResultTable {
        ResultTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// (column, value) pairs in column order.
    pub fn iter(self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

// Rows serialize as maps written in column order (serde_json::Map would sort keys).
impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for ResultTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn countries(n: usize) -> Result<ResultTable> {
        let rows = (0..n)
            .map(|i| vec![Value::Text(format!("Country {i}")), Value::Integer(i as i64)])
            .collect();
        Ok(ResultTable::new(
            vec!["country".into(), "customer_count".into()],
            rows,
        )?)
    }

    #[test]
    fn test_head_keeps_first_rows_in_order() -> Result<()> {
        let table = countries(15)?;
        let head = table.head(10);

        assert_eq!(head.len(), 10);
        assert_eq!(head.columns(), table.columns());
        for i in 0..10 {
            assert_eq!(
                head.row(i).unwrap().values(),
                table.row(i).unwrap().values()
            );
        }
        // the source table is untouched
        assert_eq!(table.len(), 15);
        Ok(())
    }

    #[test]
    fn test_head_larger_than_table() -> Result<()> {
        let table = countries(3)?;
        assert_eq!(table.head(10), table);
        assert!(table.head(0).is_empty());
        Ok(())
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let result = ResultTable::new(vec!["a".into(), "a".into()], vec![]);
        assert!(matches!(
            result,
            Err(TallyError::Query(QueryError::DuplicateColumn(ref c))) if c == "a"
        ));
    }

    #[test]
    fn test_row_width_checked() {
        let result = ResultTable::new(vec!["a".into(), "b".into()], vec![vec![Value::Null]]);
        assert!(matches!(
            result,
            Err(TallyError::Domain(DomainError::RowWidthMismatch {
                row: 0,
                expected: 2,
                actual: 1
            }))
        ));
    }

    #[test]
    fn test_lookup_by_name() -> Result<()> {
        let table = countries(4)?;
        let row = table.row(2).unwrap();
        assert_eq!(row.get("country"), Some(&Value::Text("Country 2".into())));
        assert_eq!(row.get("missing"), None);

        let counts: Vec<i64> = table
            .column("customer_count")
            .unwrap()
            .filter_map(Value::as_i64)
            .collect();
        assert_eq!(counts, vec![0, 1, 2, 3]);
        assert!(table.column("nope").is_none());
        Ok(())
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Real(55000.0).to_string(), "55000.0");
        assert_eq!(Value::Real(0.5).to_string(), "0.5");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Text("France".into()).to_string(), "France");
    }

    #[test]
    fn test_json_keeps_column_order() -> Result<()> {
        let table = ResultTable::new(
            vec!["zeta".into(), "alpha".into()],
            vec![vec![Value::Integer(1), Value::Null]],
        )?;
        let json = serde_json::to_string(&table)?;
        insta::assert_snapshot!(json, @r#"[{"zeta":1,"alpha":null}]"#);
        Ok(())
    }
}
