//! The in-memory table passed from the parser to the loader.

use std::borrow::Cow;

use crate::common::*;

/// A single scalar cell value.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value {
    /// An SQL `NULL`, parsed from an empty cell.
    Null,
    /// A value which parsed cleanly as a 64-bit integer.
    Int(i64),
    /// A value which parsed as a float but not as an integer.
    Float(f64),
    /// Anything else.
    Text(String),
}

impl Value {
    /// Parse the contents of a CSV cell, trying the narrowest type first.
    pub(crate) fn from_csv_cell(cell: &str) -> Value {
        if cell.is_empty() {
            Value::Null
        } else if let Ok(i) = cell.parse::<i64>() {
            Value::Int(i)
        } else if let Ok(f) = cell.parse::<f64>() {
            Value::Float(f)
        } else {
            Value::Text(cell.to_owned())
        }
    }

    /// Serialize this value as a CSV cell for PostgreSQL's `COPY`, which
    /// reads an empty unquoted field as `NULL`.
    pub(crate) fn to_csv_cell(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(f.to_string()),
            Value::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// An ordered set of named columns, and the rows that go with them.
///
/// Invariant: every row has exactly `headers.len()` cells.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table with the specified column names and no rows.
    pub(crate) fn new(headers: Vec<String>) -> Table {
        Table {
            headers,
            rows: vec![],
        }
    }

    /// Add a row, which must match the header width.
    pub(crate) fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(format_err!(
                "expected {} columns, found {}",
                self.headers.len(),
                row.len(),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// The column names, in source order.
    pub(crate) fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All data rows, in source order.
    pub(crate) fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// The number of data rows.
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Does this table have zero data rows?
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The values in column `idx`, top to bottom.
    pub(crate) fn column(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Format the first `limit` rows as a fixed-width text table.
    pub(crate) fn preview(&self, limit: usize) -> String {
        let rows = &self.rows[..self.rows.len().min(limit)];
        let rendered = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| value.to_csv_cell().into_owned())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut widths = self.headers.iter().map(|h| h.len()).collect::<Vec<_>>();
        for row in &rendered {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths, " | ");
        let dashes = widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>();
        push_line(&mut out, &dashes, &widths, "-+-");
        for row in &rendered {
            push_line(&mut out, row, &widths, " | ");
        }
        out
    }
}

/// Append one padded, separated preview line to `out`.
fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize], sep: &str) {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line.push_str(sep);
        }
        line.push_str(cell.as_ref());
        if idx + 1 < cells.len() {
            for _ in cell.as_ref().len()..widths[idx] {
                line.push(' ');
            }
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cells_parse_to_the_narrowest_type() {
        let examples = [
            ("", Value::Null),
            ("0", Value::Int(0)),
            ("-42", Value::Int(-42)),
            ("007", Value::Int(7)),
            ("3.5", Value::Float(3.5)),
            ("-0.25", Value::Float(-0.25)),
            ("1e3", Value::Float(1000.0)),
            ("hello", Value::Text("hello".to_owned())),
            ("2021-01-01", Value::Text("2021-01-01".to_owned())),
            (" 1", Value::Text(" 1".to_owned())),
        ];
        for (cell, expected) in &examples {
            assert_eq!(&Value::from_csv_cell(cell), expected, "cell {:?}", cell);
        }
    }

    #[test]
    fn cells_round_trip_through_csv_form() {
        let examples = [
            (Value::Null, ""),
            (Value::Int(-42), "-42"),
            (Value::Float(3.5), "3.5"),
            (Value::Text("a,b".to_owned()), "a,b"),
        ];
        for (value, expected) in &examples {
            assert_eq!(value.to_csv_cell(), *expected);
        }
    }

    #[test]
    fn rows_must_match_the_header_width() {
        let mut table = Table::new(vec!["a".to_owned(), "b".to_owned()]);
        table
            .push_row(vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        assert!(table.push_row(vec![Value::Int(1)]).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn preview_is_a_fixed_width_table() {
        let mut table = Table::new(vec![
            "id".to_owned(),
            "name".to_owned(),
            "score".to_owned(),
        ]);
        table
            .push_row(vec![
                Value::Int(1),
                Value::Text("alice".to_owned()),
                Value::Float(3.5),
            ])
            .unwrap();
        table
            .push_row(vec![
                Value::Int(2),
                Value::Text("bob".to_owned()),
                Value::Null,
            ])
            .unwrap();
        table
            .push_row(vec![
                Value::Int(3),
                Value::Text("carol".to_owned()),
                Value::Float(10.0),
            ])
            .unwrap();

        let expected = "\
id | name  | score
---+-------+------
1  | alice | 3.5
2  | bob   |
";
        assert_eq!(table.preview(2), expected);
    }
}
