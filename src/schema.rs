//! The destination schema we infer from a parsed table.

use std::fmt;

use crate::common::*;
use crate::table::Value;

/// The PostgreSQL data type of an inferred column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DataType {
    /// 8-byte integer.
    BigInt,
    /// 8-byte float.
    DoublePrecision,
    /// A text type.
    Text,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::BigInt => "bigint".fmt(f),
            DataType::DoublePrecision => "double precision".fmt(f),
            DataType::Text => "text".fmt(f),
        }
    }
}

/// Information about an inferred column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Column {
    /// The name of the column, taken from the CSV header.
    pub(crate) name: String,
    /// Can this column be `NULL`?
    pub(crate) is_nullable: bool,
    /// The data type of this column.
    pub(crate) data_type: DataType,
}

/// Infer a destination schema from the values in `table`, one column per
/// header, in header order.
///
/// A column is `bigint` if every non-null value is an integer, `double
/// precision` if every non-null value is numeric, and `text` otherwise. A
/// column with no non-null values at all becomes nullable `text`.
pub(crate) fn infer_schema(table: &Table) -> Vec<Column> {
    table
        .headers()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let mut saw_null = false;
            let mut saw_float = false;
            let mut saw_text = false;
            let mut saw_value = false;
            for value in table.column(idx) {
                match value {
                    Value::Null => saw_null = true,
                    Value::Int(_) => saw_value = true,
                    Value::Float(_) => {
                        saw_value = true;
                        saw_float = true;
                    }
                    Value::Text(_) => {
                        saw_value = true;
                        saw_text = true;
                    }
                }
            }
            let data_type = if !saw_value || saw_text {
                DataType::Text
            } else if saw_float {
                DataType::DoublePrecision
            } else {
                DataType::BigInt
            };
            Column {
                name: name.to_owned(),
                is_nullable: saw_null || !saw_value,
                data_type,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_data::parse_csv_table;

    fn column(name: &str, is_nullable: bool, data_type: DataType) -> Column {
        Column {
            name: name.to_owned(),
            is_nullable,
            data_type,
        }
    }

    #[test]
    fn inference_follows_column_contents() {
        let table = parse_csv_table(
            b"ints,floats,mixed_numeric,text,with_nulls,all_null\n\
              1,1.5,1,x,1,\n\
              2,2.5,2.5,2,,\n",
        )
        .unwrap();
        assert_eq!(
            infer_schema(&table),
            vec![
                column("ints", false, DataType::BigInt),
                column("floats", false, DataType::DoublePrecision),
                column("mixed_numeric", false, DataType::DoublePrecision),
                column("text", false, DataType::Text),
                column("with_nulls", true, DataType::BigInt),
                column("all_null", true, DataType::Text),
            ],
        );
    }

    #[test]
    fn header_only_table_infers_nullable_text() {
        let table = parse_csv_table(b"a,b\n").unwrap();
        assert_eq!(
            infer_schema(&table),
            vec![
                column("a", true, DataType::Text),
                column("b", true, DataType::Text),
            ],
        );
    }
}
