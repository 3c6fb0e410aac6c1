//! Parsing CSV payloads into in-memory tables.

use crate::common::*;
use crate::table::Value;

/// Parse `data` as UTF-8, comma-delimited text with a header row.
///
/// The header fixes the column set. A data row with a different number of
/// fields is an error, which is the `csv` crate's default strictness.
pub(crate) fn parse_csv_table(data: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(data).context("CSV payload is not valid UTF-8")?;
    let mut rdr = csv::Reader::from_reader(text.as_bytes());

    let headers = rdr
        .headers()
        .context("error reading CSV header")?
        .iter()
        .map(|header| header.to_owned())
        .collect::<Vec<_>>();
    if headers.is_empty() {
        return Err(format_err!("CSV payload has no header row"));
    }

    let mut table = Table::new(headers);
    for (idx, record) in rdr.records().enumerate() {
        let record =
            record.with_context(|| format!("error parsing CSV record {}", idx + 1))?;
        let row = record.iter().map(Value::from_csv_cell).collect();
        table
            .push_row(row)
            .with_context(|| format!("error in CSV record {}", idx + 1))?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_csv_parses_in_header_order() {
        let table = parse_csv_table(b"id,name,score\n1,alice,3.5\n2,bob,\n3,carol,10\n")
            .unwrap();
        assert_eq!(table.headers(), &["id", "name", "score"]);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.rows()[1],
            vec![Value::Int(2), Value::Text("bob".to_owned()), Value::Null],
        );
    }

    #[test]
    fn quoted_fields_may_contain_delimiters() {
        let table = parse_csv_table(b"a,b\n\"x,y\",\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(
            table.rows()[0],
            vec![
                Value::Text("x,y".to_owned()),
                Value::Text("say \"hi\"".to_owned()),
            ],
        );
    }

    #[test]
    fn header_only_csv_yields_a_zero_row_table() {
        let table = parse_csv_table(b"id,name\n").unwrap();
        assert_eq!(table.headers(), &["id", "name"]);
        assert!(table.is_empty());
    }

    #[test]
    fn inconsistent_column_counts_are_an_error() {
        assert!(parse_csv_table(b"a,b\n1,2\n1,2,3\n").is_err());
        assert!(parse_csv_table(b"a,b\n1\n").is_err());
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(parse_csv_table(b"").is_err());
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        assert!(parse_csv_table(b"a,b\n\xff\xfe,1\n").is_err());
    }
}
