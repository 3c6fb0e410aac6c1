//! Support for writing the parsed table to PostgreSQL.

use futures::{pin_mut, SinkExt};

use super::{connect, Ident, PgName, PostgresLocator};
use crate::common::*;
use crate::schema::Column;

/// Write `table` to the destination as one bulk `COPY`, first creating or
/// replacing the destination table according to `if_exists`.
///
/// Returns the number of rows written.
#[instrument(level = "debug", skip(ctx, table, columns))]
pub(crate) async fn copy_in_table(
    ctx: &Context,
    dest: &PostgresLocator,
    table: &Table,
    columns: &[Column],
    if_exists: IfExists,
) -> Result<u64> {
    let table_name = dest.table_name();
    let client = connect(ctx, dest.url()).await?;

    // Drop the existing table (if any) if we're overwriting it.
    if if_exists == IfExists::Overwrite {
        debug!("dropping {} if it exists", table_name.quoted());
        let drop_sql = format!("DROP TABLE IF EXISTS {}", table_name.quoted());
        client
            .batch_execute(&drop_sql)
            .await
            .with_context(|| format!("error dropping {}", table_name.unquoted()))?;
    }

    // Create our destination table.
    let create_sql = create_table_sql(table_name, columns, if_exists);
    debug!("creating destination table: {}", create_sql);
    client
        .batch_execute(&create_sql)
        .await
        .with_context(|| format!("error creating {}", table_name.unquoted()))?;

    if table.is_empty() {
        debug!("no rows to copy into {}", table_name.unquoted());
        return Ok(0);
    }

    // Bulk-load the rows.
    let copy_sql = copy_from_stdin_sql(table_name, columns);
    let data = table_to_csv(table)?;
    debug!("copying {} rows into {}", table.len(), table_name.unquoted());
    let sink = client
        .copy_in(&copy_sql)
        .await
        .with_context(|| format!("error starting COPY into {}", table_name.unquoted()))?;
    pin_mut!(sink);
    sink.send(Bytes::from(data))
        .await
        .context("error streaming data to PostgreSQL")?;
    let count = sink.finish().await.context("error finishing COPY")?;
    if count != table.len() as u64 {
        return Err(format_err!(
            "expected to copy {} rows into {}, copied {}",
            table.len(),
            table_name.unquoted(),
            count,
        ));
    }
    Ok(count)
}

/// Generate `CREATE TABLE` SQL for our inferred columns.
fn create_table_sql(
    table_name: &PgName,
    columns: &[Column],
    if_exists: IfExists,
) -> String {
    let if_not_exists = match if_exists {
        IfExists::Append => "IF NOT EXISTS ",
        IfExists::Error | IfExists::Overwrite => "",
    };
    let mut sql = format!(
        "CREATE TABLE {}{} (\n",
        if_not_exists,
        table_name.quoted(),
    );
    for (idx, col) in columns.iter().enumerate() {
        let not_null = if col.is_nullable { "" } else { " NOT NULL" };
        let comma = if idx + 1 == columns.len() { "" } else { "," };
        sql.push_str(&format!(
            "    {} {}{}{}\n",
            Ident(&col.name),
            col.data_type,
            not_null,
            comma,
        ));
    }
    sql.push(')');
    sql
}

/// Generate the `COPY` statement the bulk load runs.
fn copy_from_stdin_sql(table_name: &PgName, columns: &[Column]) -> String {
    let column_list = columns
        .iter()
        .map(|col| Ident(&col.name).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "COPY {} ({}) FROM STDIN WITH (FORMAT csv)",
        table_name.quoted(),
        column_list,
    )
}

/// Serialize the table's data rows (no header) as CSV for `COPY`. `NULL`
/// values become empty unquoted fields, which is what `FORMAT csv` reads
/// as SQL `NULL`.
fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in table.rows() {
        wtr.write_record(row.iter().map(|value| value.to_csv_cell().into_owned()))
            .context("error serializing row")?;
    }
    wtr.into_inner()
        .map_err(|err| format_err!("error flushing CSV buffer: {}", err))
}
