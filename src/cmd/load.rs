//! The load pipeline: fetch one object, parse it, and bulk-load it.

use crate::common::*;
use crate::csv_data::parse_csv_table;
use crate::drivers::postgres::copy_in_table;
use crate::schema::infer_schema;

use super::Opt;

/// Perform our fetch → parse → load pipeline.
pub(crate) async fn run(ctx: Context, opt: Opt) -> Result<()> {
    // Fetch the object.
    info!("fetching {}", opt.source);
    let data = opt
        .source
        .fetch_data()
        .await
        .with_context(|| format!("error fetching {}", opt.source))?;
    debug!("fetched {} bytes", data.len());

    // Parse it into a table.
    let table = parse_csv_table(&data)
        .with_context(|| format!("error parsing {}", opt.source))?;
    drop(data);
    info!(
        "parsed {} rows of {} columns",
        table.len(),
        table.headers().len(),
    );

    // Infer the destination schema and bulk-load the table.
    let columns = infer_schema(&table);
    info!("loading into {}", opt.dest);
    let rows_written = copy_in_table(&ctx, &opt.dest, &table, &columns, opt.if_exists)
        .await
        .with_context(|| format!("error loading into {}", opt.dest))?;

    // The preview and completion line go to stdout; logs stay on stderr.
    if opt.preview_rows > 0 && !table.is_empty() {
        print!("{}", table.preview(opt.preview_rows));
    }
    println!(
        "Loaded {} rows into {}",
        rows_written,
        opt.dest.table_name().unquoted(),
    );
    Ok(())
}
