use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

/// Writes `rows` line items, each with a two-step discount chain.
pub fn generate_line_items(path: &Path, rows: u64) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(path)?);

    for id in 1..=rows {
        writeln!(
            out,
            r#"{{"id": {id}, "catalog": {catalog}, "list_price": "200", "steps": [{{"order": 1, "kind": "percentage", "value": "20"}}, {{"order": 2, "kind": "amount", "value": 10}}]}}"#,
            catalog = id % 50 + 1,
        )?;
    }

    out.flush()?;
    Ok(())
}
