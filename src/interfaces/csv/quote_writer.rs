use crate::domain::line_item::StoredLineItem;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 4] = ["id", "catalog", "list_price", "net_price"];

#[derive(Serialize)]
struct QuoteRecord {
    id: u64,
    catalog: Option<u64>,
    list_price: Decimal,
    net_price: Decimal,
}

impl From<&StoredLineItem> for QuoteRecord {
    fn from(item: &StoredLineItem) -> Self {
        Self {
            id: item.id,
            catalog: item.catalog,
            list_price: item.list_price.normalize(),
            net_price: item.net_price.normalize(),
        }
    }
}

/// Writes computed quotes as CSV, one row per stored line item.
pub struct QuoteWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> QuoteWriter<W> {
    pub fn new(destination: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(destination);
        Self { writer }
    }

    /// Writes the header followed by `items`, then flushes.
    pub fn write_quotes<'a>(
        &mut self,
        items: impl IntoIterator<Item = &'a StoredLineItem>,
    ) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for item in items {
            self.writer.serialize(QuoteRecord::from(item))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stored(id: u64, catalog: Option<u64>, list_price: Decimal, net_price: Decimal) -> StoredLineItem {
        StoredLineItem {
            id,
            catalog,
            list_price,
            steps: vec![],
            net_price,
        }
    }

    #[test]
    fn test_write_quotes() {
        let items = vec![
            stored(1, Some(7), dec!(200.00), dec!(150.0)),
            stored(2, None, dec!(10), dec!(-40)),
        ];
        let mut buffer = Vec::new();
        QuoteWriter::new(&mut buffer).write_quotes(&items).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "id,catalog,list_price,net_price\n1,7,200,150\n2,,10,-40\n"
        );
    }

    #[test]
    fn test_write_header_only() {
        let items: Vec<StoredLineItem> = Vec::new();
        let mut buffer = Vec::new();
        QuoteWriter::new(&mut buffer).write_quotes(&items).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "id,catalog,list_price,net_price\n");
    }
}
