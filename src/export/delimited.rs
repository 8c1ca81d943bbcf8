use super::{ExportError, Table};

/// Renders `table` as RFC 4180 CSV with a header row.
pub fn to_csv(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.render()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Cell;

    #[test]
    fn quotes_fields_that_need_it() {
        let table = Table {
            headers: vec!["name", "hours", "note"],
            rows: vec![
                vec![
                    Cell::Text("Fix, then ship".into()),
                    Cell::Number(1.5),
                    Cell::Empty,
                ],
                vec![Cell::Text("Say \"hi\"".into()), Cell::Number(2.0), Cell::Text("ok".into())],
            ],
        };
        let csv = String::from_utf8(to_csv(&table).unwrap()).unwrap();
        assert_eq!(
            csv,
            "name,hours,note\n\"Fix, then ship\",1.5,\n\"Say \"\"hi\"\"\",2,ok\n"
        );
    }
}
