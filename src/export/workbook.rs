use super::{Cell, ExportError, Table};
use rust_xlsxwriter::{Format, Workbook};

pub const SHEET_NAME: &str = "Sheet1";

/// Renders `table` as an XLSX workbook with one sheet and a bold header row.
pub fn to_xlsx(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, name) in table.headers.iter().enumerate() {
            sheet.write_string_with_format(0, column(col), *name, &header)?;
        }
        for (index, row) in table.rows.iter().enumerate() {
            let row_num = u32::try_from(index + 1).unwrap_or(u32::MAX);
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(text) => {
                        sheet.write_string(row_num, column(col), text)?;
                    }
                    Cell::Number(n) => {
                        sheet.write_number(row_num, column(col), *n)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

fn column(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_zip_container() {
        let table = Table {
            headers: vec!["name", "total"],
            rows: vec![vec![Cell::Text("QA Team".into()), Cell::Number(5.0)]],
        };
        let bytes = to_xlsx(&table).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
