//! XLSX export using `rust_xlsxwriter`.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::report::{Report, Sheet};
use crate::{Cell, Result};

/// Row index of the header row. Data starts on the next row.
pub const HEADER_ROW: u32 = 0;

/// Write every sheet of a report to one workbook at `path`.
///
/// Every used column is `column_width` wide; headers are bold and wrapped so
/// multi-line labels stay readable.
pub fn write_workbook<P: AsRef<Path>>(report: &Report, path: P, column_width: f64) -> Result<()> {
    let path = path.as_ref();
    let header = Format::new().set_bold().set_text_wrap();

    let mut workbook = Workbook::new();
    for sheet in &report.sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet, &header, column_width)?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;

    tracing::info!("Wrote {} sheets to {}", report.sheets.len(), path.display());
    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &Sheet,
    header: &Format,
    column_width: f64,
) -> Result<()> {
    worksheet.set_name(&sheet.name)?;

    for (col, text) in sheet.headers.iter().enumerate() {
        let col = column(col)?;
        worksheet.write_string_with_format(HEADER_ROW, col, text, header)?;
        worksheet.set_column_width(col, column_width)?;
    }

    for (index, cells) in sheet.rows.iter().enumerate() {
        let row = u32::try_from(index)
            .ok()
            .and_then(|r| r.checked_add(HEADER_ROW + 1))
            .ok_or(XlsxError::RowColumnLimitError)?;

        for (col, cell) in cells.iter().enumerate() {
            let col = column(col)?;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Cell::Integer(i) => {
                    worksheet.write_number(row, col, *i as f64)?;
                }
                Cell::Number(x) => {
                    worksheet.write_number(row, col, *x)?;
                }
                Cell::Flag(true) => {
                    worksheet.write_string(row, col, cell.to_string())?;
                }
                Cell::Flag(false) | Cell::Empty => {}
            }
        }
    }

    tracing::debug!("Sheet {:?}: {} rows", sheet.name, sheet.rows.len());
    Ok(())
}

#[inline]
fn column(index: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}
