//! Spreadsheet export.
//!
//! A [`crate::Report`] is written as one workbook with a worksheet per
//! sheet. The workbook is only created once the whole report has been built,
//! so a failing oil never leaves a partial file behind.

mod xlsx;

pub use xlsx::{write_workbook, HEADER_ROW};
