// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{day_to_row, get_headers};
use crate::export::{MonthExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Columns holding hours, where the summary figures go.
const TOTAL_COL: usize = 6;
const EXPECTED_COL: usize = 7;
const BALANCE_COL: usize = 8;

/// XLSX export: one worksheet per month, styled header, banded rows,
/// automatic column widths and Total / Carry-over / Cumulative rows.
pub(crate) fn export_xlsx(months: &[MonthExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    if months.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_export_error)?;
        workbook.save(path).map_err(to_export_error)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    for month in months {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&month.label)
            .map_err(to_export_error)?;
        write_month_sheet(worksheet, month)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_month_sheet(worksheet: &mut Worksheet, month: &MonthExport) -> AppResult<()> {
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, day) in month.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in day_to_row(day).iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, value, band_color)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // blank line, then the summary block
    let first_summary = month.rows.len() as u32 + 2;
    let label_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let value_format = Format::new()
        .set_bold()
        .set_num_format("0.00")
        .set_align(FormatAlign::Right)
        .set_border(FormatBorder::Thin);

    let summary: [(&str, Vec<(usize, f64)>); 3] = [
        (
            "Total",
            vec![
                (TOTAL_COL, month.total_hours),
                (EXPECTED_COL, month.expected_hours),
                (BALANCE_COL, month.balance_hours),
            ],
        ),
        ("Carry-over", vec![(BALANCE_COL, month.carry_in_hours)]),
        ("Cumulative", vec![(BALANCE_COL, month.cumulative_hours)]),
    ];

    for (offset, (label, values)) in summary.iter().enumerate() {
        let row = first_summary + offset as u32;
        worksheet
            .write_with_format(row, 0, *label, &label_format)
            .map_err(to_export_error)?;
        for (col, value) in values {
            worksheet
                .write_with_format(row, *col as u16, *value, &value_format)
                .map_err(to_export_error)?;
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    Ok(())
}

/// Write a single cell, storing dates, times and numbers as native values.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        let fmt = base.set_num_format(num_format);
        worksheet
            .write_with_format(row, col, serial, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    if let Ok(num) = s.parse::<f64>() {
        let fmt = base.set_num_format("0.00").set_align(FormatAlign::Right);
        worksheet
            .write_with_format(row, col, num, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col, s, &base)
        .map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
