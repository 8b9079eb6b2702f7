use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::model::ReportRow;

/// Column headers of the inventory sheet, in output order.
pub const HEADERS: [&str; 15] = [
    "Report_url",
    "Report_ID",
    "Report_Name",
    "Folder_Name",
    "Report_Type",
    "Report_Format",
    "Field_Labels",
    "Field_API_Names",
    "Filters",
    "Created_By",
    "Created_Date",
    "Last_Modified_By",
    "Last_Modified_Date",
    "Last_Run_Date",
    "Last_View_Date",
];

/// Writes the inventory rows to a single-sheet workbook at the given path,
/// replacing any existing file. The label and API-name sequences are
/// serialised comma-space-joined; everything else is written verbatim.
pub fn write_report_workbook(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row_cells(row).iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn row_cells(row: &ReportRow) -> [String; 15] {
    [
        row.report_url.clone(),
        row.report_id.clone(),
        row.report_name.clone(),
        row.folder_name.clone(),
        row.report_type.clone(),
        row.report_format.clone(),
        row.field_labels.join(", "),
        row.field_api_names.join(", "),
        row.filters.clone(),
        row.created_by.clone(),
        row.created_date.clone(),
        row.last_modified_by.clone(),
        row.last_modified_date.clone(),
        row.last_run_date.clone(),
        row.last_view_date.clone(),
    ]
}
