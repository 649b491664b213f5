use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::sheet::{RegistrationSheet, COLUMN_WIDTHS, HEADERS};

/// Builds a single-sheet workbook: header row, one row per registration,
/// then a blank row and the summary block. Returns the xlsx bytes.
pub fn write_spreadsheet(sheet: &RegistrationSheet) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.title)?;
    worksheet.set_right_to_left(true);

    let header_format = Format::new().set_bold();

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for row in &sheet.rows {
        let r = row.sequence as u32;
        worksheet.write_number(r, 0, row.sequence as f64)?;
        worksheet.write_string(r, 1, &row.player_name)?;
        worksheet.write_string(r, 2, &row.belt_label)?;
        worksheet.write_string(r, 3, &row.birth_date)?;
        worksheet.write_string(r, 4, &row.file_number)?;
        worksheet.write_string(r, 5, &row.coach_name)?;
        worksheet.write_string(r, 6, &row.organization_name)?;
        worksheet.write_string(r, 7, &row.period_name)?;
        worksheet.write_string(r, 8, &row.registered_at)?;
        worksheet.write_string(r, 9, &row.period_start)?;
        worksheet.write_string(r, 10, &row.period_end)?;
    }

    let summary_start = sheet.rows.len() as u32 + 2;
    let summary = &sheet.summary;
    worksheet.write_string_with_format(summary_start, 0, "ملخص", &header_format)?;
    worksheet.write_string(
        summary_start,
        1,
        format!("إجمالي عدد اللاعبين: {}", summary.total_count),
    )?;
    worksheet.write_string(
        summary_start,
        2,
        format!("اسم المدرب: {}", summary.coach_name),
    )?;
    worksheet.write_string(
        summary_start,
        3,
        format!("المؤسسة: {}", summary.organization_name),
    )?;
    worksheet.write_string(
        summary_start,
        4,
        format!("تاريخ التحميل: {}", summary.generated_at),
    )?;

    workbook.save_to_buffer()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sheet::{RegistrationSheet, SheetRow};
    use chrono::NaiveDate;

    fn mock_sheet(n: usize) -> RegistrationSheet {
        let rows = (1..=n)
            .map(|sequence| SheetRow {
                sequence,
                player_name: format!("Player {}", sequence),
                belt_label: "أخضر".to_string(),
                birth_date: "2010-01-01".to_string(),
                file_number: sequence.to_string(),
                coach_name: "Coach".to_string(),
                organization_name: "Club".to_string(),
                period_name: "Spring Exam".to_string(),
                registered_at: "2026-03-02".to_string(),
                period_start: "2026-03-01".to_string(),
                period_end: "2026-03-10".to_string(),
            })
            .collect();
        RegistrationSheet::new(
            "اللاعبين المسجلين".to_string(),
            rows,
            Some("Coach".to_string()),
            Some("Club".to_string()),
            NaiveDate::from_ymd_opt(2026, 3, 2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_spreadsheet_bytes_are_a_zip_archive() {
        for n in [0, 1, 5] {
            let bytes = write_spreadsheet(&mock_sheet(n)).unwrap();
            // xlsx is a zip container
            assert_eq!(&bytes[0..2], b"PK");
        }
    }
}
