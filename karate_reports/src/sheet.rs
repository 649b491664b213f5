use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Column headers of the registration export, in display order.
pub const HEADERS: [&str; 11] = [
    "م",
    "اسم اللاعب",
    "الحزام الأخير",
    "تاريخ الميلاد",
    "رقم الملف",
    "اسم المدرب",
    "المؤسسة",
    "الفترة",
    "تاريخ التسجيل",
    "بداية الفترة",
    "نهاية الفترة",
];

/// Column widths matching the headers, in spreadsheet character units.
pub const COLUMN_WIDTHS: [f64; 11] = [
    5.0, 25.0, 15.0, 15.0, 10.0, 25.0, 25.0, 20.0, 15.0, 15.0, 15.0,
];

const UNSPECIFIED: &str = "غير محدد";

/// One exported line, one registration. All fields are already shaped
/// for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub sequence: usize,
    pub player_name: String,
    pub belt_label: String,
    pub birth_date: String,
    pub file_number: String,
    pub coach_name: String,
    pub organization_name: String,
    pub period_name: String,
    pub registered_at: String,
    pub period_start: String,
    pub period_end: String,
}

/// Trailing block under the table: counts plus generation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub total_count: usize,
    pub coach_name: String,
    pub organization_name: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSheet {
    pub title: String,
    pub rows: Vec<SheetRow>,
    pub summary: SheetSummary,
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => UNSPECIFIED.to_string(),
    }
}

pub fn format_date_time(date_time: NaiveDateTime) -> String {
    date_time.format("%Y-%m-%d %H:%M").to_string()
}

impl RegistrationSheet {
    pub fn new(
        title: String,
        rows: Vec<SheetRow>,
        coach_name: Option<String>,
        organization_name: Option<String>,
        generated_at: NaiveDateTime,
    ) -> RegistrationSheet {
        let summary = SheetSummary {
            total_count: rows.len(),
            coach_name: coach_name.unwrap_or_else(|| UNSPECIFIED.to_string()),
            organization_name: organization_name.unwrap_or_else(|| UNSPECIFIED.to_string()),
            generated_at: format_date_time(generated_at),
        };
        RegistrationSheet {
            title,
            rows,
            summary,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Filename embedding the coach/organization name and the current
    /// date, e.g. "لاعبين_مسجلين_Coach_2026-08-30.xlsx".
    pub fn file_name(&self, extension: &str, today: NaiveDate) -> String {
        let owner = if self.summary.coach_name != UNSPECIFIED {
            &self.summary.coach_name
        } else {
            &self.summary.organization_name
        };
        let owner = owner.replace([' ', '/'], "_");
        format!(
            "لاعبين_مسجلين_{}_{}.{}",
            owner,
            today.format("%Y-%m-%d"),
            extension
        )
    }
}
