use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three registration period kinds. Each kind has its own period table
/// and its own registration join table with identical shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Exam,
    Secondary,
    Tournament,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown period kind {0}")]
pub struct UnknownPeriodKind(pub String);

impl PeriodKind {
    pub const ALL: [PeriodKind; 3] = [
        PeriodKind::Exam,
        PeriodKind::Secondary,
        PeriodKind::Tournament,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Exam => "exam",
            PeriodKind::Secondary => "secondary",
            PeriodKind::Tournament => "tournament",
        }
    }

    pub fn arabic_label(&self) -> &'static str {
        match self {
            PeriodKind::Exam => "اختبار",
            PeriodKind::Secondary => "قيد ثانوي",
            PeriodKind::Tournament => "بطولة",
        }
    }
}

impl FromStr for PeriodKind {
    type Err = UnknownPeriodKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exam" => Ok(PeriodKind::Exam),
            "secondary" => Ok(PeriodKind::Secondary),
            "tournament" => Ok(PeriodKind::Tournament),
            other => Err(UnknownPeriodKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
