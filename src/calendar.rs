use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::GiacenzaError;

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// January 1 of `year`. `None` only outside chrono's supported range.
pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Exclusive upper bound of `year`: January 1 of the following year.
pub fn year_end_exclusive(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year + 1, 1, 1)
}

// ---------------------------------------------------------------------------
// Month-name tables
// ---------------------------------------------------------------------------

const MONTHS_IT: [&str; 12] = [
    "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarLanguage {
    It,
}

pub const ALL_LANGUAGES: &[CalendarLanguage] = &[CalendarLanguage::It];

impl CalendarLanguage {
    pub fn key(&self) -> &'static str {
        match self {
            Self::It => "IT",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::It => "Italian",
        }
    }

    pub fn months(&self) -> &'static [&'static str; 12] {
        match self {
            Self::It => &MONTHS_IT,
        }
    }

    /// Resolve a month token ("mar", "Marzo", "MAR.") to 1..=12. Only the
    /// first three characters are compared.
    pub fn month_number(&self, token: &str) -> Option<u32> {
        let abbrev: String = token.trim().chars().take(3).collect::<String>().to_lowercase();
        self.months()
            .iter()
            .position(|m| *m == abbrev)
            .map(|i| i as u32 + 1)
    }
}

impl fmt::Display for CalendarLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CalendarLanguage {
    type Err = GiacenzaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_LANGUAGES
            .iter()
            .find(|l| l.key().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| GiacenzaError::UnknownLanguage(s.to_string()))
    }
}
