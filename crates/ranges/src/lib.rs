use chrono::{Months, NaiveDate, Utc};
use core_types::DateRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod error;

pub use error::RangeError;

/// A symbolic date-range request, offset backwards from "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeToken {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "10Y")]
    TenYears,
    #[serde(rename = "MAX")]
    Max,
}

impl RangeToken {
    pub const ALL: [RangeToken; 8] = [
        RangeToken::OneMonth,
        RangeToken::ThreeMonths,
        RangeToken::SixMonths,
        RangeToken::OneYear,
        RangeToken::ThreeYears,
        RangeToken::FiveYears,
        RangeToken::TenYears,
        RangeToken::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeToken::OneMonth => "1M",
            RangeToken::ThreeMonths => "3M",
            RangeToken::SixMonths => "6M",
            RangeToken::OneYear => "1Y",
            RangeToken::ThreeYears => "3Y",
            RangeToken::FiveYears => "5Y",
            RangeToken::TenYears => "10Y",
            RangeToken::Max => "MAX",
        }
    }

    /// Backwards offset in whole calendar months; `None` for `Max`.
    fn months(&self) -> Option<u32> {
        match self {
            RangeToken::OneMonth => Some(1),
            RangeToken::ThreeMonths => Some(3),
            RangeToken::SixMonths => Some(6),
            RangeToken::OneYear => Some(12),
            RangeToken::ThreeYears => Some(36),
            RangeToken::FiveYears => Some(60),
            RangeToken::TenYears => Some(120),
            RangeToken::Max => None,
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeToken {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeToken::ALL
            .iter()
            .find(|token| token.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| RangeError::UnknownToken(s.to_string()))
    }
}

/// Turns a symbolic token into a concrete window ending at `today`.
///
/// Subtraction is calendar-aware, not fixed 30/365-day arithmetic, so a day
/// that does not exist in the target month clamps to that month's last
/// valid day. `Max` bottoms out at an epoch that predates the available
/// fund history.
pub fn resolve(token: RangeToken, today: NaiveDate) -> Result<DateRange, RangeError> {
    let start = match token.months() {
        Some(months) => today
            .checked_sub_months(Months::new(months))
            .ok_or(RangeError::Unrepresentable(today))?,
        None => max_range_floor().ok_or(RangeError::Unrepresentable(today))?,
    };
    Ok(DateRange::new(start, today)?)
}

/// Resolves against the current UTC date.
pub fn resolve_today(token: RangeToken) -> Result<DateRange, RangeError> {
    resolve(token, Utc::now().date_naive())
}

/// Best-effort reverse mapping used for UI highlighting: which token, if
/// any, produces exactly this range as of `today`. A range no token matches
/// is "custom", never an error.
pub fn classify(range: &DateRange, today: NaiveDate) -> Option<RangeToken> {
    RangeToken::ALL
        .into_iter()
        .find(|&token| resolve(token, today).is_ok_and(|resolved| resolved == *range))
}

fn max_range_floor() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1990, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_year_back_from_mid_march() {
        let range = resolve(RangeToken::OneYear, date(2024, 3, 15)).unwrap();
        assert_eq!(range.start(), date(2023, 3, 15));
        assert_eq!(range.end(), date(2024, 3, 15));
    }

    #[test]
    fn one_month_back_from_month_end_clamps() {
        let range = resolve(RangeToken::OneMonth, date(2024, 3, 31)).unwrap();
        // 2024 is a leap year.
        assert_eq!(range.start(), date(2024, 2, 29));

        let range = resolve(RangeToken::OneMonth, date(2023, 3, 31)).unwrap();
        assert_eq!(range.start(), date(2023, 2, 28));
    }

    #[test]
    fn ten_years_is_one_hundred_twenty_months() {
        let range = resolve(RangeToken::TenYears, date(2024, 3, 15)).unwrap();
        assert_eq!(range.start(), date(2014, 3, 15));
    }

    #[test]
    fn max_bottoms_out_at_the_epoch_floor() {
        let range = resolve(RangeToken::Max, date(2024, 3, 15)).unwrap();
        assert_eq!(range.start(), date(1990, 1, 1));
        assert_eq!(range.end(), date(2024, 3, 15));
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!("1Y".parse::<RangeToken>().unwrap(), RangeToken::OneYear);
        assert_eq!("6m".parse::<RangeToken>().unwrap(), RangeToken::SixMonths);
        assert_eq!("max".parse::<RangeToken>().unwrap(), RangeToken::Max);
    }

    #[test]
    fn unknown_token_is_an_error() {
        let result = "2W".parse::<RangeToken>();
        assert!(matches!(result, Err(RangeError::UnknownToken(_))));
    }

    #[test]
    fn classify_recovers_the_generating_token() {
        let today = date(2024, 3, 15);
        for token in RangeToken::ALL {
            let range = resolve(token, today).unwrap();
            assert_eq!(classify(&range, today), Some(token));
        }
    }

    #[test]
    fn classify_returns_custom_for_an_arbitrary_range() {
        let today = date(2024, 3, 15);
        let range = DateRange::new(date(2023, 7, 4), date(2024, 2, 2)).unwrap();
        assert_eq!(classify(&range, today), None);
    }
}
