//! Whitelist validation of listing parameters
//!
//! Turns [`RawParameters`] into a closed [`ValidatedParameters`] record.
//! Unknown names are checked first, then each known parameter in
//! [`QueryParam`] declaration order; the first failure is returned.

use std::num::NonZeroU64;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use crate::application::query::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::errors::DomainError;
use crate::domain::filtering::RawParameters;
use crate::domain::value_objects::{QueryParam, SortField, SortOrder};

/// Longest accepted `name` or `search` text, in characters
pub const MAX_TEXT_LENGTH: usize = 100;

/// Inclusive instant bounds; absent sides are unconstrained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Inclusive numeric bounds; absent sides are unconstrained
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Trimmed, non-empty, bounded free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchText(String);

impl SearchText {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("must not be empty".to_string());
        }
        if trimmed.chars().count() > MAX_TEXT_LENGTH {
            return Err(format!("must be at most {} characters", MAX_TEXT_LENGTH));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParameters {
    pub page: NonZeroU64,
    pub limit: NonZeroU64,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub registration_date: DateRange,
    pub last_order_date: DateRange,
    pub total_amount: NumericRange,
    pub order_count: NumericRange,
    pub search: Option<SearchText>,
    pub name: Option<SearchText>,
}

impl Default for ValidatedParameters {
    fn default() -> Self {
        Self {
            page: NonZeroU64::MIN,
            limit: NonZeroU64::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU64::MIN),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            registration_date: DateRange::default(),
            last_order_date: DateRange::default(),
            total_amount: NumericRange::default(),
            order_count: NumericRange::default(),
            search: None,
            name: None,
        }
    }
}

/// Validate every parameter of a listing request
pub fn validate_parameters(params: &RawParameters) -> Result<ValidatedParameters, DomainError> {
    let unknown: Vec<String> = params
        .names()
        .filter(|name| name.parse::<QueryParam>().is_err())
        .map(str::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(DomainError::UnknownParameters(unknown));
    }

    let mut validated = ValidatedParameters::default();

    for param in QueryParam::ALL {
        let Some(value) = params.get(param.as_str()) else {
            continue;
        };
        let raw = single_value(param, value)?;

        match param {
            QueryParam::Page => validated.page = positive_integer(param, raw)?,
            QueryParam::Limit => {
                let limit = positive_integer(param, raw)?;
                validated.limit = if limit.get() > MAX_PAGE_SIZE {
                    NonZeroU64::new(MAX_PAGE_SIZE).unwrap_or(limit)
                } else {
                    limit
                };
            }
            QueryParam::SortField => {
                validated.sort_field = raw
                    .parse()
                    .map_err(|e: String| DomainError::invalid_parameter(param.as_str(), e))?;
            }
            QueryParam::SortOrder => {
                validated.sort_order = raw
                    .parse()
                    .map_err(|e: String| DomainError::invalid_parameter(param.as_str(), e))?;
            }
            QueryParam::RegistrationDateFrom => {
                validated.registration_date.from = Some(range_start(param, raw)?)
            }
            QueryParam::RegistrationDateTo => {
                validated.registration_date.to = Some(range_end(param, raw)?)
            }
            QueryParam::LastOrderDateFrom => {
                validated.last_order_date.from = Some(range_start(param, raw)?)
            }
            QueryParam::LastOrderDateTo => {
                validated.last_order_date.to = Some(range_end(param, raw)?)
            }
            QueryParam::TotalAmountFrom => validated.total_amount.min = Some(finite(param, raw)?),
            QueryParam::TotalAmountTo => validated.total_amount.max = Some(finite(param, raw)?),
            QueryParam::OrderCountFrom => validated.order_count.min = Some(finite(param, raw)?),
            QueryParam::OrderCountTo => validated.order_count.max = Some(finite(param, raw)?),
            QueryParam::Search => validated.search = Some(text(param, raw)?),
            QueryParam::Name => validated.name = Some(text(param, raw)?),
        }
    }

    Ok(validated)
}

fn single_value(param: QueryParam, value: &Value) -> Result<&str, DomainError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(DomainError::invalid_parameter(
            param.as_str(),
            "must be a single value",
        )),
    }
}

fn positive_integer(param: QueryParam, raw: &str) -> Result<NonZeroU64, DomainError> {
    raw.parse::<u64>()
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or_else(|| DomainError::invalid_parameter(param.as_str(), "must be a positive integer"))
}

fn finite(param: QueryParam, raw: &str) -> Result<f64, DomainError> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| DomainError::invalid_parameter(param.as_str(), "must be a finite number"))
}

fn text(param: QueryParam, raw: &str) -> Result<SearchText, DomainError> {
    SearchText::parse(raw).map_err(|e| DomainError::invalid_parameter(param.as_str(), e))
}

enum ParsedDate {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

fn parse_date(param: QueryParam, raw: &str) -> Result<ParsedDate, DomainError> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(ParsedDate::Day(day));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| ParsedDate::Instant(dt.with_timezone(&Utc)))
        .map_err(|_| {
            DomainError::invalid_parameter(
                param.as_str(),
                "must be a date (YYYY-MM-DD) or an RFC 3339 timestamp",
            )
        })
}

/// Lower bound: the given instant, or midnight UTC for a bare date
fn range_start(param: QueryParam, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    Ok(match parse_date(param, raw)? {
        ParsedDate::Day(day) => Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
        ParsedDate::Instant(instant) => instant,
    })
}

/// Upper bound: always the last millisecond of the UTC calendar day
fn range_end(param: QueryParam, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let day = match parse_date(param, raw)? {
        ParsedDate::Day(day) => day,
        ParsedDate::Instant(instant) => instant.date_naive(),
    };
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| DomainError::invalid_parameter(param.as_str(), "invalid time of day"))?;
    Ok(Utc.from_utc_datetime(&day.and_time(end_of_day)))
}
