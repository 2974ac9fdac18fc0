use chrono::NaiveDate;

pub const END_BEFORE_START: &str = "End date must be on or after the start date.";

/// Start/end date pair of a project.
///
/// Values are the `YYYY-MM-DD` strings of date inputs. Only a pair that both
/// parse and are out of order is an error; blank or partial input is left to
/// the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn parse(start: &str, end: &str) -> Self {
        Self {
            start: parse_iso(start),
            end: parse_iso(end),
        }
    }

    /// The error to show on the end date, if any.
    pub fn error(&self) -> Option<&'static str> {
        match (self.start, self.end) {
            (Some(s), Some(e)) if s > e => Some(END_BEFORE_START),
            _ => None,
        }
    }

    pub fn validate(start: &str, end: &str) -> Result<(), &'static str> {
        match Self::parse(start, end).error() {
            Some(msg) => Err(msg),
            None => Ok(()),
        }
    }
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
