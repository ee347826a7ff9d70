//! Search form contents.
//!
//! Every field is optional and submission is never blocked. [`SearchCriteria::issues`]
//! reports questionable input so a front end can warn about it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
}

/// Advisory finding about the criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaIssue {
    MissingOrigin,
    MissingDestination,
    SameAirport(String),
    ReturnBeforeDeparture {
        departure: NaiveDate,
        return_date: NaiveDate,
    },
}

impl fmt::Display for CriteriaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaIssue::MissingOrigin => write!(f, "no origin selected"),
            CriteriaIssue::MissingDestination => write!(f, "no destination selected"),
            CriteriaIssue::SameAirport(code) => write!(f, "origin and destination are both {code}"),
            CriteriaIssue::ReturnBeforeDeparture {
                departure,
                return_date,
            } => write!(f, "return {return_date} is before departure {departure}"),
        }
    }
}

impl SearchCriteria {
    pub fn issues(&self) -> Vec<CriteriaIssue> {
        let mut issues = Vec::new();

        match (&self.origin, &self.destination) {
            (None, _) => issues.push(CriteriaIssue::MissingOrigin),
            (Some(_), None) => {}
            (Some(o), Some(d)) if o.eq_ignore_ascii_case(d) => {
                issues.push(CriteriaIssue::SameAirport(o.to_uppercase()));
            }
            _ => {}
        }
        if self.destination.is_none() {
            issues.push(CriteriaIssue::MissingDestination);
        }

        if let (Some(departure), Some(return_date)) = (self.departure, self.return_date) {
            if return_date < departure {
                issues.push(CriteriaIssue::ReturnBeforeDeparture {
                    departure,
                    return_date,
                });
            }
        }

        issues
    }

    /// "DXB → JFK" style summary, with "?" for unset airports.
    pub fn route(&self) -> String {
        format!(
            "{} → {}",
            self.origin.as_deref().unwrap_or("?"),
            self.destination.as_deref().unwrap_or("?")
        )
    }
}

/// Parse a date typed into the form (`YYYY-MM-DD`). Blank input clears the field.
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_criteria_flags_both_airports() {
        let issues = SearchCriteria::default().issues();
        assert_eq!(
            issues,
            vec![CriteriaIssue::MissingOrigin, CriteriaIssue::MissingDestination]
        );
    }

    #[test]
    fn complete_criteria_has_no_issues() {
        let c = SearchCriteria {
            origin: Some("DXB".into()),
            destination: Some("JFK".into()),
            departure: Some(date(2024, 9, 28)),
            return_date: Some(date(2024, 9, 30)),
        };
        assert!(c.issues().is_empty());
        assert_eq!(c.route(), "DXB → JFK");
    }

    #[test]
    fn same_airport_and_reversed_dates() {
        let c = SearchCriteria {
            origin: Some("jfk".into()),
            destination: Some("JFK".into()),
            departure: Some(date(2024, 9, 30)),
            return_date: Some(date(2024, 9, 28)),
        };
        let issues = c.issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], CriteriaIssue::SameAirport("JFK".into()));
        assert!(issues[1].to_string().contains("before departure"));
    }

    #[test]
    fn parse_date_input() {
        assert_eq!(parse_date("2024-09-28").unwrap(), Some(date(2024, 9, 28)));
        assert_eq!(parse_date("   ").unwrap(), None);
        assert!(parse_date("28/09/2024").is_err());
    }

    #[test]
    fn route_with_unset_airports() {
        assert_eq!(SearchCriteria::default().route(), "? → ?");
    }
}
