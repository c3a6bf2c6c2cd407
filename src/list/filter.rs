//! Filter definitions declared by list screens.

use jiff::civil::Date;

use crate::error::{HotelDeskError, Result};
use crate::list::query::FilterValue;

/// How a filter's raw input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text, sent as typed.
    Text,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
    /// Calendar date, `YYYY-MM-DD`.
    Date,
}

/// One named filter dimension of a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    /// Query parameter name sent to the server.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

impl FilterDef {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Text,
        }
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Choice(values),
        }
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Date,
        }
    }

    /// Parse raw user input. Empty input means "unset" and yields `None`.
    pub fn parse(&self, raw: &str) -> Result<Option<FilterValue>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        match self.kind {
            FilterKind::Text => Ok(Some(FilterValue::Text(raw.to_string()))),
            FilterKind::Choice(values) => values
                .iter()
                .find(|v| v.eq_ignore_ascii_case(raw))
                .map(|v| Some(FilterValue::Text((*v).to_string())))
                .ok_or_else(|| HotelDeskError::InvalidFilterValue {
                    filter: self.name.to_string(),
                    value: raw.to_string(),
                    reason: format!("expected one of: {}", values.join(", ")),
                }),
            FilterKind::Date => raw
                .parse::<Date>()
                .map(|d| Some(FilterValue::Date(d)))
                .map_err(|e| HotelDeskError::InvalidFilterValue {
                    filter: self.name.to_string(),
                    value: raw.to_string(),
                    reason: format!("expected YYYY-MM-DD ({e})"),
                }),
        }
    }

    /// Short description of accepted values, for help output.
    pub fn describe(&self) -> String {
        match self.kind {
            FilterKind::Text => "text".to_string(),
            FilterKind::Choice(values) => values.join("|"),
            FilterKind::Date => "YYYY-MM-DD".to_string(),
        }
    }
}

/// Find a filter by name (case-insensitive).
pub fn find_filter<'a>(filters: &'a [FilterDef], name: &str) -> Option<&'a FilterDef> {
    filters.iter().find(|f| f.name.eq_ignore_ascii_case(name.trim()))
}

/// Split `key=value` input. The value may be empty.
pub fn split_assignment(s: &str) -> Result<(&str, &str)> {
    s.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| HotelDeskError::InvalidInput(format!("expected key=value, got '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: FilterDef = FilterDef::choice("status", "Status", &["pending", "confirmed"]);

    #[test]
    fn test_choice_parsing() {
        assert_eq!(
            STATUS.parse("Confirmed").unwrap(),
            Some(FilterValue::Text("confirmed".to_string()))
        );
        let err = STATUS.parse("lost").unwrap_err();
        assert!(err.to_string().contains("pending, confirmed"));
    }

    #[test]
    fn test_empty_input_is_unset() {
        assert_eq!(STATUS.parse("").unwrap(), None);
        assert_eq!(FilterDef::date("startDate", "From").parse("  ").unwrap(), None);
    }

    #[test]
    fn test_date_parsing() {
        let def = FilterDef::date("startDate", "From");
        assert_eq!(
            def.parse("2024-02-29").unwrap(),
            Some(FilterValue::Date(jiff::civil::date(2024, 2, 29)))
        );
        assert!(def.parse("2023-02-29").is_err());
        assert!(def.parse("yesterday").is_err());
    }

    #[test]
    fn test_find_filter() {
        let filters = [STATUS, FilterDef::text("role", "Role")];
        assert_eq!(find_filter(&filters, "ROLE").map(|f| f.name), Some("role"));
        assert!(find_filter(&filters, "floor").is_none());
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("status=paid").unwrap(), ("status", "paid"));
        assert_eq!(split_assignment("status=").unwrap(), ("status", ""));
        assert!(split_assignment("status").is_err());
        assert!(split_assignment("=paid").is_err());
    }
}
