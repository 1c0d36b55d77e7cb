//! Qualifier resolution for a single property value

use std::fmt;

use crate::model::Property;

use super::dates::format_wiki_year;

pub const KINSHIP: (&str, &str) = ("P1039", "kinship to subject");
pub const START_TIME: (&str, &str) = ("P580", "start time");
pub const END_TIME: (&str, &str) = ("P582", "end time");
pub const POINT_IN_TIME: (&str, &str) = ("P585", "point in time");

/// What a value's qualifiers contribute to its rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualifierSummary {
    Kinship(String),
    /// Formatted start and end years, empty when a side is missing
    Range { start: String, end: String },
    PointInTime(String),
    None,
}

impl QualifierSummary {
    /// `start - end` for ranges
    pub fn range_text(&self) -> Option<String> {
        match self {
            QualifierSummary::Range { start, end } => Some(format!("{} - {}", start, end)),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, QualifierSummary::None)
    }
}

impl fmt::Display for QualifierSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualifierSummary::Kinship(text) => write!(f, "— {}", text),
            QualifierSummary::Range { .. } => write!(f, "({})", self.range_text().unwrap_or_default()),
            QualifierSummary::PointInTime(time) => write!(f, "({})", time),
            QualifierSummary::None => Ok(()),
        }
    }
}

fn find<'a>(qualifiers: &'a [Property], (key, label): (&str, &str)) -> Option<&'a Property> {
    qualifiers.iter().find(|q| q.is(key, label))
}

fn first_text(property: &Property) -> Option<&str> {
    property.first_value().and_then(|v| v.text_value())
}

fn year_of(property: Option<&Property>) -> String {
    property
        .and_then(first_text)
        .map(format_wiki_year)
        .unwrap_or_default()
}

/// Pick the qualifier to show: kinship, then a start/end range, then a point in time
pub fn resolve_qualifiers(qualifiers: &[Property]) -> QualifierSummary {
    if let Some(kinship) = find(qualifiers, KINSHIP) {
        return QualifierSummary::Kinship(first_text(kinship).unwrap_or_default().to_string());
    }

    let start = find(qualifiers, START_TIME);
    let end = find(qualifiers, END_TIME);
    if start.is_some() || end.is_some() {
        return QualifierSummary::Range {
            start: year_of(start),
            end: year_of(end),
        };
    }

    if let Some(point) = find(qualifiers, POINT_IN_TIME) {
        return QualifierSummary::PointInTime(year_of(Some(point)));
    }

    QualifierSummary::None
}
