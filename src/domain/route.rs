//! Blog archive routes and the display metadata derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategorySlug, PageSlug, TagName};

/// Route selected for the path remainder below a blog index.
///
/// Numeric fields are only syntactically checked; an impossible date such as
/// month 13 still produces a match and simply resolves to no posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum RouteMatch {
    ByYear {
        year: i32,
    },
    ByYearMonth {
        year: i32,
        month: u32,
    },
    ByYearMonthDay {
        year: i32,
        month: u32,
        day: u32,
    },
    /// Date segments are captured but never used to filter.
    ByDateSlug {
        year: i32,
        month: u32,
        day: u32,
        slug: PageSlug,
    },
    ByTag {
        tag: TagName,
    },
    ByCategory {
        category: CategorySlug,
    },
    Index,
}

impl RouteMatch {
    /// Date predicate carried by the archive routes, if any.
    pub fn date_filter(&self) -> Option<DateFilter> {
        match *self {
            Self::ByYear { year } => Some(DateFilter::year(year)),
            Self::ByYearMonth { year, month } => Some(DateFilter::month(year, month)),
            Self::ByYearMonthDay { year, month, day } => Some(DateFilter::day(year, month, day)),
            _ => None,
        }
    }
}

/// Calendar refinement: a year, optionally narrowed to a month, then a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateFilter {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            month: Some(month),
            ..Self::year(year)
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        Self {
            day: Some(day),
            ..Self::month(year, month)
        }
    }

    /// Half-open `[start, end)` range of dates covered by the filter.
    ///
    /// Returns `None` when the parameters do not name a real calendar period.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.month, self.day) {
            (None, _) => {
                let start = NaiveDate::from_ymd_opt(self.year, 1, 1)?;
                let end = NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?;
                Some((start, end))
            }
            (Some(month), None) => {
                let start = NaiveDate::from_ymd_opt(self.year, month, 1)?;
                let end = if month == 12 {
                    NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(self.year, month + 1, 1)?
                };
                Some((start, end))
            }
            (Some(month), Some(day)) => {
                let start = NaiveDate::from_ymd_opt(self.year, month, day)?;
                Some((start, start.succ_opt()?))
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.span()
            .is_some_and(|(start, end)| start <= date && date < end)
    }
}

/// What the listing was narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Date,
    Tag,
    Category,
    None,
}

/// Human readable description of the matched route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDescriptor {
    pub kind: SearchKind,
    pub term: String,
}

impl SearchDescriptor {
    /// Derives the descriptor for a route. Pure; recomputed per request.
    pub fn describe(route: &RouteMatch) -> Self {
        match route {
            RouteMatch::ByYear { year } => Self::date(format!("{year:04}")),
            RouteMatch::ByYearMonth { year, month } => Self::date(
                NaiveDate::from_ymd_opt(*year, *month, 1)
                    .map(|date| date.format("%B %Y").to_string())
                    .unwrap_or_else(|| format!("{month}/{year:04}")),
            ),
            RouteMatch::ByYearMonthDay { year, month, day } => Self::date(
                NaiveDate::from_ymd_opt(*year, *month, *day)
                    .map(|date| date.format("%B %-d, %Y").to_string())
                    .unwrap_or_else(|| format!("{month}/{day}/{year:04}")),
            ),
            RouteMatch::ByTag { tag } => Self {
                kind: SearchKind::Tag,
                term: tag.to_string(),
            },
            RouteMatch::ByCategory { category } => Self {
                kind: SearchKind::Category,
                term: category.to_string(),
            },
            RouteMatch::ByDateSlug { .. } | RouteMatch::Index => Self::none(),
        }
    }

    pub fn none() -> Self {
        Self {
            kind: SearchKind::None,
            term: String::new(),
        }
    }

    fn date(term: String) -> Self {
        Self {
            kind: SearchKind::Date,
            term,
        }
    }
}
