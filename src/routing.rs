//! Route matching for the path remainder below a blog index.
//!
//! Patterns are tried in a fixed priority order and the first structural
//! match wins. They are mutually exclusive by segment count and prefix, so
//! the order only matters for readability of the table.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::route::RouteMatch;
use crate::domain::types::{CategorySlug, PageSlug, TagName};

static DATE_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(\d{4})/(\d{1,2})/(\d{1,2})/([-A-Za-z0-9_]+)/?$").unwrap()
});
static YEAR_MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(\d{4})/(\d{1,2})/(\d{1,2})/?$").unwrap());
static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(\d{4})/(\d{1,2})/?$").unwrap());
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/(\d{4})/?$").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/tag/([^/]+)/?$").unwrap());
static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/category/([-A-Za-z0-9_]+)/?$").unwrap());
static INDEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/?$").unwrap());

/// Selects the blog route for `path`, or `None` when no pattern applies.
///
/// `path` is the remainder below the blog index, e.g. `/2024/03/` for a
/// request to `/blog/2024/03/`. A missing leading slash is tolerated.
pub fn match_route(path: &str) -> Option<RouteMatch> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if let Some(caps) = DATE_SLUG.captures(&path) {
        return Some(RouteMatch::ByDateSlug {
            year: year(&caps, 1)?,
            month: number(&caps, 2)?,
            day: number(&caps, 3)?,
            slug: PageSlug::new(&caps[4]).ok()?,
        });
    }
    if let Some(caps) = YEAR_MONTH_DAY.captures(&path) {
        return Some(RouteMatch::ByYearMonthDay {
            year: year(&caps, 1)?,
            month: number(&caps, 2)?,
            day: number(&caps, 3)?,
        });
    }
    if let Some(caps) = YEAR_MONTH.captures(&path) {
        return Some(RouteMatch::ByYearMonth {
            year: year(&caps, 1)?,
            month: number(&caps, 2)?,
        });
    }
    if let Some(caps) = YEAR.captures(&path) {
        return Some(RouteMatch::ByYear {
            year: year(&caps, 1)?,
        });
    }
    if let Some(caps) = TAG.captures(&path) {
        return Some(RouteMatch::ByTag {
            tag: TagName::new(&caps[1]).ok()?,
        });
    }
    if let Some(caps) = CATEGORY.captures(&path) {
        return Some(RouteMatch::ByCategory {
            category: CategorySlug::new(&caps[1]).ok()?,
        });
    }
    if INDEX.is_match(&path) {
        return Some(RouteMatch::Index);
    }
    None
}

// Years are 1..=9999; `0000` is not a year.
fn year(caps: &Captures<'_>, group: usize) -> Option<i32> {
    caps[group].parse::<i32>().ok().filter(|year| *year >= 1)
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps[group].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_every_valid_year() {
        for year in [1, 42, 1999, 2024, 9999] {
            let path = format!("/{year:04}/");
            assert_eq!(match_route(&path), Some(RouteMatch::ByYear { year }));
        }
    }

    #[test]
    fn rejects_year_zero_and_short_years() {
        assert_eq!(match_route("/0000/"), None);
        assert_eq!(match_route("/24/"), None);
        assert_eq!(match_route("/20245/"), None);
    }

    #[test]
    fn matches_year_month_with_one_or_two_digit_months() {
        assert_eq!(
            match_route("/2024/03/"),
            Some(RouteMatch::ByYearMonth {
                year: 2024,
                month: 3
            })
        );
        assert_eq!(
            match_route("/2024/3"),
            Some(RouteMatch::ByYearMonth {
                year: 2024,
                month: 3
            })
        );
    }

    #[test]
    fn leaves_semantic_date_checks_to_the_store() {
        assert_eq!(
            match_route("/2024/13/"),
            Some(RouteMatch::ByYearMonth {
                year: 2024,
                month: 13
            })
        );
        assert_eq!(
            match_route("/2024/02/31/"),
            Some(RouteMatch::ByYearMonthDay {
                year: 2024,
                month: 2,
                day: 31
            })
        );
    }

    #[test]
    fn matches_date_slug_before_day_archive() {
        assert_eq!(
            match_route("/2024/03/05/hello/"),
            Some(RouteMatch::ByDateSlug {
                year: 2024,
                month: 3,
                day: 5,
                slug: PageSlug::new("hello").unwrap(),
            })
        );
        assert_eq!(
            match_route("/2024/03/05/"),
            Some(RouteMatch::ByYearMonthDay {
                year: 2024,
                month: 3,
                day: 5
            })
        );
    }

    #[test]
    fn tag_and_category_use_distinct_prefixes() {
        assert_eq!(
            match_route("/tag/go/"),
            Some(RouteMatch::ByTag {
                tag: TagName::new("go").unwrap()
            })
        );
        assert_eq!(
            match_route("/category/news/"),
            Some(RouteMatch::ByCategory {
                category: CategorySlug::new("news").unwrap()
            })
        );
    }

    #[test]
    fn tags_match_any_label_without_a_slash() {
        for tag in ["café", "web dev", "c++", "c#"] {
            assert_eq!(
                match_route(&format!("/tag/{tag}/")),
                Some(RouteMatch::ByTag {
                    tag: TagName::new(tag).unwrap()
                }),
                "{tag}"
            );
        }
        assert_eq!(match_route("/tag/web/dev/"), None);
        assert_eq!(match_route("/tag/ /"), None);
    }

    #[test]
    fn empty_remainder_is_the_index() {
        assert_eq!(match_route("/"), Some(RouteMatch::Index));
        assert_eq!(match_route(""), Some(RouteMatch::Index));
    }

    #[test]
    fn unknown_paths_do_not_match() {
        for path in [
            "/tag/",
            "/category/",
            "/tags/go/",
            "/2024/03/05/hello/extra/",
            "/hello/",
            "/2024/march/",
        ] {
            assert_eq!(match_route(path), None, "{path}");
        }
    }
}
