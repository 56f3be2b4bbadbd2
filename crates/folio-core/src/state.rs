use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::catalog::ProjectRecord;
use crate::constants::ALL_CATEGORIES;

/// Category predicate narrowing the visible records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// `"all"` selects every record; anything else is a category name.
    /// Unknown categories are accepted and simply match nothing.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Filter::All
        } else {
            Filter::Category(value.to_string())
        }
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => record.category == *category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => ALL_CATEGORIES,
            Filter::Category(category) => category,
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::parse(value)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering rule applied to the filtered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Name,
    /// Fallback for unrecognized keys: every pair compares equal, so the
    /// stable sort keeps catalog order.
    Insertion,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value {
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "name" => SortKey::Name,
            other => {
                tracing::debug!("unrecognized sort key '{other}', keeping insertion order");
                SortKey::Insertion
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Name => "name",
            SortKey::Insertion => "insertion",
        }
    }

    /// Total preorder over records. Must only be used with a stable sort.
    pub fn compare(&self, a: &ProjectRecord, b: &ProjectRecord) -> Ordering {
        match self {
            SortKey::Newest => b.date.cmp(&a.date),
            SortKey::Oldest => a.date.cmp(&b.date),
            SortKey::Name => fold_case(&a.name).cmp(fold_case(&b.name)),
            SortKey::Insertion => Ordering::Equal,
        }
    }
}

/// Collation key for name ordering: accents and case are ignored, so
/// "Éclair" sorts with the E names.
fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::parse(value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout used to render the visible records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    /// Container class applied for this layout.
    pub fn css_class(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid-view",
            ViewMode::List => "list-view",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three independent UI choices behind the project grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSortViewState {
    pub filter: Filter,
    pub sort: SortKey,
    pub view: ViewMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, date: (i32, u32, u32)) -> ProjectRecord {
        ProjectRecord::new(
            name,
            "web",
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(Filter::parse("all"), Filter::All);
        assert_eq!(Filter::parse("web"), Filter::Category("web".into()));
        assert_eq!(Filter::parse("All"), Filter::Category("All".into()));
    }

    #[test]
    fn test_filter_matches() {
        let r = record("a", (2020, 1, 1));
        assert!(Filter::All.matches(&r));
        assert!(Filter::parse("web").matches(&r));
        assert!(!Filter::parse("cli").matches(&r));
    }

    #[test]
    fn test_sort_parse_fallback() {
        assert_eq!(SortKey::parse("newest"), SortKey::Newest);
        assert_eq!(SortKey::parse("oldest"), SortKey::Oldest);
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("popularity"), SortKey::Insertion);
        assert_eq!(SortKey::parse(""), SortKey::Insertion);
    }

    #[test]
    fn test_date_comparators() {
        let old = record("old", (2020, 1, 1));
        let new = record("new", (2024, 1, 1));
        assert_eq!(SortKey::Newest.compare(&new, &old), Ordering::Less);
        assert_eq!(SortKey::Oldest.compare(&new, &old), Ordering::Greater);
        assert_eq!(SortKey::Insertion.compare(&new, &old), Ordering::Equal);
    }

    #[test]
    fn test_name_compare_ignores_case() {
        let a = record("alpha", (2020, 1, 1));
        let b = record("Beta", (2020, 1, 1));
        let a_upper = record("ALPHA", (2021, 1, 1));
        assert_eq!(SortKey::Name.compare(&a, &b), Ordering::Less);
        assert_eq!(SortKey::Name.compare(&a, &a_upper), Ordering::Equal);
    }

    #[test]
    fn test_name_compare_ignores_accents() {
        let eclair = record("Éclair", (2020, 1, 1));
        let zeta = record("Zeta", (2020, 1, 1));
        let ecstatic = record("ecstatic", (2020, 1, 1));
        let angstrom = record("Ångström", (2020, 1, 1));
        let beta = record("beta", (2020, 1, 1));
        assert_eq!(SortKey::Name.compare(&eclair, &zeta), Ordering::Less);
        assert_eq!(SortKey::Name.compare(&eclair, &ecstatic), Ordering::Less);
        assert_eq!(SortKey::Name.compare(&angstrom, &beta), Ordering::Less);
        assert_eq!(
            SortKey::Name.compare(&eclair, &record("eclair", (2021, 1, 1))),
            Ordering::Equal
        );
    }

    #[test]
    fn test_view_parse() {
        assert_eq!(ViewMode::parse("grid"), Some(ViewMode::Grid));
        assert_eq!(ViewMode::parse("list"), Some(ViewMode::List));
        assert_eq!(ViewMode::parse("masonry"), None);
        assert_eq!(ViewMode::List.css_class(), "list-view");
    }
}
