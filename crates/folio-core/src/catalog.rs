use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::ALL_CATEGORIES;

/// One portfolio project entry.
///
/// `category`, `date` and `name` drive filtering and ordering. The remaining
/// fields are payload for the renderer and are never inspected by the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ProjectRecord {
    pub fn new(name: &str, category: &str, date: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            date,
            summary: String::new(),
            tags: Vec::new(),
            url: None,
        }
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Parse(String),
    ReservedCategory(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "invalid catalog: {msg}"),
            CatalogError::ReservedCategory(name) => {
                write!(f, "project '{name}' uses the reserved category '{ALL_CATEGORIES}'")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "project")]
    projects: Vec<ProjectRecord>,
}

/// The fixed, ordered list of project records shown on the page.
///
/// Catalog order is the insertion order used to break sort ties.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from TOML with one `[[project]]` table per record.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;

        if let Some(bad) = file
            .projects
            .iter()
            .find(|r| r.category == ALL_CATEGORIES)
        {
            return Err(CatalogError::ReservedCategory(bad.name.clone()));
        }

        tracing::debug!("loaded catalog with {} projects", file.projects.len());
        Ok(Self::new(file.projects))
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProjectRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in first-seen order, for building filter controls.
    pub fn categories(&self) -> Vec<&str> {
        distinct_categories(&self.records)
    }
}

pub(crate) fn distinct_categories(records: &[ProjectRecord]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for record in records {
        if !seen.contains(&record.category.as_str()) {
            seen.push(&record.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[project]]
name = "Alpha"
category = "web"
date = "2023-01-01"
summary = "A web thing"
tags = ["rust", "wasm"]
url = "https://example.com/alpha"

[[project]]
name = "Beta"
category = "cli"
date = "2024-06-01"

[[project]]
name = "Gamma"
category = "web"
date = "2022-03-15"
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let alpha = &catalog.records()[0];
        assert_eq!(alpha.name, "Alpha");
        assert_eq!(alpha.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(alpha.tags, vec!["rust", "wasm"]);
        assert_eq!(alpha.url.as_deref(), Some("https://example.com/alpha"));

        let beta = &catalog.records()[1];
        assert!(beta.summary.is_empty());
        assert!(beta.url.is_none());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        assert_eq!(catalog.categories(), vec!["web", "cli"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
    }

    #[test]
    fn test_reserved_category_rejected() {
        let src = "[[project]]\nname = \"X\"\ncategory = \"all\"\ndate = \"2020-01-01\"\n";
        let err = Catalog::from_toml_str(src).unwrap_err();
        assert!(matches!(err, CatalogError::ReservedCategory(ref n) if n == "X"));
    }

    #[test]
    fn test_bad_date_rejected() {
        let src = "[[project]]\nname = \"X\"\ncategory = \"web\"\ndate = \"yesterday\"\n";
        assert!(matches!(
            Catalog::from_toml_str(src),
            Err(CatalogError::Parse(_))
        ));
    }
}
