//! Page sessions backed by the SQLite store, across reopen.

use folio_core::{Catalog, Page, Theme, TransitionTiming, ViewMode};
use folio_store::PrefStore;
use tempfile::TempDir;

fn catalog() -> Catalog {
    Catalog::from_toml_str(
        r#"
[[project]]
name = "Alpha"
category = "web"
date = "2023-01-01"

[[project]]
name = "Beta"
category = "cli"
date = "2024-06-01"
"#,
    )
    .unwrap()
}

#[test]
fn preferences_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.db");

    {
        let store = PrefStore::open(&path).unwrap();
        let mut page = Page::boot(catalog(), store, TransitionTiming::default());
        assert_eq!(page.visits.visits(), 1);
        page.set_view(ViewMode::List);
        page.set_theme(Theme::Dark);
    }

    let store = PrefStore::open(&path).unwrap();
    let page = Page::boot(catalog(), store, TransitionTiming::default());
    assert_eq!(page.visits.visits(), 2);
    assert_eq!(page.projects.state().view, ViewMode::List);
    assert_eq!(page.projects.stage().layout(), ViewMode::List);
    assert_eq!(page.theme.theme(), Theme::Dark);
}
