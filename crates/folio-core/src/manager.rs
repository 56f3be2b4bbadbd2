use crate::catalog::{Catalog, ProjectRecord, distinct_categories};
use crate::prefs::{PreferenceStore, keys};
use crate::state::{Filter, FilterSortViewState, SortKey, ViewMode};
use crate::transition::{Stage, Transition, TransitionTiming};

/// Result of deriving the visible records from the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recompute {
    /// Catalog indices of matching records, in display order.
    pub visible: Vec<usize>,
    pub is_empty: bool,
}

/// Project grid controller: owns the catalog, the filter/sort/view choices
/// and the stage they are rendered onto.
#[derive(Debug, Clone)]
pub struct ProjectManager {
    records: Vec<ProjectRecord>,
    state: FilterSortViewState,
    stage: Stage,
    timing: TransitionTiming,
}

impl ProjectManager {
    /// Build the manager with the persisted view mode already applied and
    /// the stage settled on the initial state.
    pub fn new(catalog: Catalog, prefs: &impl PreferenceStore) -> Self {
        let records = catalog.into_records();
        let view = prefs
            .get(keys::PROJECT_VIEW)
            .and_then(|v| ViewMode::parse(&v))
            .unwrap_or_default();
        let state = FilterSortViewState {
            view,
            ..Default::default()
        };

        let mut manager = Self {
            stage: Stage::new(records.len(), view),
            records,
            state,
            timing: TransitionTiming::default(),
        };
        let initial = manager.recompute();
        manager.stage.snap(&initial.visible);
        manager
    }

    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        distinct_categories(&self.records)
    }

    pub fn state(&self) -> &FilterSortViewState {
        &self.state
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn set_filter(&mut self, filter: impl Into<Filter>) -> Transition {
        self.state.filter = filter.into();
        self.refresh()
    }

    pub fn set_sort(&mut self, key: impl Into<SortKey>) -> Transition {
        self.state.sort = key.into();
        self.refresh()
    }

    /// Back to the full catalog, keeping the current sort.
    pub fn reset_filters(&mut self) -> Transition {
        self.set_filter(Filter::All)
    }

    /// Switch layout and persist the choice. Returns false, touching neither
    /// the stage nor the store, when `mode` is already active.
    pub fn set_view(&mut self, mode: ViewMode, prefs: &mut impl PreferenceStore) -> bool {
        if self.state.view == mode {
            return false;
        }
        self.state.view = mode;
        prefs.set(keys::PROJECT_VIEW, mode.as_str());
        self.stage.set_layout(mode);
        true
    }

    /// Derive the visible records from the current state alone.
    pub fn recompute(&self) -> Recompute {
        let mut visible: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.state.filter.matches(r))
            .map(|(i, _)| i)
            .collect();

        let sort = self.state.sort;
        // sort_by is stable: ties keep catalog order.
        visible.sort_by(|&a, &b| sort.compare(&self.records[a], &self.records[b]));

        let is_empty = visible.is_empty();
        Recompute { visible, is_empty }
    }

    /// Recompute and start the leaving phase. The caller settles the returned
    /// transition after its delay.
    pub fn refresh(&mut self) -> Transition {
        let Recompute { visible, .. } = self.recompute();
        self.stage.begin(visible, self.timing)
    }

    pub fn settle(&mut self, transition: &Transition) {
        self.stage.settle(transition);
    }

    /// Records currently displayed on the stage, in display order.
    pub fn visible_records(&self) -> Vec<&ProjectRecord> {
        self.stage
            .displayed_in_order()
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPrefs;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ProjectRecord::new("Alpha", "web", date(2023, 1, 1)),
            ProjectRecord::new("Beta", "cli", date(2024, 6, 1)),
        ])
    }

    fn names(manager: &ProjectManager) -> Vec<&str> {
        manager
            .visible_records()
            .into_iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    fn apply(manager: &mut ProjectManager, transition: Transition) {
        manager.settle(&transition);
    }

    #[test]
    fn test_initial_state_newest_first() {
        let prefs = MemoryPrefs::new();
        let manager = ProjectManager::new(catalog(), &prefs);
        assert_eq!(manager.state().filter, Filter::All);
        assert_eq!(manager.state().sort, SortKey::Newest);
        assert_eq!(manager.state().view, ViewMode::Grid);
        assert_eq!(names(&manager), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_filter_then_all_oldest() {
        let prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(catalog(), &prefs);

        let t = manager.set_filter("web");
        apply(&mut manager, t);
        assert_eq!(names(&manager), vec!["Alpha"]);

        let t = manager.set_filter("all");
        apply(&mut manager, t);
        let t = manager.set_sort("oldest");
        apply(&mut manager, t);
        assert_eq!(names(&manager), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(catalog(), &prefs);
        let t = manager.set_filter("embedded");
        assert!(t.visible().is_empty());
        apply(&mut manager, t);
        assert!(manager.visible_records().is_empty());
        assert!(manager.stage().empty_visible());
        assert!(manager.recompute().is_empty);
    }

    #[test]
    fn test_unrecognized_sort_keeps_catalog_order() {
        let prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(catalog(), &prefs);
        let t = manager.set_sort("stars");
        apply(&mut manager, t);
        assert_eq!(manager.state().sort, SortKey::Insertion);
        assert_eq!(names(&manager), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_reset_filters_keeps_sort() {
        let prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(catalog(), &prefs);
        let t = manager.set_sort("name");
        apply(&mut manager, t);
        let t = manager.set_filter("cli");
        apply(&mut manager, t);
        let t = manager.reset_filters();
        apply(&mut manager, t);
        assert_eq!(manager.state().sort, SortKey::Name);
        assert_eq!(names(&manager), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_set_view_persists_and_is_idempotent() {
        let mut prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(catalog(), &prefs);

        assert!(!manager.set_view(ViewMode::Grid, &mut prefs));
        assert_eq!(prefs.writes(), 0);

        assert!(manager.set_view(ViewMode::List, &mut prefs));
        assert_eq!(prefs.get(keys::PROJECT_VIEW).as_deref(), Some("list"));
        assert_eq!(manager.stage().layout(), ViewMode::List);

        assert!(!manager.set_view(ViewMode::List, &mut prefs));
        assert_eq!(prefs.writes(), 1);
    }

    #[test]
    fn test_persisted_view_applied_on_load() {
        let mut prefs = MemoryPrefs::new();
        let mut first = ProjectManager::new(catalog(), &prefs);
        first.set_view(ViewMode::List, &mut prefs);

        let fresh = ProjectManager::new(catalog(), &prefs);
        assert_eq!(fresh.state().view, ViewMode::List);
        assert_eq!(fresh.stage().layout(), ViewMode::List);
    }

    #[test]
    fn test_garbage_persisted_view_defaults_to_grid() {
        let mut prefs = MemoryPrefs::new();
        prefs.set(keys::PROJECT_VIEW, "carousel");
        let manager = ProjectManager::new(catalog(), &prefs);
        assert_eq!(manager.state().view, ViewMode::Grid);
    }

    #[test]
    fn test_set_view_does_not_touch_cards() {
        let mut prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(catalog(), &prefs);
        let before = manager.stage().cards().to_vec();
        manager.set_view(ViewMode::List, &mut prefs);
        assert_eq!(manager.stage().cards(), before.as_slice());
    }

    #[test]
    fn test_recompute_is_pure() {
        let prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(catalog(), &prefs);
        let _pending = manager.set_filter("cli");
        let generation = manager.stage().settled_generation();

        let a = manager.recompute();
        let b = manager.recompute();
        assert_eq!(a, b);
        assert_eq!(a.visible, vec![1]);
        assert_eq!(manager.stage().settled_generation(), generation);
    }

    #[test]
    fn test_name_sort_stable_on_case_ties() {
        let prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(
            Catalog::new(vec![
                ProjectRecord::new("beta", "web", date(2020, 1, 1)),
                ProjectRecord::new("Alpha", "web", date(2020, 1, 1)),
                ProjectRecord::new("BETA", "web", date(2021, 1, 1)),
                ProjectRecord::new("alpha", "web", date(2022, 1, 1)),
            ]),
            &prefs,
        );
        let t = manager.set_sort("name");
        apply(&mut manager, t);
        assert_eq!(names(&manager), vec!["Alpha", "alpha", "beta", "BETA"]);

        let t = manager.set_sort("name");
        apply(&mut manager, t);
        assert_eq!(names(&manager), vec!["Alpha", "alpha", "beta", "BETA"]);
    }

    #[test]
    fn test_name_sort_places_accented_names_alphabetically() {
        let prefs = MemoryPrefs::new();
        let mut manager = ProjectManager::new(
            Catalog::new(vec![
                ProjectRecord::new("Zeta", "web", date(2020, 1, 1)),
                ProjectRecord::new("Éclair", "web", date(2020, 1, 1)),
                ProjectRecord::new("Alpha", "web", date(2020, 1, 1)),
                ProjectRecord::new("eclair", "web", date(2021, 1, 1)),
            ]),
            &prefs,
        );
        let t = manager.set_sort("name");
        apply(&mut manager, t);
        assert_eq!(names(&manager), vec!["Alpha", "Éclair", "eclair", "Zeta"]);
    }

    #[test]
    fn test_newest_ties_keep_catalog_order() {
        let prefs = MemoryPrefs::new();
        let manager = ProjectManager::new(
            Catalog::new(vec![
                ProjectRecord::new("first", "web", date(2020, 1, 1)),
                ProjectRecord::new("second", "web", date(2020, 1, 1)),
                ProjectRecord::new("third", "web", date(2021, 1, 1)),
            ]),
            &prefs,
        );
        assert_eq!(names(&manager), vec!["third", "first", "second"]);
    }
}
