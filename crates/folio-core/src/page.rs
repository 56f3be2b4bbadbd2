use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::contact::{ContactForm, Submission};
use crate::feed::FeedPanel;
use crate::manager::ProjectManager;
use crate::prefs::PreferenceStore;
use crate::state::ViewMode;
use crate::theme::{Theme, ThemeToggle};
use crate::transition::TransitionTiming;
use crate::visitor::VisitorStats;

/// Semantic roles on the page, each backed by one component of [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Projects,
    Theme,
    Greeting,
    VisitorStats,
    Contact,
    RepoFeed,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Projects,
        Role::Theme,
        Role::Greeting,
        Role::VisitorStats,
        Role::Contact,
        Role::RepoFeed,
    ];

    /// Element id the renderer mounts this role under.
    pub fn element_id(&self) -> &'static str {
        match self {
            Role::Projects => "projects-grid",
            Role::Theme => "theme-toggle",
            Role::Greeting => "greeting",
            Role::VisitorStats => "visit-count",
            Role::Contact => "contact-form",
            Role::RepoFeed => "github-projects",
        }
    }
}

/// Application state for one page session. Built once by [`Page::boot`];
/// every component is reached through it rather than through globals.
pub struct Page<P: PreferenceStore> {
    prefs: P,
    pub projects: ProjectManager,
    pub theme: ThemeToggle,
    pub visits: VisitorStats,
    pub contact: ContactForm,
    pub feed: FeedPanel,
    started: Instant,
}

impl<P: PreferenceStore> Page<P> {
    /// Load persisted preferences, count the visit and mount every role.
    pub fn boot(catalog: Catalog, mut prefs: P, timing: TransitionTiming) -> Self {
        let projects = ProjectManager::new(catalog, &prefs).with_timing(timing);
        let theme = ThemeToggle::load(&prefs);
        let visits = VisitorStats::record_visit(&mut prefs);
        tracing::info!(
            "page booted: {} projects, view={}, theme={}, visit #{}",
            projects.records().len(),
            projects.state().view,
            theme.theme().as_str(),
            visits.visits()
        );
        Self {
            prefs,
            projects,
            theme,
            visits,
            contact: ContactForm::new(),
            feed: FeedPanel::new(),
            started: Instant::now(),
        }
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn into_prefs(self) -> P {
        self.prefs
    }

    pub fn set_view(&mut self, mode: ViewMode) -> bool {
        self.projects.set_view(mode, &mut self.prefs)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut self.prefs)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        self.theme.set(theme, &mut self.prefs)
    }

    /// Record a delivered contact submission and return the status line.
    pub fn complete_contact(&mut self, submission: &Submission) -> String {
        let status = self.contact.complete(submission, &mut self.prefs);
        self.visits.remember(submission.first_name());
        status
    }

    pub fn greeting(&self, hour: u32) -> String {
        self.visits.greeting(hour)
    }

    pub fn time_on_site(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProjectRecord;
    use crate::contact::Field;
    use crate::prefs::{MemoryPrefs, keys};
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        Catalog::new(vec![ProjectRecord::new(
            "Alpha",
            "web",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        )])
    }

    #[test]
    fn test_boot_counts_visit() {
        let page = Page::boot(catalog(), MemoryPrefs::new(), TransitionTiming::default());
        assert_eq!(page.visits.visits(), 1);
        assert_eq!(page.prefs().get(keys::VISIT_COUNT).as_deref(), Some("1"));

        let prefs = page.into_prefs();
        let again = Page::boot(catalog(), prefs, TransitionTiming::default());
        assert_eq!(again.visits.visits(), 2);
    }

    #[test]
    fn test_view_survives_reboot() {
        let mut page = Page::boot(catalog(), MemoryPrefs::new(), TransitionTiming::default());
        assert!(page.set_view(ViewMode::List));
        let page = Page::boot(catalog(), page.into_prefs(), TransitionTiming::default());
        assert_eq!(page.projects.stage().layout(), ViewMode::List);
    }

    #[test]
    fn test_theme_survives_reboot() {
        let mut page = Page::boot(catalog(), MemoryPrefs::new(), TransitionTiming::default());
        page.toggle_theme();
        let page = Page::boot(catalog(), page.into_prefs(), TransitionTiming::default());
        assert_eq!(page.theme.theme(), Theme::Dark);
    }

    #[test]
    fn test_contact_personalises_greeting() {
        let mut page = Page::boot(catalog(), MemoryPrefs::new(), TransitionTiming::default());
        assert_eq!(page.greeting(20), "Good evening");

        page.contact.edit(Field::Name, "Grace Hopper");
        page.contact.edit(Field::Email, "grace@navy.mil");
        page.contact.edit(Field::Message, "Hello from the compiler");
        let submission = page.contact.submit().unwrap();
        page.complete_contact(&submission);

        assert_eq!(page.greeting(20), "Good evening, Grace");
        let page = Page::boot(catalog(), page.into_prefs(), TransitionTiming::default());
        assert_eq!(page.greeting(9), "Good morning, Grace");
    }

    #[test]
    fn test_role_ids_unique() {
        let mut ids: Vec<&str> = Role::ALL.iter().map(|r| r.element_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Role::ALL.len());
    }
}
