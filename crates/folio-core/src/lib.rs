//! Portfolio page model.
//!
//! Holds the state behind every interactive part of the portfolio page: the
//! project grid (filter, sort, view mode and its staged transitions), the
//! contact form, theme, greeting, visitor counters and the repository feed
//! panel. Rendering and transport live elsewhere; nothing in this crate
//! touches the network or the filesystem.

pub mod catalog;
pub mod constants;
pub mod contact;
pub mod feed;
pub mod manager;
pub mod page;
pub mod prefs;
pub mod state;
pub mod theme;
pub mod transition;
pub mod visitor;

pub use catalog::{Catalog, CatalogError, ProjectRecord};
pub use constants::{
    DEFAULT_CONTACT_DELAY_MS, DEFAULT_LEAVE_MS, DEFAULT_STAGGER_MS, FEED_PER_PAGE, FROZEN_ORDER,
};
pub use contact::{ContactForm, Field, FieldState, Submission};
pub use feed::{FeedError, FeedPanel, FeedState, Repo, RepoCard, escape_html};
pub use manager::{ProjectManager, Recompute};
pub use page::{Page, Role};
pub use prefs::{MemoryPrefs, PreferenceStore, keys};
pub use state::{Filter, FilterSortViewState, SortKey, ViewMode};
pub use theme::{Theme, ThemeToggle};
pub use transition::{CardView, Stage, Transition, TransitionTiming};
pub use visitor::{VisitorStats, format_elapsed, greeting};
