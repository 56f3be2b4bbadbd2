/// Order slot given to every card while it is leaving.
pub const FROZEN_ORDER: u32 = 999;

/// Delay between the leaving phase and the settle phase of a transition.
pub const DEFAULT_LEAVE_MS: u64 = 300;

/// Per-position delay added to each card's entering animation.
pub const DEFAULT_STAGGER_MS: u64 = 50;

/// Simulated delivery delay for the contact form.
pub const DEFAULT_CONTACT_DELAY_MS: u64 = 2000;

/// Number of repositories requested from the feed.
pub const FEED_PER_PAGE: u8 = 6;

/// Filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

/// Minimum trimmed length of the contact message, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Minimum trimmed length of the contact name, in characters.
pub const MIN_NAME_CHARS: usize = 2;
