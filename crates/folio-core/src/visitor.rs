use crate::prefs::{PreferenceStore, keys};

/// Time-of-day salutation, personalised for returning visitors.
pub fn greeting(hour: u32, visitor: Option<&str>) -> String {
    let base = if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    match visitor {
        Some(name) if !name.is_empty() => format!("{base}, {name}"),
        _ => base.to_string(),
    }
}

/// Format elapsed seconds as `m:ss`.
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Visit counter and remembered visitor name.
#[derive(Debug, Clone)]
pub struct VisitorStats {
    visits: u64,
    visitor_name: Option<String>,
}

impl VisitorStats {
    /// Count this page load and persist the new total.
    pub fn record_visit(prefs: &mut impl PreferenceStore) -> Self {
        let previous = prefs
            .get(keys::VISIT_COUNT)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let visits = previous + 1;
        prefs.set(keys::VISIT_COUNT, &visits.to_string());
        tracing::debug!("visit #{visits}");
        Self {
            visits,
            visitor_name: prefs.get(keys::VISITOR_NAME),
        }
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn visitor_name(&self) -> Option<&str> {
        self.visitor_name.as_deref()
    }

    pub fn remember(&mut self, name: &str) {
        self.visitor_name = Some(name.to_string());
    }

    pub fn greeting(&self, hour: u32) -> String {
        greeting(hour, self.visitor_name())
    }
}
