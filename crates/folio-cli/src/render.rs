//! HTML rendering of the page model.
//!
//! Controls are plain links and forms so the page works without scripts.

use folio_core::{
    ContactForm, FeedState, Field, FieldState, Filter, Page, PreferenceStore, ProjectManager, Role,
    SortKey, escape_html, format_elapsed,
};
use reqwest::Url;

const SORT_OPTIONS: [(SortKey, &str); 3] = [
    (SortKey::Newest, "Newest first"),
    (SortKey::Oldest, "Oldest first"),
    (SortKey::Name, "Name"),
];

/// Base used only to build query strings; never rendered.
const QUERY_BASE: &str = "http://folio.invalid/";

/// Percent-encoded `?filter=..&sort=..` for links back to the page, escaped
/// for use inside an attribute.
fn query(filter: &Filter, sort: SortKey) -> String {
    let params = [("filter", filter.as_str()), ("sort", sort.as_str())];
    let encoded = Url::parse_with_params(QUERY_BASE, &params)
        .ok()
        .and_then(|url| url.query().map(str::to_string))
        .unwrap_or_default();
    format!("?{}", escape_html(&encoded))
}

pub fn render_filters(manager: &ProjectManager) -> String {
    let state = manager.state();
    let mut out = String::from("<div class=\"filter-bar\">\n");

    let mut options = vec![Filter::All];
    options.extend(manager.categories().into_iter().map(Filter::parse));
    for filter in options {
        let active = if filter == state.filter { " active" } else { "" };
        out.push_str(&format!(
            "  <a class=\"filter-btn{active}\" data-filter=\"{f}\" href=\"/{q}\">{f}</a>\n",
            f = escape_html(filter.as_str()),
            q = query(&filter, state.sort),
        ));
    }

    out.push_str(&format!(
        "  <form method=\"get\" action=\"/\">\n    <input type=\"hidden\" name=\"filter\" value=\"{}\">\n    <select id=\"sort-select\" name=\"sort\">\n",
        escape_html(state.filter.as_str())
    ));
    for (key, label) in SORT_OPTIONS {
        let selected = if key == state.sort { " selected" } else { "" };
        out.push_str(&format!(
            "      <option value=\"{}\"{selected}>{label}</option>\n",
            key.as_str()
        ));
    }
    out.push_str("    </select>\n    <button type=\"submit\">Sort</button>\n  </form>\n");

    for mode in ["grid", "list"] {
        let active = if mode == state.view.as_str() { " active" } else { "" };
        out.push_str(&format!(
            "  <form method=\"post\" action=\"/view/{mode}\"><button class=\"view-btn{active}\" data-view=\"{mode}\">{mode}</button></form>\n"
        ));
    }
    out.push_str("</div>\n");
    out
}

pub fn render_projects(manager: &ProjectManager) -> String {
    let stage = manager.stage();
    let mut out = format!(
        "<div id=\"{}\" class=\"projects-grid {}\">\n",
        Role::Projects.element_id(),
        stage.layout().css_class()
    );

    for (record, card) in manager.records().iter().zip(stage.cards()) {
        let mut class = String::from("project-card");
        if card.leaving {
            class.push_str(" hiding");
        }
        let mut style = format!(
            "order: {}; animation-delay: {}ms",
            card.order,
            card.enter_delay.as_millis()
        );
        if !card.displayed {
            style.push_str("; display: none");
        }

        out.push_str(&format!(
            "  <article class=\"{class}\" data-category=\"{}\" data-date=\"{}\" data-name=\"{}\" style=\"{style}\">\n",
            escape_html(&record.category),
            record.date,
            escape_html(&record.name),
        ));
        out.push_str(&format!("    <h3>{}</h3>\n", escape_html(&record.name)));
        if !record.summary.is_empty() {
            out.push_str(&format!("    <p>{}</p>\n", escape_html(&record.summary)));
        }
        if !record.tags.is_empty() {
            let tags: String = record
                .tags
                .iter()
                .map(|tag| format!("<li>{}</li>", escape_html(tag)))
                .collect();
            out.push_str(&format!("    <ul class=\"tags\">{tags}</ul>\n"));
        }
        if let Some(url) = &record.url {
            out.push_str(&format!(
                "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View project</a>\n",
                escape_html(url)
            ));
        }
        out.push_str("  </article>\n");
    }
    out.push_str("</div>\n");

    let display = if stage.empty_visible() { "block" } else { "none" };
    out.push_str(&format!(
        "<div id=\"empty-state\" style=\"display: {display}\"><p>No projects found</p><a class=\"btn\" href=\"/{}\">Show all</a></div>\n",
        query(&Filter::All, manager.state().sort)
    ));
    out
}

pub fn render_feed(state: &FeedState) -> String {
    let mut out = format!("<div id=\"{}\">\n", Role::RepoFeed.element_id());
    match state {
        FeedState::Loading => {
            out.push_str("  <div class=\"loading-state\"><p>Loading repositories...</p></div>\n");
        }
        FeedState::Empty => {
            out.push_str("  <div class=\"loading-state\"><p>No repositories found</p></div>\n");
        }
        FeedState::Failed(_) => {
            out.push_str(
                "  <div class=\"error-state\">\n    <p>Failed to load GitHub repositories</p>\n    <form method=\"post\" action=\"/repos/retry\"><button class=\"btn btn-secondary\" data-action=\"retry-feed\">Try Again</button></form>\n  </div>\n",
            );
        }
        FeedState::Ready(cards) => {
            for card in cards {
                let language = card
                    .language
                    .as_deref()
                    .map(|lang| {
                        format!(
                            "<span class=\"github-lang\"><span class=\"lang-dot\" style=\"background: {}\"></span>{}</span>",
                            card.color,
                            escape_html(lang)
                        )
                    })
                    .unwrap_or_default();
                out.push_str(&format!(
                    "  <div class=\"github-card\">\n    <h4>{}</h4>\n    <p>{}</p>\n    <div class=\"github-card-footer\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View Repo</a>{language}</div>\n  </div>\n",
                    escape_html(&card.name),
                    escape_html(&card.description),
                    escape_html(&card.url),
                ));
            }
        }
    }
    out.push_str("</div>\n");
    out
}

pub fn render_contact(form: &ContactForm, status: Option<&str>) -> String {
    let mut out = format!(
        "<form id=\"{}\" method=\"post\" action=\"/contact\" novalidate>\n",
        Role::Contact.element_id()
    );
    for field in Field::ALL {
        let name = field.as_str();
        let value = escape_html(form.value(field));
        let (class, error) = match form.state(field) {
            FieldState::Untouched => ("", String::new()),
            FieldState::Valid => (" class=\"success\"", String::new()),
            FieldState::Invalid(msg) => (" class=\"error\"", escape_html(msg)),
        };
        let input = match field {
            Field::Message => format!("<textarea id=\"{name}\" name=\"{name}\"{class}>{value}</textarea>"),
            Field::Email => format!("<input id=\"{name}\" type=\"email\" name=\"{name}\" value=\"{value}\"{class}>"),
            Field::Name => format!("<input id=\"{name}\" type=\"text\" name=\"{name}\" value=\"{value}\"{class}>"),
        };
        let show = if error.is_empty() { "" } else { " show" };
        out.push_str(&format!(
            "  <div class=\"form-group\">{input}<span id=\"{name}-error\" class=\"field-error{show}\">{error}</span></div>\n"
        ));
    }
    out.push_str(&format!(
        "  <small><span id=\"char-current\">{}</span> characters</small>\n",
        form.message_len()
    ));
    out.push_str("  <button class=\"btn-submit\" type=\"submit\">Send</button>\n");
    match status {
        Some(msg) => out.push_str(&format!(
            "  <div id=\"form-status\" class=\"form-status success\">{}</div>\n",
            escape_html(msg)
        )),
        None => out.push_str("  <div id=\"form-status\" class=\"form-status\"></div>\n"),
    }
    out.push_str("</form>\n");
    out
}

/// Full document for the current page state.
pub fn render_page<P: PreferenceStore>(page: &Page<P>, hour: u32, status: Option<&str>) -> String {
    let theme = page.theme.theme();

    let mut out = format!(
        "<!DOCTYPE html>\n<html lang=\"en\" data-theme=\"{}\">\n",
        theme.as_str()
    );
    out.push_str("<head><meta charset=\"utf-8\"><title>Portfolio</title></head>\n<body>\n");
    out.push_str(&format!(
        "<nav id=\"navbar\"><form method=\"post\" action=\"/theme/toggle\"><button id=\"{}\"><span class=\"theme-icon\">{}</span></button></form></nav>\n",
        Role::Theme.element_id(),
        theme.icon()
    ));
    out.push_str(&format!(
        "<h1 id=\"{}\">{}</h1>\n",
        Role::Greeting.element_id(),
        escape_html(&page.greeting(hour))
    ));
    out.push_str("<section id=\"projects\">\n");
    out.push_str(&render_filters(&page.projects));
    out.push_str(&render_projects(&page.projects));
    out.push_str("</section>\n<section id=\"github\">\n");
    out.push_str(&render_feed(page.feed.state()));
    out.push_str("</section>\n<section id=\"contact\">\n");
    out.push_str(&render_contact(&page.contact, status));
    out.push_str("</section>\n");
    out.push_str(&format!(
        "<footer>Visit #<span id=\"{}\">{}</span> &middot; <span id=\"time-on-site\">{}</span></footer>\n",
        Role::VisitorStats.element_id(),
        page.visits.visits(),
        format_elapsed(page.time_on_site().as_secs())
    ));
    out.push_str("</body>\n</html>\n");
    out
}
