//! HTTP front end: serves the rendered page and applies visitor actions to
//! the shared page state. Each request is one user action against a single
//! page session.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use chrono::Timelike;
use folio_core::{Field, Page, ViewMode};
use folio_store::PrefStore;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::feed::GitHubFeed;
use crate::render::{render_feed, render_page, render_projects};

pub struct AppState {
    page: Mutex<Page<PrefStore>>,
    feed: GitHubFeed,
    contact_delay: Duration,
}

impl AppState {
    pub fn new(page: Page<PrefStore>, feed: GitHubFeed, contact_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            page: Mutex::new(page),
            feed,
            contact_delay,
        })
    }
}

type Shared = Arc<AppState>;

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/projects", get(projects_fragment))
        .route("/api/projects", get(projects_json))
        .route("/view/{mode}", post(set_view))
        .route("/theme/toggle", post(toggle_theme))
        .route("/repos", get(repos))
        .route("/repos/retry", post(retry_repos))
        .route("/contact", post(contact))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct GridQuery {
    filter: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContactRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

/// Apply filter/sort choices from the query string. Both phases run within
/// the request; only the settled stage is rendered.
fn apply_grid_query(page: &mut Page<PrefStore>, query: &GridQuery) {
    if let Some(filter) = query.filter.as_deref() {
        let transition = page.projects.set_filter(filter);
        page.projects.settle(&transition);
    }
    if let Some(sort) = query.sort.as_deref() {
        let transition = page.projects.set_sort(sort);
        page.projects.settle(&transition);
    }
}

/// Fetch the feed once per session; later loads only happen on retry.
async fn ensure_feed_loaded(state: &AppState) {
    {
        let mut page = state.page.lock().await;
        if page.feed.attempts() > 0 {
            return;
        }
        page.feed.begin_load();
    }
    reload_feed(state).await;
}

async fn reload_feed(state: &AppState) {
    let result = state.feed.fetch().await;
    let mut page = state.page.lock().await;
    page.feed.finish(result);
}

async fn index(State(state): State<Shared>, Query(query): Query<GridQuery>) -> Html<String> {
    ensure_feed_loaded(&state).await;
    let mut page = state.page.lock().await;
    apply_grid_query(&mut page, &query);
    Html(render_page(&*page, local_hour(), None))
}

async fn projects_fragment(
    State(state): State<Shared>,
    Query(query): Query<GridQuery>,
) -> Html<String> {
    let mut page = state.page.lock().await;
    apply_grid_query(&mut page, &query);
    Html(render_projects(&page.projects))
}

async fn projects_json(
    State(state): State<Shared>,
    Query(query): Query<GridQuery>,
) -> Json<serde_json::Value> {
    let mut page = state.page.lock().await;
    apply_grid_query(&mut page, &query);
    let projects = &page.projects;
    Json(serde_json::json!({
        "filter": projects.state().filter.as_str(),
        "sort": projects.state().sort.as_str(),
        "view": projects.state().view.as_str(),
        "empty": projects.stage().empty_visible(),
        "visible": projects.visible_records(),
    }))
}

async fn set_view(State(state): State<Shared>, Path(mode): Path<String>) -> Redirect {
    match ViewMode::parse(&mode) {
        Some(mode) => {
            let mut page = state.page.lock().await;
            if page.set_view(mode) {
                tracing::info!("view mode set to {mode}");
            }
        }
        None => tracing::debug!("ignoring unknown view mode '{mode}'"),
    }
    Redirect::to("/#projects")
}

async fn toggle_theme(State(state): State<Shared>) -> Redirect {
    let theme = state.page.lock().await.toggle_theme();
    tracing::info!("theme set to {}", theme.as_str());
    Redirect::to("/")
}

async fn repos(State(state): State<Shared>) -> Html<String> {
    ensure_feed_loaded(&state).await;
    let page = state.page.lock().await;
    Html(render_feed(page.feed.state()))
}

async fn retry_repos(State(state): State<Shared>) -> Html<String> {
    state.page.lock().await.feed.begin_load();
    reload_feed(&state).await;
    let page = state.page.lock().await;
    Html(render_feed(page.feed.state()))
}

async fn contact(State(state): State<Shared>, Form(req): Form<ContactRequest>) -> Response {
    let submission = {
        let mut page = state.page.lock().await;
        page.contact.edit(Field::Name, &req.name);
        page.contact.edit(Field::Email, &req.email);
        page.contact.edit(Field::Message, &req.message);
        match page.contact.submit() {
            Ok(submission) => submission,
            Err(errors) => {
                tracing::debug!("contact form has {} invalid fields", errors.len());
                let body = render_page(&*page, local_hour(), None);
                return (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response();
            }
        }
    };

    // Simulated delivery.
    tokio::time::sleep(state.contact_delay).await;

    let mut page = state.page.lock().await;
    let status = page.complete_contact(&submission);
    tracing::info!("contact message accepted from {}", submission.first_name());
    Html(render_page(&*page, local_hour(), Some(&status))).into_response()
}
