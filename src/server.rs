//! HTTP surface: shared context, router, and the four handlers.
//!
//! Every handler is a thin orchestration over the store, the cache, and the
//! templates. Reads go through the cache; writes hit the store, invalidate
//! the cache, then re-render the list fragment through the read path.

use crate::cache::GroupCache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::group::group_by_due_date;
use crate::model::{DateOrder, TodoGroup};
use crate::store::{SqliteTodoStore, TodoStore};
use crate::templates::Templates;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// Everything the handlers need, created once before serving begins.
///
/// Owning the cache here (rather than a process global) keeps all mutable
/// state reachable from one place.
pub struct AppContext {
    store: SqliteTodoStore,
    cache: GroupCache,
    templates: Templates,
    date_order: DateOrder,
}

impl AppContext {
    /// Open the store, load the templates, and build an empty cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or the templates cannot be
    /// initialized; callers treat this as fatal.
    pub fn initialize(config: &Config) -> Result<Self> {
        let store = SqliteTodoStore::new(&config.db_path)?;
        let templates = Templates::load(None)?;
        let cache = GroupCache::new(config.cache_ttl());
        Ok(Self { store, cache, templates, date_order: config.date_order })
    }

    /// The grouped view, served from cache when fresh.
    fn grouped(&self) -> Result<Vec<TodoGroup>> {
        self.cache.get_or_compute(|| {
            let todos = self.store.list_all(self.date_order)?;
            Ok(group_by_due_date(todos, self.date_order))
        })
    }

    fn render_list_fragment(&self) -> Result<Html<String>> {
        let groups = self.grouped()?;
        Ok(Html(self.templates.render_list(&groups)?))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        (status, self.to_string()).into_response()
    }
}

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/add", post(add_todo))
        .route("/complete", post(mark_complete))
        .route("/uncompleted", post(mark_uncompleted))
        .with_state(ctx)
}

/// Initialize the context and serve until the process is killed.
///
/// # Errors
///
/// Returns an error if startup fails or if the listener cannot be bound;
/// both are fatal.
pub async fn serve(config: Config) -> Result<()> {
    let ctx = Arc::new(AppContext::initialize(&config)?);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("daylist listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct AddForm {
    task: String,
    priority: String,
    due_date: String,
}

#[derive(Debug, Deserialize)]
struct IdForm {
    id: String,
}

/// Parse a numeric form field, rejecting malformed input instead of
/// silently collapsing it to zero.
fn parse_form_field<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::InvalidInput { field, value: raw.to_string() })
}

fn parse_date_field(field: &'static str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput { field, value: raw.to_string() })
}

async fn show_page(State(ctx): State<Arc<AppContext>>) -> Result<Html<String>> {
    let groups = ctx.grouped()?;
    Ok(Html(ctx.templates.render_page(&groups)?))
}

async fn add_todo(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<AddForm>,
) -> Result<Html<String>> {
    let priority = parse_form_field::<i64>("priority", &form.priority)?;
    let due_date = parse_date_field("due_date", &form.due_date)?;

    let id = ctx.store.insert(&form.task, priority, due_date)?;
    tracing::info!(id, due_date = %due_date, "added todo");

    ctx.cache.invalidate();
    ctx.render_list_fragment()
}

async fn mark_complete(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<IdForm>,
) -> Result<Html<String>> {
    set_completed(&ctx, &form.id, true)
}

async fn mark_uncompleted(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<IdForm>,
) -> Result<Html<String>> {
    set_completed(&ctx, &form.id, false)
}

fn set_completed(ctx: &AppContext, raw_id: &str, completed: bool) -> Result<Html<String>> {
    let id = parse_form_field::<i64>("id", raw_id)?;

    ctx.store.set_completed(id, completed)?;
    tracing::info!(id, completed, "toggled todo");

    ctx.cache.invalidate();
    ctx.render_list_fragment()
}
