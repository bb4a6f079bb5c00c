//! HTTP server rendering listing and detail pages from the CMS

mod pages;

pub use pages::{listing_page, site_data, ListingQuery, PageKind};

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Datelike, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::trace::TraceLayer;

use crate::content::{self, fetch::fetch_tagged_or_empty, Article, Event, Tagged};
use crate::helpers::timestamp_millis;
use crate::listing::Listing;
use crate::templates::{CardData, TemplateRenderer};
use crate::Bulletin;

/// Server state
struct ServerState {
    site: Bulletin,
    renderer: TemplateRenderer,
}

/// Build the page router
pub fn router(site: Bulletin) -> Result<Router> {
    let state = Arc::new(ServerState {
        site,
        renderer: TemplateRenderer::new()?,
    });

    Ok(Router::new()
        .route("/", get(home_handler))
        .route("/articles", get(listing_handler::<Article>))
        .route("/articles/:slug", get(detail_handler::<Article>))
        .route("/events", get(listing_handler::<Event>))
        .route("/events/:slug", get(detail_handler::<Event>))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(site: &Bulletin, ip: &str, port: u16) -> Result<()> {
    let app = router(site.clone())?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Reading content from {}", site.cms.base_url());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

impl ServerState {
    fn base_context(&self, current_path: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &site_data(&self.site.config));
        context.insert("current_path", current_path);
        context.insert("current_year", &Utc::now().year());
        context
    }

    fn render(&self, status: StatusCode, template: &str, context: &Context) -> Response {
        match self.renderer.render(template, context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render {}: {:#}", template, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }

    fn not_found(&self, current_path: &str, message: &str) -> Response {
        let mut context = self.base_context(current_path);
        context.insert("message", message);
        self.render(StatusCode::NOT_FOUND, "not_found.html", &context)
    }
}

/// Front page: newest articles and the next upcoming events
async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let cms = &state.site.cms;
    let (articles, events) = tokio::join!(
        fetch_tagged_or_empty::<Article>(cms),
        fetch_tagged_or_empty::<Event>(cms),
    );
    let config = &state.site.config;
    let count = config.home_items;

    let latest: Vec<CardData> = Listing::with_items(articles, config.page_size())
        .filtered()
        .into_iter()
        .take(count)
        .map(|article| Article::card(article, config))
        .collect();

    let upcoming: Vec<CardData> = upcoming_events(events)
        .iter()
        .take(count)
        .map(|event| Event::card(event, config))
        .collect();

    let mut context = state.base_context("/");
    context.insert("articles", &latest);
    context.insert("events", &upcoming);
    state.render(StatusCode::OK, "home.html", &context)
}

/// Events that have not ended yet, soonest first
fn upcoming_events(events: Vec<Tagged<Event>>) -> Vec<Tagged<Event>> {
    let now = Utc::now();
    let mut upcoming: Vec<_> = events.into_iter().filter(|e| e.is_upcoming(now)).collect();
    upcoming.sort_by_key(|e| timestamp_millis(e.time.as_deref()));
    upcoming
}

async fn listing_handler<T: PageKind>(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let mut listing = Listing::<T>::new(state.site.config.page_size());

    // Dropping the handle (client went away) cancels the fetch
    let handle = listing.begin_load(&state.site.cms);
    match handle.recv().await {
        Some(loaded) => {
            listing.apply(loaded);
        }
        None => tracing::warn!("Load of {} was cancelled", T::COLLECTION),
    }

    query.apply_to(&mut listing);

    let mut context = state.base_context(T::BASE_PATH);
    context.insert("listing", &listing_page(&listing, &state.site.config));
    state.render(StatusCode::OK, "listing.html", &context)
}

async fn detail_handler<T: PageKind>(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let current_path = format!("{}/{}", T::BASE_PATH, slug);

    match content::resolve::<T>(&state.site.cms, &slug).await {
        Ok(item) => {
            let mut context = state.base_context(&current_path);
            context.insert("detail", &T::detail(&item, &state.site.config));
            state.render(StatusCode::OK, "detail.html", &context)
        }
        Err(e) => {
            tracing::info!("{}", e);
            state.not_found(&current_path, &format!("We couldn't find that {}.", T::KIND))
        }
    }
}

async fn fallback_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    state.not_found(uri.path(), "There is no page at this address.")
}
