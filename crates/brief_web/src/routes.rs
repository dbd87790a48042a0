use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use brief_store::ObjectStore;
use serde::Serialize;
use tracing::{error, warn};

use crate::state::{AppState, LinkSigner, INDEX_TEMPLATE};

const LISTING_ERROR_BODY: &str =
    "Error: Could not retrieve audio files. Please check application logs.";

#[derive(Serialize, Debug, Clone)]
struct BriefingLink {
    name: String,
    url: String,
}

#[derive(Serialize, Debug)]
struct Context {
    files: Vec<BriefingLink>,
}

pub async fn list_briefings<O, S>(State(state): State<AppState<O, S>>) -> Response
where
    O: ObjectStore + Send + Sync + 'static,
    S: LinkSigner + Send + Sync + 'static,
{
    match render_listing(&state).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Error occured while listing briefings: {e:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, LISTING_ERROR_BODY).into_response()
        }
    }
}

async fn render_listing<O, S>(state: &AppState<O, S>) -> anyhow::Result<String>
where
    O: ObjectStore + Send + Sync,
    S: LinkSigner + Send + Sync,
{
    let names = state.store.list().await?;

    let mut files = Vec::new();
    for name in published_briefings(names) {
        let url = resolve_url(state, &name).await;
        files.push(BriefingLink { name, url });
    }

    Ok(state.templates.render(INDEX_TEMPLATE, &Context { files })?)
}

/// The published-audio objects, newest first. Date-stamped names sort
/// lexicographically in date order, so a plain descending name sort works.
fn published_briefings(names: Vec<String>) -> Vec<String> {
    let mut briefings = names
        .into_iter()
        .filter(|n| n.starts_with("summary-") && n.ends_with(".mp3"))
        .collect::<Vec<_>>();
    briefings.sort_by(|a, b| b.cmp(a));
    briefings
}

async fn resolve_url<O, S>(state: &AppState<O, S>, name: &str) -> String
where
    O: ObjectStore + Send + Sync,
    S: LinkSigner + Send + Sync,
{
    if let Some(signer) = &state.signer {
        match signer.signed_url(name).await {
            Ok(url) => return url,
            Err(e) => {
                warn!(error = ?e, object = name, "Falling back to the public URL");
            }
        }
    }

    state.store.public_url(name)
}
