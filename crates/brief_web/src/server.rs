use anyhow::{anyhow, Context, Result};
use axum::Router;
use brief_store::ObjectStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, TraceLayer};
use tracing::Level;

use crate::routes;
use crate::state::{AppState, LinkSigner};

pub struct Server {
    socket: TcpListener,
    app: Router,
}

impl Server {
    pub async fn new<O, S>(state: AppState<O, S>, port: u16) -> Result<Self>
    where
        O: ObjectStore + Send + Sync + 'static,
        S: LinkSigner + Send + Sync + 'static,
    {
        use axum::routing::get;

        let bind_addr = format!("0.0.0.0:{port}");
        let socket = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| anyhow!("could not bind to `{bind_addr}`"))?;

        let app = Router::new()
            .route("/", get(routes::list_briefings::<O, S>))
            .layer(
                ServiceBuilder::new().layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO)),
                ),
            )
            .with_state(state);

        Ok(Self { socket, app })
    }

    pub async fn serve(self) -> Result<()> {
        axum::serve(self.socket, self.app)
            .await
            .context("the HTTP server encountered a failure")
    }
}
