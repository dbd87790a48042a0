mod routes;
mod server;
mod state;

use brief_store::{GcsStore, MetadataTokenSource};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::state::{AppState, ImpersonatedSigner};

#[derive(Parser)]
#[command(name = "brief-web", about = "Lists published audio briefings")]
struct Cli {
    /// Bucket holding the published briefings
    #[arg(long, env = "GCS_BUCKET_NAME")]
    bucket: String,

    /// Service account to impersonate for signed URLs; omit to serve
    /// public URLs instead
    #[arg(long, env = "SERVICE_ACCOUNT_EMAIL")]
    service_account: Option<String>,

    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = GcsStore::new(cli.bucket.clone(), MetadataTokenSource::default());
    let signer = cli
        .service_account
        .map(|sa| ImpersonatedSigner::new(sa, cli.bucket));

    let server = server::Server::new(AppState::new(store, signer), cli.port).await?;
    server.serve().await
}
