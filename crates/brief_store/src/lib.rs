//! # brief_store
//!
//! Google Cloud plumbing for the audio briefing pipeline: an object-store
//! abstraction backed by the GCS JSON API, access tokens from the GCE
//! metadata server, Secret Manager payload access, and V4 signed URLs via
//! the IAM Credentials `signBlob` endpoint.
//!
//! Everything talks plain REST through reqwest; no Google SDK crates are
//! involved.

mod auth;
mod secrets;
mod signer;
mod store;

pub use auth::{MetadataTokenSource, TokenSource};
pub use secrets::SecretManagerClient;
pub use signer::UrlSigner;
pub use store::{gcs::GcsStore, ObjectStore};
