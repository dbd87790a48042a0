use std::future::Future;
use std::sync::Arc;

use brief_store::{MetadataTokenSource, ObjectStore, UrlSigner};
use handlebars::Handlebars;

pub(crate) const INDEX_TEMPLATE: &str = "index";

/// Signed links stay valid for a day, matching the publish cadence.
const SIGNED_URL_EXPIRY_SECS: u32 = 24 * 60 * 60;

/// Produces a time-limited access URL for one published object.
pub trait LinkSigner {
    fn signed_url(&self, object: &str) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Signs links by impersonating a service account through the IAM
/// Credentials API.
pub struct ImpersonatedSigner {
    signer: UrlSigner<MetadataTokenSource>,
    bucket: String,
}

impl ImpersonatedSigner {
    pub fn new(service_account: String, bucket: String) -> Self {
        Self {
            signer: UrlSigner::new(service_account, MetadataTokenSource::default()),
            bucket,
        }
    }
}

impl LinkSigner for ImpersonatedSigner {
    async fn signed_url(&self, object: &str) -> anyhow::Result<String> {
        self.signer
            .signed_url(&self.bucket, object, SIGNED_URL_EXPIRY_SECS)
            .await
    }
}

pub struct AppState<O, S> {
    pub store: Arc<O>,
    pub signer: Option<Arc<S>>,
    pub templates: Arc<Handlebars<'static>>,
}

impl<O, S> Clone for AppState<O, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            signer: self.signer.clone(),
            templates: self.templates.clone(),
        }
    }
}

impl<O: ObjectStore, S: LinkSigner> AppState<O, S> {
    pub fn new(store: O, signer: Option<S>) -> Self {
        Self {
            store: Arc::new(store),
            signer: signer.map(Arc::new),
            templates: Arc::new(templates()),
        }
    }
}

fn templates() -> Handlebars<'static> {
    let mut tt = Handlebars::new();
    tt.register_template_string(INDEX_TEMPLATE, include_str!("template/index.hbs"))
        .unwrap();

    tt
}
