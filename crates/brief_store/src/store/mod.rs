use std::future::Future;

pub mod gcs;

/// Flat-namespace object storage as the pipeline and the listing service
/// consume it. One bucket per store instance.
pub trait ObjectStore {
    /// Downloads an object in full. `Ok(None)` when the object does not
    /// exist; any other failure is an error.
    fn download(&self, name: &str) -> impl Future<Output = anyhow::Result<Option<Vec<u8>>>> + Send;

    /// Uploads an object, replacing any existing object of the same name.
    fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Lists the names of every object in the bucket.
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<String>>> + Send;

    /// The object's static, unauthenticated URL.
    fn public_url(&self, name: &str) -> String;
}

impl<T: ObjectStore + Send + Sync> ObjectStore for &T {
    async fn download(&self, name: &str) -> anyhow::Result<Option<Vec<u8>>> {
        (**self).download(name).await
    }

    async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> anyhow::Result<()> {
        (**self).upload(name, bytes, content_type).await
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        (**self).list().await
    }

    fn public_url(&self, name: &str) -> String {
        (**self).public_url(name)
    }
}
