use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use brief_store::ObjectStore;

#[derive(Clone, Default)]
pub struct MockObjectStore {
    pub objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    /// (object name, content type) per upload, in call order.
    pub uploads: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockObjectStore {
    pub fn with_object(self, name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert(name.to_string(), bytes.into());
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }

    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(name).cloned()
    }
}

impl ObjectStore for MockObjectStore {
    async fn download(&self, name: &str) -> anyhow::Result<Option<Vec<u8>>> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.object(name))
    }

    async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((name.to_string(), content_type.to_string()));
        self.objects.lock().unwrap().insert(name.to_string(), bytes);
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.objects.lock().unwrap().keys().cloned().collect())
    }

    fn public_url(&self, name: &str) -> String {
        format!("https://storage.googleapis.com/mock-bucket/{name}")
    }
}
