use async_trait::async_trait;
use chatkeep::error::ChatkeepError;
use chatkeep::providers::CompletionClient;
use chatkeep::store::TranscriptStore;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn create_temp_store() -> (TranscriptStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = TranscriptStore::open(tmp.path().join("chat_histories"))
        .expect("failed to open transcript store");
    (store, tmp)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn write_raw_transcript(store: &TranscriptStore, name: &str, contents: &str) {
    fs::write(store.dir().join(name), contents).expect("failed to write transcript file");
}

/// Completion client replying with a canned answer, or failing
#[allow(dead_code)]
pub struct CannedClient {
    reply: Result<String, String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl CannedClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl CompletionClient for CannedClient {
    fn name(&self) -> &str {
        "canned"
    }

    fn model(&self) -> String {
        "canned-1".to_string()
    }

    async fn generate(&self, context: &str) -> Result<String, ChatkeepError> {
        self.prompts.lock().unwrap().push(context.to_string());
        self.reply.clone().map_err(ChatkeepError::Completion)
    }
}
