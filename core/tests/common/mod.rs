//! Common test utilities for integration tests
//!
//! This module provides a wired store setup over in-memory storage and a
//! scripted completion client, so tests run without a network or a disk.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use wellness_companion_core::ai::{ChatMessage, CompletionClient};
use wellness_companion_core::error::{CompletionError, StorageError, StorageResult};
use wellness_companion_core::storage::{KeyValueStore, MemoryStore};
use wellness_companion_core::stores::{AuthStore, MockGoogleAuth, WellnessStore};

/// Reply returned when the script queue is empty
pub const DEFAULT_REPLY: &str = "You are doing great. Keep it up!";

/// Test application wrapper
///
/// Stores share one in-memory storage, so persisted blobs can be
/// asserted on directly. The watch pairing and sign-in delays are zeroed.
pub struct TestApp {
    pub storage: Arc<MemoryStore>,
    pub ai: Arc<ScriptedCompletions>,
    pub auth: AuthStore,
    pub wellness: WellnessStore,
}

impl TestApp {
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStore::new());
        let ai = Arc::new(ScriptedCompletions::new());

        let kv: Arc<dyn KeyValueStore> = storage.clone();
        let client: Arc<dyn CompletionClient> = ai.clone();

        let auth = AuthStore::new(kv.clone(), Arc::new(MockGoogleAuth::new(Duration::ZERO)));
        let wellness = WellnessStore::new(kv, client).with_watch_delay(Duration::ZERO);

        Self {
            storage,
            ai,
            auth,
            wellness,
        }
    }

    /// Read a persisted blob and parse it
    pub async fn stored_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.storage
            .get(key)
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    /// Seed a blob into storage before loading
    pub async fn seed_json<T: Serialize>(&self, key: &str, value: &T) {
        let json = serde_json::to_string(value).unwrap();
        self.storage.set(key, &json).await.unwrap();
    }
}

// ============================================================================
// Scripted Completion Client
// ============================================================================

/// [`CompletionClient`] double that replays a scripted queue
///
/// Records every request for assertions. An empty queue yields
/// [`DEFAULT_REPLY`] so tests that do not care about the text still work.
pub struct ScriptedCompletions {
    script: Mutex<VecDeque<Result<String, ()>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedCompletions {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, text: &str) {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_failure(&self) {
        self.script.lock().unwrap().push_back(Err(()));
    }

    /// All conversations sent so far
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletions {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(())) => Err(CompletionError::Status {
                status: 500,
                body: "scripted failure".to_string(),
            }),
            None => Ok(DEFAULT_REPLY.to_string()),
        }
    }
}

// ============================================================================
// Failing Storage
// ============================================================================

/// [`KeyValueStore`] wrapper that fails writes to chosen keys
///
/// Reads and other writes pass through to an in-memory store, which is
/// enough to exercise partial-write behavior in multi-key mutations.
pub struct FailingStore {
    inner: MemoryStore,
    fail_set_for: Mutex<Option<String>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_set_for: Mutex::new(None),
        }
    }

    /// Fail every `set` whose key starts with `prefix`
    pub fn fail_set_for(&self, prefix: &str) {
        *self.fail_set_for.lock().unwrap() = Some(prefix.to_string());
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let blocked = self
            .fail_set_for
            .lock()
            .unwrap()
            .as_deref()
            .is_some_and(|prefix| key.starts_with(prefix));
        if blocked {
            return Err(StorageError::Unavailable(format!(
                "write to '{key}' refused by test"
            )));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key).await
    }
}
