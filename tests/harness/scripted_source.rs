use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use freegames::domain::{Deal, Storefront};
use freegames::error::{Error, Result};
use freegames::port::DealSource;

/// Deal source that replays a script of responses, one per fetch.
///
/// Once the script runs out the last response is repeated. Every fetch
/// records the store filter it was called with.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    script: Arc<Mutex<VecDeque<Option<Vec<Deal>>>>>,
    last: Arc<Mutex<Option<Vec<Deal>>>>,
    calls: Arc<Mutex<Vec<Vec<Storefront>>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push_deals(&self, deals: Vec<Deal>) -> &Self {
        self.script.lock().expect("lock script").push_back(Some(deals));
        self
    }

    /// Queue an upstream failure.
    pub fn push_failure(&self) -> &Self {
        self.script.lock().expect("lock script").push_back(None);
        self
    }

    /// Store filters of every fetch so far.
    pub fn calls(&self) -> Vec<Vec<Storefront>> {
        self.calls.lock().expect("lock calls").clone()
    }
}

#[async_trait]
impl DealSource for ScriptedSource {
    async fn free_deals(&self, stores: &[Storefront]) -> Result<Vec<Deal>> {
        self.calls.lock().expect("lock calls").push(stores.to_vec());

        let next = self.script.lock().expect("lock script").pop_front();
        let mut last = self.last.lock().expect("lock last");
        if let Some(next) = next {
            *last = next;
        }
        last.clone().ok_or(Error::UpstreamStatus { status: 503 })
    }

    fn source_name(&self) -> &'static str {
        "Scripted"
    }
}

/// A deal in the given store.
pub fn deal(id: &str, title: &str, store: Storefront) -> Deal {
    Deal::new(id, title, store.id().to_string(), format!("https://img/{id}.jpg"))
}
