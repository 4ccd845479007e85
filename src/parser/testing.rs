use std::collections::HashSet;
use std::sync::Mutex;

use crate::verify::LinkVerifier;

/// Answers from a fixed set of live URLs and records every probe.
pub struct StubVerifier {
    live: Option<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl StubVerifier {
    pub fn live(urls: &[&str]) -> Self {
        Self {
            live: Some(urls.iter().map(|u| u.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn all_live() -> Self {
        Self {
            live: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl LinkVerifier for StubVerifier {
    async fn verify(&self, url: &str) -> bool {
        self.calls.lock().unwrap().push(url.to_string());
        match &self.live {
            Some(live) => live.contains(url),
            None => true,
        }
    }
}
