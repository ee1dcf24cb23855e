use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use minutesync_core::{CompletionBackend, CompletionError};
use tokio::time::Instant;

/// Completion backend that replays a fixed script of replies.
///
/// Once the script runs out the last entry repeats. Every call records the
/// prompt and the (tokio) instant it arrived.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    last: Mutex<Option<Result<String, CompletionError>>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn always_failing(err: CompletionError) -> Self {
        Self::new(vec![Err(err)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_instants(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push((prompt.to_string(), Instant::now()));
        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(step) => {
                *last = Some(step.clone());
                step
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(CompletionError::InvalidResponse("empty script".into()))),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
