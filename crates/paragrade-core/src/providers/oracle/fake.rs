use super::Oracle;
use async_trait::async_trait;
use std::sync::Mutex;

/// Test oracle: either a fixed response for every call, or a queue consumed
/// one response per call. Exhausting the queue is an error, which doubles as
/// a call-count assertion in tests.
pub struct FakeOracle {
    fixed: Option<String>,
    queue: Mutex<Vec<String>>,
}

impl FakeOracle {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            fixed: Some(response.into()),
            queue: Mutex::new(Vec::new()),
        }
    }

    pub fn with_queue(responses: Vec<String>) -> Self {
        Self {
            fixed: None,
            queue: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl Oracle for FakeOracle {
    async fn generate(
        &self,
        _prompt: &str,
        _temperature: f32,
        _max_output_tokens: u32,
    ) -> anyhow::Result<String> {
        if let Some(fixed) = &self.fixed {
            return Ok(fixed.clone());
        }
        let mut queue = self.queue.lock().unwrap();
        if queue.is_empty() {
            anyhow::bail!("fake oracle has no more queued responses");
        }
        Ok(queue.remove(0))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
