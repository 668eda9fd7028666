use super::Oracle;
use crate::config::OracleConfig;
use async_trait::async_trait;
use serde_json::json;

pub struct OllamaClient {
    pub endpoint: String,
    pub model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Oracle for OllamaClient {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "options": {
                "temperature": temperature,
                "num_predict": max_output_tokens
            },
            "stream": true
        });

        let mut resp = self
            .client
            .post(self.generate_url())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!("ollama generate error (status {}): {}", status, error_text);
        }

        let mut acc = FragmentAccumulator::new();
        while let Some(chunk) = resp.chunk().await? {
            acc.push_chunk(&chunk)?;
            if acc.is_done() {
                break;
            }
        }
        acc.finish()
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

/// Consumes a newline-delimited JSON response body incrementally:
/// `response` fragments are concatenated in arrival order, and reading stops
/// at the first object carrying `done: true`.
pub(crate) struct FragmentAccumulator {
    pending: Vec<u8>,
    text: String,
    done: bool,
}

impl FragmentAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            pending: Vec::new(),
            text: String::new(),
            done: false,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    /// Buffer a body chunk and drain every complete line it closes. Chunks
    /// may split lines (and UTF-8 sequences) at arbitrary byte offsets.
    pub(crate) fn push_chunk(&mut self, chunk: &[u8]) -> anyhow::Result<()> {
        self.pending.extend_from_slice(chunk);
        while !self.done {
            let Some(pos) = self.pending.iter().position(|&b| b == b'\n') else {
                break;
            };
            let line_bytes: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = std::str::from_utf8(&line_bytes[..line_bytes.len() - 1])?;
            self.feed_line(line.trim_end_matches('\r'))?;
        }
        Ok(())
    }

    fn feed_line(&mut self, line: &str) -> anyhow::Result<()> {
        if self.done || line.trim().is_empty() {
            return Ok(());
        }
        let value: serde_json::Value = serde_json::from_str(line).map_err(|e| {
            anyhow::anyhow!(
                "invalid stream fragment, expected one JSON object per line.\n  Error: {}\n  Content: {}",
                e,
                line.chars().take(50).collect::<String>()
            )
        })?;
        if let Some(fragment) = value.get("response").and_then(|v| v.as_str()) {
            self.text.push_str(fragment);
        }
        if value.get("done").and_then(|v| v.as_bool()).unwrap_or(false) {
            self.done = true;
        }
        Ok(())
    }

    /// Flush any unterminated trailing line and return the trimmed
    /// concatenation.
    pub(crate) fn finish(mut self) -> anyhow::Result<String> {
        if !self.done && !self.pending.is_empty() {
            let rest = String::from_utf8(std::mem::take(&mut self.pending))?;
            let rest = rest.trim();
            if !rest.is_empty() {
                self.feed_line(rest)?;
            }
        }
        Ok(self.text.trim().to_string())
    }
}
