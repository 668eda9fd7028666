use async_trait::async_trait;

pub mod fake;
pub mod ollama;

pub use fake::FakeOracle;
pub use ollama::OllamaClient;

/// A text-generation oracle. One call, one fully assembled response; call
/// parameters are passed explicitly so strategies can be exercised with a
/// substitute oracle. There is no timeout or cancellation contract; callers
/// inherit whatever blocking behavior the transport provides.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> anyhow::Result<String>;

    fn name(&self) -> &'static str;
}
