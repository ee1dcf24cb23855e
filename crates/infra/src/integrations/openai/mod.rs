/// OpenAI completion backend
///
/// `OpenAIClient` implements [`minutesync_core::CompletionBackend`] on top of
/// the Chat Completions API, asking for a JSON object reply.
///
/// # Usage
///
/// ```no_run
/// use minutesync_core::CompletionBackend;
/// use minutesync_infra::http::HttpClient;
/// use minutesync_infra::integrations::openai::OpenAIClient;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http_client = HttpClient::builder().build()?;
/// let client = OpenAIClient::new(std::env::var("OPENAI_API_KEY")?, http_client);
/// let reply = client.complete("Reply with {}").await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// - 401/403 become `CompletionError::Authentication`
/// - 429 becomes `CompletionError::RateLimited`; retrying is the caller's job
/// - other statuses become `CompletionError::Api` with the response body
pub mod client;
pub(crate) mod types;

pub use client::OpenAIClient;
