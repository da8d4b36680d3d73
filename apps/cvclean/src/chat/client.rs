//! Client for the external CV chat service.
//!
//! The service owns the conversation state; this client only starts a
//! session, relays messages, and downloads the finished PDF.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info, warn};

use crate::chat::models::{ChatReply, SendMessageBody, SessionStart};
use crate::chat::ChatError;
use crate::export::ensure_pdf;

const MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: Url,
    retry_delay: Duration,
}

impl ChatClient {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ChatError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| ChatError::InvalidUrl(format!("{}: {e}", base_url.as_ref())))?;
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Base delay for the download retry backoff.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Appends `segments` to the base path, each percent-encoded, with a
    /// trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ChatError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChatError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    /// `POST {base}/start/`
    pub async fn start_session(&self) -> Result<SessionStart, ChatError> {
        let response = self
            .client
            .post(self.endpoint(&["start"])?)
            .send()
            .await?;
        let session: SessionStart = parse_json(response).await?;
        info!("Chat session {} started", session.session_id);
        Ok(session)
    }

    /// `POST {base}/chat/{session_id}/`
    pub async fn send_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<ChatReply, ChatError> {
        let response = self
            .client
            .post(self.endpoint(&["chat", session_id])?)
            .json(&SendMessageBody { message: text })
            .send()
            .await?;
        let reply: ChatReply = parse_json(response).await?;
        debug!(
            "Session {session_id}: reply received (status={:?}, progress={:?})",
            reply.status, reply.progress
        );
        Ok(reply)
    }

    /// `GET {base}/download/{session_id}/`. Retries on 429 and 5xx with
    /// exponential backoff.
    pub async fn download_pdf(&self, session_id: &str) -> Result<Bytes, ChatError> {
        let url = self.endpoint(&["download", session_id])?;
        let mut last_error: Option<ChatError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.retry_delay * (1 << (attempt - 1));
                warn!(
                    "PDF download attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(url.clone()).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ChatError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                last_error = Some(api_error(response).await);
                continue;
            }
            if !status.is_success() {
                return Err(api_error(response).await);
            }

            let pdf = response.bytes().await?;
            ensure_pdf(&pdf).map_err(|_| ChatError::NotPdf)?;
            info!("Downloaded PDF for session {session_id} ({} bytes)", pdf.len());
            return Ok(pdf);
        }

        Err(last_error.unwrap_or(ChatError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ChatError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ChatError::Parse)
}

async fn api_error(response: Response) -> ChatError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    // The service wraps errors as {"error": "..."}; fall back to the raw body.
    let message = serde_json::from_str::<ServiceError>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    warn!("Chat service returned {status}: {message}");
    ChatError::Api { status, message }
}
