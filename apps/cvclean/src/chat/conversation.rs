//! One chat session as seen from the client: the transcript plus the
//! session id issued by the service. Service failures never escape as
//! errors here; they become assistant notices, the way the chat page
//! shows them.

use bytes::Bytes;
use tracing::{info, warn};

use crate::chat::client::ChatClient;
use crate::chat::models::ChatReply;
use crate::chat::transcript::{ChatMessage, Transcript};

const GREETING_FALLBACK: &str = "¡Hola! Soy tu asistente para crear CV's. Vamos a comenzar.";
const INCOMPLETE_NOTICE: &str =
    "Por favor completa toda la información solicitada antes de generar el PDF.";

pub struct Conversation {
    client: ChatClient,
    session_id: Option<String>,
    transcript: Transcript,
    last_reply: Option<ChatReply>,
}

impl Conversation {
    /// Starts a session. If the service is unreachable the conversation
    /// still opens with a local greeting, but nothing can be sent.
    pub async fn start(client: ChatClient) -> Self {
        let mut transcript = Transcript::new();
        let session_id = match client.start_session().await {
            Ok(start) => {
                transcript.push_assistant(&start.message);
                Some(start.session_id)
            }
            Err(e) => {
                warn!("Could not start chat session: {e}");
                transcript.push_notice(GREETING_FALLBACK);
                None
            }
        };
        Self {
            client,
            session_id,
            transcript,
            last_reply: None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Progress reported by the last reply, as a 0..=1 fraction.
    pub fn progress(&self) -> Option<f64> {
        self.last_reply.as_ref().and_then(|r| r.progress_fraction())
    }

    /// Whether enough has been gathered to ask for the PDF: the service said
    /// so, or the assistant announced it in the conversation.
    pub fn ready_for_pdf(&self) -> bool {
        self.last_reply.as_ref().is_some_and(|r| r.is_complete())
            || self.transcript.has_completion_signal()
    }

    /// Sends one user message. Returns the message appended in response
    /// (reply or notice), or `None` if the input was blank.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = self.transcript.push_user(text)?;

        let Some(session_id) = self.session_id.as_deref() else {
            return Some(self.transcript.push_notice(
                "No hay una sesión activa. Por favor reinicia el chat.",
            ));
        };

        match self.client.send_message(session_id, &text).await {
            Ok(reply) => {
                let message = reply.message.clone();
                self.last_reply = Some(reply);
                Some(self.transcript.push_assistant(&message))
            }
            Err(e) => {
                warn!("Message delivery failed: {e}");
                Some(self.transcript.push_notice(e.user_message()))
            }
        }
    }

    /// Downloads the PDF when the conversation is complete. Otherwise, or on
    /// failure, appends an explanatory notice and returns `None`.
    pub async fn request_pdf(&mut self) -> Option<Bytes> {
        let Some(session_id) = self.session_id.clone() else {
            self.transcript
                .push_notice("No hay una sesión activa. Por favor reinicia el chat.");
            return None;
        };
        if !self.ready_for_pdf() {
            self.transcript.push_notice(INCOMPLETE_NOTICE);
            return None;
        }

        match self.client.download_pdf(&session_id).await {
            Ok(pdf) => {
                info!("PDF ready for session {session_id}");
                Some(pdf)
            }
            Err(e) => {
                warn!("PDF download failed: {e}");
                self.transcript.push_notice(e.pdf_user_message());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(server: &mockito::ServerGuard) -> ChatClient {
        ChatClient::new(server.url(), Duration::from_secs(5))
            .unwrap()
            .with_retry_delay(Duration::ZERO)
    }

    async fn started(server: &mut mockito::ServerGuard) -> Conversation {
        server
            .mock("POST", "/start/")
            .with_status(200)
            .with_body(r#"{"sessionId": "s-1", "message": "¡Hola! ¿Cómo te llamas?"}"#)
            .create_async()
            .await;
        Conversation::start(client(server)).await
    }

    #[tokio::test]
    async fn test_start_records_greeting() {
        let mut server = mockito::Server::new_async().await;
        let conversation = started(&mut server).await;
        assert_eq!(conversation.session_id(), Some("s-1"));
        assert_eq!(
            conversation.transcript().last().unwrap().content,
            "¡Hola! ¿Cómo te llamas?"
        );
    }

    #[tokio::test]
    async fn test_start_failure_uses_fallback_greeting() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/start/")
            .with_status(500)
            .create_async()
            .await;

        let mut conversation = Conversation::start(client(&server)).await;
        assert!(conversation.session_id().is_none());
        assert_eq!(
            conversation.transcript().last().unwrap().content,
            GREETING_FALLBACK
        );

        let notice = conversation.send("Ana").await.unwrap();
        assert!(notice.content.contains("No hay una sesión activa"));
    }

    #[tokio::test]
    async fn test_blank_message_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let mut conversation = started(&mut server).await;
        let unused = server
            .mock("POST", "/chat/s-1/")
            .expect(0)
            .create_async()
            .await;

        assert!(conversation.send("   ").await.is_none());
        assert_eq!(conversation.transcript().messages().len(), 1);
        unused.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_appends_reply_and_tracks_progress() {
        let mut server = mockito::Server::new_async().await;
        let mut conversation = started(&mut server).await;
        server
            .mock("POST", "/chat/s-1/")
            .with_status(200)
            .with_body(r#"{"message": "Gracias, Ana. ¿Dónde trabajas?", "progress": 25}"#)
            .create_async()
            .await;

        let reply = conversation.send("Ana").await.unwrap();
        assert_eq!(reply.content, "Gracias, Ana. ¿Dónde trabajas?");
        assert_eq!(conversation.progress(), Some(0.25));
        assert_eq!(conversation.transcript().messages().len(), 3);
        assert!(!conversation.ready_for_pdf());
    }

    #[tokio::test]
    async fn test_send_failure_becomes_notice() {
        let mut server = mockito::Server::new_async().await;
        let mut conversation = started(&mut server).await;
        server
            .mock("POST", "/chat/s-1/")
            .with_status(429)
            .create_async()
            .await;

        let notice = conversation.send("Ana").await.unwrap();
        assert_eq!(
            notice.content,
            "Estoy recibiendo muchas solicitudes. Por favor espera un minuto."
        );
    }

    #[tokio::test]
    async fn test_pdf_gated_until_complete() {
        let mut server = mockito::Server::new_async().await;
        let mut conversation = started(&mut server).await;
        let download = server
            .mock("GET", "/download/s-1/")
            .with_status(200)
            .with_body("%PDF-1.4")
            .expect(1)
            .create_async()
            .await;

        assert!(conversation.request_pdf().await.is_none());
        assert_eq!(
            conversation.transcript().last().unwrap().content,
            INCOMPLETE_NOTICE
        );

        server
            .mock("POST", "/chat/s-1/")
            .with_status(200)
            .with_body(r#"{"message": "Listo, tu CV está terminado.", "status": "completed"}"#)
            .create_async()
            .await;
        conversation.send("Eso es todo").await;
        assert!(conversation.ready_for_pdf());

        let pdf = conversation.request_pdf().await.unwrap();
        assert_eq!(&pdf[..], b"%PDF-1.4");
        download.assert_async().await;
    }

    #[tokio::test]
    async fn test_refusal_notice_does_not_unlock_pdf() {
        let mut server = mockito::Server::new_async().await;
        let mut conversation = started(&mut server).await;
        let download = server
            .mock("GET", "/download/s-1/")
            .with_status(200)
            .with_body("%PDF-1.4")
            .expect(0)
            .create_async()
            .await;

        assert!(conversation.request_pdf().await.is_none());
        assert!(!conversation.ready_for_pdf());
        assert!(conversation.request_pdf().await.is_none());
        assert_eq!(
            conversation.transcript().last().unwrap().content,
            INCOMPLETE_NOTICE
        );
        download.assert_async().await;
    }
}
