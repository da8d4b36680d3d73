// Conversational CV capture. The chat service (external) drives the
// conversation; this module relays messages and renders replies.

pub mod client;
pub mod conversation;
pub mod format;
pub mod models;
pub mod transcript;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Service returned a body that is not a PDF")]
    NotPdf,

    #[error("Invalid chat service URL: {0}")]
    InvalidUrl(String),
}

impl ChatError {
    fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            ChatError::RateLimited { .. } | ChatError::Api { status: 429, .. }
        )
    }

    /// Text shown in the conversation when a message could not be delivered.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Api { message, .. } if message.contains("espera") => message.clone(),
            e if e.is_rate_limited() => {
                "Estoy recibiendo muchas solicitudes. Por favor espera un minuto.".to_string()
            }
            _ => "Parece que hubo un problema. ¿Podrías reformular tu pregunta?".to_string(),
        }
    }

    /// Text shown in the conversation when the PDF could not be produced.
    pub fn pdf_user_message(&self) -> String {
        let detail = match self {
            ChatError::Api { status: 400, message } if !message.trim().is_empty() => {
                message.clone()
            }
            ChatError::Api { status: 400, .. } => "Faltan datos requeridos.".to_string(),
            ChatError::Api { status, .. } if *status >= 500 => {
                "Error en el servidor. Intenta nuevamente.".to_string()
            }
            _ => "Por favor verifica tu conexión e intenta nuevamente.".to_string(),
        };
        format!("Error al generar el PDF. {detail}")
    }
}
