use thiserror::Error;

use crate::chat::ChatError;
use crate::editor::EditorError;
use crate::export::ExportError;

/// Top-level error for the command-line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("Could not read draft: {0}")]
    Draft(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Short machine-readable code, logged alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Editor(_) => "EDITOR_ERROR",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Chat(_) => "CHAT_ERROR",
            AppError::Draft(_) => "DRAFT_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    /// Message for the person at the terminal.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Editor(e) => e.user_message(),
            AppError::Chat(e) => e.user_message(),
            AppError::Export(ExportError::UnknownTemplate(id)) => {
                format!("La plantilla {id} no existe")
            }
            AppError::Export(ExportError::Renderer { status: 400, message }) => {
                format!("Error al generar el PDF. {message}")
            }
            AppError::Export(_) => {
                "Error al generar el PDF. Por favor verifica tu conexión e intenta nuevamente."
                    .to_string()
            }
            AppError::Draft(e) => format!("El borrador no es un CV válido: {e}"),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            AppError::Validation("x".to_string()).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::from(ChatError::NotPdf).code(),
            "CHAT_ERROR"
        );
    }

    #[test]
    fn test_unknown_template_message() {
        let err = AppError::from(ExportError::UnknownTemplate(9));
        assert_eq!(err.user_message(), "La plantilla 9 no existe");
    }

    #[test]
    fn test_editor_message_passthrough() {
        let err = AppError::from(EditorError::UnknownField("sueldo".to_string()));
        assert_eq!(err.user_message(), "El campo 'sueldo' no existe");
    }
}
