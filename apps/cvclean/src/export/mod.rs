//! Export hand-off — packages a draft for the external PDF renderer.
//!
//! Rendering itself happens elsewhere. `PdfRenderer` is the seam; the CLI
//! wires `HttpPdfRenderer` at startup.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::cv::CvDocument;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Renderer error (status {status}): {message}")]
    Renderer { status: u16, message: String },

    #[error("Renderer returned a body that is not a PDF")]
    NotPdf,

    #[error("Unknown template: {0}")]
    UnknownTemplate(u32),

    #[error("Could not write PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// A by-value copy of a draft plus the chosen template, as handed to the
/// renderer. Edits made after the request was built do not reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub template_id: u32,
    pub document: CvDocument,
    pub requested_at: DateTime<Utc>,
}

impl ExportRequest {
    pub fn new(template_id: u32, document: CvDocument) -> Self {
        Self {
            template_id,
            document,
            requested_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, request: &ExportRequest) -> Result<Bytes, ExportError>;
}

/// Posts the export request as JSON and expects `application/pdf` bytes back.
#[derive(Clone)]
pub struct HttpPdfRenderer {
    client: Client,
    endpoint: String,
}

impl HttpPdfRenderer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ExportError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, request: &ExportRequest) -> Result<Bytes, ExportError> {
        info!(
            "Requesting PDF for template {} from {}",
            request.template_id, self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("accept", "application/pdf")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExportError::Renderer {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        ensure_pdf(&body)?;
        debug!("Renderer returned {} bytes", body.len());
        Ok(body)
    }
}

pub(crate) fn ensure_pdf(body: &[u8]) -> Result<(), ExportError> {
    if body.starts_with(PDF_MAGIC) {
        Ok(())
    } else {
        Err(ExportError::NotPdf)
    }
}

/// Writes the rendered PDF, creating parent directories as needed.
pub async fn write_pdf(path: &Path, pdf: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, pdf).await?;
    info!("Saved PDF to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ExportRequest {
        let mut doc = CvDocument::new();
        doc.nombre = "Ana".to_string();
        ExportRequest::new(2, doc)
    }

    fn renderer(server: &mockito::ServerGuard) -> HttpPdfRenderer {
        HttpPdfRenderer::new(format!("{}/render/", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["templateId"], 2);
        assert_eq!(json["document"]["nombre"], "Ana");
        assert!(json["requestedAt"].is_string());
    }

    #[tokio::test]
    async fn test_render_returns_pdf_bytes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/render/")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"templateId": 2, "document": {"nombre": "Ana"}}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body("%PDF-1.7 fake")
            .create_async()
            .await;

        let pdf = renderer(&server).render(&request()).await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_render_maps_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/render/")
            .with_status(400)
            .with_body("Faltan datos requeridos")
            .create_async()
            .await;

        let err = renderer(&server).render(&request()).await.unwrap_err();
        match err {
            ExportError::Renderer { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Faltan datos requeridos");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_render_rejects_non_pdf_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/render/")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = renderer(&server).render(&request()).await.unwrap_err();
        assert!(matches!(err, ExportError::NotPdf));
    }

    #[tokio::test]
    async fn test_write_pdf_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("cv.pdf");
        write_pdf(&path, b"%PDF-1.4").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }
}
