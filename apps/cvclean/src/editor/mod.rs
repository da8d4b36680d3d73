//! CV Draft Editor — owns one `CvDocument` for one editing session.
//!
//! Every mutation is synchronous and infallible in the domain sense:
//! references to unknown entries and blank bullet lines are ignored.
//! The only rejected inputs are a photo that is not an accepted image and,
//! when resuming a draft, repeated entry ids.
//!
//! "Editing" is tracked as one optional focused entry per section, not as a
//! flag on each entry.

pub mod completeness;
pub mod photo;
pub mod preview;

use thiserror::Error;
use tracing::{debug, warn};

use crate::editor::completeness::{compute_completeness_report, CompletenessReport};
use crate::editor::photo::{validate_photo_data_uri, PhotoError};
use crate::editor::preview::CvPreview;
use crate::export::ExportRequest;
use crate::models::cv::{
    CvDocument, CvField, EntryId, ExperienceEntry, ExperienceField, StudyEntry, StudyField,
};

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("Unknown CV field: {0}")]
    UnknownField(String),

    #[error("Unsupported photo: {0}")]
    UnsupportedPhoto(#[from] PhotoError),

    #[error("Entry id {0} appears more than once")]
    DuplicateEntryId(EntryId),
}

impl EditorError {
    /// Message suitable for showing to the person editing the CV.
    pub fn user_message(&self) -> String {
        match self {
            EditorError::UnknownField(name) => format!("El campo '{name}' no existe"),
            EditorError::UnsupportedPhoto(e) => e.to_string(),
            EditorError::DuplicateEntryId(_) => {
                "El borrador contiene entradas repetidas".to_string()
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CvEditor {
    document: CvDocument,
    editing_experience: Option<EntryId>,
    editing_study: Option<EntryId>,
}

impl CvEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes editing an existing draft, e.g. one loaded from disk. The
    /// draft gets the same checks as live edits: an accepted photo and
    /// entry ids unique within each section.
    pub fn from_document(document: CvDocument) -> Result<Self, EditorError> {
        if let Some(photo) = &document.foto {
            validate_photo_data_uri(photo)?;
        }
        if let Some(id) = document.duplicate_entry_id() {
            return Err(EditorError::DuplicateEntryId(id));
        }
        Ok(Self {
            document,
            ..Self::default()
        })
    }

    pub fn document(&self) -> &CvDocument {
        &self.document
    }

    pub fn into_document(self) -> CvDocument {
        self.document
    }

    // ────────────────────────────────────────────────────────────────────────
    // Scalar fields
    // ────────────────────────────────────────────────────────────────────────

    pub fn set_field(
        &mut self,
        field: CvField,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        let value = value.into();
        match self.document.text_field_mut(field) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => self.set_photo(value),
        }
    }

    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        let field: CvField = name.parse().map_err(EditorError::UnknownField)?;
        self.set_field(field, value)
    }

    /// Replaces the photo. A rejected upload leaves the current photo as is.
    pub fn set_photo(&mut self, data_uri: impl Into<String>) -> Result<(), EditorError> {
        let data_uri = data_uri.into();
        if let Err(e) = validate_photo_data_uri(&data_uri) {
            warn!("Rejected photo upload: {e}");
            return Err(e.into());
        }
        self.document.foto = Some(data_uri);
        Ok(())
    }

    pub fn clear_photo(&mut self) {
        self.document.foto = None;
    }

    // ────────────────────────────────────────────────────────────────────────
    // Experience
    // ────────────────────────────────────────────────────────────────────────

    /// Appends an empty experience entry and focuses it.
    pub fn add_experience(&mut self) -> EntryId {
        let entry = ExperienceEntry::empty();
        let id = entry.id;
        self.document.experiencias.push(entry);
        self.editing_experience = Some(id);
        id
    }

    pub fn edit_experience(&mut self, id: EntryId) {
        if self.document.experience(id).is_some() {
            self.editing_experience = Some(id);
        } else {
            debug!("edit_experience: no entry {id}");
        }
    }

    pub fn save_experience(&mut self, id: EntryId) {
        if self.editing_experience == Some(id) {
            self.editing_experience = None;
        }
    }

    pub fn editing_experience(&self) -> Option<EntryId> {
        self.editing_experience
    }

    /// Returns `false` when no entry has this id.
    pub fn update_experience_field(
        &mut self,
        id: EntryId,
        field: ExperienceField,
        value: impl Into<String>,
    ) -> bool {
        let Some(entry) = self.document.experience_mut(id) else {
            debug!("update_experience_field: no entry {id}");
            return false;
        };
        match field {
            ExperienceField::Periodo => entry.periodo = value.into(),
            ExperienceField::Puesto => entry.puesto = value.into(),
        }
        true
    }

    /// Appends a trimmed bullet. Blank text is ignored.
    pub fn add_description_line(&mut self, id: EntryId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.document.experience_mut(id) {
            Some(entry) => {
                entry.descripcion.push(text.to_string());
                true
            }
            None => {
                debug!("add_description_line: no entry {id}");
                false
            }
        }
    }

    pub fn remove_description_line(&mut self, id: EntryId, index: usize) -> Option<String> {
        let entry = self.document.experience_mut(id)?;
        if index < entry.descripcion.len() {
            Some(entry.descripcion.remove(index))
        } else {
            debug!(
                "remove_description_line: index {index} out of range for entry {id} ({} lines)",
                entry.descripcion.len()
            );
            None
        }
    }

    /// Removes the entry whatever its editing state.
    pub fn delete_experience(&mut self, id: EntryId) -> bool {
        let before = self.document.experiencias.len();
        self.document.experiencias.retain(|e| e.id != id);
        if self.editing_experience == Some(id) {
            self.editing_experience = None;
        }
        self.document.experiencias.len() != before
    }

    // ────────────────────────────────────────────────────────────────────────
    // Studies
    // ────────────────────────────────────────────────────────────────────────

    pub fn add_study(&mut self) -> EntryId {
        let entry = StudyEntry::empty();
        let id = entry.id;
        self.document.estudios.push(entry);
        self.editing_study = Some(id);
        id
    }

    pub fn edit_study(&mut self, id: EntryId) {
        if self.document.study(id).is_some() {
            self.editing_study = Some(id);
        } else {
            debug!("edit_study: no entry {id}");
        }
    }

    pub fn save_study(&mut self, id: EntryId) {
        if self.editing_study == Some(id) {
            self.editing_study = None;
        }
    }

    pub fn editing_study(&self) -> Option<EntryId> {
        self.editing_study
    }

    pub fn update_study_field(
        &mut self,
        id: EntryId,
        field: StudyField,
        value: impl Into<String>,
    ) -> bool {
        let Some(entry) = self.document.study_mut(id) else {
            debug!("update_study_field: no entry {id}");
            return false;
        };
        match field {
            StudyField::Periodo => entry.periodo = value.into(),
            StudyField::Institucion => entry.institucion = value.into(),
            StudyField::Titulo => entry.titulo = value.into(),
        }
        true
    }

    pub fn delete_study(&mut self, id: EntryId) -> bool {
        let before = self.document.estudios.len();
        self.document.estudios.retain(|e| e.id != id);
        if self.editing_study == Some(id) {
            self.editing_study = None;
        }
        self.document.estudios.len() != before
    }

    // ────────────────────────────────────────────────────────────────────────
    // Derived views and hand-off
    // ────────────────────────────────────────────────────────────────────────

    pub fn preview(&self) -> CvPreview {
        CvPreview::from_document(&self.document)
    }

    pub fn completeness(&self) -> CompletenessReport {
        compute_completeness_report(&self.document)
    }

    /// Copies the current draft into an export request for the renderer.
    /// The editor keeps its own document and stays editable.
    pub fn export_requested(&self, template_id: u32) -> ExportRequest {
        ExportRequest::new(template_id, self.document.clone())
    }
}
