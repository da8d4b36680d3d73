use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one experience or study entry inside a document.
/// Random v4 UUIDs: unique for the lifetime of the process, never assumed
/// unique across processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    #[serde(default)]
    pub periodo: String,
    #[serde(default)]
    pub puesto: String,
    #[serde(default)]
    pub descripcion: Vec<String>,
}

impl ExperienceEntry {
    pub fn empty() -> Self {
        Self {
            id: EntryId::generate(),
            periodo: String::new(),
            puesto: String::new(),
            descripcion: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyEntry {
    pub id: EntryId,
    #[serde(default)]
    pub periodo: String,
    #[serde(default)]
    pub institucion: String,
    #[serde(default)]
    pub titulo: String,
}

impl StudyEntry {
    pub fn empty() -> Self {
        Self {
            id: EntryId::generate(),
            periodo: String::new(),
            institucion: String::new(),
            titulo: String::new(),
        }
    }
}

/// The in-memory CV draft. Every field defaults to empty and none is
/// required; validation only happens downstream, at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDocument {
    pub nombre: String,
    pub apellido: String,
    pub idioma: String,
    pub direccion: String,
    pub telefono: String,
    pub email: String,
    pub fecha_nacimiento: String,
    pub nacionalidad: String,
    pub estado_civil: String,
    pub enlaces: String,
    /// Photo as a `data:image/...;base64,` URI.
    pub foto: Option<String>,
    pub perfil: String,
    pub experiencias: Vec<ExperienceEntry>,
    pub estudios: Vec<StudyEntry>,
}

impl CvDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one scalar field. The photo reads as an empty string when unset.
    pub fn field(&self, field: CvField) -> &str {
        match field {
            CvField::Nombre => &self.nombre,
            CvField::Apellido => &self.apellido,
            CvField::Idioma => &self.idioma,
            CvField::Direccion => &self.direccion,
            CvField::Telefono => &self.telefono,
            CvField::Email => &self.email,
            CvField::FechaNacimiento => &self.fecha_nacimiento,
            CvField::Nacionalidad => &self.nacionalidad,
            CvField::EstadoCivil => &self.estado_civil,
            CvField::Enlaces => &self.enlaces,
            CvField::Foto => self.foto.as_deref().unwrap_or(""),
            CvField::Perfil => &self.perfil,
        }
    }

    pub(crate) fn text_field_mut(&mut self, field: CvField) -> Option<&mut String> {
        match field {
            CvField::Nombre => Some(&mut self.nombre),
            CvField::Apellido => Some(&mut self.apellido),
            CvField::Idioma => Some(&mut self.idioma),
            CvField::Direccion => Some(&mut self.direccion),
            CvField::Telefono => Some(&mut self.telefono),
            CvField::Email => Some(&mut self.email),
            CvField::FechaNacimiento => Some(&mut self.fecha_nacimiento),
            CvField::Nacionalidad => Some(&mut self.nacionalidad),
            CvField::EstadoCivil => Some(&mut self.estado_civil),
            CvField::Enlaces => Some(&mut self.enlaces),
            CvField::Perfil => Some(&mut self.perfil),
            CvField::Foto => None,
        }
    }

    pub fn experience(&self, id: EntryId) -> Option<&ExperienceEntry> {
        self.experiencias.iter().find(|e| e.id == id)
    }

    pub fn study(&self, id: EntryId) -> Option<&StudyEntry> {
        self.estudios.iter().find(|e| e.id == id)
    }

    pub(crate) fn experience_mut(&mut self, id: EntryId) -> Option<&mut ExperienceEntry> {
        self.experiencias.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn study_mut(&mut self, id: EntryId) -> Option<&mut StudyEntry> {
        self.estudios.iter_mut().find(|e| e.id == id)
    }

    /// First id that appears twice within the same section, if any.
    /// Entries are addressed by id, so a draft with one cannot be edited.
    pub fn duplicate_entry_id(&self) -> Option<EntryId> {
        first_repeat(self.experiencias.iter().map(|e| e.id))
            .or_else(|| first_repeat(self.estudios.iter().map(|e| e.id)))
    }
}

fn first_repeat(mut ids: impl Iterator<Item = EntryId>) -> Option<EntryId> {
    let mut seen = HashSet::new();
    ids.find(|id| !seen.insert(*id))
}

/// Scalar attributes of a [`CvDocument`] that can be set by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CvField {
    Nombre,
    Apellido,
    Idioma,
    Direccion,
    Telefono,
    Email,
    FechaNacimiento,
    Nacionalidad,
    EstadoCivil,
    Enlaces,
    Foto,
    Perfil,
}

impl CvField {
    pub const ALL: [CvField; 12] = [
        CvField::Nombre,
        CvField::Apellido,
        CvField::Idioma,
        CvField::Direccion,
        CvField::Telefono,
        CvField::Email,
        CvField::FechaNacimiento,
        CvField::Nacionalidad,
        CvField::EstadoCivil,
        CvField::Enlaces,
        CvField::Foto,
        CvField::Perfil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CvField::Nombre => "nombre",
            CvField::Apellido => "apellido",
            CvField::Idioma => "idioma",
            CvField::Direccion => "direccion",
            CvField::Telefono => "telefono",
            CvField::Email => "email",
            CvField::FechaNacimiento => "fechaNacimiento",
            CvField::Nacionalidad => "nacionalidad",
            CvField::EstadoCivil => "estadoCivil",
            CvField::Enlaces => "enlaces",
            CvField::Foto => "foto",
            CvField::Perfil => "perfil",
        }
    }
}

impl fmt::Display for CvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CvField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CvField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Periodo,
    Puesto,
}

impl FromStr for ExperienceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "periodo" => Ok(ExperienceField::Periodo),
            "puesto" => Ok(ExperienceField::Puesto),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyField {
    Periodo,
    Institucion,
    Titulo,
}

impl FromStr for StudyField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "periodo" => Ok(StudyField::Periodo),
            "institucion" => Ok(StudyField::Institucion),
            "titulo" => Ok(StudyField::Titulo),
            other => Err(other.to_string()),
        }
    }
}
