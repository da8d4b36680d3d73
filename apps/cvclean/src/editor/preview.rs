//! Live preview — a display-ready projection of the draft. Recomputed from
//! the document on every call; never stored.

use std::fmt;

use serde::Serialize;

use crate::models::cv::CvDocument;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewExperience {
    pub periodo: String,
    pub puesto: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewStudy {
    pub periodo: String,
    pub institucion: String,
    pub titulo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvPreview {
    pub full_name: String,
    pub has_photo: bool,
    pub contact: Vec<ContactLine>,
    pub perfil: Option<String>,
    pub experiencias: Vec<PreviewExperience>,
    pub estudios: Vec<PreviewStudy>,
}

impl CvPreview {
    pub fn from_document(doc: &CvDocument) -> Self {
        let full_name = [doc.nombre.trim(), doc.apellido.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let contact = [
            ("Email", &doc.email),
            ("Teléfono", &doc.telefono),
            ("Dirección", &doc.direccion),
            ("Fecha de nacimiento", &doc.fecha_nacimiento),
            ("Nacionalidad", &doc.nacionalidad),
            ("Estado civil", &doc.estado_civil),
            ("Idioma", &doc.idioma),
            ("Enlaces", &doc.enlaces),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| ContactLine {
            label,
            value: value.trim().to_string(),
        })
        .collect();

        let perfil = Some(doc.perfil.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        // Entries still being filled in appear as soon as any field has text.
        let experiencias = doc
            .experiencias
            .iter()
            .filter(|e| {
                !e.periodo.trim().is_empty()
                    || !e.puesto.trim().is_empty()
                    || !e.descripcion.is_empty()
            })
            .map(|e| PreviewExperience {
                periodo: e.periodo.trim().to_string(),
                puesto: e.puesto.trim().to_string(),
                bullets: e.descripcion.clone(),
            })
            .collect();

        let estudios = doc
            .estudios
            .iter()
            .filter(|e| {
                !e.periodo.trim().is_empty()
                    || !e.institucion.trim().is_empty()
                    || !e.titulo.trim().is_empty()
            })
            .map(|e| PreviewStudy {
                periodo: e.periodo.trim().to_string(),
                institucion: e.institucion.trim().to_string(),
                titulo: e.titulo.trim().to_string(),
            })
            .collect();

        CvPreview {
            full_name,
            has_photo: doc.foto.is_some(),
            contact,
            perfil,
            experiencias,
            estudios,
        }
    }
}

impl fmt::Display for CvPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.full_name.is_empty() {
            writeln!(f, "(sin nombre)")?;
        } else {
            writeln!(f, "{}", self.full_name)?;
        }
        if self.has_photo {
            writeln!(f, "[foto]")?;
        }
        for line in &self.contact {
            writeln!(f, "{}: {}", line.label, line.value)?;
        }
        if let Some(perfil) = &self.perfil {
            writeln!(f, "\nPerfil\n{perfil}")?;
        }
        if !self.experiencias.is_empty() {
            writeln!(f, "\nExperiencia")?;
            for exp in &self.experiencias {
                writeln!(f, "{} | {}", exp.periodo, exp.puesto)?;
                for bullet in &exp.bullets {
                    writeln!(f, "  • {bullet}")?;
                }
            }
        }
        if !self.estudios.is_empty() {
            writeln!(f, "\nEstudios")?;
            for study in &self.estudios {
                writeln!(f, "{} | {} | {}", study.periodo, study.institucion, study.titulo)?;
            }
        }
        Ok(())
    }
}
