use serde::{Deserialize, Serialize};

use crate::models::cv::CvDocument;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Complete,
    Partial,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHealth {
    pub section: String,
    pub score: f64,
    pub status: SectionStatus,
    pub recommendations: Vec<String>,
}

/// Advisory readiness of a draft. Never blocks export; the renderer owns
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub overall_score: f64,
    pub sections: Vec<SectionHealth>,
    pub missing_sections: Vec<String>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing_sections.is_empty()
            && self
                .sections
                .iter()
                .all(|s| s.status == SectionStatus::Complete)
    }
}

const SECTION_WEIGHTS: &[(&str, f64)] = &[
    ("datos_personales", 0.30),
    ("contacto", 0.20),
    ("perfil", 0.10),
    ("experiencia", 0.25),
    ("estudios", 0.15),
];

pub fn compute_completeness_report(doc: &CvDocument) -> CompletenessReport {
    let mut sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut weighted_score_sum = 0.0;

    for (section_key, weight) in SECTION_WEIGHTS {
        let (score, recommendations) = score_section(section_key, doc);

        let status = match score {
            s if s >= 1.0 => SectionStatus::Complete,
            s if s > 0.0 => SectionStatus::Partial,
            _ => SectionStatus::Missing,
        };
        if status == SectionStatus::Missing {
            missing_sections.push(section_key.to_string());
        }

        weighted_score_sum += score * weight;
        sections.push(SectionHealth {
            section: section_key.to_string(),
            score,
            status,
            recommendations,
        });
    }

    let total_weight: f64 = SECTION_WEIGHTS.iter().map(|(_, w)| w).sum();
    let overall_score = if total_weight > 0.0 {
        (weighted_score_sum / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    CompletenessReport {
        overall_score,
        sections,
        missing_sections,
    }
}

fn score_section(section: &str, doc: &CvDocument) -> (f64, Vec<String>) {
    match section {
        "datos_personales" => filled_ratio(&[
            ("nombre", &doc.nombre),
            ("apellido", &doc.apellido),
            ("fecha de nacimiento", &doc.fecha_nacimiento),
            ("nacionalidad", &doc.nacionalidad),
        ]),
        "contacto" => filled_ratio(&[
            ("email", &doc.email),
            ("teléfono", &doc.telefono),
            ("dirección", &doc.direccion),
        ]),
        "perfil" => filled_ratio(&[("perfil profesional", &doc.perfil)]),
        "experiencia" => {
            if doc.experiencias.is_empty() {
                return (
                    0.0,
                    vec!["Agrega al menos una experiencia laboral".to_string()],
                );
            }
            let without_role = doc
                .experiencias
                .iter()
                .filter(|e| e.puesto.trim().is_empty())
                .count();
            let without_bullets = doc
                .experiencias
                .iter()
                .filter(|e| e.descripcion.is_empty())
                .count();

            let mut recommendations = Vec::new();
            if without_role > 0 {
                recommendations.push(format!("{without_role} experiencias no tienen puesto"));
            }
            if without_bullets > 0 {
                recommendations.push(format!(
                    "{without_bullets} experiencias no tienen descripción de logros"
                ));
            }
            let total = doc.experiencias.len() as f64 * 2.0;
            let gaps = (without_role + without_bullets) as f64;
            ((total - gaps) / total, recommendations)
        }
        "estudios" => {
            if doc.estudios.is_empty() {
                return (0.0, vec!["Agrega al menos un estudio".to_string()]);
            }
            let incomplete = doc
                .estudios
                .iter()
                .filter(|e| e.institucion.trim().is_empty() || e.titulo.trim().is_empty())
                .count();
            let mut recommendations = Vec::new();
            if incomplete > 0 {
                recommendations.push(format!(
                    "{incomplete} estudios no tienen institución o título"
                ));
            }
            let total = doc.estudios.len() as f64;
            ((total - incomplete as f64) / total, recommendations)
        }
        _ => (0.0, Vec::new()),
    }
}

fn filled_ratio(fields: &[(&str, &String)]) -> (f64, Vec<String>) {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();
    let score = (fields.len() - missing.len()) as f64 / fields.len() as f64;
    let recommendations = missing
        .into_iter()
        .map(|label| format!("Completa el campo {label}"))
        .collect();
    (score, recommendations)
}
