const CHECKLIST_HEADING: &str = "Technical Checklist for Improvement:";
const CHECKLIST_MARKERS: &[&str] = &["Checklist", "Recomendaciones:"];

/// Words the assistant uses once it has gathered enough to build the CV.
const COMPLETION_MARKERS: &[&str] = &["suficiente", "completa", "generar"];

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedReply {
    pub text: String,
    pub is_checklist: bool,
}

/// Normalizes list markers in an assistant reply so every item reads `• item`,
/// and sets the improvement-checklist heading apart from the text around it.
pub fn format_assistant_reply(raw: &str) -> FormattedReply {
    let mut lines = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let trimmed = line.trim_start();
        if let Some(item) = trimmed.strip_prefix('•') {
            lines.push(format!("• {}", item.trim_start()));
        } else if i > 0 && trimmed.starts_with('-') {
            lines.push(format!("•{}", &trimmed[1..]));
        } else {
            lines.push(line.to_string());
        }
    }
    let mut text = lines.join("\n");

    if text.contains(CHECKLIST_HEADING) {
        text = text.replace(CHECKLIST_HEADING, &format!("\n\n{CHECKLIST_HEADING}\n"));
    }

    FormattedReply {
        text,
        is_checklist: CHECKLIST_MARKERS.iter().any(|m| raw.contains(m)),
    }
}

pub fn signals_completion(assistant_text: &str) -> bool {
    COMPLETION_MARKERS
        .iter()
        .any(|m| assistant_text.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        let reply = format_assistant_reply("¿Cuál es tu nombre completo?");
        assert_eq!(reply.text, "¿Cuál es tu nombre completo?");
        assert!(!reply.is_checklist);
    }

    #[test]
    fn test_bullets_normalized() {
        let reply = format_assistant_reply("Datos:\n•   nombre\n  - email\n-teléfono");
        assert_eq!(reply.text, "Datos:\n• nombre\n• email\n•teléfono");
    }

    #[test]
    fn test_leading_dash_on_first_line_kept() {
        let reply = format_assistant_reply("-5 años de experiencia");
        assert_eq!(reply.text, "-5 años de experiencia");
    }

    #[test]
    fn test_checklist_heading_isolated() {
        let reply = format_assistant_reply("Listo. Technical Checklist for Improvement: - tests");
        assert_eq!(
            reply.text,
            "Listo. \n\nTechnical Checklist for Improvement:\n - tests"
        );
        assert!(reply.is_checklist);
    }

    #[test]
    fn test_recommendations_flagged_as_checklist() {
        assert!(format_assistant_reply("Recomendaciones:\n- agrega métricas").is_checklist);
    }

    #[test]
    fn test_completion_markers() {
        assert!(signals_completion("Ya tengo información suficiente"));
        assert!(signals_completion("Tu CV está completa"));
        assert!(signals_completion("Puedes generar el PDF"));
        assert!(!signals_completion("¿Dónde estudiaste?"));
    }
}
