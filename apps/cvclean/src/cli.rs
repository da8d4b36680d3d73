use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use cvclean::catalog::{self, FilterState};
use cvclean::chat::client::ChatClient;
use cvclean::chat::conversation::Conversation;
use cvclean::config::Config;
use cvclean::editor::CvEditor;
use cvclean::errors::AppError;
use cvclean::export::{write_pdf, ExportError, HttpPdfRenderer, PdfRenderer};
use cvclean::models::cv::CvDocument;
use cvclean::models::template::{ExperienceLevel, PhotoFilter, TemplateDescriptor};

#[derive(Parser, Debug)]
#[command(
    name = "cvclean",
    about = "Build a CV: browse templates, chat with the assistant, export to PDF",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the templates matching the given filters
    Templates(TemplatesArgs),
    /// Print the live preview and completeness of a draft
    Preview(DraftArgs),
    /// Send a draft to the PDF renderer
    Export(ExportArgs),
    /// Build the CV by chatting with the assistant
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
struct TemplatesArgs {
    /// Experience bucket, e.g. "all", "0-3", "10+ años"
    #[arg(long, default_value = "all")]
    experience: String,
    /// "con" for templates with photo, "sin" for templates without
    #[arg(long, default_value = "con")]
    photo: String,
}

#[derive(Args, Debug)]
struct DraftArgs {
    /// Draft CV as JSON
    draft: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Draft CV as JSON
    draft: PathBuf,
    /// Template id from `cvclean templates`
    #[arg(long)]
    template: u32,
    #[arg(long, default_value = "cv.pdf")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ChatArgs {
    /// Where to save the PDF (defaults to CV_<session>.pdf)
    #[arg(long)]
    out: Option<PathBuf>,
}

pub(crate) async fn run(config: &Config) -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Templates(args) => run_templates(args),
        Command::Preview(args) => run_preview(args).await,
        Command::Export(args) => run_export(config, args).await,
        Command::Chat(args) => run_chat(config, args).await,
    }
}

fn run_templates(args: TemplatesArgs) -> Result<(), AppError> {
    let experience: ExperienceLevel = args.experience.parse().map_err(AppError::Validation)?;
    let photo: PhotoFilter = args.photo.parse().map_err(AppError::Validation)?;
    print!("{}", render_gallery(FilterState::new(experience, photo)));
    Ok(())
}

/// Renders the gallery for one filter state. An empty result offers the
/// defaults instead, as the gallery's "show all" button does.
fn render_gallery(state: FilterState) -> String {
    let catalog = catalog::builtin_catalog();
    let matches = state.apply(catalog);
    let mut out = String::new();

    if matches.is_empty() {
        let mut reset = state;
        reset.reset();
        out.push_str("No se encontraron plantillas con los filtros seleccionados.\n");
        out.push_str(&format!(
            "Mostrar todas ({} / {}):\n",
            reset.experience.label(),
            reset.photo.label()
        ));
        for template in reset.apply(catalog) {
            out.push_str(&template_line(template));
        }
        return out;
    }

    for template in matches {
        out.push_str(&template_line(template));
    }
    out
}

fn template_line(template: &TemplateDescriptor) -> String {
    let levels = template
        .experience_levels
        .iter()
        .filter(|l| **l != ExperienceLevel::All)
        .map(|l| l.code())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{:>2}  {:<12} {:<9} [{}]\n",
        template.id,
        template.title,
        if template.has_photo { "con foto" } else { "sin foto" },
        levels
    )
}

/// Reads a JSON draft and resumes editing it. Drafts the editor could not
/// have produced (bad photo, repeated entry ids) are rejected.
async fn load_draft(path: &Path) -> Result<CvEditor, AppError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let document: CvDocument = serde_json::from_str(&raw)?;
    Ok(CvEditor::from_document(document)?)
}

async fn run_preview(args: DraftArgs) -> Result<(), AppError> {
    let editor = load_draft(&args.draft).await?;
    print!("{}", editor.preview());

    let report = editor.completeness();
    println!("\nCompletitud: {:.0}%", report.overall_score * 100.0);
    for section in report.sections.iter().filter(|s| !s.recommendations.is_empty()) {
        for recommendation in &section.recommendations {
            println!("  - {recommendation}");
        }
    }
    Ok(())
}

async fn run_export(config: &Config, args: ExportArgs) -> Result<(), AppError> {
    let template = catalog::find(catalog::builtin_catalog(), args.template)
        .ok_or(ExportError::UnknownTemplate(args.template))?;
    let editor = load_draft(&args.draft).await?;

    let report = editor.completeness();
    if !report.missing_sections.is_empty() {
        println!(
            "Aviso: secciones vacías: {}",
            report.missing_sections.join(", ")
        );
    }

    let request = editor.export_requested(template.id);
    info!("Exporting draft with template '{}'", template.title);

    let renderer = HttpPdfRenderer::new(&config.pdf_endpoint, config.http_timeout)?;
    let pdf = renderer.render(&request).await?;
    write_pdf(&args.out, &pdf).await?;
    println!("PDF guardado en {}", args.out.display());
    Ok(())
}

async fn run_chat(config: &Config, args: ChatArgs) -> Result<(), AppError> {
    let client = ChatClient::new(&config.api_base, config.http_timeout)?;
    let mut conversation = Conversation::start(client).await;
    if let Some(greeting) = conversation.transcript().last() {
        println!("asistente> {}", greeting.content);
    }
    println!("(escribe /pdf para descargar tu CV, /salir para terminar)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/salir" => break,
            "/pdf" => {
                match conversation.request_pdf().await {
                    Some(pdf) => {
                        let out = args.out.clone().unwrap_or_else(|| {
                            PathBuf::from(format!(
                                "CV_{}.pdf",
                                conversation.session_id().unwrap_or("cv")
                            ))
                        });
                        write_pdf(&out, &pdf).await?;
                        println!("PDF guardado en {}", out.display());
                    }
                    None => {
                        if let Some(notice) = conversation.transcript().last() {
                            println!("asistente> {}", notice.content);
                        }
                    }
                }
            }
            text => {
                if let Some(reply) = conversation.send(text).await {
                    println!("asistente> {}", reply.content);
                }
                if let Some(progress) = conversation.progress() {
                    println!("(progreso: {:.0}%)", progress * 100.0);
                }
            }
        }
    }
    Ok(())
}
