use crate::infra::InMemoryProfileStore;
use crate::notes::ConfiguredNotes;
use clap::Args;
use health_profiler::config::AppConfig;
use health_profiler::error::AppError;
use health_profiler::workflows::intake::{ProfileStatus, RawAnswers};
use health_profiler::workflows::profiles::{FullProfile, ProfileSubmission, ProfilingService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// JSON file holding an answers object
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Pasted questionnaire text ("Key: value" lines or a JSON object)
    #[arg(long)]
    pub(crate) text: Option<PathBuf>,
    /// OCR output of a scanned questionnaire
    #[arg(long)]
    pub(crate) ocr: Option<PathBuf>,
    /// Session whose feedback weights are shared with the notes generator
    #[arg(long)]
    pub(crate) session: Option<String>,
    /// Print the full profile as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn has_inputs(&self) -> bool {
        self.answers.is_some() || self.text.is_some() || self.ocr.is_some()
    }
}

pub(crate) async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let stdin_text = if args.has_inputs() {
        None
    } else {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        Some(buffer)
    };
    let submission = build_submission(&args, stdin_text)?;

    let notes = ConfiguredNotes::from_config(&config.notes)?;
    let service = ProfilingService::new(
        Arc::new(InMemoryProfileStore::default()),
        Arc::new(notes),
    )
    .with_notes_timeout(config.notes.timeout);
    let profile = service.process(submission).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print!("{}", render_report(&profile));
    }
    Ok(())
}

/// Stdin text stands in for `--text` when no input file was named.
pub(crate) fn build_submission(
    args: &AssessArgs,
    stdin_text: Option<String>,
) -> Result<ProfileSubmission, AppError> {
    let answers = match &args.answers {
        Some(path) => Some(serde_json::from_str::<RawAnswers>(&read_input(path)?)?),
        None => None,
    };
    let text_input = match &args.text {
        Some(path) => Some(read_input(path)?),
        None => stdin_text,
    };
    let ocr_text = args.ocr.as_deref().map(read_input).transpose()?;

    Ok(ProfileSubmission {
        answers,
        text_input,
        ocr_text,
        persist: false,
        session_id: args.session.clone(),
    })
}

fn read_input(path: &Path) -> Result<String, AppError> {
    Ok(std::fs::read_to_string(path)?)
}

pub(crate) fn render_report(profile: &FullProfile) -> String {
    let parse = &profile.parse;
    let status = match parse.status {
        ProfileStatus::Ok => "ok",
        ProfileStatus::IncompleteProfile => "incomplete profile",
    };

    let mut lines = vec![
        format!("Profile {}", profile.id),
        format!(
            "Parse status: {status} (confidence {:.2})",
            parse.confidence
        ),
    ];
    if !parse.missing_fields.is_empty() {
        let missing: Vec<&str> = parse.missing_fields.iter().map(|f| f.key()).collect();
        lines.push(format!("Missing fields: {}", missing.join(", ")));
    }
    if let Some(reason) = &parse.reason {
        lines.push(format!("Reason: {reason}"));
        return finish(lines);
    }

    if let Some(risk) = &profile.risk {
        lines.push(format!(
            "Risk: {} (score {})",
            risk.risk_level.label(),
            risk.score
        ));
        if !risk.rationale.is_empty() {
            lines.push(format!("Rationale: {}", risk.rationale.join(", ")));
        }
    }
    if let Some(factors) = &profile.factors {
        let labels: Vec<&str> = factors.factors.iter().map(|f| f.label()).collect();
        let listed = if labels.is_empty() {
            "none".to_string()
        } else {
            labels.join(", ")
        };
        lines.push(format!(
            "Factors: {listed} (confidence {:.2})",
            factors.confidence
        ));
    }
    if let Some(recommendation) = &profile.recommendation {
        lines.push("Recommendations:".to_string());
        lines.extend(
            recommendation
                .recommendations
                .iter()
                .map(|item| format!("  - {item}")),
        );
    }
    if let Some(notes) = profile.ai_notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("Notes: {notes}"));
    }
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut report = lines.join("\n");
    report.push('\n');
    report
}
