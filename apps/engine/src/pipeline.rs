//! Edit orchestration: the one place where the structured fields and
//! `latex_source` are reconciled.
//!
//! Flow: ensure LaTeX (reuse or generate) → external rewrite → parse the
//! reply → merge onto a copy of the document → re-score. Strictly
//! sequential; a collaborator failure aborts before anything is committed,
//! so the caller's document is never left half-updated.

use tracing::info;

use crate::errors::AppError;
use crate::latex::generator::generate_latex;
use crate::latex::parser::parse_latex;
use crate::models::resume::ResumeDocument;
use crate::rewrite::RewriteService;
use crate::scoring::{score_resume, ScoreReport};

/// Result of one edit pass.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The updated document, with `latex_source` set to the rewritten text
    /// and the structured fields re-parsed from it.
    pub resume: ResumeDocument,
    pub change_summary: String,
    pub score: ScoreReport,
}

/// Returns the document's usable LaTeX and whether it had to be generated.
///
/// A stored source is reused only when it looks like a complete document;
/// anything else (absent, blank, a bare template name) regenerates from the
/// structured fields and the selected template.
pub fn ensure_latex(resume: &ResumeDocument) -> (String, bool) {
    match resume
        .latex_source
        .as_deref()
        .filter(|source| source.contains("\\documentclass"))
    {
        Some(source) => (source.to_string(), false),
        None => (
            generate_latex(resume, resume.selected_template),
            true,
        ),
    }
}

/// Regenerates `latex_source` when it is absent or unusable, then scores
/// the document. The wizard's preview path.
pub fn rescore(resume: &mut ResumeDocument) -> ScoreReport {
    let (latex, regenerated) = ensure_latex(resume);
    if regenerated {
        resume.latex_source = Some(latex);
        resume.touch();
    }
    score_resume(resume)
}

/// Runs one full edit pass against the rewrite collaborator.
///
/// The input document is only read; the updated copy is returned in the
/// outcome. Any collaborator failure surfaces as an error with no partial
/// state committed anywhere.
pub async fn edit_resume(
    resume: &ResumeDocument,
    instruction: &str,
    rewrite: &dyn RewriteService,
) -> Result<EditOutcome, AppError> {
    if instruction.trim().is_empty() {
        return Err(AppError::Validation(
            "An edit instruction is required".to_string(),
        ));
    }

    // Step 1: reuse or generate the LaTeX to edit
    let (latex, regenerated) = ensure_latex(resume);
    info!(
        "editing resume {} (source {})",
        resume.id,
        if regenerated { "generated" } else { "reused" }
    );

    // Step 2: external rewrite; must fully complete before parsing
    let outcome = rewrite.rewrite(&latex, instruction).await?;
    info!("rewrite applied: {}", outcome.change_summary);

    // Step 3: parse the reply back into structured fields
    let parsed = parse_latex(&outcome.latex_source);

    // Step 4: merge onto a copy; absent fields never clear stored values
    let mut updated = parsed.merge_into(resume);
    updated.latex_source = Some(outcome.latex_source);

    // Step 5: re-score the reconciled document
    let score = score_resume(&updated);
    info!("resume {} re-scored at {}", updated.id, score.score);

    Ok(EditOutcome {
        resume: updated,
        change_summary: outcome.change_summary,
        score,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
