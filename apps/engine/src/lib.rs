//! Resume core engine: structured resume data, a bidirectional LaTeX
//! transformation, and an ATS-compatibility scoring heuristic.
//!
//! Three pure, synchronous functions form the public surface:
//!
//! - [`generate_latex`]: data model + template id → complete LaTeX source
//! - [`parse_latex`]: LaTeX source → best-effort partial data model
//! - [`score_resume`]: data model → 0-100 score with categorized feedback
//!
//! Around them, [`pipeline::edit_resume`] runs the one ordered sequence in
//! the system (generate-or-reuse → external rewrite → re-parse → merge →
//! re-score) against any [`rewrite::RewriteService`] implementation.
//! Persistence, authentication, HTTP transport, and PDF rendering are the
//! embedding application's concern.

pub mod config;
pub mod errors;
pub mod latex;
pub mod models;
pub mod pipeline;
pub mod rewrite;
pub mod scoring;

pub use config::Config;
pub use errors::AppError;
pub use latex::{detect_dialect, generate_latex, parse_latex};
pub use models::resume::{
    EducationEntry, ExperienceEntry, ParsedPersonalInfo, ParsedResume, PersonalInfo, ProjectEntry,
    ResumeDocument, SkillSet, TemplateId,
};
pub use pipeline::{edit_resume, ensure_latex, rescore, EditOutcome};
pub use rewrite::{LlmRewriteClient, RewriteError, RewriteOutcome, RewriteService};
pub use scoring::{score_resume, ScoreBand, ScoreReport};

#[cfg(test)]
mod tests {
    use super::*;

    /// The round-trip contract across the public surface: both template
    /// families reproduce the fields their grammars carry.
    #[test]
    fn test_public_round_trip_both_templates() {
        let mut doc = ResumeDocument::new();
        doc.personal_info.first_name = "Lin".to_string();
        doc.personal_info.last_name = "Chen".to_string();
        doc.personal_info.email = "lin@chen.dev".to_string();
        doc.work_experience.push(ExperienceEntry {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            location: "Taipei".to_string(),
            start_date: "2021-05".to_string(),
            end_date: Some("2023-02".to_string()),
            is_current: false,
            description: "• Delivered 4 services".to_string(),
            sequence: 0,
        });
        doc.education.push(EducationEntry {
            institution: "NTU".to_string(),
            degree: "MSc".to_string(),
            field: "CS".to_string(),
            gpa: None,
            start_date: "2016-09".to_string(),
            end_date: Some("2018-06".to_string()),
            location: None,
            sequence: 0,
        });

        let mut outputs = Vec::new();
        for template in [TemplateId::Modern, TemplateId::Classic] {
            let latex = generate_latex(&doc, template);
            outputs.push(latex.clone());

            let parsed = parse_latex(&latex);
            assert_eq!(parsed.dialect, template);
            assert_eq!(parsed.personal_info.first_name.as_deref(), Some("Lin"));
            assert_eq!(parsed.personal_info.last_name.as_deref(), Some("Chen"));
            assert_eq!(parsed.personal_info.email.as_deref(), Some("lin@chen.dev"));
            assert_eq!(parsed.work_experience[0].company, "Acme");
            assert_eq!(parsed.work_experience[0].position, "Engineer");
            assert_eq!(parsed.work_experience[0].start_date, "2021-05");
            assert_eq!(parsed.education[0].institution, "NTU");
            assert_eq!(parsed.education[0].degree, "MSc");
        }
        assert_ne!(outputs[0], outputs[1], "the two grammars must differ");
    }

    /// Soft skills are tracked in the data model but have no emission point
    /// in either grammar; parsing generated output must not fabricate them
    /// into the technical or language lists.
    #[test]
    fn test_soft_skills_do_not_leak_into_other_lists() {
        let mut doc = ResumeDocument::new();
        doc.skills.soft = vec!["Empathy".to_string(), "Patience".to_string()];

        for template in [TemplateId::Modern, TemplateId::Classic] {
            let latex = generate_latex(&doc, template);
            let parsed = parse_latex(&latex);
            assert!(parsed.skills.soft.is_empty());
            assert!(!parsed.skills.technical.contains(&"Empathy".to_string()));
            assert!(!parsed.skills.languages.contains(&"Patience".to_string()));
        }
    }

    /// Generated defaults round-trip as ordinary values; parsing them back
    /// and rescoring is stable.
    #[test]
    fn test_generate_parse_score_chain_is_total_on_empty_input() {
        let doc = ResumeDocument::new();
        let latex = generate_latex(&doc, TemplateId::Modern);
        let parsed = parse_latex(&latex);
        let merged = parsed.merge_into(&doc);
        let report = score_resume(&merged);
        assert!(report.score <= 100);
    }
}
