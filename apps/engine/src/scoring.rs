//! ATS compatibility scoring: a deterministic, rule-based heuristic over
//! the structured resume data.
//!
//! Purely additive across six weighted categories; each check appends to
//! exactly one of `strengths` or `improvements` (or neutral `feedback`),
//! and the running total is clamped to 100 once at the end. Bonus
//! categories (projects, keyword alignment) can push the total past a
//! partial category's shortfall, which is intentional. Total over sparse
//! input: every absent field scores zero, nothing errors.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeDocument;

/// Whitelisted action verbs; matched case-insensitively on word boundaries.
const ACTION_VERB_PATTERN: &str =
    r"(?i)\b(led|managed|developed|created|improved|increased|reduced|achieved|delivered)\b";

const ENGINEERING_KEYWORDS: &[&str] = &[
    "programming",
    "coding",
    "development",
    "software",
    "api",
    "database",
    "framework",
];
const MANAGEMENT_KEYWORDS: &[&str] = &[
    "team",
    "leadership",
    "management",
    "strategy",
    "planning",
    "coordination",
];
const DESIGN_KEYWORDS: &[&str] = &[
    "design",
    "user",
    "interface",
    "experience",
    "prototype",
    "visual",
];

// ────────────────────────────────────────────────────────────────────────────
// Report types
// ────────────────────────────────────────────────────────────────────────────

/// Full scoring report returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    /// Neutral guidance. The first element is always the overall banner.
    pub feedback: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl ScoreReport {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

/// Coarse classification of a final score, used by callers that only need
/// the band (badges, colors) rather than the full report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Strong,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            80..=89 => ScoreBand::Strong,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::Fair,
            _ => ScoreBand::NeedsWork,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume` on the 0-100 heuristic scale.
pub fn score_resume(resume: &ResumeDocument) -> ScoreReport {
    let mut score: u32 = 0;
    let mut feedback: Vec<String> = Vec::new();
    let mut strengths: Vec<String> = Vec::new();
    let mut improvements: Vec<String> = Vec::new();

    // Personal info (up to 20 points)
    let info = &resume.personal_info;
    if info.has_full_name() {
        score += 5;
        strengths.push("Complete name provided".to_string());
    } else {
        improvements.push("Add complete first and last name".to_string());
    }
    if info.email.contains('@') {
        score += 5;
        strengths.push("Valid email address".to_string());
    } else {
        improvements.push("Add a valid email address".to_string());
    }
    if !info.phone.trim().is_empty() {
        score += 3;
        strengths.push("Phone number included".to_string());
    } else {
        improvements.push("Add phone number for contact".to_string());
    }
    if !info.location.trim().is_empty() {
        score += 3;
        strengths.push("Location information provided".to_string());
    } else {
        improvements.push("Add location for job matching".to_string());
    }
    if info.linkedin.as_deref().is_some_and(|l| !l.trim().is_empty()) {
        score += 2;
        strengths.push("LinkedIn profile included".to_string());
    }
    let job_role = info.job_role.as_deref().map(str::trim).unwrap_or("");
    if !job_role.is_empty() {
        score += 2;
        strengths.push("Clear job role specified".to_string());
    } else {
        improvements.push("Specify target job role".to_string());
    }

    // Professional summary (up to 15 points), banded by length
    let summary = resume.professional_summary.trim();
    if !summary.is_empty() {
        let len = summary.chars().count();
        if (100..=300).contains(&len) {
            score += 15;
            strengths.push("Well-sized professional summary (100-300 characters)".to_string());
        } else if len >= 50 {
            score += 10;
            feedback.push(
                "Professional summary could be optimized (aim for 100-300 characters)".to_string(),
            );
        } else {
            score += 5;
            improvements.push("Expand your professional summary".to_string());
        }
    } else {
        improvements.push("Add a professional summary".to_string());
    }

    // Work experience (up to 25 points)
    if !resume.work_experience.is_empty() {
        score += 10;
        strengths.push("Work experience included".to_string());

        let has_quantified = resume
            .work_experience
            .iter()
            .any(|exp| exp.description.chars().any(|c| c.is_ascii_digit()));
        if has_quantified {
            score += 8;
            strengths.push("Quantified achievements in experience".to_string());
        } else {
            improvements
                .push("Add numbers and metrics to quantify your achievements".to_string());
        }

        let verb_re =
            Regex::new(ACTION_VERB_PATTERN).expect("static action-verb pattern compiles");
        let has_strong_verbs = resume
            .work_experience
            .iter()
            .any(|exp| verb_re.is_match(&exp.description));
        if has_strong_verbs {
            score += 7;
            strengths.push("Strong action verbs used".to_string());
        } else {
            improvements
                .push("Use stronger action verbs (led, managed, developed, etc.)".to_string());
        }
    } else {
        improvements.push("Add work experience if available".to_string());
    }

    // Skills (up to 20 points), banded by total count across all lists
    let total_skills = resume.skills.total();
    if total_skills >= 8 {
        score += 20;
        strengths.push("Comprehensive skills section".to_string());
    } else if total_skills >= 5 {
        score += 15;
        feedback.push("Good skills coverage, consider adding more relevant skills".to_string());
    } else if total_skills >= 3 {
        score += 10;
        improvements.push("Add more relevant skills to your profile".to_string());
    } else {
        improvements.push("Expand your skills section significantly".to_string());
    }

    // Education (10 points, flat)
    if !resume.education.is_empty() {
        score += 10;
        strengths.push("Education information included".to_string());
    } else {
        improvements.push("Add education background".to_string());
    }

    // Projects (up to 10 bonus points)
    if !resume.projects.is_empty() {
        score += 5;
        strengths.push("Projects showcase your work".to_string());
        if resume.projects.iter().any(|p| p.has_link()) {
            score += 5;
            strengths.push("Project links provided for verification".to_string());
        }
    }

    // Keyword alignment with the target role (up to 5 bonus points)
    if !job_role.is_empty() {
        if let Some(keywords) = role_keywords(job_role) {
            let haystack = keyword_haystack(resume);
            let matched = keywords
                .iter()
                .filter(|kw| haystack.contains(*kw))
                .count();
            if matched >= 3 {
                score += 5;
                strengths.push("Good keyword alignment with target role".to_string());
            } else if matched >= 1 {
                feedback
                    .push("Consider adding more keywords related to your target role".to_string());
            } else {
                improvements
                    .push("Include more keywords relevant to your target job role".to_string());
            }
        }
    }

    let score = score.min(100);
    feedback.insert(0, banner(score).to_string());

    ScoreReport {
        score,
        feedback,
        strengths,
        improvements,
    }
}

/// Fixed keyword list for a role bucket, or None when the role matches no
/// bucket (such roles simply contribute nothing).
fn role_keywords(job_role: &str) -> Option<&'static [&'static str]> {
    let role = job_role.to_lowercase();
    if role.contains("software") || role.contains("developer") || role.contains("engineer") {
        Some(ENGINEERING_KEYWORDS)
    } else if role.contains("manager") || role.contains("lead") {
        Some(MANAGEMENT_KEYWORDS)
    } else if role.contains("design") {
        Some(DESIGN_KEYWORDS)
    } else {
        None
    }
}

/// Summary + every experience and project description + technical skills,
/// lowercased into one searchable blob.
fn keyword_haystack(resume: &ResumeDocument) -> String {
    let mut parts: Vec<&str> = vec![resume.professional_summary.as_str()];
    parts.extend(resume.work_experience.iter().map(|e| e.description.as_str()));
    parts.extend(resume.projects.iter().map(|p| p.description.as_str()));
    parts.extend(resume.skills.technical.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

/// Overall banner, always the first feedback entry.
fn banner(score: u32) -> &'static str {
    match score {
        90.. => "Excellent! Your resume is highly ATS-friendly",
        80..=89 => "Great job! Your resume should perform well with ATS systems",
        70..=79 => "Good foundation, but there's room for improvement",
        60..=69 => "Your resume needs some optimization for ATS systems",
        _ => "Significant improvements needed for ATS compatibility",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, SkillSet,
    };

    fn ideal_resume() -> ResumeDocument {
        let mut doc = ResumeDocument::new();
        doc.personal_info = PersonalInfo {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@analytical.dev".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            location: "London, UK".to_string(),
            linkedin: Some("linkedin.com/in/ada".to_string()),
            website: None,
            github: None,
            job_role: Some("Software Engineer".to_string()),
        };
        // 100-300 characters puts the summary in the ideal band.
        doc.professional_summary = "Software engineer with a decade of experience building \
            reliable backend services, data pipelines, and developer tooling for teams that \
            ship every week."
            .to_string();
        doc.work_experience.push(ExperienceEntry {
            company: "Analytical Engines Ltd".to_string(),
            position: "Lead Engineer".to_string(),
            location: "London".to_string(),
            start_date: "2019-04".to_string(),
            end_date: None,
            is_current: true,
            description: "• Led development of a public api and database layer\n\
                • Reduced infrastructure spend by 40%"
                .to_string(),
            sequence: 0,
        });
        doc.education.push(EducationEntry {
            institution: "University of London".to_string(),
            degree: "BSc".to_string(),
            field: "Mathematics".to_string(),
            gpa: None,
            start_date: "2012-09".to_string(),
            end_date: Some("2015-06".to_string()),
            location: None,
            sequence: 0,
        });
        doc.projects.push(ProjectEntry {
            name: "Difference Engine".to_string(),
            description: "Open-source software demo".to_string(),
            technologies: vec!["Rust".to_string()],
            start_date: None,
            end_date: None,
            is_ongoing: false,
            url: None,
            github_url: Some("https://github.com/ada/de".to_string()),
            sequence: 0,
        });
        doc.skills = SkillSet {
            technical: vec![
                "Rust".to_string(),
                "SQL".to_string(),
                "Kubernetes".to_string(),
            ],
            soft: vec!["Mentoring".to_string(), "Writing".to_string()],
            languages: vec![
                "English".to_string(),
                "French".to_string(),
                "Italian".to_string(),
            ],
        };
        doc
    }

    #[test]
    fn test_score_is_bounded() {
        for doc in [ResumeDocument::new(), ideal_resume()] {
            let report = score_resume(&doc);
            assert!(report.score <= 100);
        }
    }

    #[test]
    fn test_empty_resume_scores_low_with_banner() {
        let report = score_resume(&ResumeDocument::new());
        assert!(report.score < 60, "empty resume scored {}", report.score);
        assert_eq!(
            report.feedback[0],
            "Significant improvements needed for ATS compatibility"
        );
        assert!(!report.improvements.is_empty());
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_ideal_resume_scores_excellent() {
        let report = score_resume(&ideal_resume());
        assert_eq!(report.score, 100, "improvements: {:?}", report.improvements);
        assert_eq!(
            report.feedback[0],
            "Excellent! Your resume is highly ATS-friendly"
        );
        assert_eq!(report.band(), ScoreBand::Excellent);
    }

    #[test]
    fn test_adding_email_never_decreases_score() {
        let mut sparse = ResumeDocument::new();
        let mut full = ideal_resume();
        full.personal_info.email = String::new();

        for without in [&mut sparse, &mut full] {
            let before = score_resume(without);
            without.personal_info.email = "ada@analytical.dev".to_string();
            let after = score_resume(without);
            assert!(
                after.score >= before.score,
                "email lowered score: {} -> {}",
                before.score,
                after.score
            );
        }
    }

    #[test]
    fn test_email_without_at_sign_is_an_improvement() {
        let mut doc = ideal_resume();
        doc.personal_info.email = "not-an-email".to_string();
        let report = score_resume(&doc);
        assert!(report
            .improvements
            .contains(&"Add a valid email address".to_string()));
    }

    #[test]
    fn test_summary_bands() {
        let mut doc = ResumeDocument::new();

        doc.professional_summary = "x".repeat(150);
        let ideal = score_resume(&doc);
        assert!(ideal
            .strengths
            .contains(&"Well-sized professional summary (100-300 characters)".to_string()));

        doc.professional_summary = "x".repeat(60);
        let decent = score_resume(&doc);
        assert!(decent.feedback.contains(
            &"Professional summary could be optimized (aim for 100-300 characters)".to_string()
        ));
        assert_eq!(ideal.score - decent.score, 5);

        doc.professional_summary = "short".to_string();
        let short = score_resume(&doc);
        assert!(short
            .improvements
            .contains(&"Expand your professional summary".to_string()));
        assert_eq!(decent.score - short.score, 5);
    }

    #[test]
    fn test_quantified_achievements_detected_by_digit() {
        let mut doc = ResumeDocument::new();
        doc.work_experience.push(ExperienceEntry {
            description: "Shipped things faster".to_string(),
            ..Default::default()
        });
        let without = score_resume(&doc);
        assert!(without
            .improvements
            .contains(&"Add numbers and metrics to quantify your achievements".to_string()));

        doc.work_experience[0].description = "Shipped 3 releases".to_string();
        let with = score_resume(&doc);
        assert_eq!(with.score - without.score, 8);
    }

    #[test]
    fn test_action_verbs_match_on_word_boundaries() {
        let mut doc = ResumeDocument::new();
        doc.work_experience.push(ExperienceEntry {
            // "mismanaged" must not count as "managed"; "knowledge" must not
            // count as "led".
            description: "mismanaged knowledge bases".to_string(),
            ..Default::default()
        });
        let report = score_resume(&doc);
        assert!(report
            .improvements
            .contains(&"Use stronger action verbs (led, managed, developed, etc.)".to_string()));

        doc.work_experience[0].description = "Led knowledge bases".to_string();
        let with = score_resume(&doc);
        assert!(with.strengths.contains(&"Strong action verbs used".to_string()));
    }

    #[test]
    fn test_skills_bands_count_across_all_lists() {
        let mut doc = ResumeDocument::new();
        doc.skills.technical = vec!["a".into(), "b".into(), "c".into()];
        doc.skills.soft = vec!["d".into(), "e".into()];
        doc.skills.languages = vec!["f".into(), "g".into(), "h".into()];
        let report = score_resume(&doc);
        assert!(report
            .strengths
            .contains(&"Comprehensive skills section".to_string()));

        doc.skills.languages.clear();
        let five = score_resume(&doc);
        assert!(five
            .feedback
            .contains(&"Good skills coverage, consider adding more relevant skills".to_string()));
        assert_eq!(report.score - five.score, 5);
    }

    #[test]
    fn test_project_link_bonus() {
        let mut doc = ResumeDocument::new();
        doc.projects.push(ProjectEntry {
            name: "Tool".to_string(),
            ..Default::default()
        });
        let without = score_resume(&doc);

        doc.projects[0].github_url = Some("https://github.com/a/tool".to_string());
        let with = score_resume(&doc);
        assert_eq!(with.score - without.score, 5);
        assert!(with
            .strengths
            .contains(&"Project links provided for verification".to_string()));
    }

    #[test]
    fn test_keyword_alignment_buckets() {
        let mut doc = ResumeDocument::new();
        doc.personal_info.job_role = Some("Engineering Manager".to_string());
        doc.professional_summary =
            "Leadership of a team with clear strategy and planning.".to_string();
        let report = score_resume(&doc);
        assert!(report
            .strengths
            .contains(&"Good keyword alignment with target role".to_string()));
    }

    #[test]
    fn test_keyword_alignment_single_match_is_neutral_feedback() {
        let mut doc = ResumeDocument::new();
        doc.personal_info.job_role = Some("Software Engineer".to_string());
        doc.professional_summary = "I enjoy coding.".to_string();
        let report = score_resume(&doc);
        assert!(report
            .feedback
            .contains(&"Consider adding more keywords related to your target role".to_string()));
    }

    #[test]
    fn test_unbucketed_role_contributes_nothing() {
        let mut doc = ResumeDocument::new();
        doc.personal_info.job_role = Some("Veterinarian".to_string());
        let base_feedback_len = score_resume(&doc).feedback.len();
        // Only the banner is present; no keyword messages of any kind.
        assert_eq!(base_feedback_len, 1);
    }

    #[test]
    fn test_banner_thresholds() {
        assert_eq!(banner(95), "Excellent! Your resume is highly ATS-friendly");
        assert_eq!(
            banner(85),
            "Great job! Your resume should perform well with ATS systems"
        );
        assert_eq!(banner(75), "Good foundation, but there's room for improvement");
        assert_eq!(
            banner(65),
            "Your resume needs some optimization for ATS systems"
        );
        assert_eq!(
            banner(10),
            "Significant improvements needed for ATS compatibility"
        );
    }

    #[test]
    fn test_score_band_classification() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::NeedsWork);
    }

    #[test]
    fn test_determinism() {
        let doc = ideal_resume();
        let a = score_resume(&doc);
        let b = score_resume(&doc);
        assert_eq!(a.score, b.score);
        assert_eq!(a.feedback, b.feedback);
        assert_eq!(a.strengths, b.strengths);
        assert_eq!(a.improvements, b.improvements);
    }
}
