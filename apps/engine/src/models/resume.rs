//! Resume data model: the canonical structured representation a resume is
//! edited, generated, parsed, and scored against.
//!
//! All types serialize with camelCase field names, matching the wire format
//! the surrounding application stores (`firstName`, `isCurrent`, ...).
//! `ParsedResume` is the best-effort partial form the LaTeX parser returns;
//! it is merged onto an existing document, never swapped in wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Template selection
// ────────────────────────────────────────────────────────────────────────────

/// Which of the two fixed LaTeX grammars a document generates into.
/// Doubles as the dialect tag the parser detects before extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Leaf types
// ────────────────────────────────────────────────────────────────────────────

/// Contact block. Empty strings mean "not provided"; the only semantic
/// anywhere that cares about format is the scorer's `@`-in-email check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub job_role: Option<String>,
}

impl PersonalInfo {
    /// "First Last", or whichever half is present.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_full_name(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub gpa: Option<String>,
    pub start_date: String,
    /// None means ongoing or unspecified.
    pub end_date: Option<String>,
    pub location: Option<String>,
    /// Explicit order index; carries no meaning beyond list order.
    pub sequence: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    /// When true the role is ongoing and any stored `end_date` is stale;
    /// it must never be rendered.
    pub is_current: bool,
    /// Free text. Lines prefixed with `•` or `-` are bullet items, other
    /// non-empty lines are plain paragraph lines.
    pub description: String,
    pub sequence: u32,
}

impl ExperienceEntry {
    /// End-of-range label for rendering. `is_current` always wins over a
    /// stored end date.
    pub fn effective_end(&self) -> Option<&str> {
        if self.is_current {
            Some("Present")
        } else {
            self.end_date.as_deref()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_ongoing: bool,
    pub url: Option<String>,
    pub github_url: Option<String>,
    pub sequence: u32,
}

impl ProjectEntry {
    pub fn effective_end(&self) -> Option<&str> {
        if self.is_ongoing {
            Some("Present")
        } else {
            self.end_date.as_deref()
        }
    }

    pub fn has_link(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
            || self
                .github_url
                .as_deref()
                .is_some_and(|u| !u.trim().is_empty())
    }
}

/// Three independent ordered skill lists. The only invariant is that an
/// exact duplicate string is never inserted twice into the same list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillSet {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
}

impl SkillSet {
    /// Appends to `technical` unless the exact string is already present.
    /// Returns whether the skill was inserted.
    pub fn add_technical(&mut self, skill: impl Into<String>) -> bool {
        Self::push_unique(&mut self.technical, skill.into())
    }

    pub fn add_soft(&mut self, skill: impl Into<String>) -> bool {
        Self::push_unique(&mut self.soft, skill.into())
    }

    pub fn add_language(&mut self, skill: impl Into<String>) -> bool {
        Self::push_unique(&mut self.languages, skill.into())
    }

    /// Total skill count across all three lists.
    pub fn total(&self) -> usize {
        self.technical.len() + self.soft.len() + self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn push_unique(list: &mut Vec<String>, skill: String) -> bool {
        if list.contains(&skill) {
            return false;
        }
        list.push(skill);
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ResumeDocument
// ────────────────────────────────────────────────────────────────────────────

/// The aggregate resume record.
///
/// `latex_source` holds the last generated-or-edited LaTeX and is allowed to
/// drift from the structured fields between pipeline runs; the two are only
/// reconciled explicitly (generate, or parse-and-merge), never implicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub id: Uuid,
    pub personal_info: PersonalInfo,
    pub professional_summary: String,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: SkillSet,
    pub selected_template: TemplateId,
    pub latex_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeDocument {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            personal_info: PersonalInfo::default(),
            professional_summary: String::new(),
            education: Vec::new(),
            work_experience: Vec::new(),
            projects: Vec::new(),
            skills: SkillSet::default(),
            selected_template: TemplateId::default(),
            latex_source: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Re-enforces the current/ongoing invariant: a stored end date is
    /// cleared whenever the corresponding flag is set.
    pub fn normalize_dates(&mut self) {
        for exp in &mut self.work_experience {
            if exp.is_current {
                exp.end_date = None;
            }
        }
        for proj in &mut self.projects {
            if proj.is_ongoing {
                proj.end_date = None;
            }
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ParsedResume: the parser's best-effort partial extraction
// ────────────────────────────────────────────────────────────────────────────

/// Personal fields as extracted from LaTeX. Every field optional: absent
/// means "not found", never "clear the stored value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedPersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub job_role: Option<String>,
}

/// What the LaTeX parser could confidently extract from one source string.
/// Empty lists mean the section was absent or unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub personal_info: ParsedPersonalInfo,
    pub professional_summary: Option<String>,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: SkillSet,
    /// Which grammar the extraction ran under.
    pub dialect: TemplateId,
}

impl ParsedResume {
    pub fn is_empty(&self) -> bool {
        self.personal_info == ParsedPersonalInfo::default()
            && self.professional_summary.is_none()
            && self.education.is_empty()
            && self.work_experience.is_empty()
            && self.projects.is_empty()
            && self.skills.is_empty()
    }

    /// Merges the extracted fields onto `base`, returning the updated copy.
    ///
    /// Present scalar fields overwrite; absent ones leave the stored value
    /// alone. Entry lists and skill lists replace the stored list only when
    /// the extraction found at least one item. Soft skills have no emission
    /// point in either grammar and are therefore never touched here.
    pub fn merge_into(&self, base: &ResumeDocument) -> ResumeDocument {
        let mut doc = base.clone();
        let p = &self.personal_info;

        merge_field(&mut doc.personal_info.first_name, &p.first_name);
        merge_field(&mut doc.personal_info.last_name, &p.last_name);
        merge_field(&mut doc.personal_info.email, &p.email);
        merge_field(&mut doc.personal_info.phone, &p.phone);
        merge_field(&mut doc.personal_info.location, &p.location);
        merge_opt(&mut doc.personal_info.linkedin, &p.linkedin);
        merge_opt(&mut doc.personal_info.github, &p.github);
        merge_opt(&mut doc.personal_info.job_role, &p.job_role);

        if let Some(summary) = &self.professional_summary {
            doc.professional_summary = summary.clone();
        }
        if !self.education.is_empty() {
            doc.education = self.education.clone();
        }
        if !self.work_experience.is_empty() {
            doc.work_experience = self.work_experience.clone();
        }
        if !self.projects.is_empty() {
            doc.projects = self.projects.clone();
        }
        if !self.skills.technical.is_empty() {
            doc.skills.technical = self.skills.technical.clone();
        }
        if !self.skills.languages.is_empty() {
            doc.skills.languages = self.skills.languages.clone();
        }

        doc.normalize_dates();
        doc.touch();
        doc
    }
}

fn merge_field(target: &mut String, extracted: &Option<String>) {
    if let Some(value) = extracted {
        *target = value.clone();
    }
}

fn merge_opt(target: &mut Option<String>, extracted: &Option<String>) {
    if extracted.is_some() {
        *target = extracted.clone();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
