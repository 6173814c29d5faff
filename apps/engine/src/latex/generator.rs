//! LaTeX generation: structured resume data in, complete LaTeX source out.
//!
//! Total over any well-formed `ResumeDocument`: empty fields fall back to
//! template defaults, missing optional fields degrade silently, and the
//! output never contains an unresolved `[TOKEN]`.

use crate::latex::escape::escape_latex;
use crate::latex::templates::{
    CLASSIC_TEMPLATE, DEFAULT_EMAIL, DEFAULT_FIRST_NAME, DEFAULT_GITHUB, DEFAULT_JOB_ROLE,
    DEFAULT_LANGUAGES, DEFAULT_LAST_NAME, DEFAULT_LINKEDIN, DEFAULT_LOCATION, DEFAULT_PHONE,
    DEFAULT_SUMMARY, DEFAULT_TECHNICAL_SKILLS, EMPTY_TECHNOLOGIES, MODERN_TEMPLATE,
};
use crate::models::resume::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument, TemplateId,
};

/// Renders `resume` into the LaTeX grammar selected by `template`.
pub fn generate_latex(resume: &ResumeDocument, template: TemplateId) -> String {
    let skeleton = match template {
        TemplateId::Modern => MODERN_TEMPLATE,
        TemplateId::Classic => CLASSIC_TEMPLATE,
    };

    let info = &resume.personal_info;

    skeleton
        .replace("[FIRST_NAME]", &value_or(&info.first_name, DEFAULT_FIRST_NAME))
        .replace("[LAST_NAME]", &value_or(&info.last_name, DEFAULT_LAST_NAME))
        .replace(
            "[JOB_ROLE]",
            &opt_value_or(info.job_role.as_deref(), DEFAULT_JOB_ROLE),
        )
        .replace("[LOCATION]", &value_or(&info.location, DEFAULT_LOCATION))
        .replace("[PHONE]", &value_or(&info.phone, DEFAULT_PHONE))
        .replace("[EMAIL]", &value_or(&info.email, DEFAULT_EMAIL))
        .replace(
            "[LINKEDIN]",
            &opt_value_or(info.linkedin.as_deref(), DEFAULT_LINKEDIN),
        )
        .replace(
            "[GITHUB]",
            &opt_value_or(info.github.as_deref(), DEFAULT_GITHUB),
        )
        .replace(
            "[PROFESSIONAL_SUMMARY]",
            &value_or(&resume.professional_summary, DEFAULT_SUMMARY),
        )
        .replace(
            "[WORK_EXPERIENCE]",
            &render_experience(&resume.work_experience, template),
        )
        .replace("[EDUCATION]", &render_education(&resume.education, template))
        .replace("[PROJECTS]", &render_projects(&resume.projects, template))
        .replace(
            "[TECHNICAL_SKILLS]",
            &join_or(&resume.skills.technical, DEFAULT_TECHNICAL_SKILLS),
        )
        .replace(
            "[LANGUAGES]",
            &join_or(&resume.skills.languages, DEFAULT_LANGUAGES),
        )
}

/// Escaped value, or the default when the field is blank. Defaults are
/// template-authored and contain nothing to escape.
fn value_or(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        escape_latex(value.trim())
    }
}

fn opt_value_or(value: Option<&str>, default: &str) -> String {
    value_or(value.unwrap_or(""), default)
}

fn join_or(items: &[String], default: &str) -> String {
    if items.is_empty() {
        default.to_string()
    } else {
        items
            .iter()
            .map(|item| escape_latex(item))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `start -- end` range text. `Present` replaces the end when the ongoing
/// flag is set; a stored end date is never rendered in that case.
fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = start.map(str::trim).unwrap_or("");
    let end = end.map(str::trim).unwrap_or("");
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} -- {end}"),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block rendering
// ────────────────────────────────────────────────────────────────────────────

fn render_experience(entries: &[ExperienceEntry], template: TemplateId) -> String {
    let blocks: Vec<String> = entries
        .iter()
        .map(|exp| {
            let range = date_range(Some(exp.start_date.as_str()), exp.effective_end());
            let description = escape_latex(exp.description.trim());
            match template {
                TemplateId::Modern => format!(
                    "\\cventry{{{range}}}{{{position}}}{{{company}}}{{{location}}}{{}}{{{description}}}",
                    position = escape_latex(&exp.position),
                    company = escape_latex(&exp.company),
                    location = escape_latex(&exp.location),
                ),
                TemplateId::Classic => format!(
                    "\\subsection{{{position} | {company} | {location} | {range}}}\n{description}",
                    position = escape_latex(&exp.position),
                    company = escape_latex(&exp.company),
                    location = escape_latex(&exp.location),
                ),
            }
        })
        .collect();
    blocks.join("\n\n")
}

fn render_education(entries: &[EducationEntry], template: TemplateId) -> String {
    let blocks: Vec<String> = entries
        .iter()
        .map(|edu| {
            let range = date_range(Some(edu.start_date.as_str()), edu.end_date.as_deref());
            let location = escape_latex(edu.location.as_deref().unwrap_or(""));
            let gpa = escape_latex(edu.gpa.as_deref().unwrap_or(""));
            match template {
                TemplateId::Modern => format!(
                    "\\cventry{{{range}}}{{{degree}}}{{{institution}}}{{{location}}}{{{gpa}}}{{{field}}}",
                    degree = escape_latex(&edu.degree),
                    institution = escape_latex(&edu.institution),
                    field = escape_latex(&edu.field),
                ),
                TemplateId::Classic => {
                    let mut block = format!(
                        "\\subsection{{{degree} | {institution} | {location} | {range}}}",
                        degree = escape_latex(&edu.degree),
                        institution = escape_latex(&edu.institution),
                    );
                    if !edu.field.trim().is_empty() {
                        block.push('\n');
                        block.push_str(&escape_latex(edu.field.trim()));
                    }
                    if !gpa.is_empty() {
                        block.push_str("\nGPA: ");
                        block.push_str(&gpa);
                    }
                    block
                }
            }
        })
        .collect();
    blocks.join("\n\n")
}

fn render_projects(entries: &[ProjectEntry], template: TemplateId) -> String {
    let blocks: Vec<String> = entries
        .iter()
        .map(|proj| {
            let range = date_range(proj.start_date.as_deref(), proj.effective_end());
            let technologies = if proj.technologies.is_empty() {
                EMPTY_TECHNOLOGIES.to_string()
            } else {
                proj.technologies
                    .iter()
                    .map(|t| escape_latex(t))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let description = escape_latex(proj.description.trim());
            match template {
                TemplateId::Modern => {
                    // The two unused cventry slots carry the project links so
                    // the parser can read them back.
                    let mut body = String::new();
                    if !description.is_empty() {
                        body.push_str(&description);
                        body.push('\n');
                    }
                    body.push_str("Technologies: ");
                    body.push_str(&technologies);
                    format!(
                        "\\cventry{{{range}}}{{{name}}}{{{url}}}{{{github}}}{{}}{{{body}}}",
                        name = escape_latex(&proj.name),
                        url = escape_latex(proj.url.as_deref().unwrap_or("")),
                        github = escape_latex(proj.github_url.as_deref().unwrap_or("")),
                    )
                }
                TemplateId::Classic => {
                    let name = escape_latex(&proj.name);
                    let mut block = if range.is_empty() {
                        format!("\\subsection{{{name}}}")
                    } else {
                        format!("\\subsection{{{name} | {range}}}")
                    };
                    if !description.is_empty() {
                        block.push('\n');
                        block.push_str(&description);
                    }
                    if let Some(url) = proj.url.as_deref().filter(|u| !u.trim().is_empty()) {
                        block.push_str("\nURL: ");
                        block.push_str(&escape_latex(url.trim()));
                    }
                    if let Some(github) = proj
                        .github_url
                        .as_deref()
                        .filter(|u| !u.trim().is_empty())
                    {
                        block.push_str("\nGitHub: ");
                        block.push_str(&escape_latex(github.trim()));
                    }
                    block.push_str("\nTechnologies: ");
                    block.push_str(&technologies);
                    block
                }
            }
        })
        .collect();
    blocks.join("\n\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
