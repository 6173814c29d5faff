//! Extraction routine for the moderncv template family.
//!
//! Anchored to the literal macros the generator emits: `\name{}{}`,
//! `\email{}`, `\cventry` with six arguments, labeled `\cvitem`s. Compiled
//! patterns live on the grammar struct so one construction serves every
//! section step.

use regex::Regex;
use tracing::warn;

use crate::latex::escape::unescape_latex;
use crate::latex::parser::{
    clean_capture, normalize_description, parse_date_range, section_blocks, split_comma_list,
    tech_list,
};
use crate::models::resume::{
    EducationEntry, ExperienceEntry, ParsedResume, ProjectEntry, TemplateId,
};

pub(crate) struct ModernGrammar {
    name: Regex,
    title: Regex,
    address: Regex,
    phone: Regex,
    email: Regex,
    social_linkedin: Regex,
    social_github: Regex,
    summary_item: Regex,
    technical_item: Regex,
    languages_item: Regex,
    cventry: Regex,
}

impl ModernGrammar {
    pub fn new() -> Self {
        Self {
            name: compile(r"\\name\{(.*?)\}\{(.*?)\}"),
            title: compile(r"\\title\{(.*?)\}"),
            address: compile(r"\\address\{(.*?)\}\{(.*?)\}\{(.*?)\}"),
            phone: compile(r"\\phone\{(.*?)\}"),
            email: compile(r"\\email\{(.*?)\}"),
            social_linkedin: compile(r"\\social\[linkedin\]\{(.*?)\}"),
            social_github: compile(r"\\social\[github\]\{(.*?)\}"),
            summary_item: compile(r"(?s)\\cvitem\{\}\{(.*?)\}"),
            technical_item: compile(r"\\cvitem\{Technical\}\{(.*?)\}"),
            languages_item: compile(r"\\cvitem\{Languages\}\{(.*?)\}"),
            cventry: compile(r"(?s)\\cventry\{(.*?)\}\{(.*?)\}\{(.*?)\}\{(.*?)\}\{(.*?)\}\{(.*?)\}"),
        }
    }

    /// Runs every extraction step; each one is independent and a miss in
    /// one never aborts the others.
    pub fn extract(&self, source: &str) -> ParsedResume {
        let mut parsed = ParsedResume {
            dialect: TemplateId::Modern,
            ..Default::default()
        };

        self.extract_personal(source, &mut parsed);

        let sections = section_blocks(source);

        if let Some(block) = sections.get("Professional Summary") {
            if let Some(caps) = self.summary_item.captures(block) {
                parsed.professional_summary = clean_capture(&caps[1]);
            }
        }
        if let Some(block) = sections.get("Experience") {
            parsed.work_experience = self.extract_experience(block);
        }
        if let Some(block) = sections.get("Education") {
            parsed.education = self.extract_education(block);
        }
        if let Some(block) = sections.get("Skills") {
            if let Some(caps) = self.technical_item.captures(block) {
                parsed.skills.technical = split_comma_list(&caps[1]);
            }
            if let Some(caps) = self.languages_item.captures(block) {
                parsed.skills.languages = split_comma_list(&caps[1]);
            }
            // Soft skills have no emission point in this grammar; they are
            // deliberately never extracted.
        }
        if let Some(block) = sections.get("Projects") {
            parsed.projects = self.extract_projects(block);
        }

        parsed
    }

    fn extract_personal(&self, source: &str, parsed: &mut ParsedResume) {
        if let Some(caps) = self.name.captures(source) {
            parsed.personal_info.first_name = clean_capture(&caps[1]);
            parsed.personal_info.last_name = clean_capture(&caps[2]);
        }
        if let Some(caps) = self.title.captures(source) {
            parsed.personal_info.job_role = clean_capture(&caps[1]);
        }
        if let Some(caps) = self.address.captures(source) {
            // First argument carries the location; the other two are unused
            // by the skeleton.
            parsed.personal_info.location = clean_capture(&caps[1]);
        }
        if let Some(caps) = self.phone.captures(source) {
            parsed.personal_info.phone = clean_capture(&caps[1]);
        }
        if let Some(caps) = self.email.captures(source) {
            parsed.personal_info.email = clean_capture(&caps[1]);
        }
        if let Some(caps) = self.social_linkedin.captures(source) {
            parsed.personal_info.linkedin = clean_capture(&caps[1]);
        }
        if let Some(caps) = self.social_github.captures(source) {
            parsed.personal_info.github = clean_capture(&caps[1]);
        }
    }

    /// `\cventry{range}{position}{company}{location}{}{description}`
    fn extract_experience(&self, block: &str) -> Vec<ExperienceEntry> {
        self.cventry
            .captures_iter(block)
            .enumerate()
            .filter_map(|(i, caps)| {
                let range = parse_date_range(&caps[1]);
                let position = clean_capture(&caps[2]);
                let company = clean_capture(&caps[3]);
                if position.is_none() && company.is_none() {
                    warn!("skipping experience entry {i}: no position or company");
                    return None;
                }
                Some(ExperienceEntry {
                    company: company.unwrap_or_default(),
                    position: position.unwrap_or_default(),
                    location: clean_capture(&caps[4]).unwrap_or_default(),
                    start_date: range.start.unwrap_or_default(),
                    end_date: range.end,
                    is_current: range.is_current,
                    description: normalize_description(&unescape_latex(&caps[6])),
                    sequence: i as u32,
                })
            })
            .collect()
    }

    /// `\cventry{range}{degree}{institution}{location}{gpa}{field}`
    fn extract_education(&self, block: &str) -> Vec<EducationEntry> {
        self.cventry
            .captures_iter(block)
            .enumerate()
            .filter_map(|(i, caps)| {
                let range = parse_date_range(&caps[1]);
                let degree = clean_capture(&caps[2]);
                let institution = clean_capture(&caps[3]);
                if degree.is_none() && institution.is_none() {
                    warn!("skipping education entry {i}: no degree or institution");
                    return None;
                }
                Some(EducationEntry {
                    institution: institution.unwrap_or_default(),
                    degree: degree.unwrap_or_default(),
                    field: clean_capture(&caps[6]).unwrap_or_default(),
                    gpa: clean_capture(&caps[5]),
                    start_date: range.start.unwrap_or_default(),
                    end_date: range.end,
                    location: clean_capture(&caps[4]),
                    sequence: i as u32,
                })
            })
            .collect()
    }

    /// `\cventry{range}{name}{url}{github}{}{description + Technologies line}`
    fn extract_projects(&self, block: &str) -> Vec<ProjectEntry> {
        self.cventry
            .captures_iter(block)
            .enumerate()
            .filter_map(|(i, caps)| {
                let name = clean_capture(&caps[2])?;
                let range = parse_date_range(&caps[1]);
                let body = unescape_latex(&caps[6]);

                let mut technologies = Vec::new();
                let mut description_lines = Vec::new();
                for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    if let Some(rest) = line.strip_prefix("Technologies:") {
                        technologies = tech_list(rest);
                    } else {
                        description_lines.push(line);
                    }
                }

                Some(ProjectEntry {
                    name,
                    description: normalize_description(&description_lines.join("\n")),
                    technologies,
                    start_date: range.start,
                    end_date: range.end,
                    is_ongoing: range.is_current,
                    url: clean_capture(&caps[3]),
                    github_url: clean_capture(&caps[4]),
                    sequence: i as u32,
                })
            })
            .collect()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static moderncv pattern compiles")
}
