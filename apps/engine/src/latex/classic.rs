//! Extraction routine for the classic (plain-article) template family.
//!
//! The classic grammar has no personal-data macros, so the header comes
//! from the centered title block line by line, and entries are
//! pipe-delimited `\subsection` headings followed by free-text bodies.
//! Also serves as the fallback routine when no moderncv marker is found;
//! on foreign input it simply extracts little or nothing.

use regex::Regex;
use tracing::warn;

use crate::latex::escape::unescape_latex;
use crate::latex::parser::{
    clean_capture, non_empty, normalize_description, parse_date_range, section_blocks, tech_list,
};
use crate::models::resume::{
    EducationEntry, ExperienceEntry, ParsedResume, ProjectEntry, TemplateId,
};

pub(crate) struct ClassicGrammar {
    center_block: Regex,
    name_line: Regex,
    subsection_header: Regex,
    technical_line: Regex,
    languages_line: Regex,
}

impl ClassicGrammar {
    pub fn new() -> Self {
        Self {
            center_block: compile(r"(?s)\\begin\{center\}(.*?)\\end\{center\}"),
            name_line: compile(r"\{\\Large\\bfseries\s+(.*?)\}"),
            subsection_header: compile(r"^\s*\{(.*?)\}"),
            technical_line: compile(r"\\textbf\{Technical Skills:\}(.*)"),
            languages_line: compile(r"\\textbf\{Languages:\}(.*)"),
        }
    }

    pub fn extract(&self, source: &str) -> ParsedResume {
        let mut parsed = ParsedResume {
            dialect: TemplateId::Classic,
            ..Default::default()
        };

        self.extract_personal(source, &mut parsed);

        let sections = section_blocks(source);

        if let Some(block) = sections.get("Professional Summary") {
            parsed.professional_summary = non_empty(unescape_latex(block).trim());
        }
        if let Some(block) = sections.get("Experience") {
            parsed.work_experience = self.extract_experience(block);
        }
        if let Some(block) = sections.get("Education") {
            parsed.education = self.extract_education(block);
        }
        if let Some(block) = sections.get("Skills") {
            if let Some(caps) = self.technical_line.captures(block) {
                parsed.skills.technical = skill_list(&caps[1]);
            }
            if let Some(caps) = self.languages_line.captures(block) {
                parsed.skills.languages = skill_list(&caps[1]);
            }
        }
        if let Some(block) = sections.get("Projects") {
            parsed.projects = self.extract_projects(block);
        }

        parsed
    }

    /// Reads the centered title block line by line: name, job-role line,
    /// `Location | Phone | Email`, `LinkedIn: ... | GitHub: ...`.
    fn extract_personal(&self, source: &str, parsed: &mut ParsedResume) {
        let Some(caps) = self.center_block.captures(source) else {
            return;
        };
        let block = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let info = &mut parsed.personal_info;

        for raw_line in block.lines() {
            let line = raw_line.trim().trim_end_matches("\\\\").trim();
            if line.is_empty() {
                continue;
            }
            if let Some(name_caps) = self.name_line.captures(line) {
                let full = unescape_latex(&name_caps[1]);
                match full.trim().split_once(' ') {
                    Some((first, rest)) => {
                        info.first_name = non_empty(first);
                        info.last_name = non_empty(rest);
                    }
                    None => info.first_name = non_empty(&full),
                }
            } else if line.contains("LinkedIn:") || line.contains("GitHub:") {
                for part in line.split('|').map(str::trim) {
                    if let Some(rest) = part.strip_prefix("LinkedIn:") {
                        info.linkedin = clean_capture(rest);
                    } else if let Some(rest) = part.strip_prefix("GitHub:") {
                        info.github = clean_capture(rest);
                    }
                }
            } else if line.matches('|').count() >= 2 {
                let parts: Vec<&str> = line.split('|').map(str::trim).collect();
                info.location = clean_capture(parts[0]);
                info.phone = clean_capture(parts[1]);
                info.email = clean_capture(parts[2]);
            } else if info.job_role.is_none()
                && !line.contains('|')
                && !line.starts_with('{')
                && !line.starts_with('\\')
            {
                info.job_role = clean_capture(line);
            }
        }
    }

    /// `\subsection{Position | Company | Location | range}` + body.
    fn extract_experience(&self, block: &str) -> Vec<ExperienceEntry> {
        self.subsections(block)
            .into_iter()
            .enumerate()
            .filter_map(|(i, (header, body))| {
                let parts: Vec<&str> = header.split('|').map(str::trim).collect();
                let (position, company, location, range_raw) = match parts.as_slice() {
                    [position, company, location, range] => {
                        (*position, *company, *location, *range)
                    }
                    [position, company, range] => (*position, *company, "", *range),
                    _ => {
                        warn!("skipping experience subsection {i}: unexpected header {header:?}");
                        return None;
                    }
                };
                let range = parse_date_range(range_raw);
                Some(ExperienceEntry {
                    company: clean_capture(company).unwrap_or_default(),
                    position: clean_capture(position).unwrap_or_default(),
                    location: clean_capture(location).unwrap_or_default(),
                    start_date: range.start.unwrap_or_default(),
                    end_date: range.end,
                    is_current: range.is_current,
                    description: normalize_description(&unescape_latex(body)),
                    sequence: i as u32,
                })
            })
            .collect()
    }

    /// `\subsection{Degree | Institution | Location | range}` + field/GPA lines.
    fn extract_education(&self, block: &str) -> Vec<EducationEntry> {
        self.subsections(block)
            .into_iter()
            .enumerate()
            .filter_map(|(i, (header, body))| {
                let parts: Vec<&str> = header.split('|').map(str::trim).collect();
                let (degree, institution, location, range_raw) = match parts.as_slice() {
                    [degree, institution, location, range] => {
                        (*degree, *institution, *location, *range)
                    }
                    [degree, institution, range] => (*degree, *institution, "", *range),
                    _ => {
                        warn!("skipping education subsection {i}: unexpected header {header:?}");
                        return None;
                    }
                };
                let range = parse_date_range(range_raw);

                let mut gpa = None;
                let mut field_lines: Vec<&str> = Vec::new();
                let body = unescape_latex(body);
                for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    if let Some(rest) = line.strip_prefix("GPA:") {
                        gpa = non_empty(rest);
                    } else {
                        field_lines.push(line);
                    }
                }

                Some(EducationEntry {
                    institution: clean_capture(institution).unwrap_or_default(),
                    degree: clean_capture(degree).unwrap_or_default(),
                    field: field_lines.join("\n"),
                    gpa,
                    start_date: range.start.unwrap_or_default(),
                    end_date: range.end,
                    location: clean_capture(location),
                    sequence: i as u32,
                })
            })
            .collect()
    }

    /// `\subsection{Name | range}` (or bare name) + description, link, and
    /// `Technologies:` lines.
    fn extract_projects(&self, block: &str) -> Vec<ProjectEntry> {
        self.subsections(block)
            .into_iter()
            .enumerate()
            .filter_map(|(i, (header, body))| {
                let parts: Vec<&str> = header.split('|').map(str::trim).collect();
                let (name_raw, range) = if parts.len() >= 2 {
                    (
                        parts[..parts.len() - 1].join(" | "),
                        parse_date_range(parts[parts.len() - 1]),
                    )
                } else {
                    (header.clone(), Default::default())
                };
                let name = clean_capture(&name_raw)?;

                let mut technologies = Vec::new();
                let mut url = None;
                let mut github_url = None;
                let mut description_lines: Vec<&str> = Vec::new();
                let body = unescape_latex(body);
                for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    if let Some(rest) = line.strip_prefix("Technologies:") {
                        technologies = tech_list(rest);
                    } else if let Some(rest) = line.strip_prefix("URL:") {
                        url = non_empty(rest);
                    } else if let Some(rest) = line.strip_prefix("GitHub:") {
                        github_url = non_empty(rest);
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
                    url,
                    github_url,
                    sequence: i as u32,
                })
            })
            .collect()
    }

    /// Splits a section block on `\subsection` markers, yielding each
    /// heading's raw brace content and the body up to the next marker.
    fn subsections<'a>(&self, block: &'a str) -> Vec<(String, &'a str)> {
        block
            .split("\\subsection")
            .skip(1)
            .filter_map(|chunk| {
                let caps = self.subsection_header.captures(chunk)?;
                let header = caps.get(1)?.as_str().to_string();
                let body = &chunk[caps.get(0)?.end()..];
                Some((header, body))
            })
            .collect()
    }
}

/// A labeled skill line's payload: strip the trailing `\\` line break, then
/// comma-split.
fn skill_list(raw: &str) -> Vec<String> {
    let raw = raw.trim().trim_end_matches("\\\\").trim();
    crate::latex::parser::split_comma_list(raw)
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static classic pattern compiles")
}
