//! The two fixed LaTeX skeletons and their default placeholder values.
//!
//! Insertion points are literal `[TOKEN]` strings replaced by the generator.
//! Every token has a default value so a partially filled resume still
//! produces syntactically complete LaTeX.

/// moderncv-based skeleton ("modern" template family).
pub const MODERN_TEMPLATE: &str = r"\documentclass[11pt,a4paper,sans]{moderncv}
\moderncvstyle{classic}
\moderncvcolor{blue}

\usepackage[scale=0.85]{geometry}
\usepackage{multicol}

% Personal data
\name{[FIRST_NAME]}{[LAST_NAME]}
\title{[JOB_ROLE]}
\address{[LOCATION]}{}{}
\phone{[PHONE]}
\email{[EMAIL]}
\social[linkedin]{[LINKEDIN]}
\social[github]{[GITHUB]}

\begin{document}
\makecvtitle

\section{Professional Summary}
\cvitem{}{[PROFESSIONAL_SUMMARY]}

\section{Experience}
[WORK_EXPERIENCE]

\section{Education}
[EDUCATION]

\section{Skills}
\cvitem{Technical}{[TECHNICAL_SKILLS]}
\cvitem{Languages}{[LANGUAGES]}

\section{Projects}
[PROJECTS]

\end{document}";

/// Plain-article skeleton ("classic" template family).
pub const CLASSIC_TEMPLATE: &str = r"\documentclass[11pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[margin=1in]{geometry}
\usepackage{enumitem}
\usepackage{titlesec}
\usepackage{hyperref}

\titleformat{\section}{\large\bfseries}{}{0em}{}[\titlerule]
\titleformat{\subsection}{\bfseries}{}{0em}{}

\begin{document}

\begin{center}
{\Large\bfseries [FIRST_NAME] [LAST_NAME]}\\
[JOB_ROLE]\\
[LOCATION] | [PHONE] | [EMAIL]\\
LinkedIn: [LINKEDIN] | GitHub: [GITHUB]
\end{center}

\section{Professional Summary}
[PROFESSIONAL_SUMMARY]

\section{Experience}
[WORK_EXPERIENCE]

\section{Education}
[EDUCATION]

\section{Skills}
\textbf{Technical Skills:} [TECHNICAL_SKILLS]\\
\textbf{Languages:} [LANGUAGES]

\section{Projects}
[PROJECTS]

\end{document}";

/// Every `[TOKEN]` the skeletons contain. The generator must resolve all of
/// them; tests assert none survive in the output.
pub const PLACEHOLDER_TOKENS: &[&str] = &[
    "[FIRST_NAME]",
    "[LAST_NAME]",
    "[JOB_ROLE]",
    "[LOCATION]",
    "[PHONE]",
    "[EMAIL]",
    "[LINKEDIN]",
    "[GITHUB]",
    "[PROFESSIONAL_SUMMARY]",
    "[WORK_EXPERIENCE]",
    "[EDUCATION]",
    "[TECHNICAL_SKILLS]",
    "[LANGUAGES]",
    "[PROJECTS]",
];

// Defaults substituted for empty fields. Kept in one place so the generator
// and its tests agree on the exact strings.
pub const DEFAULT_FIRST_NAME: &str = "John";
pub const DEFAULT_LAST_NAME: &str = "Doe";
pub const DEFAULT_JOB_ROLE: &str = "Professional";
pub const DEFAULT_LOCATION: &str = "City, Country";
pub const DEFAULT_PHONE: &str = "+1 (555) 123-4567";
pub const DEFAULT_EMAIL: &str = "john.doe@email.com";
pub const DEFAULT_LINKEDIN: &str = "linkedin.com/in/johndoe";
pub const DEFAULT_GITHUB: &str = "github.com/johndoe";
pub const DEFAULT_SUMMARY: &str =
    "Experienced professional with a strong background in technology and innovation.";
pub const DEFAULT_TECHNICAL_SKILLS: &str = "Programming, Software Development";
pub const DEFAULT_LANGUAGES: &str = "English";
/// Rendered on the `Technologies:` line when a project lists none.
pub const EMPTY_TECHNOLOGIES: &str = "N/A";
