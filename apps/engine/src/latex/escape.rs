//! LaTeX special-character escaping for user-supplied text.
//!
//! The generator runs every user value through `escape_latex` before
//! inserting it into a macro argument, and the parser applies
//! `unescape_latex` to every captured value, so the two stay inverses and
//! round-trip comparisons hold. Without this, inputs containing `%`, `&`,
//! or `_` would produce LaTeX that fails to compile.

/// Escapes the LaTeX special characters in `text`.
///
/// Backslash must be handled first or the replacements themselves would be
/// re-escaped.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '%' => out.push_str("\\%"),
            '&' => out.push_str("\\&"),
            '_' => out.push_str("\\_"),
            '#' => out.push_str("\\#"),
            '$' => out.push_str("\\$"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape_latex`].
///
/// Single-character escapes are unwound before the named commands so a
/// `\{` produced from a user brace is not mistaken for part of a command.
pub fn unescape_latex(text: &str) -> String {
    text.replace("\\{", "{")
        .replace("\\}", "}")
        .replace("\\%", "%")
        .replace("\\&", "&")
        .replace("\\_", "_")
        .replace("\\#", "#")
        .replace("\\$", "$")
        .replace("\\textasciitilde{}", "~")
        .replace("\\textasciicircum{}", "^")
        .replace("\\textbackslash{}", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_untouched() {
        let s = "Led a team of 12 engineers, shipping 3 releases.";
        assert_eq!(escape_latex(s), s);
        assert_eq!(unescape_latex(s), s);
    }

    #[test]
    fn test_specials_are_escaped() {
        assert_eq!(escape_latex("R&D"), "R\\&D");
        assert_eq!(escape_latex("95% uptime"), "95\\% uptime");
        assert_eq!(escape_latex("snake_case"), "snake\\_case");
        assert_eq!(escape_latex("#1 team"), "\\#1 team");
        assert_eq!(escape_latex("$2M budget"), "\\$2M budget");
    }

    #[test]
    fn test_braces_and_backslash() {
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let inputs = [
            "C# & F# devs earn ~100% more",
            "path\\to\\file_{v2}",
            "x^2 + $y$",
            "plain words",
        ];
        for input in inputs {
            assert_eq!(
                unescape_latex(&escape_latex(input)),
                input,
                "round-trip failed for {input:?}"
            );
        }
    }

    #[test]
    fn test_unescape_tolerates_unescaped_text() {
        // Rewritten LaTeX may contain text that was never escaped by us.
        assert_eq!(unescape_latex("plain, words"), "plain, words");
    }
}
