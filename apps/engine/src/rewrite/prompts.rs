// Prompt constants for the LaTeX rewrite collaborator.

/// System prompt for LaTeX resume editing. Enforces the JSON reply shape
/// the client parses (`summary` + `latexCode`).
pub const REWRITE_SYSTEM: &str = "You are an expert LaTeX resume editor and career advisor. \
    Your task is to modify LaTeX resume code based on user requests.\n\
    \n\
    CRITICAL REQUIREMENTS:\n\
    1. You must return a JSON response with exactly this structure:\n\
    {\"summary\": \"brief description of what was changed\", \"latexCode\": \"the complete modified LaTeX code\"}\n\
    2. The latexCode field must contain complete, valid LaTeX code that compiles\n\
    3. The summary field should be a concise, specific description of the modifications made\n\
    4. Do not include any other text outside the JSON structure\n\
    5. Ensure the LaTeX code is properly formatted and escaped\n\
    \n\
    GUIDELINES:\n\
    - Maintain document structure and professional formatting\n\
    - Preserve essential LaTeX commands and packages\n\
    - Focus on content improvements while keeping structure intact\n\
    - Optimize for ATS compatibility with relevant keywords when asked";

/// User prompt template. Replace `{instruction}`, `{latex_source}`, and
/// `{short_input_note}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"User Request: "{instruction}"

Current LaTeX Code:
{latex_source}

Please modify the LaTeX code according to the user's request and return the result in the specified JSON format.
{short_input_note}"#;

/// Appended when the stored source is too short to be a real document
/// (e.g. a bare template name).
pub const SHORT_INPUT_NOTE: &str = "Note: The current code appears to be a template name. \
    Please generate a complete professional LaTeX resume incorporating the user's request.";

/// Change summary used when the reply carries none.
pub const FALLBACK_SUMMARY: &str = "Modified LaTeX code according to your request";
