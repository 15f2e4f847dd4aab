// Prompt templates for the rewrite collaborator.

/// Rewrite prompt. Replace `{context}` and `{content}` before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = "As an expert resume writer, rewrite the following \
    {context} content to be more professional, impact-oriented, and include strong action verbs. \
    Keep the length similar. Content: \"{content}\"";

/// Summary prompt. Replace `{experiences}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Based on the following work experiences, write a \
    compelling, 3-sentence professional summary for a resume: \"{experiences}\"";

pub fn optimize_prompt(content: &str, context_label: &str) -> String {
    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{context}", context_label)
        .replace("{content}", content)
}

pub fn summary_prompt(experiences: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{experiences}", experiences)
}
