pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a translator. Translate the text to {target_language}. \
     You can use common abbreviations and technical terms \
     (e.g., LLM for Large Language Model, API for Application Programming Interface). \
     Only return the translated text without explanation or punctuation.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(target_language: &str) -> String {
    // {target_language} is a placeholder for string replacement, not a format argument
    SYSTEM_PROMPT_TEMPLATE.replace("{target_language}", language_name(target_language))
}

/// Expands the handful of codes people actually target for identifiers.
fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "zh" => "Chinese (Simplified)",
        "ja" => "Japanese",
        "de" => "German",
        "fr" => "French",
        "es" => "Spanish",
        other => other,
    }
}
