/// OpenAI speech voice used for a dialog language when none is configured
pub fn openai_voice_for_language(language: &str) -> &'static str {
    match language.trim().to_lowercase().as_str() {
        "en" => "alloy",
        "es" => "echo",
        "fr" => "nova",
        "de" => "onyx",
        "it" => "fable",
        "pt" => "shimmer",
        "ru" => "onyx",
        "fi" => "nova",
        _ => "alloy",
    }
}
