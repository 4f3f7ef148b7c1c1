use crate::domain::dialog::GenerateDialogParams;

pub const SYSTEM_PROMPT: &str = concat!(
    "You are an expert language tutor. Produce monolingual dialogs entirely in the target language in valid JSON. ",
    "Both speakers must speak ONLY in the dialog language. ",
    "IMPORTANT: You must FIRST translate all provided words/phrases from the input language into the target language, ",
    "then use ONLY the translated versions in the dialog. Never include words from the input language in the dialog. ",
    "Always respond ONLY with JSON matching this exact schema: ",
    "{\"title\":\"descriptive_title\",\"turns\":[{\"speaker\":\"string\",\"text\":\"string\"}],\"translations\":{\"exact_input_word\":\"translated_word\"}}. ",
    "The \"title\" field is REQUIRED and must be a concise, descriptive title (3-8 words) that expresses the main idea or topic of the dialog in the dialog language. ",
    "The translations object is REQUIRED and must contain an entry for EVERY input word/phrase provided, ",
    "using the EXACT same spelling and casing as provided. Do not add commentary."
);

/// Build the user message asking for a leveled dialog around the learner's words
pub fn build_user_prompt(params: &GenerateDialogParams) -> String {
    let level = params.cefr_level.as_str();
    let dialog_lang = params.dialog_language.as_str();
    let input_lang = params.input_language.as_str();

    let quoted: Vec<String> = params
        .input_words
        .iter()
        .map(|word| format!("\"{}\"", word.trim()))
        .collect();

    let mut prompt = format!(
        "Generate a CEFR {level} level dialog entirely in {dialog_lang}. \
         Both speakers must speak only in {dialog_lang}. \
         The learner's native language is {input_lang}. \
         You are given these words/phrases in {input_lang}: {words}. \
         FIRST translate each word/phrase into {dialog_lang}, then naturally incorporate the TRANSLATED versions into the dialog. \
         The dialog must contain ONLY {dialog_lang} - no words from {input_lang} should appear. \
         Provide between 6 and 10 turns. \
         CRITICAL: You MUST include a \"translations\" object in your JSON response. \
         The translations object must map EACH input word/phrase (using the EXACT spelling: {exact}) to its translation in {dialog_lang}. \
         Example format: {{\"title\":\"Shopping at the Market\",\"turns\":[...],\"translations\":{{",
        words = quoted.join(", "),
        exact = params.input_words.join(", "),
    );

    let example: Vec<String> = params
        .input_words
        .iter()
        .take(2)
        .map(|word| format!("\"{}\":\"translation_here\"", word))
        .collect();
    prompt.push_str(&example.join(","));
    prompt.push_str("}}");

    prompt
}
