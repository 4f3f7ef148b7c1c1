use super::model::Dialog;
use chrono::{DateTime, Utc};
use std::fmt;

const TIMESTAMP_FORMAT: &str = "%d %b %y %H:%M UTC";
const FIRST_WORD_CHARS: usize = 15;

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("leveltalk-dialogs-{}.txt", now.format("%Y%m%d-%H%M%S"))
}

/// Plain-text study sheet listing each dialog's vocabulary and lines
pub fn render_text_export(dialogs: &[Dialog], generated_at: DateTime<Utc>) -> String {
    TextExport {
        dialogs,
        generated_at,
    }
    .to_string()
}

struct TextExport<'a> {
    dialogs: &'a [Dialog],
    generated_at: DateTime<Utc>,
}

impl fmt::Display for TextExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LevelTalk Dialog Export")?;
        writeln!(f, "=======================\n")?;
        writeln!(f, "Generated: {}", self.generated_at.format(TIMESTAMP_FORMAT))?;
        writeln!(f, "Total dialogs: {}\n", self.dialogs.len())?;

        for (index, dialog) in self.dialogs.iter().enumerate() {
            write_dialog(f, index + 1, dialog)?;
        }

        Ok(())
    }
}

fn write_dialog(f: &mut fmt::Formatter<'_>, number: usize, dialog: &Dialog) -> fmt::Result {
    writeln!(f, "Dialog {}: {}", number, display_name(dialog))?;
    writeln!(f, "{}", "-".repeat(40))?;
    writeln!(f, "ID: {}", dialog.id)?;
    writeln!(f, "Input Language: {}", dialog.input_language)?;
    writeln!(f, "Dialog Language: {}", dialog.dialog_language)?;
    writeln!(f, "CEFR Level: {}", dialog.cefr_level)?;
    writeln!(f, "Created: {}", dialog.created_at.format(TIMESTAMP_FORMAT))?;

    if !dialog.input_words.is_empty() {
        writeln!(f, "\nVocabulary:")?;
        for word in &dialog.input_words {
            match dialog.translations.get(word).filter(|t| !t.is_empty()) {
                Some(translation) => writeln!(f, "  {} → {}", word, translation)?,
                None => writeln!(f, "  {}", word)?,
            }
        }
    }

    writeln!(f, "\nDialog:")?;
    for turn in &dialog.turns {
        writeln!(f, "{}: {}", turn.speaker, turn.text)?;
    }
    write!(f, "\n\n")
}

fn display_name(dialog: &Dialog) -> String {
    if !dialog.title.trim().is_empty() {
        return dialog.title.clone();
    }

    let name = format!(
        "{}→{} {}",
        dialog.input_language.to_uppercase(),
        dialog.dialog_language.to_uppercase(),
        dialog.cefr_level
    );

    match dialog.input_words.first() {
        Some(word) => {
            let word = word.trim();
            let short = if word.chars().count() > FIRST_WORD_CHARS {
                format!("{}...", word.chars().take(FIRST_WORD_CHARS).collect::<String>())
            } else {
                word.to_string()
            };
            format!("{} - {}", name, short)
        }
        None => name,
    }
}
