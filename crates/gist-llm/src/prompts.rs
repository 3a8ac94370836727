//! Prompt templates sent to the language model.

use gist_core::Intensity;

/// Extractive shortener, standard strength.
pub const SHORTENER_TEMPLATE: &str = "For each sentence in the following paragraph from a legal document, delete phrases that are not the main subject, verb, or object of the sentence, or key modifiers/terms, while preserving the main meaning of the sentence as much as possible. Be aggressive in removing parentheticals, attached clauses, and details about dates/location. The length of the result should be at most 80 percent of the original length (you must delete at least 20% of the text). Important: Please make sure the result remains grammatical!!\n\"${paragraph}\"\n\nPlease do not add any new words or change words, only delete words.";

/// Extractive shortener for long sentences.
pub const AGGRESSIVE_SHORTENER_TEMPLATE: &str = "For each sentence in the following paragraph from a legal document, delete phrases that are not the main subject, verb, or object of the sentence, or key modifiers/terms, while preserving the main meaning of the sentence as much as possible. Be more aggressive in removing parentheticals, attached clauses, and details about dates/location. The length of the result should be at most 70 percent of the original length (you must delete at least 30% of the text). Important: Please make sure the result remains grammatical!!\n\"${paragraph}\"\n\nPlease do not add any new words or change words, only delete words.";

/// Letter-graded grammar check.
pub const GRAMMAR_TEMPLATE: &str = "Score the following paragraph from a legal document by how grammatical it is. Be strict in your evaluation - only mark as A if the text is fully grammatically correct with proper sentence structure, subject-verb agreement, and correct word order.\n\"${paragraph}\"\n\nAnswer A for grammatically correct, B for moderately grammatical (minor issues), and C for bad grammar (major grammatical errors). Only respond with one letter.";

/// Substitute `${name}` placeholders.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("${{{name}}}"), value);
    }
    out
}

pub fn shortener(text: &str, intensity: Intensity) -> String {
    let template = match intensity {
        Intensity::Standard => SHORTENER_TEMPLATE,
        Intensity::Aggressive => AGGRESSIVE_SHORTENER_TEMPLATE,
    };
    render(template, &[("paragraph", text)])
}

pub fn grammar_check(text: &str) -> String {
    render(GRAMMAR_TEMPLATE, &[("paragraph", text)])
}
