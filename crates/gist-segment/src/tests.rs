use crate::*;
use gist_core::{GistError, Sentence};

fn texts(sentences: &[Sentence]) -> Vec<&str> {
    sentences.iter().map(|s| s.text.as_str()).collect()
}

fn assert_tiles(paragraph: &str, sentences: &[Sentence]) {
    assert_eq!(sentences.first().unwrap().range.start, 0);
    assert_eq!(sentences.last().unwrap().range.end, paragraph.len());
    for w in sentences.windows(2) {
        assert_eq!(w[0].range.end, w[1].range.start);
    }
    for (i, s) in sentences.iter().enumerate() {
        assert_eq!(s.index, i);
        assert_eq!(&paragraph[s.content.clone()], s.text);
        assert!(s.range.start <= s.content.start && s.content.end <= s.range.end);
    }
}

// ========== Basic splitting ==========

#[test]
fn test_single_sentence() {
    let p = "The court dismissed the appeal.";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec![p]);
    assert_tiles(p, &s);
}

#[test]
fn test_multiple_sentences() {
    let p = "The appeal failed. The costs were awarded! Was that fair?";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["The appeal failed.", "The costs were awarded!", "Was that fair?"]);
    assert_tiles(p, &s);
}

#[test]
fn test_no_trailing_punctuation() {
    let p = "First sentence. Second without a stop";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["First sentence.", "Second without a stop"]);
}

#[test]
fn test_leading_and_trailing_whitespace() {
    let p = "   Leading space. Trailing space.   ";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["Leading space.", "Trailing space."]);
    assert_tiles(p, &s);
}

// ========== Abbreviations and numbers ==========

#[test]
fn test_title_abbreviation() {
    let p = "On 20 September 2002 the respondent Mr. Brown was registered as proprietor. The appellants objected.";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 2);
    assert!(s[0].text.contains("Mr. Brown"));
}

#[test]
fn test_legal_citation_abbreviations() {
    let p = "See Smith v. Jones at para. 12 and s. 58 of the Act. That was decisive.";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 2);
    assert!(s[0].text.ends_with("Act."));
}

#[test]
fn test_latin_abbreviations() {
    let p = "Several remedies, e.g. damages, were sought. None succeeded.";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["Several remedies, e.g. damages, were sought.", "None succeeded."]);
}

#[test]
fn test_dotted_abbreviation() {
    let p = "The rights passed to J.R.R. Tolkien Ltd. in 1990. The claim followed.";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["The rights passed to J.R.R. Tolkien Ltd. in 1990.", "The claim followed."]);
}

#[test]
fn test_ambiguous_word_ends_sentence() {
    for p in [
        "The court said no. The appeal failed.",
        "He studied art. Then he left.",
        "The hearing was set for Dec. The parties agreed.",
        "Costs were awarded to Co. Ltd. Nothing else was ordered.",
    ] {
        let s = segment(p).unwrap();
        assert_eq!(s.len(), 2, "{p}");
        assert_tiles(p, &s);
    }
    let s = segment("Costs were awarded to Co. Ltd. Nothing else was ordered.").unwrap();
    assert_eq!(s[0].text, "Costs were awarded to Co. Ltd.");
}

#[test]
fn test_ambiguous_abbreviation_before_citation() {
    for p in [
        "See No. 12 of the schedule.",
        "Art. 6 applies to the claim.",
        "The duty arises under s. 58 of the Act.",
        "The rules in Pt. IV apply.",
        "The award was made on 3 Dec. 2019 at the hearing.",
    ] {
        assert_eq!(segment(p).unwrap().len(), 1, "{p}");
    }
}

#[test]
fn test_pronoun_is_not_a_roman_numeral() {
    let s = segment("The court said no. I disagree.").unwrap();
    assert_eq!(texts(&s), vec!["The court said no.", "I disagree."]);
}

#[test]
fn test_custom_abbreviation_overrides_ambiguous() {
    let seg = RuleSegmenter::new().with_abbreviations(["art"]);
    assert_eq!(seg.segment("He studied art. Then he left.").unwrap().len(), 1);
}

#[test]
fn test_initials() {
    let p = "The judgment of J. Smith was upheld. Costs followed.";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 2);
    assert!(s[0].text.contains("J. Smith"));
}

#[test]
fn test_decimal_numbers() {
    let p = "The plot measured 3.5 hectares. It was sold.";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["The plot measured 3.5 hectares.", "It was sold."]);
}

#[test]
fn test_lowercase_continuation() {
    let p = "He shouted wow! and then left.";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 1);
}

#[test]
fn test_custom_abbreviation() {
    let seg = RuleSegmenter::new().with_abbreviations(["Cty."]);
    let s = seg.segment("The Cty. Court heard it. Then it ended.").unwrap();
    assert_eq!(s.len(), 2);
}

// ========== Quotation and punctuation runs ==========

#[test]
fn test_closing_quote_after_period() {
    let p = "He said \"The land is mine.\" The court disagreed.";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["He said \"The land is mine.\"", "The court disagreed."]);
}

#[test]
fn test_ellipsis() {
    let p = "The matter was left open... Nothing more was said.";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 2);
}

#[test]
fn test_stray_punctuation_joins_previous() {
    let p = "It ended. ... ";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s[0].text, "It ended. ...");
    assert_tiles(p, &s);
}

#[test]
fn test_leading_punctuation_joins_next() {
    let p = "... Then it began.";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s[0].text, p);
}

// ========== Blank lines ==========

#[test]
fn test_blank_line_is_hard_boundary() {
    let p = "A heading without a stop\n\nThe body follows here.";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["A heading without a stop", "The body follows here."]);
    assert_tiles(p, &s);
}

#[test]
fn test_leading_blank_lines() {
    let p = "\n\nText after blank lines.";
    let s = segment(p).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s[0].range.start, 0);
}

// ========== Errors ==========

#[test]
fn test_empty_input() {
    assert!(matches!(segment(""), Err(GistError::EmptyInput)));
    assert!(matches!(segment("  \n "), Err(GistError::EmptyInput)));
}

#[test]
fn test_punctuation_only_input() {
    assert!(matches!(segment("?!..."), Err(GistError::Segmentation(_))));
}

#[test]
fn test_unicode_offsets() {
    let p = "Le café était fermé. Il pleuvait.";
    let s = segment(p).unwrap();
    assert_eq!(texts(&s), vec!["Le café était fermé.", "Il pleuvait."]);
    assert_tiles(p, &s);
}
