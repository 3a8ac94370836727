use crate::config::*;
use crate::diff::*;
use crate::text::*;
use crate::types::*;
use crate::GistError;

// ========== Tokenizer ==========

#[test]
fn test_tokenize_offsets() {
    let text = "  The respondent,  Mr Brown.";
    let tokens = tokenize(text);
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].text, "The");
    assert_eq!(tokens[0].range, 2..5);
    assert_eq!(&text[tokens[1].range.clone()], "respondent,");
    assert_eq!(tokens[3].range.end, text.len());
}

#[test]
fn test_tokenize_empty() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" \n\t ").is_empty());
}

#[test]
fn test_tokenize_unicode() {
    let text = "café — naïve";
    let tokens = tokenize(text);
    assert_eq!(tokens.len(), 3);
    assert_eq!(&text[tokens[2].range.clone()], "naïve");
}

#[test]
fn test_normalize() {
    assert_eq!(normalize("Land."), "land");
    assert_eq!(normalize("\"Brown,\""), "brown");
    assert_eq!(normalize("(2002)"), "2002");
    assert_eq!(normalize("—"), "—");
    assert_eq!(normalize("don't"), "don't");
}

#[test]
fn test_strip_wrapping_quotes() {
    assert_eq!(strip_wrapping_quotes("\"hello world\""), "hello world");
    assert_eq!(strip_wrapping_quotes("  \u{201C}quoted\u{201D} "), "quoted");
    assert_eq!(strip_wrapping_quotes("plain"), "plain");
    assert_eq!(strip_wrapping_quotes("\""), "");
}

#[test]
fn test_char_offset() {
    let text = "né le";
    assert_eq!(char_offset(text, 3), 2);
    assert_eq!(char_offset(text, text.len()), 5);
}

// ========== Alignment ==========

fn k(s: &str) -> Vec<String> {
    keys(s)
}

#[test]
fn test_align_subsequence() {
    let pairs = align_words(&k("a b c d e"), &k("a c e"));
    assert_eq!(pairs, vec![(0, 0), (2, 1), (4, 2)]);
}

#[test]
fn test_align_empty() {
    assert!(align_words(&k(""), &k("a b")).is_empty());
    assert!(align_words(&k("a b"), &k("")).is_empty());
}

#[test]
fn test_align_prefers_contiguous_duplicates() {
    // "the" appears twice in the parent; the surviving "the land" must claim the
    // second occurrence because it is contiguous with "land".
    let parent = k("the owner of the land");
    let child = k("the land");
    let pairs = align_words(&parent, &child);
    assert_eq!(pairs, vec![(3, 0), (4, 1)]);
}

#[test]
fn test_align_ignores_case_and_punctuation() {
    let pairs = align_words(&k("On Monday, the court ruled."), &k("the court ruled"));
    assert_eq!(pairs, vec![(2, 0), (3, 1), (4, 2)]);
}

#[test]
fn test_align_with_reordering_recovers_moved_word() {
    let parent = k("yesterday the court ruled");
    let child = k("the court ruled yesterday");
    let pairs = align_with_reordering(&parent, &child);
    assert_eq!(pairs.len(), 4);
    assert!(pairs.contains(&(0, 3)));
}

#[test]
fn test_opcodes_kinds() {
    let ops = opcodes(&k("the big red dog barked"), &k("the small dog barked loudly"));
    let kinds: Vec<OpKind> = ops.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, vec![OpKind::Equal, OpKind::Replace, OpKind::Equal, OpKind::Insert]);
    assert_eq!(ops[1].a, 1..3);
    assert_eq!(ops[1].b, 1..2);
}

#[test]
fn test_opcodes_pure_deletion() {
    let ops = opcodes(&k("a b c"), &k("a c"));
    assert!(ops.iter().all(|o| o.kind != OpKind::Insert && o.kind != OpKind::Replace));
    assert!(ops.iter().any(|o| o.kind == OpKind::Delete));
}

// ========== Config ==========

#[test]
fn test_default_config_is_valid() {
    assert!(EngineConfig::default().validate().is_ok());
    assert!(EngineConfig::reduced_latency().validate().is_ok());
}

#[test]
fn test_presets_differ_only_in_variant_knobs() {
    let full = EngineConfig::full();
    let lite = EngineConfig::reduced_latency();
    assert!(full.enable_grammaticality_scoring);
    assert!(!lite.enable_grammaticality_scoring);
    assert!(lite.max_depth < full.max_depth);
    assert!(lite.candidates_per_depth < full.candidates_per_depth);
    assert_eq!(full.weights, lite.weights);
}

#[test]
fn test_partial_toml() {
    let cfg = EngineConfig::from_toml_str(
        "max_depth = 2\n[retry]\nmax_attempts = 5\n",
    ).unwrap();
    assert_eq!(cfg.max_depth, 2);
    assert_eq!(cfg.retry.max_attempts, 5);
    assert_eq!(cfg.retry.base_delay_ms, RetryConfig::default().base_delay_ms);
    assert_eq!(cfg.candidates_per_depth, 3);
}

#[test]
fn test_embedding_model_configurable() {
    assert_eq!(EngineConfig::default().model.embedding_model, "text-embedding-3-small");
    let cfg = EngineConfig::from_toml_str("[model]\nembedding_model = \"legal-embed\"\n").unwrap();
    assert_eq!(cfg.model.embedding_model, "legal-embed");
    assert_eq!(cfg.model.model, "gpt-3.5-turbo");
}

#[test]
fn test_invalid_gate_rejected() {
    let err = EngineConfig::from_toml_str("grammaticality_gate = 1.5").unwrap_err();
    assert!(matches!(err, GistError::InvalidConfig(_)));
}

#[test]
fn test_malformed_toml() {
    let err = EngineConfig::from_toml_str("max_depth = \"deep\"").unwrap_err();
    assert!(matches!(err, GistError::ConfigParse(_)));
}

#[test]
fn test_effective_depth() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.effective_depth(None), 4);
    assert_eq!(cfg.effective_depth(Some(2)), 2);
    assert_eq!(cfg.effective_depth(Some(9)), 4);
}

#[test]
fn test_input_error_classification() {
    assert!(GistError::EmptyInput.is_input_error());
    assert!(GistError::Segmentation("x".into()).is_input_error());
    assert!(!GistError::ServiceExhausted { sentences: 1 }.is_input_error());
}

// ========== Types ==========

#[test]
fn test_candidate_reduction() {
    let c = Candidate {
        rank: 0,
        raw: "ab".into(),
        text: "ab".into(),
        scores: Scores { semantic: 1.0, grammaticality: None, paraphrase: 1.0 },
        length_score: 0.0,
        composite: 0.0,
    };
    assert!((c.reduction("abcd") - 0.5).abs() < 1e-9);
    assert_eq!(c.reduction(""), 0.0);
}

#[test]
fn test_termination_serde() {
    let json = serde_json::to_string(&Termination::GateRejected).unwrap();
    assert_eq!(json, "\"gate_rejected\"");
    assert_eq!(serde_json::to_string(&Termination::ScoringFailed).unwrap(), "\"scoring_failed\"");
}
