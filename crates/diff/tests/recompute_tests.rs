use compare_diff::{
    inline, recompute, Degradation, DiffConfig, DiffView, EditSpan, Granularity, ViewMode,
};
use pretty_assertions::assert_eq;

#[test]
fn test_default_view_is_side_by_side() {
    let result = recompute("a\nb", "a\nc");

    let lines = result.lines().expect("side-by-side result");
    assert_eq!(lines.len(), 2);
    assert!(result.spans().is_none());
    assert!(result.has_changes());
    assert!(!result.is_degraded());

    let stats = result.line_stats().unwrap();
    assert_eq!((stats.unchanged, stats.added), (1, 1));
}

#[test]
fn test_inline_view_skips_line_splitting() {
    let config = DiffConfig::default().view(ViewMode::Inline);
    let result = config.recompute("abc\ndef", "abd\ndef");

    assert_eq!(
        result.view,
        DiffView::Inline(vec![
            EditSpan::unchanged("ab"),
            EditSpan::removed("c"),
            EditSpan::added("d"),
            EditSpan::unchanged("\ndef"),
        ])
    );
    assert!(result.line_stats().is_none());
}

#[test]
fn test_inline_empty_texts() {
    assert!(inline("", "", Granularity::Character).is_empty());

    let result = DiffConfig::default().view(ViewMode::Inline).recompute("", "");
    assert_eq!(result.spans().map(|spans| spans.len()), Some(0));
    assert!(!result.has_changes());
}

#[test]
fn test_inline_and_side_by_side_agree_on_single_line() {
    let config = DiffConfig::default()
        .granularity(Granularity::Word)
        .line_granularity(Granularity::Word);

    let side = config.recompute("the cat sat", "the dog sat");
    let single = config.clone().view(ViewMode::Inline).recompute("the cat sat", "the dog sat");

    assert_eq!(side.lines().unwrap()[0].spans, single.spans().unwrap());
}

#[test]
fn test_identical_inputs_have_no_changes() {
    let text = "one\ntwo\nthree\n";
    assert!(!recompute(text, text).has_changes());
    assert!(!DiffConfig::default()
        .view(ViewMode::Inline)
        .recompute(text, text)
        .has_changes());
}

#[test]
fn test_recompute_is_deterministic() {
    let config = DiffConfig::default();
    let old = "first\nsecond line here\nthird";
    let new = "first\nsecond line there\nfourth";
    assert_eq!(config.recompute(old, new), config.recompute(old, new));
}

#[test]
fn test_character_diff_coarsens_to_words() {
    let config = DiffConfig::default().max_tokens(5);
    let diff = config.diff_tokens("abcdefghij", "abcdefghiX", Granularity::Character);

    assert_eq!(
        diff.spans,
        vec![EditSpan::removed("abcdefghij"), EditSpan::added("abcdefghiX")]
    );
    assert_eq!(diff.degradation, Some(Degradation::CoarserGranularity));
}

#[test]
fn test_oversized_word_diff_replaces_middle() {
    let config = DiffConfig::default().max_tokens(2);
    let diff = config.diff_tokens("one two three", "one two four", Granularity::Word);

    assert_eq!(
        diff.spans,
        vec![
            EditSpan::unchanged("one two "),
            EditSpan::removed("three"),
            EditSpan::added("four"),
        ]
    );
    assert_eq!(diff.degradation, Some(Degradation::InputTooLarge));
}

#[test]
fn test_most_severe_degradation_wins() {
    let config = DiffConfig::default().max_tokens(2);
    let diff = config.diff_tokens("one two three", "one two four", Granularity::Character);
    assert_eq!(diff.degradation, Some(Degradation::InputTooLarge));

    assert!(Degradation::DeadlineExceeded < Degradation::CoarserGranularity);
    assert!(Degradation::CoarserGranularity < Degradation::InputTooLarge);
}

#[test]
fn test_side_by_side_reports_line_degradation() {
    let config = DiffConfig::default().max_tokens(3);
    let result = config.recompute("a b c d\nx", "a b c e\nx");

    assert_eq!(result.degradation, Some(Degradation::InputTooLarge));
    let lines = result.lines().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].content(), "a b c e");
    assert_eq!(lines[0].old_content(), "a b c d");
}

#[test]
fn test_trivial_cases_are_never_degraded() {
    let config = DiffConfig::default().max_tokens(0);
    let long = "word ".repeat(100);

    assert_eq!(config.diff_tokens(&long, &long, Granularity::Character).degradation, None);
    assert_eq!(config.diff_tokens("", &long, Granularity::Word).degradation, None);
}
