use compare_diff::{
    align, diff, new_text, old_text, AlignmentMode, ChangeKind, DiffConfig, Granularity,
};
use proptest::prelude::*;

fn granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![Just(Granularity::Character), Just(Granularity::Word)]
}

/// Small alphabets make shared tokens likely
fn text() -> impl Strategy<Value = String> {
    prop_oneof!["[ab ,.\n]{0,24}", "[a-z ]{0,40}", any::<String>()]
}

/// Length of the longest common subsequence of two character sequences
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table[a.len()][b.len()]
}

proptest! {
    #[test]
    fn spans_reconstruct_both_texts(old in text(), new in text(), g in granularity()) {
        let spans = diff(&old, &new, g);
        prop_assert_eq!(old_text(&spans), old);
        prop_assert_eq!(new_text(&spans), new);
    }

    #[test]
    fn spans_are_coalesced(old in text(), new in text(), g in granularity()) {
        let spans = diff(&old, &new, g);
        prop_assert!(spans.iter().all(|s| !s.value.is_empty()));
        for pair in spans.windows(2) {
            prop_assert_ne!(pair[0].kind, pair[1].kind);
            prop_assert!(!(pair[0].kind == ChangeKind::Added && pair[1].kind == ChangeKind::Removed));
        }
    }

    #[test]
    fn character_diff_is_minimal(old in "[abc]{0,12}", new in "[abc]{0,12}") {
        let spans = diff(&old, &new, Granularity::Character);
        let changed: usize = spans
            .iter()
            .filter(|s| s.is_change())
            .map(|s| s.value.chars().count())
            .sum();

        let a: Vec<char> = old.chars().collect();
        let b: Vec<char> = new.chars().collect();
        prop_assert_eq!(changed, a.len() + b.len() - 2 * lcs_len(&a, &b));
    }

    #[test]
    fn aligning_identical_texts_changes_nothing(text in text()) {
        let records = align(&text, &text);
        prop_assert_eq!(records.len(), text.split('\n').count());
        for (record, line) in records.iter().zip(text.split('\n')) {
            prop_assert_eq!(record.kind, ChangeKind::Unchanged);
            prop_assert_eq!(record.content(), line);
        }
    }

    #[test]
    fn positional_records_cover_both_sides(old in text(), new in text()) {
        let old_lines: Vec<&str> = old.split('\n').collect();
        let new_lines: Vec<&str> = new.split('\n').collect();
        let records = align(&old, &new);

        prop_assert_eq!(records.len(), old_lines.len().max(new_lines.len()));
        for (i, record) in records.iter().enumerate() {
            prop_assert_eq!(record.line_number, i + 1);
            prop_assert_eq!(record.old_content(), old_lines.get(i).copied().unwrap_or(""));
            prop_assert_eq!(record.content(), new_lines.get(i).copied().unwrap_or(""));
            prop_assert_ne!(record.kind, ChangeKind::Removed);
        }
    }

    #[test]
    fn lcs_records_preserve_every_line(old in text(), new in text()) {
        let config = DiffConfig::default().alignment(AlignmentMode::Lcs);
        let records = config.align(&old, &new).records;

        let old_side: Vec<String> = records
            .iter()
            .filter(|r| r.old_line.is_some())
            .map(|r| r.old_content())
            .collect();
        let new_side: Vec<String> = records
            .iter()
            .filter(|r| r.new_line.is_some())
            .map(|r| r.content())
            .collect();

        prop_assert_eq!(old_side.join("\n"), old);
        prop_assert_eq!(new_side.join("\n"), new);
    }
}
