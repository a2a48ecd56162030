//! LineBreakIndexer / diff property tests
//!
//! Exercise the public API against a naive model of the same rules so host
//! integrations can rely on the line bookkeeping under arbitrary input.

use edittrack::{EditableTextModel, LineBreakIndexer, SoftWrapOffsets, TextChange, TextValue};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn text_with_newlines() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('\n'), Just(' '), Just('a'), Just('語')], 0..48)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

fn soft_offsets() -> impl Strategy<Value = SoftWrapOffsets> {
    proptest::collection::btree_set(0usize..56, 0..8)
}

/// 素朴な参照実装
fn naive_breaks(chars: &[char], soft: &SoftWrapOffsets) -> Vec<usize> {
    let mut hard: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(i, ch)| **ch == '\n' && i + 1 < chars.len())
        .map(|(i, _)| i + 1)
        .collect();
    let accepted_soft = soft.iter().copied().filter(|&i| {
        i >= 1
            && i < chars.len()
            && chars[i - 1] != '\n'
            && chars[i] != '\n'
            && (i < 2 || chars[i - 2] != '\n')
    });
    hard.extend(accepted_soft);
    hard.sort_unstable();
    hard
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn breaks_match_naive_model(text in text_with_newlines(), soft in soft_offsets()) {
        let value = TextValue::new(text);
        let mut indexer = LineBreakIndexer::new();
        let breaks = indexer.compute_breaks(&value, &soft).as_slice().to_vec();

        prop_assert_eq!(&breaks, &naive_breaks(value.chars(), &soft));
        prop_assert!(breaks.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn no_line_is_opened_next_to_a_hard_break(text in text_with_newlines(), soft in soft_offsets()) {
        let value = TextValue::new(text);
        let mut indexer = LineBreakIndexer::new();
        let breaks = indexer.compute_breaks(&value, &soft).as_slice().to_vec();
        let chars = value.chars();

        for &offset in &breaks {
            if chars[offset - 1] == '\n' {
                continue;
            }
            // soft breaks stay at least one character away from a hard break
            prop_assert!(chars[offset] != '\n');
            prop_assert!(offset < 2 || chars[offset - 2] != '\n');
        }
    }

    #[test]
    fn every_offset_lies_on_its_line(text in text_with_newlines(), soft in soft_offsets()) {
        let value = TextValue::new(text);
        let mut indexer = LineBreakIndexer::new();
        indexer.compute_breaks(&value, &soft);

        for offset in 0..=value.len() {
            let line = indexer.line_index_of(offset);
            prop_assert!(line < indexer.line_count());
            prop_assert!(indexer.line_start(line) <= offset);
            if line + 1 < indexer.line_count() {
                prop_assert!(offset < indexer.line_start(line + 1));
            }
            let range = indexer.line_range(line);
            prop_assert!(range.end <= value.len());
            prop_assert!(!value.slice(range).contains('\n'));
        }
    }

    #[test]
    fn recompute_only_on_change(text in text_with_newlines(), soft in soft_offsets()) {
        let value = TextValue::new(text);
        let mut indexer = LineBreakIndexer::new();
        let first = indexer.compute_breaks(&value, &soft).clone();
        let second = indexer.compute_breaks(&value, &soft).clone();

        prop_assert_eq!(first, second);
        prop_assert_eq!(indexer.computations(), 1);
    }

    #[test]
    fn diff_reconstructs_new_value(old in text_with_newlines(), new in text_with_newlines()) {
        let old_chars: Vec<char> = old.chars().collect();
        let new_chars: Vec<char> = new.chars().collect();
        let change = TextChange::from_chars(&old_chars, &new_chars);

        let mut rebuilt: Vec<char> = old_chars[..change.start].to_vec();
        rebuilt.extend_from_slice(&new_chars[change.start..change.new_end]);
        rebuilt.extend_from_slice(&old_chars[change.old_end..]);
        prop_assert_eq!(rebuilt, new_chars);
    }

    #[test]
    fn selection_is_always_ordered_and_in_bounds(
        text in text_with_newlines(),
        start in -64isize..128,
        end in -64isize..128,
    ) {
        let len = text.chars().count();
        let mut model = EditableTextModel::initialize("", 0, 0, false, true);
        let directive = model.update(text, start, end);

        prop_assert!(directive.new_selection.start <= directive.new_selection.end);
        prop_assert!(directive.new_selection.end <= len);
    }
}
