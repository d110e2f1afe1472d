//! Property tests over randomly shaped trees

use deptriples::codes::{Code, label, pos};
use deptriples::{
    BuildOptions, Document, Sentence, Token, build_tree, find_triples, find_triples_multi,
    find_verb_triples,
};
use proptest::prelude::*;

const LABELS: &[Code] = &[
    label::NSUBJ,
    label::NSUBJPASS,
    label::DOBJ,
    label::POBJ,
    label::PREP,
    label::DET,
];
const TAGS: &[Code] = &[pos::VERB, pos::NOUN, pos::ADP];

/// A single-sentence token list: token 0 is the root and every other token
/// attaches to an earlier one, so the heads form a tree.
fn sentence_tokens() -> impl Strategy<Value = Vec<Token>> {
    (1usize..24)
        .prop_flat_map(|n| {
            let heads: Vec<BoxedStrategy<usize>> =
                (0..n).map(|i| (0..i.max(1)).boxed()).collect();
            (
                heads,
                prop::collection::vec(prop::sample::select(LABELS), n),
                prop::collection::vec(prop::sample::select(TAGS), n),
            )
        })
        .prop_map(|(heads, labels, tags)| {
            heads
                .into_iter()
                .enumerate()
                .map(|(i, head)| {
                    let word = format!("w{}", i);
                    if i == 0 {
                        Token::new(0, &word, &word, tags[0], 0, label::ROOT)
                    } else {
                        Token::new(i, &word, &word, tags[i], head, labels[i])
                    }
                })
                .collect()
        })
}

fn document(tokens: &[Token]) -> Document {
    let root = build_tree(0, tokens, &BuildOptions::default());
    Document {
        language: "en".to_string(),
        sentences: vec![Sentence::new("generated", root)],
    }
}

proptest! {
    #[test]
    fn walk_visits_every_token_once(tokens in sentence_tokens()) {
        let tree = build_tree(0, &tokens, &BuildOptions::default());
        let mut seen: Vec<usize> = tree.walk().filter_map(|n| n.index).collect();
        seen.sort();
        prop_assert_eq!(seen, (0..tokens.len()).collect::<Vec<_>>());
    }

    #[test]
    fn walk_is_idempotent(tokens in sentence_tokens()) {
        let tree = build_tree(0, &tokens, &BuildOptions::default());
        let first: Vec<_> = tree.walk().map(|n| n.index).collect();
        let second: Vec<_> = tree.walk().map(|n| n.index).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn singleton_sets_match_single_criteria(
        tokens in sentence_tokens(),
        left in prop::sample::select(LABELS),
        head in prop::sample::select(TAGS),
        right in prop::sample::select(LABELS),
    ) {
        let doc = document(&tokens);
        let single: Vec<_> = find_triples(&doc, left, head, right).collect();
        let multi: Vec<_> = find_triples_multi(&doc, &[left], &[head], &[right]).collect();
        prop_assert_eq!(single, multi);
    }

    #[test]
    fn multi_is_concatenation_of_combinations(tokens in sentence_tokens()) {
        let doc = document(&tokens);
        let lefts = [label::NSUBJ, label::DET];
        let rights = [label::DOBJ, label::PREP];

        let multi: Vec<_> = find_triples_multi(&doc, &lefts, &[pos::VERB], &rights).collect();
        let mut expected = Vec::new();
        for &l in &lefts {
            for &r in &rights {
                expected.extend(find_triples(&doc, l, pos::VERB, r));
            }
        }
        prop_assert_eq!(multi, expected);
    }

    #[test]
    fn triples_are_parent_and_children(tokens in sentence_tokens()) {
        let doc = document(&tokens);
        for (l, h, r) in find_verb_triples(&doc, true, true) {
            prop_assert_eq!(h.pos_tag, pos::VERB);
            prop_assert!(h.children.iter().any(|c| std::ptr::eq(c, l)));
            prop_assert!(h.children.iter().any(|c| std::ptr::eq(c, r)));
        }
    }

    #[test]
    fn voices_compose(tokens in sentence_tokens()) {
        let doc = document(&tokens);
        let both: Vec<_> = find_verb_triples(&doc, true, true).collect();
        let split: Vec<_> = find_verb_triples(&doc, true, false)
            .chain(find_verb_triples(&doc, false, true))
            .collect();
        prop_assert_eq!(both, split);
    }

    #[test]
    fn no_matching_head_means_no_triples(tokens in sentence_tokens()) {
        let doc = document(&tokens);
        prop_assert_eq!(find_triples(&doc, label::NSUBJ, pos::AFFIX, label::DOBJ).count(), 0);
    }
}
