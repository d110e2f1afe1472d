//! Subject-verb-object triples
//!
//! Active voice: `NSUBJ <- VERB -> DOBJ | PREP`.
//! Passive voice: `NSUBJPASS <- VERB -> POBJ | PREP`.

use crate::codes::{Code, label, pos};
use crate::matcher::{MultiTriples, Source, Triple, find_triples_multi};
use crate::tree::TreeNode;

const ACTIVE_SUBJECTS: &[Code] = &[label::NSUBJ];
const ACTIVE_OBJECTS: &[Code] = &[label::DOBJ, label::PREP];
const PASSIVE_SUBJECTS: &[Code] = &[label::NSUBJPASS];
const PASSIVE_OBJECTS: &[Code] = &[label::POBJ, label::PREP];
const VERBS: &[Code] = &[pos::VERB];

/// Which voices to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceOptions {
    pub active: bool,
    pub passive: bool,
}

impl Default for VoiceOptions {
    fn default() -> Self {
        Self {
            active: true,
            passive: true,
        }
    }
}

/// Find verb-centered triples
///
/// All active-voice triples come before all passive-voice triples.
pub fn find_verb_triples<'a>(
    source: impl Into<Source<'a>>,
    active_voice: bool,
    passive_voice: bool,
) -> VerbTriples<'a> {
    find_verb_triples_with(
        source,
        VoiceOptions {
            active: active_voice,
            passive: passive_voice,
        },
    )
}

pub fn find_verb_triples_with<'a>(
    source: impl Into<Source<'a>>,
    voices: VoiceOptions,
) -> VerbTriples<'a> {
    let source = source.into();
    VerbTriples {
        active: voices
            .active
            .then(|| find_triples_multi(source, ACTIVE_SUBJECTS, VERBS, ACTIVE_OBJECTS)),
        passive: voices
            .passive
            .then(|| find_triples_multi(source, PASSIVE_SUBJECTS, VERBS, PASSIVE_OBJECTS)),
    }
}

/// Walk filter accepting verbs
///
/// ```
/// use deptriples::{TreeNode, codes::{label, pos}, verbs::verb_filter};
///
/// let tree = TreeNode::new(Some(0), "runs", "run", pos::VERB, label::ROOT);
/// assert_eq!(tree.filtered_walk(verb_filter).count(), 1);
/// ```
pub fn verb_filter(_root: &TreeNode, candidate: &TreeNode) -> bool {
    candidate.pos_tag == pos::VERB
}

/// Iterator returned by [`find_verb_triples`]
#[derive(Debug, Clone)]
pub struct VerbTriples<'a> {
    active: Option<MultiTriples<'a>>,
    passive: Option<MultiTriples<'a>>,
}

impl<'a> Iterator for VerbTriples<'a> {
    type Item = Triple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(triple) = self.active.as_mut().and_then(Iterator::next) {
            return Some(triple);
        }
        self.active = None;
        self.passive.as_mut().and_then(Iterator::next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Analysis, BuildOptions, Token, build_document, build_tree};
    use crate::tree::{Document, Sentence};

    fn words<'a>(triples: impl Iterator<Item = Triple<'a>>) -> Vec<(&'a str, &'a str, &'a str)> {
        triples
            .map(|(s, v, o)| (s.content.as_str(), v.content.as_str(), o.content.as_str()))
            .collect()
    }

    /// "The cat chased the mouse"
    fn cat_sentence() -> Sentence {
        let tokens = vec![
            Token::new(0, "The", "the", pos::DET, 1, label::DET),
            Token::new(1, "cat", "cat", pos::NOUN, 2, label::NSUBJ),
            Token::new(2, "chased", "chase", pos::VERB, 2, label::ROOT),
            Token::new(3, "the", "the", pos::DET, 4, label::DET),
            Token::new(4, "mouse", "mouse", pos::NOUN, 2, label::DOBJ),
        ];
        Sentence::new(
            "The cat chased the mouse",
            build_tree(2, &tokens, &BuildOptions::default()),
        )
    }

    /// "The cat chased the mouse. The mouse was chased by the dog."
    fn mixed_document() -> Document {
        let tokens = vec![
            Token::new(0, "The", "the", pos::DET, 1, label::DET),
            Token::new(1, "cat", "cat", pos::NOUN, 2, label::NSUBJ),
            Token::new(2, "chased", "chase", pos::VERB, 2, label::ROOT),
            Token::new(3, "the", "the", pos::DET, 4, label::DET),
            Token::new(4, "mouse", "mouse", pos::NOUN, 2, label::DOBJ),
            Token::new(5, ".", ".", pos::PUNCT, 2, label::P),
            Token::new(6, "The", "the", pos::DET, 7, label::DET),
            Token::new(7, "mouse", "mouse", pos::NOUN, 9, label::NSUBJPASS),
            Token::new(8, "was", "be", pos::VERB, 9, label::AUXPASS),
            Token::new(9, "chased", "chase", pos::VERB, 9, label::ROOT),
            Token::new(10, "by", "by", pos::ADP, 9, label::PREP),
            Token::new(11, "the", "the", pos::DET, 12, label::DET),
            Token::new(12, "dog", "dog", pos::NOUN, 10, label::POBJ),
            Token::new(13, ".", ".", pos::PUNCT, 9, label::P),
        ];
        build_document(
            &Analysis {
                language: "en".to_string(),
                sentences: vec![
                    "The cat chased the mouse.".to_string(),
                    "The mouse was chased by the dog.".to_string(),
                ],
                tokens,
            },
            &BuildOptions::default(),
        )
    }

    #[test]
    fn test_active_triple() {
        let sentence = cat_sentence();
        assert_eq!(
            words(find_verb_triples(&sentence, true, true)),
            vec![("cat", "chased", "mouse")]
        );
        assert_eq!(find_verb_triples(&sentence, false, true).count(), 0);
    }

    #[test]
    fn test_two_subjects_share_object() {
        let tokens = vec![
            Token::new(0, "Kim", "Kim", pos::NOUN, 3, label::NSUBJ),
            Token::new(1, "and", "and", pos::CONJ, 0, label::CC),
            Token::new(2, "Sandy", "Sandy", pos::NOUN, 3, label::NSUBJ),
            Token::new(3, "read", "read", pos::VERB, 3, label::ROOT),
            Token::new(4, "books", "book", pos::NOUN, 3, label::DOBJ),
        ];
        let sentence = Sentence::new(
            "Kim and Sandy read books",
            build_tree(3, &tokens, &BuildOptions::default()),
        );
        assert_eq!(
            words(find_verb_triples(&sentence, true, false)),
            vec![("Kim", "read", "books"), ("Sandy", "read", "books")]
        );
    }

    #[test]
    fn test_passive_triple() {
        let doc = mixed_document();
        assert_eq!(
            words(find_verb_triples(&doc, false, true)),
            vec![("mouse", "chased", "by")]
        );
    }

    #[test]
    fn test_active_before_passive() {
        let doc = mixed_document();
        assert_eq!(
            words(find_verb_triples(&doc, true, true)),
            vec![("cat", "chased", "mouse"), ("mouse", "chased", "by")]
        );
    }

    #[test]
    fn test_voice_composition() {
        let doc = mixed_document();
        let both: Vec<_> = find_verb_triples(&doc, true, true).collect();
        let concatenated: Vec<_> = find_verb_triples(&doc, true, false)
            .chain(find_verb_triples(&doc, false, true))
            .collect();
        assert_eq!(both, concatenated);
        assert_eq!(find_verb_triples(&doc, false, false).count(), 0);
    }

    #[test]
    fn test_voice_options_default_to_both() {
        let doc = mixed_document();
        let with_defaults: Vec<_> = find_verb_triples_with(&doc, VoiceOptions::default()).collect();
        let explicit: Vec<_> = find_verb_triples(&doc, true, true).collect();
        assert_eq!(with_defaults, explicit);
    }

    #[test]
    fn test_active_objects_before_prepositions() {
        // "Kim put books on shelves": DOBJ combination runs before PREP
        let tokens = vec![
            Token::new(0, "Kim", "Kim", pos::NOUN, 1, label::NSUBJ),
            Token::new(1, "put", "put", pos::VERB, 1, label::ROOT),
            Token::new(2, "books", "book", pos::NOUN, 1, label::DOBJ),
            Token::new(3, "on", "on", pos::ADP, 1, label::PREP),
            Token::new(4, "shelves", "shelf", pos::NOUN, 3, label::POBJ),
        ];
        let sentence = Sentence::new(
            "Kim put books on shelves",
            build_tree(1, &tokens, &BuildOptions::default()),
        );
        assert_eq!(
            words(find_verb_triples(&sentence, true, true)),
            vec![("Kim", "put", "books"), ("Kim", "put", "on")]
        );
    }

    #[test]
    fn test_verb_filter() {
        let doc = mixed_document();
        let verbs: Vec<_> = doc
            .sentences
            .iter()
            .flat_map(|s| s.root.filtered_walk(verb_filter))
            .map(|n| n.content.as_str())
            .collect();
        assert_eq!(verbs, vec!["chased", "chased", "was"]);
    }
}
