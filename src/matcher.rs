//! Triple matching over sentences and documents
//!
//! A triple is `(left, head, right)` where `left` and `right` are direct
//! children of `head`. `head` is selected by part-of-speech tag, the two
//! dependents by dependency label.

use crate::codes::Code;
use crate::tree::{Document, Sentence, TreeNode, Walk};
use std::any::Any;
use std::slice;
use thiserror::Error;

/// A matched `(left, head, right)` triple
pub type Triple<'a> = (&'a TreeNode, &'a TreeNode, &'a TreeNode);

/// Error during matching
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// The sentences a matcher runs over
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Sentence(&'a Sentence),
    Document(&'a Document),
}

impl<'a> Source<'a> {
    /// Sentences in document order
    pub fn sentences(&self) -> &'a [Sentence] {
        match *self {
            Source::Sentence(sentence) => slice::from_ref(sentence),
            Source::Document(doc) => &doc.sentences,
        }
    }
}

impl<'a> From<&'a Sentence> for Source<'a> {
    fn from(sentence: &'a Sentence) -> Self {
        Source::Sentence(sentence)
    }
}

impl<'a> From<&'a Document> for Source<'a> {
    fn from(doc: &'a Document) -> Self {
        Source::Document(doc)
    }
}

/// Accepts only a `Document` or a `Sentence`
impl<'a> TryFrom<&'a dyn Any> for Source<'a> {
    type Error = MatchError;

    fn try_from(value: &'a dyn Any) -> Result<Self, Self::Error> {
        if let Some(doc) = value.downcast_ref::<Document>() {
            Ok(Source::Document(doc))
        } else if let Some(sentence) = value.downcast_ref::<Sentence>() {
            Ok(Source::Sentence(sentence))
        } else {
            Err(MatchError::InvalidArgument(
                "expected a Document or a Sentence".to_string(),
            ))
        }
    }
}

/// Find all triples matching a single set of criteria
///
/// Heads are visited sentence by sentence in pre-order; for each head the
/// triples are the cross product of its `left_label` children and its
/// `right_label` children, both in child order. A child labeled
/// `left_label` is never used as a right dependent.
pub fn find_triples<'a>(
    source: impl Into<Source<'a>>,
    left_label: Code,
    head_pos_tag: Code,
    right_label: Code,
) -> Triples<'a> {
    Triples::new(source.into(), left_label, head_pos_tag, right_label)
}

/// Find triples for every combination of the given criteria
///
/// Combinations are tried with `left_labels` outermost and `right_labels`
/// innermost; all results of one combination come before the next.
pub fn find_triples_multi<'a>(
    source: impl Into<Source<'a>>,
    left_labels: &[Code],
    head_pos_tags: &[Code],
    right_labels: &[Code],
) -> MultiTriples<'a> {
    let mut combinations = Vec::new();
    for &left in left_labels {
        for &head in head_pos_tags {
            for &right in right_labels {
                combinations.push((left, head, right));
            }
        }
    }

    MultiTriples {
        source: source.into(),
        combinations: combinations.into_iter(),
        current: None,
    }
}

/// Iterator returned by [`find_triples`]
#[derive(Debug, Clone)]
pub struct Triples<'a> {
    sentences: slice::Iter<'a, Sentence>,
    walk: Option<Walk<'a>>,
    head: Option<&'a TreeNode>,
    /// Cursor into `head.children` for the left and right dependents
    left: usize,
    right: usize,
    left_label: Code,
    head_pos_tag: Code,
    right_label: Code,
}

impl<'a> Triples<'a> {
    fn new(source: Source<'a>, left_label: Code, head_pos_tag: Code, right_label: Code) -> Self {
        Self {
            sentences: source.sentences().iter(),
            walk: None,
            head: None,
            left: 0,
            right: 0,
            left_label,
            head_pos_tag,
            right_label,
        }
    }

    /// Next triple under the current head, if any
    fn next_for_head(&mut self, head: &'a TreeNode) -> Option<Triple<'a>> {
        let children = &head.children;
        while self.left < children.len() {
            let left = &children[self.left];
            if left.label == self.left_label {
                while self.right < children.len() {
                    let right = &children[self.right];
                    self.right += 1;
                    if right.label == self.right_label && right.label != self.left_label {
                        return Some((left, head, right));
                    }
                }
            }
            self.left += 1;
            self.right = 0;
        }
        None
    }
}

impl<'a> Iterator for Triples<'a> {
    type Item = Triple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(head) = self.head {
                if let Some(triple) = self.next_for_head(head) {
                    return Some(triple);
                }
                self.head = None;
            }

            let head_pos_tag = self.head_pos_tag;
            let next_head = self
                .walk
                .as_mut()
                .and_then(|walk| walk.find(|node| node.pos_tag == head_pos_tag));
            match next_head {
                Some(node) => {
                    self.head = Some(node);
                    self.left = 0;
                    self.right = 0;
                }
                None => {
                    let sentence = self.sentences.next()?;
                    self.walk = Some(sentence.walk());
                }
            }
        }
    }
}

/// Iterator returned by [`find_triples_multi`]
#[derive(Debug, Clone)]
pub struct MultiTriples<'a> {
    source: Source<'a>,
    combinations: std::vec::IntoIter<(Code, Code, Code)>,
    current: Option<Triples<'a>>,
}

impl<'a> Iterator for MultiTriples<'a> {
    type Item = Triple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(triple) = self.current.as_mut().and_then(Iterator::next) {
                return Some(triple);
            }
            let (left, head, right) = self.combinations.next()?;
            self.current = Some(Triples::new(self.source, left, head, right));
        }
    }
}
