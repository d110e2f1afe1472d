//! Deptriples: dependency trees and triple extraction
//!
//! Rebuilds dependency trees from the flat, head-indexed token lists that
//! syntactic analyzers produce, and finds labeled `(left, head, right)`
//! triples in them, such as subject-verb-object.

pub mod builder; // Tree reconstruction from head-indexed tokens
pub mod codes; // Part-of-speech and label codes, name tables
pub mod conllu; // CoNLL-U input
pub mod matcher; // Generic and multi-criteria triple matching
pub mod tree; // Tree, sentence and document model, traversal
pub mod verbs; // Subject-verb-object extraction

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use builder::{Analysis, BuildOptions, Token, build_document, build_tree};
pub use codes::{Code, CodeTable, Vocabulary};
pub use conllu::{ParseError, parse_conllu, read_conllu_file};
pub use matcher::{MatchError, Source, Triple, find_triples, find_triples_multi};
pub use tree::{Document, Sentence, TreeNode};
pub use verbs::{VoiceOptions, find_verb_triples, verb_filter};
