//! Reconstruction of dependency trees from flat, head-indexed tokens
//!
//! An external analyzer produces a flat token list in which every token
//! names the index of its syntactic head. The sentence root carries the
//! ROOT label and, by convention, names itself as its head.

use crate::codes::{Code, label, standard_label_name};
use crate::tree::{Document, Sentence, TreeNode};
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

/// One token record as produced by the analyzer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    pub content: String,
    pub lemma: String,
    pub pos_tag: Code,
    pub head_index: usize,
    pub label: Code,
}

impl Token {
    pub fn new(
        index: usize,
        content: &str,
        lemma: &str,
        pos_tag: Code,
        head_index: usize,
        label: Code,
    ) -> Self {
        Self {
            index,
            content: content.to_string(),
            lemma: lemma.to_string(),
            pos_tag,
            head_index,
            label,
        }
    }

    /// True for the sentence root token
    pub fn is_root(&self) -> bool {
        self.label == label::ROOT
    }
}

/// Analyzer output for a whole text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub language: String,
    /// Sentence texts in order
    pub sentences: Vec<String>,
    /// Tokens of all sentences, indexed document-wide
    pub tokens: Vec<Token>,
}

/// Options for tree construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Log every created node at debug level
    pub trace: bool,
}

impl BuildOptions {
    pub fn traced() -> Self {
        Self { trace: true }
    }
}

/// Child token indices for every head, in token order
struct ChildIndex {
    by_head: FxHashMap<usize, Vec<usize>>,
}

impl ChildIndex {
    fn build(tokens: &[Token]) -> Self {
        let mut by_head: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for (i, token) in tokens.iter().enumerate() {
            // Root sentinels point at themselves and never become children
            if token.is_root() || token.head_index == i {
                continue;
            }
            by_head.entry(token.head_index).or_default().push(i);
        }
        Self { by_head }
    }

    fn children(&self, head: usize) -> &[usize] {
        self.by_head.get(&head).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Build the tree rooted at `tokens[root_index]`
///
/// Every token whose head is a node's index becomes that node's child, in
/// token order. Construction uses an explicit stack, so tree depth is not
/// bounded by the call stack.
///
/// Tokens whose `head_index` is out of bounds never appear as anyone's
/// child: they are unreachable from the root and are left out of the tree.
/// Head links that loop back to `root_index` are cut at the root.
///
/// # Panics
///
/// Panics if `root_index` is out of bounds.
pub fn build_tree(root_index: usize, tokens: &[Token], options: &BuildOptions) -> TreeNode {
    let index = ChildIndex::build(tokens);
    build_node(root_index, tokens, &index, options)
}

fn build_node(
    root_index: usize,
    tokens: &[Token],
    index: &ChildIndex,
    options: &BuildOptions,
) -> TreeNode {
    // Pre-order over the reachable tokens
    let mut order = Vec::new();
    let mut seen = FxHashSet::default();
    let mut stack = vec![root_index];
    while let Some(i) = stack.pop() {
        if !seen.insert(i) {
            continue;
        }
        if options.trace {
            debug!("{}", trace_line(i, tokens));
        }
        order.push(i);
        stack.extend(index.children(i).iter().rev());
    }

    // Reverse pre-order finishes every child before its parent
    let mut finished: FxHashMap<usize, TreeNode> = FxHashMap::default();
    for &i in order.iter().skip(1).rev() {
        let node = make_node(i, tokens, index, &mut finished);
        finished.insert(i, node);
    }
    make_node(root_index, tokens, index, &mut finished)
}

fn make_node(
    i: usize,
    tokens: &[Token],
    index: &ChildIndex,
    finished: &mut FxHashMap<usize, TreeNode>,
) -> TreeNode {
    let token = &tokens[i];
    TreeNode {
        index: Some(i),
        label: token.label,
        content: token.content.clone(),
        lemma: token.lemma.clone(),
        pos_tag: token.pos_tag,
        children: index
            .children(i)
            .iter()
            .filter_map(|child| finished.remove(child))
            .collect(),
    }
}

/// The debug line logged for token `i` when tracing
fn trace_line(i: usize, tokens: &[Token]) -> String {
    let token = &tokens[i];
    let parent = if token.head_index == i {
        "*"
    } else {
        tokens
            .get(token.head_index)
            .map(|t| t.content.as_str())
            .unwrap_or("?")
    };
    let label = match standard_label_name(token.label) {
        Some(name) => name.to_string(),
        None => token.label.to_string(),
    };
    format!(
        "Creating tree node {}: {} \t{}\tp:{}",
        i, label, token.content, parent
    )
}

/// Indices of the ROOT tokens, in token order
pub fn sentence_roots(tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_root())
        .map(|(i, _)| i)
        .collect()
}

/// Pair sentence texts with root indices and build one sentence per pair
///
/// If the two sequences differ in length the extra entries of the longer
/// one are dropped.
pub fn assemble_document(
    language: &str,
    sentence_texts: &[String],
    root_indices: &[usize],
    tokens: &[Token],
    options: &BuildOptions,
) -> Document {
    if sentence_texts.len() != root_indices.len() {
        debug!(
            "{} sentence texts but {} root tokens; keeping the first {}",
            sentence_texts.len(),
            root_indices.len(),
            sentence_texts.len().min(root_indices.len())
        );
    }

    let index = ChildIndex::build(tokens);
    let mut doc = Document::new(language);
    for (text, &root_index) in sentence_texts.iter().zip(root_indices) {
        let root = build_node(root_index, tokens, &index, options);
        doc.sentences.push(Sentence::new(text, root));
    }
    doc
}

/// Build a document from analyzer output
pub fn build_document(analysis: &Analysis, options: &BuildOptions) -> Document {
    let roots = sentence_roots(&analysis.tokens);
    assemble_document(
        &analysis.language,
        &analysis.sentences,
        &roots,
        &analysis.tokens,
        options,
    )
}
