//! Python bindings for deptriples
//!
//! This module provides PyO3-based Python bindings for the Rust core.
//! Python objects hold a shared handle to the document plus the position
//! of the sentence or node they stand for, so no tree is copied.

use pyo3::exceptions::{PyIOError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::builder::{BuildOptions, build_document};
use crate::codes::{Code, Vocabulary};
use crate::conllu::{self, ParseError};
use crate::matcher::{self, MatchError, Source, Triple};
use crate::tree::{Document, TreeNode};
use crate::verbs;

/// Convert ParseError to Python exception
impl From<ParseError> for PyErr {
    fn from(err: ParseError) -> PyErr {
        match err {
            ParseError::Io(e) => PyIOError::new_err(e.to_string()),
            e @ ParseError::Syntax { .. } => PyValueError::new_err(e.to_string()),
        }
    }
}

/// Convert MatchError to Python exception
impl From<MatchError> for PyErr {
    fn from(err: MatchError) -> PyErr {
        match err {
            MatchError::InvalidArgument(_) => PyTypeError::new_err(err.to_string()),
        }
    }
}

#[pyclass(name = "Document", frozen)]
pub struct PyDocument {
    inner: Arc<Document>,
}

#[pymethods]
impl PyDocument {
    #[getter]
    fn language(&self) -> String {
        self.inner.language.clone()
    }

    fn sentences(&self) -> Vec<PySentence> {
        (0..self.inner.sentences.len())
            .map(|index| PySentence {
                doc: Arc::clone(&self.inner),
                index,
            })
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.sentences.len()
    }

    #[pyo3(signature = (verbose=true, names=false))]
    fn get_string_repr(&self, verbose: bool, names: bool) -> String {
        self.inner.describe(verbose, vocabulary(names).as_ref())
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

#[pyclass(name = "Sentence", frozen)]
pub struct PySentence {
    doc: Arc<Document>,
    index: usize,
}

#[pymethods]
impl PySentence {
    #[getter]
    fn content(&self) -> String {
        self.doc.sentences[self.index].content.clone()
    }

    #[getter]
    fn root(&self) -> PyTreeNode {
        PyTreeNode {
            doc: Arc::clone(&self.doc),
            sentence: self.index,
            path: Vec::new(),
        }
    }

    #[pyo3(signature = (verbose=true, names=false))]
    fn get_string_repr(&self, verbose: bool, names: bool) -> String {
        self.doc.sentences[self.index].describe(verbose, vocabulary(names).as_ref())
    }

    fn __repr__(&self) -> String {
        self.doc.sentences[self.index].to_string()
    }
}

#[pyclass(name = "TreeNode", frozen)]
pub struct PyTreeNode {
    doc: Arc<Document>,
    sentence: usize,
    /// Child positions from the sentence root down to this node
    path: Vec<usize>,
}

impl PyTreeNode {
    fn node(&self) -> &TreeNode {
        let mut node = &self.doc.sentences[self.sentence].root;
        for &i in &self.path {
            node = &node.children[i];
        }
        node
    }

    fn at(&self, path: Vec<usize>) -> PyTreeNode {
        PyTreeNode {
            doc: Arc::clone(&self.doc),
            sentence: self.sentence,
            path,
        }
    }
}

#[pymethods]
impl PyTreeNode {
    #[getter]
    fn index(&self) -> Option<usize> {
        self.node().index
    }

    #[getter]
    fn label(&self) -> u32 {
        self.node().label.0
    }

    #[getter]
    fn content(&self) -> String {
        self.node().content.clone()
    }

    #[getter]
    fn lemma(&self) -> String {
        self.node().lemma.clone()
    }

    #[getter]
    fn pos_tag(&self) -> u32 {
        self.node().pos_tag.0
    }

    fn children(&self) -> Vec<PyTreeNode> {
        (0..self.node().children.len())
            .map(|i| {
                let mut path = self.path.clone();
                path.push(i);
                self.at(path)
            })
            .collect()
    }

    /// Pre-order walk, as a list
    fn walk(&self) -> Vec<PyTreeNode> {
        subtree_paths(self.node(), &self.path)
            .into_iter()
            .map(|path| self.at(path))
            .collect()
    }

    /// Pre-order walk keeping the nodes for which `filter(root, node)` is true
    fn filtered_walk(&self, filter: &Bound<'_, PyAny>) -> PyResult<Vec<PyTreeNode>> {
        let mut kept = Vec::new();
        for path in subtree_paths(self.node(), &self.path) {
            let root = self.at(self.path.clone());
            let candidate = self.at(path.clone());
            if filter.call1((root, candidate))?.is_truthy()? {
                kept.push(self.at(path));
            }
        }
        Ok(kept)
    }

    /// Pre-order walk over the verbs in this subtree
    fn verbs(&self) -> Vec<PyTreeNode> {
        let root = self.node();
        subtree_paths(root, &self.path)
            .into_iter()
            .map(|path| self.at(path))
            .filter(|node| verbs::verb_filter(root, node.node()))
            .collect()
    }

    #[pyo3(signature = (verbose=true, names=false))]
    fn get_string_repr(&self, verbose: bool, names: bool) -> String {
        self.node().describe(verbose, vocabulary(names).as_ref())
    }

    #[pyo3(signature = (max_depth=None, verbose=true, names=false))]
    fn get_printable_tree(&self, max_depth: Option<usize>, verbose: bool, names: bool) -> String {
        self.node().printable_tree(max_depth, verbose, vocabulary(names).as_ref())
    }

    fn __repr__(&self) -> String {
        self.node().to_string()
    }
}

/// Standard tag and label names when `names` is set, raw codes otherwise
fn vocabulary(names: bool) -> Option<Vocabulary> {
    names.then(Vocabulary::standard)
}

/// Paths of every node under `node` in pre-order, each prefixed by `base`
fn subtree_paths(node: &TreeNode, base: &[usize]) -> Vec<Vec<usize>> {
    let mut paths = Vec::new();
    let mut stack = vec![(node, base.to_vec())];
    while let Some((node, path)) = stack.pop() {
        for (i, child) in node.children.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(i);
            stack.push((child, child_path));
        }
        paths.push(path);
    }
    paths
}

/// Document and optional sentence position behind a Python source argument
fn extract_source(obj: &Bound<'_, PyAny>) -> Result<(Arc<Document>, Option<usize>), MatchError> {
    if let Ok(doc) = obj.extract::<PyRef<'_, PyDocument>>() {
        return Ok((Arc::clone(&doc.inner), None));
    }
    if let Ok(sentence) = obj.extract::<PyRef<'_, PySentence>>() {
        return Ok((Arc::clone(&sentence.doc), Some(sentence.index)));
    }
    Err(MatchError::InvalidArgument(
        "expected a Document or a Sentence".to_string(),
    ))
}

fn source_of(doc: &Document, sentence: Option<usize>) -> Source<'_> {
    match sentence {
        Some(i) => Source::Sentence(&doc.sentences[i]),
        None => Source::Document(doc),
    }
}

/// Map node addresses back to (sentence, path) positions
fn node_positions(doc: &Document) -> FxHashMap<*const TreeNode, (usize, Vec<usize>)> {
    let mut positions = FxHashMap::default();
    for (si, sentence) in doc.sentences.iter().enumerate() {
        let mut stack = vec![(&sentence.root, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            for (ci, child) in node.children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(ci);
                stack.push((child, child_path));
            }
            positions.insert(node as *const TreeNode, (si, path));
        }
    }
    positions
}

type PyTriple = (PyTreeNode, PyTreeNode, PyTreeNode);

fn to_py_triples<'a>(
    doc: &Arc<Document>,
    triples: impl Iterator<Item = Triple<'a>>,
) -> Vec<PyTriple> {
    let positions = node_positions(doc);
    let wrap = |node: &TreeNode| {
        let (sentence, path) = positions[&(node as *const TreeNode)].clone();
        PyTreeNode {
            doc: Arc::clone(doc),
            sentence,
            path,
        }
    };
    triples.map(|(l, h, r)| (wrap(l), wrap(h), wrap(r))).collect()
}

fn codes(values: Vec<u32>) -> Vec<Code> {
    values.into_iter().map(Code).collect()
}

/// Parse CoNLL-U text into a Document
#[pyfunction]
#[pyo3(signature = (text, trace=false))]
fn parse_conllu(text: &str, trace: bool) -> PyResult<PyDocument> {
    let analysis = conllu::parse_conllu(text)?;
    let doc = build_document(&analysis, &BuildOptions { trace });
    Ok(PyDocument {
        inner: Arc::new(doc),
    })
}

/// Read a CoNLL-U file (optionally gzipped) into a Document
#[pyfunction]
#[pyo3(signature = (path, trace=false))]
fn read_conllu_file(path: std::path::PathBuf, trace: bool) -> PyResult<PyDocument> {
    let analysis = conllu::read_conllu_file(path)?;
    let doc = build_document(&analysis, &BuildOptions { trace });
    Ok(PyDocument {
        inner: Arc::new(doc),
    })
}

#[pyfunction]
fn find_triples(
    source: &Bound<'_, PyAny>,
    left_label: u32,
    head_pos_tag: u32,
    right_label: u32,
) -> PyResult<Vec<PyTriple>> {
    let (doc, sentence) = extract_source(source)?;
    let triples = matcher::find_triples(
        source_of(&doc, sentence),
        Code(left_label),
        Code(head_pos_tag),
        Code(right_label),
    );
    Ok(to_py_triples(&doc, triples))
}

#[pyfunction]
fn find_triples_multi(
    source: &Bound<'_, PyAny>,
    left_labels: Vec<u32>,
    head_pos_tags: Vec<u32>,
    right_labels: Vec<u32>,
) -> PyResult<Vec<PyTriple>> {
    let (doc, sentence) = extract_source(source)?;
    let triples = matcher::find_triples_multi(
        source_of(&doc, sentence),
        &codes(left_labels),
        &codes(head_pos_tags),
        &codes(right_labels),
    );
    Ok(to_py_triples(&doc, triples))
}

#[pyfunction]
#[pyo3(signature = (source, active_voice=true, passive_voice=true))]
fn find_verb_triples(
    source: &Bound<'_, PyAny>,
    active_voice: bool,
    passive_voice: bool,
) -> PyResult<Vec<PyTriple>> {
    let (doc, sentence) = extract_source(source)?;
    let triples = verbs::find_verb_triples(source_of(&doc, sentence), active_voice, passive_voice);
    Ok(to_py_triples(&doc, triples))
}

/// True if `candidate` is a verb; the filter used by `find_verb_triples`
#[pyfunction]
fn verb_filter(root: PyRef<'_, PyTreeNode>, candidate: PyRef<'_, PyTreeNode>) -> bool {
    verbs::verb_filter(root.node(), candidate.node())
}

#[pymodule]
fn deptriples(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDocument>()?;
    m.add_class::<PySentence>()?;
    m.add_class::<PyTreeNode>()?;
    m.add_function(wrap_pyfunction!(parse_conllu, m)?)?;
    m.add_function(wrap_pyfunction!(read_conllu_file, m)?)?;
    m.add_function(wrap_pyfunction!(find_triples, m)?)?;
    m.add_function(wrap_pyfunction!(find_triples_multi, m)?)?;
    m.add_function(wrap_pyfunction!(find_verb_triples, m)?)?;
    m.add_function(wrap_pyfunction!(verb_filter, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{label, pos};

    /// chased -> cat -> The, chased -> mouse
    fn create_test_tree() -> TreeNode {
        let the = TreeNode::new(Some(0), "The", "the", pos::DET, label::DET);
        let cat =
            TreeNode::new(Some(1), "cat", "cat", pos::NOUN, label::NSUBJ).with_children(vec![the]);
        let mouse = TreeNode::new(Some(3), "mouse", "mouse", pos::NOUN, label::DOBJ);
        TreeNode::new(Some(2), "chased", "chase", pos::VERB, label::ROOT)
            .with_children(vec![cat, mouse])
    }

    #[test]
    fn test_subtree_paths_are_preorder() {
        let tree = create_test_tree();
        assert_eq!(subtree_paths(&tree, &[]), vec![vec![], vec![0], vec![0, 0], vec![1]]);
        assert_eq!(subtree_paths(&tree.children[0], &[0]), vec![vec![0], vec![0, 0]]);
    }

    #[test]
    fn test_vocabulary_switch() {
        let tree = create_test_tree();
        assert_eq!(
            tree.describe(false, vocabulary(true).as_ref()),
            "chased (pos_tag=VERB, label=ROOT)"
        );
        assert_eq!(
            tree.describe(false, vocabulary(false).as_ref()),
            "chased (pos_tag=11, label=54)"
        );
    }
}
