//! Tree data structures for analyzed text
//!
//! A `Document` owns its `Sentence`s, and each sentence owns the root
//! `TreeNode` of its dependency tree. Parents own their children; there are
//! no back pointers.

use crate::codes::{Code, Vocabulary, label_display, pos_display};
use std::fmt;

/// One analyzed token in a dependency tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Position in the flat token list this node was built from
    pub index: Option<usize>,
    /// Dependency relation to the parent
    pub label: Code,
    pub content: String,
    pub lemma: String,
    pub pos_tag: Code,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node
    pub fn new(
        index: Option<usize>,
        content: &str,
        lemma: &str,
        pos_tag: Code,
        label: Code,
    ) -> Self {
        Self {
            index,
            label,
            content: content.to_string(),
            lemma: lemma.to_string(),
            pos_tag,
            children: Vec::new(),
        }
    }

    /// Builder-style helper for attaching children
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Pre-order walk over this node and all of its descendants
    ///
    /// The order is the same on every call.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Pre-order walk yielding only the nodes accepted by `filter`
    ///
    /// The filter receives the node `filtered_walk` was called on as its
    /// first argument and the candidate node as its second.
    pub fn filtered_walk<F>(&self, filter: F) -> FilteredWalk<'_, F>
    where
        F: FnMut(&TreeNode, &TreeNode) -> bool,
    {
        FilteredWalk {
            root: self,
            walk: self.walk(),
            filter,
        }
    }

    /// Number of nodes in this subtree
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    /// Always false: a subtree contains at least its own root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Find the node built from token `index`
    pub fn find(&self, index: usize) -> Option<&TreeNode> {
        self.walk().find(|node| node.index == Some(index))
    }

    /// One-line rendering of this node (children are listed by index only)
    pub fn describe(&self, verbose: bool, vocabulary: Option<&Vocabulary>) -> String {
        let pos_tag = pos_display(vocabulary, self.pos_tag);
        let label = label_display(vocabulary, self.label);

        if verbose {
            let children: Vec<String> = self
                .children
                .iter()
                .map(|child| index_repr(child.index))
                .collect();
            return format!(
                "Tree(index={},label='{}', content='{}', lemma='{}', pos_tag='{}', children=[{}])",
                index_repr(self.index),
                label,
                self.content,
                self.lemma,
                pos_tag,
                children.join(",")
            );
        }

        format!("{} (pos_tag={}, label={})", self.content, pos_tag, label)
    }

    /// Indented multi-line rendering of the subtree
    ///
    /// `max_depth` limits how many levels are rendered; `None` renders all.
    pub fn printable_tree(
        &self,
        max_depth: Option<usize>,
        verbose: bool,
        vocabulary: Option<&Vocabulary>,
    ) -> String {
        let mut lines = Vec::new();
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            if max_depth.is_some_and(|max| depth > max) {
                continue;
            }
            let mut prefix = if depth <= 2 {
                String::new()
            } else {
                "   ".repeat(depth - 2)
            };
            if depth != 1 {
                prefix.push_str("|- ");
            }
            lines.push(prefix + &node.describe(verbose, vocabulary));
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        lines.join("\n")
    }
}

// Children are unlinked one level at a time so deep chains do not
// exhaust the stack when dropped.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

fn index_repr(index: Option<usize>) -> String {
    match index {
        Some(i) => i.to_string(),
        None => "None".to_string(),
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(true, None))
    }
}

/// Pre-order iterator over a subtree
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is popped next
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order iterator yielding only nodes accepted by a filter
pub struct FilteredWalk<'a, F> {
    root: &'a TreeNode,
    walk: Walk<'a>,
    filter: F,
}

impl<'a, F> Iterator for FilteredWalk<'a, F>
where
    F: FnMut(&TreeNode, &TreeNode) -> bool,
{
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let root = self.root;
        let filter = &mut self.filter;
        self.walk.find(|node| filter(root, *node))
    }
}

/// One analyzed sentence
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub content: String,
    pub root: TreeNode,
}

impl Sentence {
    pub fn new(content: &str, root: TreeNode) -> Self {
        Self {
            content: content.to_string(),
            root,
        }
    }

    /// Pre-order walk over the sentence tree
    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    pub fn describe(&self, verbose: bool, vocabulary: Option<&Vocabulary>) -> String {
        let tree = self.root.printable_tree(None, verbose, vocabulary);
        format!("Sentence: '{}'\n{}", self.content, tree)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(true, None))
    }
}

/// An analyzed text: sentences in their original order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub language: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            sentences: Vec::new(),
        }
    }

    pub fn describe(&self, verbose: bool, vocabulary: Option<&Vocabulary>) -> String {
        let mut ret = format!("Document ({} sentences)\n", self.sentences.len());
        for sentence in &self.sentences {
            ret.push_str(&sentence.describe(verbose, vocabulary));
            ret.push('\n');
            ret.push_str(&"-".repeat(20));
            ret.push('\n');
        }
        ret
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(true, None))
    }
}
