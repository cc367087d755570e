use std::collections::HashMap;

struct Node {
    children: HashMap<char, Node>,
    latin: Option<String>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            latin: None,
        }
    }
}

/// Char-keyed trie over Coptic graphemes.
pub(super) struct GraphemeTrie {
    root: Node,
}

impl GraphemeTrie {
    pub(super) fn new() -> Self {
        Self { root: Node::new() }
    }

    pub(super) fn insert(&mut self, grapheme: &str, latin: &str) {
        let mut node = &mut self.root;
        for c in grapheme.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
        }
        node.latin = Some(latin.to_string());
    }

    /// Walk `input` as far as the trie allows and return the deepest node
    /// that carries a value.
    pub(super) fn longest_match(&self, input: &[char]) -> Option<(usize, &str)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, c) in input.iter().enumerate() {
            match node.children.get(c) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(latin) = &node.latin {
                best = Some((i + 1, latin.as_str()));
            }
        }
        best
    }
}
