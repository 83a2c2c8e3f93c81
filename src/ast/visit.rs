// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! Tree traversal and label lookup

use super::{Node, NodeKind};
use serde::Serialize;
use std::collections::BTreeMap;

impl Node {
    /// Visit this node and every descendant, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Total number of nodes in the tree, including this one
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }

    /// All nodes carrying the given label, in depth-first order
    pub fn find_labeled(&self, id: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.id.as_deref() == Some(id) {
                found.push(node);
            }
        });
        found
    }

    pub fn count_labeled(&self, id: &str) -> usize {
        self.find_labeled(id).len()
    }
}

/// Shape statistics for a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub depth: usize,
    pub primitives: usize,
    pub booleans: usize,
    pub hulls: usize,
    pub transforms: usize,
    /// Occurrences of each label
    pub labels: BTreeMap<String, usize>,
}

impl TreeStats {
    pub fn from_ast(root: &Node) -> Self {
        let mut stats = TreeStats {
            depth: root.depth(),
            ..Default::default()
        };

        root.walk(&mut |node| {
            stats.nodes += 1;
            match &node.kind {
                kind if kind.is_primitive() => stats.primitives += 1,
                NodeKind::Union(_) | NodeKind::Difference(_) | NodeKind::Intersection(_) => {
                    stats.booleans += 1
                }
                NodeKind::Hull(_) => stats.hulls += 1,
                NodeKind::Transform { .. } => stats.transforms += 1,
                _ => {}
            }
            if let Some(id) = &node.id {
                *stats.labels.entry(id.clone()).or_insert(0) += 1;
            }
        });

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{difference_of, hull_of, union_of};

    fn sample() -> Node {
        union_of([
            Node::cube(1.0, 1.0, 1.0).labeled("post"),
            difference_of(
                Node::centered_cube(2.0, 2.0, 2.0),
                [Node::cube(1.0, 1.0, 1.0).up(1.0).labeled("post")],
            ),
            hull_of([Node::cube(1.0, 1.0, 0.1), Node::cube(0.5, 0.5, 0.1).up(2.0)]),
        ])
    }

    #[test]
    fn test_node_count_and_depth() {
        let tree = sample();
        assert_eq!(tree.node_count(), 10);
        // union -> difference -> translate -> cube
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn test_find_labeled() {
        let tree = sample();
        assert_eq!(tree.count_labeled("post"), 2);
        assert_eq!(tree.count_labeled("missing"), 0);
    }

    #[test]
    fn test_tree_stats() {
        let stats = TreeStats::from_ast(&sample());
        assert_eq!(stats.nodes, 10);
        assert_eq!(stats.primitives, 5);
        assert_eq!(stats.booleans, 2);
        assert_eq!(stats.hulls, 1);
        assert_eq!(stats.transforms, 2);
        assert_eq!(stats.labels.get("post"), Some(&2));
    }
}
