//! Reading order determination for layout analysis.
//!
//! This module provides algorithms for determining the correct reading order
//! of text blocks in a document, supporting both tree-based and graph-based approaches.

use crate::layout::column_detector::LayoutTree;
use crate::layout::text_block::TextBlock;
use std::collections::{HashSet, VecDeque};

/// Determine reading order from a layout tree.
///
/// This traverses the layout tree in reading order (top-to-bottom, left-to-right)
/// and returns the block indices in the order they should be read.
///
/// # Arguments
///
/// * `layout_tree` - The hierarchical layout tree from XY-Cut
///
/// # Returns
///
/// A vector of block indices in reading order.
///
/// # Examples
///
/// ```ignore
/// use pdf_oxide::layout::column_detector::LayoutTree;
/// use pdf_oxide::layout::reading_order::determine_reading_order;
///
/// let tree = LayoutTree::Leaf { blocks: vec![0, 1, 2] };
/// let order = determine_reading_order(&tree);
/// assert_eq!(order, vec![0, 1, 2]);
/// ```ignore
pub fn determine_reading_order(layout_tree: &LayoutTree) -> Vec<usize> {
    let mut order = vec![];
    traverse_tree(layout_tree, &mut order);
    order
}

/// Recursively traverse the layout tree in reading order.
fn traverse_tree(tree: &LayoutTree, order: &mut Vec<usize>) {
    match tree {
        LayoutTree::Leaf { blocks } => {
            // Add all blocks in this leaf
            order.extend(blocks);
        },
        LayoutTree::Node { children, .. } => {
            // Traverse children in order (they're already in reading order)
            for child in children {
                traverse_tree(child, order);
            }
        },
    }
}

/// Determine reading order using graph-based topological sorting.
///
/// This is more sophisticated than tree-based ordering and can handle
/// complex layouts where blocks don't fit neatly into a tree structure.
///
/// Uses Kahn's algorithm for topological sorting of a directed acyclic graph
/// where edges represent "precedes" relationships.
///
/// # Arguments
///
/// * `blocks` - The text blocks to order
///
/// # Returns
///
/// A vector of block indices in reading order.
///
/// # Examples
///
/// ```ignore
/// use pdf_oxide::geometry::Rect;
/// use pdf_oxide::layout::{TextChar, TextBlock, FontWeight, Color};
/// use pdf_oxide::layout::reading_order::graph_based_reading_order;
///
/// let chars1 = vec![
///     TextChar {
///         char: 'A',
///         bbox: Rect::new(0.0, 0.0, 10.0, 12.0),
///         font_name: "Times".to_string(),
///         font_size: 12.0,
///         font_weight: FontWeight::Normal,
///         color: Color::black(),
///     },
/// ];
/// let block1 = TextBlock::from_chars(chars1);
///
/// let chars2 = vec![
///     TextChar {
///         char: 'B',
///         bbox: Rect::new(50.0, 0.0, 10.0, 12.0),
///         font_name: "Times".to_string(),
///         font_size: 12.0,
///         font_weight: FontWeight::Normal,
///         color: Color::black(),
///     },
/// ];
/// let block2 = TextBlock::from_chars(chars2);
///
/// let blocks = vec![block1, block2];
/// let order = graph_based_reading_order(&blocks);
/// // Block at x=0 comes before block at x=50
/// assert_eq!(order, vec![0, 1]);
/// ```ignore
pub fn graph_based_reading_order(blocks: &[TextBlock]) -> Vec<usize> {
    if blocks.is_empty() {
        return vec![];
    }

    if blocks.len() == 1 {
        return vec![0];
    }

    let n = blocks.len();
    let mut graph = vec![HashSet::new(); n];

    // Build precedence graph: edge i->j means block i precedes block j
    for i in 0..n {
        for j in 0..n {
            if i != j && precedes(&blocks[i], &blocks[j]) {
                graph[i].insert(j);
            }
        }
    }

    // Topological sort using Kahn's algorithm
    kahn_sort(&graph)
}

/// Determine if block `a` precedes block `b` in reading order.
///
/// Reading order rules:
/// 1. If blocks are on the same line (similar Y), left precedes right
/// 2. Otherwise, top precedes bottom
///
/// Note: PDF coordinates have origin at bottom-left, Y increases upward.
/// So "top precedes bottom" means larger Y precedes smaller Y.
fn precedes(a: &TextBlock, b: &TextBlock) -> bool {
    // Tolerance for "same line" detection (5 units)
    let y_tolerance = 5.0;

    if (a.bbox.top() - b.bbox.top()).abs() < y_tolerance {
        // Same line: left precedes right
        a.bbox.left() < b.bbox.left()
    } else {
        // Different lines: top precedes bottom
        // PDF coordinates: origin at bottom-left, Y increases upward
        // So larger Y (top of page) comes before smaller Y (bottom of page)
        a.bbox.top() > b.bbox.top()
    }
}

/// Perform topological sort using Kahn's algorithm.
///
/// # Arguments
///
/// * `graph` - Adjacency list representation of a DAG
///
/// # Returns
///
/// A topologically sorted list of node indices.
fn kahn_sort(graph: &[HashSet<usize>]) -> Vec<usize> {
    let n = graph.len();

    // Compute in-degree for each node
    let mut in_degree = vec![0; n];
    for edges in graph {
        for &node in edges {
            in_degree[node] += 1;
        }
    }

    // Start with nodes that have no incoming edges
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();

    let mut result = vec![];

    while let Some(node) = queue.pop_front() {
        result.push(node);

        // Remove edges from this node
        for &next in &graph[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    // If result doesn't contain all nodes, there was a cycle (shouldn't happen with proper input)
    if result.len() != n {
        // Fallback: return all nodes in original order
        (0..n).collect()
    } else {
        result
    }
}
