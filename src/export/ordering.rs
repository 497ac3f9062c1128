//! Parent-before-child ordering of categories

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use super::error::{ExportError, ExportResult};
use crate::models::SourceCategory;

/// Order non-root categories so every parent precedes its children.
///
/// Parents outside `children` (roots, or ids missing from the catalog) impose no
/// constraint. The result is level by level, by id within a level. A cycle in the
/// parent chain is an error.
pub fn order_child_categories(children: Vec<SourceCategory>) -> ExportResult<Vec<SourceCategory>> {
    let mut graph: DiGraph<i64, ()> = DiGraph::with_capacity(children.len(), children.len());
    let nodes: HashMap<i64, NodeIndex> = children
        .iter()
        .map(|category| (category.id, graph.add_node(category.id)))
        .collect();

    for category in &children {
        let Some(parent) = category.parent() else {
            continue;
        };
        if let (Some(&parent_node), Some(&child_node)) = (nodes.get(&parent), nodes.get(&category.id)) {
            graph.add_edge(parent_node, child_node, ());
        }
    }

    let sorted = toposort(&graph, None).map_err(|cycle| ExportError::CategoryCycle {
        category_id: graph[cycle.node_id()],
    })?;

    // Depth in topological order: a parent's depth is final before its children are seen
    let mut depth: HashMap<i64, usize> = HashMap::with_capacity(sorted.len());
    for node in sorted {
        let id = graph[node];
        let level = graph
            .neighbors_directed(node, petgraph::Direction::Incoming)
            .filter_map(|parent| depth.get(&graph[parent]))
            .map(|parent_depth| parent_depth + 1)
            .max()
            .unwrap_or(0);
        depth.insert(id, level);
    }

    let mut ordered = children;
    ordered.sort_by_key(|category| (depth.get(&category.id).copied().unwrap_or(0), category.id));
    Ok(ordered)
}
