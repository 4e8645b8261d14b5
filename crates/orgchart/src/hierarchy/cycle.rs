//! Cycle detection over manager links.
//!
//! Every node has at most one manager, so the manager links form a
//! functional graph: each walk up the chain either reaches a root or
//! enters a cycle. Walks are memoized, so each node is visited once.

use petgraph::graph::{DiGraph, NodeIndex};

use orgchart_core::identifier::Id;

use super::HierarchyNode;
use crate::error::HierarchyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    OnPath,
    Done,
}

/// Fails with [`HierarchyError::CycleDetected`] if any chain of managers loops.
///
/// `parents[i]` is the resolved manager of the node at index `i`. The
/// reported members start at the first node found to be revisited and
/// follow manager links from there, so a self-managed person yields a
/// single-member cycle.
pub(super) fn ensure_acyclic(
    graph: &DiGraph<HierarchyNode, ()>,
    parents: &[Option<NodeIndex>],
) -> Result<(), HierarchyError> {
    let mut visits = vec![Visit::Unvisited; parents.len()];
    let mut path: Vec<NodeIndex> = Vec::new();

    for start in graph.node_indices() {
        let mut current = Some(start);

        while let Some(idx) = current {
            match visits[idx.index()] {
                Visit::Done => break,
                Visit::OnPath => {
                    let entry = path.iter().position(|&on_path| on_path == idx).unwrap_or(0);
                    let members: Vec<Id> = path[entry..].iter().map(|&n| graph[n].id().clone()).collect();
                    return Err(HierarchyError::CycleDetected { members });
                }
                Visit::Unvisited => {
                    visits[idx.index()] = Visit::OnPath;
                    path.push(idx);
                    current = parents[idx.index()];
                }
            }
        }

        for idx in path.drain(..) {
            visits[idx.index()] = Visit::Done;
        }
    }

    Ok(())
}
