//! Reporting hierarchy construction and validation.
//!
//! This module assembles a directed graph from [`Person`] records, with one
//! edge from every manager to each of their reports, and verifies that the
//! result is a forest.
//!
//! # Architecture
//!
//! - [`HierarchyBuilder`]: validates manager references and builds the graph
//! - [`HierarchyGraph`]: the validated forest, backed by a `petgraph` [`DiGraph`]
//! - [`HierarchyNode`]: one person plus derived depth, parent and children
//!
//! Node indices in the backing graph follow input order, so iterating nodes,
//! roots, children or edges always yields input order.

mod cycle;

use std::collections::{HashMap, VecDeque};

use log::{debug, info, warn};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::{Dfs, Walker},
};

use orgchart_core::{identifier::Id, person::Person};

use crate::{
    config::{DanglingManagerPolicy, HierarchyConfig},
    error::HierarchyError,
};

/// A person placed in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    person: Person,
    depth: usize,
    parent: Option<Id>,
    children: Vec<Id>,
}

impl HierarchyNode {
    fn new(person: Person) -> Self {
        Self {
            person,
            depth: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the person id.
    pub fn id(&self) -> &Id {
        self.person.id()
    }

    /// Returns the underlying person record.
    pub fn person(&self) -> &Person {
        &self.person
    }

    /// Returns the distance from this node to its root; roots have depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the id of the manager, or `None` for roots.
    pub fn parent(&self) -> Option<&Id> {
        self.parent.as_ref()
    }

    /// Returns the direct reports in input order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// Returns `true` if the node has no manager.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if the node has no reports.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A validated reporting forest.
///
/// Every node has at most one parent, every node is reachable from exactly
/// one root, and depth grows by exactly one from parent to child.
#[derive(Debug, Clone)]
pub struct HierarchyGraph {
    graph: DiGraph<HierarchyNode, ()>,
    indices: HashMap<Id, NodeIndex>,
    roots: Vec<Id>,
}

impl HierarchyGraph {
    /// Returns the node for `id`, if present.
    pub fn node(&self, id: &str) -> Option<&HierarchyNode> {
        self.indices.get(id).map(|&idx| &self.graph[idx])
    }

    /// Returns `true` if a node with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    /// Returns an iterator over all nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.graph.node_weights()
    }

    /// Returns the root ids in input order.
    pub fn roots(&self) -> &[Id] {
        &self.roots
    }

    /// Returns the `(manager, report)` pairs, ordered by the report's input position.
    pub fn edges(&self) -> impl Iterator<Item = (&Id, &Id)> {
        self.graph.raw_edges().iter().map(|edge| {
            (
                self.graph[edge.source()].id(),
                self.graph[edge.target()].id(),
            )
        })
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the hierarchy has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the largest depth in the hierarchy, or `None` when it is empty.
    pub fn max_depth(&self) -> Option<usize> {
        self.nodes().map(HierarchyNode::depth).max()
    }

    /// Returns the direct reports of `id` in input order.
    pub fn children(&self, id: &str) -> Option<&[Id]> {
        self.node(id).map(HierarchyNode::children)
    }

    /// Returns the manager of `id`; `None` if `id` is a root or unknown.
    pub fn parent(&self, id: &str) -> Option<&Id> {
        self.node(id).and_then(HierarchyNode::parent)
    }

    /// Returns the number of direct and indirect reports of `id`.
    pub fn descendant_count(&self, id: &str) -> Option<usize> {
        let &idx = self.indices.get(id)?;
        Some(Dfs::new(&self.graph, idx).iter(&self.graph).count() - 1)
    }

    /// Returns the backing graph index for `id`.
    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.indices.get(id).copied()
    }

    /// Returns the backing graph.
    pub(crate) fn graph(&self) -> &DiGraph<HierarchyNode, ()> {
        &self.graph
    }
}

/// Builds a [`HierarchyGraph`] from people.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyBuilder {
    dangling_managers: DanglingManagerPolicy,
}

impl HierarchyBuilder {
    /// Creates a builder using the given hierarchy settings.
    pub fn new(config: &HierarchyConfig) -> Self {
        Self {
            dangling_managers: config.dangling_managers(),
        }
    }

    /// Builds and validates the hierarchy.
    ///
    /// # Errors
    ///
    /// - [`HierarchyError::DanglingManager`] if a manager id names nobody and the
    ///   policy is [`DanglingManagerPolicy::Error`].
    /// - [`HierarchyError::CycleDetected`] if following manager links loops,
    ///   including a person who manages themselves.
    /// - [`HierarchyError::DuplicateId`] if two people share an id.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart::hierarchy::HierarchyBuilder;
    /// # use orgchart_core::{identifier::Id, person::Person};
    /// let people = vec![
    ///     Person::new(Id::new("ceo"), "CEO"),
    ///     Person::new(Id::new("cto"), "CTO").with_manager(Id::new("ceo")),
    /// ];
    ///
    /// let hierarchy = HierarchyBuilder::default().build(&people).unwrap();
    /// assert_eq!(hierarchy.roots(), &[Id::new("ceo")]);
    /// assert_eq!(hierarchy.node("cto").unwrap().depth(), 1);
    /// ```
    pub fn build(&self, people: &[Person]) -> Result<HierarchyGraph, HierarchyError> {
        info!(people = people.len(); "Building hierarchy");

        let mut graph = DiGraph::with_capacity(people.len(), people.len());
        let mut indices = HashMap::with_capacity(people.len());

        for person in people {
            let idx = graph.add_node(HierarchyNode::new(person.clone()));
            if indices.insert(person.id().clone(), idx).is_some() {
                return Err(HierarchyError::DuplicateId {
                    id: person.id().clone(),
                });
            }
        }

        let parents = self.resolve_managers(&mut graph, &indices)?;
        cycle::ensure_acyclic(&graph, &parents)?;

        for (child_idx, parent_idx) in graph.node_indices().zip(parents.iter().copied()) {
            let Some(parent_idx) = parent_idx else {
                continue;
            };
            let parent_id = graph[parent_idx].id().clone();
            let child_id = graph[child_idx].id().clone();

            graph.add_edge(parent_idx, child_idx, ());
            graph[child_idx].parent = Some(parent_id);
            graph[parent_idx].children.push(child_id);
        }

        let roots: Vec<Id> = graph
            .node_weights()
            .filter(|node| node.is_root())
            .map(|node| node.id().clone())
            .collect();

        assign_depths(&mut graph, &roots, &indices);

        let hierarchy = HierarchyGraph {
            graph,
            indices,
            roots,
        };

        debug!(
            nodes = hierarchy.len(),
            roots = hierarchy.roots.len(),
            max_depth:? = hierarchy.max_depth();
            "Hierarchy built"
        );

        Ok(hierarchy)
    }

    /// Maps every node to the index of its manager.
    ///
    /// Unresolved references are either rejected or dropped according to the
    /// dangling-manager policy; dropped references are also cleared from the
    /// stored person so the record matches the structure.
    fn resolve_managers(
        &self,
        graph: &mut DiGraph<HierarchyNode, ()>,
        indices: &HashMap<Id, NodeIndex>,
    ) -> Result<Vec<Option<NodeIndex>>, HierarchyError> {
        let mut parents = Vec::with_capacity(graph.node_count());

        for idx in graph.node_indices() {
            let person = &graph[idx].person;
            let Some(manager_id) = person.manager_id() else {
                parents.push(None);
                continue;
            };

            match indices.get(manager_id) {
                Some(&manager_idx) => parents.push(Some(manager_idx)),
                None => match self.dangling_managers {
                    DanglingManagerPolicy::Error => {
                        return Err(HierarchyError::DanglingManager {
                            id: person.id().clone(),
                            manager_id: manager_id.clone(),
                        });
                    }
                    DanglingManagerPolicy::Demote => {
                        warn!(
                            id:% = person.id(),
                            manager_id:%;
                            "Manager not found, treating person as a root"
                        );
                        let demoted = person.without_manager();
                        graph[idx].person = demoted;
                        parents.push(None);
                    }
                },
            }
        }

        Ok(parents)
    }
}

/// Assigns depths breadth-first, starting from all roots at once.
fn assign_depths(
    graph: &mut DiGraph<HierarchyNode, ()>,
    roots: &[Id],
    indices: &HashMap<Id, NodeIndex>,
) {
    let mut queue: VecDeque<NodeIndex> = roots
        .iter()
        .filter_map(|root| indices.get(root).copied())
        .collect();

    while let Some(idx) = queue.pop_front() {
        let child_depth = graph[idx].depth + 1;
        let children: Vec<NodeIndex> = graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();

        for child in children {
            graph[child].depth = child_depth;
            queue.push_back(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, manager: Option<&str>) -> Person {
        let person = Person::new(Id::new(id), id.to_uppercase());
        match manager {
            Some(manager) => person.with_manager(Id::new(manager)),
            None => person,
        }
    }

    fn build(people: &[Person]) -> Result<HierarchyGraph, HierarchyError> {
        HierarchyBuilder::default().build(people)
    }

    fn ids(ids: &[Id]) -> Vec<String> {
        ids.iter().map(Id::to_string).collect()
    }

    #[test]
    fn test_single_tree() {
        let people = vec![
            person("ceo", None),
            person("cto", Some("ceo")),
            person("cfo", Some("ceo")),
            person("dev", Some("cto")),
        ];
        let hierarchy = build(&people).unwrap();

        assert_eq!(hierarchy.len(), 4);
        assert_eq!(ids(hierarchy.roots()), vec!["ceo"]);
        assert_eq!(ids(hierarchy.children("ceo").unwrap()), vec!["cto", "cfo"]);
        assert_eq!(hierarchy.parent("dev"), Some(&Id::new("cto")));
        assert_eq!(hierarchy.parent("ceo"), None);
        assert!(hierarchy.contains("cfo"));
        assert!(!hierarchy.contains("intern"));
        assert_eq!(hierarchy.node("dev").unwrap().depth(), 2);
        assert_eq!(hierarchy.max_depth(), Some(2));
    }

    #[test]
    fn test_children_keep_input_order_when_reports_precede_manager() {
        let people = vec![
            person("z", Some("boss")),
            person("a", Some("boss")),
            person("boss", None),
            person("m", Some("boss")),
        ];
        let hierarchy = build(&people).unwrap();

        assert_eq!(ids(hierarchy.children("boss").unwrap()), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_forest_roots_in_input_order() {
        let people = vec![
            person("r2", None),
            person("a", Some("r1")),
            person("r1", None),
            person("b", Some("r1")),
        ];
        let hierarchy = build(&people).unwrap();

        assert_eq!(ids(hierarchy.roots()), vec!["r2", "r1"]);
        assert!(hierarchy.node("r2").unwrap().is_leaf());
        assert_eq!(hierarchy.node("r2").unwrap().depth(), 0);
    }

    #[test]
    fn test_edges_point_from_manager_to_report() {
        let people = vec![
            person("root", None),
            person("b", Some("a")),
            person("a", Some("root")),
        ];
        let hierarchy = build(&people).unwrap();

        let edges: Vec<(String, String)> = hierarchy
            .edges()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("a".to_string(), "b".to_string()),
                ("root".to_string(), "a".to_string()),
            ]
        );
    }

    #[test]
    fn test_depth_increases_by_one() {
        let people = vec![
            person("d", Some("c")),
            person("c", Some("b")),
            person("b", Some("a")),
            person("a", None),
        ];
        let hierarchy = build(&people).unwrap();

        for node in hierarchy.nodes() {
            match node.parent() {
                Some(parent) => {
                    assert_eq!(node.depth(), hierarchy.node(parent.as_str()).unwrap().depth() + 1)
                }
                None => assert_eq!(node.depth(), 0),
            }
        }
        assert_eq!(hierarchy.node("d").unwrap().depth(), 3);
    }

    #[test]
    fn test_descendant_count() {
        let people = vec![
            person("root", None),
            person("a", Some("root")),
            person("b", Some("root")),
            person("c", Some("a")),
            person("solo", None),
        ];
        let hierarchy = build(&people).unwrap();

        assert_eq!(hierarchy.descendant_count("root"), Some(3));
        assert_eq!(hierarchy.descendant_count("a"), Some(1));
        assert_eq!(hierarchy.descendant_count("solo"), Some(0));
        assert_eq!(hierarchy.descendant_count("unknown"), None);
    }

    #[test]
    fn test_dangling_manager_is_an_error() {
        let people = vec![person("root", None), person("eve", Some("ghost"))];
        let err = build(&people).unwrap_err();

        assert_eq!(
            err,
            HierarchyError::DanglingManager {
                id: Id::new("eve"),
                manager_id: Id::new("ghost"),
            }
        );
    }

    #[test]
    fn test_dangling_manager_demoted_to_root() {
        let people = vec![
            person("root", None),
            person("eve", Some("ghost")),
            person("frank", Some("eve")),
        ];
        let builder = HierarchyBuilder::new(&HierarchyConfig::new(DanglingManagerPolicy::Demote));
        let hierarchy = builder.build(&people).unwrap();

        assert_eq!(ids(hierarchy.roots()), vec!["root", "eve"]);
        let eve = hierarchy.node("eve").unwrap();
        assert_eq!(eve.depth(), 0);
        assert_eq!(eve.person().manager_id(), None);
        assert_eq!(hierarchy.node("frank").unwrap().depth(), 1);
    }

    #[test]
    fn test_demote_does_not_hide_self_reference() {
        let people = vec![person("x", Some("x"))];
        let builder = HierarchyBuilder::new(&HierarchyConfig::new(DanglingManagerPolicy::Demote));
        let err = builder.build(&people).unwrap_err();

        assert_eq!(
            err,
            HierarchyError::CycleDetected {
                members: vec![Id::new("x")],
            }
        );
    }

    #[test]
    fn test_three_cycle() {
        let people = vec![
            person("A", Some("C")),
            person("B", Some("A")),
            person("C", Some("B")),
        ];
        let err = build(&people).unwrap_err();

        let HierarchyError::CycleDetected { members } = &err else {
            panic!("expected a cycle, got {err:?}");
        };
        let mut members = ids(members);
        members.sort();
        assert_eq!(members, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_cycle_below_valid_tree_reports_only_cycle_members() {
        let people = vec![
            person("root", None),
            person("tail", Some("x")),
            person("x", Some("y")),
            person("y", Some("x")),
        ];
        let err = build(&people).unwrap_err();

        let mut members = ids(&err.ids());
        members.sort();
        assert_eq!(members, vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_person_ids() {
        let people = vec![person("dup", None), person("dup", None)];
        let err = build(&people).unwrap_err();
        assert_eq!(err, HierarchyError::DuplicateId { id: Id::new("dup") });
    }

    #[test]
    fn test_empty_input() {
        let hierarchy = build(&[]).unwrap();
        assert!(hierarchy.is_empty());
        assert!(hierarchy.roots().is_empty());
        assert_eq!(hierarchy.max_depth(), None);
    }
}

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// Generates forests: each person either is a root or reports to an
    /// earlier person, then the order is shuffled so managers may follow reports.
    fn forest_strategy() -> impl Strategy<Value = Vec<Person>> {
        (1usize..60)
            .prop_flat_map(|len| {
                let managers: Vec<_> = (0..len)
                    .map(|i| {
                        if i == 0 {
                            Just(None).boxed()
                        } else {
                            proptest::option::weighted(0.85, 0..i).boxed()
                        }
                    })
                    .collect();
                managers
            })
            .prop_map(|managers| {
                managers
                    .iter()
                    .enumerate()
                    .map(|(i, manager)| {
                        let person = Person::new(Id::new(&format!("p{i}")), format!("P{i}"));
                        match manager {
                            Some(m) => person.with_manager(Id::new(&format!("p{m}"))),
                            None => person,
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    fn check_depths_follow_parents(people: Vec<Person>) -> Result<(), TestCaseError> {
        let hierarchy = HierarchyBuilder::default()
            .build(&people)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        for node in hierarchy.nodes() {
            match node.parent() {
                Some(parent) => {
                    let parent_depth = hierarchy.node(parent.as_str()).map(HierarchyNode::depth);
                    prop_assert_eq!(Some(node.depth()), parent_depth.map(|d| d + 1));
                }
                None => prop_assert_eq!(node.depth(), 0),
            }
        }
        Ok(())
    }

    fn check_ids_preserved(people: Vec<Person>) -> Result<(), TestCaseError> {
        let hierarchy = HierarchyBuilder::default()
            .build(&people)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let input: HashSet<&Id> = people.iter().map(Person::id).collect();
        let output: HashSet<&Id> = hierarchy.nodes().map(HierarchyNode::id).collect();
        prop_assert_eq!(input, output);
        prop_assert_eq!(hierarchy.len(), people.len());
        Ok(())
    }

    fn check_every_node_reaches_one_root(people: Vec<Person>) -> Result<(), TestCaseError> {
        let hierarchy = HierarchyBuilder::default()
            .build(&people)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let reached: usize = hierarchy
            .roots()
            .iter()
            .filter_map(|root| hierarchy.descendant_count(root.as_str()))
            .map(|count| count + 1)
            .sum();
        prop_assert_eq!(reached, hierarchy.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn depths_follow_parents(people in forest_strategy()) {
            check_depths_follow_parents(people)?;
        }

        #[test]
        fn ids_preserved(people in forest_strategy()) {
            check_ids_preserved(people)?;
        }

        #[test]
        fn every_node_reaches_one_root(people in forest_strategy()) {
            check_every_node_reaches_one_root(people)?;
        }
    }
}
