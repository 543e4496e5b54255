//! The project dependency graph.
//!
//! An edge `A -> B` means "A requires B". The graph is built per resolve
//! call and owns all of its bookkeeping; nothing survives between calls.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;

use crate::resolver::errors::ResolveError;

/// A project in the build order together with its priority score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    /// Project name
    pub name: String,

    /// Number of distinct dependency chains leading into the project
    pub priority: u64,
}

/// Projects in build order: every project appears after all projects it
/// requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOrder {
    pub entries: Vec<OrderEntry>,
}

impl BuildOrder {
    /// Project names in build order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Position of a project in the order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Require-edges between the active projects of a solution.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Project graph, nodes in insertion order
    graph: DiGraph<String, ()>,

    /// Map from project name to node index
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        DependencyGraph {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
        }
    }

    /// Add a project node. Insertion order breaks priority ties.
    pub fn add_project(&mut self, name: impl Into<String>) -> Result<NodeIndex, ResolveError> {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(ResolveError::DuplicateProject { name });
        }

        let node = self.graph.add_node(name.clone());
        self.nodes.insert(name, node);
        Ok(node)
    }

    /// Record that `from` requires `to`.
    ///
    /// Edges touching a project that is not in the graph are skipped, and
    /// the method returns `false`. Duplicate edges are collapsed.
    pub fn add_requirement(&mut self, from: &str, to: &str) -> bool {
        let (Some(&from_node), Some(&to_node)) = (self.nodes.get(from), self.nodes.get(to)) else {
            tracing::debug!("skipping edge `{}` -> `{}`: inactive project", from, to);
            return false;
        };

        if !self.graph.contains_edge(from_node, to_node) {
            self.graph.add_edge(from_node, to_node, ());
        }
        true
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Direct requirements of a project.
    pub fn requirements(&self, name: &str) -> Vec<&str> {
        let Some(&node) = self.nodes.get(name) else {
            return Vec::new();
        };
        let mut deps: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        deps.sort();
        deps.into_iter().map(|n| self.graph[n].as_str()).collect()
    }

    /// Fail with the first cycle found, if any.
    pub fn check_acyclic(&self) -> Result<(), ResolveError> {
        let mut cyclic: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .collect();

        if cyclic.is_empty() {
            return Ok(());
        }

        for scc in &mut cyclic {
            scc.sort();
        }
        cyclic.sort();

        Err(ResolveError::CycleDetected {
            projects: self.cycle_path(&cyclic[0]),
        })
    }

    /// Walk one concrete cycle inside a strongly connected component.
    ///
    /// Every node of a cyclic component has a successor inside it, so the
    /// walk revisits a node within `scc.len() + 1` steps.
    fn cycle_path(&self, scc: &[NodeIndex]) -> Vec<String> {
        let members: HashSet<NodeIndex> = scc.iter().copied().collect();
        let mut path = vec![scc[0]];
        let mut current = scc[0];

        loop {
            let next = self
                .graph
                .neighbors(current)
                .filter(|n| members.contains(n))
                .min();
            let Some(next) = next else {
                break;
            };

            if let Some(start) = path.iter().position(|&n| n == next) {
                path.drain(..start);
                path.push(next);
                break;
            }
            path.push(next);
            current = next;
        }

        path.into_iter().map(|n| self.graph[n].clone()).collect()
    }

    /// Compute the priority score of every node, indexed by node.
    ///
    /// For an edge `A -> B`, B gains one chain for the edge itself plus
    /// every chain already leading into A.
    fn priorities(&self) -> Result<Vec<u64>, ResolveError> {
        self.check_acyclic()?;

        // Dependents come before their requirements in this order.
        let order = toposort(&self.graph, None).map_err(|cycle| ResolveError::CycleDetected {
            projects: vec![self.graph[cycle.node_id()].clone()],
        })?;

        let mut priority = vec![0u64; self.graph.node_count()];
        for node in order {
            let inherited = priority[node.index()].saturating_add(1);
            for dep in self.graph.neighbors(node) {
                priority[dep.index()] = priority[dep.index()].saturating_add(inherited);
            }
        }

        Ok(priority)
    }

    /// Resolve the build order.
    ///
    /// Kahn's algorithm over the requirement edges: a project becomes ready
    /// once all its requirements are emitted. Among ready projects the
    /// highest priority goes first, ties broken by insertion order.
    pub fn resolve(&self) -> Result<BuildOrder, ResolveError> {
        let priority = self.priorities()?;

        let mut pending: Vec<usize> = self
            .graph
            .node_indices()
            .map(|n| self.graph.neighbors(n).count())
            .collect();

        let mut ready: BinaryHeap<(u64, Reverse<NodeIndex>)> = self
            .graph
            .node_indices()
            .filter(|n| pending[n.index()] == 0)
            .map(|n| (priority[n.index()], Reverse(n)))
            .collect();

        let mut entries = Vec::with_capacity(self.graph.node_count());
        while let Some((score, Reverse(node))) = ready.pop() {
            entries.push(OrderEntry {
                name: self.graph[node].clone(),
                priority: score,
            });

            for dependent in self.graph.neighbors_directed(node, Direction::Incoming) {
                pending[dependent.index()] -= 1;
                if pending[dependent.index()] == 0 {
                    ready.push((priority[dependent.index()], Reverse(dependent)));
                }
            }
        }

        Ok(BuildOrder { entries })
    }
}
