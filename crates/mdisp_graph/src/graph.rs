//! The type graph.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use mdisp_types::{SharedOracle, TypeTuple};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::node::{Node, NodeId, RootSet};
use crate::stack::ensure_sufficient_stack;

/// Number of root sets allocated on first use.
const INITIAL_ARITIES: usize = 4;

/// How `lookup` chooses among maximal matches of equal specificity.
///
/// Both policies are deterministic: the choice depends only on the order in
/// which the tied tuples were first registered, never on traversal order.
/// Overwriting a tuple's payload keeps its original position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Prefer the tuple registered first.
    #[default]
    FirstRegistered,

    /// Prefer the tuple registered last.
    LastRegistered,
}

impl TieBreak {
    /// Order two serials so that the preferred one sorts first.
    fn order(self, a: u64, b: u64) -> Ordering {
        match self {
            TieBreak::FirstRegistered => a.cmp(&b),
            TieBreak::LastRegistered => b.cmp(&a),
        }
    }
}

/// A resolved lookup.
pub struct Match<'a, P> {
    /// The registered tuple the query resolved to.
    pub key: &'a TypeTuple,

    /// Its payload.
    pub value: &'a P,

    /// Specificity of `key`.
    pub specificity: u32,

    /// Whether another maximal match had the same specificity.
    pub ambiguous: bool,
}

impl<P> Clone for Match<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Match<'_, P> {}

impl<P: fmt::Debug> fmt::Debug for Match<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("key", self.key)
            .field("value", self.value)
            .field("specificity", &self.specificity)
            .field("ambiguous", &self.ambiguous)
            .finish()
    }
}

/// Values indexed by type tuples, resolvable by inheritance.
///
/// # Invariants
///
/// For every node, `children` are exactly the maximal proper subtuples among
/// all registered tuples below it, and `parents` the minimal proper
/// supertuples. Root sets hold the tuples with no registered supertuple.
///
/// # Thread Safety
///
/// Mutation takes `&mut self`. Every read takes `&self`, so a graph wrapped
/// in an `Arc` (or behind a read lock) can be shared once built.
pub struct TypeGraph<P> {
    oracle: SharedOracle,

    /// Node storage; `None` marks a free slot.
    nodes: Vec<Option<Node<P>>>,

    /// Free slots in `nodes`.
    free: Vec<NodeId>,

    /// Exact-match index over every registered tuple.
    index: FxHashMap<TypeTuple, NodeId>,

    /// Root sets indexed by arity.
    roots: Vec<RootSet>,

    /// Serial for the next new node.
    next_serial: u64,

    tie_break: TieBreak,
}

impl<P> TypeGraph<P> {
    /// Create an empty graph answering subtype queries through `oracle`.
    pub fn new(oracle: SharedOracle) -> Self {
        Self::with_tie_break(oracle, TieBreak::default())
    }

    /// Create an empty graph with an explicit tie-break policy.
    pub fn with_tie_break(oracle: SharedOracle, tie_break: TieBreak) -> Self {
        Self {
            oracle,
            nodes: Vec::new(),
            free: Vec::new(),
            index: FxHashMap::default(),
            roots: Vec::new(),
            next_serial: 0,
            tie_break,
        }
    }

    /// The oracle this graph was built against.
    pub fn oracle(&self) -> &SharedOracle {
        &self.oracle
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Number of registered tuples across all arities.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of registered tuples of one arity.
    pub fn len_for_arity(&self, arity: usize) -> usize {
        self.roots.get(arity).map_or(0, |set| set.len)
    }

    /// Every arity with at least one registered tuple, ascending.
    pub fn arities(&self) -> Vec<usize> {
        self.roots
            .iter()
            .enumerate()
            .filter(|(_, set)| set.len > 0)
            .map(|(arity, _)| arity)
            .collect()
    }

    /// Set the payload for `key`.
    ///
    /// An existing node keeps its identity and position and only has its
    /// payload replaced; the previous payload is returned. Otherwise a new
    /// node is linked into the graph.
    ///
    /// # Panics
    ///
    /// Panics if `key` is empty. A zero-arity key is a caller bug, not data.
    pub fn set(&mut self, key: TypeTuple, value: P) -> Option<P> {
        assert!(
            !key.is_empty(),
            "type graph keys must have at least one element"
        );

        if let Some(&id) = self.index.get(&key) {
            tracing::debug!(key = %key.display(&*self.oracle), "replacing payload");
            return Some(std::mem::replace(&mut self.node_mut(id).value, value));
        }

        self.insert(key, value);
        None
    }

    /// Payload registered for exactly `key`. Inheritance is not considered.
    pub fn get(&self, key: &TypeTuple) -> Option<&P> {
        self.index.get(key).map(|&id| &self.node(id).value)
    }

    /// Check if exactly `key` is registered.
    pub fn contains(&self, key: &TypeTuple) -> bool {
        self.index.contains_key(key)
    }

    /// Payload of the most specific registered supertuple of `query`.
    pub fn lookup(&self, query: &TypeTuple) -> Option<&P> {
        self.lookup_full(query).map(|found| found.value)
    }

    /// The registered tuple `query` resolves to.
    pub fn lookup_key(&self, query: &TypeTuple) -> Option<&TypeTuple> {
        self.lookup_full(query).map(|found| found.key)
    }

    /// Resolve `query`, reporting the matched key and whether the choice
    /// was a tie-break between equally specific matches.
    pub fn lookup_full(&self, query: &TypeTuple) -> Option<Match<'_, P>> {
        let found = self.maximal_supertuples(query);
        let best = found
            .iter()
            .copied()
            .min_by(|&a, &b| self.preference(a, b))?;
        let best_node = self.node(best);

        let tied = found
            .iter()
            .filter(|&&id| id != best && self.node(id).specificity == best_node.specificity)
            .count();
        if tied > 0 {
            tracing::debug!(
                query = %query.display(&*self.oracle),
                chosen = %best_node.key.display(&*self.oracle),
                tied,
                "ambiguous lookup resolved by tie-break"
            );
        }

        Some(self.to_match(best, tied > 0))
    }

    /// Every maximal match for `query`, best first.
    ///
    /// The first element is what `lookup` returns. Useful for diagnosing
    /// ambiguous registrations.
    pub fn candidates(&self, query: &TypeTuple) -> Vec<Match<'_, P>> {
        let mut found = self.maximal_supertuples(query);
        found.sort_by(|&a, &b| self.preference(a, b));

        let top = found.first().map(|&id| self.node(id).specificity);
        let tied = found
            .iter()
            .filter(|&&id| Some(self.node(id).specificity) == top)
            .count();

        found
            .into_iter()
            .map(|id| {
                let ambiguous = tied > 1 && Some(self.node(id).specificity) == top;
                self.to_match(id, ambiguous)
            })
            .collect()
    }

    /// Remove exactly `key`, returning its payload.
    ///
    /// Children of the removed node are re-linked under each of its parents
    /// unless still reachable from that parent through another path.
    /// Children left without any parent become roots.
    #[tracing::instrument(level = "trace", skip_all, fields(key = %key))]
    pub fn remove(&mut self, key: &TypeTuple) -> Option<P> {
        let id = self.index.remove(key)?;
        let node = self.release(id);
        let arity = key.arity();

        for &parent in &node.parents {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
        if node.parents.is_empty() {
            self.roots[arity].roots.retain(|root| *root != id);
        }
        for &child in &node.children {
            self.node_mut(child).parents.retain(|parent| *parent != id);
        }

        for &child in &node.children {
            for &parent in &node.parents {
                if !self.reaches(parent, child) {
                    self.link(parent, child);
                }
            }
            if self.node(child).parents.is_empty() {
                self.roots[arity].roots.push(child);
            }
        }

        self.roots[arity].len -= 1;
        tracing::debug!(
            key = %key.display(&*self.oracle),
            relinked = node.children.len(),
            "removed tuple"
        );
        Some(node.value)
    }

    /// Registered tuples of one arity, breadth-first from the roots.
    pub fn keys_by_arity(&self, arity: usize) -> Vec<&TypeTuple> {
        self.breadth_first(arity)
            .into_iter()
            .map(|id| &self.node(id).key)
            .collect()
    }

    /// Payloads of one arity, breadth-first from the roots.
    pub fn values_by_arity(&self, arity: usize) -> Vec<&P> {
        self.breadth_first(arity)
            .into_iter()
            .map(|id| &self.node(id).value)
            .collect()
    }

    /// Root tuples of one arity, in root-set order.
    pub fn roots_of(&self, arity: usize) -> Vec<&TypeTuple> {
        self.roots.get(arity).map_or_else(Vec::new, |set| {
            set.roots.iter().map(|&id| &self.node(id).key).collect()
        })
    }

    /// Direct parents (minimal registered supertuples) of `key`.
    pub fn parents_of(&self, key: &TypeTuple) -> Vec<&TypeTuple> {
        self.index.get(key).map_or_else(Vec::new, |&id| {
            self.node(id)
                .parents
                .iter()
                .map(|&parent| &self.node(parent).key)
                .collect()
        })
    }

    /// Direct children (maximal registered subtuples) of `key`.
    pub fn children_of(&self, key: &TypeTuple) -> Vec<&TypeTuple> {
        self.index.get(key).map_or_else(Vec::new, |&id| {
            self.node(id)
                .children
                .iter()
                .map(|&child| &self.node(child).key)
                .collect()
        })
    }

    /// Iterate every registered `(key, payload)` pair in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&TypeTuple, &P)> + '_ {
        self.nodes
            .iter()
            .flatten()
            .map(|node| (&node.key, &node.value))
    }

    // Insertion

    #[tracing::instrument(level = "trace", skip_all, fields(key = %key))]
    fn insert(&mut self, key: TypeTuple, value: P) {
        let arity = key.arity();
        self.ensure_arity(arity);

        let parents = self.maximal_supertuples(&key);
        let children = self.maximal_subtuples(&key, &parents);
        let specificity = key.specificity(&*self.oracle);
        let serial = self.next_serial;
        self.next_serial += 1;

        tracing::debug!(
            key = %key.display(&*self.oracle),
            parents = parents.len(),
            children = children.len(),
            "registering tuple"
        );

        let id = self.alloc(Node {
            key: key.clone(),
            value,
            specificity,
            serial,
            parents: SmallVec::new(),
            children: SmallVec::new(),
        });

        // Edges parent -> child now run through the new node.
        for &child in &children {
            for &parent in &parents {
                self.unlink(parent, child);
            }
            if parents.is_empty() {
                self.roots[arity].roots.retain(|root| *root != child);
            }
            self.link(id, child);
        }

        if parents.is_empty() {
            self.roots[arity].roots.push(id);
        } else {
            for &parent in &parents {
                self.link(parent, id);
            }
        }

        self.roots[arity].len += 1;
        self.index.insert(key, id);
    }

    /// Grow the root-set table to cover `arity`, at least doubling.
    fn ensure_arity(&mut self, arity: usize) {
        if arity < self.roots.len() {
            return;
        }
        let new_len = (arity + 1)
            .max(self.roots.len() * 2)
            .max(INITIAL_ARITIES);
        self.roots.resize_with(new_len, RootSet::default);
    }

    /// Maximal registered subtuples of `key` (the new node's children).
    ///
    /// Every subtuple of `key` sits below each of its parents, so walking a
    /// single parent's subtree is enough. Without parents every root of the
    /// arity is a candidate. The walk stops at subsumed nodes: anything
    /// below one is subsumed too and cannot be maximal.
    fn maximal_subtuples(&self, key: &TypeTuple, parents: &[NodeId]) -> SmallVec<[NodeId; 4]> {
        let start: &[NodeId] = match parents.first() {
            Some(&parent) => self.node(parent).children.as_slice(),
            None => self
                .roots
                .get(key.arity())
                .map_or(&[][..], |set| set.roots.as_slice()),
        };

        let oracle = &*self.oracle;
        let mut seen = FxHashSet::default();
        let mut stack: Vec<NodeId> = start.to_vec();
        let mut subsumed: SmallVec<[NodeId; 4]> = SmallVec::new();

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let node = self.node(id);
            if node.key.is_subtuple_of(key, oracle) {
                subsumed.push(id);
            } else {
                stack.extend(node.children.iter().copied());
            }
        }

        subsumed
            .iter()
            .copied()
            .filter(|&candidate| {
                let candidate_key = &self.node(candidate).key;
                !subsumed.iter().any(|&other| {
                    other != candidate && candidate_key.is_subtuple_of(&self.node(other).key, oracle)
                })
            })
            .collect()
    }

    // Traversal

    /// Registered supertuples of `query` with no registered supertuple of
    /// `query` below them: the deepest match along every path from the roots.
    ///
    /// Used both to resolve lookups and to find a new node's parents.
    fn maximal_supertuples(&self, query: &TypeTuple) -> SmallVec<[NodeId; 4]> {
        let mut found = SmallVec::new();
        let Some(set) = self.roots.get(query.arity()) else {
            return found;
        };

        let mut visited = FxHashMap::default();
        for &root in &set.roots {
            self.descend(root, query, &mut visited, &mut found);
        }
        found
    }

    /// Visit `id` for `query`; returns whether `query` is a subtuple of it.
    ///
    /// A matching node is recorded only when none of its children match.
    /// `visited` memoizes the answer per node, since the DAG shares nodes
    /// between paths.
    fn descend(
        &self,
        id: NodeId,
        query: &TypeTuple,
        visited: &mut FxHashMap<NodeId, bool>,
        found: &mut SmallVec<[NodeId; 4]>,
    ) -> bool {
        if let Some(&matched) = visited.get(&id) {
            return matched;
        }

        let node = self.node(id);
        let matched = if node.key == *query {
            found.push(id);
            true
        } else if query.is_subtuple_of(&node.key, &*self.oracle) {
            let mut deeper = false;
            for &child in &node.children {
                if ensure_sufficient_stack(|| self.descend(child, query, visited, found)) {
                    deeper = true;
                }
            }
            if !deeper {
                found.push(id);
            }
            true
        } else {
            false
        };

        visited.insert(id, matched);
        matched
    }

    /// Whether `to` is reachable from `from` through child edges.
    ///
    /// Only nodes that are supertuples of `to` can lead to it, so the walk
    /// prunes everything else.
    fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let target = &self.node(to).key;
        let oracle = &*self.oracle;
        let mut seen = FxHashSet::default();
        let mut stack = vec![from];

        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            stack.extend(
                self.node(id)
                    .children
                    .iter()
                    .copied()
                    .filter(|&child| child == to || target.is_subtuple_of(&self.node(child).key, oracle)),
            );
        }
        false
    }

    fn breadth_first(&self, arity: usize) -> Vec<NodeId> {
        let Some(set) = self.roots.get(arity) else {
            return Vec::new();
        };

        let mut order = Vec::with_capacity(set.len);
        let mut seen: FxHashSet<NodeId> = set.roots.iter().copied().collect();
        let mut queue: VecDeque<NodeId> = set.roots.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &child in &self.node(id).children {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        order
    }

    /// Order two maximal matches so the preferred one sorts first.
    fn preference(&self, a: NodeId, b: NodeId) -> Ordering {
        let (a, b) = (self.node(a), self.node(b));
        b.specificity
            .cmp(&a.specificity)
            .then_with(|| self.tie_break.order(a.serial, b.serial))
    }

    fn to_match(&self, id: NodeId, ambiguous: bool) -> Match<'_, P> {
        let node = self.node(id);
        Match {
            key: &node.key,
            value: &node.value,
            specificity: node.specificity,
            ambiguous,
        }
    }

    // Arena

    fn node(&self, id: NodeId) -> &Node<P> {
        match &self.nodes[id.index()] {
            Some(node) => node,
            None => unreachable!("dangling type graph node {id:?}"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        match &mut self.nodes[id.index()] {
            Some(node) => node,
            None => unreachable!("dangling type graph node {id:?}"),
        }
    }

    fn alloc(&mut self, node: Node<P>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Some(node);
            return id;
        }
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    fn release(&mut self, id: NodeId) -> Node<P> {
        match self.nodes[id.index()].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => unreachable!("double release of type graph node {id:?}"),
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        let parent_node = self.node_mut(parent);
        if parent_node.children.contains(&child) {
            return;
        }
        parent_node.children.push(child);
        self.node_mut(child).parents.push(parent);
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != child);
        self.node_mut(child).parents.retain(|p| *p != parent);
    }
}

impl<P: fmt::Debug> fmt::Debug for TypeGraph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
