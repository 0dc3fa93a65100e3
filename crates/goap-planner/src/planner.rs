use core::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use goap_actions::{ActionConfig, ActionDescriptor, ActionId};
use goap_core::{PlanSpec, WorldState};

/// An action the planner may use, with its cost for the agent being planned for.
#[derive(Debug, Clone, Copy)]
pub struct PlanCandidate<'a> {
    pub descriptor: &'a ActionDescriptor,
    pub cost: f32,
}

impl<'a> PlanCandidate<'a> {
    pub fn new(descriptor: &'a ActionDescriptor, cost: f32) -> Self {
        Self { descriptor, cost }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GoapPlannerConfig {
    pub max_expansions: usize,
}

impl Default for GoapPlannerConfig {
    fn default() -> Self {
        Self { max_expansions: 4096 }
    }
}

impl From<&ActionConfig> for GoapPlannerConfig {
    fn from(config: &ActionConfig) -> Self {
        Self {
            max_expansions: config.planner.max_expansions,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    g: f32,
    node: usize,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest f first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Direction-specific parts of the search.
trait Direction {
    fn expand(descriptor: &ActionDescriptor, state: &WorldState) -> Option<WorldState>;
    fn is_done(state: &WorldState, start: &WorldState, goal: &WorldState) -> bool;
    fn heuristic(state: &WorldState, start: &WorldState, goal: &WorldState) -> usize;
    /// Forward search walks back from the goal, so its steps come out reversed.
    const REVERSE_STEPS: bool;
}

struct Forward;

impl Direction for Forward {
    fn expand(descriptor: &ActionDescriptor, state: &WorldState) -> Option<WorldState> {
        descriptor.try_apply_to(state)
    }

    fn is_done(state: &WorldState, _start: &WorldState, goal: &WorldState) -> bool {
        goal.is_fulfilled_in(state)
    }

    fn heuristic(state: &WorldState, _start: &WorldState, goal: &WorldState) -> usize {
        goal.unmet_in(state)
    }

    const REVERSE_STEPS: bool = true;
}

struct Backward;

impl Direction for Backward {
    fn expand(descriptor: &ActionDescriptor, state: &WorldState) -> Option<WorldState> {
        descriptor.try_unapply(state)
    }

    fn is_done(state: &WorldState, start: &WorldState, _goal: &WorldState) -> bool {
        state.is_fulfilled_in(start)
    }

    fn heuristic(state: &WorldState, start: &WorldState, _goal: &WorldState) -> usize {
        state.unmet_in(start)
    }

    const REVERSE_STEPS: bool = false;
}

/// Best-first (A*) search over [`WorldState`]s.
///
/// Deterministic: equal-priority nodes are popped in insertion order and
/// candidates are tried in the order given.
#[derive(Debug, Clone, Default)]
pub struct GoapPlanner {
    config: GoapPlannerConfig,
}

impl GoapPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GoapPlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GoapPlannerConfig {
        &self.config
    }

    /// Search from `start` applying actions until `goal` is fulfilled.
    pub fn plan_forward(
        &self,
        start: &WorldState,
        goal: &WorldState,
        candidates: &[PlanCandidate<'_>],
    ) -> Option<PlanSpec<ActionId>> {
        self.search::<Forward>(start, goal, candidates)
    }

    /// Regress from `goal` un-applying actions until what remains holds in `start`.
    pub fn plan_backward(
        &self,
        start: &WorldState,
        goal: &WorldState,
        candidates: &[PlanCandidate<'_>],
    ) -> Option<PlanSpec<ActionId>> {
        self.search::<Backward>(start, goal, candidates)
    }

    fn search<D: Direction>(
        &self,
        start: &WorldState,
        goal: &WorldState,
        candidates: &[PlanCandidate<'_>],
    ) -> Option<PlanSpec<ActionId>> {
        let root = if D::REVERSE_STEPS { start } else { goal };
        if D::is_done(root, start, goal) {
            return Some(PlanSpec::empty());
        }

        let mut nodes: Vec<WorldState> = vec![root.clone()];
        let mut index: BTreeMap<WorldState, usize> = BTreeMap::new();
        index.insert(root.clone(), 0);
        let mut g_score: Vec<f32> = vec![0.0];
        let mut came_from: BTreeMap<usize, (usize, usize)> = BTreeMap::new();

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;
        open.push(OpenNode {
            f: D::heuristic(root, start, goal) as f32,
            g: 0.0,
            node: 0,
            tie,
        });
        tie += 1;

        let mut expansions: usize = 0;
        while let Some(open_node) = open.pop() {
            expansions += 1;
            if expansions > self.config.max_expansions {
                tracing::debug!(
                    max_expansions = self.config.max_expansions,
                    "planner expansion budget exhausted"
                );
                return None;
            }

            if open_node.g > g_score[open_node.node] {
                continue; // stale heap entry
            }

            let state = &nodes[open_node.node];
            if D::is_done(state, start, goal) {
                let mut steps = Vec::new();
                let mut current = open_node.node;
                while let Some((prev, candidate)) = came_from.get(&current).copied() {
                    steps.push(candidates[candidate].descriptor.id());
                    current = prev;
                }
                if D::REVERSE_STEPS {
                    steps.reverse();
                }
                return Some(PlanSpec::new(steps, open_node.g));
            }

            let state = state.clone();
            for (candidate_idx, candidate) in candidates.iter().enumerate() {
                let Some(next) = D::expand(candidate.descriptor, &state) else {
                    continue;
                };
                if next == state {
                    continue;
                }

                let next_g = open_node.g + candidate.cost;
                let next_node = match index.get(&next) {
                    Some(&existing) => {
                        if next_g >= g_score[existing] {
                            continue;
                        }
                        g_score[existing] = next_g;
                        existing
                    }
                    None => {
                        let id = nodes.len();
                        index.insert(next.clone(), id);
                        g_score.push(next_g);
                        nodes.push(next);
                        id
                    }
                };
                came_from.insert(next_node, (open_node.node, candidate_idx));

                open.push(OpenNode {
                    f: next_g + D::heuristic(&nodes[next_node], start, goal) as f32,
                    g: next_g,
                    node: next_node,
                    tie,
                });
                tie += 1;
            }
        }

        None
    }
}
