#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use goap_actions::ids::{abilities, jobs};
use goap_actions::{
    Agent, CapabilitySnapshot, FxHandle, Inventory, JobSlot, MaterialId, MaterialStack,
    Navigation, PathFlags, Presentation, WorkTargetKind, Worksites,
};
use goap_core::{AgentId, Pos};
use goap_goals::{Goal, GoalBoard, GoalCategory, GoalId, GoalMap, JobTypeId, Target};
use tracing_subscriber::EnvFilter;

/// Route action logs to the test harness. Set `RUST_LOG=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone)]
pub struct Site {
    pub kind: WorkTargetKind,
    pub immutable: bool,
    pub occupied: bool,
    pub work_left: f32,
    pub output: Option<Vec<MaterialStack>>,
    pub out_pos: Option<Pos>,
}

impl Site {
    pub fn wall(work: f32) -> Self {
        Self {
            kind: WorkTargetKind::Constructable { floor: false },
            immutable: false,
            occupied: false,
            work_left: work,
            output: None,
            out_pos: None,
        }
    }

    pub fn floor(work: f32) -> Self {
        Self {
            kind: WorkTargetKind::Constructable { floor: true },
            ..Self::wall(work)
        }
    }

    pub fn plant(output: Vec<MaterialStack>) -> Self {
        Self {
            kind: WorkTargetKind::Plant,
            output: Some(output),
            ..Self::wall(0.0)
        }
    }
}

/// In-memory host world recording every side effect.
#[derive(Debug, Default)]
pub struct ToyWorld {
    pub goals: GoalMap,
    pub positions: BTreeMap<AgentId, Pos>,
    pub busy: BTreeSet<AgentId>,
    pub flying: BTreeSet<AgentId>,
    pub walkable: BTreeSet<Pos>,
    pub sites: BTreeMap<Pos, Site>,
    pub can_step_aside: bool,
    pub can_path: bool,
    pub safe_spot: Option<Pos>,
    pub stock: BTreeMap<MaterialId, u32>,

    pub path_requests: Vec<(AgentId, Pos, PathFlags)>,
    pub step_asides: u32,
    pub nav_failures: Vec<(AgentId, Pos, Option<u64>)>,
    pub forced_walks: Vec<AgentId>,
    pub deficits: Vec<(MaterialId, u32)>,
    pub next_fx: u64,
    pub released_fx: Vec<FxHandle>,
    pub sounds: Vec<&'static str>,
    pub faced: Vec<Pos>,
    pub spawned: Vec<(MaterialStack, Pos)>,
    pub broken: Vec<Pos>,
}

impl ToyWorld {
    pub fn new() -> Self {
        Self {
            can_path: true,
            ..Self::default()
        }
    }

    pub fn place(&mut self, agent: AgentId, pos: Pos) {
        self.positions.insert(agent, pos);
    }

    pub fn open_area(&mut self, min: Pos, max: Pos) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                self.walkable.insert(Pos::new(x, y));
            }
        }
    }
}

impl Navigation for ToyWorld {
    fn position_of(&self, agent: AgentId) -> Pos {
        self.positions.get(&agent).copied().unwrap_or_default()
    }

    fn is_busy(&self, agent: AgentId) -> bool {
        self.busy.contains(&agent)
    }

    fn is_grounded(&self, agent: AgentId) -> bool {
        !self.flying.contains(&agent)
    }

    fn try_go_to(&mut self, agent: AgentId, to: Pos, flags: PathFlags) -> bool {
        self.path_requests.push((agent, to, flags));
        self.can_path
    }

    fn try_step_aside(&mut self, _agent: AgentId) -> bool {
        self.step_asides += 1;
        self.can_step_aside
    }

    fn store_nav_failure(&mut self, agent: AgentId, pos: Pos, cooldown_ticks: Option<u64>) {
        self.nav_failures.push((agent, pos, cooldown_ticks));
    }

    fn find_safe_spot_near(&self, _agent: AgentId, _pos: Pos) -> Option<Pos> {
        self.safe_spot
    }

    fn set_forced_walk(&mut self, agent: AgentId) {
        self.forced_walks.push(agent);
    }
}

impl Inventory for ToyWorld {
    fn has_enough(&self, material: MaterialId, amount: u32) -> bool {
        self.stock.get(&material).copied().unwrap_or(0) >= amount
    }

    fn notify_deficit(&mut self, material: MaterialId, amount: u32) {
        self.deficits.push((material, amount));
    }
}

impl Presentation for ToyWorld {
    fn spawn_fx(&mut self, _agent: AgentId, _at: Pos, _kind: &'static str) -> Option<FxHandle> {
        self.next_fx += 1;
        Some(FxHandle(self.next_fx))
    }

    fn release_fx(&mut self, fx: FxHandle) {
        self.released_fx.push(fx);
    }

    fn face(&mut self, _agent: AgentId, towards: Pos) {
        self.faced.push(towards);
    }

    fn play_sound(&mut self, _agent: AgentId, sound: &'static str) {
        self.sounds.push(sound);
    }
}

impl Worksites for ToyWorld {
    fn work_target(&self, pos: Pos) -> Option<WorkTargetKind> {
        self.sites.get(&pos).map(|s| s.kind)
    }

    fn is_immutable(&self, pos: Pos) -> bool {
        self.sites.get(&pos).is_some_and(|s| s.immutable)
    }

    fn is_floor_occupied(&self, pos: Pos) -> bool {
        self.sites.get(&pos).is_some_and(|s| s.occupied)
    }

    fn is_walkable(&self, pos: Pos) -> bool {
        self.walkable.contains(&pos)
    }

    fn add_deconstruction(&mut self, pos: Pos, work: f32) -> bool {
        match self.sites.get_mut(&pos) {
            Some(site) => {
                site.work_left -= work;
                site.work_left <= 0.0
            }
            None => true,
        }
    }

    fn break_down(&mut self, pos: Pos) {
        self.sites.remove(&pos);
        self.broken.push(pos);
    }

    fn harvest(&mut self, pos: Pos) -> Option<Vec<MaterialStack>> {
        self.sites.remove(&pos).and_then(|s| s.output)
    }

    fn harvest_output_pos(&self, pos: Pos) -> Pos {
        self.sites.get(&pos).and_then(|s| s.out_pos).unwrap_or(pos)
    }

    fn spawn_material(&mut self, stack: MaterialStack, at: Pos) {
        self.spawned.push((stack, at));
    }
}

impl GoalBoard for ToyWorld {
    fn goal_at(&self, pos: Pos) -> Option<Arc<Goal>> {
        self.goals.goal_at(pos)
    }
}

pub fn builder_caps() -> CapabilitySnapshot {
    CapabilitySnapshot::new()
        .with_abilities([abilities::MOVE, abilities::WORK, abilities::BUILD])
        .with_job(jobs::DEMOLITION, JobSlot::new(0.25, 4.0))
}

pub fn gardener_caps() -> CapabilitySnapshot {
    CapabilitySnapshot::new()
        .with_abilities([abilities::MANIPULATE, abilities::WORK])
        .with_job(jobs::PLANTS, JobSlot::new(0.4, 2.0))
}

pub fn agent(id: u64, caps: CapabilitySnapshot) -> Agent {
    Agent::new(AgentId(id), format!("worker-{id}"), caps, 7)
}

pub fn tile_goal(id: u64, job: JobTypeId, pos: Pos) -> Arc<Goal> {
    Arc::new(Goal::new(GoalId(id), job, GoalCategory::Colony, Target::tile(pos)))
}
