use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use goap_core::Pos;

use crate::{Goal, GoalId, Target};

/// Spatial lookup of the goal hosted on a tile.
pub trait GoalBoard {
    fn goal_at(&self, pos: Pos) -> Option<Arc<Goal>>;
}

/// Tile-indexed goal map. Multi-tile targets are reachable from every tile
/// they cover.
#[derive(Debug, Default)]
pub struct GoalMap {
    tiles: RwLock<BTreeMap<Pos, Arc<Goal>>>,
}

impl GoalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, goal: Arc<Goal>) {
        let mut tiles = self.tiles.write().unwrap_or_else(PoisonError::into_inner);
        for pos in covered_tiles(goal.target()) {
            tiles.insert(pos, Arc::clone(&goal));
        }
    }

    /// Remove a goal from every tile it was registered on.
    pub fn remove(&self, id: GoalId) -> Option<Arc<Goal>> {
        let mut tiles = self.tiles.write().unwrap_or_else(PoisonError::into_inner);
        let mut removed = None;
        tiles.retain(|_, goal| {
            if goal.id() == id {
                removed = Some(Arc::clone(goal));
                false
            } else {
                true
            }
        });
        removed
    }

    /// Number of occupied tiles.
    pub fn len(&self) -> usize {
        self.tiles.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GoalBoard for GoalMap {
    fn goal_at(&self, pos: Pos) -> Option<Arc<Goal>> {
        self.tiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&pos)
            .cloned()
    }
}

fn covered_tiles(target: &Target) -> Vec<Pos> {
    match *target {
        Target::Tile { pos, footprint } => {
            let mut out = Vec::with_capacity(usize::from(footprint.width) * usize::from(footprint.height));
            for dy in 0..i32::from(footprint.height.max(1)) {
                for dx in 0..i32::from(footprint.width.max(1)) {
                    out.push(pos.offset(dx, dy));
                }
            }
            out
        }
        Target::Entity { pos, .. } | Target::Position(pos) => vec![pos],
    }
}
