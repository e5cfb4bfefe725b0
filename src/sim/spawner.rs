//! Obstacle spawning, scrolling and despawning
//!
//! Obstacles are kept oldest-first. All obstacles scroll at the same speed
//! and spawn at the same x, so the front is always the leftmost one and the
//! only candidate for removal.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::Obstacle;
use crate::GameConfig;

/// What happened to the obstacle sequence during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStep {
    /// Id of an obstacle spawned this step
    pub spawned: Option<u32>,
    /// Id of an obstacle removed this step
    pub despawned: Option<u32>,
}

/// Ordered sequence of live obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Live obstacles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Oldest live obstacle (next to despawn)
    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    /// Append a new obstacle with its left edge at `x`. Returns its id.
    ///
    /// `x` must not lie left of the newest obstacle, otherwise the front would
    /// stop being the leftmost one; such pushes are refused with `None`.
    pub fn push(&mut self, x: f32, config: &GameConfig) -> Option<u32> {
        if self.obstacles.back().is_some_and(|back| x < back.bounds.x()) {
            log::warn!("Refused obstacle at x={} left of the newest one", x);
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push_back(Obstacle::new(id, config.obstacle_at(x)));
        Some(id)
    }

    /// One tick of obstacle lifecycle: spawn, scroll, despawn
    pub fn step<R: Rng>(&mut self, rng: &mut R, config: &GameConfig) -> FieldStep {
        let mut step = FieldStep::default();

        // Spawn at the right edge
        if rng.random::<f64>() < config.spawn_probability {
            step.spawned = self.push(config.field_width, config);
            if let Some(id) = step.spawned {
                log::debug!("Spawned obstacle {} ({} live)", id, self.obstacles.len());
            }
        }

        // Scroll
        for obstacle in self.obstacles.iter_mut() {
            obstacle.scroll(config.scroll_speed);
        }

        // Despawn at most the oldest
        if self.obstacles.front().is_some_and(Obstacle::is_offscreen) {
            if let Some(gone) = self.obstacles.pop_front() {
                log::debug!("Despawned obstacle {}", gone.id);
                step.despawned = Some(gone.id);
            }
        }

        step
    }
}
