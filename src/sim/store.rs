//! Live collections of world objects, projectiles and particles

use serde::{Deserialize, Serialize};

use super::state::{Entity, Particle};

/// Purge bounds used by [`EntityStore::compact`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactBounds {
    /// Bottom edge of the playfield
    pub height: f32,
    /// World objects at or below `height + object_margin` are purged
    pub object_margin: f32,
    /// Projectiles outside `(-margin, height + margin)` are purged
    pub projectile_margin: f32,
}

/// Owner of every entity in the current level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    /// Enemies and fuel pickups, in spawn order
    pub objects: Vec<Entity>,
    /// Player and hostile shots, in spawn order
    pub projectiles: Vec<Entity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl EntityStore {
    /// Add an entity, assigning it a fresh id
    pub fn spawn(&mut self, mut entity: Entity) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        entity.id = self.next_id;
        if entity.kind.is_projectile() {
            self.projectiles.push(entity);
        } else {
            self.objects.push(entity);
        }
        self.next_id
    }

    /// Add a particle, dropping the oldest once `cap` is reached
    pub fn push_particle(&mut self, particle: Particle, cap: usize) {
        if cap == 0 {
            return;
        }
        if self.particles.len() >= cap {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Visit active world objects, then active projectiles, in insertion order
    pub fn for_each_active(&self, mut f: impl FnMut(&Entity)) {
        self.objects
            .iter()
            .chain(self.projectiles.iter())
            .filter(|e| e.active)
            .for_each(|e| f(e));
    }

    pub fn active_count(&self) -> usize {
        let mut count = 0;
        self.for_each_active(|_| count += 1);
        count
    }

    /// Remove inactive, off-screen and expired entries
    pub fn compact(&mut self, bounds: CompactBounds) {
        let object_limit = bounds.height + bounds.object_margin;
        self.objects.retain(|o| o.active && o.pos.y < object_limit);

        let top = -bounds.projectile_margin;
        let bottom = bounds.height + bounds.projectile_margin;
        self.projectiles
            .retain(|p| p.active && p.pos.y > top && p.pos.y < bottom);

        self.particles.retain(|p| p.life > 0.0);
    }

    /// Drop everything (level or run reset); ids keep increasing
    pub fn clear(&mut self) {
        self.objects.clear();
        self.projectiles.clear();
        self.particles.clear();
    }
}
