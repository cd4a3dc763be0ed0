//! Core collision detection system
//!
//! The collision world owns every entity in a slot map and indexes them in a
//! uniform grid. One call to [`CollisionWorld::step`] runs two phases:
//!
//! 1. **Pose update + grid maintenance**: each live, collidable entity runs
//!    its behavior, is clamped inside the world, and has its grid membership
//!    re-synced when the cells covered by its bounds changed.
//! 2. **Broad + narrow phase**: each entity queries the grid with its bounds,
//!    runs the shape-pair SAT test on every candidate it precedes in key
//!    order, and on contact both entities are pushed apart by half the MTV.
//!
//! Pairs are resolved sequentially: later pairs see positions already
//! corrected by earlier ones. Only the first entity of a resolved pair is
//! re-synced in the grid during phase 2; the second one is picked up by
//! phase 1 of the next step.

use slotmap::SlotMap;

use crate::config::WorldConfig;
use crate::foundation::math::{Rect, Vec2};
use crate::spatial::{GridError, UniformGrid};
use super::body::{Body, Collidable};
use super::collision::check_shapes_collide;

slotmap::new_key_type! {
    /// Stable handle to an entity stored in a [`CollisionWorld`]
    pub struct EntityKey;
}

/// A pair of entities separated during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Entity that queried the grid (moved by `-mtv / 2`)
    pub entity_a: EntityKey,
    /// Candidate entity (moved by `+mtv / 2`)
    pub entity_b: EntityKey,
    /// Minimum translation vector pointing from `entity_a` toward `entity_b`
    pub mtv: Vec2,
}

/// Entity together with the rectangle it was last inserted into the grid with
#[derive(Debug)]
struct Slot<E> {
    entity: E,
    grid_rect: Rect,
}

/// Entity arena, broad-phase grid and per-step resolution pass
pub struct CollisionWorld<E: Collidable> {
    config: WorldConfig,
    entities: SlotMap<EntityKey, Slot<E>>,
    grid: UniformGrid<EntityKey>,
    contacts: Vec<Contact>,
}

impl<E: Collidable> CollisionWorld<E> {
    /// Create an empty world sized by `config`
    pub fn new(config: WorldConfig) -> Result<Self, GridError> {
        let grid = UniformGrid::new(config.world_width, config.world_height, config.cell_size)?;
        log::info!(
            "Collision world created: {}x{} units, {}x{} grid cells",
            config.world_width, config.world_height, grid.cols(), grid.rows()
        );
        Ok(Self {
            config,
            entities: SlotMap::with_key(),
            grid,
            contacts: Vec::new(),
        })
    }

    /// World configuration
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Broad-phase grid (read only)
    pub const fn grid(&self) -> &UniformGrid<EntityKey> {
        &self.grid
    }

    /// Number of stored entities, dead ones included
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if no entities are stored
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Add an entity and index it under its current bounds
    pub fn spawn(&mut self, entity: E) -> EntityKey {
        let grid_rect = entity.body().bounds();
        let key = self.entities.insert(Slot { entity, grid_rect });
        self.grid.insert(key, &grid_rect);
        log::debug!("Spawned {:?} with bounds {:?}", key, grid_rect);
        key
    }

    /// Remove an entity from the grid and the arena
    pub fn despawn(&mut self, key: EntityKey) -> Option<E> {
        let Some(slot) = self.entities.remove(key) else {
            log::warn!("Despawn requested for unknown entity {:?}", key);
            return None;
        };
        self.grid.remove(key, &slot.grid_rect);
        log::debug!("Despawned {:?}", key);
        Some(slot.entity)
    }

    /// Remove every entity that is no longer alive
    pub fn reap_dead(&mut self) -> Vec<E> {
        let dead: Vec<EntityKey> = self
            .entities
            .iter()
            .filter(|(_, slot)| !slot.entity.body().is_alive())
            .map(|(key, _)| key)
            .collect();
        dead.into_iter().filter_map(|key| self.despawn(key)).collect()
    }

    /// Move an entity to `position`, re-indexing it immediately
    ///
    /// Returns `false` if the key is unknown.
    pub fn teleport(&mut self, key: EntityKey, position: Vec2) -> bool {
        let Some(slot) = self.entities.get_mut(key) else {
            return false;
        };
        self.grid.remove(key, &slot.grid_rect);
        slot.entity.body_mut().set_position(position);
        slot.grid_rect = slot.entity.body().bounds();
        self.grid.insert(key, &slot.grid_rect);
        true
    }

    /// Shared access to an entity
    pub fn get(&self, key: EntityKey) -> Option<&E> {
        self.entities.get(key).map(|slot| &slot.entity)
    }

    /// Mutable access to an entity
    ///
    /// Pose changes made here reach the grid on the next [`step`](Self::step)
    /// or an explicit [`resync`](Self::resync).
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut E> {
        self.entities.get_mut(key).map(|slot| &mut slot.entity)
    }

    /// Bring an entity's grid membership in line with its current bounds
    pub fn resync(&mut self, key: EntityKey) -> bool {
        let Some(slot) = self.entities.get_mut(key) else {
            return false;
        };
        sync_grid_membership(&mut self.grid, key, slot);
        true
    }

    /// Iterate over every entity with its key
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &E)> {
        self.entities.iter().map(|(key, slot)| (key, &slot.entity))
    }

    /// Distinct entities indexed in the cells a rectangle spans, in key order
    ///
    /// Coarse: entities are returned when they share a cell with `area`,
    /// not only when their bounds overlap it.
    pub fn query_region(&self, area: &Rect) -> Vec<EntityKey> {
        let mut found = Vec::new();
        self.grid.query(area, |key| found.push(key));
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Contacts resolved by the last [`step`](Self::step)
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Advance one frame: behavior + grid maintenance, then collision resolution
    pub fn step(&mut self, delta_time: f32) -> &[Contact] {
        self.contacts.clear();
        self.update_poses(delta_time);
        self.resolve_collisions();
        &self.contacts
    }

    fn update_poses(&mut self, delta_time: f32) {
        let (width, height) = (self.config.world_width, self.config.world_height);

        for (key, slot) in &mut self.entities {
            if !slot.entity.body().is_active() {
                continue;
            }

            slot.entity.update(delta_time);
            keep_inside(slot.entity.body_mut(), width, height);
            sync_grid_membership(&mut self.grid, key, slot);
        }
    }

    fn resolve_collisions(&mut self) {
        let keys: Vec<EntityKey> = self.entities.keys().collect();
        let mut candidates = Vec::new();

        for key_a in keys {
            let Some(slot_a) = self.entities.get(key_a) else {
                continue;
            };
            if !slot_a.entity.body().is_active() {
                continue;
            }

            let area = slot_a.entity.body().bounds();
            candidates.clear();
            self.grid.query(&area, |key| candidates.push(key));
            candidates.sort_unstable();
            candidates.dedup();

            for &key_b in &candidates {
                // Skips self and visits each unordered pair once
                if key_b <= key_a {
                    continue;
                }
                let Some([slot_a, slot_b]) = self.entities.get_disjoint_mut([key_a, key_b]) else {
                    continue;
                };
                if !slot_b.entity.body().is_active() {
                    continue;
                }

                let Some(mtv) =
                    check_shapes_collide(slot_a.entity.body().shape(), slot_b.entity.body().shape())
                else {
                    continue;
                };

                let half = mtv * 0.5;
                slot_a.entity.body_mut().translate(-half);
                slot_b.entity.body_mut().translate(half);
                sync_grid_membership(&mut self.grid, key_a, slot_a);

                log::debug!("Resolved contact {:?} <-> {:?}, mtv {:?}", key_a, key_b, mtv);
                self.contacts.push(Contact {
                    entity_a: key_a,
                    entity_b: key_b,
                    mtv,
                });
            }
        }
    }
}

/// Re-insert the entity when the cells covered by its bounds changed
fn sync_grid_membership<E: Collidable>(
    grid: &mut UniformGrid<EntityKey>,
    key: EntityKey,
    slot: &mut Slot<E>,
) {
    let bounds = slot.entity.body().bounds();
    if grid.span(&slot.grid_rect) != grid.span(&bounds) {
        log::trace!("Re-indexing {:?}: {:?} -> {:?}", key, slot.grid_rect, bounds);
        grid.remove(key, &slot.grid_rect);
        grid.insert(key, &bounds);
    }
    slot.grid_rect = bounds;
}

/// Shift a body so its bounds stay inside `[0, width] x [0, height]`
fn keep_inside(body: &mut Body, width: f32, height: f32) {
    let bounds = body.bounds();
    let shift = Vec2::new(
        clamp_shift(bounds.x, bounds.width, width),
        clamp_shift(bounds.y, bounds.height, height),
    );
    if shift != Vec2::zeros() {
        body.translate(shift);
    }
}

/// Offset that brings `[min, min + extent]` inside `[0, limit]`, centering it when too large
fn clamp_shift(min: f32, extent: f32, limit: f32) -> f32 {
    if extent >= limit {
        (limit - extent) * 0.5 - min
    } else if min < 0.0 {
        -min
    } else if min + extent > limit {
        limit - (min + extent)
    } else {
        0.0
    }
}
