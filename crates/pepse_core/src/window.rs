//! Sliding world window.
//!
//! The live world is the x-range `[left_edge, right_edge]`. When the tracked
//! position comes within `margin` of an edge the window shifts by `margin`:
//! the newly exposed strip is generated and added first, then every chunk
//! entity whose centre left the window is evicted. Ticks are strictly
//! sequential and at most one shift happens per tick.
//!
//! The manager remembers which grid columns are live. Window edges need not
//! sit on the cell grid, so a strip can start inside a column that is already
//! live; the span keeps such columns from being emitted twice. Ground cells
//! and tree parts leave one by one as their centres cross an edge. Once a
//! column itself drops out of the span, whatever is left of its tree goes
//! with it, so a tree that comes back into range is never added twice.

use glam::Vec2;
use std::ops::Range;

use crate::config::WorldConfig;
use crate::entity::{Entity, EntityId, EntityTag, Layer};
use crate::flora::{Flora, FruitState};
use crate::height_field::HeightField;
use crate::scene::SceneSink;
use crate::terrain::Terrain;

/// Source of the x the window follows, queried once per tick.
pub trait PositionTracker {
    fn tracked_x(&self) -> f32;
}

impl PositionTracker for f32 {
    fn tracked_x(&self) -> f32 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldWindow {
    left_edge: f32,
    right_edge: f32,
    margin: f32,
}

impl WorldWindow {
    pub fn new(viewport_width: f32, margin: f32) -> Self {
        Self {
            left_edge: -margin,
            right_edge: viewport_width + margin,
            margin,
        }
    }

    pub fn left_edge(&self) -> f32 {
        self.left_edge
    }

    pub fn right_edge(&self) -> f32 {
        self.right_edge
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn width(&self) -> f32 {
        self.right_edge - self.left_edge
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left_edge && x <= self.right_edge
    }

    /// The shift a tracked position at `x` calls for, if any. The two
    /// thresholds cannot both hold while the window is wider than two margins.
    pub fn pending_shift(&self, x: f32) -> Option<Shift> {
        if x > self.right_edge - self.margin {
            Some(Shift::Right)
        } else if x < self.left_edge + self.margin {
            Some(Shift::Left)
        } else {
            None
        }
    }

    fn advance(&mut self, shift: Shift) {
        let step = match shift {
            Shift::Right => self.margin,
            Shift::Left => -self.margin,
        };
        self.left_edge += step;
        self.right_edge += step;
    }
}

/// Entity counts produced or removed by one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkStats {
    pub ground: usize,
    pub trunks: usize,
    pub leaves: usize,
    pub fruits: usize,
    pub evicted: usize,
}

impl ChunkStats {
    pub fn added(&self) -> usize {
        self.ground + self.trunks + self.leaves + self.fruits
    }

    fn merge(&mut self, other: ChunkStats) {
        self.ground += other.ground;
        self.trunks += other.trunks;
        self.leaves += other.leaves;
        self.fruits += other.fruits;
        self.evicted += other.evicted;
    }
}

pub struct WorldWindowManager {
    window: WorldWindow,
    terrain: Terrain,
    flora: Flora,
    live_columns: Range<i64>,
    next_id: u64,
    last_stats: ChunkStats,
}

impl WorldWindowManager {
    pub fn new(config: &WorldConfig, seed: i64) -> Self {
        let terrain = Terrain::new(HeightField::new(seed, config), config);
        let flora = Flora::new(terrain.clone(), config);
        Self {
            window: WorldWindow::new(config.window_width, config.margin()),
            terrain,
            flora,
            live_columns: 0..0,
            next_id: 1,
            last_stats: ChunkStats::default(),
        }
    }

    pub fn window(&self) -> &WorldWindow {
        &self.window
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Grid columns whose ground and trees have been generated and not yet
    /// dropped.
    pub fn live_columns(&self) -> Range<i64> {
        self.live_columns.clone()
    }

    pub fn last_stats(&self) -> ChunkStats {
        self.last_stats
    }

    /// Hand out an id that will not collide with generated entities.
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Generate the initial window and add it to the scene.
    pub fn init<S: SceneSink + ?Sized>(&mut self, scene: &mut S) -> ChunkStats {
        let columns = self
            .terrain
            .column_span(self.window.left_edge, self.window.right_edge);

        let mut stats = self.add_ground(columns.clone(), scene);
        stats.merge(self.add_trees(columns.clone(), scene));
        self.live_columns = columns;
        self.last_stats = stats;

        log::info!(
            "World initialised: seed {}, window [{}, {}], {} entities",
            self.terrain.field().seed(),
            self.window.left_edge,
            self.window.right_edge,
            stats.added()
        );
        stats
    }

    /// Process one tick. Returns the shift performed, if any.
    pub fn tick<T, S>(&mut self, tracker: &T, scene: &mut S) -> Option<Shift>
    where
        T: PositionTracker + ?Sized,
        S: SceneSink + ?Sized,
    {
        let x = tracker.tracked_x();
        let shift = self.window.pending_shift(x)?;
        self.shift(shift, scene);
        Some(shift)
    }

    fn shift<S: SceneSink + ?Sized>(&mut self, shift: Shift, scene: &mut S) {
        let margin = self.window.margin;
        let (left, right) = (self.window.left_edge, self.window.right_edge);
        let live = self.live_columns.clone();

        let fresh = match shift {
            Shift::Right => {
                let strip = self.terrain.column_span(right, right + margin);
                let start = strip.start.max(live.end);
                start..strip.end.max(start)
            }
            Shift::Left => {
                let strip = self.terrain.column_span(left - margin, left);
                let end = strip.end.min(live.start);
                strip.start.min(end)..end
            }
        };

        let mut stats = self.add_ground(fresh.clone(), scene);
        stats.merge(self.add_trees(fresh.clone(), scene));
        if !fresh.is_empty() {
            self.live_columns = live.start.min(fresh.start)..live.end.max(fresh.end);
        }

        self.window.advance(shift);
        stats.evicted = self.evict(scene);
        self.last_stats = stats;

        log::debug!(
            "Shifted {:?}: window [{}, {}], columns {:?}, +{} -{}",
            shift,
            self.window.left_edge,
            self.window.right_edge,
            self.live_columns,
            stats.added(),
            stats.evicted
        );
    }

    fn add_ground<S: SceneSink + ?Sized>(&mut self, columns: Range<i64>, scene: &mut S) -> ChunkStats {
        let mut stats = ChunkStats::default();
        let cell = Vec2::splat(self.terrain.cell_size());
        for ground in self.terrain.generate_columns(columns) {
            let id = self.next_entity_id();
            let entity =
                Entity::new(id, EntityTag::Ground, ground.top_left, cell).with_column(ground.column);
            scene.add(entity, Layer::StaticObjects);
            stats.ground += 1;
        }
        stats
    }

    fn add_trees<S: SceneSink + ?Sized>(&mut self, columns: Range<i64>, scene: &mut S) -> ChunkStats {
        let mut stats = ChunkStats::default();
        let cell = Vec2::splat(self.terrain.cell_size());
        for tree in self.flora.generate_columns(columns) {
            let id = self.next_entity_id();
            let trunk = Entity::new(id, EntityTag::Trunk, tree.trunk_top_left, tree.trunk_size)
                .with_column(tree.column);
            scene.add(trunk, Layer::StaticObjects);
            stats.trunks += 1;

            for leaf in &tree.leaves {
                let id = self.next_entity_id();
                let entity = Entity::new(id, EntityTag::Leaf, *leaf, cell).with_column(tree.column);
                scene.add(entity, Layer::Leaves);
                stats.leaves += 1;
            }
            for fruit in &tree.fruits {
                let id = self.next_entity_id();
                let entity = Entity::new(id, EntityTag::Fruit, *fruit, cell)
                    .with_column(tree.column)
                    .with_fruit(FruitState::default());
                scene.add(entity, Layer::StaticObjects);
                stats.fruits += 1;
            }
        }
        stats
    }

    /// Remove chunk entities whose centre left the window, then shrink the
    /// live span to columns whose centre is still inside and drop anything
    /// left over from columns outside it.
    fn evict<S: SceneSink + ?Sized>(&mut self, scene: &mut S) -> usize {
        let cell = self.terrain.cell_size();
        let first_live = ((self.window.left_edge / cell) - 0.5).ceil() as i64;
        let last_live = ((self.window.right_edge / cell) - 0.5).floor() as i64;
        let start = self.live_columns.start.max(first_live);
        let end = self.live_columns.end.min(last_live + 1).max(start);
        self.live_columns = start..end;

        let window = self.window;
        let live = self.live_columns.clone();
        let doomed: Vec<EntityId> = scene
            .entities()
            .filter(|entity| entity.tag.is_chunk())
            .filter(|entity| {
                let orphaned = entity
                    .column
                    .is_some_and(|column| !live.contains(&column));
                orphaned || !window.contains_x(entity.center().x)
            })
            .map(|entity| entity.id)
            .collect();

        for id in &doomed {
            scene.remove(*id);
        }
        doomed.len()
    }
}
