//! The player-controlled cook.

use std::time::Duration;

use kitchen_core::{CellCoord, Direction, EntityId, WorldPoint};

use crate::grid::Grid;

#[derive(Clone, Debug)]
pub(crate) struct Actor {
    position: WorldPoint,
    facing: Direction,
    heading: Option<Direction>,
    held: Option<EntityId>,
    speed: f32,
}

impl Actor {
    pub(crate) fn new(position: WorldPoint, speed: f32) -> Self {
        Self {
            position,
            facing: Direction::Down,
            heading: None,
            held: None,
            speed,
        }
    }

    pub(crate) const fn position(&self) -> WorldPoint {
        self.position
    }

    pub(crate) const fn facing(&self) -> Direction {
        self.facing
    }

    pub(crate) const fn held(&self) -> Option<EntityId> {
        self.held
    }

    /// Queues a walking direction for the next tick. The latest request wins.
    pub(crate) fn steer(&mut self, direction: Direction) {
        self.heading = Some(direction);
    }

    pub(crate) fn hold(&mut self, entity: EntityId) {
        self.held = Some(entity);
    }

    pub(crate) fn release(&mut self) -> Option<EntityId> {
        self.held.take()
    }

    /// Tile containing the actor's centre.
    pub(crate) fn cell(&self, grid: &Grid) -> Option<CellCoord> {
        grid.tile_of(self.position)
    }

    /// Tile directly ahead of the actor, if it lies on the grid.
    pub(crate) fn facing_cell(&self, grid: &Grid) -> Option<CellCoord> {
        self.cell(grid)?
            .neighbor(self.facing)
            .filter(|cell| grid.contains(*cell))
    }

    /// Rendered position of the carried entity, one tile ahead of the actor.
    pub(crate) fn held_position(&self, grid: &Grid) -> WorldPoint {
        self.position.translated(self.facing, grid.tile_length())
    }

    /// Consumes the queued heading and walks along it.
    ///
    /// The actor turns even when the way is blocked. Returns the start and end
    /// positions when the actor actually moved.
    pub(crate) fn walk(&mut self, grid: &Grid, dt: Duration) -> Option<(WorldPoint, WorldPoint)> {
        let direction = self.heading.take()?;
        self.facing = direction;

        let distance = self.speed * dt.as_secs_f32();
        if !(distance > 0.0) {
            return None;
        }

        let half = grid.tile_length() / 2.0;
        let proposed = self.position.translated(direction, distance);
        let entering = leading_cell(grid, proposed.translated(direction, half), direction)?;
        // Every tile swept by the leading edge must be walkable, not only the last.
        let mut cell = leading_cell(grid, self.position.translated(direction, half), direction)?;
        while cell != entering {
            cell = cell.neighbor(direction)?;
            if !grid.is_walkable(cell) {
                return None;
            }
        }
        if !grid.is_walkable(entering) {
            return None;
        }

        let from = self.position;
        self.position = proposed;
        Some((from, proposed))
    }
}

/// Tile touched by the actor's leading edge. Touching a boundary does not enter the next tile.
fn leading_cell(grid: &Grid, edge: WorldPoint, direction: Direction) -> Option<CellCoord> {
    let tile = grid.tile_length();
    let column = edge.x() / tile;
    let row = edge.y() / tile;
    match direction {
        Direction::Left | Direction::Up => grid.tile_at(column.floor(), row.floor()),
        Direction::Right => grid.tile_at(column.ceil() - 1.0, row.floor()),
        Direction::Down => grid.tile_at(column.floor(), row.ceil() - 1.0),
    }
}
