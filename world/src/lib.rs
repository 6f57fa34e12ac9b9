#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Kitchen Rush.

mod actor;
mod entities;
mod grid;
mod interaction;
mod layout;
mod orders;
mod stations;

use std::time::Duration;

use kitchen_core::{CellCoord, CellKind, Command, Event, WELCOME_BANNER};
use tracing::{debug, info};

use crate::{
    actor::Actor,
    entities::{EntityKind, EntityStore, Location, Pan, Plate},
    orders::OrderQueue,
};

pub use grid::{Grid, GridError};
pub use layout::{Layout, LayoutError, REFERENCE_LAYOUT};

/// Side length of a tile in world units.
pub const DEFAULT_TILE_LENGTH: f32 = 32.0;
/// Actor walking speed in world units per second.
pub const DEFAULT_ACTOR_SPEED: f32 = 200.0;
/// Number of items a pan holds.
pub const DEFAULT_PAN_CAPACITY: usize = 3;
/// Number of items a plate holds.
pub const DEFAULT_PLATE_CAPACITY: usize = 4;
/// Heat needed before pan contents are cooked.
pub const DEFAULT_COOK_TIME: Duration = Duration::from_secs(8);
/// Heat needed before pan contents burn.
pub const DEFAULT_BURN_TIME: Duration = Duration::from_secs(16);
/// Length of a session.
pub const DEFAULT_SESSION_LENGTH: Duration = Duration::from_secs(180);

/// Parameters used to build a world.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Floor plan of the kitchen.
    pub layout: Layout,
    /// Side length of a tile in world units.
    pub tile_length: f32,
    /// Actor walking speed in world units per second.
    pub actor_speed: f32,
    /// Tile the actor starts on. Defaults to the centre of the grid.
    pub actor_start: Option<CellCoord>,
    /// Number of items a pan holds.
    pub pan_capacity: usize,
    /// Number of items a plate holds.
    pub plate_capacity: usize,
    /// Heat needed before pan contents are cooked.
    pub cook_time: Duration,
    /// Heat needed before pan contents burn.
    pub burn_time: Duration,
    /// Length of the session before the world stops.
    pub session_length: Duration,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            layout: Layout::reference(),
            tile_length: DEFAULT_TILE_LENGTH,
            actor_speed: DEFAULT_ACTOR_SPEED,
            actor_start: None,
            pan_capacity: DEFAULT_PAN_CAPACITY,
            plate_capacity: DEFAULT_PLATE_CAPACITY,
            cook_time: DEFAULT_COOK_TIME,
            burn_time: DEFAULT_BURN_TIME,
            session_length: DEFAULT_SESSION_LENGTH,
        }
    }
}

/// Represents the authoritative Kitchen Rush world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    entities: EntityStore,
    actor: Actor,
    orders: OrderQueue,
    plate_capacity: usize,
    session_remaining: Duration,
    session_over: bool,
    tick_index: u64,
}

impl World {
    /// Creates a new world from the provided configuration.
    ///
    /// Every stove starts with an empty pan on it.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let grid = Grid::from_layout(&config.layout, config.tile_length);
        let start = config
            .actor_start
            .unwrap_or_else(|| CellCoord::new(grid.columns() / 2, grid.rows() / 2));
        let actor = Actor::new(grid.centre_of(start), config.actor_speed);

        let mut entities = EntityStore::new();
        let stoves: Vec<CellCoord> = grid.cells_of(CellKind::Stove).collect();
        for cell in stoves {
            let pan = Pan::new(config.pan_capacity, config.cook_time, config.burn_time);
            let _ = entities.insert(EntityKind::Pan(pan), Location::OnTile(cell));
        }

        info!(
            columns = grid.columns(),
            rows = grid.rows(),
            pans = entities.len(),
            "kitchen world ready"
        );

        Self {
            banner: WELCOME_BANNER,
            grid,
            entities,
            actor,
            orders: OrderQueue::new(),
            plate_capacity: config.plate_capacity,
            session_remaining: config.session_length,
            session_over: false,
            tick_index: 0,
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        self.session_remaining = self.session_remaining.saturating_sub(dt);
        if self.session_remaining.is_zero() {
            self.session_over = true;
            let score = self.orders.score();
            info!(score, ticks = self.tick_index, "session ended");
            out_events.push(Event::SessionEnded { score });
            return;
        }

        if let Some((from, to)) = self.actor.walk(&self.grid, dt) {
            out_events.push(Event::ActorMoved { from, to });
        }

        self.sweep_stations(dt, out_events);

        for order in self.orders.tick(dt) {
            debug!(order = order.id().get(), state = ?order.state(), "order left the queue");
            out_events.push(Event::OrderExpired { order: order.id() });
        }
    }

    fn spawn_plate(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.grid.contains(cell) || self.entities.occupant(cell).is_some() {
            out_events.push(Event::PlateSpawnRejected { cell });
            return;
        }

        let plate = self.entities.insert(
            EntityKind::Plate(Plate::new(self.plate_capacity)),
            Location::OnTile(cell),
        );
        debug!(plate = plate.get(), column = cell.column(), row = cell.row(), "plate spawned");
        out_events.push(Event::PlateSpawned { plate, cell });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session clock ran out every command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.session_over {
        return;
    }

    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::SteerActor { direction } => world.actor.steer(direction),
        Command::Interact => world.interact(out_events),
        Command::Cut => world.cut(out_events),
        Command::IssueOrder { recipe, lifetime } => {
            let order = world.orders.issue(recipe, lifetime);
            debug!(order = order.get(), ?recipe, ?lifetime, "order issued");
            out_events.push(Event::OrderIssued {
                order,
                recipe,
                lifetime,
            });
        }
        Command::SpawnPlate { cell } => world.spawn_plate(cell, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{
        entities::{Entity, EntityKind, Location},
        Grid, World,
    };
    use kitchen_core::{
        ActorSnapshot, CellCoord, EntityId, EntitySnapshot, EntityState, EntityView, OrderView,
        SessionOutcome, WorldPoint,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the kitchen grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures a read-only view of every entity in the kitchen.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        let snapshots = world
            .entities
            .iter()
            .map(|(id, entity)| {
                let root = root_location(world, id);
                EntitySnapshot {
                    id,
                    position: position_of(world, root),
                    cell: match entity.location {
                        Location::OnTile(cell) => Some(cell),
                        _ => None,
                    },
                    held: root == Some(Location::Held),
                    state: state_of(world, id, entity),
                }
            })
            .collect();
        EntityView::from_snapshots(snapshots)
    }

    /// Captures the actor's position, facing and carried entity.
    #[must_use]
    pub fn actor(world: &World) -> ActorSnapshot {
        ActorSnapshot {
            position: world.actor.position(),
            cell: world.actor.cell(&world.grid),
            facing: world.actor.facing(),
            held: world.actor.held(),
        }
    }

    /// Captures the active orders, oldest first.
    #[must_use]
    pub fn order_view(world: &World) -> OrderView {
        OrderView::from_snapshots(world.orders.iter().map(|order| order.snapshot()).collect())
    }

    /// Number of active orders.
    #[must_use]
    pub fn active_order_count(world: &World) -> usize {
        world.orders.len()
    }

    /// Number of plates in the kitchen, wherever they are.
    #[must_use]
    pub fn plate_count(world: &World) -> usize {
        world.entities.plate_count()
    }

    /// Reports whether the tile lies on the grid and nothing rests on it.
    #[must_use]
    pub fn is_tile_free(world: &World, cell: CellCoord) -> bool {
        world.grid.contains(cell) && world.entities.occupant(cell).is_none()
    }

    /// Tips collected so far.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.orders.score()
    }

    /// Time left on the session clock.
    #[must_use]
    pub fn remaining_time(world: &World) -> Duration {
        world.session_remaining
    }

    /// Final report, once the session clock ran out.
    #[must_use]
    pub fn outcome(world: &World) -> Option<SessionOutcome> {
        world.session_over.then(|| SessionOutcome {
            score: world.orders.score(),
        })
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Location of the outermost container of an entity.
    fn root_location(world: &World, id: EntityId) -> Option<Location> {
        let mut current = id;
        loop {
            match world.entities.get(current).map(|entity| entity.location) {
                Some(Location::Inside(parent)) => current = parent,
                other => return other,
            }
        }
    }

    fn position_of(world: &World, root: Option<Location>) -> WorldPoint {
        match root {
            Some(Location::OnTile(cell)) => world.grid.centre_of(cell),
            Some(Location::Held) => world.actor.held_position(&world.grid),
            Some(Location::Inside(_)) | None => WorldPoint::default(),
        }
    }

    fn state_of(world: &World, id: EntityId, entity: &Entity) -> EntityState {
        match &entity.kind {
            EntityKind::Food(food) => EntityState::Food(food.state()),
            EntityKind::Pan(pan) => EntityState::Pan {
                heat: pan.heat(),
                elapsed: pan.elapsed(),
                on_stove: pan.is_on_stove(),
                contents: pan.utensil().contents().to_vec(),
            },
            EntityKind::Plate(plate) => EntityState::Plate {
                on_checkout: plate.is_on_checkout(),
                contents: plate.utensil().contents().to_vec(),
                filling: world.entities.filling(id),
            },
        }
    }
}
