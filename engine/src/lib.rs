#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-stepped facade that wires the kitchen world to its systems.
//!
//! The presentation layer forwards [`Intent`] values and advances the clock
//! once per frame. Each advance applies a tick to the world and then pumps
//! the order desk and the plate rack until they stop issuing commands.

mod config;

use std::time::Duration;

use kitchen_core::{ActorSnapshot, Command, EntityView, Event, Intent, OrderView, SessionOutcome};
use kitchen_system_order_desk::OrderDesk;
use kitchen_system_plate_rack::PlateRack;
use kitchen_world::{self as world, query, World};
use tracing::info;

pub use config::{ConfigError, KitchenConfig};
pub use kitchen_world::Grid;

/// Upper bound on system rounds per call. Systems settle after two rounds.
const MAX_SYSTEM_ROUNDS: usize = 8;

/// A running kitchen session.
#[derive(Debug)]
pub struct Kitchen {
    world: World,
    order_desk: OrderDesk,
    plate_rack: PlateRack,
    events: Vec<Event>,
    outcome: Option<SessionOutcome>,
}

impl Kitchen {
    /// Builds a kitchen from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is inconsistent.
    pub fn new(config: &KitchenConfig) -> Result<Self, ConfigError> {
        let resolved = config.resolve()?;
        let world = World::new(resolved.world);
        info!(
            seed = config.seed,
            session_secs = config.session_secs,
            "{}",
            query::welcome_banner(&world)
        );

        Ok(Self {
            world,
            order_desk: OrderDesk::new(resolved.order_desk),
            plate_rack: PlateRack::new(resolved.plate_rack),
            events: Vec::new(),
            outcome: None,
        })
    }

    /// Forwards a player intent to the world and returns the events it caused.
    ///
    /// Intents are ignored once the session ended.
    pub fn handle_intent(&mut self, intent: Intent) -> &[Event] {
        self.events.clear();
        if self.outcome.is_some() {
            return &self.events;
        }

        let command = match intent {
            Intent::Move(direction) => Command::SteerActor { direction },
            Intent::Interact => Command::Interact,
            Intent::Cut => Command::Cut,
        };
        let mut pending = Vec::new();
        world::apply(&mut self.world, command, &mut pending);
        self.record(&pending);
        &self.events
    }

    /// Advances the session by `dt` and returns every event it produced.
    pub fn advance(&mut self, dt: Duration) -> &[Event] {
        self.events.clear();
        if self.outcome.is_some() {
            return &self.events;
        }

        let mut pending = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut pending);
        self.pump(pending);
        &self.events
    }

    fn pump(&mut self, mut pending: Vec<Event>) {
        let mut rounds = 0;
        loop {
            self.record(&pending);
            if self.outcome.is_some() || rounds == MAX_SYSTEM_ROUNDS {
                break;
            }
            rounds += 1;

            let mut commands = Vec::new();
            let orders = query::order_view(&self.world);
            self.order_desk.handle(&pending, &orders, &mut commands);
            let state = &self.world;
            self.plate_rack.handle(
                &pending,
                query::plate_count(state),
                query::active_order_count(state),
                |cell| query::is_tile_free(state, cell),
                &mut commands,
            );

            if commands.is_empty() {
                break;
            }

            pending.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut pending);
            }
        }
    }

    fn record(&mut self, events: &[Event]) {
        for event in events {
            if let Event::SessionEnded { score } = event {
                info!(score, "kitchen closed");
                self.outcome = Some(SessionOutcome { score: *score });
            }
        }
        self.events.extend_from_slice(events);
    }

    /// Snapshot of every entity in the kitchen.
    #[must_use]
    pub fn entities(&self) -> EntityView {
        query::entity_view(&self.world)
    }

    /// Snapshot of the actor.
    #[must_use]
    pub fn actor(&self) -> ActorSnapshot {
        query::actor(&self.world)
    }

    /// Snapshot of the active orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> OrderView {
        query::order_view(&self.world)
    }

    /// Tips collected so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        query::score(&self.world)
    }

    /// Time left on the session clock.
    #[must_use]
    pub fn remaining_time(&self) -> Duration {
        query::remaining_time(&self.world)
    }

    /// Kitchen floor plan.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        query::grid(&self.world)
    }

    /// Final report, once the session ended.
    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Banner adapters may greet the player with.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }
}
