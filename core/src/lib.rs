#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Kitchen Rush engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative kitchen world, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Kitchen Rush.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the actor walk in the provided direction during the next tick.
    SteerActor {
        /// Direction the actor should face and walk towards.
        direction: Direction,
    },
    /// Requests the take/put toggle, falling back to the faced dispenser.
    Interact,
    /// Requests that the food resting on the faced cutting board be cut.
    Cut,
    /// Requests that a new order joins the back of the order queue.
    IssueOrder {
        /// Recipe the customer asked for.
        recipe: Recipe,
        /// Total time the order stays open before it expires.
        lifetime: Duration,
    },
    /// Requests that a clean plate appears on the provided tile.
    SpawnPlate {
        /// Tile that should receive the plate.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the actor walked between two positions.
    ActorMoved {
        /// Position the actor occupied before moving.
        from: WorldPoint,
        /// Position the actor occupies after moving.
        to: WorldPoint,
    },
    /// Confirms that the actor picked an entity up.
    EntityTaken {
        /// Entity that moved into the actor's hands.
        entity: EntityId,
    },
    /// Confirms that the actor set an entity down on an empty tile.
    EntityPlaced {
        /// Entity that left the actor's hands.
        entity: EntityId,
        /// Tile the entity now rests on.
        cell: CellCoord,
    },
    /// Confirms that a dispenser handed fresh food to the actor.
    FoodDispensed {
        /// Identifier assigned to the new food item.
        entity: EntityId,
        /// Ingredient produced by the dispenser.
        ingredient: Ingredient,
    },
    /// Confirms that held food was dropped into a utensil.
    FoodAdded {
        /// Food item that entered the utensil.
        food: EntityId,
        /// Utensil that received the food.
        utensil: EntityId,
    },
    /// Confirms that one food item moved between two utensils.
    FoodTransferred {
        /// Food item that changed containers.
        food: EntityId,
        /// Utensil the food left.
        from: EntityId,
        /// Utensil the food entered.
        to: EntityId,
    },
    /// Confirms that raw food was cut on a cutting board.
    FoodCut {
        /// Food item that was cut.
        entity: EntityId,
    },
    /// Reports that a pan moved to a different heat state.
    HeatChanged {
        /// Pan whose heat state changed.
        pan: EntityId,
        /// Heat state the pan entered.
        heat: HeatState,
    },
    /// Confirms that food was thrown away.
    FoodDiscarded {
        /// Food item that was destroyed.
        entity: EntityId,
    },
    /// Confirms that a utensil was emptied in the trash.
    UtensilCleared {
        /// Utensil that was emptied.
        utensil: EntityId,
    },
    /// Confirms that a clean plate was created.
    PlateSpawned {
        /// Identifier assigned to the plate.
        plate: EntityId,
        /// Tile the plate rests on.
        cell: CellCoord,
    },
    /// Reports that a plate could not be created on the requested tile.
    PlateSpawnRejected {
        /// Tile that was requested for the plate.
        cell: CellCoord,
    },
    /// Confirms that a new order joined the queue.
    OrderIssued {
        /// Identifier assigned to the order.
        order: OrderId,
        /// Recipe requested by the order.
        recipe: Recipe,
        /// Total time the order stays open.
        lifetime: Duration,
    },
    /// Confirms that a delivered plate satisfied an order.
    OrderCompleted {
        /// Order that was fulfilled.
        order: OrderId,
        /// Plate consumed by the delivery.
        plate: EntityId,
        /// Tip added to the score.
        tip: u32,
    },
    /// Reports that an order ran out of time.
    OrderExpired {
        /// Order that expired.
        order: OrderId,
    },
    /// Reports that an interaction request had no effect.
    InteractionRejected {
        /// Specific reason the interaction failed.
        reason: InteractionError,
    },
    /// Announces that the session clock ran out.
    SessionEnded {
        /// Score accumulated over the whole session.
        score: u32,
    },
}

/// Discrete input intents forwarded by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Walk towards the provided direction for one tick.
    Move(Direction),
    /// Take or put, falling back to the faced dispenser.
    Interact,
    /// Cut whatever rests on the faced cutting board.
    Cut,
}

/// Cardinal directions the actor can face and walk towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
}

impl Direction {
    /// Unit step along the grid axes as `(column, row)` deltas.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }
}

/// Location of a single grid tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Adjacent cell in the provided direction, if it does not underflow.
    ///
    /// Upper bounds are not checked here; callers validate the result against
    /// the grid they address.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        let (column_delta, row_delta) = direction.offset();
        let column = self.column.checked_add_signed(column_delta)?;
        let row = self.row.checked_add_signed(row_delta)?;
        Some(CellCoord::new(column, row))
    }
}

/// Continuous position expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate, growing downwards.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the point displaced by `distance` world units towards `direction`.
    #[must_use]
    pub fn translated(self, direction: Direction, distance: f32) -> Self {
        let (column_delta, row_delta) = direction.offset();
        Self {
            x: self.x + column_delta as f32 * distance,
            y: self.y + row_delta as f32 * distance,
        }
    }
}

/// Classification of a single tile of the kitchen floor plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable floor.
    Floor,
    /// Solid counter that blocks movement but accepts items.
    Counter,
    /// Crate that hands out fresh food of one ingredient.
    Dispenser(Ingredient),
    /// Station where raw food can be cut.
    CuttingBoard,
    /// Station that heats the pan resting on it.
    Stove,
    /// Station where plates are handed to customers.
    Checkout,
    /// Bin that destroys food and empties utensils.
    Trash,
}

/// Ingredients handed out by dispensers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ingredient {
    /// Red and round.
    Tomato,
    /// Earthy and brown.
    Mushroom,
    /// Makes the cook cry.
    Onion,
}

/// Knife processing state of a food item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CutState {
    /// Straight from the dispenser.
    Raw,
    /// Cut on a cutting board. Terminal.
    Cut,
}

/// Heat processing state of a food item, acquired inside a pan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Doneness {
    /// Never cooked.
    Fresh,
    /// Cooked through.
    Cooked,
    /// Left on the heat for too long.
    Burnt,
}

/// Heat state machine of a pan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatState {
    /// Not cooking anything.
    Idle,
    /// Accumulating heat towards the cooked threshold.
    Cooking,
    /// Contents are cooked; keeps heating towards the burnt threshold.
    Cooked,
    /// Contents are ruined. Terminal until the pan is cleared.
    Burnt,
}

/// Food item kind combined with its processing state, the unit of order matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessedIngredient {
    /// Ingredient the food was dispensed as.
    pub ingredient: Ingredient,
    /// Knife state of the food.
    pub cut: CutState,
    /// Heat state of the food.
    pub doneness: Doneness,
}

impl ProcessedIngredient {
    /// Creates a processed ingredient descriptor.
    #[must_use]
    pub const fn new(ingredient: Ingredient, cut: CutState, doneness: Doneness) -> Self {
        Self {
            ingredient,
            cut,
            doneness,
        }
    }

    /// Cut but never heated.
    #[must_use]
    pub const fn chopped(ingredient: Ingredient) -> Self {
        Self::new(ingredient, CutState::Cut, Doneness::Fresh)
    }

    /// Cut and cooked through.
    #[must_use]
    pub const fn cooked(ingredient: Ingredient) -> Self {
        Self::new(ingredient, CutState::Cut, Doneness::Cooked)
    }
}

/// Order-independent multiset of processed ingredients.
///
/// Two fillings compare equal when they hold the same processed ingredients
/// with the same multiplicities, regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filling {
    counts: BTreeMap<ProcessedIngredient, u32>,
}

impl Filling {
    /// Creates an empty filling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one processed ingredient to the multiset.
    pub fn insert(&mut self, item: ProcessedIngredient) {
        *self.counts.entry(item).or_insert(0) += 1;
    }

    /// Number of copies of `item` contained in the filling.
    #[must_use]
    pub fn count(&self, item: ProcessedIngredient) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    /// Total number of items including duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.values().map(|count| *count as usize).sum()
    }

    /// Reports whether the filling holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterator over each distinct processed ingredient and its multiplicity.
    pub fn iter(&self) -> impl Iterator<Item = (ProcessedIngredient, u32)> + '_ {
        self.counts.iter().map(|(item, count)| (*item, *count))
    }
}

impl FromIterator<ProcessedIngredient> for Filling {
    fn from_iter<I: IntoIterator<Item = ProcessedIngredient>>(iter: I) -> Self {
        let mut filling = Self::new();
        for item in iter {
            filling.insert(item);
        }
        filling
    }
}

/// Fixed menu of dishes customers can order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipe {
    /// A single cut tomato.
    TomatoSlices,
    /// Cut tomato with cut onion.
    Salad,
    /// One cut mushroom, cooked.
    FriedMushrooms,
    /// Two cooked tomatoes with a cooked onion.
    TomatoSoup,
    /// Two cooked mushrooms with a cooked onion.
    MushroomSoup,
}

impl Recipe {
    /// Every recipe on the menu.
    pub const ALL: [Recipe; 5] = [
        Self::TomatoSlices,
        Self::Salad,
        Self::FriedMushrooms,
        Self::TomatoSoup,
        Self::MushroomSoup,
    ];

    /// Plate contents that satisfy the recipe.
    #[must_use]
    pub fn filling(self) -> Filling {
        use Ingredient::{Mushroom, Onion, Tomato};
        let items: &[ProcessedIngredient] = match self {
            Self::TomatoSlices => &[ProcessedIngredient::chopped(Tomato)],
            Self::Salad => &[
                ProcessedIngredient::chopped(Tomato),
                ProcessedIngredient::chopped(Onion),
            ],
            Self::FriedMushrooms => &[ProcessedIngredient::cooked(Mushroom)],
            Self::TomatoSoup => &[
                ProcessedIngredient::cooked(Tomato),
                ProcessedIngredient::cooked(Tomato),
                ProcessedIngredient::cooked(Onion),
            ],
            Self::MushroomSoup => &[
                ProcessedIngredient::cooked(Mushroom),
                ProcessedIngredient::cooked(Mushroom),
                ProcessedIngredient::cooked(Onion),
            ],
        };
        items.iter().copied().collect()
    }

    /// Tip paid when the recipe is delivered in time.
    #[must_use]
    pub const fn tip(self) -> u32 {
        match self {
            Self::TomatoSlices => 10,
            Self::Salad => 20,
            Self::FriedMushrooms => 25,
            Self::TomatoSoup | Self::MushroomSoup => 40,
        }
    }
}

/// Unique identifier assigned to a placeable entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(u32);

impl OrderId {
    /// Creates a new order identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Lifecycle state of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// Waiting for a matching delivery.
    Active,
    /// Fulfilled by a delivered plate.
    Completed,
    /// Ran out of time.
    Expired,
}

/// Reasons an interaction request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionError {
    /// The actor already holds something and cannot take more.
    ///
    /// `Interact` routes a full hand to putting, so this only guards direct takes.
    HandsFull,
    /// Nothing rests ahead of or under the actor, and no dispenser is faced.
    NothingToTake,
    /// The faced tile lies outside the grid.
    NoTarget,
    /// The faced tile holds an item that cannot receive the held one.
    TileOccupied,
    /// The faced utensil refused the item (full, burnt, or nothing to move).
    UtensilRejected,
    /// The faced tile is not a cutting board.
    NoCuttingBoard,
    /// No food rests on the faced cutting board.
    NothingToCut,
    /// The food on the faced cutting board was already cut.
    AlreadyCut,
}

/// Processing state of a food item as seen by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FoodState {
    /// Ingredient the food was dispensed as.
    pub ingredient: Ingredient,
    /// Knife state.
    pub cut: CutState,
    /// Heat state.
    pub doneness: Doneness,
}

impl FoodState {
    /// Collapses the state into the unit used for order matching.
    #[must_use]
    pub const fn processed(&self) -> ProcessedIngredient {
        ProcessedIngredient::new(self.ingredient, self.cut, self.doneness)
    }
}

/// Capability-specific state captured for a single entity.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityState {
    /// A food item.
    Food(FoodState),
    /// A cooking utensil.
    Pan {
        /// Current heat state.
        heat: HeatState,
        /// Heat accumulated towards the thresholds.
        elapsed: Duration,
        /// Whether the pan currently rests on a stove.
        on_stove: bool,
        /// Contained food in insertion order.
        contents: Vec<EntityId>,
    },
    /// A serving plate.
    Plate {
        /// Whether the plate currently rests on a checkout.
        on_checkout: bool,
        /// Contained food in insertion order.
        contents: Vec<EntityId>,
        /// Multiset of processed ingredients on the plate.
        filling: Filling,
    },
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Identifier allocated to the entity by the world.
    pub id: EntityId,
    /// Rendered position in world units.
    pub position: WorldPoint,
    /// Tile the entity rests on, when it lies on the grid.
    pub cell: Option<CellCoord>,
    /// Whether the actor carries the entity, directly or inside a held utensil.
    pub held: bool,
    /// Capability-specific state.
    pub state: EntityState,
}

/// Read-only snapshot describing every entity in the kitchen.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot captured for `id`.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of captured entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no entity was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Centre of the actor in world units.
    pub position: WorldPoint,
    /// Tile containing the actor's centre.
    pub cell: Option<CellCoord>,
    /// Direction the actor faces.
    pub facing: Direction,
    /// Entity carried by the actor, if any.
    pub held: Option<EntityId>,
}

/// Immutable representation of a single order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSnapshot {
    /// Identifier allocated to the order.
    pub id: OrderId,
    /// Recipe requested by the order.
    pub recipe: Recipe,
    /// Plate contents required to fulfil the order.
    pub required: Filling,
    /// Total time the order stays open.
    pub lifetime: Duration,
    /// Time left before the order expires.
    pub remaining: Duration,
    /// Tip paid on delivery.
    pub tip: u32,
}

impl OrderSnapshot {
    /// Share of the lifetime still left, in the range `0.0..=1.0`.
    #[must_use]
    pub fn remaining_fraction(&self) -> f32 {
        if self.lifetime.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f32() / self.lifetime.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Read-only snapshot of the order queue, front first.
#[derive(Clone, Debug, Default)]
pub struct OrderView {
    snapshots: Vec<OrderSnapshot>,
}

impl OrderView {
    /// Creates a view preserving the queue order of the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<OrderSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Oldest order in the queue.
    #[must_use]
    pub fn front(&self) -> Option<&OrderSnapshot> {
        self.snapshots.first()
    }

    /// Iterator over the orders, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &OrderSnapshot> {
        self.snapshots.iter()
    }

    /// Number of active orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no order is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<OrderSnapshot> {
        self.snapshots
    }
}

/// Terminal report produced once the session clock runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionOutcome {
    /// Score accumulated over the whole session.
    pub score: u32,
}
