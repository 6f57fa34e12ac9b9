//! Entity arena and the per-object processing state machines.

use std::{collections::BTreeMap, time::Duration};

use kitchen_core::{
    CellCoord, CellKind, CutState, Doneness, EntityId, Filling, FoodState, HeatState, Ingredient,
};

/// Owner of an entity at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Location {
    /// Resting on a grid tile.
    OnTile(CellCoord),
    /// Carried by the actor.
    Held,
    /// Stored inside the utensil with the provided id.
    Inside(EntityId),
}

#[derive(Clone, Debug)]
pub(crate) struct Entity {
    pub(crate) location: Location,
    pub(crate) kind: EntityKind,
}

/// Closed set of entity capabilities.
#[derive(Clone, Debug)]
pub(crate) enum EntityKind {
    Food(Food),
    Pan(Pan),
    Plate(Plate),
}

impl EntityKind {
    pub(crate) fn is_utensil(&self) -> bool {
        !matches!(self, Self::Food(_))
    }

    fn accepts_food(&self) -> bool {
        match self {
            Self::Food(_) => false,
            Self::Pan(pan) => pan.accepts_food(),
            Self::Plate(plate) => plate.utensil.has_room(),
        }
    }

    fn utensil(&self) -> Option<&Utensil> {
        match self {
            Self::Food(_) => None,
            Self::Pan(pan) => Some(&pan.utensil),
            Self::Plate(plate) => Some(&plate.utensil),
        }
    }

    fn utensil_mut(&mut self) -> Option<&mut Utensil> {
        match self {
            Self::Food(_) => None,
            Self::Pan(pan) => Some(&mut pan.utensil),
            Self::Plate(plate) => Some(&mut plate.utensil),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Food {
    ingredient: Ingredient,
    cut: CutState,
    doneness: Doneness,
}

impl Food {
    pub(crate) const fn new(ingredient: Ingredient) -> Self {
        Self {
            ingredient,
            cut: CutState::Raw,
            doneness: Doneness::Fresh,
        }
    }

    /// Cuts raw food resting on a cutting board. Returns whether anything changed.
    pub(crate) fn cut(&mut self, cell: CellKind) -> bool {
        if self.cut != CutState::Raw || cell != CellKind::CuttingBoard {
            return false;
        }
        self.cut = CutState::Cut;
        true
    }

    pub(crate) const fn state(&self) -> FoodState {
        FoodState {
            ingredient: self.ingredient,
            cut: self.cut,
            doneness: self.doneness,
        }
    }
}

/// Bounded container shared by pans and plates.
#[derive(Clone, Debug)]
pub(crate) struct Utensil {
    contents: Vec<EntityId>,
    capacity: usize,
}

impl Utensil {
    fn new(capacity: usize) -> Self {
        Self {
            contents: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn has_room(&self) -> bool {
        self.contents.len() < self.capacity
    }

    pub(crate) fn contents(&self) -> &[EntityId] {
        &self.contents
    }

    fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn push(&mut self, food: EntityId) {
        self.contents.push(food);
    }

    fn pop_front(&mut self) -> Option<EntityId> {
        if self.contents.is_empty() {
            None
        } else {
            Some(self.contents.remove(0))
        }
    }

    fn take_all(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.contents)
    }
}

/// Cooking utensil driven by the stove it rests on.
#[derive(Clone, Debug)]
pub(crate) struct Pan {
    utensil: Utensil,
    heat: HeatState,
    elapsed: Duration,
    on_stove: bool,
    cook_time: Duration,
    burn_time: Duration,
}

impl Pan {
    pub(crate) fn new(capacity: usize, cook_time: Duration, burn_time: Duration) -> Self {
        Self {
            utensil: Utensil::new(capacity),
            heat: HeatState::Idle,
            elapsed: Duration::ZERO,
            on_stove: false,
            cook_time,
            burn_time,
        }
    }

    pub(crate) const fn heat(&self) -> HeatState {
        self.heat
    }

    pub(crate) const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) const fn is_on_stove(&self) -> bool {
        self.on_stove
    }

    pub(crate) fn utensil(&self) -> &Utensil {
        &self.utensil
    }

    fn accepts_food(&self) -> bool {
        self.utensil.has_room() && matches!(self.heat, HeatState::Idle | HeatState::Cooking)
    }

    /// Starts cooking once there is something in the pan.
    pub(crate) fn on_stove(&mut self) -> Option<HeatState> {
        self.on_stove = true;
        if self.heat == HeatState::Idle && !self.utensil.is_empty() {
            self.heat = HeatState::Cooking;
            return Some(self.heat);
        }
        None
    }

    /// Stops heating. Accumulated time is kept so cooking resumes where it left off.
    pub(crate) fn off_stove(&mut self) -> Option<HeatState> {
        self.on_stove = false;
        self.settle()
    }

    /// Advances the heat state machine while the pan is heated.
    pub(crate) fn tick(&mut self, dt: Duration) -> Option<HeatState> {
        if !self.on_stove || !matches!(self.heat, HeatState::Cooking | HeatState::Cooked) {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        let next = if self.elapsed >= self.burn_time {
            HeatState::Burnt
        } else if self.elapsed >= self.cook_time {
            HeatState::Cooked
        } else {
            HeatState::Cooking
        };

        if next == self.heat {
            return None;
        }
        self.heat = next;
        Some(next)
    }

    /// An emptied pan forgets its progress, unless the contents burnt.
    fn settle(&mut self) -> Option<HeatState> {
        if self.utensil.is_empty() && matches!(self.heat, HeatState::Cooking | HeatState::Cooked)
        {
            self.heat = HeatState::Idle;
            self.elapsed = Duration::ZERO;
            return Some(self.heat);
        }
        None
    }

    fn clear(&mut self) -> Vec<EntityId> {
        self.heat = HeatState::Idle;
        self.elapsed = Duration::ZERO;
        self.utensil.take_all()
    }
}

/// Serving utensil delivered at a checkout.
#[derive(Clone, Debug)]
pub(crate) struct Plate {
    utensil: Utensil,
    on_checkout: bool,
}

impl Plate {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            utensil: Utensil::new(capacity),
            on_checkout: false,
        }
    }

    pub(crate) const fn is_on_checkout(&self) -> bool {
        self.on_checkout
    }

    pub(crate) fn utensil(&self) -> &Utensil {
        &self.utensil
    }

    pub(crate) fn on_checkout(&mut self) {
        self.on_checkout = true;
    }

    pub(crate) fn off_checkout(&mut self) {
        self.on_checkout = false;
    }
}

/// Outcome of moving one item between two utensils.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Transfer {
    pub(crate) food: EntityId,
    pub(crate) source_heat: Option<HeatState>,
}

/// Single authoritative store for every entity, keyed by stable id.
#[derive(Clone, Debug, Default)]
pub(crate) struct EntityStore {
    next_id: u32,
    entities: BTreeMap<EntityId, Entity>,
}

impl EntityStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, kind: EntityKind, location: Location) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let _ = self.entities.insert(id, Entity { location, kind });
        id
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    pub(crate) fn len(&self) -> usize {
        self.entities.len()
    }

    /// Entity resting on the provided tile. Placement keeps this unique.
    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<EntityId> {
        self.iter()
            .find(|(_, entity)| entity.location == Location::OnTile(cell))
            .map(|(id, _)| id)
    }

    /// Entities that are not stored inside a utensil, in id order.
    pub(crate) fn top_level(&self) -> Vec<EntityId> {
        self.iter()
            .filter(|(_, entity)| !matches!(entity.location, Location::Inside(_)))
            .map(|(id, _)| id)
            .collect()
    }

    pub(crate) fn set_location(&mut self, id: EntityId, location: Location) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.location = location;
        }
    }

    pub(crate) fn is_utensil(&self, id: EntityId) -> bool {
        self.get(id).map_or(false, |entity| entity.kind.is_utensil())
    }

    pub(crate) fn food(&self, id: EntityId) -> Option<&Food> {
        match self.get(id).map(|entity| &entity.kind) {
            Some(EntityKind::Food(food)) => Some(food),
            _ => None,
        }
    }

    pub(crate) fn food_mut(&mut self, id: EntityId) -> Option<&mut Food> {
        match self.get_mut(id).map(|entity| &mut entity.kind) {
            Some(EntityKind::Food(food)) => Some(food),
            _ => None,
        }
    }

    pub(crate) fn plate_count(&self) -> usize {
        self.entities
            .values()
            .filter(|entity| matches!(entity.kind, EntityKind::Plate(_)))
            .count()
    }

    /// Removes an entity together with everything stored inside it.
    pub(crate) fn destroy(&mut self, id: EntityId) {
        let Some(entity) = self.entities.remove(&id) else {
            return;
        };
        if let Some(utensil) = entity.kind.utensil() {
            for food in utensil.contents() {
                let _ = self.entities.remove(food);
            }
        }
    }

    /// Drops loose food into a utensil. Returns whether the utensil accepted it.
    pub(crate) fn add_to_utensil(&mut self, utensil: EntityId, food: EntityId) -> bool {
        let is_loose_food = self.get(food).map_or(false, |entity| {
            matches!(entity.kind, EntityKind::Food(_))
                && !matches!(entity.location, Location::Inside(_))
        });
        let accepts = self
            .get(utensil)
            .map_or(false, |entity| entity.kind.accepts_food());
        if !is_loose_food || !accepts {
            return false;
        }

        if let Some(container) = self
            .get_mut(utensil)
            .and_then(|entity| entity.kind.utensil_mut())
        {
            container.push(food);
        }
        self.set_location(food, Location::Inside(utensil));
        true
    }

    /// Moves the oldest item of `source` into `target` when `target` has room for it.
    pub(crate) fn move_to_utensil(&mut self, source: EntityId, target: EntityId) -> Option<Transfer> {
        if source == target {
            return None;
        }
        let accepts = self
            .get(target)
            .map_or(false, |entity| entity.kind.accepts_food());
        if !accepts {
            return None;
        }

        let source_entity = self.entities.get_mut(&source)?;
        let food = source_entity.kind.utensil_mut()?.pop_front()?;
        let source_heat = match &mut source_entity.kind {
            EntityKind::Pan(pan) => pan.settle(),
            _ => None,
        };

        if let Some(container) = self
            .get_mut(target)
            .and_then(|entity| entity.kind.utensil_mut())
        {
            container.push(food);
        }
        self.set_location(food, Location::Inside(target));
        Some(Transfer { food, source_heat })
    }

    /// Empties a utensil, destroying its contents and resetting its heat.
    ///
    /// Returns whether anything changed.
    pub(crate) fn clear_utensil(&mut self, id: EntityId) -> bool {
        let (destroyed, heat_reset) = match self.get_mut(id).map(|entity| &mut entity.kind) {
            Some(EntityKind::Pan(pan)) => {
                let was_idle = pan.heat == HeatState::Idle && pan.elapsed.is_zero();
                (pan.clear(), !was_idle)
            }
            Some(EntityKind::Plate(plate)) => (plate.utensil.take_all(), false),
            _ => return false,
        };

        let changed = !destroyed.is_empty() || heat_reset;
        for food in destroyed {
            let _ = self.entities.remove(&food);
        }
        changed
    }

    /// Applies the pan's doneness to every item it holds.
    pub(crate) fn set_doneness(&mut self, utensil: EntityId, doneness: Doneness) {
        let contents = self
            .get(utensil)
            .and_then(|entity| entity.kind.utensil())
            .map(|utensil| utensil.contents().to_vec())
            .unwrap_or_default();
        for food in contents {
            if let Some(food) = self.food_mut(food) {
                food.doneness = doneness;
            }
        }
    }

    /// Multiset of processed ingredients stored in a utensil.
    pub(crate) fn filling(&self, utensil: EntityId) -> Filling {
        self.get(utensil)
            .and_then(|entity| entity.kind.utensil())
            .map(|utensil| {
                utensil
                    .contents()
                    .iter()
                    .filter_map(|food| self.food(*food))
                    .map(|food| food.state().processed())
                    .collect()
            })
            .unwrap_or_default()
    }
}
