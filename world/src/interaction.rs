//! Take, put, dispense and cut requests issued by the actor.

use kitchen_core::{CellKind, EntityId, Event, InteractionError};
use tracing::debug;

use crate::{
    entities::{EntityKind, Food, Location},
    World,
};

impl World {
    /// Toggles between taking and putting, falling back to the faced dispenser.
    pub(crate) fn interact(&mut self, out_events: &mut Vec<Event>) {
        let outcome = match self.actor.held() {
            Some(held) => self.put(held, out_events),
            None => match self.take(out_events) {
                Err(InteractionError::NothingToTake) => self.dispense(out_events),
                outcome => outcome,
            },
        };
        reject_on_error(outcome, out_events);
    }

    pub(crate) fn cut(&mut self, out_events: &mut Vec<Event>) {
        let outcome = self.cut_faced_food(out_events);
        reject_on_error(outcome, out_events);
    }

    fn take(&mut self, out_events: &mut Vec<Event>) -> Result<(), InteractionError> {
        if self.actor.held().is_some() {
            return Err(InteractionError::HandsFull);
        }

        let ahead = self.actor.facing_cell(&self.grid);
        let underfoot = self.actor.cell(&self.grid);
        let entity = [ahead, underfoot]
            .into_iter()
            .flatten()
            .find_map(|cell| self.entities.occupant(cell))
            .ok_or(InteractionError::NothingToTake)?;

        self.entities.set_location(entity, Location::Held);
        self.actor.hold(entity);
        debug!(entity = entity.get(), "actor took entity");
        out_events.push(Event::EntityTaken { entity });
        Ok(())
    }

    fn put(&mut self, held: EntityId, out_events: &mut Vec<Event>) -> Result<(), InteractionError> {
        let cell = self
            .actor
            .facing_cell(&self.grid)
            .ok_or(InteractionError::NoTarget)?;

        let Some(occupant) = self.entities.occupant(cell) else {
            let _ = self.actor.release();
            self.entities.set_location(held, Location::OnTile(cell));
            debug!(entity = held.get(), column = cell.column(), row = cell.row(), "actor placed entity");
            out_events.push(Event::EntityPlaced { entity: held, cell });
            return Ok(());
        };

        if !self.entities.is_utensil(occupant) {
            return Err(InteractionError::TileOccupied);
        }

        if self.entities.is_utensil(held) {
            let transfer = self
                .entities
                .move_to_utensil(held, occupant)
                .ok_or(InteractionError::UtensilRejected)?;
            out_events.push(Event::FoodTransferred {
                food: transfer.food,
                from: held,
                to: occupant,
            });
            if let Some(heat) = transfer.source_heat {
                out_events.push(Event::HeatChanged { pan: held, heat });
            }
            return Ok(());
        }

        if !self.entities.add_to_utensil(occupant, held) {
            return Err(InteractionError::UtensilRejected);
        }
        let _ = self.actor.release();
        debug!(food = held.get(), utensil = occupant.get(), "food added to utensil");
        out_events.push(Event::FoodAdded {
            food: held,
            utensil: occupant,
        });
        Ok(())
    }

    fn dispense(&mut self, out_events: &mut Vec<Event>) -> Result<(), InteractionError> {
        let ingredient = match self
            .actor
            .facing_cell(&self.grid)
            .and_then(|cell| self.grid.cell_at(cell).ok())
        {
            Some(CellKind::Dispenser(ingredient)) => ingredient,
            _ => return Err(InteractionError::NothingToTake),
        };

        let entity = self
            .entities
            .insert(EntityKind::Food(Food::new(ingredient)), Location::Held);
        self.actor.hold(entity);
        debug!(entity = entity.get(), ?ingredient, "dispenser produced food");
        out_events.push(Event::FoodDispensed { entity, ingredient });
        Ok(())
    }

    fn cut_faced_food(&mut self, out_events: &mut Vec<Event>) -> Result<(), InteractionError> {
        let cell = self
            .actor
            .facing_cell(&self.grid)
            .filter(|cell| self.grid.cell_at(*cell) == Ok(CellKind::CuttingBoard))
            .ok_or(InteractionError::NoCuttingBoard)?;

        let entity = self
            .entities
            .occupant(cell)
            .filter(|entity| self.entities.food(*entity).is_some())
            .ok_or(InteractionError::NothingToCut)?;

        let cut = self
            .entities
            .food_mut(entity)
            .map_or(false, |food| food.cut(CellKind::CuttingBoard));
        if !cut {
            return Err(InteractionError::AlreadyCut);
        }

        debug!(entity = entity.get(), "food cut");
        out_events.push(Event::FoodCut { entity });
        Ok(())
    }
}

fn reject_on_error(outcome: Result<(), InteractionError>, out_events: &mut Vec<Event>) {
    if let Err(reason) = outcome {
        debug!(?reason, "interaction rejected");
        out_events.push(Event::InteractionRejected { reason });
    }
}
