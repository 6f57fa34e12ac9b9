//! Per-tick station sweep: trash, stoves and checkouts.

use std::time::Duration;

use kitchen_core::{CellKind, Doneness, EntityId, Event, HeatState};
use tracing::debug;

use crate::{
    entities::{EntityKind, Location},
    World,
};

impl World {
    /// Lets every station act on the entity resting on it.
    ///
    /// Carried entities are treated as resting off-station. Removals are
    /// deferred until the sweep finished so the iteration stays stable.
    pub(crate) fn sweep_stations(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut removed: Vec<EntityId> = Vec::new();

        for id in self.entities.top_level() {
            let station = match self.entities.get(id).map(|entity| entity.location) {
                Some(Location::OnTile(cell)) => self.grid.cell_at(cell).ok(),
                Some(Location::Held) => None,
                Some(Location::Inside(_)) | None => continue,
            };

            if station == Some(CellKind::Trash) && self.dispose(id, out_events) {
                removed.push(id);
                continue;
            }

            self.heat_utensil(id, station, dt, out_events);

            if self.deliver(id, out_events) {
                removed.push(id);
            }
        }

        for id in removed {
            self.entities.destroy(id);
        }
    }

    /// Throws food away and empties utensils. Returns whether the entity itself must go.
    fn dispose(&mut self, id: EntityId, out_events: &mut Vec<Event>) -> bool {
        if !self.entities.is_utensil(id) {
            debug!(entity = id.get(), "food discarded");
            out_events.push(Event::FoodDiscarded { entity: id });
            return true;
        }

        if self.entities.clear_utensil(id) {
            debug!(utensil = id.get(), "utensil cleared");
            out_events.push(Event::UtensilCleared { utensil: id });
        }
        false
    }

    fn heat_utensil(
        &mut self,
        id: EntityId,
        station: Option<CellKind>,
        dt: Duration,
        out_events: &mut Vec<Event>,
    ) {
        let heated = match self.entities.get_mut(id).map(|entity| &mut entity.kind) {
            Some(EntityKind::Pan(pan)) => {
                let hooked = if station == Some(CellKind::Stove) {
                    pan.on_stove()
                } else {
                    pan.off_stove()
                };
                let heated = pan.tick(dt);
                for heat in [hooked, heated].into_iter().flatten() {
                    out_events.push(Event::HeatChanged { pan: id, heat });
                }
                heated
            }
            Some(EntityKind::Plate(plate)) => {
                if station == Some(CellKind::Checkout) {
                    plate.on_checkout();
                } else {
                    plate.off_checkout();
                }
                None
            }
            Some(EntityKind::Food(_)) | None => None,
        };

        if let Some(doneness) = heated.and_then(doneness_for) {
            self.entities.set_doneness(id, doneness);
        }
    }

    /// Matches a filled plate resting on a checkout against the order queue.
    fn deliver(&mut self, id: EntityId, out_events: &mut Vec<Event>) -> bool {
        let on_checkout = matches!(
            self.entities.get(id).map(|entity| &entity.kind),
            Some(EntityKind::Plate(plate)) if plate.is_on_checkout()
        );
        if !on_checkout {
            return false;
        }

        let filling = self.entities.filling(id);
        if filling.is_empty() {
            return false;
        }
        let Some(order) = self.orders.complete_matching(&filling) else {
            return false;
        };

        debug!(
            order = order.id().get(),
            plate = id.get(),
            tip = order.tip(),
            state = ?order.state(),
            "order delivered"
        );
        out_events.push(Event::OrderCompleted {
            order: order.id(),
            plate: id,
            tip: order.tip(),
        });
        true
    }
}

fn doneness_for(heat: HeatState) -> Option<Doneness> {
    match heat {
        HeatState::Cooked => Some(Doneness::Cooked),
        HeatState::Burnt => Some(Doneness::Burnt),
        HeatState::Idle | HeatState::Cooking => None,
    }
}
