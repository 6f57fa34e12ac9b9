use std::time::Duration;

use kitchen_core::{CellCoord, Command, Event, Recipe};
use kitchen_system_plate_rack::{Config, PlateRack, DEFAULT_RACK};
use kitchen_world::{self as world, query, World};

fn tick_event() -> Event {
    Event::TimeAdvanced {
        dt: Duration::from_millis(16),
    }
}

#[test]
fn requests_a_plate_when_orders_outnumber_plates() {
    let rack = PlateRack::new(Config::default());
    let mut commands = Vec::new();
    rack.handle(&[tick_event()], 0, 2, |_| true, &mut commands);

    assert_eq!(commands, vec![Command::SpawnPlate { cell: DEFAULT_RACK }]);
}

#[test]
fn stays_idle_when_plates_suffice() {
    let rack = PlateRack::new(Config::default());
    let mut commands = Vec::new();
    rack.handle(&[tick_event()], 2, 2, |_| true, &mut commands);
    rack.handle(&[tick_event()], 3, 1, |_| true, &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn waits_for_a_tick_and_a_free_rack() {
    let rack = PlateRack::new(Config::new(CellCoord::new(3, 4)));
    let mut commands = Vec::new();
    rack.handle(&[], 0, 1, |_| true, &mut commands);
    rack.handle(&[tick_event()], 0, 1, |_| false, &mut commands);
    assert!(commands.is_empty());

    rack.handle(
        &[tick_event()],
        0,
        1,
        |cell| cell == CellCoord::new(3, 4),
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![Command::SpawnPlate {
            cell: CellCoord::new(3, 4)
        }]
    );
}

#[test]
fn world_gains_plates_until_they_match_the_orders() {
    let mut world = World::default();
    let rack = PlateRack::new(Config::default());
    let mut events = Vec::new();
    for recipe in [Recipe::Salad, Recipe::TomatoSoup] {
        world::apply(
            &mut world,
            Command::IssueOrder {
                recipe,
                lifetime: Duration::from_secs(60),
            },
            &mut events,
        );
    }

    let mut commands = Vec::new();
    for _ in 0..5 {
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
        rack.handle(
            &events,
            query::plate_count(&world),
            query::active_order_count(&world),
            |cell| query::is_tile_free(&world, cell),
            &mut commands,
        );
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
    }

    // The first plate blocks the rack tile, so the second has to wait.
    assert_eq!(query::plate_count(&world), 1);
    assert!(!query::is_tile_free(&world, rack.rack()));
}
