use std::time::Duration;

use kitchen_core::{Command, Event, OrderSnapshot, OrderView, Recipe};
use kitchen_system_order_desk::{Config, OrderDesk};
use kitchen_world::{self as world, query, World};

fn queue_with_front(lifetime: Duration) -> OrderView {
    OrderView::from_snapshots(vec![OrderSnapshot {
        id: kitchen_core::OrderId::new(0),
        recipe: Recipe::Salad,
        required: Recipe::Salad.filling(),
        lifetime,
        remaining: lifetime,
        tip: Recipe::Salad.tip(),
    }])
}

fn second() -> Event {
    Event::TimeAdvanced {
        dt: Duration::from_secs(1),
    }
}

#[test]
fn empty_queue_is_refilled_immediately() {
    let mut desk = OrderDesk::new(Config::new(
        Duration::from_secs(40),
        Duration::from_secs(70),
        1,
    ));
    let mut commands = Vec::new();
    desk.handle(&[], &OrderView::default(), &mut commands);

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], Command::IssueOrder { .. }));
}

#[test]
fn no_order_without_elapsed_time() {
    let mut desk = OrderDesk::new(Config::new(
        Duration::from_secs(40),
        Duration::from_secs(70),
        1,
    ));
    let orders = queue_with_front(Duration::from_secs(40));
    let mut commands = Vec::new();
    for _ in 0..100 {
        desk.handle(&[], &orders, &mut commands);
    }
    assert!(commands.is_empty());
}

#[test]
fn next_order_waits_for_the_overlap_share_of_the_front_lifetime() {
    let mut desk = OrderDesk::new(Config::new(
        Duration::from_secs(40),
        Duration::from_secs(70),
        1,
    ));
    let orders = queue_with_front(Duration::from_secs(40));

    let mut calls = 0;
    let mut commands = Vec::new();
    while commands.is_empty() {
        calls += 1;
        assert!(calls <= 100, "order desk never issued an order");
        desk.handle(&[second()], &orders, &mut commands);
    }

    // 45 % of 40 s is 18 s of pacing, issued on the following tick.
    assert_eq!(calls, 19);
    assert_eq!(commands.len(), 1);
}

#[test]
fn identical_seeds_issue_identical_orders() {
    let config = Config::new(Duration::from_secs(40), Duration::from_secs(70), 0xfeed);
    let mut first_desk = OrderDesk::new(config);
    let mut second_desk = OrderDesk::new(config);

    let mut first_commands = Vec::new();
    let mut second_commands = Vec::new();
    for _ in 0..16 {
        first_desk.handle(&[], &OrderView::default(), &mut first_commands);
        second_desk.handle(&[], &OrderView::default(), &mut second_commands);
    }

    assert_eq!(first_commands, second_commands);
}

#[test]
fn queue_never_drains_while_the_desk_runs() {
    let mut world = World::default();
    let mut desk = OrderDesk::new(Config::new(
        Duration::from_secs(4),
        Duration::from_secs(6),
        42,
    ));
    let mut events = Vec::new();
    let mut commands = Vec::new();

    for _ in 0..60 {
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        desk.handle(&events, &query::order_view(&world), &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
        assert!(!query::order_view(&world).is_empty());
    }
}
