//! Customer order queue and score keeping.

use std::{collections::VecDeque, time::Duration};

use kitchen_core::{Filling, OrderId, OrderSnapshot, OrderState, Recipe};

#[derive(Clone, Debug)]
pub(crate) struct Order {
    id: OrderId,
    recipe: Recipe,
    required: Filling,
    lifetime: Duration,
    remaining: Duration,
    tip: u32,
    state: OrderState,
}

impl Order {
    pub(crate) const fn id(&self) -> OrderId {
        self.id
    }

    pub(crate) const fn tip(&self) -> u32 {
        self.tip
    }

    pub(crate) const fn state(&self) -> OrderState {
        self.state
    }

    pub(crate) fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            id: self.id,
            recipe: self.recipe,
            required: self.required.clone(),
            lifetime: self.lifetime,
            remaining: self.remaining,
            tip: self.tip,
        }
    }
}

/// Active orders in arrival order. Completed and expired orders leave the queue.
#[derive(Clone, Debug, Default)]
pub(crate) struct OrderQueue {
    orders: VecDeque<Order>,
    next_id: u32,
    score: u32,
}

impl OrderQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn issue(&mut self, recipe: Recipe, lifetime: Duration) -> OrderId {
        let id = OrderId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.orders.push_back(Order {
            id,
            recipe,
            required: recipe.filling(),
            lifetime,
            remaining: lifetime,
            tip: recipe.tip(),
            state: OrderState::Active,
        });
        id
    }

    /// Counts every order down and removes the ones that ran out of time.
    pub(crate) fn tick(&mut self, dt: Duration) -> Vec<Order> {
        for order in self.orders.iter_mut() {
            order.remaining = order.remaining.saturating_sub(dt);
        }

        let mut expired = Vec::new();
        let mut index = 0;
        while index < self.orders.len() {
            if !self.orders[index].remaining.is_zero() {
                index += 1;
                continue;
            }
            if let Some(mut order) = self.orders.remove(index) {
                order.state = OrderState::Expired;
                expired.push(order);
            }
        }
        expired
    }

    /// Completes the oldest order whose requirement equals the delivered filling.
    pub(crate) fn complete_matching(&mut self, filling: &Filling) -> Option<Order> {
        let index = self
            .orders
            .iter()
            .position(|order| &order.required == filling)?;
        let mut order = self.orders.remove(index)?;
        order.state = OrderState::Completed;
        self.score = self.score.saturating_add(order.tip);
        Some(order)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.orders.len()
    }

    pub(crate) const fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_orders_keep_arrival_order() {
        let mut queue = OrderQueue::new();
        let first = queue.issue(Recipe::Salad, Duration::from_secs(30));
        let second = queue.issue(Recipe::TomatoSoup, Duration::from_secs(30));

        let ids: Vec<_> = queue.iter().map(Order::id).collect();
        assert_eq!(ids, vec![first, second]);
        assert!(queue.iter().all(|order| order.state() == OrderState::Active));
    }

    #[test]
    fn orders_expire_when_time_runs_out() {
        let mut queue = OrderQueue::new();
        let short = queue.issue(Recipe::Salad, Duration::from_secs(2));
        let long = queue.issue(Recipe::Salad, Duration::from_secs(5));

        assert!(queue.tick(Duration::from_secs(1)).is_empty());
        let expired = queue.tick(Duration::from_secs(1));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id(), short);
        assert_eq!(expired[0].state(), OrderState::Expired);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().map(Order::id), Some(long));
        assert_eq!(queue.score(), 0);
    }

    #[test]
    fn delivery_completes_the_oldest_match() {
        let mut queue = OrderQueue::new();
        let _soup = queue.issue(Recipe::TomatoSoup, Duration::from_secs(30));
        let first_salad = queue.issue(Recipe::Salad, Duration::from_secs(30));
        let _second_salad = queue.issue(Recipe::Salad, Duration::from_secs(30));

        let order = queue
            .complete_matching(&Recipe::Salad.filling())
            .expect("salad order");
        assert_eq!(order.id(), first_salad);
        assert_eq!(order.state(), OrderState::Completed);
        assert_eq!(queue.score(), Recipe::Salad.tip());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn unmatched_delivery_changes_nothing() {
        let mut queue = OrderQueue::new();
        let _ = queue.issue(Recipe::FriedMushrooms, Duration::from_secs(30));

        assert!(queue
            .complete_matching(&Recipe::TomatoSlices.filling())
            .is_none());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.score(), 0);
    }

    #[test]
    fn snapshot_reports_remaining_time() {
        let mut queue = OrderQueue::new();
        let _ = queue.issue(Recipe::MushroomSoup, Duration::from_secs(40));
        let _ = queue.tick(Duration::from_secs(10));

        let snapshot = queue.iter().next().map(Order::snapshot).expect("order");
        assert_eq!(snapshot.remaining, Duration::from_secs(30));
        assert_eq!(snapshot.tip, Recipe::MushroomSoup.tip());
        assert_eq!(snapshot.required, Recipe::MushroomSoup.filling());
    }
}
