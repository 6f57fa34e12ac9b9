#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plate rack system that keeps one clean plate around per active order.

use kitchen_core::{CellCoord, Command, Event};

/// Tile the reference kitchen stacks clean plates on.
pub const DEFAULT_RACK: CellCoord = CellCoord::new(0, 1);

/// Configuration parameters required to construct the plate rack.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rack: CellCoord,
}

impl Config {
    /// Creates a new configuration placing plates on the provided tile.
    #[must_use]
    pub const fn new(rack: CellCoord) -> Self {
        Self { rack }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_RACK)
    }
}

/// Pure system that requests plates whenever orders outnumber them.
#[derive(Debug)]
pub struct PlateRack {
    rack: CellCoord,
}

impl PlateRack {
    /// Creates a new plate rack using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { rack: config.rack }
    }

    /// Tile plates are requested on.
    #[must_use]
    pub const fn rack(&self) -> CellCoord {
        self.rack
    }

    /// Consumes events and plate bookkeeping to emit spawn commands.
    ///
    /// At most one plate is requested per tick, and only while the rack tile
    /// is free. A blocked rack simply asks again on a later tick.
    pub fn handle<F>(
        &self,
        events: &[Event],
        plates: usize,
        active_orders: usize,
        is_free: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(CellCoord) -> bool,
    {
        let ticked = events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }));
        if !ticked || plates >= active_orders {
            return;
        }

        if is_free(self.rack) {
            out.push(Command::SpawnPlate { cell: self.rack });
        }
    }
}
