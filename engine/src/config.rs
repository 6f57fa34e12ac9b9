//! Session configuration loaded from TOML.

use std::time::Duration;

use kitchen_core::{CellCoord, CellKind};
use kitchen_system_order_desk as order_desk;
use kitchen_system_plate_rack as plate_rack;
use kitchen_world::{Layout, LayoutError, WorldConfig};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while validating a kitchen configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse kitchen configuration")]
    Parse(#[from] toml::de::Error),
    /// The floor plan was malformed.
    #[error("invalid kitchen layout")]
    Layout(#[from] LayoutError),
    /// A duration field was negative or not a number.
    #[error("`{field}` must be a finite, non-negative number of seconds")]
    InvalidDuration {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A length or speed field was not strictly positive.
    #[error("`{field}` must be a finite, positive number")]
    InvalidMagnitude {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The session clock would end before the first tick.
    #[error("`session_secs` must be greater than zero")]
    EmptySession,
    /// Orders would expire on the tick after they were issued.
    #[error("`{field}` must be greater than zero")]
    ZeroOrderLifetime {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Food would burn before it finished cooking.
    #[error("`burn_secs` ({burn:?}) must exceed `cook_secs` ({cook:?})")]
    BurnBeforeCook {
        /// Configured cooking threshold.
        cook: Duration,
        /// Configured burning threshold.
        burn: Duration,
    },
    /// A utensil could never hold anything.
    #[error("`{field}` must be at least one")]
    ZeroCapacity {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The order overlap share fell outside `0.0..=1.0`.
    #[error("`order_overlap` must lie between 0 and 1, found {0}")]
    InvalidOverlap(f32),
    /// The plate rack tile lies outside the layout.
    #[error("plate rack ({column}, {row}) lies outside the layout")]
    RackOutOfBounds {
        /// Configured column.
        column: u32,
        /// Configured row.
        row: u32,
    },
    /// The actor would start on a tile it cannot stand on.
    #[error("actor start ({column}, {row}) is not a floor tile")]
    StartNotWalkable {
        /// Start column.
        column: u32,
        /// Start row.
        row: u32,
    },
}

/// Tunables for a kitchen session. Every field falls back to the reference value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitchenConfig {
    /// Seed for order generation.
    pub seed: u64,
    /// Length of the session in seconds.
    pub session_secs: f32,
    /// Side length of a tile in world units.
    pub tile_length: f32,
    /// Actor walking speed in world units per second.
    pub actor_speed: f32,
    /// Heat needed before pan contents are cooked.
    pub cook_secs: f32,
    /// Heat needed before pan contents burn.
    pub burn_secs: f32,
    /// Number of items a pan holds.
    pub pan_capacity: usize,
    /// Number of items a plate holds.
    pub plate_capacity: usize,
    /// Shortest order lifetime in seconds.
    pub min_order_secs: f32,
    /// Longest order lifetime in seconds.
    pub max_order_secs: f32,
    /// Share of the front order's lifetime that passes before another order arrives.
    pub order_overlap: f32,
    /// Tile clean plates appear on, as `[column, row]`.
    pub plate_rack: [u32; 2],
    /// Tile the actor starts on, as `[column, row]`. Defaults to the centre.
    pub actor_start: Option<[u32; 2]>,
    /// Floor plan rows. Defaults to the reference kitchen.
    pub layout: Option<Vec<String>>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let rack = plate_rack::DEFAULT_RACK;
        Self {
            seed: 0x6b69_7463_6865_6e21,
            session_secs: kitchen_world::DEFAULT_SESSION_LENGTH.as_secs_f32(),
            tile_length: kitchen_world::DEFAULT_TILE_LENGTH,
            actor_speed: kitchen_world::DEFAULT_ACTOR_SPEED,
            cook_secs: kitchen_world::DEFAULT_COOK_TIME.as_secs_f32(),
            burn_secs: kitchen_world::DEFAULT_BURN_TIME.as_secs_f32(),
            pan_capacity: kitchen_world::DEFAULT_PAN_CAPACITY,
            plate_capacity: kitchen_world::DEFAULT_PLATE_CAPACITY,
            min_order_secs: 40.0,
            max_order_secs: 70.0,
            order_overlap: order_desk::DEFAULT_OVERLAP,
            plate_rack: [rack.column(), rack.row()],
            actor_start: None,
            layout: None,
        }
    }
}

/// Validated settings for every part of the kitchen.
#[derive(Clone, Debug)]
pub(crate) struct Resolved {
    pub(crate) world: WorldConfig,
    pub(crate) order_desk: order_desk::Config,
    pub(crate) plate_rack: plate_rack::Config,
}

impl KitchenConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is malformed or
    /// names an unknown field.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub(crate) fn resolve(&self) -> Result<Resolved, ConfigError> {
        let layout = match &self.layout {
            Some(rows) => Layout::parse(rows)?,
            None => Layout::reference(),
        };

        let session_length = seconds("session_secs", self.session_secs)?;
        if session_length.is_zero() {
            return Err(ConfigError::EmptySession);
        }
        let cook_time = seconds("cook_secs", self.cook_secs)?;
        let burn_time = seconds("burn_secs", self.burn_secs)?;
        if burn_time <= cook_time {
            return Err(ConfigError::BurnBeforeCook {
                cook: cook_time,
                burn: burn_time,
            });
        }
        let min_lifetime = seconds("min_order_secs", self.min_order_secs)?;
        let max_lifetime = seconds("max_order_secs", self.max_order_secs)?;
        if min_lifetime.is_zero() {
            return Err(ConfigError::ZeroOrderLifetime {
                field: "min_order_secs",
            });
        }
        if max_lifetime.is_zero() {
            return Err(ConfigError::ZeroOrderLifetime {
                field: "max_order_secs",
            });
        }

        let tile_length = magnitude("tile_length", self.tile_length)?;
        let actor_speed = magnitude("actor_speed", self.actor_speed)?;
        if self.pan_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "pan_capacity",
            });
        }
        if self.plate_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "plate_capacity",
            });
        }
        if !(0.0..=1.0).contains(&self.order_overlap) {
            return Err(ConfigError::InvalidOverlap(self.order_overlap));
        }

        let [column, row] = self.plate_rack;
        let rack = CellCoord::new(column, row);
        if layout.cell(rack).is_none() {
            return Err(ConfigError::RackOutOfBounds { column, row });
        }

        let start = self.actor_start.map_or_else(
            || CellCoord::new(layout.columns() / 2, layout.rows() / 2),
            |[column, row]| CellCoord::new(column, row),
        );
        if layout.cell(start) != Some(CellKind::Floor) {
            return Err(ConfigError::StartNotWalkable {
                column: start.column(),
                row: start.row(),
            });
        }

        Ok(Resolved {
            world: WorldConfig {
                layout,
                tile_length,
                actor_speed,
                actor_start: Some(start),
                pan_capacity: self.pan_capacity,
                plate_capacity: self.plate_capacity,
                cook_time,
                burn_time,
                session_length,
            },
            order_desk: order_desk::Config::new(min_lifetime, max_lifetime, self.seed)
                .with_overlap(self.order_overlap),
            plate_rack: plate_rack::Config::new(rack),
        })
    }
}

fn seconds(field: &'static str, value: f32) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f32(value).map_err(|_| ConfigError::InvalidDuration { field })
}

fn magnitude(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidMagnitude { field })
    }
}
