//! Plain-text intent scripts replayed by the headless runner.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! move left 480
//! wait 250
//! interact
//! cut
//! ```

use std::time::Duration;

use anyhow::{bail, Context, Result};
use kitchen_core::Direction;

/// Single scripted player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Hold a direction for the given time.
    Move {
        direction: Direction,
        duration: Duration,
    },
    /// Let the clock run without input.
    Wait(Duration),
    /// Press the interact button once.
    Interact,
    /// Press the cut button once.
    Cut,
}

pub(crate) fn parse(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}: `{line}`", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let step = match tokens.as_slice() {
        ["move", direction, millis] => Step::Move {
            direction: parse_direction(direction)?,
            duration: parse_millis(millis)?,
        },
        ["wait", millis] => Step::Wait(parse_millis(millis)?),
        ["interact"] => Step::Interact,
        ["cut"] => Step::Cut,
        _ => bail!("expected `move <direction> <ms>`, `wait <ms>`, `interact` or `cut`"),
    };
    Ok(step)
}

fn parse_direction(token: &str) -> Result<Direction> {
    let direction = match token {
        "left" => Direction::Left,
        "up" => Direction::Up,
        "right" => Direction::Right,
        "down" => Direction::Down,
        other => bail!("unknown direction `{other}`"),
    };
    Ok(direction)
}

fn parse_millis(token: &str) -> Result<Duration> {
    let millis: u64 = token
        .parse()
        .with_context(|| format!("`{token}` is not a whole number of milliseconds"))?;
    Ok(Duration::from_millis(millis))
}
