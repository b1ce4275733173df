//! Helpers for house rules working on lists of individual rolls.

use super::{Roller, ValueProvider};
use crate::common::{Float, Operation};
use crate::error::DiceResult;

/// Applies `operation` with values rolled from `provider` to a list of rolls.
///
/// `Plus` and `Minus` modify only the first roll, or produce a single roll when
/// `rolls` is empty. Every other operation combines each roll with a fresh
/// value from `provider`, with the each variants counting as one roll.
pub fn apply_operation(
    rolls: &[Float],
    operation: Operation,
    provider: &dyn ValueProvider,
    roller: &mut dyn Roller,
) -> DiceResult<Vec<Float>> {
    match operation {
        Operation::Plus | Operation::Minus => {
            let value = provider.roll(roller)?;
            let mut result = rolls.to_vec();
            match result.first_mut() {
                Some(first) => *first = operation.combine(*first, value, 1.0),
                None => result.push(operation.combine(0.0, value, 1.0)),
            }
            Ok(result)
        }
        _ => rolls
            .iter()
            .map(|&roll| -> DiceResult<Float> {
                Ok(operation.combine(roll, provider.roll(roller)?, 1.0))
            })
            .collect(),
    }
}

/// Appends the output of `spawn` after every roll matching `predicate`.
///
/// Spawned rolls are checked too, so a spawned roll matching `predicate`
/// spawns again (exploding dice). Spawned rolls directly follow the roll that
/// spawned them.
pub fn spawn_continuously<P, S>(
    initial: impl IntoIterator<Item = Float>,
    predicate: P,
    mut spawn: S,
) -> DiceResult<Vec<Float>>
where
    P: Fn(Float) -> bool,
    S: FnMut() -> DiceResult<Vec<Float>>,
{
    let mut result = vec![];
    extend_spawning(initial.into_iter().collect(), &predicate, &mut spawn, &mut result)?;
    Ok(result)
}

fn extend_spawning(
    rolls: Vec<Float>,
    predicate: &dyn Fn(Float) -> bool,
    spawn: &mut dyn FnMut() -> DiceResult<Vec<Float>>,
    result: &mut Vec<Float>,
) -> DiceResult<()> {
    for roll in rolls {
        result.push(roll);
        if predicate(roll) {
            let spawned = spawn()?;
            extend_spawning(spawned, predicate, spawn, result)?;
        }
    }
    Ok(())
}

/// Appends the output of `spawn` after the first roll matching `predicate`.
/// Spawned rolls are not checked.
pub fn spawn_once<P, S>(
    initial: impl IntoIterator<Item = Float>,
    predicate: P,
    spawn: S,
) -> DiceResult<Vec<Float>>
where
    P: Fn(Float) -> bool,
    S: FnOnce() -> DiceResult<Vec<Float>>,
{
    let mut spawn = Some(spawn);
    let mut result = vec![];
    for roll in initial {
        result.push(roll);
        if spawn.is_some() && predicate(roll) {
            if let Some(spawn) = spawn.take() {
                result.extend(spawn()?);
            }
        }
    }
    Ok(result)
}
