//! Tick system - the fixed five-phase update
//!
//! 1. every turtle picks a heading (reads the grid only)
//! 2. harvest: co-located turtles split their cell, occupied cells are emptied
//! 3. every turtle moves one cell, pays metabolism, ages, and is reborn if dead
//! 4. grain grows on growth ticks
//! 5. periodic redistribution when due, then the tick counter advances
//!
//! The order is load-bearing. Headings are chosen on the grain left by the
//! previous tick, and turtles harvest the cell they arrived on last tick,
//! not the one they are about to enter.

use crate::core::types::Wealth;
use crate::policy::{redistribute, TaxReport};
use crate::simulation::world::{TickOutcome, World};
use crate::stats::gini::gini;

/// Run one full tick and report what happened
pub fn run_tick(world: &mut World) -> TickOutcome {
    let mut outcome = TickOutcome {
        tick: world.tick,
        ..TickOutcome::default()
    };

    decide_directions(world);
    harvest(world);
    move_eat_age_die(world, &mut outcome);

    if world.tick % u64::from(world.config.growth_interval) == 0 {
        world.grid.grow_all(world.config.growth_amount);
        outcome.grain_grew = true;
    }

    if world
        .policies
        .redistribution
        .is_due(&world.config, world.tick)
    {
        outcome.tax = redistribute_wealth(world);
    }

    world.tick += 1;

    if tracing::enabled!(tracing::Level::DEBUG) {
        let wealths = world.wealths();
        let mean = if wealths.is_empty() {
            0.0
        } else {
            wealths.iter().sum::<Wealth>() as f64 / wealths.len() as f64
        };
        tracing::debug!(
            tick = world.tick,
            gini = gini(&wealths),
            mean_wealth = mean,
            deaths = outcome.deaths(),
            "Tick complete"
        );
    }

    outcome
}

/// Phase 1: headings from the grain visible before anyone harvests
fn decide_directions(world: &mut World) {
    let grid = &world.grid;
    for turtle in &mut world.turtles {
        turtle.decide_direction(grid);
    }
}

/// Phase 2: contention-aware harvest through the active policy
fn harvest(world: &mut World) {
    world
        .policies
        .harvest
        .harvest(&mut world.grid, &mut world.turtles);
}

/// Phase 3: move, consume, age, and rebirth in slot order
///
/// Rebirth draws from the world's random stream, so slot order is part of
/// the reproducibility contract.
fn move_eat_age_die(world: &mut World, outcome: &mut TickOutcome) {
    let width = world.grid.width();
    let height = world.grid.height();
    let policies = world.policies;

    for slot in 0..world.turtles.len() {
        let departed = world.turtles[slot].position;
        let deposit = policies.harvest.prepare_departure(slot, &mut world.turtles);

        let turtle = &mut world.turtles[slot];
        turtle.advance(width, height);
        turtle.consume_and_age();

        if let Some(cause) = turtle.death_cause() {
            policies
                .rebirth
                .reincarnate(turtle, cause, &world.config, &mut world.rng);
            policies.harvest.on_rebirth(turtle, &world.config);
            outcome.record_death(cause);
            tracing::trace!(slot, ?cause, "Turtle reborn");
        }

        if deposit > 0 {
            world.grid.patch_mut(departed).add_deposit(deposit);
            outcome.deposited += deposit;
        }
    }
}

/// Phase 5 hook: tax the rich and pay the poor
fn redistribute_wealth(world: &mut World) -> Option<TaxReport> {
    let mut wealths = world.wealths();
    let report = redistribute(&mut wealths)?;

    for (turtle, wealth) in world.turtles.iter_mut().zip(wealths) {
        turtle.wealth = wealth;
    }

    tracing::debug!(
        tick = world.tick,
        collected = report.collected,
        taxpayers = report.taxpayers,
        recipients = report.recipients,
        "Tax redistribution"
    );
    Some(report)
}
