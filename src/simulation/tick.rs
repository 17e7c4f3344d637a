//! Tick system - orchestrates simulation updates
//!
//! One tick runs two phases in fixed order: expire resources whose removal
//! deadline has passed, then update every agent in creation order. Agents
//! update strictly sequentially, so a resource drained early in the pass
//! reads as empty to every agent after it in the same tick.
//!
//! The collect check and the deliver check run back to back within one
//! agent update: an agent that harvests right next to its depot banks the
//! load in the same tick instead of idling for one.

use crate::core::types::{AgentId, DepotId, ResourceId, TimeMs, Vec2};
use crate::simulation::movement::move_toward;
use crate::simulation::resource::Resource;
use crate::world::World;

/// Events generated during a simulation tick
///
/// Returned by `run_simulation_tick` for display in a driver's event log.
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// An agent locked onto a resource
    TargetAcquired {
        agent: AgentId,
        resource: ResourceId,
        /// Straight-line distance at acquisition time
        distance: f32,
    },
    /// An agent took a bite out of a resource
    ResourceHarvested {
        agent: AgentId,
        resource: ResourceId,
        amount: u32,
        remaining: u32,
    },
    /// A resource hit zero and its removal deadline was armed
    ResourceDepleted {
        resource: ResourceId,
        removal_at: TimeMs,
    },
    /// A drained resource passed its deadline and left the world
    ResourceExpired { resource: ResourceId },
    /// An agent banked its load at a depot
    DeliveryCompleted {
        agent: AgentId,
        depot: DepotId,
        amount: u64,
        /// Depot total after the credit
        total: u64,
    },
}

/// Run one simulation tick at the given timestamp.
///
/// A paused world ignores the call entirely and returns no events.
pub fn run_simulation_tick(world: &mut World, now: TimeMs) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    if !world.running {
        return events;
    }

    expire_resources(world, now, &mut events);
    update_agents(world, now, &mut events);

    world.advance_tick();
    events
}

/// Prune resources whose removal deadline has passed, clearing any agent
/// targets that still name them.
fn expire_resources(world: &mut World, now: TimeMs, events: &mut Vec<SimulationEvent>) {
    let expired: Vec<ResourceId> = world
        .resources
        .iter()
        .filter(|resource| resource.is_expired(now))
        .map(|resource| resource.id)
        .collect();

    for id in &expired {
        world.clear_targets_for(*id);
        tracing::info!("resource {} removed after grace period", id.0);
        events.push(SimulationEvent::ResourceExpired { resource: *id });
    }

    world.resources.retain(|resource| !resource.is_expired(now));
}

fn update_agents(world: &mut World, now: TimeMs, events: &mut Vec<SimulationEvent>) {
    // Index loop: later agents must observe mutations made by earlier ones
    for i in 0..world.agents.len() {
        if !world.agents[i].carrying {
            collect_step(world, i, now, events);
        }
        if world.agents[i].carrying {
            deliver_step(world, i, events);
        }
    }
}

/// Searching/collecting half of an agent update: validate or re-acquire the
/// target, move toward it, harvest on arrival.
fn collect_step(world: &mut World, i: usize, now: TimeMs, events: &mut Vec<SimulationEvent>) {
    let current_target = world.agents[i].target_resource;
    let target_live = current_target.map_or(false, |id| {
        world.resource(id).map_or(false, |r| r.is_available())
    });

    if !target_live {
        world.agents[i].target_resource = None;
        match find_nearest_available(&world.resources, world.agents[i].position) {
            Some((id, distance)) => {
                world.agents[i].target_resource = Some(id);
                tracing::debug!(
                    "agent {} targeting resource {} ({:.0} units away)",
                    world.agents[i].id.0,
                    id.0,
                    distance
                );
                events.push(SimulationEvent::TargetAcquired {
                    agent: world.agents[i].id,
                    resource: id,
                    distance,
                });
            }
            None => {
                // Nothing left to collect: drift toward a random point
                let wander_target = world.random_position();
                let agent = &mut world.agents[i];
                let (position, _) = move_toward(agent.position, wander_target, agent.speed);
                agent.position = position;
                tracing::trace!(
                    "agent {} wandering toward ({:.0}, {:.0})",
                    agent.id.0,
                    wander_target.x,
                    wander_target.y
                );
                return;
            }
        }
    }

    // Move on the (possibly just acquired) target this same tick
    let target_id = match world.agents[i].target_resource {
        Some(id) => id,
        None => return,
    };
    let target_position = match world.resource(target_id) {
        Some(resource) => resource.position,
        None => return,
    };

    let agent_speed = world.agents[i].speed;
    let (position, arrived) = move_toward(world.agents[i].position, target_position, agent_speed);
    world.agents[i].position = position;
    if !arrived {
        return;
    }

    let harvest_amount = world.config.harvest_amount;
    let grace_period_ms = world.config.grace_period_ms;
    let outcome = match world.resource_mut(target_id) {
        Some(resource) => {
            let amount = resource.harvest(harvest_amount, now, grace_period_ms);
            Some((amount, resource.quantity, resource.removal_deadline))
        }
        None => None,
    };

    let (amount, remaining, deadline) = match outcome {
        Some(values) => values,
        None => return,
    };

    if amount == 0 {
        // Drained before this agent got its bite in; search again next tick
        world.agents[i].target_resource = None;
        tracing::debug!(
            "agent {} found resource {} already empty",
            world.agents[i].id.0,
            target_id.0
        );
        return;
    }

    let agent_id = world.agents[i].id;
    world.agents[i].carrying = true;
    world.agents[i].target_resource = None;
    tracing::debug!(
        "agent {} harvested {} from resource {} ({} left)",
        agent_id.0,
        amount,
        target_id.0,
        remaining
    );
    events.push(SimulationEvent::ResourceHarvested {
        agent: agent_id,
        resource: target_id,
        amount,
        remaining,
    });

    if remaining == 0 {
        // This bite drained it; nobody may keep it as a target
        world.clear_targets_for(target_id);
        if let Some(removal_at) = deadline {
            tracing::info!(
                "resource {} depleted, removal scheduled at {} ms",
                target_id.0,
                removal_at
            );
            events.push(SimulationEvent::ResourceDepleted {
                resource: target_id,
                removal_at,
            });
        }
    }
}

/// Returning half of an agent update: head for the assigned depot and bank
/// the load on arrival. An unplaced depot makes this a one-tick no-op.
fn deliver_step(world: &mut World, i: usize, events: &mut Vec<SimulationEvent>) {
    let depot_id = world.agents[i].assigned_depot;
    let depot_position = match world.depot(depot_id).and_then(|depot| depot.position) {
        Some(position) => position,
        None => return,
    };

    let agent_speed = world.agents[i].speed;
    let (position, arrived) = move_toward(world.agents[i].position, depot_position, agent_speed);
    world.agents[i].position = position;
    if !arrived {
        return;
    }

    let amount = world.config.delivery_amount;
    let total = match world.depot_mut(depot_id) {
        Some(depot) => depot.deliver(amount),
        None => return,
    };

    let agent = &mut world.agents[i];
    agent.carrying = false;
    agent.target_resource = None;
    tracing::debug!(
        "agent {} delivered {} to depot {} (total {})",
        agent.id.0,
        amount,
        depot_id.0,
        total
    );
    events.push(SimulationEvent::DeliveryCompleted {
        agent: agent.id,
        depot: depot_id,
        amount,
        total,
    });
}

/// Nearest stocked resource by straight-line distance, with its distance.
///
/// Ties keep the first resource encountered in insertion order, so results
/// are deterministic for a fixed collection order.
pub fn find_nearest_available(resources: &[Resource], from: Vec2) -> Option<(ResourceId, f32)> {
    let mut best: Option<(ResourceId, f32)> = None;
    for resource in resources {
        if !resource.is_available() {
            continue;
        }
        let distance = from.distance(&resource.position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((resource.id, distance)),
        }
    }
    best
}
