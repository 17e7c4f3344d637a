//! Forage - Entry Point
//!
//! Terminal driver for the foraging simulation. It owns the logical clock,
//! seeds the starting population, and feeds ticks to the world while the
//! simulation is running; the core never schedules itself.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use forage::core::config::SimulationConfig;
use forage::core::error::Result;
use forage::core::types::{DepotId, ResourceId, Vec2};
use forage::simulation::tick::{run_simulation_tick, SimulationEvent};
use forage::world::World;

/// Terminal driver for the foraging simulation
#[derive(Parser, Debug)]
#[command(name = "forage")]
#[command(about = "Real-time multi-agent foraging simulation")]
struct Args {
    /// Path to a TOML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks without a prompt, print a JSON snapshot, exit
    #[arg(long)]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("forage=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut world = World::new(config);
    world.populate();

    // Logical clock in milliseconds, advanced by the driver per tick
    let mut now: u64 = 0;

    if let Some(ticks) = args.headless {
        // Headless has no prompt; the driver issues the starting toggle
        world.toggle_running();
        for _ in 0..ticks {
            now += world.config.tick_interval_ms;
            run_simulation_tick(&mut world, now);
        }
        println!("{}", serde_json::to_string_pretty(&world.snapshot())?);
        return Ok(());
    }

    println!("\n=== FORAGE ===");
    println!("Agents collect from resources and deliver to depots");
    println!("The simulation starts paused. Use 'toggle' to begin.");
    println!();
    println!("Commands:");
    println!("  tick / t         - Advance the simulation by one tick");
    println!("  run <n>          - Run n ticks");
    println!("  toggle           - Pause or resume the simulation");
    println!("  spawn agent      - Add a collector agent");
    println!("  spawn resource   - Add a resource node");
    println!("  status / s       - Show detailed status");
    println!("  snapshot         - Print the world as JSON");
    println!("  quantity <id>    - Remaining units in a resource");
    println!("  place <d> <x> <y> - Set a depot's position");
    println!("  quit / q         - Exit");
    println!();

    loop {
        display_status(&world);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            if !world.running {
                println!("Simulation is paused. Use 'toggle' to start.");
                continue;
            }
            now += world.config.tick_interval_ms;
            let events = run_simulation_tick(&mut world, now);
            display_events(&events);
            println!("Tick {} complete.", world.current_tick);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.trim().parse::<u64>() {
                if !world.running {
                    println!("Simulation is paused. Use 'toggle' to start.");
                    continue;
                }
                let mut harvests = 0usize;
                let mut deliveries = 0usize;
                let mut expirations = 0usize;
                for _ in 0..n {
                    now += world.config.tick_interval_ms;
                    for event in run_simulation_tick(&mut world, now) {
                        match event {
                            SimulationEvent::ResourceHarvested { .. } => harvests += 1,
                            SimulationEvent::DeliveryCompleted { .. } => deliveries += 1,
                            SimulationEvent::ResourceExpired { .. } => expirations += 1,
                            _ => {}
                        }
                    }
                }
                println!(
                    "Completed {} ticks ({} harvests, {} deliveries, {} resources expired). Now at tick {}.",
                    n, harvests, deliveries, expirations, world.current_tick
                );
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if input == "toggle" {
            let running = world.toggle_running();
            println!(
                "Simulation is now {}.",
                if running { "running" } else { "paused" }
            );
            continue;
        }

        if input == "spawn agent" {
            let id = world.spawn_agent();
            println!("Spawned agent {}.", id.0);
            continue;
        }

        if input == "spawn resource" {
            let id = world.spawn_resource();
            println!("Spawned resource {}.", id.0);
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&world);
            continue;
        }

        if input == "snapshot" {
            println!("{}", serde_json::to_string_pretty(&world.snapshot())?);
            continue;
        }

        if let Some(rest) = input.strip_prefix("quantity ") {
            match rest.trim().parse::<u32>() {
                Ok(raw) => match world.resource_quantity(ResourceId(raw)) {
                    Some(quantity) => println!("Resource {} holds {} units.", raw, quantity),
                    None => println!("No resource with id {}.", raw),
                },
                Err(_) => println!("Usage: quantity <id>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("place ") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let parsed = match parts.as_slice() {
                [d, x, y] => match (d.parse::<u32>(), x.parse::<f32>(), y.parse::<f32>()) {
                    (Ok(d), Ok(x), Ok(y)) => Some((d, x, y)),
                    _ => None,
                },
                _ => None,
            };
            match parsed {
                Some((depot, x, y)) => {
                    match world.place_depot(DepotId(depot), Vec2::new(x, y)) {
                        Ok(()) => println!("Depot {} placed at ({}, {}).", depot, x, y),
                        Err(e) => println!("{}", e),
                    }
                }
                None => println!("Usage: place <depot> <x> <y>"),
            }
            continue;
        }

        println!(
            "Unknown command. Available: tick, run <n>, toggle, spawn agent, spawn resource, status, snapshot, quantity <id>, place <d> <x> <y>, quit"
        );
    }

    let delivered: u64 = world.depots.iter().map(|depot| depot.total).sum();
    println!(
        "\nGoodbye! Final state: {} agents, {} resources, {} units delivered, tick {}.",
        world.agents.len(),
        world.resources.len(),
        delivered,
        world.current_tick
    );
    Ok(())
}

/// One-line world summary shown before each prompt
fn display_status(world: &World) {
    let carrying = world.agents.iter().filter(|agent| agent.carrying).count();
    let available = world
        .resources
        .iter()
        .filter(|resource| resource.is_available())
        .count();
    let delivered: u64 = world.depots.iter().map(|depot| depot.total).sum();
    println!(
        "[tick {} | {} | agents {} ({} carrying) | resources {} ({} available) | delivered {}]",
        world.current_tick,
        if world.running { "running" } else { "paused" },
        world.agents.len(),
        carrying,
        world.resources.len(),
        available,
        delivered
    );
}

/// Full per-entity listing
fn display_detailed_status(world: &World) {
    println!("\n=== WORLD STATUS (tick {}) ===", world.current_tick);
    println!(
        "Run state: {}",
        if world.running { "running" } else { "paused" }
    );

    println!("\nAgents:");
    for view in world.agent_views() {
        println!(
            "  agent {} at ({:.0}, {:.0}) - {:?}{}",
            view.id.0,
            view.position.x,
            view.position.y,
            view.state,
            if view.carrying { " [loaded]" } else { "" }
        );
    }
    if world.agents.is_empty() {
        println!("  (none)");
    }

    println!("\nResources:");
    for view in world.resource_views() {
        if view.depleted {
            println!(
                "  resource {} at ({:.0}, {:.0}) - depleted",
                view.id.0, view.position.x, view.position.y
            );
        } else {
            println!(
                "  resource {} at ({:.0}, {:.0}) - {} units",
                view.id.0, view.position.x, view.position.y, view.quantity
            );
        }
    }
    if world.resources.is_empty() {
        println!("  (none)");
    }

    println!("\nDepots:");
    for view in world.depot_views() {
        println!("  depot {} - total {}", view.id.0, view.total);
    }
    println!();
}

/// Human-readable line per tick event
fn display_events(events: &[SimulationEvent]) {
    for event in events {
        match event {
            SimulationEvent::TargetAcquired {
                agent,
                resource,
                distance,
            } => println!(
                "  agent {} -> resource {} ({:.0} units away)",
                agent.0, resource.0, distance
            ),
            SimulationEvent::ResourceHarvested {
                agent,
                resource,
                amount,
                remaining,
            } => println!(
                "  agent {} took {} from resource {} ({} left)",
                agent.0, amount, resource.0, remaining
            ),
            SimulationEvent::ResourceDepleted {
                resource,
                removal_at,
            } => println!(
                "  resource {} drained (removal at {} ms)",
                resource.0, removal_at
            ),
            SimulationEvent::ResourceExpired { resource } => {
                println!("  resource {} removed", resource.0)
            }
            SimulationEvent::DeliveryCompleted {
                agent,
                depot,
                amount,
                total,
            } => println!(
                "  agent {} delivered {} to depot {} (total {})",
                agent.0, amount, depot.0, total
            ),
        }
    }
}
