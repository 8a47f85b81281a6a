use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smoke_sim_core::{Obstacle, Simulation, SimulationConfig, Vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless smoke simulation runner
#[derive(Parser, Debug)]
#[command(name = "smoke-sim-headless")]
#[command(about = "2D stable-fluids smoke simulation without a window", long_about = None)]
struct Args {
    /// Interior cells per axis
    #[arg(short, long, default_value_t = 40)]
    cells: usize,

    /// Edge length of the square domain
    #[arg(long, default_value_t = 1.0)]
    domain_size: f32,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 300)]
    steps: u32,

    /// Gauss-Seidel sweeps per tick
    #[arg(short, long, default_value_t = 120)]
    iterations: usize,

    /// Over-relaxation factor for the pressure solve
    #[arg(long, default_value_t = 1.9)]
    omega: f32,

    /// Inflow speed on the left edge
    #[arg(long, default_value_t = 1.0)]
    in_velocity: f32,

    /// Timestep per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Scatter this many random obstacles in addition to the default one
    #[arg(long, default_value_t = 0)]
    random_obstacles: usize,

    /// Seed for random obstacle placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Drag the obstacle under the domain centre by DX,DY halfway through the run
    #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
    drag: Option<Vec2>,

    /// Skip the centred default obstacle
    #[arg(long)]
    no_default_obstacle: bool,

    /// Ticks between progress reports
    #[arg(short, long, default_value_t = 50)]
    report_interval: u32,

    /// Print an ASCII density map at the end
    #[arg(short, long)]
    map: bool,
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad DX '{x}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad DY '{y}': {e}"))?;
    Ok(Vec2::new(x, y))
}

fn random_obstacles(count: usize, domain_size: f32, seed: u64) -> Vec<Obstacle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let center = Vec2::new(
                rng.random_range(0.2 * domain_size..0.9 * domain_size),
                rng.random_range(0.1 * domain_size..0.9 * domain_size),
            );
            let radius = rng.random_range(0.03 * domain_size..0.08 * domain_size);
            Obstacle::new(center, radius)
        })
        .collect()
}

fn print_density_map(sim: &Simulation) {
    const SHADES: &[u8] = b" .:-=+*%@";
    let view = sim.view();
    let (nx, ny) = view.dimensions();

    for y in 1..ny - 1 {
        let line: String = (1..nx)
            .map(|x| {
                if view.is_solid(x, y).unwrap_or(true) {
                    '#'
                } else {
                    let d = view.density(x, y).unwrap_or(0.0).clamp(0.0, 1.0);
                    let idx = (d * (SHADES.len() - 1) as f32).round() as usize;
                    SHADES[idx] as char
                }
            })
            .collect();
        println!("{line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== Smoke Simulation Demo ===\n");

    let config = SimulationConfig {
        cell_count: args.cells,
        domain_size: args.domain_size,
        time_step: args.dt,
        in_velocity: args.in_velocity,
        pressure_iterations: args.iterations,
        over_relaxation: args.omega,
        ..Default::default()
    };
    config.validate()?;

    let mut obstacles = Vec::new();
    if !args.no_default_obstacle {
        obstacles.push(Obstacle::default_for_domain(args.domain_size));
    }
    obstacles.extend(random_obstacles(
        args.random_obstacles,
        args.domain_size,
        args.seed,
    ));

    let mut sim = Simulation::with_obstacles(config, obstacles)?;
    println!(
        "Grid: {}x{} cells (h={:.4}), {} obstacle(s), {} sweeps/tick, dt={:.4}\n",
        args.cells,
        args.cells,
        sim.grid().cell_size(),
        sim.obstacles().len(),
        args.iterations,
        args.dt
    );

    let drag_at = args.steps / 2;
    let center = Vec2::new(args.domain_size * 0.5, args.domain_size * 0.5);
    let mut unstable_ticks = 0;

    for step in 1..=args.steps {
        if step == drag_at {
            if let Some(displacement) = args.drag {
                let moved = sim.drag_obstacle(center, displacement);
                info!("Dragged {} obstacle(s) by ({}, {})", moved, displacement.x, displacement.y);
            }
        }

        let diagnostics = sim.tick();
        if diagnostics.is_unstable() {
            unstable_ticks += 1;
        }

        if args.report_interval > 0 && step % args.report_interval == 0 {
            println!(
                "[t={:7.3}] tick {:5} | divergence {:>10} -> {:>10} | obstacle cells {}",
                sim.elapsed_time(),
                step,
                format_divergence(diagnostics.divergence_before),
                format_divergence(diagnostics.divergence_after),
                diagnostics.obstacle_cells
            );
        }
    }

    let view = sim.view();
    let total_smoke: f32 = view
        .field_slice(smoke_sim_core::Field::Density)
        .iter()
        .sum();
    println!("\nFinished {} ticks, total smoke {:.3}", sim.tick_count(), total_smoke);
    if unstable_ticks > 0 {
        println!("WARNING: {unstable_ticks} tick(s) exceeded the divergence threshold");
    }

    if args.map {
        println!();
        print_density_map(&sim);
    }

    Ok(())
}

fn format_divergence(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |d| format!("{d:.5}"))
}
