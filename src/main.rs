//! Headless driver: seeds a particle set, runs the simulation for a fixed
//! number of steps with periodic timing printouts, then writes diagnostic
//! plots. Rendering, input handling and the window loop live elsewhere; this
//! binary only exercises the core.

use std::{path::PathBuf, str::FromStr, time::Instant};

use lin_alg::f64::Vec2;
use sph2d::{placement, properties, step, util, Particle, ParticleStore, SimParams};

const SAVE_FILE: &str = "config.sph";

const PARTICLE_COUNT: usize = 400;
const PARTICLE_CAPACITY: usize = 1_024;
const NUM_STEPS: usize = 2_000;
const DT: f64 = 1. / 240.;

const BENCH_RATIO: usize = 250;

fn main() {
    let save_path = PathBuf::from_str(SAVE_FILE).unwrap();

    let mut params = SimParams::default();
    match util::load::<SimParams>(&save_path) {
        Ok(loaded) => {
            params = loaded;
            println!("Loaded parameters from {SAVE_FILE}");
        }
        Err(_) => {
            // First run: write the defaults so they can be tweaked in place.
            if let Err(e) = util::save(&save_path, &params) {
                eprintln!("Error saving default parameters: {e}");
            }
        }
    }

    if let Err(e) = params.validate() {
        eprintln!("Error: invalid parameters: {e}");
        return;
    }

    let mut store = ParticleStore::new(PARTICLE_COUNT, PARTICLE_CAPACITY);
    placement::init_grid(&mut store, params.width, params.height, params.h / 2.);

    println!(
        "Running {NUM_STEPS} steps, {} particles, dt = {DT:.4}s, {:?} kernel...",
        store.count(),
        params.kernel
    );

    let mut start_time = Instant::now();
    for t in 0..NUM_STEPS {
        step(&mut store, &params, DT);

        if (t + 1) % BENCH_RATIO == 0 {
            println!(
                "t: {} Step time: {}μs Mean density: {:.1} kg/m³ Max speed: {:.2} m/s",
                t + 1,
                start_time.elapsed().as_micros() / BENCH_RATIO as u128,
                properties::mean_density(&store),
                properties::max_speed(&store),
            );
            start_time = Instant::now();
        }
    }

    // Drop one probe particle in, the way an interactive host would.
    if !store.append(Particle::at(Vec2::new(params.width / 2., params.height / 2.))) {
        println!("Store at capacity; probe particle skipped.");
    }
    step(&mut store, &params, DT);

    println!("Run complete. Mean density: {:.1} kg/m³", properties::mean_density(&store));

    properties::plot_kernel_profile(params.kernel, params.h);
    let mid = params.height / 2.;
    properties::plot_density_profile(&properties::density_profile(&store, &params, mid), mid);
    println!("Wrote kernel and density profile plots.");
}
