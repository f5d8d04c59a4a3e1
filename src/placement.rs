//! Initial particle placement: uniform-random fill, and a centered regular
//! grid. Both operate on the live range of the store and reset velocity,
//! density and pressure to zero.

use lin_alg::f64::Vec2;
use rand::Rng;

use crate::{Particle, ParticleStore};

/// Scatter the live particles uniformly over `[0, width] x [0, height]`.
pub fn init_random(store: &mut ParticleStore, width: f64, height: f64) {
    let mut rng = rand::rng();

    for particle in store.particles_mut() {
        *particle = Particle::at(Vec2::new(
            rng.random_range(0.0..width),
            rng.random_range(0.0..height),
        ));
    }
}

/// Place the live particles on a regular grid centered in the domain, with
/// `spacing` meters between neighbors.
///
/// The count should be a perfect square. If it isn't, the largest full
/// `n x n` grid is placed, the remaining particles keep their previous state,
/// and a warning is logged; this is not a hard failure.
pub fn init_grid(store: &mut ParticleStore, width: f64, height: f64, spacing: f64) {
    let count = store.count();
    let n = (count as f64).sqrt() as usize;

    if n * n != count {
        eprintln!(
            "Warning: particle count {count} is not a perfect square; \
             placing a {n}x{n} grid and leaving the remainder as-is"
        );
    }
    if n == 0 {
        return;
    }

    let x_offset = (width - (n - 1) as f64 * spacing) / 2.;
    let y_offset = (height - (n - 1) as f64 * spacing) / 2.;

    let particles = store.particles_mut();
    for i in 0..n {
        for j in 0..n {
            particles[i * n + j] = Particle::at(Vec2::new(
                x_offset + j as f64 * spacing,
                y_offset + i as f64 * spacing,
            ));
        }
    }
}
