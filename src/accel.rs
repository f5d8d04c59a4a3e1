//! This module contains the pairwise density and pressure-gradient force
//! calculations.
//!
//! The interaction scheme is an exhaustive O(n²) scan over the live particle
//! range. That is a deliberate design choice for the small particle counts this
//! core targets: a neighbor grid would change summation order and therefore
//! floating-point results.

use lin_alg::f64::Vec2;

use crate::{ParticleStore, SimParams, DENSITY_FLOOR};

/// Local density at particle `i`, summed over every other live particle, in
/// kg/m³. Floored at [`DENSITY_FLOOR`] so downstream divisions stay finite.
pub fn particle_density(store: &ParticleStore, i: usize, params: &SimParams) -> f64 {
    let particles = store.particles();
    let posit_i = particles[i].position;

    let mut density = 0.;
    for (j, particle) in particles.iter().enumerate() {
        if i == j {
            continue; // self-interaction.
        }

        let dist = (posit_i - particle.position).magnitude();
        density += params.kernel.influence(dist, params.h) * params.particle_mass;
    }

    density.max(DENSITY_FLOOR)
}

/// Density at an arbitrary query point. Every particle contributes (a free
/// point has no self to exclude), and the result is not floored. Intended for
/// visualization and diagnostics, not for dynamics.
pub fn density_at(store: &ParticleStore, point: Vec2, params: &SimParams) -> f64 {
    let mut density = 0.;
    for particle in store.particles() {
        let dist = (point - particle.position).magnitude();
        density += params.kernel.influence(dist, params.h) * params.particle_mass;
    }

    density
}

/// Pressure-gradient force on particle `i`, in N, from the kernel-derivative
/// weighted pressures of every other live particle.
///
/// Requires densities and pressures computed from the current positions; the
/// caller sequences that.
pub fn pressure_gradient(store: &ParticleStore, i: usize, params: &SimParams) -> Vec2 {
    let particles = store.particles();
    let posit_i = particles[i].position;

    let mut force = Vec2::new_zero();
    for (j, particle) in particles.iter().enumerate() {
        if i == j {
            continue; // self-interaction.
        }

        let offset = particle.position - posit_i;
        let dist = offset.magnitude();
        if dist == 0. {
            continue; // Coincident pair; the direction is undefined.
        }
        let dir = offset / dist; // Unit vec

        let slope = params.kernel.influence_derivative(dist, params.h);
        let scale = particle.pressure * slope * params.particle_mass / particle.density;

        force += dir * scale;
    }

    force
}
