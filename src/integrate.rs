//! Velocity/position integration and the rectangular boundary handler.

use lin_alg::f64::Vec2;

use crate::{Particle, ParticleStore, SimParams};

/// Velocity update from the combined pressure and gravity acceleration.
pub fn advance_velocity(particle: &mut Particle, accel: Vec2, dt: f64) {
    particle.velocity += accel * dt;
}

/// The velocity used to advect particle `i`, blended with its neighbors'
/// velocities by the XSPH coefficient. With `velocity_smoothing` at 0 this is
/// the particle's own velocity.
pub fn advection_velocity(store: &ParticleStore, i: usize, params: &SimParams) -> Vec2 {
    let particles = store.particles();
    let particle = &particles[i];

    let mut correction = Vec2::new_zero();
    for (j, other) in particles.iter().enumerate() {
        if i == j {
            continue; // self-interaction.
        }

        let dist = (particle.position - other.position).magnitude();
        let influence = params.kernel.influence(dist, params.h);
        let mean_density = (particle.density + other.density) / 2.;

        correction +=
            (other.velocity - particle.velocity) * (influence * params.particle_mass / mean_density);
    }

    particle.velocity + correction * params.velocity_smoothing
}

/// Advance one particle by `advection * dt`, clamping it into
/// `[0, width] x [0, height]` and reflecting the corresponding velocity
/// component, scaled by the damping coefficient, on contact.
pub fn advance_position(particle: &mut Particle, advection: Vec2, dt: f64, params: &SimParams) {
    let mut position = particle.position + advection * dt;

    if position.x < 0. {
        position.x = 0.;
        particle.velocity.x *= -params.damping;
    } else if position.x > params.width {
        position.x = params.width;
        particle.velocity.x *= -params.damping;
    }

    if position.y < 0. {
        position.y = 0.;
        particle.velocity.y *= -params.damping;
    } else if position.y > params.height {
        position.y = params.height;
        particle.velocity.y *= -params.damping;
    }

    particle.position = position;
}
