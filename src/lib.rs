//! A 2d smoothed-particle-hydrodynamics core: density estimation over a set of
//! point particles via a smoothing kernel, pressure from a selectable equation
//! of state, pressure-gradient forces, and motion integration inside a
//! rectangular domain with damped wall reflection.
//!
//! The core never draws or reads input; a host loop owns the store, calls
//! [`step`] once per tick, and renders the resulting particle state however it
//! likes.

use std::fmt;

use bincode::{Decode, Encode};
use lin_alg::f64::Vec2;
use rayon::prelude::*;

pub mod accel;
pub mod integrate;
pub mod kernel;
pub mod placement;
pub mod pressure;
pub mod properties;
pub mod units;
pub mod util;

pub use kernel::Kernel;
pub use pressure::StateEquation;

/// Lower bound applied to per-particle densities, so consumers may divide by
/// density without further checks.
pub const DENSITY_FLOOR: f64 = 1e-6;

#[derive(Clone, Debug)]
pub struct Particle {
    /// Meters.
    pub position: Vec2,
    /// m/s.
    pub velocity: Vec2,
    /// kg/m³. At or above [`DENSITY_FLOOR`] once a step has run.
    pub density: f64,
    /// Pa. May be negative.
    pub pressure: f64,
}

impl Particle {
    /// A particle at rest at `position`, with density and pressure not yet
    /// computed.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::new_zero(),
            density: 0.,
            pressure: 0.,
        }
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::at(Vec2::new_zero())
    }
}

/// An ordered, fixed-capacity sequence of particles. Particles with index below
/// `count` are live and participate in every pairwise summation; the store
/// never shrinks except through [`ParticleStore::reset`].
pub struct ParticleStore {
    items: Vec<Particle>,
    capacity: usize,
}

impl ParticleStore {
    /// A store holding `count` zeroed particles, with room for `capacity`.
    /// `count` is clamped to the capacity.
    pub fn new(count: usize, capacity: usize) -> Self {
        let count = count.min(capacity);
        Self {
            items: vec![Particle::default(); count],
            capacity,
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.items
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.items
    }

    /// Append a particle at runtime, e.g. interactively spawned by a host.
    /// Returns `false`, leaving the store untouched, once capacity is reached.
    pub fn append(&mut self, particle: Particle) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push(particle);
        true
    }

    /// Discard all particles and restart with `count` zeroed ones (clamped to
    /// capacity).
    pub fn reset(&mut self, count: usize) {
        self.items.clear();
        self.items.resize(count.min(self.capacity), Particle::default());
    }
}

/// The per-step configuration bundle. Threaded explicitly through every call;
/// the host may adjust scalars such as `h` or `gravity` between steps, but the
/// bundle is read-only during a step.
#[derive(Clone, Debug, Encode, Decode)]
pub struct SimParams {
    /// Domain bounds, meters. Positions live in `[0, width] x [0, height]`.
    pub width: f64,
    pub height: f64,
    /// Shared by all particles, kg.
    pub particle_mass: f64,
    /// Smoothing length, meters.
    pub h: f64,
    /// m/s², applied along +y (down, matching the screen-space world of the
    /// surrounding demos).
    pub gravity: f64,
    /// Scale applied to the reflected velocity component on wall contact, in
    /// `[0, 1]`.
    pub damping: f64,
    /// XSPH coefficient in `[0, 1]` blending neighbor velocities into the
    /// advection velocity. 0 disables smoothing.
    pub velocity_smoothing: f64,
    pub kernel: Kernel,
    pub equation_of_state: StateEquation,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            width: 8.,
            height: 6.,
            particle_mass: 1.,
            h: 0.35,
            gravity: units::STANDARD_GRAVITY,
            damping: 0.9,
            velocity_smoothing: 0.,
            kernel: Kernel::default(),
            equation_of_state: StateEquation::Gas {
                rest_density: 1_000.,
                pressure_multiplier: 1.,
            },
        }
    }
}

impl SimParams {
    /// Reject invalid configuration up front, before a host enters its step
    /// loop. The inner per-particle math assumes these hold.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.h > 0.) {
            return Err(ParamError::SmoothingLength(self.h));
        }
        if !(self.width > 0.) || !(self.height > 0.) {
            return Err(ParamError::WorldBounds(self.width, self.height));
        }
        if !(self.particle_mass > 0.) {
            return Err(ParamError::ParticleMass(self.particle_mass));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ParamError::Damping(self.damping));
        }
        if !(0.0..=1.0).contains(&self.velocity_smoothing) {
            return Err(ParamError::VelocitySmoothing(self.velocity_smoothing));
        }

        if !(self.equation_of_state.rest_density() > 0.) {
            return Err(ParamError::RestDensity(self.equation_of_state.rest_density()));
        }
        if let StateEquation::Cole {
            speed_of_sound,
            adiabatic_index,
            ..
        } = self.equation_of_state
        {
            if !(speed_of_sound > 0.) {
                return Err(ParamError::SpeedOfSound(speed_of_sound));
            }
            if !(adiabatic_index > 0.) {
                return Err(ParamError::AdiabaticIndex(adiabatic_index));
            }
        }

        Ok(())
    }
}

/// A configuration error caught by [`SimParams::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    SmoothingLength(f64),
    WorldBounds(f64, f64),
    ParticleMass(f64),
    Damping(f64),
    VelocitySmoothing(f64),
    RestDensity(f64),
    SpeedOfSound(f64),
    AdiabaticIndex(f64),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::SmoothingLength(h) => write!(f, "smoothing length must be positive, got {h}"),
            Self::WorldBounds(w, h) => write!(f, "world bounds must be positive, got {w} x {h}"),
            Self::ParticleMass(m) => write!(f, "particle mass must be positive, got {m}"),
            Self::Damping(d) => write!(f, "damping must be in [0, 1], got {d}"),
            Self::VelocitySmoothing(e) => {
                write!(f, "velocity smoothing must be in [0, 1], got {e}")
            }
            Self::RestDensity(r) => write!(f, "rest density must be positive, got {r}"),
            Self::SpeedOfSound(c) => write!(f, "speed of sound must be positive, got {c}"),
            Self::AdiabaticIndex(g) => write!(f, "adiabatic index must be positive, got {g}"),
        }
    }
}

impl std::error::Error for ParamError {}

/// Advance the simulation by `dt` seconds: one full density/pressure pass, one
/// full force/velocity pass, then one full advection/boundary pass.
///
/// Each stage completes for every particle before the next begins, so all
/// pairwise sums read one consistent snapshot; interleaving per-particle
/// updates would make results order-dependent. Within a stage, particles are
/// processed in parallel.
pub fn step(store: &mut ParticleStore, params: &SimParams, dt: f64) {
    let n = store.count();
    if n == 0 {
        return;
    }

    // Densities and pressures, from prior-step positions.
    let density_pressure: Vec<(f64, f64)> = (0..n)
        .into_par_iter()
        .map(|i| {
            let density = accel::particle_density(store, i, params);
            (density, params.equation_of_state.value(density))
        })
        .collect();
    for (particle, (density, pressure)) in store.particles_mut().iter_mut().zip(density_pressure) {
        particle.density = density;
        particle.pressure = pressure;
    }

    // Accelerations from the pressure gradient and gravity, then the velocity
    // update.
    let accelerations: Vec<Vec2> = (0..n)
        .into_par_iter()
        .map(|i| {
            let force = accel::pressure_gradient(store, i, params);
            force / store.particles()[i].density + Vec2::new(0., params.gravity)
        })
        .collect();
    for (particle, acc) in store.particles_mut().iter_mut().zip(accelerations) {
        integrate::advance_velocity(particle, acc, dt);
    }

    // Advection and boundary handling. The XSPH pass reads neighbor velocities,
    // so it too must finish before any position moves.
    if params.velocity_smoothing > 0. {
        let advection: Vec<Vec2> = (0..n)
            .into_par_iter()
            .map(|i| integrate::advection_velocity(store, i, params))
            .collect();
        for (particle, velocity) in store.particles_mut().iter_mut().zip(advection) {
            integrate::advance_position(particle, velocity, dt, params);
        }
    } else {
        store.particles_mut().par_iter_mut().for_each(|particle| {
            let velocity = particle.velocity;
            integrate::advance_position(particle, velocity, dt, params);
        });
    }
}
