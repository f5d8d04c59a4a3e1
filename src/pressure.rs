//! Equations of state: the pressure(density) relation converting estimated
//! density into a restoring force. Each variant carries exactly the parameters
//! its equation needs.

use bincode::{Decode, Encode};

#[derive(Clone, Copy, PartialEq, Debug, Encode, Decode)]
pub enum StateEquation {
    /// Linear gas approximation. Pressure is negative below the rest density,
    /// relaxing the fluid toward it rather than enforcing nonnegativity.
    Gas {
        rest_density: f64,
        pressure_multiplier: f64,
    },
    /// Cole (stiffened) equation of state.
    Cole {
        rest_density: f64,
        speed_of_sound: f64,
        adiabatic_index: f64,
        background_pressure: f64,
    },
}

impl StateEquation {
    /// Pressure, in Pa, for a given density in kg/m³.
    pub fn value(&self, density: f64) -> f64 {
        match *self {
            // P = (ρ - ρ₀) k
            Self::Gas {
                rest_density,
                pressure_multiplier,
            } => (density - rest_density) * pressure_multiplier,
            // P = B ((ρ / ρ₀)^γ - 1) + P_bg, B = ρ₀ c² / γ
            Self::Cole {
                rest_density,
                speed_of_sound,
                adiabatic_index,
                background_pressure,
            } => {
                let b = rest_density * speed_of_sound * speed_of_sound / adiabatic_index;
                b * ((density / rest_density).powf(adiabatic_index) - 1.) + background_pressure
            }
        }
    }

    pub fn rest_density(&self) -> f64 {
        match *self {
            Self::Gas { rest_density, .. } | Self::Cole { rest_density, .. } => rest_density,
        }
    }
}
