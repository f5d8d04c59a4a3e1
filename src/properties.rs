//! Diagnostics over a particle set: sampled kernel curves, density profiles,
//! and summary statistics, plus optional PNG line charts of each. These consume
//! the same evaluators the simulation uses but are for inspection only; nothing
//! here feeds back into the dynamics.

const N_SAMPLE_PTS: usize = 120;

use lin_alg::f64::Vec2;
use plotters::{
    element::PathElement,
    prelude::{BitMapBackend, ChartBuilder, Color, IntoDrawingArea, BLACK, BLUE, WHITE},
    series::LineSeries,
};

use crate::{accel, Kernel, ParticleStore, SimParams};

/// The influence curve. X: distance (m). Y: weight (1/m).
pub fn kernel_profile(kernel: Kernel, h: f64, r_max: f64) -> Vec<(f64, f64)> {
    let dr = r_max / N_SAMPLE_PTS as f64;
    (0..N_SAMPLE_PTS)
        .map(|i| {
            let r = i as f64 * dr;
            (r, kernel.influence(r, h))
        })
        .collect()
}

/// The influence-derivative curve. X: distance (m). Y: slope (1/m²).
pub fn kernel_slope_profile(kernel: Kernel, h: f64, r_max: f64) -> Vec<(f64, f64)> {
    let dr = r_max / N_SAMPLE_PTS as f64;
    (0..N_SAMPLE_PTS)
        .map(|i| {
            let r = i as f64 * dr;
            (r, kernel.influence_derivative(r, h))
        })
        .collect()
}

/// Density sampled along the horizontal line at height `y`, across the full
/// domain width. X: x (m). Y: ρ (kg/m³). Uses the free-point estimate, which
/// counts every particle.
pub fn density_profile(store: &ParticleStore, params: &SimParams, y: f64) -> Vec<(f64, f64)> {
    let dx = params.width / N_SAMPLE_PTS as f64;
    (0..N_SAMPLE_PTS)
        .map(|i| {
            let x = i as f64 * dx;
            (x, accel::density_at(store, Vec2::new(x, y), params))
        })
        .collect()
}

/// Mean of the live particles' densities, in kg/m³.
pub fn mean_density(store: &ParticleStore) -> f64 {
    if store.is_empty() {
        return 0.;
    }
    let sum: f64 = store.particles().iter().map(|p| p.density).sum();
    sum / store.count() as f64
}

/// Largest particle speed, in m/s. Useful for judging step-size sanity.
pub fn max_speed(store: &ParticleStore) -> f64 {
    store
        .particles()
        .iter()
        .map(|p| p.velocity.magnitude())
        .fold(0., f64::max)
}

/// Render sampled `(x, y)` data as a PNG line chart.
pub fn plot(data: &[(f64, f64)], x_label: &str, y_label: &str, plot_title: &str, filename: &str) {
    let x_range = data
        .iter()
        .map(|(x, _)| *x)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), x| {
            (min.min(x), max.max(x))
        });
    let y_range = data
        .iter()
        .map(|(_, y)| *y)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), y| {
            (min.min(y), max.max(y))
        });

    let fname = format!("{filename}.png");
    let root = BitMapBackend::new(&fname, (800, 600)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root)
        .caption(plot_title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .unwrap();

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .unwrap();

    chart
        .draw_series(LineSeries::new(data.iter().cloned(), BLUE))
        .unwrap()
        .label("Data")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .unwrap();
}

pub fn plot_kernel_profile(kernel: Kernel, h: f64) {
    plot(
        &kernel_profile(kernel, h, 2. * h),
        "distance (m)",
        "W (1/m)",
        &format!("{kernel:?} kernel, h = {h}"),
        &format!("kernel_{kernel:?}"),
    );
}

pub fn plot_density_profile(data: &[(f64, f64)], y: f64) {
    plot(
        data,
        "x (m)",
        "ρ (kg/m³)",
        &format!("Density along y = {y:.2} m"),
        "density_profile",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Particle;

    #[test]
    fn kernel_profile_starts_at_the_peak() {
        let data = kernel_profile(Kernel::Cubic, 0.5, 1.);
        assert_eq!(data.len(), N_SAMPLE_PTS);
        assert_eq!(data[0].0, 0.);
        // The cubic peaks at zero distance and vanishes past its support.
        assert!(data[0].1 > data[1].1);
        assert_eq!(data[N_SAMPLE_PTS - 1].1, 0.);

        // The slope curve starts flat at the center and vanishes past the
        // support too.
        let slopes = kernel_slope_profile(Kernel::Cubic, 0.5, 1.);
        assert_eq!(slopes[0].1, 0.);
        assert!(slopes[1].1 < 0.);
        assert_eq!(slopes[N_SAMPLE_PTS - 1].1, 0.);
    }

    #[test]
    fn density_profile_peaks_near_the_particles() {
        let params = SimParams {
            h: 1.,
            ..Default::default()
        };
        let mut store = ParticleStore::new(0, 4);
        store.append(Particle::at(Vec2::new(4., 3.)));

        let data = density_profile(&store, &params, 3.);
        let (peak_x, peak) = data
            .iter()
            .copied()
            .fold((0., f64::NEG_INFINITY), |acc, s| if s.1 > acc.1 { s } else { acc });

        assert!(peak > 0.);
        assert!((peak_x - 4.).abs() < 2. * params.width / N_SAMPLE_PTS as f64);
    }

    #[test]
    fn summary_statistics() {
        let mut store = ParticleStore::new(0, 4);
        let mut a = Particle::at(Vec2::new(1., 1.));
        a.density = 10.;
        a.velocity = Vec2::new(3., 4.);
        let mut b = Particle::at(Vec2::new(2., 2.));
        b.density = 20.;
        store.append(a);
        store.append(b);

        assert!((mean_density(&store) - 15.).abs() < 1e-12);
        assert!((max_speed(&store) - 5.).abs() < 1e-12);

        let empty = ParticleStore::new(0, 4);
        assert_eq!(mean_density(&empty), 0.);
        assert_eq!(max_speed(&empty), 0.);
    }
}
