use std::time::Instant;

use crate::simulation::integrator::step;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::grid_layout;
use crate::simulation::states::NVec2;

/// Time one `step` for growing particle counts.
/// The domain grows with `sqrt(n)` so the particle density stays close to
/// the default scenario's.
pub fn bench_step() {
    let ns = [100, 200, 400, 800, 1600];

    for n in ns {
        let scale = (n as f64 / 70.0).sqrt();
        let params = Parameters {
            particle_count: n,
            domain_width: 400.0 * scale,
            domain_height: 400.0 * scale,
            ..Parameters::default()
        };

        // deterministic positions, no rand needed
        let positions = grid_layout(n, params.domain_width, params.domain_height, 0.5);
        let velocities = vec![NVec2::zeros(); n];
        let masses = vec![1.0; n];

        // Warm up
        if let Err(e) = step(&velocities, &positions, &masses, &params) {
            println!("N = {n:5}, step failed: {e}");
            continue;
        }

        let reps = 5;
        let t0 = Instant::now();
        for _ in 0..reps {
            let _ = step(&velocities, &positions, &masses, &params);
        }
        let dt = t0.elapsed().as_secs_f64() / reps as f64;

        println!("N = {n:5}, step = {dt:10.6} s, per pair = {:8.3} ns", dt / (n * n) as f64 * 1e9);
    }
}
