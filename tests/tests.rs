use sphsim::simulation::forces::{AccelSet, ForceContext, StepReport};
use sphsim::simulation::neighbors::AllParticles;
use sphsim::{grid_layout, pressure_at, PressureField, step, NVec2, Parameters, SimError, SingularityPolicy, SmoothingKernel, Snapshot};

/// Parameters for `n` particles in a 400x400 box with gravity switched off
pub fn test_params(n: usize) -> Parameters {
    Parameters {
        particle_count: n,
        gravity: 0.0,
        ..Parameters::default()
    }
}

pub fn at_rest(n: usize) -> Vec<NVec2> {
    vec![NVec2::zeros(); n]
}

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol * (1.0 + b.abs()), "expected {b}, got {a}");
}

// ==================================================================================
// Kernel tests
// ==================================================================================

#[test]
fn kernel_vanishes_outside_support() {
    let k = SmoothingKernel::new(30.0);
    for d in [30.0, 30.000001, 45.0, 1.0e6] {
        assert_eq!(k.kernel(d), 0.0, "kernel({d}) should be zero");
    }
}

#[test]
fn kernel_peak_is_two_over_h() {
    let k = SmoothingKernel::new(30.0);
    assert_eq!(k.kernel(0.0), 2.0 / 30.0);
}

#[test]
fn kernel_strictly_decreasing_inside_support() {
    let k = SmoothingKernel::new(30.0);
    let mut prev = k.kernel(0.0);
    let mut d = 0.25;
    while d < 30.0 {
        let w = k.kernel(d);
        assert!(w < prev, "kernel not decreasing at d = {d}");
        assert!(w > 0.0);
        prev = w;
        d += 0.25;
    }
}

#[test]
fn derivative_is_not_cut_off_by_default() {
    let k = SmoothingKernel::new(30.0);
    assert_eq!(k.derivative(0.0), -6.0 / (30.0f64 * 30.0));
    assert!(k.derivative(45.0) < 0.0);

    let t = SmoothingKernel::truncated(30.0);
    assert_eq!(t.derivative(45.0), 0.0);
    assert_eq!(t.derivative(10.0), k.derivative(10.0));
}

// ==================================================================================
// Pressure field tests
// ==================================================================================

#[test]
fn pressure_of_coincident_particles_is_peak_times_total_mass() {
    let k = SmoothingKernel::new(30.0);
    let point = NVec2::new(50.0, 50.0);
    let positions = vec![point; 4];
    let masses = vec![1.0, 2.0, 0.5, 3.0];

    let p = pressure_at(&k, &point, &positions, &masses);
    assert_close(p, k.kernel(0.0) * 6.5, 1e-14);
}

#[test]
fn pressure_ignores_particles_beyond_support() {
    let k = SmoothingKernel::new(30.0);
    let positions = vec![NVec2::new(0.0, 0.0), NVec2::new(100.0, 0.0)];
    let masses = vec![1.0, 5.0];

    assert_eq!(pressure_at(&k, &positions[0], &positions, &masses), k.kernel(0.0));
}

#[test]
fn pressure_grid_peaks_at_the_particle() {
    let k = SmoothingKernel::new(30.0);
    let positions = vec![NVec2::new(20.0, 40.0)];
    let masses = vec![1.0];
    let search = AllParticles::new(&positions);
    let field = PressureField::new(k, Snapshot { positions: &positions, masses: &masses }, &search);

    let grid = field.sample_grid(100.0, 60.0, 20.0);

    assert_eq!(grid.len(), 3);
    assert_eq!(grid[0].len(), 5);
    assert_eq!(grid[2][1], k.kernel(0.0));
    assert_eq!(grid[0][4], 0.0);
    assert!(grid[1][1] > 0.0 && grid[1][1] < grid[2][1]);
}

// ==================================================================================
// Step tests
// ==================================================================================

#[test]
fn lone_particle_without_gravity_stays_put() {
    let p = test_params(1);
    let mut x = vec![NVec2::new(100.0, 100.0)];
    let mut v = at_rest(1);
    let m = vec![1.0];

    for _ in 0..50 {
        let out = step(&v, &x, &m, &p).unwrap();
        x = out.positions;
        v = out.velocities;
    }

    assert_eq!(x[0], NVec2::new(100.0, 100.0));
    assert_eq!(v[0], NVec2::zeros());
}

#[test]
fn distant_pair_feels_no_force_with_truncated_derivative() {
    let mut p = test_params(2);
    p.truncate_derivative = true;
    let x = vec![NVec2::new(100.0, 100.0), NVec2::new(200.0, 100.0)];

    let out = step(&at_rest(2), &x, &[1.0, 1.0], &p).unwrap();

    assert_eq!(out.velocities, at_rest(2));
    assert_eq!(out.positions, x);
}

#[test]
fn distant_pair_still_interacts_with_untruncated_derivative() {
    let p = test_params(2);
    let x = vec![NVec2::new(100.0, 100.0), NVec2::new(200.0, 100.0)];

    let out = step(&at_rest(2), &x, &[1.0, 1.0], &p).unwrap();
    let (v0, v1) = (out.velocities[0], out.velocities[1]);

    // Local pressure is below target, so the pair is drawn together
    assert!(v0.x > 0.0, "got {v0:?}");
    assert_eq!(v0.x, -v1.x);
    assert_eq!(v0.y, 0.0);
}

#[test]
fn free_fall_follows_discrete_recurrence() {
    let mut p = test_params(2);
    p.gravity = 0.01;
    p.truncate_derivative = true;
    let x0 = vec![NVec2::new(100.0, 100.0), NVec2::new(300.0, 100.0)];

    let mut x = x0.clone();
    let mut v = at_rest(2);
    let t = 20;
    for _ in 0..t {
        let out = step(&v, &x, &[1.0, 1.0], &p).unwrap();
        x = out.positions;
        v = out.velocities;
    }

    let t = t as f64;
    for i in 0..2 {
        assert_eq!(v[i].x, 0.0);
        assert_close(v[i].y, t * p.gravity, 1e-12);
        // x_t = x_{t-1} + v_{t-1} + v_t  =>  displacement G t^2
        assert_close(x[i].y - x0[i].y, p.gravity * t * t, 1e-12);
        assert_eq!(x[i].x, x0[i].x);
    }
}

#[test]
fn left_wall_clamps_and_reflects() {
    let p = test_params(1);
    let x = vec![NVec2::new(6.0, 200.0)];
    let v = vec![NVec2::new(-3.0, 0.0)];

    let out = step(&v, &x, &[1.0], &p).unwrap();

    assert_eq!(out.positions[0].x, 5.0);
    assert_eq!(out.velocities[0].x, -3.0 * -p.wall_restitution);
    assert_eq!(out.positions[0].y, 200.0);
}

#[test]
fn right_wall_uses_mass_scaled_radius() {
    let p = test_params(1);
    // m = 8 -> display radius 2 * 5 = 10
    let x = vec![NVec2::new(385.0, 200.0)];
    let v = vec![NVec2::new(10.0, 0.0)];

    let out = step(&v, &x, &[8.0], &p).unwrap();

    assert_close(out.positions[0].x, 390.0, 1e-12);
    assert_close(out.velocities[0].x, -7.0, 1e-12);
}

#[test]
fn corner_hit_reflects_both_axes() {
    let p = test_params(1);
    let x = vec![NVec2::new(7.0, 396.0)];
    let v = vec![NVec2::new(-2.0, 2.0)];

    let out = step(&v, &x, &[1.0], &p).unwrap();

    assert_eq!(out.positions[0], NVec2::new(5.0, 395.0));
    assert_eq!(out.velocities[0], NVec2::new(-2.0 * -0.7, 2.0 * -0.7));
}

#[test]
fn step_is_deterministic() {
    let p = Parameters::default();
    let x = grid_layout(p.particle_count, p.domain_width, p.domain_height, 0.5);
    let v = at_rest(p.particle_count);
    let m = vec![1.0; p.particle_count];

    let a = step(&v, &x, &m, &p).unwrap();
    let b = step(&v, &x, &m, &p).unwrap();
    assert_eq!(a, b);

    let a2 = step(&a.velocities, &a.positions, &m, &p).unwrap();
    let b2 = step(&b.velocities, &b.positions, &m, &p).unwrap();
    assert_eq!(a2, b2);
}

#[test]
fn step_does_not_touch_inputs() {
    let p = Parameters::default();
    let x = grid_layout(p.particle_count, p.domain_width, p.domain_height, 0.5);
    let x_before = x.clone();
    let v = at_rest(p.particle_count);
    let m = vec![1.0; p.particle_count];

    let _ = step(&v, &x, &m, &p).unwrap();
    assert_eq!(x, x_before);
}

// ==================================================================================
// Golden two-particle scenario: h = 30, unit masses, at (0, 0) and (10, 0)
// ==================================================================================

const GOLDEN_PRESSURE: f64 = 0.08641975308641975;
const GOLDEN_FORCE: f64 = 4.023776863283039e-06;
const GOLDEN_ACCEL: f64 = 4.65608465608466e-05;

fn golden() -> (Vec<NVec2>, Vec<f64>, Parameters) {
    (vec![NVec2::new(0.0, 0.0), NVec2::new(10.0, 0.0)], vec![1.0, 1.0], test_params(2))
}

#[test]
fn golden_pressure() {
    let (x, m, p) = golden();
    let k = SmoothingKernel::new(p.smoothing_radius);

    for xi in &x {
        assert_close(pressure_at(&k, xi, &x, &m), GOLDEN_PRESSURE, 1e-14);
    }
}

#[test]
fn golden_accelerations() {
    let (x, m, p) = golden();
    let forces = AccelSet::from_parameters(&p);
    let search = AllParticles::new(&x);
    let ctx = ForceContext {
        snapshot: Snapshot { positions: &x, masses: &m },
        search: &search,
    };

    let mut acc = vec![NVec2::zeros(); 2];
    let mut report = StepReport::default();
    forces.accumulate_accels(&ctx, &mut acc, &mut report).unwrap();

    assert!(report.is_clean());
    assert_close(acc[0].x * GOLDEN_PRESSURE, GOLDEN_FORCE, 1e-12);
    assert_close(acc[0].x, GOLDEN_ACCEL, 1e-12);
    assert_close(acc[1].x, -GOLDEN_ACCEL, 1e-12);
    assert_eq!(acc[0].y, 0.0);
    assert_eq!(acc[1].y, 0.0);
}

#[test]
fn golden_step_output() {
    let (x, m, p) = golden();
    let out = step(&at_rest(2), &x, &m, &p).unwrap();

    // Particle 0 starts inside the wall margin on both axes
    assert_eq!(out.positions[0], NVec2::new(5.0, 5.0));
    assert_close(out.velocities[0].x, -0.7 * GOLDEN_ACCEL, 1e-12);

    assert_close(out.positions[1].x, 10.0 - GOLDEN_ACCEL, 1e-15);
    assert_eq!(out.positions[1].y, 5.0);
    assert_close(out.velocities[1].x, -GOLDEN_ACCEL, 1e-12);
}

// ==================================================================================
// Singularity and validation tests
// ==================================================================================

#[test]
fn coincident_particles_fail_by_default() {
    let p = test_params(2);
    let x = vec![NVec2::new(100.0, 100.0); 2];

    let err = step(&at_rest(2), &x, &[1.0, 1.0], &p).unwrap_err();
    assert_eq!(err, SimError::CoincidentParticles { i: 0, j: 1 });
}

#[test]
fn coincident_particles_guarded_get_gravity_only() {
    let mut p = test_params(2);
    p.gravity = 0.01;
    p.singularity = SingularityPolicy::Guard { epsilon: 1e-9 };
    let x = vec![NVec2::new(100.0, 100.0); 2];

    let out = step(&at_rest(2), &x, &[1.0, 1.0], &p).unwrap();

    assert_eq!(out.report.guarded_pairs, 2);
    assert_eq!(out.report.guarded_particles, 0);
    for v in &out.velocities {
        assert_eq!(*v, NVec2::new(0.0, 0.01));
    }
}

#[test]
fn zero_pressure_fails_by_default() {
    let p = test_params(1);
    let x = vec![NVec2::new(100.0, 100.0)];

    let err = step(&at_rest(1), &x, &[0.0], &p).unwrap_err();
    assert_eq!(err, SimError::DegeneratePressure { index: 0, pressure: 0.0 });
}

#[test]
fn low_pressure_guarded_is_reported() {
    let mut p = test_params(3);
    p.singularity = SingularityPolicy::Guard { epsilon: 1.0 };
    let x = vec![NVec2::new(100.0, 100.0), NVec2::new(120.0, 100.0), NVec2::new(140.0, 100.0)];

    let out = step(&at_rest(3), &x, &[1.0; 3], &p).unwrap();

    assert_eq!(out.report.guarded_particles, 3);
    assert_eq!(out.velocities, at_rest(3));
}

#[test]
fn misaligned_arrays_are_rejected() {
    let p = test_params(2);
    let x = vec![NVec2::new(100.0, 100.0), NVec2::new(200.0, 100.0)];

    let err = step(&at_rest(2), &x, &[1.0], &p).unwrap_err();
    assert!(matches!(err, SimError::LengthMismatch { masses: 1, .. }));

    let err = step(&at_rest(2), &x, &[1.0, 1.0], &test_params(3)).unwrap_err();
    assert!(matches!(err, SimError::LengthMismatch { expected: 3, .. }));
}

#[test]
fn parameter_ranges_are_checked() {
    assert!(Parameters::default().validate().is_ok());

    let p = Parameters { wall_restitution: 1.0, ..Parameters::default() };
    assert!(matches!(p.validate(), Err(SimError::InvalidParameter { name: "wall_restitution", .. })));

    let p = Parameters { smoothing_radius: 0.0, ..Parameters::default() };
    assert!(matches!(p.validate(), Err(SimError::InvalidParameter { name: "smoothing_radius", .. })));

    let p = Parameters { particle_count: 0, ..Parameters::default() };
    assert!(p.validate().is_err());

    let p = Parameters { singularity: SingularityPolicy::Guard { epsilon: -1.0 }, ..Parameters::default() };
    assert!(p.validate().is_err());
}

// ==================================================================================
// Layout tests
// ==================================================================================

#[test]
fn grid_layout_fills_middle_of_domain() {
    let x = grid_layout(70, 400.0, 400.0, 0.5);

    assert_eq!(x.len(), 70);
    assert_eq!(x[0], NVec2::new(100.0, 100.0));
    assert_eq!(x[1], NVec2::new(125.0, 100.0));
    assert_eq!(x[8], NVec2::new(100.0, 125.0));
    assert_eq!(x[69], NVec2::new(225.0, 300.0));
}
