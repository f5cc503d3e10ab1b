use std::thread;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ebltable::{EblError, Flat, InverseConfig, OptDepth, PowerLaw, SplineDegrees, Tau, TauGrid};

fn tau_law(z: f64, log_e_gev: f64) -> f64 {
    z * (1.0 + z) * 10f64.powf(0.8 * (log_e_gev - 3.0))
}

/// 21 energies from 10 GeV to 1 TeV, 8 redshifts.
fn synthetic(degrees: SplineDegrees) -> OptDepth {
    let log_e: Vec<f64> = (0..21).map(|i| 1.0 + 0.1 * i as f64).collect();
    let z = vec![0.01, 0.05, 0.1, 0.2, 0.4, 0.7, 1.0, 1.5];
    let rows: Vec<Vec<f64>> = log_e
        .iter()
        .map(|&le| z.iter().map(|&zz| tau_law(zz, le)).collect())
        .collect();
    let energy_gev: Vec<f64> = log_e.iter().map(|le| 10f64.powf(*le)).collect();
    OptDepth::with_degrees(z, &energy_gev, TauGrid::from_rows(&rows).unwrap(), degrees).unwrap()
}

#[test]
fn test_reference_scenario() {
    let tau = TauGrid::from_rows(&[
        vec![0.0, 0.0, 0.0],
        vec![0.1, 0.3, 0.5],
        vec![1.0, 2.0, 3.0],
    ])
    .unwrap();
    let m = OptDepth::new(vec![0.1, 0.5, 1.0], &[10.0, 100.0, 1000.0], tau).unwrap();
    let v = m.opt_depth(0.5, 0.1).as_scalar().unwrap();
    assert_abs_diff_eq!(v, 0.3, epsilon = 1e-12);
}

#[test]
fn test_passes_through_samples() {
    for degrees in [
        SplineDegrees { kx: 1, ky: 1 },
        SplineDegrees::default(),
        SplineDegrees { kx: 3, ky: 3 },
    ] {
        let m = synthetic(degrees);
        let energy_tev: Vec<f64> = m.energy_gev().iter().map(|e| e / 1e3).collect();
        let tau = m.opt_depth(m.redshift(), energy_tev);
        let grid = tau.as_matrix().unwrap();
        for j in 0..m.redshift().len() {
            for i in 0..m.log_energy_gev().len() {
                assert_relative_eq!(
                    grid.get(j, i),
                    m.tau().get(i, j),
                    max_relative = 1e-9,
                    epsilon = 1e-12
                );
            }
        }
    }
}

#[test]
fn test_permutation_invariance() {
    let m = synthetic(SplineDegrees::default());
    let z = vec![0.03, 0.9, 0.25, 1.2];
    let e = vec![0.015, 0.6, 0.08, 0.2, 0.033];
    let reference = m.opt_depth(z.clone(), e.clone());
    let reference = reference.as_matrix().unwrap();

    let z_perm = [2, 0, 3, 1];
    let e_perm = [4, 1, 0, 3, 2];
    let zs: Vec<f64> = z_perm.iter().map(|&i| z[i]).collect();
    let es: Vec<f64> = e_perm.iter().map(|&i| e[i]).collect();
    let shuffled = m.opt_depth(zs, es);
    let shuffled = shuffled.as_matrix().unwrap();

    for (a, &iz) in z_perm.iter().enumerate() {
        for (b, &ie) in e_perm.iter().enumerate() {
            assert_eq!(shuffled.get(a, b), reference.get(iz, ie));
        }
    }
}

#[test]
fn test_output_shapes() {
    let m = synthetic(SplineDegrees::default());
    assert!(matches!(m.opt_depth(0.3, 0.1), Tau::Scalar(_)));

    let over_z = m.opt_depth(vec![0.1, 0.2, 0.3, 0.4], 0.1);
    assert_eq!(over_z.as_vector().unwrap().len(), 4);

    let over_e = m.opt_depth(0.3, [0.05, 0.1]);
    assert_eq!(over_e.as_vector().unwrap().len(), 2);

    let matrix = m.opt_depth([0.1, 0.2], [0.05, 0.1, 0.5]);
    assert_eq!(matrix.as_matrix().unwrap().shape(), (2, 3));
}

#[test]
fn test_below_grid_redshift_warns_and_stays_finite() {
    let m = synthetic(SplineDegrees::default());
    let eval = m.evaluate(0.001, 0.5);
    let warning = eval.warning.expect("range warning");
    assert_eq!(warning.requested, 0.001);
    assert_eq!(warning.minimum, 0.01);
    let v = eval.tau.as_scalar().unwrap();
    assert!(v.is_finite());
    // clamped to the lowest grid redshift
    assert_relative_eq!(v, m.opt_depth(0.01, 0.5).as_scalar().unwrap());
}

#[test]
fn test_shape_error() {
    let tau = TauGrid::from_rows(&vec![vec![0.1, 0.2, 0.3]; 4]).unwrap();
    let err = OptDepth::new(
        vec![0.1, 0.5, 1.0],
        &[10.0, 100.0, 1000.0, 10000.0, 100000.0],
        tau,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EblError::Shape {
            expected: (5, 3),
            found: (4, 3)
        }
    ));
}

#[test]
fn test_unsorted_grid_rejected() {
    let tau = TauGrid::from_rows(&vec![vec![0.1, 0.2, 0.3]; 3]).unwrap();
    let err = OptDepth::new(vec![0.5, 0.1, 1.0], &[10.0, 100.0, 1000.0], tau).unwrap_err();
    assert!(matches!(err, EblError::NotIncreasing { index: 1, .. }));
}

#[test]
fn test_inverse_round_trip() {
    let m = synthetic(SplineDegrees::default());
    for z in [0.15, 0.37, 1.1] {
        for e_gev in [25.0, 120.0, 480.0] {
            let tau = m.opt_depth(z, e_gev / 1e3).as_scalar().unwrap();
            let back = m.opt_depth_inverse(z, tau).unwrap();
            assert_relative_eq!(back, e_gev, max_relative = 0.02);
        }
    }
}

#[test]
fn test_inverse_checked_on_monotonic_model() {
    let m = synthetic(SplineDegrees::default());
    let checked = InverseConfig {
        check_monotonic: true,
        ..InverseConfig::default()
    };
    let e = m.opt_depth_inverse_with(0.4, 0.5, &checked).unwrap();
    assert_relative_eq!(e, m.opt_depth_inverse(0.4, 0.5).unwrap());
}

#[test]
fn test_inverse_rejects_decreasing_curve() {
    let tau = TauGrid::from_rows(&[
        vec![0.1, 0.2, 0.3],
        vec![0.5, 0.9, 1.4],
        vec![0.2, 0.4, 0.6],
        vec![2.0, 3.0, 4.0],
    ])
    .unwrap();
    let m = OptDepth::new(vec![0.1, 0.5, 1.0], &[10.0, 100.0, 1000.0, 10000.0], tau).unwrap();
    let checked = InverseConfig {
        check_monotonic: true,
        ..InverseConfig::default()
    };
    assert!(matches!(
        m.opt_depth_inverse_with(0.5, 0.5, &checked),
        Err(EblError::NonMonotonic { index: 2, .. })
    ));
    assert!(m.opt_depth_inverse(0.5, 0.5).unwrap().is_finite());
}

#[test]
fn test_flat_bin_average_converges() {
    let m = synthetic(SplineDegrees::default());
    let edges = [0.01, 1.0];
    let coarse = m.opt_depth_ebin_steps(0.5, &edges, &Flat, 20).unwrap();
    let fine = m.opt_depth_ebin_steps(0.5, &edges, &Flat, 200).unwrap();
    assert_eq!(coarse.len(), 1);
    assert!(((coarse[0] - fine[0]) / fine[0]).abs() < 0.01);

    // energy-weighted mean of tau over the bin, by the closed form of tau_law
    let (lo, hi) = (1.0_f64, 3.0_f64);
    let c = 0.5 * 1.5 * 10f64.powf(-2.4);
    let num = c * (10f64.powf(1.8 * hi) - 10f64.powf(1.8 * lo)) / 1.8;
    let den = 10f64.powf(hi) - 10f64.powf(lo);
    assert_relative_eq!(fine[0], num / den, max_relative = 0.01);
}

#[test]
fn test_bin_average_lies_within_bin_range() {
    let m = synthetic(SplineDegrees::default());
    let edges = [0.01, 0.03, 0.1, 0.3, 1.0];
    let avg = m.opt_depth_ebin(0.7, &edges, &PowerLaw::new(2.0)).unwrap();
    assert_eq!(avg.len(), 4);
    for (k, v) in avg.iter().enumerate() {
        let lo = m.opt_depth(0.7, edges[k]).as_scalar().unwrap();
        let hi = m.opt_depth(0.7, edges[k + 1]).as_scalar().unwrap();
        assert!(*v > lo && *v < hi, "bin {k}: {lo} < {v} < {hi}");
    }
}

#[test]
fn test_concurrent_evaluation() {
    let m = synthetic(SplineDegrees::default());
    let expected = m.opt_depth(0.4, 0.2).as_scalar().unwrap();
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let v = m.opt_depth(0.4, 0.2).as_scalar().unwrap();
                assert_eq!(v, expected);
            });
        }
    });
}

#[test]
fn test_tabulate_is_energy_major() {
    let m = synthetic(SplineDegrees::default());
    let table = m.tabulate(&[0.1, 0.2], &[0.05, 0.1, 0.5]);
    assert_eq!(table.tau.len(), 3);
    assert_eq!(table.tau[0].len(), 2);
    assert_relative_eq!(table.energy_gev[1], 100.0);
    assert_relative_eq!(table.tau[2][1], m.opt_depth(0.2, 0.5).as_scalar().unwrap());
}
