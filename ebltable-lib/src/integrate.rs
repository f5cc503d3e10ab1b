/// Composite Simpson's rule over samples `y` at (possibly uneven) points `x`.
///
/// With an even number of samples the last interval does not fit a Simpson
/// panel; the result averages "Simpson then trapezoid on the last interval"
/// with "trapezoid on the first interval then Simpson".
pub fn simpson(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    let n = y.len();
    if n < 2 {
        return 0.0;
    }
    if n == 2 {
        return 0.5 * (x[1] - x[0]) * (y[1] + y[0]);
    }
    if n % 2 == 1 {
        return simpson_panels(y, x, 0, n - 2);
    }

    let last = 0.5 * (x[n - 1] - x[n - 2]) * (y[n - 1] + y[n - 2]);
    let first = 0.5 * (x[1] - x[0]) * (y[1] + y[0]);
    let panels = simpson_panels(y, x, 0, n - 3) + simpson_panels(y, x, 1, n - 2);
    0.5 * (panels + first + last)
}

/// Simpson panels on `(i, i + 1, i + 2)` for `i` in `start..stop` by 2.
fn simpson_panels(y: &[f64], x: &[f64], start: usize, stop: usize) -> f64 {
    (start..stop)
        .step_by(2)
        .map(|i| {
            let h0 = x[i + 1] - x[i];
            let h1 = x[i + 2] - x[i + 1];
            let hsum = h0 + h1;
            let ratio = h0 / h1;
            hsum / 6.0
                * (y[i] * (2.0 - 1.0 / ratio)
                    + y[i + 1] * (hsum * hsum / (h0 * h1))
                    + y[i + 2] * (2.0 - ratio))
        })
        .sum()
}

/// `steps` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + step * i as f64).collect()
        }
    }
}
