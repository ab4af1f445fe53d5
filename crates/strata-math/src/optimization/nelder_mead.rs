//! Nelder-Mead simplex minimisation with box constraints.

use super::{OptimizationConfig, OptimizationResult};
use crate::error::{MathError, MathResult};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Step used for a zero starting coordinate.
const ZERO_STEP: f64 = 0.00025;

/// Minimises `f` with the Nelder-Mead simplex method.
///
/// Box constraints are enforced by projecting every trial point onto the
/// bounds. After a run converges the simplex is rebuilt around the best vertex
/// (up to `max_restarts` times); the search stops once a restart no longer
/// improves the objective by more than `tolerance`.
///
/// A run that exhausts `max_iterations` returns `Ok` with `converged = false`;
/// callers decide whether that is an error.
///
/// # Arguments
///
/// * `f` - Objective to minimise
/// * `initial` - Starting point (projected onto the bounds)
/// * `bounds` - Optional `(lower, upper)` per coordinate
/// * `config` - Optimisation settings
///
/// # Errors
///
/// Returns `MathError::InvalidInput` for an empty starting point or inverted
/// bounds, and `MathError::DimensionMismatch` if `bounds` has the wrong length.
///
/// # Example
///
/// ```rust
/// use strata_math::optimization::{nelder_mead, OptimizationConfig};
///
/// let f = |p: &[f64]| (p[0] - 1.0).powi(2) + (p[1] + 0.5).powi(2);
/// let result = nelder_mead(f, &[0.0, 0.0], None, &OptimizationConfig::default()).unwrap();
///
/// assert!(result.converged);
/// assert!((result.parameters[0] - 1.0).abs() < 1e-4);
/// ```
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return Err(MathError::invalid_input("initial point is empty"));
    }
    if let Some(bounds) = bounds {
        if bounds.len() != n {
            return Err(MathError::dimension_mismatch(n, bounds.len()));
        }
        if let Some((i, (lo, hi))) = bounds.iter().enumerate().find(|(_, (lo, hi))| lo > hi) {
            return Err(MathError::invalid_input(format!(
                "bound {i} is inverted: [{lo}, {hi}]"
            )));
        }
    }

    let objective = |x: &[f64]| {
        let value = f(x);
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    };

    let mut best = initial.to_vec();
    project(&mut best, bounds);
    let mut best_value = objective(&best);
    let mut iterations = 0;
    let mut converged = false;

    for restart in 0..=config.max_restarts {
        let budget = config.max_iterations.saturating_sub(iterations);
        if budget == 0 {
            converged = false;
            break;
        }

        let run = run_simplex(&objective, &best, bounds, config, budget);
        iterations += run.iterations;
        let improvement = best_value - run.value;

        if run.value <= best_value {
            best = run.point;
            best_value = run.value;
        }
        converged = run.converged;

        if !converged {
            log::debug!(
                "nelder-mead stopped after {iterations} iterations without converging (f = {best_value:.3e})"
            );
            break;
        }
        if restart > 0 && improvement <= config.tolerance {
            break;
        }
    }

    Ok(OptimizationResult {
        parameters: best,
        objective_value: best_value,
        iterations,
        converged,
    })
}

struct SimplexRun {
    point: Vec<f64>,
    value: f64,
    iterations: u32,
    converged: bool,
}

fn run_simplex<F>(
    f: &F,
    start: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: &OptimizationConfig,
    budget: u32,
) -> SimplexRun
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();
    let mut simplex = initial_simplex(start, bounds, config.initial_step);
    let mut values: Vec<f64> = simplex.iter().map(|x| f(x)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < budget {
        sort_simplex(&mut simplex, &mut values);

        if has_converged(&simplex, &values, config) {
            converged = true;
            break;
        }
        iterations += 1;

        let centroid = centroid(&simplex[..n]);
        let worst = simplex[n].clone();
        let worst_value = values[n];

        let reflected = towards(&centroid, &worst, -REFLECTION, bounds);
        let reflected_value = f(&reflected);

        if reflected_value < values[0] {
            let expanded = towards(&centroid, &reflected, EXPANSION, bounds);
            let expanded_value = f(&expanded);
            if expanded_value < reflected_value {
                simplex[n] = expanded;
                values[n] = expanded_value;
            } else {
                simplex[n] = reflected;
                values[n] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[n - 1] {
            simplex[n] = reflected;
            values[n] = reflected_value;
            continue;
        }

        let (contracted, contracted_value, accept) = if reflected_value < worst_value {
            let outside = towards(&centroid, &reflected, CONTRACTION, bounds);
            let value = f(&outside);
            (outside, value, value <= reflected_value)
        } else {
            let inside = towards(&centroid, &worst, CONTRACTION, bounds);
            let value = f(&inside);
            (inside, value, value < worst_value)
        };

        if accept {
            simplex[n] = contracted;
            values[n] = contracted_value;
            continue;
        }

        // Shrink towards the best vertex
        let best = simplex[0].clone();
        for (vertex, value) in simplex.iter_mut().zip(values.iter_mut()).skip(1) {
            *vertex = towards(&best, vertex, SHRINK, bounds);
            *value = f(vertex);
        }
    }

    sort_simplex(&mut simplex, &mut values);
    SimplexRun {
        point: simplex.swap_remove(0),
        value: values[0],
        iterations,
        converged,
    }
}

fn initial_simplex(start: &[f64], bounds: Option<&[(f64, f64)]>, step: f64) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(start.len() + 1);
    simplex.push(start.to_vec());

    for i in 0..start.len() {
        let mut vertex = start.to_vec();
        let delta = if start[i] == 0.0 {
            ZERO_STEP
        } else {
            step * start[i]
        };
        vertex[i] += delta;

        // Step the other way when the bound would collapse the vertex
        if let Some(&(lo, hi)) = bounds.map(|b| &b[i]) {
            if vertex[i] > hi || vertex[i] < lo {
                vertex[i] = start[i] - delta;
            }
        }
        project(&mut vertex, bounds);
        simplex.push(vertex);
    }

    simplex
}

fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

fn has_converged(simplex: &[Vec<f64>], values: &[f64], config: &OptimizationConfig) -> bool {
    let value_spread = values[1..]
        .iter()
        .map(|v| (v - values[0]).abs())
        .fold(0.0, f64::max);

    let vertex_spread = simplex[1..]
        .iter()
        .flat_map(|vertex| vertex.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
        .fold(0.0, f64::max);

    value_spread <= config.tolerance && vertex_spread <= config.parameter_tolerance
}

fn centroid(vertices: &[Vec<f64>]) -> Vec<f64> {
    let n = vertices.len() as f64;
    let mut c = vec![0.0; vertices[0].len()];
    for vertex in vertices {
        for (ci, xi) in c.iter_mut().zip(vertex) {
            *ci += xi / n;
        }
    }
    c
}

/// Returns `origin + coefficient * (target - origin)`, projected onto the bounds.
fn towards(
    origin: &[f64],
    target: &[f64],
    coefficient: f64,
    bounds: Option<&[(f64, f64)]>,
) -> Vec<f64> {
    let mut point: Vec<f64> = origin
        .iter()
        .zip(target)
        .map(|(o, t)| o + coefficient * (t - o))
        .collect();
    project(&mut point, bounds);
    point
}

fn project(point: &mut [f64], bounds: Option<&[(f64, f64)]>) {
    if let Some(bounds) = bounds {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(lo, hi);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_bowl() {
        // Minimize (x-2)^2 + (y-3)^2
        let f = |p: &[f64]| (p[0] - 2.0).powi(2) + (p[1] - 3.0).powi(2);

        let result = nelder_mead(f, &[0.0, 0.0], None, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-4);
        assert_relative_eq!(result.parameters[1], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rosenbrock() {
        let f = |p: &[f64]| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2);

        let result = nelder_mead(f, &[-1.2, 1.0], None, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(result.parameters[1], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_active_bound() {
        // Unconstrained minimum at x = -1 lies outside [0, 5]
        let f = |p: &[f64]| (p[0] + 1.0).powi(2) + (p[1] - 2.0).powi(2);
        let bounds = [(0.0, 5.0), (0.0, 5.0)];

        let result =
            nelder_mead(f, &[3.0, 3.0], Some(&bounds), &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert!(result.parameters[0] >= 0.0);
        assert_relative_eq!(result.parameters[0], 0.0, epsilon = 1e-4);
        assert_relative_eq!(result.parameters[1], 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_initial_point_projected() {
        let f = |p: &[f64]| p[0] * p[0];
        let bounds = [(1.0, 2.0)];

        let result =
            nelder_mead(f, &[10.0], Some(&bounds), &OptimizationConfig::default()).unwrap();

        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_iteration_budget_reports_not_converged() {
        let f = |p: &[f64]| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2);
        let config = OptimizationConfig::default().with_max_iterations(5);

        let result = nelder_mead(f, &[-1.2, 1.0], None, &config).unwrap();

        assert!(!result.converged);
        assert!(result.iterations <= 5);
    }

    #[test]
    fn test_nan_objective_is_avoided() {
        let f = |p: &[f64]| if p[0] < 0.0 { f64::NAN } else { (p[0] - 0.5).powi(2) };

        let result = nelder_mead(f, &[2.0], None, &OptimizationConfig::default()).unwrap();

        assert_relative_eq!(result.parameters[0], 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let f = |p: &[f64]| p[0];
        let config = OptimizationConfig::default();

        assert!(nelder_mead(f, &[], None, &config).is_err());
        assert!(matches!(
            nelder_mead(f, &[1.0], Some(&[(0.0, 1.0), (0.0, 1.0)]), &config),
            Err(MathError::DimensionMismatch { .. })
        ));
        assert!(nelder_mead(f, &[1.0], Some(&[(2.0, 1.0)]), &config).is_err());
    }
}
