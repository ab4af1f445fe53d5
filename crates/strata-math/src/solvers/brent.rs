//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Keeps a bracket `[xcur, xblk]` with a sign change and at every step tries
/// a secant (two points) or inverse quadratic (three points) step, falling
/// back to bisection whenever the interpolated step is not short enough.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// Terminates when `f(x) == 0` or when half the bracket width is below
/// `(tolerance + relative_tolerance * |x|) / 2`.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - Other end of the bracket
/// * `config` - Solver configuration
///
/// # Errors
///
/// - `MathError::InvalidBracket` if the endpoints do not bracket a root
/// - `MathError::InvalidInput` if `f` is not finite at an endpoint
/// - `MathError::ConvergenceFailed` if `max_iterations` is exhausted
///
/// # Example
///
/// ```rust
/// use strata_math::solvers::{brent, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 1.521_379_706_804_568).abs() < 1e-9);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if !fpre.is_finite() || !fcur.is_finite() {
        return Err(MathError::invalid_input(format!(
            "function not finite at bracket endpoints: f({a}) = {fpre}, f({b}) = {fcur}"
        )));
    }

    // Check that root is bracketed
    if fpre * fcur > 0.0 {
        return Err(MathError::InvalidBracket {
            a,
            b,
            fa: fpre,
            fb: fcur,
        });
    }
    if fpre == 0.0 {
        return Ok(SolverResult {
            root: xpre,
            iterations: 0,
            residual: fpre,
        });
    }
    if fcur == 0.0 {
        return Ok(SolverResult {
            root: xcur,
            iterations: 0,
            residual: fcur,
        });
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iteration in 1..=config.max_iterations {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }

        // Keep the best estimate in xcur
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (config.tolerance + config.relative_tolerance * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;

        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(SolverResult {
                root: xcur,
                iterations: iteration,
                residual: fcur,
            });
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // Secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // Inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = f(xcur);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fcur.abs(),
    ))
}
