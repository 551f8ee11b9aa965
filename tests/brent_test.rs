use brentmin::prelude::*;
use float_cmp::{approx_eq, F64Margin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const MARGIN: F64Margin = F64Margin {
    epsilon: 1e-8,
    ulps: 10,
};

fn scenario_tolerances(crit_limit: f64) -> Tolerances {
    Tolerances::new(50, crit_limit, 1e-10, 1e-6).unwrap()
}

#[test]
fn test_shifted_quadratic_converges() {
    let brent = Brent::new(scenario_tolerances(0.0));
    let mut f = |x: f64| (x - 2.0).powi(2);

    let result = brent.refine(&mut f, Bracket::new(-5.0, 0.0, 5.0), 4.0);

    assert_ne!(result.termination, Termination::MaxIterations);
    assert!(!result.cancelled);
    assert!((result.xmin - 2.0).abs() < 1e-5);
    assert!(approx_eq!(f64, result.fmin, 0.0, MARGIN));
}

#[test]
fn test_crit_limit_above_start() {
    let brent = Brent::new(scenario_tolerances(5.0));
    let mut f = |x: f64| (x - 2.0).powi(2);
    let bracket = Bracket::new(-5.0, 0.0, 5.0);

    let result = brent.refine(&mut f, bracket, 4.0);

    assert_eq!(result.termination, Termination::CritLimit);
    assert_eq!(result.iters, 0);
    assert!(!result.cancelled);
    assert_eq!(result.bracket, bracket);
    assert_eq!(result.xmin, 0.0);
    assert_eq!(result.fmin, 4.0);
}

#[test]
fn test_preset_flag_cancels_immediately() {
    let brent = Brent::new(scenario_tolerances(0.0));
    let mut f = |x: f64| (x - 2.0).powi(2);
    let mut flag = Arc::new(AtomicBool::new(true));
    let bracket = Bracket::new(-5.0, 0.0, 5.0);

    let result = brent.minimize(&mut f, &mut flag, bracket, 4.0);

    assert!(result.cancelled);
    assert_eq!(result.termination, Termination::Cancelled);
    assert_eq!(result.bracket, bracket);
    assert_eq!(result.fmin, 4.0);
}

#[test]
fn test_flag_set_by_criterion_side_effect() {
    // The criterion raises the shared flag after a few evaluations; the
    // minimizer notices on the following iteration boundary.
    let brent = Brent::new(Tolerances::default());
    let flag = Arc::new(AtomicBool::new(false));
    let setter = Arc::clone(&flag);
    let mut evals = 0;
    let mut f = move |x: f64| {
        evals += 1;
        if evals == 4 {
            setter.store(true, Ordering::Relaxed);
        }
        x.cosh()
    };

    let mut poll = &*flag;
    let result = brent.minimize(&mut f, &mut poll, Bracket::new(-2.0, 0.5, 3.0), 0.5_f64.cosh());

    assert!(result.cancelled);
    assert_eq!(result.fn_evals, 4);
    assert!(result.fmin <= 0.5_f64.cosh());
    assert!(result.bracket.contains(result.xmin));
}

#[test]
fn test_random_unimodal_properties() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let m: f64 = rng.gen_range(-10.0..10.0);
        let scale: f64 = rng.gen_range(0.1..50.0);
        let offset: f64 = rng.gen_range(-5.0..5.0);
        let low = m - rng.gen_range(0.5..20.0);
        let high = m + rng.gen_range(0.5..20.0);
        // Closer to m than either end, so f(mid) is below both end values
        let reach = (m - low).min(high - m);
        let mid = m + rng.gen_range(-0.9..0.9) * reach;

        let mut f = move |x: f64| scale * ((x - m).cosh() - 1.0) + offset;
        let y = f(mid);

        let brent = Brent::new(Tolerances::default().with_max_iters(200));
        let result = brent.refine(&mut f, Bracket::new(low, mid, high), y);

        assert!(result.fmin <= y);
        assert!(result.bracket.low <= result.xmin);
        assert!(result.xmin <= result.bracket.high);
        assert!(!result.cancelled);
        assert!(result.converged(), "stopped with {}", result.termination);
        assert!(
            (result.xmin - m).abs() < 1e-3,
            "xmin = {}, expected {}",
            result.xmin,
            m
        );
    }
}

#[test]
fn test_bracket_then_refine() {
    // Negative log-likelihood of an exponential rate for a fixed sample mean
    let sample_mean = 0.8;
    let mut nll = |rate: f64| -rate.ln() + rate * sample_mean;

    let brent = Brent::new(Tolerances::default().with_x_tol(1e-9));
    let result = brent
        .minimize_from(&mut nll, &mut Never, 0.5, 0.6, &BracketOptions::default())
        .unwrap();

    assert!((result.xmin - 1.0 / sample_mean).abs() < 1e-4);
}

#[test]
fn test_boxed_criterion() {
    let mut criterion: Box<dyn Criterion> = Box::new(|x: f64| (x + 3.0).abs().powf(1.5));
    let brent = Brent::new(Tolerances::default());

    let found = Bracket::search(&mut *criterion, 0.0, 1.0, &BracketOptions::default()).unwrap();
    let result = brent.refine(&mut *criterion, found.bracket, found.f_mid);

    assert!((result.xmin + 3.0).abs() < 1e-3);
    assert!(result.fmin <= found.f_mid);
}
