use brentmin::minimize::{Bracket, BracketOptions, Brent, Never, Tolerances};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

#[derive(Clone)]
struct TestProblem {
    name: &'static str,
    function: fn(f64) -> f64,
    bracket: Bracket,
    expected_xmin: f64,
}

// Test Functions
fn quadratic(x: f64) -> f64 {
    (x - 2.0) * (x - 2.0)
}

fn cosh_shifted(x: f64) -> f64 {
    (x + 1.5).cosh()
}

fn quartic(x: f64) -> f64 {
    (x - 0.3).powi(4) + 0.01 * (x - 0.3).powi(2)
}

fn abs_power(x: f64) -> f64 {
    (x - 1.0).abs().powf(1.5)
}

fn test_problems() -> Vec<TestProblem> {
    vec![
        TestProblem {
            name: "quadratic",
            function: quadratic,
            bracket: Bracket::new(-5.0, 0.0, 5.0),
            expected_xmin: 2.0,
        },
        TestProblem {
            name: "cosh",
            function: cosh_shifted,
            bracket: Bracket::new(-4.0, -1.0, 3.0),
            expected_xmin: -1.5,
        },
        TestProblem {
            name: "quartic",
            function: quartic,
            bracket: Bracket::new(-2.0, 0.0, 2.0),
            expected_xmin: 0.3,
        },
        TestProblem {
            name: "abs_power",
            function: abs_power,
            bracket: Bracket::new(-3.0, 0.5, 4.0),
            expected_xmin: 1.0,
        },
    ]
}

// `RUST_LOG=debug cargo bench` shows the minimizer's own logging
fn init_logging() {
    let _ = env_logger::try_init();
}

fn run_problem(problem: &TestProblem, tolerances: Tolerances) -> (f64, f64, usize) {
    let brent = Brent::new(tolerances);
    let mut f = problem.function;
    let y = f(problem.bracket.mid);
    let result = brent.minimize(&mut f, &mut Never, problem.bracket, y);
    (
        result.xmin,
        (result.xmin - problem.expected_xmin).abs(),
        result.fn_evals,
    )
}

fn bench_refine(c: &mut Criterion) {
    init_logging();
    let mut group = c.benchmark_group("brent_refine");
    group.measurement_time(Duration::from_secs(5));

    for problem in test_problems() {
        group.bench_with_input(
            BenchmarkId::new("refine", problem.name),
            &problem,
            |b, prob| {
                b.iter(|| black_box(run_problem(black_box(prob), Tolerances::default())));
            },
        );
    }
    group.finish();
}

fn bench_x_tolerance(c: &mut Criterion) {
    init_logging();
    let mut group = c.benchmark_group("brent_x_tolerance");
    let problem = &test_problems()[1];

    for exponent in [3, 6, 9, 12] {
        let tolerances = Tolerances::default()
            .with_x_tol(10_f64.powi(-exponent))
            .with_value_tol(0.0);
        group.bench_with_input(
            BenchmarkId::new("cosh", format!("1e-{}", exponent)),
            &tolerances,
            |b, tol| {
                b.iter(|| black_box(run_problem(black_box(problem), *tol)));
            },
        );
    }
    group.finish();
}

fn bench_search_and_refine(c: &mut Criterion) {
    init_logging();
    let mut group = c.benchmark_group("brent_search_and_refine");
    let brent = Brent::new(Tolerances::default());
    let options = BracketOptions::default();

    for problem in test_problems() {
        group.bench_with_input(
            BenchmarkId::new("minimize_from", problem.name),
            &problem,
            |b, prob| {
                b.iter(|| {
                    let mut f = prob.function;
                    let result = brent.minimize_from(
                        &mut f,
                        &mut Never,
                        black_box(prob.bracket.low),
                        black_box(prob.bracket.mid),
                        &options,
                    );
                    black_box(result.map(|r| r.xmin))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    brent_benches,
    bench_refine,
    bench_x_tolerance,
    bench_search_and_refine,
);
criterion_main!(brent_benches);
