//! Monte-Carlo check of Parzen bandwidth tuning.
//!
//! Each try draws a normal sample, tunes the Parzen window width by
//! minimizing the leave-one-out negative log-likelihood over log(width), and
//! compares the tuned width against the normal-reference rule.
//!
//! ```text
//! cargo run --example bandwidth -- nsamples ntries [seed]
//! ```
//!
//! Type `q` and Enter to stop early. Set `RUST_LOG=debug` to watch each
//! minimization.

use brentmin::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use simple_error::{bail, SimpleError};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::{env, io, process, thread};

#[derive(Debug, Clone, Copy)]
struct Args {
    nsamps: usize,
    ntries: usize,
    seed: u64,
}

fn parse_args(args: &[String]) -> Result<Args, SimpleError> {
    if args.len() != 3 && args.len() != 4 {
        bail!("expected 2 or 3 arguments");
    }
    let nsamps: usize = args[1]
        .parse()
        .map_err(|e| SimpleError::with("invalid nsamples", e))?;
    let ntries: usize = args[2]
        .parse()
        .map_err(|e| SimpleError::with("invalid ntries", e))?;
    let seed: u64 = match args.get(3) {
        Some(s) => s.parse().map_err(|e| SimpleError::with("invalid seed", e))?,
        None => 0,
    };
    if nsamps < 3 {
        bail!("nsamples must be at least 3");
    }
    if ntries == 0 {
        bail!("ntries must be positive");
    }
    Ok(Args {
        nsamps,
        ntries,
        seed,
    })
}

/// Leave-one-out negative log-likelihood of a Gaussian Parzen density,
/// as a function of log(width)
struct ParzenLoo<'a> {
    data: &'a [f64],
}

impl ParzenLoo<'_> {
    const TINY_DENSITY: f64 = 1e-300;

    fn nll(&self, log_width: f64) -> f64 {
        let width = log_width.exp();
        let n = self.data.len();
        let norm = 1.0 / ((n - 1) as f64 * width * (2.0 * std::f64::consts::PI).sqrt());
        let mut total = 0.0;
        for (i, &xi) in self.data.iter().enumerate() {
            let density: f64 = self
                .data
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &xj)| {
                    let z = (xi - xj) / width;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            total -= density.max(Self::TINY_DENSITY).ln();
        }
        total / n as f64
    }
}

impl Criterion for ParzenLoo<'_> {
    fn evaluate(&mut self, x: f64) -> Evaluation {
        Evaluation::Value(self.nll(x))
    }
}

fn std_dev(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

/// Stop flag raised when the user types `q`
fn spawn_quit_listener() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let setter = Arc::clone(&flag);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().eq_ignore_ascii_case("q") => {
                    setter.store(true, Ordering::Relaxed);
                    break;
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
    flag
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: bandwidth nsamples ntries [seed]");
            process::exit(1);
        }
    };

    let mut quit = spawn_quit_listener();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let brent = Brent::new(Tolerances::default().with_x_tol(1e-6));
    let options = BracketOptions::default();

    let divisor = (args.ntries / 100).max(1);
    let mut data = vec![0.0; args.nsamps];
    let (mut total, mut bias, mut sq_err) = (0.0, 0.0, 0.0);
    let mut failures = 0;
    let mut done = 0;

    for itry in 1..=args.ntries {
        if (itry - 1) % divisor == 0 {
            println!("\nTry {} of {}", itry, args.ntries);
        }

        for x in data.iter_mut() {
            *x = StandardNormal.sample(&mut rng);
        }

        // Normal-reference rule gives the starting point and the yardstick
        let reference = 1.06 * std_dev(&data) * (args.nsamps as f64).powf(-0.2);
        let start = reference.ln();

        let mut criterion = ParzenLoo { data: &data };
        let result = match brent.minimize_from(&mut criterion, &mut quit, start, start - 0.1, &options)
        {
            Ok(result) => result,
            Err(e) => {
                log::warn!("try {}: {}", itry, e);
                failures += 1;
                continue;
            }
        };
        if result.cancelled {
            break;
        }

        let ratio = (result.xmin.exp() / reference).ln();
        done += 1;
        total += result.xmin.exp();
        bias += ratio;
        sq_err += ratio * ratio;

        if (itry - 1) % divisor == 0 || itry == args.ntries {
            let n = done as f64;
            println!(
                "Width mean = {:.5}   log-ratio bias = {:.5}   StdErr = {:.5}   ({})",
                total / n,
                bias / n,
                (sq_err / n).sqrt(),
                result.termination
            );
        }

        if quit.load(Ordering::Relaxed) {
            break;
        }
    }

    println!(
        "\nFinal... n={}  tries={}  completed={}  failed={}",
        args.nsamps, args.ntries, done, failures
    );
}
