//! Annealing loop over candidate rankings.

use super::config::{AnnealConfig, CoolingSchedule};
use crate::consensus::selector::{Evaluation, Scorer, SelectionOutcome, STOP_CHECK_INTERVAL};
use crate::consensus::stop::StopSignal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Move statistics of an annealing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AnnealStats {
    pub iterations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    pub final_temperature: f64,
}

/// Runs simulated annealing from the catalog order.
///
/// The tie set collects the distinct candidates seen at the best score;
/// `index` of a tie is the move number at which it was first scored
/// (0 = starting ranking).
pub(crate) struct AnnealRunner;

impl AnnealRunner {
    pub fn run(
        scorer: &Scorer,
        config: &AnnealConfig,
        retain: usize,
        stop: &StopSignal,
    ) -> (SelectionOutcome, AnnealStats) {
        let n = scorer.n();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut positions = vec![0usize; n];
        let mut dists = Vec::with_capacity(scorer.experts());

        let mut current: Vec<usize> = (0..n).collect();
        let eval = scorer.evaluate(&current, &mut positions, &mut dists);
        let mut current_score = scorer.score(eval);

        let mut out = SelectionOutcome::empty();
        let mut seen_best: HashSet<Vec<usize>> = HashSet::new();
        record(&mut out, &mut seen_best, 0, &current, &dists, eval, current_score, retain);
        out.explored = 1;

        let mut stats = AnnealStats {
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            final_temperature: config.initial_temperature,
        };
        if n < 2 {
            return (out, stats);
        }

        let mut temperature = config.initial_temperature;
        let linear_steps = linear_steps(config);
        let mut step = 0usize;
        let mut candidate = current.clone();

        'outer: while temperature > config.min_temperature {
            let inner = match config.cooling {
                CoolingSchedule::LundyMees { .. } => 1,
                _ => config.iterations_per_temperature,
            };

            for _ in 0..inner {
                if config.max_iterations > 0 && stats.iterations >= config.max_iterations {
                    break 'outer;
                }
                if (stats.iterations as u64 + 1) % STOP_CHECK_INTERVAL == 0 && stop.should_stop() {
                    out.interrupted = true;
                    break 'outer;
                }

                candidate.clone_from(&current);
                neighbor(&mut candidate, &mut rng);
                let eval = scorer.evaluate(&candidate, &mut positions, &mut dists);
                let score = scorer.score(eval);
                stats.iterations += 1;
                out.explored += 1;

                let delta = score as f64 - current_score as f64;
                let accept = if delta < 0.0 {
                    stats.improving_moves += 1;
                    true
                } else {
                    rng.random_range(0.0..1.0) < (-delta / temperature).exp()
                };

                if score <= out.best_score {
                    record(
                        &mut out,
                        &mut seen_best,
                        stats.iterations as u64,
                        &candidate,
                        &dists,
                        eval,
                        score,
                        retain,
                    );
                }

                if accept {
                    std::mem::swap(&mut current, &mut candidate);
                    current_score = score;
                    stats.accepted_moves += 1;
                }
            }

            temperature = cool(temperature, config, step, linear_steps);
            step += 1;
        }

        stats.final_temperature = temperature;
        (out, stats)
    }
}

/// Records a best-or-equal candidate, counting each distinct ranking once.
#[allow(clippy::too_many_arguments)]
fn record(
    out: &mut SelectionOutcome,
    seen_best: &mut HashSet<Vec<usize>>,
    index: u64,
    candidate: &[usize],
    dists: &[u64],
    eval: Evaluation,
    score: u64,
    retain: usize,
) {
    if score < out.best_score {
        seen_best.clear();
    } else if seen_best.contains(candidate) {
        return;
    }
    seen_best.insert(candidate.to_vec());
    out.record(index, candidate, dists, eval, score, retain);
}

/// Random swap or insertion move.
fn neighbor<R: Rng>(perm: &mut Vec<usize>, rng: &mut R) {
    let n = perm.len();
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    if rng.random_bool(0.5) {
        perm.swap(i, j);
    } else {
        let item = perm.remove(i);
        perm.insert(j, item);
    }
}

fn cool(temperature: f64, config: &AnnealConfig, step: usize, linear_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,
        CoolingSchedule::Linear => {
            let t = config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / linear_steps as f64;
            t.max(config.min_temperature)
        }
        CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
    }
}

/// Number of temperature steps for linear cooling.
fn linear_steps(config: &AnnealConfig) -> usize {
    if config.max_iterations > 0 {
        (config.max_iterations / config.iterations_per_temperature).max(1)
    } else {
        1000
    }
}
