//! Consensus run orchestration.
//!
//! [`ConsensusRunner`] drives one invocation end to end:
//! validity filter → candidate search → winner → competence → result.

use super::competence;
use super::config::{EngineConfig, SearchStrategy};
use super::method::{Method, Objective};
use super::result::{ConsensusResult, RankedItem, TieRow};
use super::selector::{search_exhaustive, Scorer, SelectionOutcome};
use super::stop::{StopReason, StopSignal};
use crate::anneal::AnnealRunner;
use crate::enumeration::CandidateSpace;
use crate::error::{ConsensusError, Warning};
use crate::model::{ExpertJudgment, Item, ItemId, ValidItemSet};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes consensus searches.
///
/// Stateless: every call takes a full snapshot of items and judgments.
///
/// # Usage
///
/// ```
/// use u_consensus::consensus::{ConsensusRunner, EngineConfig};
/// use u_consensus::model::{ExpertJudgment, Item};
///
/// let items = vec![Item::new(1, "A"), Item::new(2, "B"), Item::new(3, "C")];
/// let judgments = vec![
///     ExpertJudgment::new(1, "first", vec![1, 2, 3]),
///     ExpertJudgment::new(2, "second", vec![2, 1, 3]),
/// ];
/// let result = ConsensusRunner::run(&items, &judgments, "kemeny-snell", &EngineConfig::default()).unwrap();
/// assert_eq!(result.winner(), vec![1, 2, 3]);
/// assert_eq!(result.tie_count, 2);
/// ```
pub struct ConsensusRunner;

impl ConsensusRunner {
    /// Runs the named method.
    ///
    /// Unknown names fall back to `kemeny-snell` with a warning, or fail
    /// with [`ConsensusError::UnknownMethod`] when `strict_method` is set.
    pub fn run(
        items: &[Item],
        judgments: &[ExpertJudgment],
        method: &str,
        config: &EngineConfig,
    ) -> Result<ConsensusResult, ConsensusError> {
        Self::run_with_cancel(items, judgments, method, config, None)
    }

    /// Runs the named method with an optional cancellation token.
    ///
    /// If the flag becomes `true`, workers stop at their next check point
    /// and the best ranking found so far is returned, flagged `partial`.
    pub fn run_with_cancel(
        items: &[Item],
        judgments: &[ExpertJudgment],
        method: &str,
        config: &EngineConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ConsensusResult, ConsensusError> {
        let (resolved, warning) = if config.strict_method {
            (method.parse::<Method>()?, None)
        } else {
            Method::resolve(method)
        };
        if let Some(ref w) = warning {
            warn!("{w}");
        }

        let mut result = execute(items, judgments, resolved.objective(), config, cancel)?;
        result.method_used = Some(resolved);
        result.requested_method = Some(method.to_string());
        if let Some(w) = warning {
            result.warnings.insert(0, w);
        }
        Ok(result)
    }

    /// Runs an explicit (metric, criterion) objective instead of a preset.
    pub fn run_objective(
        items: &[Item],
        judgments: &[ExpertJudgment],
        objective: Objective,
        config: &EngineConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ConsensusResult, ConsensusError> {
        execute(items, judgments, objective, config, cancel)
    }
}

fn execute(
    items: &[Item],
    judgments: &[ExpertJudgment],
    objective: Objective,
    config: &EngineConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<ConsensusResult, ConsensusError> {
    config.validate().map_err(ConsensusError::InvalidConfig)?;
    if judgments.is_empty() {
        return Err(ConsensusError::NoExperts);
    }

    let valid = ValidItemSet::from_items(items, judgments)?;
    let restricted: Vec<Vec<usize>> = judgments.iter().map(|j| valid.restrict(&j.order)).collect();
    let scorer = Scorer::new(objective, &restricted, valid.len());
    let space = CandidateSpace::new(valid.len(), config.hard_cap, config.soft_cap);

    let strategy = match config.strategy {
        SearchStrategy::Auto if space.total() <= config.hard_cap => SearchStrategy::Exhaustive,
        SearchStrategy::Auto => SearchStrategy::Annealing,
        s => s,
    };
    debug!(
        items = valid.len(),
        experts = judgments.len(),
        metric = %objective.metric,
        criterion = %objective.criterion,
        ?strategy,
        "Starting consensus search"
    );

    let stop = StopSignal::new(config.timeout, cancel);
    let outcome = match strategy {
        SearchStrategy::Annealing => {
            let (outcome, stats) =
                AnnealRunner::run(&scorer, &config.anneal, config.max_retained_ties, &stop);
            debug!(
                iterations = stats.iterations,
                accepted = stats.accepted_moves,
                improving = stats.improving_moves,
                final_temperature = stats.final_temperature,
                "Annealing search finished"
            );
            outcome
        }
        _ => search_exhaustive(
            &scorer,
            &space,
            config.parallel,
            config.slice_size,
            config.max_retained_ties,
            &stop,
        ),
    };
    let elapsed = stop.elapsed();

    let SelectionOutcome {
        ties,
        tie_count,
        explored,
        interrupted,
        ..
    } = outcome;
    let Some(winner) = ties.first() else {
        return Err(ConsensusError::SearchExhausted);
    };

    let mut warnings = Vec::new();
    let limited = match strategy {
        SearchStrategy::Annealing => true,
        _ => space.limited() || explored < space.total(),
    };
    if limited {
        let w = Warning::SearchLimited {
            explored,
            total: space.total(),
        };
        warn!("{w}");
        warnings.push(w);
    }
    if interrupted {
        let w = match stop.reason() {
            StopReason::Timeout => Warning::TimeoutPartial {
                explored,
                elapsed_ms: elapsed.unwrap_or_default().as_millis() as u64,
            },
            StopReason::Cancelled => Warning::Cancelled { explored },
        };
        warn!("{w}");
        warnings.push(w);
    }

    let titles: HashMap<ItemId, &str> = items.iter().rev().map(|i| (i.id, i.title.as_str())).collect();
    let ranking = winner
        .candidate
        .iter()
        .enumerate()
        .map(|(pos, &idx)| {
            let id = valid.id_at(idx);
            RankedItem {
                item_id: id,
                title: titles.get(&id).copied().unwrap_or_default().to_string(),
                rank: pos + 1,
            }
        })
        .collect();

    let competence = competence::from_distances(judgments, &winner.distances);
    let total_distance = winner.sum;
    let max_distance = winner.max;
    let avg_distance = total_distance as f64 / judgments.len() as f64;

    let tie_rows: Vec<TieRow> = ties
        .iter()
        .map(|t| TieRow {
            index: t.index,
            ranking: valid.to_ids(&t.candidate),
            distances: t.distances.clone(),
            sum: t.sum,
            max: t.max,
        })
        .collect();

    info!(
        total_distance,
        max_distance,
        tie_count,
        explored,
        limited,
        partial = interrupted,
        ?elapsed,
        "Consensus ranking selected"
    );

    Ok(ConsensusResult {
        ranking,
        total_distance,
        max_distance,
        avg_distance,
        competence,
        tie_count,
        ties_truncated: (tie_rows.len() as u64) < tie_count,
        ties: tie_rows,
        method_used: None,
        requested_method: None,
        metric_used: objective.metric,
        criterion_used: objective.criterion,
        strategy_used: strategy,
        limited,
        partial: interrupted,
        candidates_explored: explored,
        total_candidates: space.total(),
        valid_items: valid.ids().to_vec(),
        warnings,
    })
}
