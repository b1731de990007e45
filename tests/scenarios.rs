use u_consensus::consensus::{ConsensusRunner, EngineConfig, Method, SearchStrategy};
use u_consensus::distance::{rank_displacement, Metric};
use u_consensus::model::{ExpertJudgment, Item, RankCell};
use u_consensus::service::{
    respond, ConsensusRequest, ConsensusResponse, ConsensusService, ErrorKind, InMemoryCatalog,
    InMemoryJudgmentStore, ItemCatalog, JudgmentStore,
};
use u_consensus::settings::EngineSettings;
use u_consensus::Warning;

const A: i64 = 1;
const B: i64 = 2;
const C: i64 = 3;

fn abc() -> Vec<Item> {
    vec![Item::new(A, "A"), Item::new(B, "B"), Item::new(C, "C")]
}

fn two_experts() -> Vec<ExpertJudgment> {
    vec![
        ExpertJudgment::new(1, "first", vec![A, B, C]),
        ExpertJudgment::new(2, "second", vec![B, A, C]),
    ]
}

#[test]
fn test_two_experts_tie_under_kemeny() {
    let result =
        ConsensusRunner::run(&abc(), &two_experts(), "kemeny-snell", &EngineConfig::default()).unwrap();

    assert_eq!(result.winner(), vec![A, B, C]);
    assert_eq!(result.tie_count, 2);
    assert_eq!(result.total_distance, 2);
    let tied: Vec<Vec<i64>> = result.ties.iter().map(|t| t.ranking.clone()).collect();
    assert_eq!(tied, vec![vec![A, B, C], vec![B, A, C]]);
    // competence is measured against the winner ABC: distances 0 and 2
    let distances: Vec<u64> = result.competence.iter().map(|c| c.distance).collect();
    assert_eq!(distances, vec![0, 2]);
    assert!((result.competence[0].weight - 0.75).abs() < 1e-12);
    assert!((result.competence[1].weight - 0.25).abs() < 1e-12);
    assert_eq!(result.candidates_explored, 6);
    assert!(!result.limited);
    assert!(!result.partial);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_exclusion_shrinks_universe() {
    let mut judgments = two_experts();
    judgments.push(ExpertJudgment::new(3, "third", vec![B, A]).with_excluded(C));

    let result = ConsensusRunner::run(&abc(), &judgments, "kemeny-snell", &EngineConfig::default()).unwrap();

    assert_eq!(result.valid_items, vec![A, B]);
    assert_eq!(result.total_candidates, 2);
    assert_eq!(result.candidates_explored, 2);
    assert!(result.winner().iter().all(|id| *id != C));
    // B ahead of A in two of three restricted orders
    assert_eq!(result.winner(), vec![B, A]);
    assert_eq!(result.tie_count, 1);
}

#[test]
fn test_cook_distance_of_reversal() {
    assert_eq!(rank_displacement(&[A, B, C], &[C, B, A], &[A, B, C]), 4);
    assert_eq!(Metric::RankDisplacement.distance(&[A, B, C], &[C, B, A], &[A, B, C]), 4);
}

#[test]
fn test_all_methods_agree_on_unanimous_panel() {
    let judgments = vec![
        ExpertJudgment::new(1, "x", vec![C, A, B]),
        ExpertJudgment::new(2, "y", vec![C, A, B]),
        ExpertJudgment::new(3, "z", vec![C, A, B]),
    ];
    for method in Method::ALL {
        let result = ConsensusRunner::run(&abc(), &judgments, method.name(), &EngineConfig::default()).unwrap();
        assert_eq!(result.winner(), vec![C, A, B], "{method}");
        assert_eq!(result.total_distance, 0);
        assert_eq!(result.tie_count, 1);
        let expected = 1.0 / 3.0;
        assert!(result.competence.iter().all(|c| (c.weight - expected).abs() < 1e-12));
    }
}

#[test]
fn test_minimax_prefers_compromise() {
    // Sum favors the majority order; max favors a ranking between the camps.
    let items: Vec<Item> = (1..=4).map(|i| Item::new(i, format!("item {i}"))).collect();
    let judgments = vec![
        ExpertJudgment::new(1, "a", vec![1, 2, 3, 4]),
        ExpertJudgment::new(2, "b", vec![1, 2, 3, 4]),
        ExpertJudgment::new(3, "c", vec![4, 3, 2, 1]),
    ];
    let config = EngineConfig::default();
    let sum = ConsensusRunner::run(&items, &judgments, "kemeny-snell", &config).unwrap();
    let max = ConsensusRunner::run(&items, &judgments, "minimax", &config).unwrap();

    assert_eq!(sum.winner(), vec![1, 2, 3, 4]);
    assert!(max.max_distance < sum.max_distance);
    assert!(max.total_distance >= sum.total_distance);
}

#[test]
fn test_unknown_method_reports_fallback() {
    let result = ConsensusRunner::run(&abc(), &two_experts(), "borda", &EngineConfig::default()).unwrap();
    assert_eq!(result.method_used, Some(Method::KemenySnell));
    assert_eq!(
        result.warnings,
        vec![Warning::UnknownMethod {
            requested: "borda".into(),
            fallback: "kemeny-snell".into(),
        }]
    );
}

#[test]
fn test_request_json_round_trip() {
    let request: ConsensusRequest = serde_json::from_str(
        r#"{
            "items": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}, {"id": 3, "title": "C"}],
            "judgments": [
                {"expertId": 1, "expertName": "first", "order": [1, 2, 3], "excluded": []},
                {"expertId": 2, "expertName": "second", "order": [2, 1, 3], "excluded": []},
                {"expertId": 3, "expertName": "third", "order": [2, 1], "excluded": [3]}
            ],
            "method": "kemeny-snell"
        }"#,
    )
    .unwrap();

    let response = respond(&request, &EngineConfig::default(), None);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["methodUsed"], "kemeny-snell");
    assert_eq!(json["metricUsed"], "pairwise-preference");
    assert_eq!(json["validItems"], serde_json::json!([1, 2]));
    assert_eq!(json["ranking"][0]["itemId"], 2);
    assert_eq!(json["ranking"][0]["title"], "B");

    let back: ConsensusResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}

#[test]
fn test_failure_kinds() {
    let config = EngineConfig::default();
    let no_experts = ConsensusRequest {
        items: abc(),
        judgments: vec![],
        method: "minimax".into(),
    };
    assert_eq!(
        respond(&no_experts, &config, None).into_result().unwrap_err().error_kind,
        ErrorKind::NoExperts
    );

    let all_excluded = ConsensusRequest {
        items: abc(),
        judgments: vec![ExpertJudgment::new(1, "x", vec![])
            .with_excluded(A)
            .with_excluded(B)
            .with_excluded(C)],
        method: "minimax".into(),
    };
    assert_eq!(
        respond(&all_excluded, &config, None).into_result().unwrap_err().error_kind,
        ErrorKind::NoValidItems
    );
}

#[test]
fn test_large_universe_is_flagged_limited() {
    let items: Vec<Item> = (1..=8).map(|i| Item::new(i, format!("item {i}"))).collect();
    let judgments = vec![
        ExpertJudgment::new(1, "a", (1..=8).collect()),
        ExpertJudgment::new(2, "b", (1..=8).rev().collect()),
    ];
    let result = ConsensusRunner::run(&items, &judgments, "cook-seiford", &EngineConfig::default()).unwrap();
    assert_eq!(result.total_candidates, 40_320);
    assert_eq!(result.candidates_explored, 40_320);
    assert!(result.limited);
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::SearchLimited { .. })));
}

#[test]
fn test_annealing_is_reproducible() {
    let items: Vec<Item> = (1..=10).map(|i| Item::new(i, format!("item {i}"))).collect();
    let judgments = vec![
        ExpertJudgment::new(1, "a", vec![3, 1, 2, 5, 4, 7, 6, 9, 8, 10]),
        ExpertJudgment::new(2, "b", vec![1, 3, 2, 4, 5, 6, 8, 7, 10, 9]),
        ExpertJudgment::new(3, "c", vec![2, 1, 3, 5, 4, 6, 7, 9, 10, 8]),
    ];
    let config = EngineConfig::default().with_strategy(SearchStrategy::Annealing);
    let first = ConsensusRunner::run(&items, &judgments, "kemeny-snell", &config).unwrap();
    let second = ConsensusRunner::run(&items, &judgments, "kemeny-snell", &config).unwrap();

    assert_eq!(first.winner(), second.winner());
    assert_eq!(first.total_distance, second.total_distance);
    assert_eq!(first.strategy_used, SearchStrategy::Annealing);
    assert!(first.limited);
}

#[test]
fn test_settings_feed_the_engine() {
    let settings = EngineSettings::from_toml_str("hard_cap = 24\nsoft_cap = 24\nparallel = false").unwrap();
    let config = settings.to_config().unwrap();
    let items: Vec<Item> = (1..=5).map(|i| Item::new(i, "")).collect();
    let judgments = vec![ExpertJudgment::new(1, "a", (1..=5).collect())];

    let result = ConsensusRunner::run(&items, &judgments, "cook-seiford", &config).unwrap();
    assert_eq!(result.candidates_explored, 24);
    assert!(result.limited);
}

#[test]
fn test_service_end_to_end() {
    let service = ConsensusService::new(
        InMemoryCatalog::new(),
        InMemoryJudgmentStore::new(),
        EngineConfig::default(),
    );
    let a = service.catalog().create_item("A");
    let b = service.catalog().create_item("B");
    let c = service.catalog().create_item("C");

    let first = service.judgments().register_expert("first");
    let second = service.judgments().register_expert("second");
    service.judgments().save_judgment(ExpertJudgment::new(
        first.expert_id,
        "first",
        vec![c.id, a.id, b.id],
    ));
    service.judgments().save_judgment(
        ExpertJudgment::new(second.expert_id, "second", vec![a.id, b.id]).with_excluded(c.id),
    );

    let matrix = service.matrix();
    assert_eq!(matrix.rows[2].cells, vec![RankCell::Ranked(1), RankCell::Excluded]);
    assert_eq!(service.conflicts().len(), 1);

    let result = service.compute("cook-seiford").into_result().unwrap();
    assert_eq!(result.winner(), vec![a.id, b.id]);
    assert_eq!(result.total_distance, 0);
}
