//! End-to-end balancing scenarios.

mod common;

use common::{init_tracing, step};
use std::time::Duration;

use u_line_balance::balancer::{SearchMode, TruncationReason};
use u_line_balance::models::{LineBalance, ProcessStep};
use u_line_balance::validation::{is_level_ordered, verify_balance};
use u_line_balance::{BalanceError, BalancerConfig, LineBalancer};

fn station_ids(balance: &LineBalance) -> Vec<Vec<String>> {
    balance
        .stations
        .iter()
        .map(|s| s.steps.iter().map(|p| p.id.clone()).collect())
        .collect()
}

#[test]
fn test_single_step_line() {
    init_tracing();
    let steps = vec![step("S1", 1, 30.0)];
    let balance = LineBalancer::new().balance(&steps).unwrap();

    assert_eq!(balance.station_count(), 1);
    assert!((balance.balance_rate - 100.0).abs() < 1e-10);
    assert!((balance.cycle_time_secs - 30.0).abs() < 1e-10);
    assert!((balance.variance - 0.0).abs() < 1e-10);
}

#[test]
fn test_two_steps_same_tier() {
    init_tracing();
    let steps = vec![step("S1", 1, 40.0), step("S2", 1, 10.0)];
    let balance = LineBalancer::new().balance(&steps).unwrap();

    assert_eq!(balance.station_count(), 2);
    assert_eq!(balance.bottleneck_id, "S1");
    let bottleneck_station = balance.station_of("S1").unwrap();
    assert_eq!(bottleneck_station.step_count(), 1);
    assert!((balance.balance_rate - 62.5).abs() < 1e-10);
    assert!((balance.cycle_time_secs - 40.0).abs() < 1e-10);
}

#[test]
fn test_light_tier_merges_before_bottleneck() {
    init_tracing();
    let steps = vec![step("S1", 1, 20.0), step("S2", 1, 20.0), step("S3", 2, 50.0)];
    let balance = LineBalancer::new().balance(&steps).unwrap();

    assert_eq!(balance.station_count(), 2);
    assert_eq!(
        station_ids(&balance),
        vec![vec!["S1".to_string(), "S2".to_string()], vec!["S3".to_string()]]
    );
    // 90s of work over 2 stations at a 50s cycle
    assert!((balance.balance_rate - 90.0).abs() < 1e-10);
    assert!(verify_balance(&steps, &balance).is_ok());
}

#[test]
fn test_thirteen_steps_use_greedy() {
    init_tracing();
    let steps: Vec<ProcessStep> = (0..13)
        .map(|i| step(&format!("S{i:02}"), 1 + i / 3, 5.0 + ((i * 7) % 11) as f64))
        .collect();
    let balance = LineBalancer::new().balance(&steps).unwrap();

    assert_eq!(balance.mode, SearchMode::Greedy);
    assert_eq!(balance.statistics.orderings_explored, 0);
    assert!(is_level_ordered(&balance.stations));
    assert!(verify_balance(&steps, &balance).is_ok());
}

#[test]
fn test_tied_bottleneck_is_deterministic() {
    init_tracing();
    let steps = vec![
        step("A", 1, 30.0),
        step("B", 1, 50.0),
        step("C", 1, 50.0),
        step("D", 1, 10.0),
    ];
    let balancer = LineBalancer::new();
    let first = balancer.balance(&steps).unwrap();

    assert_eq!(first.bottleneck_id, "B");
    assert_eq!(first.station_of("B").unwrap().step_count(), 1);
    for _ in 0..5 {
        let again = balancer.balance(&steps).unwrap();
        assert_eq!(again.bottleneck_id, first.bottleneck_id);
        assert_eq!(station_ids(&again), station_ids(&first));
        assert_eq!(again.to_report(), first.to_report());
    }
}

#[test]
fn test_bottleneck_in_middle_tier() {
    init_tracing();
    let steps = vec![
        step("A", 1, 10.0),
        step("B", 1, 15.0),
        step("C", 2, 40.0),
        step("D", 2, 20.0),
        step("E", 3, 25.0),
        step("F", 3, 10.0),
    ];
    let balance = LineBalancer::new().balance(&steps).unwrap();

    assert_eq!(balance.mode, SearchMode::Exact);
    assert_eq!(balance.bottleneck_id, "C");
    assert!(verify_balance(&steps, &balance).is_ok());
    // Loads 25, 40, 30, 25: three stations can't hold 120s under the 40s
    // ceiling, and among the four-station layouts this one has the lowest variance.
    assert_eq!(
        station_ids(&balance),
        vec![vec!["A", "B"], vec!["C"], vec!["D", "F"], vec!["E"]]
    );
    assert!((balance.balance_rate - 75.0).abs() < 1e-10);
    assert!((balance.variance - 37.5).abs() < 1e-10);
}

#[test]
fn test_exact_beats_greedy_on_same_tier() {
    // Natural order packs {6} {5,5} {4}; exact finds {6,4} {5,5}.
    let steps = vec![
        step("big", 1, 10.0),
        step("a", 1, 6.0),
        step("b", 1, 5.0),
        step("c", 1, 5.0),
        step("d", 1, 4.0),
    ];
    let exact = LineBalancer::new().balance(&steps).unwrap();
    let greedy = LineBalancer::with_config(
        BalancerConfig::default().with_exact_search_threshold(1),
    )
    .balance(&steps)
    .unwrap();

    assert_eq!(exact.station_count(), 3);
    assert!((exact.balance_rate - 100.0).abs() < 1e-10);
    assert_eq!(greedy.mode, SearchMode::Greedy);
    assert!(greedy.balance_rate < exact.balance_rate);
}

#[test]
fn test_empty_input_error() {
    assert_eq!(
        LineBalancer::new().balance(&[]).unwrap_err(),
        BalanceError::EmptyInput
    );
}

#[test]
fn test_parallel_calls_are_independent() {
    let balancer = &LineBalancer::new();
    let lines: Vec<Vec<ProcessStep>> = (1..=4)
        .map(|n| {
            (0..n + 2)
                .map(|i| step(&format!("L{n}S{i}"), 1 + i as u32 / 2, (i * n + 3) as f64))
                .collect()
        })
        .collect();

    let sequential: Vec<_> = lines
        .iter()
        .map(|steps| balancer.balance(steps).unwrap().to_report())
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = lines
            .iter()
            .map(|steps| scope.spawn(move || balancer.balance(steps).unwrap().to_report()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_report_round_trips_through_json() {
    let steps = vec![step("S1", 1, 20.0), step("S2", 1, 20.0), step("S3", 2, 50.0)];
    let report = LineBalancer::new().balance(&steps).unwrap().to_report();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"balanceRatePercent\":90.0"));
    assert!(json.contains("\"stationNumber\":1"));
}

#[test]
fn test_input_from_json() {
    let json = r#"[
        {"id": "p1", "name": "Cut", "level": 1, "durationSeconds": 12, "sequenceIndex": 0},
        {"id": "p2", "name": "Drill", "level": 1, "durationSeconds": 8, "sequenceIndex": 1},
        {"id": "p3", "name": "Weld", "level": 2, "durationSeconds": 25, "sequenceIndex": 0}
    ]"#;
    let steps: Vec<ProcessStep> = serde_json::from_str(json).unwrap();
    let balance = LineBalancer::new().balance(&steps).unwrap();

    assert_eq!(balance.bottleneck_id, "p3");
    assert_eq!(balance.station_count(), 2);
    assert!((balance.total_work_secs - 45.0).abs() < 1e-10);
}

#[test]
fn test_time_limit_keeps_partial_exact_result() {
    init_tracing();
    let mut steps: Vec<ProcessStep> = (0..9)
        .map(|i| step(&format!("S{i}"), 1 + i / 5, 2.0 + (i % 3) as f64))
        .collect();
    steps.push(step("press", 1, 12.0));
    let balancer =
        LineBalancer::with_config(BalancerConfig::default().with_time_limit(Duration::ZERO));
    let balance = balancer.balance(&steps).unwrap();

    assert_eq!(balance.mode, SearchMode::Exact);
    assert_eq!(
        balance.statistics.truncation,
        Some(TruncationReason::TimeLimit)
    );
    assert!(!balance.statistics.fell_back);
    assert_eq!(balance.bottleneck_id, "press");
    assert!(verify_balance(&steps, &balance).is_ok());
}

#[test]
fn test_expired_time_limit_falls_back_to_greedy() {
    init_tracing();
    let steps = vec![step("A", 1, 10.0), step("B", 1, 5.0), step("C", 2, 20.0)];
    let balancer = LineBalancer::with_config(
        BalancerConfig::default()
            .with_time_limit(Duration::ZERO)
            .with_time_check_interval(1),
    );
    let balance = balancer.balance(&steps).unwrap();

    assert_eq!(balance.mode, SearchMode::Greedy);
    assert!(balance.statistics.fell_back);
    assert_eq!(
        balance.statistics.truncation,
        Some(TruncationReason::TimeLimit)
    );
    assert_eq!(station_ids(&balance), vec![vec!["A", "B"], vec!["C"]]);
    assert!(verify_balance(&steps, &balance).is_ok());
}
