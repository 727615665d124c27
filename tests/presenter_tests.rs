mod common;

use common::route;
use metro_map::route::{
    InvalidRoute, ReportedTransfer, Route, RouteQuery, StepKind, estimate_duration, present,
};

#[test]
fn duration_test() {
    assert_eq!(estimate_duration(5, 1), 11);
    assert_eq!(estimate_duration(3, 1), 7);
    assert_eq!(estimate_duration(1, 0), 0);
    assert_eq!(estimate_duration(0, 0), 0);
}

#[test]
fn instructions_test() {
    let presentation = present(&route(&["A", "B", "C", "D"], &["1", "1", "2"]));
    let kinds: Vec<StepKind> = presentation
        .instructions
        .iter()
        .map(|instruction| instruction.kind.clone())
        .collect();
    assert_eq!(
        kinds,
        vec![
            StepKind::Origin {
                line: Some("L1".into())
            },
            StepKind::PassThrough,
            StepKind::Transfer {
                from: "L1".into(),
                to: "L2".into()
            },
            StepKind::Destination,
        ]
    );
    let text: Vec<String> = presentation
        .instructions
        .iter()
        .map(|instruction| instruction.to_string())
        .collect();
    assert_eq!(
        text,
        vec![
            "Start at A, take line L1",
            "Pass through B",
            "Change at C from L1 to L2",
            "Arrive at D",
        ]
    );
}

#[test]
fn summary_test() {
    let presentation = present(&route(&["X", "Y", "Z"], &["1", "2"]));
    assert_eq!(presentation.instructions.len(), 3);
    assert_eq!(presentation.summary.num_stations, 3);
    assert_eq!(presentation.summary.num_transfers, 1);
    assert_eq!(presentation.summary.duration_minutes, 7);
    assert_eq!(presentation.summary.lines, vec!["L1", "L2"]);
}

#[test]
fn distinct_lines_in_order_test() {
    let presentation = present(&route(
        &["A", "B", "C", "D", "E"],
        &["91", "3", "91", "99"],
    ));
    assert_eq!(presentation.summary.lines, vec!["L9 S", "L3", "FM"]);
    assert_eq!(presentation.summary.num_transfers, 3);
}

#[test]
fn single_station_route_test() {
    let presentation = present(&route(&["A"], &[]));
    assert_eq!(presentation.instructions.len(), 1);
    assert_eq!(
        presentation.instructions[0].kind,
        StepKind::Origin { line: None }
    );
    assert_eq!(presentation.summary.duration_minutes, 0);
    assert!(presentation.summary.lines.is_empty());
}

#[test]
fn reported_counts_win_test() {
    let route = route(&["A", "B", "C"], &["1", "1"]).with_counts(Some(4), Some(2));
    let presentation = present(&route);
    assert_eq!(presentation.summary.num_stations, 4);
    assert_eq!(presentation.summary.duration_minutes, 12);
    // Instructions still follow the station sequence.
    assert_eq!(presentation.instructions.len(), 3);
}

#[test]
fn transfer_notices_test() {
    let route = route(&["A", "B", "C"], &["1", "104"]).with_transfers(vec![ReportedTransfer {
        station: "B".into(),
        from_line: "1".into(),
        to_line: "104".into(),
    }]);
    let presentation = present(&route);
    assert_eq!(presentation.transfer_notices.len(), 1);
    assert_eq!(presentation.transfer_notices[0].to_string(), "B: L1 → L10 N");
}

#[test]
fn transfer_only_between_hops_test() {
    let route = route(&["A", "B", "C", "D"], &["1", "2", "2"]);
    assert!(!route.is_transfer_at(0));
    assert!(route.is_transfer_at(1));
    assert!(!route.is_transfer_at(2));
    assert!(!route.is_transfer_at(3));
}

#[test]
fn hop_mismatch_rejected_test() {
    let result = Route::new(vec!["A".into(), "B".into()], vec![]);
    assert_eq!(
        result,
        Err(InvalidRoute::HopMismatch {
            stations: 2,
            lines: 0
        })
    );
    assert_eq!(Route::new(vec![], vec![]), Err(InvalidRoute::Empty));
}

#[test]
fn query_validation_test() {
    assert!(RouteQuery::can_submit("A", "B"));
    assert!(!RouteQuery::can_submit("A", "A"));
    assert!(!RouteQuery::can_submit("", "B"));
    assert!(!RouteQuery::can_submit("A", ""));
}

#[test]
fn huge_reported_counts_saturate_test() {
    use metro_map::api::dto::RouteDto;
    use metro_map::route::RouteOutcome;

    let raw: RouteDto = serde_json::from_str(
        r##"{"found": true, "stations": [{"name": "A"}, {"name": "B"}], "lines": ["1"],
             "num_stations": 3000000000, "num_transfers": 0}"##,
    )
    .expect("route json");
    let Ok(RouteOutcome::Found(route)) = RouteOutcome::try_from(raw) else {
        panic!("expected a route");
    };
    assert_eq!(present(&route).summary.duration_minutes, u32::MAX);

    assert_eq!(estimate_duration(u32::MAX, u32::MAX), u32::MAX);
    assert_eq!(estimate_duration(2, u32::MAX), u32::MAX);
}
