//! Full pipeline runs through the library facade.

mod common;

use basketlens::config::AnalyticsConfig;
use basketlens::domain::entities::funnel_record::FunnelRecord;
use basketlens::domain::entities::order_line::OrderLine;
use basketlens::domain::error::PipelineError;
use basketlens::domain::values::segment::Segment;
use basketlens::BasketLens;
use common::{order, page};

fn funnel() -> Vec<FunnelRecord> {
    vec![
        page("/products/black-abaya", 400, 80, 40, 32),
        page("/products/prayer-mat", 300, 60, 20, 4),
        page("/products/dates-box", 200, 30, 10, 3),
        page("/", 1000, 50, 30, 20),
    ]
}

fn orders() -> Vec<OrderLine> {
    let mut lines = Vec::new();
    lines.extend(order("#1", &["Black Abaya", "Prayer Mat"]));
    lines.extend(order("#2", &["Black Abaya", "Prayer Mat", "Dates Box"]));
    lines.extend(order("#3", &["Dates Box", "Black Abaya"]));
    lines.extend(order("#4", &["Prayer Mat"]));
    lines.extend(order("#5", &["Black Abaya", "Black Abaya"]));
    lines
}

#[test]
fn test_report_end_to_end() {
    let lens = BasketLens::new(&AnalyticsConfig::default());
    let report = lens.report(&funnel(), &orders()).unwrap();

    assert_eq!(report.load.funnel_rows, 4);
    assert_eq!(report.load.order_lines, 10);
    assert_eq!(report.load.baskets, 3);

    // (Prayer Mat, Dates Box) was bought together once and falls under the default minimum of 2.
    assert_eq!(report.affinity.len(), 4);
    assert!(report.affinity.iter().all(|p| p.count == 2));

    assert_eq!(report.joined.len(), 4);
    assert_eq!(report.join_diagnostics.affinity_rows, 4);
    assert_eq!(report.join_diagnostics.funnel_rows, 4);
    assert_eq!(report.join_diagnostics.joined_rows, 4);

    // Prayer Mat completes exactly 20%, which is not above the cutoff.
    assert_eq!(report.checkout_upsells.len(), 3);
    assert!(report
        .checkout_upsells
        .iter()
        .all(|r| r.upsell_candidate != "Prayer Mat"));
    assert_eq!(report.checkout_upsells[0].upsell_candidate, "Black Abaya");

    assert_eq!(report.post_purchase.len(), 4);
    assert_eq!(report.bundles.len(), 4);

    assert_eq!(report.segments.pages.len(), 4);
    let abaya = report
        .segments
        .pages
        .iter()
        .find(|p| p.path == "/products/black-abaya")
        .unwrap();
    assert_eq!(abaya.segment, Segment::Star);

    // cart: 40 + 40 + 20 + 20 = 120, checkout: 8 + 16 + 7 + 10 = 41
    assert_eq!(report.revenue.lost_at_cart_sessions, 120);
    assert_eq!(report.revenue.lost_at_checkout_sessions, 41);
    assert!((report.revenue.recoverable_revenue - 161.0 * 50.0 * 0.10).abs() < 1e-6);
}

#[test]
fn test_min_pair_count_is_configurable() {
    let mut config = AnalyticsConfig::default();
    config.thresholds.min_pair_count = 1;
    let lens = BasketLens::new(&config);
    let pairs = lens.affinity(&orders()).unwrap();
    assert_eq!(pairs.len(), 6);
}

#[test]
fn test_runs_are_idempotent() {
    let lens = BasketLens::new(&AnalyticsConfig::default());
    let a = lens.report(&funnel(), &orders()).unwrap();
    let b = lens.report(&funnel(), &orders()).unwrap();

    let tables = |r: &basketlens::application::pipeline::StrategyReport| {
        serde_json::json!({
            "funnel": r.funnel,
            "affinity": r.affinity,
            "joined": r.joined,
            "diagnostics": r.join_diagnostics,
            "upsells": r.checkout_upsells,
            "post": r.post_purchase,
            "bundles": r.bundles,
            "segments": r.segments,
            "revenue": r.revenue,
        })
    };
    assert_eq!(tables(&a), tables(&b));
}

#[test]
fn test_zero_match_is_not_an_error() {
    let lens = BasketLens::new(&AnalyticsConfig::default());
    let funnel = vec![page("/collections/all", 100, 10, 5, 2)];
    let report = lens.report(&funnel, &orders()).unwrap();
    assert!(report.joined.is_empty());
    assert!(report.join_diagnostics.is_zero_match());
    assert_eq!(report.join_diagnostics.affinity_rows, 4);
    assert!(report.checkout_upsells.is_empty());
}

#[test]
fn test_empty_funnel_is_fatal() {
    let lens = BasketLens::new(&AnalyticsConfig::default());
    let err = lens.report(&Vec::<FunnelRecord>::new(), &orders()).unwrap_err();
    match err {
        PipelineError::EmptyInput(table) => assert_eq!(table, "funnel"),
        other => panic!("expected EmptyInput, got {other:?}"),
    }
}

#[test]
fn test_empty_orders_is_fatal() {
    let lens = BasketLens::new(&AnalyticsConfig::default());
    let err = lens.report(&funnel(), &Vec::<OrderLine>::new()).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyInput(ref t) if t == "orders"));
}

#[test]
fn test_match_keys_diagnostics() {
    let lens = BasketLens::new(&AnalyticsConfig::default());
    let d = lens.match_keys(&funnel(), &orders()).unwrap();
    assert_eq!(d.joined_rows, 4);
    assert_eq!(d.matched_affinity_rows, 4);
    assert!(d
        .funnel_key_preview
        .iter()
        .any(|k| k.source == "/products/black-abaya" && k.match_key.as_str() == "black-abaya"));
}

#[test]
fn test_segments_respect_min_sessions() {
    let mut config = AnalyticsConfig::default();
    config.thresholds.min_sessions_threshold = 350;
    let lens = BasketLens::new(&config);
    let table = lens.segments(&funnel()).unwrap();
    assert_eq!(table.pages.len(), 2);
    assert_eq!(table.excluded_pages, 2);
}

#[test]
fn test_single_purchase_pairs_stay_out_of_candidate_views() {
    let mut config = AnalyticsConfig::default();
    config.thresholds.min_pair_count = 1;
    let lens = BasketLens::new(&config);

    // completion 80, abandonment 80
    let funnel = vec![page("/products/oud", 200, 50, 10, 8)];
    let mut orders = Vec::new();
    orders.extend(order("#1", &["Dates", "Oud"]));
    orders.extend(order("#2", &["Mat", "Oud"]));
    orders.extend(order("#3", &["Mat", "Oud"]));

    let report = lens.report(&funnel, &orders).unwrap();
    assert_eq!(report.affinity.len(), 4);
    assert_eq!(report.joined.len(), 2);

    for view in [&report.checkout_upsells, &report.post_purchase] {
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].main_product, "Mat");
        assert_eq!(view[0].count, 2);
    }
}
