//! Affinity–funnel join and its diagnostics.

mod common;

use basketlens::application::join::{join_affinity_funnel, KEY_PREVIEW_LIMIT};
use common::{metrics, pair};

#[test]
fn test_slugged_title_meets_product_path() {
    let affinity = vec![pair("Prayer Mat", "Black Abaya", 3)];
    let funnel = vec![
        metrics("/products/black-abaya", 100, 20, 10, 8),
        metrics("/products/white-abaya", 80, 10, 5, 1),
    ];
    let out = join_affinity_funnel(&affinity, &funnel);

    assert_eq!(out.records.len(), 1);
    let row = &out.records[0];
    assert_eq!(row.main_product, "Prayer Mat");
    assert_eq!(row.upsell_candidate, "Black Abaya");
    assert_eq!(row.count, 3);
    assert_eq!(row.match_key.as_str(), "black-abaya");
    assert_eq!(row.landing_page_path, "/products/black-abaya");
    assert!((row.completion_rate - 80.0).abs() < 1e-9);
    assert!((row.abandonment_rate - 50.0).abs() < 1e-9);
    assert_eq!(row.sessions, 100);
}

#[test]
fn test_zero_overlap_reports_counts() {
    let affinity: Vec<_> = (0..10)
        .map(|i| pair("Main", &format!("Product {i}"), 2))
        .collect();
    let funnel: Vec<_> = (0..5)
        .map(|i| metrics(&format!("/collections/c{i}"), 10, 1, 1, 1))
        .collect();

    let out = join_affinity_funnel(&affinity, &funnel);
    assert!(out.records.is_empty());
    assert_eq!(out.diagnostics.affinity_rows, 10);
    assert_eq!(out.diagnostics.funnel_rows, 5);
    assert_eq!(out.diagnostics.joined_rows, 0);
    assert_eq!(out.diagnostics.matched_affinity_rows, 0);
    assert!(out.diagnostics.is_zero_match());
    assert_eq!(out.diagnostics.match_rate(), 0.0);
}

#[test]
fn test_duplicate_funnel_keys_fan_out() {
    let affinity = vec![pair("Dates", "Oud", 2)];
    let funnel = vec![
        metrics("/products/oud", 100, 10, 5, 5),
        metrics("/collections/ramadan/products/oud", 40, 4, 2, 1),
    ];
    let out = join_affinity_funnel(&affinity, &funnel);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.diagnostics.matched_affinity_rows, 1);
    assert_eq!(out.diagnostics.joined_rows, 2);
}

#[test]
fn test_one_direction_can_drop() {
    // Only "Oud" has a landing page, so (Dates -> Oud) survives and
    // (Oud -> Dates) does not.
    let affinity = vec![pair("Dates", "Oud", 2), pair("Oud", "Dates", 2)];
    let funnel = vec![metrics("/products/oud", 100, 10, 5, 5)];
    let out = join_affinity_funnel(&affinity, &funnel);
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].main_product, "Dates");
}

#[test]
fn test_path_without_slash_is_its_own_key() {
    let affinity = vec![pair("Cups", "Teapot", 2)];
    let funnel = vec![metrics("teapot", 10, 2, 1, 1)];
    let out = join_affinity_funnel(&affinity, &funnel);
    assert_eq!(out.records.len(), 1);
}

#[test]
fn test_empty_keys_never_match() {
    let affinity = vec![pair("Cups", "!!!", 2)];
    let funnel = vec![metrics("/", 500, 20, 10, 5)];
    let out = join_affinity_funnel(&affinity, &funnel);
    assert!(out.records.is_empty());
}

#[test]
fn test_key_preview_is_capped() {
    let affinity: Vec<_> = (0..25).map(|i| pair("M", &format!("Item {i}"), 2)).collect();
    let funnel = vec![metrics("/products/item-3", 10, 1, 1, 1)];
    let out = join_affinity_funnel(&affinity, &funnel);
    assert_eq!(out.diagnostics.affinity_key_preview.len(), KEY_PREVIEW_LIMIT);
    assert_eq!(out.diagnostics.funnel_key_preview.len(), 1);
    assert_eq!(out.diagnostics.affinity_key_preview[0].match_key.as_str(), "item-0");
    assert_eq!(out.diagnostics.funnel_key_preview[0].match_key.as_str(), "item-3");
    assert_eq!(out.diagnostics.joined_rows, 1);
}
