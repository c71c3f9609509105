//! Merge-convert engine tests

use gdpx::core::{merge_convert, CurrencyGroup, MergeConverter};
use gdpx::types::{FailureReason, RawCell, RawTable};
use pretty_assertions::assert_eq;

fn num(n: f64) -> RawCell {
    RawCell::Number(n)
}

fn text(s: &str) -> RawCell {
    RawCell::from(s)
}

fn reasons(errors: &[gdpx::ErrorRecord]) -> Vec<(&str, &str, FailureReason)> {
    errors
        .iter()
        .map(|e| (e.country.as_str(), e.year.as_str(), e.reason))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_shared_currency_uses_reference_row() {
    let gdp = RawTable::new().with_row("France", [("2020", num(100.0))]);
    let fx = RawTable::new()
        .with_row("Euro Area", [("2020", num(10.0))])
        .with_row("France", [("2020", num(999.0))]);
    let group = CurrencyGroup::from_names(["France"]);

    let (table, errors) = merge_convert(&gdp, &fx, &group, "Euro Area");

    assert_eq!(table.get("France", "2020"), Some(Some(10.0)));
    assert!(errors.is_empty());
}

#[test]
fn test_missing_fx_table_reports_currency_missing() {
    let gdp = RawTable::new().with_row("Japan", [("2020", num(500.0))]);
    let fx = RawTable::new();

    let (table, errors) = merge_convert(&gdp, &fx, &CurrencyGroup::new(), "Euro Area");

    assert_eq!(
        reasons(&errors),
        vec![("Japan", "2020", FailureReason::CurrencyInfoMissing)]
    );
    assert_eq!(table.value("Japan", "2020"), None);
    assert_eq!(
        errors[0].reason.to_string(),
        "Country currency information missing"
    );
}

#[test]
fn test_placeholder_gdp_reports_invalid_gdp() {
    let gdp = RawTable::new().with_row("Japan", [("2020", text("..."))]);
    let fx = RawTable::new().with_row("Japan", [("2020", num(100.0))]);

    let (_, errors) = merge_convert(&gdp, &fx, &CurrencyGroup::new(), "Euro Area");

    assert_eq!(
        reasons(&errors),
        vec![("Japan", "2020", FailureReason::InvalidGdpData)]
    );
    assert_eq!(errors[0].reason.to_string(), "Invalid GDP data");
}

#[test]
fn test_zero_fx_is_a_failure_not_infinity() {
    let gdp = RawTable::new().with_row("A", [("2021", num(50.0))]);
    let fx = RawTable::new().with_row("A", [("2021", num(0.0))]);

    let (table, errors) = merge_convert(&gdp, &fx, &CurrencyGroup::new(), "Euro Area");

    assert_eq!(table.get("A", "2021"), Some(None));
    assert_eq!(
        reasons(&errors),
        vec![("A", "2021", FailureReason::ConversionFailed)]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

fn mixed_tables() -> (RawTable, RawTable) {
    let gdp = RawTable::new()
        .with_row("France", [("2019", num(90.0)), ("2020", num(100.0)), ("2021", text("..."))])
        .with_row("Japan", [("2019", num(400.0)), ("2020", text("abc")), ("2021", num(550.0))])
        .with_row("Chad", [("2019", num(1.0)), ("2020", RawCell::Empty)])
        .with_row("Peru", [("2020", text("12")), ("2021", num(8.0))]);
    let fx = RawTable::new()
        .with_row("Euro Area", [("2019", num(9.0)), ("2020", num(10.0))])
        .with_row("France", [("2019", num(1.0)), ("2020", num(1.0)), ("2021", num(1.0))])
        .with_row("Japan", [("2019", num(100.0)), ("2020", num(100.0)), ("2021", text("..."))])
        .with_row("Peru", [("2020", text("4")), ("2021", num(0.0))]);
    (gdp, fx)
}

#[test]
fn test_every_gdp_pair_is_converted_or_reported_exactly_once() {
    let (gdp, fx) = mixed_tables();
    let group = CurrencyGroup::from_names(["France"]);

    let (table, errors) = merge_convert(&gdp, &fx, &group, "Euro Area");

    let mut pairs = 0;
    for row in gdp.rows() {
        for (year, _) in row.cells() {
            pairs += 1;
            let converted = table.value(&row.key, year).is_some();
            let reported = errors
                .iter()
                .filter(|e| e.country == row.key && e.year == year)
                .count();
            assert!(table.get(&row.key, year).is_some(), "{} {} missing", row.key, year);
            assert_eq!(
                usize::from(converted) + reported,
                1,
                "{} {} converted={} reported={}",
                row.key,
                year,
                converted,
                reported
            );
        }
    }
    assert_eq!(pairs, 10);
}

#[test]
fn test_error_order_and_classification() {
    let (gdp, fx) = mixed_tables();
    let group = CurrencyGroup::from_names(["France"]);

    let (table, errors) = merge_convert(&gdp, &fx, &group, "Euro Area");

    assert_eq!(
        reasons(&errors),
        vec![
            // Euro Area has no 2021 rate
            ("France", "2021", FailureReason::CurrencyInfoMissing),
            ("Japan", "2020", FailureReason::ConversionFailed),
            ("Japan", "2021", FailureReason::CurrencyInfoMissing),
            ("Chad", "2019", FailureReason::CurrencyInfoMissing),
            ("Chad", "2020", FailureReason::CurrencyInfoMissing),
            ("Peru", "2021", FailureReason::ConversionFailed),
        ]
    );
    assert_eq!(table.value("France", "2019"), Some(10.0));
    assert_eq!(table.value("Japan", "2019"), Some(4.0));
    assert_eq!(table.value("Peru", "2020"), Some(3.0));
}

#[test]
fn test_merge_is_idempotent() {
    let (gdp, fx) = mixed_tables();
    let group = CurrencyGroup::from_names(["France", "Japan"]);
    let converter = MergeConverter::new("Euro Area");

    let first = converter.convert(&gdp, &fx, &group);
    let second = converter.convert(&gdp, &fx, &group);

    assert_eq!(first, second);
}

#[test]
fn test_group_member_never_reads_own_row() {
    let gdp = RawTable::new().with_row("Ireland", [("2020", num(60.0)), ("2021", num(60.0))]);
    let fx = RawTable::new()
        .with_row("Euro Area", [("2020", num(2.0))])
        .with_row("Ireland", [("2020", num(3.0)), ("2021", num(3.0))]);
    let group = CurrencyGroup::from_names(["Ireland"]);

    let (table, errors) = merge_convert(&gdp, &fx, &group, "Euro Area");

    assert_eq!(table.value("Ireland", "2020"), Some(30.0));
    // Own row has 2021, the reference row does not
    assert_eq!(
        reasons(&errors),
        vec![("Ireland", "2021", FailureReason::CurrencyInfoMissing)]
    );
}

#[test]
fn test_fx_checked_before_gdp() {
    let gdp = RawTable::new().with_row("X", [("2020", text("..."))]);
    let fx = RawTable::new().with_row("X", [("2020", text("..."))]);

    let (_, errors) = merge_convert(&gdp, &fx, &CurrencyGroup::new(), "Euro Area");

    assert_eq!(errors[0].reason, FailureReason::CurrencyInfoMissing);
}

#[test]
fn test_unknown_group_members_are_noops() {
    let gdp = RawTable::new().with_row("Japan", [("2020", num(500.0))]);
    let fx = RawTable::new().with_row("Japan", [("2020", num(100.0))]);

    let with_unknown = CurrencyGroup::from_names(["Atlantis", "Narnia"]);
    let (table, errors) = merge_convert(&gdp, &fx, &with_unknown, "Euro Area");

    assert_eq!(table.value("Japan", "2020"), Some(5.0));
    assert!(errors.is_empty());
}

#[test]
fn test_custom_reference_row() {
    let gdp = RawTable::new().with_row("Senegal", [("2020", num(655.0))]);
    let fx = RawTable::new().with_row("WAEMU", [("2020", num(655.957))]);
    let group = CurrencyGroup::from_names(["Senegal"]);

    let outcome = MergeConverter::new("WAEMU").convert(&gdp, &fx, &group);

    let value = outcome.table.value("Senegal", "2020").unwrap();
    assert!((value - 655.0 / 655.957).abs() < 1e-12);
    assert_eq!(outcome.success_count(), 1);
    assert_eq!(outcome.failure_count(), 0);
}

#[test]
fn test_empty_gdp_table() {
    let (table, errors) = merge_convert(
        &RawTable::new(),
        &RawTable::new(),
        &CurrencyGroup::default_preset(),
        "Euro Area",
    );
    assert!(table.is_empty());
    assert!(errors.is_empty());
}
