//! Request/response contract tests through the library API.

use approx::assert_relative_eq;
use serde_json::{json, Value};

use convex_cli::{handle_json, render, CliConfig, CliError, OutputFormat};

fn request(extra: Value) -> String {
    let mut base = json!({
        "issue_date": [2020, 1, 1],
        "maturity_date": [2030, 1, 1],
        "settlement_date": [2023, 1, 1],
        "coupon_rate": 0.05,
        "frequency": "semi_annual",
        "day_count": "act_act_isda"
    });
    if let (Value::Object(fields), Value::Object(extra)) = (&mut base, extra) {
        fields.extend(extra);
    }
    base.to_string()
}

#[test]
fn test_price_from_yield() {
    let result = handle_json(&request(json!({ "ytm": 0.04 })), &CliConfig::default()).unwrap();

    assert_relative_eq!(result.clean_price, 106.05312438529275, epsilon = 1e-8);
    assert_relative_eq!(result.dirty_price, result.clean_price, epsilon = 1e-12);
    assert_eq!(result.accrued_interest, 0.0);
    assert_eq!(result.ytm, 0.04);
    assert!(result.modified_duration < result.macaulay_duration);
    assert!(result.convexity > 0.0);
}

#[test]
fn test_yield_from_price_echoes_price() {
    let result =
        handle_json(&request(json!({ "clean_price": 97.5 })), &CliConfig::default()).unwrap();

    assert_eq!(result.clean_price, 97.5);
    assert!(result.ytm > 0.05);

    let repriced =
        handle_json(&request(json!({ "ytm": result.ytm })), &CliConfig::default()).unwrap();
    assert_relative_eq!(repriced.clean_price, 97.5, epsilon = 1e-6);
}

#[test]
fn test_response_document() {
    let result = handle_json(&request(json!({ "ytm": 0.04 })), &CliConfig::default()).unwrap();
    let out = render(&result, OutputFormat::Json).unwrap();
    let doc: Value = serde_json::from_str(&out).unwrap();

    let mut keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
    let mut expected = vec![
        "accrued_interest",
        "clean_price",
        "convexity",
        "dirty_price",
        "macauley_duration",
        "modified_duration",
        "ytm",
    ];
    expected.sort_unstable();
    keys.sort_unstable();
    assert_eq!(keys, expected);
    assert!(out.ends_with('\n'));
}

#[test]
fn test_optional_enums_default() {
    let input = json!({
        "issue_date": [2020, 1, 1],
        "maturity_date": [2030, 1, 1],
        "settlement_date": [2023, 1, 1],
        "coupon_rate": 0.05,
        "ytm": 0.04
    })
    .to_string();
    let defaulted = handle_json(&input, &CliConfig::default()).unwrap();
    let explicit = handle_json(&request(json!({ "ytm": 0.04 })), &CliConfig::default()).unwrap();
    assert_eq!(defaulted, explicit);
}

#[test]
fn test_ambiguous_input() {
    for extra in [json!({}), json!({ "ytm": 0.04, "clean_price": 101.0 })] {
        let err = handle_json(&request(extra), &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::AmbiguousInput { .. }), "{err}");
    }
}

#[test]
fn test_unsupported_enum_values() {
    let err = handle_json(
        &request(json!({ "ytm": 0.04, "frequency": "weekly" })),
        &CliConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CliError::UnsupportedEnumValue { ref field, ref value } if field == "frequency" && value == "weekly"
    ));

    let err = handle_json(
        &request(json!({ "ytm": 0.04, "day_count": "act_365l" })),
        &CliConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), "UnsupportedEnumValue");
}

#[test]
fn test_error_kinds() {
    let cases = [
        (json!({ "ytm": 0.04, "issue_date": [2020, 2, 30] }), "InvalidDate"),
        (json!({ "ytm": 0.04, "issue_date": [2031, 1, 1] }), "InvalidBond"),
        (json!({ "ytm": 0.04, "coupon_rate": -0.01 }), "InvalidBond"),
        (json!({ "ytm": 0.04, "settlement_date": [2019, 1, 1] }), "SettlementOutOfRange"),
        (json!({ "clean_price": -3.0 }), "PriceOutOfBounds"),
        (json!({ "clean_price": 100.0, "settlement_date": [2030, 1, 1] }), "SettlementOutOfRange"),
        (json!({ "ytm": 0.04, "coupon_rate": "five" }), "InvalidRequest"),
    ];

    for (extra, kind) in cases {
        let err = handle_json(&request(extra.clone()), &CliConfig::default()).unwrap_err();
        assert_eq!(err.kind(), kind, "{extra}: {err}");
    }
}

#[test]
fn test_solver_settings_from_config() {
    let config = CliConfig::from_toml("[solver]\nmax_price_multiple = 1.05\n").unwrap();
    let err = handle_json(&request(json!({ "clean_price": 110.0 })), &config).unwrap_err();
    assert_eq!(err.kind(), "PriceOutOfBounds");
}
