use idm_rs::api::{parse_reference, parse_series};
use idm_rs::{Category, Error};

#[test]
fn parse_indicators_sample() {
    let sample = r#"
    {
      "indicators": {
        "NGDP_RPCH": {
          "label": "Real GDP growth",
          "description": "Gross domestic product,\nconstant prices",
          "unit": "Annual percent change",
          "source": "World Economic Outlook"
        },
        "NGDPD": {
          "label": "GDP, current prices",
          "description": null,
          "unit": "Billions of U.S. dollars",
          "source": null
        },
        "": {
          "label": "ghost entry with empty id",
          "unit": "x"
        },
        "NOLABEL": {
          "label": null,
          "unit": "x"
        }
      }
    }
    "#;
    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    let entries = parse_reference(Category::Indicator, &v).unwrap();

    // Empty-id and null-label entries are dropped; order is by id.
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "NGDPD");
    assert_eq!(entries[1].id, "NGDP_RPCH");
    assert_eq!(entries[1].name, "Real GDP growth");
    assert_eq!(entries[1].unit.as_deref(), Some("Annual percent change"));
    // Embedded newlines are scrubbed.
    assert_eq!(
        entries[1].description.as_deref(),
        Some("Gross domestic product,constant prices")
    );
    assert_eq!(entries[0].description, None);
    assert_eq!(entries[0].source, None);
}

#[test]
fn parse_countries_sample() {
    let sample = r#"{"countries": {"IND": {"label": "India"}, "USA": {"label": "United States"}}}"#;
    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    let entries = parse_reference(Category::Country, &v).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "IND");
    assert_eq!(entries[0].name, "India");
    assert_eq!(entries[0].unit, None);
}

#[test]
fn parse_reference_requires_category_key() {
    let v: serde_json::Value = serde_json::from_str(r#"{"regions": {}}"#).unwrap();
    let err = parse_reference(Category::Group, &v).unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }), "{err}");
}

#[test]
fn parse_series_with_values() {
    let v: serde_json::Value = serde_json::from_str(
        r#"{"values": {"NGDP_RPCH": {"IND": {"2020": -6.6, "2021": 9.1}, "USA": {"2020": null}}}}"#,
    )
    .unwrap();
    let payload = parse_series(&v).unwrap();
    let values = payload.values.unwrap();
    let ind = &values["NGDP_RPCH"]["IND"];
    assert_eq!(ind["2020"], Some(-6.6));
    assert_eq!(ind["2021"], Some(9.1));
    assert_eq!(values["NGDP_RPCH"]["USA"]["2020"], None);
}

#[test]
fn parse_series_without_values_key() {
    let v: serde_json::Value = serde_json::from_str(r#"{"api": "v1"}"#).unwrap();
    let payload = parse_series(&v).unwrap();
    assert!(payload.values.is_none());
}

#[test]
fn parse_series_rejects_malformed_values() {
    // A string where a number belongs must fail with a typed error.
    let v: serde_json::Value =
        serde_json::from_str(r#"{"values": {"NGDP_RPCH": {"IND": {"2020": "n/a"}}}}"#).unwrap();
    let err = parse_series(&v).unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }), "{err}");
}
