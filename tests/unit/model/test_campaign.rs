use serde_json::{Value, json};
use threec_client::model::campaign::{Campaign, campaigns_from_response};

fn campaign(value: Value) -> Campaign {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_campaign_accessors() {
    let c = campaign(json!({"id": 5, "name": "Vendas SP", "active": true, "extra": 1}));
    assert_eq!(c.id(), Some(5));
    assert_eq!(c.name(), "Vendas SP");
    assert!(c.is_active());
    assert_eq!(c.get("extra"), Some(&json!(1)));
}

#[test]
fn test_campaign_active_defaults_and_truthiness() {
    assert!(campaign(json!({"id": 1})).is_active());
    assert!(!campaign(json!({"active": false})).is_active());
    assert!(!campaign(json!({"active": 0})).is_active());
    assert!(!campaign(json!({"active": null})).is_active());
    assert!(campaign(json!({"active": 1})).is_active());
}

#[test]
fn test_campaign_name_filter_is_case_insensitive() {
    let c = campaign(json!({"name": "Campanha Black Friday"}));
    assert!(c.name_contains("black"));
    assert!(c.name_contains("CAMP"));
    assert!(!c.name_contains("natal"));
    assert!(!campaign(json!({"id": 1})).name_contains("x"));
}

#[test]
fn test_campaign_serializes_transparently() {
    let raw = json!({"id": 9, "name": "x"});
    let c = campaign(raw.clone());
    assert_eq!(serde_json::to_value(&c).unwrap(), raw);
}

#[test]
fn test_campaigns_from_response_keys() {
    let data = campaigns_from_response(&json!({"data": [{"id": 1}, {"id": 2}]}));
    assert_eq!(data.len(), 2);

    let fallback = campaigns_from_response(&json!({"data": [], "campaigns": [{"id": 3}]}));
    assert_eq!(fallback[0].id(), Some(3));

    assert!(campaigns_from_response(&json!({"items": [{"id": 1}]})).is_empty());
    assert_eq!(
        campaigns_from_response(&json!({"data": [{"id": 1}, "noise", 4]})).len(),
        1
    );
}
