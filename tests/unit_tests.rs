// Unit tests for the symptom analysis pipeline

use serde_json::{json, Value};
use symptom_checker::core::{build_analysis_prompt, extract_json_object, process_model_output, to_percentage};
use symptom_checker::{validate_model_output, ResponseError, UrgencyLevel};

fn payload(urgency: &str, probabilities: &[f64]) -> Value {
    let conditions: Vec<Value> = probabilities
        .iter()
        .enumerate()
        .map(|(i, p)| json!({
            "name": format!("Condition {}", i + 1),
            "probability": p,
            "description": "Description"
        }))
        .collect();

    json!({
        "possibleConditions": conditions,
        "urgencyLevel": urgency,
        "recommendations": ["See a doctor if symptoms persist"],
        "requiresAttention": urgency == "high" || urgency == "emergency",
        "disclaimer": "This analysis is not a medical diagnosis.",
        "diet": {
            "recommendedFoods": ["Rice", "Bananas"],
            "foodsToAvoid": ["Dairy"],
            "hydration": "Small sips of oral rehydration solution"
        },
        "medications": {
            "recommended": ["Oral rehydration salts"],
            "supplements": ["Probiotics"],
            "precautions": "Avoid anti-diarrheals with fever"
        }
    })
}

#[test]
fn test_conforming_payload_yields_bounded_result() {
    for urgency in ["low", "medium", "high", "emergency"] {
        let raw = payload(urgency, &[0.0, 0.42, 0.999, 1.0]).to_string();
        let result = process_model_output(&raw, "stomach cramps").unwrap();

        assert!((1..=4).contains(&result.severity));
        for condition in &result.possible_conditions {
            assert!(condition.probability >= 0.0 && condition.probability <= 100.0);
        }
    }
}

#[test]
fn test_urgency_to_severity_table() {
    let expected = [("low", 1), ("medium", 2), ("high", 3), ("emergency", 4)];

    for (urgency, severity) in expected {
        let raw = payload(urgency, &[0.5]).to_string();
        let result = process_model_output(&raw, "fatigue").unwrap();
        assert_eq!(result.severity, severity, "urgency {}", urgency);
    }

    let mapped: Vec<u8> = UrgencyLevel::ALL.iter().map(|u| u.severity()).collect();
    assert_eq!(mapped, vec![1, 2, 3, 4]);
}

#[test]
fn test_emergency_maps_to_severity_four() {
    let raw = format!(
        "Based on the symptoms, here is my analysis:\n```json\n{}\n```",
        payload("emergency", &[0.8, 0.1])
    );

    let result = process_model_output(&raw, "sudden weakness on one side of the face").unwrap();

    assert_eq!(result.severity, 4);
    assert!(result.requires_attention);
    assert!(result.summary.contains("medical emergency"));
}

#[test]
fn test_probability_reported_as_percentage() {
    let raw = payload("medium", &[0.42]).to_string();
    let result = process_model_output(&raw, "sore throat").unwrap();

    assert_eq!(result.possible_conditions[0].probability, 42.0);
    assert_eq!(to_percentage(0.42), 42.0);
}

#[test]
fn test_text_without_json_is_rejected() {
    let err = validate_model_output("I'm sorry, I can't provide medical advice.").unwrap_err();
    assert!(matches!(err, ResponseError::NoJsonFound));

    let err = process_model_output("", "cough").unwrap_err();
    assert!(matches!(err, ResponseError::NoJsonFound));
}

#[test]
fn test_missing_urgency_is_schema_mismatch() {
    let mut value = payload("low", &[0.3]);
    value.as_object_mut().unwrap().remove("urgencyLevel");

    let err = process_model_output(&value.to_string(), "runny nose").unwrap_err();
    assert!(matches!(err, ResponseError::SchemaMismatch(ref m) if m.contains("urgencyLevel")));
}

#[test]
fn test_unknown_urgency_rejected_before_mapping() {
    for urgency in ["critical", "LOW", "", "moderate"] {
        let raw = payload(urgency, &[0.3]).to_string();
        assert!(
            matches!(process_model_output(&raw, "x"), Err(ResponseError::SchemaMismatch(_))),
            "urgency {:?} should be rejected",
            urgency
        );
    }
}

#[test]
fn test_nested_structures_required() {
    let mut value = payload("low", &[0.3]);
    value["diet"].as_object_mut().unwrap().remove("hydration");
    assert!(matches!(
        process_model_output(&value.to_string(), "x"),
        Err(ResponseError::SchemaMismatch(_))
    ));

    let mut value = payload("low", &[0.3]);
    value["medications"] = json!(["aspirin"]);
    assert!(matches!(
        process_model_output(&value.to_string(), "x"),
        Err(ResponseError::SchemaMismatch(_))
    ));
}

#[test]
fn test_trailing_commas_are_malformed() {
    let raw = r#"{"possibleConditions": [], "urgencyLevel": "low",}"#;
    assert!(matches!(
        process_model_output(raw, "x"),
        Err(ResponseError::MalformedJson(_))
    ));
}

#[test]
fn test_extractor_returns_first_object_only() {
    let text = r#"Result: {"a": "}"} and also {"b": 2}"#;
    assert_eq!(extract_json_object(text).unwrap(), r#"{"a": "}"}"#);
}

#[test]
fn test_prompt_requests_json_only() {
    let prompt = build_analysis_prompt("dizziness when standing");
    assert!(prompt.contains("\"dizziness when standing\""));
    assert!(prompt.contains("Only return the JSON response, no other text"));
    assert!(prompt.contains("\"possibleConditions\""));
}
