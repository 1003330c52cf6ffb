/// JSON shape the model is asked to produce
const RESPONSE_FORMAT: &str = r#"{
  "possibleConditions": [
    {
      "name": "Condition name",
      "probability": 0.0,
      "description": "Brief description of the condition"
    }
  ],
  "urgencyLevel": "low | medium | high | emergency",
  "recommendations": ["Recommendation"],
  "requiresAttention": false,
  "disclaimer": "Medical disclaimer",
  "diet": {
    "recommendedFoods": ["Food"],
    "foodsToAvoid": ["Food"],
    "hydration": "Hydration advice"
  },
  "medications": {
    "recommended": ["Medication"],
    "supplements": ["Supplement"],
    "precautions": "Precautions"
  }
}"#;

const GUIDELINES: &[&str] = &[
    "List 3-5 possible conditions that match the symptoms, sorted by probability",
    "Probabilities are fractions between 0 and 1",
    "Be accurate but avoid causing unnecessary alarm",
    "Include a strong medical disclaimer",
    "For emergency conditions, always set urgencyLevel to \"emergency\"",
    "Provide specific dietary recommendations",
    "List relevant medications and supplements, but emphasize consulting a doctor",
    "Only return the JSON response, no other text",
];

/// Build the instruction sent to the model for a symptom description
///
/// The user's text is embedded as an escaped JSON string literal so quotes
/// and newlines in the input cannot break out of the symptoms field.
pub fn build_analysis_prompt(symptoms: &str) -> String {
    let quoted = serde_json::to_string(symptoms.trim())
        .unwrap_or_else(|_| format!("\"{}\"", symptoms.trim()));

    let guidelines = GUIDELINES
        .iter()
        .enumerate()
        .map(|(i, g)| format!("{}. {}", i + 1, g))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a medical symptom analysis assistant. Based on the following symptoms, provide a structured analysis.\n\
         User symptoms: {quoted}\n\n\
         Provide your response in the following JSON format:\n\
         {RESPONSE_FORMAT}\n\n\
         Important guidelines:\n\
         {guidelines}\n"
    )
}
