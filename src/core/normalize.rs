use crate::core::validation::ModelResponse;
use crate::models::{DietGuidance, MedicationGuidance, PossibleCondition, SymptomResult};

/// Characters of the user's input quoted back in the summary
const SUMMARY_PREVIEW_CHARS: usize = 50;

/// Map a validated model payload into the result shown to the user
pub fn normalize_response(response: &ModelResponse, symptoms: &str) -> SymptomResult {
    let possible_conditions = response
        .possible_conditions
        .iter()
        .map(|c| PossibleCondition {
            name: c.name.clone(),
            probability: to_percentage(c.probability),
            description: c.description.clone(),
        })
        .collect();

    SymptomResult {
        summary: generate_summary(response, symptoms),
        possible_conditions,
        severity: response.urgency_level.severity(),
        recommendations: response.recommendations.clone(),
        requires_attention: response.requires_attention,
        disclaimer: response.disclaimer.clone(),
        diet: DietGuidance {
            recommended_foods: response.diet.recommended_foods.clone(),
            foods_to_avoid: response.diet.foods_to_avoid.clone(),
            hydration: response.diet.hydration.clone(),
        },
        medications: MedicationGuidance {
            recommended: response.medications.recommended.clone(),
            supplements: response.medications.supplements.clone(),
            precautions: response.medications.precautions.clone(),
        },
    }
}

/// Convert a fraction in [0, 1] to a percentage rounded to two decimals
#[inline]
pub fn to_percentage(fraction: f64) -> f64 {
    ((fraction * 10_000.0).round() / 100.0).clamp(0.0, 100.0)
}

/// One-paragraph summary naming the top condition and the urgency advice
pub fn generate_summary(response: &ModelResponse, symptoms: &str) -> String {
    let top_condition = response
        .possible_conditions
        .first()
        .map(|c| c.name.as_str())
        .unwrap_or("the described symptoms");

    format!(
        "Based on your symptoms ({}), the analysis suggests {} as the most likely condition. {}",
        preview(symptoms.trim()),
        top_condition,
        response.urgency_level.advice()
    )
}

fn preview(symptoms: &str) -> String {
    match symptoms.char_indices().nth(SUMMARY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &symptoms[..cut]),
        None => symptoms.to_string(),
    }
}
