use async_trait::async_trait;
use puredelhi_core::PollutionLevel;
use serde::{Deserialize, Serialize};

/// Result type for advice operations.
pub type AdviceResult<T> = anyhow::Result<T>;

/// What the dashboard sends when asking for health guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub ward_name: String,
    pub aqi: u16,
    pub pollution_level: PollutionLevel,
}

/// Generated guidance for a ward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advice {
    pub advice: String,
    /// Model that produced the text, or "fallback" for canned advice.
    pub model: String,
}

/// Trait for advice backends.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Generate advice for a ward. Errors here mean every upstream
    /// attempt failed; callers decide whether to surface or substitute.
    async fn advise(&self, request: &AdviceRequest) -> AdviceResult<Advice>;

    /// Provider name for logging.
    fn provider_name(&self) -> &str;
}

/// Build the prompt sent upstream. Mirrors the dashboard's tone
/// requirements: brief, professional, no markdown symbols.
pub fn advice_prompt(request: &AdviceRequest) -> String {
    format!(
        "Provide 3 specific health and action recommendations for residents of {} ward \
         in Delhi, where the AQI is currently {} ({}). Keep it brief, professional, and \
         premium in tone. Do not use markdown symbols like * or #.",
        request.ward_name, request.aqi, request.pollution_level
    )
}

/// Canned advisory used when the upstream model is unreachable, keyed to
/// the severity of the reading so the UI still shows something sensible.
pub fn fallback_advice(request: &AdviceRequest) -> Advice {
    let advice = match request.pollution_level {
        PollutionLevel::Good | PollutionLevel::Satisfactory => format!(
            "Air quality in {} is within acceptable limits at AQI {}. Outdoor activity \
             is fine for the general population. Sensitive groups should still monitor \
             local updates.",
            request.ward_name, request.aqi
        ),
        PollutionLevel::Moderate | PollutionLevel::Poor => format!(
            "Monitor local air quality updates. Current AQI is {}. Sensitive groups \
             should limit outdoor exposure. Ensure indoor air circulation is filtered.",
            request.aqi
        ),
        PollutionLevel::VeryPoor | PollutionLevel::Severe => format!(
            "AQI in {} has reached {}. Prioritize N95 protection outdoors, keep windows \
             closed, and run high-efficiency indoor air purification. Children and the \
             elderly should remain indoors.",
            request.ward_name, request.aqi
        ),
    };

    Advice {
        advice,
        model: "fallback".to_string(),
    }
}
