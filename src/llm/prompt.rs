//! System instruction and sampling parameters for symptom triage.
//!
//! [`GenerationParams`] mirrors the Vertex AI `generationConfig` and
//! `safetySettings` request fields.  Every safety category is switched off.

use serde::Serialize;

use crate::config::GenerationConfig;

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Closing line every answer must end with.
pub const CONSULT_NOTICE: &str = "Consult a medical professional for diagnosis and treatment.";

/// Guideline prompt sent as the system instruction on every request.
pub const SYMPTOM_CHECKER_INSTRUCTION: &str = "\
Symptom Checker

Features:
- The user describes symptoms by voice or text.
- You list the most probable conditions (at most 3).
- The user is encouraged to consult a doctor.

Guidelines:
You are a symptom checker assistant that lists the most probable medical \
conditions related to the user's described symptoms. You are NOT a doctor and \
you do NOT give medical advice. Your purpose is a preliminary list of possible \
conditions that encourages the user to seek professional medical attention.

- If the symptoms are vague, ask for clarification.
- Be concise and easy to understand for a general audience.
- List a maximum of 3 possible conditions.
- For each condition give a very brief (1-2 sentence) explanation linking the symptoms to it.
- Always end with the phrase \"Consult a medical professional for diagnosis and treatment.\"
- Reply to prompts in languages other than English too.
- If the user asks about a specific condition, briefly explain it and its symptoms.
- If the user asks you to explain, translate, say or reply in a specific language, reply in that language.
- Do not respond to anything unrelated to health.

Example:

User: \"I have a headache, fever, and cough.\"

Response:
Possible conditions:
- Influenza (Flu): Flu can cause headache, fever, and cough.
- Common Cold: A cold can also cause these symptoms.
- Sinusitis: An infection of the sinuses can lead to headache, fever, and cough.

Consult a medical professional for diagnosis and treatment.";

// ---------------------------------------------------------------------------
// Safety settings
// ---------------------------------------------------------------------------

/// Vertex AI harm categories that accept a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::HateSpeech,
        HarmCategory::DangerousContent,
        HarmCategory::SexuallyExplicit,
        HarmCategory::Harassment,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: &'static str,
}

impl SafetySetting {
    pub fn off(category: HarmCategory) -> Self {
        Self {
            category,
            threshold: "OFF",
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationParams
// ---------------------------------------------------------------------------

/// Sampling parameters serialised as Vertex AI `generationConfig`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub seed: i32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            seed: config.seed,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Safety settings with every category disabled.
pub fn safety_settings_off() -> Vec<SafetySetting> {
    HarmCategory::ALL.into_iter().map(SafetySetting::off).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_limits_conditions_and_ends_with_notice() {
        assert!(SYMPTOM_CHECKER_INSTRUCTION.contains("maximum of 3"));
        assert!(SYMPTOM_CHECKER_INSTRUCTION.trim_end().ends_with(CONSULT_NOTICE));
    }

    #[test]
    fn params_serialise_as_camel_case() {
        let params = GenerationParams::from_config(&GenerationConfig::default());
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["topP"], 1.0);
        assert_eq!(json["seed"], 0);
        assert_eq!(json["maxOutputTokens"], 1024);
        assert!(json.get("top_p").is_none());
    }

    #[test]
    fn all_four_categories_are_off() {
        let settings = safety_settings_off();
        assert_eq!(settings.len(), 4);
        assert!(settings.iter().all(|s| s.threshold == "OFF"));

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json[0]["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(json[3]["category"], "HARM_CATEGORY_HARASSMENT");
    }
}
