//! Rule-based fallback diagnosis.
//!
//! Used whenever the completion provider is unavailable or returns something
//! unparseable. The rules are a behavioral contract: keyword sets are checked
//! in priority order against the lowercased symptom text, first match wins.

use super::DiagnosisResult;

struct FallbackRule {
    keywords: &'static [&'static str],
    diagnosis: &'static str,
    parts: &'static [&'static str],
    estimated_cost: f64,
    confidence: u8,
}

const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        keywords: &["grind", "squeal", "brake"],
        diagnosis: "Based on the grinding or squealing sounds, this likely indicates worn brake \
pads or rotors. The metal-on-metal contact suggests immediate attention is needed to ensure \
safe braking.",
        parts: &["Brake Pad Set", "Brake Rotors", "Brake Hardware Kit"],
        estimated_cost: 350.0,
        confidence: 75,
    },
    FallbackRule {
        keywords: &["overheat", "radiator", "coolant", "hiss"],
        diagnosis: "Overheating and hissing sounds typically indicate a coolant leak, failed \
thermostat, or water pump issue. Check coolant levels immediately and inspect for visible leaks.",
        parts: &["Thermostat", "Water Pump", "Coolant", "Radiator Hoses"],
        estimated_cost: 450.0,
        confidence: 70,
    },
    FallbackRule {
        keywords: &["start", "crank", "battery", "stall"],
        diagnosis: "Starting problems or stalling can stem from battery, alternator, or fuel \
system issues. Test the battery voltage and check for loose connections or corroded terminals.",
        parts: &["Battery", "Alternator", "Fuel Filter", "Spark Plugs"],
        estimated_cost: 400.0,
        confidence: 65,
    },
    FallbackRule {
        keywords: &["noise", "sound", "whine", "belt"],
        diagnosis: "Whining or unusual noises often indicate belt issues, bearing wear, or pulley \
problems. A visual inspection of belts and pulleys is recommended.",
        parts: &["Serpentine Belt", "Belt Tensioner", "Idler Pulley"],
        estimated_cost: 250.0,
        confidence: 60,
    },
];

const GENERIC_DIAGNOSIS: &str = "Based on the symptoms described, a comprehensive diagnostic \
inspection is recommended to accurately identify the issue.";

/// Produce a deterministic diagnosis from symptom keywords.
pub fn fallback_diagnosis(symptom_text: &str) -> DiagnosisResult {
    let lower = symptom_text.to_lowercase();

    for rule in FALLBACK_RULES {
        if rule.keywords.iter().any(|kw| lower.contains(kw)) {
            return DiagnosisResult {
                diagnosis: rule.diagnosis.to_string(),
                recommended_parts: rule.parts.iter().map(|p| p.to_string()).collect(),
                estimated_cost: rule.estimated_cost,
                confidence: rule.confidence,
            };
        }
    }

    DiagnosisResult {
        diagnosis: GENERIC_DIAGNOSIS.to_string(),
        recommended_parts: vec!["Diagnostic Inspection".to_string()],
        estimated_cost: 125.0,
        confidence: 50,
    }
}
