//! Search query synthesis.
//!
//! Builds a diversified query set from symptoms, the diagnosis text, and
//! optional vehicle metadata. Queries are not deduplicated here; dedup
//! happens on results.

use crate::diagnosis::VehicleInfo;

/// Curated queries for known issue keywords. A keyword matches when it
/// appears (case-insensitively) as a substring of the diagnosis text; every
/// matching keyword contributes all of its queries.
const ISSUE_QUERIES: &[(&str, &[&str])] = &[
    (
        "cv joint",
        &[
            "CV joint replacement explained",
            "CV joint symptoms",
            "how much does CV joint cost",
            "CV joint clicking noise",
        ],
    ),
    (
        "brake",
        &[
            "brake pad replacement",
            "brake noise diagnosis",
            "brake repair cost",
            "how to know when brakes need replacing",
        ],
    ),
    (
        "alternator",
        &[
            "alternator failure symptoms",
            "how to test alternator",
            "alternator replacement cost",
            "battery vs alternator problem",
        ],
    ),
    (
        "transmission",
        &[
            "transmission slipping symptoms",
            "transmission fluid change",
            "transmission repair cost",
            "automatic transmission problems",
        ],
    ),
    (
        "engine misfire",
        &[
            "engine misfire diagnosis",
            "P0300 code explained",
            "misfire repair cost",
            "spark plug replacement",
        ],
    ),
];

/// Build the ordered query set for a diagnosis.
pub fn build_search_queries(
    diagnosis: &str,
    symptoms: &[String],
    vehicle: Option<&VehicleInfo>,
) -> Vec<String> {
    let mut queries = Vec::new();

    // Symptom-based searches
    for symptom in symptoms {
        queries.push(format!("car {} diagnosis", symptom));
        queries.push(format!("how to fix {}", symptom));
    }

    // Diagnosis-based searches from the curated issue table
    let diagnosis_lower = diagnosis.to_lowercase();
    for (keyword, issue_queries) in ISSUE_QUERIES {
        if diagnosis_lower.contains(keyword) {
            queries.extend(issue_queries.iter().map(|q| q.to_string()));
        }
    }

    // Generic fallback queries when no issue keyword matched
    if queries.len() == symptoms.len() * 2 {
        queries.push(format!("{} diagnosis", diagnosis));
        queries.push(format!("how to fix {}", diagnosis));
        queries.push(format!("{} repair cost", diagnosis));
    }

    // Vehicle-specific searches
    if let Some(v) = vehicle {
        queries.push(format!("{} {} {} {}", v.year, v.make, v.model, diagnosis));
        queries.push(format!("{} {} common problems", v.make, v.model));
    }

    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptoms(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn civic() -> VehicleInfo {
        VehicleInfo {
            year: 2019,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
        }
    }

    #[test]
    fn test_two_queries_per_symptom() {
        let queries = build_search_queries(
            "worn CV joint",
            &symptoms(&["clicking noise", "vibration"]),
            None,
        );
        assert_eq!(queries[0], "car clicking noise diagnosis");
        assert_eq!(queries[1], "how to fix clicking noise");
        assert_eq!(queries[2], "car vibration diagnosis");
        assert_eq!(queries[3], "how to fix vibration");
        assert!(queries.len() >= 4);
    }

    #[test]
    fn test_issue_keyword_contributes_curated_queries() {
        let queries = build_search_queries("worn CV joint", &symptoms(&["clicking"]), None);
        assert!(queries.contains(&"CV joint symptoms".to_string()));
        assert_eq!(queries.len(), 2 + 4);
    }

    #[test]
    fn test_multiple_keywords_all_contribute() {
        let queries = build_search_queries(
            "brake wear aggravated by a failing alternator",
            &symptoms(&["squeal"]),
            None,
        );
        assert!(queries.contains(&"brake repair cost".to_string()));
        assert!(queries.contains(&"alternator failure symptoms".to_string()));
        assert_eq!(queries.len(), 2 + 4 + 4);
    }

    #[test]
    fn test_generic_fallback_when_no_keyword_matches() {
        let diagnosis = "suspension bushing wear";
        let queries = build_search_queries(diagnosis, &symptoms(&["clunk over bumps"]), None);
        assert_eq!(queries.len(), 2 + 3);
        assert!(queries.contains(&format!("{} diagnosis", diagnosis)));
        assert!(queries.contains(&format!("how to fix {}", diagnosis)));
        assert!(queries.contains(&format!("{} repair cost", diagnosis)));
    }

    #[test]
    fn test_vehicle_adds_exactly_two_queries() {
        let without = build_search_queries("brake wear", &symptoms(&["grinding"]), None);
        let with = build_search_queries("brake wear", &symptoms(&["grinding"]), Some(&civic()));
        assert_eq!(with.len(), without.len() + 2);
        assert!(with.contains(&"2019 Honda Civic brake wear".to_string()));
        assert!(with.contains(&"Honda Civic common problems".to_string()));
    }

    #[test]
    fn test_minimum_query_count() {
        for n in 0..4 {
            let s: Vec<String> = (0..n).map(|i| format!("symptom {}", i)).collect();
            let queries = build_search_queries("anything at all", &s, None);
            assert!(queries.len() >= 2 * n);
        }
    }
}
