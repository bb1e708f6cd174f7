//! Symptom checker: body areas, their common symptoms and static advice.

use serde::Serialize;

struct AreaEntry {
    name: &'static str,
    symptoms: [&'static str; 4],
    advice: &'static str,
}

const AREAS: &[AreaEntry] = &[
    AreaEntry {
        name: "Head",
        symptoms: ["Headache", "Fever", "Sore throat", "Runny nose"],
        advice: "Hydrate, rest, and consider over‑the‑counter pain relief. Seek care if severe or persistent.",
    },
    AreaEntry {
        name: "Chest",
        symptoms: ["Cough", "Chest pain", "Shortness of breath", "Palpitations"],
        advice: "If chest pain is severe or with breathlessness, seek emergency care immediately.",
    },
    AreaEntry {
        name: "Abdomen",
        symptoms: ["Nausea", "Vomiting", "Diarrhea", "Stomach pain"],
        advice: "Avoid heavy meals and hydrate. Seek care if pain is severe or persistent.",
    },
    AreaEntry {
        name: "Legs",
        symptoms: ["Cramps", "Swelling", "Pain while walking", "Numbness"],
        advice: "Elevate and rest. If swelling or redness with pain, consult a doctor.",
    },
    AreaEntry {
        name: "Arms",
        symptoms: ["Rash", "Pain", "Numbness", "Weakness"],
        advice: "Consider ice/rest. If rash spreads or fever develops, consult a doctor.",
    },
];

/// What the checker shows for a selected area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaAdvice {
    pub area: &'static str,
    pub symptoms: Vec<&'static str>,
    pub advice: &'static str,
}

/// Selectable area names in display order.
pub fn areas() -> Vec<&'static str> {
    AREAS.iter().map(|a| a.name).collect()
}

/// Symptoms and advice for an area. Names match exactly, as the page's
/// area buttons send them.
pub fn lookup(area: &str) -> Option<AreaAdvice> {
    AREAS.iter().find(|a| a.name == area).map(|a| AreaAdvice {
        area: a.name,
        symptoms: a.symptoms.to_vec(),
        advice: a.advice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_areas() {
        assert_eq!(areas(), vec!["Head", "Chest", "Abdomen", "Legs", "Arms"]);
    }

    #[test]
    fn chest_advice() {
        let chest = lookup("Chest").unwrap();
        assert_eq!(chest.symptoms[2], "Shortness of breath");
        assert!(chest.advice.contains("emergency care"));
    }

    #[test]
    fn every_area_has_four_symptoms() {
        for area in areas() {
            assert_eq!(lookup(area).unwrap().symptoms.len(), 4);
        }
    }

    #[test]
    fn unknown_area_is_none() {
        assert!(lookup("Tail").is_none());
        assert!(lookup("head").is_none());
    }
}
