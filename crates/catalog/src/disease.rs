//! Disease reference catalog.
//!
//! Five fictional-but-plausible disease entries covering a spread of
//! categories and severities. Symptoms are the tag surface for matching;
//! treatment, prevention, duration and the doctor-visit warnings are
//! presentation-only detail fields.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::record::{RecordId, Searchable};

/// A disease catalog entry.
///
/// All fields are immutable after catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Disease {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub severity: String,
    pub description: String,
    pub symptoms: Vec<String>,
    pub treatment: String,
    pub prevention: Vec<String>,
    pub duration: String,
    pub when_to_see_doctor: Vec<String>,
}

impl Searchable for Disease {
    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.symptoms
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static DISEASES: Lazy<Vec<Disease>> = Lazy::new(|| {
    vec![
        Disease {
            id: 1,
            name: "Common Cold".into(),
            category: "Respiratory".into(),
            severity: "Mild".into(),
            description: "A viral infection of the upper respiratory tract".into(),
            symptoms: strings(&[
                "Runny nose",
                "Sore throat",
                "Cough",
                "Congestion",
                "Slight body aches",
            ]),
            treatment: "Rest, fluids, and over-the-counter medications".into(),
            prevention: strings(&[
                "Wash hands frequently",
                "Avoid close contact with infected people",
                "Maintain good hygiene",
            ]),
            duration: "7-10 days".into(),
            when_to_see_doctor: strings(&[
                "Fever above 101.3°F (38.5°C)",
                "Symptoms lasting more than 10 days",
                "Severe sinus pain",
            ]),
        },
        Disease {
            id: 2,
            name: "Type 2 Diabetes".into(),
            category: "Endocrine".into(),
            severity: "Chronic".into(),
            description: "A chronic condition affecting how the body processes blood sugar".into(),
            symptoms: strings(&[
                "Increased thirst",
                "Frequent urination",
                "Increased hunger",
                "Fatigue",
                "Blurred vision",
            ]),
            treatment: "Medication, diet control, regular exercise".into(),
            prevention: strings(&[
                "Maintain healthy weight",
                "Regular exercise",
                "Balanced diet",
                "Regular check-ups",
            ]),
            duration: "Chronic condition".into(),
            when_to_see_doctor: strings(&[
                "Frequent infections",
                "Slow-healing sores",
                "Numbness in hands or feet",
            ]),
        },
        Disease {
            id: 3,
            name: "Fever".into(),
            category: "General".into(),
            severity: "Varies".into(),
            description: "An elevated body temperature often indicating infection or illness"
                .into(),
            symptoms: strings(&[
                "High body temperature (above 98.6°F/37°C)",
                "Sweating/chills",
                "Headache",
                "Muscle aches",
                "Loss of appetite",
                "Dehydration",
            ]),
            treatment: "Rest, hydration, fever-reducing medications (if needed)".into(),
            prevention: strings(&[
                "Maintain good hygiene",
                "Stay hydrated",
                "Get adequate rest",
                "Avoid contact with sick individuals",
            ]),
            duration: "Usually 3-7 days depending on cause".into(),
            when_to_see_doctor: strings(&[
                "Temperature above 103°F (39.4°C)",
                "Fever lasting more than 3 days",
                "Severe headache",
                "Unusual skin rash",
                "Unusual sensitivity to bright light",
                "Stiff neck and pain when bending head forward",
            ]),
        },
        Disease {
            id: 4,
            name: "Lung Cancer".into(),
            category: "Oncology".into(),
            severity: "Severe".into(),
            description:
                "A type of cancer that begins in the lungs and may spread to other parts of the body"
                    .into(),
            symptoms: strings(&[
                "Persistent cough",
                "Coughing up blood",
                "Chest pain",
                "Shortness of breath",
                "Hoarseness",
                "Unexplained weight loss",
                "Bone pain",
                "Headache",
            ]),
            treatment:
                "May include surgery, chemotherapy, radiation therapy, targeted drug therapy, or immunotherapy"
                    .into(),
            prevention: strings(&[
                "Don't smoke or quit smoking",
                "Avoid secondhand smoke",
                "Test home for radon",
                "Avoid carcinogen exposure",
                "Maintain a healthy diet",
            ]),
            duration: "Varies based on stage and treatment".into(),
            when_to_see_doctor: strings(&[
                "Persistent cough",
                "Chest pain",
                "Shortness of breath",
                "Unexplained weight loss",
                "Coughing up blood",
            ]),
        },
        Disease {
            id: 5,
            name: "Breast Cancer".into(),
            category: "Oncology".into(),
            severity: "Severe".into(),
            description: "Cancer that forms in the cells of the breasts".into(),
            symptoms: strings(&[
                "Lump in breast or underarm",
                "Changes in breast size or shape",
                "Skin changes on breast",
                "Nipple discharge",
                "Breast pain",
            ]),
            treatment:
                "Surgery, radiation therapy, chemotherapy, hormone therapy, targeted therapy"
                    .into(),
            prevention: strings(&[
                "Regular mammograms",
                "Maintain healthy weight",
                "Regular exercise",
                "Limit alcohol consumption",
                "Breast self-exams",
            ]),
            duration: "Varies based on stage and treatment".into(),
            when_to_see_doctor: strings(&[
                "Any breast changes",
                "Lumps or thickening",
                "Skin changes",
                "Nipple changes",
                "Unusual discharge",
            ]),
        },
    ]
});

/// Returns the compiled-in disease catalog in declaration order.
pub fn disease_catalog() -> &'static [Disease] {
    &DISEASES
}
