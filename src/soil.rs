//! Static crop to soil suitability table

/// Acceptable soil types per crop, in recommendation order
const STANDARD_TABLE: [(&str, &[&str]); 6] = [
    ("Wheat", &["Loamy", "Clayey"]),
    ("Rice", &["Clayey", "Loamy"]),
    ("Maize", &["Loamy", "Sandy"]),
    ("Sugarcane", &["Clayey", "Loamy"]),
    ("Cotton", &["Sandy", "Loamy"]),
    ("Pulses", &["Sandy", "Loamy"]),
];

/// Verdict for a crop/soil pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoilSuitability {
    Ideal,
    NotIdeal { alternatives: Vec<String> },
}

impl SoilSuitability {
    pub fn is_ideal(&self) -> bool {
        matches!(self, SoilSuitability::Ideal)
    }

    /// Human-readable comment embedded in the report prompt
    pub fn message(&self, crop: &str, soil_type: &str) -> String {
        match self {
            SoilSuitability::Ideal => format!("{} is ideal for {}.", soil_type, crop),
            SoilSuitability::NotIdeal { alternatives } => format!(
                "{} is not ideal for {}. Recommended soil types: {}.",
                soil_type,
                crop,
                alternatives.join(", ")
            ),
        }
    }
}

/// Immutable crop -> acceptable soils mapping
#[derive(Debug, Clone)]
pub struct SoilSuitabilityTable {
    entries: Vec<(String, Vec<String>)>,
}

impl SoilSuitabilityTable {
    /// The six-crop table the service ships with
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_TABLE
                .iter()
                .map(|(crop, soils)| {
                    (
                        crop.to_string(),
                        soils.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Acceptable soils for `crop`, exact and case-sensitive
    pub fn acceptable_soils(&self, crop: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == crop)
            .map(|(_, soils)| soils.as_slice())
    }

    /// Unknown crops are always reported as ideal
    pub fn assess(&self, crop: &str, soil_type: &str) -> SoilSuitability {
        match self.acceptable_soils(crop) {
            Some(soils) if !soils.iter().any(|s| s == soil_type) => SoilSuitability::NotIdeal {
                alternatives: soils.to_vec(),
            },
            _ => SoilSuitability::Ideal,
        }
    }

    pub fn crops(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(crop, soils)| (crop.as_str(), soils.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SoilSuitabilityTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = SoilSuitabilityTable::standard();
        assert_eq!(table.len(), 6);
        let crops: Vec<&str> = table.crops().map(|(c, _)| c).collect();
        assert_eq!(
            crops,
            vec!["Wheat", "Rice", "Maize", "Sugarcane", "Cotton", "Pulses"]
        );
    }

    #[test]
    fn test_wheat_on_sandy() {
        let table = SoilSuitabilityTable::standard();
        let verdict = table.assess("Wheat", "Sandy");
        assert_eq!(
            verdict,
            SoilSuitability::NotIdeal {
                alternatives: vec!["Loamy".to_string(), "Clayey".to_string()]
            }
        );
        assert_eq!(
            verdict.message("Wheat", "Sandy"),
            "Sandy is not ideal for Wheat. Recommended soil types: Loamy, Clayey."
        );
    }

    #[test]
    fn test_maize_on_loamy() {
        let table = SoilSuitabilityTable::standard();
        let verdict = table.assess("Maize", "Loamy");
        assert!(verdict.is_ideal());
        assert_eq!(verdict.message("Maize", "Loamy"), "Loamy is ideal for Maize.");
    }

    #[test]
    fn test_unknown_crop_is_ideal() {
        let table = SoilSuitabilityTable::standard();
        let verdict = table.assess("UnknownCrop", "AnySoil");
        assert!(verdict.is_ideal());
        assert_eq!(
            verdict.message("UnknownCrop", "AnySoil"),
            "AnySoil is ideal for UnknownCrop."
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = SoilSuitabilityTable::standard();
        assert!(table.acceptable_soils("wheat").is_none());
        // "wheat" is an unknown crop, so any soil passes
        assert!(table.assess("wheat", "Sandy").is_ideal());
        assert!(!table.assess("Wheat", "loamy").is_ideal());
    }

    #[test]
    fn test_alternatives_keep_stored_order() {
        let table = SoilSuitabilityTable::standard();
        match table.assess("Cotton", "Clayey") {
            SoilSuitability::NotIdeal { alternatives } => {
                assert_eq!(alternatives, vec!["Sandy", "Loamy"]);
            }
            SoilSuitability::Ideal => panic!("Clayey should not suit Cotton"),
        }
    }
}
