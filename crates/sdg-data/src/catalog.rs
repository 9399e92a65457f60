//! Indicator catalog.
//!
//! A static mapping from indicator code to display label, grouped into the
//! categories offered on the dashboard's selection form. Lookups never fail:
//! an unknown category or code echoes the code back.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// One catalogued indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorEntry {
    /// Indicator code as it appears in the dataset.
    pub code: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// A named group of indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Stable key used in URLs and forms.
    pub key: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Indicators in display order.
    pub indicators: Vec<IndicatorEntry>,
}

/// The full catalog with lookup indexes.
#[derive(Debug)]
pub struct Catalog {
    categories: Vec<Category>,
    labels: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

/// The process-wide catalog.
pub static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);

const fn entry(code: &'static str, label: &'static str) -> IndicatorEntry {
    IndicatorEntry { code, label }
}

impl Catalog {
    /// Builds a catalog from categories, indexing every (category, code) pair.
    pub fn new(categories: Vec<Category>) -> Self {
        let labels = categories
            .iter()
            .map(|category| {
                let by_code = category
                    .indicators
                    .iter()
                    .map(|indicator| (indicator.code, indicator.label))
                    .collect();
                (category.key, by_code)
            })
            .collect();

        Self { categories, labels }
    }

    fn builtin() -> Self {
        Self::new(vec![
            Category {
                key: "economic_growth",
                title: "Economic growth and productivity",
                indicators: vec![
                    entry(
                        "NY_GDP_PCAP",
                        "Annual growth rate of real GDP per capita",
                    ),
                    entry(
                        "SL_EMP_PCAP",
                        "Annual growth rate of real GDP per employed person",
                    ),
                ],
            },
            Category {
                key: "employment",
                title: "Employment and decent work",
                indicators: vec![
                    entry("SL_TLF_UEM", "Unemployment rate"),
                    entry(
                        "SL_EMP_EARN",
                        "Average hourly earnings of employees",
                    ),
                    entry(
                        "SL_ISV_IFRM",
                        "Proportion of informal employment in total employment",
                    ),
                    entry(
                        "SL_TLF_NEET",
                        "Proportion of youth not in education, employment or training",
                    ),
                    entry(
                        "SL_TLF_CHLDEA",
                        "Proportion of children engaged in economic activity",
                    ),
                    entry(
                        "SL_EMP_FTLINJUR",
                        "Fatal occupational injuries per 100,000 workers",
                    ),
                ],
            },
            Category {
                key: "financial_access",
                title: "Financial inclusion",
                indicators: vec![
                    entry(
                        "FB_ATM_TOTL",
                        "Automated teller machines per 100,000 adults",
                    ),
                    entry(
                        "FB_CBK_BRCH",
                        "Commercial bank branches per 100,000 adults",
                    ),
                    entry(
                        "FB_BNK_ACCSS",
                        "Proportion of adults with an account at a financial institution",
                    ),
                ],
            },
            Category {
                key: "tourism",
                title: "Sustainable tourism",
                indicators: vec![entry(
                    "ST_GDP_ZS",
                    "Tourism direct GDP as a proportion of total GDP",
                )],
            },
        ])
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a category by key.
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.key == key)
    }

    /// Label for `code` within `category`, or the code itself when unknown.
    pub fn label_for(&self, category: &str, code: &str) -> String {
        self.labels
            .get(category)
            .and_then(|by_code| by_code.get(code))
            .map_or_else(|| code.to_string(), |label| (*label).to_string())
    }

    /// Label for `code` in whichever category lists it.
    pub fn find_label(&self, code: &str) -> Option<&'static str> {
        self.categories
            .iter()
            .flat_map(|category| category.indicators.iter())
            .find(|indicator| indicator.code == code)
            .map(|indicator| indicator.label)
    }

    /// Category key listing `code`, if any.
    pub fn category_of(&self, code: &str) -> Option<&'static str> {
        self.categories
            .iter()
            .find(|category| category.indicators.iter().any(|i| i.code == code))
            .map(|category| category.key)
    }
}

/// Label for `code` in `category` from the process-wide catalog.
pub fn label_for(category: &str, code: &str) -> String {
    CATALOG.label_for(category, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_label() {
        assert_eq!(label_for("employment", "SL_TLF_UEM"), "Unemployment rate");
    }

    #[test]
    fn test_unknown_code_echoes() {
        assert_eq!(label_for("employment", "XX_UNKNOWN"), "XX_UNKNOWN");
    }

    #[test]
    fn test_unknown_category_echoes() {
        assert_eq!(label_for("nope", "SL_TLF_UEM"), "SL_TLF_UEM");
    }

    #[test]
    fn test_code_in_wrong_category_echoes() {
        assert_eq!(label_for("tourism", "SL_TLF_UEM"), "SL_TLF_UEM");
    }

    #[test]
    fn test_categories_in_display_order() {
        let keys: Vec<&str> = CATALOG.categories().iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec!["economic_growth", "employment", "financial_access", "tourism"]
        );
    }

    #[test]
    fn test_find_label_and_category_of() {
        assert_eq!(
            CATALOG.find_label("ST_GDP_ZS"),
            Some("Tourism direct GDP as a proportion of total GDP")
        );
        assert_eq!(CATALOG.category_of("FB_ATM_TOTL"), Some("financial_access"));
        assert_eq!(CATALOG.find_label("XX"), None);
        assert!(CATALOG.category("tourism").is_some());
    }

    #[test]
    fn test_codes_are_unique_across_categories() {
        let mut codes: Vec<&str> = CATALOG
            .categories()
            .iter()
            .flat_map(|c| c.indicators.iter().map(|i| i.code))
            .collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn test_catalog_serializes() {
        let json = serde_json::to_value(CATALOG.categories()).unwrap();
        assert_eq!(json[0]["key"], "economic_growth");
        assert_eq!(json[0]["indicators"][0]["code"], "NY_GDP_PCAP");
    }
}
