use serde::{Deserialize, Serialize};

/// A named entity, serialized as a `[text, label]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct NamedEntity {
    pub text: String,
    pub label: String,
}

impl NamedEntity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

impl From<(String, String)> for NamedEntity {
    fn from((text, label): (String, String)) -> Self {
        Self { text, label }
    }
}

impl From<NamedEntity> for (String, String) {
    fn from(entity: NamedEntity) -> Self {
        (entity.text, entity.label)
    }
}

/// Everything computed for one piece of input text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub polarity: f64,
    pub subjectivity: f64,
    pub keywords: Vec<String>,
    pub entities: Vec<NamedEntity>,
    pub emotion: String,
    pub language: String,
    pub word_count: usize,
    pub readability_score: f64,
    pub toxicity_score: f64,
}

/// Analysis of a scraped article, with the page metadata alongside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleReport {
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(flatten)]
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            summary: "Short.".to_string(),
            polarity: -0.25,
            subjectivity: 0.5,
            keywords: vec!["city council".to_string()],
            entities: vec![NamedEntity::new("Berlin", "GPE")],
            emotion: "trust".to_string(),
            language: "en".to_string(),
            word_count: 12,
            readability_score: 71.5,
            toxicity_score: 0.25,
        }
    }

    #[test]
    fn test_entity_serializes_as_pair() {
        let json = serde_json::to_value(NamedEntity::new("Apple", "ORG")).unwrap();
        assert_eq!(json, serde_json::json!(["Apple", "ORG"]));

        let back: NamedEntity = serde_json::from_value(json).unwrap();
        assert_eq!(back, NamedEntity::new("Apple", "ORG"));
    }

    #[test]
    fn test_article_report_flattens_analysis() {
        let report = ArticleReport {
            title: "Headline".to_string(),
            source: "https://example.com".to_string(),
            published_date: None,
            analysis: sample_report(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["title"], "Headline");
        assert_eq!(json["summary"], "Short.");
        assert_eq!(json["entities"][0][1], "GPE");
        assert!(json.get("published_date").is_none());
        assert!(json.get("analysis").is_none());
    }
}
