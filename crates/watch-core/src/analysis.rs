//! Analysis result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of analysis a report asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Technical,
    Fundamental,
    Earnings,
    Full,
}

impl AnalysisType {
    /// Stable wire name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Fundamental => "fundamental",
            Self::Earnings => "earnings",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generator's own confidence in its analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// A titled bullet-point section of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub title: String,
    pub points: Vec<String>,
}

/// Structured content of a completed analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub symbol: String,
    pub analysis_type: AnalysisType,
    pub title: String,
    pub summary: String,
    pub sections: Vec<AnalysisSection>,
    pub confidence: Confidence,
    pub recommendation: String,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        symbol: impl Into<String>,
        analysis_type: AnalysisType,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            analysis_type,
            title: title.into(),
            summary: summary.into(),
            sections: Vec::new(),
            confidence: Confidence::Medium,
            recommendation: String::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn with_section(
        mut self,
        title: impl Into<String>,
        points: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.sections.push(AnalysisSection {
            title: title.into(),
            points: points.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    /// Keep only the sections whose titles appear in `titles`.
    ///
    /// Used to cut a full analysis down to the requested slice; an empty
    /// filter result leaves the report with its summary only.
    pub fn retain_sections(mut self, titles: &[&str]) -> Self {
        self.sections.retain(|s| titles.contains(&s.title.as_str()));
        self
    }
}
