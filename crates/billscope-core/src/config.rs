//! Analysis configuration
//!
//! Optional TOML file tuning the pipeline: classifier preset and knob
//! overrides, reconciler tie-break, and category rules. Loaded only from an
//! explicit path; defaults apply when no file is given. Nothing is read
//! from the environment.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::classify::{ClassifierConfig, GroupingStrategy};
use crate::error::{Error, Result};
use crate::models::CategoryRule;
use crate::reconcile::MatchTieBreak;

/// Raw config file shape, deserialized as-is before resolution
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisConfigFile {
    /// Base preset: "loose_discovery" (default) or "strict_bill_detection"
    pub preset: Option<String>,
    pub classifier: Option<ClassifierOverrides>,
    pub reconciler: Option<ReconcilerSection>,
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

/// Per-knob overrides applied on top of the chosen preset
#[derive(Debug, Default, Deserialize)]
pub struct ClassifierOverrides {
    pub grouping: Option<GroupingStrategy>,
    pub min_occurrences: Option<usize>,
    pub min_confidence: Option<f64>,
    pub max_amount_variance: Option<f64>,
    /// Inclusive [low, high] band in days
    pub monthly_band: Option<[f64; 2]>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReconcilerSection {
    pub tie_break: Option<MatchTieBreak>,
}

/// Fully resolved analysis configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub classifier: ClassifierConfig,
    pub tie_break: MatchTieBreak,
    pub category_rules: Vec<CategoryRule>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::loose_discovery(),
            tie_break: MatchTieBreak::default(),
            category_rules: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Load and resolve a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let file: AnalysisConfigFile = toml::from_str(&text)?;
        let config = Self::resolve(file)?;
        debug!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Apply preset choice and overrides, then validate
    pub fn resolve(file: AnalysisConfigFile) -> Result<Self> {
        let mut classifier = match file.preset.as_deref() {
            None | Some("loose_discovery") | Some("loose") => ClassifierConfig::loose_discovery(),
            Some("strict_bill_detection") | Some("strict") => {
                ClassifierConfig::strict_bill_detection()
            }
            Some(other) => {
                return Err(Error::InvalidConfig(format!(
                    "unknown preset '{}' (expected loose_discovery or strict_bill_detection)",
                    other
                )))
            }
        };

        if let Some(overrides) = file.classifier {
            if let Some(grouping) = overrides.grouping {
                classifier.grouping = grouping;
            }
            if let Some(min_occurrences) = overrides.min_occurrences {
                classifier.min_occurrences = min_occurrences;
            }
            if let Some(min_confidence) = overrides.min_confidence {
                classifier.min_confidence = min_confidence;
            }
            if let Some(variance) = overrides.max_amount_variance {
                classifier.max_amount_variance = Some(variance);
            }
            if let Some([lo, hi]) = overrides.monthly_band {
                classifier.monthly_band = (lo, hi);
            }
        }
        classifier.validate()?;

        let tie_break = file
            .reconciler
            .and_then(|r| r.tie_break)
            .unwrap_or_default();

        Ok(Self {
            classifier,
            tie_break,
            category_rules: file.categories,
        })
    }
}
