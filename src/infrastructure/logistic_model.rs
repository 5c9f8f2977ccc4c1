// Standardized logistic regression loaded from JSON
use crate::application::learned_model::LearnedModel;
use crate::domain::telemetry::{RAW_FEATURE_NAMES, RawFeatureVector};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// On-disk layout. Arrays are parallel, indexed like `features`.
#[derive(Debug, Deserialize)]
struct LogisticModelFile {
    features: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, Clone)]
struct Term {
    feature: String,
    mean: f64,
    scale: f64,
    coefficient: f64,
}

/// `p = sigmoid(intercept + sum(coef * (x - mean) / scale))`
#[derive(Debug, Clone)]
pub struct LogisticModel {
    terms: Vec<Term>,
    intercept: f64,
}

impl LogisticModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid model file {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: LogisticModelFile =
            serde_json::from_str(json).context("Failed to parse model JSON")?;

        let n = file.features.len();
        if n != RAW_FEATURE_NAMES.len() {
            anyhow::bail!("model must list {} features, got {n}", RAW_FEATURE_NAMES.len());
        }
        if file.mean.len() != n || file.scale.len() != n || file.coefficients.len() != n {
            anyhow::bail!(
                "parameter lengths differ: features={}, mean={}, scale={}, coefficients={}",
                n,
                file.mean.len(),
                file.scale.len(),
                file.coefficients.len()
            );
        }
        if !file.intercept.is_finite() {
            anyhow::bail!("intercept must be finite");
        }

        let mut seen = BTreeSet::new();
        let mut terms = Vec::with_capacity(n);
        for (i, feature) in file.features.into_iter().enumerate() {
            if !RAW_FEATURE_NAMES.contains(&feature.as_str()) {
                anyhow::bail!("unknown feature {feature}");
            }
            if !seen.insert(feature.clone()) {
                anyhow::bail!("duplicate feature {feature}");
            }
            let (mean, scale, coefficient) = (file.mean[i], file.scale[i], file.coefficients[i]);
            if !mean.is_finite() || !coefficient.is_finite() {
                anyhow::bail!("non-finite parameter for {feature}");
            }
            if !scale.is_finite() || scale == 0.0 {
                anyhow::bail!("scale for {feature} must be finite and non-zero");
            }
            terms.push(Term {
                feature,
                mean,
                scale,
                coefficient,
            });
        }

        Ok(Self {
            terms,
            intercept: file.intercept,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.terms.len()
    }
}

impl LearnedModel for LogisticModel {
    fn predict(&self, features: &RawFeatureVector) -> Result<f64> {
        let mut z = self.intercept;
        for term in &self.terms {
            let x = features
                .get(&term.feature)
                .with_context(|| format!("feature {} not provided", term.feature))?;
            z += term.coefficient * (x - term.mean) / term.scale;
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}
