// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaf Area Index estimation from satellite vegetation indices.
//!
//! Implements the standard empirical relationships: an exponential
//! light-extinction model, a linear regression model, an EVI power model,
//! and a confidence-weighted blend of the three.

use crate::models::{
    HealthStatus, LaiEstimate, LaiMethod, SatelliteSeries, Trend, VegetationSummary,
};

/// Light extinction coefficient for the exponential model (crop-generic).
const EXTINCTION_COEFFICIENT: f64 = 0.5;

/// Upper bound for plausible crop LAI.
const MAX_LAI: f64 = 8.0;

/// LAI estimator over satellite index series.
#[derive(Debug, Default, Clone)]
pub struct LaiCalculator;

impl LaiCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate LAI for a single NDVI/EVI sample.
    pub fn estimate(&self, method: LaiMethod, ndvi: f64, evi: Option<f64>) -> LaiEstimate {
        let (lai, confidence) = match method {
            LaiMethod::NdviExponential => Self::from_ndvi_exponential(ndvi),
            LaiMethod::NdviLinear => Self::from_ndvi_linear(ndvi),
            LaiMethod::EviBased => Self::from_evi(ndvi, evi),
            LaiMethod::Combined => Self::combined(ndvi, evi),
        };

        LaiEstimate {
            date: String::new(),
            lai,
            confidence,
            method,
            ndvi: Some(ndvi),
            evi,
        }
    }

    /// Estimate LAI for every sample in a satellite series.
    pub fn series_estimates(&self, series: &SatelliteSeries, method: LaiMethod) -> Vec<LaiEstimate> {
        if series.is_empty() {
            tracing::warn!("No satellite samples available for LAI estimation");
            return Vec::new();
        }

        series
            .dates
            .iter()
            .zip(&series.ndvi)
            .enumerate()
            .map(|(i, (date, &ndvi))| {
                let evi = series.evi.get(i).copied();
                let mut estimate = self.estimate(method, ndvi, evi);
                estimate.date = date.clone();
                estimate
            })
            .collect()
    }

    /// Vegetation health summary over a LAI series.
    ///
    /// Current value is the last estimate; the mean and variability cover
    /// the most recent seven estimates; the trend is the regression slope
    /// of the last three (|slope| <= 0.1 counts as stable).
    pub fn vegetation_summary(&self, estimates: &[LaiEstimate]) -> Option<VegetationSummary> {
        let current = estimates.last()?;

        let recent: Vec<f64> = estimates
            .iter()
            .rev()
            .take(7)
            .map(|e| e.lai)
            .collect();
        let mean_lai = recent.iter().sum::<f64>() / recent.len() as f64;
        let variability = std_deviation(&recent);

        let trend = if estimates.len() >= 3 {
            let tail: Vec<f64> = estimates[estimates.len() - 3..].iter().map(|e| e.lai).collect();
            match regression_slope(&tail) {
                slope if slope > 0.1 => Trend::Increasing,
                slope if slope < -0.1 => Trend::Decreasing,
                _ => Trend::Stable,
            }
        } else {
            Trend::Unknown
        };

        let (health_status, health_score) = classify_lai_health(current.lai);

        Some(VegetationSummary {
            current_lai: current.lai,
            mean_lai,
            trend,
            health_status,
            health_score,
            variability,
        })
    }

    /// `LAI = -ln(1 - NDVI) / k`; zero LAI and zero confidence for
    /// non-vegetated input (NDVI <= 0).
    fn from_ndvi_exponential(ndvi: f64) -> (f64, f64) {
        if ndvi <= 0.0 {
            return (0.0, 0.0);
        }

        let lai = -(1.0 - ndvi.min(0.95)).ln() / EXTINCTION_COEFFICIENT;
        (lai.max(0.0), confidence_for(ndvi) * 0.9)
    }

    /// `LAI = 6.0 * NDVI - 1.2`, clamped to the plausible range.
    fn from_ndvi_linear(ndvi: f64) -> (f64, f64) {
        let lai = (6.0 * ndvi - 1.2).clamp(0.0, MAX_LAI);
        (lai, confidence_for(ndvi))
    }

    /// `LAI = 3.618 * EVI^2`. EVI is approximated as 0.7 * NDVI when the
    /// blue band was unavailable. EVI is less sensitive to atmosphere and
    /// soil background, so its confidence gets a 1.1x boost.
    fn from_evi(ndvi: f64, evi: Option<f64>) -> (f64, f64) {
        let evi = evi.unwrap_or(ndvi * 0.7);
        let lai = (3.618 * evi * evi).clamp(0.0, MAX_LAI);
        let confidence = (confidence_for(evi) * 1.1).min(100.0);
        (lai, confidence)
    }

    /// Confidence-weighted average of the individual methods.
    fn combined(ndvi: f64, evi: Option<f64>) -> (f64, f64) {
        let (lai_exp, conf_exp) = Self::from_ndvi_exponential(ndvi);
        let (lai_lin, conf_lin) = Self::from_ndvi_linear(ndvi);

        match evi {
            Some(_) => {
                let (lai_evi, conf_evi) = Self::from_evi(ndvi, evi);
                let weights = [conf_exp, conf_lin, conf_evi];
                let values = [lai_exp, lai_lin, lai_evi];
                let total_weight: f64 = weights.iter().sum();

                if total_weight > 0.0 {
                    let lai = weights
                        .iter()
                        .zip(&values)
                        .map(|(w, v)| w * v)
                        .sum::<f64>()
                        / total_weight;
                    (lai, total_weight / 3.0)
                } else {
                    (values.iter().sum::<f64>() / 3.0, 50.0)
                }
            }
            None => ((lai_exp + lai_lin) / 2.0, (conf_exp + conf_lin) / 2.0),
        }
    }
}

/// Confidence score for an index value: low at the extremes where the
/// empirical relationships are weakest, clamped to [20, 95].
fn confidence_for(index_value: f64) -> f64 {
    let confidence = if index_value < 0.1 {
        30.0
    } else if index_value < 0.2 {
        50.0
    } else if index_value < 0.8 {
        70.0 + (index_value - 0.2) * 30.0
    } else {
        70.0 - (index_value - 0.8) * 50.0
    };
    confidence.clamp(20.0, 95.0)
}

/// Health bands over LAI with the banded score mapping.
fn classify_lai_health(lai: f64) -> (HealthStatus, f64) {
    if lai < 1.5 {
        (HealthStatus::Poor, 20.0)
    } else if lai < 2.5 {
        (HealthStatus::Poor, 40.0)
    } else if lai < 4.0 {
        (HealthStatus::Moderate, 60.0)
    } else if lai < 6.0 {
        (HealthStatus::Good, 80.0)
    } else {
        (HealthStatus::Excellent, 95.0)
    }
}

/// Least-squares slope over equally spaced samples.
fn regression_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }

    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn std_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> LaiCalculator {
        LaiCalculator::new()
    }

    #[test]
    fn test_linear_method_known_value() {
        let estimate = calc().estimate(LaiMethod::NdviLinear, 0.5, None);
        assert!((estimate.lai - 1.8).abs() < 1e-9);
        assert!(estimate.confidence > 0.0);
    }

    #[test]
    fn test_linear_method_clamps() {
        // Very low NDVI clamps to zero rather than going negative.
        let estimate = calc().estimate(LaiMethod::NdviLinear, 0.1, None);
        assert_eq!(estimate.lai, 0.0);
    }

    #[test]
    fn test_exponential_zero_for_bare_soil() {
        let estimate = calc().estimate(LaiMethod::NdviExponential, -0.1, None);
        assert_eq!(estimate.lai, 0.0);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_exponential_grows_with_ndvi() {
        let low = calc().estimate(LaiMethod::NdviExponential, 0.3, None);
        let high = calc().estimate(LaiMethod::NdviExponential, 0.7, None);
        assert!(high.lai > low.lai);
    }

    #[test]
    fn test_evi_method_estimates_missing_evi() {
        let with_evi = calc().estimate(LaiMethod::EviBased, 0.6, Some(0.42));
        let without_evi = calc().estimate(LaiMethod::EviBased, 0.6, None);
        // 0.7 * 0.6 = 0.42, so both paths agree.
        assert!((with_evi.lai - without_evi.lai).abs() < 1e-9);
    }

    #[test]
    fn test_combined_is_within_component_range() {
        let ndvi = 0.55;
        let evi = Some(0.4);
        let exp = calc().estimate(LaiMethod::NdviExponential, ndvi, evi).lai;
        let lin = calc().estimate(LaiMethod::NdviLinear, ndvi, evi).lai;
        let evi_lai = calc().estimate(LaiMethod::EviBased, ndvi, evi).lai;
        let combined = calc().estimate(LaiMethod::Combined, ndvi, evi).lai;

        let min = exp.min(lin).min(evi_lai);
        let max = exp.max(lin).max(evi_lai);
        assert!(combined >= min && combined <= max);
    }

    #[test]
    fn test_series_estimates_carry_dates() {
        let series = SatelliteSeries {
            dates: vec!["2025-06-01".to_string(), "2025-06-03".to_string()],
            ndvi: vec![0.4, 0.6],
            evi: vec![0.28, 0.42],
            data_source: "test".to_string(),
        };

        let estimates = calc().series_estimates(&series, LaiMethod::Combined);
        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0].date, "2025-06-01");
        assert_eq!(estimates[1].ndvi, Some(0.6));
    }

    #[test]
    fn test_vegetation_summary_trend_and_bands() {
        let make = |lai: f64| LaiEstimate {
            date: String::new(),
            lai,
            confidence: 80.0,
            method: LaiMethod::Combined,
            ndvi: None,
            evi: None,
        };

        let increasing: Vec<_> = [1.0, 1.5, 2.0, 2.5, 3.0].map(make).to_vec();
        let summary = calc().vegetation_summary(&increasing).unwrap();
        assert_eq!(summary.trend, Trend::Increasing);
        assert_eq!(summary.health_status, HealthStatus::Moderate);
        assert_eq!(summary.current_lai, 3.0);

        let declining: Vec<_> = [5.0, 4.0, 3.0].map(make).to_vec();
        let summary = calc().vegetation_summary(&declining).unwrap();
        assert_eq!(summary.trend, Trend::Decreasing);

        let short: Vec<_> = [2.0, 2.0].map(make).to_vec();
        let summary = calc().vegetation_summary(&short).unwrap();
        assert_eq!(summary.trend, Trend::Unknown);

        assert!(calc().vegetation_summary(&[]).is_none());
    }

    #[test]
    fn test_health_band_thresholds() {
        assert_eq!(classify_lai_health(1.0).0, HealthStatus::Poor);
        assert_eq!(classify_lai_health(3.0).0, HealthStatus::Moderate);
        assert_eq!(classify_lai_health(4.5).0, HealthStatus::Good);
        assert_eq!(classify_lai_health(6.5).0, HealthStatus::Excellent);
    }

    #[test]
    fn test_confidence_low_at_extremes() {
        assert!(confidence_for(0.05) < confidence_for(0.5));
        assert!(confidence_for(0.95) < confidence_for(0.5));
        let mid = confidence_for(0.5);
        assert!((20.0..=95.0).contains(&mid));
    }
}
