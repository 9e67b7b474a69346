// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agronomy analysis models: weather, satellite indices, LAI, soil, and
//! fertilizer recommendations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::geo::{GeoBounds, GeoPoint};

/// One day of (synthetic) weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Rainfall in millimeters
    pub rainfall: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Solar radiation in MJ/m^2/day
    pub solar_radiation: f64,
}

/// A time series of satellite vegetation indices.
///
/// The three vectors are index-aligned; days lost to cloud cover are
/// simply absent, so the series may be shorter than the requested window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSeries {
    /// Acquisition dates (YYYY-MM-DD)
    pub dates: Vec<String>,
    /// NDVI per date, in [0, 0.9]
    pub ndvi: Vec<f64>,
    /// EVI per date, in [0, 0.8]
    pub evi: Vec<f64>,
    /// Label of the producing source
    pub data_source: String,
}

impl SatelliteSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// LAI estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaiMethod {
    /// `LAI = -ln(1 - NDVI) / k`
    NdviExponential,
    /// `LAI = 6.0 * NDVI - 1.2`, clamped
    NdviLinear,
    /// `LAI = 3.618 * EVI^2`, clamped
    EviBased,
    /// Confidence-weighted blend of the other methods
    Combined,
}

/// One LAI estimate with its inputs and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaiEstimate {
    /// Date of the underlying satellite sample (YYYY-MM-DD)
    pub date: String,
    /// Leaf area index, clamped to [0, 8]
    pub lai: f64,
    /// Confidence in percent
    pub confidence: f64,
    /// Method that produced this estimate
    pub method: LaiMethod,
    /// NDVI input
    pub ndvi: Option<f64>,
    /// EVI input
    pub evi: Option<f64>,
}

/// Soil analysis sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    /// Volumetric moisture in percent
    pub moisture: f64,
    /// Nitrogen in ppm
    pub nitrogen: f64,
    /// Phosphorus in ppm
    pub phosphorus: f64,
    /// Potassium in ppm
    pub potassium: f64,
    /// pH
    pub ph: f64,
    /// Organic matter in percent
    pub organic_matter: f64,
}

/// Direction of a vegetation index over the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    Unknown,
}

/// Banded vegetation health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Poor,
    Moderate,
    Good,
    Excellent,
}

/// Vegetation health summary over an NDVI series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationSummary {
    /// Most recent LAI estimate
    pub current_lai: f64,
    /// Mean LAI over the window
    pub mean_lai: f64,
    /// Trend of the series
    pub trend: Trend,
    /// Banded health status
    pub health_status: HealthStatus,
    /// Health score in [0, 100]
    pub health_score: f64,
    /// Standard deviation of the series
    pub variability: f64,
}

/// Complete analysis produced for a confirmed farm boundary.
///
/// This is the payload the decision UI presents before the player commits
/// to a fertilizer choice; the recommendation inside is what the choice is
/// scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmAnalysisReport {
    /// When the analysis ran
    pub analysis_date: DateTime<Utc>,
    /// Bounding box of the analyzed boundary
    pub bounds: GeoBounds,
    /// Centroid of the analyzed boundary
    pub centroid: GeoPoint,
    /// Enclosed area in hectares
    pub area_hectares: f64,
    /// Daily weather over the analysis window
    pub weather: Vec<WeatherDay>,
    /// Satellite index series over the window
    pub satellite: SatelliteSeries,
    /// Per-sample LAI estimates
    pub lai_estimates: Vec<LaiEstimate>,
    /// Vegetation health summary
    pub vegetation: VegetationSummary,
    /// Soil sample
    pub soil: SoilProfile,
    /// The canned recommendation the player is scored against
    pub recommendation: FertilizerAdvice,
}

/// Rule-based fertilizer recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerAdvice {
    pub needs_fertilizer: bool,
    /// Confidence in percent, clamped to [50, 95]
    pub confidence: f64,
    /// Human-readable reasoning assembled from the decision factors
    pub reasoning: String,
    /// Recommended product class, when fertilizer is needed
    pub fertilizer_type: Option<String>,
    /// Application rate in kg/ha, when fertilizer is needed
    pub application_rate: Option<f64>,
    /// Timing guidance, when fertilizer is needed
    pub timing: Option<String>,
    /// Expected benefit description
    pub expected_benefit: String,
}
