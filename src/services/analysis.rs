// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Farm analysis pipeline.
//!
//! Composes the synthetic data generators, the LAI calculator, and the
//! fertilizer advisor into the analysis that runs when a confirmed
//! boundary is handed off:
//! 1. Validate the farm size against the configured limits
//! 2. Generate weather and satellite series for the analysis window
//! 3. Estimate LAI and summarize vegetation health
//! 4. Estimate a soil sample from vegetation and recent weather
//! 5. Produce the fertilizer recommendation the player is scored against

use chrono::{NaiveDate, Utc};
use rand::Rng;

use crate::config::Config;
use crate::models::{FarmAnalysisReport, FarmPolygon, LaiMethod};
use crate::services::advisor::FertilizerAdvisor;
use crate::services::geometry;
use crate::services::lai::LaiCalculator;
use crate::services::synthetic::SyntheticDataService;

/// Errors from the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("farm size {hectares:.2} ha is outside the accepted range [{min}, {max}] ha")]
    FarmSizeOutOfRange { hectares: f64, min: f64, max: f64 },

    #[error("no usable satellite samples in the analysis window")]
    NoSatelliteData,
}

/// Runs the full analysis for a confirmed boundary.
#[derive(Debug, Clone)]
pub struct FarmAnalyzer {
    config: Config,
    synthetic: SyntheticDataService,
    lai: LaiCalculator,
    advisor: FertilizerAdvisor,
}

impl FarmAnalyzer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            synthetic: SyntheticDataService::new(),
            lai: LaiCalculator::new(),
            advisor: FertilizerAdvisor::new(),
        }
    }

    /// Analyze a boundary with the window ending today.
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        polygon: &FarmPolygon,
        rng: &mut R,
    ) -> Result<FarmAnalysisReport, AnalysisError> {
        self.analyze_as_of(polygon, Utc::now().date_naive(), rng)
    }

    /// Analyze a boundary with the window ending at `end_date` (injectable
    /// for reproducible tests).
    pub fn analyze_as_of<R: Rng + ?Sized>(
        &self,
        polygon: &FarmPolygon,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> Result<FarmAnalysisReport, AnalysisError> {
        let area_hectares = geometry::polygon_area_hectares(polygon.corners());
        if area_hectares < self.config.min_farm_hectares
            || area_hectares > self.config.max_farm_hectares
        {
            return Err(AnalysisError::FarmSizeOutOfRange {
                hectares: area_hectares,
                min: self.config.min_farm_hectares,
                max: self.config.max_farm_hectares,
            });
        }

        let centroid = geometry::polygon_centroid(polygon.corners());
        let days = self.config.default_analysis_days;

        tracing::info!(
            latitude = centroid.latitude,
            longitude = centroid.longitude,
            area_hectares,
            days,
            "Analyzing farm boundary"
        );

        let weather = self
            .synthetic
            .weather_series(centroid.latitude, days, end_date, rng);
        let satellite = self.synthetic.satellite_series(centroid, days, end_date, rng);

        let lai_estimates = self.lai.series_estimates(&satellite, LaiMethod::Combined);
        let vegetation = self
            .lai
            .vegetation_summary(&lai_estimates)
            .ok_or(AnalysisError::NoSatelliteData)?;

        let mean_ndvi = satellite.ndvi.iter().sum::<f64>() / satellite.ndvi.len() as f64;
        let recent = &weather[weather.len().saturating_sub(7)..];
        let recent_rainfall: f64 = recent.iter().map(|d| d.rainfall).sum();
        let average_temperature =
            recent.iter().map(|d| d.temperature).sum::<f64>() / recent.len().max(1) as f64;

        let soil = self
            .synthetic
            .soil_profile(mean_ndvi, recent_rainfall, average_temperature, rng);
        let recommendation = self.advisor.recommend(&vegetation, &soil, &weather);

        Ok(FarmAnalysisReport {
            analysis_date: Utc::now(),
            bounds: polygon.bounds(),
            centroid,
            area_hectares,
            weather,
            satellite,
            lai_estimates,
            vegetation,
            soil,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn analyzer() -> FarmAnalyzer {
        FarmAnalyzer::new(Config::default())
    }

    fn farm(side_degrees: f64) -> FarmPolygon {
        FarmPolygon::try_from(vec![
            GeoPoint::new(39.0, -122.0),
            GeoPoint::new(39.0, -122.0 + side_degrees),
            GeoPoint::new(39.0 + side_degrees, -122.0 + side_degrees),
            GeoPoint::new(39.0 + side_degrees, -122.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_analysis_produces_consistent_report() {
        let mut rng = StdRng::seed_from_u64(9);
        let end_date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        let report = analyzer()
            .analyze_as_of(&farm(0.01), end_date, &mut rng)
            .expect("analysis should succeed");

        assert!(report.area_hectares > 0.0);
        assert_eq!(report.weather.len(), 30);
        assert!(!report.satellite.is_empty());
        assert_eq!(report.lai_estimates.len(), report.satellite.len());
        assert!((0.0..=100.0).contains(&report.vegetation.health_score));
        assert!((50.0..=95.0).contains(&report.recommendation.confidence));
    }

    #[test]
    fn test_tiny_farm_is_rejected() {
        let mut rng = StdRng::seed_from_u64(9);
        let end_date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        // A few meters across: well under the 0.1 ha minimum.
        let result = analyzer().analyze_as_of(&farm(0.00002), end_date, &mut rng);
        assert!(matches!(
            result,
            Err(AnalysisError::FarmSizeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_huge_farm_is_rejected() {
        let mut rng = StdRng::seed_from_u64(9);
        let end_date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

        // Roughly a degree across: far beyond the 10,000 ha maximum.
        let result = analyzer().analyze_as_of(&farm(1.0), end_date, &mut rng);
        assert!(matches!(
            result,
            Err(AnalysisError::FarmSizeOutOfRange { .. })
        ));
    }
}
