// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod analysis;
pub mod area;
pub mod geo;
pub mod stats;

pub use analysis::{
    FarmAnalysisReport, FertilizerAdvice, HealthStatus, LaiEstimate, LaiMethod, SatelliteSeries,
    SoilProfile, Trend, VegetationSummary, WeatherDay,
};
pub use area::AnalyzedArea;
pub use geo::{FarmPolygon, GeoBounds, GeoPoint, PolygonError, FARM_CORNERS};
pub use stats::RegistryStats;
