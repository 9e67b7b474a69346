// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule-based fertilizer recommendation.
//!
//! Combines vegetation status, soil nutrients, and recent weather into the
//! canned recommendation the player's decision is scored against. Always
//! produces an answer - missing inputs degrade to a conservative fallback
//! instead of failing.

use crate::models::{FertilizerAdvice, SoilProfile, Trend, VegetationSummary, WeatherDay};

/// LAI thresholds for vegetation status.
const LAI_LOW: f64 = 2.5;
const LAI_OPTIMAL: f64 = 4.0;
const LAI_HIGH: f64 = 6.0;

/// ppm thresholds marking the "low" band per nutrient.
const NITROGEN_LOW: f64 = 50.0;
const PHOSPHORUS_LOW: f64 = 30.0;

/// ppm targets used to size the application rate.
const NITROGEN_OPTIMAL: f64 = 80.0;
const PHOSPHORUS_OPTIMAL: f64 = 50.0;
const POTASSIUM_OPTIMAL: f64 = 70.0;

/// Weather aggregates over the last seven days.
#[derive(Debug, Clone, Copy)]
struct RecentWeather {
    rainfall: f64,
    temperature: f64,
    humidity: f64,
}

impl RecentWeather {
    fn from_days(days: &[WeatherDay]) -> Option<Self> {
        let recent = &days[days.len().saturating_sub(7)..];
        if recent.is_empty() {
            return None;
        }

        let n = recent.len() as f64;
        Some(Self {
            rainfall: recent.iter().map(|d| d.rainfall).sum(),
            temperature: recent.iter().map(|d| d.temperature).sum::<f64>() / n,
            humidity: recent.iter().map(|d| d.humidity).sum::<f64>() / n,
        })
    }
}

/// Generates fertilizer recommendations.
#[derive(Debug, Default, Clone)]
pub struct FertilizerAdvisor;

impl FertilizerAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Build a recommendation from the analysis results.
    ///
    /// `weather` is the daily series for the analysis window; only the
    /// last seven days influence application conditions.
    pub fn recommend(
        &self,
        vegetation: &VegetationSummary,
        soil: &SoilProfile,
        weather: &[WeatherDay],
    ) -> FertilizerAdvice {
        let Some(recent) = RecentWeather::from_days(weather) else {
            tracing::warn!("No weather data available, returning fallback recommendation");
            return Self::fallback();
        };

        let mut factors: Vec<String> = Vec::new();
        let mut confidence: f64 = 70.0;
        let mut needs_fertilizer = false;

        // Vegetation health factor.
        let current_lai = vegetation.current_lai;
        if current_lai < LAI_LOW {
            needs_fertilizer = true;
            factors.push(format!(
                "Low LAI ({current_lai:.2}) indicates poor vegetation health"
            ));
            confidence += 15.0;
        } else if current_lai < LAI_OPTIMAL {
            needs_fertilizer = true;
            factors.push(format!(
                "Moderate LAI ({current_lai:.2}) suggests room for improvement"
            ));
            confidence += 10.0;
        } else {
            factors.push(format!(
                "Good LAI ({current_lai:.2}) indicates healthy vegetation"
            ));
            confidence += 5.0;
        }

        // Soil nutrient factors.
        let mut soil_factors: Vec<&str> = Vec::new();
        if soil.nitrogen < NITROGEN_LOW {
            needs_fertilizer = true;
            soil_factors.push("low nitrogen");
            confidence += 12.0;
        }
        if soil.phosphorus < PHOSPHORUS_LOW {
            needs_fertilizer = true;
            soil_factors.push("low phosphorus");
            confidence += 8.0;
        }
        if !soil_factors.is_empty() {
            factors.push(format!("Soil analysis shows {}", soil_factors.join(", ")));
        }

        // Weather factors.
        if recent.rainfall > 20.0 {
            factors.push("Recent rainfall provides good conditions for nutrient uptake".to_string());
            confidence += 8.0;
        } else if recent.rainfall < 5.0 {
            factors.push("Low recent rainfall may reduce fertilizer effectiveness".to_string());
            confidence -= 5.0;
        }

        // Trend factor.
        if vegetation.trend == Trend::Decreasing {
            needs_fertilizer = true;
            factors.push("Declining vegetation trend suggests intervention needed".to_string());
            confidence += 10.0;
        }

        // Excellent vegetation overrides everything else.
        if current_lai > LAI_HIGH {
            needs_fertilizer = false;
            factors.push("Excellent vegetation health - fertilizer may not be necessary".to_string());
            confidence = confidence.max(80.0);
        }

        let (fertilizer_type, application_rate) = Self::fertilizer_type_and_rate(soil);
        let timing = Self::application_timing(&recent);
        let expected_benefit = Self::expected_benefit(current_lai, needs_fertilizer);

        let advice = FertilizerAdvice {
            needs_fertilizer,
            confidence: confidence.clamp(50.0, 95.0),
            reasoning: format!("{}.", factors.join(". ")),
            fertilizer_type: needs_fertilizer.then_some(fertilizer_type),
            application_rate: needs_fertilizer.then_some(application_rate),
            timing: needs_fertilizer.then_some(timing),
            expected_benefit,
        };

        tracing::info!(
            needs_fertilizer = advice.needs_fertilizer,
            confidence = advice.confidence,
            "Generated fertilizer recommendation"
        );
        advice
    }

    /// Pick the product class by the largest nutrient deficit and size the
    /// rate to that deficit.
    fn fertilizer_type_and_rate(soil: &SoilProfile) -> (String, f64) {
        let n_deficit = (NITROGEN_OPTIMAL - soil.nitrogen).max(0.0);
        let p_deficit = (PHOSPHORUS_OPTIMAL - soil.phosphorus).max(0.0);
        let k_deficit = (POTASSIUM_OPTIMAL - soil.potassium).max(0.0);

        if n_deficit > p_deficit && n_deficit > k_deficit {
            (
                "Nitrogen-rich (e.g., Urea 46-0-0)".to_string(),
                (50.0 + n_deficit * 2.0).min(150.0).round(),
            )
        } else if p_deficit > k_deficit {
            (
                "Phosphorus-rich (e.g., DAP 18-46-0)".to_string(),
                (30.0 + p_deficit * 1.5).min(100.0).round(),
            )
        } else if k_deficit > 10.0 {
            (
                "Potassium-rich (e.g., MOP 0-0-60)".to_string(),
                (40.0 + k_deficit * 1.8).min(120.0).round(),
            )
        } else {
            ("Balanced NPK (e.g., 15-15-15)".to_string(), 75.0)
        }
    }

    /// Timing guidance from application-condition suitability.
    fn application_timing(recent: &RecentWeather) -> String {
        let suitable = [
            (10.0..=30.0).contains(&recent.temperature),
            (5.0..=25.0).contains(&recent.rainfall),
            recent.humidity >= 40.0,
        ]
        .iter()
        .filter(|&&ok| ok)
        .count();

        if suitable >= 3 {
            "Apply immediately - conditions are optimal".to_string()
        } else if suitable >= 2 {
            "Apply in 1-2 days when conditions improve".to_string()
        } else {
            "Wait for better weather conditions (less wind, moderate rainfall expected)".to_string()
        }
    }

    fn expected_benefit(current_lai: f64, needs_fertilizer: bool) -> String {
        if !needs_fertilizer {
            return "No significant benefit expected - vegetation is already healthy".to_string();
        }

        if current_lai < 1.5 {
            "Significant improvement expected - LAI could increase by 1.0-2.0 points".to_string()
        } else if current_lai < 2.5 {
            "Moderate improvement expected - LAI could increase by 0.5-1.0 points".to_string()
        } else {
            "Minor improvement expected - LAI could increase by 0.2-0.5 points".to_string()
        }
    }

    /// Conservative answer when the analysis inputs are unusable.
    fn fallback() -> FertilizerAdvice {
        FertilizerAdvice {
            needs_fertilizer: false,
            confidence: 50.0,
            reasoning: "Unable to complete full analysis. Manual inspection recommended."
                .to_string(),
            fertilizer_type: None,
            application_rate: None,
            timing: None,
            expected_benefit: "Analysis incomplete".to_string(),
        }
    }
}
