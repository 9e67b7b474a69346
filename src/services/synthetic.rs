// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Synthetic agronomy data generators.
//!
//! The game has no real data ingestion: weather, vegetation indices, and
//! soil samples are all generated pseudo-randomly with plausible seasonal
//! and latitude-dependent structure. Callers inject the RNG, so tests can
//! seed a `StdRng` for reproducible series.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};

use crate::models::{GeoPoint, SatelliteSeries, SoilProfile, WeatherDay};

/// Chance that a given day has usable (cloud-free) satellite imagery.
const CLEAR_SKY_PROBABILITY: f64 = 0.7;

/// Climate band parameters derived from |latitude|.
struct ClimateBand {
    base_temperature: f64,
    base_humidity: f64,
    rainfall_probability: f64,
}

fn climate_band(latitude: f64) -> ClimateBand {
    let abs_lat = latitude.abs();
    if abs_lat < 23.5 {
        // Tropical
        ClimateBand {
            base_temperature: 28.0,
            base_humidity: 75.0,
            rainfall_probability: 0.4,
        }
    } else if abs_lat < 40.0 {
        // Subtropical
        ClimateBand {
            base_temperature: 22.0,
            base_humidity: 65.0,
            rainfall_probability: 0.3,
        }
    } else if abs_lat < 60.0 {
        // Temperate
        ClimateBand {
            base_temperature: 15.0,
            base_humidity: 60.0,
            rainfall_probability: 0.25,
        }
    } else {
        // Cold
        ClimateBand {
            base_temperature: 5.0,
            base_humidity: 70.0,
            rainfall_probability: 0.2,
        }
    }
}

/// Gaussian sample with a defined fallback to the mean on invalid
/// parameters.
fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    Normal::new(mean, std_dev)
        .map(|dist| dist.sample(rng))
        .unwrap_or(mean)
}

/// Exponential sample with the given mean.
fn exponential<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> f64 {
    Exp::new(1.0 / mean)
        .map(|dist| dist.sample(rng))
        .unwrap_or(mean)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Generators for the synthetic metric streams.
#[derive(Debug, Default, Clone)]
pub struct SyntheticDataService;

impl SyntheticDataService {
    pub fn new() -> Self {
        Self
    }

    /// Daily weather for the `days` up to and including `end_date`.
    ///
    /// Base conditions come from the latitude's climate band, modulated by
    /// an annual sinusoid (flipped in the southern hemisphere) plus
    /// Gaussian jitter; rainfall is exponential on rain days and zero
    /// otherwise.
    pub fn weather_series<R: Rng + ?Sized>(
        &self,
        latitude: f64,
        days: u32,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> Vec<WeatherDay> {
        let band = climate_band(latitude);
        let mut series = Vec::with_capacity(days as usize);

        for i in 0..days {
            let date = end_date - Duration::days(i64::from(days - i - 1));
            let day_of_year = f64::from(date.ordinal());
            let seasonal_factor = (2.0 * std::f64::consts::PI * day_of_year / 365.0).sin();

            let seasonal_temp = if latitude >= 0.0 {
                seasonal_factor * 10.0
            } else {
                -seasonal_factor * 10.0
            };
            let temperature = band.base_temperature + seasonal_temp + gaussian(rng, 0.0, 4.0);

            let humidity = (band.base_humidity + gaussian(rng, 0.0, 15.0)).clamp(20.0, 95.0);

            let rainfall = if rng.random::<f64>() < band.rainfall_probability {
                exponential(rng, 8.0)
            } else {
                0.0
            };

            let wind_speed = gaussian(rng, 8.0, 4.0).max(0.0);

            // Rainy days see less sun.
            let base_solar = 20.0 + seasonal_factor * 10.0;
            let cloud_factor = 1.0 - rainfall / 20.0;
            let solar_radiation = (base_solar * cloud_factor + gaussian(rng, 0.0, 3.0)).max(0.0);

            series.push(WeatherDay {
                date: date.format("%Y-%m-%d").to_string(),
                temperature: round1(temperature),
                humidity: round1(humidity),
                rainfall: round1(rainfall),
                wind_speed: round1(wind_speed),
                solar_radiation: round1(solar_radiation),
            });
        }

        tracing::debug!(latitude, days, "Generated weather series");
        series
    }

    /// Vegetation index series for the window ending at `end_date`.
    ///
    /// Roughly 30% of days drop out to simulated cloud cover, so the
    /// returned series is usually shorter than the window; the date, NDVI,
    /// and EVI vectors stay aligned.
    pub fn satellite_series<R: Rng + ?Sized>(
        &self,
        center: GeoPoint,
        days: u32,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> SatelliteSeries {
        let mut dates = Vec::new();
        let mut ndvi_values = Vec::new();
        let mut evi_values = Vec::new();

        let lat_factor = (center.latitude + 90.0) / 180.0;

        for i in 0..days {
            let date = end_date - Duration::days(i64::from(days - i - 1));
            if rng.random::<f64>() > CLEAR_SKY_PROBABILITY {
                continue;
            }

            let day_of_year = f64::from(date.ordinal());
            let seasonal_factor =
                0.3 * (2.0 * std::f64::consts::PI * day_of_year / 365.0).sin() + 0.5;

            let base_ndvi = 0.2 + seasonal_factor * 0.6 * lat_factor;
            let ndvi = (base_ndvi + gaussian(rng, 0.0, 0.1)).clamp(0.0, 0.9);
            let evi = (ndvi * 0.7 + gaussian(rng, 0.0, 0.05)).clamp(0.0, 0.8);

            dates.push(date.format("%Y-%m-%d").to_string());
            ndvi_values.push(round3(ndvi));
            evi_values.push(round3(evi));
        }

        tracing::debug!(
            requested_days = days,
            clear_days = dates.len(),
            "Generated satellite series"
        );

        SatelliteSeries {
            dates,
            ndvi: ndvi_values,
            evi: evi_values,
            data_source: "Sentinel-2 (simulated)".to_string(),
        }
    }

    /// Soil sample estimated from vegetation and recent weather.
    ///
    /// Lower NDVI skews the nutrient levels downward, mirroring the
    /// assumption that sparse vegetation indicates deficiency.
    pub fn soil_profile<R: Rng + ?Sized>(
        &self,
        mean_ndvi: f64,
        recent_rainfall: f64,
        average_temperature: f64,
        rng: &mut R,
    ) -> SoilProfile {
        let base_moisture = (recent_rainfall * 3.0).min(80.0);
        let temperature_adjustment = ((25.0 - average_temperature) * 2.0).max(0.0);
        let moisture = (base_moisture + temperature_adjustment + gaussian(rng, 0.0, 5.0))
            .max(10.0)
            .clamp(0.0, 100.0);

        SoilProfile {
            moisture: round1(moisture),
            nitrogen: round1((40.0 + mean_ndvi * 60.0 + gaussian(rng, 0.0, 10.0)).max(0.0)),
            phosphorus: round1((25.0 + mean_ndvi * 45.0 + gaussian(rng, 0.0, 8.0)).max(0.0)),
            potassium: round1((35.0 + mean_ndvi * 50.0 + gaussian(rng, 0.0, 12.0)).max(0.0)),
            ph: round1(6.0 + gaussian(rng, 0.0, 0.5)),
            organic_matter: round1(2.0 + gaussian(rng, 0.0, 0.8)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn end_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn test_weather_series_length_and_ranges() {
        let service = SyntheticDataService::new();
        let mut rng = StdRng::seed_from_u64(7);

        let series = service.weather_series(39.0, 30, end_date(), &mut rng);
        assert_eq!(series.len(), 30);
        assert_eq!(series.first().unwrap().date, "2025-06-01");
        assert_eq!(series.last().unwrap().date, "2025-06-30");

        for day in &series {
            assert!((20.0..=95.0).contains(&day.humidity));
            assert!(day.rainfall >= 0.0);
            assert!(day.wind_speed >= 0.0);
            assert!(day.solar_radiation >= 0.0);
        }
    }

    #[test]
    fn test_weather_series_is_seed_reproducible() {
        let service = SyntheticDataService::new();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        let series_a = service.weather_series(12.0, 10, end_date(), &mut a);
        let series_b = service.weather_series(12.0, 10, end_date(), &mut b);
        assert_eq!(series_a, series_b);
    }

    #[test]
    fn test_satellite_series_ranges_and_alignment() {
        let service = SyntheticDataService::new();
        let mut rng = StdRng::seed_from_u64(3);

        let series = service.satellite_series(GeoPoint::new(40.0, -100.0), 60, end_date(), &mut rng);

        // Cloud dropout keeps some days but never adds extras.
        assert!(!series.is_empty());
        assert!(series.len() <= 60);
        assert_eq!(series.dates.len(), series.ndvi.len());
        assert_eq!(series.dates.len(), series.evi.len());

        for (&ndvi, &evi) in series.ndvi.iter().zip(&series.evi) {
            assert!((0.0..=0.9).contains(&ndvi));
            assert!((0.0..=0.8).contains(&evi));
        }
    }

    #[test]
    fn test_soil_profile_ranges() {
        let service = SyntheticDataService::new();
        let mut rng = StdRng::seed_from_u64(11);

        let soil = service.soil_profile(0.5, 12.0, 22.0, &mut rng);
        assert!((0.0..=100.0).contains(&soil.moisture));
        assert!(soil.nitrogen >= 0.0);
        assert!(soil.phosphorus >= 0.0);
        assert!(soil.potassium >= 0.0);
        assert!(soil.ph > 3.0 && soil.ph < 9.0);
    }

    #[test]
    fn test_tropical_runs_warmer_than_cold_band() {
        let service = SyntheticDataService::new();
        let mut rng = StdRng::seed_from_u64(5);

        let tropical = service.weather_series(5.0, 30, end_date(), &mut rng);
        let cold = service.weather_series(70.0, 30, end_date(), &mut rng);

        let mean = |series: &[WeatherDay]| {
            series.iter().map(|d| d.temperature).sum::<f64>() / series.len() as f64
        };
        assert!(mean(&tropical) > mean(&cold));
    }
}
