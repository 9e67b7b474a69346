// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure geodesic helpers for farm boundary geometry.
//!
//! The area formula is the spherical-excess correction of the planar
//! shoelace formula. It is adequate for small-extent polygons (city-block
//! to multi-hectare scale) and NOT valid for country-scale areas; callers
//! must not extend its use beyond farm-plot sizes.

use crate::models::{GeoBounds, GeoPoint};

/// WGS84 equatorial Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Enclosed area of a boundary ring in hectares.
///
/// Accumulates `(lon2 - lon1) * (2 + sin(lat1) + sin(lat2))` in radians over
/// consecutive vertex pairs (the ring is closed implicitly), scales by
/// `R^2 / 2`, and takes the absolute value, so both traversal directions
/// yield the same area.
///
/// Degenerate input (fewer than 3 points, or any non-finite coordinate)
/// returns `0.0` rather than propagating NaN.
pub fn polygon_area_hectares(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
        return 0.0;
    }

    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        sum += (b.longitude - a.longitude).to_radians()
            * (2.0 + a.latitude.to_radians().sin() + b.latitude.to_radians().sin());
    }

    let square_meters = (sum * EARTH_RADIUS_METERS * EARTH_RADIUS_METERS / 2.0).abs();
    square_meters / SQUARE_METERS_PER_HECTARE
}

/// Coordinate-wise mean of the boundary vertices.
///
/// Deliberately the simple averaging centroid, not the area-weighted one:
/// dedup keys and zone classification are built around this mean, so
/// "fixing" it would change identity of previously analyzed areas.
///
/// Non-finite vertices are skipped; if nothing usable remains, returns the
/// origin as a defined fallback.
pub fn polygon_centroid(points: &[GeoPoint]) -> GeoPoint {
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut count = 0usize;

    for p in points.iter().filter(|p| p.is_finite()) {
        lat_sum += p.latitude;
        lon_sum += p.longitude;
        count += 1;
    }

    if count == 0 {
        return GeoPoint::new(0.0, 0.0);
    }

    GeoPoint::new(lat_sum / count as f64, lon_sum / count as f64)
}

/// Inclusive membership test against an axis-aligned rectangle.
///
/// All four edges count as inside. NaN coordinates compare false on every
/// bound and therefore classify as outside.
pub fn rect_contains(point: &GeoPoint, bounds: &GeoBounds) -> bool {
    point.latitude >= bounds.south
        && point.latitude <= bounds.north
        && point.longitude >= bounds.west
        && point.longitude <= bounds.east
}
