// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use agrisim::models::{FarmPolygon, GeoPoint};

/// Initialize tracing output for tests, gated on `RUST_LOG`. Safe to call
/// from every test; only the first call installs the subscriber.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Build a small square farm boundary with its south-west corner at the
/// given coordinate.
#[allow(dead_code)]
pub fn square_farm(south: f64, west: f64, side_degrees: f64) -> FarmPolygon {
    FarmPolygon::try_from(vec![
        GeoPoint::new(south, west),
        GeoPoint::new(south, west + side_degrees),
        GeoPoint::new(south + side_degrees, west + side_degrees),
        GeoPoint::new(south + side_degrees, west),
    ])
    .expect("four corners")
}

/// The Midtown Manhattan test boundary used by the end-to-end scenario.
#[allow(dead_code)]
pub fn midtown_corners() -> [GeoPoint; 4] {
    [
        GeoPoint::new(40.7590, -73.9850),
        GeoPoint::new(40.7590, -73.9800),
        GeoPoint::new(40.7550, -73.9800),
        GeoPoint::new(40.7550, -73.9850),
    ]
}
