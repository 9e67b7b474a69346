// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every error in this crate is local and recoverable - nothing here is
//! fatal to the surrounding application. Module-level errors (selection,
//! configuration, geometry) convert into the aggregate [`AppError`] for
//! callers that want a single error type.

use crate::config::ConfigError;
use crate::models::PolygonError;
use crate::services::analysis::AnalysisError;
use crate::services::selection::SelectionError;

/// Aggregate application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Invalid boundary: {0}")]
    Polygon(#[from] PolygonError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for fallible crate operations
pub type Result<T> = std::result::Result<T, AppError>;
