// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - game logic layer.

pub mod advisor;
pub mod analysis;
pub mod geometry;
pub mod interaction;
pub mod lai;
pub mod registry;
pub mod selection;
pub mod synthetic;
pub mod zone;

pub use advisor::FertilizerAdvisor;
pub use analysis::{AnalysisError, FarmAnalyzer};
pub use interaction::{InteractionController, Key, PointerDownOutcome};
pub use lai::LaiCalculator;
pub use registry::{CompletedAreaRegistry, RegistrySnapshot};
pub use selection::{
    PreviewShape, SelectionError, SelectionMachine, SelectionPrompt, SelectionState,
    SelectionUpdate,
};
pub use synthetic::SyntheticDataService;
pub use zone::ZoneClassifier;
