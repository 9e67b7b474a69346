// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive farm boundary drafting state machine.
//!
//! Drives the point-by-point quadrilateral drawing interaction:
//! `Idle -> Drafting(1..=3 corners) -> Complete`, with cancellation back to
//! `Idle` from any non-Idle state. The machine is pure state - it emits
//! render instructions ([`SelectionUpdate`]) and never touches a rendering
//! surface itself; the interaction adapter translates those instructions
//! into [`crate::surface::MapSurface`] calls.

use crate::models::{FarmPolygon, GeoPoint, FARM_CORNERS};

/// Discrete states of the drawing interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No draft in progress.
    Idle,
    /// 1-3 corners placed.
    Drafting,
    /// All four corners placed, awaiting explicit confirmation.
    Complete,
}

/// Preview geometry the adapter should render after a transition.
///
/// The shape includes the speculative pointer position while drafting, but
/// speculative points are never part of the committed corner list.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewShape {
    /// A single placed corner.
    Point(GeoPoint),
    /// A two-point segment.
    Line(Vec<GeoPoint>),
    /// A 3-4 point boundary outline.
    Outline(Vec<GeoPoint>),
}

/// User-facing prompt accompanying a preview update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPrompt {
    /// Ask the player to place the next corner.
    PlaceCorner { next: usize },
    /// All corners placed; ask for explicit confirmation. Finalizing is a
    /// separate step so the player can review the shape before committing.
    ConfirmReady,
}

impl SelectionPrompt {
    /// Display text for the prompt.
    pub fn message(&self) -> String {
        match self {
            SelectionPrompt::PlaceCorner { next } => {
                format!("Place corner {next} of {FARM_CORNERS}")
            }
            SelectionPrompt::ConfirmReady => {
                "Boundary complete - confirm to analyze, or press Escape to cancel".to_string()
            }
        }
    }
}

/// Render instruction emitted by a successful transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionUpdate {
    pub shape: PreviewShape,
    pub prompt: SelectionPrompt,
}

/// Rejected transitions. Invalid calls are signaled, never silently coerced
/// into a valid state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("a boundary draft is already in progress")]
    AlreadyDrafting,

    #[error("no boundary draft in progress")]
    NotDrafting,

    #[error("boundary already has {FARM_CORNERS} corners; confirm or cancel")]
    DraftFull,

    #[error("cannot confirm with {placed} of {FARM_CORNERS} corners placed")]
    Incomplete { placed: usize },
}

/// Multi-click polygon drafting state machine.
///
/// Corners are stored and traversed in placement order. The area formula is
/// winding-insensitive, but re-rendering the exact drawn shape depends on
/// this ordering, so it is never normalized or sorted.
#[derive(Debug, Default)]
pub struct SelectionMachine {
    points: Vec<GeoPoint>,
    preview_point: Option<GeoPoint>,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match self.points.len() {
            0 => SelectionState::Idle,
            FARM_CORNERS => SelectionState::Complete,
            _ => SelectionState::Drafting,
        }
    }

    /// Committed corners, in placement order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Start a draft with the first corner. Valid only from `Idle`.
    pub fn begin(&mut self, first_point: GeoPoint) -> Result<SelectionUpdate, SelectionError> {
        if self.state() != SelectionState::Idle {
            return Err(SelectionError::AlreadyDrafting);
        }

        self.points.push(first_point);
        tracing::debug!(
            latitude = first_point.latitude,
            longitude = first_point.longitude,
            "Boundary draft started"
        );

        Ok(SelectionUpdate {
            shape: PreviewShape::Point(first_point),
            prompt: SelectionPrompt::PlaceCorner { next: 2 },
        })
    }

    /// Commit the next corner. Valid while fewer than four corners are
    /// placed; the fourth corner transitions to `Complete` and asks for
    /// explicit confirmation instead of auto-finalizing.
    pub fn add_point(&mut self, point: GeoPoint) -> Result<SelectionUpdate, SelectionError> {
        match self.state() {
            SelectionState::Idle => return Err(SelectionError::NotDrafting),
            SelectionState::Complete => return Err(SelectionError::DraftFull),
            SelectionState::Drafting => {}
        }

        self.points.push(point);
        // The previous pointer position is stale once a corner commits.
        self.preview_point = None;

        let prompt = if self.points.len() == FARM_CORNERS {
            SelectionPrompt::ConfirmReady
        } else {
            SelectionPrompt::PlaceCorner {
                next: self.points.len() + 1,
            }
        };

        Ok(SelectionUpdate {
            shape: Self::shape_for(&self.points, None),
            prompt,
        })
    }

    /// Replace the speculative pointer position used only for rendering.
    ///
    /// Valid while 1-3 corners are committed. The preview point never
    /// enters the final polygon.
    pub fn update_preview(&mut self, point: GeoPoint) -> Result<SelectionUpdate, SelectionError> {
        match self.state() {
            SelectionState::Idle => return Err(SelectionError::NotDrafting),
            SelectionState::Complete => return Err(SelectionError::DraftFull),
            SelectionState::Drafting => {}
        }

        self.preview_point = Some(point);

        let prompt = SelectionPrompt::PlaceCorner {
            next: self.points.len() + 1,
        };

        Ok(SelectionUpdate {
            shape: Self::shape_for(&self.points, self.preview_point),
            prompt,
        })
    }

    /// Finalize the draft into an owned polygon and return to `Idle`.
    ///
    /// Rejected unless all four corners are placed - confirming early is a
    /// caller error, not an implicit finalization with fewer points.
    pub fn confirm(&mut self) -> Result<FarmPolygon, SelectionError> {
        if self.state() != SelectionState::Complete {
            return Err(SelectionError::Incomplete {
                placed: self.points.len(),
            });
        }

        let points = std::mem::take(&mut self.points);
        self.preview_point = None;

        // Length was checked above, so the conversion cannot fail; map the
        // impossible branch to the matching error rather than unwrapping.
        let placed = points.len();
        FarmPolygon::try_from(points).map_err(|_| SelectionError::Incomplete { placed })
    }

    /// Discard the draft and return to `Idle`.
    ///
    /// Returns `true` if a draft was discarded. Calling on an `Idle`
    /// machine is an idempotent no-op.
    pub fn cancel(&mut self) -> bool {
        let had_draft = !self.points.is_empty() || self.preview_point.is_some();
        if had_draft {
            tracing::debug!(corners = self.points.len(), "Boundary draft cancelled");
        }
        self.points.clear();
        self.preview_point = None;
        had_draft
    }

    fn shape_for(committed: &[GeoPoint], preview: Option<GeoPoint>) -> PreviewShape {
        let mut points = committed.to_vec();
        if let Some(p) = preview {
            points.push(p);
        }

        match points.len() {
            0 | 1 => PreviewShape::Point(points.first().copied().unwrap_or(GeoPoint::new(0.0, 0.0))),
            2 => PreviewShape::Line(points),
            _ => PreviewShape::Outline(points),
        }
    }
}
