// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pointer/keyboard adapter around the selection machine.
//!
//! Owns the draft for its whole lifetime and is the only component that
//! turns [`SelectionUpdate`] instructions into surface draw calls. Event
//! delivery is explicit method calls from the host's event layer; the
//! machine itself stays free of any event-system dependency. All handlers
//! run to completion synchronously and must not be reentered from within a
//! draw callback.

use crate::models::{FarmPolygon, GeoPoint};
use crate::services::selection::{
    PreviewShape, SelectionError, SelectionMachine, SelectionState, SelectionUpdate,
};
use crate::surface::{LayerHandle, MapSurface};

/// Keys the interaction layer responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

/// Result of a pointer-down event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDownOutcome {
    /// Prompt to show the player after this corner.
    pub prompt: String,
    /// True once all four corners are placed and confirmation is pending.
    pub awaiting_confirmation: bool,
}

/// Drives the selection machine from host input events and mirrors its
/// preview state onto the map surface.
#[derive(Debug, Default)]
pub struct InteractionController {
    machine: SelectionMachine,
    preview_layers: Vec<LayerHandle>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.machine.state()
    }

    /// Handle a click at a geocoordinate: starts a draft from `Idle`,
    /// otherwise commits the next corner.
    pub fn on_pointer_down(
        &mut self,
        surface: &mut dyn MapSurface,
        point: GeoPoint,
    ) -> Result<PointerDownOutcome, SelectionError> {
        let update = if self.machine.state() == SelectionState::Idle {
            self.machine.begin(point)?
        } else {
            self.machine.add_point(point)?
        };

        self.render_preview(surface, &update);
        Ok(PointerDownOutcome {
            prompt: update.prompt.message(),
            awaiting_confirmation: self.machine.state() == SelectionState::Complete,
        })
    }

    /// Handle pointer movement. Outside a draft this is a no-op: pointer
    /// moves arrive constantly and only matter while corners are pending.
    pub fn on_pointer_move(&mut self, surface: &mut dyn MapSurface, point: GeoPoint) {
        if self.machine.state() != SelectionState::Drafting {
            return;
        }

        // The drafting guard above makes this infallible.
        if let Ok(update) = self.machine.update_preview(point) {
            self.render_preview(surface, &update);
        }
    }

    /// Handle a key press: Enter confirms a complete draft, Escape cancels
    /// whatever draft exists.
    ///
    /// Returns the finalized polygon on a successful confirm.
    pub fn on_key(
        &mut self,
        surface: &mut dyn MapSurface,
        key: Key,
    ) -> Result<Option<FarmPolygon>, SelectionError> {
        match key {
            Key::Enter => self.confirm(surface).map(Some),
            Key::Escape => {
                self.cancel(surface);
                Ok(None)
            }
        }
    }

    /// Confirm the completed draft (Enter or the confirm control).
    ///
    /// Clears all preview artifacts on success; a rejected confirm leaves
    /// the draft and its preview untouched.
    pub fn confirm(&mut self, surface: &mut dyn MapSurface) -> Result<FarmPolygon, SelectionError> {
        let polygon = self.machine.confirm()?;
        self.clear_preview(surface);
        tracing::info!("Farm boundary confirmed");
        Ok(polygon)
    }

    /// Cancel the draft (Escape or re-click of the draw toggle).
    ///
    /// Synchronous and total: draft state and preview artifacts are gone
    /// before this returns. Idempotent when no draft exists.
    pub fn cancel(&mut self, surface: &mut dyn MapSurface) {
        self.machine.cancel();
        self.clear_preview(surface);
    }

    fn render_preview(&mut self, surface: &mut dyn MapSurface, update: &SelectionUpdate) {
        self.clear_preview(surface);

        let handle = match &update.shape {
            PreviewShape::Point(point) => surface.draw_point(*point),
            PreviewShape::Line(points) => surface.draw_preview_line(points),
            PreviewShape::Outline(points) => surface.draw_preview_polygon(points),
        };
        self.preview_layers.push(handle);
    }

    fn clear_preview(&mut self, surface: &mut dyn MapSurface) {
        for handle in self.preview_layers.drain(..) {
            surface.remove_layer(handle);
        }
    }
}
