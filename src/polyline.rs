//! Append-only route polyline built leg by leg.
//!
//! Legs are concatenated as-is, so the shared endpoint of two consecutive legs
//! appears twice.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePolyline {
    points: Vec<Coordinate>,
}

impl RoutePolyline {
    /// Creates an empty polyline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a polyline at a single coordinate.
    pub fn starting_at(origin: Coordinate) -> Self {
        Self {
            points: vec![origin],
        }
    }

    /// Appends a leg and returns the index range it occupies.
    pub fn append_leg(&mut self, leg: &[Coordinate]) -> Range<usize> {
        let start = self.points.len();
        self.points.extend_from_slice(leg);
        start..self.points.len()
    }

    /// Returns a reference to the accumulated points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns its points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Number of points, counting repeated leg endpoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The current end of the route, if any.
    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }
}
