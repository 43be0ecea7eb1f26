//! Ordered stop list for route-planner
//!
//! Keeps every stop paired with its marker so stop order, marker order and
//! the ordinal labels shown on the map never drift apart.

use log::debug;

use crate::core::error::{Error, Result};
use crate::core::provider::MarkerRenderer;
use crate::core::route::Coord;

/// A named location on the route. Identity is its position in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Stop {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.latitude, self.longitude)
    }
}

/// Marker placed for one stop, with the ordinal it was labelled with
#[derive(Debug)]
struct Entry<H> {
    stop: Stop,
    marker: H,
    label: usize,
}

/// Ordered stops and their markers.
///
/// Markers are labelled `1..=N` in list order. Removing a stop relabels the
/// stops after it; markers before the removed one are left alone.
pub struct StopList<M: MarkerRenderer> {
    entries: Vec<Entry<M::Handle>>,
}

impl<M: MarkerRenderer> Default for StopList<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MarkerRenderer> StopList<M> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a stop and place its marker; returns the new stop's index
    pub fn add_stop(&mut self, renderer: &mut M, name: &str, lat: f64, lng: f64) -> usize {
        let index = self.entries.len();
        let stop = Stop::new(name, lat, lng);
        let marker = renderer.place_marker(stop.coord(), index + 1, &stop.name);
        debug!("Placed marker {} for '{}'", index + 1, stop.name);

        self.entries.push(Entry {
            stop,
            marker,
            label: index + 1,
        });
        index
    }

    /// Remove the stop at `index` and relabel the stops after it.
    ///
    /// Nothing changes when `index` is out of range.
    pub fn remove_stop(&mut self, renderer: &mut M, index: usize) -> Result<Stop> {
        if index >= self.entries.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        let removed = self.entries.remove(index);
        renderer.remove_marker(removed.marker);

        // Everything after `index` moved up one position
        for position in index..self.entries.len() {
            self.relabel(renderer, position);
        }

        debug!(
            "Removed stop '{}' at {index}, relabelled {} marker(s)",
            removed.stop.name,
            self.entries.len() - index
        );
        Ok(removed.stop)
    }

    /// Remove every stop and marker
    pub fn clear_all(&mut self, renderer: &mut M) {
        for entry in self.entries.drain(..) {
            renderer.remove_marker(entry.marker);
        }
    }

    /// Snapshot of the stops in order
    pub fn current_stops(&self) -> Vec<Stop> {
        self.entries.iter().map(|e| e.stop.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether enough stops exist to search for a route
    pub fn is_routable(&self) -> bool {
        self.count() >= 2
    }

    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.entries.get(index).map(|e| &e.stop)
    }

    /// Ordinal labels currently shown, in list order
    pub fn labels(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.label).collect()
    }

    /// Marker handles in list order
    pub fn handles(&self) -> Vec<&M::Handle> {
        self.entries.iter().map(|e| &e.marker).collect()
    }

    /// Frame every marker; does nothing for an empty list
    pub fn fit_view(&self, renderer: &mut M) {
        if self.entries.is_empty() {
            return;
        }
        renderer.fit_view(&self.handles());
    }

    /// Re-place the marker at `position` when its label is stale
    fn relabel(&mut self, renderer: &mut M, position: usize) {
        let label = position + 1;
        let entry = &mut self.entries[position];
        if entry.label == label {
            return;
        }

        let marker = renderer.place_marker(entry.stop.coord(), label, &entry.stop.name);
        let stale = std::mem::replace(&mut entry.marker, marker);
        renderer.remove_marker(stale);
        entry.label = label;
    }
}
