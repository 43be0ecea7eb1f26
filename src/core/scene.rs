//! In-memory map surface for route-planner
//!
//! `SceneRenderer` records what a map widget would show: numbered markers,
//! route polylines and the viewport. The CLI prints it; tests inspect it.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use log::debug;

use crate::core::provider::MarkerRenderer;
use crate::core::route::{Bounds, Coord, Route};

/// Map center used on startup and after a reset (Seoul City Hall)
pub const DEFAULT_CENTER: Coord = Coord {
    lat: 37.5665,
    lng: 126.9780,
};

/// Zoom level used on startup and after a reset
pub const DEFAULT_LEVEL: u8 = 8;

/// Handle of a marker placed on the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u64);

/// A numbered marker with its info text
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coord,
    pub label: usize,
    pub title: String,
}

impl Marker {
    /// Text shown when the marker is selected
    pub fn info(&self) -> String {
        format!(
            "{}. {} (lat {:.6}, lng {:.6})",
            self.label, self.title, self.position.lat, self.position.lng
        )
    }
}

/// A drawn route section
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub path: Vec<Coord>,
    pub color: String,
}

/// Current viewport
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub center: Coord,
    pub level: u8,
    /// Area framed by the last fit, if any
    pub bounds: Option<Bounds>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            level: DEFAULT_LEVEL,
            bounds: None,
        }
    }
}

/// Map surface kept in memory
#[derive(Debug, Default)]
pub struct SceneRenderer {
    markers: BTreeMap<MarkerId, Marker>,
    polylines: Vec<Polyline>,
    view: View,
    next_id: u64,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Labels of the live markers, ascending
    pub fn labels(&self) -> Vec<usize> {
        let mut labels: Vec<usize> = self.markers.values().map(|m| m.label).collect();
        labels.sort_unstable();
        labels
    }

    /// Live markers ordered by label
    pub fn markers(&self) -> Vec<&Marker> {
        let mut markers: Vec<&Marker> = self.markers.values().collect();
        markers.sort_by_key(|m| m.label);
        markers
    }

    /// Total markers ever placed, including removed ones
    pub fn markers_placed(&self) -> u64 {
        self.next_id
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Plain-text rendering of the scene
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "view: center {} level {}",
            self.view.center, self.view.level
        );
        if self.markers.is_empty() {
            let _ = writeln!(out, "  (no markers)");
        }
        for marker in self.markers() {
            let _ = writeln!(out, "  {}", marker.info());
        }
        if let Some(first) = self.polylines.first() {
            let vertices: usize = self.polylines.iter().map(|p| p.path.len()).sum();
            let _ = writeln!(
                out,
                "  route: {} section(s), {} vertices, color {}",
                self.polylines.len(),
                vertices,
                first.color
            );
        }
        out
    }
}

impl MarkerRenderer for SceneRenderer {
    type Handle = MarkerId;

    fn place_marker(&mut self, position: Coord, label: usize, title: &str) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(
            id,
            Marker {
                position,
                label,
                title: title.to_string(),
            },
        );
        id
    }

    fn remove_marker(&mut self, handle: MarkerId) {
        if self.markers.remove(&handle).is_none() {
            debug!("Marker {handle:?} was already removed");
        }
    }

    fn fit_view(&mut self, handles: &[&MarkerId]) {
        let positions = handles
            .iter()
            .filter_map(|id| self.markers.get(id))
            .map(|m| m.position);

        if let Some(bounds) = Bounds::from_points(positions) {
            self.view.center = bounds.center();
            self.view.bounds = Some(bounds);
        }
    }

    fn draw_route(&mut self, route: &Route, color: &str) {
        for section in &route.path {
            self.polylines.push(Polyline {
                path: section.clone(),
                color: color.to_string(),
            });
        }
    }

    fn clear_routes(&mut self) {
        self.polylines.clear();
    }

    fn reset_view(&mut self, center: Coord, level: u8) {
        self.view = View {
            center,
            level,
            bounds: None,
        };
    }
}
