//! Route model for route-planner
//!
//! Coordinates, route variants and the set of routes produced by one search.

use std::fmt;

/// A WGS84 position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the position lies on the globe
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Smallest box containing a set of positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coord,
    pub north_east: Coord,
}

impl Bounds {
    /// Bounds of a single point
    pub fn from_point(point: Coord) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Bounds covering every point, or None for an empty iterator
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |mut bounds, point| {
            bounds.extend(point);
            bounds
        }))
    }

    pub fn extend(&mut self, point: Coord) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn center(&self) -> Coord {
        Coord::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    pub fn contains(&self, point: Coord) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

/// Routing priority understood by the directions provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Provider's recommended balance of time and distance
    Recommend,
    /// Fastest arrival
    Fastest,
    /// Shortest distance
    Shortest,
}

/// Road features a route request may avoid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Avoid {
    Toll,
}

/// The four route variants offered after a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Optimal,
    Alt1,
    Alt2,
    Alt3,
}

impl RouteKind {
    /// Every variant, in display order
    pub const ALL: [RouteKind; 4] = [
        RouteKind::Optimal,
        RouteKind::Alt1,
        RouteKind::Alt2,
        RouteKind::Alt3,
    ];

    /// Provider request for this variant.
    ///
    /// Each variant asks for something different: recommended, fastest,
    /// shortest, and recommended without toll roads.
    pub fn request(self) -> RouteRequest {
        match self {
            RouteKind::Optimal => RouteRequest::new(self, Priority::Recommend),
            RouteKind::Alt1 => RouteRequest::new(self, Priority::Fastest),
            RouteKind::Alt2 => RouteRequest::new(self, Priority::Shortest),
            RouteKind::Alt3 => RouteRequest {
                avoid: vec![Avoid::Toll],
                ..RouteRequest::new(self, Priority::Recommend)
            },
        }
    }

    /// Polyline color used when this slot is displayed
    pub fn color(self) -> &'static str {
        ROUTE_COLORS[self.slot()]
    }

    /// Slot index in a full route set
    pub fn slot(self) -> usize {
        match self {
            RouteKind::Optimal => 0,
            RouteKind::Alt1 => 1,
            RouteKind::Alt2 => 2,
            RouteKind::Alt3 => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RouteKind::Optimal => "optimal",
            RouteKind::Alt1 => "alternative 1",
            RouteKind::Alt2 => "alternative 2",
            RouteKind::Alt3 => "alternative 3",
        }
    }
}

/// Polyline colors per route slot
pub const ROUTE_COLORS: [&str; 4] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4"];

/// Parameters of one directions request
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub kind: RouteKind,
    pub priority: Priority,
    pub avoid: Vec<Avoid>,
}

impl RouteRequest {
    pub fn new(kind: RouteKind, priority: Priority) -> Self {
        Self {
            kind,
            priority,
            avoid: Vec::new(),
        }
    }
}

/// A route returned by the directions provider
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub kind: RouteKind,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// One polyline per route section
    pub path: Vec<Vec<Coord>>,
}

impl Route {
    /// Distance in kilometers rounded to one decimal
    pub fn distance_km(&self) -> f64 {
        (self.distance_meters / 1000.0 * 10.0).round() / 10.0
    }

    /// Duration in whole minutes
    pub fn duration_minutes(&self) -> u64 {
        (self.duration_seconds / 60.0).round().max(0.0) as u64
    }
}

/// Routes produced by one search; index 0 is the default display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSet {
    routes: Vec<Route>,
    /// Stops the routes were searched through
    stop_count: usize,
}

impl RouteSet {
    /// Maximum number of routes in a set
    pub const CAPACITY: usize = 4;

    pub fn new(mut routes: Vec<Route>, stop_count: usize) -> Self {
        routes.truncate(Self::CAPACITY);
        Self { routes, stop_count }
    }

    /// Summary of the route in slot `index`
    pub fn summary(&self, index: usize) -> Option<RouteSummary> {
        self.get(index).map(|route| RouteSummary::new(route, self.stop_count))
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Which of the four slots hold a route
    pub fn available(&self) -> [bool; RouteSet::CAPACITY] {
        let mut slots = [false; Self::CAPACITY];
        for (slot, available) in slots.iter_mut().enumerate() {
            *available = slot < self.routes.len();
        }
        slots
    }
}

/// Figures shown for the displayed route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub kind: RouteKind,
    pub distance_km: f64,
    pub duration_minutes: u64,
    pub waypoints: usize,
}

impl RouteSummary {
    /// Summary of `route` travelling through `stop_count` stops
    pub fn new(route: &Route, stop_count: usize) -> Self {
        Self {
            kind: route.kind,
            distance_km: route.distance_km(),
            duration_minutes: route.duration_minutes(),
            waypoints: stop_count.saturating_sub(2),
        }
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} km, {} min, {} waypoint(s)",
            self.kind.label(),
            self.distance_km,
            self.duration_minutes,
            self.waypoints
        )
    }
}
