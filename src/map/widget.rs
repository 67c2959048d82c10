//! Map widget contract and the terminal map view.
//!
//! [`MapWidget`] is the seam between the application layer and whatever draws
//! the map: it exposes viewport control (pan, zoom), a marker layer keyed by
//! location id, a single open popup and the user-location marker.
//! [`MapView`] is the in-plugin implementation rendered by
//! [`crate::ui::components`].

use super::projection::{project_to_cell, Cell, Viewport};
use super::{MAX_ZOOM, MIN_ZOOM, OVERVIEW_ZOOM};
use crate::domain::{CategoryStyle, Coordinate, Location, LocationId};

/// A marker placed for one visible location.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Snapshot of the location the marker represents (used for the popup).
    pub location: Location,
    /// Category glyph and color.
    pub style: CategoryStyle,
}

impl Marker {
    /// Creates a marker styled after the location's category.
    #[must_use]
    pub fn for_location(location: &Location) -> Self {
        Self {
            location: location.clone(),
            style: location.style(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &LocationId {
        &self.location.id
    }

    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.location.coordinate
    }
}

/// Operations the application needs from a map widget.
pub trait MapWidget {
    /// Current map center.
    fn center(&self) -> Coordinate;

    /// Current zoom level.
    fn zoom(&self) -> u8;

    /// Moves the map center to `target`.
    fn pan_to(&mut self, target: Coordinate);

    /// Sets the zoom level (implementations clamp to their supported range).
    fn set_zoom(&mut self, zoom: u8);

    fn zoom_in(&mut self) {
        self.set_zoom(self.zoom().saturating_add(1));
    }

    fn zoom_out(&mut self) {
        self.set_zoom(self.zoom().saturating_sub(1));
    }

    /// Places a marker; replaces any marker with the same id.
    fn add_marker(&mut self, marker: Marker);

    /// Removes the marker with `id`, returning it if present.
    fn remove_marker(&mut self, id: &LocationId) -> Option<Marker>;

    /// Ids of every marker currently placed, in placement order.
    fn marker_ids(&self) -> Vec<LocationId>;

    /// Opens the popup anchored to the marker with `id`.
    ///
    /// Returns `false` (and leaves any open popup untouched) if no such
    /// marker exists.
    fn open_popup(&mut self, id: &LocationId) -> bool;

    /// Closes the open popup, if any.
    fn close_popup(&mut self);

    /// Shows or hides the user-location marker.
    fn set_user_marker(&mut self, position: Option<Coordinate>);
}

/// Terminal map view: viewport state plus the marker layer.
#[derive(Debug, Clone)]
pub struct MapView {
    center: Coordinate,
    zoom: u8,
    markers: Vec<Marker>,
    popup: Option<LocationId>,
    user_marker: Option<Coordinate>,
}

impl MapView {
    /// Creates a map centered on `center` at the overview zoom.
    #[must_use]
    pub const fn new(center: Coordinate) -> Self {
        Self {
            center,
            zoom: OVERVIEW_ZOOM,
            markers: Vec::new(),
            popup: None,
            user_marker: None,
        }
    }

    /// Every placed marker in placement order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Marker whose popup is open.
    #[must_use]
    pub fn popup(&self) -> Option<&Marker> {
        let id = self.popup.as_ref()?;
        self.markers.iter().find(|marker| marker.id() == id)
    }

    #[must_use]
    pub const fn user_marker(&self) -> Option<Coordinate> {
        self.user_marker
    }

    /// Cell at which `coordinate` is drawn for a canvas of `viewport` size.
    #[must_use]
    pub fn cell_for(&self, coordinate: Coordinate, viewport: Viewport) -> Option<Cell> {
        project_to_cell(coordinate, self.center, self.zoom, viewport)
    }

    /// Finds the marker nearest to a clicked cell.
    ///
    /// Markers are a glyph wide, so a click within two columns and one row of
    /// a marker's cell counts as a hit. Ties resolve to the marker placed last
    /// (the one drawn on top).
    #[must_use]
    pub fn marker_at(&self, viewport: Viewport, clicked: Cell) -> Option<&LocationId> {
        const MAX_COL_DISTANCE: usize = 2;
        const MAX_ROW_DISTANCE: usize = 1;

        let mut best: Option<(usize, &LocationId)> = None;

        for marker in &self.markers {
            let Some(cell) = self.cell_for(marker.position(), viewport) else {
                continue;
            };

            let col_distance = cell.col.abs_diff(clicked.col);
            let row_distance = cell.row.abs_diff(clicked.row);
            if col_distance > MAX_COL_DISTANCE || row_distance > MAX_ROW_DISTANCE {
                continue;
            }

            let distance = col_distance + row_distance * 2;
            if best.map_or(true, |(current, _)| distance <= current) {
                best = Some((distance, marker.id()));
            }
        }

        best.map(|(_, id)| id)
    }
}

impl MapWidget for MapView {
    fn center(&self) -> Coordinate {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn pan_to(&mut self, target: Coordinate) {
        tracing::debug!(lat = target.lat, lng = target.lng, "map pan");
        self.center = target;
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.retain(|existing| existing.id() != marker.id());
        self.markers.push(marker);
    }

    fn remove_marker(&mut self, id: &LocationId) -> Option<Marker> {
        let index = self.markers.iter().position(|marker| marker.id() == id)?;
        if self.popup.as_ref() == Some(id) {
            self.popup = None;
        }
        Some(self.markers.remove(index))
    }

    fn marker_ids(&self) -> Vec<LocationId> {
        self.markers.iter().map(|marker| marker.id().clone()).collect()
    }

    fn open_popup(&mut self, id: &LocationId) -> bool {
        if self.markers.iter().any(|marker| marker.id() == id) {
            self.popup = Some(id.clone());
            true
        } else {
            false
        }
    }

    fn close_popup(&mut self) {
        self.popup = None;
    }

    fn set_user_marker(&mut self, position: Option<Coordinate>) {
        self.user_marker = position;
    }
}
