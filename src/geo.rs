use tracing::{debug, error};

use crate::error::{Result, TrendsError};
use crate::types::{Centroid, Polygon, Position, StateCenters, StateShapes};

pub const EARTH_RADIUS_MILES: f64 = 3963.2;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

/// Great-circle distance in miles (haversine).
pub fn geo_distance(a: Position, b: Position) -> f64 {
    let lat1 = deg_to_rad(a.latitude);
    let lat2 = deg_to_rad(b.latitude);
    let dlat = lat2 - lat1;
    let dlon = deg_to_rad(b.longitude - a.longitude);
    let h = (dlat / 2.0).sin().powi(2) + (dlon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Centroid and unsigned area of a closed ring.
///
/// A ring with zero signed area (collinear or doubled-back vertices) has no
/// meaningful centroid; its first vertex is returned with area 0 so it carries
/// no weight in [`find_center`].
pub fn find_centroid(polygon: &Polygon) -> Centroid {
    let vertices = polygon.vertices();
    let (mut area, mut cx, mut cy) = (0.0, 0.0, 0.0);
    for pair in vertices.windows(2) {
        let (x0, y0) = (pair[0].latitude, pair[0].longitude);
        let (x1, y1) = (pair[1].latitude, pair[1].longitude);
        let cross = x0 * y1 - x1 * y0;
        area += cross;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }
    area /= 2.0;

    if area == 0.0 {
        let first = vertices[0];
        return Centroid {
            latitude: first.latitude,
            longitude: first.longitude,
            area: 0.0,
        };
    }
    Centroid {
        latitude: cx / (6.0 * area),
        longitude: cy / (6.0 * area),
        area: area.abs(),
    }
}

/// Area-weighted mean of the centroids of `polygons`.
pub fn find_center(polygons: &[Polygon]) -> Result<Position> {
    let (mut lat, mut lon, mut total) = (0.0, 0.0, 0.0);
    for polygon in polygons {
        let c = find_centroid(polygon);
        lat += c.latitude * c.area;
        lon += c.longitude * c.area;
        total += c.area;
    }
    if !total.is_finite() || total <= 0.0 {
        return Err(TrendsError::ZeroTotalArea);
    }
    Ok(Position::new(lat / total, lon / total))
}

pub fn state_centers(states: &StateShapes) -> Result<StateCenters> {
    let mut centers = StateCenters::new();
    for (name, shapes) in states {
        let center = find_center(shapes).map_err(|_| {
            error!(state = %name, "state polygons enclose no area");
            TrendsError::DegenerateState(name.clone())
        })?;
        debug!(state = %name, %center, "computed state center");
        centers.insert(name.clone(), center);
    }
    Ok(centers)
}
