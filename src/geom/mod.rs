mod parse;

pub use parse::{parse_geojson, parse_geometry, parse_wkt};

use geo_types::Polygon;

/// Renders a polygon as a WKT string.
pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

/// Renders a polygon as a GeoJSON geometry string.
pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}
