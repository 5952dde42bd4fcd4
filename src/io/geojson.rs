use crate::cell::DigipinCell;
use crate::error::DigipinError;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use rayon::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Trait for converting collections of [`DigipinCell`]s to GeoJSON.
///
/// Implemented for `[DigipinCell]` and so usable on `Vec<DigipinCell>`.
pub trait DigipinsToGeoJson {
    /// Converts cells to a FeatureCollection of cell polygons.
    ///
    /// Each feature carries `digipin`, `latitude` and `longitude` properties.
    fn to_feature_collection(&self) -> FeatureCollection;
    /// Writes the FeatureCollection to a file.
    fn to_geojson_file(&self, path: impl AsRef<Path>) -> Result<(), DigipinError>;
}

fn cell_to_feature(cell: &DigipinCell) -> Feature {
    let decoded = cell.to_decoded();

    let mut properties = JsonObject::new();
    properties.insert("digipin".to_string(), Value::from(cell.code.clone()));
    properties.insert("latitude".to_string(), Value::from(decoded.latitude));
    properties.insert("longitude".to_string(), Value::from(decoded.longitude));

    Feature {
        bbox: None,
        geometry: Some(Geometry::from(&cell.to_polygon())),
        id: Some(Id::String(cell.code.clone())),
        properties: Some(properties),
        foreign_members: None,
    }
}

impl DigipinsToGeoJson for [DigipinCell] {
    fn to_feature_collection(&self) -> FeatureCollection {
        let features: Vec<Feature> = self.par_iter().map(cell_to_feature).collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn to_geojson_file(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        let collection = self.to_feature_collection();

        let file = File::create(path).map_err(|e| DigipinError::IoError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &collection)
            .map_err(|e| DigipinError::IoError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| DigipinError::IoError(e.to_string()))?;

        log::debug!("wrote {} DIGIPIN features", collection.features.len());
        Ok(())
    }
}
