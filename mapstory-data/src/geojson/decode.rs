//! Wire types and conversion for GeoJSON boundary payloads.
//!
//! Only `Polygon` and `MultiPolygon` features carry boundaries. Other
//! geometry types deserialise into [`Geometry::Other`] and are skipped.

use std::collections::HashMap;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use log::debug;
use mapstory_core::{BoundaryDataset, Region};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a payload cannot be turned into a [`BoundaryDataset`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not JSON or does not have GeoJSON structure.
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level object is not a feature collection.
    #[error("expected a FeatureCollection, found {found}")]
    NotACollection {
        /// The `type` member that was found.
        found: String,
    },
    /// A position has fewer than two coordinates.
    #[error("feature {feature} has a position with {len} coordinate(s)")]
    ShortPosition {
        /// Zero-based index of the offending feature.
        feature: usize,
        /// Number of coordinates present.
        len: usize,
    },
    /// A polygon has no rings at all.
    #[error("feature {feature} has a polygon without rings")]
    EmptyPolygon {
        /// Zero-based index of the offending feature.
        feature: usize,
    },
    /// Nothing usable remained after skipping non-polygon features.
    #[error("malformed payload, missing expected structure: no polygon features")]
    NoPolygons,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

type Position = Vec<f64>;
type Ring = Vec<Position>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Other,
}

/// Decode a GeoJSON `FeatureCollection` into a dataset.
///
/// # Errors
///
/// Returns [`DecodeError`] when the body is not a feature collection, a
/// position is too short, or no polygon feature remains.
///
/// # Examples
///
/// ```
/// use mapstory_data::geojson::decode_feature_collection;
///
/// let body = br#"{"type":"FeatureCollection","features":[
///     {"type":"Feature","properties":{"PROVINCE":3},
///      "geometry":{"type":"Polygon","coordinates":[[[85,27],[86,27],[86,28],[85,27]]]}}
/// ]}"#;
/// let dataset = decode_feature_collection(body)?;
/// assert_eq!(dataset.regions()[0].property("PROVINCE"), Some("3"));
/// # Ok::<(), mapstory_data::geojson::DecodeError>(())
/// ```
pub fn decode_feature_collection(body: &[u8]) -> Result<BoundaryDataset, DecodeError> {
    let collection: FeatureCollection = serde_json::from_slice(body)?;
    if collection.kind != "FeatureCollection" {
        return Err(DecodeError::NotACollection {
            found: collection.kind,
        });
    }

    let total = collection.features.len();
    let mut regions = Vec::with_capacity(total);
    for (index, feature) in collection.features.into_iter().enumerate() {
        if let Some(geometry) = convert_geometry(index, feature.geometry)? {
            regions.push(Region::new(convert_properties(feature.properties), geometry));
        }
    }

    let skipped = total.saturating_sub(regions.len());
    if skipped > 0 {
        debug!("Skipped {skipped} of {total} features without polygon geometry");
    }
    if regions.is_empty() {
        return Err(DecodeError::NoPolygons);
    }
    Ok(BoundaryDataset::new(regions))
}

fn convert_geometry(
    feature: usize,
    geometry: Option<Geometry>,
) -> Result<Option<MultiPolygon<f64>>, DecodeError> {
    let polygons = match geometry {
        Some(Geometry::Polygon { coordinates }) => vec![convert_polygon(feature, coordinates)?],
        Some(Geometry::MultiPolygon { coordinates }) => coordinates
            .into_iter()
            .map(|rings| convert_polygon(feature, rings))
            .collect::<Result<_, _>>()?,
        Some(Geometry::Other) | None => return Ok(None),
    };
    Ok(Some(MultiPolygon::new(polygons)))
}

fn convert_polygon(feature: usize, rings: Vec<Ring>) -> Result<Polygon<f64>, DecodeError> {
    let mut converted = rings
        .into_iter()
        .map(|ring| convert_ring(feature, ring))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let exterior = converted
        .next()
        .ok_or(DecodeError::EmptyPolygon { feature })?;
    Ok(Polygon::new(exterior, converted.collect()))
}

fn convert_ring(feature: usize, ring: Ring) -> Result<LineString<f64>, DecodeError> {
    ring.into_iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            short => Err(DecodeError::ShortPosition {
                feature,
                len: short.len(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// Keep strings verbatim and scalars in JSON text form; drop the rest.
fn convert_properties(properties: Option<Map<String, Value>>) -> HashMap<String, String> {
    properties
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key, text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapstory_core::{RegionQuery, find_region};
    use rstest::rstest;

    const SQUARE: &str = "[[[85.0,27.0],[86.0,27.0],[86.0,28.0],[85.0,28.0],[85.0,27.0]]]";

    fn collection(features: &[String]) -> Vec<u8> {
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
        .into_bytes()
    }

    fn feature(properties: &str, geometry: &str) -> String {
        format!(r#"{{"type":"Feature","properties":{properties},"geometry":{geometry}}}"#)
    }

    fn polygon_feature(properties: &str) -> String {
        feature(
            properties,
            &format!(r#"{{"type":"Polygon","coordinates":{SQUARE}}}"#),
        )
    }

    #[rstest]
    fn decodes_polygons_and_multipolygons() {
        let multi = feature(
            r#"{"NAME":"Two Parts"}"#,
            &format!(r#"{{"type":"MultiPolygon","coordinates":[{SQUARE},{SQUARE}]}}"#),
        );
        let body = collection(&[polygon_feature(r#"{"NAME":"One"}"#), multi]);

        let dataset = decode_feature_collection(&body).expect("valid collection");

        assert_eq!(dataset.len(), 2);
        let sizes: Vec<_> = dataset.iter().map(|r| r.geometry.0.len()).collect();
        assert_eq!(sizes, [1, 2]);
    }

    #[rstest]
    fn keeps_holes_as_interiors() {
        let holed = feature(
            "{}",
            r#"{"type":"Polygon","coordinates":[
                [[0,0],[4,0],[4,4],[0,4],[0,0]],
                [[1,1],[2,1],[2,2],[1,1]]
            ]}"#,
        );
        let dataset = decode_feature_collection(&collection(&[holed])).expect("valid");
        let polygon = dataset.iter().next().and_then(|r| r.geometry.0.first());
        assert_eq!(polygon.map(|p| p.interiors().len()), Some(1));
    }

    #[rstest]
    fn numeric_province_codes_match_aliases() {
        let body = collection(&[polygon_feature(r#"{"PROVINCE":3,"ACTIVE":true}"#)]);
        let dataset = decode_feature_collection(&body).expect("valid");
        let query = RegionQuery::province("bagmati").with_aliases(["3"]);

        let region = find_region(&dataset, &query).expect("alias match");
        assert_eq!(region.property("ACTIVE"), Some("true"));
    }

    #[rstest]
    fn drops_structured_and_null_properties() {
        let body = collection(&[polygon_feature(
            r#"{"NAME":"Kathmandu","extra":{"a":1},"codes":[1,2],"note":null}"#,
        )]);
        let dataset = decode_feature_collection(&body).expect("valid");
        let region = dataset.iter().next().expect("one region");
        assert_eq!(region.properties.len(), 1);
    }

    #[rstest]
    fn skips_non_polygon_features() {
        let point = feature(
            r#"{"NAME":"Kathmandu Durbar"}"#,
            r#"{"type":"Point","coordinates":[85.3,27.7]}"#,
        );
        let nothing = feature(r#"{"NAME":"Unknown"}"#, "null");
        let body = collection(&[point, polygon_feature(r#"{"NAME":"Bagmati"}"#), nothing]);

        let dataset = decode_feature_collection(&body).expect("valid");

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.iter().next().and_then(|r| r.property("NAME")), Some("Bagmati"));
    }

    #[rstest]
    #[case::not_json(b"<html>502 Bad Gateway</html>".to_vec())]
    #[case::missing_type(br#"{"features":[]}"#.to_vec())]
    fn rejects_non_json_bodies(#[case] body: Vec<u8>) {
        assert!(matches!(
            decode_feature_collection(&body),
            Err(DecodeError::Json(_))
        ));
    }

    #[rstest]
    fn rejects_other_top_level_types() {
        let body = br#"{"type":"Feature","features":[]}"#;
        assert!(matches!(
            decode_feature_collection(body),
            Err(DecodeError::NotACollection { found }) if found == "Feature"
        ));
    }

    #[rstest]
    #[case::empty(collection(&[]))]
    #[case::points_only(collection(&[feature("{}", r#"{"type":"Point","coordinates":[1,2]}"#)]))]
    fn rejects_collections_without_polygons(#[case] body: Vec<u8>) {
        assert!(matches!(
            decode_feature_collection(&body),
            Err(DecodeError::NoPolygons)
        ));
    }

    #[rstest]
    fn rejects_short_positions() {
        let short = feature(
            "{}",
            r#"{"type":"Polygon","coordinates":[[[85.0,27.0],[86.0],[85.0,27.0]]]}"#,
        );
        assert!(matches!(
            decode_feature_collection(&collection(&[short])),
            Err(DecodeError::ShortPosition { feature: 0, len: 1 })
        ));
    }
}
