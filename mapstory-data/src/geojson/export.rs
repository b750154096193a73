//! Hand-off encoding: a [`Resolution`] as a GeoJSON `FeatureCollection`.
//!
//! Each resolved level becomes one feature whose properties carry the style
//! intent and provenance the renderer needs. Diagnostics ride along as the
//! foreign member `diagnostics`.

use geo::{LineString, MultiPolygon};
use mapstory_core::{Resolution, ResolvedBoundary};
use serde_json::{Value, json};

/// Encode `resolution` for the rendering layer.
///
/// Features appear in country, province, municipality order; unresolved
/// levels are omitted.
///
/// # Errors
///
/// Returns an error if the diagnostics cannot be serialised.
///
/// # Examples
///
/// ```
/// use mapstory_core::BoundaryResolver;
/// use mapstory_core::test_support::ScriptedFetcher;
/// use mapstory_data::geojson::to_feature_collection;
///
/// let resolution = BoundaryResolver::new(ScriptedFetcher::new()).resolve();
/// let handoff = to_feature_collection(&resolution)?;
/// assert_eq!(handoff["features"].as_array().map(Vec::len), Some(3));
/// assert_eq!(handoff["diagnostics"]["fallback_used"], true);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn to_feature_collection(resolution: &Resolution) -> Result<Value, serde_json::Error> {
    let features: Vec<Value> = resolution.boundaries().map(boundary_feature).collect();
    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
        "diagnostics": serde_json::to_value(resolution.diagnostics())?,
    }))
}

fn boundary_feature(boundary: &ResolvedBoundary) -> Value {
    let style = boundary.style();
    json!({
        "type": "Feature",
        "properties": {
            "level": boundary.level().as_str(),
            "label": boundary.label(),
            "provenance": boundary.provenance().tag(),
            "complete": boundary.is_complete(),
            "color": style.color,
            "opacity": style.opacity,
        },
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": multipolygon_coordinates(boundary.geometry()),
        },
    })
}

fn multipolygon_coordinates(geometry: &MultiPolygon<f64>) -> Value {
    geometry
        .iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(ring_coordinates)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into()
}

fn ring_coordinates(ring: &LineString<f64>) -> Value {
    ring.coords()
        .map(|coord| json!([coord.x, coord.y]))
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::decode_feature_collection;
    use mapstory_core::BoundaryResolver;
    use mapstory_core::test_support::{ScriptedFetcher, named_dataset};
    use rstest::{fixture, rstest};

    #[fixture]
    fn partial() -> Resolution {
        let fetcher = ScriptedFetcher::new()
            .with_dataset("source-1", named_dataset(&["Koshi", "Bagmati"]))
            .with_status("municipality-1", 503);
        BoundaryResolver::new(fetcher).resolve()
    }

    #[rstest]
    fn omits_unresolved_levels(partial: Resolution) {
        let handoff = to_feature_collection(&partial).expect("serialisable");
        let levels: Vec<_> = handoff["features"]
            .as_array()
            .expect("features array")
            .iter()
            .map(|f| f["properties"]["level"].clone())
            .collect();
        assert_eq!(levels, [json!("country"), json!("province")]);
    }

    #[rstest]
    fn carries_style_and_provenance(partial: Resolution) {
        let handoff = to_feature_collection(&partial).expect("serialisable");
        let province = &handoff["features"][1]["properties"];
        assert_eq!(province["provenance"], "source-1");
        assert_eq!(province["label"], "Bagmati");
        assert_eq!(province["color"], "#e07a1f");
        assert_eq!(province["complete"], true);
    }

    #[rstest]
    fn opacity_keeps_its_decimal_value() {
        let fallback = BoundaryResolver::new(ScriptedFetcher::new()).resolve();
        let handoff = to_feature_collection(&fallback).expect("serialisable");
        let opacities: Vec<_> = handoff["features"]
            .as_array()
            .expect("features array")
            .iter()
            .map(|f| f["properties"]["opacity"].to_string())
            .collect();
        assert_eq!(opacities, ["0.08", "0.2", "0.35"]);
    }

    #[rstest]
    fn records_failed_attempts(partial: Resolution) {
        let handoff = to_feature_collection(&partial).expect("serialisable");
        let attempts = handoff["diagnostics"]["attempts"]
            .as_array()
            .expect("attempts array");
        let failed = attempts
            .iter()
            .find(|a| a["source"] == "municipality-1")
            .expect("municipality attempt");
        assert_eq!(failed["outcome"]["outcome"], "failed");
        assert_eq!(failed["outcome"]["error"]["kind"], "http");
        assert_eq!(failed["outcome"]["error"]["status"], 503);
    }

    #[rstest]
    fn geometry_survives_a_decode(partial: Resolution) {
        let handoff = to_feature_collection(&partial).expect("serialisable");
        let body = serde_json::to_vec(&handoff).expect("encodable");
        let decoded = decode_feature_collection(&body).expect("decodable");
        let country = partial.country().expect("country");
        assert_eq!(
            decoded.iter().next().map(|r| &r.geometry),
            Some(country.geometry())
        );
    }
}
