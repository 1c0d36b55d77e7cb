//! Full map of every referenced place

use serde_json::{json, Value};

use crate::properties::{LocatedPlace, MapViewport};

/// Places with their popup entries, one section per place
pub fn render(places: &[LocatedPlace]) -> String {
    let mut out = String::from("# Map\n");
    let points: Vec<(f64, f64)> = places.iter().map(|p| (p.lat, p.long)).collect();
    let viewport = MapViewport::fit(&points);
    out.push_str(&format!(
        "\n_{} places, centred on {:.4}, {:.4} at zoom {}_\n",
        places.len(),
        viewport.center.0,
        viewport.center.1,
        viewport.zoom
    ));

    for place in places {
        out.push_str(&format!("\n### {}\n_{}, {}_\n", place.label, place.lat, place.long));
        for entry in &place.entries {
            out.push_str(&format!(
                "- **{}:** [{}](/entity/{})\n",
                entry.property_name, entry.entity_name, entry.entity_id
            ));
        }
    }
    out
}

/// GeoJSON FeatureCollection of the same places, `[long, lat]` ordered
pub fn geojson(places: &[LocatedPlace]) -> Value {
    let features: Vec<Value> = places
        .iter()
        .map(|place| {
            json!({
                "type": "Feature",
                "id": place.id,
                "geometry": {
                    "type": "Point",
                    "coordinates": [place.long, place.lat],
                },
                "properties": {
                    "label": place.label,
                    "entries": place.entries,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
