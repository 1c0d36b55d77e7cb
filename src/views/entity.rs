//! Entity detail page
//!
//! Layout follows the exhibit page: heading (unless the biography brings its
//! own), image, biography, publications, the sorted property list with
//! qualifiers, important places and outbound links.

use crate::model::{non_empty, Entity, Property, PropertyValue, Publication, ValueKind};
use crate::properties::places::COORDINATE_LOCATION;
use crate::properties::{
    extract_places, format_wiki_year, resolve_qualifiers, shows_name, visible_properties, MapPlace,
    MapViewport,
};
use crate::router::Route;

use super::people::image_markdown;
use super::{media_lines, DisplayOptions};

pub const WIKIDATA_BASE: &str = "https://www.wikidata.org/wiki/";

fn google_maps(lat: f64, long: f64) -> String {
    format!("https://maps.google.com/?q={},{}", lat, long)
}

fn search_link(text: &str, term: String) -> String {
    format!("[{}]({})", text, Route::Search { term: Some(term) })
}

/// Inline Markdown for one property value
pub fn render_value(value: &PropertyValue) -> String {
    match &value.kind {
        ValueKind::ExternalId { text }
        | ValueKind::String { text }
        | ValueKind::MonolingualText { text }
        | ValueKind::WikibaseForm { text, .. } => text.clone().unwrap_or_default(),
        ValueKind::CommonsMedia { name, image_info } => media_lines(name.as_deref(), image_info).join(" "),
        ValueKind::WikibaseItem { text, .. } => {
            let text = text.as_deref().unwrap_or_default();
            let mut out = search_link(text, format!("\"{}\"", text));
            if let Some((lat, long)) = linked_coordinates(value) {
                out.push_str(&format!(" [📍]({})", google_maps(lat, long)));
            }
            out
        }
        ValueKind::Time { text } => {
            let year = format_wiki_year(text.as_deref().unwrap_or_default());
            search_link(&year, year.clone())
        }
        ValueKind::Url { text } => {
            let url = text.as_deref().unwrap_or_default();
            format!("[{}]({})", url, url)
        }
        ValueKind::GlobeCoordinate {
            latitude,
            longitude,
        } => format!("[{} x {} 📍]({})", latitude, longitude, google_maps(*latitude, *longitude)),
        ValueKind::Quantity { amount, unit } => {
            let amount = amount.strip_prefix('+').unwrap_or(amount.as_str());
            match unit {
                Some(unit) => format!("{} {}", amount, unit),
                None => amount.to_string(),
            }
        }
        ValueKind::Unknown { value_type, text } if value_type.is_empty() => {
            text.clone().unwrap_or_default()
        }
        ValueKind::WikibaseProperty { .. } | ValueKind::GeoShape { .. } | ValueKind::Unknown { .. } => {
            format!("`{}`", value.value_type())
        }
    }
}

/// Coordinates of the entity an item value points at
fn linked_coordinates(value: &PropertyValue) -> Option<(f64, f64)> {
    value
        .data
        .as_ref()?
        .property(COORDINATE_LOCATION.0, COORDINATE_LOCATION.1)?
        .first_value()?
        .coordinates()
}

fn publication_line(publication: &Publication) -> String {
    let mut line = String::from("- ");
    if let Some(role) = non_empty(&publication.role) {
        line.push_str(&format!("{}: ", role));
    }
    line.push_str(&format!("*{}*", publication.title.as_deref().unwrap_or_default()));
    if let Some(journal) = non_empty(&publication.journal) {
        line.push_str(&format!(", {}", journal));
    }
    if let Some(date) = non_empty(&publication.date) {
        line.push_str(&format!(" - {}", date));
    }
    if let Some(authors) = non_empty(&publication.authors) {
        line.push_str(&format!(" (with: {})", authors));
    }
    if let Some(link) = non_empty(&publication.link) {
        line.push_str(&format!(" [↗]({})", link));
    }
    line
}

/// `label: value, value` for each property of one reference group
fn reference_line(group: &[Property]) -> String {
    group
        .iter()
        .map(|property| {
            let values: Vec<String> = property.values.iter().map(render_value).collect();
            format!("{}: {}", property.label(), values.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_property(property: &Property, options: DisplayOptions) -> String {
    let mut out = String::new();
    if shows_name(property) {
        out.push_str(&format!(
            "### {}{}\n",
            property.label(),
            options.status_marker(property.status.as_ref())
        ));
    }
    if options.show_property_info {
        out.push_str(&format!("`{}`\n", property.key));
    }
    for value in &property.values {
        let qualifiers = resolve_qualifiers(&value.qualifiers);
        if qualifiers.is_none() {
            out.push_str(&format!("- {}\n", render_value(value)));
        } else {
            out.push_str(&format!("- {} {}\n", render_value(value), qualifiers));
        }
        if options.show_property_info {
            for group in value.references.iter().filter(|g| !g.is_empty()) {
                out.push_str(&format!("  - _source:_ {}\n", reference_line(group)));
            }
        }
    }
    out
}

fn render_places(places: &[MapPlace]) -> String {
    let mut out = String::from("### Important Places\n");
    if places.is_empty() {
        out.push_str("_No places_\n");
        return out;
    }
    let viewport = MapViewport::for_places(places);
    out.push_str(&format!(
        "_Centred on {:.4}, {:.4} at zoom {}_\n",
        viewport.center.0, viewport.center.1, viewport.zoom
    ));
    for place in places {
        let note = match (place.popup(), place.tooltip()) {
            (Some(popup), _) => format!(" ({})", popup),
            (None, Some(tooltip)) if tooltip != place.title => format!(" ({})", tooltip),
            _ => String::new(),
        };
        out.push_str(&format!(
            "- [{}]({}){}\n",
            place.title,
            google_maps(place.lat, place.long),
            note
        ));
    }
    out
}

/// Full entity page
pub fn render(entity: &Entity, options: DisplayOptions) -> String {
    let mut sections: Vec<String> = Vec::new();
    let biography = entity.adjusted_biography();

    if biography.is_none() {
        let mut heading = format!(
            "# {}{}\n",
            entity.label(),
            options.status_marker(entity.label_status.as_ref())
        );
        if let Some(description) = non_empty(&entity.description) {
            heading.push_str(&format!(
                "\n#### {}{}\n",
                description,
                options.status_marker(entity.description_status.as_ref())
            ));
        }
        sections.push(heading);
    }

    if let Some(image) = image_markdown(&entity.properties, entity.label()) {
        sections.push(format!("{}\n", image));
    }

    if let Some(biography) = biography {
        let marker = options.status_marker(entity.biography_markdown_status.as_ref());
        sections.push(format!("{}\n{}", biography.trim_end(), marker.trim_start()));
    }

    if let Some(publications) = &entity.publications {
        let mut block = format!(
            "### Publications{}\n",
            options.status_marker(entity.publications_status.as_ref())
        );
        for publication in publications {
            block.push_str(&publication_line(publication));
            block.push('\n');
        }
        sections.push(block);
    }

    if let Some(markdown) = non_empty(&entity.publications_markdown) {
        sections.push(format!("## Publications\n\n{}\n", markdown.trim_end()));
    }

    for property in visible_properties(&entity.properties) {
        sections.push(render_property(property, options));
    }

    sections.push(render_places(&extract_places(entity)));

    sections.push(format!(
        "### Links\n- [View Wikidata]({}{})\n- [View Exhibit Data](/data/{}.json)\n",
        WIKIDATA_BASE, entity.id, entity.id
    ));

    sections
        .iter()
        .map(|s| s.trim_end())
        .collect::<Vec<_>>()
        .join("\n\n")
        + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTITY: &str = r#"{
        "id": "Q7",
        "label": "Ann Lee",
        "description": "student",
        "labelStatus": "updated",
        "publications": [
            {"title": "On Rivers", "journal": "Review", "date": "1890", "role": "author",
             "authors": "B. Cole", "link": "https://doi.org/x"},
            {"title": "Notes"}
        ],
        "properties": {
            "P31": {"key": "P31", "property": {"label": "instance of"},
                    "values": [{"value-type": "wikibase-item", "text": "human"}]},
            "P214": {"key": "P214", "property": {"label": "VIAF ID"},
                      "values": [{"value-type": "external-id", "text": "1234",
                                 "references": [[
                                     {"key": "P854", "property": {"label": "reference URL"},
                                      "values": [{"value-type": "url", "text": "https://viaf.org/1234"}]},
                                     {"key": "P813", "property": {"label": "retrieved"},
                                      "values": [{"value-type": "time", "text": "+2020-03-01T00:00:00Z"}]}]]}]},
            "P69": {"key": "P69", "property": {"label": "educated at"}, "status": "new",
                    "values": [{"value-type": "wikibase-item", "text": "Yale College",
                                "qualifiers": [
                                    {"key": "P580", "property": {"label": "start time"},
                                     "values": [{"value-type": "time", "text": "+1850-00-00T00:00:00Z"}]},
                                    {"key": "P582", "property": {"label": "end time"},
                                     "values": [{"value-type": "time", "text": "+1854-00-00T00:00:00Z"}]}],
                                "data": {"label": "Yale College", "properties": {
                                    "P625": {"key": "P625", "property": {"label": "coordinate location"},
                                             "values": [{"value-type": "globe-coordinate", "latitude": 41.31, "longitude": -72.92}]}}}}]},
            "P569": {"key": "P569", "property": {"label": "date of birth"},
                     "values": [{"value-type": "time", "text": "+1832-05-01T00:00:00Z"}]},
            "P2048": {"key": "P2048", "property": {"label": "height"},
                      "values": [{"value-type": "quantity", "amount": "+180", "unit": {"label": "centimetre"}}]}
        }
    }"#;

    fn entity() -> Entity {
        serde_json::from_str(ENTITY).unwrap()
    }

    #[test]
    fn test_heading_without_biography() {
        let page = render(&entity(), DisplayOptions::default());
        assert!(page.starts_with("# Ann Lee\n\n#### student"));
    }

    #[test]
    fn test_biography_replaces_heading() {
        let mut entity = entity();
        entity.biography_markdown = Some("## Ann Lee\nBorn in Hartford.".to_string());
        let page = render(&entity, DisplayOptions::default());
        assert!(!page.contains("# Ann Lee\n\n#### student"));
        assert!(page.contains("#### Ann Lee\nBorn in Hartford."));
    }

    #[test]
    fn test_property_order_and_hidden() {
        let page = render(&entity(), DisplayOptions::default());
        let dob = page.find("### date of birth").unwrap();
        let educated = page.find("### educated at").unwrap();
        let height = page.find("### height").unwrap();
        let viaf = page.find("### VIAF ID").unwrap();
        assert!(dob < educated && educated < height && height < viaf);
        assert!(!page.contains("### instance of"));
    }

    #[test]
    fn test_values_and_qualifiers() {
        let page = render(&entity(), DisplayOptions::default());
        assert!(page.contains(
            "- [Yale College](/search/%22Yale%20College%22) [📍](https://maps.google.com/?q=41.31,-72.92) (1850 - 1854)"
        ));
        assert!(page.contains("- [1832](/search/1832)"));
        assert!(page.contains("- 180 centimetre"));
        assert!(page.contains("- 1234"));
    }

    #[test]
    fn test_publications() {
        let page = render(&entity(), DisplayOptions::default());
        assert!(page.contains(
            "### Publications\n- author: *On Rivers*, Review - 1890 (with: B. Cole) [↗](https://doi.org/x)\n- *Notes*"
        ));
    }

    #[test]
    fn test_places_and_links() {
        let page = render(&entity(), DisplayOptions::default());
        assert!(page.contains("### Important Places\n"));
        assert!(page.contains("- [educated at: Yale College](https://maps.google.com/?q=41.31,-72.92)"));
        assert!(page.contains("- [View Wikidata](https://www.wikidata.org/wiki/Q7)"));
        assert!(page.contains("- [View Exhibit Data](/data/Q7.json)"));
    }

    #[test]
    fn test_display_toggles() {
        let options = DisplayOptions {
            show_property_info: true,
            show_changes: true,
        };
        let page = render(&entity(), options);
        assert!(page.starts_with("# Ann Lee `[status-updated]`"));
        assert!(page.contains("### educated at `[status-new]`\n`P69`\n"));
    }

    #[test]
    fn test_references_with_property_info() {
        let plain = render(&entity(), DisplayOptions::default());
        assert!(!plain.contains("_source:_"));

        let options = DisplayOptions {
            show_property_info: true,
            ..Default::default()
        };
        let page = render(&entity(), options);
        assert!(page.contains(
            "### VIAF ID\n`P214`\n- 1234\n  - _source:_ reference URL: [https://viaf.org/1234](https://viaf.org/1234); retrieved: [2020](/search/2020)\n"
        ));
    }

    #[test]
    fn test_value_fallbacks() {
        let coordinate: PropertyValue =
            serde_json::from_str(r#"{"value-type": "globe-coordinate", "latitude": 1.5, "longitude": 2.0}"#).unwrap();
        assert_eq!(render_value(&coordinate), "[1.5 x 2 📍](https://maps.google.com/?q=1.5,2)");

        let unknown: PropertyValue = serde_json::from_str(r#"{"value-type": "tabular-data"}"#).unwrap();
        assert_eq!(render_value(&unknown), "`tabular-data`");

        let bad_date: PropertyValue = serde_json::from_str(r#"{"value-type": "time", "text": "circa 1850"}"#).unwrap();
        assert_eq!(render_value(&bad_date), "[circa 1850](/search/circa%201850)");
    }
}
