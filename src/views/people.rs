//! Gallery of entity cards

use crate::model::{EntitySummary, Property, Status, ValueKind};
use crate::properties::{format_wiki_year, person_sort_key};

use super::{media_lines, DisplayOptions};

const DATE_OF_BIRTH: &str = "P569";
const DATE_OF_DEATH: &str = "P570";
const IMAGE: (&str, &str) = ("P18", "image");

/// Sort summaries by surname key, in place
pub fn sort_people(entities: &mut [EntitySummary]) {
    entities.sort_by_cached_key(|e| person_sort_key(e.label()));
}

/// First value text of a property, as a year when time-typed
fn first_value_text(properties: &[Property], key: &str) -> String {
    let Some(value) = properties
        .iter()
        .find(|p| p.key == key)
        .and_then(Property::first_value)
    else {
        return String::new();
    };
    let text = value.text_value().unwrap_or_default();
    match value.kind {
        ValueKind::Time { .. } => format_wiki_year(text),
        _ => text.to_string(),
    }
}

/// `dob - dod`, or `None` when neither is known
pub fn lifespan(properties: &[Property]) -> Option<String> {
    let dob = first_value_text(properties, DATE_OF_BIRTH);
    let dod = first_value_text(properties, DATE_OF_DEATH);
    if dob.is_empty() && dod.is_empty() {
        None
    } else {
        Some(format!("{} - {}", dob, dod))
    }
}

/// Image markdown for a card or entity page, a placeholder when there is no image property
pub(crate) fn image_markdown(properties: &[Property], alt: &str) -> Option<String> {
    let Some(property) = properties.iter().find(|p| p.is(IMAGE.0, IMAGE.1)) else {
        return Some("_(image not found)_".to_string());
    };
    match property.first_value().map(|v| &v.kind) {
        Some(ValueKind::CommonsMedia { image_info, .. }) => {
            let lines = media_lines(Some(alt), image_info);
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        _ => None,
    }
}

fn card(entity: &EntitySummary, options: DisplayOptions) -> String {
    let heading = if entity.status == Some(Status::Removed) {
        entity.label().to_string()
    } else {
        format!("[{}](/entity/{})", entity.label(), entity.id)
    };
    let mut out = format!("### {}{}\n", heading, options.status_marker(entity.status.as_ref()));
    if let Some(image) = image_markdown(&entity.properties, entity.label()) {
        out.push_str(&format!("{}\n", image));
    }
    if let Some(description) = entity.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("{}\n", description));
    }
    if let Some(span) = lifespan(&entity.properties) {
        out.push_str(&format!("_{}_\n", span));
    }
    out
}

/// Cards in surname order
pub fn render(entities: &[EntitySummary], options: DisplayOptions) -> String {
    let mut sorted = entities.to_vec();
    sort_people(&mut sorted);
    sorted
        .iter()
        .map(|entity| card(entity, options))
        .collect::<Vec<_>>()
        .join("\n")
}
