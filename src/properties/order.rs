//! Display order and visibility of entity properties

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::model::Property;

/// Well-known properties in display order, as `(key, label)`
pub const PRIORITY: [(&str, &str); 8] = [
    ("P18", "image"),
    ("P154", "logo image"),
    ("P569", "date of birth"),
    ("P19", "place of birth"),
    ("P570", "date of death"),
    ("P20", "place of death"),
    ("P69", "educated at"),
    ("P108", "employer"),
];

/// Properties rendered elsewhere on the page, never in the property list
pub const HIDDEN: [(&str, &str); 5] = [
    ("P31", "instance of"),
    ("P21", "sex or gender"),
    ("P18", "image"),
    ("P6108", "IIIF manifest URL"),
    ("P10", "video"),
];

/// Properties listed without their name header
pub const NAMELESS: [(&str, &str); 2] = [("P18", "image"), ("P154", "logo image")];

fn listed_in(list: &[(&str, &str)], property: &Property) -> bool {
    list.iter().any(|(key, label)| property.is(key, label))
}

/// Sort rank: position in [`PRIORITY`], unlisted last, external ids one step further
pub fn rank(property: &Property) -> usize {
    let base = PRIORITY
        .iter()
        .position(|(key, label)| property.is(key, label))
        .unwrap_or(PRIORITY.len());

    if property.first_value_type() == Some("external-id") {
        base + 1
    } else {
        base
    }
}

/// Stable sort into display order
pub fn sort_properties<P: Borrow<Property>>(properties: &mut [P]) {
    properties.sort_by_key(|p| rank(p.borrow()));
}

pub fn is_hidden(property: &Property) -> bool {
    listed_in(&HIDDEN, property)
}

pub fn shows_name(property: &Property) -> bool {
    !listed_in(&NAMELESS, property)
}

/// Properties of the detail list: sorted, with hidden ones removed
pub fn visible_properties(properties: &[Property]) -> Vec<&Property> {
    let mut visible: Vec<&Property> = properties.iter().filter(|p| !is_hidden(p)).collect();
    sort_properties(&mut visible);
    visible
}

/// Last name token, skipping trailing tokens such as `Jr.` that end with a dot
pub fn surname(name: &str) -> &str {
    name.split(' ')
        .rev()
        .find(|token| !token.ends_with('.'))
        .unwrap_or("")
}

/// Gallery sort key: surname, then the label without its first comma and first dot
pub fn person_sort_key(label: &str) -> String {
    let cleaned = label.replacen(',', "", 1).replacen('.', "", 1);
    format!("{}{}", surname(label), cleaned)
}

/// Order two place references by property name, then by the entity's surname
pub fn compare_by_property_then_surname(
    a_property: &str,
    a_name: &str,
    b_property: &str,
    b_name: &str,
) -> Ordering {
    locale_cmp(a_property, b_property).then_with(|| locale_cmp(surname(a_name), surname(b_name)))
}

/// Case-insensitive comparison with a case-sensitive tie-break
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyValue, ValueKind};

    fn prop(key: &str, label: &str) -> Property {
        Property::new(key, label, vec![PropertyValue::text("x")])
    }

    fn external(key: &str, label: &str) -> Property {
        Property::new(
            key,
            label,
            vec![PropertyValue::new(ValueKind::ExternalId {
                text: Some("123".to_string()),
            })],
        )
    }

    fn keys(props: &[Property]) -> Vec<&str> {
        props.iter().map(|p| p.key.as_str()).collect()
    }

    #[test]
    fn test_priority_order() {
        let mut props = vec![
            prop("P31", "instance of"),
            prop("P569", "date of birth"),
            prop("P19", "place of birth"),
        ];
        sort_properties(&mut props);
        assert_eq!(keys(&props), vec!["P569", "P19", "P31"]);
    }

    #[test]
    fn test_match_by_label_when_key_differs() {
        let mut props = vec![prop("P999", "unknown"), prop("x", "employer"), prop("y", "image")];
        sort_properties(&mut props);
        assert_eq!(keys(&props), vec!["y", "x", "P999"]);
    }

    #[test]
    fn test_unlisted_keep_relative_order() {
        let mut props = vec![prop("P3", "c"), prop("P1", "a"), prop("P69", "educated at"), prop("P2", "b")];
        sort_properties(&mut props);
        assert_eq!(keys(&props), vec!["P69", "P3", "P1", "P2"]);
    }

    #[test]
    fn test_external_id_demoted_one_step() {
        let mut props = vec![
            external("P214", "VIAF ID"),
            prop("P800", "notable work"),
            external("P570", "date of death"),
            prop("P20", "place of death"),
        ];
        sort_properties(&mut props);
        // P570 drops to rank 5 and ties with P20; stable sort keeps input order
        assert_eq!(keys(&props), vec!["P570", "P20", "P800", "P214"]);
        assert_eq!(rank(&props[3]), PRIORITY.len() + 1);
    }

    #[test]
    fn test_visible_properties_filters_special() {
        let props = vec![
            prop("P18", "image"),
            prop("P31", "instance of"),
            prop("P154", "logo image"),
            prop("P10", "video"),
            prop("P69", "educated at"),
        ];
        let visible: Vec<&str> = visible_properties(&props).iter().map(|p| p.key.as_str()).collect();
        assert_eq!(visible, vec!["P154", "P69"]);
        assert!(!shows_name(&props[2]));
        assert!(shows_name(&props[4]));
    }

    #[test]
    fn test_surname() {
        assert_eq!(surname("John Smith"), "Smith");
        assert_eq!(surname("John Smith Jr."), "Smith");
        assert_eq!(surname("J. R. R."), "");
        assert_eq!(surname("Plato"), "Plato");
    }

    #[test]
    fn test_person_sort_key() {
        assert_eq!(person_sort_key("Smith, John A."), "JohnSmith John A");
        assert_eq!(person_sort_key("Ann Lee"), "LeeAnn Lee");
        let mut labels = vec!["Zed Adams", "Amy Brown", "Bob Adams Jr."];
        labels.sort_by_key(|l| person_sort_key(l));
        assert_eq!(labels, vec!["Bob Adams Jr.", "Zed Adams", "Amy Brown"]);
    }

    #[test]
    fn test_compare_by_property_then_surname() {
        assert_eq!(
            compare_by_property_then_surname("place of birth", "Ann Lee", "educated at", "Bob Ray"),
            Ordering::Greater
        );
        assert_eq!(
            compare_by_property_then_surname("educated at", "Ann Zeller", "educated at", "Bob Adams Sr."),
            Ordering::Greater
        );
    }
}
