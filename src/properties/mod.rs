//! Structured-property pipeline for entity pages
//!
//! Orders properties for display, summarizes value qualifiers, formats
//! time values and pulls map points out of entities.

pub mod dates;
pub mod order;
pub mod places;
pub mod qualifiers;


pub use dates::format_wiki_year;
pub use order::{person_sort_key, shows_name, visible_properties};
pub use places::{extract_places, process_locations, LocatedPlace, MapPlace, MapViewport};
pub use qualifiers::resolve_qualifiers;
