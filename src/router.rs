//! Route paths of the exhibit site

use std::fmt;

use crate::error::{validate_resource_name, AppError};

/// A navigable view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Gallery from `data/<list>.json`, the default list when `None`
    People { list: Option<String> },
    Entity { id: String, list: Option<String> },
    About,
    News,
    Map,
    Search { term: Option<String> },
}

impl Route {
    /// Parse a site path such as `/entity/Q42` or `/search/%22Ann%20Lee%22`
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let trimmed = path.trim();
        if let Some(raw) = search_suffix(trimmed) {
            let term = urlencoding::decode(raw)
                .map_err(|e| AppError::InvalidInput(format!("Bad search term '{}': {}", raw, e)))?
                .into_owned();
            return Ok(Route::Search {
                term: Some(term).filter(|t| !t.is_empty()),
            });
        }

        let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = without_query.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["people"] => Route::People { list: None },
            ["about"] => Route::About,
            ["news"] => Route::News,
            ["map"] => Route::Map,
            ["search"] => Route::Search { term: None },
            ["entity", id] => Route::Entity {
                id: decode_name(id)?,
                list: None,
            },
            [list, "entity", id] => Route::Entity {
                id: decode_name(id)?,
                list: Some(decode_name(list)?),
            },
            [json_file] => {
                let name = decode_name(json_file)?;
                let name = name.strip_suffix(".json").unwrap_or(&name).to_string();
                validate_resource_name(&name)?;
                Route::People { list: Some(name) }
            }
            _ => {
                return Err(AppError::NotFound(format!("No route for '{}'", trimmed)));
            }
        };

        Ok(route)
    }
}

/// Everything after `/search/`, where `?` and `#` belong to the term
fn search_suffix(path: &str) -> Option<&str> {
    let rest = path.trim_start_matches('/').strip_prefix("search/")?;
    Some(rest.trim_matches('/'))
}

fn decode_name(segment: &str) -> Result<String, AppError> {
    let decoded = urlencoding::decode(segment)
        .map_err(|e| AppError::InvalidInput(format!("Bad path segment '{}': {}", segment, e)))?
        .into_owned();
    validate_resource_name(&decoded)?;
    Ok(decoded)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::People { list: None } => write!(f, "/people"),
            Route::People { list: Some(list) } => write!(f, "/{}", list),
            Route::Entity { id, list: None } => write!(f, "/entity/{}", id),
            Route::Entity { id, list: Some(list) } => write!(f, "/{}/entity/{}", list, id),
            Route::About => write!(f, "/about"),
            Route::News => write!(f, "/news"),
            Route::Map => write!(f, "/map"),
            Route::Search { term: None } => write!(f, "/search"),
            Route::Search { term: Some(term) } => write!(f, "/search/{}", urlencoding::encode(term)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("").unwrap(), Route::Home);
        assert_eq!(Route::parse("/people").unwrap(), Route::People { list: None });
        assert_eq!(Route::parse("/about/").unwrap(), Route::About);
        assert_eq!(Route::parse("/news").unwrap(), Route::News);
        assert_eq!(Route::parse("/map").unwrap(), Route::Map);
        assert_eq!(Route::parse("/search").unwrap(), Route::Search { term: None });
        assert_eq!(Route::parse("/search/").unwrap(), Route::Search { term: None });
    }

    #[test]
    fn test_entity_routes() {
        assert_eq!(
            Route::parse("/entity/Q42").unwrap(),
            Route::Entity { id: "Q42".to_string(), list: None }
        );
        assert_eq!(
            Route::parse("/faculty/entity/Q7").unwrap(),
            Route::Entity { id: "Q7".to_string(), list: Some("faculty".to_string()) }
        );
    }

    #[test]
    fn test_search_term_decoded() {
        assert_eq!(
            Route::parse("/search/%22Ann%20Lee%22%20Yale").unwrap(),
            Route::Search { term: Some("\"Ann Lee\" Yale".to_string()) }
        );
        assert_eq!(
            Route::parse("/search/1850").unwrap(),
            Route::Search { term: Some("1850".to_string()) }
        );
    }

    #[test]
    fn test_search_term_keeps_query_characters() {
        assert_eq!(
            Route::parse("/search/who?").unwrap(),
            Route::Search { term: Some("who?".to_string()) }
        );
        assert_eq!(
            Route::parse("/search/C# and F#").unwrap(),
            Route::Search { term: Some("C# and F#".to_string()) }
        );
        assert_eq!(
            Route::parse("/search/AC/DC").unwrap(),
            Route::Search { term: Some("AC/DC".to_string()) }
        );
        assert_eq!(Route::parse("/search?q=1").unwrap(), Route::Search { term: None });
        assert_eq!(Route::parse("/about?tab=1").unwrap(), Route::About);

        let route = Route::Search { term: Some("who?".to_string()) };
        assert_eq!(Route::parse(&route.to_string()).unwrap(), route);
    }

    #[test]
    fn test_json_file_route() {
        assert_eq!(
            Route::parse("/faculty.json").unwrap(),
            Route::People { list: Some("faculty".to_string()) }
        );
        assert_eq!(
            Route::parse("/faculty").unwrap(),
            Route::People { list: Some("faculty".to_string()) }
        );
    }

    #[test]
    fn test_rejects_unknown_and_unsafe() {
        assert!(matches!(Route::parse("/a/b/c/d"), Err(AppError::NotFound(_))));
        assert!(matches!(Route::parse("/entity/..%2Fsecret"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_display_round_trips() {
        for path in ["/", "/people", "/entity/Q1", "/faculty/entity/Q2", "/map", "/search/%22Ann%20Lee%22"] {
            let route = Route::parse(path).unwrap();
            assert_eq!(Route::parse(&route.to_string()).unwrap(), route);
        }
    }
}
