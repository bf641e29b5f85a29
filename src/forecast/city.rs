//! The static city-name to provider-code directory.

use crate::error::{ChartError, Result};
use log::debug;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Result of a city-code lookup.
///
/// A miss is an explicit variant rather than a bare `None` so callers have to
/// decide what an unknown city means before they can get at a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityLookup {
    /// The provider code for the requested city.
    Found(String),
    /// The requested name is not in the directory.
    Unknown,
}

impl CityLookup {
    /// The code, if the lookup succeeded.
    pub fn code(&self) -> Option<&str> {
        match self {
            CityLookup::Found(code) => Some(code),
            CityLookup::Unknown => None,
        }
    }
}

/// Immutable mapping from city name to provider city code.
///
/// Loaded once from the provider's `city.json` document, which nests cities
/// inside provinces: `{"城市代码": [{"市": [{"市名": name, "编码": code}]}]}`.
#[derive(Debug, Clone)]
pub struct CityDirectory {
    codes: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct CityFile {
    #[serde(rename = "城市代码")]
    provinces: Vec<Province>,
}

#[derive(Debug, Deserialize)]
struct Province {
    #[serde(rename = "市")]
    cities: Vec<CityEntry>,
}

#[derive(Debug, Deserialize)]
struct CityEntry {
    #[serde(rename = "市名")]
    name: String,
    #[serde(rename = "编码")]
    code: String,
}

impl CityDirectory {
    /// Load the directory from a city.json file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChartError::MissingResource(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)
            .map_err(|err| ChartError::MalformedResponse(format!("{}: {}", path.display(), err)))?;

        Self::from_json(&contents)
    }

    /// Build the directory from the raw JSON document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: CityFile = serde_json::from_str(contents)?;

        let codes: HashMap<String, String> = file
            .provinces
            .into_iter()
            .flat_map(|province| province.cities)
            .map(|city| (city.name, city.code))
            .collect();

        debug!("loaded {} city codes", codes.len());
        Ok(CityDirectory { codes })
    }

    /// Look up the provider code for a city by exact name.
    pub fn lookup(&self, city_name: &str) -> CityLookup {
        match self.codes.get(city_name) {
            Some(code) => CityLookup::Found(code.clone()),
            None => CityLookup::Unknown,
        }
    }

    /// Number of cities in the directory.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if the directory holds no cities at all.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "城市代码": [
            {"市": [
                {"市名": "南京", "编码": "101190101"},
                {"市名": "苏州", "编码": "101190401"}
            ]},
            {"市": [
                {"市名": "北京", "编码": "101010100"}
            ]}
        ]
    }"#;

    #[test]
    fn loads_all_provinces() {
        let directory = CityDirectory::from_json(SAMPLE).expect("should parse");
        assert_eq!(directory.len(), 3);
        assert!(!directory.is_empty());
    }

    #[test]
    fn lookup_hit() {
        let directory = CityDirectory::from_json(SAMPLE).expect("should parse");
        assert_eq!(
            directory.lookup("南京"),
            CityLookup::Found("101190101".to_owned())
        );
        assert_eq!(directory.lookup("北京").code(), Some("101010100"));
    }

    #[test]
    fn lookup_miss_is_explicit() {
        let directory = CityDirectory::from_json(SAMPLE).expect("should parse");
        assert_eq!(directory.lookup("上海"), CityLookup::Unknown);
        assert_eq!(directory.lookup("上海").code(), None);
    }

    #[test]
    fn malformed_directory_is_an_error() {
        assert!(CityDirectory::from_json("{}").is_err());
        assert!(CityDirectory::from_json(r#"{"城市代码": [{"市": [{}]}]}"#).is_err());
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = CityDirectory::load("does/not/exist.json").unwrap_err();
        match err {
            ChartError::MissingResource(path) => {
                assert!(path.ends_with("exist.json"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
