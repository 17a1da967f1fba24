use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::engine::{SelectionPolicy, TagVocabulary};
use crate::error::{config_error, Error};

pub const DEFAULT_PLACES_API_BASE: &str = "maps.googleapis.com";
pub const DEFAULT_ROUTES_API_BASE: &str = "routes.googleapis.com";
pub const DEFAULT_START_PLACE: &str = "Hakata Station";

#[derive(Clone, Debug)]
pub struct Config {
    pub google_maps_api_key: String,
    pub places_api_base: String,
    pub routes_api_base: String,
    pub language: String,
    /// Appended to geocoding queries to keep matches in the service area.
    pub region_hint: Option<String>,
    pub travel_mode: String,
    pub default_start_place: String,
    pub selection_policy: SelectionPolicy,
    pub search_concurrency: usize,
    pub tag_vocabulary_path: Option<PathBuf>,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Builds the config from `lookup`. Unset and blank variables fall back
    /// to defaults; a variable that is set but unreadable is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let get = |key: &str| -> Result<Option<String>, Error> {
            match lookup(key) {
                Ok(value) if value.trim().is_empty() => Ok(None),
                Ok(value) => Ok(Some(value)),
                Err(env::VarError::NotPresent) => Ok(None),
                Err(err) => {
                    tracing::error!(%key, %err, "unreadable environment variable");
                    Err(err.into())
                }
            }
        };
        let or = |key: &str, default: &str| -> Result<String, Error> {
            Ok(get(key)?.unwrap_or_else(|| default.to_string()))
        };

        let google_maps_api_key = get("GOOGLE_MAPS_API_KEY")?
            .ok_or_else(|| config_error("GOOGLE_MAPS_API_KEY is not set"))?;

        let selection_policy = match get("SELECTION_POLICY")? {
            Some(name) => name.parse()?,
            None => SelectionPolicy::default(),
        };

        let search_concurrency: usize = parse_or(get("SEARCH_CONCURRENCY")?, "SEARCH_CONCURRENCY", 4)?;

        let listen_addr = parse_or(
            get("LISTEN_ADDR")?,
            "LISTEN_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3000)),
        )?;

        Ok(Self {
            google_maps_api_key,
            places_api_base: or("GOOGLE_MAPS_API_BASE", DEFAULT_PLACES_API_BASE)?,
            routes_api_base: or("GOOGLE_ROUTES_API_BASE", DEFAULT_ROUTES_API_BASE)?,
            language: or("GOOGLE_MAPS_LANGUAGE", "ja")?,
            region_hint: get("GEOCODE_REGION_HINT")?,
            travel_mode: or("TRAVEL_MODE", "DRIVE")?.to_ascii_uppercase(),
            default_start_place: or("DEFAULT_START_PLACE", DEFAULT_START_PLACE)?,
            selection_policy,
            search_concurrency: search_concurrency.max(1),
            tag_vocabulary_path: get("TAG_VOCABULARY_PATH")?.map(PathBuf::from),
            listen_addr,
        })
    }

    /// The configured vocabulary file, or the built-in table.
    pub fn load_vocabulary(&self) -> Result<Arc<TagVocabulary>, Error> {
        let vocabulary = match &self.tag_vocabulary_path {
            Some(path) => TagVocabulary::from_path(path)?,
            None => TagVocabulary::builtin(),
        };

        Ok(Arc::new(vocabulary))
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, Error> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| config_error(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
