// ── Airport autocomplete ──
//
// The dataset is a static JSON array loaded once into memory. Searches
// never leave the process.

use std::cmp::Reverse;
use std::path::Path;

use tracing::debug;

use crate::config::DEFAULT_MIN_QUERY_LEN;
use crate::error::CoreError;
use crate::model::{Airport, Endpoint};

/// Sample dataset compiled into the binary.
const BUNDLED_AIRPORTS: &str = include_str!("../data/airports.json");

/// In-memory airport dataset with precomputed search text.
#[derive(Debug, Clone)]
pub struct AirportIndex {
    airports: Vec<Airport>,
    /// Lowercased `code ident name municipality country keywords`,
    /// parallel to `airports`.
    haystacks: Vec<String>,
    min_query_len: usize,
}

impl AirportIndex {
    pub fn new(airports: Vec<Airport>) -> Self {
        let haystacks = airports.iter().map(search_text).collect();
        Self {
            airports,
            haystacks,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let airports: Vec<Airport> =
            serde_json::from_str(raw).map_err(|e| CoreError::Dataset {
                message: e.to_string(),
            })?;
        debug!(airports = airports.len(), "airport dataset loaded");
        Ok(Self::new(airports))
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CoreError::Dataset {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_json(&raw)
    }

    /// The sample dataset shipped with the crate.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_AIRPORTS)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }

    pub fn get(&self, id: u64) -> Option<&Airport> {
        self.airports.iter().find(|a| a.id == id)
    }

    /// Rank candidates for a free-text query.
    ///
    /// Matches are case-insensitive substrings of code, ident, name,
    /// municipality, country or keywords. Records with a primary code come
    /// first, an exact code match leads those, then higher `score` wins.
    /// Ties keep dataset order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Airport> {
        let query = query.trim();
        if query.chars().count() < self.min_query_len || limit == 0 {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        let mut hits: Vec<&Airport> = self
            .airports
            .iter()
            .zip(&self.haystacks)
            .filter(|(_, hay)| hay.contains(&needle))
            .map(|(airport, _)| airport)
            .collect();

        hits.sort_by_key(|a| {
            (
                a.code.is_empty(),
                !a.code.eq_ignore_ascii_case(query),
                Reverse(a.score),
            )
        });
        hits.truncate(limit);
        hits
    }

    /// Resolve user input to a single airport without asking.
    ///
    /// Accepts a numeric id, an exact code or ident, or a query with
    /// exactly one candidate. Anything ambiguous is `None`.
    pub fn resolve(&self, query: &str) -> Option<&Airport> {
        let query = query.trim();
        if let Ok(id) = query.parse::<u64>() {
            return self.get(id);
        }
        if let Some(exact) = self
            .airports
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(query))
            .or_else(|| {
                self.airports
                    .iter()
                    .find(|a| a.ident.eq_ignore_ascii_case(query))
            })
        {
            return Some(exact);
        }
        match self.search(query, 2).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// What a selection hands the form: label and id together.
    pub fn select(&self, query: &str) -> Option<Endpoint> {
        self.resolve(query).map(Airport::to_endpoint)
    }
}

fn search_text(a: &Airport) -> String {
    [
        a.code.as_str(),
        a.ident.as_str(),
        a.name.as_str(),
        a.municipality.as_str(),
        a.country.as_str(),
        a.keywords.as_str(),
    ]
    .join("\u{1f}")
    .to_lowercase()
}
