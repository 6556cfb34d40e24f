// ── Airport records and display labels ──
//
// The datasets are static JSON arrays. Both the compact schema
// (`code`, `municipality`, `country`) and OurAirports-style exports
// (`iata_code`, `iso_country`, `gps_code`) deserialize into `Airport`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::leg::Endpoint;

/// One airport of the static dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: u64,
    /// Primary (IATA) code. Empty for many private fields.
    #[serde(default, alias = "iata_code", alias = "iata", deserialize_with = "lenient_string")]
    pub code: String,
    /// ICAO or local identifier.
    #[serde(default, alias = "gps_code", alias = "icao", deserialize_with = "lenient_string")]
    pub ident: String,
    pub name: String,
    #[serde(default, alias = "city", deserialize_with = "lenient_string")]
    pub municipality: String,
    #[serde(default, alias = "iso_country", deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub keywords: String,
    /// Precomputed relevance; higher ranks first.
    #[serde(default)]
    pub score: i64,
}

impl Airport {
    /// The code shown to travellers: primary code, else the identifier.
    pub fn display_code(&self) -> &str {
        if self.code.is_empty() {
            &self.ident
        } else {
            &self.code
        }
    }

    /// `"Name, City (CODE), CC"`, leaving out empty parts.
    pub fn label(&self) -> String {
        let mut out = self.name.clone();
        if !self.municipality.is_empty() {
            out.push_str(", ");
            out.push_str(&self.municipality);
        }
        let code = self.display_code();
        if !code.is_empty() {
            out.push_str(" (");
            out.push_str(code);
            out.push(')');
        }
        if !self.country.is_empty() {
            out.push_str(", ");
            out.push_str(&self.country);
        }
        out
    }

    /// The endpoint a selection emits: display label plus resolved id and
    /// structured fields, so nothing downstream re-parses the label.
    pub fn to_endpoint(&self) -> Endpoint {
        Endpoint {
            label: self.label(),
            id: Some(self.id),
            code: non_empty(self.display_code()),
            city: non_empty(&self.municipality),
            country: non_empty(&self.country),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_owned()) }
}

/// Accept `null`, strings, numbers, and string arrays (joined with `", "`).
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.trim().to_owned(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    })
}

// ── Label parsing (fallback only) ───────────────────────────────────

/// Fields recovered from a free-text label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelParts {
    pub name: Option<String>,
    pub city: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
}

static FULL_LABEL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[^,]+?),\s*(?P<city>[^,(]+?)\s*\((?P<code>[A-Z0-9]{3,4})\)(?:,\s*(?P<country>[A-Z]{2}))?\s*$",
    )
    .ok()
});

static CODE_ONLY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\((?P<code>[A-Z0-9]{3,4})\)").ok());

static BARE_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{3,4}$").ok());

/// Recover name/city/code/country from `"Name, City (CODE), CC"`.
///
/// Used only for endpoints staged without structured fields.
pub fn parse_label(label: &str) -> LabelParts {
    let label = label.trim();

    if let Some(caps) = FULL_LABEL.as_ref().and_then(|re| re.captures(label)) {
        let group = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_owned());
        return LabelParts {
            name: group("name"),
            city: group("city"),
            code: group("code"),
            country: group("country"),
        };
    }

    if BARE_CODE.as_ref().is_some_and(|re| re.is_match(label)) {
        return LabelParts {
            code: Some(label.to_owned()),
            ..LabelParts::default()
        };
    }

    let code = CODE_ONLY
        .as_ref()
        .and_then(|re| re.captures(label))
        .and_then(|caps| caps.name("code"))
        .map(|m| m.as_str().to_owned());
    let city = label
        .split('(')
        .next()
        .map(str::trim)
        .filter(|s| code.is_some() && !s.is_empty())
        .map(String::from);

    LabelParts {
        city,
        code,
        ..LabelParts::default()
    }
}
