use serde::{Deserialize, Serialize};

/// One country's display data, as shown on a card.
///
/// Built from a REST Countries entry via [`From<CountryEntry>`]. Owned by
/// `App::results` and replaced wholesale whenever a fetch settles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: u64,
    /// Surface area in km²
    pub area: f64,
    /// Flag image URI
    pub flag: String,
    /// Map URI (Google Maps, falling back to OpenStreetMap)
    pub map: String,
    /// Unicode flag, when the API provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_emoji: Option<String>,
}

impl CountryRecord {
    /// Population exactly as the API reported it (no grouping separators).
    pub fn population_label(&self) -> String {
        self.population.to_string()
    }

    /// Area with its unit, e.g. `"551695 km²"`.
    ///
    /// `f64`'s `Display` drops a trailing `.0`, so whole areas print as integers.
    pub fn area_label(&self) -> String {
        format!("{} km\u{00B2}", self.area)
    }
}

// ============================================================================
// REST Countries v3.1 wire types
// ============================================================================

/// The `fields` query parameter sent with every request, limiting the payload
/// to what `CountryRecord` needs.
pub const REQUESTED_FIELDS: &str = "name,capital,region,population,area,flags,maps,flag";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CountryName {
    #[serde(default)]
    pub common: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FlagImages {
    pub png: Option<String>,
    pub svg: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapLinks {
    pub google_maps: Option<String>,
    pub open_street_maps: Option<String>,
}

/// A single element of the JSON array returned by `/all` and `/name/{name}`.
///
/// Every field is defaulted: the API omits `capital` for some territories
/// (e.g. Antarctica) and only returns fields listed in `fields=`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CountryEntry {
    #[serde(default)]
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub flags: FlagImages,
    #[serde(default)]
    pub maps: MapLinks,
    pub flag: Option<String>,
}

impl From<CountryEntry> for CountryRecord {
    fn from(entry: CountryEntry) -> Self {
        let CountryEntry {
            name,
            capital,
            region,
            population,
            area,
            flags,
            maps,
            flag,
        } = entry;

        Self {
            name: name.common,
            capital: capital.into_iter().next().unwrap_or_default(),
            region,
            population,
            area,
            flag: flags.png.or(flags.svg).unwrap_or_default(),
            map: maps
                .google_maps
                .or(maps.open_street_maps)
                .unwrap_or_default(),
            flag_emoji: flag.filter(|f| !f.is_empty()),
        }
    }
}
