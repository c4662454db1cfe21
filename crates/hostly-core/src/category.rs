//! Canonical recommendation categories and the keyword resolver.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalCategory {
    Restaurants,
    Sights,
    Shopping,
    Nightlife,
    Kids,
    Outdoors,
    Transport,
    Pharmacy,
    Other,
}

impl CanonicalCategory {
    pub const ALL: [CanonicalCategory; 9] = [
        CanonicalCategory::Restaurants,
        CanonicalCategory::Sights,
        CanonicalCategory::Shopping,
        CanonicalCategory::Nightlife,
        CanonicalCategory::Kids,
        CanonicalCategory::Outdoors,
        CanonicalCategory::Transport,
        CanonicalCategory::Pharmacy,
        CanonicalCategory::Other,
    ];

    /// Stable identifier stored in the `categories.type` column.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            CanonicalCategory::Restaurants => "restaurants",
            CanonicalCategory::Sights => "sights",
            CanonicalCategory::Shopping => "shopping",
            CanonicalCategory::Nightlife => "nightlife",
            CanonicalCategory::Kids => "kids",
            CanonicalCategory::Outdoors => "outdoors",
            CanonicalCategory::Transport => "transport",
            CanonicalCategory::Pharmacy => "pharmacy",
            CanonicalCategory::Other => "other",
        }
    }

    /// Label used when a category record is created for a property.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            CanonicalCategory::Restaurants => "Restaurants",
            CanonicalCategory::Sights => "Sights & Culture",
            CanonicalCategory::Shopping => "Shopping",
            CanonicalCategory::Nightlife => "Nightlife",
            CanonicalCategory::Kids => "Kids",
            CanonicalCategory::Outdoors => "Outdoors",
            CanonicalCategory::Transport => "Public Transport",
            CanonicalCategory::Pharmacy => "Pharmacies",
            CanonicalCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for CanonicalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| format!("unknown category \"{s}\""))
    }
}

/// Keyword groups checked in order; the first group with a keyword
/// contained in the hint wins.
///
/// Transport and pharmacy sit first because their keywords are narrow.
/// Restaurants precede nightlife so "bar & grill" or "barbecue" stay food.
pub(crate) const KEYWORD_TABLE: &[(&[&str], CanonicalCategory)] = &[
    (
        &[
            "transit", "bus stop", "bus_stop", "bus station", "station", "parada", "terminal",
            "subway", "train",
        ],
        CanonicalCategory::Transport,
    ),
    (
        &["pharmacy", "farmacia", "drugstore", "chemist"],
        CanonicalCategory::Pharmacy,
    ),
    (
        &[
            "restaurant", "parrilla", "steakhouse", "grill", "comida", "food", "barbecue", "bbq",
            "pizz", "cafe", "café", "coffee", "brunch", "bakery", "panader",
        ],
        CanonicalCategory::Restaurants,
    ),
    (
        &[
            "bar", "pub", "brewery", "beer", "cervecer", "wine", "vinoteca", "nightclub",
            "nightlife", "biergarten",
        ],
        CanonicalCategory::Nightlife,
    ),
    (
        &[
            "kids", "children", "niños", "family", "playground", "water_park", "water park",
            "amusement park", "theme park", "helader", "ice cream",
        ],
        CanonicalCategory::Kids,
    ),
    (
        &[
            "outdoor", "trail", "hiking", "trekking", "sendero", "peak", "alpine_hut",
            "wilderness_hut", "mountain", "national park", "parque nacional", "nature reserve",
        ],
        CanonicalCategory::Outdoors,
    ),
    (
        &[
            "tourist", "tourism", "attraction", "sight", "museum", "museo", "viewpoint",
            "mirador", "artwork", "cinema", "movie", "theater", "theatre", "bowling", "escape",
            "entertainment",
        ],
        CanonicalCategory::Sights,
    ),
    (
        &[
            "clothing", "fashion", "boutique", "souvenir", "gift", "shoe", "footwear", "store",
            "shop", "mall", "supermarket", "grocery", "market",
        ],
        CanonicalCategory::Shopping,
    ),
];

/// Map a free-text provider category or query keyword to a canonical category.
///
/// Case-insensitive substring match against [`KEYWORD_TABLE`]; falls back
/// to [`CanonicalCategory::Other`].
#[must_use]
pub fn resolve_category(hint: &str) -> CanonicalCategory {
    let lower = hint.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(CanonicalCategory::Other, |(_, category)| *category)
}
