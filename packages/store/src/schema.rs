//! # Recipe field schema
//!
//! A static table binding every optional recipe attribute to its server
//! column, its form input (which is also the key used by the legacy
//! notebook), its value kind and the form tier it belongs to. The form mapper,
//! form population and the notebook conversion all walk this one table
//! instead of iterating object keys.
//!
//! The four core fields (`recipe_name`, `description`, `rating`,
//! `date_created`) are not optional attributes and are listed separately in
//! [`REQUIRED_FIELDS`].

use crate::models::RecipeDetails;

/// How a field's raw input string is coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
    Integer,
}

/// Which form mode shows the input. Pro shows everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Basic,
    Pro,
}

/// Form section an input is grouped under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Bean,
    Roast,
    Brew,
    Water,
    Serving,
    Sensory,
    Notes,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Bean,
        Section::Roast,
        Section::Brew,
        Section::Water,
        Section::Serving,
        Section::Sensory,
        Section::Notes,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Bean => "Bean Information",
            Section::Roast => "Roasting Profile",
            Section::Brew => "Brewing Parameters",
            Section::Water => "Water Chemistry",
            Section::Serving => "Serving Preferences",
            Section::Sensory => "Sensory & Evaluation",
            Section::Notes => "Additional Notes",
        }
    }
}

/// A coerced field value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Float(Option<f64>),
    Integer(Option<i64>),
}

impl FieldValue {
    /// Coerce a raw input string. Blank or unparsable input becomes `None`;
    /// text is trimmed.
    pub fn parse(kind: FieldKind, raw: &str) -> Self {
        let raw = raw.trim();
        match kind {
            FieldKind::Text => {
                FieldValue::Text((!raw.is_empty()).then(|| raw.to_string()))
            }
            FieldKind::Float => FieldValue::Float(parse_float(raw)),
            FieldKind::Integer => {
                FieldValue::Integer(parse_float(raw).map(|f| f.trunc() as i64))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(v) => v.is_none(),
            FieldValue::Float(v) => v.is_none(),
            FieldValue::Integer(v) => v.is_none(),
        }
    }

    /// The string an input shows for this value (empty when absent).
    pub fn to_input(&self) -> String {
        match self {
            FieldValue::Text(v) => v.clone().unwrap_or_default(),
            FieldValue::Float(v) => v.map(|f| f.to_string()).unwrap_or_default(),
            FieldValue::Integer(v) => v.map(|i| i.to_string()).unwrap_or_default(),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(v) => v,
            other => (!other.is_empty()).then(|| other.to_input()),
        }
    }

    pub fn into_float(self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => v,
            FieldValue::Integer(v) => v.map(|i| i as f64),
            FieldValue::Text(v) => v.as_deref().and_then(parse_float),
        }
    }

    pub fn into_integer(self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => v,
            FieldValue::Float(v) => v.map(|f| f.trunc() as i64),
            FieldValue::Text(v) => v.as_deref().and_then(parse_float).map(|f| f.trunc() as i64),
        }
    }
}

/// Parse a finite float; blank, garbage, NaN and infinities are `None`.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Binding of one optional recipe attribute.
pub struct FieldSpec {
    /// Server column / JSON key.
    pub name: &'static str,
    /// Form input name; also the legacy notebook key.
    pub input: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub section: Section,
    pub tier: Tier,
    /// Select options (slug values). Empty means a free input.
    pub choices: &'static [&'static str],
    pub read: fn(&RecipeDetails) -> FieldValue,
    pub write: fn(&mut RecipeDetails, FieldValue),
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("input", &self.input)
            .field("kind", &self.kind)
            .field("tier", &self.tier)
            .finish()
    }
}

impl FieldSpec {
    pub fn parse(&self, raw: &str) -> FieldValue {
        FieldValue::parse(self.kind, raw)
    }

    pub fn get(&self, details: &RecipeDetails) -> FieldValue {
        (self.read)(details)
    }

    pub fn set(&self, details: &mut RecipeDetails, value: FieldValue) {
        (self.write)(details, value)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(
            self.name,
            "aroma_notes" | "defects" | "overall_impression" | "brewing_notes"
        )
    }
}

macro_rules! text_field {
    ($name:ident, $input:literal, $label:literal, $section:ident, $tier:ident) => {
        text_field!($name, $input, $label, $section, $tier, &[])
    };
    ($name:ident, $input:literal, $label:literal, $section:ident, $tier:ident, $choices:expr) => {
        FieldSpec {
            name: stringify!($name),
            input: $input,
            label: $label,
            kind: FieldKind::Text,
            section: Section::$section,
            tier: Tier::$tier,
            choices: $choices,
            read: |d| FieldValue::Text(d.$name.clone()),
            write: |d, v| d.$name = v.into_text(),
        }
    };
}

macro_rules! float_field {
    ($name:ident, $input:literal, $label:literal, $section:ident, $tier:ident) => {
        FieldSpec {
            name: stringify!($name),
            input: $input,
            label: $label,
            kind: FieldKind::Float,
            section: Section::$section,
            tier: Tier::$tier,
            choices: &[],
            read: |d| FieldValue::Float(d.$name),
            write: |d, v| d.$name = v.into_float(),
        }
    };
}

macro_rules! integer_field {
    ($name:ident, $input:literal, $label:literal, $section:ident, $tier:ident) => {
        FieldSpec {
            name: stringify!($name),
            input: $input,
            label: $label,
            kind: FieldKind::Integer,
            section: Section::$section,
            tier: Tier::$tier,
            choices: &[],
            read: |d| FieldValue::Integer(d.$name),
            write: |d, v| d.$name = v.into_integer(),
        }
    };
}

pub const BEAN_REGIONS: &[&str] = &[
    "ethiopia", "kenya", "colombia", "brazil", "guatemala", "costa-rica", "india", "indonesia",
    "yemen", "panama",
];

pub const BREW_METHODS: &[&str] = &[
    "espresso", "pour-over", "french-press", "aeropress", "cold-brew", "turkish", "moka-pot",
    "drip-coffee", "siphon",
];

pub const ROAST_LEVELS: &[&str] = &["light", "medium-light", "medium", "medium-dark", "dark"];

pub const PROCESSING_TYPES: &[&str] = &["washed", "natural", "honey", "anaerobic", "wet-hulled"];

pub const MILK_PREFERENCES: &[&str] = &["none", "whole", "skim", "oat", "almond", "soy"];

/// Every optional recipe attribute, in form order.
pub static RECIPE_FIELDS: &[FieldSpec] = &[
    text_field!(bean_variety, "beanVariety", "Bean Variety", Bean, Basic),
    text_field!(bean_region, "beanRegion", "Region", Bean, Basic, BEAN_REGIONS),
    text_field!(india_estate, "indiaEstate", "Estate", Bean, Basic),
    text_field!(processing_type, "processingType", "Processing", Bean, Pro, PROCESSING_TYPES),
    text_field!(roast_type, "roastType", "Roast Type", Roast, Pro),
    text_field!(roast_level, "roastLevel", "Roast Level", Roast, Basic, ROAST_LEVELS),
    text_field!(crack_time, "crackTime", "Crack Development", Roast, Pro),
    float_field!(roast_time, "roastTime", "Roast Time (min)", Roast, Pro),
    float_field!(development_time, "developmentTime", "Development (%)", Roast, Pro),
    text_field!(brew_method, "brewMethod", "Brew Method", Brew, Basic, BREW_METHODS),
    integer_field!(grind_microns, "grindMicrons", "Grind Size (μm)", Brew, Pro),
    float_field!(coffee_amount, "coffeeAmount", "Coffee (g)", Brew, Basic),
    float_field!(water_amount, "waterAmount", "Water (ml)", Brew, Basic),
    integer_field!(water_temp, "waterTemp", "Water Temp (°C)", Brew, Basic),
    float_field!(brew_time, "brewTime", "Brew Time (min)", Brew, Basic),
    text_field!(water_composition, "waterComposition", "Water", Water, Pro),
    float_field!(tds, "tds", "TDS (ppm)", Water, Pro),
    float_field!(calcium, "calcium", "Calcium (mg/L)", Water, Pro),
    float_field!(magnesium, "magnesium", "Magnesium (mg/L)", Water, Pro),
    float_field!(potassium, "potassium", "Potassium (mg/L)", Water, Pro),
    float_field!(sodium, "sodium", "Sodium (mg/L)", Water, Pro),
    text_field!(milk_preference, "milkPreference", "Milk", Serving, Basic, MILK_PREFERENCES),
    text_field!(serving_temp, "servingTemp", "Serving Temp", Serving, Pro),
    text_field!(sweetener, "sweetener", "Sweetener", Serving, Basic),
    float_field!(sweetener_quantity, "sweetenerQuantity", "Sweetener (g)", Serving, Pro),
    float_field!(serving_size, "servingSize", "Serving Size (ml)", Serving, Pro),
    text_field!(aroma_notes, "aromaNotes", "Aroma Notes", Sensory, Pro),
    text_field!(body, "body", "Body", Sensory, Pro),
    text_field!(acidity_type, "acidityType", "Acidity", Sensory, Pro),
    text_field!(sweetness, "sweetness", "Sweetness", Sensory, Pro),
    text_field!(balance, "balance", "Balance", Sensory, Pro),
    text_field!(aftertaste, "aftertaste", "Aftertaste", Sensory, Basic),
    text_field!(clean_cup, "cleanCup", "Clean Cup", Sensory, Pro),
    text_field!(uniformity, "uniformity", "Uniformity", Sensory, Pro),
    float_field!(cupping_score, "cuppingScore", "Cupping Score", Sensory, Pro),
    text_field!(cupping_method, "cuppingMethod", "Cupping Method", Sensory, Pro),
    text_field!(defects, "defects", "Defects", Sensory, Pro),
    text_field!(overall_impression, "overallImpression", "Overall Impression", Sensory, Pro),
    text_field!(brewing_notes, "brewingNotes", "Brewing Notes", Notes, Basic),
];

/// Look a field up by form input name.
pub fn field_by_input(input: &str) -> Option<&'static FieldSpec> {
    RECIPE_FIELDS.iter().find(|f| f.input == input)
}

/// A core (non-optional) recipe field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreField {
    pub name: &'static str,
    pub input: &'static str,
    pub label: &'static str,
}

pub const RECIPE_NAME: CoreField = CoreField {
    name: "recipe_name",
    input: "recipeName",
    label: "Recipe Name",
};
pub const DESCRIPTION: CoreField = CoreField {
    name: "description",
    input: "description",
    label: "Description",
};
pub const RATING: CoreField = CoreField {
    name: "rating",
    input: "rating",
    label: "Rating (1-10)",
};
pub const DATE_CREATED: CoreField = CoreField {
    name: "date_created",
    input: "dateCreated",
    label: "Date Created",
};

/// Fields that must be non-blank before a server recipe is submitted, in check order.
pub const REQUIRED_FIELDS: [CoreField; 4] = [RECIPE_NAME, DESCRIPTION, RATING, DATE_CREATED];

/// Fields the legacy notebook requires, in check order.
pub const LEGACY_REQUIRED_FIELDS: [CoreField; 5] = [
    RECIPE_NAME,
    DESCRIPTION,
    CoreField {
        name: "aftertaste",
        input: "aftertaste",
        label: "Aftertaste",
    },
    RATING,
    DATE_CREATED,
];

/// Suggested grind for a brew method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrindRecommendation {
    pub method: &'static str,
    pub size: &'static str,
    pub microns: i64,
}

pub const GRIND_RECOMMENDATIONS: &[GrindRecommendation] = &[
    GrindRecommendation {
        method: "espresso",
        size: "fine",
        microns: 350,
    },
    GrindRecommendation {
        method: "pour-over",
        size: "medium-fine",
        microns: 700,
    },
    GrindRecommendation {
        method: "french-press",
        size: "coarse",
        microns: 1200,
    },
    GrindRecommendation {
        method: "aeropress",
        size: "medium-fine",
        microns: 650,
    },
    GrindRecommendation {
        method: "cold-brew",
        size: "coarse",
        microns: 1300,
    },
    GrindRecommendation {
        method: "turkish",
        size: "extra-fine",
        microns: 300,
    },
    GrindRecommendation {
        method: "moka-pot",
        size: "fine",
        microns: 500,
    },
    GrindRecommendation {
        method: "drip-coffee",
        size: "medium",
        microns: 800,
    },
    GrindRecommendation {
        method: "siphon",
        size: "medium",
        microns: 750,
    },
];

pub fn grind_recommendation(brew_method: &str) -> Option<&'static GrindRecommendation> {
    GRIND_RECOMMENDATIONS.iter().find(|g| g.method == brew_method)
}

/// Estates offered when the region is India, grouped Karnataka, Kerala, Tamil Nadu.
pub const INDIA_ESTATES: &[&str] = &[
    "Baba Budan Giri Estate",
    "Balehonnur Estate",
    "Kerehaklu Estate",
    "Wayanad Estate",
    "Nelliampathi Estate",
    "Munnar Estate",
    "Kotagiri Estate",
    "Coonoor Estate",
    "Yercaud Estate",
];

/// Option value for an estate name: lower-case, whitespace runs become `-`.
pub fn estate_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_inputs_are_unique() {
        for (i, a) in RECIPE_FIELDS.iter().enumerate() {
            for b in &RECIPE_FIELDS[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.input, b.input);
            }
        }
    }

    #[test]
    fn test_every_field_round_trips_through_details() {
        let mut details = RecipeDetails::default();
        for spec in RECIPE_FIELDS {
            let raw = match spec.kind {
                FieldKind::Text => "value",
                FieldKind::Float => "12.5",
                FieldKind::Integer => "42",
            };
            spec.set(&mut details, spec.parse(raw));
        }
        for spec in RECIPE_FIELDS {
            let value = spec.get(&details);
            assert!(!value.is_empty(), "{} was not written", spec.name);
        }
        assert_eq!(details.tds, Some(12.5));
        assert_eq!(details.grind_microns, Some(42));
        assert_eq!(details.brewing_notes.as_deref(), Some("value"));
    }

    #[test]
    fn test_blank_and_garbage_parse_to_none() {
        assert_eq!(FieldValue::parse(FieldKind::Float, "   "), FieldValue::Float(None));
        assert_eq!(FieldValue::parse(FieldKind::Float, "abc"), FieldValue::Float(None));
        assert_eq!(FieldValue::parse(FieldKind::Float, "NaN"), FieldValue::Float(None));
        assert_eq!(FieldValue::parse(FieldKind::Integer, ""), FieldValue::Integer(None));
        assert_eq!(FieldValue::parse(FieldKind::Integer, "650.9"), FieldValue::Integer(Some(650)));
        assert_eq!(FieldValue::parse(FieldKind::Text, "  "), FieldValue::Text(None));
        assert_eq!(
            FieldValue::parse(FieldKind::Text, "  washed "),
            FieldValue::Text(Some("washed".to_string()))
        );
    }

    #[test]
    fn test_lookup_helpers() {
        assert_eq!(field_by_input("cleanCup").map(|f| f.name), Some("clean_cup"));
        assert!(field_by_input("nope").is_none());
        assert_eq!(grind_recommendation("aeropress").map(|g| g.microns), Some(650));
        assert!(grind_recommendation("instant").is_none());
        assert_eq!(estate_slug("Baba Budan Giri Estate"), "baba-budan-giri-estate");
    }
}
