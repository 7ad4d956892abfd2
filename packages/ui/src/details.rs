//! # Recipe detail lines
//!
//! A recipe card shows a short list of `label: value` lines whose content
//! depends on the card tier. [`DETAIL_FIELDS`] is the single table both tiers
//! are rendered from, so every basic label also appears in pro, in the same
//! order. Fields with no value are skipped.
//!
//! | Label | Tier | Format |
//! |-------|------|--------|
//! | Bean | basic | `variety from Region` (pro appends ` (estate)`) |
//! | Roast | basic | level (pro: `level (type)`) |
//! | Recipe | basic | `18g : 300ml` |
//! | Grind Size | pro | `700μm` |
//! | Cupping Score | pro | `86/100` |

use store::models::format_ratio;
use store::schema::Tier;
use store::Recipe;

/// One rendered `label: value` line.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

/// A card line: shown at `tier` and above, formatted by `format`.
pub struct DetailField {
    pub label: &'static str,
    pub tier: Tier,
    pub format: fn(&Recipe, Tier) -> Option<String>,
}

/// `pour-over` -> `Pour-over`, `lightRoast` -> `Light Roast`.
pub fn humanize(value: &str) -> String {
    let mut spaced = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `⭐` per whole point (at most ten) followed by `(r/10)`.
pub fn rating_stars(rating: f64) -> String {
    let stars = rating.trunc().clamp(0.0, 10.0) as usize;
    format!("{} ({rating}/10)", "⭐".repeat(stars))
}

/// `Mar 5, 2024` from an RFC 3339 timestamp, a naive timestamp or a plain date.
pub fn format_date(raw: &str) -> Option<String> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%b %-d, %Y").to_string())
}

fn text(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn human(value: &Option<String>) -> Option<String> {
    text(value).map(|v| humanize(&v))
}

fn bean(r: &Recipe, tier: Tier) -> Option<String> {
    let d = &r.details;
    let variety = text(&d.bean_variety);
    let region = human(&d.bean_region);
    let mut line = match (variety, region) {
        (Some(v), Some(g)) => format!("{v} from {g}"),
        (Some(v), None) => v,
        (None, Some(g)) => g,
        (None, None) => return None,
    };
    if tier == Tier::Pro {
        if let Some(estate) = human(&d.india_estate) {
            line.push_str(&format!(" ({estate})"));
        }
    }
    Some(line)
}

fn roast(r: &Recipe, tier: Tier) -> Option<String> {
    let level = human(&r.details.roast_level);
    if tier == Tier::Basic {
        return level;
    }
    match (level, human(&r.details.roast_type)) {
        (Some(l), Some(t)) => Some(format!("{l} ({t})")),
        (l, t) => l.or(t),
    }
}

fn amounts(r: &Recipe, _: Tier) -> Option<String> {
    match (r.details.coffee_amount, r.details.water_amount) {
        (Some(coffee), Some(water)) => Some(format!("{coffee}g : {water}ml")),
        (Some(coffee), None) => Some(format!("{coffee}g coffee")),
        (None, Some(water)) => Some(format!("{water}ml water")),
        (None, None) => None,
    }
}

fn minerals(r: &Recipe, _: Tier) -> Option<String> {
    let d = &r.details;
    let parts = [
        ("Ca", d.calcium),
        ("Mg", d.magnesium),
        ("K", d.potassium),
        ("Na", d.sodium),
    ]
    .into_iter()
    .filter_map(|(name, v)| v.map(|v| format!("{name}: {v}")))
    .collect::<Vec<_>>();
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn sweetener(r: &Recipe, _: Tier) -> Option<String> {
    let name = human(&r.details.sweetener)?;
    Some(match r.details.sweetener_quantity {
        Some(q) => format!("{name} ({q}g)"),
        None => name,
    })
}

macro_rules! line {
    ($label:literal, $tier:ident, $f:expr) => {
        DetailField {
            label: $label,
            tier: Tier::$tier,
            format: $f,
        }
    };
}

/// Card lines in display order.
pub static DETAIL_FIELDS: &[DetailField] = &[
    line!("Bean", Basic, bean),
    line!("Processing", Pro, |r, _| human(&r.details.processing_type)),
    line!("Roast", Basic, roast),
    line!("Roast Time", Pro, |r, _| r.details.roast_time.map(|v| format!("{v} min"))),
    line!("Development", Pro, |r, _| r.details.development_time.map(|v| format!("{v}%"))),
    line!("Crack", Pro, |r, _| human(&r.details.crack_time)),
    line!("Brew Method", Basic, |r, _| human(&r.details.brew_method)),
    line!("Grind Size", Pro, |r, _| r.details.grind_microns.map(|v| format!("{v}μm"))),
    line!("Water", Pro, |r, _| human(&r.details.water_composition)),
    line!("TDS", Pro, |r, _| r.details.tds.map(|v| format!("{v} ppm"))),
    line!("Minerals", Pro, minerals),
    line!("Recipe", Basic, amounts),
    line!("Ratio", Pro, |r, _| r.details.ratio().map(format_ratio)),
    line!("Water Temp", Pro, |r, _| r.details.water_temp.map(|v| format!("{v}°C"))),
    line!("Brew Time", Pro, |r, _| r.details.brew_time.map(|v| format!("{v} min"))),
    line!("Milk", Basic, |r, _| human(&r.details.milk_preference)),
    line!("Sweetener", Pro, sweetener),
    line!("Serving Temp", Pro, |r, _| human(&r.details.serving_temp)),
    line!("Serving Size", Pro, |r, _| r.details.serving_size.map(|v| format!("{v}ml"))),
    line!("Aroma", Pro, |r, _| text(&r.details.aroma_notes)),
    line!("Body", Pro, |r, _| human(&r.details.body)),
    line!("Acidity", Pro, |r, _| human(&r.details.acidity_type)),
    line!("Sweetness", Pro, |r, _| human(&r.details.sweetness)),
    line!("Balance", Pro, |r, _| human(&r.details.balance)),
    line!("Aftertaste", Pro, |r, _| text(&r.details.aftertaste)),
    line!("Clean Cup", Pro, |r, _| human(&r.details.clean_cup)),
    line!("Uniformity", Pro, |r, _| human(&r.details.uniformity)),
    line!("Cupping Score", Pro, |r, _| r.details.cupping_score.map(|v| format!("{v}/100"))),
    line!("Cupping Method", Pro, |r, _| human(&r.details.cupping_method)),
    line!("Defects", Pro, |r, _| text(&r.details.defects)),
    line!("Overall", Pro, |r, _| text(&r.details.overall_impression)),
];

/// A run of plain text or a `#tag` inside free text.
#[derive(Clone, Debug, PartialEq)]
pub enum TextSegment {
    Text(String),
    Tag(String),
}

/// Split text into plain runs and hashtags so tags can be rendered as links.
pub fn split_hashtags(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut chars = text.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if c == '#' && !prev.is_some_and(char::is_alphanumeric) {
            let mut tag = String::new();
            while let Some(&n) = chars.peek() {
                if n.is_alphanumeric() || n == '_' || n == '-' {
                    tag.push(n);
                    chars.next();
                } else {
                    break;
                }
            }
            if tag.is_empty() {
                plain.push(c);
                prev = Some(c);
            } else {
                if !plain.is_empty() {
                    segments.push(TextSegment::Text(std::mem::take(&mut plain)));
                }
                prev = tag.chars().last();
                segments.push(TextSegment::Tag(tag));
            }
            continue;
        }
        plain.push(c);
        prev = Some(c);
    }
    if !plain.is_empty() {
        segments.push(TextSegment::Text(plain));
    }
    segments
}

/// Lines to show for `recipe` on a card of the given tier.
pub fn render_details(recipe: &Recipe, tier: Tier) -> Vec<DetailLine> {
    DETAIL_FIELDS
        .iter()
        .filter(|f| f.tier <= tier)
        .filter_map(|f| {
            (f.format)(recipe, tier).map(|value| DetailLine {
                label: f.label,
                value,
            })
        })
        .collect()
}
