//! # Recipe notebook — the offline, local-storage recipe list
//!
//! [`Notebook`] keeps a list of [`LegacyRecipe`] records in any
//! [`KeyValueStore`], serialised wholesale as one JSON array under
//! [`NOTEBOOK_KEY`] after every mutation. There is no server involved.
//!
//! Records use the camelCase input names from [`crate::schema`] as keys and
//! hold every value as a string, so files exported by older versions import
//! unchanged. [`LegacyRecipe::to_recipe`] converts a record to the typed
//! [`Recipe`] so the same detail renderer serves both variants.
//!
//! ## Operations
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`add`](Notebook::add) | Insert at the front. |
//! | [`update`](Notebook::update) | Replace a record in place, keeping its id. |
//! | [`delete`](Notebook::delete) | Remove by id. |
//! | [`duplicate`](Notebook::duplicate) | Copy with a fresh id, `" (Copy)"` suffix, fresh timestamps; inserted at the front. |
//! | [`search`](Notebook::search) | Case-insensitive substring scan over all text. |
//! | [`import_json`](Notebook::import_json) | Merge a JSON array, giving every incoming record a fresh id. |
//! | [`export_json`](Notebook::export_json) | Pretty-printed JSON array; refused when empty. |
//! | [`stats`](Notebook::stats) | Totals, averages and most-used values. |

use std::collections::BTreeMap;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::models::{format_ratio, Recipe};
use crate::schema::{self, RECIPE_FIELDS};

/// Storage key of the notebook's JSON array.
pub const NOTEBOOK_KEY: &str = "coffeeRecipes";

const CREATED_AT: &str = "createdAt";
const RATIO: &str = "ratio";

/// A notebook record: an id plus string values keyed by input name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyRecipe {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// Older exports stored numeric ids.
fn lenient_id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl LegacyRecipe {
    /// Build a record from raw `(input name, value)` pairs. Blank values are
    /// dropped; `createdAt` is stamped and `ratio` computed when both amounts
    /// are present.
    pub fn from_inputs<I, K, V>(id: String, inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut fields = BTreeMap::new();
        for (key, value) in inputs {
            let value = value.as_ref().trim();
            if !value.is_empty() {
                fields.insert(key.into(), Value::String(value.to_string()));
            }
        }
        fields.insert(CREATED_AT.to_string(), Value::String(now_rfc3339()));
        let mut recipe = Self { id, fields };
        if let Some(ratio) = recipe.ratio_text() {
            recipe.fields.insert(RATIO.to_string(), Value::String(ratio));
        }
        recipe
    }

    /// A field as text. Strings are trimmed, numbers formatted; blank is `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        self.text(schema::RECIPE_NAME.input).unwrap_or_default()
    }

    pub fn rating(&self) -> Option<f64> {
        self.text(schema::RATING.input).as_deref().and_then(schema::parse_float)
    }

    pub fn created_at(&self) -> Option<String> {
        self.text(CREATED_AT)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.text(key).as_deref().and_then(schema::parse_float)
    }

    /// `1:<water/coffee>` with one decimal, when both amounts are positive.
    pub fn ratio_text(&self) -> Option<String> {
        match (self.number("coffeeAmount"), self.number("waterAmount")) {
            (Some(coffee), Some(water)) if coffee > 0.0 && water > 0.0 => {
                Some(format_ratio(water / coffee))
            }
            _ => None,
        }
    }

    /// Convert to the typed record used by the shared renderers.
    pub fn to_recipe(&self) -> Recipe {
        let mut recipe = Recipe {
            id: self.id.clone(),
            recipe_name: self.name(),
            description: self.text(schema::DESCRIPTION.input).unwrap_or_default(),
            rating: self.rating(),
            date_created: self.text(schema::DATE_CREATED.input),
            created_at: self.created_at(),
            ..Default::default()
        };
        for spec in RECIPE_FIELDS {
            if let Some(raw) = self.text(spec.input) {
                spec.set(&mut recipe.details, spec.parse(&raw));
            }
        }
        recipe
    }

    /// Input values for populating the notebook form.
    pub fn inputs(&self) -> BTreeMap<String, String> {
        self.fields
            .keys()
            .filter(|k| k.as_str() != CREATED_AT && k.as_str() != RATIO)
            .filter_map(|k| Some((k.clone(), self.text(k)?)))
            .collect()
    }

    fn search_text(&self) -> String {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != CREATED_AT)
            .filter_map(|(k, _)| self.text(k))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// Summary numbers shown above the notebook list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotebookStats {
    pub total: usize,
    pub avg_rating: Option<f64>,
    pub avg_coffee_amount: Option<f64>,
    pub avg_water_temp: Option<f64>,
    pub most_used_bean: Option<String>,
    pub most_used_brew_method: Option<String>,
}

/// Fresh record id: epoch millis plus a random suffix.
pub fn new_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", Utc::now().timestamp_millis(), &suffix[..9])
}

/// `coffee-recipes-YYYY-MM-DD.json`
pub fn export_filename(today: NaiveDate) -> String {
    format!("coffee-recipes-{}.json", today.format("%Y-%m-%d"))
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

fn most_common(values: impl Iterator<Item = String>) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    // First seen wins ties.
    let mut best: Option<(String, usize)> = None;
    for (value, n) in counts {
        if best.as_ref().map_or(true, |(_, b)| n > *b) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value)
}

/// The local recipe list bound to a store.
pub struct Notebook<S> {
    store: S,
    recipes: Vec<LegacyRecipe>,
}

impl<S: KeyValueStore> Notebook<S> {
    /// Load the list from the store. A missing or unreadable list starts empty.
    pub fn open(store: S) -> Self {
        let recipes = match store.get(NOTEBOOK_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable notebook: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Self { store, recipes }
    }

    pub fn recipes(&self) -> &[LegacyRecipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LegacyRecipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.recipes)?;
        self.store.set(NOTEBOOK_KEY, &json)
    }

    pub fn add(&mut self, recipe: LegacyRecipe) -> Result<(), StoreError> {
        self.recipes.insert(0, recipe);
        self.save()
    }

    pub fn update(&mut self, id: &str, mut recipe: LegacyRecipe) -> Result<(), StoreError> {
        let slot = self
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        recipe.id = id.to_string();
        *slot = recipe;
        self.save()
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        if self.recipes.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save()
    }

    /// Copy a record to the front of the list and return the copy.
    pub fn duplicate(&mut self, id: &str) -> Result<&LegacyRecipe, StoreError> {
        let source = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let mut copy = source.clone();
        copy.id = new_id();
        copy.fields.insert(
            schema::RECIPE_NAME.input.to_string(),
            Value::String(format!("{} (Copy)", source.name())),
        );
        copy.fields
            .insert(CREATED_AT.to_string(), Value::String(now_rfc3339()));
        copy.fields.insert(
            schema::DATE_CREATED.input.to_string(),
            Value::String(today()),
        );
        self.add(copy)?;
        Ok(&self.recipes[0])
    }

    /// Records whose text contains `term`, ignoring case. A blank term matches all.
    pub fn search(&self, term: &str) -> Vec<&LegacyRecipe> {
        let term = term.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(|r| term.is_empty() || r.search_text().contains(&term))
            .collect()
    }

    /// Merge a JSON array of records; every incoming record gets a fresh id.
    /// Returns the number imported.
    pub fn import_json(&mut self, json: &str) -> Result<usize, StoreError> {
        let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
            return Err(StoreError::NotAnArray);
        };
        let mut imported = 0;
        for item in items {
            if !item.is_object() {
                tracing::debug!("skipping non-object import entry");
                continue;
            }
            let mut recipe: LegacyRecipe = serde_json::from_value(item)?;
            recipe.id = new_id();
            self.recipes.insert(0, recipe);
            imported += 1;
        }
        self.save()?;
        tracing::info!(imported, total = self.recipes.len(), "notebook import");
        Ok(imported)
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        if self.recipes.is_empty() {
            return Err(StoreError::NothingToExport);
        }
        Ok(serde_json::to_string_pretty(&self.recipes)?)
    }

    /// `None` for an empty notebook.
    pub fn stats(&self) -> Option<NotebookStats> {
        if self.recipes.is_empty() {
            return None;
        }
        let rs = &self.recipes;
        Some(NotebookStats {
            total: rs.len(),
            avg_rating: average(rs.iter().filter_map(|r| r.rating()).map(f64::trunc)),
            avg_coffee_amount: average(rs.iter().filter_map(|r| r.number("coffeeAmount"))),
            avg_water_temp: average(rs.iter().filter_map(|r| r.number("waterTemp"))),
            most_used_bean: most_common(rs.iter().filter_map(|r| r.text("beanVariety"))),
            most_used_brew_method: most_common(rs.iter().filter_map(|r| r.text("brewMethod"))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn sample(name: &str) -> LegacyRecipe {
        LegacyRecipe::from_inputs(
            new_id(),
            [
                ("recipeName", name),
                ("description", "Fruity"),
                ("aftertaste", "long"),
                ("rating", "8"),
                ("dateCreated", "2024-03-01"),
                ("beanVariety", "Geisha"),
                ("brewMethod", "pour-over"),
                ("coffeeAmount", "18"),
                ("waterAmount", "300"),
                ("waterTemp", "94"),
                ("sweetener", "   "),
            ],
        )
    }

    #[test]
    fn test_new_record_gets_ratio_and_drops_blanks() {
        let recipe = sample("V60");
        assert_eq!(recipe.text("ratio").as_deref(), Some("1:16.7"));
        assert!(recipe.text("sweetener").is_none());
        assert!(recipe.created_at().is_some());
    }

    #[test]
    fn test_ratio_tie_rounds_up() {
        let recipe = LegacyRecipe::from_inputs(
            new_id(),
            [("coffeeAmount", "20"), ("waterAmount", "325")],
        );
        assert_eq!(recipe.ratio_text().as_deref(), Some("1:16.3"));
        assert_eq!(recipe.text("ratio").as_deref(), Some("1:16.3"));
    }

    #[test]
    fn test_persists_and_reloads() {
        let store = MemoryStore::new();
        let mut notebook = Notebook::open(store.clone());
        notebook.add(sample("First")).unwrap();
        notebook.add(sample("Second")).unwrap();

        let reloaded = Notebook::open(store);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.recipes()[0].name(), "Second");
    }

    #[test]
    fn test_update_keeps_id_and_delete_removes() {
        let mut notebook = Notebook::open(MemoryStore::new());
        let recipe = sample("Old");
        let id = recipe.id.clone();
        notebook.add(recipe).unwrap();

        notebook.update(&id, sample("New")).unwrap();
        assert_eq!(notebook.get(&id).map(LegacyRecipe::name).as_deref(), Some("New"));

        notebook.delete(&id).unwrap();
        assert!(notebook.is_empty());
        assert!(matches!(notebook.delete(&id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_goes_to_front_with_fresh_identity() {
        let mut notebook = Notebook::open(MemoryStore::new());
        let original = sample("Chemex");
        let id = original.id.clone();
        notebook.add(original).unwrap();

        let copy = notebook.duplicate(&id).unwrap().clone();
        assert_ne!(copy.id, id);
        assert_eq!(copy.name(), "Chemex (Copy)");
        assert_eq!(copy.text("dateCreated"), Some(today()));
        assert_eq!(notebook.recipes()[0].id, copy.id);
        assert_eq!(notebook.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut notebook = Notebook::open(MemoryStore::new());
        notebook.add(sample("Morning Brew")).unwrap();
        notebook.add(sample("Evening")).unwrap();
        assert_eq!(notebook.search("GEISHA").len(), 2);
        assert_eq!(notebook.search("morning").len(), 1);
        assert!(notebook.search("espresso").is_empty());
    }

    #[test]
    fn test_import_assigns_fresh_ids_and_keeps_existing() {
        let mut notebook = Notebook::open(MemoryStore::new());
        notebook.add(sample("A")).unwrap();
        notebook.add(sample("B")).unwrap();
        let existing: Vec<String> = notebook.recipes().iter().map(|r| r.id.clone()).collect();

        let incoming = r#"[
            {"id": 1, "recipeName": "X"},
            {"id": 1, "recipeName": "Y"},
            {"id": "dup", "recipeName": "Z"}
        ]"#;
        assert_eq!(notebook.import_json(incoming).unwrap(), 3);
        assert_eq!(notebook.len(), 5);

        let mut ids: Vec<&str> = notebook.recipes().iter().map(|r| r.id.as_str()).collect();
        for id in &existing {
            assert!(ids.contains(&id.as_str()));
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_import_rejects_non_array() {
        let mut notebook = Notebook::open(MemoryStore::new());
        assert!(matches!(notebook.import_json(r#"{"a": 1}"#), Err(StoreError::NotAnArray)));
        assert!(matches!(notebook.import_json("not json"), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_export_refuses_empty_notebook() {
        let mut notebook = Notebook::open(MemoryStore::new());
        assert!(matches!(notebook.export_json(), Err(StoreError::NothingToExport)));
        notebook.add(sample("A")).unwrap();
        let json = notebook.export_json().unwrap();
        assert!(json.contains("\n  "));
        let date = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        assert_eq!(export_filename(date), "coffee-recipes-2024-05-09.json");
    }

    #[test]
    fn test_stats() {
        let mut notebook = Notebook::open(MemoryStore::new());
        assert!(notebook.stats().is_none());
        notebook.add(sample("A")).unwrap();
        let mut other = sample("B");
        other.fields.insert("rating".into(), Value::String("6.9".into()));
        other.fields.insert("brewMethod".into(), Value::String("espresso".into()));
        notebook.add(other).unwrap();
        notebook.add(sample("C")).unwrap();

        let stats = notebook.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert!((stats.avg_rating.unwrap() - 22.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.avg_coffee_amount, Some(18.0));
        assert_eq!(stats.most_used_bean.as_deref(), Some("Geisha"));
        assert_eq!(stats.most_used_brew_method.as_deref(), Some("pour-over"));
    }

    #[test]
    fn test_to_recipe_goes_through_schema() {
        let recipe = sample("V60").to_recipe();
        assert_eq!(recipe.recipe_name, "V60");
        assert_eq!(recipe.rating, Some(8.0));
        assert_eq!(recipe.details.water_temp, Some(94));
        assert_eq!(recipe.details.coffee_amount, Some(18.0));
        assert_eq!(recipe.details.aftertaste.as_deref(), Some("long"));
    }

    #[test]
    fn test_unreadable_store_starts_empty() {
        let store = MemoryStore::new();
        store.set(NOTEBOOK_KEY, "{broken").unwrap();
        assert!(Notebook::open(store).is_empty());
    }
}
