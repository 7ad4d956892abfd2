//! # Recipe form mapper
//!
//! [`RecipeForm`] holds the raw input strings of the create/edit recipe
//! dialog, keyed by input name, and maps them to and from records through
//! [`store::schema::RECIPE_FIELDS`]:
//!
//! - [`to_draft`](RecipeForm::to_draft) builds the `POST /recipes` payload.
//!   Numeric inputs become numbers or `null`; text is trimmed, blank is `null`.
//! - [`from_recipe`](RecipeForm::from_recipe) / [`from_legacy`](RecipeForm::from_legacy)
//!   populate the form for editing.
//! - [`to_legacy`](RecipeForm::to_legacy) builds a notebook record.
//!
//! Required fields are checked in order and the first blank one aborts with
//! [`FormError::MissingField`].

use std::collections::BTreeMap;

use store::models::{format_ratio, INDIA_REGION};
use store::notebook::new_id;
use store::schema::{
    self, CoreField, FieldSpec, Section, Tier, LEGACY_REQUIRED_FIELDS, RECIPE_FIELDS,
    REQUIRED_FIELDS,
};
use store::{LegacyRecipe, Recipe, RecipeDetails, RecipeDraft};
use thiserror::Error;

/// Ratio shown while either amount is missing.
pub const DEFAULT_RATIO: &str = "1:16.7";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in the {0} field.")]
    MissingField(String),
}

/// What a valid submission should do.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(RecipeDraft),
    /// Editing an existing server recipe. There is no update endpoint yet.
    Update { id: String },
}

/// Raw state of the recipe dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeForm {
    values: BTreeMap<String, String>,
    pub is_public: bool,
    pub editing_id: Option<String>,
    /// Show pro inputs as well as basic ones.
    pub pro_mode: bool,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::new(today())
    }
}

/// Today's date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// `dateCreated` -> `date created`
fn spaced_lower(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 2);
    for c in camel.chars() {
        if c.is_uppercase() {
            out.push(' ');
        }
        out.extend(c.to_lowercase());
    }
    out
}

fn known_input(input: &str) -> bool {
    LEGACY_REQUIRED_FIELDS.iter().any(|f| f.input == input)
        || RECIPE_FIELDS.iter().any(|f| f.input == input)
}

impl RecipeForm {
    /// An empty form dated `today`, public by default.
    pub fn new(today: String) -> Self {
        let mut values = BTreeMap::new();
        values.insert(schema::DATE_CREATED.input.to_string(), today);
        Self {
            values,
            is_public: true,
            editing_id: None,
            pro_mode: false,
        }
    }

    pub fn value(&self, input: &str) -> &str {
        self.values.get(input).map(String::as_str).unwrap_or("")
    }

    /// Set an input. Moving the region away from India clears the estate.
    pub fn set(&mut self, input: &str, value: impl Into<String>) {
        let value = value.into();
        if input == "beanRegion" && value != INDIA_REGION {
            self.values.remove("indiaEstate");
        }
        self.values.insert(input.to_string(), value);
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// The estate input is only offered for Indian beans.
    pub fn shows_estate(&self) -> bool {
        self.value("beanRegion") == INDIA_REGION
    }

    /// Inputs of a section visible in the current mode.
    pub fn visible_fields(&self, section: Section) -> Vec<&'static FieldSpec> {
        RECIPE_FIELDS
            .iter()
            .filter(|f| f.section == section)
            .filter(|f| self.pro_mode || f.tier == Tier::Basic)
            .filter(|f| f.name != "india_estate" || self.shows_estate())
            .collect()
    }

    /// Live coffee-to-water ratio, e.g. `1:16.7`.
    pub fn ratio_text(&self) -> String {
        let coffee = schema::parse_float(self.value("coffeeAmount")).unwrap_or(0.0);
        let water = schema::parse_float(self.value("waterAmount")).unwrap_or(0.0);
        if coffee > 0.0 && water > 0.0 {
            format_ratio(water / coffee)
        } else {
            DEFAULT_RATIO.to_string()
        }
    }

    /// Set the brew method and, when one is known, fill in the recommended
    /// grind. Returns the hint to show.
    pub fn set_brew_method(&mut self, method: &str) -> Option<String> {
        self.set("brewMethod", method);
        let rec = schema::grind_recommendation(method)?;
        self.set("grindMicrons", rec.microns.to_string());
        Some(format!(
            "Recommended: {} grind ({}μm)",
            rec.size.replacen('-', " ", 1),
            rec.microns
        ))
    }

    fn check_required(&self, fields: &[CoreField], name: fn(&CoreField) -> String) -> Result<(), FormError> {
        match fields.iter().find(|f| self.value(f.input).trim().is_empty()) {
            Some(field) => Err(FormError::MissingField(name(field))),
            None => Ok(()),
        }
    }

    fn details(&self) -> RecipeDetails {
        let mut details = RecipeDetails::default();
        for spec in RECIPE_FIELDS {
            spec.set(&mut details, spec.parse(self.value(spec.input)));
        }
        if !self.shows_estate() {
            details.india_estate = None;
        }
        details
    }

    /// Build the create payload, or report the first blank required field.
    pub fn to_draft(&self, user_id: Option<&str>) -> Result<RecipeDraft, FormError> {
        self.check_required(&REQUIRED_FIELDS, |f| f.name.replace('_', " "))?;
        Ok(RecipeDraft {
            recipe_name: self.value(schema::RECIPE_NAME.input).trim().to_string(),
            description: self.value(schema::DESCRIPTION.input).trim().to_string(),
            rating: schema::parse_float(self.value(schema::RATING.input)),
            date_created: Some(self.value(schema::DATE_CREATED.input).trim().to_string()),
            is_public: self.is_public,
            user_id: user_id.map(str::to_string),
            details: self.details(),
        })
    }

    /// Validate, then branch on whether an existing recipe is being edited.
    pub fn submission(&self, user_id: Option<&str>) -> Result<Submission, FormError> {
        let draft = self.to_draft(user_id)?;
        Ok(match &self.editing_id {
            Some(id) => Submission::Update { id: id.clone() },
            None => Submission::Create(draft),
        })
    }

    /// Populate from a server record for editing.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut form = Self::new(recipe.date_created.clone().unwrap_or_else(today));
        form.set(schema::RECIPE_NAME.input, recipe.recipe_name.clone());
        form.set(schema::DESCRIPTION.input, recipe.description.clone());
        if let Some(rating) = recipe.rating {
            form.set(schema::RATING.input, rating.to_string());
        }
        for spec in RECIPE_FIELDS {
            let value = spec.get(&recipe.details).to_input();
            if !value.is_empty() {
                form.values.insert(spec.input.to_string(), value);
            }
        }
        if !form.shows_estate() {
            form.values.remove("indiaEstate");
        }
        form.is_public = recipe.is_public;
        form.editing_id = Some(recipe.id.clone());
        form
    }

    /// Populate from a notebook record for editing.
    pub fn from_legacy(recipe: &LegacyRecipe) -> Self {
        let mut form = Self::new(today());
        for (input, value) in recipe.inputs() {
            if known_input(&input) {
                form.values.insert(input, value);
            }
        }
        form.editing_id = Some(recipe.id.clone());
        form
    }

    /// Build a notebook record, keeping the id when editing.
    pub fn to_legacy(&self) -> Result<LegacyRecipe, FormError> {
        self.check_required(&LEGACY_REQUIRED_FIELDS, |f| spaced_lower(f.input))?;
        let id = self.editing_id.clone().unwrap_or_else(new_id);
        let shows_estate = self.shows_estate();
        let inputs = self
            .values
            .iter()
            .filter(|(k, _)| shows_estate || k.as_str() != "indiaEstate")
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(LegacyRecipe::from_inputs(id, inputs))
    }
}
