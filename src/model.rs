use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Number of positional ingredient/measure slots in a TheMealDB record
pub const INGREDIENT_SLOTS: usize = 20;

/// A recipe as it appears in list results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    /// Not returned by the filter endpoint
    pub category: Option<String>,
    /// Region or cuisine, e.g. "Italian"
    pub area: Option<String>,
}

/// One line of an ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    /// Empty when the API has no measure for this slot
    pub measure: String,
}

/// A full recipe with parsed ingredients and instruction steps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: Option<String>,
    pub area: Option<String>,
    /// Instructions text exactly as the API returned it
    pub instructions: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
}

impl RecipeDetail {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
            area: self.area.clone(),
        }
    }
}

/// The `{ "meals": [...] | null }` envelope every endpoint answers with
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<RawMeal>>,
}

impl MealsEnvelope {
    pub fn into_meals(self) -> Vec<RawMeal> {
        self.meals.unwrap_or_default()
    }
}

/// Wire shape of a meal record. Summary and detail share it; the filter
/// endpoint simply leaves most fields out.
#[derive(Debug, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    /// strIngredient1..20, strMeasure1..20 and whatever else the API adds
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

impl From<RawMeal> for RecipeSummary {
    fn from(raw: RawMeal) -> Self {
        RecipeSummary {
            id: raw.id,
            name: raw.name,
            thumbnail: raw.thumbnail.unwrap_or_default(),
            category: non_blank(raw.category),
            area: non_blank(raw.area),
        }
    }
}

impl From<RawMeal> for RecipeDetail {
    fn from(raw: RawMeal) -> Self {
        let ingredients = collect_ingredients(&raw.slots);
        let instructions = raw.instructions.unwrap_or_default();
        let steps = split_instructions(&instructions);
        let tags = raw.tags.as_deref().map(split_tags).unwrap_or_default();

        RecipeDetail {
            id: raw.id,
            name: raw.name,
            thumbnail: raw.thumbnail.unwrap_or_default(),
            category: non_blank(raw.category),
            area: non_blank(raw.area),
            instructions,
            ingredients,
            steps,
            tags,
            youtube: non_blank(raw.youtube),
            source: non_blank(raw.source),
        }
    }
}

/// Collect the non-empty ingredient slots in positional order.
///
/// A slot counts only when its ingredient is a non-blank string. Names and
/// measures are trimmed; a missing or blank measure becomes an empty string.
pub fn collect_ingredients(slots: &HashMap<String, Value>) -> Vec<Ingredient> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|i| {
            let name = slot_text(slots, &format!("strIngredient{}", i))?;
            let measure = slot_text(slots, &format!("strMeasure{}", i)).unwrap_or_default();
            Some(Ingredient { name, measure })
        })
        .collect()
}

/// Split instructions into steps on `\n` or `\r\n`, dropping blank lines.
pub fn split_instructions(instructions: &str) -> Vec<String> {
    instructions
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Drop later duplicates of an id, keeping the first occurrence's position.
pub(crate) fn dedup_by_id(summaries: Vec<RecipeSummary>) -> Vec<RecipeSummary> {
    let mut seen = HashSet::new();
    summaries
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .collect()
}

fn slot_text(slots: &HashMap<String, Value>, key: &str) -> Option<String> {
    let text = slots.get(key)?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
