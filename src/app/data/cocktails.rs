use super::super::super::cache::*;

use {
    reqwest::StatusCode,
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::{collections::*, fmt, time::Duration},
    thiserror::Error,
};

/// TheCocktailDB has up to this many ingredients per drink.
pub const MAX_INGREDIENTS: usize = 15;

//
// Variant
//

/// Cocktail variant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Variant {
    /// As is.
    #[default]
    Classic,

    /// Blended with ice.
    Frozen,

    /// Double portions of alcohol.
    Double,
}

impl Variant {
    /// All variants.
    pub const ALL: [Self; 3] = [Self::Classic, Self::Frozen, Self::Double];

    /// From the `v` query parameter.
    ///
    /// Missing or unknown variants are [Classic](Self::Classic).
    pub fn from_query(variant: Option<&str>) -> Self {
        match variant {
            Some("frozen") => Self::Frozen,
            Some("double") => Self::Double,
            _ => Self::Classic,
        }
    }

    /// As string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Frozen => "frozen",
            Self::Double => "double",
        }
    }

    /// Apply to a drink's name and instructions.
    pub fn apply(&self, name: &str, instructions: &str) -> (String, String) {
        match self {
            Self::Classic => (name.into(), instructions.into()),
            Self::Frozen => (
                format!("{} (Frozen)", name),
                format!("FROZEN VERSION: Blend all ingredients with ice. {}", instructions),
            ),
            Self::Double => (
                format!("{} (Double)", name),
                format!("DOUBLE STRENGTH: Use double portions of alcohol. {}", instructions),
            ),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), formatter)
    }
}

//
// Cocktail
//

/// Cocktail.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Cocktail {
    /// ID.
    pub id: String,

    /// Name (with variant).
    pub name: String,

    /// Category.
    pub category: String,

    /// Alcoholic or not.
    pub alcoholic: String,

    /// Glass.
    pub glass: String,

    /// Instructions (with variant).
    pub instructions: String,

    /// Image URL.
    pub image: String,

    /// Ingredients.
    pub ingredients: Vec<Ingredient>,
}

//
// Ingredient
//

/// Ingredient.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ingredient {
    /// Name.
    pub name: String,

    /// Measure. Empty if unspecified.
    pub measure: String,
}

//
// Drink
//

/// A drink as returned by TheCocktailDB.
#[derive(Clone, Debug, Deserialize)]
pub struct Drink {
    /// ID.
    #[serde(rename = "idDrink")]
    pub id: String,

    /// Name.
    #[serde(rename = "strDrink")]
    pub name: String,

    /// Category.
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,

    /// Alcoholic or not.
    #[serde(rename = "strAlcoholic", default)]
    pub alcoholic: Option<String>,

    /// Glass.
    #[serde(rename = "strGlass", default)]
    pub glass: Option<String>,

    /// Instructions.
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,

    /// Image URL.
    #[serde(rename = "strDrinkThumb", default)]
    pub thumbnail: Option<String>,

    /// All other fields, including the numbered ingredients and measures.
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

impl Drink {
    /// Ingredients in order.
    ///
    /// Missing or empty ingredients are skipped. Measures are trimmed.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|index| {
                let name = self.string_field(&format!("strIngredient{}", index))?;
                if name.is_empty() {
                    return None;
                }

                let measure = self
                    .string_field(&format!("strMeasure{}", index))
                    .map(|measure| measure.trim().to_string())
                    .unwrap_or_default();

                Some(Ingredient {
                    name: name.into(),
                    measure,
                })
            })
            .collect()
    }

    /// To a [Cocktail] of a variant.
    pub fn to_cocktail(&self, variant: Variant) -> Cocktail {
        let (name, instructions) =
            variant.apply(&self.name, self.instructions.as_deref().unwrap_or_default());

        Cocktail {
            id: self.id.clone(),
            name,
            category: self.category.clone().unwrap_or_default(),
            alcoholic: self.alcoholic.clone().unwrap_or_default(),
            glass: self.glass.clone().unwrap_or_default(),
            instructions,
            image: self.thumbnail.clone().unwrap_or_default(),
            ingredients: self.ingredients(),
        }
    }

    fn string_field(&self, name: &str) -> Option<&str> {
        self.other.get(name).and_then(Value::as_str)
    }
}

//
// LookupResponse
//

/// TheCocktailDB lookup response.
///
/// `drinks` is null when there is no such drink.
#[derive(Clone, Debug, Deserialize)]
pub struct LookupResponse {
    /// Drinks.
    pub drinks: Option<Vec<Drink>>,
}

impl LookupResponse {
    /// The first drink, if any.
    pub fn into_first(self) -> Option<Drink> {
        self.drinks.and_then(|drinks| drinks.into_iter().next())
    }
}

//
// FetchError
//

/// Fetch error.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success status.
    #[error("API responded with status: {0}")]
    Status(StatusCode),

    /// Transport or decoding.
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),

    /// Cache.
    #[error("cache: {0}")]
    Cache(#[from] CacheError),
}

//
// CocktailClient
//

/// TheCocktailDB client.
#[derive(Clone, Debug)]
pub struct CocktailClient {
    http: reqwest::Client,
    base_url: String,
}

impl CocktailClient {
    /// Constructor.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').into(),
        })
    }

    /// Base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a drink by ID.
    ///
    /// [None] if there is no such drink.
    pub async fn lookup(&self, id: &str) -> Result<Option<Drink>, FetchError> {
        let url = format!("{}/lookup.php", self.base_url);
        tracing::info!("fetching cocktail from API: {}", id);

        let response = self.http.get(&url).query(&[("i", id)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let drink = response.json::<LookupResponse>().await?.into_first();
        if drink.is_none() {
            tracing::info!("cocktail not found: {}", id);
        }

        Ok(drink)
    }
}

/// Cached cocktail.
///
/// Every ID and variant combination is cached separately. Tagged `cocktail-{id}` and
/// `variant-{variant}`.
pub async fn cocktail<CacheT>(
    memoizer: &Memoizer<CacheT>,
    client: &CocktailClient,
    id: &str,
    variant: Variant,
) -> Result<Cached<Option<Cocktail>>, FetchError>
where
    CacheT: Cache,
{
    let client = client.clone();
    let id = id.to_string();

    memoizer
        .function("cocktail")
        .argument(&id)
        .argument(variant)
        .tag(format!("cocktail-{}", id))
        .tag(format!("variant-{}", variant))
        .life(CacheLife::HOURS)
        .run(move || async move {
            tracing::info!("fetching cocktail: {}, variant: {}", id, variant);

            match client.lookup(&id).await {
                Ok(drink) => Ok(drink.map(|drink| drink.to_cocktail(variant))),

                Err(error) => {
                    tracing::error!("failed to fetch cocktail {}: {}", id, error);
                    Err(error)
                }
            }
        })
        .await
}
