use super::{
    super::{data::*, error::*, state::*},
    layout::*,
};

use {
    axum::{
        extract::{Path, Query, State},
        response::{IntoResponse, Response},
    },
    serde::Deserialize,
};

//
// VariantQuery
//

/// Query of the cocktail page.
#[derive(Debug, Default, Deserialize)]
pub struct VariantQuery {
    /// Variant.
    pub v: Option<String>,
}

/// Cocktail page.
///
/// The first segment of the path is the cocktail ID. Each ID and variant is cached separately by
/// the data function; the page itself is not cached.
pub async fn cocktail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<VariantQuery>,
) -> Result<Response, AppError> {
    let id = slug.split('/').next().unwrap_or_default().trim();
    if id.is_empty() {
        return Err(AppError::NotFound("Cocktail".into()));
    }

    let variant = Variant::from_query(query.v.as_deref());
    let cached = cocktail(&state.memoizer, &state.cocktails, id, variant).await?;

    let Some(drink) = &cached.value else {
        return Err(AppError::NotFound(format!("Cocktail {}", id)));
    };

    let ingredients: String = drink
        .ingredients
        .iter()
        .map(|ingredient| {
            if ingredient.measure.is_empty() {
                format!("<li>{}</li>\n", escape(&ingredient.name))
            } else {
                format!(
                    "<li>{} &middot; {}</li>\n",
                    escape(&ingredient.name),
                    escape(&ingredient.measure)
                )
            }
        })
        .collect();

    let variants: Vec<_> = Variant::ALL
        .iter()
        .map(|other| {
            if *other == variant {
                format!("<strong>{}</strong>", other)
            } else {
                format!(r#"<a href="?v={}">{}</a>"#, other, other)
            }
        })
        .collect();

    let body = format!(
        r#"<img src="{image}" alt="{name}" width="300">
<p>{category} &middot; {alcoholic}</p>
<p>Serve in: <strong>{glass}</strong></p>
<p>Choose your variant: {variants}</p>
<h2>Ingredients</h2>
<ul>
{ingredients}</ul>
<h2>Instructions</h2>
<p>{instructions}</p>
<p><small>Invalidate with <code>POST /api/revalidate?tag=cocktail-{id}</code></small></p>
"#,
        image = escape(&drink.image),
        name = escape(&drink.name),
        category = escape(&drink.category),
        alcoholic = escape(&drink.alcoholic),
        glass = escape(&drink.glass),
        variants = variants.join(" "),
        ingredients = ingredients,
        instructions = escape(&drink.instructions),
        id = escape(&drink.id),
    );

    let content = cached_details(&drink.name, &cached, &body);
    Ok(page(&drink.name, &content).into_response())
}
