pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod upload_image;

use std::collections::HashMap;

use crate::models::{IngredientLine, MethodStep, Recipe};
use crate::schema::{ingredients, method_steps};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/image", post(upload_image::upload_image))
}

/// Recipe source kinds the save path accepts.
pub const SOURCE_TYPES: [&str; 2] = ["extracted", "generated"];

pub(crate) fn validate_rating(rating: Option<i32>) -> Result<(), &'static str> {
    match rating {
        Some(r) if !(1..=5).contains(&r) => Err("Rating must be an integer between 1 and 5"),
        _ => Ok(()),
    }
}

pub(crate) fn validate_source_type(source_type: &str) -> bool {
    SOURCE_TYPES.contains(&source_type)
}

/// An ingredient line as exposed by the joined read view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientView {
    pub id: Uuid,
    pub text: String,
    pub order: i32,
}

/// A method step as exposed by the joined read view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MethodStepView {
    pub id: Uuid,
    pub step_number: i32,
    pub description: String,
}

/// A recipe joined with its ingredient lines and method steps.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetails {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub rating: Option<i32>,
    pub source_type: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ingredients: Vec<IngredientView>,
    pub method_steps: Vec<MethodStepView>,
}

impl RecipeDetails {
    pub(crate) fn assemble(
        recipe: Recipe,
        lines: Vec<IngredientLine>,
        steps: Vec<MethodStep>,
    ) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            source_url: recipe.source_url,
            rating: recipe.rating,
            source_type: recipe.source_type,
            image_url: recipe.image_url,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
            ingredients: lines
                .into_iter()
                .map(|l| IngredientView {
                    id: l.id,
                    text: l.ingredient_text,
                    order: l.order_index,
                })
                .collect(),
            method_steps: steps
                .into_iter()
                .map(|s| MethodStepView {
                    id: s.id,
                    step_number: s.step_number,
                    description: s.step_description,
                })
                .collect(),
        }
    }
}

/// Load the children of the given recipes, grouped by recipe and ordered by
/// position within each.
pub(crate) fn load_children(
    conn: &mut PgConnection,
    recipe_ids: &[Uuid],
) -> Result<
    (
        HashMap<Uuid, Vec<IngredientLine>>,
        HashMap<Uuid, Vec<MethodStep>>,
    ),
    diesel::result::Error,
> {
    let lines: Vec<IngredientLine> = ingredients::table
        .filter(ingredients::recipe_id.eq_any(recipe_ids))
        .order((ingredients::recipe_id, ingredients::order_index.asc()))
        .select(IngredientLine::as_select())
        .load(conn)?;

    let steps: Vec<MethodStep> = method_steps::table
        .filter(method_steps::recipe_id.eq_any(recipe_ids))
        .order((method_steps::recipe_id, method_steps::step_number.asc()))
        .select(MethodStep::as_select())
        .load(conn)?;

    let mut lines_by_recipe: HashMap<Uuid, Vec<IngredientLine>> = HashMap::new();
    for line in lines {
        lines_by_recipe.entry(line.recipe_id).or_default().push(line);
    }

    let mut steps_by_recipe: HashMap<Uuid, Vec<MethodStep>> = HashMap::new();
    for step in steps {
        steps_by_recipe.entry(step.recipe_id).or_default().push(step);
    }

    Ok((lines_by_recipe, steps_by_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        upload_image::upload_image,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        list::ListRecipesResponse,
        update::UpdateRecipeRequest,
        upload_image::UploadImageResponse,
        RecipeDetails,
        IngredientView,
        MethodStepView,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(None).is_ok());
        assert!(validate_rating(Some(1)).is_ok());
        assert!(validate_rating(Some(5)).is_ok());
        assert!(validate_rating(Some(0)).is_err());
        assert!(validate_rating(Some(6)).is_err());
        assert!(validate_rating(Some(-3)).is_err());
    }

    #[test]
    fn test_source_types() {
        assert!(validate_source_type("extracted"));
        assert!(validate_source_type("generated"));
        assert!(!validate_source_type("imported"));
        assert!(!validate_source_type(""));
        assert!(!validate_source_type("Extracted"));
    }
}
