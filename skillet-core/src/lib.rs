pub mod ai;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod generate;
pub mod types;

pub use error::{AiError, FetchError, RelayError};
pub use extract::{extract_recipe, MAX_SOURCE_CHARS};
pub use fetch::{HttpSourceClient, MockSourceClient, SourceClient};
pub use generate::generate_recipe;
pub use types::ExtractedRecipe;
