//! Extraction prompt: pull a recipe out of raw page HTML.

/// System instruction for recipe extraction.
pub const EXTRACT_SYSTEM_PROMPT: &str = "You are a recipe extraction assistant. Extract recipe information from HTML content and return it in JSON format with keys: title, description, ingredients (array of strings), and method (array of strings with each step).";

/// Render the user message carrying the (already truncated) page content.
pub fn render_extract_prompt(html: &str) -> String {
    format!(
        "Extract the recipe information from this HTML content:\n\n{}",
        html
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_extract_prompt("<html><body>Pancakes</body></html>");

        assert!(prompt.starts_with("Extract the recipe information"));
        assert!(prompt.ends_with("<html><body>Pancakes</body></html>"));
    }

    #[test]
    fn test_system_prompt_names_all_keys() {
        for key in ["title", "description", "ingredients", "method"] {
            assert!(EXTRACT_SYSTEM_PROMPT.contains(key));
        }
    }
}
