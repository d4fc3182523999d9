//! Plain-text views for the command-line front end.

use crate::catalog::Catalog;
use crate::generator::Generation;
use crate::models::prompt::SavedPrompt;
use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::{Context, Tera};

const SAVED_LIST: &str = r#"{% if prompts | length == 0 %}No saved prompts yet.
{% else %}{% for p in prompts %}[{{ p.id }}] {{ p.topic }}  ({{ p.timestamp }})
    {{ p.prompt }}
{% endfor %}{% endif %}"#;

const GENERATION: &str = r#"Topic:    {{ topic }}
Category: {{ category }}

{{ prompt }}
"#;

const CATEGORIES: &str = r#"{% for c in categories %}{{ loop.index }}. {{ c.name }}{% if loop.first %} (default){% endif %}  [{{ c.templates }} templates]
{% endfor %}"#;

#[derive(Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    templates: usize,
}

fn render(template: &str, context: &Context) -> Result<String> {
    // Autoescape off: this is terminal output, not HTML.
    Tera::one_off(template, context, false).context("Failed to render view")
}

pub fn saved_list(prompts: &[SavedPrompt]) -> Result<String> {
    let mut context = Context::new();
    context.insert("prompts", prompts);
    render(SAVED_LIST, &context)
}

pub fn generation(generation: &Generation) -> Result<String> {
    let mut context = Context::new();
    context.insert("topic", &generation.topic);
    context.insert("category", &generation.category);
    context.insert("prompt", &generation.prompt);
    render(GENERATION, &context)
}

pub fn categories(catalog: &Catalog) -> Result<String> {
    let rows: Vec<CategoryRow<'_>> = catalog
        .categories()
        .iter()
        .map(|c| CategoryRow {
            name: c.name(),
            templates: c.templates().len(),
        })
        .collect();
    let mut context = Context::new();
    context.insert("categories", &rows);
    render(CATEGORIES, &context)
}
