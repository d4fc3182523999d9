//! Template catalog and topic matcher.
//!
//! Categories are kept in declaration order. A topic selects the first category
//! whose name it contains, or whose name contains it, compared without regard to
//! case. When nothing matches, the first category is used.
//!
//! Short topics can match loosely: "art" selects "art generation" because the
//! category name contains it. That is the matching policy, not a bug.

use crate::error::CatalogError;
use crate::models::category::{Category, CategoryFile};
use rand::Rng;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::debug;

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "creative writing",
        &[
            "Write a compelling creative piece about \"{topic}\". Focus on vivid imagery, emotional depth, and engaging narrative flow. Include sensory details and create a unique voice that draws readers in.",
            "Create an imaginative story centered around \"{topic}\". Develop rich characters, build tension, and craft a satisfying resolution that leaves readers thinking.",
            "Compose a creative piece exploring \"{topic}\" from an unexpected angle. Use metaphor, symbolism, and innovative language to create a memorable reading experience.",
        ],
    ),
    (
        "business strategy",
        &[
            "Develop a comprehensive business strategy for \"{topic}\". Include market analysis, competitive positioning, growth opportunities, and implementation roadmap.",
            "Create a strategic plan to address \"{topic}\" in business. Consider market trends, customer needs, resource allocation, and risk management.",
            "Design a business strategy framework for \"{topic}\". Focus on value proposition, target market, competitive advantage, and sustainable growth.",
        ],
    ),
    (
        "coding help",
        &[
            "Provide a detailed coding solution for \"{topic}\". Include code examples, best practices, error handling, and performance considerations.",
            "Create a programming guide for \"{topic}\". Cover implementation steps, common pitfalls, testing strategies, and optimization techniques.",
            "Develop a coding approach for \"{topic}\". Focus on clean code principles, documentation, scalability, and maintainability.",
        ],
    ),
    (
        "art generation",
        &[
            "Generate an artistic concept for \"{topic}\". Describe visual elements, color palette, composition, mood, and artistic style to create compelling artwork.",
            "Create an art prompt for \"{topic}\". Focus on unique perspective, emotional impact, technical execution, and creative interpretation.",
            "Design an artistic vision for \"{topic}\". Include visual references, artistic techniques, color theory, and creative direction.",
        ],
    ),
    (
        "marketing copy",
        &[
            "Write compelling marketing copy for \"{topic}\". Focus on benefits, emotional appeal, clear call-to-action, and persuasive language that converts.",
            "Create marketing content for \"{topic}\". Emphasize unique value proposition, target audience needs, and compelling reasons to engage.",
            "Develop marketing messaging for \"{topic}\". Use persuasive techniques, benefit-focused language, and strong calls-to-action.",
        ],
    ),
    (
        "academic research",
        &[
            "Formulate a research question and methodology for studying \"{topic}\". Include literature review approach, data collection methods, and analysis framework.",
            "Design a research study on \"{topic}\". Consider research design, sampling strategy, data analysis, and ethical considerations.",
            "Create a research framework for \"{topic}\". Focus on theoretical foundation, research objectives, methodology, and expected outcomes.",
        ],
    ),
    (
        "social media",
        &[
            "Create engaging social media content for \"{topic}\". Focus on platform-specific optimization, trending elements, and audience engagement strategies.",
            "Develop social media strategy for \"{topic}\". Include content themes, posting schedule, audience targeting, and engagement metrics.",
            "Design social media campaign for \"{topic}\". Focus on viral potential, shareability, brand consistency, and call-to-action.",
        ],
    ),
    (
        "product description",
        &[
            "Write a compelling product description for \"{topic}\". Highlight key features, benefits, target audience, and unique selling points.",
            "Create product marketing copy for \"{topic}\". Focus on customer pain points, solution benefits, and persuasive language.",
            "Develop product messaging for \"{topic}\". Emphasize value proposition, competitive advantages, and customer outcomes.",
        ],
    ),
];

/// An ordered, validated, immutable set of categories.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog, checking that it is non-empty and that names are
    /// unique ignoring case. The first category becomes the fallback.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name().to_lowercase()) {
                return Err(CatalogError::DuplicateCategory(category.name().to_string()));
            }
        }
        Ok(Self { categories })
    }

    /// The eight built-in categories, "creative writing" first.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, templates)| Category::new(*name, *templates))
            .collect::<Result<Vec<_>, _>>()
            .and_then(Self::new);
        // The table above is static and covered by tests.
        categories.expect("built-in catalog is valid")
    }

    /// Parses a JSON array of `{"name": ..., "templates": [...]}` objects.
    /// Array order is catalog order.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let files: Vec<CategoryFile> = serde_json::from_str(text)?;
        let categories = files
            .into_iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(categories)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&text)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn default_category(&self) -> &Category {
        &self.categories[0]
    }

    /// First category in catalog order that matches `topic`, else the default.
    pub fn match_category(&self, topic: &str) -> &Category {
        match self.categories.iter().find(|c| c.matches(topic)) {
            Some(category) => category,
            None => {
                debug!(topic, fallback = self.default_category().name(), "No category matched topic");
                self.default_category()
            }
        }
    }

    /// Picks a template from the matched category uniformly at random and fills
    /// it with `topic`. The result always contains `topic` verbatim.
    pub fn select_template<R: Rng + ?Sized>(&self, topic: &str, rng: &mut R) -> String {
        let category = self.match_category(topic);
        let templates = category.templates();
        let index = rng.random_range(0..templates.len());
        debug!(topic, category = category.name(), index, "Selected template");
        templates[index].render(topic)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog(names: &[&str]) -> Catalog {
        let categories = names
            .iter()
            .map(|name| Category::new(*name, &[format!("[{}] {{topic}}", name)]).unwrap())
            .collect();
        Catalog::new(categories).unwrap()
    }

    #[test]
    fn builtin_catalog_is_valid_and_ordered() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            [
                "creative writing",
                "business strategy",
                "coding help",
                "art generation",
                "marketing copy",
                "academic research",
                "social media",
                "product description",
            ]
        );
        assert!(catalog.categories().iter().all(|c| c.templates().len() == 3));
        assert_eq!(catalog.default_category().name(), "creative writing");
    }

    #[test]
    fn first_declared_match_wins() {
        let declared = catalog(&["business strategy", "coding help"]);
        assert_eq!(declared.match_category("business strategy help").name(), "business strategy");

        let reversed = catalog(&["coding help", "business strategy"]);
        assert_eq!(reversed.match_category("business strategy coding help").name(), "coding help");
    }

    #[test]
    fn unmatched_topic_falls_back_to_first_category() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.match_category("xyzzy123").name(), "creative writing");
    }

    #[test]
    fn category_name_as_topic_matches_directly() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.match_category("Social Media").name(), "social media");
        assert_eq!(catalog.match_category("PRODUCT DESCRIPTION").name(), "product description");
    }

    #[test]
    fn short_topics_match_loosely() {
        // "art" is contained in "art generation".
        let catalog = Catalog::builtin();
        assert_eq!(catalog.match_category("art").name(), "art generation");
        // "e" is contained in "creative writing", which is declared first.
        assert_eq!(catalog.match_category("e").name(), "creative writing");
    }

    #[test]
    fn selection_always_contains_topic_verbatim() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        for topic in ["cats", "coding help", "{topic}", "\"quoted\" ${x}", "ünïcödé 🚀", "xyzzy123"] {
            for _ in 0..20 {
                let prompt = catalog.select_template(topic, &mut rng);
                assert!(!prompt.is_empty());
                assert!(prompt.contains(topic), "{prompt:?} should contain {topic:?}");
            }
        }
    }

    #[test]
    fn same_seed_gives_same_prompt() {
        let catalog = Catalog::builtin();
        let a = catalog.select_template("marketing copy", &mut StdRng::seed_from_u64(99));
        let b = catalog.select_template("marketing copy", &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn selection_draws_from_matched_category_only() {
        let catalog = Catalog::builtin();
        let expected: Vec<String> = catalog
            .match_category("coding help")
            .templates()
            .iter()
            .map(|t| t.render("coding help"))
            .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let prompt = catalog.select_template("coding help", &mut rng);
            assert!(expected.contains(&prompt));
            seen.insert(prompt);
        }
        assert_eq!(seen.len(), expected.len());
    }

    #[test]
    fn rejects_duplicate_names_ignoring_case() {
        let categories = vec![
            Category::new("Coding Help", &["{topic}"]).unwrap(),
            Category::new("coding help", &["{topic}!"]).unwrap(),
        ];
        assert!(matches!(Catalog::new(categories), Err(CatalogError::DuplicateCategory(_))));
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn loads_custom_catalog_from_json() {
        let catalog = Catalog::from_json(
            r#"[
                {"name": "haiku", "templates": ["Write a haiku about {topic}."]},
                {"name": "limerick", "templates": ["Write a limerick about {topic}.", "A funny limerick on {topic}."]}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.default_category().name(), "haiku");
        assert_eq!(catalog.match_category("a limerick please").name(), "limerick");

        let bad = Catalog::from_json(r#"[{"name": "x", "templates": ["no slot"]}]"#);
        assert!(matches!(bad, Err(CatalogError::Placeholder { .. })));
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }
}
