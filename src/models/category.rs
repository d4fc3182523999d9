use crate::error::CatalogError;
use serde::Deserialize;

/// The slot every template must contain exactly once.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// A prompt template, kept split around its single topic slot so that filling
/// it is a plain splice and the topic is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    prefix: String,
    suffix: String,
}

impl Template {
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let found = raw.matches(TOPIC_PLACEHOLDER).count();
        match raw.split_once(TOPIC_PLACEHOLDER) {
            Some((prefix, suffix)) if found == 1 => Ok(Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            _ => Err(CatalogError::Placeholder {
                template: raw.to_string(),
                found,
            }),
        }
    }

    /// Fills the slot with `topic`, verbatim.
    pub fn render(&self, topic: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + topic.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(topic);
        out.push_str(&self.suffix);
        out
    }

    /// The template as written, placeholder included.
    pub fn raw(&self) -> String {
        self.render(TOPIC_PLACEHOLDER)
    }
}

/// A named bucket of interchangeable templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    templates: Vec<Template>,
}

impl Category {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, templates: &[S]) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if templates.is_empty() {
            return Err(CatalogError::NoTemplates(name));
        }
        let templates = templates
            .iter()
            .map(|t| Template::parse(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name, templates })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Never empty.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Case-insensitive containment in either direction.
    pub fn matches(&self, topic: &str) -> bool {
        let topic = topic.to_lowercase();
        let name = self.name.to_lowercase();
        topic.contains(&name) || name.contains(&topic)
    }
}

/// On-disk shape of a category in a custom catalog file.
#[derive(Debug, Deserialize)]
pub struct CategoryFile {
    pub name: String,
    pub templates: Vec<String>,
}

impl TryFrom<CategoryFile> for Category {
    type Error = CatalogError;

    fn try_from(file: CategoryFile) -> Result<Self, Self::Error> {
        Category::new(file.name, &file.templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_requires_exactly_one_placeholder() {
        assert!(matches!(
            Template::parse("no slot here"),
            Err(CatalogError::Placeholder { found: 0, .. })
        ));
        assert!(matches!(
            Template::parse("{topic} and {topic}"),
            Err(CatalogError::Placeholder { found: 2, .. })
        ));
        assert!(Template::parse("about \"{topic}\".").is_ok());
    }

    #[test]
    fn render_inserts_placeholder_lookalikes_literally() {
        let template = Template::parse("Write about \"{topic}\" now.").unwrap();
        assert_eq!(template.render("{topic}"), "Write about \"{topic}\" now.");
        assert_eq!(template.render("${x} {{y}}"), "Write about \"${x} {{y}}\" now.");
        assert_eq!(template.raw(), "Write about \"{topic}\" now.");
    }

    #[test]
    fn category_rejects_empty_name_and_templates() {
        assert!(matches!(Category::new("  ", &["{topic}"]), Err(CatalogError::EmptyName)));
        let none: [&str; 0] = [];
        assert!(matches!(Category::new("x", &none), Err(CatalogError::NoTemplates(_))));
    }

    #[test]
    fn matching_is_bidirectional_and_case_insensitive() {
        let category = Category::new("Art Generation", &["{topic}"]).unwrap();
        assert!(category.matches("some ART GENERATION ideas"));
        assert!(category.matches("art"));
        assert!(category.matches("Art Generation"));
        assert!(!category.matches("painting"));
    }
}
