//! Template rendering
//!
//! Server-side HTML rendering with Tera. Template sources are embedded
//! in the binary with rust-embed, so the deployed artifact stays a
//! single file.

use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use tera::{Context as TeraContext, Tera};

#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct EmbeddedTemplates;

/// Template engine wrapping a preloaded Tera instance
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load all embedded templates
    pub fn new() -> Result<Self> {
        let mut sources = Vec::new();
        for name in EmbeddedTemplates::iter() {
            let file = EmbeddedTemplates::get(&name)
                .with_context(|| format!("Missing embedded template: {}", name))?;
            let content = std::str::from_utf8(file.data.as_ref())
                .with_context(|| format!("Template is not valid UTF-8: {}", name))?
                .to_string();
            sources.push((name.to_string(), content));
        }

        // add_raw_templates resolves {% extends %} regardless of the
        // order rust-embed yields the files in.
        let mut tera = Tera::default();
        tera.add_raw_templates(sources)
            .context("Failed to load templates")?;

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("Failed to render template: {}", template))
    }

    /// List the names of all loaded templates
    pub fn template_names(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TemplateEngine {
        TemplateEngine::new().expect("Templates should load")
    }

    #[test]
    fn test_all_pages_are_loaded() {
        let engine = engine();
        let names = engine.template_names();
        for expected in [
            "base.html",
            "home.html",
            "detail.html",
            "comment_edit.html",
            "comment_delete.html",
            "login.html",
        ] {
            assert!(names.contains(&expected), "missing template {}", expected);
        }
    }

    #[test]
    fn test_render_home() {
        let engine = engine();
        let mut context = TeraContext::new();
        context.insert("site_title", "Вестник");
        context.insert("user", &Option::<()>::None);
        context.insert("news", &Vec::<serde_json::Value>::new());

        let html = engine.render("home.html", &context).expect("render");
        assert!(html.contains("Вестник"));
    }

    #[test]
    fn test_render_unknown_template_is_an_error() {
        let engine = engine();
        assert!(engine.render("nope.html", &TeraContext::new()).is_err());
    }
}
