use std::collections::HashMap;

/// Resolves a player portrait URL. `None` means the caller shows a placeholder.
pub trait ImageResolver {
    fn resolve(&self, name: &str, jersey_number: u32) -> Option<String>;
}

/// Always returns `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _name: &str, _jersey_number: u32) -> Option<String> {
        None
    }
}

/// Name lookup first, then an optional `{jersey}` URL template.
#[derive(Debug, Default, Clone)]
pub struct NameMapResolver {
    by_name: HashMap<String, String>,
    jersey_template: Option<String>,
}

impl NameMapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.by_name.insert(name.into(), url.into());
        self
    }

    /// e.g. `/players/{jersey}.jpg`
    pub fn with_jersey_template(mut self, template: impl Into<String>) -> Self {
        self.jersey_template = Some(template.into());
        self
    }
}

impl ImageResolver for NameMapResolver {
    fn resolve(&self, name: &str, jersey_number: u32) -> Option<String> {
        if let Some(url) = self.by_name.get(name) {
            return Some(url.clone());
        }
        self.jersey_template
            .as_ref()
            .map(|template| template.replace("{jersey}", &jersey_number.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_images() {
        assert_eq!(NoImages.resolve("Anyone", 9), None);
    }

    #[test]
    fn test_name_then_template() {
        let resolver = NameMapResolver::new()
            .with_image("Sharif Kayuf", "/players/keeper.jpg")
            .with_jersey_template("/players/{jersey}.jpg");

        assert_eq!(resolver.resolve("Sharif Kayuf", 40).as_deref(), Some("/players/keeper.jpg"));
        assert_eq!(resolver.resolve("Someone", 9).as_deref(), Some("/players/9.jpg"));
        assert_eq!(NameMapResolver::new().resolve("Someone", 9), None);
    }
}
