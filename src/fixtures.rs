//! Expectation types test suites build alongside their collections.

use crate::setup::{CollectionSetup, ContentIndex};

/// Two successive setups of the same collection and what the second one
/// should leave behind.
#[derive(Debug, Clone)]
pub struct UpdateScenario {
    pub id: String,
    pub first: CollectionSetup,
    pub second: CollectionSetup,
    pub contents: ContentIndex,
    pub expect_version: Option<String>,
    pub expect_readme: Option<String>,
}

impl UpdateScenario {
    /// Scenario whose expected contents are what `second` copies.
    pub fn new(id: impl Into<String>, first: CollectionSetup, second: CollectionSetup) -> Self {
        let contents = second.expected_contents();
        Self {
            id: id.into(),
            first,
            second,
            contents,
            expect_version: None,
            expect_readme: None,
        }
    }

    pub fn expect_version(mut self, version: impl Into<String>) -> Self {
        self.expect_version = Some(version.into());
        self
    }

    pub fn expect_readme(mut self, readme: impl Into<String>) -> Self {
        self.expect_readme = Some(readme.into());
        self
    }
}

/// Expected values for a content card on a collection detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCard {
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub plugin_type: Option<String>,
}

impl ContentCard {
    pub fn new(
        content_type: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            title: title.into(),
            description: description.into(),
            plugin_type: None,
        }
    }

    pub fn plugin_type(mut self, plugin_type: impl Into<String>) -> Self {
        self.plugin_type = Some(plugin_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_contents_follow_second_setup() {
        let first = CollectionSetup::new().copy("plugins/modules/a.py", None);
        let second = CollectionSetup::new()
            .copy("plugins/modules/a.py", None)
            .copy("roles/fakerole", None)
            .readme("# v2");

        let scenario = UpdateScenario::new("add-role", first, second)
            .expect_version("1.0.1")
            .expect_readme("# v2");

        assert_eq!(scenario.contents["plugins"], vec!["a.py"]);
        assert_eq!(scenario.contents["roles"], vec!["fakerole"]);
        assert_eq!(scenario.expect_version.as_deref(), Some("1.0.1"));
        assert_eq!(scenario.second.readme_body(), scenario.expect_readme.as_deref());
    }

    #[test]
    fn test_content_card() {
        let card = ContentCard::new("module", "fakemod", "A fake module").plugin_type("module");
        assert_eq!(card.plugin_type.as_deref(), Some("module"));
        assert_eq!(card.title, "fakemod");
    }
}
