use serde::{Deserialize, Serialize};

use crate::error::LoaderError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Markup contract: which elements are containers and what they look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub markup: MarkupConfig,
    pub classes: ClassConfig,
    pub text: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// CSS selector used by the document scan.
    pub container_selector: String,
    /// Attribute holding the source video URL.
    pub url_attribute: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassConfig {
    pub loaded: String,
    pub playing: String,
    pub play_button: String,
    pub play_icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    pub play_label: String,
    pub thumbnail_alt: String,
}

/// Partial settings supplied by a page, applied over the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub container_selector: Option<String>,
    pub url_attribute: Option<String>,
    pub loaded_class: Option<String>,
    pub playing_class: Option<String>,
    pub play_button_class: Option<String>,
    pub play_icon_class: Option<String>,
    pub play_label: Option<String>,
    pub thumbnail_alt: Option<String>,
}

impl LoaderConfig {
    /// Parse a complete config from TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self, LoaderError> {
        let config: LoaderConfig =
            toml::from_str(toml_str).map_err(|e| LoaderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults with `overrides` applied on top.
    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self, LoaderError> {
        let mut config = Self::default();
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Replace every field that `overrides` sets.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            container_selector,
            url_attribute,
            loaded_class,
            playing_class,
            play_button_class,
            play_icon_class,
            play_label,
            thumbnail_alt,
        } = overrides;

        replace(&mut self.markup.container_selector, container_selector);
        replace(&mut self.markup.url_attribute, url_attribute);
        replace(&mut self.classes.loaded, loaded_class);
        replace(&mut self.classes.playing, playing_class);
        replace(&mut self.classes.play_button, play_button_class);
        replace(&mut self.classes.play_icon, play_icon_class);
        replace(&mut self.text.play_label, play_label);
        replace(&mut self.text.thumbnail_alt, thumbnail_alt);
    }

    /// Selector, attribute and class names end up in DOM calls that reject
    /// empty or whitespace-containing tokens.
    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.markup.container_selector.trim().is_empty() {
            return Err(LoaderError::Config("container_selector is empty".into()));
        }
        check_token("url_attribute", &self.markup.url_attribute)?;
        check_token("loaded", &self.classes.loaded)?;
        check_token("playing", &self.classes.playing)?;
        check_token("play_button", &self.classes.play_button)?;
        check_token("play_icon", &self.classes.play_icon)?;
        Ok(())
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn replace(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn check_token(field: &str, value: &str) -> Result<(), LoaderError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(LoaderError::Config(format!(
            "{field} must be a single non-empty token, got {value:?}"
        )));
    }
    Ok(())
}
