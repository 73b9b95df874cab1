//! Runtime configuration, loaded from the environment. CLI flags win over it.

use fetch::FetchConfig;
use modgraph::DEFAULT_ROOT_NAMESPACE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub fetch: FetchConfig,
    pub root_namespace: String,
    pub render_tool: String,
    pub image_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
            render_tool: "dot".to_string(),
            image_format: "png".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            fetch: FetchConfig::from_vars(&lookup),
            ..Self::default()
        };

        if let Some(v) = get("JARMAP_ROOT_NAMESPACE") {
            config.root_namespace = v;
        }
        if let Some(v) = get("JARMAP_RENDER_TOOL") {
            config.render_tool = v;
        }
        if let Some(v) = get("JARMAP_IMAGE_FORMAT") {
            config.image_format = v;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.root_namespace, "org.apache.commons.math3");
        assert_eq!(config.render_tool, "dot");
        assert_eq!(config.image_format, "png");
    }

    #[test]
    fn test_config_from_vars() {
        let env: HashMap<&str, &str> = [
            ("JARMAP_ROOT_NAMESPACE", "org.hipparchus.core.x"),
            ("JARMAP_IMAGE_FORMAT", "svg"),
            ("JARMAP_USERNAME", "ci"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_vars(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.root_namespace, "org.hipparchus.core.x");
        assert_eq!(config.image_format, "svg");
        assert_eq!(config.render_tool, "dot");
        assert_eq!(config.fetch.username.as_deref(), Some("ci"));
    }
}
