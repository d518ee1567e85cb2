//! Server Configuration
//!
//! Read from the environment (after `.env` is loaded). Stripe credentials are
//! read separately by `StripeClient::from_env`.

/// Runtime settings for the shop server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// Shop name shown in page titles
    pub shop_name: String,

    /// Directory holding the compiled WASM bundle and other static files
    pub static_dir: String,

    /// Product ids generated at startup
    pub prerender: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            shop_name: "Ignite Shop".into(),
            static_dir: "static".into(),
            prerender: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            shop_name: lookup("SHOP_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.shop_name),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            prerender: lookup("PRERENDER_PRODUCTS")
                .map(|ids| parse_ids(&ids))
                .unwrap_or_default(),
        }
    }
}

fn parse_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.shop_name, "Ignite Shop");
    }

    #[test]
    fn test_prerender_list() {
        let config = ServerConfig::from_lookup(lookup(&[(
            "PRERENDER_PRODUCTS",
            " prod_PWIWALdwPZE9QO, ,prod_other ",
        )]));
        assert_eq!(config.prerender, vec!["prod_PWIWALdwPZE9QO", "prod_other"]);
    }

    #[test]
    fn test_blank_shop_name_falls_back() {
        let config = ServerConfig::from_lookup(lookup(&[("SHOP_NAME", "  ")]));
        assert_eq!(config.shop_name, "Ignite Shop");
    }
}
