use crate::constants::{
    CONFIG_INTERFACE_KEY, CONFIG_NAMING_KEY, CONFIG_NATIVE_KEY, DEFAULT_NAMING_STRATEGY,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{key}` expects `true` or `false`, got `{value}`")]
    InvalidBool { key: String, value: String },

    /// Native messages carry no service name and none was configured.
    #[error("native mode requires a configured service")]
    MissingService,
}

/// Per-connection codec settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Headerless messages: just the envelope and the body.
    pub native: bool,
    /// Key of the naming strategy in the codec's registry.
    pub naming: String,
    /// Service that inbound native calls are attributed to.
    pub service: Option<String>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::framed()
    }
}

impl ChannelConfig {
    pub fn framed() -> Self {
        Self {
            native: false,
            naming: DEFAULT_NAMING_STRATEGY.to_owned(),
            service: None,
        }
    }

    pub fn native(service: impl Into<String>) -> Self {
        Self {
            native: true,
            service: Some(service.into()),
            ..Self::framed()
        }
    }

    pub fn with_naming(mut self, naming: impl Into<String>) -> Self {
        self.naming = naming.into();
        self
    }

    /// Parses URL-style parameters such as
    /// `thrift.native=true&thrift.naming=dubbo&interface=tutorial.Calc`.
    ///
    /// Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let mut config = Self::framed();

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

            match key {
                CONFIG_NATIVE_KEY => config.native = parse_bool(key, value)?,
                CONFIG_NAMING_KEY if !value.is_empty() => config.naming = value.to_owned(),
                CONFIG_INTERFACE_KEY if !value.is_empty() => {
                    config.service = Some(value.to_owned())
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::InvalidBool {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_framed_default() {
        assert_eq!(ChannelConfig::from_query(""), Ok(ChannelConfig::default()));
    }

    #[test]
    fn query_sets_every_option() {
        let config = ChannelConfig::from_query(
            "?thrift.native=TRUE&thrift.naming=dubbo&interface=tutorial.Calc&timeout=300",
        )
        .expect("parse");

        assert_eq!(
            config,
            ChannelConfig::native("tutorial.Calc").with_naming("dubbo")
        );
    }

    #[test]
    fn malformed_bool_is_rejected() {
        assert_eq!(
            ChannelConfig::from_query("thrift.native=yes"),
            Err(ConfigError::InvalidBool {
                key: "thrift.native".into(),
                value: "yes".into(),
            })
        );
    }
}
