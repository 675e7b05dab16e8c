use std::fmt;

/// Which generated container a name was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRole {
    Args,
    Result,
}

impl fmt::Display for TypeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRole::Args => f.write_str("arguments"),
            TypeRole::Result => f.write_str("result"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("no naming strategy registered under `{0}`")]
    UnknownStrategy(String),

    #[error("cannot derive {role} type name for service `{service}`, method `{method}`")]
    Unmappable {
        service: String,
        method: String,
        role: TypeRole,
    },
}
