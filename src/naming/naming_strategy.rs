use crate::naming::{NamingError, TypeRole};

/// Maps a (service, method) pair to the names of its generated argument and
/// result struct types.
///
/// Implementations must be pure: the same inputs always give the same names.
pub trait NamingStrategy: Send + Sync {
    fn args_type_name(&self, service: &str, method: &str) -> Result<String, NamingError>;

    fn result_type_name(&self, service: &str, method: &str) -> Result<String, NamingError>;
}

fn unmappable(service: &str, method: &str, role: TypeRole) -> NamingError {
    NamingError::Unmappable {
        service: service.to_owned(),
        method: method.to_owned(),
        role,
    }
}

fn suffix(role: TypeRole) -> &'static str {
    match role {
        TypeRole::Args => "_args",
        TypeRole::Result => "_result",
    }
}

/// Layout of the stock IDL compiler: `{service}${method}_args`.
///
/// Anything after the first `$` of the service name is dropped, so the
/// interface name `tutorial.Calc$Iface` resolves like `tutorial.Calc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThriftNaming;

impl ThriftNaming {
    fn type_name(service: &str, method: &str, role: TypeRole) -> Result<String, NamingError> {
        let base = service.split('$').next().unwrap_or_default();
        if base.is_empty() || method.is_empty() {
            return Err(unmappable(service, method, role));
        }
        Ok(format!("{base}${method}{}", suffix(role)))
    }
}

impl NamingStrategy for ThriftNaming {
    fn args_type_name(&self, service: &str, method: &str) -> Result<String, NamingError> {
        Self::type_name(service, method, TypeRole::Args)
    }

    fn result_type_name(&self, service: &str, method: &str) -> Result<String, NamingError> {
        Self::type_name(service, method, TypeRole::Result)
    }
}

/// Stub layout: `{package.}$__{Service}Stub${method}_args`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DubboNaming;

impl DubboNaming {
    fn type_name(service: &str, method: &str, role: TypeRole) -> Result<String, NamingError> {
        let (package, simple) = match service.rfind('.') {
            Some(index) => service.split_at(index + 1),
            None => ("", service),
        };
        if simple.is_empty() || method.is_empty() {
            return Err(unmappable(service, method, role));
        }
        Ok(format!("{package}$__{simple}Stub${method}{}", suffix(role)))
    }
}

impl NamingStrategy for DubboNaming {
    fn args_type_name(&self, service: &str, method: &str) -> Result<String, NamingError> {
        Self::type_name(service, method, TypeRole::Args)
    }

    fn result_type_name(&self, service: &str, method: &str) -> Result<String, NamingError> {
        Self::type_name(service, method, TypeRole::Result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrift_naming_uses_service_base() {
        let naming = ThriftNaming;

        assert_eq!(
            naming.args_type_name("tutorial.Calc", "add").as_deref(),
            Ok("tutorial.Calc$add_args")
        );
        assert_eq!(
            naming.result_type_name("tutorial.Calc$Iface", "add").as_deref(),
            Ok("tutorial.Calc$add_result")
        );
    }

    #[test]
    fn thrift_naming_rejects_empty_inputs() {
        let naming = ThriftNaming;

        assert!(naming.args_type_name("", "add").is_err());
        assert!(naming.args_type_name("$Iface", "add").is_err());
        assert_eq!(
            naming.result_type_name("tutorial.Calc", ""),
            Err(NamingError::Unmappable {
                service: "tutorial.Calc".into(),
                method: String::new(),
                role: TypeRole::Result,
            })
        );
    }

    #[test]
    fn dubbo_naming_builds_stub_names() {
        let naming = DubboNaming;

        assert_eq!(
            naming.args_type_name("tutorial.Calc", "add").as_deref(),
            Ok("tutorial.$__CalcStub$add_args")
        );
        assert_eq!(
            naming.result_type_name("Calc", "add").as_deref(),
            Ok("$__CalcStub$add_result")
        );
        assert!(naming.args_type_name("tutorial.", "add").is_err());
    }
}
