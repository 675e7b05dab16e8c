mod add;
mod divide;
mod divide_by_zero;
mod ping;

pub use add::{AddArgs, AddResult};
pub use divide::{DivideArgs, DivideResult};
pub use divide_by_zero::DivideByZero;
pub use ping::{PingArgs, PingResult};

use std::sync::Arc;
use thriftmux::{
    locator::{StructTypeRegistry, TypeLocator},
    structure::GeneratedType,
};

pub const CALC_SERVICE: &str = "tutorial.Calc";

pub const ADD_ARGS: &str = "tutorial.Calc$add_args";
pub const ADD_RESULT: &str = "tutorial.Calc$add_result";
pub const DIVIDE_ARGS: &str = "tutorial.Calc$divide_args";
pub const DIVIDE_RESULT: &str = "tutorial.Calc$divide_result";
pub const PING_ARGS: &str = "tutorial.Calc$ping_args";
pub const PING_RESULT: &str = "tutorial.Calc$ping_result";
pub const DIVIDE_BY_ZERO: &str = "tutorial.DivideByZero";

/// Adds every `Calc` container type to `registry`.
pub fn register_calc_types(registry: &mut StructTypeRegistry) -> &mut StructTypeRegistry {
    registry
        .register(GeneratedType::<AddArgs>::handle(ADD_ARGS))
        .register(GeneratedType::<AddResult>::handle(ADD_RESULT))
        .register(GeneratedType::<DivideArgs>::handle(DIVIDE_ARGS))
        .register(GeneratedType::<DivideResult>::handle(DIVIDE_RESULT))
        .register(GeneratedType::<PingArgs>::handle(PING_ARGS))
        .register(GeneratedType::<PingResult>::handle(PING_RESULT))
}

pub fn calc_type_locator() -> Arc<dyn TypeLocator> {
    let mut registry = StructTypeRegistry::new();
    register_calc_types(&mut registry);
    registry.into_locator()
}
