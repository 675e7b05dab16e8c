mod calc;
pub use calc::*;
