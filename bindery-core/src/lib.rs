mod as_value;
mod binder;
mod binding;
mod sink;
mod util;
mod value;

pub use ::anyhow::Context as ErrorContext;
pub use as_value::*;
pub use binder::*;
pub use binding::*;
pub use sink::*;
pub use util::*;
pub use value::*;

/// Result type.
pub type Result<T> = anyhow::Result<T>;
/// Error type.
pub type Error = anyhow::Error;
