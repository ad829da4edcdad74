use crate::Value;
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};

/// Leading character of a named placeholder.
pub const PARAM_SIGIL: char = ':';
/// Positional placeholder marker, passed through untouched.
pub const POSITIONAL_MARKER: &str = "?";
/// Base name of the placeholders manufactured by `Binder::generate_many_named`.
pub const GENERATED_SEED: &str = "c";

/// Placeholder key: an ordinal position or a name.
///
/// Named keys are usually written with the sigil (`":name"`), the
/// `Binding::placeholder` stored alongside has it removed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Param {
    Position(u64),
    Name(Cow<'static, str>),
}

impl Param {
    /// Key as delivered to the driver.
    ///
    /// Integers are kept as they are. Strings lose their first character
    /// without checking that it actually is the sigil, callers must pass
    /// well formed named tokens.
    pub fn stripped(&self) -> Param {
        match self {
            Param::Position(v) => Param::Position(*v),
            Param::Name(v) => {
                let mut chars = v.chars();
                chars.next();
                Param::Name(Cow::Owned(chars.as_str().to_owned()))
            }
        }
    }
    pub fn is_positional(&self) -> bool {
        matches!(self, Param::Position(..))
    }
    pub fn as_position(&self) -> Option<u64> {
        match self {
            Param::Position(v) => Some(*v),
            Param::Name(..) => None,
        }
    }
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Param::Position(..) => None,
            Param::Name(v) => Some(v.as_ref()),
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Param::Position(v) => write!(f, "{v}"),
            Param::Name(v) => f.write_str(v),
        }
    }
}

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        Param::Position(value)
    }
}

impl From<&'static str> for Param {
    fn from(value: &'static str) -> Self {
        Param::Name(Cow::Borrowed(value))
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Name(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for Param {
    fn from(value: Cow<'static, str>) -> Self {
        Param::Name(value)
    }
}

/// Cast tag telling the driver how to encode a value.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum BindingType {
    Name(Cow<'static, str>),
    Code(i64),
}

impl Display for BindingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BindingType::Name(v) => f.write_str(v),
            BindingType::Code(v) => write!(f, "{v}"),
        }
    }
}

impl From<&'static str> for BindingType {
    fn from(value: &'static str) -> Self {
        BindingType::Name(Cow::Borrowed(value))
    }
}

impl From<String> for BindingType {
    fn from(value: String) -> Self {
        BindingType::Name(Cow::Owned(value))
    }
}

impl From<i64> for BindingType {
    fn from(value: i64) -> Self {
        BindingType::Code(value)
    }
}

/// One bound value.
#[derive(Clone, PartialEq, Debug)]
pub struct Binding {
    /// Payload for the driver, never inspected here.
    pub value: Value,
    /// Cast tag, `None` lets the driver infer it.
    pub ty: Option<BindingType>,
    /// Key without the sigil, or the position itself.
    pub placeholder: Param,
}
