use crate::{BindingType, Error, PARAM_SIGIL, Param, Result, Value};
use std::borrow::Cow;

/// Receiver of the bindings, usually a prepared statement of some driver.
///
/// `Binder::attach_to` calls `bind_value` once per binding. Errors (unknown
/// placeholder, incompatible value or type) are returned to the caller of
/// `attach_to` as they are.
pub trait ParameterSink {
    fn bind_value(
        &mut self,
        placeholder: &Param,
        value: &Value,
        ty: Option<&BindingType>,
    ) -> Result<()>;
}

impl<F> ParameterSink for F
where
    F: FnMut(&Param, &Value, Option<&BindingType>) -> Result<()>,
{
    fn bind_value(
        &mut self,
        placeholder: &Param,
        value: &Value,
        ty: Option<&BindingType>,
    ) -> Result<()> {
        self(placeholder, value, ty)
    }
}

/// Value and cast tag received by a `PositionalParameters` slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    pub value: Value,
    pub ty: Option<BindingType>,
}

/// Parameter slots of a statement that only understands positions.
///
/// Slots are zero-based. Named placeholders are resolved through the
/// parameter names declared with `with_names`: the name at index `i` is slot `i`.
#[derive(Default, Debug, Clone)]
pub struct PositionalParameters {
    names: Vec<Cow<'static, str>>,
    params: Vec<Option<BoundParameter>>,
}

impl PositionalParameters {
    /// Statement with `len` anonymous parameters.
    pub fn new(len: usize) -> Self {
        Self {
            names: Vec::new(),
            params: vec![None; len],
        }
    }
    /// Statement with named parameters, the sigil in front of each name is optional.
    pub fn with_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Cow<'static, str>>,
    {
        let names: Vec<Cow<'static, str>> = names
            .into_iter()
            .map(Into::into)
            .map(|name| match name.strip_prefix(PARAM_SIGIL) {
                Some(v) => Cow::Owned(v.to_owned()),
                None => name,
            })
            .collect();
        Self {
            params: vec![None; names.len()],
            names,
        }
    }
    pub fn len(&self) -> usize {
        self.params.len()
    }
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
    /// Slot addressed by `placeholder`.
    pub fn index_of(&self, placeholder: &Param) -> Result<usize> {
        match placeholder {
            Param::Position(index) => usize::try_from(*index)
                .ok()
                .filter(|v| *v < self.params.len())
                .ok_or(Error::msg(format!(
                    "Index {index} cannot be bound, the statement has only {} parameters",
                    self.params.len()
                ))),
            Param::Name(name) => self
                .names
                .iter()
                .position(|v| v == name)
                .ok_or(Error::msg(format!(
                    "Placeholder {PARAM_SIGIL}{name} is not a parameter of the statement"
                ))),
        }
    }
    pub fn get(&self, index: usize) -> Option<&BoundParameter> {
        self.params.get(index).and_then(Option::as_ref)
    }
    /// Slots that did not receive a value yet.
    pub fn missing(&self) -> Vec<usize> {
        self.params
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_none().then_some(i))
            .collect()
    }
    /// Clear all bound values.
    pub fn clear_bindings(&mut self) -> &mut Self {
        self.params.iter_mut().for_each(|v| *v = None);
        self
    }
    /// Move the bound values out, the slots are left empty.
    pub fn take_params(&mut self) -> Vec<Option<BoundParameter>> {
        self.params.iter_mut().map(Option::take).collect()
    }
}

impl ParameterSink for PositionalParameters {
    fn bind_value(
        &mut self,
        placeholder: &Param,
        value: &Value,
        ty: Option<&BindingType>,
    ) -> Result<()> {
        let index = self.index_of(placeholder)?;
        self.params[index] = Some(BoundParameter {
            value: value.clone(),
            ty: ty.cloned(),
        });
        Ok(())
    }
}
