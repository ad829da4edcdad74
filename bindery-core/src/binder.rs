use crate::{
    AsValue, Binding, BindingType, GENERATED_SEED, PARAM_SIGIL, POSITIONAL_MARKER, Param,
    ParameterSink, Result, truncate_long,
};
use indexmap::IndexMap;
use std::{borrow::Cow, hash::Hash};

/// Registry of the values bound while a query is being built.
///
/// Owns the bindings (keyed by the placeholder as written in the query text)
/// and a counter used to manufacture unique placeholder names. A binder
/// belongs to one query scope: helpers building nested fragments receive a
/// `&mut Binder` so that everything ends up in the same scope, and once the
/// statement is prepared the bindings are handed over through `attach_to`.
///
/// ```ignore
/// let mut binder = Binder::new();
/// let name = binder.placeholder("name");
/// binder.bind(name.clone(), "Alice", Some("string".into()));
/// let ids = binder.generate_many([1, 2, 3], Some("integer".into()));
/// let sql = format!("SELECT * FROM users WHERE name = {name} AND id IN ({})", ids.join(", "));
/// binder.attach_to(&mut statement)?;
/// ```
#[derive(Default, Clone, Debug)]
pub struct Binder {
    bindings: IndexMap<Param, Binding>,
    counter: u64,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to the placeholder `param`, replacing any previous binding for it.
    ///
    /// Named keys are expected with their sigil (`":name"`), the stored
    /// `Binding::placeholder` drops the first character of the key.
    pub fn bind(
        &mut self,
        param: impl Into<Param>,
        value: impl AsValue,
        ty: Option<BindingType>,
    ) -> &mut Self {
        let param = param.into();
        let binding = Binding {
            value: value.as_value(),
            ty,
            placeholder: param.stripped(),
        };
        if self.bindings.insert(param.clone(), binding).is_some() {
            log::trace!("Placeholder {param} was bound again, the previous value is replaced");
        }
        self
    }

    /// Reserve a placeholder name derived from `token`.
    ///
    /// Tokens already starting with the sigil and the positional marker are
    /// returned unchanged, anything else becomes sigil + token + counter.
    /// The counter advances on every call.
    pub fn placeholder(&mut self, token: &str) -> String {
        let number = self.counter;
        self.counter += 1;
        if token.starts_with(PARAM_SIGIL) || token == POSITIONAL_MARKER {
            return token.to_owned();
        }
        format!("{PARAM_SIGIL}{token}{number}")
    }

    /// Bind every value to a freshly generated named placeholder, all with type `ty`.
    ///
    /// Returns the generated placeholders (sigil included) under the key each
    /// value had in the input, in the input order. A key repeated in the input
    /// keeps its first placeholder, which is rebound to the later value.
    pub fn generate_many_named<I, K, V>(
        &mut self,
        values: I,
        ty: Option<BindingType>,
    ) -> IndexMap<K, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Hash + Eq,
        V: AsValue,
    {
        let mut result = IndexMap::new();
        for (key, value) in values {
            let token = match result.get(&key) {
                Some(token) => String::clone(token),
                None => self.placeholder(GENERATED_SEED),
            };
            let placeholder = token
                .strip_prefix(PARAM_SIGIL)
                .unwrap_or(token.as_str())
                .to_owned();
            self.bindings.insert(
                Param::Name(Cow::Owned(token.clone())),
                Binding {
                    value: value.as_value(),
                    ty: ty.clone(),
                    placeholder: Param::Name(Cow::Owned(placeholder)),
                },
            );
            result.insert(key, token);
        }
        result
    }

    /// Same as `generate_many_named` for a plain sequence, the placeholders come back in order.
    pub fn generate_many<V: AsValue>(
        &mut self,
        values: impl IntoIterator<Item = V>,
        ty: Option<BindingType>,
    ) -> Vec<String> {
        self.generate_many_named(values.into_iter().enumerate(), ty)
            .into_values()
            .collect()
    }

    /// All the bindings, keyed by the placeholder as it was bound.
    pub fn bindings(&self) -> &IndexMap<Param, Binding> {
        &self.bindings
    }
    pub fn get(&self, param: impl Into<Param>) -> Option<&Binding> {
        self.bindings.get(&param.into())
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Param, &Binding)> {
        self.bindings.iter()
    }
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
    /// Number the next generated placeholder will carry.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Forget every binding and restart the numbering.
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.counter = 0;
    }

    /// Restart the numbering, the bindings are kept.
    pub fn reset_count(&mut self) {
        self.counter = 0;
    }

    /// Deliver every binding to `sink`, in the order they were first bound.
    ///
    /// Stops at the first error returned by the sink, the bindings already
    /// delivered stay delivered.
    pub fn attach_to<S: ParameterSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        if self.bindings.is_empty() {
            return Ok(());
        }
        log::debug!("Attaching {} bindings", self.bindings.len());
        for binding in self.bindings.values() {
            log::trace!(
                "Binding {} = {}",
                binding.placeholder,
                truncate_long!(format!("{:?}", binding.value))
            );
            sink.bind_value(&binding.placeholder, &binding.value, binding.ty.as_ref())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Binder {
    type Item = (&'a Param, &'a Binding);
    type IntoIter = indexmap::map::Iter<'a, Param, Binding>;
    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
