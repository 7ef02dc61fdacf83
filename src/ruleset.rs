//! Rulesets: named capabilities that evaluate conditions at runtime
//!
//! Each [`Capability`] declares the runtime arguments it consumes. The
//! dispatcher projects the caller's [`Args`] onto that list before calling
//! it, so a capability only ever sees the keys it asked for.

use crate::error::{Error, Result};
use crate::value::Literal;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Named runtime arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: HashMap<String, Literal>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Literal>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Literal> {
        self.values.get(name)
    }

    /// Fetch an argument or fail with [`Error::MissingArgument`]
    pub fn require(&self, name: &str) -> Result<&Literal> {
        self.values.get(name).ok_or_else(|| Error::MissingArgument {
            name: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keep exactly the named keys; every one of them must be present
    pub fn project(&self, params: &[String]) -> Result<Args> {
        let mut projected = Args::new();
        for name in params {
            let value = self.require(name)?;
            projected.values.insert(name.clone(), value.clone());
        }
        Ok(projected)
    }
}

impl<K: Into<String>, V: Into<Literal>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Something that produces a literal from named arguments.
///
/// Used both for condition evaluators in a [`Ruleset`] and for computed
/// row results.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a bound dispatcher may be shared
/// across threads.
pub trait Capability: Send + Sync + Debug {
    /// Argument names this capability consumes, in order
    fn params(&self) -> &[String];

    /// Evaluate against arguments already projected onto [`Self::params`]
    fn call(&self, args: &Args) -> Result<Literal>;
}

/// Closure-backed [`Capability`]
pub struct FnCapability {
    params: Vec<String>,
    func: Box<dyn Fn(&Args) -> Literal + Send + Sync>,
}

impl FnCapability {
    pub fn new<I, S, F>(params: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Args) -> Literal + Send + Sync + 'static,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            func: Box::new(func),
        }
    }
}

impl Debug for FnCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCapability")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Capability for FnCapability {
    fn params(&self) -> &[String] {
        &self.params
    }

    fn call(&self, args: &Args) -> Result<Literal> {
        Ok((self.func)(args))
    }
}

/// Returns one named argument unchanged
#[derive(Debug, Clone)]
pub struct ArgCapability {
    params: Vec<String>,
}

impl ArgCapability {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            params: vec![name.into()],
        }
    }

    pub fn name(&self) -> &str {
        &self.params[0]
    }
}

impl Capability for ArgCapability {
    fn params(&self) -> &[String] {
        &self.params
    }

    fn call(&self, args: &Args) -> Result<Literal> {
        args.require(self.name()).cloned()
    }
}

/// Condition name → capability
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    capabilities: HashMap<String, Arc<dyn Capability>>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure as the evaluator for `name`
    pub fn condition<I, S, F>(self, name: impl Into<String>, params: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Args) -> Literal + Send + Sync + 'static,
    {
        self.capability(name, FnCapability::new(params, func))
    }

    /// Register any [`Capability`] as the evaluator for `name`
    pub fn capability(mut self, name: impl Into<String>, cap: impl Capability + 'static) -> Self {
        self.capabilities.insert(name.into(), Arc::new(cap));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Capability>> {
        self.capabilities.get(name)
    }

    /// Look up a condition's evaluator or fail with [`Error::MissingCapability`]
    pub fn require(&self, name: &str) -> Result<&Arc<dyn Capability>> {
        self.capabilities
            .get(name)
            .ok_or_else(|| Error::MissingCapability {
                condition: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.capabilities.keys().map(String::as_str)
    }
}

/// Project `args` onto the capability's params and call it
pub fn invoke(cap: &dyn Capability, args: &Args) -> Result<Literal> {
    let projected = args.project(cap.params())?;
    cap.call(&projected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_keeps_declared_keys_only() {
        let args = Args::new().with("n", 15).with("verbose", true);
        let projected = args.project(&["n".to_string()]).unwrap();
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.get("n"), Some(&Literal::Int(15)));
        assert!(projected.get("verbose").is_none());
    }

    #[test]
    fn test_project_missing_argument() {
        let args = Args::new();
        let err = args.project(&["n".to_string()]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { name } if name == "n"));
    }

    #[test]
    fn test_invoke_closure() {
        let cap = FnCapability::new(["n"], |a| {
            Literal::Bool(a.get("n").and_then(Literal::as_int).unwrap_or(0) % 3 == 0)
        });
        let args = Args::new().with("n", 9);
        assert_eq!(invoke(&cap, &args).unwrap(), Literal::Bool(true));
    }

    #[test]
    fn test_arg_capability_echoes_value() {
        let cap = ArgCapability::new("n");
        let args = Args::new().with("n", 7);
        assert_eq!(invoke(&cap, &args).unwrap(), Literal::Int(7));
    }

    #[test]
    fn test_arg_capability_called_without_its_argument() {
        let cap = ArgCapability::new("n");
        let err = cap.call(&Args::new()).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { name } if name == "n"));
    }

    #[test]
    fn test_ruleset_require() {
        let rules = Ruleset::new().condition("a", ["x"], |_| Literal::Bool(true));
        assert!(rules.require("a").is_ok());
        assert!(matches!(
            rules.require("b"),
            Err(Error::MissingCapability { .. })
        ));
    }
}
