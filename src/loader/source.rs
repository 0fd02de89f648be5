use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Resolves an external name to its value.
///
/// Returning `None` means the name is not set; the bound field keeps its
/// current value. Closures of the right shape are lookups too:
///
/// ```
/// use dragon_env::Lookup;
///
/// let lookup = |name: &str| (name == "APP_PORT").then(|| "8080".to_string());
/// assert_eq!(lookup.lookup("APP_PORT").as_deref(), Some("8080"));
/// ```
pub trait Lookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}

impl Lookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// An ordered stack of lookups.
///
/// Sources are consulted in reverse registration order, so later sources
/// override earlier ones.
#[derive(Default)]
pub struct Layered {
    sources: Vec<Box<dyn Lookup>>,
}

impl Layered {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: impl Lookup + 'static) {
        self.sources.push(Box::new(source));
    }

    pub(crate) fn push_boxed(&mut self, source: Box<dyn Lookup>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Lookup for Layered {
    fn lookup(&self, name: &str) -> Option<String> {
        self.sources.iter().rev().find_map(|s| s.lookup(name))
    }
}

impl fmt::Debug for Layered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layered")
            .field("sources", &self.sources.len())
            .finish()
    }
}
