// Query fragment providers for QUERY_CUSTOM arguments

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Turns a custom argument value into a query fragment.
///
/// Providers are registered by name; an argument of kind
/// [`ArgumentKind::QueryCustom`](crate::ArgumentKind::QueryCustom) names the
/// provider that interprets it.
pub trait QueryFragmentProvider: Send + Sync {
    fn fragment(&self, argument: &str, value: &serde_json::Value) -> String;
}

impl<F> QueryFragmentProvider for F
where
    F: Fn(&str, &serde_json::Value) -> String + Send + Sync,
{
    fn fragment(&self, argument: &str, value: &serde_json::Value) -> String {
        self(argument, value)
    }
}

/// Providers available while building a schema.
#[derive(Clone, Default)]
pub struct FragmentProviderRegistry {
    providers: HashMap<String, Arc<dyn QueryFragmentProvider>>,
}

impl FragmentProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, provider: impl QueryFragmentProvider + 'static) {
        self.providers.insert(name.into(), Arc::new(provider));
    }

    pub fn with(mut self, name: impl Into<String>, provider: impl QueryFragmentProvider + 'static) -> Self {
        self.register(name, provider);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn QueryFragmentProvider>> {
        self.providers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FragmentProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
