//! Conditional edges: route to the next node based on state.
//!
//! The router returns a key; the key is the next node id (or END), or is looked
//! up in an optional path map first.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Router function: reads the state and returns a routing key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Routing function plus optional path map.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub(super) path: ConditionalRouterFn<S>,
    pub(super) path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Next node id (or END): `path_map[key]` when mapped, otherwise the key itself.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        self.path_map
            .as_ref()
            .and_then(|m| m.get(&key))
            .cloned()
            .unwrap_or(key)
    }
}

/// How the next node is chosen after a given node.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Fixed next node (or END). The node's own `Next` is still respected.
    Unconditional(String),
    /// Decided by the router from state; the node's `Next` is ignored.
    Conditional(ConditionalRouter<S>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_next_uses_path_map_then_key() {
        let router: ConditionalRouter<i32> = ConditionalRouter::new(
            Arc::new(|s: &i32| if *s > 0 { "pos".into() } else { "other".into() }),
            Some(HashMap::from([("pos".to_string(), "positive".to_string())])),
        );
        assert_eq!(router.resolve_next(&1), "positive");
        assert_eq!(router.resolve_next(&-1), "other");
    }
}
