//! Application state shared by every route handler.
//!
//! [`AppState`] is built once in `main` and cloned into each route closure.
//! The store sits behind a `tokio::sync::Mutex`: the runtime is
//! multi-threaded, so handlers can run in parallel, and each store operation
//! takes the lock once for its single map step.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::{Foo, FooStore};

#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Mutex<FooStore>>,
}

impl AppState {
    /// State with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose store starts with one record named `name`. Returns the
    /// seed too, since its id is generated.
    pub fn with_seed(name: &str) -> (Self, Foo) {
        let mut store = FooStore::new();
        let seed = store.create(name.to_owned());
        (Self { store: Arc::new(Mutex::new(store)) }, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_state_holds_one_record() {
        let (state, seed) = AppState::with_seed("seed");
        let store = state.store.lock().await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&seed.id), Some(&seed));
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let state = AppState::new();
        let other = state.clone();
        let foo = other.store.lock().await.create("shared".to_owned());
        assert!(state.store.lock().await.get(&foo.id).is_some());
    }
}
