//! In-memory Foo record store and identifier generation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// The sole domain record: a caller-supplied name and a generated id.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Foo {
    pub name: String,
    pub id: String,
}

/// Keyed collection of [`Foo`] records. Lives for the process lifetime; no
/// durability.
///
/// Not synchronised on its own. Shared access goes through
/// [`AppState`](crate::AppState), which holds it behind a mutex.
#[derive(Debug, Default)]
pub struct FooStore {
    records: HashMap<String, Foo>,
}

impl FooStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record named `name` under a freshly generated id and returns
    /// a copy of it.
    pub fn create(&mut self, name: String) -> Foo {
        let mut id = short_id();
        // Keys stay unique.
        while self.records.contains_key(&id) {
            id = short_id();
        }
        let foo = Foo { name, id: id.clone() };
        debug!(id = %foo.id, name = %foo.name, "foo created");
        self.records.insert(id, foo.clone());
        foo
    }

    pub fn get(&self, id: &str) -> Option<&Foo> {
        self.records.get(id)
    }

    /// Removes the record under `id`, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Foo> {
        let removed = self.records.remove(id);
        if removed.is_some() {
            debug!(%id, "foo removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

const ALPHABET: &[u8; 57] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// 57^22 > 2^128, so every UUID fits in 22 digits.
const ID_LEN: usize = 22;

/// A random v4 UUID written in base 57: 22 characters, no look-alike glyphs
/// (`0`, `1`, `I`, `O`, `l`), most significant digit first.
pub fn short_id() -> String {
    encode_base57(Uuid::new_v4().as_u128())
}

fn encode_base57(mut n: u128) -> String {
    let base = ALPHABET.len() as u128;
    let mut digits = [ALPHABET[0]; ID_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(n % base) as usize];
        n /= base;
    }
    digits.iter().map(|&b| b as char).collect()
}
