//! Named, indexed collections of holders.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{DispatchValue, Holder, InvokeError};

/// Holder handle shared between a book and anyone extending the holder
/// after it was placed there.
///
/// Writers take the lock to register signatures; invocations only read.
pub type SharedHolder<V> = Arc<RwLock<Holder<V>>>;

/// Address of a holder within a [`Book`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolderKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for HolderKey<'_> {
    fn from(index: usize) -> Self {
        HolderKey::Index(index)
    }
}

impl<'a> From<&'a str> for HolderKey<'a> {
    fn from(name: &'a str) -> Self {
        HolderKey::Name(name)
    }
}

impl fmt::Display for HolderKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolderKey::Index(index) => write!(f, "at index {index}"),
            HolderKey::Name(name) => write!(f, "`{name}`"),
        }
    }
}

/// Holders for a family of related operations (`add`, `sub`, `eq`, ...).
///
/// Slots are addressed by index; each occupied slot is also reachable by
/// its holder's name. Names are unique: placing a holder whose name is
/// already used at another index evicts the older one.
pub struct Book<V> {
    name: String,
    holders: Vec<Option<SharedHolder<V>>>,
    by_name: FxHashMap<String, usize>,
}

impl<V: DispatchValue> Book<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holders: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Place `holder` at `index`, returning the holder it displaced there.
    pub fn set(&mut self, index: usize, holder: Holder<V>) -> Option<SharedHolder<V>> {
        self.set_shared(index, Arc::new(RwLock::new(holder)))
    }

    /// Place an already shared holder at `index`.
    pub fn set_shared(&mut self, index: usize, holder: SharedHolder<V>) -> Option<SharedHolder<V>> {
        let name = holder.read().name().to_owned();
        if index >= self.holders.len() {
            self.holders.resize_with(index + 1, || None);
        }

        let previous = self.holders[index].take();
        if let Some(previous) = &previous {
            let previous_name = previous.read().name().to_owned();
            if self.by_name.get(&previous_name) == Some(&index) {
                self.by_name.remove(&previous_name);
            }
        }

        if let Some(other) = self.by_name.insert(name.clone(), index) {
            if other != index {
                self.holders[other] = None;
                tracing::debug!(
                    book = %self.name,
                    holder = %name,
                    from = other,
                    to = index,
                    "evicted holder with duplicate name"
                );
            }
        }

        self.holders[index] = Some(holder);
        previous
    }

    /// Empty the slot at `index`.
    pub fn take(&mut self, index: usize) -> Option<SharedHolder<V>> {
        let holder = self.holders.get_mut(index)?.take()?;
        let name = holder.read().name().to_owned();
        self.by_name.remove(&name);
        Some(holder)
    }

    pub fn get(&self, index: usize) -> Option<&SharedHolder<V>> {
        self.holders.get(index)?.as_ref()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&SharedHolder<V>> {
        self.index_of(name).and_then(|index| self.get(index))
    }

    /// Slot index of the holder called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Names of occupied slots, in index order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<(usize, &str)> = self
            .by_name
            .iter()
            .map(|(name, &index)| (index, name.as_str()))
            .collect();
        names.sort_unstable();
        names.into_iter().map(|(_, name)| name).collect()
    }

    /// Resolve `key` to a holder.
    pub fn holder<'k>(&self, key: impl Into<HolderKey<'k>>) -> Result<&SharedHolder<V>, InvokeError> {
        let key = key.into();
        let found = match key {
            HolderKey::Index(index) => self.get(index),
            HolderKey::Name(name) => self.get_by_name(name),
        };
        found.ok_or_else(|| InvokeError::NoSuchHolder {
            book: self.name.clone(),
            key: key.to_string(),
        })
    }

    /// Invoke the holder at `key`, writing into `ret`.
    ///
    /// A missing holder is reported like a dispatch miss and leaves `ret`
    /// untouched. The holder's lock is released before the callable runs,
    /// so callables may invoke or extend holders of the same book.
    pub fn invoke<'k>(
        &self,
        key: impl Into<HolderKey<'k>>,
        args: &[V],
        ret: &mut V,
    ) -> Result<(), InvokeError> {
        let binding = self.holder(key)?.read().prepare(args, ret)?;
        binding.invoke(args, ret)
    }

    /// Invoke the holder at `key` with freshly initialized return storage.
    pub fn invoke_overwrite<'k>(
        &self,
        key: impl Into<HolderKey<'k>>,
        args: &[V],
    ) -> Result<V, InvokeError> {
        let binding = self.holder(key)?.read().resolve(args)?.clone();
        binding.invoke_overwrite(args)
    }
}

impl<V> fmt::Debug for Book<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("name", &self.name)
            .field("slots", &self.holders.len())
            .field("holders", &self.by_name.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
