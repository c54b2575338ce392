//! One named operation and its registered implementations.

use std::fmt;
use std::sync::Arc;

use mdisp_graph::TypeGraph;
use mdisp_types::{SharedOracle, TypeId, TypeOracle, TypeTuple};
use rustc_hash::FxHashMap;

use crate::{Callable, DispatchValue, HolderConfig, InvokeError, Signature};

/// A signature and the callable registered for it.
pub struct Binding<V> {
    signature: Arc<Signature>,
    callable: Callable<V>,
}

impl<V> Binding<V> {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn callable(&self) -> &Callable<V> {
        &self.callable
    }
}

impl<V: DispatchValue> Binding<V> {
    /// Call into `ret`, which is only replaced when the call succeeds.
    ///
    /// No return-slot check happens here; see [`Holder::prepare`].
    pub fn invoke(&self, args: &[V], ret: &mut V) -> Result<(), InvokeError> {
        let mut slot = ret.clone();
        self.callable.call(args, &mut slot)?;
        *ret = slot;
        Ok(())
    }

    /// Call into storage initialized to the return type.
    pub fn invoke_overwrite(&self, args: &[V]) -> Result<V, InvokeError> {
        let mut slot = V::initialized(self.signature.return_type());
        self.callable.call(args, &mut slot)?;
        Ok(slot)
    }
}

impl<V> Clone for Binding<V> {
    fn clone(&self) -> Self {
        Self {
            signature: Arc::clone(&self.signature),
            callable: self.callable.clone(),
        }
    }
}

impl<V> fmt::Debug for Binding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("signature", &*self.signature)
            .field("callable", &self.callable)
            .finish()
    }
}

/// Callables of one operation, dispatched on argument runtime types.
///
/// Each distinct parameter tuple has at most one binding. Registering a
/// signature whose parameters are already bound replaces that binding,
/// whatever the return types.
///
/// # Lookup paths
///
/// - [`get`](Self::get): exact signature, return type included
/// - [`lookup`](Self::lookup): most specific binding accepting a tuple
/// - [`invoke`](Self::invoke): `lookup` on the runtime types of values
pub struct Holder<V> {
    name: String,
    graph: TypeGraph<Binding<V>>,

    /// Exact table keyed by full signature.
    exact: FxHashMap<Arc<Signature>, Callable<V>>,

    config: HolderConfig,
}

impl<V: DispatchValue> Holder<V> {
    /// Create an empty holder with the default configuration.
    pub fn new(name: impl Into<String>, oracle: SharedOracle) -> Self {
        Self::with_config(name, oracle, HolderConfig::default())
    }

    pub fn with_config(name: impl Into<String>, oracle: SharedOracle, config: HolderConfig) -> Self {
        Self {
            name: name.into(),
            graph: TypeGraph::with_tie_break(oracle, config.tie_break),
            exact: FxHashMap::default(),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oracle(&self) -> &SharedOracle {
        self.graph.oracle()
    }

    pub fn config(&self) -> HolderConfig {
        self.config
    }

    /// The dispatch graph, for inspection (`candidates`, `keys_by_arity`).
    pub fn graph(&self) -> &TypeGraph<Binding<V>> {
        &self.graph
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Bind `callable` to `signature`, returning the binding it replaced.
    ///
    /// # Panics
    ///
    /// Panics if `signature` has no parameters.
    pub fn set(&mut self, signature: Signature, callable: Callable<V>) -> Option<Binding<V>> {
        let signature = Arc::new(signature);
        let binding = Binding {
            signature: Arc::clone(&signature),
            callable: callable.clone(),
        };

        let previous = self.graph.set(signature.params().clone(), binding);
        if let Some(previous) = &previous {
            self.exact.remove(&*previous.signature);
            tracing::debug!(
                holder = %self.name,
                old = %previous.signature.display(&**self.oracle()),
                new = %signature.display(&**self.oracle()),
                "replaced binding"
            );
        }
        self.exact.insert(signature, callable);
        previous
    }

    /// Callable registered for exactly `signature`.
    pub fn get(&self, signature: &Signature) -> Option<&Callable<V>> {
        self.exact.get(signature)
    }

    /// Most specific binding whose parameters accept `params`.
    pub fn lookup(&self, params: &TypeTuple) -> Option<&Binding<V>> {
        self.graph.lookup(params)
    }

    /// Parameter tuple of the binding `params` resolves to.
    pub fn lookup_key(&self, params: &TypeTuple) -> Option<&TypeTuple> {
        self.graph.lookup_key(params)
    }

    /// Remove the binding for exactly `params`.
    pub fn remove(&mut self, params: &TypeTuple) -> Option<Binding<V>> {
        let binding = self.graph.remove(params)?;
        self.exact.remove(&*binding.signature);
        Some(binding)
    }

    /// Registered signatures, grouped by arity and listed breadth-first
    /// from the most general.
    pub fn signatures(&self) -> Vec<&Signature> {
        self.graph
            .arities()
            .into_iter()
            .flat_map(|arity| self.graph.values_by_arity(arity))
            .map(Binding::signature)
            .collect()
    }

    /// Runtime types of `args`.
    pub fn arg_types(args: &[V]) -> TypeTuple {
        args.iter().map(DispatchValue::runtime_type).collect()
    }

    /// Dispatch on the runtime types of `args` and write the result into
    /// `ret`.
    ///
    /// `ret` must already hold a value whose type accepts the resolved
    /// return type (unless `check_return_slot` is off). On any error `ret`
    /// is left untouched, even if the callable wrote to its storage before
    /// failing.
    #[tracing::instrument(level = "trace", skip_all, fields(holder = %self.name))]
    pub fn invoke(&self, args: &[V], ret: &mut V) -> Result<(), InvokeError> {
        self.prepare(args, ret)?.invoke(args, ret)
    }

    /// Dispatch on the runtime types of `args` and return a fresh result.
    ///
    /// The callable writes into storage initialized to the resolved return
    /// type.
    #[tracing::instrument(level = "trace", skip_all, fields(holder = %self.name))]
    pub fn invoke_overwrite(&self, args: &[V]) -> Result<V, InvokeError> {
        self.resolve(args)?.invoke_overwrite(args)
    }

    /// Resolve `args` and check `ret` against the binding's return type,
    /// without calling anything.
    ///
    /// The returned binding is detached from the holder, so it can run
    /// after a lock around the holder has been released.
    pub fn prepare(&self, args: &[V], ret: &V) -> Result<Binding<V>, InvokeError> {
        let binding = self.resolve(args)?;
        let expected = binding.signature.return_type();

        if self.config.check_return_slot {
            let found = ret.runtime_type();
            if !self.oracle().is_subtype(expected, found) {
                return Err(InvokeError::ReturnSlotMismatch {
                    expected: self.type_label(expected),
                    found: self.type_label(found),
                });
            }
        }
        Ok(binding.clone())
    }

    /// The binding `args` dispatch to.
    pub fn resolve(&self, args: &[V]) -> Result<&Binding<V>, InvokeError> {
        let types = Self::arg_types(args);
        match self.graph.lookup(&types) {
            Some(binding) => {
                tracing::trace!(
                    signature = %binding.signature.display(&**self.oracle()),
                    "resolved"
                );
                Ok(binding)
            }
            None => {
                let args = types.display(&**self.oracle()).to_string();
                tracing::debug!(holder = %self.name, %args, "no matching signature");
                Err(InvokeError::NotFound {
                    holder: self.name.clone(),
                    args,
                })
            }
        }
    }

    fn type_label(&self, ty: TypeId) -> String {
        self.oracle()
            .type_name(ty)
            .map_or_else(|| ty.to_string(), str::to_owned)
    }
}

impl<V> fmt::Debug for Holder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Holder")
            .field("name", &self.name)
            .field("bindings", &self.graph.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
