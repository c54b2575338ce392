//! Callables and the value contract they operate on.

use std::fmt;
use std::sync::Arc;

use mdisp_types::TypeId;

use crate::CallError;

/// A value that can flow through dispatch.
///
/// The engine never looks inside values. It only needs the dynamic type of
/// an argument, and a way to produce return storage of a given type for
/// [`Holder::invoke_overwrite`](crate::Holder::invoke_overwrite).
pub trait DispatchValue: Clone {
    /// The actual runtime type of this value.
    ///
    /// For polymorphic values this is the dynamic subtype, not the declared
    /// static type: an `Animal` slot holding a `Dog` reports `Dog`.
    fn runtime_type(&self) -> TypeId;

    /// Fresh storage initialized to `ty`, ready to be written by a callable.
    fn initialized(ty: TypeId) -> Self;
}

type CallFn<V> = dyn Fn(&[V], &mut V) -> Result<(), CallError> + Send + Sync;

/// Shared handle to a native implementation.
///
/// Receives the arguments and the return storage. Cloning is cheap; clones
/// call the same closure.
pub struct Callable<V>(Arc<CallFn<V>>);

impl<V> Callable<V> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[V], &mut V) -> Result<(), CallError> + Send + Sync + 'static,
    {
        Callable(Arc::new(f))
    }

    /// Run the closure.
    #[inline]
    pub fn call(&self, args: &[V], ret: &mut V) -> Result<(), CallError> {
        (self.0)(args, ret)
    }

    /// Whether both handles share the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<V> Clone for Callable<V> {
    fn clone(&self) -> Self {
        Callable(Arc::clone(&self.0))
    }
}

impl<V> fmt::Debug for Callable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}
