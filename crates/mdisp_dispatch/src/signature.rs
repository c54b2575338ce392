//! Function signatures: a parameter tuple plus a return type.

use std::fmt;

use mdisp_types::{TypeId, TypeOracle, TypeTuple};

/// Declared return type and parameter types of a callable.
///
/// Immutable once built. Holders share signatures through `Arc` between
/// their exact table and graph payloads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    return_type: TypeId,
    params: TypeTuple,
}

impl Signature {
    pub fn new(return_type: TypeId, params: impl Into<TypeTuple>) -> Self {
        Self {
            return_type,
            params: params.into(),
        }
    }

    #[inline]
    pub fn return_type(&self) -> TypeId {
        self.return_type
    }

    #[inline]
    pub fn params(&self) -> &TypeTuple {
        &self.params
    }

    /// Number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.arity()
    }

    /// Parameter type at `index`, `None` past the end.
    #[inline]
    pub fn param(&self, index: usize) -> Option<TypeId> {
        self.params.get(index)
    }

    /// Whether a callable of this signature can stand in wherever `to` is
    /// expected.
    ///
    /// The return type is covariant and parameters are contravariant. A
    /// signature with fewer parameters is compatible with a longer one; the
    /// extra arguments are ignored.
    pub fn compatible_to<O: TypeOracle + ?Sized>(&self, to: &Signature, oracle: &O) -> bool {
        oracle.is_subtype(self.return_type, to.return_type)
            && self.arity() <= to.arity()
            && self
                .params
                .iter()
                .zip(to.params.iter())
                .all(|(from, to)| oracle.is_subtype(to, from))
    }

    /// Whether `args` are exactly the parameter types.
    pub fn arg_match_exact(&self, args: &[TypeId]) -> bool {
        self.params.as_slice() == args
    }

    /// Whether each argument type is a subtype of its parameter.
    pub fn arg_match_subtype<O: TypeOracle + ?Sized>(&self, args: &[TypeId], oracle: &O) -> bool {
        self.arity() == args.len()
            && args
                .iter()
                .zip(self.params.iter())
                .all(|(&arg, param)| oracle.is_subtype(arg, param))
    }

    /// Whether each argument is a subtype of, or convertible into, its
    /// parameter.
    pub fn arg_match_transformable<O: TypeOracle + ?Sized>(
        &self,
        args: &[TypeId],
        oracle: &O,
    ) -> bool {
        self.arity() == args.len()
            && args
                .iter()
                .zip(self.params.iter())
                .all(|(&arg, param)| oracle.is_transformable(arg, param))
    }

    /// Format as `ret (p1, p2)` with names resolved through `oracle`.
    #[inline]
    pub fn display<'a, O: TypeOracle + ?Sized>(&'a self, oracle: &'a O) -> SignatureDisplay<'a, O> {
        SignatureDisplay {
            signature: self,
            oracle,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.return_type, self.params)
    }
}

/// Helper for displaying a `Signature` with resolved names.
pub struct SignatureDisplay<'a, O: ?Sized> {
    signature: &'a Signature,
    oracle: &'a O,
}

impl<O: TypeOracle + ?Sized> fmt::Display for SignatureDisplay<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ret = self.signature.return_type;
        match self.oracle.type_name(ret) {
            Some(name) => f.write_str(name)?,
            None => write!(f, "{ret}")?,
        }
        write!(f, " {}", self.signature.params.display(self.oracle))
    }
}
