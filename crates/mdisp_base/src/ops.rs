//! Base operations and their per-type implementations.

use mdisp_dispatch::errors::{division_by_zero, type_mismatch, wrong_arg_count};
use mdisp_dispatch::{CallError, Callable, Holder, Signature};
use mdisp_types::{SharedOracle, TypeId};

use crate::types::{self, BOOL, CHAR, DOUBLE, FLOAT, INT, INT64, LONG, UINT};
use crate::Value;

/// Operations of the base book. The discriminant is the book index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseOp {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Inc,
    Dec,
    LShift,
    RShift,
    Less,
    Leq,
    Eq,
    Geq,
    Greater,
}

impl BaseOp {
    /// Every operation in index order.
    pub const ALL: [BaseOp; 14] = [
        BaseOp::Add,
        BaseOp::Sub,
        BaseOp::Mul,
        BaseOp::Div,
        BaseOp::Neg,
        BaseOp::Inc,
        BaseOp::Dec,
        BaseOp::LShift,
        BaseOp::RShift,
        BaseOp::Less,
        BaseOp::Leq,
        BaseOp::Eq,
        BaseOp::Geq,
        BaseOp::Greater,
    ];

    /// Slot of this operation in the base book.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Holder name.
    pub const fn name(self) -> &'static str {
        match self {
            BaseOp::Add => "add",
            BaseOp::Sub => "sub",
            BaseOp::Mul => "mul",
            BaseOp::Div => "div",
            BaseOp::Neg => "neg",
            BaseOp::Inc => "inc",
            BaseOp::Dec => "dec",
            BaseOp::LShift => "lshift",
            BaseOp::RShift => "rshift",
            BaseOp::Less => "less",
            BaseOp::Leq => "leq",
            BaseOp::Eq => "eq",
            BaseOp::Geq => "geq",
            BaseOp::Greater => "greater",
        }
    }

    /// Number of operands.
    pub const fn arity(self) -> usize {
        match self {
            BaseOp::Neg | BaseOp::Inc | BaseOp::Dec => 1,
            _ => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

/// One holder per operation, indexed by `BaseOp::index`.
pub(crate) struct Holders(Vec<Holder<Value>>);

impl Holders {
    fn new(oracle: &SharedOracle) -> Self {
        Holders(
            BaseOp::ALL
                .iter()
                .map(|op| Holder::new(op.name(), oracle.clone()))
                .collect(),
        )
    }

    fn at(&mut self, op: BaseOp) -> &mut Holder<Value> {
        &mut self.0[op.index()]
    }

    pub(crate) fn into_inner(self) -> Vec<Holder<Value>> {
        self.0
    }
}

type Extract<T> = fn(&Value) -> Option<T>;
type Apply<A, B> = fn(A, B) -> Result<Value, CallError>;

fn operand_mismatch(expected: TypeId, args: &[Value]) -> CallError {
    let got = args
        .iter()
        .map(Value::type_name)
        .collect::<Vec<_>>()
        .join(", ");
    type_mismatch(types::name(expected).unwrap_or("primitive"), &got)
}

fn unary<T: Copy + 'static>(ty: TypeId, get: Extract<T>, op: fn(T) -> Value) -> Callable<Value> {
    Callable::new(move |args: &[Value], ret: &mut Value| {
        let [a] = args else {
            return Err(wrong_arg_count(1, args.len()));
        };
        let a = get(a).ok_or_else(|| operand_mismatch(ty, args))?;
        *ret = op(a);
        Ok(())
    })
}

fn binary<A: Copy + 'static, B: Copy + 'static>(
    ty: TypeId,
    left: Extract<A>,
    right: Extract<B>,
    op: Apply<A, B>,
) -> Callable<Value> {
    Callable::new(move |args: &[Value], ret: &mut Value| {
        let [a, b] = args else {
            return Err(wrong_arg_count(2, args.len()));
        };
        match (left(a), right(b)) {
            (Some(a), Some(b)) => {
                *ret = op(a, b)?;
                Ok(())
            }
            _ => Err(operand_mismatch(ty, args)),
        }
    })
}

fn uint(value: &Value) -> Option<u32> {
    match value {
        Value::UInt(n) => Some(*n),
        _ => None,
    }
}

fn compares<T: PartialOrd + Copy + 'static>(holders: &mut Holders, ty: TypeId, get: Extract<T>) {
    let sig = Signature::new(BOOL, [ty, ty]);
    let table: [(BaseOp, Apply<T, T>); 5] = [
        (BaseOp::Less, |a, b| Ok(Value::Bool(a < b))),
        (BaseOp::Leq, |a, b| Ok(Value::Bool(a <= b))),
        (BaseOp::Eq, |a, b| Ok(Value::Bool(a == b))),
        (BaseOp::Geq, |a, b| Ok(Value::Bool(a >= b))),
        (BaseOp::Greater, |a, b| Ok(Value::Bool(a > b))),
    ];
    for (op, apply) in table {
        holders.at(op).set(sig.clone(), binary(ty, get, get, apply));
    }
}

/// Register the integer family for one representation.
macro_rules! integer_ops {
    ($holders:expr, $variant:ident, $t:ty, $ty:expr) => {{
        fn get(value: &Value) -> Option<$t> {
            match value {
                Value::$variant(n) => Some(*n),
                _ => None,
            }
        }

        let ty = $ty;
        let pair = Signature::new(ty, [ty, ty]);
        let single = Signature::new(ty, [ty]);
        let shift = Signature::new(ty, [ty, UINT]);

        let arith: [(BaseOp, Apply<$t, $t>); 4] = [
            (BaseOp::Add, |a, b| Ok(Value::$variant(a.wrapping_add(b)))),
            (BaseOp::Sub, |a, b| Ok(Value::$variant(a.wrapping_sub(b)))),
            (BaseOp::Mul, |a, b| Ok(Value::$variant(a.wrapping_mul(b)))),
            (BaseOp::Div, |a, b| {
                if b == 0 {
                    Err(division_by_zero())
                } else {
                    Ok(Value::$variant(a.wrapping_div(b)))
                }
            }),
        ];
        for (op, apply) in arith {
            $holders.at(op).set(pair.clone(), binary(ty, get, get, apply));
        }

        let steps: [(BaseOp, fn($t) -> Value); 3] = [
            (BaseOp::Neg, |a| Value::$variant(a.wrapping_neg())),
            (BaseOp::Inc, |a| Value::$variant(a.wrapping_add(1))),
            (BaseOp::Dec, |a| Value::$variant(a.wrapping_sub(1))),
        ];
        for (op, apply) in steps {
            $holders.at(op).set(single.clone(), unary(ty, get, apply));
        }

        let shifts: [(BaseOp, Apply<$t, u32>); 2] = [
            (BaseOp::LShift, |a, n| Ok(Value::$variant(a.wrapping_shl(n)))),
            (BaseOp::RShift, |a, n| Ok(Value::$variant(a.wrapping_shr(n)))),
        ];
        for (op, apply) in shifts {
            $holders.at(op).set(shift.clone(), binary(ty, get, uint, apply));
        }

        compares(&mut $holders, ty, get);
    }};
}

/// Register the floating-point family for one representation.
macro_rules! float_ops {
    ($holders:expr, $variant:ident, $t:ty, $ty:expr) => {{
        fn get(value: &Value) -> Option<$t> {
            match value {
                Value::$variant(x) => Some(*x),
                _ => None,
            }
        }

        let ty = $ty;
        let pair = Signature::new(ty, [ty, ty]);

        let arith: [(BaseOp, Apply<$t, $t>); 4] = [
            (BaseOp::Add, |a, b| Ok(Value::$variant(a + b))),
            (BaseOp::Sub, |a, b| Ok(Value::$variant(a - b))),
            (BaseOp::Mul, |a, b| Ok(Value::$variant(a * b))),
            (BaseOp::Div, |a, b| Ok(Value::$variant(a / b))),
        ];
        for (op, apply) in arith {
            $holders.at(op).set(pair.clone(), binary(ty, get, get, apply));
        }
        $holders
            .at(BaseOp::Neg)
            .set(Signature::new(ty, [ty]), unary(ty, get, |a| Value::$variant(-a)));

        compares(&mut $holders, ty, get);
    }};
}

/// Build every base holder.
pub(crate) fn build(oracle: &SharedOracle) -> Holders {
    let mut holders = Holders::new(oracle);

    integer_ops!(holders, Char, i8, CHAR);
    integer_ops!(holders, Int, i32, INT);
    integer_ops!(holders, Long, i64, LONG);
    integer_ops!(holders, Int64, i64, INT64);
    float_ops!(holders, Float, f32, FLOAT);
    float_ops!(holders, Double, f64, DOUBLE);

    tracing::debug!(
        bindings = holders.0.iter().map(Holder::len).sum::<usize>(),
        "built base holders"
    );
    holders
}
