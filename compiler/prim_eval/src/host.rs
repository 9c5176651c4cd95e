//! The host runtime seen by the evaluator.

use prim_ir::{Literal, Type};
use rustc_hash::FxHashMap;

/// A runtime value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Void,
    Int(i32),
    Bool(bool),
}

impl Value {
    /// The value a host returns when it has nothing better to say.
    pub fn default_of(ty: &Type) -> Value {
        match ty {
            Type::Int => Value::Int(0),
            Type::Bool => Value::Bool(false),
            Type::Void | Type::Function { .. } => Value::Void,
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Int(value) => Value::Int(value),
            Literal::Bool(value) => Value::Bool(value),
        }
    }
}

/// Executes calls to `PROVIDED` functions.
pub trait Host {
    /// Perform the operation `name` and return its result. `ret` is the
    /// declared return type of the call site.
    fn call(&mut self, name: &str, args: &[Value], ret: &Type) -> Value;
}

/// One call observed by a [`RecordingHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostCall {
    pub name: String,
    pub args: Vec<Value>,
}

/// A host that logs every call and answers from a fixed table of sensor
/// readings, falling back to the default value of the return type.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    readings: FxHashMap<String, Value>,
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reading(mut self, name: impl Into<String>, value: Value) -> Self {
        self.readings.insert(name.into(), value);
        self
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }
}

impl Host for RecordingHost {
    fn call(&mut self, name: &str, args: &[Value], ret: &Type) -> Value {
        tracing::trace!(name, ?args, "host call");
        self.calls.push(HostCall {
            name: name.to_string(),
            args: args.to_vec(),
        });
        self.readings
            .get(name)
            .copied()
            .unwrap_or_else(|| Value::default_of(ret))
    }
}
