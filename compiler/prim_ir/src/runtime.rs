//! Host runtime tables.
//!
//! A [`RuntimeLibrary`] is a static, read-only description of the primitive
//! operations a target machine exposes. The checker turns each entry into a
//! `PROVIDED` function declaration; lowering keeps calls to them verbatim.

use crate::Type;

/// Signature of one host-provided operation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeFunction {
    pub name: String,
    /// Non-empty for generic operations, which cannot be exposed.
    pub type_params: Vec<String>,
    pub params: Vec<Type>,
    pub ret: Type,
}

impl RuntimeFunction {
    pub fn new(name: impl Into<String>, params: Vec<Type>, ret: Type) -> Self {
        RuntimeFunction {
            name: name.into(),
            type_params: Vec::new(),
            params,
            ret,
        }
    }

    #[must_use]
    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeLibrary {
    pub name: String,
    pub functions: Vec<RuntimeFunction>,
}

impl RuntimeLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        RuntimeLibrary {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_function(mut self, function: RuntimeFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuntimeFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}
