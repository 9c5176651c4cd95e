//! Runtime-capability injection.

use prim_diagnostic::{CompileError, CompileResult};
use prim_ir::{Param, RawFunction, RuntimeLibrary};

/// Line number given to declarations that do not come from source.
pub(crate) const SYNTHETIC_LINE: u32 = 0;

/// Turn every operation of `library` into a `PROVIDED` function declaration.
///
/// Parameters are named `arg0`, `arg1`, ... in order. Generic operations
/// and operations whose signature mentions a function type cannot be
/// expressed on the target and are rejected.
#[tracing::instrument(level = "debug", skip_all, fields(library = %library.name))]
pub fn inject_runtime(library: &RuntimeLibrary) -> CompileResult<Vec<RawFunction>> {
    library
        .functions
        .iter()
        .map(|function| {
            let exposable = function.type_params.is_empty()
                && function.ret.is_primitive()
                && function.params.iter().all(prim_ir::Type::is_primitive);
            if !exposable {
                return Err(CompileError::DisallowedRuntimeFunction {
                    library: library.name.clone(),
                    name: function.name.clone(),
                });
            }

            tracing::trace!(name = %function.name, "injecting runtime operation");
            let params = function
                .params
                .iter()
                .enumerate()
                .map(|(i, ty)| Param::new(format!("arg{i}"), ty.clone()))
                .collect();
            Ok(RawFunction::provided(
                function.name.clone(),
                params,
                function.ret.clone(),
                SYNTHETIC_LINE,
            ))
        })
        .collect()
}
