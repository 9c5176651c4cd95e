//! Type environment for name resolution and scoping.

use std::rc::Rc;

use prim_ir::Type;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
struct TypeEnvInner {
    bindings: FxHashMap<String, Type>,
    parent: Option<TypeEnv>,
}

/// Persistent type environment.
///
/// Cloning is O(1): scopes share their parent chain through `Rc`. Binding
/// into a shared scope copies only that scope's own table, so an
/// environment handed out earlier never observes later bindings.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv(Rc<TypeEnvInner>);

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child scope whose bindings shadow this one's.
    #[must_use]
    pub fn child(&self) -> Self {
        TypeEnv(Rc::new(TypeEnvInner {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Bind a name in the current scope.
    pub fn bind(&mut self, name: impl Into<String>, ty: Type) {
        Rc::make_mut(&mut self.0).bindings.insert(name.into(), ty);
    }

    /// Return a new environment with `name` bound, leaving `self` untouched.
    #[must_use]
    pub fn insert(&self, name: impl Into<String>, ty: Type) -> Self {
        let mut env = self.clone();
        env.bind(name, ty);
        env
    }

    /// Look up a name, searching parent scopes.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.0
            .bindings
            .get(name)
            .or_else(|| self.0.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
