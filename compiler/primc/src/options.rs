/// Knobs for one compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Fold constants after unrolling and again after inlining.
    pub simplify: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions { simplify: true }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }
}
