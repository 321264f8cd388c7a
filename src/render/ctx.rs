use crate::scene::graph::NodeId;

/// Something worth reporting that happened while rendering, without failing the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderDiagnostic {
    /// Rendering stopped at `node` because the tree is deeper than the render depth limit.
    DepthExceeded { node: NodeId, depth: usize },
}

/// Per-frame render state threaded through the scene graph.
#[derive(Clone, Debug, Default)]
pub struct RenderCtx {
    debug: bool,
    diagnostics: Vec<RenderDiagnostic>,
}

impl RenderCtx {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            diagnostics: Vec::new(),
        }
    }

    /// Whether debug overlays (pivots, bounding boxes) are drawn.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Run `f` with the debug flag set to `debug`, restoring the previous value afterwards.
    pub fn with_debug<R>(&mut self, debug: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let prev = std::mem::replace(&mut self.debug, debug);
        let out = f(self);
        self.debug = prev;
        out
    }

    pub fn report(&mut self, diagnostic: RenderDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[RenderDiagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<RenderDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ctx.rs"]
mod tests;
