use super::*;

#[test]
fn with_debug_restores_previous_value() {
    let mut ctx = RenderCtx::new(false);
    let inner = ctx.with_debug(true, |ctx| {
        let nested = ctx.with_debug(false, |ctx| ctx.debug());
        assert!(!nested);
        ctx.debug()
    });
    assert!(inner);
    assert!(!ctx.debug());
}

#[test]
fn diagnostics_accumulate_until_taken() {
    let mut ctx = RenderCtx::default();
    ctx.report(RenderDiagnostic::DepthExceeded {
        node: NodeId::from_index(3),
        depth: 11,
    });
    assert_eq!(ctx.diagnostics().len(), 1);
    assert_eq!(ctx.take_diagnostics().len(), 1);
    assert!(ctx.diagnostics().is_empty());
}
