use crate::{
    window_host::{WindowHost, WindowSpec},
    window_registry::{Reposition, WindowRequest},
    ShellContext, MAIN_WINDOW_LABEL,
};

fn apply_repositions<H, F>(host: &H, plan: Vec<Reposition>, log: F)
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    for reposition in plan {
        if let Err(error) = host.set_window_position(&reposition.window_id, reposition.position) {
            log(&format!("failed to reposition {}: {error}", reposition.window_id));
        }
    }
}

/// Opens `request.route` as a new child window glued to the primary window.
///
/// Returns the new window's id. A failed creation leaves every other child
/// untouched and nothing is registered.
pub(crate) fn open_child_window<H, F>(
    context: &ShellContext,
    host: &H,
    request: &WindowRequest,
    log: F,
) -> Result<String, String>
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    let primary = host.window_bounds(MAIN_WINDOW_LABEL);
    let pending = context.with_registry(|registry| registry.prepare_open(request, primary))?;
    let spec = WindowSpec::child(&pending);

    if let Err(error) = host.create_window(&spec) {
        log(&format!(
            "failed to open child window for route {}: {error}",
            request.route
        ));
        return Err(error);
    }

    // Clamping works on outer bounds, which differ from the requested inner size.
    let mut window = pending.window;
    if let Some(bounds) = host.window_bounds(&window.id) {
        window.size = bounds.size();
    }
    let window_id = window.id.clone();
    context.with_registry(|registry| registry.register(window))?;
    log(&format!("opened {window_id} for route {}", request.route));
    Ok(window_id)
}

pub(crate) fn handle_primary_moved<H, F>(context: &ShellContext, host: &H, log: F)
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    let Some(bounds) = host.window_bounds(MAIN_WINDOW_LABEL) else {
        return;
    };
    match context.with_registry(|registry| registry.on_primary_moved(bounds)) {
        Ok(plan) => apply_repositions(host, plan, log),
        Err(error) => log(&format!("primary move ignored: {error}")),
    }
}

pub(crate) fn handle_primary_resized<H, F>(context: &ShellContext, host: &H, log: F)
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    let Some(bounds) = host.window_bounds(MAIN_WINDOW_LABEL) else {
        return;
    };
    match context.with_registry(|registry| registry.on_primary_resized(bounds)) {
        Ok(plan) => apply_repositions(host, plan, log),
        Err(error) => log(&format!("primary resize ignored: {error}")),
    }
}

pub(crate) fn handle_child_moved<H, F>(context: &ShellContext, host: &H, window_id: &str, log: F)
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    let (Some(child_bounds), Some(primary)) = (
        host.window_bounds(window_id),
        host.window_bounds(MAIN_WINDOW_LABEL),
    ) else {
        return;
    };

    let correction = context.with_registry(|registry| {
        registry.record_child_size(window_id, child_bounds.size());
        registry.on_child_moved(window_id, child_bounds, primary)
    });
    match correction {
        Ok(Some(reposition)) => apply_repositions(host, vec![reposition], log),
        Ok(None) => {}
        Err(error) => log(&format!("child move ignored for {window_id}: {error}")),
    }
}

pub(crate) fn handle_child_resized<H, F>(context: &ShellContext, host: &H, window_id: &str, log: F)
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    let Some(bounds) = host.window_bounds(window_id) else {
        return;
    };
    if let Err(error) =
        context.with_registry(|registry| registry.record_child_size(window_id, bounds.size()))
    {
        log(&format!("child resize ignored for {window_id}: {error}"));
    }
}

pub(crate) fn handle_child_destroyed<F>(context: &ShellContext, window_id: &str, log: F)
where
    F: Fn(&str),
{
    match context.with_registry(|registry| registry.remove(window_id)) {
        Ok(Some(child)) => log(&format!("closed {} ({})", child.id, child.route)),
        Ok(None) => {}
        Err(error) => log(&format!("failed to unregister {window_id}: {error}")),
    }
}

/// Closes every registered child. The primary window is left alone.
pub(crate) fn close_all_children<H, F>(context: &ShellContext, host: &H, log: F)
where
    H: WindowHost + ?Sized,
    F: Fn(&str),
{
    let children = match context.with_registry(|registry| registry.close_all()) {
        Ok(children) => children,
        Err(error) => {
            log(&format!("close all children skipped: {error}"));
            return;
        }
    };

    for child in children {
        if let Err(error) = host.close_window(&child.id) {
            log(&format!("failed to close {}: {error}", child.id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{Position, Rect, Size},
        shell_config::ShellConfig,
        window_host::fake::FakeWindowHost,
        window_registry::ChildWindowOptions,
    };

    fn context() -> ShellContext {
        ShellContext::new(ShellConfig::default()).expect("context builds")
    }

    fn no_log(_: &str) {}

    fn registered(context: &ShellContext) -> usize {
        context
            .with_registry(|registry| registry.len())
            .expect("registry lock")
    }

    fn host_with_primary(bounds: Rect) -> FakeWindowHost {
        FakeWindowHost::default().with_window(MAIN_WINDOW_LABEL, bounds)
    }

    #[test]
    fn open_without_options_uses_default_size_and_offset() {
        let context = context();
        let host = host_with_primary(Rect::new(100, 40, 1920, 1080));

        let id = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/categoria", "Categoria"),
            no_log,
        )
        .expect("child opens");

        let spec = host.spec(&id).expect("window exists");
        assert_eq!(spec.size, Size::new(1024, 768));
        assert!(spec.resizable);
        assert_eq!(spec.parent, Some(MAIN_WINDOW_LABEL));
        assert_eq!(host.position_of(&id), Some(Position::new(150, 90)));
        assert_eq!(registered(&context), 1);
    }

    #[test]
    fn open_without_primary_leaves_child_unpositioned() {
        let context = context();
        let host = FakeWindowHost::default();

        let id = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/relatorios", "Relatórios"),
            no_log,
        )
        .expect("child opens");

        assert_eq!(host.spec(&id).and_then(|spec| spec.position), None);
    }

    #[test]
    fn new_child_is_clamped_with_its_outer_size() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1000, 800));
        *host.frame.borrow_mut() = (20, 40);
        let id = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/loja", "Loja")
                .with_options(ChildWindowOptions::sized(940, 740)),
            no_log,
        )
        .expect("child opens");

        host.place(MAIN_WINDOW_LABEL, Rect::new(200, 100, 1000, 800));
        handle_primary_moved(&context, &host, no_log);

        assert_eq!(host.position_of(&id), Some(Position::new(240, 120)));
        assert_eq!(host.move_count(), 1);
    }

    #[test]
    fn failed_creation_does_not_touch_registry() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1920, 1080));
        let existing = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/loja", "Loja"),
            no_log,
        )
        .expect("first child opens");
        host.fail_route("/cadastros/usuario");

        let result = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/usuario", "Usuário"),
            no_log,
        );

        assert!(result.is_err());
        assert_eq!(registered(&context), 1);
        assert!(host.is_open(&existing));
    }

    #[test]
    fn primary_moves_keep_children_at_their_offsets() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1920, 1080));
        let small = ChildWindowOptions::sized(400, 300).with_offset(Position::new(200, 120));
        let a = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/genero", "Gênero"),
            no_log,
        )
        .expect("a opens");
        let b = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/perguntas", "Perguntas").with_options(small),
            no_log,
        )
        .expect("b opens");

        for (x, y) in [(10, 10), (-300, 200), (640, 0)] {
            host.place(MAIN_WINDOW_LABEL, Rect::new(x, y, 1920, 1080));
            handle_primary_moved(&context, &host, no_log);
            assert_eq!(host.position_of(&a), Some(Position::new(x + 50, y + 50)));
            assert_eq!(host.position_of(&b), Some(Position::new(x + 200, y + 120)));
        }
    }

    #[test]
    fn primary_move_with_no_children_is_noop() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 800, 600));
        handle_primary_moved(&context, &host, no_log);
        handle_primary_resized(&context, &host, no_log);
        assert_eq!(host.move_count(), 0);
    }

    #[test]
    fn primary_resize_translates_children() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1920, 1080));
        let id = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/loja", "Loja")
                .with_options(ChildWindowOptions::sized(300, 200)),
            no_log,
        )
        .expect("child opens");

        host.place(MAIN_WINDOW_LABEL, Rect::new(30, 20, 1000, 700));
        handle_primary_resized(&context, &host, no_log);
        assert_eq!(host.position_of(&id), Some(Position::new(80, 70)));
    }

    #[test]
    fn dragging_child_outside_triggers_exactly_one_correction() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1000, 800));
        let id = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/categoria", "Categoria")
                .with_options(ChildWindowOptions::sized(400, 300)),
            no_log,
        )
        .expect("child opens");
        let moves_before = host.move_count();

        host.place(&id, Rect::new(900, -50, 400, 300));
        handle_child_moved(&context, &host, &id, no_log);
        assert_eq!(host.move_count(), moves_before + 1);
        assert_eq!(host.position_of(&id), Some(Position::new(600, 0)));

        // The corrective move raises its own move event; it must settle.
        handle_child_moved(&context, &host, &id, no_log);
        assert_eq!(host.move_count(), moves_before + 1);
    }

    #[test]
    fn dragging_child_inside_is_noop() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1000, 800));
        let id = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/categoria", "Categoria")
                .with_options(ChildWindowOptions::sized(400, 300)),
            no_log,
        )
        .expect("child opens");
        let moves_before = host.move_count();

        host.place(&id, Rect::new(600, 500, 400, 300));
        handle_child_moved(&context, &host, &id, no_log);
        assert_eq!(host.move_count(), moves_before);
    }

    #[test]
    fn resized_child_is_clamped_with_its_new_size() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1000, 800));
        let id = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/relatorios", "Relatórios")
                .with_options(ChildWindowOptions::sized(200, 200)),
            no_log,
        )
        .expect("child opens");

        host.place(&id, Rect::new(50, 50, 900, 700));
        handle_child_resized(&context, &host, &id, no_log);
        handle_primary_moved(&context, &host, no_log);
        assert_eq!(host.position_of(&id), Some(Position::new(50, 50)));

        host.place(MAIN_WINDOW_LABEL, Rect::new(0, 0, 900, 700));
        handle_primary_resized(&context, &host, no_log);
        assert_eq!(host.position_of(&id), Some(Position::new(0, 0)));
    }

    #[test]
    fn destroying_one_child_leaves_others_in_place() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1920, 1080));
        let a = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/loja", "Loja"),
            no_log,
        )
        .expect("a opens");
        let b = open_child_window(
            &context,
            &host,
            &WindowRequest::new("/cadastros/usuario", "Usuário")
                .with_options(ChildWindowOptions::default().with_offset(Position::new(90, 90))),
            no_log,
        )
        .expect("b opens");
        let b_position = host.position_of(&b);
        let moves_before = host.move_count();

        host.close_window(&a).expect("close a");
        handle_child_destroyed(&context, &a, no_log);

        assert_eq!(registered(&context), 1);
        assert_eq!(host.position_of(&b), b_position);
        assert_eq!(host.move_count(), moves_before);

        handle_child_destroyed(&context, &a, no_log);
        assert_eq!(registered(&context), 1);
    }

    #[test]
    fn close_all_children_spares_primary() {
        let context = context();
        let host = host_with_primary(Rect::new(0, 0, 1920, 1080));
        for route in ["/cadastros/loja", "/cadastros/usuario", "/relatorios"] {
            open_child_window(&context, &host, &WindowRequest::new(route, route), no_log)
                .expect("child opens");
        }

        close_all_children(&context, &host, no_log);

        assert_eq!(registered(&context), 0);
        assert_eq!(host.closed.borrow().len(), 3);
        assert!(host.is_open(MAIN_WINDOW_LABEL));
    }
}
