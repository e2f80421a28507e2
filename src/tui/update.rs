//! Action dispatch: (App, Action) -> Transition.
//!
//! Each action maps onto one SelectionModel operation. Toggling is the
//! only action with a side effect (the git call made by the gateway).

use crate::vcs::VcsGateway;

use super::state::{Action, App, StatusLine, StatusKind, Transition};

/// Apply one action to the app.
///
/// `viewport_height` is the number of list rows currently on screen;
/// moving down needs it to keep the cursor visible.
pub fn update<G: VcsGateway + ?Sized>(
    app: &mut App,
    action: Action,
    gateway: &mut G,
    viewport_height: usize,
) -> Transition {
    log::debug!("action {:?}", action);

    match action {
        Action::MoveUp => app.model.move_up(),
        Action::MoveDown => app.model.move_down(viewport_height),
        Action::SwitchTab => app.model.switch_tab(),
        Action::Toggle => {
            if let Some(outcome) = app.model.toggle_selected(gateway) {
                let status = StatusLine::from(&outcome);
                if status.kind == StatusKind::Failure {
                    log::warn!("{}", status.text);
                }
                app.status = Some(status);
            }
        }
        Action::Quit => {
            app.should_quit = true;
            return Transition::Quit;
        }
    }

    Transition::Continue
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::FakeGateway;
    use crate::model::{SelectionModel, Tab};

    fn app(available: &[&str], flagged: &[&str]) -> App {
        App::new(SelectionModel::new(
            available.iter().map(|s| s.to_string()).collect(),
            flagged.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app(&["a.txt"], &[]);
        let mut gateway = FakeGateway::default();
        assert_eq!(update(&mut app, Action::Quit, &mut gateway, 5), Transition::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn movement_dispatches_to_model() {
        let mut app = app(&["a.txt", "b.txt", "c.txt"], &[]);
        let mut gateway = FakeGateway::default();

        update(&mut app, Action::MoveDown, &mut gateway, 5);
        update(&mut app, Action::MoveDown, &mut gateway, 5);
        assert_eq!(app.model.selected_index(), Some(2));

        update(&mut app, Action::MoveUp, &mut gateway, 5);
        assert_eq!(app.model.selected_index(), Some(1));
        assert!(gateway.calls.is_empty());
    }

    #[test]
    fn move_down_uses_viewport_height() {
        let mut app = app(&["a", "b", "c", "d"], &[]);
        let mut gateway = FakeGateway::default();
        update(&mut app, Action::MoveDown, &mut gateway, 1);
        assert_eq!(app.model.scroll_offset(), 1);
    }

    #[test]
    fn switch_tab_dispatches() {
        let mut app = app(&["a.txt"], &["b.txt"]);
        let mut gateway = FakeGateway::default();
        let result = update(&mut app, Action::SwitchTab, &mut gateway, 5);
        assert_eq!(result, Transition::Continue);
        assert_eq!(app.model.active_tab(), Tab::Flagged);
    }

    #[test]
    fn toggle_records_success_status() {
        let mut app = app(&["a.txt"], &[]);
        let mut gateway = FakeGateway::default();

        update(&mut app, Action::Toggle, &mut gateway, 5);

        let status = app.status.expect("status after toggle");
        assert_eq!(status.kind, StatusKind::Success);
        assert!(status.text.contains("a.txt"));
        assert_eq!(app.model.flagged(), ["a.txt".to_string()]);
    }

    #[test]
    fn toggle_failure_is_reported_but_move_stands() {
        let mut app = app(&["a.txt"], &[]);
        let mut gateway = FakeGateway {
            fail: vec!["a.txt".into()],
            ..Default::default()
        };

        update(&mut app, Action::Toggle, &mut gateway, 5);

        let status = app.status.clone().expect("status after toggle");
        assert_eq!(status.kind, StatusKind::Failure);
        assert!(status.text.contains("Failed to execute command on 'a.txt'"));
        assert!(app.model.available().is_empty());
        assert_eq!(app.model.flagged(), ["a.txt".to_string()]);
    }

    #[test]
    fn toggle_on_empty_list_keeps_previous_status() {
        let mut app = app(&[], &["x.txt"]);
        let mut gateway = FakeGateway::default();

        update(&mut app, Action::Toggle, &mut gateway, 5);

        assert!(app.status.is_none());
        assert!(gateway.calls.is_empty());
    }
}
