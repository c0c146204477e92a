use super::*;

#[test]
fn ui_state_default_has_no_toasts() {
    assert!(UiState::default().toasts.is_empty());
}

#[test]
fn push_toast_assigns_increasing_ids() {
    let mut ui = UiState::default();
    let a = ui.push_toast(ToastKind::Success, "Logged in successfully!");
    let b = ui.push_toast(ToastKind::Error, "Login failed");
    assert!(b > a);
    assert_eq!(ui.toasts.len(), 2);
    assert_eq!(ui.toasts[1].kind, ToastKind::Error);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut ui = UiState::default();
    let a = ui.push_toast(ToastKind::Info, "a");
    let _b = ui.push_toast(ToastKind::Info, "b");
    ui.dismiss_toast(a);
    assert_eq!(ui.toasts.iter().map(|t| t.message.as_str()).collect::<Vec<_>>(), vec!["b"]);
    ui.dismiss_toast(999);
    assert_eq!(ui.toasts.len(), 1);
}

#[test]
fn queue_drops_oldest_past_cap() {
    let mut ui = UiState::default();
    for i in 0..6 {
        ui.push_toast(ToastKind::Info, format!("t{i}"));
    }
    assert_eq!(ui.toasts.len(), 4);
    assert_eq!(ui.toasts[0].message, "t2");
}

#[test]
fn toast_kind_classes() {
    assert_eq!(ToastKind::Error.class(), "toast toast--error");
}
