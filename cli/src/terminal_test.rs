use super::*;

// =============================================================
// TerminalShell
// =============================================================

#[test]
fn shell_remembers_last_alert_and_navigation() {
    let shell = TerminalShell::new();
    assert_eq!(shell.last_alert(), None);

    shell.alert("Invalid credentials");
    shell.alert("Username exists");
    shell.navigate(Page::Home);

    assert_eq!(shell.last_alert().as_deref(), Some("Username exists"));
    assert_eq!(shell.last_navigation(), Some(Page::Home));
}

#[test]
fn shell_clock_is_past_2020() {
    assert!(TerminalShell::new().now_millis() > 1_577_836_800_000);
}

// =============================================================
// TerminalControl
// =============================================================

#[test]
fn control_tracks_label() {
    let control = TerminalControl::new("Login");
    control.set_label("Verifying...");
    assert_eq!(control.label(), "Verifying...");
    control.set_label("Login");
    assert_eq!(control.label(), "Login");
}

// =============================================================
// Roadmap rendering
// =============================================================

#[test]
fn cards_print_header_goal_and_tasks() {
    let cards = vec![
        MonthCard { month: 1, goal: "Foundations".into(), tasks: vec!["Read ch.1".into(), "Exercises".into()] },
        MonthCard { month: 3, goal: "Projects".into(), tasks: vec![] },
    ];
    assert_eq!(
        format_cards(&cards),
        "Month 1: Foundations\n  - Read ch.1\n  - Exercises\n\nMonth 3: Projects\n\n"
    );
}

#[test]
fn roadmap_view_keeps_latest_display() {
    let view = TerminalRoadmap::new();
    view.show(PlanDisplay::Loading);
    view.show(PlanDisplay::Error("Error: Plan failed".into()));
    assert_eq!(view.current(), PlanDisplay::Error("Error: Plan failed".into()));
}

// =============================================================
// TerminalChat
// =============================================================

#[test]
fn chat_reports_latest_bot_text() {
    let chat = TerminalChat::new();
    assert_eq!(chat.last_bot_text(), None);

    chat.edit(|t| {
        t.push_user("hi");
        t.push_bot("hello");
        t.push_user("again");
    });

    assert_eq!(chat.last_bot_text().as_deref(), Some("hello"));
}
