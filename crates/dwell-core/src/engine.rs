//! The activity engine: applies decoded events to the window registry and
//! the dwell-time tracker, producing activity events.

use chrono::{DateTime, Utc};

use crate::event::{ActivityEvent, Event};
use crate::process::{ProcessDetails, ProcessLookup};
use crate::registry::WindowRegistry;
use crate::resolver::ResolveName;
use crate::tracker::ActivityTracker;
use crate::types::{Window, WindowId, WorkspaceId};

/// Owns all activity state. Feed it events one at a time with [`Engine::apply`].
#[derive(Debug)]
pub struct Engine<R, P> {
    registry: WindowRegistry,
    tracker: ActivityTracker,
    focused_workspace: Option<WorkspaceId>,
    resolver: R,
    lookup: P,
}

impl<R: ResolveName, P: ProcessLookup> Engine<R, P> {
    /// Creates an engine with empty state whose clocks start at `now`.
    pub fn new(resolver: R, lookup: P, now: DateTime<Utc>) -> Self {
        Self {
            registry: WindowRegistry::new(),
            tracker: ActivityTracker::new(now),
            focused_workspace: None,
            resolver,
            lookup,
        }
    }

    pub const fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub const fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }

    pub const fn focused_workspace(&self) -> Option<WorkspaceId> {
        self.focused_workspace
    }

    /// Resolves the activity name for a focus context.
    ///
    /// The focused window's own title wins. Otherwise the other windows of
    /// `workspace` (or of the focused window's workspace when none is given)
    /// are tried in registry order.
    pub fn resolve_active_name(
        &self,
        focused: Option<WindowId>,
        workspace: Option<WorkspaceId>,
    ) -> Option<String> {
        let mut workspace = workspace;

        if let Some(window) = focused.and_then(|id| self.registry.lookup(id)) {
            if let Some(name) = self.resolver.resolve(window.title()) {
                return Some(name);
            }
            workspace = window.workspace_id;
        }

        let workspace = workspace?;
        self.registry
            .windows_in_workspace(workspace)
            .filter(|window| Some(window.id) != focused)
            .find_map(|window| self.resolver.resolve(window.title()))
    }

    /// Applies one event and returns whatever it produced, in order.
    ///
    /// `now` timestamps compositor events. Idle events carry their own
    /// timestamp, which takes precedence.
    pub fn apply(&mut self, event: Event, now: DateTime<Utc>) -> Vec<ActivityEvent> {
        let mut emitted = Vec::new();

        match event {
            Event::WindowsSnapshot { windows } => {
                let focused = self.rebuild(windows).or_else(|| self.tracker.focused());
                self.change_focus(focused, now, &mut emitted);
            }
            Event::WorkspaceActivated { id, .. } => {
                self.focused_workspace = Some(id);
                let name = self.resolve_active_name(None, Some(id));
                emitted.extend(self.tracker.record_name(name, now));
            }
            Event::WindowOpenedOrChanged { window } => {
                let id = window.id;
                self.registry.upsert(window);
                let name = self.resolve_active_name(Some(id), None);
                emitted.extend(self.tracker.record_name(name, now));
            }
            Event::WindowFocusChanged { id } => {
                self.change_focus(id, now, &mut emitted);
            }
            Event::WindowClosed { id } => {
                self.registry.remove(id);
            }
            Event::IdleTimeout { timestamp } => {
                emitted.push(self.tracker.flush(timestamp));
            }
            Event::IdleResume { timestamp } => {
                self.tracker.on_resume(timestamp);
            }
            Event::Passthrough { tag } => {
                tracing::trace!(%tag, "ignoring event");
            }
        }

        emitted
    }

    /// Replaces the registry contents. Returns the window the snapshot
    /// marks as focused, if any.
    fn rebuild(&mut self, windows: Vec<Window>) -> Option<WindowId> {
        self.registry.reset();
        let mut focused = None;
        for window in windows {
            if window.is_focused {
                focused = Some(window.id);
            }
            self.registry.upsert(window);
        }
        focused
    }

    /// Records a focus move, then re-resolves the name for the new focus.
    fn change_focus(
        &mut self,
        id: Option<WindowId>,
        now: DateTime<Utc>,
        emitted: &mut Vec<ActivityEvent>,
    ) {
        let name = self.resolve_active_name(id, None);

        if let Some(dwell) = self.tracker.record_focus(id, now) {
            let window = id.and_then(|id| self.registry.lookup(id));
            let details = window
                .and_then(|w| w.pid)
                .and_then(|pid| self.lookup.lookup(pid))
                .unwrap_or_default();
            let ProcessDetails { exe_path, cmdline } = details;

            tracing::debug!(
                previous = ?dwell.previous,
                focused = ?id,
                duration_ms = dwell.duration_ms,
                "focus changed"
            );
            emitted.push(ActivityEvent::FocusChange {
                at: now,
                window_id: id,
                app_id: window.and_then(|w| w.app_id.clone()),
                name: name.clone(),
                duration_ms: dwell.duration_ms,
                exe_path,
                cmdline,
            });
        }

        emitted.extend(self.tracker.record_name(name, now));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use chrono::Duration;

    use super::*;
    use crate::process::NoLookup;
    use crate::resolver::TitleRules;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-29T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn at(ms: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(ms)
    }

    fn window(id: u64, workspace: u64, title: &str) -> Window {
        let mut window = Window::new(WindowId::new(id), Some(WorkspaceId::new(workspace)));
        window.title = Some(title.to_string());
        window
    }

    fn focused(mut window: Window) -> Window {
        window.is_focused = true;
        window
    }

    fn engine() -> Engine<TitleRules, NoLookup> {
        Engine::new(TitleRules::default(), NoLookup, t0())
    }

    fn names(events: &[ActivityEvent]) -> Vec<Option<&str>> {
        events
            .iter()
            .filter(|e| matches!(e, ActivityEvent::NameChange { .. }))
            .map(ActivityEvent::name)
            .collect()
    }

    fn focus_events(events: &[ActivityEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, ActivityEvent::FocusChange { .. }))
            .count()
    }

    /// Answers lookups from a fixed table and records every pid asked for.
    #[derive(Default)]
    struct FakeProcesses {
        known: HashMap<u32, ProcessDetails>,
        asked: RefCell<Vec<u32>>,
    }

    impl ProcessLookup for FakeProcesses {
        fn lookup(&self, pid: u32) -> Option<ProcessDetails> {
            self.asked.borrow_mut().push(pid);
            self.known.get(&pid).cloned()
        }
    }

    #[test]
    fn test_snapshot_falls_back_to_sibling_in_workspace() {
        let mut engine = engine();
        let events = engine.apply(
            Event::WindowsSnapshot {
                windows: vec![
                    focused(window(1, 1, "Mozilla Firefox")),
                    window(2, 1, "main.rs - dwell - Code"),
                ],
            },
            at(1_000),
        );

        assert_eq!(names(&events), vec![Some("dwell")]);
        assert_eq!(focus_events(&events), 1);
        assert_eq!(engine.tracker().focused(), Some(WindowId::new(1)));
    }

    #[test]
    fn test_focused_match_beats_workspace_fallback() {
        let mut engine = engine();
        let events = engine.apply(
            Event::WindowsSnapshot {
                windows: vec![
                    window(1, 1, "a.rs - other - Code"),
                    focused(window(2, 1, "b.rs - mine - Code")),
                ],
            },
            at(0),
        );
        assert_eq!(names(&events), vec![Some("mine")]);
    }

    #[test]
    fn test_fallback_ignores_other_workspaces() {
        let mut engine = engine();
        let events = engine.apply(
            Event::WindowsSnapshot {
                windows: vec![
                    focused(window(1, 1, "Mozilla Firefox")),
                    window(2, 2, "main.rs - dwell - Code"),
                ],
            },
            at(0),
        );
        assert!(names(&events).is_empty(), "name stays None: {events:?}");
        assert_eq!(engine.tracker().name(), None);
    }

    #[test]
    fn test_resolving_twice_emits_once() {
        let mut engine = engine();
        let snapshot = Event::WindowsSnapshot {
            windows: vec![focused(window(1, 1, "x - proj - Code"))],
        };
        let first = engine.apply(snapshot.clone(), at(0));
        let second = engine.apply(snapshot, at(10));

        assert_eq!(names(&first), vec![Some("proj")]);
        assert!(second.is_empty(), "unexpected events: {second:?}");
    }

    #[test]
    fn test_focus_between_windows_with_same_label_keeps_name() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![
                    focused(window(1, 1, "a.rs - X - Code")),
                    window(2, 1, "b.rs - X - Code"),
                ],
            },
            at(0),
        );

        let events = engine.apply(
            Event::WindowFocusChanged {
                id: Some(WindowId::new(2)),
            },
            at(5_000),
        );

        assert_eq!(focus_events(&events), 1);
        assert!(names(&events).is_empty());
        assert_eq!(events[0].duration_ms(), 5_000);
        assert_eq!(events[0].name(), Some("X"));
    }

    #[test]
    fn test_focus_change_attaches_process_details() {
        let lookup = FakeProcesses {
            known: HashMap::from([(
                77,
                ProcessDetails {
                    exe_path: "/usr/bin/code".to_string(),
                    cmdline: vec!["code".to_string(), ".".to_string()],
                },
            )]),
            ..FakeProcesses::default()
        };
        let mut engine = Engine::new(TitleRules::default(), lookup, t0());

        let mut editor = window(1, 1, "a.rs - dwell - Code");
        editor.pid = Some(77);
        editor.app_id = Some("code".to_string());
        engine.apply(Event::WindowOpenedOrChanged { window: editor }, at(0));

        let events = engine.apply(
            Event::WindowFocusChanged {
                id: Some(WindowId::new(1)),
            },
            at(100),
        );
        let ActivityEvent::FocusChange {
            exe_path,
            cmdline,
            app_id,
            window_id,
            ..
        } = &events[0]
        else {
            panic!("expected focus change first: {events:?}");
        };
        assert_eq!(exe_path, "/usr/bin/code");
        assert_eq!(cmdline, &vec!["code".to_string(), ".".to_string()]);
        assert_eq!(app_id.as_deref(), Some("code"));
        assert_eq!(*window_id, Some(WindowId::new(1)));
    }

    #[test]
    fn test_failed_process_lookup_yields_empty_details() {
        let lookup = FakeProcesses::default();
        let mut engine = Engine::new(TitleRules::default(), lookup, t0());

        let mut term = window(5, 1, "foot");
        term.pid = Some(4242);
        engine.apply(Event::WindowOpenedOrChanged { window: term }, at(0));
        let events = engine.apply(
            Event::WindowFocusChanged {
                id: Some(WindowId::new(5)),
            },
            at(10),
        );

        assert!(matches!(
            &events[0],
            ActivityEvent::FocusChange { exe_path, cmdline, .. }
                if exe_path.is_empty() && cmdline.is_empty()
        ));
        assert_eq!(*engine.lookup.asked.borrow(), vec![4242]);
    }

    #[test]
    fn test_unchanged_focus_emits_nothing() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![focused(window(1, 1, "a - p - Code"))],
            },
            at(0),
        );
        let events = engine.apply(
            Event::WindowFocusChanged {
                id: Some(WindowId::new(1)),
            },
            at(50),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_focus_to_nothing_clears_name() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![focused(window(1, 1, "a - p - Code"))],
            },
            at(0),
        );
        let events = engine.apply(Event::WindowFocusChanged { id: None }, at(3_000));

        assert_eq!(focus_events(&events), 1);
        assert_eq!(names(&events), vec![None]);
        assert_eq!(events[1].duration_ms(), 3_000);
    }

    #[test]
    fn test_workspace_activation_uses_workspace_windows() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![
                    focused(window(1, 1, "a - first - Code")),
                    window(2, 2, "b - second - Code"),
                ],
            },
            at(0),
        );

        let events = engine.apply(
            Event::WorkspaceActivated {
                id: WorkspaceId::new(2),
                focused: true,
            },
            at(2_000),
        );
        assert_eq!(names(&events), vec![Some("second")]);
        assert_eq!(engine.focused_workspace(), Some(WorkspaceId::new(2)));
    }

    #[test]
    fn test_empty_workspace_activation_clears_name() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![focused(window(1, 1, "a - first - Code"))],
            },
            at(0),
        );
        let events = engine.apply(
            Event::WorkspaceActivated {
                id: WorkspaceId::new(9),
                focused: true,
            },
            at(10),
        );
        assert_eq!(names(&events), vec![None]);
    }

    #[test]
    fn test_title_change_renames_activity() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![focused(window(1, 1, "a - first - Code"))],
            },
            at(0),
        );
        let events = engine.apply(
            Event::WindowOpenedOrChanged {
                window: focused(window(1, 1, "a - renamed - Code")),
            },
            at(1_000),
        );
        assert_eq!(names(&events), vec![Some("renamed")]);
        assert_eq!(events[0].duration_ms(), 1_000);
    }

    #[test]
    fn test_closed_focused_window_then_snapshot_falls_through() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![
                    focused(window(1, 1, "a - gone - Code")),
                    window(2, 1, "Mozilla Firefox"),
                ],
            },
            at(0),
        );
        engine.apply(
            Event::WindowClosed {
                id: WindowId::new(1),
            },
            at(10),
        );
        assert!(engine.registry().lookup(WindowId::new(1)).is_none());

        // Snapshot without the closed window and with nothing focused.
        let events = engine.apply(
            Event::WindowsSnapshot {
                windows: vec![window(2, 1, "Mozilla Firefox")],
            },
            at(20),
        );
        assert_eq!(names(&events), vec![None]);
        assert_eq!(focus_events(&events), 0, "focused id is retained");
        assert_eq!(engine.tracker().focused(), Some(WindowId::new(1)));
    }

    #[test]
    fn test_snapshot_without_focus_reresolves_retained_window() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![focused(window(1, 1, "a - old - Code"))],
            },
            at(0),
        );
        let events = engine.apply(
            Event::WindowsSnapshot {
                windows: vec![window(1, 1, "a - new - Code")],
            },
            at(500),
        );
        assert_eq!(names(&events), vec![Some("new")]);
    }

    #[test]
    fn test_closing_unknown_window_is_harmless() {
        let mut engine = engine();
        let events = engine.apply(
            Event::WindowClosed {
                id: WindowId::new(404),
            },
            at(0),
        );
        assert!(events.is_empty());
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn test_idle_timeout_flushes_and_resume_resets() {
        let mut engine = engine();
        engine.apply(
            Event::WindowsSnapshot {
                windows: vec![focused(window(1, 1, "a - dwell - Code"))],
            },
            at(0),
        );

        let flushed = engine.apply(Event::IdleTimeout { timestamp: at(2_000) }, at(9_999));
        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0].name(), Some("dwell"));
        assert_eq!(flushed[0].duration_ms(), 2_000);

        let resumed = engine.apply(Event::IdleResume { timestamp: at(60_000) }, at(9_999));
        assert!(resumed.is_empty());

        let flushed = engine.apply(Event::IdleTimeout { timestamp: at(65_000) }, at(9_999));
        assert_eq!(flushed[0].duration_ms(), 5_000);
        assert_eq!(flushed[0].name(), Some("dwell"));
    }

    #[test]
    fn test_passthrough_events_change_nothing() {
        let mut engine = engine();
        let events = engine.apply(
            Event::Passthrough {
                tag: "KeyboardLayoutSwitched".to_string(),
            },
            at(0),
        );
        assert!(events.is_empty());
        assert!(engine.registry().is_empty());
    }
}
