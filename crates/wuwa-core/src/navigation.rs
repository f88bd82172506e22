//! Sidebar navigation: screen selection and the hover-driven expand/collapse
//! state machine.
//!
//! The sidebar rests either collapsed (icons only) or expanded (icons and
//! labels). Entering or leaving it starts a transition from whatever values
//! are on screen at that instant; a new trigger replaces the running
//! transition outright, so at most one is ever in flight. Values are sampled
//! from absolute timestamps on every tick.

use wuwa_ui::animation::{Easing, Tween, easing};
use wuwa_ui::hover::HoverSensitive;
use wuwa_ui::layout::Rect;

use crate::i18n::Localizer;

// -- Screens and menu ---------------------------------------------------------

/// Content screens reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Home,
    Library,
    Store,
    Settings,
}

impl ScreenId {
    pub const ALL: [ScreenId; 4] = [Self::Home, Self::Library, Self::Store, Self::Settings];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Library => "library",
            Self::Store => "store",
            Self::Settings => "settings",
        }
    }

    /// Parse a screen name (`home`, `library`, ...). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub icon: &'static str,
    pub label_key: &'static str,
    pub screen: ScreenId,
}

/// Sidebar entries, top to bottom.
pub const MENU_ENTRIES: [MenuEntry; 4] = [
    MenuEntry {
        icon: "H",
        label_key: "menu.home",
        screen: ScreenId::Home,
    },
    MenuEntry {
        icon: "L",
        label_key: "menu.library",
        screen: ScreenId::Library,
    },
    MenuEntry {
        icon: "S",
        label_key: "menu.store",
        screen: ScreenId::Store,
    },
    MenuEntry {
        icon: "U",
        label_key: "menu.settings",
        screen: ScreenId::Settings,
    },
];

// -- Metrics and animated values ----------------------------------------------

/// Geometry and timing of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarMetrics {
    pub collapsed_width: f32,
    pub expanded_width: f32,
    /// Gap between the sidebar and the window edges.
    pub margin: f32,
    pub transition_ms: u32,
}

impl Default for SidebarMetrics {
    fn default() -> Self {
        Self {
            collapsed_width: 72.0,
            expanded_width: 220.0,
            margin: 16.0,
            transition_ms: 250,
        }
    }
}

impl SidebarMetrics {
    /// Width available to labels once fully expanded.
    pub fn label_reveal_width(&self) -> f32 {
        (self.expanded_width - self.collapsed_width).max(0.0)
    }

    /// Left padding of the content area, clear of the collapsed sidebar.
    pub fn content_padding_left(&self) -> f32 {
        self.margin + self.collapsed_width
    }
}

/// The three properties animated together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarValues {
    pub width: f32,
    pub label_reveal_width: f32,
    pub label_opacity: f32,
}

impl SidebarValues {
    pub fn collapsed(m: &SidebarMetrics) -> Self {
        Self {
            width: m.collapsed_width,
            label_reveal_width: 0.0,
            label_opacity: 0.0,
        }
    }

    pub fn expanded(m: &SidebarMetrics) -> Self {
        Self {
            width: m.expanded_width,
            label_reveal_width: m.label_reveal_width(),
            label_opacity: 1.0,
        }
    }
}

/// One in-flight expand or collapse.
#[derive(Debug, Clone, Copy)]
pub struct SidebarTransition {
    pub from: SidebarValues,
    pub to: SidebarValues,
    /// True when heading for the expanded rest state.
    pub expanding: bool,
    width: Tween,
    label_reveal_width: Tween,
    label_opacity: Tween,
}

impl SidebarTransition {
    fn new(
        from: SidebarValues,
        to: SidebarValues,
        expanding: bool,
        started_ms: u64,
        duration_ms: u32,
        easing: Easing,
    ) -> Self {
        let tween = |a, b| Tween::new(a, b, started_ms, duration_ms, easing);
        Self {
            from,
            to,
            expanding,
            width: tween(from.width, to.width),
            label_reveal_width: tween(from.label_reveal_width, to.label_reveal_width),
            label_opacity: tween(from.label_opacity, to.label_opacity),
        }
    }

    pub fn started_ms(&self) -> u64 {
        self.width.started_ms
    }

    /// Milliseconds elapsed at `now_ms`, capped at the duration.
    pub fn elapsed_ms(&self, now_ms: u64) -> u32 {
        self.width.elapsed_ms(now_ms)
    }

    pub fn values_at(&self, now_ms: u64) -> SidebarValues {
        SidebarValues {
            width: self.width.value_at(now_ms),
            label_reveal_width: self.label_reveal_width.value_at(now_ms),
            label_opacity: self.label_opacity.value_at(now_ms),
        }
    }

    pub fn is_finished_at(&self, now_ms: u64) -> bool {
        self.width.is_finished_at(now_ms)
    }
}

/// Where the sidebar is in its expand/collapse cycle.
#[derive(Debug, Clone, Copy)]
pub enum SidebarPhase {
    Collapsed,
    Expanded,
    Transitioning(SidebarTransition),
}

impl SidebarPhase {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning(_))
    }
}

/// Read-only snapshot handed to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    pub active_screen: ScreenId,
    pub hovered: bool,
    pub width: f32,
    pub label_reveal_width: f32,
    pub label_opacity: f32,
    pub animating: bool,
}

/// Render data for one sidebar entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarItem {
    pub icon: &'static str,
    pub screen: ScreenId,
    /// Translated label; empty while the pointer is outside the sidebar.
    pub label: String,
    pub label_width: f32,
    pub label_opacity: f32,
    pub highlighted: bool,
}

// -- Controller ---------------------------------------------------------------

/// Vertical layout of menu entries inside the sidebar.
const ITEM_TOP_PADDING: f32 = 16.0;
const ITEM_HEIGHT: f32 = 48.0;
const ITEM_SPACING: f32 = 8.0;

/// Owns the active screen and the sidebar animation.
#[derive(Debug)]
pub struct NavigationController {
    metrics: SidebarMetrics,
    easing: Easing,
    active_screen: ScreenId,
    hovered: bool,
    phase: SidebarPhase,
    values: SidebarValues,
}

impl NavigationController {
    pub fn new(metrics: SidebarMetrics) -> Self {
        Self {
            metrics,
            easing: easing::ease_out_quad,
            active_screen: ScreenId::Home,
            hovered: false,
            phase: SidebarPhase::Collapsed,
            values: SidebarValues::collapsed(&metrics),
        }
    }

    pub fn metrics(&self) -> &SidebarMetrics {
        &self.metrics
    }

    pub fn active_screen(&self) -> ScreenId {
        self.active_screen
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn phase(&self) -> &SidebarPhase {
        &self.phase
    }

    /// Values as of the last trigger or tick.
    pub fn values(&self) -> SidebarValues {
        self.values
    }

    pub fn is_animating(&self) -> bool {
        self.phase.is_transitioning()
    }

    /// Switch screens. Instantaneous; returns whether anything changed.
    pub fn select_screen(&mut self, screen: ScreenId) -> bool {
        if self.active_screen == screen {
            return false;
        }
        log::debug!("Screen {} -> {screen}", self.active_screen);
        self.active_screen = screen;
        true
    }

    /// Pointer entered the sidebar. Returns false when already hovered.
    pub fn pointer_enter(&mut self, now_ms: u64) -> bool {
        if self.hovered {
            return false;
        }
        self.hovered = true;
        self.start_transition(true, now_ms);
        true
    }

    /// Pointer left the sidebar. Returns false when not hovered.
    pub fn pointer_leave(&mut self, now_ms: u64) -> bool {
        if !self.hovered {
            return false;
        }
        self.hovered = false;
        self.start_transition(false, now_ms);
        true
    }

    fn sample(&self, now_ms: u64) -> SidebarValues {
        match &self.phase {
            SidebarPhase::Transitioning(t) => t.values_at(now_ms),
            _ => self.values,
        }
    }

    fn start_transition(&mut self, expanding: bool, now_ms: u64) {
        // Freeze whatever is on screen right now; the old transition is dropped.
        let from = self.sample(now_ms);
        let to = if expanding {
            SidebarValues::expanded(&self.metrics)
        } else {
            SidebarValues::collapsed(&self.metrics)
        };
        self.values = from;
        let transition = SidebarTransition::new(
            from,
            to,
            expanding,
            now_ms,
            self.metrics.transition_ms,
            self.easing,
        );
        log::debug!(
            "Sidebar {} from width {:.1}",
            if expanding { "expanding" } else { "collapsing" },
            from.width
        );
        self.phase = SidebarPhase::Transitioning(transition);
        self.settle_if_finished(now_ms);
    }

    fn settle_if_finished(&mut self, now_ms: u64) {
        if let SidebarPhase::Transitioning(t) = self.phase {
            if t.is_finished_at(now_ms) {
                self.values = t.to;
                self.phase = if t.expanding {
                    SidebarPhase::Expanded
                } else {
                    SidebarPhase::Collapsed
                };
            }
        }
    }

    /// Advance the animation to `now_ms`. Returns whether values changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let SidebarPhase::Transitioning(t) = self.phase else {
            return false;
        };
        let before = self.values;
        self.values = t.values_at(now_ms);
        self.settle_if_finished(now_ms);
        self.values != before
    }

    /// Current sidebar rectangle inside a window `window_height` tall.
    pub fn bounds(&self, window_height: f32) -> Rect {
        let m = &self.metrics;
        Rect::new(
            m.margin,
            m.margin,
            self.values.width,
            (window_height - 2.0 * m.margin).max(0.0),
        )
    }

    /// Bounds of the `index`-th menu entry.
    pub fn item_bounds(&self, index: usize, window_height: f32) -> Rect {
        let sidebar = self.bounds(window_height);
        let y = sidebar.y + ITEM_TOP_PADDING + index as f32 * (ITEM_HEIGHT + ITEM_SPACING);
        Rect::new(sidebar.x, y, sidebar.w, ITEM_HEIGHT)
    }

    /// Screen of the menu entry under `(x, y)`, if any.
    pub fn entry_at(&self, x: f32, y: f32, window_height: f32) -> Option<ScreenId> {
        if !self.bounds(window_height).contains(x, y) {
            return None;
        }
        MENU_ENTRIES
            .iter()
            .enumerate()
            .find(|(i, _)| self.item_bounds(*i, window_height).contains(x, y))
            .map(|(_, entry)| entry.screen)
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            active_screen: self.active_screen,
            hovered: self.hovered,
            width: self.values.width,
            label_reveal_width: self.values.label_reveal_width,
            label_opacity: self.values.label_opacity,
            animating: self.is_animating(),
        }
    }

    /// Per-entry render data. Labels are blank unless hovered; opacity still
    /// governs the fade while they are shown.
    pub fn sidebar_items(&self, localizer: &Localizer) -> Vec<SidebarItem> {
        MENU_ENTRIES
            .iter()
            .map(|entry| SidebarItem {
                icon: entry.icon,
                screen: entry.screen,
                label: if self.hovered {
                    localizer.translate(entry.label_key, &[])
                } else {
                    String::new()
                },
                label_width: self.values.label_reveal_width,
                label_opacity: self.values.label_opacity,
                highlighted: entry.screen == self.active_screen,
            })
            .collect()
    }
}

impl HoverSensitive for NavigationController {
    fn on_enter(&mut self, now_ms: u64) {
        self.pointer_enter(now_ms);
    }

    fn on_leave(&mut self, now_ms: u64) {
        self.pointer_leave(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wuwa_ui::hover::{HoverChange, HoverTracker};

    fn nav() -> NavigationController {
        NavigationController::new(SidebarMetrics::default())
    }

    #[test]
    fn starts_collapsed_on_home() {
        let n = nav();
        assert_eq!(n.active_screen(), ScreenId::Home);
        assert!(!n.is_hovered());
        assert!(matches!(n.phase(), SidebarPhase::Collapsed));
        assert_eq!(n.values().width, 72.0);
        assert_eq!(n.values().label_opacity, 0.0);
    }

    #[test]
    fn enter_expands_over_duration() {
        let mut n = nav();
        assert!(n.pointer_enter(1_000));
        assert!(n.is_animating());
        n.tick(1_125);
        let mid = n.values().width;
        assert!(mid > 72.0 && mid < 220.0);
        n.tick(1_250);
        assert!(matches!(n.phase(), SidebarPhase::Expanded));
        assert_eq!(
            n.values(),
            SidebarValues {
                width: 220.0,
                label_reveal_width: 148.0,
                label_opacity: 1.0
            }
        );
        assert!(!n.tick(1_300));
    }

    #[test]
    fn ease_out_midpoint() {
        let mut n = nav();
        n.pointer_enter(0);
        n.tick(125);
        // ease_out_quad(0.5) = 0.75 -> 72 + 148 * 0.75
        assert!((n.values().width - 183.0).abs() < 0.01);
    }

    #[test]
    fn repeated_enter_is_ignored() {
        let mut n = nav();
        assert!(n.pointer_enter(0));
        n.tick(100);
        let started = match n.phase() {
            SidebarPhase::Transitioning(t) => t.started_ms(),
            _ => panic!("not transitioning"),
        };
        assert!(!n.pointer_enter(100));
        match n.phase() {
            SidebarPhase::Transitioning(t) => assert_eq!(t.started_ms(), started),
            _ => panic!("not transitioning"),
        }
    }

    #[test]
    fn leave_mid_expand_reverses_from_current_value() {
        let mut n = nav();
        n.pointer_enter(0);
        n.tick(125);
        let frozen = n.values();
        assert!(n.pointer_leave(125));
        match n.phase() {
            SidebarPhase::Transitioning(t) => {
                assert_eq!(t.from, frozen);
                assert!(!t.expanding);
                assert_eq!(t.to, SidebarValues::collapsed(n.metrics()));
            },
            _ => panic!("not transitioning"),
        }
        // No jump at the reversal point.
        assert_eq!(n.values(), frozen);
    }

    #[test]
    fn leave_without_tick_freezes_sampled_value() {
        let mut n = nav();
        n.pointer_enter(0);
        // Timer never fired; the reversal still starts from the value at 200.
        n.pointer_leave(200);
        let from = match n.phase() {
            SidebarPhase::Transitioning(t) => t.from.width,
            _ => panic!("not transitioning"),
        };
        assert!(from > 200.0 && from < 220.0);
    }

    #[test]
    fn collapse_settles() {
        let mut n = nav();
        n.pointer_enter(0);
        n.tick(300);
        n.pointer_leave(400);
        match n.phase() {
            SidebarPhase::Transitioning(t) => assert_eq!(t.elapsed_ms(450), 50),
            _ => panic!("not transitioning"),
        }
        n.tick(650);
        assert!(matches!(n.phase(), SidebarPhase::Collapsed));
        assert_eq!(n.values(), SidebarValues::collapsed(n.metrics()));
    }

    #[test]
    fn zero_duration_snaps() {
        let mut n = NavigationController::new(SidebarMetrics {
            transition_ms: 0,
            ..SidebarMetrics::default()
        });
        n.pointer_enter(5);
        assert!(matches!(n.phase(), SidebarPhase::Expanded));
        assert_eq!(n.values().width, 220.0);
    }

    #[test]
    fn select_screen_is_instant_and_idempotent() {
        let mut n = nav();
        assert!(n.select_screen(ScreenId::Settings));
        assert_eq!(n.active_screen(), ScreenId::Settings);
        assert!(!n.select_screen(ScreenId::Settings));
        assert!(!n.is_animating());
    }

    #[test]
    fn screen_names_parse() {
        assert_eq!(ScreenId::from_name("Library"), Some(ScreenId::Library));
        assert_eq!(ScreenId::from_name(" store "), Some(ScreenId::Store));
        assert_eq!(ScreenId::from_name("news"), None);
        assert_eq!(ScreenId::Settings.to_string(), "settings");
    }

    #[test]
    fn menu_entries_in_order() {
        let screens: Vec<_> = MENU_ENTRIES.iter().map(|e| e.screen).collect();
        assert_eq!(screens, ScreenId::ALL.to_vec());
        assert_eq!(MENU_ENTRIES[3].icon, "U");
        assert_eq!(MENU_ENTRIES[1].label_key, "menu.library");
    }

    #[test]
    fn metrics_derivations() {
        let m = SidebarMetrics::default();
        assert_eq!(m.label_reveal_width(), 148.0);
        assert_eq!(m.content_padding_left(), 88.0);
        let inverted = SidebarMetrics {
            expanded_width: 50.0,
            ..m
        };
        assert_eq!(inverted.label_reveal_width(), 0.0);
    }

    #[test]
    fn bounds_follow_width() {
        let mut n = nav();
        assert_eq!(n.bounds(600.0), Rect::new(16.0, 16.0, 72.0, 568.0));
        n.pointer_enter(0);
        n.tick(250);
        assert_eq!(n.bounds(600.0).w, 220.0);
    }

    #[test]
    fn clicks_hit_menu_rows() {
        let n = nav();
        // Rows start at 16 + 16 and are 48 tall with 8 between them.
        assert_eq!(n.entry_at(40.0, 40.0, 600.0), Some(ScreenId::Home));
        assert_eq!(n.entry_at(40.0, 90.0, 600.0), Some(ScreenId::Library));
        assert_eq!(n.entry_at(40.0, 84.0, 600.0), None);
        assert_eq!(n.entry_at(40.0, 210.0, 600.0), Some(ScreenId::Settings));
        assert_eq!(n.entry_at(40.0, 300.0, 600.0), None);
        assert_eq!(n.entry_at(100.0, 40.0, 600.0), None);
    }

    #[test]
    fn hover_tracker_drives_controller() {
        let mut n = nav();
        let mut tracker = HoverTracker::new();
        let b = n.bounds(600.0);
        assert_eq!(tracker.update(30.0, 100.0, b, 0, &mut n), HoverChange::Entered);
        assert!(n.is_hovered());
        n.tick(250);
        // Now wide; x = 150 is still inside.
        let b = n.bounds(600.0);
        assert_eq!(tracker.update(150.0, 100.0, b, 260, &mut n), HoverChange::Unchanged);
        assert_eq!(tracker.update(400.0, 100.0, b, 270, &mut n), HoverChange::Left);
        assert!(!n.is_hovered());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Step {
            Enter,
            Leave,
            Tick,
        }

        fn arb_steps() -> impl Strategy<Value = Vec<(Step, u64)>> {
            proptest::collection::vec(
                (
                    prop_oneof![Just(Step::Enter), Just(Step::Leave), Just(Step::Tick)],
                    0u64..400,
                ),
                1..40,
            )
        }

        proptest! {
            #[test]
            fn width_stays_within_rest_widths(steps in arb_steps()) {
                let mut n = nav();
                let m = *n.metrics();
                let mut now = 0u64;
                for (step, gap) in steps {
                    now += gap;
                    match step {
                        Step::Enter => { n.pointer_enter(now); },
                        Step::Leave => { n.pointer_leave(now); },
                        Step::Tick => { n.tick(now); },
                    }
                    let v = n.values();
                    prop_assert!(v.width >= m.collapsed_width && v.width <= m.expanded_width);
                    prop_assert!(v.label_opacity >= 0.0 && v.label_opacity <= 1.0);
                    prop_assert!(
                        v.label_reveal_width >= 0.0
                            && v.label_reveal_width <= m.label_reveal_width()
                    );
                    // Rest phases always sit exactly on their targets.
                    match n.phase() {
                        SidebarPhase::Collapsed => prop_assert_eq!(v, SidebarValues::collapsed(&m)),
                        SidebarPhase::Expanded => prop_assert_eq!(v, SidebarValues::expanded(&m)),
                        SidebarPhase::Transitioning(t) => {
                            prop_assert_eq!(t.expanding, n.is_hovered())
                        },
                    }
                }
            }

            #[test]
            fn enter_then_immediate_leave_has_one_transition(
                delay in 0u64..300,
                elapsed in 0u64..600,
            ) {
                let mut n = nav();
                n.pointer_enter(0);
                n.pointer_leave(delay);
                prop_assert!(
                    matches!(n.phase(), SidebarPhase::Transitioning(t) if !t.expanding)
                );
                n.tick(delay + elapsed);
                let w = n.values().width;
                prop_assert!((72.0..=220.0).contains(&w));
            }
        }
    }
}
