//! Text rendering of presentation snapshots.

use wuwa_core::Presentation;
use wuwa_core::ShellObserver;
use wuwa_core::navigation::NavigationState;

/// One line describing the sidebar.
fn sidebar_line(nav: &NavigationState) -> String {
    let phase = match (nav.hovered, nav.animating) {
        (true, true) => "expanding",
        (true, false) => "expanded",
        (false, true) => "collapsing",
        (false, false) => "collapsed",
    };
    format!(
        "sidebar: {phase} (width {:.0}, labels {:.0}px @ {:.2})",
        nav.width, nav.label_reveal_width, nav.label_opacity
    )
}

fn menu_line(p: &Presentation) -> String {
    let items: Vec<String> = p
        .sidebar_items
        .iter()
        .map(|item| {
            let marker = if item.highlighted { "*" } else { " " };
            if item.label.is_empty() {
                format!("{marker}[{}]", item.icon)
            } else {
                format!("{marker}[{}] {}", item.icon, item.label)
            }
        })
        .collect();
    format!("menu: {}", items.join("  "))
}

fn background_line(p: &Presentation) -> String {
    match &p.background {
        Some(path) => format!("background: {}", path.display()),
        None => "background: solid fill".to_string(),
    }
}

fn play_line(p: &Presentation) -> String {
    let state = if p.can_play { "enabled" } else { "disabled" };
    format!("{}: {state}", p.label("button.play"))
}

/// Full description of the shell.
pub fn describe_state(p: &Presentation) -> Vec<String> {
    vec![
        format!("== {} ==", p.title),
        format!(
            "screen: {} | language: {} ({})",
            p.navigation.active_screen, p.language_display, p.language
        ),
        format!("languages: {}", p.language_options.join(", ")),
        p.status_text.clone(),
        play_line(p),
        background_line(p),
        sidebar_line(&p.navigation),
        menu_line(p),
    ]
}

/// Lines for what changed between two snapshots.
///
/// Mid-animation frames are skipped; the sidebar is reported when the hover
/// state flips and when a transition settles.
pub fn describe_changes(prev: Option<&Presentation>, next: &Presentation) -> Vec<String> {
    let Some(prev) = prev else {
        return describe_state(next);
    };
    let mut lines = Vec::new();
    if prev.language != next.language {
        lines.push(format!(
            "language: {} ({})",
            next.language_display, next.language
        ));
    }
    if prev.status_text != next.status_text {
        lines.push(next.status_text.clone());
    }
    if prev.can_play != next.can_play || prev.language != next.language {
        lines.push(play_line(next));
    }
    if prev.background != next.background {
        lines.push(background_line(next));
    }
    let (a, b) = (&prev.navigation, &next.navigation);
    if a.active_screen != b.active_screen {
        lines.push(format!("screen: {}", b.active_screen));
    }
    let settled = a.animating && !b.animating;
    if a.hovered != b.hovered || settled {
        lines.push(sidebar_line(b));
    }
    if a.hovered != b.hovered
        || a.active_screen != b.active_screen
        || prev.language != next.language
    {
        lines.push(menu_line(next));
    }
    lines
}

/// Prints what changed on every published snapshot.
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    last: Option<Presentation>,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShellObserver for ConsoleObserver {
    fn on_presentation(&mut self, presentation: &Presentation) {
        for line in describe_changes(self.last.as_ref(), presentation) {
            println!("{line}");
        }
        self.last = Some(presentation.clone());
    }
}
