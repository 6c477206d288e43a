//! Post-game retro menu: three items, keyboard navigation and a details pane.

use crate::audio::Cue;
use crate::constants::{MENU_EXIT_MS, MENU_SETTLE_MS};
use crate::overlay::{Presence, PresenceEvent};
use crate::timer::TimerSlot;

#[derive(Debug)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub details: &'static [&'static str],
}

pub static MENU_ITEMS: [MenuItem; 3] = [
    MenuItem {
        id: "about",
        label: "👤 ABOUT ME",
        title: "ABOUT ME",
        description: "Full-Stack Developer & Creative Technologist",
        details: &[
            "🎯 Passionate about creating immersive digital experiences",
            "💻 Specializing in interactive 3D on the web",
            "🎨 Combining technical skills with creative vision",
            "🚀 Always exploring new technologies and pushing boundaries",
            "🎮 Love for retro aesthetics and interactive design",
        ],
    },
    MenuItem {
        id: "projects",
        label: "🚀 PROJECTS",
        title: "MY PROJECTS",
        description: "Featured Work & Creations",
        details: &[
            "🌐 3D Portfolio Website - Interactive retro studio experience",
            "🎮 Retro Game Collection - Classic games with modern twist",
            "🎨 Creative Coding - Generative art and animations",
            "🔧 Open Source Tools - Developer utilities and libraries",
            "👨🏻‍💻 CRM",
        ],
    },
    MenuItem {
        id: "skills",
        label: "⚡ SKILLS",
        title: "TECHNICAL SKILLS",
        description: "Technologies & Expertise",
        details: &[
            "🔥 Frontend: WebGPU, WebAudio, TypeScript",
            "⚙️ Backend: APIs, Databases",
            "🎨 Design: 3D Modeling, Creative Coding",
            "🛠️ Tools: Git, Docker, CI/CD, Testing Frameworks",
            "🧠 Concepts: Game Development, Performance Optimization",
        ],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Select,
    Escape,
}

impl MenuKey {
    pub fn from_key(key: &str) -> Option<MenuKey> {
        match key {
            "ArrowUp" => Some(MenuKey::Up),
            "ArrowDown" => Some(MenuKey::Down),
            "Enter" | " " => Some(MenuKey::Select),
            "Escape" => Some(MenuKey::Escape),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuOutcome {
    pub cue: Option<Cue>,
    /// Visitor asked to leave the menu.
    pub close: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RetroMenu {
    selected: usize,
    details: bool,
    open: bool,
    presence: Presence,
    phase: TimerSlot,
}

impl RetroMenu {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> &'static MenuItem {
        &MENU_ITEMS[self.selected]
    }

    pub fn showing_details(&self) -> bool {
        self.details
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn open(&mut self, now_ms: f64) {
        if self.open {
            return;
        }
        self.open = true;
        self.selected = 0;
        self.details = false;
        self.presence = self.presence.next(PresenceEvent::Show);
        self.phase.schedule(now_ms, MENU_SETTLE_MS);
    }

    pub fn close(&mut self, now_ms: f64) {
        if !self.open {
            return;
        }
        self.open = false;
        self.details = false;
        self.presence = self.presence.next(PresenceEvent::Dismiss);
        self.phase.schedule(now_ms, MENU_EXIT_MS);
    }

    pub fn tick(&mut self, now_ms: f64) {
        if !self.phase.fire(now_ms) {
            return;
        }
        self.presence = match self.presence {
            Presence::Entering => self.presence.next(PresenceEvent::Settle),
            Presence::Exiting => self.presence.next(PresenceEvent::Finish),
            p => p,
        };
    }

    /// "Back to menu" button inside the details pane.
    pub fn back(&mut self) {
        self.details = false;
    }

    /// Pointer selection of an item: opens its details.
    pub fn choose(&mut self, index: usize) -> MenuOutcome {
        if !self.open || index >= MENU_ITEMS.len() {
            return MenuOutcome::default();
        }
        self.selected = index;
        self.details = true;
        MenuOutcome { cue: Some(Cue::MenuSelect), close: false }
    }

    pub fn key(&mut self, key: MenuKey) -> MenuOutcome {
        if !self.open {
            return MenuOutcome::default();
        }
        let n = MENU_ITEMS.len();
        match key {
            MenuKey::Up | MenuKey::Down if self.details => MenuOutcome::default(),
            MenuKey::Up => {
                self.selected = (self.selected + n - 1) % n;
                MenuOutcome { cue: Some(Cue::MenuMove), close: false }
            }
            MenuKey::Down => {
                self.selected = (self.selected + 1) % n;
                MenuOutcome { cue: Some(Cue::MenuMove), close: false }
            }
            MenuKey::Select => {
                self.details = !self.details;
                MenuOutcome { cue: Some(Cue::MenuSelect), close: false }
            }
            MenuKey::Escape if self.details => {
                self.details = false;
                MenuOutcome::default()
            }
            MenuKey::Escape => MenuOutcome { cue: None, close: true },
        }
    }
}
