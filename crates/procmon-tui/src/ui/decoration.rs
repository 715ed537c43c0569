//! Type tag decoration.
//!
//! Maps a record's type tag to a badge. Known hooked functions are grouped
//! by subsystem family and share the info treatment; `spawn` gets the dark
//! emphasis badge; anything else is shown as raw text.

use std::collections::HashMap;
use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Subsystem family of a known type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Message box dialogs.
    Dialog,
    /// Process and thread creation.
    Process,
    /// File I/O.
    File,
    /// Heap management.
    Heap,
    /// Registry access.
    Registry,
    /// Socket operations.
    Socket,
    /// Raw memory operations.
    Memory,
}

/// Visual treatment of a type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    /// Dark emphasis badge.
    Emphasis,
    /// Info badge for a tag of a known family.
    Known(Family),
    /// Unknown tag, rendered verbatim.
    Raw,
}

/// Tag emitted when the monitor starts a process.
pub const SPAWN_TAG: &str = "spawn";

const FAMILIES: &[(Family, &[&str])] = &[
    (Family::Dialog, &["MessageBox", "MessageBoxA", "MessageBoxW"]),
    (
        Family::Process,
        &[
            "CreateProcess",
            "CreateProcessA",
            "CreateProcessW",
            "CreateThread",
            "CreateRemoteThread",
        ],
    ),
    (
        Family::File,
        &["CreateFile", "CreateFileA", "CreateFileW", "WriteFile", "ReadFile"],
    ),
    (Family::Heap, &["HeapCreate", "HeapDestroy", "HeapFree"]),
    (
        Family::Registry,
        &[
            "RegCreateKeyEx",
            "RegCreateKeyExA",
            "RegCreateKeyExW",
            "RegSetValueEx",
            "RegSetValueExA",
            "RegSetValueExW",
            "RegDeleteValue",
            "RegDeleteValueA",
            "RegDeleteValueW",
            "RegCloseKey",
            "RegOpenKeyEx",
        ],
    ),
    (Family::Socket, &["socket", "bind", "send", "connect", "recv"]),
    (Family::Memory, &["memcpy"]),
];

static TREATMENTS: LazyLock<HashMap<&'static str, Treatment>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    let _ = table.insert(SPAWN_TAG, Treatment::Emphasis);
    for &(family, tags) in FAMILIES {
        for &tag in tags {
            let _ = table.insert(tag, Treatment::Known(family));
        }
    }
    table
});

/// A resolved type tag: the label to show and how to show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration<'a> {
    /// Text of the badge, always the tag itself.
    pub label: &'a str,
    /// Visual treatment.
    pub treatment: Treatment,
}

/// Resolves a type tag. Total: unknown tags resolve to [`Treatment::Raw`].
#[must_use]
pub fn resolve(tag: &str) -> Decoration<'_> {
    Decoration {
        label: tag,
        treatment: TREATMENTS.get(tag).copied().unwrap_or(Treatment::Raw),
    }
}

impl<'a> Decoration<'a> {
    /// Badge style for this treatment.
    #[must_use]
    pub fn style(&self) -> Style {
        match self.treatment {
            Treatment::Emphasis => Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
            Treatment::Known(_) => Style::default().fg(Color::Black).bg(Color::Cyan),
            Treatment::Raw => Style::default(),
        }
    }

    /// Renders the decoration as a span. Badges are padded by one cell on
    /// each side; raw tags are not.
    #[must_use]
    pub fn span(&self) -> Span<'a> {
        match self.treatment {
            Treatment::Raw => Span::raw(self.label),
            _ => Span::styled(format!(" {} ", self.label), self.style()),
        }
    }
}
