//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the draft shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const DRAFT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const DRAFT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save & close shortcut display for form help text
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Save draft shortcut display
/// - macOS: "Cmd+D"
/// - Linux/Windows: "Ctrl+D"
#[cfg(target_os = "macos")]
pub const DRAFT_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const DRAFT_SHORTCUT: &str = "Ctrl+D";
