//! Shared crate-wide constants.

use std::time::Duration;

/// z values at or below this are reserved for shell chrome (taskbar, start
/// menu, overlays); the stacking allocator starts above it.
pub const SHELL_RESERVED_LAYER: u32 = 1000;

/// How long a window stays in `Opening` before settling to `Active`. Gives
/// the decorator one frame band to draw the entry state.
pub const OPEN_ANIMATION: Duration = Duration::from_millis(150);

/// Delay between entering `Closing` and removing the record, so the exit
/// state is visible for at least one frame.
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(300);

/// Debounce for the notes editor autosave: a save fires this long after the
/// most recent edit.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// How long a notification toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Default size for newly spawned windows, in cells.
pub const DEFAULT_WINDOW_WIDTH: u16 = 44;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 16;

/// Minimum number of visible cells a window must keep within the managed
/// area so the user can still grab its chrome.
pub const MIN_VISIBLE_MARGIN: u16 = 4;
