//! Host-neutral input event types.

/// Key representation handed over by the host.
///
/// Hosts map their native key codes to these values before forwarding them to
/// [`InputState`](super::InputState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key (abandons the shape being drawn)
    Escape,
    /// Return/Enter key (finishes a multi-click shape)
    Return,
    /// Delete key (removes the topmost shape)
    Delete,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    Left,
    /// Right mouse button (finish a multi-click shape, cancel a drag)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}
