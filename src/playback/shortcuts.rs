/// Transport actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    PlayPause,
    Next,
    Previous,
    VolumeUp,
    VolumeDown,
    ToggleMute,
}

/// Map a `KeyboardEvent.key` value to an action.
///
/// Returns `None` while focus is in an editable element so typing in the
/// search box never drives the player.
pub fn shortcut_action(key: &str, editable_target: bool) -> Option<ShortcutAction> {
    if editable_target {
        return None;
    }

    match key {
        " " | "Spacebar" | "MediaPlayPause" => Some(ShortcutAction::PlayPause),
        "ArrowRight" | "MediaTrackNext" => Some(ShortcutAction::Next),
        "ArrowLeft" | "MediaTrackPrevious" => Some(ShortcutAction::Previous),
        "ArrowUp" => Some(ShortcutAction::VolumeUp),
        "ArrowDown" => Some(ShortcutAction::VolumeDown),
        "m" | "M" => Some(ShortcutAction::ToggleMute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(shortcut_action(" ", false), Some(ShortcutAction::PlayPause));
        assert_eq!(shortcut_action("ArrowRight", false), Some(ShortcutAction::Next));
        assert_eq!(shortcut_action("ArrowLeft", false), Some(ShortcutAction::Previous));
        assert_eq!(shortcut_action("ArrowUp", false), Some(ShortcutAction::VolumeUp));
        assert_eq!(shortcut_action("ArrowDown", false), Some(ShortcutAction::VolumeDown));
        assert_eq!(shortcut_action("M", false), Some(ShortcutAction::ToggleMute));
        assert_eq!(shortcut_action("k", false), None);
    }

    #[test]
    fn editable_targets_swallow_shortcuts() {
        assert_eq!(shortcut_action(" ", true), None);
        assert_eq!(shortcut_action("m", true), None);
    }
}
