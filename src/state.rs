#[derive(Debug, Clone)]
pub struct ShellState {
    user_name: String,
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
    help_visible: bool,
    log_visible: bool,
    quit_confirm_visible: bool,
}

impl ShellState {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            mouse_capture_enabled: true,
            mouse_capture_dirty: false,
            help_visible: false,
            log_visible: false,
            quit_confirm_visible: false,
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
    }

    /// Hand the pending capture change to the terminal layer exactly once.
    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn toggle_log(&mut self) {
        self.log_visible = !self.log_visible;
    }

    pub fn quit_confirm_visible(&self) -> bool {
        self.quit_confirm_visible
    }

    pub fn set_quit_confirm(&mut self, visible: bool) {
        self.quit_confirm_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_capture_change_is_consumed_once() {
        let mut s = ShellState::new("test");
        assert!(s.mouse_capture_enabled());
        s.set_mouse_capture_enabled(true);
        assert!(s.take_mouse_capture_change().is_none());
        s.set_mouse_capture_enabled(false);
        assert_eq!(s.take_mouse_capture_change(), Some(false));
        assert!(s.take_mouse_capture_change().is_none());
    }

    #[test]
    fn overlay_toggles_are_independent() {
        let mut s = ShellState::new("test");
        s.toggle_help();
        s.toggle_log();
        assert!(s.help_visible());
        assert!(s.log_visible());
        s.toggle_help();
        assert!(!s.help_visible());
        assert!(s.log_visible());
    }
}
