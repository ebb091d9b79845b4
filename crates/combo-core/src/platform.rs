/// Host capabilities that change how the widget reacts to pointer input.
///
/// Injected at construction instead of sniffed from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// The pointer can hover without activating (mouse, trackpad).
    pub supports_hover: bool,
    /// The primary input is touch. Hover is a false signal and autoselect is
    /// disabled because the highlighted option would steal the tap.
    pub is_touch_primary: bool,
    /// The renderer can layer the hint input under the real one.
    pub supports_pointer_events: bool,
}

impl PlatformCapabilities {
    pub const DESKTOP: Self = Self {
        supports_hover: true,
        is_touch_primary: false,
        supports_pointer_events: true,
    };

    pub const TOUCH: Self = Self {
        supports_hover: false,
        is_touch_primary: true,
        supports_pointer_events: true,
    };

    /// Effective autoselect given what the caller asked for.
    pub fn autoselect_allowed(&self, requested: bool) -> bool {
        requested && !self.is_touch_primary
    }

    pub fn hover_enabled(&self) -> bool {
        self.supports_hover && !self.is_touch_primary
    }

    /// Touch-primary hosts keep the literal query and leave the menu open on blur.
    pub fn keeps_menu_on_blur(&self) -> bool {
        self.is_touch_primary
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::DESKTOP
    }
}
