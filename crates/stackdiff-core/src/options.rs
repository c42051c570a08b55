/// ANSI color applied to a rendered line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Removal lines.
    Red,
    /// Addition lines.
    Green,
    /// Unchanged lines.
    White,
}

impl Color {
    pub(crate) fn code(self) -> &'static str {
        match self {
            Self::Red => "\u{1b}[31m",
            Self::Green => "\u{1b}[32m",
            Self::White => "\u{1b}[37m",
        }
    }
}

/// Configuration toggles for diff rendering.
///
/// ```
/// # use stackdiff_core::RenderOptions;
/// let options = RenderOptions::new().with_color(true).with_unchanged(true);
/// assert!(options.show_color());
/// assert!(options.show_unchanged());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    show_color: bool,
    show_unchanged: bool,
    color_override: Option<Color>,
    icon_override: Option<char>,
}

impl RenderOptions {
    /// Constructs a configuration with default settings: no ANSI color,
    /// unchanged subtrees pruned, no presentation overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI color output.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.show_color = enabled;
        self
    }

    /// Retains unchanged subtrees in the output instead of pruning them.
    #[must_use]
    pub fn with_unchanged(mut self, enabled: bool) -> Self {
        self.show_unchanged = enabled;
        self
    }

    /// Forces a uniform color regardless of per-node action.
    ///
    /// Used when the caller has already classified the whole resource, for
    /// example an import rendered entirely in one color.
    #[must_use]
    pub fn with_color_override(mut self, color: Color) -> Self {
        self.color_override = Some(color);
        self
    }

    /// Forces a uniform line icon regardless of per-node action.
    #[must_use]
    pub fn with_icon_override(mut self, icon: char) -> Self {
        self.icon_override = Some(icon);
        self
    }

    /// Indicates whether color output is enabled.
    #[must_use]
    pub fn show_color(&self) -> bool {
        self.show_color
    }

    /// Indicates whether unchanged subtrees are retained in the output.
    #[must_use]
    pub fn show_unchanged(&self) -> bool {
        self.show_unchanged
    }

    /// Returns the forced color, if any.
    #[must_use]
    pub fn color_override(&self) -> Option<Color> {
        self.color_override
    }

    /// Returns the forced icon, if any.
    #[must_use]
    pub fn icon_override(&self) -> Option<char> {
        self.icon_override
    }
}
