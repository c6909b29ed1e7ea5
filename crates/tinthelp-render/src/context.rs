//! Invocation-scoped rendering state.
//!
//! The only mutable state of the renderer is whether color is enabled. It
//! lives in a [`RenderContext`] owned by one invocation rather than in a
//! process-wide cell, so simultaneous invocations cannot see each other's
//! setting.
//!
//! [`RenderContext::apply_color`] sets the flag and returns a
//! [`ColorScope`]. When color ends up disabled, dropping the scope resets
//! the flag to unset, on every exit path including unwinding.
//!
//! ```rust
//! use tinthelp_render::context::RenderContext;
//!
//! let mut ctx = RenderContext::new();
//! {
//!     let scope = ctx.apply_color(false);
//!     assert_eq!(scope.color(), Some(false));
//! }
//! assert_eq!(ctx.color(), None);
//! ```

use std::ops::{Deref, DerefMut};

use crate::theme::HelpTheme;

/// Rendering state carried through one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// `None` until a color decision has been applied.
    color: Option<bool>,
}

impl RenderContext {
    /// Creates a context with no color decision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the applied color decision, if any.
    pub fn color(&self) -> Option<bool> {
        self.color
    }

    /// Returns true if styled output should be produced.
    ///
    /// Without an applied decision this falls back to terminal detection.
    pub fn colors_enabled(&self) -> bool {
        self.color.unwrap_or_else(console::colors_enabled)
    }

    /// Returns the theme matching the color decision: `theme` when colors
    /// are enabled, the no-color theme otherwise.
    pub fn theme<'a>(&self, theme: &'a HelpTheme) -> &'a HelpTheme {
        if self.colors_enabled() {
            theme
        } else {
            HelpTheme::no_color()
        }
    }

    /// Records a color decision for the rest of the invocation.
    ///
    /// The returned scope derefs to this context. If `enabled` is false, the
    /// flag is reset when the scope is dropped.
    pub fn apply_color(&mut self, enabled: bool) -> ColorScope<'_> {
        self.color = Some(enabled);
        tracing::debug!(enabled, "color decision applied");
        ColorScope {
            ctx: self,
            reset_on_drop: !enabled,
        }
    }
}

/// Guard returned by [`RenderContext::apply_color`].
#[derive(Debug)]
pub struct ColorScope<'a> {
    ctx: &'a mut RenderContext,
    reset_on_drop: bool,
}

impl Deref for ColorScope<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ColorScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ColorScope<'_> {
    fn drop(&mut self) {
        if self.reset_on_drop {
            self.ctx.color = None;
            tracing::trace!("color flag reset");
        }
    }
}
