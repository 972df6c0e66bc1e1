//! Pointer output for X11-based systems.
//!
//! Movement warps the pointer on the root window; clicks are synthesized with
//! the XTEST extension. Every operation returns a recoverable error so the
//! frame loop can log and carry on.

use crate::{
    constants::LEFT_BUTTON,
    error::{AppError, Result},
    gesture::mapping::ScreenSize,
    utils::safe_cast::{f64_to_i16_clamp, f64_to_i32},
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{ConnectionExt as _, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::ConnectionExt as _,
    },
    rust_connection::RustConnection,
};

/// Destination for pointer moves and clicks
pub trait PointerSink {
    /// Move the pointer to an absolute screen position
    ///
    /// # Errors
    ///
    /// Returns an error if the target is rejected or the backend fails
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;

    /// Press and release the primary button at the current position
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails
    fn click(&mut self) -> Result<()>;

    /// Size of the screen the sink addresses
    fn screen_size(&self) -> ScreenSize;
}

/// Rejects targets that land in a screen corner, the conventional escape
/// hatch for runaway pointer automation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailSafe {
    screen: ScreenSize,
}

impl FailSafe {
    #[must_use]
    pub const fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }

    /// # Errors
    ///
    /// Returns `Error::FailSafe` if the target, truncated toward zero, is a
    /// corner pixel
    pub fn check(&self, x: f64, y: f64) -> Result<()> {
        let xi = f64_to_i32(x)?;
        let yi = f64_to_i32(y)?;
        let right = i32::try_from(self.screen.width).unwrap_or(i32::MAX) - 1;
        let bottom = i32::try_from(self.screen.height).unwrap_or(i32::MAX) - 1;
        let at_x_edge = xi <= 0 || xi >= right;
        let at_y_edge = yi <= 0 || yi >= bottom;
        if at_x_edge && at_y_edge {
            return Err(AppError::FailSafe(xi, yi));
        }
        Ok(())
    }
}

/// Cursor control implementation for X11
pub struct CursorController {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
    fail_safe: Option<FailSafe>,
}

impl CursorController {
    /// Connect to the default X11 display
    ///
    /// # Errors
    ///
    /// Returns an error if the display or the XTEST extension is unavailable
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::CursorControl("Failed to get screen".to_string()))?
            .clone();

        connection
            .xtest_get_version(2, 2)
            .map_err(|e| AppError::CursorControl(format!("Failed to query XTEST: {e}")))?
            .reply()
            .map_err(|e| AppError::CursorControl(format!("XTEST extension unavailable: {e}")))?;

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!("Connected to X11 display, screen: {}x{}", screen_width, screen_height);

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
            fail_safe: None,
        })
    }

    /// Reject corner targets instead of moving there
    #[must_use]
    pub fn with_fail_safe(mut self, enabled: bool) -> Self {
        let screen = self.screen_size();
        self.fail_safe = enabled.then_some(FailSafe::new(screen));
        self
    }

    /// Set cursor position (absolute), clamped to the screen
    ///
    /// # Errors
    ///
    /// Returns an error if the warp request cannot be sent
    pub fn set_position(&self, x: i16, y: i16) -> Result<()> {
        let max_x = i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
        let max_y = i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
        let x = x.clamp(0, max_x);
        let y = y.clamp(0, max_y);

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::CursorControl(format!("Failed to warp pointer: {e}")))?;

        self.flush()
    }

    fn fake_button(&self, event_type: u8) -> Result<()> {
        self.connection
            .xtest_fake_input(event_type, LEFT_BUTTON, x11rb::CURRENT_TIME, self.screen.root, 0, 0, 0)
            .map_err(|e| AppError::CursorControl(format!("Failed to send fake input: {e}")))?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.connection
            .flush()
            .map_err(|e| AppError::CursorControl(format!("Failed to flush connection: {e}")))?;
        Ok(())
    }
}

impl PointerSink for CursorController {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        if let Some(guard) = &self.fail_safe {
            guard.check(x, y)?;
        }
        let xi = f64_to_i16_clamp(x, 0, i16::MAX);
        let yi = f64_to_i16_clamp(y, 0, i16::MAX);
        self.set_position(xi, yi)
    }

    fn click(&mut self) -> Result<()> {
        debug!("Clicking primary button");
        self.fake_button(BUTTON_PRESS_EVENT)?;
        self.fake_button(BUTTON_RELEASE_EVENT)?;
        self.flush()
    }

    fn screen_size(&self) -> ScreenSize {
        ScreenSize::new(u32::from(self.screen_width), u32::from(self.screen_height))
    }
}

/// Sink that only logs, for running without pointer control
#[derive(Debug, Clone, Copy)]
pub struct NullSink {
    screen: ScreenSize,
}

impl NullSink {
    #[must_use]
    pub const fn new(screen: ScreenSize) -> Self {
        Self { screen }
    }
}

impl PointerSink for NullSink {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        debug!("Pointer move to ({:.1}, {:.1}) ignored", x, y);
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        debug!("Pointer click ignored");
        Ok(())
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }
}
