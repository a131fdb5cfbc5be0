// SPDX-License-Identifier: MPL-2.0

//! The narrow contract with the LED panel driver.
//!
//! The panel is double buffered: at any instant exactly one canvas is visible
//! (owned by the hardware) and one is writable (owned by the playback driver).
//! Ownership is a baton pass expressed through move semantics. [`Matrix::swap`]
//! blocks until the panel's vsync boundary and then atomically exchanges the
//! two roles, which is the single synchronization point between software
//! pacing and hardware refresh and what prevents a scanout of a half-written
//! grid.
//!
//! The real backend lives in the `hardware` submodule behind the cargo
//! feature of the same name;
//! everything else in the crate only sees these traits, so tests substitute a
//! mock.

#[cfg(feature = "hardware")]
pub mod hardware;

/// A writable pixel grid handed out by a [`Matrix`].
pub trait Canvas {
    /// Pixel dimensions of the grid.
    fn size(&self) -> (u32, u32);

    /// Set one pixel. Coordinates must be within [`Canvas::size`]; anything
    /// else is a programming error in the caller.
    fn set_pixel(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8);
}

/// A double-buffered display device.
///
/// One physical display exists per process, but the driver takes the matrix
/// by reference so a mock can stand in for it under test.
pub trait Matrix {
    type Canvas: Canvas;

    /// Hand out the initial writable canvas.
    fn offscreen_canvas(&mut self) -> Self::Canvas;

    /// Present `canvas` at the next vsync and return the new writable canvas.
    ///
    /// Blocks until the vsync boundary. The returned canvas is never the one
    /// passed in; there is no third buffer.
    fn swap(&mut self, canvas: Self::Canvas) -> Self::Canvas;
}
