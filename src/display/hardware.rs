// SPDX-License-Identifier: MPL-2.0

//! `rpi-led-matrix` backend for real panel hardware.

use eyre::{WrapErr, eyre};
use matrix_frames_config::PanelConfig;
use rpi_led_matrix::{LedCanvas, LedColor, LedMatrix, LedMatrixOptions, LedRuntimeOptions};
use tracing::info;

use super::{Canvas, Matrix};

/// The physical panel chain, driven over GPIO.
pub struct HardwareMatrix {
    matrix: LedMatrix,
}

impl HardwareMatrix {
    /// Initialize the panel driver. Fails if the hardware is missing or the
    /// process lacks the privileges to claim the GPIO pins.
    pub fn open(config: &PanelConfig) -> eyre::Result<Self> {
        let mut options = LedMatrixOptions::new();
        options.set_rows(config.rows);
        options.set_cols(config.cols);
        options.set_chain_length(config.chain_length);
        options.set_parallel(config.parallel);
        options.set_hardware_mapping(&config.hardware_mapping);
        options
            .set_brightness(config.brightness)
            .map_err(|err| eyre!("invalid brightness {}: {err}", config.brightness))?;

        let mut runtime = LedRuntimeOptions::new();
        runtime.set_drop_privileges(config.drop_privileges);

        let matrix = LedMatrix::new(Some(options), Some(runtime))
            .map_err(|err| eyre!(err))
            .wrap_err("could not initialize the LED matrix")?;

        let (width, height) = config.display_size();
        info!(width, height, mapping = %config.hardware_mapping, "LED matrix initialized");

        Ok(Self { matrix })
    }
}

impl Matrix for HardwareMatrix {
    type Canvas = LedCanvas;

    fn offscreen_canvas(&mut self) -> LedCanvas {
        self.matrix.offscreen_canvas()
    }

    fn swap(&mut self, canvas: LedCanvas) -> LedCanvas {
        self.matrix.swap(canvas)
    }
}

impl Canvas for LedCanvas {
    fn size(&self) -> (u32, u32) {
        let (width, height) = self.canvas_size();
        (width as u32, height as u32)
    }

    fn set_pixel(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8) {
        self.set(x as i32, y as i32, &LedColor { red, green, blue });
    }
}
