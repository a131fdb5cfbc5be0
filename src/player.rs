// SPDX-License-Identifier: MPL-2.0

//! The infinite playback loop.
//!
//! Single-threaded and fully synchronous: decode, scale, quantize, pixel
//! write, and swap happen sequentially, so the writable canvas has exactly
//! one writer and no locking is needed. The only intentional blocking point
//! is the vsync wait inside [`Matrix::swap`]; decode latency simply extends
//! the inter-frame gap. The fixed sleep after each presented frame does not
//! subtract time already spent decoding, matching the reference pacing.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use eyre::ensure;
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    display::{Canvas, Matrix},
    render,
};

/// Cyclic frame playback over a fixed catalog.
pub struct Player {
    catalog: Catalog,
    frame_interval: Duration,
}

impl Player {
    /// Build a player over `catalog`. An empty catalog is refused here so the
    /// loop is never entered without anything to show.
    pub fn new(catalog: Catalog, frame_interval: Duration) -> eyre::Result<Self> {
        ensure!(!catalog.is_empty(), "frame catalog is empty");
        Ok(Self {
            catalog,
            frame_interval,
        })
    }

    /// Run the playback loop until `shutdown` is raised.
    ///
    /// The frame index wraps modulo the catalog length, forever. A frame that
    /// fails to decode is logged and skipped without pacing delay; it will be
    /// attempted again on the next full cycle.
    pub fn run<M: Matrix>(&self, matrix: &mut M, shutdown: &AtomicBool) {
        let mut canvas = matrix.offscreen_canvas();
        let (width, height) = canvas.size();
        info!(
            frames = self.catalog.len(),
            width,
            height,
            interval_ms = self.frame_interval.as_millis() as u64,
            "starting playback"
        );

        let mut index = 0;
        while !shutdown.load(Ordering::Relaxed) {
            let asset = &self.catalog.assets()[index];
            index = (index + 1) % self.catalog.len();

            let grid = match render::render(asset, width, height) {
                Ok(grid) => grid,
                Err(err) => {
                    warn!(frame = %asset.path().display(), %err, "skipping frame");
                    continue;
                }
            };

            for (x, y, pixel) in grid.enumerate_pixels() {
                let image::Rgb([red, green, blue]) = *pixel;
                canvas.set_pixel(x, y, red, green, blue);
            }

            canvas = matrix.swap(canvas);
            thread::sleep(self.frame_interval);
        }

        debug!("shutdown requested, leaving playback loop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::{
        path::Path,
        sync::{Arc, atomic::AtomicBool},
    };

    /// In-memory stand-in for one of the two hardware pixel grids.
    #[derive(Clone)]
    struct MockCanvas {
        id: u8,
        width: u32,
        height: u32,
        pixels: Vec<[u8; 3]>,
    }

    impl MockCanvas {
        fn new(id: u8, width: u32, height: u32) -> Self {
            Self {
                id,
                width,
                height,
                pixels: vec![[0; 3]; (width * height) as usize],
            }
        }
    }

    impl Canvas for MockCanvas {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn set_pixel(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8) {
            assert!(x < self.width && y < self.height, "pixel out of bounds");
            self.pixels[(y * self.width + x) as usize] = [red, green, blue];
        }
    }

    /// Mock display that records each presented frame and raises the
    /// shutdown flag once a fixed number of swaps has happened.
    struct MockMatrix {
        width: u32,
        height: u32,
        visible: Option<MockCanvas>,
        presented: Vec<[u8; 3]>,
        swap_limit: usize,
        shutdown: Arc<AtomicBool>,
    }

    impl MockMatrix {
        fn new(width: u32, height: u32, swap_limit: usize, shutdown: Arc<AtomicBool>) -> Self {
            Self {
                width,
                height,
                visible: Some(MockCanvas::new(0, width, height)),
                presented: Vec::new(),
                swap_limit,
                shutdown,
            }
        }
    }

    impl Matrix for MockMatrix {
        type Canvas = MockCanvas;

        fn offscreen_canvas(&mut self) -> MockCanvas {
            MockCanvas::new(1, self.width, self.height)
        }

        fn swap(&mut self, canvas: MockCanvas) -> MockCanvas {
            let previously_visible = self.visible.take().expect("double buffer");
            // The writable canvas handed back must never be the grid that was
            // just made visible.
            assert_ne!(previously_visible.id, canvas.id, "buffer roles collided");

            self.presented.push(canvas.pixels[0]);
            self.visible = Some(canvas);

            if self.presented.len() >= self.swap_limit {
                self.shutdown.store(true, Ordering::Relaxed);
            }
            previously_visible
        }
    }

    fn write_frame(dir: &Path, name: &str, color: [u8; 3]) {
        RgbImage::from_pixel(4, 4, Rgb(color))
            .save(dir.join(name))
            .expect("save frame");
    }

    fn run_player(dir: &Path, swap_limit: usize) -> Vec<[u8; 3]> {
        let catalog = Catalog::scan(dir);
        let player = Player::new(catalog, Duration::ZERO).expect("non-empty catalog");
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut matrix = MockMatrix::new(4, 4, swap_limit, Arc::clone(&shutdown));
        player.run(&mut matrix, &shutdown);
        matrix.presented
    }

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    #[test]
    fn playback_cycles_through_catalog_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_frame(dir.path(), "0001.png", RED);
        write_frame(dir.path(), "0002.png", GREEN);
        write_frame(dir.path(), "0003.png", BLUE);

        // Seven swaps: two full cycles plus one frame into the third.
        let presented = run_player(dir.path(), 7);
        assert_eq!(presented, [RED, GREEN, BLUE, RED, GREEN, BLUE, RED]);
    }

    #[test]
    fn corrupt_frame_is_skipped_without_stopping_playback() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_frame(dir.path(), "0001.png", RED);
        std::fs::write(dir.path().join("0002.png"), b"garbage").expect("write file");
        write_frame(dir.path(), "0003.png", BLUE);

        // Two full passes over a 3-frame catalog present 2 frames each.
        let presented = run_player(dir.path(), 4);
        assert_eq!(presented, [RED, BLUE, RED, BLUE]);
    }

    #[test]
    fn single_frame_catalog_repeats_indefinitely() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_frame(dir.path(), "only.png", GREEN);

        let presented = run_player(dir.path(), 5);
        assert_eq!(presented, [GREEN; 5]);
    }

    #[test]
    fn empty_catalog_is_refused_before_looping() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = Catalog::scan(dir.path());
        assert!(Player::new(catalog, Duration::ZERO).is_err());
    }
}
