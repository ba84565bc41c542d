//! Scanline scheduling across worker threads.
//!
//! Every worker runs the same loop: claim the next free row under a lock,
//! release the lock, render the row, repeat. Rows are written to their own
//! slot, so assembly order never depends on which worker finished first.

use crate::renderer::render_pixel;
use crate::{color_to_bytes, Camera, Hittable, RenderConfig, RenderError, RenderResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Per-render ownership table: which worker claimed each row.
#[derive(Debug)]
struct ScanlineTable {
    /// `None` until a worker claims the row
    owners: Vec<Option<usize>>,
    remaining: usize,
    /// Rows between progress lines at `info`
    progress_step: usize,
}

impl ScanlineTable {
    fn new(height: u32) -> Self {
        Self {
            owners: vec![None; height as usize],
            remaining: height as usize,
            progress_step: (height as usize / 10).max(1),
        }
    }

    /// Every claim reports progress; about one in ten rows does so at `info`.
    fn progress_level(&self) -> log::Level {
        if self.remaining % self.progress_step == 0 || self.remaining == 1 {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }

    /// Claim the first unclaimed row for `worker`.
    fn claim(&mut self, worker: usize) -> Option<u32> {
        let row = self.owners.iter().position(Option::is_none)?;
        self.owners[row] = Some(worker);

        log::log!(self.progress_level(), "Scanlines remaining: {}", self.remaining);
        self.remaining -= 1;

        Some(row as u32)
    }
}

/// RNG for one row. Seeded renders derive it from the seed and row index
/// alone, so output does not depend on which worker claims the row.
fn row_rng(seed: Option<u64>, row: u32) -> StdRng {
    match seed {
        Some(seed) => {
            StdRng::seed_from_u64(seed ^ (u64::from(row) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        }
        None => StdRng::from_entropy(),
    }
}

/// Render one full row to quantized pixels.
fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    row: u32,
) -> Vec<[u8; 3]> {
    let mut rng = row_rng(config.seed, row);

    (0..camera.image_width())
        .map(|x| color_to_bytes(render_pixel(camera, world, x, row, config, &mut rng)))
        .collect()
}

/// Claim and render rows until none are left.
fn worker_loop(
    worker: usize,
    table: &Mutex<ScanlineTable>,
    rows: &[OnceLock<Vec<[u8; 3]>>],
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) {
    loop {
        // Lock is held only for the claim itself
        let claimed = table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .claim(worker);

        let Some(row) = claimed else {
            break;
        };

        log::debug!("Worker {} rendering scanline {}", worker, row);
        let pixels = render_row(camera, world, config, row);

        if rows[row as usize].set(pixels).is_err() {
            log::error!("Scanline {} was rendered twice", row);
        }
    }
}

/// Render every scanline of `camera`'s image on a pool of worker threads.
///
/// Returns the rows top to bottom, each holding `image_width` quantized pixels.
pub fn render_scanlines(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<Vec<Vec<[u8; 3]>>> {
    let height = camera.image_height();

    // 0 lets rayon pick one thread per hardware thread
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .thread_name(|i| format!("lumen-worker-{i}"))
        .build()?;
    let workers = pool.current_num_threads();
    log::debug!("Rendering {} scanlines on {} workers", height, workers);

    let table = Mutex::new(ScanlineTable::new(height));
    let rows: Vec<OnceLock<Vec<[u8; 3]>>> = (0..height).map(|_| OnceLock::new()).collect();

    pool.scope(|scope| {
        for worker in 0..workers {
            let (table, rows) = (&table, rows.as_slice());
            scope.spawn(move |_| worker_loop(worker, table, rows, camera, world, config));
        }
    });

    rows.into_iter()
        .enumerate()
        .map(|(row, cell)| {
            cell.into_inner()
                .ok_or(RenderError::MissingScanline(row as u32))
        })
        .collect()
}
