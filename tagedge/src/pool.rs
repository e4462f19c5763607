//! A bounded pool of pre-zeroed label images.
//!
//! A caller running many pipelines at once (e.g. one per camera) wants
//! label-image allocation off the hot path entirely, not just amortized
//! the way a single [`crate::Pipeline`] amortizes it for itself. This pool
//! pre-allocates a fixed number of buffers and recycles them: a single
//! background worker dequeues buffers callers are done with, zeroes them,
//! and re-enqueues them onto a bounded channel that doubles as the pool's
//! counting semaphore — [`LabelPool::acquire`] blocks rather than ever
//! allocating past the configured size.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tagedge_core::{LabelImage, Result};

/// A label image checked out of a [`LabelPool`]. Sends itself back to the
/// pool's dirty queue for re-cleaning when dropped.
pub struct PooledLabelImage {
    image: Option<LabelImage>,
    dirty_tx: Sender<LabelImage>,
}

impl std::ops::Deref for PooledLabelImage {
    type Target = LabelImage;

    fn deref(&self) -> &LabelImage {
        self.image.as_ref().expect("image taken only by drop")
    }
}

impl std::ops::DerefMut for PooledLabelImage {
    fn deref_mut(&mut self) -> &mut LabelImage {
        self.image.as_mut().expect("image taken only by drop")
    }
}

impl Drop for PooledLabelImage {
    fn drop(&mut self) {
        if let Some(image) = self.image.take() {
            // A send failure means the pool (and its worker) is already
            // gone; the buffer is simply dropped instead of recycled.
            let _ = self.dirty_tx.send(image);
        }
    }
}

/// A fixed-size pool of `width x height` label images, cleaned by one
/// background worker thread.
///
/// Dropping a `LabelPool` does not wait for the worker to exit: a
/// [`PooledLabelImage`] checked out earlier can legitimately outlive the
/// pool it came from, and that handle's own clone of the dirty-side
/// sender would keep the worker's `recv` loop alive past this point, so
/// joining it here could block forever. The worker simply runs until
/// every clone of the dirty sender — this pool's and every outstanding
/// handle's — is gone.
pub struct LabelPool {
    clean_rx: Receiver<LabelImage>,
    dirty_tx: Sender<LabelImage>,
}

impl LabelPool {
    /// Spawn the pool's worker and pre-allocate `size` buffers, all
    /// immediately available through [`acquire`](Self::acquire).
    pub fn new(width: u32, height: u32, size: usize) -> Result<Self> {
        let (clean_tx, clean_rx) = mpsc::sync_channel::<LabelImage>(size.max(1));
        let (dirty_tx, dirty_rx) = mpsc::channel::<LabelImage>();

        for _ in 0..size {
            let image = LabelImage::new(width, height)?;
            clean_tx
                .send(image)
                .expect("clean channel is sized for every pre-allocated buffer");
        }

        // Detached; see the "dropping a LabelPool" note above.
        let worker_clean_tx = clean_tx.clone();
        thread::spawn(move || {
            while let Ok(mut image) = dirty_rx.recv() {
                image.clear();
                if worker_clean_tx.send(image).is_err() {
                    break;
                }
            }
        });

        Ok(Self { clean_rx, dirty_tx })
    }

    /// Check out a clean buffer, blocking until one is available. The
    /// handle returns itself to the pool for re-cleaning when dropped.
    pub fn acquire(&self) -> PooledLabelImage {
        let image = self
            .clean_rx
            .recv()
            .expect("pool worker thread outlives every outstanding PooledLabelImage");
        PooledLabelImage {
            image: Some(image),
            dirty_tx: self.dirty_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_hands_out_a_zeroed_buffer_of_the_right_size() {
        let pool = LabelPool::new(4, 4, 2).unwrap();
        let image = pool.acquire();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 4);
        assert!(image.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn a_returned_buffer_is_reused_and_cleared() {
        let pool = LabelPool::new(4, 4, 1);
        let pool = pool.unwrap();
        {
            let mut image = pool.acquire();
            image.set(0, 0, 7);
        }
        // Re-cleaning happens on the background worker; give it a moment.
        std::thread::sleep(std::time::Duration::from_millis(50));
        let image = pool.acquire();
        assert!(image.as_slice().iter().all(|&v| v == 0));
    }
}
