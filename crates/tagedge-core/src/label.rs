//! Label image — a W×H array of component ids
//!
//! Value `0` is reserved for background/unassigned; positive values are
//! component labels assigned by the CCL stage.

use crate::error::Result;
use crate::image::{MAX_DIMENSION, MIN_DIMENSION};

/// A dense W×H grid of 32-bit component labels.
#[derive(Debug, Clone)]
pub struct LabelImage {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl LabelImage {
    /// Allocate a label image with every pixel initialized to `0`
    /// (background).
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&width)
            || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&height)
        {
            return Err(crate::error::Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0u32; width as usize * height as usize],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let width = self.width as usize;
        let start = y as usize * width;
        &mut self.data[start..start + width]
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.row(y)[x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, label: u32) {
        self.row_mut(y)[x as usize] = label;
    }

    /// Reset every pixel to `0` so the buffer can be reused for the next
    /// frame without reallocating.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0);
    }

    /// Raw pixel buffer, row-major, pitch equal to width.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }
}
