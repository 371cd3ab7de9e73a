//! Reusable token buffers.
//!
//! Parsing many files allocates one token vector per file. A [`TokenPool`]
//! hands out cleared vectors and takes them back when the [`PooledTokens`]
//! guard is dropped, on every exit path.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use crate::token::Token;

/// A pool of token buffers, shareable across threads.
#[derive(Debug)]
pub struct TokenPool {
    /// Buffers waiting to be reused.
    buffers: Mutex<Vec<Vec<Token>>>,
    /// Upper bound on retained buffers.
    max_retained: usize,
}

impl Default for TokenPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenPool {
    /// Default number of buffers kept for reuse.
    pub const DEFAULT_MAX_RETAINED: usize = 16;

    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_retained(Self::DEFAULT_MAX_RETAINED)
    }

    /// Creates an empty pool that keeps at most `max_retained` idle buffers.
    #[must_use]
    pub fn with_max_retained(max_retained: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::new()),
            max_retained,
        }
    }

    /// Takes a cleared buffer from the pool, allocating one if none is idle.
    pub fn acquire(&self) -> PooledTokens<'_> {
        let buffer = self.lock().pop().unwrap_or_default();
        log::trace!("token buffer acquired (capacity {})", buffer.capacity());
        PooledTokens { pool: self, buffer }
    }

    /// Number of idle buffers.
    #[must_use]
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, mut buffer: Vec<Token>) {
        buffer.clear();
        let mut buffers = self.lock();
        if buffers.len() < self.max_retained {
            log::trace!("token buffer released (capacity {})", buffer.capacity());
            buffers.push(buffer);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<Token>>> {
        self.buffers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A buffer borrowed from a [`TokenPool`]; returned to it on drop.
#[derive(Debug)]
pub struct PooledTokens<'p> {
    pool: &'p TokenPool,
    buffer: Vec<Token>,
}

impl Deref for PooledTokens<'_> {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PooledTokens<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl Drop for PooledTokens<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buffer));
    }
}
