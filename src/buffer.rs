//! Fixed-capacity, append-only byte sink.
//!
//! The PNG encoder writes every byte of the document into an [`OutputBuffer`] that is
//! allocated once up front. The buffer never grows: a write that does not fit fails with
//! [`Error::OutputOverflow`] and leaves the buffer untouched.

use crate::error::{Error, Result};

/// A bounded byte region with a write cursor.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl OutputBuffer {
    /// Allocates a zeroed buffer of exactly `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        OutputBuffer {
            data: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available before the hard end.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.len
    }

    /// Appends `bytes`, or fails without writing anything if they do not fit.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.reserve(bytes.len())?;
        self.data[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write(&[value])
    }

    /// Appends a big-endian `u32`, the byte order of every PNG integer field.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write(&value.to_be_bytes())
    }

    /// Overwrites four already-written bytes at `offset` with a big-endian `u32`.
    pub fn patch_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        let end = offset
            .checked_add(4)
            .filter(|&end| end <= self.len)
            .ok_or(Error::OutputOverflow {
                requested: 4,
                remaining: self.len.saturating_sub(offset),
            })?;
        self.data[offset..end].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    /// The unwritten tail of the buffer, for producers that write in place.
    ///
    /// Bytes placed here only become part of the output after [`advance`](Self::advance).
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.len..]
    }

    /// Commits `count` bytes previously written through [`spare_mut`](Self::spare_mut).
    pub fn advance(&mut self, count: usize) -> Result<()> {
        self.len = self.reserve(count)?;
        Ok(())
    }

    /// Everything written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Consumes the buffer, returning only the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        let mut bytes = self.data.into_vec();
        bytes.truncate(self.len);
        bytes
    }

    fn reserve(&self, count: usize) -> Result<usize> {
        if count > self.remaining() {
            return Err(Error::OutputOverflow {
                requested: count,
                remaining: self.remaining(),
            });
        }
        Ok(self.len + count)
    }
}
