// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A bounded byte ring mirroring raw PTY output, used to scan for
//! approval prompts (§4.4.1) without retaining the session's full output.

use std::collections::VecDeque;

const CAPACITY: usize = 2 * 1024;

pub struct PtyRing {
    bytes: VecDeque<u8>,
}

impl Default for PtyRing {
    fn default() -> Self {
        Self::new()
    }
}

impl PtyRing {
    pub fn new() -> Self {
        Self { bytes: VecDeque::with_capacity(CAPACITY) }
    }

    /// Append `chunk`, dropping the oldest bytes past the 2 KB cap.
    pub fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend(chunk.iter().copied());
        while self.bytes.len() > CAPACITY {
            self.bytes.pop_front();
        }
    }

    /// A lossy UTF-8 snapshot of the current ring contents.
    pub fn as_text(&self) -> String {
        let contiguous: Vec<u8> = self.bytes.iter().copied().collect();
        String::from_utf8_lossy(&contiguous).into_owned()
    }
}

#[cfg(test)]
#[path = "ring_tests.rs"]
mod tests;
