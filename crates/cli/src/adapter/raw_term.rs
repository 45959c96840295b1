// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Puts the controlling terminal into raw mode for the lifetime of an
//! interactive session, so keystrokes reach the PTY byte-for-byte instead
//! of being line-buffered and echoed by our own terminal.

use std::io;
use std::os::fd::AsFd;

use nix::sys::termios::{self, SetArg, Termios};

pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        let stdin = io::stdin();
        let fd = stdin.as_fd();
        let original = termios::tcgetattr(fd).map_err(|_| io::Error::other("tcgetattr failed"))?;
        let mut raw = original.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(fd, SetArg::TCSANOW, &raw).map_err(|_| io::Error::other("tcsetattr failed"))?;
        Ok(Self { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let stdin = io::stdin();
        let _ = termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &self.original);
    }
}
