// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `PtySession`: the POSIX-backed [`Pty`] used by the interactive CLI
//! adapter (spec §4.4). Spawning, the output reader, the writer, and the
//! exit watcher each run on their own task so the session is never blocked
//! on a stalled read.

use std::collections::HashMap;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use portable_pty::{native_pty_system, ChildKiller, CommandBuilder, MasterPty, PtySize};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::PtyError;

/// Platform-abstract handle to a spawned pty-attached process.
#[async_trait::async_trait]
pub trait Pty: Send + Sync {
    /// Queue bytes to be written to the pty's stdin.
    fn write(&self, bytes: &[u8]) -> Result<(), PtyError>;

    /// Resize the pty's terminal dimensions.
    fn resize(&self, rows: u16, cols: u16) -> Result<(), PtyError>;

    /// Terminate the child process (SIGHUP via the pty on POSIX).
    fn kill(&self) -> Result<(), PtyError>;

    /// Subscribe to raw output bytes. Subscribers only see bytes written
    /// after the subscription; callers that need the full history should
    /// subscribe before the first byte could plausibly arrive.
    fn subscribe_output(&self) -> broadcast::Receiver<Vec<u8>>;

    /// True once the child process has exited.
    fn has_exited(&self) -> bool;

    /// Wait for the child to exit and return its exit code.
    async fn wait(&self) -> i32;
}

pub struct PtySession {
    writer_tx: mpsc::Sender<Vec<u8>>,
    output_tx: broadcast::Sender<Vec<u8>>,
    master: Arc<StdMutex<Box<dyn MasterPty + Send>>>,
    killer: StdMutex<Box<dyn ChildKiller + Send + Sync>>,
    exited: Arc<AtomicBool>,
    exit_rx: tokio::sync::Mutex<Option<oneshot::Receiver<i32>>>,
    exit_code: Arc<StdMutex<Option<i32>>>,
}

impl PtySession {
    /// Spawn `command` (with `args`) attached to a new pty of `rows`x`cols`,
    /// in `cwd`, with `env` merged over the current process environment.
    pub fn spawn(
        command: &str,
        args: &[String],
        cwd: &Path,
        env: &HashMap<String, String>,
        rows: u16,
        cols: u16,
    ) -> Result<Self, PtyError> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize { rows, cols, pixel_width: 0, pixel_height: 0 })
            .map_err(|e| PtyError::Open(e.to_string()))?;

        let mut builder = CommandBuilder::new(command);
        builder.args(args);
        builder.cwd(cwd);
        for (key, value) in env {
            builder.env(key, value);
        }

        let mut child = pair.slave.spawn_command(builder).map_err(|e| PtyError::Spawn {
            command: command.to_string(),
            source: std::io::Error::new(ErrorKind::Other, e.to_string()),
        })?;
        let killer = child.clone_killer();
        drop(pair.slave);

        let (writer_tx, mut writer_rx) = mpsc::channel::<Vec<u8>>(128);
        let (output_tx, _) = broadcast::channel::<Vec<u8>>(256);

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| PtyError::Open(e.to_string()))?;
        let output_tx_reader = output_tx.clone();
        tokio::task::spawn_blocking(move || {
            let mut buf = [0u8; 8192];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        let _ = output_tx_reader.send(buf[..n].to_vec());
                    }
                    Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
        });

        let writer = pair.master.take_writer().map_err(|e| PtyError::Open(e.to_string()))?;
        let writer = Arc::new(StdMutex::new(writer));
        tokio::spawn(async move {
            while let Some(bytes) = writer_rx.recv().await {
                let writer = writer.clone();
                let _ = tokio::task::spawn_blocking(move || {
                    if let Ok(mut guard) = writer.lock() {
                        let _ = guard.write_all(&bytes);
                        let _ = guard.flush();
                    }
                })
                .await;
            }
        });

        let (exit_tx, exit_rx) = oneshot::channel::<i32>();
        let exited = Arc::new(AtomicBool::new(false));
        let exited_waiter = exited.clone();
        let exit_code = Arc::new(StdMutex::new(None));
        let exit_code_waiter = exit_code.clone();
        tokio::task::spawn_blocking(move || {
            let code = match child.wait() {
                Ok(status) => status.exit_code() as i32,
                Err(_) => -1,
            };
            *exit_code_waiter.lock().unwrap_or_else(|e| e.into_inner()) = Some(code);
            exited_waiter.store(true, Ordering::SeqCst);
            let _ = exit_tx.send(code);
        });

        Ok(Self {
            writer_tx,
            output_tx,
            master: Arc::new(StdMutex::new(pair.master)),
            killer: StdMutex::new(killer),
            exited,
            exit_rx: tokio::sync::Mutex::new(Some(exit_rx)),
            exit_code,
        })
    }
}

#[async_trait::async_trait]
impl Pty for PtySession {
    fn write(&self, bytes: &[u8]) -> Result<(), PtyError> {
        if self.has_exited() {
            return Err(PtyError::AlreadyExited);
        }
        self.writer_tx
            .try_send(bytes.to_vec())
            .map_err(|e| PtyError::Write(e.to_string()))
    }

    fn resize(&self, rows: u16, cols: u16) -> Result<(), PtyError> {
        let master = self.master.lock().unwrap_or_else(|e| e.into_inner());
        master
            .resize(PtySize { rows, cols, pixel_width: 0, pixel_height: 0 })
            .map_err(|e| PtyError::Resize(e.to_string()))
    }

    fn kill(&self) -> Result<(), PtyError> {
        let mut killer = self.killer.lock().unwrap_or_else(|e| e.into_inner());
        killer.kill().map_err(|e| PtyError::Write(e.to_string()))
    }

    fn subscribe_output(&self) -> broadcast::Receiver<Vec<u8>> {
        self.output_tx.subscribe()
    }

    fn has_exited(&self) -> bool {
        self.exited.load(Ordering::SeqCst)
    }

    async fn wait(&self) -> i32 {
        if let Some(code) = *self.exit_code.lock().unwrap_or_else(|e| e.into_inner()) {
            return code;
        }
        let rx = self.exit_rx.lock().await.take();
        match rx {
            Some(rx) => rx.await.unwrap_or(-1),
            None => self.exit_code.lock().unwrap_or_else(|e| e.into_inner()).unwrap_or(-1),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
