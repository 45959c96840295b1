// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal HTTP/1.1 client for the control server (spec §4.6), spoken
//! over a Unix domain socket by default and over loopback TCP when
//! `TOUCHGRASS_TCP_PORT` is set. Neither transport is something `reqwest`
//! covers cleanly (no native Unix-socket support), and pulling in a
//! connector crate we can't build against isn't worth the risk, so the
//! request/response framing is hand-rolled the same way the control
//! server's own test harness hand-rolls its requests.

use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, UnixStream};
use tokio::time::timeout;

use touchgrass_wire::{
    ApprovalNeededEvent, AssistantEvent, BackgroundJobEvent, BindChatRequest, ChannelSummary,
    ExitRequest, GenerateCodeRequest, GenerateCodeResponse, HealthResponse, InputResponse,
    OkResponse, QuestionEvent, RegisterRequest, RegisterResponse, SendInputRequest,
    StatusResponse, SubscribedGroupsResponse, ThinkingEvent, ToolCallEvent, ToolResultEvent,
    TypingEvent, AUTH_HEADER,
};

use crate::client_error::ClientError;

/// Where and how to reach the daemon's control server.
#[derive(Debug, Clone)]
pub struct DaemonClient {
    sock_path: PathBuf,
    tcp_port: Option<u16>,
    auth_token: String,
    timeout: Duration,
}

#[derive(Debug)]
enum Conn {
    Unix(UnixStream),
    Tcp(TcpStream),
}

impl AsyncRead for Conn {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            Conn::Unix(s) => std::pin::Pin::new(s).poll_read(cx, buf),
            Conn::Tcp(s) => std::pin::Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for Conn {
    fn poll_write(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<std::io::Result<usize>> {
        match self.get_mut() {
            Conn::Unix(s) => std::pin::Pin::new(s).poll_write(cx, buf),
            Conn::Tcp(s) => std::pin::Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            Conn::Unix(s) => std::pin::Pin::new(s).poll_flush(cx),
            Conn::Tcp(s) => std::pin::Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            Conn::Unix(s) => std::pin::Pin::new(s).poll_shutdown(cx),
            Conn::Tcp(s) => std::pin::Pin::new(s).poll_shutdown(cx),
        }
    }
}

impl DaemonClient {
    pub fn new(sock_path: PathBuf, tcp_port: Option<u16>, auth_token: String) -> Self {
        Self { sock_path, tcp_port, auth_token, timeout: Duration::from_secs(5) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn connect(&self) -> Result<Conn, ClientError> {
        if let Some(port) = self.tcp_port {
            let stream = TcpStream::connect(("127.0.0.1", port)).await.map_err(ClientError::Connect)?;
            return Ok(Conn::Tcp(stream));
        }
        let stream = UnixStream::connect(&self.sock_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound || e.kind() == std::io::ErrorKind::ConnectionRefused {
                ClientError::DaemonNotRunning
            } else {
                ClientError::Connect(e)
            }
        })?;
        Ok(Conn::Unix(stream))
    }

    async fn raw(&self, method: &str, path: &str, body: Option<Vec<u8>>) -> Result<(u16, Vec<u8>), ClientError> {
        let fut = self.raw_inner(method, path, body);
        timeout(self.timeout, fut).await.map_err(|_| ClientError::Timeout)?
    }

    async fn raw_inner(&self, method: &str, path: &str, body: Option<Vec<u8>>) -> Result<(u16, Vec<u8>), ClientError> {
        let mut conn = self.connect().await?;
        let body = body.unwrap_or_default();

        let mut request = format!(
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\n{AUTH_HEADER}: {token}\r\nConnection: close\r\n",
            token = self.auth_token,
        );
        if !body.is_empty() {
            request.push_str("Content-Type: application/json\r\n");
            request.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        request.push_str("\r\n");

        conn.write_all(request.as_bytes()).await.map_err(ClientError::Connect)?;
        if !body.is_empty() {
            conn.write_all(&body).await.map_err(ClientError::Connect)?;
        }
        conn.flush().await.map_err(ClientError::Connect)?;

        let mut raw = Vec::new();
        conn.read_to_end(&mut raw).await.map_err(ClientError::Connect)?;

        let header_end = find_header_end(&raw).ok_or(ClientError::UnexpectedStatus(0))?;
        let head = std::str::from_utf8(&raw[..header_end]).map_err(|_| ClientError::UnexpectedStatus(0))?;
        let mut lines = head.split("\r\n");
        let status_line = lines.next().ok_or(ClientError::UnexpectedStatus(0))?;
        let status: u16 = status_line
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .ok_or(ClientError::UnexpectedStatus(0))?;

        let body_start = header_end + 4;
        let payload = raw.get(body_start..).unwrap_or(&[]).to_vec();
        Ok((status, payload))
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let (status, body) = self.raw("GET", path, None).await?;
        decode(status, &body)
    }

    async fn post<T: Serialize, R: DeserializeOwned>(&self, path: &str, req: &T) -> Result<R, ClientError> {
        let body = serde_json::to_vec(req).map_err(ClientError::Decode)?;
        let (status, resp) = self.raw("POST", path, Some(body)).await?;
        decode(status, &resp)
    }

    async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let (status, resp) = self.raw("POST", path, None).await?;
        decode(status, &resp)
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/health").await
    }

    pub async fn status(&self) -> Result<StatusResponse, ClientError> {
        self.get("/status").await
    }

    pub async fn shutdown(&self) -> Result<OkResponse, ClientError> {
        self.post_empty("/shutdown").await
    }

    pub async fn generate_code(&self, channel: &str) -> Result<GenerateCodeResponse, ClientError> {
        self.post("/generate-code", &GenerateCodeRequest { channel: channel.to_string() }).await
    }

    pub async fn channels(&self) -> Result<Vec<ChannelSummary>, ClientError> {
        self.get("/channels").await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        self.post("/remote/register", req).await
    }

    pub async fn bind_chat(&self, req: &BindChatRequest) -> Result<OkResponse, ClientError> {
        self.post("/remote/bind-chat", req).await
    }

    pub async fn get_input(&self, id: &str) -> Result<InputResponse, ClientError> {
        self.get(&format!("/remote/{id}/input")).await
    }

    pub async fn send_input(&self, id: &str, text: &str) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/send-input"), &SendInputRequest { text: text.to_string() }).await
    }

    pub async fn exit_session(&self, id: &str, exit_code: i32) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/exit"), &ExitRequest { exit_code }).await
    }

    pub async fn subscribed_groups(&self, id: &str) -> Result<SubscribedGroupsResponse, ClientError> {
        self.get(&format!("/remote/{id}/subscribed-groups")).await
    }

    pub async fn tool_call(&self, id: &str, event: &ToolCallEvent) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/tool-call"), event).await
    }

    pub async fn tool_result(&self, id: &str, event: &ToolResultEvent) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/tool-result"), event).await
    }

    pub async fn approval_needed(&self, id: &str, event: &ApprovalNeededEvent) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/approval-needed"), event).await
    }

    pub async fn question(&self, id: &str, event: &QuestionEvent) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/question"), event).await
    }

    pub async fn thinking(&self, id: &str, event: &ThinkingEvent) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/thinking"), event).await
    }

    pub async fn assistant(&self, id: &str, event: &AssistantEvent) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/assistant"), event).await
    }

    pub async fn typing(&self, id: &str, on: bool) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/typing"), &TypingEvent { on }).await
    }

    pub async fn background_job(&self, id: &str, event: &BackgroundJobEvent) -> Result<OkResponse, ClientError> {
        self.post(&format!("/remote/{id}/background-job"), event).await
    }
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

fn decode<R: DeserializeOwned>(status: u16, body: &[u8]) -> Result<R, ClientError> {
    if status >= 400 {
        let value: serde_json::Value = serde_json::from_slice(body).unwrap_or_default();
        let error = value.get("error").and_then(|v| v.as_str()).unwrap_or("request failed").to_string();
        return Err(ClientError::Api { status, error });
    }
    serde_json::from_slice(body).map_err(ClientError::Decode)
}

#[cfg(test)]
#[path = "daemon_client_tests.rs"]
mod tests;
