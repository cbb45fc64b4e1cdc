#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Child, Command},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time::{Duration, Instant, sleep},
};

pub fn pick_free_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind random local port")
        .local_addr()
        .expect("failed to read local addr")
        .port()
}

pub fn vpndeck_binary_path() -> PathBuf {
    env::var_os("CARGO_BIN_EXE_vpndeck")
        .map_or_else(|| PathBuf::from("target/debug/vpndeck"), PathBuf::from)
}

/// Write an executable shell script into the temp directory.
/// The name is derived from `tag` and the thread ID so parallel tests
/// never collide.
pub fn write_script(tag: &str, contents: &str) -> PathBuf {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::os::unix::fs::PermissionsExt;

    let thread_id = std::thread::current().id();
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    format!("{thread_id:?}").hash(&mut hasher);

    let path = env::temp_dir().join(format!("vpndeck_test_{tag}_{:x}.sh", hasher.finish()));
    fs::write(&path, contents).expect("failed to write fake client script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("failed to mark fake client script executable");
    path
}

/// A fake VPN client honoring the subcommand contract the service
/// assumes: login/disconnect/connect plus colon-delimited status lines.
pub fn write_fake_client(tag: &str) -> PathBuf {
    write_script(
        tag,
        r#"#!/bin/sh
case "$1" in
  status)
    printf 'Status: Connected\nCountry: Japan\nServer: jp123\n'
    ;;
  connect)
    printf 'You are connected to %s!\n' "$2"
    ;;
  disconnect)
    printf 'You are disconnected.\n'
    ;;
  login)
    printf 'Welcome!\n'
    ;;
  *)
    printf 'unknown subcommand: %s\n' "$1" >&2
    exit 1
    ;;
esac
"#,
    )
}

/// Kills the spawned service when a test ends, pass or fail.
pub struct ServerGuard {
    pub child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server(client_script: &Path, port: u16, token: Option<&str>) -> ServerGuard {
    let mut command = Command::new(vpndeck_binary_path());
    command.args([
        "--client",
        client_script.to_str().unwrap(),
        "--listen",
        "127.0.0.1",
        "--port",
        &port.to_string(),
        "--timeout",
        "10",
    ]);
    if let Some(token) = token {
        command.args(["--token", token]);
    }

    ServerGuard {
        child: command.spawn().expect("failed to spawn vpndeck"),
    }
}

/// Minimal HTTP exchange over a raw socket, returns (status, body).
pub async fn http_request(
    port: u16,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Option<(u16, String)> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.ok()?;
    let body = body.unwrap_or_default();
    let request = format!(
        "{method} {path} HTTP/1.1\r\n\
        Host: 127.0.0.1:{port}\r\n\
        Content-Type: application/json\r\n\
        Content-Length: {}\r\n\
        Connection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.ok()?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.ok()?;
    let response = String::from_utf8(response).ok()?;

    let status = response
        .lines()
        .next()?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()?;
    let (_, body) = response.split_once("\r\n\r\n")?;
    Some((status, body.to_string()))
}

pub async fn wait_for_server(port: u16, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if http_request(port, "GET", "/metrics", None).await.is_some() {
            return true;
        }

        if Instant::now() >= deadline {
            return false;
        }

        sleep(Duration::from_millis(100)).await;
    }
}
