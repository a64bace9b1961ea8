use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server that answers every request with `body`
/// after `delay`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(
    body: &'static str,
    delay: Duration,
) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, body, delay));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Like [`spawn_http_server`], but skips when sockets are not permitted.
///
/// # Errors
///
/// Returns an error for any bind failure other than a sandbox denial.
pub fn spawn_http_server_or_skip(
    body: &'static str,
    delay: Duration,
) -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_http_server(body, delay) {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(mut stream: TcpStream, body: &str, delay: Duration) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = [0u8; 4096];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    thread::sleep(delay);
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `warden` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_warden<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = warden_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("WARDEN_LOG")
        .output()
        .map_err(|err| format!("run warden failed: {}", err))
}

fn warden_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_warden").map_or_else(
        || Err("CARGO_BIN_EXE_warden missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

/// Builds a request file with JSON front matter and a body.
#[must_use]
pub fn request_file(name: &str, url: &str, timeout_ms: i64, assertions: &[&str]) -> String {
    let assertions: Vec<String> = assertions
        .iter()
        .map(|pattern| format!("\"{}\"", pattern))
        .collect();
    format!(
        "{{\n  \"name\": \"{}\",\n  \"url\": \"{}\",\n  \"method\": \"POST\",\n  \"timeout\": {},\n  \"headers\": [\"Content-Type: text/plain\"],\n  \"assertions\": [{}]\n}}\n---\nhello",
        name,
        url,
        timeout_ms,
        assertions.join(", ")
    )
}
