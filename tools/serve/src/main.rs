//! HTTP front end: serves `GET /?function=..&width=..&peak=..` as SVG.
//!
//! Each connection is handled on its own task and each render runs on a
//! blocking thread with its own `RenderConfig`; renders share no state.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use surface_core::{render_to_string, svg::MIME_TYPE, RenderConfig, RenderError};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

/// Longest request head we are willing to buffer.
const MAX_HEAD_BYTES: usize = 16 * 1024;
const READ_TIMEOUT: Duration = Duration::from_secs(10);

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "serve", about = "Serve isometric surface SVGs over HTTP")]
struct Args {
    /// Address to listen on.
    #[arg(short, long, default_value = "localhost:8000")]
    addr: String,

    /// Maximum number of renders running at once; further requests wait.
    #[arg(long, default_value_t = 4)]
    max_renders: usize,
}

// ── Request / response ────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
struct Request {
    method: String,
    path: String,
    query: String,
}

#[derive(Debug, PartialEq, Eq)]
struct Response {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl Response {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self { status, content_type: "text/plain; charset=utf-8", body: body.into() }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            431 => "Request Header Fields Too Large",
            _ => "Internal Server Error",
        }
    }

    /// Status line and headers, up to and including the blank line.
    /// The body is written separately.
    fn head(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.reason(),
            self.content_type,
            self.body.len()
        )
    }
}

/// Parse `METHOD target HTTP/x.y`, splitting the target into path and query.
fn parse_request_line(line: &str) -> Option<Request> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    Some(Request { method: method.to_string(), path: path.to_string(), query: query.to_string() })
}

/// Route a parsed request and render the response body. Synchronous.
fn respond(req: &Request) -> Response {
    if req.path != "/" {
        return Response::text(404, "error: not found");
    }
    if req.method != "GET" {
        return Response::text(405, "error: only GET is supported");
    }
    let result = RenderConfig::from_query(&req.query)
        .map_err(RenderError::from)
        .and_then(|cfg| render_to_string(&cfg));
    match result {
        Ok(svg) => Response { status: 200, content_type: MIME_TYPE, body: svg },
        Err(RenderError::Config(e)) => Response::text(400, format!("error: {e}")),
        Err(e) => Response::text(500, format!("error: {e}")),
    }
}

// ── Connection handling ───────────────────────────────────────────────────────

/// Outcome of reading a request head.
#[derive(Debug, PartialEq, Eq)]
enum Head {
    Request(Request),
    Malformed,
    TooLarge,
}

/// Read the request line and drain the headers, never buffering more than
/// `MAX_HEAD_BYTES`. The body of a GET is ignored.
async fn read_head<R: AsyncRead + Unpin>(stream: R) -> io::Result<Head> {
    let mut reader = BufReader::new(stream.take(MAX_HEAD_BYTES as u64));
    let mut request_line = Vec::new();
    let mut line = Vec::new();
    let mut first = true;
    loop {
        let buf = if first { &mut request_line } else { &mut line };
        buf.clear();
        let n = reader.read_until(b'\n', buf).await?;
        if n > 0 && !buf.ends_with(b"\n") && reader.get_ref().limit() == 0 {
            return Ok(Head::TooLarge);
        }
        if n == 0 || (!first && (buf.as_slice() == b"\r\n" || buf.as_slice() == b"\n")) {
            break;
        }
        first = false;
    }

    let Ok(text) = std::str::from_utf8(&request_line) else {
        return Ok(Head::Malformed);
    };
    Ok(parse_request_line(text.trim_end()).map_or(Head::Malformed, Head::Request))
}

async fn handle(mut stream: TcpStream, renders: Arc<Semaphore>) -> Result<()> {
    let peer = stream.peer_addr().ok();
    let head = tokio::time::timeout(READ_TIMEOUT, read_head(&mut stream))
        .await
        .context("timed out reading request")?;

    let (label, resp) = match head {
        Ok(Head::Request(req)) => {
            let label = format!("{} {}?{}", req.method, req.path, req.query);
            let _permit = renders.acquire_owned().await.context("render pool closed")?;
            let resp = tokio::task::spawn_blocking(move || respond(&req))
                .await
                .context("render task panicked")?;
            (label, resp)
        }
        Ok(Head::TooLarge) => (
            "<oversized>".to_string(),
            Response::text(431, "error: request head too large"),
        ),
        // Includes request lines that are not valid UTF-8.
        Ok(Head::Malformed) | Err(_) => {
            ("<malformed>".to_string(), Response::text(400, "error: malformed request"))
        }
    };

    if resp.status >= 400 {
        warn!("{peer:?} {label} -> {} {}", resp.status, resp.body);
    } else {
        info!("{peer:?} {label} -> {}", resp.status);
    }

    stream.write_all(resp.head().as_bytes()).await?;
    stream.write_all(resp.body.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let listener = TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("cannot listen on {}", args.addr))?;
    info!("Listening on http://{} ({} concurrent renders)", args.addr, args.max_renders);

    let renders = Arc::new(Semaphore::new(args.max_renders.max(1)));
    loop {
        let (stream, _) = listener.accept().await?;
        let renders = Arc::clone(&renders);
        tokio::spawn(async move {
            if let Err(e) = handle(stream, renders).await {
                warn!("connection failed: {e:#}");
            }
        });
    }
}
