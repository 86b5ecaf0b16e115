use anyhow::{Result, anyhow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};
use tiny_http::{Response, Server};
use url::Url;

use crate::auth::gate::{AuthGate, Destination};

/// How long the loopback listener waits for the browser to come back.
const CALLBACK_WAIT: Duration = Duration::from_secs(120);

/// Run the browser sign-in round-trip: open the system browser at
/// `login_url` and catch the backend's redirect on `redirect_uri`. Each
/// arriving request is evaluated on its own; the first one carrying a token
/// ends the flow with `Destination::Inbox`, a deadline without one ends it
/// with `Destination::Login`.
pub fn run_login_flow(login_url: &str, redirect_uri: &str, gate: &AuthGate) -> Result<Destination> {
    let redirect = Url::parse(redirect_uri)
        .map_err(|e| anyhow!("Invalid redirect_uri '{redirect_uri}': {e}"))?;

    let host = redirect
        .host_str()
        .ok_or_else(|| anyhow!("redirect_uri missing host: {redirect_uri}"))?
        .to_string();

    let port = redirect
        .port_or_known_default()
        .ok_or_else(|| anyhow!("redirect_uri missing/unknown port: {redirect_uri}"))?;

    // For local loopback flows, prefer binding explicitly to loopback.
    let bind_ip: IpAddr = match host.as_str() {
        "localhost" | "127.0.0.1" => IpAddr::V4(Ipv4Addr::LOCALHOST),
        other => other.parse::<IpAddr>().map_err(|_| {
            anyhow!("redirect_uri host must be localhost/127.0.0.1 or an IP: {other}")
        })?,
    };

    let bind_addr = SocketAddr::new(bind_ip, port);

    // Listen FIRST so the redirect cannot race the listener
    let server = Server::http(bind_addr)
        .map_err(|e| anyhow!("Failed to bind callback listener on {bind_addr}: {e:?}"))?;

    println!("Open this URL in your browser:\n{login_url}");
    // best-effort: don't fail if browser can't be opened
    if let Err(e) = open::that(login_url) {
        eprintln!("Warning: could not open browser automatically: {e}");
    }

    wait_for_callback(&server, &host, port, gate)
}

fn wait_for_callback(
    server: &Server,
    host: &str,
    port: u16,
    gate: &AuthGate,
) -> Result<Destination> {
    let wait_until = Instant::now() + CALLBACK_WAIT;

    while Instant::now() < wait_until {
        let Ok(maybe_request) = server.recv_timeout(Duration::from_millis(500)) else {
            continue;
        };

        let Some(request) = maybe_request else {
            continue;
        };

        // request.url() is a path+query like "/callback?token=...".
        // Rebuild a full URL against the SAME host/port the redirect used.
        let full = format!("http://{}:{}{}", host, port, request.url());

        match Url::parse(&full) {
            Ok(parsed) => match gate.accept_callback(&parsed)? {
                Destination::Inbox => {
                    let _ = request.respond(Response::from_string(
                        "Signed in. You can close this tab.",
                    ));
                    return Ok(Destination::Inbox);
                }
                // token absent: answer and keep listening, the next request
                // gets its own evaluation
                Destination::Login => {
                    let _ = request.respond(Response::from_string(
                        "No token found in redirect. You can close this tab.",
                    ));
                }
            },
            Err(_) => {
                let _ = request.respond(Response::from_string("Bad redirect"));
            }
        }
    }

    log::warn!("no callback received within {CALLBACK_WAIT:?}");
    Ok(Destination::Login)
}
