// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Terminal dashboard: log in, then print live readings until Ctrl-C.
//!
//! ```bash
//! RUST_LOG=ips_client=debug cargo run --example dashboard -- \
//!     https://ips-backend.example.com guard s3cret
//! ```

use std::env;

use ips_client::telemetry::RenderedSnapshot;
use ips_client::{AuthResult, HttpConfig, MonitorClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let (Some(host), Some(username), Some(password)) = (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: dashboard <backend-url> <username> <password>");
        std::process::exit(2);
    };

    let client = MonitorClient::with_config(HttpConfig::new(host))?;

    let result = match client.login(username, password).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Please enter both username and password ({e})");
            std::process::exit(2);
        }
    };

    let session = match client.open_session(&result) {
        Some(session) => session,
        None if result == AuthResult::InvalidCredentials => {
            eprintln!("Invalid credentials");
            std::process::exit(1);
        }
        None => {
            eprintln!("Login failed. Please try again.");
            std::process::exit(1);
        }
    };

    println!("Logged in (session {})", session.id());

    let handle = session.poller().start(
        |snapshot| println!("{}", RenderedSnapshot::from(snapshot)),
        |error| eprintln!("Failed to fetch data: {error}"),
    );

    tokio::signal::ctrl_c().await?;
    println!();
    println!("Shutting down...");
    handle.shutdown().await;

    Ok(())
}
