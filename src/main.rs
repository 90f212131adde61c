//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves the lesson pages from `static/` on a local HTTP server.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const PORT: &str = "8000";
const LESSONS: [(&str, &str); 3] = [
    ("lesson001", "point cloud"),
    ("lesson002", "plane gallery"),
    ("lesson003", "pattern playground"),
];

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    // Build wasm bundle
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the lessons may serve stale artifacts.");
        }
    }

    // Serve `static/`; each lesson loads its shaders relative to its own page.
    println!("Launching local server at http://127.0.0.1:{PORT} …");
    let server = Command::new("python3")
        .args(["-m", "http.server", PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = server {
        eprintln!("failed to start http server: {err}");
        std::process::exit(1);
    }

    for (dir, title) in LESSONS {
        println!("  {title:<20} http://127.0.0.1:{PORT}/{dir}/");
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
