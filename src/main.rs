//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves `static/` over a local HTTP server.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context, Result};
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(about = "Build and serve the particle background page")]
    struct Args {
        /// Port for the local HTTP server.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Serve whatever is already in static/pkg.
        #[arg(long)]
        skip_build: bool,
    }

    fn build_wasm() -> Result<()> {
        println!("Building WASM pkg …");
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
            .context("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/)")?;
        if !status.success() {
            bail!("wasm-pack finished with errors");
        }
        Ok(())
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        if !args.skip_build {
            build_wasm()?;
        }

        println!("Serving static/ at http://127.0.0.1:{} …", args.port);
        let port = args.port.to_string();
        let mut server = Command::new("python3")
            .args(["-m", "http.server", port.as_str(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to start http server (python3 required)")?;

        let status = server.wait()?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

// Only meaningful on non-wasm targets.
#[cfg(target_arch = "wasm32")]
fn main() {}
