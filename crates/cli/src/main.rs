//! Command-line interface for the `skillport` application.
//!
//! Thin wrapper over `skillport_sync`: configuration is folded into the
//! environment, flags are parsed and the selected command runs.

mod app;
mod cli;

fn main() -> anyhow::Result<()> {
    app::run()
}
