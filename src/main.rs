mod app;
mod config;
mod draw;
mod layout;
mod render;
mod scene;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
