mod audio;
mod config;
mod controller;
mod error;
mod library;
mod runtime;
mod surface;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
