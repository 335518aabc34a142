mod app;
mod error;
mod renderer;
mod utils;

use app::App;
use error::InitResult;
use log::LevelFilter;
use renderer::window::WindowSettings;
use simple_logger::SimpleLogger;
use std::process::ExitCode;
use utils::AppInfo;
use winit::event_loop::EventLoop;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> InitResult<()> {
    // RUST_LOG overrides the default level
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let mut event_loop = EventLoop::new()?;

    // the app (instance, then window) is gone before the event loop is dropped
    App::new(AppInfo::default(), WindowSettings::default()).start(&mut event_loop)
}
