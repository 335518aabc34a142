use ash::vk;
use thiserror::Error;
use winit::error::{EventLoopError, OsError};
use winit::raw_window_handle::HandleError;

/// Every way start-up can fail. All of them are fatal.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("failed to load vulkan: {0}")]
    Loading(#[from] ash::LoadingError),

    #[error("failed to create vulkan instance! ({0:?})")]
    InstanceCreation(vk::Result),

    #[error("failed to query required instance extensions: {0:?}")]
    Extensions(vk::Result),

    #[error("failed to enumerate physical devices: {0:?}")]
    Enumeration(vk::Result),

    #[error("failed to find GPUs with Vulkan support!")]
    NoGpus,

    #[error("failed to find a suitable GPU!")]
    NoSuitableGpu,

    #[error("failed to create window: {0}")]
    Window(#[from] OsError),

    #[error("window handle unavailable: {0}")]
    Handle(#[from] HandleError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type InitResult<T> = Result<T, InitError>;
