use crate::error::{InitError, InitResult};
use crate::renderer::VulkanContext;
use crate::renderer::device::{device_name, PhysicalDeviceSource};
use crate::renderer::window::{create_window, WindowSettings};
use crate::utils::AppInfo;
use crate::utils::ReplaceWith;
use log::{debug, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::event_loop::ControlFlow;
use winit::event_loop::EventLoop;
use winit::platform::run_on_demand::EventLoopExtRunOnDemand;
use winit::raw_window_handle::HasDisplayHandle;
use winit::window::Window;
use winit::window::WindowId;

// field order is drop order: the instance goes before the window
pub struct AppCTX<C = VulkanContext, W = Window> {
    vulkan_ctx: C,
    window: W,
}

impl<C, W> AppCTX<C, W> {
    // a failed context build drops the window that was already opened
    fn assemble<FW, FC>(open_window: FW, create_context: FC) -> InitResult<Self>
    where
        FW: FnOnce() -> InitResult<W>,
        FC: FnOnce(&W) -> InitResult<C>,
    {
        let window = open_window()?;
        let vulkan_ctx = create_context(&window)?;

        Ok(Self { vulkan_ctx, window })
    }
}

impl AppCTX {
    fn new(
        app_info: &AppInfo,
        window_settings: &WindowSettings,
        event_loop: &ActiveEventLoop,
    ) -> InitResult<Self> {
        Self::assemble(
            || create_window(event_loop, window_settings),
            |_: &Window| -> InitResult<VulkanContext> {
                VulkanContext::new(app_info, event_loop.display_handle()?.as_raw())
            },
        )
    }
}

pub enum App {
    Uninitialised {
        app_info: AppInfo,
        window_settings: WindowSettings,
    },
    Initialised(AppCTX),
    Failed(InitError),
    Finished,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let App::Uninitialised { .. } = self {
            self.init(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let App::Initialised(app_ctx) = self {
            let vulkan_ctx = &app_ctx.vulkan_ctx;
            let device_properties = vulkan_ctx
                .vulkan_instance
                .device_properties(vulkan_ctx.physical_device);
            info!(
                "Tearing Down {:?} On {}",
                app_ctx.window.id(),
                device_name(&device_properties)
            );
            *self = App::Finished;
        }
    }
}

impl<F> ReplaceWith<F> for App {}

impl App {
    pub fn new(app_info: AppInfo, window_settings: WindowSettings) -> Self {
        App::Uninitialised {
            app_info,
            window_settings,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) {
        self.replace_with(|state| match state {
            Self::Uninitialised {
                app_info,
                window_settings,
            } => {
                info!("Initialising: {}", app_info.app_name.to_string_lossy());
                match AppCTX::new(&app_info, &window_settings, event_loop) {
                    Ok(app_ctx) => Self::Initialised(app_ctx),
                    Err(err) => {
                        debug!("Initialisation Failed: {err}");
                        event_loop.exit();
                        Self::Failed(err)
                    }
                }
            }
            other => other,
        });
    }

    /// Pumps events until the window is closed, then hands back any start-up failure.
    pub fn start<T>(mut self, event_loop: &mut EventLoop<T>) -> InitResult<()>
    where
        Self: ApplicationHandler<T>,
    {
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app_on_demand(&mut self)?;

        match self {
            App::Failed(err) => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ash::vk;
    use std::cell::RefCell;
    use std::rc::Rc;
    use winit::raw_window_handle::HandleError;

    type DropLog = Rc<RefCell<Vec<&'static str>>>;

    struct Tracked {
        name: &'static str,
        log: DropLog,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn tracked(name: &'static str, log: &DropLog) -> Tracked {
        Tracked {
            name,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn instance_is_destroyed_before_window() {
        let log = DropLog::default();
        let app_ctx: AppCTX<Tracked, Tracked> = AppCTX::assemble(
            || Ok(tracked("window", &log)),
            |_| Ok(tracked("instance", &log)),
        )
        .unwrap();

        assert!(log.borrow().is_empty());
        drop(app_ctx);
        assert_eq!(*log.borrow(), ["instance", "window"]);
    }

    #[test]
    fn failed_instance_only_destroys_the_window() {
        let log = DropLog::default();
        let result: InitResult<AppCTX<Tracked, Tracked>> = AppCTX::assemble(
            || Ok(tracked("window", &log)),
            |_| Err(InitError::InstanceCreation(vk::Result::ERROR_INCOMPATIBLE_DRIVER)),
        );

        assert!(matches!(result, Err(InitError::InstanceCreation(_))));
        assert_eq!(*log.borrow(), ["window"]);
    }

    #[test]
    fn failed_window_skips_instance_creation() {
        let log = DropLog::default();
        let mut context_requested = false;
        let result: InitResult<AppCTX<Tracked, Tracked>> = AppCTX::assemble(
            || Err(InitError::Handle(HandleError::Unavailable)),
            |_| {
                context_requested = true;
                Ok(tracked("instance", &log))
            },
        );

        assert!(matches!(result, Err(InitError::Handle(_))));
        assert!(!context_requested);
        assert!(log.borrow().is_empty());
    }
}
