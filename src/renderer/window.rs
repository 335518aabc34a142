use winit::{
    dpi::LogicalSize,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

use crate::error::InitResult;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

/// Fixed window description. winit never binds a GL context, so the
/// surface is left for Vulkan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl WindowSettings {
    pub fn attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(self.resizable)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Vulkan".to_string(),
            width: WIDTH,
            height: HEIGHT,
            resizable: false,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    settings: &WindowSettings,
) -> InitResult<Window> {
    Ok(event_loop.create_window(settings.attributes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    #[test]
    fn default_window_is_fixed_800_by_600() {
        let settings = WindowSettings::default();
        assert_eq!(settings.title, "Vulkan");
        assert_eq!((settings.width, settings.height), (800, 600));
        assert!(!settings.resizable);
    }

    #[test]
    fn attributes_carry_settings() {
        let attributes = WindowSettings::default().attributes();
        assert_eq!(attributes.title, "Vulkan");
        assert!(!attributes.resizable);
        assert_eq!(
            attributes.inner_size,
            Some(Size::Logical(LogicalSize::new(800.0, 600.0)))
        );
    }
}
