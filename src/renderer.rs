pub mod device;
pub mod window;

use ash::{vk, Entry, Instance};
use log::{debug, info};
use std::ffi::{c_char, CStr};
use winit::raw_window_handle::RawDisplayHandle;

use crate::error::{InitError, InitResult};
use crate::utils::AppInfo;

pub struct VulkanInstance {
    _entry: Entry,
    pub instance: Instance,
}

impl VulkanInstance {
    pub fn new(app_info: &AppInfo, extension_names: &[*const c_char]) -> InitResult<Self> {
        // Load Vulkan Library
        let entry = unsafe { Entry::load()? };

        let vk_app_info = vk::ApplicationInfo::default()
            .api_version(app_info.api_version)
            .application_name(app_info.app_name)
            .application_version(app_info.packed_app_version())
            .engine_name(app_info.engine_name)
            .engine_version(app_info.packed_engine_version());

        let instance = Self::create_instance(&entry, &vk_app_info, extension_names)?;
        info!(
            "VK Instance Created For: {}",
            app_info.app_name.to_string_lossy()
        );

        Ok(Self {
            _entry: entry,
            instance,
        })
    }

    // no layers, extensions go through exactly as given
    fn create_instance(
        entry: &Entry,
        app_info: &vk::ApplicationInfo,
        extension_names: &[*const c_char],
    ) -> InitResult<Instance> {
        let create_info = vk::InstanceCreateInfo::default()
            .application_info(app_info)
            .enabled_extension_names(extension_names);
        let instance = unsafe {
            entry
                .create_instance(&create_info, None)
                .map_err(InitError::InstanceCreation)?
        };

        Ok(instance)
    }
}

impl Drop for VulkanInstance {
    fn drop(&mut self) {
        debug!("VK Destroying Instance");
        unsafe {
            self.instance.destroy_instance(None);
        }
    }
}

/// Instance extensions the window system needs to present.
pub fn required_extensions(
    display_handle: RawDisplayHandle,
) -> InitResult<&'static [*const c_char]> {
    let extension_names = ash_window::enumerate_required_extensions(display_handle)
        .map_err(InitError::Extensions)?;

    for extension_name in extension_names {
        let extension_name = unsafe { CStr::from_ptr(*extension_name) };
        debug!("VK Required Extension: {}", extension_name.to_string_lossy());
    }

    Ok(extension_names)
}

pub struct VulkanContext {
    pub vulkan_instance: VulkanInstance,
    pub physical_device: vk::PhysicalDevice,
}

impl VulkanContext {
    pub fn new(app_info: &AppInfo, display_handle: RawDisplayHandle) -> InitResult<Self> {
        let extension_names = required_extensions(display_handle)?;
        let vulkan_instance = VulkanInstance::new(app_info, extension_names)?;
        let physical_device = device::select_physical_device(&vulkan_instance)?;

        let device_properties = unsafe {
            vulkan_instance
                .instance
                .get_physical_device_properties(physical_device)
        };

        let device_version = device_properties.api_version;
        info!(
            "VK Device Version: {}.{}.{}",
            vk::api_version_major(device_version),
            vk::api_version_minor(device_version),
            vk::api_version_patch(device_version)
        );

        info!(
            "VK Device Memory: {}MiB",
            device::physical_device_memory_size(&physical_device, &vulkan_instance.instance)
        );

        Ok(Self {
            vulkan_instance,
            physical_device,
        })
    }
}
