use ash::prelude::VkResult;
use ash::{vk, Instance};
use log::{debug, info};

use crate::error::{InitError, InitResult};
use crate::renderer::VulkanInstance;

/// Bonus awarded to discrete GPUs on top of their image limit.
pub const DISCRETE_GPU_BONUS: u64 = 1000;

/// Anything that can list physical devices and describe them.
/// Only a live instance can do this, so selection can never run before creation.
pub trait PhysicalDeviceSource {
    fn physical_devices(&self) -> VkResult<Vec<vk::PhysicalDevice>>;
    fn device_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties;
}

impl PhysicalDeviceSource for VulkanInstance {
    fn physical_devices(&self) -> VkResult<Vec<vk::PhysicalDevice>> {
        unsafe { self.instance.enumerate_physical_devices() }
    }

    fn device_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        unsafe { self.instance.get_physical_device_properties(physical_device) }
    }
}

// discrete gpus get a flat bonus, everything gets its max 2d image size
pub fn score_device(device_properties: &vk::PhysicalDeviceProperties) -> u64 {
    let mut score: u64 = 0;

    if device_properties.device_type == vk::PhysicalDeviceType::DISCRETE_GPU {
        score += DISCRETE_GPU_BONUS;
    }

    score += u64::from(device_properties.limits.max_image_dimension2_d);
    score
}

/// Picks the highest scoring candidate.
/// Ties go to whichever candidate came first.
pub fn pick_best<T: Copy>(candidates: &[(u64, T)]) -> InitResult<T> {
    let mut best: Option<&(u64, T)> = None;
    for candidate in candidates {
        match best {
            Some(current) if candidate.0 <= current.0 => {}
            _ => best = Some(candidate),
        }
    }

    match best {
        None => Err(InitError::NoGpus),
        Some((0, _)) => Err(InitError::NoSuitableGpu),
        Some((_, device)) => Ok(*device),
    }
}

pub fn select_physical_device<S>(source: &S) -> InitResult<vk::PhysicalDevice>
where
    S: PhysicalDeviceSource,
{
    let physical_devices = source
        .physical_devices()
        .map_err(InitError::Enumeration)?;

    if physical_devices.is_empty() {
        return Err(InitError::NoGpus);
    }

    // turn each physical device into a tuple of score and device
    let candidates: Vec<(u64, vk::PhysicalDevice)> = physical_devices
        .iter()
        .map(|physical_device| {
            let device_properties = source.device_properties(*physical_device);
            let score = score_device(&device_properties);
            debug!(
                "VK Candidate {}: {:?} scored {}",
                device_name(&device_properties),
                device_properties.device_type,
                score
            );
            (score, *physical_device)
        })
        .collect();

    let physical_device = pick_best(&candidates)?;
    info!(
        "VK Selected Device: {}",
        device_name(&source.device_properties(physical_device))
    );
    Ok(physical_device)
}

pub fn device_name(device_properties: &vk::PhysicalDeviceProperties) -> String {
    device_properties
        .device_name_as_c_str()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

// get device memory in MiB
pub fn physical_device_memory_size(
    physical_device: &vk::PhysicalDevice,
    instance: &Instance,
) -> u64 {
    let memory_properties =
        unsafe { instance.get_physical_device_memory_properties(*physical_device) };

    memory_properties.memory_heaps[..memory_properties.memory_heap_count as usize]
        .iter()
        .fold(0u64, |acc, heap| {
            if heap.flags.contains(vk::MemoryHeapFlags::DEVICE_LOCAL) {
                acc + heap.size / (1024 * 1024) // Convert to MiB
            } else {
                acc
            }
        })
}
