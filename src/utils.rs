use ash::vk;
use std::ffi::CStr;
use std::panic;

/// Moves a value out of `&mut self`, hands it to `closure` by value and
/// stores whatever comes back. Used to step `App` from one state to the next.
/// A panic inside `closure` aborts, since `self` would be left moved-out.
pub trait ReplaceWith<F> {
    fn replace_with(&mut self, closure: F)
    where
        F: FnOnce(Self) -> Self,
        Self: Sized,
    {
        use std::ptr;

        unsafe {
            let old_t = ptr::read(self);
            let new_t = panic::catch_unwind(panic::AssertUnwindSafe(|| closure(old_t)))
                .unwrap_or_else(|_| ::std::process::abort());
            ptr::write(self, new_t);
        }
    }
}

/// Identity handed to the driver at instance creation.
#[derive(Debug, Clone, Copy)]
pub struct AppInfo {
    pub app_name: &'static CStr,
    pub app_version: (u32, u32, u32),
    pub engine_name: &'static CStr,
    pub engine_version: (u32, u32, u32),
    pub api_version: u32,
}

impl AppInfo {
    pub fn packed_app_version(&self) -> u32 {
        let (major, minor, patch) = self.app_version;
        vk::make_api_version(0, major, minor, patch)
    }

    pub fn packed_engine_version(&self) -> u32 {
        let (major, minor, patch) = self.engine_version;
        vk::make_api_version(0, major, minor, patch)
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            app_name: c"Hello Triangle",
            app_version: (1, 0, 0),
            engine_name: c"No Engine",
            engine_version: (1, 0, 0),
            api_version: vk::API_VERSION_1_0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_with_test() {
        #[derive(PartialEq, Eq, Debug)]
        enum Phase {
            Waiting(u32),
            Running(u32),
        }

        impl<F> ReplaceWith<F> for Phase {}

        let mut phase = Phase::Waiting(7);
        phase.replace_with(|phase| match phase {
            Phase::Waiting(n) => Phase::Running(n + 1),
            running => running,
        });

        assert_eq!(phase, Phase::Running(8));
    }

    #[test]
    fn default_app_info() {
        let info = AppInfo::default();
        assert_eq!(info.app_name, c"Hello Triangle");
        assert_eq!(info.engine_name, c"No Engine");
        assert_eq!(info.api_version, vk::API_VERSION_1_0);

        let version = info.packed_app_version();
        assert_eq!(vk::api_version_major(version), 1);
        assert_eq!(vk::api_version_minor(version), 0);
        assert_eq!(vk::api_version_patch(version), 0);
        assert_eq!(info.packed_engine_version(), version);
    }
}
