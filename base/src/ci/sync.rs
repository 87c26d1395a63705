
//! Types which simplify the creation of Vulkan synchronization objects.

use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::{VkDevice, VkObjectDiscardable};
use crate::ci::{VulkanCI, VkObjectBuildableCI};
use crate::error::{VkResult, VkError};

use std::ptr;
use std::ops::Deref;

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vk::SemaphoreCreateInfo.
#[derive(Debug, Clone)]
pub struct SemaphoreCI {
    inner: vk::SemaphoreCreateInfo,
}

impl VulkanCI<vk::SemaphoreCreateInfo> for SemaphoreCI {

    fn default_ci() -> vk::SemaphoreCreateInfo {

        vk::SemaphoreCreateInfo {
            s_type: vk::StructureType::SEMAPHORE_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::SemaphoreCreateFlags::empty(),
        }
    }
}

impl Deref for SemaphoreCI {
    type Target = vk::SemaphoreCreateInfo;

    fn deref(&self) -> &vk::SemaphoreCreateInfo {
        &self.inner
    }
}

impl VkObjectBuildableCI for SemaphoreCI {
    type ObjectType = vk::Semaphore;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType> {

        let semaphore = unsafe {
            device.logic.handle.create_semaphore(self, None)
                .or(Err(VkError::create("Semaphore")))?
        };
        Ok(semaphore)
    }
}

impl SemaphoreCI {

    pub fn new() -> SemaphoreCI {

        SemaphoreCI {
            inner: SemaphoreCI::default_ci(),
        }
    }
}

impl VkObjectDiscardable for vk::Semaphore {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_semaphore(self, None);
        }
    }
}
// ----------------------------------------------------------------------------------------------

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vk::FenceCreateInfo.
#[derive(Debug, Clone)]
pub struct FenceCI {
    inner: vk::FenceCreateInfo,
}

impl VulkanCI<vk::FenceCreateInfo> for FenceCI {

    fn default_ci() -> vk::FenceCreateInfo {

        vk::FenceCreateInfo {
            s_type: vk::StructureType::FENCE_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::FenceCreateFlags::empty(),
        }
    }
}

impl Deref for FenceCI {
    type Target = vk::FenceCreateInfo;

    fn deref(&self) -> &vk::FenceCreateInfo {
        &self.inner
    }
}

impl VkObjectBuildableCI for FenceCI {
    type ObjectType = vk::Fence;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType> {

        let fence = unsafe {
            device.logic.handle.create_fence(self, None)
                .or(Err(VkError::create("Fence")))?
        };
        Ok(fence)
    }
}

impl FenceCI {

    pub fn new(is_signed: bool) -> FenceCI {

        let mut fence = FenceCI { inner: FenceCI::default_ci() };

        if is_signed {
            fence.inner.flags = vk::FenceCreateFlags::SIGNALED;
        }

        fence
    }
}

impl VkObjectDiscardable for vk::Fence {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_fence(self, None);
        }
    }
}
// ----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn fence_ci_signaled_flag() {

        assert_eq!(FenceCI::new(true).flags, vk::FenceCreateFlags::SIGNALED);
        assert_eq!(FenceCI::new(false).flags, vk::FenceCreateFlags::empty());
    }
}
