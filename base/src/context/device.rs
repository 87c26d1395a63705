
use ash::vk;

use crate::context::logical::VkLogicalDevice;
use crate::context::physical::VkPhysicalDevice;
use crate::ci::VkObjectBuildableCI;
use crate::error::{VkResult, VkError};
use crate::vkbytes;

/// The facade over the logical device, its physical device and the memory allocator.
///
/// Most Vulkan objects in this crate are created and destroyed through this type.
pub struct VkDevice {

    pub logic: VkLogicalDevice,
    pub phy  : VkPhysicalDevice,
    pub vma  : vma::Allocator,
}

impl VkDevice {

    pub(crate) fn new(logic: VkLogicalDevice, phy: VkPhysicalDevice, vma: vma::Allocator) -> VkDevice {
        VkDevice { logic, phy, vma }
    }

    #[inline]
    pub fn build<T>(&self, ci: &T) -> VkResult<T::ObjectType>
        where
            T: VkObjectBuildableCI {
        ci.build(self)
    }

    #[inline]
    pub fn discard(&self, object: impl VkObjectDiscardable) {
        object.discard_by(self);
    }

    #[inline]
    pub fn bind_memory(&self, object: impl VkObjectBindable, memory: vk::DeviceMemory, offset: vkbytes) -> VkResult<()> {
        object.bind(self, memory, offset)
    }

    #[inline]
    pub fn submit(&self, ci: impl VkSubmitCI, queue: vk::Queue, wait_fence: vk::Fence) -> VkResult<()> {
        ci.submit(self, queue, wait_fence)
    }

    #[inline]
    pub fn vma_discard(&mut self, resource: impl VmaResourceDiscardable) -> VkResult<()> {
        resource.discard_by(&mut self.vma)
    }

    pub fn wait_idle(&self) -> VkResult<()> {

        use ash::version::DeviceV1_0;
        unsafe {
            self.logic.handle.device_wait_idle()
                .map_err(|_| VkError::device("Device Waiting Idle"))
        }
    }

    /// Destroy the allocator and the logical device. Called once at the very end of program.
    pub(crate) fn drop_self(mut self) {

        self.vma.destroy();
        self.logic.discard();
    }
}

/// Vulkan objects that are destroyed with a plain destroy call on the device.
pub trait VkObjectDiscardable: Copy {

    fn discard_by(self, device: &VkDevice);
}

impl<'a, T> VkObjectDiscardable for &'a Vec<T>
    where
        T: VkObjectDiscardable {

    fn discard_by(self, device: &VkDevice) {

        for object in self.iter() {
            object.discard_by(device);
        }
    }
}

/// Vulkan objects that are bound to a range of `vk::DeviceMemory`.
pub trait VkObjectBindable: Copy {

    fn bind(self, device: &VkDevice, memory: vk::DeviceMemory, offset: vkbytes) -> VkResult<()>;
}

/// Types that describe a queue submission.
pub trait VkSubmitCI {

    fn submit(self, device: &VkDevice, queue: vk::Queue, wait_fence: vk::Fence) -> VkResult<()>;
}

/// Resources whose memory is managed by the vma allocator.
pub trait VmaResourceDiscardable {

    fn discard_by(self, vma: &mut vma::Allocator) -> VkResult<()>;
}
