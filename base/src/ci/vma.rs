
//! Types which bridge the vma allocator with the rest of the crate.

use ash::vk;

use crate::ci::VulkanCI;
use crate::context::VmaResourceDiscardable;
use crate::{VkResult, VkErrorKind};

use std::ops::Deref;

// ----------------------------------------------------------------------------------------------
/// A type contains the buffer allocation result from `vma::Allocator`.
#[derive(Debug, Clone)]
pub struct VmaBuffer {

    /// the handle of vk::Buffer.
    pub handle: vk::Buffer,
    /// allocation info managed by vma.
    pub allocation: vma::Allocation,
    /// the meta information about this memory and allocation.
    pub info: vma::AllocationInfo,
}

impl From<(vk::Buffer, vma::Allocation, vma::AllocationInfo)> for VmaBuffer {

    fn from(content: (vk::Buffer, vma::Allocation, vma::AllocationInfo)) -> VmaBuffer {
        VmaBuffer {
            handle: content.0,
            allocation: content.1,
            info: content.2,
        }
    }
}

impl VmaResourceDiscardable for VmaBuffer {

    fn discard_by(self, vma: &mut vma::Allocator) -> VkResult<()> {
        vma.destroy_buffer(self.handle, &self.allocation)
            .map_err(VkErrorKind::Vma)?;
        Ok(())
    }
}
// ----------------------------------------------------------------------------------------------

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vma::AllocationCreateInfo.
#[derive(Debug, Clone)]
pub struct VmaAllocationCI {
    inner: vma::AllocationCreateInfo,
}

impl VulkanCI<vma::AllocationCreateInfo> for VmaAllocationCI {

    fn default_ci() -> vma::AllocationCreateInfo {

        vma::AllocationCreateInfo {
            usage: vma::MemoryUsage::Unknown,
            flags: vma::AllocationCreateFlags::NONE,
            required_flags : vk::MemoryPropertyFlags::empty(),
            preferred_flags: vk::MemoryPropertyFlags::empty(),
            // set `memory_type_bits` to 0 means to accept all memory type indices.
            memory_type_bits: 0,
            pool: None,
            user_data: None,
        }
    }
}

impl Deref for VmaAllocationCI {
    type Target = vma::AllocationCreateInfo;

    fn deref(&self) -> &vma::AllocationCreateInfo {
        &self.inner
    }
}

impl AsRef<vma::AllocationCreateInfo> for VmaAllocationCI {

    fn as_ref(&self) -> &vma::AllocationCreateInfo {
        &self.inner
    }
}

impl VmaAllocationCI {

    pub fn new(usage: vma::MemoryUsage, required_flags: vk::MemoryPropertyFlags) -> VmaAllocationCI {

        VmaAllocationCI {
            inner: vma::AllocationCreateInfo {
                usage, required_flags,
                ..VmaAllocationCI::default_ci()
            }
        }
    }

    #[inline(always)]
    pub fn flags(mut self, flags: vma::AllocationCreateFlags) -> VmaAllocationCI {
        self.inner.flags = flags; self
    }

    #[inline(always)]
    pub fn preferred_flags(mut self, flags: vk::MemoryPropertyFlags) -> VmaAllocationCI {
        self.inner.preferred_flags = flags; self
    }
}
// ----------------------------------------------------------------------------------------------
