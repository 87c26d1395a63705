
//! Builder wrappers which simplify the assembly of Vulkan `CreateInfo` structs.

pub mod buffer;
pub mod command;
pub mod descriptor;
pub mod device;
pub mod image;
pub mod memory;
pub mod pipeline;
pub mod shader;
pub mod sync;
pub mod vma;


use crate::context::VkDevice;
use crate::VkResult;

pub(crate) trait VulkanCI<CI>: Sized {

    fn default_ci() -> CI;
}

pub trait VkObjectBuildableCI {
    type ObjectType;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType>;
}
