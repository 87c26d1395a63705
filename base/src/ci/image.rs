
//! Types which simplify the creation of Vulkan image objects.

use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::{VkDevice, VkObjectDiscardable, VkObjectBindable};
use crate::ci::{VulkanCI, VkObjectBuildableCI};
use crate::error::{VkResult, VkError};
use crate::vkbytes;

use std::ptr;
use std::ops::Deref;

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vk::ImageCreateInfo.
#[derive(Debug, Clone)]
pub struct ImageCI {
    inner: vk::ImageCreateInfo,
}

impl VulkanCI<vk::ImageCreateInfo> for ImageCI {

    fn default_ci() -> vk::ImageCreateInfo {

        vk::ImageCreateInfo {
            s_type: vk::StructureType::IMAGE_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::ImageCreateFlags::empty(),
            image_type: vk::ImageType::TYPE_2D,
            format: vk::Format::UNDEFINED,
            extent: Default::default(),
            mip_levels  : 1,
            array_layers: 1,
            samples: vk::SampleCountFlags::TYPE_1,
            tiling : vk::ImageTiling::OPTIMAL,
            usage  : vk::ImageUsageFlags::empty(),
            sharing_mode  : vk::SharingMode::EXCLUSIVE,
            initial_layout: vk::ImageLayout::UNDEFINED,
            queue_family_index_count: 0,
            p_queue_family_indices  : ptr::null(),
        }
    }
}

impl Deref for ImageCI {
    type Target = vk::ImageCreateInfo;

    fn deref(&self) -> &vk::ImageCreateInfo {
        &self.inner
    }
}

impl VkObjectBuildableCI for ImageCI {
    type ObjectType = (vk::Image, vk::MemoryRequirements);

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType> {

        let image = unsafe {
            device.logic.handle.create_image(self, None)
                .map_err(|_| VkError::create("Image"))?
        };

        let requirement = unsafe {
            device.logic.handle.get_image_memory_requirements(image)
        };

        Ok((image, requirement))
    }
}

impl ImageCI {

    pub fn new(r#type: vk::ImageType, format: vk::Format, dimension: vk::Extent3D) -> ImageCI {

        ImageCI {
            inner: vk::ImageCreateInfo {
                image_type: r#type,
                format,
                extent: dimension,
                ..ImageCI::default_ci()
            },
        }
    }

    pub fn new_2d(format: vk::Format, dimension: vk::Extent2D) -> ImageCI {

        let extent = vk::Extent3D {
            width : dimension.width,
            height: dimension.height,
            depth : 1,
        };

        ImageCI::new(vk::ImageType::TYPE_2D, format, extent)
    }

    #[inline(always)]
    pub fn usages(mut self, flags: vk::ImageUsageFlags) -> ImageCI {
        self.inner.usage = flags; self
    }

    #[inline(always)]
    pub fn tiling(mut self, tiling: vk::ImageTiling) -> ImageCI {
        self.inner.tiling = tiling; self
    }

    #[inline(always)]
    pub fn samples(mut self, count: vk::SampleCountFlags) -> ImageCI {
        self.inner.samples = count; self
    }
}

impl VkObjectDiscardable for vk::Image {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_image(self, None);
        }
    }
}

impl VkObjectBindable for vk::Image {

    fn bind(self, device: &VkDevice, memory: vk::DeviceMemory, offset: vkbytes) -> VkResult<()> {
        unsafe {
            device.logic.handle.bind_image_memory(self, memory, offset)
                .map_err(|_| VkError::device("Binding Image Memory"))
        }
    }
}
// ----------------------------------------------------------------------------------------------

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vk::ImageViewCreateInfo.
#[derive(Debug, Clone)]
pub struct ImageViewCI {
    inner: vk::ImageViewCreateInfo,
}

impl VulkanCI<vk::ImageViewCreateInfo> for ImageViewCI {

    fn default_ci() -> vk::ImageViewCreateInfo {

        vk::ImageViewCreateInfo {
            s_type: vk::StructureType::IMAGE_VIEW_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::ImageViewCreateFlags::empty(),
            image : vk::Image::null(),
            view_type: vk::ImageViewType::TYPE_2D,
            format: vk::Format::UNDEFINED,
            components: vk::ComponentMapping {
                r: vk::ComponentSwizzle::R,
                g: vk::ComponentSwizzle::G,
                b: vk::ComponentSwizzle::B,
                a: vk::ComponentSwizzle::A,
            },
            subresource_range: vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            },
        }
    }
}

impl Deref for ImageViewCI {
    type Target = vk::ImageViewCreateInfo;

    fn deref(&self) -> &vk::ImageViewCreateInfo {
        &self.inner
    }
}

impl VkObjectBuildableCI for ImageViewCI {
    type ObjectType = vk::ImageView;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType> {

        let view = unsafe {
            device.logic.handle.create_image_view(self, None)
                .map_err(|_| VkError::create("Image View"))?
        };
        Ok(view)
    }
}

impl ImageViewCI {

    pub fn new(image: vk::Image, r#type: vk::ImageViewType, format: vk::Format) -> ImageViewCI {

        ImageViewCI {
            inner: vk::ImageViewCreateInfo {
                image, format,
                view_type: r#type,
                ..ImageViewCI::default_ci()
            },
        }
    }

    #[inline(always)]
    pub fn aspect_mask(mut self, aspect: vk::ImageAspectFlags) -> ImageViewCI {
        self.inner.subresource_range.aspect_mask = aspect; self
    }

    #[inline(always)]
    pub fn sub_range(mut self, range: vk::ImageSubresourceRange) -> ImageViewCI {
        self.inner.subresource_range = range; self
    }
}

impl VkObjectDiscardable for vk::ImageView {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_image_view(self, None);
        }
    }
}
// ----------------------------------------------------------------------------------------------
