
use ash::vk;
use ash::version::DeviceV1_0;

use failure_derive::Fail;

use crate::context::instance::VkInstance;
use crate::context::device::VkDevice;
use crate::context::logical::VkQueue;
use crate::context::surface::VkSurface;
use crate::error::{VkResult, VkError};
use crate::{vkuint, vklint};

use std::ptr;

/// The configuration parameters used in the initialization of `vk::SwapchainKHR`.
#[derive(Debug, Clone)]
pub struct SwapchainConfig {

    /// `present_vsync` specifies whether to wait for the vertical blank before presenting.
    pub present_vsync: bool,
    /// `image_acquire_time` is the maximum time(in nanoseconds) to wait in `next_image`.
    pub image_acquire_time: vklint,
}

impl Default for SwapchainConfig {

    fn default() -> SwapchainConfig {
        SwapchainConfig {
            present_vsync: true,
            image_acquire_time: vklint::max_value(),
        }
    }
}

/// Wrapper class for `vk::SwapchainKHR` and its presentable images.
pub struct VkSwapchain {

    /// handle of `vk::SwapchainKHR`.
    handle: vk::SwapchainKHR,
    /// the extension loader provides functions for creation and destruction of `vk::SwapchainKHR` object.
    loader: ash::extensions::khr::Swapchain,
    /// the presentable images and their views created by the swapchain.
    pub images: Vec<SwapchainImage>,
    /// the format of the presentable images.
    pub backend_format: vk::Format,
    /// the dimension of the presentable images.
    pub dimension: vk::Extent2D,
    /// the queue used to present images.
    present_queue: VkQueue,

    config: SwapchainConfig,
}

pub struct SwapchainImage {

    /// a presentable image owned by the swapchain.
    ///
    /// It is destroyed automatically when `vk::SwapchainKHR` is destroyed.
    pub image: vk::Image,
    /// the corresponding image view.
    pub view: vk::ImageView,
}

/// The errors used to signal the caller of `next_image` or `present` about the swapchain state.
#[derive(Debug, Fail)]
pub enum SwapchainSyncError {
    #[fail(display = "No image became available within the time allowed.")]
    TimeOut,
    #[fail(display = "Swapchain does not match the surface properties exactly.")]
    SubOptimal,
    #[fail(display = "Surface has changed and is not compatible with the swapchain.")]
    SurfaceOutDate,
    #[fail(display = "Get unknown error when acquiring image.")]
    Unknown,
}

impl VkSwapchain {

    pub fn new(instance: &VkInstance, device: &VkDevice, surface: &VkSurface, config: SwapchainConfig, dimension: vk::Extent2D) -> VkResult<VkSwapchain> {

        let loader = ash::extensions::khr::Swapchain::new(&instance.handle, &device.logic.handle);
        VkSwapchain::build(loader, device, surface, config, dimension, None)
    }

    /// Recreate the swapchain after the surface has changed(e.g. the window was resized).
    pub(crate) fn rebuild(&mut self, device: &VkDevice, surface: &VkSurface, dimension: vk::Extent2D) -> VkResult<()> {

        let new_chain = VkSwapchain::build(self.loader.clone(), device, surface, self.config.clone(), dimension, Some(self.handle))?;

        // destroying the old swapchain also cleans up all its presentable images.
        self.discard(device);
        *self = new_chain;

        Ok(())
    }

    fn build(loader: ash::extensions::khr::Swapchain, device: &VkDevice, surface: &VkSurface, config: SwapchainConfig, dimension: vk::Extent2D, old_chain: Option<vk::SwapchainKHR>) -> VkResult<VkSwapchain> {

        let present_queue = query_present_queue(device, surface)
            .ok_or(VkError::other("Graphics Queue does not support to present image to platform's surface."))?;
        let swapchain_format = query_optimal_format(device, surface)?;
        let swapchain_capability = query_swapchain_capability(device, surface, dimension)?;
        let swapchain_present_mode = query_optimal_present_mode(device, surface, &config)?;

        let swapchain_ci = vk::SwapchainCreateInfoKHR {
            s_type                   : vk::StructureType::SWAPCHAIN_CREATE_INFO_KHR,
            p_next                   : ptr::null(),
            flags                    : vk::SwapchainCreateFlagsKHR::empty(),
            surface                  : surface.handle,
            min_image_count          : swapchain_capability.desired_image_count,
            image_format             : swapchain_format.color_format,
            image_color_space        : swapchain_format.color_space,
            image_extent             : swapchain_capability.swapchain_extent,
            image_array_layers       : 1,
            image_usage              : vk::ImageUsageFlags::COLOR_ATTACHMENT,
            image_sharing_mode       : vk::SharingMode::EXCLUSIVE,
            queue_family_index_count : 0,
            p_queue_family_indices   : ptr::null(),
            pre_transform            : swapchain_capability.pre_transform,
            composite_alpha          : vk::CompositeAlphaFlagsKHR::OPAQUE,
            present_mode             : swapchain_present_mode,
            // setting clipped to vk::TRUE allows the implementation to discard rendering outside of the surface area.
            clipped                  : vk::TRUE,
            old_swapchain            : old_chain.unwrap_or(vk::SwapchainKHR::null()),
        };

        let handle = unsafe {
            loader.create_swapchain(&swapchain_ci, None)
                .or(Err(VkError::create("Swapchain")))?
        };

        let images = obtain_swapchain_images(device, handle, &loader, swapchain_format.color_format)?;

        let result = VkSwapchain {
            handle, loader, present_queue, config, images,
            backend_format: swapchain_format.color_format,
            dimension: swapchain_capability.swapchain_extent,
        };

        Ok(result)
    }

    /// Acquire an available presentable image, and return the index of that image.
    ///
    /// `semaphore` is the semaphore to signal during this function, or None for no semaphore to signal.
    ///
    /// `fence` is the fence to signal during this function, or None for no fence to signal.
    pub fn next_image(&self, semaphore: Option<vk::Semaphore>, fence: Option<vk::Fence>) -> Result<vkuint, SwapchainSyncError> {

        let semaphore = semaphore.unwrap_or(vk::Semaphore::null());
        let fence = fence.unwrap_or(vk::Fence::null());

        let (image_index, is_sub_optimal) = unsafe {
            self.loader.acquire_next_image(self.handle, self.config.image_acquire_time, semaphore, fence)
                .map_err(|error| match error {
                    | vk::Result::TIMEOUT               => SwapchainSyncError::TimeOut,
                    | vk::Result::ERROR_OUT_OF_DATE_KHR => SwapchainSyncError::SurfaceOutDate,
                    | _ => SwapchainSyncError::Unknown,
                })?
        };

        if is_sub_optimal {
            Err(SwapchainSyncError::SubOptimal)
        } else {
            Ok(image_index)
        }
    }

    /// Queue an image for presentation.
    ///
    /// `wait_semaphores` specifies the semaphores to wait for before issuing the present request.
    ///
    /// `image_index` is the index of swapchain's presentable images.
    pub fn present(&self, wait_semaphores: &[vk::Semaphore], image_index: vkuint) -> Result<(), SwapchainSyncError> {

        // currently only support single swapchain and single image index.
        let present_info = vk::PresentInfoKHR {
            s_type              : vk::StructureType::PRESENT_INFO_KHR,
            p_next              : ptr::null(),
            wait_semaphore_count: wait_semaphores.len() as _,
            p_wait_semaphores   : wait_semaphores.as_ptr(),
            swapchain_count     : 1,
            p_swapchains        : &self.handle,
            p_image_indices     : &image_index,
            p_results           : ptr::null_mut(),
        };

        let is_sub_optimal = unsafe {
            self.loader.queue_present(self.present_queue.handle, &present_info)
                .map_err(|error| match error {
                    | vk::Result::ERROR_OUT_OF_DATE_KHR => SwapchainSyncError::SurfaceOutDate,
                    | _ => SwapchainSyncError::Unknown,
                })?
        };

        if is_sub_optimal {
            Err(SwapchainSyncError::SubOptimal)
        } else {
            Ok(())
        }
    }

    /// the number of the presentable images, which is also the number of frames rendered concurrently.
    pub fn frame_in_flight(&self) -> usize {
        self.images.len()
    }

    /// Destroy the `vk::SwapchainKHR` object.
    ///
    /// The swapchain must not be destroyed until all outstanding operations on its images are complete.
    pub(crate) fn discard(&self, device: &VkDevice) {

        unsafe {
            self.images.iter().for_each(|swapchain_image| {
                device.logic.handle.destroy_image_view(swapchain_image.view, None);
            });

            self.loader.destroy_swapchain(self.handle, None);
        }
    }
}


// -----------------------------------------------------------------------------------
fn query_present_queue(device: &VkDevice, surface: &VkSurface) -> Option<VkQueue> {

    // just check if graphics queue support present operation.
    if surface.query_is_family_presentable(device.phy.handle, device.logic.queues.graphics.family_index) {
        Some(device.logic.queues.graphics.clone())
    } else {
        None
    }
}

struct SwapchainFormat {
    color_format: vk::Format,
    color_space : vk::ColorSpaceKHR,
}

fn query_optimal_format(device: &VkDevice, surface: &VkSurface) -> VkResult<SwapchainFormat> {

    let available_formats = surface.query_formats(device.phy.handle)?;

    // if the surface has no preferred format, use B8G8R8A8_UNORM.
    if available_formats.len() == 1 && available_formats[0].format == vk::Format::UNDEFINED {

        let format = SwapchainFormat {
            color_format: vk::Format::B8G8R8A8_UNORM,
            color_space : available_formats[0].color_space,
        };
        return Ok(format)
    }

    let preferred = available_formats.iter().find(|candidate| {
        candidate.format == vk::Format::B8G8R8A8_UNORM
    }).or(available_formats.first())
        .ok_or(VkError::query("Surface Formats"))?;

    let format = SwapchainFormat {
        color_format: preferred.format,
        color_space : preferred.color_space,
    };
    Ok(format)
}

struct SwapchainCapability {
    desired_image_count: vkuint,
    swapchain_extent: vk::Extent2D,
    pre_transform: vk::SurfaceTransformFlagsKHR,
}

fn query_swapchain_capability(device: &VkDevice, surface: &VkSurface, dimension: vk::Extent2D) -> VkResult<SwapchainCapability> {

    let capabilities = surface.query_capabilities(device.phy.handle)?;

    // determine the number of presentable images(try to get one more than the minimum).
    let mut desired_image_count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 {
        desired_image_count = desired_image_count.min(capabilities.max_image_count);
    }

    // if the surface size is defined, the swapchain size must match it.
    let swapchain_extent = if capabilities.current_extent.width == vkuint::max_value() {
        vk::Extent2D {
            width : dimension.width
                .max(capabilities.min_image_extent.width)
                .min(capabilities.max_image_extent.width),
            height: dimension.height
                .max(capabilities.min_image_extent.height)
                .min(capabilities.max_image_extent.height),
        }
    } else {
        capabilities.current_extent
    };

    // prefer a non-rotated transform if it's supported.
    let pre_transform = if capabilities.supported_transforms.contains(vk::SurfaceTransformFlagsKHR::IDENTITY) {
        vk::SurfaceTransformFlagsKHR::IDENTITY
    } else {
        capabilities.current_transform
    };

    let capability = SwapchainCapability { desired_image_count, swapchain_extent, pre_transform };
    Ok(capability)
}

fn query_optimal_present_mode(device: &VkDevice, surface: &VkSurface, config: &SwapchainConfig) -> VkResult<vk::PresentModeKHR> {

    let available_modes = surface.query_present_modes(device.phy.handle)?;

    // the vk::PresentModeKHR::FIFO mode must always be present as per spec.
    // this mode waits for the vertical blank("v-sync").
    let result = if config.present_vsync {
        vk::PresentModeKHR::FIFO
    } else {
        // if v-sync is not requested, try to find a mailbox mode.
        // it's the lowest latency non-tearing present mode available.
        available_modes.iter().cloned().find(|&mode| {
            mode == vk::PresentModeKHR::MAILBOX
        }).or(available_modes.iter().cloned().find(|&mode| {
            mode == vk::PresentModeKHR::IMMEDIATE
        })).unwrap_or(vk::PresentModeKHR::FIFO)
    };

    Ok(result)
}

fn obtain_swapchain_images(device: &VkDevice, swapchain: vk::SwapchainKHR, loader: &ash::extensions::khr::Swapchain, format: vk::Format) -> VkResult<Vec<SwapchainImage>> {

    let image_handles = unsafe {
        loader.get_swapchain_images(swapchain)
            .or(Err(VkError::query("Swapchain Images")))?
    };

    let mut result = Vec::with_capacity(image_handles.len());

    for image_handle in image_handles.into_iter() {

        let view_ci = vk::ImageViewCreateInfo {
            s_type     : vk::StructureType::IMAGE_VIEW_CREATE_INFO,
            p_next     : ptr::null(),
            flags      : vk::ImageViewCreateFlags::empty(),
            image      : image_handle,
            view_type  : vk::ImageViewType::TYPE_2D,
            format,
            components : vk::ComponentMapping {
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
        };

        let view = unsafe {
            device.logic.handle.create_image_view(&view_ci, None)
                .or(Err(VkError::create("Image View")))?
        };

        result.push(SwapchainImage { image: image_handle, view });
    }

    Ok(result)
}
// -----------------------------------------------------------------------------------
