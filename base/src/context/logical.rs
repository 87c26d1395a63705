
use ash::vk;
use ash::version::{DeviceV1_0, InstanceV1_0};

use crate::context::instance::VkInstance;
use crate::context::physical::VkPhysicalDevice;
use crate::error::{VkResult, VkError};
use crate::{vkuint, vkfloat};

use std::ptr;

/// The configuration parameters used in the initialization of `vk::Device`.
#[derive(Debug, Clone)]
pub struct LogicDevConfig {

    pub request_queues: vk::QueueFlags,
}

impl Default for LogicDevConfig {

    fn default() -> LogicDevConfig {

        LogicDevConfig {
            request_queues: vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER,
        }
    }
}

/// Wrapper class for `vk::Device` and the queues created with it.
pub struct VkLogicalDevice {

    pub handle: ash::Device,
    pub queues: QueueFamilies,
}

pub struct QueueFamilies {
    pub graphics: VkQueue,
    pub transfer: VkQueue,
}

#[derive(Debug, Clone)]
pub struct VkQueue {
    pub handle: vk::Queue,
    pub family_index: vkuint,
}

impl Default for VkQueue {

    fn default() -> VkQueue {
        VkQueue {
            handle: vk::Queue::null(),
            family_index: 0,
        }
    }
}

impl VkLogicalDevice {

    pub fn new(instance: &VkInstance, phy: &VkPhysicalDevice, config: LogicDevConfig) -> VkResult<VkLogicalDevice> {

        let family_properties = unsafe {
            instance.handle.get_physical_device_queue_family_properties(phy.handle)
        };

        let graphics_family = pick_queue_family(&family_properties, vk::QueueFlags::GRAPHICS)
            .ok_or(VkError::unsupported("Graphics Queue"))?;

        // prefer a dedicated transfer family, or fall back to the graphics one.
        let transfer_family = if config.request_queues.contains(vk::QueueFlags::TRANSFER) {
            pick_dedicated_family(&family_properties, vk::QueueFlags::TRANSFER)
                .or(pick_queue_family(&family_properties, vk::QueueFlags::TRANSFER))
                .unwrap_or(graphics_family)
        } else {
            graphics_family
        };

        let mut request_families = vec![graphics_family];
        if transfer_family != graphics_family {
            request_families.push(transfer_family);
        }

        const DEFAULT_PRIORITY: vkfloat = 1.0;

        let queue_cis: Vec<vk::DeviceQueueCreateInfo> = request_families.iter().map(|&family_index| {
            vk::DeviceQueueCreateInfo {
                s_type: vk::StructureType::DEVICE_QUEUE_CREATE_INFO,
                p_next: ptr::null(),
                flags : vk::DeviceQueueCreateFlags::empty(),
                queue_family_index: family_index,
                queue_count       : 1,
                p_queue_priorities: &DEFAULT_PRIORITY,
            }
        }).collect();

        use crate::utils::cast::cstrings2ptrs;
        let enable_layer_names = cstrings2ptrs(&instance.enable_layer_names);
        let enable_extension_names = cstrings2ptrs(phy.enable_extensions());

        let device_ci = vk::DeviceCreateInfo {
            s_type                     : vk::StructureType::DEVICE_CREATE_INFO,
            p_next                     : ptr::null(),
            flags                      : vk::DeviceCreateFlags::empty(),
            queue_create_info_count    : queue_cis.len() as _,
            p_queue_create_infos       : queue_cis.as_ptr(),
            enabled_layer_count        : enable_layer_names.len() as _,
            pp_enabled_layer_names     : enable_layer_names.as_ptr(),
            enabled_extension_count    : enable_extension_names.len() as _,
            pp_enabled_extension_names : enable_extension_names.as_ptr(),
            p_enabled_features         : phy.enable_features(),
        };

        let handle = unsafe {
            instance.handle.create_device(phy.handle, &device_ci, None)
                .or(Err(VkError::create("Logical Device")))?
        };

        let queues = QueueFamilies {
            graphics: VkQueue {
                handle: unsafe { handle.get_device_queue(graphics_family, 0) },
                family_index: graphics_family,
            },
            transfer: VkQueue {
                handle: unsafe { handle.get_device_queue(transfer_family, 0) },
                family_index: transfer_family,
            },
        };

        debug_assert_ne!(queues.graphics.handle, vk::Queue::null());
        debug_assert_ne!(queues.transfer.handle, vk::Queue::null());

        let device = VkLogicalDevice { handle, queues };
        Ok(device)
    }

    pub(crate) fn discard(&self) {

        unsafe {
            self.handle.destroy_device(None);
        }
    }
}

fn pick_queue_family(families: &[vk::QueueFamilyProperties], request: vk::QueueFlags) -> Option<vkuint> {

    families.iter().position(|family| {
        family.queue_count > 0 && family.queue_flags.contains(request)
    }).map(|index| index as vkuint)
}

fn pick_dedicated_family(families: &[vk::QueueFamilyProperties], request: vk::QueueFlags) -> Option<vkuint> {

    families.iter().position(|family| {
        family.queue_count > 0 && family.queue_flags == request
    }).map(|index| index as vkuint)
}
