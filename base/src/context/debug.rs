
use ash::vk;

use crate::context::instance::VkInstance;
use crate::{vkptr, vkbool};
use crate::error::{VkResult, VkError};

use std::ffi::CStr;
use std::ptr;

/// The configuration parameters used in the initialization of the validation tools.
#[derive(Debug)]
pub struct ValidationConfig {

    /// `is_enable` tell if the debug utils messenger should be created.
    pub is_enable: bool,
    /// the message severity that the messenger would report for.
    pub severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    /// the message type that the messenger would report for.
    pub types: vk::DebugUtilsMessageTypeFlagsEXT,
}

impl Default for ValidationConfig {

    fn default() -> ValidationConfig {
        ValidationConfig {
            is_enable: true,
            severity:
                vk::DebugUtilsMessageSeverityFlagsEXT::WARNING |
                vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            types:
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL |
                vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION |
                vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        }
    }
}

/// the callback function used in Debug Utils.
unsafe extern "system" fn vulkan_debug_utils_callback(
    _message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    _message_type    : vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data  : *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data       : vkptr,
) -> vkbool {

    let message = CStr::from_ptr((*p_callback_data).p_message);
    println!("[Debug] {:?}", message);

    vk::FALSE
}

/// Wrapper class for the validation tools used in Vulkan.
pub struct VkDebugger {

    target: Option<DebugUtils>,
}

struct DebugUtils {

    loader: ash::extensions::ext::DebugUtils,
    messenger: vk::DebugUtilsMessengerEXT,
}

impl VkDebugger {

    pub fn new(instance: &VkInstance, config: ValidationConfig) -> VkResult<VkDebugger> {

        if config.is_enable == false {
            return Ok(VkDebugger { target: None })
        }

        let loader = ash::extensions::ext::DebugUtils::new(&instance.entry, &instance.handle);

        let messenger_ci = vk::DebugUtilsMessengerCreateInfoEXT {
            s_type: vk::StructureType::DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT,
            p_next: ptr::null(),
            flags : vk::DebugUtilsMessengerCreateFlagsEXT::empty(),
            message_severity: config.severity,
            message_type    : config.types,
            pfn_user_callback: Some(vulkan_debug_utils_callback),
            p_user_data: ptr::null_mut(),
        };

        let messenger = unsafe {
            loader.create_debug_utils_messenger(&messenger_ci, None)
                .or(Err(VkError::create("Debug Utils Messenger")))?
        };

        let debugger = VkDebugger {
            target: Some(DebugUtils { loader, messenger }),
        };
        Ok(debugger)
    }

    pub(crate) fn discard(&self) {

        if let Some(ref utils) = self.target {
            unsafe {
                utils.loader.destroy_debug_utils_messenger(utils.messenger, None);
            }
        }
    }
}
