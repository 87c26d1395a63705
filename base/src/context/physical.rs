
use ash::vk;
use ash::version::InstanceV1_0;

use crate::context::instance::VkInstance;
use crate::utils::cast::{chars2string, chars2cstring};
use crate::error::{VkResult, VkError};

use std::ffi::CString;

/// The configuration parameters used in the selection of `vk::PhysicalDevice`.
#[derive(Debug, Clone)]
pub struct PhysicalDevConfig {

    pub print_device_properties: bool,
    pub device_type_preference: vk::PhysicalDeviceType,

    pub print_available_extensions: bool,
    pub request_extensions: Vec<CString>,

    pub request_features: vk::PhysicalDeviceFeatures,
}

impl Default for PhysicalDevConfig {

    fn default() -> PhysicalDevConfig {

        PhysicalDevConfig {
            print_device_properties: false,
            device_type_preference: vk::PhysicalDeviceType::DISCRETE_GPU,

            print_available_extensions: false,
            request_extensions: vec![
                CString::new("VK_KHR_swapchain").expect("Invalid extension name"),
            ],

            request_features: vk::PhysicalDeviceFeatures::default(),
        }
    }
}

/// Wrapper class for `vk::PhysicalDevice`.
pub struct VkPhysicalDevice {

    pub handle: vk::PhysicalDevice,
    pub memories: vk::PhysicalDeviceMemoryProperties,
    pub depth_format: vk::Format,

    pub limits: vk::PhysicalDeviceLimits,

    config: PhysicalDevConfig,
}

impl VkPhysicalDevice {

    pub(crate) fn new(instance: &VkInstance, config: PhysicalDevConfig) -> VkResult<VkPhysicalDevice> {

        let alternative_devices = VkPhysicalDevice::query_phy_devices(instance, &config)?;

        let mut selected_device = None;

        for phy_device in alternative_devices.into_iter() {

            // make sure all requested extensions are supported by device.
            if is_all_extension_support(instance, &phy_device, &config)? == false {
                continue
            }

            if config.print_device_properties {
                print_device_properties(&phy_device.property);
            }

            selected_device = Some(phy_device);
            break
        }

        if let Some(phy_device) = selected_device {

            let memories = unsafe {
                instance.handle.get_physical_device_memory_properties(phy_device.handle)
            };

            let depth_format = query_depth_format(instance, &phy_device)?;

            let dst_device = VkPhysicalDevice {
                handle: phy_device.handle,
                limits: phy_device.property.limits,
                config, memories, depth_format,
            };

            Ok(dst_device)
        } else {

            Err(VkError::other("Failed to find supportive Vulkan device."))
        }
    }

    fn query_phy_devices(instance: &VkInstance, config: &PhysicalDevConfig) -> VkResult<Vec<PhyDeviceTmp>> {

        let alternative_devices = unsafe {
            instance.handle.enumerate_physical_devices()
                .or(Err(VkError::query("Physical Device")))?
        };

        let mut alternative_devices: Vec<PhyDeviceTmp> = alternative_devices.into_iter().map(|phy_device| {

            let property = unsafe {
                instance.handle.get_physical_device_properties(phy_device)
            };

            PhyDeviceTmp { handle: phy_device, property }
        }).collect();

        // sort available devices by their device type, preferred type first.
        alternative_devices.sort_by(|dev1, dev2| {
            use std::cmp::Ordering;

            if dev1.property.device_type == config.device_type_preference {
                Ordering::Less
            } else if dev2.property.device_type == config.device_type_preference {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });

        Ok(alternative_devices)
    }

    pub(crate) fn enable_features(&self) -> &vk::PhysicalDeviceFeatures {
        &self.config.request_features
    }

    pub(crate) fn enable_extensions(&self) -> &Vec<CString> {
        &self.config.request_extensions
    }
}

struct PhyDeviceTmp {

    handle: vk::PhysicalDevice,
    property: vk::PhysicalDeviceProperties,
}

fn is_all_extension_support(instance: &VkInstance, phy_device: &PhyDeviceTmp, config: &PhysicalDevConfig) -> VkResult<bool> {

    let query_extensions = unsafe {
        instance.handle.enumerate_device_extension_properties(phy_device.handle)
            .or(Err(VkError::query("Device Extensions")))?
    };

    let available_extensions: Vec<CString> = query_extensions.into_iter().map(|extension| {
        chars2cstring(&extension.extension_name)
    }).collect();

    if config.print_available_extensions {

        println!("[Info] available extensions for {}:", chars2string(&phy_device.property.device_name));

        available_extensions.iter().for_each(|extension| {
            println!("\t{:?}", extension)
        });
    }

    let result = config.request_extensions.iter().all(|request_extension| {
        available_extensions.contains(request_extension)
    });
    Ok(result)
}

fn print_device_properties(property: &vk::PhysicalDeviceProperties) {

    let device_name = chars2string(&property.device_name);
    println!("[Info] Using device: {}", &device_name);

    use ash::{vk_version_major, vk_version_minor, vk_version_patch};
    let (major, minor, patch) = (
        vk_version_major!(property.api_version),
        vk_version_minor!(property.api_version),
        vk_version_patch!(property.api_version),
    );
    println!("[Info] Device API version: {}.{}.{}", major, minor, patch);

    let device_type = match property.device_type {
        | vk::PhysicalDeviceType::CPU            => "CPU",
        | vk::PhysicalDeviceType::INTEGRATED_GPU => "Integrated GPU",
        | vk::PhysicalDeviceType::DISCRETE_GPU   => "Discrete GPU",
        | vk::PhysicalDeviceType::VIRTUAL_GPU    => "Virtual GPU",
        | _ => "Unknown",
    };
    println!("[Info] Device Type: {}", device_type);
}

fn query_depth_format(instance: &VkInstance, phy_device: &PhyDeviceTmp) -> VkResult<vk::Format> {

    // since all depth formats may be optional, we need to find a suitable depth format to use.
    // start with the highest precision packed format.
    let candidates = [
        vk::Format::D32_SFLOAT_S8_UINT,
        vk::Format::D32_SFLOAT,
        vk::Format::D24_UNORM_S8_UINT,
        vk::Format::D16_UNORM_S8_UINT,
        vk::Format::D16_UNORM,
    ];

    for &format in candidates.iter() {
        let format_properties = unsafe {
            instance.handle.get_physical_device_format_properties(phy_device.handle, format)
        };

        // format must support depth stencil attachment for optimal tiling.
        if format_properties.optimal_tiling_features.contains(vk::FormatFeatureFlags::DEPTH_STENCIL_ATTACHMENT) {
            return Ok(format)
        }
    }

    Err(VkError::unsupported("Depth stencil format"))
}
