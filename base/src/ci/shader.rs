
//! Types which simplify the creation of Vulkan shader objects.

use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::{VkDevice, VkObjectDiscardable};
use crate::ci::VulkanCI;
use crate::error::{VkResult, VkError};

use std::ffi::CString;
use std::ptr;

// ---------------------------------------------------------------------------------------------------
/// Wrapper class for vk::ShaderModuleCreateInfo.
///
/// The shader byte code must already be valid SPIR-V(use `VkShaderCompiler` for runtime GLSL).
#[derive(Debug, Clone)]
pub struct ShaderModuleCI {

    inner: vk::ShaderModuleCreateInfo,

    codes: Vec<u8>,
}

impl VulkanCI<vk::ShaderModuleCreateInfo> for ShaderModuleCI {

    fn default_ci() -> vk::ShaderModuleCreateInfo {

        vk::ShaderModuleCreateInfo {
            s_type    : vk::StructureType::SHADER_MODULE_CREATE_INFO,
            p_next    : ptr::null(),
            flags     : vk::ShaderModuleCreateFlags::empty(),
            code_size : 0,
            p_code    : ptr::null(),
        }
    }
}

impl ShaderModuleCI {

    pub fn new(codes: Vec<u8>) -> ShaderModuleCI {

        ShaderModuleCI {
            inner: ShaderModuleCI::default_ci(),
            codes,
        }
    }

    pub fn build(&self, device: &VkDevice) -> VkResult<vk::ShaderModule> {

        let module_ci = vk::ShaderModuleCreateInfo {
            code_size: self.codes.len(),
            p_code   : self.codes.as_ptr() as _,
            ..self.inner
        };

        let module = unsafe {
            device.logic.handle.create_shader_module(&module_ci, None)
                .or(Err(VkError::create("Shader Module")))?
        };
        Ok(module)
    }
}

impl VkObjectDiscardable for vk::ShaderModule {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_shader_module(self, None);
        }
    }
}
// ---------------------------------------------------------------------------------------------------

// ---------------------------------------------------------------------------------------------------
/// Wrapper class for vk::PipelineShaderStageCreateInfo.
#[derive(Debug, Clone)]
pub struct ShaderStageCI {

    inner: vk::PipelineShaderStageCreateInfo,

    main: CString,
}

impl VulkanCI<vk::PipelineShaderStageCreateInfo> for ShaderStageCI {

    fn default_ci() -> vk::PipelineShaderStageCreateInfo {

        vk::PipelineShaderStageCreateInfo {
            s_type : vk::StructureType::PIPELINE_SHADER_STAGE_CREATE_INFO,
            p_next : ptr::null(),
            flags  : vk::PipelineShaderStageCreateFlags::empty(),
            p_name : ptr::null(),
            stage  : vk::ShaderStageFlags::empty(),
            module : vk::ShaderModule::null(),
            p_specialization_info: ptr::null(),
        }
    }
}

impl ShaderStageCI {

    pub fn new(stage: vk::ShaderStageFlags, module: vk::ShaderModule) -> ShaderStageCI {

        ShaderStageCI {
            inner: vk::PipelineShaderStageCreateInfo {
                stage, module,
                ..ShaderStageCI::default_ci()
            },
            main: CString::new("main").expect("Invalid name of main func in shader."),
        }
    }

    pub fn main(mut self, name: impl AsRef<str>) -> ShaderStageCI {
        self.main = CString::new(name.as_ref().to_owned())
            .expect("Invalid name of main func in shader."); self
    }

    pub(crate) fn value(&self) -> vk::PipelineShaderStageCreateInfo {

        vk::PipelineShaderStageCreateInfo {
            p_name: self.main.as_ptr(),
            ..self.inner
        }
    }
}
// ---------------------------------------------------------------------------------------------------
