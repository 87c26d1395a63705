
//! Types which simplify the creation of Vulkan pipeline objects.

pub use self::renderpass::{RenderPassCI, RenderPassBI};
pub use self::renderpass::{AttachmentDescCI, SubpassDescCI, SubpassDependencyCI};
pub use self::state::{VertexInputSCI, InputAssemblySCI, RasterizationSCI};
pub use self::state::{ColorBlendSCI, BlendAttachmentSCI, ViewportSCI};
pub use self::state::{DepthStencilSCI, MultisampleSCI, DynamicSCI};

mod renderpass;
mod state;


use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::{VkDevice, VkObjectDiscardable};
use crate::ci::{VulkanCI, VkObjectBuildableCI};
use crate::ci::shader::ShaderStageCI;
use crate::error::{VkResult, VkError};

use std::ptr;
use std::ops::Deref;

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vk::PipelineLayoutCreateInfo.
#[derive(Debug, Clone)]
pub struct PipelineLayoutCI {

    inner: vk::PipelineLayoutCreateInfo,
    set_layouts   : Vec<vk::DescriptorSetLayout>,
    push_constants: Vec<vk::PushConstantRange>,
}

impl VulkanCI<vk::PipelineLayoutCreateInfo> for PipelineLayoutCI {

    fn default_ci() -> vk::PipelineLayoutCreateInfo {

        vk::PipelineLayoutCreateInfo {
            s_type: vk::StructureType::PIPELINE_LAYOUT_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::PipelineLayoutCreateFlags::empty(),
            set_layout_count: 0,
            p_set_layouts   : ptr::null(),
            push_constant_range_count: 0,
            p_push_constant_ranges   : ptr::null(),
        }
    }
}

impl Deref for PipelineLayoutCI {
    type Target = vk::PipelineLayoutCreateInfo;

    fn deref(&self) -> &vk::PipelineLayoutCreateInfo {
        &self.inner
    }
}

impl VkObjectBuildableCI for PipelineLayoutCI {
    type ObjectType = vk::PipelineLayout;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType> {

        let layout = unsafe {
            device.logic.handle.create_pipeline_layout(self, None)
                .map_err(|_| VkError::create("Pipeline Layout"))?
        };
        Ok(layout)
    }
}

impl PipelineLayoutCI {

    pub fn new() -> PipelineLayoutCI {

        PipelineLayoutCI {
            inner: PipelineLayoutCI::default_ci(),
            set_layouts   : Vec::new(),
            push_constants: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn add_set_layout(mut self, set_layout: vk::DescriptorSetLayout) -> PipelineLayoutCI {

        self.set_layouts.push(set_layout);
        self.inner.set_layout_count = self.set_layouts.len() as _;
        self.inner.p_set_layouts    = self.set_layouts.as_ptr(); self
    }

    #[inline(always)]
    pub fn add_push_constants(mut self, range: vk::PushConstantRange) -> PipelineLayoutCI {

        self.push_constants.push(range);
        self.inner.push_constant_range_count = self.push_constants.len() as _;
        self.inner.p_push_constant_ranges    = self.push_constants.as_ptr(); self
    }
}

impl VkObjectDiscardable for vk::PipelineLayout {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_pipeline_layout(self, None);
        }
    }
}
// ----------------------------------------------------------------------------------------------

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vk::GraphicsPipelineCreateInfo.
///
/// Unset pipeline states fall back to a usable default, so a pipeline only has to
/// override the states it cares about.
pub struct GraphicsPipelineCI {

    render_pass: vk::RenderPass,
    layout: vk::PipelineLayout,

    shader_stages: Vec<ShaderStageCI>,

    vertex_input  : VertexInputSCI,
    input_assembly: InputAssemblySCI,
    rasterization : RasterizationSCI,
    color_blend   : ColorBlendSCI,
    viewport      : ViewportSCI,
    depth_stencil : DepthStencilSCI,
    multisample   : MultisampleSCI,
    dynamics      : DynamicSCI,
}

impl GraphicsPipelineCI {

    pub fn new(render_pass: vk::RenderPass, layout: vk::PipelineLayout) -> GraphicsPipelineCI {

        GraphicsPipelineCI {
            render_pass, layout,
            shader_stages : Vec::new(),
            vertex_input  : VertexInputSCI::new(),
            input_assembly: InputAssemblySCI::new(),
            rasterization : RasterizationSCI::new(),
            color_blend   : ColorBlendSCI::new().add_attachment(BlendAttachmentSCI::new()),
            viewport      : ViewportSCI::new(),
            depth_stencil : DepthStencilSCI::new(),
            multisample   : MultisampleSCI::new(),
            dynamics      : DynamicSCI::new(),
        }
    }

    pub fn set_shaders(&mut self, cis: Vec<ShaderStageCI>) {
        self.shader_stages = cis;
    }

    pub fn set_vertex_input(&mut self, sci: VertexInputSCI) {
        self.vertex_input = sci;
    }

    pub fn set_input_assembly(&mut self, sci: InputAssemblySCI) {
        self.input_assembly = sci;
    }

    pub fn set_rasterization(&mut self, sci: RasterizationSCI) {
        self.rasterization = sci;
    }

    pub fn set_color_blend(&mut self, sci: ColorBlendSCI) {
        self.color_blend = sci;
    }

    pub fn set_viewport(&mut self, sci: ViewportSCI) {
        self.viewport = sci;
    }

    pub fn set_depth_stencil(&mut self, sci: DepthStencilSCI) {
        self.depth_stencil = sci;
    }

    pub fn set_multisample(&mut self, sci: MultisampleSCI) {
        self.multisample = sci;
    }

    pub fn set_dynamic(&mut self, sci: DynamicSCI) {
        self.dynamics = sci;
    }
}

impl VkObjectBuildableCI for GraphicsPipelineCI {
    type ObjectType = vk::Pipeline;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType> {

        let shader_stages: Vec<vk::PipelineShaderStageCreateInfo> = self.shader_stages.iter()
            .map(|stage| stage.value()).collect();

        let pipeline_ci = vk::GraphicsPipelineCreateInfo {
            s_type: vk::StructureType::GRAPHICS_PIPELINE_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::PipelineCreateFlags::empty(),
            stage_count: shader_stages.len() as _,
            p_stages   : shader_stages.as_ptr(),
            p_vertex_input_state  : self.vertex_input.deref(),
            p_input_assembly_state: self.input_assembly.deref(),
            p_tessellation_state  : ptr::null(),
            p_viewport_state      : self.viewport.deref(),
            p_rasterization_state : self.rasterization.deref(),
            p_multisample_state   : self.multisample.deref(),
            p_depth_stencil_state : self.depth_stencil.deref(),
            p_color_blend_state   : self.color_blend.deref(),
            p_dynamic_state       : self.dynamics.deref(),
            layout: self.layout,
            render_pass: self.render_pass,
            subpass: 0,
            base_pipeline_handle: vk::Pipeline::null(),
            base_pipeline_index : -1,
        };

        let mut pipelines = unsafe {
            device.logic.handle.create_graphics_pipelines(vk::PipelineCache::null(), &[pipeline_ci], None)
                .map_err(|_| VkError::create("Graphics Pipeline"))?
        };

        Ok(pipelines.remove(0))
    }
}

impl VkObjectDiscardable for vk::Pipeline {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_pipeline(self, None);
        }
    }
}
// ----------------------------------------------------------------------------------------------

// ----------------------------------------------------------------------------------------------
/// Wrapper class for vk::FramebufferCreateInfo.
#[derive(Debug, Clone)]
pub struct FramebufferCI {

    inner: vk::FramebufferCreateInfo,
    attachments: Vec<vk::ImageView>,
}

impl VulkanCI<vk::FramebufferCreateInfo> for FramebufferCI {

    fn default_ci() -> vk::FramebufferCreateInfo {

        vk::FramebufferCreateInfo {
            s_type: vk::StructureType::FRAMEBUFFER_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::FramebufferCreateFlags::empty(),
            render_pass: vk::RenderPass::null(),
            attachment_count: 0,
            p_attachments   : ptr::null(),
            width : 0,
            height: 0,
            layers: 1,
        }
    }
}

impl Deref for FramebufferCI {
    type Target = vk::FramebufferCreateInfo;

    fn deref(&self) -> &vk::FramebufferCreateInfo {
        &self.inner
    }
}

impl VkObjectBuildableCI for FramebufferCI {
    type ObjectType = vk::Framebuffer;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType> {

        let framebuffer = unsafe {
            device.logic.handle.create_framebuffer(self, None)
                .map_err(|_| VkError::create("Framebuffer"))?
        };
        Ok(framebuffer)
    }
}

impl FramebufferCI {

    pub fn new(render_pass: vk::RenderPass, dimension: vk::Extent3D) -> FramebufferCI {

        FramebufferCI {
            inner: vk::FramebufferCreateInfo {
                render_pass,
                width : dimension.width,
                height: dimension.height,
                layers: dimension.depth,
                ..FramebufferCI::default_ci()
            },
            attachments: Vec::new(),
        }
    }

    pub fn new_2d(render_pass: vk::RenderPass, dimension: vk::Extent2D) -> FramebufferCI {

        let extent = vk::Extent3D {
            width : dimension.width,
            height: dimension.height,
            depth : 1,
        };

        FramebufferCI::new(render_pass, extent)
    }

    #[inline(always)]
    pub fn add_attachment(mut self, attachment: vk::ImageView) -> FramebufferCI {

        self.attachments.push(attachment);
        self.inner.attachment_count = self.attachments.len() as _;
        self.inner.p_attachments    = self.attachments.as_ptr(); self
    }
}

impl VkObjectDiscardable for vk::Framebuffer {

    fn discard_by(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_framebuffer(self, None);
        }
    }
}
// ----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn framebuffer_ci_attachments() {

        let ci = FramebufferCI::new_2d(vk::RenderPass::null(), vk::Extent2D { width: 1280, height: 720 })
            .add_attachment(vk::ImageView::null())
            .add_attachment(vk::ImageView::null());

        assert_eq!(ci.attachment_count, 2);
        assert_eq!(ci.width , 1280);
        assert_eq!(ci.height, 720);
        assert_eq!(ci.layers, 1);
    }
}
