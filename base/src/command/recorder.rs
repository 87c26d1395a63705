
use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::VkLogicalDevice;
use crate::error::{VkResult, VkError};

use std::marker::PhantomData;
use std::ptr;

/// A typed helper to record a command buffer.
///
/// The type parameter restricts the commands available on this recorder to the
/// ones valid for that queue type.
pub struct VkCmdRecorder<'a, T> {

    phantom_marker: PhantomData<T>,

    pub(super) device: &'a VkLogicalDevice,
    pub(super) command: vk::CommandBuffer,
    usage: vk::CommandBufferUsageFlags,
}

impl<'a, T> VkCmdRecorder<'a, T> {

    pub fn new(device: &'a VkLogicalDevice, command: vk::CommandBuffer) -> VkCmdRecorder<'a, T> {

        VkCmdRecorder {
            device, command,
            usage: vk::CommandBufferUsageFlags::empty(),
            phantom_marker: PhantomData,
        }
    }

    pub fn set_usage(&mut self, flags: vk::CommandBufferUsageFlags) {
        self.usage = flags;
    }

    pub fn begin_record(&self) -> VkResult<&VkCmdRecorder<'a, T>> {

        let begin_ci = vk::CommandBufferBeginInfo {
            s_type: vk::StructureType::COMMAND_BUFFER_BEGIN_INFO,
            p_next: ptr::null(),
            flags : self.usage,
            p_inheritance_info: ptr::null(),
        };

        unsafe {
            self.device.handle.begin_command_buffer(self.command, &begin_ci)
                .or(Err(VkError::device("Begin Command Buffer")))?;
        }
        Ok(self)
    }

    pub fn end_record(&self) -> VkResult<()> {

        unsafe {
            self.device.handle.end_command_buffer(self.command)
                .or(Err(VkError::device("End Command Buffer")))?;
        }

        Ok(())
    }
}
