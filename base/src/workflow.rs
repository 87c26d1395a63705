
pub use self::window::{WindowConfig, WindowContext};
pub use self::loops::ProcPipeline;

mod window;
mod loops;


use ash::vk;

use crate::context::{VkDevice, VkSwapchain};
use crate::input::EventController;
use crate::utils::frame::FrameAction;
use crate::error::VkResult;

/// The lifecycle hooks a demo implements to be driven by `ProcPipeline`.
pub trait RenderWorkflow {

    /// Called once before the render loop starts.
    fn init(&mut self, _device: &VkDevice) -> VkResult<()> {
        Ok(())
    }

    /// Render the frame for `image_index` and return the semaphore signaled when rendering completes.
    ///
    /// `device_available` is the fence signaled when the commands of this frame finish execution.
    ///
    /// `await_present` is the semaphore signaled when the presentation engine releases the acquired image.
    fn render_frame(&mut self, device: &mut VkDevice, device_available: vk::Fence, await_present: vk::Semaphore, image_index: usize, delta_time: f32) -> VkResult<vk::Semaphore>;

    /// Called after the swapchain has been recreated(e.g. on window resize).
    fn swapchain_reload(&mut self, _device: &mut VkDevice, _new_chain: &VkSwapchain) -> VkResult<()> {
        Ok(())
    }

    /// React to the events accumulated in the last frame.
    fn receive_input(&mut self, inputer: &EventController, delta_time: f32) -> FrameAction;

    /// Called once after the render loop ends. Destroy all vulkan resources here.
    fn deinit(self, device: &mut VkDevice) -> VkResult<()>;
}
