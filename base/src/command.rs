
pub use self::recorder::VkCmdRecorder;
pub use self::graphics::{IGraphics, CmdGraphicsApi};

mod recorder;
mod graphics;


use ash::vk;

pub trait VkCommandType {
    const BIND_POINT: vk::PipelineBindPoint;
}
