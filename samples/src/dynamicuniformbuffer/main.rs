
//!
//! Vulkan Demo - Dynamic uniform buffers
//!
//! Instead of using one uniform buffer per-object, this demo allocates one big uniform buffer
//! with respect to the alignment reported by the device via minUniformBufferOffsetAlignment that
//! contains all matrices for the objects in the scene.
//!
//! The used descriptor type vk::DescriptorType::UNIFORM_BUFFER_DYNAMIC allows to set a dynamic
//! offset used to pass data from the single uniform buffer to the connected shader binding point.
//!

mod data;
mod example;

const WINDOW_WIDTH : u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const WINDOW_TITLE: &'static str = "Vulkan Demo - Dynamic uniform buffers";

fn main() {

    use vkhost::{WindowConfig, WindowContext};
    use vkhost::context::VulkanContext;
    use vkhost::ProcPipeline;

    let mut win_config = WindowConfig::default();
    win_config.dimension.width  = WINDOW_WIDTH;
    win_config.dimension.height = WINDOW_HEIGHT;
    win_config.title = WINDOW_TITLE.to_string();

    let window = WindowContext::new(win_config)
        .expect("Error when creating Window Context");

    let mut vk_context = VulkanContext::new(&window)
        .build().expect("Error when creating Vulkan Context");

    let app = example::VulkanExample::new(&mut vk_context)
        .expect("Error when initializing application");

    let entry = ProcPipeline::new(window, vk_context)
        .expect("Error when preparing render loop");

    match entry.launch(app) {
        | Ok(_) => {},
        | Err(e) => {
            eprintln!("{}", e)
        },
    }
}
