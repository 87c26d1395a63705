
pub use self::workflow::{RenderWorkflow, ProcPipeline};
pub use self::workflow::{WindowConfig, WindowContext};
pub use self::error::{VkResult, VkError, VkErrorKind};
pub use self::utils::frame::FrameAction;
pub use self::input::EventController;
pub use self::camera::FlightCamera;

pub mod context;
pub mod ci;
pub mod command;
pub mod utils;
pub mod platforms;

mod error;
mod workflow;
mod input;
mod camera;

// type alias ------------------------------------
/// unsigned integer type commonly used in vulkan(an alias type of uint32_t).
#[allow(non_camel_case_types)]
pub type vkuint = u32;
/// signed integer type used in vulkan(an alias type of int32_t).
#[allow(non_camel_case_types)]
pub type vksint = i32;
/// float type used in vulkan.
#[allow(non_camel_case_types)]
pub type vkfloat = ::std::os::raw::c_float;
/// unsigned long integer type used in vulkan.
#[allow(non_camel_case_types)]
pub type vklint = u64;
/// char type used in vulkan.
#[allow(non_camel_case_types)]
pub type vkchar = ::std::os::raw::c_char;
/// boolean type used in vulkan(an alias type of VkBool32).
#[allow(non_camel_case_types)]
pub type vkbool = ash::vk::Bool32;
/// raw pointer type used in vulkan.
#[allow(non_camel_case_types)]
pub type vkptr = *mut ::std::os::raw::c_void;
/// the number of bytes, used to measure the size of memory block(buffer, image...).
#[allow(non_camel_case_types)]
pub type vkbytes = ash::vk::DeviceSize;
// -----------------------------------------------

// math alias ------------------------------------
pub type Vec3F = vek::Vec3<f32>;
pub type Vec4F = vek::Vec4<f32>;
pub type Mat4F = vek::Mat4<f32>;
// -----------------------------------------------
