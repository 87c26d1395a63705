
//! Platform specific surface bridging between winit and Vulkan.

use ash::vk;
use ash::version::{EntryV1_0, InstanceV1_0};

use std::ffi::CStr;
use std::ptr;

/// Get the name of the surface extension for the compiling platform.
#[cfg(target_os = "windows")]
pub fn platform_surface_names() -> &'static CStr {
    ash::extensions::khr::Win32Surface::name()
}

#[cfg(all(unix, not(target_os = "android"), not(target_os = "macos")))]
pub fn platform_surface_names() -> &'static CStr {
    ash::extensions::khr::XlibSurface::name()
}

#[cfg(target_os = "macos")]
pub fn platform_surface_names() -> &'static CStr {
    ash::extensions::mvk::MacOSSurface::name()
}

/// Create a `vk::SurfaceKHR` object for the window of the compiling platform.
#[cfg(target_os = "windows")]
pub unsafe fn generate_surface<E: EntryV1_0, I: InstanceV1_0>(entry: &E, instance: &I, window: &winit::Window) -> Result<vk::SurfaceKHR, vk::Result> {

    use winapi::shared::windef::HWND;
    use winapi::um::libloaderapi::GetModuleHandleW;
    use winit::os::windows::WindowExt;

    let hwnd = window.get_hwnd() as HWND;
    let hinstance = GetModuleHandleW(ptr::null()) as *const std::os::raw::c_void;

    let win32_ci = vk::Win32SurfaceCreateInfoKHR {
        s_type: vk::StructureType::WIN32_SURFACE_CREATE_INFO_KHR,
        p_next: ptr::null(),
        flags : Default::default(),
        hinstance,
        hwnd: hwnd as *const std::os::raw::c_void,
    };

    let surface_loader = ash::extensions::khr::Win32Surface::new(entry, instance);
    surface_loader.create_win32_surface(&win32_ci, None)
}

#[cfg(all(unix, not(target_os = "android"), not(target_os = "macos")))]
pub unsafe fn generate_surface<E: EntryV1_0, I: InstanceV1_0>(entry: &E, instance: &I, window: &winit::Window) -> Result<vk::SurfaceKHR, vk::Result> {

    use winit::os::unix::WindowExt;

    let x11_display = window.get_xlib_display().unwrap();
    let x11_window  = window.get_xlib_window().unwrap();

    let x11_ci = vk::XlibSurfaceCreateInfoKHR {
        s_type: vk::StructureType::XLIB_SURFACE_CREATE_INFO_KHR,
        p_next: ptr::null(),
        flags : Default::default(),
        window: x11_window as vk::Window,
        dpy   : x11_display as *mut vk::Display,
    };

    let surface_loader = ash::extensions::khr::XlibSurface::new(entry, instance);
    surface_loader.create_xlib_surface(&x11_ci, None)
}

#[cfg(target_os = "macos")]
pub unsafe fn generate_surface<E: EntryV1_0, I: InstanceV1_0>(entry: &E, instance: &I, window: &winit::Window) -> Result<vk::SurfaceKHR, vk::Result> {

    use cocoa::appkit::{NSView, NSWindow};
    use cocoa::base::id as cocoa_id;
    use metal::CoreAnimationLayer;
    use objc::runtime::YES;
    use winit::os::macos::WindowExt;

    use std::mem;

    let wnd: cocoa_id = mem::transmute(window.get_nswindow());

    let layer = CoreAnimationLayer::new();
    layer.set_edge_antialiasing_mask(0);
    layer.set_presents_with_transaction(false);
    layer.remove_all_animations();

    let view = wnd.contentView();

    layer.set_contents_scale(view.backingScaleFactor());
    view.setLayer(mem::transmute(layer.as_ref()));
    view.setWantsLayer(YES);

    let macos_ci = vk::MacOSSurfaceCreateInfoMVK {
        s_type: vk::StructureType::MACOS_SURFACE_CREATE_INFO_M,
        p_next: ptr::null(),
        flags : Default::default(),
        p_view: window.get_nsview() as *const std::os::raw::c_void,
    };

    let surface_loader = ash::extensions::mvk::MacOSSurface::new(entry, instance);
    surface_loader.create_mac_os_surface_mvk(&macos_ci, None)
}
