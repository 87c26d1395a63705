
use lazy_static::lazy_static;

use ash::vk;

use std::mem;
use std::ptr;

use vkhost::ci::buffer::BufferCI;
use vkhost::ci::pipeline::VertexInputSCI;
use vkhost::ci::vma::{VmaBuffer, VmaAllocationCI};

use vkhost::context::VkDevice;
use vkhost::utils::memory::bound_to_alignment;
use vkhost::FlightCamera;

use vkhost::{vkuint, vkbytes, vkptr, Vec3F, Vec4F, Mat4F};
use vkhost::{VkResult, VkErrorKind};

/// The number of cubes drawn from the shared dynamic uniform buffer.
pub const OBJECT_INSTANCES: usize = 15;

/// The instances are laid out on a centered x-y grid.
pub const GRID_DIMENSION: [usize; 3] = [5, 3, 1];
const GRID_SPACING: f32 = 5.0;


#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct Vertex {
    position: Vec3F,
    color   : Vec3F,
    normal  : Vec3F,
}

impl Vertex {

    pub fn input_description() -> VertexInputSCI {

        VertexInputSCI::new()
            .add_binding(vk::VertexInputBindingDescription {
                binding: 0,
                stride : mem::size_of::<Vertex>() as _,
                input_rate: vk::VertexInputRate::VERTEX,
            })
            .add_attribute(vk::VertexInputAttributeDescription {
                location: 0,
                binding : 0,
                format  : vk::Format::R32G32B32_SFLOAT, // three 32 bit signed (SFLOAT) floats (R32 G32 B32).
                offset  : memoffset::offset_of!(Vertex, position) as _,
            })
            .add_attribute(vk::VertexInputAttributeDescription {
                location: 1,
                binding : 0,
                format  : vk::Format::R32G32B32_SFLOAT,
                offset  : memoffset::offset_of!(Vertex, color) as _,
            })
            .add_attribute(vk::VertexInputAttributeDescription {
                location: 2,
                binding : 0,
                format  : vk::Format::R32G32B32_SFLOAT,
                offset  : memoffset::offset_of!(Vertex, normal) as _,
            })
    }
}

lazy_static! {

    pub static ref VERTEX_DATA: Vec<Vertex> = generate_cube_vertices();
    pub static ref INDEX_DATA : Vec<vkuint> = generate_cube_indices();
}

/// Build a unit cube with a flat normal and a distinct color per face.
fn generate_cube_vertices() -> Vec<Vertex> {

    struct Face {
        normal : Vec3F,
        color  : Vec3F,
        corners: [Vec3F; 4],
    }

    let faces = [
        Face { // front
            normal : Vec3F::new(0.0, 0.0, 1.0),
            color  : Vec3F::new(1.0, 0.0, 0.0),
            corners: [
                Vec3F::new(-1.0, -1.0,  1.0), Vec3F::new( 1.0, -1.0,  1.0),
                Vec3F::new( 1.0,  1.0,  1.0), Vec3F::new(-1.0,  1.0,  1.0),
            ],
        },
        Face { // back
            normal : Vec3F::new(0.0, 0.0, -1.0),
            color  : Vec3F::new(0.0, 1.0, 0.0),
            corners: [
                Vec3F::new( 1.0, -1.0, -1.0), Vec3F::new(-1.0, -1.0, -1.0),
                Vec3F::new(-1.0,  1.0, -1.0), Vec3F::new( 1.0,  1.0, -1.0),
            ],
        },
        Face { // right
            normal : Vec3F::new(1.0, 0.0, 0.0),
            color  : Vec3F::new(0.0, 0.0, 1.0),
            corners: [
                Vec3F::new( 1.0, -1.0,  1.0), Vec3F::new( 1.0, -1.0, -1.0),
                Vec3F::new( 1.0,  1.0, -1.0), Vec3F::new( 1.0,  1.0,  1.0),
            ],
        },
        Face { // left
            normal : Vec3F::new(-1.0, 0.0, 0.0),
            color  : Vec3F::new(1.0, 1.0, 0.0),
            corners: [
                Vec3F::new(-1.0, -1.0, -1.0), Vec3F::new(-1.0, -1.0,  1.0),
                Vec3F::new(-1.0,  1.0,  1.0), Vec3F::new(-1.0,  1.0, -1.0),
            ],
        },
        Face { // top
            normal : Vec3F::new(0.0, 1.0, 0.0),
            color  : Vec3F::new(1.0, 0.0, 1.0),
            corners: [
                Vec3F::new(-1.0,  1.0,  1.0), Vec3F::new( 1.0,  1.0,  1.0),
                Vec3F::new( 1.0,  1.0, -1.0), Vec3F::new(-1.0,  1.0, -1.0),
            ],
        },
        Face { // bottom
            normal : Vec3F::new(0.0, -1.0, 0.0),
            color  : Vec3F::new(0.0, 1.0, 1.0),
            corners: [
                Vec3F::new(-1.0, -1.0, -1.0), Vec3F::new( 1.0, -1.0, -1.0),
                Vec3F::new( 1.0, -1.0,  1.0), Vec3F::new(-1.0, -1.0,  1.0),
            ],
        },
    ];

    let mut vertices = Vec::with_capacity(faces.len() * 4);

    for face in faces.iter() {
        for &corner in face.corners.iter() {
            vertices.push(Vertex {
                position: corner,
                color   : face.color,
                normal  : face.normal,
            });
        }
    }

    vertices
}

fn generate_cube_indices() -> Vec<vkuint> {

    // two counter-clockwise triangles per face.
    (0..6_u32).flat_map(|face| {
        let base = face * 4;
        vec![base, base + 1, base + 2, base + 2, base + 3, base]
    }).collect()
}

/// Upload the cube mesh into host visible vertex and index buffers.
///
/// For the sake of simplicity the vertex data is not staged to the gpu local memory.
pub fn generate_cube(device: &mut VkDevice) -> VkResult<(VmaBuffer, VmaBuffer)> {

    use vkhost::utils::memory::copy_to_ptr;

    let vertex_buffer = {

        let vertices_ci = BufferCI::new((mem::size_of::<Vertex>() * VERTEX_DATA.len()) as vkbytes)
            .usage(vk::BufferUsageFlags::VERTEX_BUFFER);
        let allocation_ci = VmaAllocationCI::new(vma::MemoryUsage::CpuOnly, vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT)
            .flags(vma::AllocationCreateFlags::MAPPED);
        let vertices_allocation = device.vma.create_buffer(
            &vertices_ci, allocation_ci.as_ref())
            .map_err(VkErrorKind::Vma)?;

        let data_ptr = vertices_allocation.2.get_mapped_data() as vkptr;
        debug_assert_ne!(data_ptr, ptr::null_mut());
        copy_to_ptr(data_ptr, &VERTEX_DATA);

        VmaBuffer::from(vertices_allocation)
    };

    let index_buffer = {

        let indices_ci = BufferCI::new((mem::size_of::<vkuint>() * INDEX_DATA.len()) as vkbytes)
            .usage(vk::BufferUsageFlags::INDEX_BUFFER);
        let allocation_ci = VmaAllocationCI::new(vma::MemoryUsage::CpuOnly, vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT)
            .flags(vma::AllocationCreateFlags::MAPPED);
        let indices_allocation = device.vma.create_buffer(
            &indices_ci, allocation_ci.as_ref())
            .map_err(VkErrorKind::Vma)?;

        let data_ptr = indices_allocation.2.get_mapped_data() as vkptr;
        debug_assert_ne!(data_ptr, ptr::null_mut());
        copy_to_ptr(data_ptr, &INDEX_DATA);

        VmaBuffer::from(indices_allocation)
    };

    Ok((vertex_buffer, index_buffer))
}


/// The uniform block shared by all instances, uploaded once per frame.
///
/// The field order matches the std140 layout of the block in cube.vert.glsl:
/// the vec3 light position is padded to 16 bytes before the next vec4.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct UboView {
    pub projection    : Mat4F,
    pub view          : Mat4F,
    /// rgb is the light color, alpha its intensity.
    pub ambient_color : Vec4F,
    pub light_position: Vec3F,
    _pad0: f32,
    pub light_color   : Vec4F,
}

pub struct UboViewData {
    pub content: [UboView; 1],
}

impl UboViewData {

    pub fn prepare_buffer(device: &mut VkDevice, camera: &FlightCamera) -> VkResult<(VmaBuffer, UboViewData)> {

        let buffer_ci = BufferCI::new(mem::size_of::<UboView>() as vkbytes)
            .usage(vk::BufferUsageFlags::UNIFORM_BUFFER);
        let allocation_ci = VmaAllocationCI::new(vma::MemoryUsage::CpuOnly, vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT)
            .flags(vma::AllocationCreateFlags::MAPPED);
        let buffer_allocation = device.vma.create_buffer(
            &buffer_ci, allocation_ci.as_ref())
            .map_err(VkErrorKind::Vma)?;

        let ubo_view_data = UboViewData {
            content: [
                UboView {
                    projection    : camera.proj_matrix(),
                    view          : camera.view_matrix(),
                    ambient_color : Vec4F::new(1.0, 1.0, 1.0, 0.02),
                    light_position: Vec3F::new(-16.0, 0.0, -16.0),
                    _pad0: 0.0,
                    light_color   : Vec4F::new(1.0, 1.0, 1.0, 1.0),
                },
            ],
        };

        let data_ptr = buffer_allocation.2.get_mapped_data() as vkptr;
        debug_assert_ne!(data_ptr, ptr::null_mut());
        vkhost::utils::memory::copy_to_ptr(data_ptr, &ubo_view_data.content);

        Ok((VmaBuffer::from(buffer_allocation), ubo_view_data))
    }
}


/// The per-object stride inside the dynamic uniform buffer.
///
/// Offsets passed to `bind_descriptor_sets` must be multiples of the alignment
/// reported by the device, so the matrix size is rounded up to it.
pub fn dynamic_alignment(min_alignment: vkbytes) -> vkbytes {

    bound_to_alignment(mem::size_of::<Mat4F>() as vkbytes, min_alignment)
}

/// One model matrix per object instance, written to the device through a single
/// alignment-padded uniform buffer.
pub struct UboDynamicData {
    pub model: [Mat4F; OBJECT_INSTANCES],
}

impl UboDynamicData {

    fn identity() -> UboDynamicData {
        UboDynamicData {
            model: [Mat4F::identity(); OBJECT_INSTANCES],
        }
    }

    pub fn prepare_buffer(device: &mut VkDevice) -> VkResult<(VmaBuffer, UboDynamicData, vkuint)> {

        let min_alignment = device.phy.limits.min_uniform_buffer_offset_alignment;
        println!("[Info] minUniformBufferOffsetAlignment: {}", min_alignment);

        // calculate required alignment based on minimum device offset alignment.
        let alignment = dynamic_alignment(min_alignment);
        println!("[Info] dynamicAlignment: {}", alignment);

        let buffer_ci = BufferCI::new(alignment * OBJECT_INSTANCES as vkbytes)
            .usage(vk::BufferUsageFlags::UNIFORM_BUFFER);
        // the memory is host visible but not necessarily coherent, so every write is flushed manually.
        let allocation_ci = VmaAllocationCI::new(vma::MemoryUsage::CpuOnly, vk::MemoryPropertyFlags::HOST_VISIBLE)
            .flags(vma::AllocationCreateFlags::MAPPED);
        let buffer_allocation = device.vma.create_buffer(
            &buffer_ci, allocation_ci.as_ref())
            .map_err(VkErrorKind::Vma)?;

        let initial_data = UboDynamicData::identity();

        let data_ptr = buffer_allocation.2.get_mapped_data() as vkptr;
        debug_assert_ne!(data_ptr, ptr::null_mut());

        let mut data_ptr_aligned = unsafe {
            ash::util::Align::new(data_ptr, alignment as _, buffer_allocation.2.get_size() as _)
        };
        data_ptr_aligned.copy_from_slice(&initial_data.model);

        device.vma.flush_allocation(&buffer_allocation.1, 0, vk::WHOLE_SIZE as _)
            .map_err(VkErrorKind::Vma)?;

        Ok((VmaBuffer::from(buffer_allocation), initial_data, alignment as vkuint))
    }

    /// Rebuild the model matrix of every instance from its grid slot and current rotation.
    pub fn update(&mut self, rotations: &mut RotationData, delta_time: f32) {

        for index in 0..OBJECT_INSTANCES {

            rotations.rotations[index] += rotations.rotate_speeds[index] * delta_time;
            let rotation = rotations.rotations[index];

            let translate = Mat4F::translation_3d(grid_slot_position(index));
            let rotate = Mat4F::rotation_x(rotation.x)
                * Mat4F::rotation_y(rotation.y)
                * Mat4F::rotation_z(rotation.z);

            self.model[index] = translate * rotate;
        }
    }
}

/// The world position of the instance slot at `index`, centered around the origin.
pub fn grid_slot_position(index: usize) -> Vec3F {

    debug_assert!(index < OBJECT_INSTANCES);

    let [dim_x, dim_y, _] = GRID_DIMENSION;

    let slot = [
        index % dim_x,
        (index / dim_x) % dim_y,
        index / (dim_x * dim_y),
    ];

    let mut position = Vec3F::zero();
    for axis in 0..3 {
        let dim = GRID_DIMENSION[axis] as f32;
        position[axis] = -(dim * GRID_SPACING) / 2.0 + GRID_SPACING / 2.0 + (slot[axis] as f32) * GRID_SPACING;
    }

    position
}


/// The current Euler rotation and rotation speed of each instance.
pub struct RotationData {
    pub rotations    : [Vec3F; OBJECT_INSTANCES],
    pub rotate_speeds: [Vec3F; OBJECT_INSTANCES],
}

impl RotationData {

    pub fn new_by_rng() -> RotationData {

        let mut data = RotationData {
            rotations    : [Vec3F::zero(); OBJECT_INSTANCES],
            rotate_speeds: [Vec3F::zero(); OBJECT_INSTANCES],
        };

        use rand::distributions::Distribution;
        let rnd_dist = rand::distributions::Uniform::from(-1.0..1.0_f32);
        let mut rnd_engine = rand::thread_rng();

        for i in 0..OBJECT_INSTANCES {
            data.rotations[i] = Vec3F::new(
                rnd_dist.sample(&mut rnd_engine), // a random float between -1.0 ~ 1.0.
                rnd_dist.sample(&mut rnd_engine),
                rnd_dist.sample(&mut rnd_engine),
            );
            data.rotate_speeds[i] = Vec3F::new(
                rnd_dist.sample(&mut rnd_engine),
                rnd_dist.sample(&mut rnd_engine),
                rnd_dist.sample(&mut rnd_engine),
            );
        }

        data
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn dynamic_offsets_are_aligned_and_in_bounds() {

        // common minUniformBufferOffsetAlignment values reported by real devices.
        for &min_alignment in [16_u64, 64, 256].iter() {

            let alignment = dynamic_alignment(min_alignment);
            assert!(alignment >= mem::size_of::<Mat4F>() as vkbytes);

            let buffer_size = alignment * OBJECT_INSTANCES as vkbytes;

            for i in 0..OBJECT_INSTANCES as vkbytes {
                let offset = i * alignment;
                assert_eq!(offset % min_alignment, 0);
                assert!(offset + mem::size_of::<Mat4F>() as vkbytes <= buffer_size);
            }
        }
    }

    #[test]
    fn view_block_matches_std140_layout() {

        assert_eq!(mem::size_of::<UboView>(), 176);
        assert_eq!(memoffset::offset_of!(UboView, ambient_color) , 128);
        assert_eq!(memoffset::offset_of!(UboView, light_position), 144);
        assert_eq!(memoffset::offset_of!(UboView, light_color)   , 160);
    }

    #[test]
    fn cube_mesh_integrity() {

        assert_eq!(VERTEX_DATA.len(), 24);
        assert_eq!(INDEX_DATA.len(), 36);

        // every index points to an existing vertex.
        assert!(INDEX_DATA.iter().all(|&index| (index as usize) < VERTEX_DATA.len()));
    }

    #[test]
    fn grid_covers_every_instance_once() {

        assert_eq!(GRID_DIMENSION.iter().product::<usize>(), OBJECT_INSTANCES);

        // slots are centered: they sum up to the origin.
        let sum = (0..OBJECT_INSTANCES).map(grid_slot_position)
            .fold(Vec3F::zero(), |acc, position| acc + position);
        assert!(sum.magnitude() < 1e-4);
    }
}
