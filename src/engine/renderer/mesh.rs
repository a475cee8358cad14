// Mesh instances and the 3D camera they are viewed through
//
// Mesh assets are not loaded from disk. Names resolve to built-in wireframes;
// unknown names get a placeholder so a missing asset never stops the frame.

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use super::camera::ScreenRect;

/// Camera used to view meshes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCamera {
    pub position: Vec3,
    pub direction: Vec3,
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -1.0),
            direction: Vec3::Z,
            near: 0.1,
            far: 1000.0,
            fov_y: std::f32::consts::FRAC_PI_3,
        }
    }
}

impl SceneCamera {
    /// Combined projection * view matrix for a target of the given aspect ratio
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_to_rh(self.position, self.direction, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, aspect.max(f32::EPSILON), self.near, self.far);
        proj * view
    }
}

/// Edge list of a wireframe model in model space
#[derive(Debug)]
pub struct Wireframe {
    pub vertices: &'static [[f32; 3]],
    pub edges: &'static [(usize, usize)],
}

/// Wedge-shaped ship, nose along +z
static SHIP_WIREFRAME: Wireframe = Wireframe {
    vertices: &[
        [0.0, 0.0, 0.05],
        [-0.03, 0.0, -0.05],
        [0.03, 0.0, -0.05],
        [0.0, 0.02, -0.05],
    ],
    edges: &[(0, 1), (0, 2), (0, 3), (1, 2), (2, 3), (3, 1)],
};

/// Axis cross shown for meshes with no known wireframe
static PLACEHOLDER_WIREFRAME: Wireframe = Wireframe {
    vertices: &[
        [-0.05, 0.0, 0.0],
        [0.05, 0.0, 0.0],
        [0.0, -0.05, 0.0],
        [0.0, 0.05, 0.0],
        [0.0, 0.0, -0.05],
        [0.0, 0.0, 0.05],
    ],
    edges: &[(0, 1), (2, 3), (4, 5)],
};

/// Look up a built-in wireframe by asset name
pub fn builtin_wireframe(name: &str) -> Option<&'static Wireframe> {
    match name {
        "models/ship.dae" => Some(&SHIP_WIREFRAME),
        _ => None,
    }
}

/// Wireframe used when an asset name is unknown
pub fn placeholder_wireframe() -> &'static Wireframe {
    &PLACEHOLDER_WIREFRAME
}

/// Handle to a mesh instance owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) usize);

/// A placed mesh: asset, position, rotation and size
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub name: String,
    pub position: Vec3,
    pub rotation: Mat3,
    pub size: Vec3,
    pub color: Vec4,
    wireframe: &'static Wireframe,
}

impl MeshInstance {
    pub fn new(name: &str, wireframe: &'static Wireframe, position: Vec3, size: Vec3) -> Self {
        Self {
            name: name.to_string(),
            position,
            rotation: Mat3::IDENTITY,
            size,
            color: Vec4::new(0.6, 0.9, 1.0, 1.0),
            wireframe,
        }
    }

    /// Model-to-world transform: scale, then rotate, then translate
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_mat3(self.rotation)
            * Mat4::from_scale(self.size)
    }

    /// Project every wireframe edge into `target` (screen pixels)
    ///
    /// Edges with an endpoint behind the camera are skipped.
    pub fn project_edges(&self, camera: &SceneCamera, target: ScreenRect) -> Vec<(Vec2, Vec2)> {
        if target.is_empty() {
            return Vec::new();
        }

        let mvp = camera.view_proj(target.width / target.height) * self.model_matrix();
        let project = |vertex: [f32; 3]| -> Option<Vec2> {
            let clip = mvp * Vec3::from(vertex).extend(1.0);
            if clip.w <= 0.0 {
                return None;
            }
            let ndc = Vec2::new(clip.x, clip.y) / clip.w;
            Some(Vec2::new(
                target.x + (ndc.x + 1.0) * 0.5 * target.width,
                target.y + (1.0 - ndc.y) * 0.5 * target.height,
            ))
        };

        self.wireframe
            .edges
            .iter()
            .filter_map(|&(a, b)| {
                let from = project(*self.wireframe.vertices.get(a)?)?;
                let to = project(*self.wireframe.vertices.get(b)?)?;
                Some((from, to))
            })
            .collect()
    }
}
