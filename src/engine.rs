//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It runs
//! the per-frame pipeline over a [`Mesh`]: rotation, depth ordering,
//! back-face culling, flat shading, projection and rasterization into a
//! caller-supplied [`FrameBuffer`].

use crate::colors;
use crate::config::RenderConfig;
use crate::depth::{average_depth, depth_sort};
use crate::error::RenderError;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec5::Vec5;
use crate::mesh::Mesh;
use crate::projection::{project_vertex, to_camera_space, Projection, Viewport};
use crate::render::line::draw_triangle_wireframe;
use crate::render::{FrameBuffer, Rasterizer, ScanlineRasterizer, ScreenTriangle, TextureMapper};
use crate::texture::Texture;

/// Rendering mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Flat-shaded solid fill (key: 1)
    Filled,
    /// Perspective-correct texture (key: 2)
    #[default]
    Textured,
    /// Wireframe only (key: 3)
    Wireframe,
    /// Texture + wireframe (key: 4)
    TexturedWireframe,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Filled => write!(f, "Filled"),
            RenderMode::Textured => write!(f, "Textured"),
            RenderMode::Wireframe => write!(f, "Wireframe"),
            RenderMode::TexturedWireframe => write!(f, "TexturedWireframe"),
        }
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub faces: usize,
    /// Faces turned away from the camera.
    pub culled: usize,
    /// Faces skipped because they could not be projected or rasterized.
    pub degenerate: usize,
    pub drawn: usize,
}

/// A face scheduled for drawing, keyed by its camera-space average depth.
#[derive(Debug, Clone, Copy)]
struct DrawItem {
    face: usize,
    depth: f32,
}

pub struct Engine {
    config: RenderConfig,
    projection_matrix: Mat4,
    render_mode: RenderMode,
    draw_list: Vec<DrawItem>,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            projection_matrix: config.projection.matrix(),
            config,
            render_mode: RenderMode::default(),
            draw_list: Vec::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.config.projection = projection;
        self.projection_matrix = projection.matrix();
    }

    pub fn projection(&self) -> Projection {
        self.config.projection
    }

    pub fn set_camera_position(&mut self, position: Vec3) {
        self.config.camera = position;
    }

    pub fn camera_position(&self) -> Vec3 {
        self.config.camera
    }

    /// Rotates `mesh` by `angles` and draws it into `buffer`.
    ///
    /// Faces are drawn in ascending order of camera-space average depth.
    /// Faces that cannot be projected or filled are logged and counted in
    /// [`FrameStats::degenerate`]; they never abort the frame.
    pub fn render_frame(
        &mut self,
        mesh: &mut Mesh,
        texture: &Texture,
        angles: Vec3,
        buffer: &mut FrameBuffer,
    ) -> FrameStats {
        mesh.rotate(angles);

        let camera = self.config.camera;
        self.draw_list.clear();
        self.draw_list
            .extend(mesh.faces().iter().enumerate().map(|(face, f)| DrawItem {
                face,
                depth: average_depth(mesh.face_vertices(f).map(|v| to_camera_space(v, camera))),
            }));
        depth_sort(&mut self.draw_list, |item| item.depth);

        let viewport = Viewport::new(buffer.width(), buffer.height());
        let flat = ScanlineRasterizer::new();
        let mapper = TextureMapper::new(texture);

        let mut stats = FrameStats {
            faces: self.draw_list.len(),
            ..FrameStats::default()
        };

        for item in &self.draw_list {
            let face = &mesh.faces()[item.face];
            let [a, b, c] = mesh.face_vertices(face);

            let normal = (b - a).cross(c - a);
            if !(normal.magnitude() > 0.0) {
                log::trace!("face {}: zero-length normal", item.face);
                stats.degenerate += 1;
                continue;
            }
            let normal = normal.normalize();
            if normal.dot(camera - a) <= 0.0 {
                stats.culled += 1;
                continue;
            }

            let color = self.config.light.flat_shade(normal, face.color);
            let texcoords = mesh.face_texcoords(face);

            let vertices = match self.project_face(viewport, [a, b, c], texcoords) {
                Ok(vertices) => vertices,
                Err(err) => {
                    log::trace!("face {}: {}", item.face, err);
                    stats.degenerate += 1;
                    continue;
                }
            };
            let triangle = ScreenTriangle::new(vertices, color);

            let filled = match self.render_mode {
                RenderMode::Filled => flat.fill_triangle(&triangle, buffer),
                RenderMode::Textured | RenderMode::TexturedWireframe => {
                    mapper.fill_triangle(&triangle, buffer)
                }
                RenderMode::Wireframe => Ok(()),
            };
            if let Err(err) = filled {
                log::trace!("face {}: {}", item.face, err);
                stats.degenerate += 1;
                continue;
            }

            if matches!(
                self.render_mode,
                RenderMode::Wireframe | RenderMode::TexturedWireframe
            ) {
                draw_triangle_wireframe(buffer, vertices.map(|v| v.xy()), colors::WIREFRAME);
            }
            stats.drawn += 1;
        }

        log::debug!(
            "frame: {} faces, {} drawn, {} culled, {} degenerate",
            stats.faces,
            stats.drawn,
            stats.culled,
            stats.degenerate
        );
        stats
    }

    fn project_face(
        &self,
        viewport: Viewport,
        vertices: [Vec3; 3],
        texcoords: [Vec2; 3],
    ) -> Result<[Vec5; 3], RenderError> {
        let project = |i: usize| {
            project_vertex(
                &self.projection_matrix,
                self.config.projection.z_near(),
                viewport,
                self.config.camera,
                vertices[i],
                texcoords[i],
            )
        };
        Ok([project(0)?, project(1)?, project(2)?])
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;

    fn render(engine: &mut Engine, mesh: &mut Mesh, angles: Vec3) -> (FrameStats, Vec<u8>) {
        let mut bytes = vec![0u8; 160 * 90 * 4];
        let texture = Texture::checkerboard(8, 8, colors::RED, colors::BLUE);
        let mut fb = FrameBuffer::new(&mut bytes, 160, 90, 160 * 4).unwrap();
        let stats = engine.render_frame(mesh, &texture, angles, &mut fb);
        (stats, bytes)
    }

    #[test]
    fn face_behind_camera_is_counted_as_degenerate() {
        let mut mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, -1.0, -12.0),
                Vec3::new(-1.0, 1.0, -12.0),
                Vec3::new(1.0, 1.0, -12.0),
            ],
            // wound so the normal faces the camera at z = -10
            vec![Face::new([0, 2, 1], [0, 0, 0], colors::LILAC)],
            vec![Vec2::ZERO],
        )
        .unwrap();

        let mut engine = Engine::default();
        let (stats, bytes) = render(&mut engine, &mut mesh, Vec3::ZERO);
        assert_eq!(stats.faces, 1);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.drawn, 0);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn face_inside_near_plane_is_skipped_in_every_mode() {
        // each face has one vertex a hair in front of the eye at z = -10
        let faces = [
            [
                Vec3::new(-1000.0, 0.0, -9.99999),
                Vec3::new(0.0, 5.0, 0.0),
                Vec3::new(0.0, -5.0, 0.0),
            ],
            [
                Vec3::new(0.0, -1000.0, -9.99999),
                Vec3::new(-5.0, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 0.0),
            ],
        ];
        for vertices in faces {
            for mode in [
                RenderMode::Filled,
                RenderMode::Textured,
                RenderMode::Wireframe,
                RenderMode::TexturedWireframe,
            ] {
                let mut mesh = Mesh::new(
                    vertices.to_vec(),
                    vec![Face::new([0, 1, 2], [0, 0, 0], colors::LILAC)],
                    vec![Vec2::ZERO],
                )
                .unwrap();
                let mut engine = Engine::default();
                engine.set_render_mode(mode);

                let (stats, bytes) = render(&mut engine, &mut mesh, Vec3::ZERO);
                assert_eq!(stats.culled, 0, "{mode}");
                assert_eq!(stats.degenerate, 1, "{mode}");
                assert!(bytes.iter().all(|&b| b == 0), "{mode}");
            }
        }
    }

    #[test]
    fn collapsed_face_is_counted_as_degenerate() {
        let mut mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0)],
            vec![Face::new([0, 1, 2], [0, 0, 0], colors::LILAC)],
            vec![Vec2::ZERO],
        )
        .unwrap();
        let (stats, _) = render(&mut Engine::default(), &mut mesh, Vec3::ZERO);
        assert_eq!(stats.degenerate, 1);
    }

    #[test]
    fn render_frame_rotates_the_mesh_in_place() {
        let mut mesh = Mesh::cube();
        let before = mesh.vertices().to_vec();
        render(&mut Engine::default(), &mut mesh, Vec3::new(0.1, 0.0, 0.0));
        assert_ne!(mesh.vertices(), &before[..]);
    }

    #[test]
    fn wireframe_mode_draws_outlines_only() {
        let mut engine = Engine::default();
        engine.set_render_mode(RenderMode::Wireframe);
        let mut mesh = Mesh::cube();
        let (stats, bytes) = render(&mut engine, &mut mesh, Vec3::ZERO);
        assert_eq!(stats.drawn, 2);

        let pixels: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|p| u32::from_ne_bytes([p[0], p[1], p[2], p[3]]))
            .collect();
        assert!(pixels.contains(&colors::WIREFRAME));
        assert!(pixels.iter().all(|&p| p == 0 || p == colors::WIREFRAME));
    }

    #[test]
    fn render_mode_names() {
        assert_eq!(RenderMode::TexturedWireframe.to_string(), "TexturedWireframe");
        assert_eq!(RenderMode::default(), RenderMode::Textured);
    }
}
