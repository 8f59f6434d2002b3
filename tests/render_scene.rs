use std::collections::HashSet;
use std::sync::Arc;

use approx::assert_relative_eq;
use ssr::bench::scan_triangle;
use ssr::prelude::*;

const RED: u32 = 0xFFFF0000;
const BLUE: u32 = 0xFF0000FF;
const BACKGROUND: u32 = 0xFF000000;

/// Counts every pixel write instead of storing colors.
struct CountingTarget {
    width: u32,
    height: u32,
    writes: Vec<u32>,
}

impl CountingTarget {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            writes: vec![0; (width * height) as usize],
        }
    }

    fn total(&self) -> usize {
        self.writes.iter().map(|&n| n as usize).sum()
    }
}

impl RenderTarget for CountingTarget {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, _color: u32) {
        self.writes[(y * self.width + x) as usize] += 1;
    }
}

/// A square facing the origin at depth `z`, textured with a single UV.
fn square_obj(z: f32, u: f32) -> String {
    format!(
        "v -1 -1 {z}\nv -1 1 {z}\nv 1 1 {z}\nv 1 -1 {z}\n\
         vt {u} 0\nvn 0 0 -1\n\
         f 1/1/1 2/1/1 3/1/1 4/1/1\n"
    )
}

fn red_blue_renderer() -> Renderer {
    Renderer::new(Texture::from_pixels(2, 1, vec![RED, BLUE]).unwrap())
}

fn model_from_obj(source: &str) -> Model {
    Model::new(Arc::new(Mesh::parse_obj(source).unwrap()))
}

#[test]
fn quad_face_becomes_two_triangles() {
    let mesh = Mesh::parse_obj(
        "v 0 0 0\nv 0 1 0\nv 1 1 0\nv 1 0 0\n\
         vt 0 0\nvt 0 1\nvt 1 1\nvt 1 0\n\
         vn 0 0 -1\n\
         f 1/1/1 2/2/1 3/3/1 4/4/1\n",
    )
    .unwrap();

    let sets: Vec<HashSet<usize>> = mesh
        .triangles()
        .iter()
        .map(|t| t.positions().into_iter().collect())
        .collect();
    assert_eq!(
        sets,
        vec![HashSet::from([0, 1, 2]), HashSet::from([2, 3, 0])]
    );
}

#[test]
fn loaded_indices_stay_inside_their_pools() {
    let mesh = Mesh::parse_obj(&square_obj(3.0, 0.5)).unwrap();
    for triangle in mesh.triangles() {
        for corner in triangle.0 {
            assert!(corner.position < mesh.positions().len());
            assert!(corner.uv < mesh.uvs().len());
            assert!(corner.normal < mesh.normals().len());
        }
    }
}

#[test]
fn identity_transform_and_camera_round_trip() {
    let camera = Camera::default();
    let transform = Transform::new();
    for p in [
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(-3.5, 2.25, 40.0),
        Vec3::new(1e3, -1e-3, 0.5),
    ] {
        assert_eq!(camera.world_to_camera(transform.apply(p)), p);
    }
}

#[test]
fn triangle_facing_away_draws_nothing() {
    // Counter-clockwise as seen from the camera: its normal points along +Z.
    let away = model_from_obj(
        "v 0 0 5\nv 1 0 5\nv 0 1 5\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n",
    );
    let mut target = CountingTarget::new(32, 32);
    let stats = red_blue_renderer().render_scene(&[away], &Camera::default(), &mut target);

    assert_eq!(stats.culled, 1);
    assert_eq!(stats.fragments, 0);
    assert_eq!(target.total(), 0);
}

#[test]
fn triangle_facing_the_camera_is_drawn() {
    let toward = model_from_obj(
        "v 0 0 5\nv 0 1 5\nv 1 0 5\nvt 0 0\nvn 0 0 -1\nf 1/1/1 2/1/1 3/1/1\n",
    );
    let mut target = CountingTarget::new(32, 32);
    let stats = red_blue_renderer().render_scene(&[toward], &Camera::default(), &mut target);

    assert_eq!(stats.culled, 0);
    assert!(stats.fragments > 0);
    assert_eq!(stats.fragments, target.total());
}

#[test]
fn nearer_model_wins_regardless_of_order() {
    let near = model_from_obj(&square_obj(4.0, 0.0)); // red
    let far = model_from_obj(&square_obj(8.0, 1.0)); // blue
    let camera = Camera::default();

    for scene in [[near.clone(), far.clone()], [far.clone(), near.clone()]] {
        let mut frame = ColorBuffer::new(32, 32, BACKGROUND);
        red_blue_renderer().render_scene(&scene, &camera, &mut frame);
        assert_eq!(frame.get_pixel(16, 16), Some(RED));
    }
}

#[test]
fn shared_quad_edge_is_covered_once() {
    let viewport = Viewport::new(16, 16);
    let a = Vec2::new(2.0, 2.0);
    let b = Vec2::new(13.0, 3.0);
    let c = Vec2::new(12.0, 14.0);
    let d = Vec2::new(1.0, 12.0);

    let mut counts = vec![0u32; 256];
    for tri in [[a, b, c], [a, c, d]] {
        scan_triangle(tri, viewport, |x, y, _| counts[(y * 16 + x) as usize] += 1);
    }
    assert!(counts.iter().all(|&n| n <= 1));
    assert!(counts.iter().filter(|&&n| n == 1).count() > 100);
}

#[test]
fn spinning_cube_keeps_rendering() {
    let mut model = Model::new(Arc::new(Mesh::cube()));
    model
        .transform_mut()
        .set_position(Vec3::new(0.0, 0.0, 12.0))
        .set_scale_uniform(2.0);
    let spin = Vec3::new(2.0, 2.0, 0.0).to_radians();

    let mut renderer = Renderer::new(Texture::checkerboard(16, 4, RED, BLUE));
    let mut frame = ColorBuffer::new(64, 64, BACKGROUND);
    let camera = Camera::default();

    for _ in 0..90 {
        model.spin(spin);
        frame.clear(BACKGROUND);
        let stats = renderer.render_scene(std::slice::from_ref(&model), &camera, &mut frame);

        assert_eq!(stats.triangles, 12);
        assert_eq!(stats.skipped, 0);
        // At most three sides of a convex cube can face the camera.
        assert!(stats.rasterized() <= 6);
        // The silhouette is never smaller than one face seen head-on.
        let covered = frame.pixels().iter().filter(|&&p| p != BACKGROUND).count();
        assert!(covered > 80, "only {covered} pixels drawn");
    }
    assert_relative_eq!(model.transform().rotation().x, 180.0_f32.to_radians(), epsilon = 1e-3);
}
