use crate::math::{multiply_matrices, multiply_matrix_vector, project_point, rotation_y, rotation_z};
use crate::rotation::{visible_face, Face, RotationState};
use crate::vertex::Vertex;

/// Distance from the eye to the card plane, in pixels. Larger values flatten
/// the perspective.
pub const CAMERA_DISTANCE: f64 = 576.0;

/// How much the height varies as a result of perspective in the outline
/// fallback
const MIN_HEIGHT_AS_RATIO_OF_NORMAL: f64 = 0.7;

/// Everything the rasterizer needs for one frame: the projected corners of
/// the card and which face they show.
pub struct DrawPlan {
    /// Corners in screen coordinates, clockwise from the card's top-left at
    /// rest
    pub vertices: [Vertex; 4],
    pub face: Face,
}

/// Projects the card under the given rotation into viewport coordinates.
///
/// The card fills the viewport at rest and pivots around the viewport
/// center: corners are taken relative to the center, rotated by the z spin
/// first and the y flip second, perspective-projected, and translated back.
/// The texture coordinates stay fixed per corner, so once the quad has
/// flipped past 90 degrees the selected back image comes out mirrored, the
/// way a card seen from behind would.
pub fn project(rotation: &RotationState, viewport_width: f64, viewport_height: f64) -> DrawPlan {
    let rotation_matrix = multiply_matrices(
        &rotation_y(rotation.y_axis() as f64),
        &rotation_z(rotation.z_axis() as f64),
    );

    let center_x = viewport_width / 2.0;
    let center_y = viewport_height / 2.0;

    let corners = [
        [-center_x, -center_y, 0.0],
        [center_x, -center_y, 0.0],
        [center_x, center_y, 0.0],
        [-center_x, center_y, 0.0],
    ];
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let project_corner = |index: usize| -> Vertex {
        let rotated = multiply_matrix_vector(&rotation_matrix, &corners[index]);
        let projected = project_point(&rotated, CAMERA_DISTANCE);
        Vertex {
            screen_position: [projected[0] + center_x, projected[1] + center_y],
            uv: uvs[index],
        }
    };

    DrawPlan {
        vertices: [
            project_corner(0),
            project_corner(1),
            project_corner(2),
            project_corner(3),
        ],
        face: visible_face(rotation.y_axis()),
    }
}

/// Computes the flat-color outline shown while a face has no image yet.
///
/// The perceived width foreshortens with the cosine of the flip angle,
/// collapsing to nothing edge-on, and the leading edge (the one on the right
/// at rest) is drawn taller than the trailing edge to fake its being closer.
/// The leading edge swaps to the left side exactly while the back face is
/// visible. The in-plane spin is applied to the finished polygon so gesture
/// rotation stays visible in placeholder mode.
///
/// Points are ordered leading-top, leading-bottom, trailing-bottom,
/// trailing-top.
pub fn outline(
    rotation: &RotationState,
    viewport_width: f64,
    viewport_height: f64,
) -> [[f64; 2]; 4] {
    let flip = (rotation.y_axis() as f64).to_radians();

    let perceived_width = (viewport_width * flip.cos()).abs();
    let height_diff = (1.0 - MIN_HEIGHT_AS_RATIO_OF_NORMAL) * viewport_height;
    let leading_height = viewport_height + flip.sin() * height_diff;
    let trailing_height = viewport_height - flip.sin() * height_diff;

    let leading_x = match visible_face(rotation.y_axis()) {
        Face::Front => perceived_width / 2.0,
        Face::Back => -perceived_width / 2.0,
    };

    let center_x = viewport_width / 2.0;
    let center_y = viewport_height / 2.0;
    let (sin_spin, cos_spin) = (rotation.z_axis() as f64).to_radians().sin_cos();
    let spin = |x: f64, y: f64| -> [f64; 2] {
        [
            x * cos_spin - y * sin_spin + center_x,
            x * sin_spin + y * cos_spin + center_y,
        ]
    };

    [
        spin(leading_x, -leading_height / 2.0),
        spin(leading_x, leading_height / 2.0),
        spin(-leading_x, trailing_height / 2.0),
        spin(-leading_x, -trailing_height / 2.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn assert_close(actual: [f64; 2], expected: [f64; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < EPSILON && (actual[1] - expected[1]).abs() < EPSILON,
            "got {actual:?}, expected {expected:?}"
        );
    }

    #[test]
    fn at_rest_the_card_fills_the_viewport() {
        let plan = project(&RotationState::new(0, 0), 400.0, 300.0);
        assert_eq!(plan.face, Face::Front);
        assert_close(plan.vertices[0].screen_position, [0.0, 0.0]);
        assert_close(plan.vertices[1].screen_position, [400.0, 0.0]);
        assert_close(plan.vertices[2].screen_position, [400.0, 300.0]);
        assert_close(plan.vertices[3].screen_position, [0.0, 300.0]);
    }

    #[test]
    fn edge_on_the_card_collapses_to_the_vertical_center() {
        let plan = project(&RotationState::new(90, 0), 400.0, 300.0);
        for vertex in &plan.vertices {
            assert!((vertex.screen_position[0] - 200.0).abs() < 1e-3);
        }
    }

    #[test]
    fn half_turn_mirrors_left_and_right() {
        let plan = project(&RotationState::new(180, 0), 400.0, 300.0);
        assert_eq!(plan.face, Face::Back);
        // The corner that starts top-left lands on the right.
        assert_close(plan.vertices[0].screen_position, [400.0, 0.0]);
        assert_close(plan.vertices[1].screen_position, [0.0, 0.0]);
    }

    #[test]
    fn face_hands_off_at_the_90_and_270_boundaries() {
        assert_eq!(project(&RotationState::new(90, 0), 100.0, 100.0).face, Face::Front);
        assert_eq!(project(&RotationState::new(91, 0), 100.0, 100.0).face, Face::Back);
        assert_eq!(project(&RotationState::new(270, 0), 100.0, 100.0).face, Face::Back);
        assert_eq!(project(&RotationState::new(271, 0), 100.0, 100.0).face, Face::Front);
    }

    #[test]
    fn in_plane_spin_turns_the_corners() {
        let plan = project(&RotationState::new(0, 90), 400.0, 400.0);
        // A quarter spin takes the top-left corner to the top-right region.
        assert_close(plan.vertices[0].screen_position, [400.0, 0.0]);
    }

    #[test]
    fn outline_at_rest_is_the_full_rectangle_with_the_leading_edge_right() {
        let corners = outline(&RotationState::new(0, 0), 400.0, 300.0);
        assert_close(corners[0], [400.0, 0.0]);
        assert_close(corners[1], [400.0, 300.0]);
        assert_close(corners[2], [0.0, 300.0]);
        assert_close(corners[3], [0.0, 0.0]);
    }

    #[test]
    fn outline_foreshortens_and_skews_heights_mid_flip() {
        let corners = outline(&RotationState::new(60, 0), 400.0, 300.0);
        let width = corners[0][0] - corners[2][0];
        assert!((width - 400.0 * 60.0_f64.to_radians().cos()).abs() < EPSILON);

        let leading_height = corners[1][1] - corners[0][1];
        let trailing_height = corners[2][1] - corners[3][1];
        assert!(leading_height > 300.0);
        assert!(trailing_height < 300.0);
    }

    #[test]
    fn outline_leading_edge_swaps_sides_behind() {
        let corners = outline(&RotationState::new(180, 0), 400.0, 300.0);
        // Back visible: the leading edge now sits on the left of center.
        assert!(corners[0][0] < 200.0);
        assert!(corners[2][0] > 200.0);
    }

    #[test]
    fn outline_collapses_edge_on() {
        let corners = outline(&RotationState::new(270, 0), 400.0, 300.0);
        for corner in &corners {
            assert!((corner[0] - 200.0).abs() < 1e-3);
        }
    }
}
