/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Rotation about the y axis (the card's flip axis)
pub fn rotation_y(angle_degrees: f64) -> [[f64; 3]; 3] {
    let (sin_a, cos_a) = angle_degrees.to_radians().sin_cos();
    [
        [cos_a, 0.0, sin_a],
        [0.0, 1.0, 0.0],
        [-sin_a, 0.0, cos_a],
    ]
}

/// Rotation about the z axis (the in-plane spin)
pub fn rotation_z(angle_degrees: f64) -> [[f64; 3]; 3] {
    let (sin_a, cos_a) = angle_degrees.to_radians().sin_cos();
    [
        [cos_a, -sin_a, 0.0],
        [sin_a, cos_a, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

/// Projects a rotated, center-relative point onto the screen plane.
///
/// `eye_distance` is how far the eye sits in front of the card plane, in
/// pixels. Points on the card plane keep their position and points shrink as
/// they recede; the denominator is clamped so a point swinging into the eye
/// cannot divide by zero.
pub fn project_point(point: &[f64; 3], eye_distance: f64) -> [f64; 2] {
    let depth = (eye_distance + point[2]).max(1e-6);
    let scale = eye_distance / depth;
    [point[0] * scale, point[1] * scale]
}

/// Luminance weights matching the saturation color matrix of the original app
const LUMINANCE_RED: f64 = 0.213;
const LUMINANCE_GREEN: f64 = 0.715;
const LUMINANCE_BLUE: f64 = 0.072;

/// Applies a saturation factor to a color.
///
/// 1.0 leaves the color unchanged and 0.0 collapses it to its luminance
/// gray; each channel is mixed toward the luminance and clamped to the byte
/// range.
pub fn apply_saturation(rgb: [u8; 3], saturation: f64) -> [u8; 3] {
    let r = rgb[0] as f64;
    let g = rgb[1] as f64;
    let b = rgb[2] as f64;
    let luminance = LUMINANCE_RED * r + LUMINANCE_GREEN * g + LUMINANCE_BLUE * b;

    let mix = |channel: f64| -> u8 {
        (luminance + (channel - luminance) * saturation)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    [mix(r), mix(g), mix(b)]
}
