/// Computes the integer factor by which a decode should subsample an image.
///
/// The factor is chosen so the decoded image is no larger than necessary for
/// a `target_width` x `target_height` display: the source-to-target ratio is
/// taken per axis, and the smaller (limiting) ratio is floored. A source
/// that already fits the target, or a ratio below 1, yields 1; sampling
/// never upsamples. A zero target dimension (the view may not be laid out
/// yet) also yields 1 instead of dividing by zero.
pub fn compute_sample_size(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> u32 {
    if target_width == 0 || target_height == 0 {
        return 1;
    }
    if source_width <= target_width && source_height <= target_height {
        return 1;
    }

    let width_ratio = source_width as f64 / target_width as f64;
    let height_ratio = source_height as f64 / target_height as f64;
    let limiting_ratio = width_ratio.min(height_ratio);
    if limiting_ratio < 1.0 {
        1
    } else {
        limiting_ratio.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiting_axis_ratio_is_floored() {
        // Ratios are 4 and 3; the limiting axis wins.
        assert_eq!(compute_sample_size(4000, 3000, 1000, 1000), 3);
        // Non-integer limiting ratio 2.5 floors to 2.
        assert_eq!(compute_sample_size(2500, 5000, 1000, 1000), 2);
    }

    #[test]
    fn never_upsamples() {
        assert_eq!(compute_sample_size(320, 240, 1000, 1000), 1);
        assert_eq!(compute_sample_size(1000, 1000, 1000, 1000), 1);
        // One axis larger, but the limiting ratio is below 1.
        assert_eq!(compute_sample_size(1200, 300, 1000, 1000), 1);
    }

    #[test]
    fn zero_target_dimension_is_guarded() {
        assert_eq!(compute_sample_size(4000, 3000, 0, 1000), 1);
        assert_eq!(compute_sample_size(4000, 3000, 1000, 0), 1);
        assert_eq!(compute_sample_size(4000, 3000, 0, 0), 1);
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let first = compute_sample_size(4032, 3024, 400, 400);
        let second = compute_sample_size(4032, 3024, 400, 400);
        assert_eq!(first, second);
        assert_eq!(first, 7);
    }
}
