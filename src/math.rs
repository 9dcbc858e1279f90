use num::Float;

/// Similar to numpy.interp: piecewise-linear interpolation of `coords` at each of `x_input`,
/// holding the first/last `y` constant outside the covered range.
///
/// `coords` must be sorted by `x`. An empty `coords` yields zeros.
pub(crate) fn interp<F: Float>(
    x_input: impl IntoIterator<Item = F>,
    coords: impl IntoIterator<Item = (F, F)>,
) -> Vec<F> {
    let coords: Vec<(F, F)> = coords.into_iter().collect();

    x_input
        .into_iter()
        .map(|x| {
            let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
                return F::zero();
            };

            // Base cases
            if x <= x_first {
                return y_first;
            }
            if x >= x_last {
                return y_last;
            }

            for window in coords.windows(2) {
                let (x1, y1) = window[0];
                let (x2, y2) = window[1];

                // Actual interpolation
                if x1 <= x && x <= x2 {
                    if x2 == x1 {
                        return y2;
                    }

                    return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
                }
            }

            // NaN never compares inside any window
            F::nan()
        })
        .collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];

    assert_eq!(
        interp(x, xs.into_iter().zip(ys)),
        vec![3., 3., 2.5, 0.5599999999999996, 0.]
    );

    let x = [2.5, -1., 7.5];
    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(interp(x, xs.into_iter().zip(ys)), vec![4., 0., 2.]);
}

#[test]
fn test_interp_empty_coords() {
    let x: [f64; 2] = [1., 2.];

    assert_eq!(interp(x, std::iter::empty()), vec![0., 0.]);
}
