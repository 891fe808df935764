pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// `numerator / denominator` rounded up to two decimal places, computed in
/// integer hundredths so exact quotients stay exact.
pub fn ceil_hundredths(numerator: u64, denominator: u64) -> Option<f64> {
    match denominator {
        0 => None,
        d => Some(((numerator * 100).div_ceil(d)) as f64 / 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(mean(&[15., 7., 55., 12., 4.]), Some(18.6));
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_ceil_hundredths() {
        assert_eq!(ceil_hundredths(7, 3), Some(2.34));
        assert_eq!(ceil_hundredths(6, 3), Some(2.0));
        assert_eq!(ceil_hundredths(1, 10), Some(0.1));
        assert_eq!(ceil_hundredths(0, 4), Some(0.0));
    }

    #[test]
    fn test_ceil_hundredths_zero_denominator() {
        assert_eq!(ceil_hundredths(5, 0), None);
    }
}
