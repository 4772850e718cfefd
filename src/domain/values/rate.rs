/// `numerator / denominator * 100`, or `0.0` when the denominator is zero.
///
/// Results are not clamped: a negative numerator (e.g. more checkouts than
/// cart additions) yields a negative rate.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let rate = numerator / denominator * 100.0;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}
