//! Acoustic propagation: speed of sound and distance/delay conversion.

/// Speed of sound in air at `temperature` degrees Celsius, in m/s.
///
/// `20.048 * sqrt(T + 273.15)` — the ideal-gas approximation used when
/// calibrating the rigs.
pub fn speed_of_sound(temperature: f64) -> f64 {
    20.048 * (temperature + 273.15).sqrt()
}

/// One-way propagation delay in seconds over `distance` meters at
/// `temperature` degrees Celsius.
pub fn delay_for_distance(distance: f64, temperature: f64) -> f64 {
    distance / speed_of_sound(temperature)
}
