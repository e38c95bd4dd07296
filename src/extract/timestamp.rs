use crate::ExtractError;

/// Parse a `MM:SS` or `HH:MM:SS` time string into seconds
///
/// Fields may be fractional (`"1:02.5"`). Negative and non-finite fields are rejected.
pub fn parse_timestamp(input: &str) -> Result<f64, ExtractError> {
    let invalid = || ExtractError::InvalidFormat(input.to_string());

    let fields = input
        .trim()
        .split(':')
        .map(|field| {
            field
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or_else(invalid)
        })
        .collect::<Result<Vec<f64>, _>>()?;

    match fields.as_slice() {
        [minutes, seconds] => Ok(minutes * 60.0 + seconds),
        [hours, minutes, seconds] => Ok(hours * 3600.0 + minutes * 60.0 + seconds),
        _ => Err(invalid()),
    }
}
