use halcon_fare::coordinate::Coordinate;
use jiff::SpanRelativeTo;

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(String::from("Invalid duration"))
}

/// `lat,lon` in decimal degrees, e.g. `4.6097,-74.0817`
pub fn parse_coordinate(input: &str) -> Result<Coordinate, String> {
    let Some((lat, lon)) = input.split_once(',') else {
        return Err(format!("Expected \"lat,lon\", got \"{input}\""));
    };

    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid latitude \"{}\"", lat.trim()))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid longitude \"{}\"", lon.trim()))?;

    Coordinate::new(lat, lon).map_err(|error| error.to_string())
}

pub fn parse_distance_km(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(km) if km.is_finite() && km >= 0.0 => Ok(km),
        _ => Err(format!(
            "Expected a non-negative number of kilometers, got \"{input}\""
        )),
    }
}
