use serde::{Deserialize, Serialize};

/// GPS fix captured at clock-in / clock-out time.
/// Optional everywhere: field devices may have no signal indoors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub accuracy: Option<f64>,
}

impl GeoPoint {
    /// Parse the CLI form `lat,lng` or `lat,lng,accuracy`.
    pub fn from_arg(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [lat, lng] => Some(Self {
                lat: lat.parse().ok()?,
                lng: lng.parse().ok()?,
                accuracy: None,
            }),
            [lat, lng, acc] => Some(Self {
                lat: lat.parse().ok()?,
                lng: lng.parse().ok()?,
                accuracy: Some(acc.parse().ok()?),
            }),
            _ => None,
        }
    }
}
