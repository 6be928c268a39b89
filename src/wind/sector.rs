//! Compass sector labels

use super::circular::normalize_degrees;

const SECTOR_WIDTH: f64 = 22.5;

// The final "N" catches angles that round up to a full turn
const WIND_SECTORS: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "N",
];

/// Label of the 16-point compass sector an angle falls in.
///
/// Half-way angles round to the even sector, so 11.25° is "N" and 348.75° is "N".
#[must_use]
pub fn sector_label(angle: f64) -> &'static str {
    let index = (normalize_degrees(angle) / SECTOR_WIDTH).round_ties_even() as usize;
    WIND_SECTORS[index.min(WIND_SECTORS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "N")]
    #[case(22.5, "NNE")]
    #[case(45.0, "NE")]
    #[case(90.0, "E")]
    #[case(135.0, "SE")]
    #[case(180.0, "S")]
    #[case(202.0, "SSW")]
    #[case(270.0, "W")]
    #[case(315.0, "NW")]
    #[case(337.5, "NNW")]
    #[case(348.75, "N")]
    #[case(359.9, "N")]
    #[case(11.25, "N")]
    #[case(33.75, "NE")]
    fn test_sector_label(#[case] angle: f64, #[case] expected: &str) {
        assert_eq!(sector_label(angle), expected);
    }

    #[rstest]
    #[case(360.0, "N")]
    #[case(-90.0, "W")]
    #[case(450.0, "E")]
    fn test_out_of_range_angles_are_normalized(#[case] angle: f64, #[case] expected: &str) {
        assert_eq!(sector_label(angle), expected);
    }
}
