//! Nearby-stop matching against the private transit dataset.

use hostly_core::{distance_meters, GeoPoint, TransitLine, TransitMatch, TransitStop};

use crate::error::DiscoveryError;
use crate::store::TransitStore;

/// Search radius used when the caller gives none.
pub const DEFAULT_RADIUS_METERS: f64 = 500.0;

const MORE_LINES_MARKER: &str = "…";

pub struct TransitMatcher<S> {
    store: S,
    star_lines: Vec<String>,
}

impl<S: TransitStore> TransitMatcher<S> {
    /// `star_lines` is the badge priority list, highest first.
    #[must_use]
    pub fn new(store: S, star_lines: Vec<String>) -> Self {
        Self { store, star_lines }
    }

    /// Stops within `radius_meters` of `location` that have line data,
    /// strategic stops first, then nearest first.
    ///
    /// The whole stop set is scanned in memory; it is small.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidRadius`] for a NaN, infinite or
    /// negative radius, and [`DiscoveryError::Store`] if stops or lines
    /// cannot be read.
    pub async fn find_nearby(
        &self,
        location: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<TransitMatch>, DiscoveryError> {
        if !radius_meters.is_finite() || radius_meters < 0.0 {
            return Err(DiscoveryError::InvalidRadius { radius_meters });
        }

        let stops = self.store.find_stops_all().await?;
        let total_stops = stops.len();

        let mut matches = Vec::new();
        for stop in stops {
            let distance = distance_meters(location, stop.location);
            if distance > radius_meters {
                continue;
            }

            let lines = self.store.find_lines_for_stop(stop.id).await?;
            if lines.is_empty() {
                tracing::debug!(stop_id = stop.id, stop = %stop.name, "stop has no lines, skipping");
                continue;
            }

            matches.push(self.build_match(stop, distance, lines));
        }

        rank_matches(&mut matches);

        tracing::debug!(
            %location,
            radius_meters,
            scanned = total_stops,
            matched = matches.len(),
            "transit matching complete"
        );

        Ok(matches)
    }

    fn build_match(&self, stop: TransitStop, distance: f64, lines: Vec<TransitLine>) -> TransitMatch {
        let lines = order_lines(lines);
        let is_strategic = lines.iter().any(TransitLine::has_highlight);
        let badge_label = badge_label(&lines, &self.star_lines);
        let description_text = describe_lines(&lines);

        TransitMatch {
            stop,
            distance_meters: distance,
            serving_lines: lines,
            is_strategic,
            badge_label,
            description_text,
        }
    }
}

/// Highlighted lines first; `sort_by_key` is stable so ties keep store order.
fn order_lines(mut lines: Vec<TransitLine>) -> Vec<TransitLine> {
    lines.sort_by_key(|line| !line.has_highlight());
    lines
}

fn describe_lines(lines: &[TransitLine]) -> String {
    lines
        .iter()
        .map(|line| format!("• Line {}: goes to {}", line.number, line.destination_label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The first star line (in priority order) serving the stop, else the
/// first ordered line. A trailing marker means more lines stop here.
fn badge_label(lines: &[TransitLine], star_lines: &[String]) -> String {
    let star = star_lines
        .iter()
        .find(|star| lines.iter().any(|line| line.number == **star))
        .map(String::as_str);

    let Some(number) = star.or_else(|| lines.first().map(|line| line.number.as_str())) else {
        return String::new();
    };

    if lines.len() > 1 {
        format!("Line {number}{MORE_LINES_MARKER}")
    } else {
        format!("Line {number}")
    }
}

/// Strategic before non-strategic, then ascending distance. Stable.
fn rank_matches(matches: &mut [TransitMatch]) {
    matches.sort_by(|a, b| {
        b.is_strategic
            .cmp(&a.is_strategic)
            .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, number: &str, highlight: Option<&str>) -> TransitLine {
        TransitLine {
            id,
            number: number.to_string(),
            name: format!("Line {number} route"),
            highlight_destinations: highlight.map(str::to_string),
        }
    }

    fn stars() -> Vec<String> {
        ["20", "55", "72", "10"].iter().map(|s| (*s).to_string()).collect()
    }

    fn bare_match(id: i64, distance: f64, strategic: bool) -> TransitMatch {
        TransitMatch {
            stop: TransitStop {
                id,
                name: format!("Stop {id}"),
                location: GeoPoint::new(-41.13, -71.31).unwrap(),
                is_hub: false,
            },
            distance_meters: distance,
            serving_lines: vec![],
            is_strategic: strategic,
            badge_label: String::new(),
            description_text: String::new(),
        }
    }

    #[test]
    fn highlighted_lines_move_first_stably() {
        let ordered = order_lines(vec![
            line(1, "50", None),
            line(2, "20", Some("Llao Llao")),
            line(3, "41", None),
            line(4, "55", Some("Cerro Catedral")),
        ]);
        let numbers: Vec<&str> = ordered.iter().map(|l| l.number.as_str()).collect();
        assert_eq!(numbers, vec!["20", "55", "50", "41"]);
    }

    #[test]
    fn description_has_one_bullet_per_line() {
        let lines = order_lines(vec![line(1, "50", None), line(2, "20", Some("Llao Llao"))]);
        assert_eq!(
            describe_lines(&lines),
            "• Line 20: goes to Llao Llao\n• Line 50: goes to Line 50 route"
        );
    }

    #[test]
    fn badge_prefers_highest_priority_star() {
        let lines = vec![line(1, "72", None), line(2, "55", None), line(3, "41", None)];
        assert_eq!(badge_label(&lines, &stars()), "Line 55…");
    }

    #[test]
    fn badge_falls_back_to_first_line() {
        let lines = vec![line(1, "41", None), line(2, "50", None)];
        assert_eq!(badge_label(&lines, &stars()), "Line 41…");
    }

    #[test]
    fn badge_for_single_line_has_no_marker() {
        assert_eq!(badge_label(&[line(1, "20", None)], &stars()), "Line 20");
        assert_eq!(badge_label(&[line(1, "83", None)], &[]), "Line 83");
    }

    #[test]
    fn ranking_puts_strategic_first_then_nearest() {
        let mut matches = vec![
            bare_match(1, 80.0, false),
            bare_match(2, 300.0, true),
            bare_match(3, 120.0, true),
            bare_match(4, 40.0, false),
        ];
        rank_matches(&mut matches);
        let ids: Vec<i64> = matches.iter().map(|m| m.stop.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn ranking_keeps_input_order_on_ties() {
        let mut matches = vec![
            bare_match(7, 100.0, true),
            bare_match(5, 100.0, true),
            bare_match(6, 100.0, true),
        ];
        rank_matches(&mut matches);
        let ids: Vec<i64> = matches.iter().map(|m| m.stop.id).collect();
        assert_eq!(ids, vec![7, 5, 6]);
    }
}
