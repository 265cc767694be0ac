use chrono::{DateTime, Utc};

/// Maintenance risk derivation for a component.
///
/// Deprecation contributes 0.7; release age adds 0.3 beyond three years
/// or 0.1 beyond two. The result is clipped to 1.0.
pub struct MaintenanceRisk;

impl MaintenanceRisk {
    pub fn score(
        is_deprecated: bool,
        published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> f64 {
        let mut risk: f64 = 0.0;

        if is_deprecated {
            risk += 0.7;
        }

        if let Some(published) = published_at {
            let age_years = (now - published).num_days() as f64 / 365.0;
            if age_years > 3.0 {
                risk += 0.3;
            } else if age_years > 2.0 {
                risk += 0.1;
            }
        }

        risk.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_fresh_component_scores_zero() {
        let published = now() - Duration::days(100);
        assert_eq!(MaintenanceRisk::score(false, Some(published), now()), 0.0);
    }

    #[test]
    fn test_unknown_publication_scores_zero() {
        assert_eq!(MaintenanceRisk::score(false, None, now()), 0.0);
    }

    #[test]
    fn test_two_to_three_years_adds_small_bonus() {
        let published = now() - Duration::days(365 * 2 + 100);
        let score = MaintenanceRisk::score(false, Some(published), now());
        assert!((score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_over_three_years_adds_large_bonus() {
        let published = now() - Duration::days(365 * 4);
        let score = MaintenanceRisk::score(false, Some(published), now());
        assert!((score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_deprecated_contributes_most() {
        let score = MaintenanceRisk::score(true, None, now());
        assert!((score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_deprecated_and_ancient_clips_to_one() {
        let published = now() - Duration::days(365 * 10);
        let score = MaintenanceRisk::score(true, Some(published), now());
        assert_eq!(score, 1.0);
    }
}
