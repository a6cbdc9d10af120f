//! Resolve sparse per-year overrides onto a dense year series
//!
//! The engine consumes one fully populated entry per projection year; this
//! module fills the gaps with baseline income and zero infusion.

use std::collections::HashMap;

use crate::client::YearOverride;
use crate::error::ProjectionError;

/// One fully resolved projection-year input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedYear {
    /// 1-based projection year
    pub year: u32,
    /// Ordinary income for the year
    pub income: f64,
    /// Signed cash infusion for the year (negative = withdrawal)
    pub cash_infusion: f64,
}

impl ResolvedYear {
    fn baseline(year: u32, income: f64) -> Self {
        Self {
            year,
            income,
            cash_infusion: 0.0,
        }
    }
}

/// Merge sparse overrides onto the default year series
///
/// Produces exactly one entry per year 1..=`years`. Years without an
/// explicit override use the baseline income and zero infusion. Overrides
/// for years outside the horizon are ignored; two overrides for the same
/// year are a configuration error.
///
/// An empty override list resolves to the same series as no overrides at
/// all, so the override-aware projection path degenerates to the baseline
/// path when nothing was overridden.
pub fn resolve_overrides(
    default_income: f64,
    years: u32,
    overrides: &[YearOverride],
) -> Result<Vec<ResolvedYear>, ProjectionError> {
    let mut by_year: HashMap<u32, &YearOverride> = HashMap::with_capacity(overrides.len());
    for ovr in overrides {
        if ovr.year == 0 || ovr.year > years {
            log::debug!(
                "ignoring override for year {} outside horizon 1..={}",
                ovr.year,
                years
            );
            continue;
        }
        if by_year.insert(ovr.year, ovr).is_some() {
            return Err(ProjectionError::DuplicateOverride(ovr.year));
        }
    }

    let resolved = (1..=years)
        .map(|year| match by_year.get(&year) {
            Some(ovr) => ResolvedYear {
                year,
                income: ovr.income.unwrap_or(default_income),
                cash_infusion: ovr.cash_infusion,
            },
            None => ResolvedYear::baseline(year, default_income),
        })
        .collect();

    Ok(resolved)
}

/// Whether every supplied override leaves its year at the defaults
pub fn all_default(overrides: &[YearOverride]) -> bool {
    overrides.iter().all(YearOverride::is_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_resolves_to_baseline() {
        let resolved = resolve_overrides(250_000.0, 5, &[]).unwrap();

        assert_eq!(resolved.len(), 5);
        for (idx, entry) in resolved.iter().enumerate() {
            assert_eq!(entry.year, idx as u32 + 1);
            assert_eq!(entry.income, 250_000.0);
            assert_eq!(entry.cash_infusion, 0.0);
        }
    }

    #[test]
    fn test_sparse_overrides_fill_gaps() {
        let overrides = vec![
            YearOverride {
                year: 3,
                income: None,
                cash_infusion: 2_000_000.0,
                note: Some("business sale".to_string()),
            },
            YearOverride {
                year: 6,
                income: Some(0.0),
                cash_infusion: 0.0,
                note: Some("retirement".to_string()),
            },
        ];
        let resolved = resolve_overrides(1_000_000.0, 10, &overrides).unwrap();

        assert_eq!(resolved.len(), 10);
        // Year 3: infusion applied, income stays at baseline
        assert_eq!(resolved[2].cash_infusion, 2_000_000.0);
        assert_eq!(resolved[2].income, 1_000_000.0);
        // Year 6: income substituted
        assert_eq!(resolved[5].income, 0.0);
        assert_eq!(resolved[5].cash_infusion, 0.0);
        // Untouched years at defaults
        assert_eq!(resolved[0].income, 1_000_000.0);
        assert_eq!(resolved[9].cash_infusion, 0.0);
    }

    #[test]
    fn test_out_of_horizon_overrides_ignored() {
        let overrides = vec![
            YearOverride::passthrough(0),
            YearOverride {
                year: 12,
                income: Some(500_000.0),
                cash_infusion: 1_000_000.0,
                note: None,
            },
        ];
        let resolved = resolve_overrides(100_000.0, 10, &overrides).unwrap();

        assert_eq!(resolved.len(), 10);
        assert!(resolved.iter().all(|r| r.income == 100_000.0));
        assert!(resolved.iter().all(|r| r.cash_infusion == 0.0));
    }

    #[test]
    fn test_duplicate_year_rejected() {
        let overrides = vec![
            YearOverride::passthrough(4),
            YearOverride {
                year: 4,
                income: None,
                cash_infusion: -500_000.0,
                note: None,
            },
        ];
        let err = resolve_overrides(100_000.0, 10, &overrides).unwrap_err();

        assert!(matches!(err, ProjectionError::DuplicateOverride(4)));
    }

    #[test]
    fn test_all_default_detection() {
        assert!(all_default(&[]));
        assert!(all_default(&[YearOverride::passthrough(2)]));

        let active = YearOverride {
            year: 2,
            income: None,
            cash_infusion: 1.0,
            note: None,
        };
        assert!(!all_default(&[active]));
    }
}
