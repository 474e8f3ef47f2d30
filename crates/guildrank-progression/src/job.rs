//! Job ladder tiers and the sub-tier position inside a job.

use crate::error::{ProgressionError, Result};
use crate::tier::{TierTable, Tiered};
use guildrank_common::RoleId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A job unlocked by the number of successful works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTier {
    /// Job title.
    pub title: String,
    /// First successful-work count that holds this job.
    pub min_works: u64,
    /// Last successful-work count of this job; `None` for the open-ended top job.
    #[serde(default)]
    pub max_works: Option<u64>,
    /// Coins paid per successful work.
    #[serde(default)]
    pub pay: u64,
    /// Role granted while this job is current.
    pub role_id: RoleId,
}

impl Tiered for JobTier {
    fn threshold(&self) -> u64 {
        self.min_works
    }

    fn role_id(&self) -> RoleId {
        self.role_id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl JobTier {
    /// Position of `successful_works` inside this job.
    pub fn sub_tier(&self, successful_works: u64) -> Result<SubTier> {
        sub_tier(self.min_works, self.max_works, successful_works)
    }
}

/// Width of a job's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// `max_works - min_works + 1` positions.
    Bounded(u64),
    /// The job has no upper bound.
    Unbounded,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(width) => write!(f, "{width}"),
            Self::Unbounded => f.write_str("∞"),
        }
    }
}

/// 1-based ordinal inside a job's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTier {
    /// Position, capped at the span width when bounded.
    pub ordinal: u64,
    /// Width of the range.
    pub span: Span,
}

impl fmt::Display for SubTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ordinal, self.span)
    }
}

/// Computes the sub-tier for a job spanning `[min_works, max_works]`.
///
/// Only meaningful for the job the user currently qualifies for, so
/// `successful_works < min_works` is rejected.
pub fn sub_tier(min_works: u64, max_works: Option<u64>, successful_works: u64) -> Result<SubTier> {
    if successful_works < min_works {
        return Err(ProgressionError::argument(format!(
            "{successful_works} successful works do not reach this job's minimum of {min_works}"
        )));
    }
    let position = (successful_works - min_works)
        .checked_add(1)
        .ok_or_else(|| ProgressionError::argument("successful work count is out of range"))?;

    match max_works {
        Some(max_works) if max_works < min_works => Err(ProgressionError::argument(format!(
            "job range is empty: max_works {max_works} < min_works {min_works}"
        ))),
        Some(max_works) => {
            let width = (max_works - min_works).checked_add(1).ok_or_else(|| {
                ProgressionError::argument(format!("job range {min_works}..={max_works} is too wide"))
            })?;
            Ok(SubTier {
                ordinal: position.min(width),
                span: Span::Bounded(width),
            })
        }
        None => Ok(SubTier {
            ordinal: position,
            span: Span::Unbounded,
        }),
    }
}

/// Builds a job ladder, additionally rejecting empty ranges and ranges
/// whose width does not fit in a `u64`.
pub fn job_table(jobs: Vec<JobTier>) -> Result<TierTable<JobTier>> {
    for job in &jobs {
        let Some(max) = job.max_works else { continue };
        if max < job.min_works {
            return Err(ProgressionError::configuration(format!(
                "job '{}' has max_works below min_works {}",
                job.title, job.min_works
            )));
        }
        if max == u64::MAX {
            return Err(ProgressionError::configuration(format!(
                "job '{}' has max_works {max}; leave max_works out for an open-ended job",
                job.title
            )));
        }
    }
    TierTable::new(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, min_works: u64, max_works: Option<u64>) -> JobTier {
        JobTier {
            title: title.to_string(),
            min_works,
            max_works,
            pay: 10,
            role_id: RoleId(min_works + 1),
        }
    }

    #[test]
    fn test_bounded_sub_tier() {
        let position = sub_tier(10, Some(19), 14).unwrap();
        assert_eq!(position.ordinal, 5);
        assert_eq!(position.span, Span::Bounded(10));
        assert_eq!(position.to_string(), "5/10");
    }

    #[test]
    fn test_bounded_sub_tier_is_capped() {
        let position = sub_tier(10, Some(19), 40).unwrap();
        assert_eq!(position.ordinal, 10);
    }

    #[test]
    fn test_unbounded_sub_tier() {
        let position = sub_tier(20, None, 57).unwrap();
        assert_eq!(position.ordinal, 38);
        assert_eq!(position.span, Span::Unbounded);
        assert_eq!(position.to_string(), "38/∞");
    }

    #[test]
    fn test_sub_tier_below_minimum() {
        let error = sub_tier(10, Some(19), 9).unwrap_err();
        assert!(matches!(error, ProgressionError::InvalidArgument { .. }));
    }

    #[test]
    fn test_job_table_selects_current_job() {
        let table = job_table(vec![
            job("Intern", 0, Some(9)),
            job("Junior", 10, Some(19)),
            job("Senior", 20, None),
        ])
        .unwrap();

        let current = table.select(14).unwrap();
        assert_eq!(current.title, "Junior");
        assert_eq!(current.sub_tier(14).unwrap().to_string(), "5/10");
    }

    #[test]
    fn test_job_table_rejects_empty_range() {
        let error = job_table(vec![job("Broken", 10, Some(5))]).unwrap_err();
        assert!(matches!(error, ProgressionError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_sub_tier_full_width_range_is_rejected() {
        let error = sub_tier(0, Some(u64::MAX), 5).unwrap_err();
        assert!(matches!(error, ProgressionError::InvalidArgument { .. }));

        let error = sub_tier(0, None, u64::MAX).unwrap_err();
        assert!(matches!(error, ProgressionError::InvalidArgument { .. }));

        let position = sub_tier(1, Some(u64::MAX), 5).unwrap();
        assert_eq!(position.ordinal, 5);
        assert_eq!(position.span, Span::Bounded(u64::MAX));
    }

    #[test]
    fn test_job_table_rejects_unrepresentable_max() {
        let error = job_table(vec![job("Forever", 0, Some(u64::MAX))]).unwrap_err();
        assert!(matches!(error, ProgressionError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_job_tier_deserializes_without_optional_fields() {
        let job: JobTier =
            serde_json::from_str(r#"{"title":"Boss","min_works":50,"role_id":9}"#).unwrap();
        assert_eq!(job.max_works, None);
        assert_eq!(job.pay, 0);
    }
}
