//! Measure-type filter requests and the boolean tests they build
//!
//! A [`MeasureFilter`] holds up to four criteria. Each criterion is evaluated
//! against the set of type codes a parcel has been measured for, and a parcel
//! passes the filter only when every criterion holds.
//!
//! Quantifiers over an empty code set follow the usual rules:
//! - `AnyMeasured(∅)` and `AnyNotMeasured(∅)` are false
//! - `AllMeasured(∅)` and `AllNotMeasured(∅)` are true

use std::collections::BTreeSet;

/// A single test over a measured-type set `M`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureCriterion {
    /// `M ∩ T ≠ ∅`
    AnyMeasured(BTreeSet<String>),
    /// `T ⊆ M`
    AllMeasured(BTreeSet<String>),
    /// some `t ∈ T` with `t ∉ M`
    AnyNotMeasured(BTreeSet<String>),
    /// `T ∩ M = ∅`
    AllNotMeasured(BTreeSet<String>),
}

impl MeasureCriterion {
    pub fn matches(&self, measured: &BTreeSet<&str>) -> bool {
        match self {
            MeasureCriterion::AnyMeasured(types) => {
                types.iter().any(|t| measured.contains(t.as_str()))
            }
            MeasureCriterion::AllMeasured(types) => {
                types.iter().all(|t| measured.contains(t.as_str()))
            }
            MeasureCriterion::AnyNotMeasured(types) => {
                types.iter().any(|t| !measured.contains(t.as_str()))
            }
            MeasureCriterion::AllNotMeasured(types) => {
                types.iter().all(|t| !measured.contains(t.as_str()))
            }
        }
    }
}

/// Conjunction of optional measure criteria
///
/// Omitted criteria impose no constraint. Setting the same criterion twice
/// unions the code sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasureFilter {
    pub any_measured: Option<BTreeSet<String>>,
    pub all_measured: Option<BTreeSet<String>>,
    pub any_not_measured: Option<BTreeSet<String>>,
    pub all_not_measured: Option<BTreeSet<String>>,
}

impl MeasureFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep parcels measured for at least one of `types`
    pub fn any_measured<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.any_measured, types);
        self
    }

    /// Keep parcels measured for every one of `types`
    pub fn all_measured<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.all_measured, types);
        self
    }

    /// Keep parcels missing at least one of `types`
    pub fn any_not_measured<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.any_not_measured, types);
        self
    }

    /// Keep parcels measured for none of `types`
    pub fn all_not_measured<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.all_not_measured, types);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.criteria().is_empty()
    }

    /// The criteria this filter imposes, one per provided code set
    pub fn criteria(&self) -> Vec<MeasureCriterion> {
        let mut criteria = Vec::with_capacity(4);
        if let Some(types) = &self.any_measured {
            criteria.push(MeasureCriterion::AnyMeasured(types.clone()));
        }
        if let Some(types) = &self.all_measured {
            criteria.push(MeasureCriterion::AllMeasured(types.clone()));
        }
        if let Some(types) = &self.any_not_measured {
            criteria.push(MeasureCriterion::AnyNotMeasured(types.clone()));
        }
        if let Some(types) = &self.all_not_measured {
            criteria.push(MeasureCriterion::AllNotMeasured(types.clone()));
        }
        criteria
    }

    /// Build the boolean test over a parcel's measured-type set
    pub fn predicate(&self) -> impl Fn(&BTreeSet<&str>) -> bool {
        let criteria = self.criteria();
        move |measured: &BTreeSet<&str>| criteria.iter().all(|c| c.matches(measured))
    }

    pub fn matches(&self, measured: &BTreeSet<&str>) -> bool {
        (self.predicate())(measured)
    }
}

fn extend<I, S>(slot: &mut Option<BTreeSet<String>>, types: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    slot.get_or_insert_with(BTreeSet::new)
        .extend(types.into_iter().map(Into::into));
}
