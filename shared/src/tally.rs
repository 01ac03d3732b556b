use std::collections::HashMap;
use uuid::Uuid;
use crate::models::{OptionRecord, PollOptionView, VoteRecord};

/// Vote counts for a single poll, grouped by option id.
///
/// `total` counts every vote handed in, including any whose option is not
/// among the options later passed to [`Tally::option_views`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<Uuid, usize>,
    total: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a VoteRecord>) -> Self {
        let mut tally = Self::new();
        for vote in votes {
            tally.record(vote.option_id);
        }
        tally
    }

    pub fn record(&mut self, option_id: Uuid) {
        *self.counts.entry(option_id).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn votes_for(&self, option_id: Uuid) -> usize {
        self.counts.get(&option_id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Options in display order, each with its count. Options nobody voted
    /// for report zero.
    pub fn option_views(&self, options: &[OptionRecord]) -> Vec<PollOptionView> {
        let mut ordered: Vec<&OptionRecord> = options.iter().collect();
        ordered.sort_by_key(|opt| opt.position);

        ordered.into_iter()
            .map(|opt| PollOptionView {
                id: opt.id,
                label: opt.label.clone(),
                votes: self.votes_for(opt.id),
            })
            .collect()
    }
}
