use timeshare_core::AggregateId;

/// A command targets a specific aggregate.
///
/// Commands represent **intent** (e.g. "toggle my vote on option 2"). They are
/// rejected if invalid and turned into events otherwise.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_aggregate_id(&self) -> AggregateId;
}
