use crate::engine::moment::partial::PartialAggregate;

/// Final phase: turns a fully combined partial into the moment.
pub fn finalize(combined: &PartialAggregate) -> Option<f64> {
    let sum = combined.sum?;
    // a defined sum always carries count > 0 once combined
    if combined.count > 0 {
        Some(sum / combined.count as f64)
    } else {
        None
    }
}
