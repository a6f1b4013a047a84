use crate::engine::errors::MomentError;
use crate::engine::moment::coerce::coerce;
use crate::engine::moment::order::MomentOrder;
use crate::engine::types::ScalarValue;
use crate::engine::udf::phase::Phase;

/// Highest central order accepted when no configuration says otherwise.
pub const DEFAULT_MAX_CENTRAL_ORDER: u32 = 16;

/// Mergeable state of a central moment of degree `p`: the running mean and
/// the centred sums `M_k = sum((x - mean)^k)` for `k in 0..=p`.
///
/// Same null convention as `PartialAggregate`: `sums == None` until a
/// non-null value has been seen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CentralMoments {
    pub count: i64,
    pub mean: f64,
    pub sums: Option<Vec<f64>>,
}

impl CentralMoments {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn degree(&self) -> Option<u32> {
        self.sums.as_ref().map(|s| s.len().saturating_sub(1) as u32)
    }

    /// Pairwise merge: both sides are re-centred on the pooled mean, so only
    /// differences of means enter the update.
    pub fn merge(&self, other: &CentralMoments) -> Result<CentralMoments, MomentError> {
        let (a, b) = match (self.sums.as_ref(), other.sums.as_ref()) {
            (None, _) => return Ok(other.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(a), Some(b)) => (a, b),
        };
        if a.len() != b.len() {
            return Err(MomentError::structural(
                Phase::Intermediate,
                format!(
                    "central moments of degree {} and {} cannot be combined",
                    a.len() - 1,
                    b.len() - 1
                ),
            ));
        }

        let count = self.count + other.count;
        let n = count as f64;
        let delta = other.mean - self.mean;
        let mean = self.mean + delta * other.count as f64 / n;
        let shift_a = -delta * other.count as f64 / n;
        let shift_b = delta * self.count as f64 / n;

        let sums = recentre(a, shift_a)
            .into_iter()
            .zip(recentre(b, shift_b))
            .map(|(x, y)| x + y)
            .collect();

        Ok(CentralMoments {
            count,
            mean,
            sums: Some(sums),
        })
    }
}

/// `sum((x - m + d)^k)` from `sum((x - m)^j)`, by binomial expansion in `d`.
fn recentre(sums: &[f64], shift: f64) -> Vec<f64> {
    (0..sums.len())
        .map(|k| {
            let mut total = 0.0;
            let mut binom = 1.0;
            for (j, m_j) in sums.iter().enumerate().take(k + 1) {
                total += binom * shift.powi((k - j) as i32) * m_j;
                binom = binom * (k - j) as f64 / (j + 1) as f64;
            }
            total
        })
        .collect()
}

/// Central moments need integral centred sums, so the order must be a
/// non-negative integer no larger than `max_order`.
pub fn central_degree(order: MomentOrder, max_order: u32) -> Result<u32, MomentError> {
    let p = order.value();
    if !p.is_finite() || p < 0.0 || p.fract() != 0.0 {
        return Err(MomentError::InvalidOrder(format!(
            "central moment requires a non-negative integral order, got {}",
            p
        )));
    }
    if p > max_order as f64 {
        return Err(MomentError::InvalidOrder(format!(
            "central order {} exceeds the configured maximum {}",
            p, max_order
        )));
    }
    Ok(p as u32)
}

/// One value: mean is the value itself, so every centred sum past `M_0` is 0.
pub fn initial_central(value: &ScalarValue, degree: u32) -> CentralMoments {
    let Some(x) = coerce(value) else {
        return CentralMoments::empty();
    };
    let mut sums = vec![0.0; degree as usize + 1];
    sums[0] = 1.0;
    CentralMoments {
        count: 1,
        mean: x,
        sums: Some(sums),
    }
}

/// Folds states of the same degree. Mixing degrees means the order was not
/// fixed across the invocation.
pub fn combine_central<'a, I>(parts: I) -> Result<CentralMoments, MomentError>
where
    I: IntoIterator<Item = &'a CentralMoments>,
{
    parts
        .into_iter()
        .try_fold(CentralMoments::empty(), |acc, part| acc.merge(part))
}

/// E[(X - mean)^p] = M_p / n.
pub fn finalize_central(combined: &CentralMoments) -> Option<f64> {
    let sums = combined.sums.as_ref()?;
    if combined.count <= 0 {
        return None;
    }
    sums.last().map(|m_p| m_p / combined.count as f64)
}

/// Single-shot central moment.
pub fn compute_central(
    values: &[ScalarValue],
    order: MomentOrder,
    max_order: u32,
) -> Result<Option<f64>, MomentError> {
    let degree = central_degree(order, max_order)?;
    let parts: Vec<CentralMoments> = values
        .iter()
        .map(|v| initial_central(v, degree))
        .collect();
    let combined = combine_central(&parts)?;
    Ok(finalize_central(&combined))
}
