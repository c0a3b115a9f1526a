use super::types::{RankedEntry, TributaryRegion};
use std::cmp::Ordering;

/// Top `top_k` non-empty regions by area, largest first.
///
/// Equal areas keep ascending owner index order.
pub fn rank_regions(regions: &[TributaryRegion], top_k: usize) -> Vec<RankedEntry> {
    let mut candidates: Vec<&TributaryRegion> = regions
        .iter()
        .filter(|r| !r.is_empty() && r.area > 0.0)
        .collect();
    candidates.sort_by(|a, b| compare_by_area(a.area, a.owner, b.area, b.owner));

    candidates
        .into_iter()
        .take(top_k)
        .enumerate()
        .map(|(i, region)| RankedEntry {
            rank: i + 1,
            owner: region.owner,
            point_id: region.point_id,
            point: region.point,
            area: region.area,
            centroid: region.centroid,
            shape: region.shape.clone(),
        })
        .collect()
}

fn compare_by_area(area_a: f64, owner_a: usize, area_b: f64, owner_b: usize) -> Ordering {
    area_b.total_cmp(&area_a).then(owner_a.cmp(&owner_b))
}
