#![allow(dead_code)]

use std::collections::BTreeMap;

use croppan::crop::CropBox;
use croppan::pan::PanSpec;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn frame_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("frame-{i:04}.jpg")).collect()
}

/// Ordered crop boxes within a 4096x4096 image.
pub fn arb_crop() -> BoxedStrategy<CropBox> {
    (0i64..2048, 0i64..2048, 1i64..2048, 1i64..2048)
        .prop_map(|(x, y, w, h)| CropBox::new(x, y, x + w, y + h))
        .boxed()
}

/// A sequence length plus single-image waypoints at distinct positions.
///
/// Each waypoint is `(position, crop0, crop1, n)`; with `image1 == image0`
/// its repeats only apply to its own image.
pub fn arb_hold_plan(
    max_images: usize,
    max_repeats: u32,
) -> BoxedStrategy<(usize, Vec<(usize, CropBox, CropBox, u32)>)> {
    (1usize..=max_images)
        .prop_flat_map(move |count| {
            let waypoints = proptest::collection::btree_map(
                0..count,
                (arb_crop(), arb_crop(), 1u32..=max_repeats),
                1..=count.min(8),
            );
            (Just(count), waypoints)
        })
        .prop_map(|(count, waypoints): (usize, BTreeMap<usize, (CropBox, CropBox, u32)>)| {
            let plan = waypoints
                .into_iter()
                .map(|(pos, (crop0, crop1, n))| (pos, crop0, crop1, n))
                .collect();
            (count, plan)
        })
        .boxed()
}

pub fn hold_pans(names: &[String], plan: &[(usize, CropBox, CropBox, u32)]) -> Vec<PanSpec> {
    plan.iter()
        .map(|&(pos, crop0, crop1, n)| {
            PanSpec::hold(&names[pos], Some(crop0))
                .with_crop1(crop1)
                .repeated(n)
                .expect("positive repeat count")
        })
        .collect()
}
