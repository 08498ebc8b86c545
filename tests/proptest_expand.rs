use croppan::crop::CropBox;
use croppan::pan::{expand_pans, Frame, PanSpec};
use proptest::prelude::*;

mod proptest_helpers;
use proptest_helpers::{arb_crop, arb_hold_plan, frame_names, hold_pans};

fn collect<'a>(names: &'a [String], pans: Vec<PanSpec>) -> Vec<Frame<'a>> {
    expand_pans(names, pans)
        .expect("start expansion")
        .collect::<Result<Vec<_>, _>>()
        .expect("expand frames")
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn frame_count_matches_repeats((count, plan) in arb_hold_plan(40, 6)) {
        let names = frame_names(count);
        let frames = collect(&names, hold_pans(&names, &plan));

        let extra: usize = plan.iter().map(|&(_, _, _, n)| n as usize - 1).sum();
        prop_assert_eq!(frames.len(), count + extra);
    }

    #[test]
    fn frames_follow_image_order((count, plan) in arb_hold_plan(40, 6)) {
        let names = frame_names(count);
        let frames = collect(&names, hold_pans(&names, &plan));

        let mut runs: Vec<&str> = frames.iter().map(|f| f.image).collect();
        runs.dedup();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(runs, expected);
    }

    #[test]
    fn holding_a_crop_never_moves_it(
        count in 2usize..60,
        start in 0usize..60,
        len in 0usize..60,
        n in 1u32..5,
        crop in arb_crop(),
    ) {
        let names = frame_names(count);
        let start = start % count;
        let end = (start + len).min(count - 1);
        let pan = PanSpec::pan(&names[start], Some(crop), &names[end], crop)
            .repeated(n)
            .unwrap();

        for frame in collect(&names, vec![pan]) {
            prop_assert_eq!(frame.crop, crop);
        }
    }

    #[test]
    fn pans_land_exactly_and_stay_between_endpoints(
        count in 2usize..60,
        start in 0usize..60,
        len in 1usize..60,
        from in arb_crop(),
        to in arb_crop(),
    ) {
        let names = frame_names(count);
        let start = start % (count - 1);
        let end = (start + len).min(count - 1);
        let frames = collect(&names, vec![PanSpec::pan(&names[start], Some(from), &names[end], to)]);
        prop_assert_eq!(frames.len(), count);

        for frame in &frames[..=start] {
            prop_assert_eq!(frame.crop, from);
        }
        for frame in &frames[end..] {
            prop_assert_eq!(frame.crop, to);
        }
        for frame in &frames[start..=end] {
            for (v, (a, b)) in frame.crop.to_array().into_iter().zip(from.to_array().into_iter().zip(to.to_array())) {
                prop_assert!(a.min(b) <= v && v <= a.max(b), "{} not between {} and {}", v, a, b);
            }
        }
    }

    #[test]
    fn inherited_start_continues_from_settled_crop(
        from in arb_crop(),
        mid in arb_crop(),
        to in arb_crop(),
    ) {
        let names = frame_names(12);
        let pans = vec![
            PanSpec::pan(&names[0], Some(from), &names[4], mid),
            PanSpec::pan(&names[5], None, &names[9], to),
        ];
        let frames = collect(&names, pans);

        prop_assert_eq!(frames[4].crop, mid);
        prop_assert_eq!(frames[5].crop, mid);
        prop_assert_eq!(frames[9].crop, to);
        prop_assert_eq!(frames[11].crop, to);
    }
}

#[test]
fn equal_endpoints_spread_over_repeats() {
    let names = frame_names(3);
    let crop = CropBox::new(0, 0, 100, 100);
    let pan = PanSpec::hold(&names[1], Some(crop)).repeated(7).unwrap();
    let frames = collect(&names, vec![pan]);
    assert_eq!(frames.len(), 9);
    assert!(frames.iter().all(|f| f.crop == crop));
}
