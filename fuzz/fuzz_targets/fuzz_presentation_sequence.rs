#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sheet_core::{SheetConfig, SizeSpec};
use sheet_harness::SheetFixture;
use sheet_runtime::{PresentationState, SheetEvent};

#[derive(Debug, Arbitrary)]
enum Op {
    Present(u8),
    Dismiss,
    PresentationFinished,
    DismissalFinished,
    Drag(u8),
    ContentLayout(u16),
    FooterLayout(u16, bool),
    MaxHeight(Option<u16>),
    Fixed(Vec<u16>),
    Width(u16),
    KeyboardShow(u16),
    KeyboardHide,
    Dimmed(bool, u8),
    Detach,
}

fuzz_target!(|ops: Vec<Op>| {
    let Ok(mut f) = SheetFixture::with_footer(SheetConfig::default(), 800.0) else {
        return;
    };

    for op in ops.into_iter().take(256) {
        match op {
            Op::Present(i) => {
                let _ = f.host.present(usize::from(i % 4));
            }
            Op::Dismiss => {
                let _ = f.host.dismiss();
            }
            Op::PresentationFinished => f.host.presentation_finished(),
            Op::DismissalFinished => f.host.dismissal_finished(),
            Op::Drag(i) => {
                f.drag_to(usize::from(i % 4));
            }
            Op::ContentLayout(h) => {
                let _ = f.host.content_layout_changed(f64::from(h));
            }
            Op::FooterLayout(h, children) => {
                let _ = f.host.footer_layout_changed(f64::from(h), children);
            }
            Op::MaxHeight(max) => {
                let _ = f.host.set_max_height(max.map(f64::from));
            }
            Op::Fixed(heights) => {
                let sizes = heights.into_iter().map(|h| SizeSpec::Fixed(f64::from(h))).collect();
                let _ = f.host.set_sizes(sizes);
            }
            Op::Width(w) => f.host.container_width_changed(f64::from(w)),
            Op::KeyboardShow(h) => f.host.keyboard_will_show(f64::from(h)),
            Op::KeyboardHide => f.host.keyboard_will_hide(),
            Op::Dimmed(dimmed, index) => {
                f.host.set_dimmed(dimmed);
                f.host.set_dimmed_index(usize::from(index));
            }
            Op::Detach => {
                f.host.detach();
            }
        }

        let active = f.host.controller().active_index();
        match f.host.state() {
            PresentationState::Dismissed => assert_eq!(active, None),
            _ => assert!(active.is_none_or(|i| i < f.host.controller().table().len())),
        }
    }

    // Presents and dismisses alternate, starting with a present.
    let mut shown = false;
    for event in f.events.events() {
        match event {
            SheetEvent::Present(_) => {
                assert!(!shown);
                shown = true;
            }
            SheetEvent::Dismiss => {
                assert!(shown);
                shown = false;
            }
            SheetEvent::SizeChange(_) => assert!(shown),
        }
    }
});
