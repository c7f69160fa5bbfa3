#![no_main]

use algoviz_core::generate::sort::bubble_sort;
use algoviz_core::{Cell, Step, StepKind, ViewState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary steps against a small array view: the reducer either applies
    // a step or rejects it, and never panics or grows the array.
    let Ok(trace) = bubble_sort(&[3, 1, 2]) else {
        return;
    };
    let mut view = ViewState::initial(&trace);
    for (ordinal, chunk) in data.chunks(3).enumerate() {
        let [tag, a, b] = [chunk[0], *chunk.get(1).unwrap_or(&0), *chunk.get(2).unwrap_or(&0)];
        let (a, b) = (usize::from(a % 8), usize::from(b % 8));
        let kind = match tag % 10 {
            0 => StepKind::Compare { i: a, j: b },
            1 => StepKind::Swap { i: a, j: b },
            2 => StepKind::SetValue { index: a, value: b as i64 },
            3 => StepKind::MarkSorted { index: a },
            4 => StepKind::MarkRange { lo: a, hi: b },
            5 => StepKind::Found { index: a },
            6 => StepKind::Visit { node: a, from: None },
            7 => StepKind::TableFill { cell: Cell::new(a, b), value: 0, note: None },
            8 => StepKind::CallPush { frame: a },
            _ => StepKind::Complete { index: Some(a), note: None },
        };
        let step = Step { ordinal: ordinal as u64, kind };
        let _ = view.apply(&step);
        if let ViewState::Array(array) = &view {
            assert_eq!(array.values.len(), 3);
        }
    }
});
