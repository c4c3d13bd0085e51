//! 消耗逻辑属性测试

use super::counter::PopulationCounter;
use super::pointer::{DepletionService, PointerState};
use proptest::prelude::*;

proptest! {
    #[test]
    fn counter_floors_under_any_pointer_sequence(
        initial in 0u32..150,
        presses in prop::collection::vec(any::<bool>(), 0..600),
    ) {
        let mut pointer = PointerState::default();
        let mut counter = PopulationCounter::new(initial);
        let mut cycles = 0u32;

        // true 为按下，false 为松开
        for down in presses {
            if down {
                if DepletionService::pointer_down(&mut pointer, &mut counter, None) {
                    cycles += 1;
                }
            } else {
                DepletionService::pointer_up(&mut pointer, None);
            }
            prop_assert!(counter.remaining() <= initial);
        }

        prop_assert_eq!(counter.remaining(), initial.saturating_sub(cycles));
    }
}
