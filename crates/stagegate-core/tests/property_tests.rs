//! # Property-Based Tests
//!
//! Invariants of normalization, counting and gating, checked with proptest.

use proptest::collection::vec;
use proptest::prelude::*;
use stagegate_core::{
    CodeRegistry, MemoryStore, Persistence, ProgressController, ProgressState, Step, normalize,
};

/// Latin text with the accents, casing and whitespace users actually type.
const TYPED_TEXT: &str = "[ \ta-zA-ZàâäéèêëîïôöùûüçñÀÂÉÈÊÇÑ]{0,24}";

fn controller() -> ProgressController<MemoryStore> {
    ProgressController::open(CodeRegistry::builtin(), Persistence::new(MemoryStore::new()))
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// normalize(normalize(x)) == normalize(x).
    #[test]
    fn normalize_is_idempotent(text in TYPED_TEXT) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Case and padding never change the canonical form.
    #[test]
    fn normalize_ignores_case_and_padding(text in "[a-zA-Zéèà]{1,16}", pad in "[ \t]{0,4}") {
        let padded = format!("{}{}{}", pad, text.to_uppercase(), pad);
        prop_assert_eq!(normalize(&padded), normalize(&text.to_lowercase()));
    }

    /// Each validate call adds exactly one attempt to its step and none elsewhere.
    #[test]
    fn attempts_count_every_call(calls in vec((1u32..=5, TYPED_TEXT), 0..40)) {
        let mut controller = controller();
        let mut expected = [0u64; 6];

        for (step, input) in &calls {
            let before = controller.attempts(Step(*step));
            controller.validate(Step(*step), input).expect("configured step");
            prop_assert_eq!(controller.attempts(Step(*step)), before + 1);
            expected[*step as usize] += 1;
        }

        for step in 1..=5u32 {
            prop_assert_eq!(controller.attempts(Step(step)), expected[step as usize]);
        }
    }

    /// Once unlocked, a step stays unlocked whatever is typed next.
    #[test]
    fn unlock_is_one_way(inputs in vec(TYPED_TEXT, 0..20)) {
        let mut controller = controller();
        controller.validate(Step(2), "sagittaire").expect("validate");

        for input in &inputs {
            controller.validate(Step(2), input).expect("validate");
            prop_assert!(controller.is_step_unlocked(Step(2)));
        }
    }

    /// can_access_step(k) == is_step_unlocked(k - 1) for k > 1, and step 1 is always open.
    #[test]
    fn gating_follows_predecessor(unlock in vec(any::<bool>(), 5)) {
        let mut controller = controller();
        let secrets = ["yuka", "sagittaire", "albâtre", "olaf", "andré"];
        for (i, flag) in unlock.iter().enumerate() {
            if *flag {
                controller.validate(Step(i as u32 + 1), secrets[i]).expect("validate");
            }
        }

        prop_assert!(controller.can_access_step(Step(1)));
        for k in 2..=6u32 {
            prop_assert_eq!(
                controller.can_access_step(Step(k)),
                controller.is_step_unlocked(Step(k - 1))
            );
        }
    }

    /// Snapshot → state → snapshot is lossless.
    #[test]
    fn snapshot_round_trip(calls in vec((1u32..=5, prop::bool::ANY), 0..30)) {
        let mut controller = controller();
        let secrets = ["yuka", "sagittaire", "albâtre", "olaf", "andré"];
        for (step, correct) in &calls {
            let input = if *correct { secrets[*step as usize - 1] } else { "nope" };
            controller.validate(Step(*step), input).expect("validate");
        }

        let restored = ProgressState::from_persisted(
            controller.registry(),
            controller.persistence().load(),
        );
        prop_assert_eq!(&restored, controller.state());
    }

    /// Progress stays within 0..=100 and hits the ends exactly.
    #[test]
    fn progress_bounded(unlocked in 0usize..=5) {
        let mut controller = controller();
        let secrets = ["yuka", "sagittaire", "albâtre", "olaf", "andré"];
        for (i, secret) in secrets.iter().enumerate().take(unlocked) {
            controller.validate(Step(i as u32 + 1), secret).expect("validate");
        }

        let progress = controller.progress();
        prop_assert!(progress <= 100);
        prop_assert_eq!(progress as usize, unlocked * 20);
    }
}
