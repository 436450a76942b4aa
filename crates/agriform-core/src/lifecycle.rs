//! Lifecycle state machine contract
//!
//! `LifecycleState` is the seam between a phase enum and the code that
//! drives it. `FormPhase` is the one implementor today; the conformance
//! suite below keeps any future phase enum honest without duplicating
//! its transition tests.

/// Contract for a finite lifecycle state machine.
///
/// Implementors must keep four things in agreement:
///
/// 1. `can_transition_to(next)` is true exactly when `next` appears in
///    `valid_next_states()`
/// 2. a terminal state has an empty `valid_next_states()`
/// 3. a non-terminal state has at least one valid next state
/// 4. `all_states()` lists every variant, each exactly once
pub trait LifecycleState: Copy + Eq + Sized + 'static {
    /// Whether the machine may move from `self` to `next`
    fn can_transition_to(self, next: Self) -> bool;

    /// Every state reachable from `self` in one step
    fn valid_next_states(self) -> Vec<Self>;

    /// Whether `self` has no transitions out
    fn is_terminal(self) -> bool;

    /// Every variant of the state enum
    fn all_states() -> &'static [Self];
}

#[cfg(test)]
pub mod conformance_tests {
    //! Checks that any `LifecycleState` implementor must pass. Call
    //! `run_all_tests::<T>()` from the implementor's test module.

    use super::*;

    /// `can_transition_to` and `valid_next_states` must agree on every
    /// ordered pair of states.
    pub fn test_transition_consistency<T: LifecycleState + std::fmt::Debug>() {
        for &from in T::all_states() {
            let nexts = from.valid_next_states();
            for &to in T::all_states() {
                assert_eq!(
                    from.can_transition_to(to),
                    nexts.contains(&to),
                    "{from:?} -> {to:?}: predicate and next-state list disagree"
                );
            }
        }
    }

    /// A terminal state neither lists next states nor accepts any
    /// transition; a non-terminal state lists at least one.
    pub fn test_terminal_states<T: LifecycleState + std::fmt::Debug>() {
        for &state in T::all_states() {
            if state.is_terminal() {
                assert!(
                    state.valid_next_states().is_empty(),
                    "terminal {state:?} lists next states: {:?}",
                    state.valid_next_states()
                );
                for &to in T::all_states() {
                    assert!(
                        !state.can_transition_to(to),
                        "terminal {state:?} accepts a transition to {to:?}"
                    );
                }
            } else {
                assert!(
                    !state.valid_next_states().is_empty(),
                    "non-terminal {state:?} is a dead end"
                );
            }
        }
    }

    /// `all_states` must not repeat a variant.
    pub fn test_all_states_unique<T: LifecycleState + std::fmt::Debug>() {
        let all = T::all_states();
        for (i, &a) in all.iter().enumerate() {
            for &b in &all[i + 1..] {
                assert_ne!(a, b, "all_states() repeats {a:?}");
            }
        }
    }

    /// Run the whole conformance suite for one state type.
    pub fn run_all_tests<T: LifecycleState + std::fmt::Debug>() {
        test_transition_consistency::<T>();
        test_terminal_states::<T>();
        test_all_states_unique::<T>();
    }
}
