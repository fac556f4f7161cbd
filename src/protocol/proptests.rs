//! Property tests over random walks of legal choices.

use proptest::prelude::*;

use crate::error::PhraseError;
use crate::phrase::{Action, ActionKind, Fencer};

use super::choice::Choice;
use super::engine::PhraseEngine;
use super::state::EngineState;

const VERDICT_SUFFIXES: [&str; 3] = [". Touch left.", ". Touch right.", ". No touch."];

/// Drives an engine by picking `legal[pick % len]` at every step until the
/// engine stops accepting input or the picks run out.
fn walk(picks: &[usize]) -> (PhraseEngine, Vec<Choice>) {
    let mut engine = PhraseEngine::new();
    let mut taken = Vec::new();
    for &pick in picks {
        let legal = engine.legal_choices();
        if legal.is_empty() {
            break;
        }
        let choice = legal[pick % legal.len()];
        taken.push(choice);
        if engine.apply(choice).is_err() {
            break;
        }
    }
    (engine, taken)
}

fn picks() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..8, 0..24)
}

proptest! {
    #[test]
    fn done_phrases_end_with_one_verdict(picks in picks()) {
        let (engine, _) = walk(&picks);
        if engine.is_done() {
            let call = engine.rendered_call();
            prop_assert!(!call.is_empty());
            let matching = VERDICT_SUFFIXES
                .iter()
                .filter(|suffix| call.ends_with(*suffix))
                .count();
            prop_assert_eq!(matching, 1, "call: {}", call);
            let clauses = call.matches(". Touch ").count() + call.matches(". No touch.").count();
            prop_assert_eq!(clauses, 1, "call: {}", call);
        }
    }

    #[test]
    fn done_matches_phrase_completion(picks in picks()) {
        let mut engine = PhraseEngine::new();
        for pick in picks {
            let legal = engine.legal_choices();
            if legal.is_empty() {
                break;
            }
            if engine.apply(legal[pick % legal.len()]).is_err() {
                break;
            }
            prop_assert_eq!(engine.is_done(), engine.phrase().is_complete());
            if engine.is_done() {
                prop_assert!(engine.phrase().result().is_some());
            }
        }
    }

    #[test]
    fn priority_is_set_once_an_opening_is_recorded(picks in picks()) {
        let mut engine = PhraseEngine::new();
        prop_assert_eq!(engine.priority(), None);
        for pick in picks {
            let legal = engine.legal_choices();
            if legal.is_empty() {
                break;
            }
            if engine.apply(legal[pick % legal.len()]).is_err() {
                break;
            }
            let opened = engine
                .phrase()
                .actions()
                .iter()
                .any(|a| matches!(a.kind(), ActionKind::Attack | ActionKind::PointInLine));
            if opened {
                prop_assert!(engine.priority().is_some());
            }
        }
    }

    #[test]
    fn illegal_choices_never_mutate(picks in picks(), probe in 0usize..Choice::ALL.len()) {
        let (mut engine, _) = walk(&picks);
        let choice = Choice::ALL[probe];
        prop_assume!(!engine.legal_choices().contains(&choice));

        let phrase = engine.phrase().clone();
        let state = engine.state();
        let priority = engine.priority();

        let err = engine.apply(choice).unwrap_err();
        let is_invalid_choice = matches!(err, PhraseError::InvalidChoice { .. });
        prop_assert!(is_invalid_choice);
        prop_assert_eq!(engine.phrase(), &phrase);
        prop_assert_eq!(engine.state(), state);
        prop_assert_eq!(engine.priority(), priority);
    }

    #[test]
    fn replaying_a_walk_gives_an_equal_phrase(picks in picks()) {
        let (first, taken) = walk(&picks);
        let mut second = PhraseEngine::new();
        let mut third = PhraseEngine::new();
        for choice in &taken {
            let _ = second.apply(*choice);
            let _ = third.submit_choice(choice.id());
        }
        prop_assert_eq!(first.phrase(), first.phrase());
        prop_assert_eq!(first.phrase(), second.phrase());
        prop_assert_eq!(second.phrase(), first.phrase());
        prop_assert_eq!(second.phrase(), third.phrase());
        prop_assert_eq!(first.phrase(), third.phrase());
        prop_assert_eq!(first.rendered_call(), third.rendered_call());
    }

    #[test]
    fn refusals_follow_the_last_action(picks in picks()) {
        let mut engine = PhraseEngine::new();
        for pick in picks {
            let legal = engine.legal_choices();
            if legal.is_empty() {
                break;
            }
            let choice = legal[pick % legal.len()];
            if choice != Choice::NoContinuation {
                if engine.apply(choice).is_err() {
                    break;
                }
                continue;
            }

            let holder = engine.priority();
            let last = engine.phrase().last().copied();
            let stands = match &last {
                Some(Action::NoRiposte(_)) | None => false,
                Some(action) => action.fencer() != holder,
            };
            match engine.apply(choice) {
                Ok(transition) => {
                    prop_assert!(stands, "refusal accepted after {:?}", last);
                    prop_assert_eq!(transition.to, EngineState::AwaitingContinuation);
                    prop_assert_eq!(transition.priority, holder.map(Fencer::opponent));
                }
                Err(err) => {
                    prop_assert!(!stands, "refusal rejected after {:?}", last);
                    let is_malformed = matches!(err, PhraseError::MalformedPhrase { .. });
                    prop_assert!(is_malformed);
                    prop_assert!(engine.is_malformed());
                    break;
                }
            }
        }
    }

    #[test]
    fn start_is_never_revisited(picks in picks()) {
        let (engine, taken) = walk(&picks);
        if !taken.is_empty() {
            prop_assert_ne!(engine.state(), EngineState::Start);
        }
    }
}
