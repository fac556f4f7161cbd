//! Mermaid rendering of the phrase protocol.
//!
//! Generates a `stateDiagram-v2` by walking every engine state and the
//! structural successor of each legal choice, so the picture is derived
//! from the same table the engine runs on.

use crate::protocol::{Choice, EngineState};

/// Renders the engine protocol as Mermaid `stateDiagram-v2`.
///
/// Choices that lead from the same state to the same successor share one
/// edge. The malformed branch of `no-continuation` is drawn as an extra
/// edge into `invalid`.
#[must_use]
pub fn render_state_diagram() -> String {
    let mut lines = vec!["stateDiagram-v2".to_string()];
    lines.push(format!("    [*] --> {}", slug(EngineState::Start)));

    for state in EngineState::ALL {
        if state.is_terminal() {
            continue;
        }
        for (next, choices) in grouped_edges(state) {
            let label = choices
                .iter()
                .map(|c| c.id())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("    {} --> {} : {label}", slug(state), slug(next)));
        }
        if state.accepts(Choice::NoContinuation) {
            lines.push(format!(
                "    {} --> {} : {} (malformed)",
                slug(state),
                slug(EngineState::Invalid),
                Choice::NoContinuation.id()
            ));
        }
    }

    lines.push(format!("    {} --> [*]", slug(EngineState::Done)));
    lines.push(format!(
        "    note right of {}\n        reset to start a new phrase\n    end note",
        slug(EngineState::Invalid)
    ));
    lines.join("\n")
}

/// Legal choices of `state` grouped by successor, in first-seen order.
fn grouped_edges(state: EngineState) -> Vec<(EngineState, Vec<Choice>)> {
    let mut edges: Vec<(EngineState, Vec<Choice>)> = Vec::new();
    for &choice in state.legal_choices() {
        let Some(next) = state.successor(choice) else {
            continue;
        };
        match edges.iter_mut().find(|(to, _)| *to == next) {
            Some((_, choices)) => choices.push(choice),
            None => edges.push((next, vec![choice])),
        }
    }
    edges
}

/// Mermaid state ids may not contain `-`.
fn slug(state: EngineState) -> String {
    state.name().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_header_and_initial_edge() {
        let diagram = render_state_diagram();
        let mut lines = diagram.lines();
        assert_eq!(lines.next(), Some("stateDiagram-v2"));
        assert_eq!(lines.next(), Some("    [*] --> start"));
    }

    #[test]
    fn every_legal_choice_appears_on_an_edge() {
        let diagram = render_state_diagram();
        for state in EngineState::ALL {
            for choice in state.legal_choices() {
                let edge_from = format!("    {} --> ", slug(state));
                assert!(
                    diagram
                        .lines()
                        .filter(|l| l.starts_with(&edge_from))
                        .any(|l| l.contains(choice.id())),
                    "no edge for {choice} from {state}"
                );
            }
        }
    }

    #[test]
    fn start_edges_are_grouped() {
        let diagram = render_state_diagram();
        assert!(diagram.contains("    start --> attack_outcome : attack-left, attack-right"));
        assert!(diagram.contains(
            "    start --> done : point-in-line-left, point-in-line-right, simultaneous"
        ));
    }

    #[test]
    fn malformed_branch_leads_to_invalid() {
        let diagram = render_state_diagram();
        assert!(diagram.contains("    continuation --> invalid : no-continuation (malformed)"));
        assert!(diagram.contains("    continuation --> continuation : no-continuation"));
    }

    #[test]
    fn state_ids_have_no_dashes() {
        for state in EngineState::ALL {
            assert!(!slug(state).contains('-'));
        }
    }

    #[test]
    fn done_is_final() {
        assert!(render_state_diagram().contains("    done --> [*]"));
    }
}
