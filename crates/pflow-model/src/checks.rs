//! Structural checks that decoding deliberately does not enforce.

use std::fmt;

use crate::model::Model;

/// Structural problem found by [`Model::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelIssue {
    /// The same label names both a place and a transition.
    SharedLabel(String),
    /// An arrow endpoint names no place or transition.
    UnknownEndpoint {
        /// Index of the arrow.
        arrow: usize,
        /// Missing label.
        label: String,
    },
    /// An arrow joins two places or two transitions.
    NotBipartite {
        /// Index of the arrow.
        arrow: usize,
    },
}

impl fmt::Display for ModelIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelIssue::SharedLabel(label) => {
                write!(f, "label {:?} is both a place and a transition", label)
            }
            ModelIssue::UnknownEndpoint { arrow, label } => {
                write!(f, "arcs[{}] references unknown node {:?}", arrow, label)
            }
            ModelIssue::NotBipartite { arrow } => {
                write!(f, "arcs[{}] does not join a place and a transition", arrow)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Node {
    Place,
    Transition,
    Both,
}

impl Model {
    /// Reports label collisions and arrows that are dangling or not
    /// place/transition pairs. An empty list means the model is well formed.
    pub fn check(&self) -> Vec<ModelIssue> {
        let mut issues: Vec<ModelIssue> = self
            .places
            .keys()
            .filter(|label| self.transitions.contains_key(*label))
            .map(|label| ModelIssue::SharedLabel(label.clone()))
            .collect();

        for (idx, arrow) in self.arrows.iter().enumerate() {
            let source = self.node(&arrow.source);
            let target = self.node(&arrow.target);
            for (node, label) in [(source, &arrow.source), (target, &arrow.target)] {
                if node.is_none() {
                    issues.push(ModelIssue::UnknownEndpoint {
                        arrow: idx,
                        label: label.clone(),
                    });
                }
            }
            match (source, target) {
                (Some(Node::Place), Some(Node::Transition))
                | (Some(Node::Transition), Some(Node::Place)) => {}
                (Some(_), Some(_)) => issues.push(ModelIssue::NotBipartite { arrow: idx }),
                _ => {}
            }
        }
        issues
    }

    fn node(&self, label: &str) -> Option<Node> {
        match (
            self.places.contains_key(label),
            self.transitions.contains_key(label),
        ) {
            (true, true) => Some(Node::Both),
            (true, false) => Some(Node::Place),
            (false, true) => Some(Node::Transition),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arrow, Model, ModelIssue, Place, Transition};

    #[test]
    fn well_formed_model_has_no_issues() {
        let model = Model::new()
            .with_place("p", Place::new(0))
            .with_transition("t", Transition::default())
            .with_arrow(Arrow::new("p", "t"))
            .with_arrow(Arrow::new("t", "p").weight(2));
        assert!(model.check().is_empty());
    }

    #[test]
    fn problems_are_reported() {
        let model = Model::new()
            .with_place("p", Place::new(0))
            .with_place("q", Place::new(1))
            .with_place("x", Place::new(2))
            .with_transition("x", Transition::default())
            .with_arrow(Arrow::new("p", "q"))
            .with_arrow(Arrow::new("p", "ghost"));

        assert_eq!(
            model.check(),
            vec![
                ModelIssue::SharedLabel("x".into()),
                ModelIssue::NotBipartite { arrow: 0 },
                ModelIssue::UnknownEndpoint {
                    arrow: 1,
                    label: "ghost".into()
                },
            ]
        );
    }
}
