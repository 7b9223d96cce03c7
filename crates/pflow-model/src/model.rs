use std::collections::BTreeMap;

use pflow_canonical::{Cid, CidDeriver, CidError};

use crate::token::Token;

/// `@type` / `modelType` of a freshly built model.
pub const DEFAULT_MODEL_TYPE: &str = "PetriNet";

/// Graph node holding tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    /// Externally assigned slot index (uniqueness is not checked).
    pub offset: i64,
    /// Initial marking.
    pub initial: Token,
    /// Capacity; zero means unbounded.
    pub capacity: Token,
    /// Layout x coordinate.
    pub x: i64,
    /// Layout y coordinate.
    pub y: i64,
}

impl Place {
    /// Place at `offset` with zero initial marking and unbounded capacity.
    pub fn new(offset: i64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    /// Sets a single-component initial marking.
    pub fn initial(mut self, initial: i64) -> Self {
        self.initial = Token::from(initial);
        self
    }

    /// Sets a single-component capacity.
    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = Token::from(capacity);
        self
    }

    /// Sets the layout position.
    pub fn at(mut self, x: i64, y: i64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// Graph node that moves tokens. Carries layout only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    /// Layout x coordinate.
    pub x: i64,
    /// Layout y coordinate.
    pub y: i64,
}

impl Transition {
    /// Transition at the given position.
    pub fn at(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Directed edge between two labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arrow {
    /// Label of the source node.
    pub source: String,
    /// Label of the target node.
    pub target: String,
    /// Arc weight; zero means the default weight.
    pub weight: Token,
    /// Inhibitor arc rather than a flow arc.
    pub inhibit: bool,
}

impl Arrow {
    /// Flow arrow with default weight.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    /// Sets a single-component weight.
    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = Token::from(weight);
        self
    }

    /// Marks the arrow as inhibitory.
    pub fn inhibit(mut self) -> Self {
        self.inhibit = true;
        self
    }
}

/// Petri-net-like process model. A value only; it is never executed.
///
/// ```rust
/// use pflow_model::{Arrow, Model, Place, Transition};
///
/// let model = Model::new()
///     .with_place("ready", Place::new(0).initial(1).at(40, 40))
///     .with_transition("start", Transition::at(120, 40))
///     .with_arrow(Arrow::new("ready", "start"));
/// assert_eq!(model.arrows.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Model type tag.
    pub model_type: String,
    /// Places by label.
    pub places: BTreeMap<String, Place>,
    /// Transitions by label.
    pub transitions: BTreeMap<String, Transition>,
    /// Arrows in wire order.
    pub arrows: Vec<Arrow>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Empty model of type [`DEFAULT_MODEL_TYPE`].
    pub fn new() -> Self {
        Self::with_type(DEFAULT_MODEL_TYPE)
    }

    /// Empty model with a custom type tag.
    pub fn with_type(model_type: impl Into<String>) -> Self {
        Self {
            model_type: model_type.into(),
            places: BTreeMap::new(),
            transitions: BTreeMap::new(),
            arrows: Vec::new(),
        }
    }

    /// Adds or replaces a place.
    pub fn with_place(mut self, label: impl Into<String>, place: Place) -> Self {
        self.places.insert(label.into(), place);
        self
    }

    /// Adds or replaces a transition.
    pub fn with_transition(mut self, label: impl Into<String>, transition: Transition) -> Self {
        self.transitions.insert(label.into(), transition);
        self
    }

    /// Appends an arrow.
    pub fn with_arrow(mut self, arrow: Arrow) -> Self {
        self.arrows.push(arrow);
        self
    }

    /// Content identifier of the model's export document.
    ///
    /// A model and the result of decoding its encoding share one identifier.
    pub fn cid(&self, deriver: &CidDeriver) -> Result<Cid, CidError> {
        deriver.from_value(self.to_wire_value())
    }
}
