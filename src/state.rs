use crate::data::Pos;

/// The dynamic part of a puzzle: box positions and the worker position.
///
/// Equality and hashing are order-sensitive over `boxes` on purpose -
/// the i-th box carries the i-th weight, so permuting the sequence
/// would silently break the box/weight correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub boxes: Vec<Pos>,
    pub worker: Pos,
}

impl State {
    pub fn new(boxes: Vec<Pos>, worker: Pos) -> State {
        State { boxes, worker }
    }
}
