//! Minimal behavior tree for turn-based decisions.
//!
//! Every tick completes immediately: a node either succeeds or fails, there
//! is no running state.

use super::AiContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value { Status::Success } else { Status::Failure }
    }
}

/// A behavior tree node evaluated against a monster's blackboard.
pub trait Behavior: Send + Sync {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status;
}

pub type BehaviorTree = Box<dyn Behavior>;

impl Behavior for BehaviorTree {
    #[inline]
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        (**self).tick(ctx)
    }
}

/// Short-circuiting AND over its children.
pub struct Sequence {
    children: Vec<BehaviorTree>,
}

impl Sequence {
    pub fn new(children: Vec<BehaviorTree>) -> Self {
        Self { children }
    }
}

impl Behavior for Sequence {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        for child in &self.children {
            if child.tick(ctx) == Status::Failure {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Short-circuiting OR: tries children in priority order.
pub struct Selector {
    children: Vec<BehaviorTree>,
}

impl Selector {
    pub fn new(children: Vec<BehaviorTree>) -> Self {
        Self { children }
    }
}

impl Behavior for Selector {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        for child in &self.children {
            if child.tick(ctx) == Status::Success {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

#[inline]
pub fn sequence(children: Vec<BehaviorTree>) -> BehaviorTree {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector(children: Vec<BehaviorTree>) -> BehaviorTree {
    Box::new(Selector::new(children))
}

#[inline]
pub fn leaf<B: Behavior + 'static>(node: B) -> BehaviorTree {
    Box::new(node)
}
