use serde::Deserialize;

use super::{CollisionPolicy, FactoringKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub collision: CollisionPolicy,
    pub factoring: FactoringKind,
}

impl TransformOptions {
    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_factoring(mut self, factoring: FactoringKind) -> Self {
        self.factoring = factoring;
        self
    }
}
