use serde::{Deserialize, Serialize};

/// Visual transition a surface uses for one structural edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAnimation {
    #[default]
    None,
    Fade,
    Right,
    Left,
    Top,
    Bottom,
    Middle,
    Automatic,
}

/// The kind of edit an animation is chosen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationAction {
    Delete,
    Insert,
    Reload,
}

/// One animation per [`AnimationAction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionAnimations {
    pub delete: RowAnimation,
    pub insert: RowAnimation,
    pub reload: RowAnimation,
}

impl ActionAnimations {
    /// The same animation for every action.
    pub fn uniform(animation: RowAnimation) -> Self {
        Self {
            delete: animation,
            insert: animation,
            reload: animation,
        }
    }

    pub fn get(&self, action: AnimationAction) -> RowAnimation {
        match action {
            AnimationAction::Delete => self.delete,
            AnimationAction::Insert => self.insert,
            AnimationAction::Reload => self.reload,
        }
    }
}

/// Animations a surface applies while committing a batch.
///
/// Defaults to [`RowAnimation::None`] everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadAnimations {
    pub rows: ActionAnimations,
    pub sections: ActionAnimations,
}

impl ReloadAnimations {
    /// The same animation for every row and section action.
    pub fn uniform(animation: RowAnimation) -> Self {
        Self {
            rows: ActionAnimations::uniform(animation),
            sections: ActionAnimations::uniform(animation),
        }
    }

    /// Animation for an item-level edit.
    pub fn for_row(&self, action: AnimationAction) -> RowAnimation {
        self.rows.get(action)
    }

    /// Animation for a section-level edit.
    pub fn for_section(&self, action: AnimationAction) -> RowAnimation {
        self.sections.get(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_no_animation() {
        let animations = ReloadAnimations::default();
        assert_eq!(animations.for_row(AnimationAction::Insert), RowAnimation::None);
        assert_eq!(animations.for_section(AnimationAction::Reload), RowAnimation::None);
    }

    #[test]
    fn per_action_lookup() {
        let mut animations = ReloadAnimations::uniform(RowAnimation::Fade);
        animations.rows.delete = RowAnimation::Left;
        assert_eq!(animations.for_row(AnimationAction::Delete), RowAnimation::Left);
        assert_eq!(animations.for_row(AnimationAction::Insert), RowAnimation::Fade);
        assert_eq!(animations.for_section(AnimationAction::Delete), RowAnimation::Fade);
    }
}
