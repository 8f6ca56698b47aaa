//! Identifier derivation for generated members.
//!
//! Every pass goes through these helpers, so a widget referenced by
//! `applyParamSet()` or `getParamSet()` is always the one the constructor
//! declared. Collisions between schema names are not detected.

use crate::types::{Field, FieldKind};

pub fn group_box(group: &str) -> String {
    format!("group{}", group)
}

pub fn h_layout(group: &str) -> String {
    format!("hLayout{}", group)
}

pub fn left_container(group: &str) -> String {
    format!("leftContainer{}", group)
}

pub fn grid_layout(group: &str) -> String {
    format!("gLayout{}", group)
}

pub fn v_spacer(group: &str) -> String {
    format!("{}VSpacer", group)
}

pub fn h_spacer(group: &str) -> String {
    format!("{}HSpacer", group)
}

pub fn label(name: &str) -> String {
    format!("{}Label", name)
}

pub fn check(name: &str) -> String {
    format!("{}Check", name)
}

pub fn spin(name: &str) -> String {
    format!("{}Spin", name)
}

pub fn min_spin(name: &str) -> String {
    format!("{}MinSpin", name)
}

pub fn max_spin(name: &str) -> String {
    format!("{}MaxSpin", name)
}

pub fn combo(name: &str) -> String {
    format!("{}Combo", name)
}

pub fn image_holder(name: &str) -> String {
    format!("{}Image", name)
}

/// The widget in column 0 of a field row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caption {
    Label(String),
    Check(String),
}

impl Caption {
    pub fn name(&self) -> &str {
        match self {
            Caption::Label(name) | Caption::Check(name) => name,
        }
    }
}

/// The value widget(s) of a field row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editor {
    Combo(String),
    Spin(String),
    Range { min: String, max: String },
}

/// All widget names of one field row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWidgets {
    pub caption: Caption,
    pub editor:  Editor,
}

impl FieldWidgets {
    pub fn of(field: &Field) -> Self {
        let name = field.name.as_str();
        let caption = if field.kind.is_toggled() {
            Caption::Check(check(name))
        } else {
            Caption::Label(label(name))
        };
        let editor = match &field.kind {
            FieldKind::Enum(_)                         => Editor::Combo(combo(name)),
            FieldKind::Numeric { ranged: true, .. }    => Editor::Range { min: min_spin(name), max: max_spin(name) },
            FieldKind::Numeric { ranged: false, .. }   => Editor::Spin(spin(name)),
        };
        FieldWidgets { caption, editor }
    }

    /// Number of member widgets backing the row.
    pub fn count(&self) -> usize {
        match self.editor {
            Editor::Combo(_) | Editor::Spin(_) => 2,
            Editor::Range { .. }               => 3,
        }
    }
}
