use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PhaseUiError;

/// The two top-level protobuf messages the parser looks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Message {
    ParamSet,
    Result,
}

impl Message {
    pub fn as_str(&self) -> &'static str {
        match self {
            Message::ParamSet => "ParamSet",
            Message::Result   => "Result",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NumericKind {
    Int,
    Double,
}

impl NumericKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericKind::Int    => "Int",
            NumericKind::Double => "Double",
        }
    }
}

/// An enum type resolved while parsing, together with the message that
/// declared it (generated casts need `package::<Message>::<Enum>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumType {
    pub name:    String,
    pub message: Message,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Numeric {
        numeric: NumericKind,
        toggled: bool,
        ranged:  bool,
    },
    Enum(EnumType),
}

impl FieldKind {
    pub fn numeric(numeric: NumericKind) -> Self {
        FieldKind::Numeric { numeric, toggled: false, ranged: false }
    }

    pub fn is_toggled(&self) -> bool {
        matches!(self, FieldKind::Numeric { toggled: true, .. })
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self, FieldKind::Numeric { ranged: true, .. })
    }

    /// Whether the kind travels through one of the wrapper messages
    /// (`ToggledDouble`, `IntRange`, ...) instead of a bare scalar.
    pub fn is_composite(&self) -> bool {
        self.is_toggled() || self.is_ranged()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Numeric { numeric, toggled, ranged } => {
                if *toggled {
                    f.write_str("Toggled")?;
                }
                f.write_str(numeric.as_str())?;
                if *ranged {
                    f.write_str("Range")?;
                }
                Ok(())
            }
            FieldKind::Enum(enum_type) => write!(f, "Enum{}", enum_type.name),
        }
    }
}

/// Parses the numeric tags (`Int`, `ToggledDoubleRange`, ...). Enum kinds are
/// not parseable from a tag alone since their options live in the schema.
///
/// Errors carry line 0; callers that know the schema line replace it.
impl FromStr for FieldKind {
    type Err = PhaseUiError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let (toggled, rest) = match tag.strip_prefix("Toggled") {
            Some(rest) => (true, rest),
            None       => (false, tag),
        };
        let (ranged, core) = match rest.strip_suffix("Range") {
            Some(core) => (true, core),
            None       => (false, rest),
        };
        let numeric = match core {
            "Int"    => NumericKind::Int,
            "Double" => NumericKind::Double,
            _ if toggled || ranged => {
                return Err(PhaseUiError::UnknownModifier { tag: tag.to_string(), line: 0 });
            }
            _ => {
                return Err(PhaseUiError::UnknownType { type_name: tag.to_string(), line: 0 });
            }
        };
        Ok(FieldKind::Numeric { numeric, toggled, ranged })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub kind:  FieldKind,
    pub name:  String,
    pub label: String,
    pub line:  usize,
}

impl Field {
    /// Enum members in declared order; empty for numeric kinds.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Enum(enum_type) => &enum_type.options,
            FieldKind::Numeric { .. }  => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name:       String,
    pub params:     Vec<Field>,
    pub info_label: Option<String>,
    pub image:      Option<String>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Group {
            name:       name.to_string(),
            params:     Vec::new(),
            info_label: None,
            image:      None,
        }
    }
}

/// Groups in first-appearance order of their `// GROUP:` directive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub groups: Vec<Group>,
}

impl Schema {
    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|g| g.params.len()).sum()
    }
}
