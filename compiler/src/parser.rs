use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::{
    error::PhaseUiError,
    types::{EnumType, Field, FieldKind, Group, Message, NumericKind, Schema},
    utils::{error, quote},
};

lazy_static! {
    static ref MESSAGE_OPEN:    Regex = Regex::new(r"^message +(ParamSet|Result) *\{").unwrap();
    static ref ENUM_OPEN:       Regex = Regex::new(r"^enum +(\S+?) *\{").unwrap();
    static ref ENUM_MEMBER:     Regex = Regex::new(r"^(\S+?) *= *-?\d+ *;").unwrap();
    static ref GROUP_DIRECTIVE: Regex = Regex::new(r"^// *GROUP: *(\S+)$").unwrap();
    static ref FIELD_DECL:      Regex = Regex::new(r"^(?:optional +)?(\S+?) +(\S+?) *= *\d+ *; *// *(.*?)$").unwrap();
}

/// Type token of the status text slot of a group.
pub const INFO_TYPE: &str = "string";
/// Type token of the image slot of a group.
pub const IMAGE_TYPE: &str = "Image";

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Outside,
    InMessage(Message),
    InEnum(Message, String),
}

#[derive(Debug)]
struct EnumDef {
    message: Message,
    members: Vec<String>,
}

/// Line-oriented recognizer for the `ParamSet`/`Result` subset of a proto file.
#[derive(Debug)]
struct SchemaParser {
    mode:          Mode,
    groups:        Vec<Group>,
    group_index:   HashMap<String, usize>,
    current_group: Option<usize>,
    enums:         HashMap<String, EnumDef>,
}

/// Parse schema text into groups. The first malformed line aborts the parse.
pub fn parse_schema(text: &str) -> Result<Schema, PhaseUiError> {
    let mut parser = SchemaParser {
        mode:          Mode::Outside,
        groups:        Vec::new(),
        group_index:   HashMap::new(),
        current_group: None,
        enums:         HashMap::new(),
    };

    for (index, raw) in text.lines().enumerate() {
        parser.feed(index + 1, raw.trim())?;
    }

    if parser.mode != Mode::Outside {
        warn!(mode = ?parser.mode, "schema ended inside an open block");
    }

    Ok(Schema { groups: parser.groups })
}

impl SchemaParser {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), PhaseUiError> {
        if line.is_empty() {
            return Ok(());
        }
        trace!(line = line_no, text = line, "schema line");

        match self.mode.clone() {
            Mode::Outside => {
                if let Some(caps) = MESSAGE_OPEN.captures(line) {
                    let message = match &caps[1] {
                        "ParamSet" => Message::ParamSet,
                        _          => Message::Result,
                    };
                    debug!(%message, line = line_no, "entering message");
                    self.mode = Mode::InMessage(message);
                }
                Ok(())
            }
            Mode::InEnum(message, name) => self.enum_line(message, &name, line_no, line),
            Mode::InMessage(message)    => self.message_line(message, line_no, line),
        }
    }

    fn enum_line(&mut self, message: Message, name: &str, line_no: usize, line: &str) -> Result<(), PhaseUiError> {
        if line.starts_with('}') {
            self.close_enum(name);
            self.mode = Mode::InMessage(message);
            return Ok(());
        }
        if let Some(caps) = ENUM_MEMBER.captures(line) {
            if let Some(def) = self.enums.get_mut(name) {
                def.members.push(caps[1].to_string());
            }
            Ok(())
        } else if line.starts_with("//") {
            Ok(())
        } else {
            Err(error("Unknown enum line", line_no, line))
        }
    }

    fn message_line(&mut self, message: Message, line_no: usize, line: &str) -> Result<(), PhaseUiError> {
        if let Some(caps) = ENUM_OPEN.captures(line) {
            let name = caps[1].to_string();
            if self.enums.contains_key(&name) {
                return Err(PhaseUiError::DuplicateEnum { name, line: line_no });
            }
            self.enums.insert(name.clone(), EnumDef { message, members: Vec::new() });

            // `enum Mode { A = 0; B = 1; }` on a single line
            let rest = &line[caps.get(0).map_or(line.len(), |m| m.end())..];
            match rest.find('}') {
                Some(close) => {
                    for member in rest[..close].split(';').map(str::trim).filter(|m| !m.is_empty()) {
                        self.enum_line(message, &name, line_no, &format!("{};", member))?;
                    }
                    self.close_enum(&name);
                }
                None => self.mode = Mode::InEnum(message, name),
            }
            return Ok(());
        }

        if line.starts_with('}') {
            debug!(%message, line = line_no, "leaving message");
            self.mode = Mode::Outside;
            return Ok(());
        }

        if let Some(caps) = GROUP_DIRECTIVE.captures(line) {
            self.select_group(&caps[1]);
            return Ok(());
        }

        match FIELD_DECL.captures(line) {
            Some(caps) => self.declare_field(message, &caps[1], &caps[2], &caps[3], line_no, line),
            None       => Err(error("Line has incorrect structure", line_no, line)),
        }
    }

    fn close_enum(&self, name: &str) {
        if let Some(def) = self.enums.get(name) {
            debug!(name, members = def.members.len(), "recorded enum");
        }
    }

    fn select_group(&mut self, name: &str) {
        let index = match self.group_index.get(name) {
            Some(&index) => index,
            None => {
                debug!(group = name, "new group");
                self.groups.push(Group::new(name));
                self.group_index.insert(name.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.current_group = Some(index);
    }

    fn declare_field(
        &mut self,
        message:   Message,
        type_name: &str,
        name:      &str,
        label:     &str,
        line_no:   usize,
        line:      &str,
    ) -> Result<(), PhaseUiError> {
        let group_index = self.current_group.ok_or_else(|| PhaseUiError::MissingGroup {
            line: line_no,
            text: quote(line),
        })?;

        let kind = if let Some(def) = self.enums.get(type_name) {
            FieldKind::Enum(EnumType {
                name:    type_name.to_string(),
                message: def.message,
                options: def.members.clone(),
            })
        } else if type_name == INFO_TYPE || type_name == IMAGE_TYPE {
            return self.declare_slot(message, type_name, name, group_index, line_no);
        } else {
            classify_numeric(type_name, line_no)?
        };

        if message != Message::ParamSet {
            return Err(PhaseUiError::MisplacedField {
                msg:  format!("{} field {} must be declared in message ParamSet", kind, quote(name)),
                line: line_no,
            });
        }

        let group = &mut self.groups[group_index];
        debug!(group = %group.name, field = name, %kind, "field");
        group.params.push(Field {
            kind,
            name:  name.to_string(),
            label: label.to_string(),
            line:  line_no,
        });
        Ok(())
    }

    /// Folds a `string` or `Image` field into its group's info/image slot.
    fn declare_slot(
        &mut self,
        message:     Message,
        type_name:   &str,
        name:        &str,
        group_index: usize,
        line_no:     usize,
    ) -> Result<(), PhaseUiError> {
        if message != Message::Result {
            return Err(PhaseUiError::MisplacedField {
                msg:  format!("{} field {} must be declared in message Result", type_name, quote(name)),
                line: line_no,
            });
        }

        let group = &mut self.groups[group_index];
        let (slot, description) = if type_name == INFO_TYPE {
            (&mut group.info_label, "info label")
        } else {
            (&mut group.image, "image")
        };
        if slot.is_some() {
            return Err(PhaseUiError::DuplicateSlot {
                slot:  description,
                group: group.name.clone(),
                line:  line_no,
            });
        }
        debug!(group = %group.name, field = name, slot = description, "result slot");
        *slot = Some(name.to_string());
        Ok(())
    }
}

/// Maps a scalar alias or one of the wrapper message names onto a numeric kind.
fn classify_numeric(type_name: &str, line_no: usize) -> Result<FieldKind, PhaseUiError> {
    match type_name {
        "int32" | "int64"  => return Ok(FieldKind::numeric(NumericKind::Int)),
        "float" | "double" => return Ok(FieldKind::numeric(NumericKind::Double)),
        _ => {}
    }

    match type_name.parse::<FieldKind>() {
        Ok(kind) if kind.is_composite() => Ok(kind),
        Err(PhaseUiError::UnknownModifier { tag, .. }) => {
            Err(PhaseUiError::UnknownModifier { tag, line: line_no })
        }
        _ => Err(PhaseUiError::UnknownType { type_name: type_name.to_string(), line: line_no }),
    }
}
