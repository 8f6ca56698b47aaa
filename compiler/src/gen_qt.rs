//! Qt code generation.
//!
//! Four passes walk the same [`Schema`]: the constructor, `applyResults()`,
//! `applyParamSet()` and `getParamSet()`. The first two return the member
//! declarations they introduce; [`compile_schema_to_qt`] concatenates them, in
//! pass order, into the `private:` section.

use tracing::debug;

use crate::{
    config::GeneratorConfig,
    naming::{self, Caption, Editor, FieldWidgets},
    templates::{postamble, preamble},
    types::{Field, FieldKind, Group, NumericKind, Schema},
    writer::CodeWriter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CppType {
    GroupBox,
    HBoxLayout,
    Widget,
    GridLayout,
    CheckBox,
    Label,
    ComboBox,
    DoubleSpinBox,
    SpacerItem,
    Image,
}

impl CppType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CppType::GroupBox      => "QGroupBox*",
            CppType::HBoxLayout    => "QHBoxLayout*",
            CppType::Widget        => "QWidget*",
            CppType::GridLayout    => "QGridLayout*",
            CppType::CheckBox      => "QCheckBox*",
            CppType::Label         => "QLabel*",
            CppType::ComboBox      => "QComboBox*",
            CppType::DoubleSpinBox => "QDoubleSpinBox*",
            CppType::SpacerItem    => "QSpacerItem*",
            CppType::Image         => "QImage",
        }
    }
}

/// One declaration of the generated `private:` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub cpp_type: CppType,
    pub name:     String,
}

impl Member {
    fn new(cpp_type: CppType, name: &str) -> Self {
        Member { cpp_type, name: name.to_string() }
    }
}

/// Generates the complete controller header for `schema`.
pub fn compile_schema_to_qt(schema: &Schema, config: &GeneratorConfig) -> String {
    let mut w = CodeWriter::new();
    w.raw(&preamble(config));
    w.blank();
    w.indent();

    let mut members = emit_constructor(schema, config, &mut w);
    members.extend(emit_apply_results(schema, config, &mut w));
    emit_apply_params(schema, config, &mut w);
    emit_get_params(schema, config, &mut w);

    w.unindent();
    w.line("private:");
    w.blank();
    w.indent();
    for member in &members {
        w.line(&format!("{} {};", member.cpp_type.as_str(), member.name));
    }
    w.unindent();
    w.raw(&postamble(config));

    debug!(groups = schema.groups.len(), members = members.len(), "generated controller");
    w.finish()
}

/// Where the widgets of one group row are parented and laid out.
struct Row<'a> {
    parent: &'a str,
    grid:   &'a str,
    index:  usize,
}

/// Constructor plus `resetImageLabels()`.
pub fn emit_constructor(schema: &Schema, config: &GeneratorConfig, w: &mut CodeWriter) -> Vec<Member> {
    let mut members = Vec::new();
    let mut reset_lines = Vec::new();

    let header = format!(
        "explicit {}(QScrollArea *area, QVBoxLayout *areaLayout) {{",
        config.class_name
    );
    w.block(&header, "}", |w| {
        for group in &schema.groups {
            construct_group(group, config, w, &mut members, &mut reset_lines);
        }
        w.line("resetImageLabels();");
    });
    w.blank();

    // Placeholder texts are set in one place, after every group exists.
    w.block("void resetImageLabels() {", "}", |w| {
        for line in &reset_lines {
            w.line(line);
        }
    });
    w.blank();

    debug!(pass = "construction", members = members.len(), "pass done");
    members
}

fn construct_group(
    group:       &Group,
    config:      &GeneratorConfig,
    w:           &mut CodeWriter,
    members:     &mut Vec<Member>,
    reset_lines: &mut Vec<String>,
) {
    w.line(&format!("// GROUP {}", group.name));

    let group_obj = naming::group_box(&group.name);
    members.push(Member::new(CppType::GroupBox, &group_obj));
    w.line(&format!("{} = new QGroupBox(area);", group_obj));
    w.line(&format!("{}->setTitle(QString::fromUtf8(\"{}\"));", group_obj, group.name));

    let h_layout_obj = naming::h_layout(&group.name);
    members.push(Member::new(CppType::HBoxLayout, &h_layout_obj));
    w.line(&format!("{} = new QHBoxLayout({});", h_layout_obj, group_obj));

    let left_obj = naming::left_container(&group.name);
    members.push(Member::new(CppType::Widget, &left_obj));
    w.line(&format!("{} = new QWidget({});", left_obj, group_obj));
    w.line(&format!("{}->addWidget({});", h_layout_obj, left_obj));

    let grid_obj = naming::grid_layout(&group.name);
    members.push(Member::new(CppType::GridLayout, &grid_obj));
    w.line(&format!("{} = new QGridLayout({});", grid_obj, left_obj));
    w.line(&format!("{}->setContentsMargins(0, 0, 0, 0);", grid_obj));

    let mut row = 0;
    for field in &group.params {
        let at = Row { parent: &left_obj, grid: &grid_obj, index: row };
        construct_field(field, &at, config, w, members);
        row += 1;
    }

    let v_spacer_obj = naming::v_spacer(&group.name);
    members.push(Member::new(CppType::SpacerItem, &v_spacer_obj));
    w.line(&format!(
        "{} = new QSpacerItem(229, 89, QSizePolicy::Minimum, QSizePolicy::Expanding);",
        v_spacer_obj
    ));
    w.line(&format!("{}->addItem({}, {}, 0, 1, 3);", grid_obj, v_spacer_obj, row));
    row += 1;

    if let Some(info) = &group.info_label {
        let info_obj = naming::label(info);
        members.push(Member::new(CppType::Label, &info_obj));
        w.line(&format!("{} = new QLabel({});", info_obj, left_obj));
        w.line(&format!("{}->setText(QString::fromUtf8(\"{}\"));", info_obj, info));
        w.line(&format!("{}->addWidget({}, {}, 0, 1, 3);", grid_obj, info_obj, row));
    }

    let h_spacer_obj = naming::h_spacer(&group.name);
    members.push(Member::new(CppType::SpacerItem, &h_spacer_obj));
    w.line(&format!(
        "{} = new QSpacerItem(446, 20, QSizePolicy::Expanding, QSizePolicy::Minimum);",
        h_spacer_obj
    ));
    w.line(&format!("{}->addItem({});", h_layout_obj, h_spacer_obj));

    // The image panel sits beside the grid, not inside it.
    if let Some(image) = &group.image {
        let image_obj = naming::label(image);
        members.push(Member::new(CppType::Label, &image_obj));
        w.line(&format!("{} = new QLabel({});", image_obj, group_obj));
        w.line(&format!("{}->setMinimumSize(QSize(0, {}));", image_obj, config.image_height));
        w.line(&format!("{}->setMaximumSize(QSize(16777215, {}));", image_obj, config.image_height));
        w.line(&format!("{}->setAlignment(Qt::AlignCenter);", image_obj));
        w.line(&format!("{}->addWidget({});", h_layout_obj, image_obj));
        reset_lines.push(format!("{}->setText(QString::fromUtf8(\"{}\"));", image_obj, image));
    }

    w.line(&format!("areaLayout->addWidget({});", group_obj));
    w.blank();
}

fn construct_field(
    field:   &Field,
    at:      &Row<'_>,
    config:  &GeneratorConfig,
    w:       &mut CodeWriter,
    members: &mut Vec<Member>,
) {
    let widgets = FieldWidgets::of(field);

    let caption = match &widgets.caption {
        Caption::Label(name) => {
            members.push(Member::new(CppType::Label, name));
            w.line(&format!("{} = new QLabel({});", name, at.parent));
            name
        }
        Caption::Check(name) => {
            members.push(Member::new(CppType::CheckBox, name));
            w.line(&format!("{} = new QCheckBox({});", name, at.parent));
            name
        }
    };
    w.line(&format!("{}->setText(QString::fromUtf8(\"{}\"));", caption, field.label));
    w.line(&format!("{}->addWidget({}, {}, 0, 1, 1);", at.grid, caption, at.index));

    let decimals = match &field.kind {
        FieldKind::Numeric { numeric: NumericKind::Int, .. }    => config.int_decimals,
        FieldKind::Numeric { numeric: NumericKind::Double, .. } => config.double_decimals,
        FieldKind::Enum(_)                                      => 0,
    };

    match &widgets.editor {
        Editor::Combo(combo) => {
            members.push(Member::new(CppType::ComboBox, combo));
            w.line(&format!("{} = new QComboBox({});", combo, at.parent));
            for option in field.options() {
                w.line(&format!("{}->addItem(QString::fromUtf8(\"{}\"));", combo, option));
            }
            w.line(&format!("{}->addWidget({}, {}, 1, 1, 2);", at.grid, combo, at.index));
        }
        Editor::Spin(spin) => {
            construct_spin(spin, 1, decimals, at, config, w, members);
        }
        Editor::Range { min, max } => {
            construct_spin(min, 1, decimals, at, config, w, members);
            construct_spin(max, 2, decimals, at, config, w, members);
        }
    }
}

fn construct_spin(
    name:     &str,
    column:   usize,
    decimals: u32,
    at:       &Row<'_>,
    config:   &GeneratorConfig,
    w:        &mut CodeWriter,
    members:  &mut Vec<Member>,
) {
    members.push(Member::new(CppType::DoubleSpinBox, name));
    w.line(&format!("{} = new QDoubleSpinBox({});", name, at.parent));
    w.line(&format!("{}->setDecimals({});", name, decimals));
    w.line(&format!("{}->setMaximum({});", name, config.spin_maximum));
    w.line(&format!("{}->addWidget({}, {}, {}, 1, 1);", at.grid, name, at.index, column));
}

/// `applyResults()`: info texts and decoded images.
pub fn emit_apply_results(schema: &Schema, config: &GeneratorConfig, w: &mut CodeWriter) -> Vec<Member> {
    let mut members = Vec::new();

    let header = format!(
        "void applyResults(const {}::Result &results) {{",
        config.proto_namespace
    );
    w.block(&header, "}", |w| {
        for group in &schema.groups {
            w.line(&format!("// GROUP {}", group.name));

            if let Some(info) = &group.info_label {
                let info_obj = naming::label(info);
                w.block(&format!("if (results.has_{}()) {{", info), "}", |w| {
                    w.line(&format!(
                        "{}->setText(QString::fromStdString(results.{}()));",
                        info_obj, info
                    ));
                });
            }

            if let Some(image) = &group.image {
                let image_obj = naming::label(image);
                let holder = naming::image_holder(image);
                members.push(Member::new(CppType::Image, &holder));
                w.block(&format!("if (results.has_{}()) {{", image), "}", |w| {
                    w.block(&format!("if (!results.{}().data().empty()) {{", image), "} else {", |w| {
                        w.line(&format!(
                            "{} = QImage::fromData((const uint8_t *) results.{}().data().c_str(), results.{}().data().size()).copy();",
                            holder, image, image
                        ));
                        w.line(&format!("{}->setPixmap(QPixmap::fromImage({}));", image_obj, holder));
                    });
                    w.indent();
                    w.line(&format!("{}->setText(\"Empty\");", image_obj));
                    w.unindent();
                    w.line("}");
                });
            }
        }
    });
    w.blank();

    debug!(pass = "results", members = members.len(), "pass done");
    members
}

/// `applyParamSet()`: payload → widgets.
pub fn emit_apply_params(schema: &Schema, config: &GeneratorConfig, w: &mut CodeWriter) {
    let header = format!(
        "void applyParamSet(const {}::ParamSet &p) {{",
        config.proto_namespace
    );
    w.block(&header, "}", |w| {
        for group in &schema.groups {
            w.line(&format!("// GROUP {}", group.name));
            for field in &group.params {
                load_field(field, w);
            }
        }
    });
    w.blank();
    debug!(pass = "apply params", "pass done");
}

fn load_field(field: &Field, w: &mut CodeWriter) {
    let name = &field.name;
    let widgets = FieldWidgets::of(field);

    if let Caption::Check(check) = &widgets.caption {
        w.line(&format!("{}->setChecked(p.{}().enabled());", check, name));
    }

    match &widgets.editor {
        Editor::Combo(combo) => {
            w.line(&format!("{}->setCurrentIndex(p.{}());", combo, name));
        }
        Editor::Spin(spin) => {
            let accessor = if field.kind.is_toggled() { ".val()" } else { "" };
            w.line(&format!("{}->setValue(p.{}(){});", spin, name, accessor));
        }
        Editor::Range { min, max } => {
            w.line(&format!("{}->setValue(p.{}().min());", min, name));
            w.line(&format!("{}->setValue(p.{}().max());", max, name));
        }
    }
}

/// `getParamSet()`: widgets → fresh payload, one setter per field.
pub fn emit_get_params(schema: &Schema, config: &GeneratorConfig, w: &mut CodeWriter) {
    let header = format!("{}::ParamSet getParamSet() const {{", config.proto_namespace);
    w.block(&header, "}", |w| {
        w.line(&format!("{}::ParamSet p;", config.proto_namespace));
        for group in &schema.groups {
            w.line(&format!("// GROUP {}", group.name));
            for field in &group.params {
                w.line(&extract_field(field, config));
            }
        }
        w.line("return p;");
    });
    w.blank();
    debug!(pass = "get params", fields = schema.field_count(), "pass done");
}

fn extract_field(field: &Field, config: &GeneratorConfig) -> String {
    let name = &field.name;
    let widgets = FieldWidgets::of(field);

    match (&field.kind, &widgets.editor) {
        (FieldKind::Enum(enum_type), Editor::Combo(combo)) => format!(
            "p.set_{}(({}::{}::{}){}->currentIndex());",
            name, config.proto_namespace, enum_type.message, enum_type.name, combo
        ),
        (kind, Editor::Spin(spin)) if !kind.is_composite() => {
            format!("p.set_{}({}->value());", name, spin)
        }
        (kind, editor) => {
            let mut args = Vec::new();
            if let Caption::Check(check) = &widgets.caption {
                args.push(format!("{}->isChecked()", check));
            }
            match editor {
                Editor::Spin(spin)         => args.push(format!("{}->value()", spin)),
                Editor::Range { min, max } => {
                    args.push(format!("{}->value()", min));
                    args.push(format!("{}->value()", max));
                }
                Editor::Combo(combo)       => args.push(format!("{}->currentIndex()", combo)),
            }
            format!("p.set_allocated_{}(alloc{}({}));", name, kind, args.join(", "))
        }
    }
}
