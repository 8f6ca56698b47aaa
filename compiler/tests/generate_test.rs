use std::collections::HashSet;

use pretty_assertions::assert_eq;
use regex::Regex;

use phaseui_compiler::{
    compile_schema, compile_schema_to_qt, compile_to_qt,
    gen_qt::{emit_apply_results, emit_constructor, CppType, Member},
    templates::preamble,
    types::FieldKind,
    writer::CodeWriter,
    GeneratorConfig, PhaseUiError,
};

const DETECTOR: &str = r#"
syntax = "proto3";
package package;

message ParamSet {
  enum Color {
    RED = 0;
    BLUE = 1;
  }
  enum Mode { SINGLE = 0; BURST = 1; AUTO = 2; }

  // GROUP: Brightness
  Color enemy_color = 1;  // Enemy color
  int32 threshold = 2;  // Threshold
  ToggledDouble gamma = 3;  // Gamma

  // GROUP: Contour
  DoubleRange area = 4;  // Area
  IntRange pixels = 5;  // Pixels
  ToggledIntRange width = 6;  // Width
  optional ToggledDoubleRange exposure = 7;  // Exposure
  ToggledInt blur = 8;  // Blur

  // GROUP: Fire
  Mode mode = 9;  // Mode
  double delay = 10;  // Delay
}

message Result {
  // GROUP: Brightness
  string brightness_info = 1;  // Info
  Image brightness_image = 2;  // Image

  // GROUP: Contour
  Image contour_image = 3;  // Image
}
"#;

fn generate(text: &str) -> String {
    compile_to_qt(text, &GeneratorConfig::default()).expect("compile_to_qt failed")
}

/// Lines of the generated method whose header starts with `signature`.
fn method_body<'a>(output: &'a str, signature: &str) -> Vec<&'a str> {
    output
        .lines()
        .skip_while(|l| !l.trim_start().starts_with(signature))
        .skip(1)
        .take_while(|l| *l != "    }")
        .collect()
}

fn members_of(text: &str) -> Vec<Member> {
    let schema = compile_schema(text).unwrap();
    let config = GeneratorConfig::default();
    let mut w = CodeWriter::new();
    let mut members = emit_constructor(&schema, &config, &mut w);
    members.extend(emit_apply_results(&schema, &config, &mut w));
    members
}

#[test]
fn test_single_int_field_full_output() {
    let text = "message ParamSet {\n  // GROUP: Motion\n  int32 speed = 1;  // Speed\n}\n";
    let body = r#"    explicit PhaseController(QScrollArea *area, QVBoxLayout *areaLayout) {
        // GROUP Motion
        groupMotion = new QGroupBox(area);
        groupMotion->setTitle(QString::fromUtf8("Motion"));
        hLayoutMotion = new QHBoxLayout(groupMotion);
        leftContainerMotion = new QWidget(groupMotion);
        hLayoutMotion->addWidget(leftContainerMotion);
        gLayoutMotion = new QGridLayout(leftContainerMotion);
        gLayoutMotion->setContentsMargins(0, 0, 0, 0);
        speedLabel = new QLabel(leftContainerMotion);
        speedLabel->setText(QString::fromUtf8("Speed"));
        gLayoutMotion->addWidget(speedLabel, 0, 0, 1, 1);
        speedSpin = new QDoubleSpinBox(leftContainerMotion);
        speedSpin->setDecimals(0);
        speedSpin->setMaximum(9999);
        gLayoutMotion->addWidget(speedSpin, 0, 1, 1, 1);
        MotionVSpacer = new QSpacerItem(229, 89, QSizePolicy::Minimum, QSizePolicy::Expanding);
        gLayoutMotion->addItem(MotionVSpacer, 1, 0, 1, 3);
        MotionHSpacer = new QSpacerItem(446, 20, QSizePolicy::Expanding, QSizePolicy::Minimum);
        hLayoutMotion->addItem(MotionHSpacer);
        areaLayout->addWidget(groupMotion);

        resetImageLabels();
    }

    void resetImageLabels() {
    }

    void applyResults(const package::Result &results) {
        // GROUP Motion
    }

    void applyParamSet(const package::ParamSet &p) {
        // GROUP Motion
        speedSpin->setValue(p.speed());
    }

    package::ParamSet getParamSet() const {
        package::ParamSet p;
        // GROUP Motion
        p.set_speed(speedSpin->value());
        return p;
    }

private:

    QGroupBox* groupMotion;
    QHBoxLayout* hLayoutMotion;
    QWidget* leftContainerMotion;
    QGridLayout* gLayoutMotion;
    QLabel* speedLabel;
    QDoubleSpinBox* speedSpin;
    QSpacerItem* MotionVSpacer;
    QSpacerItem* MotionHSpacer;

};

}  // namespace meta

#endif  // UI_PHASES_H
"#;
    let config = GeneratorConfig::default();
    let expected = format!("{}\n{}", preamble(&config), body);
    assert_eq!(generate(text), expected);
}

#[test]
fn test_toggled_double_range() {
    let text = "message ParamSet {\n// GROUP: Camera\nToggledDoubleRange exposure = 1; // Exposure\n}\n";
    let output = generate(text);

    assert!(output.contains("    QCheckBox* exposureCheck;\n"));
    assert!(output.contains("    QDoubleSpinBox* exposureMinSpin;\n"));
    assert!(output.contains("    QDoubleSpinBox* exposureMaxSpin;\n"));
    assert!(!output.contains("exposureLabel"));
    assert!(output.contains("exposureMinSpin->setDecimals(2);"));
    assert!(output.contains("exposureMaxSpin->setDecimals(2);"));
    assert!(output.contains("gLayoutCamera->addWidget(exposureMinSpin, 0, 1, 1, 1);"));
    assert!(output.contains("gLayoutCamera->addWidget(exposureMaxSpin, 0, 2, 1, 1);"));

    assert_eq!(
        method_body(&output, "void applyParamSet"),
        [
            "        // GROUP Camera",
            "        exposureCheck->setChecked(p.exposure().enabled());",
            "        exposureMinSpin->setValue(p.exposure().min());",
            "        exposureMaxSpin->setValue(p.exposure().max());",
        ]
    );
    assert!(output.contains(
        "p.set_allocated_exposure(allocToggledDoubleRange(exposureCheck->isChecked(), exposureMinSpin->value(), exposureMaxSpin->value()));"
    ));
}

#[test]
fn test_enum_field() {
    let text = "message ParamSet {\nenum Mode {\nA = 0;\nB = 1;\n}\n// GROUP: Fire\nMode mode = 1; // Mode\n}\n";
    let schema = compile_schema(text).unwrap();
    match &schema.groups[0].params[0].kind {
        FieldKind::Enum(enum_type) => assert_eq!(enum_type.options, ["A", "B"]),
        other => panic!("expected an enum kind, got {:?}", other),
    }

    let output = compile_schema_to_qt(&schema, &GeneratorConfig::default());
    let items: Vec<_> = output.lines().filter(|l| l.contains("modeCombo->addItem")).collect();
    assert_eq!(
        items,
        [
            "        modeCombo->addItem(QString::fromUtf8(\"A\"));",
            "        modeCombo->addItem(QString::fromUtf8(\"B\"));",
        ]
    );
    assert!(output.contains("gLayoutFire->addWidget(modeCombo, 0, 1, 1, 2);"));
    assert!(output.contains("modeCombo->setCurrentIndex(p.mode());"));
    assert!(output.contains("p.set_mode((package::ParamSet::Mode)modeCombo->currentIndex());"));
}

#[test]
fn test_info_and_image_group() {
    let text = "message ParamSet {\n// GROUP: Armor\nfloat ratio = 1; // Ratio\n}\nmessage Result {\n// GROUP: Armor\nstring armor_info = 1; // Info\nImage armor_image = 2; // Image\n}\n";
    let output = generate(text);

    assert_eq!(
        method_body(&output, "void applyResults"),
        [
            "        // GROUP Armor",
            "        if (results.has_armor_info()) {",
            "            armor_infoLabel->setText(QString::fromStdString(results.armor_info()));",
            "        }",
            "        if (results.has_armor_image()) {",
            "            if (!results.armor_image().data().empty()) {",
            "                armor_imageImage = QImage::fromData((const uint8_t *) results.armor_image().data().c_str(), results.armor_image().data().size()).copy();",
            "                armor_imageLabel->setPixmap(QPixmap::fromImage(armor_imageImage));",
            "            } else {",
            "                armor_imageLabel->setText(\"Empty\");",
            "            }",
            "        }",
        ]
    );

    let constructor = method_body(&output, "explicit PhaseController");
    let position = |needle: &str| {
        constructor
            .iter()
            .position(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("{} not found", needle))
    };
    // info row after the vertical spacer, inside the grid
    assert!(constructor.contains(&"        gLayoutArmor->addWidget(armor_infoLabel, 2, 0, 1, 3);"));
    // image beside the grid, after the horizontal spacer
    assert!(constructor.contains(&"        armor_imageLabel = new QLabel(groupArmor);"));
    assert!(position("hLayoutArmor->addItem(ArmorHSpacer)") < position("hLayoutArmor->addWidget(armor_imageLabel)"));
    assert!(!output.contains("gLayoutArmor->addWidget(armor_imageLabel"));

    // placeholder text only in resetImageLabels()
    assert_eq!(
        method_body(&output, "void resetImageLabels"),
        ["        armor_imageLabel->setText(QString::fromUtf8(\"armor_image\"));"]
    );
    assert!(output.contains("    QImage armor_imageImage;\n"));
}

#[test]
fn test_field_before_group_fails_without_output() {
    let text = "message ParamSet {\n  int32 speed = 1;  // Speed\n}\n";
    let err = compile_to_qt(text, &GeneratorConfig::default()).unwrap_err();
    match &err {
        PhaseUiError::MissingGroup { line, text } => {
            assert_eq!(*line, 2);
            assert_eq!(text, "\"int32 speed = 1;  // Speed\"");
        }
        other => panic!("expected MissingGroup, got {:?}", other),
    }
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_output_is_deterministic() {
    assert_eq!(generate(DETECTOR), generate(DETECTOR));
}

#[test]
fn test_one_setter_per_field() {
    let schema = compile_schema(DETECTOR).unwrap();
    let output = compile_schema_to_qt(&schema, &GeneratorConfig::default());
    let setters = method_body(&output, "package::ParamSet getParamSet")
        .iter()
        .filter(|l| l.trim_start().starts_with("p.set_"))
        .count();
    assert_eq!(setters, schema.field_count());
    assert_eq!(setters, 10);
}

#[test]
fn test_member_count_per_kind() {
    let members = members_of(DETECTOR);
    let count = |t: CppType| members.iter().filter(|m| m.cpp_type == t).count();

    // 3 groups * 6 fixed members
    assert_eq!(count(CppType::GroupBox), 3);
    assert_eq!(count(CppType::SpacerItem), 6);
    // 6 untoggled captions + 1 info label + 2 image labels
    assert_eq!(count(CppType::Label), 9);
    assert_eq!(count(CppType::CheckBox), 4);
    assert_eq!(count(CppType::ComboBox), 2);
    // spinners: threshold, gamma, delay, blur + 2 each for area, pixels, width, exposure
    assert_eq!(count(CppType::DoubleSpinBox), 12);
    assert_eq!(count(CppType::Image), 2);
    assert_eq!(members.len(), 3 * 6 + 9 + 4 + 2 + 12 + 2);

    let output = generate(DETECTOR);
    let private: Vec<_> = output
        .lines()
        .skip_while(|l| *l != "private:")
        .filter(|l| l.starts_with("    ") && l.ends_with(';'))
        .collect();
    assert_eq!(private.len(), members.len());
    assert_eq!(private.last(), Some(&"    QImage contour_imageImage;"));
}

#[test]
fn test_order_is_preserved() {
    let output = generate(DETECTOR);
    let groups: Vec<_> = method_body(&output, "explicit PhaseController")
        .into_iter()
        .filter(|l| l.trim_start().starts_with("// GROUP "))
        .collect();
    assert_eq!(
        groups,
        ["        // GROUP Brightness", "        // GROUP Contour", "        // GROUP Fire"]
    );

    let rows: Vec<_> = output
        .lines()
        .filter(|l| l.contains("gLayoutContour->addWidget(") && l.contains(", 0, 1, 1);"))
        .collect();
    assert_eq!(
        rows,
        [
            "        gLayoutContour->addWidget(areaLabel, 0, 0, 1, 1);",
            "        gLayoutContour->addWidget(pixelsLabel, 1, 0, 1, 1);",
            "        gLayoutContour->addWidget(widthCheck, 2, 0, 1, 1);",
            "        gLayoutContour->addWidget(exposureCheck, 3, 0, 1, 1);",
            "        gLayoutContour->addWidget(blurCheck, 4, 0, 1, 1);",
        ]
    );
    assert!(output.contains("gLayoutContour->addItem(ContourVSpacer, 5, 0, 1, 3);"));
}

#[test]
fn test_loaded_and_extracted_widgets_are_declared() {
    let output = generate(DETECTOR);
    let declared: HashSet<String> = members_of(DETECTOR).into_iter().map(|m| m.name).collect();
    let widget_use = Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)->").unwrap();

    let mut used = 0;
    for signature in ["void applyParamSet", "package::ParamSet getParamSet"] {
        for line in method_body(&output, signature) {
            for caps in widget_use.captures_iter(line) {
                assert!(declared.contains(&caps[1]), "{} used in {} but never declared", &caps[1], signature);
                used += 1;
            }
        }
    }
    assert!(used > 0);
}

#[test]
fn test_composite_helpers() {
    let output = generate(DETECTOR);
    let expected = [
        "p.set_allocated_gamma(allocToggledDouble(gammaCheck->isChecked(), gammaSpin->value()));",
        "p.set_allocated_area(allocDoubleRange(areaMinSpin->value(), areaMaxSpin->value()));",
        "p.set_allocated_pixels(allocIntRange(pixelsMinSpin->value(), pixelsMaxSpin->value()));",
        "p.set_allocated_width(allocToggledIntRange(widthCheck->isChecked(), widthMinSpin->value(), widthMaxSpin->value()));",
        "p.set_allocated_blur(allocToggledInt(blurCheck->isChecked(), blurSpin->value()));",
        "p.set_delay(delaySpin->value());",
        "p.set_enemy_color((package::ParamSet::Color)enemy_colorCombo->currentIndex());",
    ];
    for line in expected {
        assert!(output.contains(line), "missing {}", line);
    }
    assert!(output.contains("gammaSpin->setValue(p.gamma().val());"));
    assert!(output.contains("blurSpin->setDecimals(0);"));
    assert!(output.contains("delaySpin->setDecimals(2);"));
}

#[test]
fn test_custom_config() {
    let config = GeneratorConfig {
        class_name:      "TuningPanel".to_string(),
        namespace:       "rm".to_string(),
        proto_namespace: "proto".to_string(),
        spin_maximum:    100,
        ..GeneratorConfig::default()
    };
    let schema = compile_schema(DETECTOR).unwrap();
    let output = compile_schema_to_qt(&schema, &config);
    assert!(output.contains("class TuningPanel {"));
    assert!(output.contains("explicit TuningPanel(QScrollArea *area, QVBoxLayout *areaLayout) {"));
    assert!(output.contains("void applyResults(const proto::Result &results) {"));
    assert!(output.contains("proto::ParamSet getParamSet() const {"));
    assert!(output.contains("thresholdSpin->setMaximum(100);"));
    assert!(output.ends_with("}  // namespace rm\n\n#endif  // UI_PHASES_H\n"));
}
