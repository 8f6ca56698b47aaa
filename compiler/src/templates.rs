use crate::config::GeneratorConfig;

const QT_INCLUDES: [&str; 11] = [
    "QtWidgets/QScrollArea",
    "QtWidgets/QGroupBox",
    "QtWidgets/QCheckBox",
    "QtWidgets/QLabel",
    "QtWidgets/QDoubleSpinBox",
    "QtWidgets/QComboBox",
    "QtWidgets/QGridLayout",
    "QtWidgets/QHBoxLayout",
    "QtWidgets/QVBoxLayout",
    "QtGui/QImage",
    "QtGui/QPixmap",
];

/// Everything up to and including `public:`.
pub fn preamble(config: &GeneratorConfig) -> String {
    let mut out = String::new();
    out.push_str("/* Auto generated by phaseui. Do not edit. */\n\n");
    out.push_str(&format!("#ifndef {}\n#define {}\n\n", config.include_guard, config.include_guard));
    for include in QT_INCLUDES {
        out.push_str(&format!("#include <{}>\n", include));
    }
    for include in &config.includes {
        out.push_str(&format!("#include \"{}\"\n", include));
    }
    out.push_str(&format!("\nnamespace {} {{\n\n", config.namespace));
    out.push_str(&format!("class {} {{\npublic:\n", config.class_name));
    out
}

/// Closes the class, the namespace and the include guard.
pub fn postamble(config: &GeneratorConfig) -> String {
    format!(
        "\n}};\n\n}}  // namespace {}\n\n#endif  // {}\n",
        config.namespace, config.include_guard
    )
}
