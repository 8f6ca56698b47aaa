use serde::Serialize;

/// Knobs for the generated header. `Default` matches the layout the
/// hand-written `MainWindow` code is built against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorConfig {
    pub class_name:      String,
    pub namespace:       String,
    pub include_guard:   String,
    /// C++ namespace of the protoc-generated message classes.
    pub proto_namespace: String,
    /// Project headers included after the Qt ones.
    pub includes:        Vec<String>,
    pub spin_maximum:    u32,
    pub int_decimals:    u32,
    pub double_decimals: u32,
    pub image_height:    u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            class_name:      "PhaseController".to_string(),
            namespace:       "meta".to_string(),
            include_guard:   "UI_PHASES_H".to_string(),
            proto_namespace: "package".to_string(),
            includes:        vec!["Parameters.pb.h".to_string(), "Parameters.h".to_string()],
            spin_maximum:    9999,
            int_decimals:    0,
            double_decimals: 2,
            image_height:    360,
        }
    }
}
