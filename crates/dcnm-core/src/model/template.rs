// ── Configuration templates ──
//
// Built once from the controller's JSON; nothing here is written back.
// Missing metadata reads as "Unknown".

use serde::Serialize;
use serde_json::Value;

const UNKNOWN: &str = "Unknown";

/// A configuration template and its parameters.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub template_type: String,
    pub template_subtype: String,
    pub content_type: String,
    pub supported_platforms: String,
    pub parameters: Vec<TemplateParameter>,
    #[serde(skip)]
    raw: Value,
}

/// A named template parameter (nvPair).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParameter {
    pub name: String,
    pub description: String,
    pub default_value: Option<String>,
    pub mandatory: bool,
}

impl Template {
    pub fn from_json(raw: Value) -> Self {
        let parameters = raw
            .get("parameters")
            .and_then(Value::as_array)
            .map(|params| params.iter().map(TemplateParameter::from_json).collect())
            .unwrap_or_default();

        Self {
            name: text(&raw, "name"),
            description: text(&raw, "description"),
            template_type: text(&raw, "templateType"),
            template_subtype: text(&raw, "templateSubType"),
            content_type: text(&raw, "contentType"),
            supported_platforms: text(&raw, "supportedPlatforms"),
            parameters,
            raw,
        }
    }

    /// The JSON the template was built from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// `name: description`, name padded to 25 columns.
    pub fn summary(&self) -> String {
        format!("{:25}: {}", self.name, self.description)
    }

    pub fn brief(&self) -> String {
        [
            format!("Name: {}", self.name),
            format!("Description: {}", self.description),
            format!("Template Type: {}", self.template_type),
            format!("Template SubType: {}", self.template_subtype),
            format!("Content Type: {}", self.content_type),
            format!("Supported Platforms: {}", self.supported_platforms),
        ]
        .join("\n")
    }

    /// Pretty-printed raw JSON.
    pub fn verbose(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }

    pub fn nvpairs(&self) -> Vec<(&str, Option<&str>, bool)> {
        self.parameters.iter().map(TemplateParameter::nvpair).collect()
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dcnm/ndfc.template {}", self.name)
    }
}

impl TemplateParameter {
    fn from_json(raw: &Value) -> Self {
        let default_value = raw
            .get("metaProperties")
            .and_then(|meta| meta.get("defaultValue"))
            .and_then(scalar);
        let mandatory = raw
            .get("annotations")
            .and_then(|notes| notes.get("IsMandatory"))
            .is_some_and(truthy);

        Self {
            name: text(raw, "name"),
            description: raw
                .get("description")
                .and_then(scalar)
                .unwrap_or_default(),
            default_value,
            mandatory,
        }
    }

    pub fn summary(&self) -> String {
        format!("{:25}: {}", self.name, self.description)
    }

    /// `(name, default, mandatory)`.
    pub fn nvpair(&self) -> (&str, Option<&str>, bool) {
        (&self.name, self.default_value.as_deref(), self.mandatory)
    }
}

fn text(raw: &Value, field: &str) -> String {
    raw.get(field)
        .and_then(scalar)
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

/// Render strings as-is, lists comma-joined, other scalars via JSON.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

/// NDFC annotations carry booleans as `"true"` strings.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
