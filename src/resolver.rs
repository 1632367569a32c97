//! Variable resolution.
//! Builds the [`VariableContext`] for one provisioning run by walking a template's
//! variable declarations in order. Prompt messages and defaults may reference earlier
//! variables and are interpolated against the values resolved so far.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::catalog::{TemplateDescriptor, VariableSpec, VariableType};
use crate::error::Result;
use crate::generate::random_string;
use crate::interpolate::interpolate;
use crate::prompt::Prompter;

/// Resolved variable values in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableContext {
    values: IndexMap<String, String>,
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Renders a catalog default to text. Strings are interpolated, other scalars are
/// stringified and `null` becomes empty.
fn render_default(default: Option<&serde_json::Value>, context: &VariableContext) -> String {
    match default {
        Some(serde_json::Value::String(s)) => interpolate(s, context),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Index of `default` within `options`, or 0 when absent.
pub fn initial_selection(options: &[String], default: &str) -> usize {
    options.iter().position(|option| option == default).unwrap_or(0)
}

fn is_acceptable(kind: VariableType, required: bool, value: &str) -> bool {
    if required && value.is_empty() {
        return false;
    }
    match kind {
        VariableType::Number => value.is_empty() || value.trim().parse::<f64>().is_ok(),
        _ => true,
    }
}

fn ask(
    prompter: &dyn Prompter,
    message: &str,
    kind: VariableType,
    options: &[String],
    default: &str,
) -> Result<String> {
    match kind {
        VariableType::Text | VariableType::Number => prompter.text(message, default),
        VariableType::Password => prompter.password(message),
        VariableType::Confirm => {
            let default = matches!(default.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "y");
            Ok(prompter.confirm(message, default)?.to_string())
        }
        VariableType::Select => {
            let picked = prompter.select(message, options, initial_selection(options, default))?;
            Ok(options.get(picked).cloned().unwrap_or_default())
        }
    }
}

/// Resolves every variable declared by `template`, strictly in declaration order.
///
/// # Returns
/// * `Result<VariableContext>` - One value per declared variable
///
/// # Errors
/// * `Error::PromptError` if user interaction fails
pub fn resolve_variables(
    template: &TemplateDescriptor,
    prompter: &dyn Prompter,
) -> Result<VariableContext> {
    let mut context = VariableContext::new();

    for variable in &template.variables {
        let value = match variable {
            VariableSpec::Prompted { name, prompt, kind, options, default, required } => {
                let message = interpolate(prompt, &context);
                let default = render_default(default.as_ref(), &context);
                loop {
                    let answer = ask(prompter, &message, *kind, options, &default)?;
                    if is_acceptable(*kind, *required, &answer) {
                        break answer;
                    }
                    warn!("'{}' requires a valid value", name);
                }
            }
            VariableSpec::Generated { generate, length, .. } => random_string(*generate, *length),
        };
        debug!("Resolved variable '{}'", variable.name());
        context.insert(variable.name(), value);
    }

    Ok(context)
}
