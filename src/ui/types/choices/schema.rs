use anyhow::{Context, Result, bail};
use schemars::Schema;
use serde_json::{Map, Value};
use std::fmt;

/// One field of a choice's `params`, as described by its JSON Schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub type_name: String,
    pub default: Option<Value>,
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.type_name)?;
        if let Some(d) = &self.default {
            write!(f, " = {d}")?;
        } else if self.required {
            write!(f, " [required]")?;
        }
        if let Some(desc) = &self.description {
            write!(f, ": {desc}")?;
        }
        Ok(())
    }
}

/// Describes the `params` of the branch tagged `kind_key` in a tagged-enum schema.
pub fn parameter_specs(root: &Schema, kind_key: &str) -> Result<Vec<ParameterSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    let branches = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    let branch = branches
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|b| b.get("properties").and_then(Value::as_object))
        .find(|props| tag_of(props) == Some(kind_key));
    let Some(props) = branch else {
        bail!("no branch found for type={kind_key}");
    };

    let Some(params) = props
        .get("params")
        .and_then(Value::as_object)
        .and_then(|p| resolve(root_obj, p))
    else {
        return Ok(vec![]);
    };
    let Some(fields) = params.get("properties").and_then(Value::as_object) else {
        return Ok(vec![]);
    };
    let required: Vec<&str> = params
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut out = Vec::with_capacity(fields.len());
    for (name, field) in fields {
        let obj = field
            .as_object()
            .and_then(|o| resolve(root_obj, o))
            .with_context(|| format!("failed to resolve schema of '{name}'"))?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        out.push(ParameterSpec {
            name: name.clone(),
            title: text("title").unwrap_or_else(|| name.clone()),
            description: text("description"),
            required: required.contains(&name.as_str()),
            type_name: type_name(obj.get("type")),
            default: obj.get("default").cloned(),
        });
    }
    Ok(out)
}

fn tag_of(props: &Map<String, Value>) -> Option<&str> {
    let tag = props.get("type")?.as_object()?;
    if let Some(c) = tag.get("const").and_then(Value::as_str) {
        return Some(c);
    }
    match tag.get("enum").and_then(Value::as_array)?.as_slice() {
        [only] => only.as_str(),
        _ => None,
    }
}

/// Follows a local `$ref` such as `#/$defs/SlidingParams`.
fn resolve<'a>(
    root: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    let Some(Value::String(r)) = obj.get("$ref") else {
        return Some(obj);
    };
    let mut cur = root;
    for seg in r.strip_prefix("#/")?.split('/') {
        let seg = seg.replace("~1", "/").replace("~0", "~");
        cur = cur.get(&seg)?.as_object()?;
    }
    Some(cur)
}

fn type_name(ty: Option<&Value>) -> String {
    match ty {
        Some(Value::String(s)) => s.clone(),
        // Option<T> shows up as ["T", "null"]
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(Value::as_str)
            .find(|s| *s != "null")
            .unwrap_or("null")
            .to_string(),
        _ => "object".to_string(),
    }
}
