use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Identifier of a booth as it appears in the plan data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoothId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BoothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoothId::Number(n) => write!(f, "{}", n),
            BoothId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BoothId {
    fn from(n: i64) -> Self {
        BoothId::Number(n)
    }
}

impl From<i32> for BoothId {
    fn from(n: i32) -> Self {
        BoothId::Number(n as i64)
    }
}

impl From<&str> for BoothId {
    fn from(s: &str) -> Self {
        BoothId::Text(s.to_string())
    }
}

/// Position and size in percent of the reference image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[cfg(test)]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[cfg(test)]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Key the booth name was read from. Plan data written for the public site
/// uses `nom`; exports keep whichever key came in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameKey {
    #[default]
    Name,
    Nom,
}

impl NameKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKey::Name => "name",
            NameKey::Nom => "nom",
        }
    }
}

const ID: &str = "id";
const DISPLAY_ID: &str = "displayId";
const X: &str = "x";
const Y: &str = "y";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";

/// One booth record. Serialized through a JSON object so records come back
/// out with their original keys, key order and unknown fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Booth {
    pub id: BoothId,
    pub display_id: Option<Value>,
    pub name: String,
    pub name_key: NameKey,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fields the editor does not use, written back untouched on export.
    pub extra: Map<String, Value>,
    key_order: Vec<String>,
}

impl PartialEq for Booth {
    // Key order is presentation only.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.display_id == other.display_id
            && self.name == other.name
            && self.name_key == other.name_key
            && self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
            && self.extra == other.extra
    }
}

fn take_number(record: &mut Map<String, Value>, key: &str) -> Result<f64, String> {
    match record.remove(key) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("field `{}` is out of range", key)),
        Some(other) => Err(format!("field `{}` must be a number, got {}", key, other)),
        None => Err(format!("missing field `{}`", key)),
    }
}

/// Whole numbers are written without a fractional part, as the site's own
/// data files are.
fn number_value(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
        Value::Number(Number::from(v as i64))
    } else {
        Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl TryFrom<Map<String, Value>> for Booth {
    type Error = String;

    fn try_from(mut record: Map<String, Value>) -> Result<Self, Self::Error> {
        let key_order = record.keys().cloned().collect();

        let id = record.remove(ID).ok_or_else(|| format!("missing field `{}`", ID))?;
        let id: BoothId = serde_json::from_value(id)
            .map_err(|_| "field `id` must be a number or a string".to_string())?;

        let name_key = if record.contains_key(NameKey::Nom.as_str()) {
            NameKey::Nom
        } else {
            NameKey::Name
        };
        let name = match record.remove(name_key.as_str()) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let display_id = match record.remove(DISPLAY_ID) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        };

        Ok(Self {
            id,
            display_id,
            name,
            name_key,
            x: take_number(&mut record, X)?,
            y: take_number(&mut record, Y)?,
            width: take_number(&mut record, WIDTH)?,
            height: take_number(&mut record, HEIGHT)?,
            extra: record,
            key_order,
        })
    }
}

impl From<Booth> for Map<String, Value> {
    fn from(booth: Booth) -> Self {
        let mut known = Map::new();
        let id = match booth.id {
            BoothId::Number(n) => Value::from(n),
            BoothId::Text(s) => Value::String(s),
        };
        known.insert(ID.to_string(), id);
        if let Some(display_id) = booth.display_id {
            known.insert(DISPLAY_ID.to_string(), display_id);
        }
        known.insert(booth.name_key.as_str().to_string(), Value::String(booth.name));
        known.insert(X.to_string(), number_value(booth.x));
        known.insert(Y.to_string(), number_value(booth.y));
        known.insert(WIDTH.to_string(), number_value(booth.width));
        known.insert(HEIGHT.to_string(), number_value(booth.height));

        let mut extra = booth.extra;
        let mut record = Map::new();
        for key in &booth.key_order {
            if let Some(value) = known.remove(key).or_else(|| extra.remove(key)) {
                record.insert(key.clone(), value);
            }
        }
        record.extend(known);
        record.extend(extra);
        record
    }
}

impl Booth {
    #[cfg(test)]
    pub fn new(id: impl Into<BoothId>, name: &str, rect: PercentRect) -> Self {
        Self {
            id: id.into(),
            display_id: None,
            name: name.to_string(),
            name_key: NameKey::Name,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            extra: Map::new(),
            key_order: Vec::new(),
        }
    }

    /// Label shown to the operator: `displayId` unless it is missing or
    /// falsy (`0`, `false`, empty string), then the id.
    pub fn label(&self) -> String {
        match &self.display_id {
            None | Some(Value::Null) | Some(Value::Bool(false)) => self.id.to_string(),
            Some(Value::String(s)) if s.is_empty() => self.id.to_string(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => self.id.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn rect(&self) -> PercentRect {
        PercentRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: PercentRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}
