use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use crate::booth::Booth;
use crate::error::{EditorError, Result};

/// Serializes the booth list as JSON indented with four spaces.
pub fn booths_to_json(booths: &[Booth]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    booths.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn booths_from_json(text: &str) -> Result<Vec<Booth>> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_booths(path: &Path) -> Result<Vec<Booth>> {
    let text = fs::read_to_string(path).map_err(|source| EditorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let booths = booths_from_json(&text)?;
    info!(path = %path.display(), count = booths.len(), "loaded booths");
    Ok(booths)
}

pub fn save_export(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json).map_err(|source| EditorError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = json.len(), "saved layout");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booth::PercentRect;
    use pretty_assertions::assert_eq;

    #[test]
    fn indents_with_four_spaces() {
        let booths = vec![Booth::new(1, "Pain", PercentRect::new(10.0, 10.0, 20.0, 20.0))];
        let json = booths_to_json(&booths).unwrap();
        assert!(json.starts_with("[\n    {\n        \"id\": 1,"));
    }

    #[test]
    fn export_parses_back_to_the_same_list() {
        let mut first = Booth::new(1, "Pain", PercentRect::new(10.25, 10.0, 20.0, 20.0));
        first.display_id = Some("P1".into());
        first.extra.insert("exposant".into(), "Martin".into());
        let second = Booth::new("b2", "Olives", PercentRect::new(-3.0, 101.5, 1.0, 7.75));
        let booths = vec![first, second];

        let parsed = booths_from_json(&booths_to_json(&booths).unwrap()).unwrap();
        assert_eq!(parsed, booths);
    }

    #[test]
    fn demo_plan_exports_with_its_own_keys() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/booths.json");
        let booths = load_booths(&path).unwrap();
        assert_eq!(booths.len(), 4);

        let json = booths_to_json(&booths).unwrap();
        assert!(json.contains("\"nom\": \"Miellerie\""));
        assert!(!json.contains("\"name\""));
        assert!(json.contains("\"exposant\": \"Famille Roux\""));
        assert!(json.contains("\"x\": 40,"));
        assert_eq!(booths_from_json(&json).unwrap(), booths);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_booths(Path::new("/nonexistent/booths.json")).unwrap_err();
        assert!(matches!(err, EditorError::Read { .. }));
    }

    #[test]
    fn load_reports_bad_json() {
        assert!(matches!(booths_from_json("{"), Err(EditorError::Json(_))));
    }
}
