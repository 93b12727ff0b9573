use crate::booth::Booth;

/// Text for the coordinate readout of one booth.
pub fn format_readout(booth: &Booth) -> String {
    format!(
        "Booth {}: {}\nPosition: x: {:.1}%, y: {:.1}%\nSize: width: {:.1}%, height: {:.1}%",
        booth.label(),
        booth.name,
        booth.x,
        booth.y,
        booth.width,
        booth.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booth::PercentRect;
    use pretty_assertions::assert_eq;

    #[test]
    fn rounds_to_one_decimal() {
        let mut booth = Booth::new(4, "Charcuterie", PercentRect::new(12.345, 7.0, 20.06, 3.94));
        booth.display_id = Some("B4".into());

        assert_eq!(
            format_readout(&booth),
            "Booth B4: Charcuterie\nPosition: x: 12.3%, y: 7.0%\nSize: width: 20.1%, height: 3.9%"
        );
    }
}
